use chrono::Local;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod analytics;
mod api;
mod model;
mod pipeline;
mod session;

use api::{ApiClient, ApiError};
use model::{AnalyticsResponse, Category, DraftErrors, Expense, ExpenseDraft};
use pipeline::{format_currency, SortDirection, SortField, ViewState};
use session::{AuthStatus, BrowserStore, SessionUser};

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    List,
    Add,
    Charts,
}

#[function_component(App)]
fn app() -> Html {
    let auth_status = use_state(|| AuthStatus::Checking);
    let session_user = use_state(|| None::<SessionUser>);
    let notice = use_state(|| None::<String>);

    let api = {
        let auth_status = auth_status.clone();
        let session_user = session_user.clone();
        let notice = notice.clone();
        ApiClient::new(Callback::from(move |_| {
            // The interceptor has already cleared storage; route back to
            // the auth screen.
            session_user.set(None);
            notice.set(Some(
                "Your session has expired. Please log in again.".to_string(),
            ));
            auth_status.set(AuthStatus::Unauthenticated);
        }))
    };

    {
        let auth_status = auth_status.clone();
        let session_user = session_user.clone();
        use_effect_with_deps(
            move |_| {
                match session::restore(&BrowserStore, session::now_unix()) {
                    Some(user) => {
                        session_user.set(Some(user));
                        auth_status.set(AuthStatus::Authenticated);
                    }
                    None => auth_status.set(AuthStatus::Unauthenticated),
                }
                || ()
            },
            (),
        );
    }

    let on_authenticated = {
        let auth_status = auth_status.clone();
        let session_user = session_user.clone();
        let notice = notice.clone();
        Callback::from(move |user: SessionUser| {
            session_user.set(Some(user));
            notice.set(None);
            auth_status.set(AuthStatus::Authenticated);
        })
    };

    let on_logout = {
        let auth_status = auth_status.clone();
        let session_user = session_user.clone();
        let notice = notice.clone();
        Callback::from(move |_| {
            session::clear(&BrowserStore);
            session_user.set(None);
            notice.set(Some("You have been logged out".to_string()));
            auth_status.set(AuthStatus::Unauthenticated);
        })
    };

    let content = match *auth_status {
        AuthStatus::Checking => html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Checking session..."}
            </div>
        },
        AuthStatus::Unauthenticated => html! {
            <AuthScreen notice={(*notice).clone()} on_authenticated={on_authenticated} />
        },
        AuthStatus::Authenticated => {
            let username = session_user
                .as_ref()
                .map(|user| user.username.clone())
                .unwrap_or_default();
            html! {
                <div class="min-h-screen bg-background flex flex-col">
                    <Header username={username} on_logout={on_logout} />
                    <main class="flex-1 overflow-y-auto">
                        <Dashboard />
                    </main>
                </div>
            }
        }
    };

    html! {
        <ContextProvider<ApiClient> context={api}>
            { content }
        </ContextProvider<ApiClient>>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    username: String,
    on_logout: Callback<MouseEvent>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex items-center gap-3">
                <div class="w-9 h-9 bg-[#173E63] rounded-full flex items-center justify-center text-white">
                    { icon_wallet() }
                </div>
                <span class="text-[#173E63] text-xl font-black tracking-tight">{"Expense Tracker"}</span>
            </div>
            <div class="flex items-center gap-4">
                <span class="text-sm text-muted-foreground">{ format!("Signed in as {}", props.username) }</span>
                <button onclick={props.on_logout.clone()} class="flex items-center gap-2 px-3 py-2 rounded-xl hover:bg-white/40 transition-colors text-[13px] font-medium text-[#173E63]">
                    { icon_log_out() }
                    <span>{"Log Out"}</span>
                </button>
            </div>
        </header>
    }
}

#[function_component(Dashboard)]
fn dashboard() -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(|| ApiClient::new(Callback::noop()));

    let expenses = use_state(Vec::<Expense>::new);
    let analytics = use_state(AnalyticsResponse::default);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);
    let active_tab = use_state(|| Tab::List);

    let form_amount = use_state(|| "".to_string());
    let form_category = use_state(|| "".to_string());
    let form_note = use_state(|| "".to_string());
    let form_date = use_state(|| "".to_string());
    let form_errors = use_state(DraftErrors::default);
    let form_failure = use_state(|| None::<String>);
    let form_success = use_state(|| None::<String>);
    let saving = use_state(|| false);

    {
        let api = api.clone();
        let expenses = expenses.clone();
        let analytics = analytics.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    // Both fetches settle before the loading flag clears.
                    let fetched = api.fetch_expenses().await;
                    let aggregates = api.fetch_analytics().await;

                    match fetched {
                        Ok(list) => expenses.set(list),
                        Err(ApiError::SessionExpired) => {}
                        Err(err) => load_error.set(Some(err.to_string())),
                    }
                    match aggregates {
                        Ok(data) => analytics.set(data),
                        Err(ApiError::SessionExpired) => {}
                        Err(err) => load_error.set(Some(err.to_string())),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let on_select_tab = {
        let active_tab = active_tab.clone();
        Callback::from(move |tab: Tab| active_tab.set(tab))
    };

    let on_submit = {
        let api = api.clone();
        let expenses = expenses.clone();
        let analytics = analytics.clone();
        let form_amount = form_amount.clone();
        let form_category = form_category.clone();
        let form_note = form_note.clone();
        let form_date = form_date.clone();
        let form_errors = form_errors.clone();
        let form_failure = form_failure.clone();
        let form_success = form_success.clone();
        let saving = saving.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }

            let draft = ExpenseDraft {
                amount: (*form_amount).clone(),
                category: (*form_category).clone(),
                note: (*form_note).clone(),
                date: (*form_date).clone(),
            };

            form_failure.set(None);
            form_success.set(None);

            let payload = match draft.validate(Local::now().date_naive()) {
                Ok(payload) => payload,
                Err(errors) => {
                    form_errors.set(errors);
                    return;
                }
            };

            form_errors.set(DraftErrors::default());
            saving.set(true);

            let api = api.clone();
            let expenses = expenses.clone();
            let analytics = analytics.clone();
            let form_amount = form_amount.clone();
            let form_category = form_category.clone();
            let form_note = form_note.clone();
            let form_date = form_date.clone();
            let form_failure = form_failure.clone();
            let form_success = form_success.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match api.add_expense(&payload).await {
                    Ok(()) => {
                        // The server owns the aggregates; refresh both views
                        // before reporting success.
                        if let Ok(list) = api.fetch_expenses().await {
                            expenses.set(list);
                        }
                        if let Ok(data) = api.fetch_analytics().await {
                            analytics.set(data);
                        }
                        form_amount.set("".to_string());
                        form_category.set("".to_string());
                        form_note.set("".to_string());
                        form_date.set("".to_string());
                        form_success.set(Some("Expense added successfully".to_string()));
                    }
                    Err(ApiError::SessionExpired) => {}
                    Err(err) => form_failure.set(Some(err.to_string())),
                }
                saving.set(false);
            });
        })
    };

    let tab_button = |tab: Tab, label: &'static str, icon: Html| {
        let is_active = *active_tab == tab;
        let class_name = if is_active {
            "px-4 py-2 font-medium text-sm flex items-center gap-2 mr-4 text-[#173E63] border-b-2 border-[#173E63]"
        } else {
            "px-4 py-2 font-medium text-sm flex items-center gap-2 mr-4 text-muted-foreground hover:text-foreground"
        };
        let on_select_tab = on_select_tab.clone();
        html! {
            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select_tab.emit(tab))}>
                { icon }
                { label }
            </button>
        }
    };

    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{"Financial Dashboard"}</h1>
                <p class="text-muted-foreground text-sm mt-1">{"Track, manage, and analyze your personal expenses"}</p>
            </div>

            {
                if let Some(msg) = &*load_error {
                    html! { <p class="mt-4 text-sm text-red-500">{ msg.clone() }</p> }
                } else {
                    html! {}
                }
            }

            <div class="flex border-b border-border mt-6 mb-6">
                { tab_button(Tab::List, "Expense List", icon_list()) }
                { tab_button(Tab::Add, "Add Expense", icon_plus()) }
                { tab_button(Tab::Charts, "Analytics", icon_pie_chart()) }
            </div>

            {
                match *active_tab {
                    Tab::List => html! {
                        <ExpenseTable expenses={(*expenses).clone()} loading={*loading} />
                    },
                    Tab::Add => html! {
                        <div class="max-w-2xl mx-auto bg-card rounded-[10px] p-6 border border-border">
                            <h2 class="text-xl font-semibold text-foreground mb-6">{"Add New Expense"}</h2>
                            <form class="space-y-4" onsubmit={on_submit}>
                                <div class="space-y-1">
                                    <label class="text-sm font-medium text-foreground">{"Amount"}</label>
                                    <input
                                        type="text"
                                        placeholder="0.00"
                                        class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                        value={(*form_amount).clone()}
                                        oninput={{
                                            let form_amount = form_amount.clone();
                                            let form_errors = form_errors.clone();
                                            Callback::from(move |e: InputEvent| {
                                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                form_amount.set(input.value());
                                                let mut next = (*form_errors).clone();
                                                next.amount = None;
                                                form_errors.set(next);
                                            })
                                        }}
                                    />
                                    {
                                        if let Some(msg) = &form_errors.amount {
                                            html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </div>

                                <div class="space-y-1">
                                    <label class="text-sm font-medium text-foreground">{"Category"}</label>
                                    <select
                                        class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                        onchange={{
                                            let form_category = form_category.clone();
                                            let form_errors = form_errors.clone();
                                            Callback::from(move |e: Event| {
                                                let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                                form_category.set(input.value());
                                                let mut next = (*form_errors).clone();
                                                next.category = None;
                                                form_errors.set(next);
                                            })
                                        }}
                                    >
                                        <option value="" selected={form_category.is_empty()}>{"Select a category"}</option>
                                        { for Category::ALL.iter().map(|category| html! {
                                            <option value={category.label()} selected={*form_category == category.label()}>{ category.label() }</option>
                                        }) }
                                    </select>
                                    {
                                        if let Some(msg) = &form_errors.category {
                                            html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </div>

                                <div class="space-y-1">
                                    <label class="text-sm font-medium text-foreground">{"Date"}</label>
                                    <input
                                        type="date"
                                        class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                        value={(*form_date).clone()}
                                        oninput={{
                                            let form_date = form_date.clone();
                                            let form_errors = form_errors.clone();
                                            Callback::from(move |e: InputEvent| {
                                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                form_date.set(input.value());
                                                let mut next = (*form_errors).clone();
                                                next.date = None;
                                                form_errors.set(next);
                                            })
                                        }}
                                    />
                                    {
                                        if let Some(msg) = &form_errors.date {
                                            html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                                        } else {
                                            html! {}
                                        }
                                    }
                                </div>

                                <div class="space-y-1">
                                    <label class="text-sm font-medium text-foreground">{"Note (optional)"}</label>
                                    <input
                                        type="text"
                                        placeholder="What was this for?"
                                        class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                        value={(*form_note).clone()}
                                        oninput={{
                                            let form_note = form_note.clone();
                                            Callback::from(move |e: InputEvent| {
                                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                                form_note.set(input.value());
                                            })
                                        }}
                                    />
                                </div>

                                {
                                    if let Some(msg) = &*form_failure {
                                        html! { <p class="text-sm text-red-500">{ msg.clone() }</p> }
                                    } else if let Some(msg) = &*form_success {
                                        html! { <p class="text-sm text-green-600">{ msg.clone() }</p> }
                                    } else {
                                        html! {}
                                    }
                                }

                                <button
                                    type="submit"
                                    class="w-full bg-[#173E63] text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                                    disabled={*saving}
                                >
                                    { if *saving { "Saving..." } else { "Save Expense" } }
                                </button>
                            </form>
                        </div>
                    },
                    Tab::Charts => html! {
                        <ChartsPanel analytics={(*analytics).clone()} loading={*loading} />
                    },
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseTableProps {
    expenses: Vec<Expense>,
    loading: bool,
}

#[function_component(ExpenseTable)]
fn expense_table(props: &ExpenseTableProps) -> Html {
    let view = use_state(ViewState::default);

    let categories = pipeline::distinct_categories(&props.expenses);
    let rows = pipeline::display_rows(&view, &props.expenses);

    let on_search = {
        let view = view.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*view).clone();
            next.search = input.value();
            view.set(next);
        })
    };

    let on_category = {
        let view = view.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*view).clone();
            next.category = Category::parse(&input.value());
            view.set(next);
        })
    };

    let on_from = {
        let view = view.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*view).clone();
            next.from = pipeline::parse_date(&input.value());
            view.set(next);
        })
    };

    let on_to = {
        let view = view.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*view).clone();
            next.to = pipeline::parse_date(&input.value());
            view.set(next);
        })
    };

    let sort_header = |field: SortField, label: &'static str| {
        let view = view.clone();
        let is_active = view.sort_field == field;
        let indicator = if is_active {
            match view.sort_direction {
                SortDirection::Asc => icon_arrow_up(),
                SortDirection::Desc => icon_arrow_down(),
            }
        } else {
            html! {}
        };
        html! {
            <button
                type="button"
                class="flex items-center gap-1 focus:outline-none uppercase tracking-widest text-[10px] font-bold"
                onclick={Callback::from(move |_| {
                    let mut next = (*view).clone();
                    next.toggle_sort(field);
                    view.set(next);
                })}
            >
                { label }
                { indicator }
            </button>
        }
    };

    html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
            <div class="p-6 flex flex-col sm:flex-row justify-between gap-3 border-b border-border">
                <h2 class="text-xl font-semibold text-foreground">{"Your Expenses"}</h2>
                <div class="flex flex-wrap items-center gap-2">
                    <input
                        type="date"
                        class="py-2 px-3 border border-border rounded-md text-sm bg-input"
                        value={view.from.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()}
                        oninput={on_from}
                    />
                    <span class="text-muted-foreground text-sm">{"to"}</span>
                    <input
                        type="date"
                        class="py-2 px-3 border border-border rounded-md text-sm bg-input"
                        value={view.to.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()}
                        oninput={on_to}
                    />
                    <input
                        type="text"
                        placeholder="Search expenses..."
                        class="py-2 px-3 border border-border rounded-md text-sm bg-input"
                        value={view.search.clone()}
                        oninput={on_search}
                    />
                    <select
                        class="py-2 px-3 border border-border rounded-md text-sm bg-input"
                        onchange={on_category}
                    >
                        <option value="" selected={view.category.is_none()}>{"All Categories"}</option>
                        { for categories.iter().map(|category| html! {
                            <option
                                value={category.label()}
                                selected={view.category == Some(*category)}
                            >
                                { category.label() }
                            </option>
                        }) }
                    </select>
                </div>
            </div>

            <div class="overflow-x-auto">
                <table class="w-full text-left border-collapse">
                    <thead>
                        <tr class="bg-muted/50 text-muted-foreground">
                            <th class="px-8 py-4">{ sort_header(SortField::Date, "Date") }</th>
                            <th class="px-8 py-4">{ sort_header(SortField::Category, "Category") }</th>
                            <th class="px-8 py-4">{ sort_header(SortField::Amount, "Amount") }</th>
                            <th class="px-8 py-4 uppercase tracking-widest text-[10px] font-bold">{"Note"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        { if props.loading {
                            html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
                        } else if rows.is_empty() {
                            html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"No expenses found. Add your first expense!"}</td></tr> }
                        } else {
                            html! {
                                <>
                                    { for rows.iter().map(|row| html! {
                                        <tr key={row.id.clone()} class="text-sm hover:bg-muted/30 transition-colors">
                                            <td class="px-8 py-4 text-muted-foreground">{ row.date.clone() }</td>
                                            <td class="px-8 py-4">
                                                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ row.category }</span>
                                            </td>
                                            <td class="px-8 py-4 font-semibold text-foreground">{ row.amount.clone() }</td>
                                            <td class="px-8 py-4 text-muted-foreground max-w-xs truncate">{ row.note.clone() }</td>
                                        </tr>
                                    }) }
                                </>
                            }
                        }}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ChartsPanelProps {
    analytics: AnalyticsResponse,
    loading: bool,
}

#[function_component(ChartsPanel)]
fn charts_panel(props: &ChartsPanelProps) -> Html {
    if props.loading {
        return html! {
            <div class="text-center py-8 text-muted-foreground">{"Loading..."}</div>
        };
    }

    let Some(view) = analytics::project(&props.analytics) else {
        return html! {
            <div class="text-center py-8">
                <p class="text-muted-foreground">{"No data available for charts. Add some expenses first!"}</p>
            </div>
        };
    };

    let max_month = view.max_month_total();

    html! {
        <div class="space-y-6">
            <div class="bg-[#173E63] text-white rounded-[10px] p-6">
                <h3 class="text-xl font-semibold mb-2">{"Spending Summary"}</h3>
                <div class="text-3xl font-bold">{ format_currency(view.grand_total) }</div>
                <p class="mt-2 text-slate-300 text-sm">
                    { format!("Across {} categories and {} months", view.category_count(), view.month_count()) }
                </p>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <div class="flex items-center gap-2 mb-4">
                        { icon_pie_chart() }
                        <h3 class="text-lg font-semibold text-foreground">{"Spending by Category"}</h3>
                    </div>
                    <div class="space-y-3">
                        { for view.categories.iter().map(|slice| html! {
                            <div class="flex flex-col gap-1 text-sm">
                                <div class="flex items-center justify-between">
                                    <span class="text-foreground">{ slice.label.clone() }</span>
                                    <span class="text-muted-foreground">{ format!("{} ({:.1}%)", format_currency(slice.total), slice.share) }</span>
                                </div>
                                <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                                    <div class="h-full bg-[#1D617A]" style={format!("width: {}%", slice.share.clamp(0.0, 100.0))}></div>
                                </div>
                            </div>
                        }) }
                    </div>
                </div>

                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <div class="flex items-center gap-2 mb-4">
                        { icon_bar_chart() }
                        <h3 class="text-lg font-semibold text-foreground">{"Monthly Spending"}</h3>
                    </div>
                    <div class="space-y-3">
                        { for view.months.iter().map(|bar| {
                            let percent = if max_month > 0.0 { bar.total / max_month * 100.0 } else { 0.0 };
                            html! {
                                <div class="flex flex-col gap-1 text-sm">
                                    <div class="flex items-center justify-between">
                                        <span class="text-foreground">{ bar.label.clone() }</span>
                                        <span class="text-muted-foreground">{ format_currency(bar.total) }</span>
                                    </div>
                                    <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                                        <div class="h-full bg-[#173E63]" style={format!("width: {}%", percent.clamp(0.0, 100.0))}></div>
                                    </div>
                                </div>
                            }
                        }) }
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AuthScreenProps {
    notice: Option<String>,
    on_authenticated: Callback<SessionUser>,
}

#[function_component(AuthScreen)]
fn auth_screen(props: &AuthScreenProps) -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(|| ApiClient::new(Callback::noop()));

    let is_login = use_state(|| true);
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let confirm_password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let info = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let api = api.clone();
        let is_login = is_login.clone();
        let username = username.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let info = info.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }

            let username_val = username.trim().to_string();
            let password_val = (*password).clone();
            let confirm_val = (*confirm_password).clone();

            if username_val.is_empty() || password_val.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }
            if password_val.len() < 8 {
                error.set(Some("Password must be at least 8 characters".to_string()));
                return;
            }
            if !*is_login && password_val != confirm_val {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            error.set(None);
            info.set(None);
            loading.set(true);

            let api = api.clone();
            let login_mode = *is_login;
            let is_login = is_login.clone();
            let password_state = password.clone();
            let confirm_state = confirm_password.clone();
            let error = error.clone();
            let info = info.clone();
            let loading = loading.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                if login_mode {
                    match api.login(&username_val, &password_val).await {
                        Ok(response) => {
                            let user = session::persist(&BrowserStore, &response);
                            on_authenticated.emit(user);
                        }
                        Err(err) => error.set(Some(err.to_string())),
                    }
                } else {
                    match api.register(&username_val, &password_val).await {
                        Ok(()) => {
                            // Registration never logs the user in.
                            is_login.set(true);
                            password_state.set("".to_string());
                            confirm_state.set("".to_string());
                            info.set(Some(
                                "Registration successful! You can now login.".to_string(),
                            ));
                        }
                        Err(err) => error.set(Some(err.to_string())),
                    }
                }
                loading.set(false);
            });
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let error = error.clone();
        let info = info.clone();
        Callback::from(move |_| {
            error.set(None);
            info.set(None);
            is_login.set(!*is_login);
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if *is_login { "Welcome back" } else { "Create account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if *is_login { "Sign in to track your expenses." } else { "Start managing your spending." } }
                    </p>
                </div>

                {
                    if let Some(msg) = &props.notice {
                        html! { <div class="mb-4 text-sm text-[#173E63] bg-[#D8E1E8] rounded-lg px-4 py-3">{ msg.clone() }</div> }
                    } else {
                        html! {}
                    }
                }

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Username"}</label>
                        <input
                            type="text"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            value={(*username).clone()}
                            oninput={{
                                let username = username.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    username.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input
                            type="password"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>

                    if !*is_login {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Confirm Password"}</label>
                            <input
                                type="password"
                                class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                                value={(*confirm_password).clone()}
                                oninput={{
                                    let confirm_password = confirm_password.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                        confirm_password.set(input.value());
                                    })
                                }}
                            />
                        </div>
                    }

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }
                    if let Some(msg) = &*info {
                        <div class="text-sm text-green-600">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-[#173E63] text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else if *is_login { "Login" } else { "Sign up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { if *is_login { "No account?" } else { "Already have an account?" } }
                    <button class="ml-2 text-[#1D617A] font-semibold" onclick={toggle_mode}>
                        { if *is_login { "Sign up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
fn icon_pie_chart() -> Html {
    icon_base("M21.21 15.89A10 10 0 118 2.83M22 12A10 10 0 0012 2v10z")
}
fn icon_list() -> Html {
    icon_base("M8 6h13M8 12h13M8 18h13M3 6h.01M3 12h.01M3 18h.01")
}
fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
fn icon_arrow_up() -> Html {
    icon_base("M12 19V5M5 12l7-7 7 7")
}
fn icon_arrow_down() -> Html {
    icon_base("M12 5v14M19 12l-7 7-7-7")
}

fn main() {
    yew::Renderer::<App>::new().render();
}
