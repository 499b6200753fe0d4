use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::{Category, Expense};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Date,
    Amount,
    Category,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Ephemeral filter/sort selection backing the expense table. Never
/// persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub search: String,
    pub category: Option<Category>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            from: None,
            to: None,
            sort_field: SortField::Date,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl ViewState {
    /// Clicking the active column flips direction; a new column starts
    /// descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = match self.sort_direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
        }
    }
}

/// Accepts the formats the backend has been seen emitting: plain calendar
/// dates plus RFC 3339 / RFC 2822 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(instant.date_naive());
    }
    if let Ok(instant) = chrono::DateTime::parse_from_rfc2822(raw) {
        return Some(instant.date_naive());
    }
    None
}

fn matches(state: &ViewState, expense: &Expense) -> bool {
    let search = state.search.trim().to_lowercase();
    let matches_search = search.is_empty()
        || expense
            .note
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(&search)
        || expense.category.label().to_lowercase().contains(&search);

    let matches_category = state
        .category
        .map_or(true, |category| category == expense.category);

    // A record whose date fails to parse can never satisfy a date bound.
    let date = parse_date(&expense.date);
    let matches_from = state
        .from
        .map_or(true, |from| date.map_or(false, |d| d >= from));
    let matches_to = state.to.map_or(true, |to| date.map_or(false, |d| d <= to));

    matches_search && matches_category && matches_from && matches_to
}

fn date_sort_key(expense: &Expense) -> Option<NaiveDate> {
    // `None` orders before every real date, pinning unparsable records to
    // one deterministic end of the list.
    parse_date(&expense.date)
}

pub fn sort_expenses(expenses: &mut [Expense], field: SortField, direction: SortDirection) {
    expenses.sort_by(|a, b| {
        let ordering = match field {
            SortField::Amount => a
                .amount
                .partial_cmp(&b.amount)
                .unwrap_or(Ordering::Equal),
            SortField::Date => date_sort_key(a).cmp(&date_sort_key(b)),
            SortField::Category => a
                .category
                .label()
                .to_lowercase()
                .cmp(&b.category.label().to_lowercase()),
        };
        match direction {
            SortDirection::Asc => ordering,
            // Reversing the comparator keeps the sort stable; reversing the
            // slice afterwards would not.
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Filter then sort. Pure in `(expenses, state)`.
pub fn visible_expenses(state: &ViewState, expenses: &[Expense]) -> Vec<Expense> {
    let mut visible: Vec<Expense> = expenses
        .iter()
        .filter(|expense| matches(state, expense))
        .cloned()
        .collect();
    sort_expenses(&mut visible, state.sort_field, state.sort_direction);
    visible
}

/// One table row, fully formatted for display.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayRow {
    pub id: String,
    pub date: String,
    pub category: &'static str,
    pub amount: String,
    pub note: String,
}

pub fn format_row(expense: &Expense) -> DisplayRow {
    DisplayRow {
        id: expense.id.clone(),
        date: format_date(&expense.date),
        category: expense.category.label(),
        amount: format_currency(expense.amount),
        note: expense
            .note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "-".to_string()),
    }
}

pub fn display_rows(state: &ViewState, expenses: &[Expense]) -> Vec<DisplayRow> {
    visible_expenses(state, expenses)
        .iter()
        .map(format_row)
        .collect()
}

/// A date that fails to parse renders as a marker instead of aborting the
/// rest of the table.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "Invalid date".to_string(),
    }
}

pub fn format_currency(amount: f64) -> String {
    let is_negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = (cents / 100).to_string();
    let digits = whole.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    let grouped: String = out.into_iter().rev().collect();
    let sign = if is_negative { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// The categories actually present in the fetched list, for the filter
/// dropdown.
pub fn distinct_categories(expenses: &[Expense]) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();
    for expense in expenses {
        if !categories.contains(&expense.category) {
            categories.push(expense.category);
        }
    }
    categories.sort_by_key(|category| category.label());
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, date: &str, category: Category, amount: f64, note: &str) -> Expense {
        Expense {
            id: id.to_string(),
            amount,
            category,
            note: if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            },
            date: date.to_string(),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("a", "2024-01-05", Category::Food, 20.0, "lunch"),
            expense("b", "2024-02-10", Category::Travel, 80.0, "train"),
        ]
    }

    #[test]
    fn category_filter_keeps_only_matches() {
        let state = ViewState {
            category: Some(Category::Food),
            ..ViewState::default()
        };
        let visible = visible_expenses(&state, &sample());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].category, Category::Food);
        assert_eq!(visible[0].amount, 20.0);
    }

    #[test]
    fn amount_desc_orders_travel_before_food() {
        let state = ViewState {
            sort_field: SortField::Amount,
            sort_direction: SortDirection::Desc,
            ..ViewState::default()
        };
        let visible = visible_expenses(&state, &sample());
        assert_eq!(visible[0].category, Category::Travel);
        assert_eq!(visible[0].amount, 80.0);
        assert_eq!(visible[1].category, Category::Food);
        assert_eq!(visible[1].amount, 20.0);
    }

    #[test]
    fn search_matches_note_and_category_case_insensitively() {
        let expenses = sample();
        let mut state = ViewState {
            search: "LUN".to_string(),
            ..ViewState::default()
        };
        assert_eq!(visible_expenses(&state, &expenses).len(), 1);

        state.search = "trav".to_string();
        let visible = visible_expenses(&state, &expenses);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].category, Category::Travel);

        state.search = "nothing".to_string();
        assert!(visible_expenses(&state, &expenses).is_empty());
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let expenses = sample();
        let state = ViewState {
            from: Some(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()),
            ..ViewState::default()
        };
        assert_eq!(visible_expenses(&state, &expenses).len(), 2);

        let state = ViewState {
            from: Some(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()),
            ..ViewState::default()
        };
        let visible = visible_expenses(&state, &expenses);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].category, Category::Travel);
    }

    #[test]
    fn bounded_range_excludes_unparsable_dates() {
        let mut expenses = sample();
        expenses.push(expense("c", "not a date", Category::Other, 5.0, ""));

        let unbounded = ViewState::default();
        assert_eq!(visible_expenses(&unbounded, &expenses).len(), 3);

        let bounded = ViewState {
            from: Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            ..ViewState::default()
        };
        assert_eq!(visible_expenses(&bounded, &expenses).len(), 2);
    }

    #[test]
    fn filters_commute() {
        let mut expenses = sample();
        expenses.push(expense("c", "2024-01-20", Category::Food, 12.0, "pizza train"));
        expenses.push(expense("d", "2024-03-01", Category::Travel, 55.0, "lunch on train"));

        let search_only = ViewState {
            search: "train".to_string(),
            ..ViewState::default()
        };
        let category_only = ViewState {
            category: Some(Category::Travel),
            ..ViewState::default()
        };
        let date_only = ViewState {
            to: Some(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()),
            ..ViewState::default()
        };
        let combined = ViewState {
            search: "train".to_string(),
            category: Some(Category::Travel),
            to: Some(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()),
            ..ViewState::default()
        };

        // search -> category -> date
        let pass1 = visible_expenses(&search_only, &expenses);
        let pass1 = visible_expenses(&category_only, &pass1);
        let pass1 = visible_expenses(&date_only, &pass1);

        // date -> search -> category
        let pass2 = visible_expenses(&date_only, &expenses);
        let pass2 = visible_expenses(&search_only, &pass2);
        let pass2 = visible_expenses(&category_only, &pass2);

        let all_at_once = visible_expenses(&combined, &expenses);
        assert_eq!(pass1, all_at_once);
        assert_eq!(pass2, all_at_once);
        assert_eq!(all_at_once.len(), 1);
        assert_eq!(all_at_once[0].id, "b");
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let expenses = vec![
            expense("first", "2024-01-01", Category::Food, 10.0, ""),
            expense("second", "2024-01-01", Category::Travel, 10.0, ""),
            expense("third", "2024-01-01", Category::Housing, 10.0, ""),
        ];

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let mut sorted = expenses.clone();
            sort_expenses(&mut sorted, SortField::Amount, direction);
            let ids: Vec<&str> = sorted.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, ["first", "second", "third"], "{direction:?}");
        }
    }

    #[test]
    fn date_sort_pins_unparsable_records_first_ascending() {
        let mut expenses = vec![
            expense("valid", "2024-01-01", Category::Food, 1.0, ""),
            expense("broken", "garbage", Category::Food, 2.0, ""),
        ];
        sort_expenses(&mut expenses, SortField::Date, SortDirection::Asc);
        assert_eq!(expenses[0].id, "broken");
        assert_eq!(expenses[1].id, "valid");
    }

    #[test]
    fn toggle_sort_flips_then_resets() {
        let mut state = ViewState::default();
        assert_eq!(state.sort_field, SortField::Date);
        assert_eq!(state.sort_direction, SortDirection::Desc);

        state.toggle_sort(SortField::Date);
        assert_eq!(state.sort_direction, SortDirection::Asc);

        state.toggle_sort(SortField::Amount);
        assert_eq!(state.sort_field, SortField::Amount);
        assert_eq!(state.sort_direction, SortDirection::Desc);

        state.toggle_sort(SortField::Amount);
        assert_eq!(state.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn rows_format_currency_dates_and_placeholders() {
        let rows = display_rows(
            &ViewState::default(),
            &[
                expense("a", "2024-01-05", Category::Food, 1234.5, ""),
                expense("b", "garbage", Category::Other, 7.0, "  "),
            ],
        );
        // Date desc: the unparsable record sorts last.
        assert_eq!(rows[0].date, "Jan 5, 2024");
        assert_eq!(rows[0].amount, "$1,234.50");
        assert_eq!(rows[0].note, "-");
        assert_eq!(rows[1].date, "Invalid date");
        assert_eq!(rows[1].category, "Other");
    }

    #[test]
    fn currency_grouping_and_rounding() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }

    #[test]
    fn rfc3339_and_rfc2822_dates_parse() {
        assert_eq!(
            parse_date("2024-01-05T00:00:00+00:00"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_date("Fri, 05 Jan 2024 00:00:00 GMT"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(parse_date("05/01/2024"), None);
    }

    #[test]
    fn distinct_categories_are_deduped_and_sorted() {
        let mut expenses = sample();
        expenses.push(expense("c", "2024-01-06", Category::Food, 3.0, ""));
        assert_eq!(
            distinct_categories(&expenses),
            vec![Category::Food, Category::Travel]
        );
    }
}
