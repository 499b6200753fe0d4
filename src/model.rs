use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The fixed set of spending categories the backend accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Healthcare,
    Education,
    Travel,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }

    /// Exact label match; the select inputs only ever hold these values.
    pub fn parse(raw: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == raw)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One expense as returned by the backend. The date stays in its wire form
/// so a malformed value degrades at display time instead of failing the
/// whole list deserialization.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Expense {
    #[serde(alias = "_id")]
    pub id: String,
    pub amount: f64,
    pub category: Category,
    #[serde(default)]
    pub note: Option<String>,
    pub date: String,
}

/// Body of a successful `/login` response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Serialize)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnalyticsResponse {
    #[serde(default)]
    pub category_totals: Vec<CategoryTotal>,
    #[serde(default)]
    pub monthly_totals: Vec<MonthlyTotal>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// Payload for `/add-expense`, produced only by a successful validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: String,
}

/// Raw add-expense form fields, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    pub note: String,
    pub date: String,
}

/// Per-field validation messages for the add-expense form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftErrors {
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl DraftErrors {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.category.is_none() && self.date.is_none()
    }
}

impl ExpenseDraft {
    /// Checks every field before anything touches the network. `today` is
    /// passed in so the future-date rule stays deterministic under test.
    pub fn validate(&self, today: NaiveDate) -> Result<NewExpense, DraftErrors> {
        let mut errors = DraftErrors::default();

        let amount_raw = self.amount.trim();
        let amount = if amount_raw.is_empty() {
            errors.amount = Some("Amount is required".to_string());
            None
        } else {
            match amount_raw.parse::<f64>() {
                Ok(value) if value > 0.0 => Some(value),
                _ => {
                    errors.amount = Some("Amount must be a positive number".to_string());
                    None
                }
            }
        };

        let category = match Category::parse(self.category.trim()) {
            Some(category) => Some(category),
            None => {
                errors.category = Some("Category is required".to_string());
                None
            }
        };

        let date_raw = self.date.trim();
        let date = if date_raw.is_empty() {
            errors.date = Some("Date is required".to_string());
            None
        } else {
            match NaiveDate::parse_from_str(date_raw, "%Y-%m-%d") {
                Ok(date) if date <= today => Some(date),
                Ok(_) => {
                    errors.date = Some("Date cannot be in the future".to_string());
                    None
                }
                Err(_) => {
                    errors.date = Some("Enter a valid date".to_string());
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let note = self.note.trim();
        Ok(NewExpense {
            amount: amount.unwrap_or_default(),
            category: category.unwrap_or(Category::Other),
            note: if note.is_empty() {
                None
            } else {
                Some(note.to_string())
            },
            date: date.unwrap_or(today).format("%Y-%m-%d").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_draft() -> ExpenseDraft {
        ExpenseDraft {
            amount: "42.50".to_string(),
            category: "Food".to_string(),
            note: "groceries".to_string(),
            date: "2024-06-01".to_string(),
        }
    }

    #[test]
    fn valid_draft_produces_payload() {
        let payload = valid_draft().validate(today()).unwrap();
        assert_eq!(payload.amount, 42.5);
        assert_eq!(payload.category, Category::Food);
        assert_eq!(payload.note.as_deref(), Some("groceries"));
        assert_eq!(payload.date, "2024-06-01");
    }

    #[test]
    fn blank_note_is_omitted() {
        let mut draft = valid_draft();
        draft.note = "   ".to_string();
        let payload = draft.validate(today()).unwrap();
        assert_eq!(payload.note, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("note").is_none());
        assert_eq!(json["category"], "Food");
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for bad in ["0", "-5", "abc", ""] {
            let mut draft = valid_draft();
            draft.amount = bad.to_string();
            let errors = draft.validate(today()).unwrap_err();
            assert!(errors.amount.is_some(), "amount {bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_unknown_category() {
        let mut draft = valid_draft();
        draft.category = "Gambling".to_string();
        let errors = draft.validate(today()).unwrap_err();
        assert!(errors.category.is_some());
    }

    #[test]
    fn rejects_future_and_malformed_dates() {
        let mut draft = valid_draft();
        draft.date = "2024-06-16".to_string();
        assert!(draft.validate(today()).unwrap_err().date.is_some());

        draft.date = "yesterday".to_string();
        assert!(draft.validate(today()).unwrap_err().date.is_some());

        draft.date = today().format("%Y-%m-%d").to_string();
        assert!(draft.validate(today()).is_ok(), "today itself is allowed");
    }

    #[test]
    fn collects_every_field_error_at_once() {
        let draft = ExpenseDraft::default();
        let errors = draft.validate(today()).unwrap_err();
        assert!(errors.amount.is_some());
        assert!(errors.category.is_some());
        assert!(errors.date.is_some());
    }

    #[test]
    fn expense_accepts_mongo_style_id() {
        let raw = r#"{"_id":"abc123","amount":12.0,"category":"Travel","note":"bus","date":"2024-01-05"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.id, "abc123");
        assert_eq!(expense.category, Category::Travel);

        let raw = r#"{"id":"abc124","amount":3.5,"category":"Food","date":"2024-01-06"}"#;
        let expense: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(expense.id, "abc124");
        assert_eq!(expense.note, None);
    }
}
