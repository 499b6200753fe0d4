use chrono::NaiveDate;

use crate::model::AnalyticsResponse;

/// One slice of the category breakdown, share precomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySlice {
    pub label: String,
    pub total: f64,
    pub share: f64,
}

/// One bar of the month-by-month chart.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyBar {
    pub label: String,
    pub total: f64,
}

/// Chart-ready projection of the raw aggregates.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsView {
    pub grand_total: f64,
    pub categories: Vec<CategorySlice>,
    pub months: Vec<MonthlyBar>,
}

impl AnalyticsView {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    /// Tallest monthly bar, used to scale the others.
    pub fn max_month_total(&self) -> f64 {
        self.months.iter().map(|bar| bar.total).fold(0.0, f64::max)
    }
}

/// `None` means there is nothing to chart yet; the caller shows the empty
/// state instead of blank charts.
pub fn project(analytics: &AnalyticsResponse) -> Option<AnalyticsView> {
    if analytics.category_totals.is_empty() && analytics.monthly_totals.is_empty() {
        return None;
    }

    let grand_total: f64 = analytics.category_totals.iter().map(|c| c.total).sum();

    let categories = analytics
        .category_totals
        .iter()
        .map(|entry| CategorySlice {
            label: entry.category.clone(),
            total: entry.total,
            share: share_of(entry.total, grand_total),
        })
        .collect();

    let months = analytics
        .monthly_totals
        .iter()
        .map(|entry| MonthlyBar {
            label: month_label(entry.year, entry.month),
            total: entry.total,
        })
        .collect();

    Some(AnalyticsView {
        grand_total,
        categories,
        months,
    })
}

/// Percentage share, defined as 0 when there is nothing to divide by.
pub fn share_of(total: f64, grand_total: f64) -> f64 {
    if grand_total == 0.0 {
        0.0
    } else {
        total / grand_total * 100.0
    }
}

/// `"Jan 2024"`-style label; an out-of-range month falls back to a plain
/// `YYYY-MM` literal.
pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%b %Y").to_string(),
        None => format!("{}-{:02}", year, month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryTotal, MonthlyTotal};

    fn response(categories: &[(&str, f64)], months: &[(i32, u32, f64)]) -> AnalyticsResponse {
        AnalyticsResponse {
            category_totals: categories
                .iter()
                .map(|(category, total)| CategoryTotal {
                    category: category.to_string(),
                    total: *total,
                })
                .collect(),
            monthly_totals: months
                .iter()
                .map(|(year, month, total)| MonthlyTotal {
                    year: *year,
                    month: *month,
                    total: *total,
                })
                .collect(),
        }
    }

    #[test]
    fn empty_aggregates_signal_no_data() {
        assert_eq!(project(&AnalyticsResponse::default()), None);
    }

    #[test]
    fn a_single_nonempty_side_still_projects() {
        let view = project(&response(&[], &[(2024, 1, 10.0)])).unwrap();
        assert_eq!(view.grand_total, 0.0);
        assert_eq!(view.month_count(), 1);
        assert_eq!(view.months[0].label, "Jan 2024");
    }

    #[test]
    fn worked_example_shares_and_grand_total() {
        let view = project(&response(
            &[("Food", 20.0), ("Travel", 80.0)],
            &[(2024, 1, 20.0), (2024, 2, 80.0)],
        ))
        .unwrap();

        assert_eq!(view.grand_total, 100.0);
        assert_eq!(view.category_count(), 2);
        assert_eq!(view.month_count(), 2);

        assert_eq!(view.categories[0].label, "Food");
        assert!((view.categories[0].share - 20.0).abs() < 1e-9);
        assert_eq!(view.categories[1].label, "Travel");
        assert!((view.categories[1].share - 80.0).abs() < 1e-9);

        assert_eq!(view.months[0].label, "Jan 2024");
        assert_eq!(view.months[1].label, "Feb 2024");
        assert_eq!(view.max_month_total(), 80.0);
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let view = project(&response(
            &[("Food", 12.37), ("Travel", 45.01), ("Other", 7.62)],
            &[],
        ))
        .unwrap();
        let sum: f64 = view.categories.iter().map(|slice| slice.share).sum();
        assert!((sum - 100.0).abs() < 1e-9, "shares summed to {sum}");
    }

    #[test]
    fn zero_grand_total_reports_zero_shares() {
        let view = project(&response(&[("Food", 0.0), ("Travel", 0.0)], &[])).unwrap();
        assert!(view.categories.iter().all(|slice| slice.share == 0.0));
    }

    #[test]
    fn month_label_falls_back_on_bad_months() {
        assert_eq!(month_label(2024, 12), "Dec 2024");
        assert_eq!(month_label(2024, 13), "2024-13");
        assert_eq!(month_label(2024, 0), "2024-00");
    }
}
