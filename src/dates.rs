//! Date helpers for budget months and how dates are displayed.

use std::fmt::Display;

use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

/// How dates are shown on category and entry components, e.g. "05 Mar 2024".
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day] [month repr:short] [year]");

/// The month of a particular year that a budget page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetDate {
    year: i32,
    month: Month,
}

impl BudgetDate {
    /// Create a budget date for `month` of `year`.
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The calendar year of the budget.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the budget.
    pub fn month(&self) -> Month {
        self.month
    }

    /// Whether `date` falls in this budget's month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The first day of the budget month in the `YYYY-MM-DD` format used by
    /// HTML date inputs.
    pub fn first_day_iso(&self) -> String {
        format!("{:04}-{:02}-01", self.year, u8::from(self.month))
    }
}

impl From<Date> for BudgetDate {
    fn from(date: Date) -> Self {
        construct_budget_date(date)
    }
}

impl Display for BudgetDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Which part of a date to produce a label for with [construct_date].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// The full month name, e.g. "March".
    Month,
    /// The four digit year, e.g. "2024".
    Year,
}

/// Format `date` for display on a component, e.g. "05 Mar 2024".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT).unwrap_or_else(|error| {
        tracing::warn!("could not format date {date}: {error}");
        date.to_string()
    })
}

/// Whether `input` falls in the month and year of `expected`.
pub fn valid_date(input: Date, expected: BudgetDate) -> bool {
    expected.contains(input)
}

/// Create a label for the month or the year of `date`.
pub fn construct_date(part: DatePart, date: BudgetDate) -> String {
    match part {
        DatePart::Month => date.month().to_string(),
        DatePart::Year => date.year().to_string(),
    }
}

/// The budget month that `date` belongs to.
pub fn construct_budget_date(date: Date) -> BudgetDate {
    BudgetDate::new(date.year(), date.month())
}

/// The message shown when a date does not fall in the `expected` budget month.
pub(crate) fn date_mismatch_message(expected: BudgetDate) -> String {
    format!(
        "Date field must contain month {} and year {}.",
        construct_date(DatePart::Month, expected),
        construct_date(DatePart::Year, expected)
    )
}
