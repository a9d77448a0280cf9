//! The pending action submitted by the budget page forms.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

/// The tag for adding an income entry.
pub const ADD_INCOME: &str = "add-income";
/// The tag for adding an expense entry.
pub const ADD_EXPENSE: &str = "add-expense";
/// The tag for adding an income category.
pub const ADD_INCOME_CATEGORY: &str = "add-income-category";
/// The tag for adding an expense category.
pub const ADD_EXPENSE_CATEGORY: &str = "add-expense-category";

/// The tag of the button that triggered a form submission, e.g. "add-income".
///
/// The raw tag is kept as submitted and passed on to the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonType(String);

impl ButtonType {
    /// Create a button type from its tag.
    pub fn new(tag: &str) -> Self {
        Self(tag.to_owned())
    }

    /// The raw tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the button adds a category rather than an entry.
    pub fn is_category(&self) -> bool {
        self.0 == ADD_INCOME_CATEGORY || self.0 == ADD_EXPENSE_CATEGORY
    }

    /// Whether the button adds an expense category.
    pub fn is_expense_category(&self) -> bool {
        self.0 == ADD_EXPENSE_CATEGORY
    }

    /// The component family the button belongs to.
    ///
    /// Only the two income tags resolve to [ComponentId::Income]. Any other
    /// tag, including ones not listed in this module, resolves to
    /// [ComponentId::Expense].
    pub fn component_id(&self) -> ComponentId {
        match self.0.as_str() {
            ADD_INCOME | ADD_INCOME_CATEGORY => ComponentId::Income,
            _ => ComponentId::Expense,
        }
    }
}

impl AsRef<str> for ButtonType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ButtonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a component belongs to the income or the expense side of the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl ComponentId {
    /// The lowercase name, e.g. "income".
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::Income => "income",
            ComponentId::Expense => "expense",
        }
    }

    /// The plural name used to prefix element IDs, e.g. "incomes".
    pub fn plural(&self) -> &'static str {
        match self {
            ComponentId::Income => "incomes",
            ComponentId::Expense => "expenses",
        }
    }

    /// Parse the lowercase name stored in the database.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "income" => Some(ComponentId::Income),
            "expense" => Some(ComponentId::Expense),
            _ => None,
        }
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The form data describing the last user action on the budget page.
///
/// Optional fields are empty strings in the submitted form, which are parsed as
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// The button that submitted the form.
    pub button_type: ButtonType,
    /// The title of the category or entry to create.
    pub input_title: String,
    /// The date of the category or entry to create.
    pub input_date: Date,
    /// The amount of an income or expense entry.
    #[serde(default)]
    pub input_amount: Option<f64>,
    /// The category an entry is added to.
    #[serde(default)]
    pub category_title: Option<String>,
    /// The budget month the category or entry was entered for.
    #[serde(default)]
    pub category_date: Option<Date>,
}

#[cfg(test)]
mod tests {
    use crate::view_state::{
        ADD_EXPENSE, ADD_EXPENSE_CATEGORY, ADD_INCOME, ADD_INCOME_CATEGORY, ButtonType,
        ComponentId,
    };

    #[test]
    fn income_buttons_resolve_to_income() {
        assert_eq!(ButtonType::new(ADD_INCOME).component_id(), ComponentId::Income);
        assert_eq!(
            ButtonType::new(ADD_INCOME_CATEGORY).component_id(),
            ComponentId::Income
        );
    }

    #[test]
    fn every_other_button_resolves_to_expense() {
        for tag in [ADD_EXPENSE, ADD_EXPENSE_CATEGORY, "add-savings", ""] {
            assert_eq!(
                ButtonType::new(tag).component_id(),
                ComponentId::Expense,
                "want {tag:?} to resolve to expense"
            );
        }
    }

    #[test]
    fn only_category_tags_are_categories() {
        assert!(ButtonType::new(ADD_INCOME_CATEGORY).is_category());
        assert!(ButtonType::new(ADD_EXPENSE_CATEGORY).is_category());
        assert!(!ButtonType::new(ADD_INCOME).is_category());
        assert!(ButtonType::new(ADD_EXPENSE_CATEGORY).is_expense_category());
        assert!(!ButtonType::new(ADD_INCOME_CATEGORY).is_expense_category());
    }

    #[test]
    fn component_names_round_trip() {
        for id in [ComponentId::Income, ComponentId::Expense] {
            assert_eq!(ComponentId::from_name(id.as_str()), Some(id));
        }
        assert_eq!(ComponentId::Income.plural(), "incomes");
        assert_eq!(ComponentId::from_name("savings"), None);
    }
}
