//! Accessors for the elements of the budget page that rendering reads and writes.

use maud::Markup;

use crate::{dates::BudgetDate, view_state::ComponentId};

/// A container element on the budget page.
///
/// Containers that hold a list also carry a count of the items in that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// The budget header, which holds the budget page buttons. Its count is
    /// the number of budget pages.
    Budget,
    /// The list of categories for income or expenses.
    CategoryForm(ComponentId),
    /// The box left of the entry list that holds the add buttons.
    BoxLeft(ComponentId),
    /// The list of income or expense entries.
    EntryForm(ComponentId),
    /// The container for the button that opens the expense category form.
    ExpenseCategories,
}

impl Container {
    /// The HTML ID of the container element.
    pub fn element_id(&self) -> String {
        match self {
            Container::Budget => "budget".to_owned(),
            Container::CategoryForm(id) => format!("{}-categories", id.plural()),
            Container::BoxLeft(id) => format!("{}-box-left", id.plural()),
            Container::EntryForm(id) => format!("{}-entries", id.plural()),
            Container::ExpenseCategories => "expense-category".to_owned(),
        }
    }
}

/// Where to insert a node relative to the children of its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before the first child.
    AfterBegin,
    /// After the last child.
    BeforeEnd,
}

/// What a node on the page represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An income or expense category.
    Category,
    /// An income or expense entry.
    Entry,
    /// The button for the next budget page.
    BudgetPageButton,
    /// The button for the next page of categories.
    CategoryPageButton,
    /// The button for the next page of entries.
    EntryPageButton,
    /// The button that opens the entry form for a category.
    AddButton,
    /// The button that opens the expense category form.
    ExpenseCategoryButton,
}

impl NodeKind {
    /// Whether the node's root element is a `<button>`.
    pub fn is_button(&self) -> bool {
        !matches!(self, NodeKind::Category | NodeKind::Entry)
    }
}

/// Rendered markup inserted into a container.
#[derive(Debug, Clone)]
pub struct Node {
    /// What the markup represents.
    pub kind: NodeKind,
    /// The HTML of the node.
    pub markup: Markup,
}

impl Node {
    /// Create a node of `kind` from its markup.
    pub fn new(kind: NodeKind, markup: Markup) -> Self {
        Self { kind, markup }
    }
}

/// Read and write access to the elements of the budget page.
///
/// Counts are stored on the containers themselves, so every render reads the
/// current count and writes the new one back.
pub trait ViewElements {
    /// Show `message` in the message area, replacing any previous message.
    fn render_message(&mut self, message: &str);

    /// The count stored on `container`, zero if none has been set.
    fn count(&self, container: Container) -> u64;

    /// Overwrite the count stored on `container`.
    fn set_count(&mut self, container: Container, count: u64);

    /// Insert `node` into `container` at `position`.
    fn insert(&mut self, container: Container, position: InsertPosition, node: Node);

    /// The kind of the first child of `container`, if it has any children.
    fn first_child(&self, container: Container) -> Option<NodeKind>;

    /// The month and year of the displayed budget, if one has been set.
    fn budget_date(&self) -> Option<BudgetDate>;

    /// Set the month and year of the displayed budget.
    fn set_budget_date(&mut self, date: BudgetDate);

    /// Add `amount` to the income or expense total of the budget.
    fn update_budget(&mut self, amount: f64, component_id: ComponentId);
}

#[cfg(test)]
mod tests {
    use crate::{
        view_elements::{Container, NodeKind},
        view_state::ComponentId,
    };

    #[test]
    fn element_ids_are_unique_per_component() {
        let ids = [
            Container::Budget,
            Container::CategoryForm(ComponentId::Income),
            Container::CategoryForm(ComponentId::Expense),
            Container::BoxLeft(ComponentId::Income),
            Container::BoxLeft(ComponentId::Expense),
            Container::EntryForm(ComponentId::Income),
            Container::EntryForm(ComponentId::Expense),
            Container::ExpenseCategories,
        ]
        .map(|container| container.element_id());

        for (i, id) in ids.iter().enumerate() {
            assert!(!ids[i + 1..].contains(id), "duplicate element ID {id}");
        }
        assert_eq!(ids[1], "incomes-categories");
    }

    #[test]
    fn only_list_items_are_not_buttons() {
        assert!(!NodeKind::Category.is_button());
        assert!(!NodeKind::Entry.is_button());
        assert!(NodeKind::ExpenseCategoryButton.is_button());
        assert!(NodeKind::AddButton.is_button());
    }
}
