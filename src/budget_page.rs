//! The in-memory budget page and its HTML view.

use std::collections::HashMap;

use maud::{Markup, html};
use time::Date;

use crate::{
    dates::BudgetDate,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, base, dollar_input_styles, format_currency,
    },
    view_elements::{Container, InsertPosition, Node, NodeKind, ViewElements},
    view_state::{ADD_EXPENSE, ADD_EXPENSE_CATEGORY, ADD_INCOME, ADD_INCOME_CATEGORY, ComponentId},
};

/// The HTML ID of the section that POST endpoints replace.
pub const BUDGET_SECTION_ID: &str = "budget-view";

#[derive(Debug, Clone, Default)]
struct Element {
    count: u64,
    children: Vec<Node>,
}

/// The state of the budget page: the nodes in each container, the counts
/// stored on them, the message area, the budget month and the running totals.
#[derive(Debug, Clone, Default)]
pub struct BudgetPage {
    elements: HashMap<Container, Element>,
    message: String,
    budget_date: Option<BudgetDate>,
    income_total: f64,
    expense_total: f64,
}

impl BudgetPage {
    /// The text in the message area.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The nodes in `container`, in document order.
    pub fn children(&self, container: Container) -> &[Node] {
        self.elements
            .get(&container)
            .map(|element| element.children.as_slice())
            .unwrap_or_default()
    }

    /// How many nodes of `kind` are in `container`.
    pub fn count_children(&self, container: Container, kind: NodeKind) -> usize {
        self.children(container)
            .iter()
            .filter(|node| node.kind == kind)
            .count()
    }

    /// The running total for income or expenses.
    pub fn total(&self, component_id: ComponentId) -> f64 {
        match component_id {
            ComponentId::Income => self.income_total,
            ComponentId::Expense => self.expense_total,
        }
    }

    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.income_total - self.expense_total
    }
}

impl ViewElements for BudgetPage {
    fn render_message(&mut self, message: &str) {
        message.clone_into(&mut self.message);
    }

    fn count(&self, container: Container) -> u64 {
        self.elements
            .get(&container)
            .map(|element| element.count)
            .unwrap_or(0)
    }

    fn set_count(&mut self, container: Container, count: u64) {
        self.elements.entry(container).or_default().count = count;
    }

    fn insert(&mut self, container: Container, position: InsertPosition, node: Node) {
        let children = &mut self.elements.entry(container).or_default().children;

        match position {
            InsertPosition::AfterBegin => children.insert(0, node),
            InsertPosition::BeforeEnd => children.push(node),
        }
    }

    fn first_child(&self, container: Container) -> Option<NodeKind> {
        self.children(container).first().map(|node| node.kind)
    }

    fn budget_date(&self) -> Option<BudgetDate> {
        self.budget_date
    }

    fn set_budget_date(&mut self, date: BudgetDate) {
        self.budget_date = Some(date);
    }

    fn update_budget(&mut self, amount: f64, component_id: ComponentId) {
        match component_id {
            ComponentId::Income => self.income_total += amount,
            ComponentId::Expense => self.expense_total += amount,
        }
    }
}

/// The full budget page.
pub fn budget_page_view(page: &BudgetPage, today: Date) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            (budget_view(page, today))
        }
    };

    base("Budget", &[dollar_input_styles()], &content)
}

/// The budget section of the page, which is swapped out after each form submission.
pub fn budget_view(page: &BudgetPage, today: Date) -> Markup {
    let budget_label = page
        .budget_date
        .map(|date| date.to_string())
        .unwrap_or_else(|| "New budget".to_owned());
    // Entries and categories added from this page belong to its budget month.
    let category_date = page
        .budget_date
        .map(|date| date.first_day_iso())
        .unwrap_or_default();
    let budget = Container::Budget;

    html! {
        section id=(BUDGET_SECTION_ID) class="w-full max-w-5xl space-y-4"
        {
            p id="message" class="text-center min-h-6" role="status" { (page.message) }

            div
                id=(budget.element_id())
                class=(CARD_STYLE)
                data-value=(page.count(budget))
                data-date=(category_date)
            {
                h1 class="text-xl font-bold" { (budget_label) }

                dl class="grid grid-cols-3 gap-2 my-2"
                {
                    div { dt { "Income" } dd id="income-total" { (format_currency(page.income_total)) } }
                    div { dt { "Expenses" } dd id="expense-total" { (format_currency(page.expense_total)) } }
                    div { dt { "Balance" } dd id="balance" { (format_currency(page.balance())) } }
                }

                @for node in page.children(budget) { (node.markup) }
            }

            div class="grid gap-4 md:grid-cols-2"
            {
                (component_column(page, ComponentId::Income, &category_date, today))
                (component_column(page, ComponentId::Expense, &category_date, today))
            }
        }
    }
}

fn container_view(page: &BudgetPage, container: Container) -> Markup {
    html! {
        div id=(container.element_id()) data-count=(page.count(container))
        {
            @for node in page.children(container) { (node.markup) }
        }
    }
}

fn component_column(
    page: &BudgetPage,
    component_id: ComponentId,
    category_date: &str,
    today: Date,
) -> Markup {
    let (heading, category_button, entry_button) = match component_id {
        ComponentId::Income => ("Income", ADD_INCOME_CATEGORY, ADD_INCOME),
        ComponentId::Expense => ("Expenses", ADD_EXPENSE_CATEGORY, ADD_EXPENSE),
    };
    // Expense categories can only be added once the budget has some income.
    let show_category_form = component_id == ComponentId::Income
        || page.first_child(Container::ExpenseCategories).is_some();

    html! {
        div class=(CARD_STYLE)
        {
            h2 class="text-lg font-semibold mb-2" { (heading) }

            @if component_id == ComponentId::Expense {
                (container_view(page, Container::ExpenseCategories))
            }

            (container_view(page, Container::CategoryForm(component_id)))

            @if show_category_form {
                (category_form(category_button, category_date, today))
            }

            div class="flex gap-2 mt-4"
            {
                (container_view(page, Container::BoxLeft(component_id)))
                (container_view(page, Container::EntryForm(component_id)))
            }

            (entry_form(entry_button, category_date, today))
        }
    }
}

fn category_form(button_type: &str, category_date: &str, today: Date) -> Markup {
    let title_id = format!("{button_type}-title");
    let date_id = format!("{button_type}-date");

    html! {
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target={ "#" (BUDGET_SECTION_ID) }
            hx-swap="outerHTML"
            class="space-y-2 mt-2"
        {
            input type="hidden" name="button_type" value=(button_type);
            input type="hidden" name="category_date" value=(category_date);

            label for=(title_id) class=(FORM_LABEL_STYLE) { "Category" }
            input
                id=(title_id)
                type="text"
                name="input_title"
                placeholder="Category"
                required
                class=(FORM_TEXT_INPUT_STYLE);

            label for=(date_id) class=(FORM_LABEL_STYLE) { "Date" }
            input
                id=(date_id)
                type="date"
                name="input_date"
                value=(today.to_string())
                required
                class=(FORM_TEXT_INPUT_STYLE);

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add category" }
        }
    }
}

fn entry_form(button_type: &str, category_date: &str, today: Date) -> Markup {
    let title_id = format!("{button_type}-title");
    let category_id = format!("{button_type}-category");
    let amount_id = format!("{button_type}-amount");
    let date_id = format!("{button_type}-date");

    html! {
        form
            hx-post=(endpoints::ENTRIES_API)
            hx-target={ "#" (BUDGET_SECTION_ID) }
            hx-swap="outerHTML"
            class="space-y-2 mt-4"
        {
            input type="hidden" name="button_type" value=(button_type);
            input type="hidden" name="category_date" value=(category_date);

            label for=(category_id) class=(FORM_LABEL_STYLE) { "Category" }
            input
                id=(category_id)
                type="text"
                name="category_title"
                placeholder="Category"
                required
                class=(FORM_TEXT_INPUT_STYLE);

            label for=(title_id) class=(FORM_LABEL_STYLE) { "Description" }
            input
                id=(title_id)
                type="text"
                name="input_title"
                placeholder="Description"
                required
                class=(FORM_TEXT_INPUT_STYLE);

            label for=(amount_id) class=(FORM_LABEL_STYLE) { "Amount" }
            div class="input-wrapper w-full"
            {
                input
                    id=(amount_id)
                    type="number"
                    name="input_amount"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            label for=(date_id) class=(FORM_LABEL_STYLE) { "Date" }
            input
                id=(date_id)
                type="date"
                name="input_date"
                value=(today.to_string())
                required
                class=(FORM_TEXT_INPUT_STYLE);

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add entry" }
        }
    }
}
