//! The markup for the items and buttons that are added to the budget page.
//!
//! Each component knows which container it belongs to, so rendering it is a
//! matter of inserting its markup there. Pagination buttons are always
//! inserted but stay hidden until the list they follow fills a page.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    html::{BUTTON_PAGE_STYLE, BUTTON_SECONDARY_STYLE, LIST_ITEM_STYLE, format_currency},
    view_elements::{Container, InsertPosition, Node, NodeKind, ViewElements},
    view_state::{ADD_EXPENSE, ADD_EXPENSE_CATEGORY, ADD_INCOME, ButtonType, ComponentId},
};

/// How many items a list shows before its next page button is revealed.
pub const ITEMS_PER_PAGE: u64 = 5;

/// The max number of graphemes of a title to display before truncating and
/// displaying ellipses.
const MAX_TITLE_GRAPHEMES: usize = 32;

/// A piece of markup that lives in a particular container of the budget page.
pub trait Component {
    /// The container the component is inserted into.
    fn container(&self) -> Container;

    /// What the component represents.
    fn kind(&self) -> NodeKind;

    /// The HTML for the component.
    fn markup(&self) -> Markup;

    /// Insert the component into its container.
    fn render_component<V: ViewElements>(&self, view: &mut V, position: InsertPosition) {
        view.insert(
            self.container(),
            position,
            Node::new(self.kind(), self.markup()),
        );
    }

    /// Store `count` on `parent`, usually the container this component was added to.
    fn update_component_state<V: ViewElements>(&self, view: &mut V, parent: Container, count: u64) {
        view.set_count(parent, count);
    }
}

fn truncate_title(title: &str) -> String {
    let graphemes: Vec<&str> = title.graphemes(true).collect();

    if graphemes.len() <= MAX_TITLE_GRAPHEMES {
        title.to_owned()
    } else {
        format!("{}…", graphemes[..MAX_TITLE_GRAPHEMES].concat())
    }
}

/// The page a pagination button opens: the page after the one that `count`
/// items fill.
fn next_page(count: u64) -> u64 {
    count / ITEMS_PER_PAGE + 2
}

/// Whether a list that held `count` items before the latest one was added has
/// filled its current page.
fn fills_page(count: u64) -> bool {
    (count + 1) % ITEMS_PER_PAGE == 0
}

/// A category in the income or expense category list.
#[derive(Debug, Clone)]
pub struct CategoryComponent {
    component_id: ComponentId,
    count: u64,
    title: String,
    date: String,
    budget_page: Option<u64>,
}

impl CategoryComponent {
    /// Create the `count`-th category, where `date` is already formatted for display.
    pub fn new(component_id: ComponentId, count: u64, title: &str, date: String) -> Self {
        Self {
            component_id,
            count,
            title: title.to_owned(),
            date,
            budget_page: None,
        }
    }

    /// Place the category on budget page `page` rather than the current one.
    ///
    /// The category counter only tracks the current page, so the page number
    /// keeps the element id unique.
    pub fn on_budget_page(mut self, page: u64) -> Self {
        self.budget_page = Some(page);
        self
    }

    fn element_id(&self) -> String {
        match self.budget_page {
            Some(page) => format!("{}-category-{}-page-{page}", self.component_id, self.count),
            None => format!("{}-category-{}", self.component_id, self.count),
        }
    }
}

impl Component for CategoryComponent {
    fn container(&self) -> Container {
        Container::CategoryForm(self.component_id)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Category
    }

    fn markup(&self) -> Markup {
        html! {
            div
                id=(self.element_id())
                class=(LIST_ITEM_STYLE)
                data-type=(self.component_id.as_str())
                data-count=(self.count)
            {
                span class="font-medium" title=(self.title) { (truncate_title(&self.title)) }
                span class="text-sm text-gray-500 dark:text-gray-400" { (self.date) }
            }
        }
    }
}

/// An income or expense entry in an entry list.
#[derive(Debug, Clone)]
pub struct IncomeExpenseComponent {
    pub count: u64,
    pub parent: Container,
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub component_id: ComponentId,
}

impl Component for IncomeExpenseComponent {
    fn container(&self) -> Container {
        self.parent
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Entry
    }

    fn markup(&self) -> Markup {
        let id = format!("{}-entry-{}", self.component_id, self.count);
        let amount_class = match self.component_id {
            ComponentId::Income => "text-green-700 dark:text-green-300",
            ComponentId::Expense => "text-red-700 dark:text-red-300",
        };

        html! {
            div
                id=(id)
                class=(LIST_ITEM_STYLE)
                data-type=(self.component_id.as_str())
                data-count=(self.count)
            {
                span class="font-medium" title=(self.title) { (truncate_title(&self.title)) }
                span class="text-sm text-gray-500 dark:text-gray-400" { (self.date) }
                span class=(amount_class) { (format_currency(self.amount)) }
            }
        }
    }
}

/// The button that moves to the next budget page.
#[derive(Debug, Clone)]
pub struct BudgetPaginationButton {
    count: u64,
}

impl BudgetPaginationButton {
    /// Create the button following `count` budget pages.
    pub fn new(count: u64) -> Self {
        Self { count }
    }
}

impl Component for BudgetPaginationButton {
    fn container(&self) -> Container {
        Container::Budget
    }

    fn kind(&self) -> NodeKind {
        NodeKind::BudgetPageButton
    }

    fn markup(&self) -> Markup {
        html! {
            button
                type="button"
                class=(BUTTON_PAGE_STYLE)
                data-page-type="next"
                data-page=(self.count + 1)
            {
                "Next budget"
            }
        }
    }
}

/// The button that moves to the next page of a category list.
#[derive(Debug, Clone)]
pub struct CategoryPaginationButton {
    component_id: ComponentId,
    count: u64,
    button_type: ButtonType,
}

impl CategoryPaginationButton {
    /// Create the button following the `count`-th category.
    pub fn new(component_id: ComponentId, count: u64, button_type: ButtonType) -> Self {
        Self {
            component_id,
            count,
            button_type,
        }
    }
}

impl Component for CategoryPaginationButton {
    fn container(&self) -> Container {
        Container::CategoryForm(self.component_id)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::CategoryPageButton
    }

    fn markup(&self) -> Markup {
        html! {
            button
                type="button"
                class=(BUTTON_PAGE_STYLE)
                data-page-type="next"
                data-page=(next_page(self.count))
                data-button-type=(self.button_type.as_str())
                hidden[!fills_page(self.count)]
            {
                "Next"
            }
        }
    }
}

/// The button that moves to the next page of an entry list.
#[derive(Debug, Clone)]
pub struct IncomeExpensePaginationButton {
    pub count: u64,
    pub parent: Container,
    pub button_type: ButtonType,
}

impl Component for IncomeExpensePaginationButton {
    fn container(&self) -> Container {
        self.parent
    }

    fn kind(&self) -> NodeKind {
        NodeKind::EntryPageButton
    }

    fn markup(&self) -> Markup {
        html! {
            button
                type="button"
                class=(BUTTON_PAGE_STYLE)
                data-page-type="next"
                data-page=(next_page(self.count))
                data-button-type=(self.button_type.as_str())
                hidden[!fills_page(self.count)]
            {
                "Next"
            }
        }
    }
}

/// The button that opens the entry form for the `count`-th category.
#[derive(Debug, Clone)]
pub struct AddButton {
    component_id: ComponentId,
    count: u64,
}

impl AddButton {
    /// Create the add button for the `count`-th category of `component_id`.
    pub fn new(component_id: ComponentId, count: u64) -> Self {
        Self {
            component_id,
            count,
        }
    }
}

impl Component for AddButton {
    fn container(&self) -> Container {
        Container::BoxLeft(self.component_id)
    }

    fn kind(&self) -> NodeKind {
        NodeKind::AddButton
    }

    fn markup(&self) -> Markup {
        let button_type = match self.component_id {
            ComponentId::Income => ADD_INCOME,
            ComponentId::Expense => ADD_EXPENSE,
        };

        html! {
            button
                type="button"
                class=(BUTTON_SECONDARY_STYLE)
                data-button-type=(button_type)
                data-count=(self.count)
            {
                "Add " (self.component_id.as_str())
            }
        }
    }
}

/// The button that opens the expense category form.
///
/// It only appears once the budget has some income.
#[derive(Debug, Clone)]
pub struct ExpenseCategoryButton {
    pub count: u64,
    pub parent: Container,
}

impl Component for ExpenseCategoryButton {
    fn container(&self) -> Container {
        self.parent
    }

    fn kind(&self) -> NodeKind {
        NodeKind::ExpenseCategoryButton
    }

    fn markup(&self) -> Markup {
        html! {
            button
                type="button"
                class=(BUTTON_SECONDARY_STYLE)
                data-button-type=(ADD_EXPENSE_CATEGORY)
                data-count=(self.count)
            {
                "Add expense category"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        budget_page::BudgetPage,
        components::{
            AddButton, BudgetPaginationButton, CategoryComponent, CategoryPaginationButton,
            Component, ITEMS_PER_PAGE, IncomeExpenseComponent, truncate_title,
        },
        test_utils::assert_valid_html,
        view_elements::{Container, InsertPosition, NodeKind, ViewElements},
        view_state::{ADD_INCOME_CATEGORY, ButtonType, ComponentId},
    };

    fn parse(component: &impl Component) -> Html {
        let html = Html::parse_fragment(&component.markup().into_string());
        assert_valid_html(&html);
        html
    }

    #[test]
    fn category_markup_has_title_date_and_count() {
        let category = CategoryComponent::new(
            ComponentId::Income,
            3,
            "Salary",
            "05 Mar 2024".to_owned(),
        );

        let html = parse(&category);

        let div = html
            .select(&Selector::parse("div#income-category-3").unwrap())
            .next()
            .expect("No category element found");
        assert_eq!(div.value().attr("data-count"), Some("3"));
        let text = div.text().collect::<String>();
        assert!(text.contains("Salary"));
        assert!(text.contains("05 Mar 2024"));
    }

    #[test]
    fn category_on_other_budget_page_has_page_in_id() {
        let category =
            CategoryComponent::new(ComponentId::Income, 2, "Bonus", "02 Apr 2024".to_owned())
                .on_budget_page(3);

        let html = parse(&category);

        assert_eq!(
            html.select(&Selector::parse("div#income-category-2").unwrap())
                .count(),
            0
        );
        let div = html
            .select(&Selector::parse("div#income-category-2-page-3").unwrap())
            .next()
            .expect("No category element found");
        assert_eq!(div.value().attr("data-count"), Some("2"));
    }

    #[test]
    fn entry_markup_shows_formatted_amount() {
        let entry = IncomeExpenseComponent {
            count: 0,
            parent: Container::EntryForm(ComponentId::Expense),
            title: "Rent".to_owned(),
            amount: 12.3,
            date: "01 Mar 2024".to_owned(),
            component_id: ComponentId::Expense,
        };

        let html = parse(&entry);

        let text = html
            .select(&Selector::parse("div#expense-entry-0").unwrap())
            .next()
            .expect("No entry element found")
            .text()
            .collect::<String>();
        assert!(text.contains("Rent"));
        assert!(text.contains("$12.30"));
    }

    #[test]
    fn budget_page_button_points_to_next_page() {
        let html = parse(&BudgetPaginationButton::new(1));

        let button = html
            .select(&Selector::parse("button").unwrap())
            .next()
            .expect("No button found");
        assert_eq!(button.value().attr("data-page"), Some("2"));
        assert_eq!(button.value().attr("data-page-type"), Some("next"));
    }

    #[test]
    fn pagination_button_hidden_until_page_is_full() {
        let button_type = ButtonType::new(ADD_INCOME_CATEGORY);
        let selector = Selector::parse("button").unwrap();

        let partial = parse(&CategoryPaginationButton::new(
            ComponentId::Income,
            0,
            button_type.clone(),
        ));
        let full = parse(&CategoryPaginationButton::new(
            ComponentId::Income,
            ITEMS_PER_PAGE - 1,
            button_type,
        ));

        let partial = partial.select(&selector).next().unwrap();
        let full = full.select(&selector).next().unwrap();
        assert!(partial.value().attr("hidden").is_some());
        assert!(full.value().attr("hidden").is_none());
        assert_eq!(full.value().attr("data-page"), Some("2"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "a".repeat(40);

        let got = truncate_title(&title);

        assert_eq!(got, format!("{}…", "a".repeat(32)));
        assert_eq!(truncate_title("Groceries"), "Groceries");
    }

    #[test]
    fn render_component_inserts_into_own_container() {
        let mut page = BudgetPage::default();
        let button = AddButton::new(ComponentId::Expense, 2);

        button.render_component(&mut page, InsertPosition::AfterBegin);
        button.update_component_state(&mut page, Container::CategoryForm(ComponentId::Expense), 3);

        assert_eq!(
            page.first_child(Container::BoxLeft(ComponentId::Expense)),
            Some(NodeKind::AddButton)
        );
        assert_eq!(page.count(Container::CategoryForm(ComponentId::Expense)), 3);
    }
}
