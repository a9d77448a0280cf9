//! Rendering the outcome of saving a category or an entry into the budget page.
//!
//! Both coordinators validate the submitted date, save through a [BudgetStore]
//! and then either show the store's error message or add the new item to the
//! page. The shared part lives in [RenderValidator].

use crate::{
    components::{
        AddButton, BudgetPaginationButton, CategoryComponent, CategoryPaginationButton, Component,
        ExpenseCategoryButton, IncomeExpenseComponent, IncomeExpensePaginationButton,
    },
    dates::{BudgetDate, construct_budget_date, date_mismatch_message, format_date, valid_date},
    store::{BudgetStore, SUCCESS},
    view_elements::{Container, InsertPosition, ViewElements},
    view_state::{ComponentId, ViewState},
};

/// The message shown after a category or entry is saved.
pub const SUCCESS_MESSAGE: &str = "Successfully added 😀";

/// What happened to a submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The item was saved and added to the page.
    Rendered(ComponentId),
    /// The store rejected the item and its message is shown.
    SaveFailed,
    /// The date was outside the expected budget month, nothing was saved.
    InvalidDate,
}

/// Turns the outcome of a save into either a message or a newly rendered item.
pub trait RenderValidator {
    /// Add the newly saved item described by `state` to the page.
    fn render_component<V: ViewElements>(
        &self,
        view: &mut V,
        state: &ViewState,
        component_id: ComponentId,
    );

    /// Show `outcome` if it is an error message, otherwise show the success
    /// message and render the new item.
    ///
    /// Only the exact string [SUCCESS] counts as success.
    fn validate_and_render_component<V: ViewElements>(
        &self,
        view: &mut V,
        state: &ViewState,
        outcome: &str,
    ) -> RenderOutcome {
        if outcome != SUCCESS {
            view.render_message(outcome);
            return RenderOutcome::SaveFailed;
        }

        let component_id = state.button_type.component_id();
        view.render_message(SUCCESS_MESSAGE);
        self.render_component(view, state, component_id);

        RenderOutcome::Rendered(component_id)
    }
}

/// Show the date mismatch message if `state.input_date` is outside `expected`.
fn check_date<V: ViewElements>(
    view: &mut V,
    state: &ViewState,
    expected: Option<BudgetDate>,
) -> Result<(), RenderOutcome> {
    match expected {
        Some(expected) if !valid_date(state.input_date, expected) => {
            tracing::debug!(
                "Rejected {} dated {}, expected {expected}",
                state.button_type,
                state.input_date
            );
            view.render_message(&date_mismatch_message(expected));
            Err(RenderOutcome::InvalidDate)
        }
        _ => Ok(()),
    }
}

/// Saves and renders income and expense categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRenderCoordinator;

/// The coordinator used by the category endpoint.
pub const RENDER_CATEGORY: CategoryRenderCoordinator = CategoryRenderCoordinator;

impl CategoryRenderCoordinator {
    /// Save the category described by `state` and render the outcome into `view`.
    ///
    /// Expense categories must be dated within the displayed budget month, if
    /// one has been set. Otherwise nothing is saved.
    pub async fn init<S, V>(&self, state: &ViewState, store: &S, view: &mut V) -> RenderOutcome
    where
        S: BudgetStore,
        V: ViewElements,
    {
        if state.button_type.is_expense_category() {
            let budget_date = view.budget_date();
            if let Err(outcome) = check_date(view, state, budget_date) {
                return outcome;
            }
        }

        let outcome = store
            .save_category(&state.button_type, state.input_date, &state.input_title)
            .await;

        self.validate_and_render_component(view, state, &outcome)
    }
}

impl RenderValidator for CategoryRenderCoordinator {
    fn render_component<V: ViewElements>(
        &self,
        view: &mut V,
        state: &ViewState,
        component_id: ComponentId,
    ) {
        let category_form = Container::CategoryForm(component_id);
        let count = view.count(category_form);
        // The store saves the trimmed title.
        let title = state.input_title.trim();

        let category =
            CategoryComponent::new(component_id, count, title, format_date(state.input_date));

        // A category dated outside the current page's month goes on another budget page.
        let other_month = state.category_date.is_some_and(|category_date| {
            construct_budget_date(state.input_date) != construct_budget_date(category_date)
        });

        if other_month {
            let budget_count = view.count(Container::Budget);
            let budget_page = budget_count + 1;
            category
                .on_budget_page(budget_page)
                .render_component(view, InsertPosition::BeforeEnd);
            BudgetPaginationButton::new(budget_count)
                .render_component(view, InsertPosition::BeforeEnd);
            view.set_count(Container::Budget, budget_page);
            tracing::debug!("Category \"{title}\" starts budget page {budget_page}");
            return;
        }

        category.render_component(view, InsertPosition::BeforeEnd);
        CategoryPaginationButton::new(component_id, count, state.button_type.clone())
            .render_component(view, InsertPosition::BeforeEnd);
        AddButton::new(component_id, count).render_component(view, InsertPosition::AfterBegin);
        category.update_component_state(view, category_form, count + 1);

        if view.count(Container::Budget) >= 1 {
            return;
        }
        view.set_count(Container::Budget, 1);

        if view.budget_date().is_none() {
            let budget_date = construct_budget_date(state.input_date);
            tracing::debug!("Starting budget for {budget_date}");
            view.set_budget_date(budget_date);
        }
    }
}

/// Saves and renders income and expense entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncomeExpenseRenderCoordinator;

/// The coordinator used by the entry endpoint.
pub const RENDER_INCOME_AND_EXPENSE: IncomeExpenseRenderCoordinator =
    IncomeExpenseRenderCoordinator;

impl IncomeExpenseRenderCoordinator {
    /// Save the entry described by `state` and render the outcome into `view`.
    ///
    /// Entries must be dated within the month of their category, if one was
    /// submitted. Otherwise nothing is saved.
    pub async fn init<S, V>(&self, state: &ViewState, store: &S, view: &mut V) -> RenderOutcome
    where
        S: BudgetStore,
        V: ViewElements,
    {
        let category_date = state.category_date.map(construct_budget_date);
        if let Err(outcome) = check_date(view, state, category_date) {
            return outcome;
        }

        let outcome = store
            .save_income_and_expense(
                &state.button_type,
                state.input_date,
                &state.input_title,
                state.input_amount,
                state.category_title.as_deref(),
            )
            .await;

        self.validate_and_render_component(view, state, &outcome)
    }
}

impl RenderValidator for IncomeExpenseRenderCoordinator {
    fn render_component<V: ViewElements>(
        &self,
        view: &mut V,
        state: &ViewState,
        component_id: ComponentId,
    ) {
        let entry_form = Container::EntryForm(component_id);
        let count = view.count(entry_form);
        // The store only reports success when an amount was given.
        let amount = state.input_amount.unwrap_or_default();

        let entry = IncomeExpenseComponent {
            count,
            parent: entry_form,
            title: state.input_title.trim().to_owned(),
            amount,
            date: format_date(state.input_date),
            component_id,
        };
        entry.render_component(view, InsertPosition::BeforeEnd);

        IncomeExpensePaginationButton {
            count,
            parent: entry_form,
            button_type: state.button_type.clone(),
        }
        .render_component(view, InsertPosition::BeforeEnd);

        entry.update_component_state(view, entry_form, count + 1);

        let has_expense_category_button = view
            .first_child(Container::ExpenseCategories)
            .is_some_and(|kind| kind.is_button());

        if component_id == ComponentId::Income && !has_expense_category_button {
            ExpenseCategoryButton {
                count: view.count(entry_form),
                parent: Container::ExpenseCategories,
            }
            .render_component(view, InsertPosition::AfterBegin);
        }

        view.update_budget(amount, component_id);
    }
}


#[cfg(test)]
mod render_validator_tests {
    use std::cell::Cell;

    use time::macros::date;

    use super::test_doubles::RecordingPage;
    use crate::{
        render::{RenderOutcome, RenderValidator, SUCCESS_MESSAGE},
        view_elements::ViewElements,
        view_state::{ADD_EXPENSE, ADD_INCOME, ADD_INCOME_CATEGORY, ButtonType, ComponentId, ViewState},
    };

    /// Counts how often it is asked to render and with which component ID.
    #[derive(Default)]
    struct CountingRenderer {
        renders: Cell<u32>,
        last_component_id: Cell<Option<ComponentId>>,
    }

    impl RenderValidator for CountingRenderer {
        fn render_component<V: ViewElements>(
            &self,
            _view: &mut V,
            _state: &ViewState,
            component_id: ComponentId,
        ) {
            self.renders.set(self.renders.get() + 1);
            self.last_component_id.set(Some(component_id));
        }
    }

    fn state(button_type: &str) -> ViewState {
        ViewState {
            button_type: ButtonType::new(button_type),
            input_title: "Salary".to_owned(),
            input_date: date!(2024 - 03 - 05),
            input_amount: Some(50.0),
            category_title: None,
            category_date: None,
        }
    }

    #[test]
    fn error_outcome_is_shown_verbatim_without_rendering() {
        for outcome in ["Insufficient funds", "", "Success", "success ", "error"] {
            let renderer = CountingRenderer::default();
            let mut view = RecordingPage::default();

            let got = renderer.validate_and_render_component(&mut view, &state(ADD_INCOME), outcome);

            assert_eq!(got, RenderOutcome::SaveFailed);
            assert_eq!(view.messages, [outcome]);
            assert_eq!(renderer.renders.get(), 0, "rendered for outcome {outcome:?}");
        }
    }

    #[test]
    fn success_shows_message_once_and_renders_once() {
        let renderer = CountingRenderer::default();
        let mut view = RecordingPage::default();

        let got =
            renderer.validate_and_render_component(&mut view, &state(ADD_INCOME_CATEGORY), "success");

        assert_eq!(got, RenderOutcome::Rendered(ComponentId::Income));
        assert_eq!(view.messages, [SUCCESS_MESSAGE]);
        assert_eq!(renderer.renders.get(), 1);
        assert_eq!(renderer.last_component_id.get(), Some(ComponentId::Income));
    }

    #[test]
    fn other_button_types_render_as_expense() {
        for button_type in [ADD_EXPENSE, "add-expense-category", "unknown"] {
            let renderer = CountingRenderer::default();
            let mut view = RecordingPage::default();

            renderer.validate_and_render_component(&mut view, &state(button_type), "success");

            assert_eq!(renderer.last_component_id.get(), Some(ComponentId::Expense));
        }
    }
}
