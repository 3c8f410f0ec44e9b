use std::rc::Rc;

use ems_core::{DomainError, NewExpense, Receipt};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::screen::{FormScreen, FormState, Lifecycle};
use crate::transport::Transport;

/// Raw form input. The amount is checked on submit and sent as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    pub notes: String,
    pub date: String,
    pub receipt: Option<Receipt>,
}

impl ExpenseDraft {
    pub fn into_new_expense(self) -> Result<NewExpense, DomainError> {
        let expense = NewExpense {
            amount: self.amount.trim().to_string(),
            category: self.category,
            notes: self.notes,
            date: self.date,
            receipt: self.receipt,
        };
        expense.validate()?;
        Ok(expense)
    }
}

pub struct SubmitExpenseForm<T> {
    api: ApiClient<T>,
    form: FormScreen<ExpenseDraft>,
}

impl<T: Transport> SubmitExpenseForm<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            form: FormScreen::new(Lifecycle::new()),
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.form.lifecycle().clone()
    }

    pub fn draft(&self) -> ExpenseDraft {
        self.form.draft()
    }

    pub fn state(&self) -> FormState {
        self.form.state()
    }

    pub fn edit(&self, f: impl FnOnce(&mut ExpenseDraft)) {
        self.form.edit(f);
    }

    pub fn attach(&self, receipt: Option<Receipt>) {
        self.form.edit(|d| d.receipt = receipt);
    }

    /// Upload the expense as multipart form data. The draft is kept; the
    /// view leaves the screen shortly after a success.
    pub async fn submit(&self) -> bool {
        let api = &self.api;
        self.form
            .submit(
                |draft| async move {
                    let expense = draft.into_new_expense()?;
                    api.submit_expense(&expense).await?;
                    Ok::<(), ApiError>(())
                },
                "Expense submitted successfully",
                "Failed to submit expense.",
                false,
            )
            .await
    }
}
