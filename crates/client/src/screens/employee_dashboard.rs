use std::cell::Cell;
use std::rc::Rc;

use ems_core::{unread_count, Expense, Notification, StatusFilter};

use crate::api::ApiClient;
use crate::screen::{Lifecycle, Screen};
use crate::transport::Transport;

/// The employee's own expenses plus their notification feed.
///
/// The two lists load independently; a failure in one leaves the other
/// usable.
pub struct EmployeeDashboard<T> {
    api: ApiClient<T>,
    expenses: Screen<Vec<Expense>>,
    notifications: Screen<Vec<Notification>>,
    filter: Cell<StatusFilter>,
    show_notifications: Cell<bool>,
    lifecycle: Rc<Lifecycle>,
}

impl<T: Transport> EmployeeDashboard<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        let lifecycle = Lifecycle::new();
        Self {
            api,
            expenses: Screen::new(lifecycle.clone()),
            notifications: Screen::new(lifecycle.clone()),
            filter: Cell::new(StatusFilter::All),
            show_notifications: Cell::new(false),
            lifecycle,
        }
    }

    pub fn lifecycle(&self) -> Rc<Lifecycle> {
        self.lifecycle.clone()
    }

    pub fn expenses(&self) -> &Screen<Vec<Expense>> {
        &self.expenses
    }

    pub fn notifications(&self) -> &Screen<Vec<Notification>> {
        &self.notifications
    }

    /// Fetch both lists concurrently; a slow or hung request for one never
    /// holds back the other.
    pub async fn load(&self) {
        futures::join!(
            self.expenses.load(self.api.my_expenses()),
            self.notifications.load(self.api.notifications())
        );
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter.get()
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        self.filter.set(filter);
        self.lifecycle.notify();
    }

    /// Loaded expenses narrowed by the current filter.
    pub fn visible_expenses(&self) -> Vec<Expense> {
        let filter = self.filter.get();
        self.expenses
            .data()
            .unwrap_or_default()
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .state()
            .data()
            .map_or(0, |list| unread_count(list))
    }

    pub fn notifications_open(&self) -> bool {
        self.show_notifications.get()
    }

    pub fn toggle_notifications(&self) {
        self.show_notifications.set(!self.show_notifications.get());
        self.lifecycle.notify();
    }
}
