//! Screen state machine shared by every view.
//!
//! ```text
//! Idle -> Loading -> { Loaded, LoadError }
//! Loaded -> Submitting -> { Loaded (refetched), SubmitError }
//! ```
//!
//! The UI only ever reflects server state after a round trip: there are no
//! optimistic updates, and a failed action leaves the previous snapshot in
//! place.

use std::cell::{Cell, Ref, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<D> {
    Idle,
    Loading,
    Loaded(D),
    LoadError(String),
    Submitting(D),
    SubmitError { data: D, message: String },
}

impl<D> Default for ScreenState<D> {
    fn default() -> Self {
        ScreenState::Idle
    }
}

impl<D> ScreenState<D> {
    /// Snapshot currently on display, if any.
    pub fn data(&self) -> Option<&D> {
        match self {
            ScreenState::Loaded(data)
            | ScreenState::Submitting(data)
            | ScreenState::SubmitError { data, .. } => Some(data),
            ScreenState::Idle | ScreenState::Loading | ScreenState::LoadError(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ScreenState::Submitting(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScreenState::LoadError(message) | ScreenState::SubmitError { message, .. } => {
                Some(message)
            }
            _ => None,
        }
    }

    pub fn begin_load(self) -> Self {
        ScreenState::Loading
    }

    pub fn finish_load(self, result: Result<D, ApiError>) -> Self {
        match result {
            Ok(data) => ScreenState::Loaded(data),
            Err(err) => ScreenState::LoadError(err.user_message()),
        }
    }

    /// Enter `Submitting`. Refused (returns the state unchanged in `Err`)
    /// unless a snapshot is loaded and no other action is in flight.
    pub fn begin_submit(self) -> Result<Self, Self> {
        match self {
            ScreenState::Loaded(data) | ScreenState::SubmitError { data, .. } => {
                Ok(ScreenState::Submitting(data))
            }
            other => Err(other),
        }
    }

    /// Leave `Submitting`: a fresh snapshot replaces the old one wholesale,
    /// a failure keeps the old one.
    pub fn finish_submit(self, result: Result<D, String>) -> Self {
        match (self, result) {
            (ScreenState::Submitting(_), Ok(fresh)) => ScreenState::Loaded(fresh),
            (ScreenState::Submitting(data), Err(message)) => {
                ScreenState::SubmitError { data, message }
            }
            (other, _) => other,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Transient, human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Mount state and change notification for one view.
///
/// Once unmounted, in-flight responses are dropped on arrival instead of
/// being applied to a dead view.
#[derive(Default)]
pub struct Lifecycle {
    unmounted: Cell<bool>,
    observer: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Lifecycle {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted.get()
    }

    pub fn unmount(&self) {
        self.unmounted.set(true);
        self.observer.borrow_mut().take();
    }

    /// Register the single change observer (the view's re-render hook).
    pub fn subscribe(&self, observer: impl Fn() + 'static) {
        *self.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn notify(&self) {
        // Clone out first so the observer may call back into the controller.
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer();
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Mutation accepted and the snapshot refetched.
    Completed,
    /// Mutation or refetch failed; the previous snapshot is still shown.
    Failed,
    /// Not started: nothing loaded yet, or another action in flight.
    Refused,
    /// Result arrived after unmount or after a newer load; dropped.
    Discarded,
}

/// One server-backed snapshot plus its state machine.
pub struct Screen<D> {
    state: RefCell<ScreenState<D>>,
    message: RefCell<Option<StatusMessage>>,
    generation: Cell<u64>,
    lifecycle: Rc<Lifecycle>,
}

impl<D> Screen<D> {
    pub fn new(lifecycle: Rc<Lifecycle>) -> Self {
        Self {
            state: RefCell::new(ScreenState::Idle),
            message: RefCell::new(None),
            generation: Cell::new(0),
            lifecycle,
        }
    }

    pub fn state(&self) -> Ref<'_, ScreenState<D>> {
        self.state.borrow()
    }

    pub fn message(&self) -> Option<StatusMessage> {
        self.message.borrow().clone()
    }

    pub fn lifecycle(&self) -> &Rc<Lifecycle> {
        &self.lifecycle
    }

    /// Fetch a snapshot. Only the newest load on a mounted view is applied.
    pub async fn load<F>(&self, fetch: F)
    where
        F: Future<Output = Result<D, ApiError>>,
    {
        let ticket = self.next_generation();
        self.transition(ScreenState::begin_load);

        let result = fetch.await;
        if !self.is_current(ticket) {
            tracing::debug!("discarding stale load result");
            return;
        }
        self.transition(|state| state.finish_load(result));
    }

    /// Run a mutation, then exactly one refetch on success.
    pub async fn submit<M, R>(
        &self,
        mutation: M,
        refetch: R,
        success: impl Into<String>,
        failure: &str,
    ) -> SubmitOutcome
    where
        M: Future<Output = Result<(), ApiError>>,
        R: Future<Output = Result<D, ApiError>>,
    {
        if !self.try_begin_submit() {
            tracing::debug!("submit refused; screen not ready or busy");
            return SubmitOutcome::Refused;
        }
        let ticket = self.next_generation();
        self.notify();

        if let Err(err) = mutation.await {
            if !self.is_current(ticket) {
                return SubmitOutcome::Discarded;
            }
            return self.fail_submit(format!("{failure} {}", err.user_message()));
        }

        let refreshed = refetch.await;
        if !self.is_current(ticket) {
            tracing::debug!("discarding stale refetch result");
            return SubmitOutcome::Discarded;
        }

        match refreshed {
            Ok(fresh) => {
                *self.message.borrow_mut() = Some(StatusMessage::success(success));
                self.transition(|state| state.finish_submit(Ok(fresh)));
                SubmitOutcome::Completed
            }
            Err(err) => self.fail_submit(format!(
                "{} The list could not be refreshed: {}",
                success.into(),
                err.user_message()
            )),
        }
    }

    fn fail_submit(&self, message: String) -> SubmitOutcome {
        *self.message.borrow_mut() = Some(StatusMessage::error(message.clone()));
        self.transition(|state| state.finish_submit(Err(message)));
        SubmitOutcome::Failed
    }

    fn try_begin_submit(&self) -> bool {
        let current = std::mem::take(&mut *self.state.borrow_mut());
        let (next, started) = match current.begin_submit() {
            Ok(next) => (next, true),
            Err(unchanged) => (unchanged, false),
        };
        *self.state.borrow_mut() = next;
        started
    }

    fn transition(&self, f: impl FnOnce(ScreenState<D>) -> ScreenState<D>) {
        let current = std::mem::take(&mut *self.state.borrow_mut());
        *self.state.borrow_mut() = f(current);
        self.notify();
    }

    fn next_generation(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.lifecycle.is_mounted() && self.generation.get() == ticket
    }

    fn notify(&self) {
        self.lifecycle.notify();
    }
}

impl<D: Clone> Screen<D> {
    pub fn snapshot(&self) -> ScreenState<D> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<D> {
        self.state.borrow().data().cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Editing,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }

    pub fn message(&self) -> Option<StatusMessage> {
        match self {
            FormState::Succeeded(text) => Some(StatusMessage::success(text.clone())),
            FormState::Failed(text) => Some(StatusMessage::error(text.clone())),
            FormState::Editing | FormState::Submitting => None,
        }
    }
}

/// A draft value plus submission state, for screens that only write.
pub struct FormScreen<V> {
    draft: RefCell<V>,
    state: RefCell<FormState>,
    lifecycle: Rc<Lifecycle>,
}

impl<V: Clone + Default> FormScreen<V> {
    pub fn new(lifecycle: Rc<Lifecycle>) -> Self {
        Self::with_draft(lifecycle, V::default())
    }

    pub fn with_draft(lifecycle: Rc<Lifecycle>, draft: V) -> Self {
        Self {
            draft: RefCell::new(draft),
            state: RefCell::new(FormState::Editing),
            lifecycle,
        }
    }

    pub fn draft(&self) -> V {
        self.draft.borrow().clone()
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn lifecycle(&self) -> &Rc<Lifecycle> {
        &self.lifecycle
    }

    pub fn edit(&self, f: impl FnOnce(&mut V)) {
        f(&mut *self.draft.borrow_mut());
        self.lifecycle.notify();
    }

    /// Send the current draft. Returns `true` on success.
    ///
    /// A second submit while one is in flight is refused.
    pub async fn submit<F, Fut>(&self, send: F, success: &str, failure: &str, reset: bool) -> bool
    where
        F: FnOnce(V) -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        if self.state.borrow().is_submitting() {
            tracing::debug!("form submit refused; already in flight");
            return false;
        }
        self.set_state(FormState::Submitting);

        let result = send(self.draft()).await;
        if !self.lifecycle.is_mounted() {
            tracing::debug!("discarding form result after unmount");
            return false;
        }

        match result {
            Ok(()) => {
                if reset {
                    *self.draft.borrow_mut() = V::default();
                }
                self.set_state(FormState::Succeeded(success.to_string()));
                true
            }
            Err(err) => {
                self.set_state(FormState::Failed(format!("{failure} {}", err.user_message())));
                false
            }
        }
    }

    fn set_state(&self, state: FormState) {
        *self.state.borrow_mut() = state;
        self.lifecycle.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_transitions() {
        let state: ScreenState<Vec<u8>> = ScreenState::Idle.begin_load();
        assert!(state.is_loading());

        let loaded = state.clone().finish_load(Ok(vec![1]));
        assert_eq!(loaded, ScreenState::Loaded(vec![1]));

        let failed = state.finish_load(Err(ApiError::Network("down".into())));
        assert_eq!(failed.error(), Some("Could not reach the server."));
        assert_eq!(failed.data(), None);
    }

    #[test]
    fn submit_requires_loaded_snapshot() {
        assert_eq!(
            ScreenState::<u8>::Loading.begin_submit(),
            Err(ScreenState::Loading)
        );
        assert_eq!(ScreenState::Loaded(1u8).begin_submit(), Ok(ScreenState::Submitting(1)));
    }

    #[test]
    fn double_submit_is_refused() {
        let submitting = ScreenState::Loaded(1u8).begin_submit().unwrap();
        assert_eq!(submitting.clone().begin_submit(), Err(submitting));
    }

    #[test]
    fn failed_submit_keeps_previous_snapshot() {
        let state = ScreenState::Submitting(vec![1u8, 2]).finish_submit(Err("nope".into()));
        assert_eq!(state.data(), Some(&vec![1, 2]));
        assert_eq!(state.error(), Some("nope"));

        // A failed action can be retried.
        assert!(state.begin_submit().is_ok());
    }

    #[test]
    fn successful_submit_replaces_snapshot() {
        let state = ScreenState::Submitting(vec![1u8]).finish_submit(Ok(vec![9]));
        assert_eq!(state, ScreenState::Loaded(vec![9]));
    }

    #[test]
    fn observer_is_dropped_on_unmount() {
        let lifecycle = Lifecycle::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        lifecycle.subscribe(move || counter.set(counter.get() + 1));

        lifecycle.notify();
        lifecycle.unmount();
        lifecycle.notify();

        assert_eq!(hits.get(), 1);
        assert!(!lifecycle.is_mounted());
    }

    #[tokio::test]
    async fn newer_load_wins_over_older() {
        let screen: Screen<u8> = Screen::new(Lifecycle::new());

        // The first fetch resolves only after a second load has been applied.
        let inner = &screen;
        screen
            .load(async move {
                inner.load(async { Ok(2) }).await;
                Ok(1)
            })
            .await;

        assert_eq!(screen.snapshot(), ScreenState::Loaded(2));
    }

    #[tokio::test]
    async fn load_after_unmount_is_discarded() {
        let lifecycle = Lifecycle::new();
        let screen: Screen<u8> = Screen::new(lifecycle.clone());
        let lc = lifecycle.clone();

        screen
            .load(async move {
                lc.unmount();
                Ok(5)
            })
            .await;

        assert!(screen.snapshot().is_loading());
    }

    #[tokio::test]
    async fn screen_refuses_second_submit_while_in_flight() {
        let screen: Screen<u8> = Screen::new(Lifecycle::new());
        screen.load(async { Ok(1) }).await;

        let mut first = Box::pin(screen.submit(
            std::future::pending::<Result<(), ApiError>>(),
            async { Ok(2) },
            "Saved",
            "Failed.",
        ));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(screen.snapshot().is_submitting());

        let mutations = Cell::new(0);
        let second = screen
            .submit(
                async {
                    mutations.set(mutations.get() + 1);
                    Ok(())
                },
                async { Ok(3) },
                "Saved",
                "Failed.",
            )
            .await;

        assert_eq!(second, SubmitOutcome::Refused);
        assert_eq!(mutations.get(), 0);
        assert_eq!(screen.snapshot(), ScreenState::Submitting(1));
    }

    #[tokio::test]
    async fn form_refuses_second_submit_while_in_flight() {
        let form: FormScreen<String> = FormScreen::new(Lifecycle::new());

        let mut first = Box::pin(form.submit(
            |_| std::future::pending::<Result<(), ApiError>>(),
            "Saved",
            "Failed.",
            false,
        ));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(form.state().is_submitting());

        let sends = Cell::new(0);
        let ok = form
            .submit(
                |_| {
                    sends.set(sends.get() + 1);
                    async { Ok(()) }
                },
                "Saved",
                "Failed.",
                false,
            )
            .await;

        assert!(!ok);
        assert_eq!(sends.get(), 0);
        assert_eq!(form.state(), FormState::Submitting);
    }

    #[tokio::test]
    async fn form_resets_only_on_success() {
        let form: FormScreen<String> = FormScreen::new(Lifecycle::new());
        form.edit(|d| d.push_str("draft"));

        let ok = form
            .submit(|_| async { Err(ApiError::Forbidden) }, "Saved", "Failed.", true)
            .await;
        assert!(!ok);
        assert_eq!(form.draft(), "draft");
        assert_eq!(
            form.state(),
            FormState::Failed("Failed. You are not allowed to do that.".into())
        );

        let ok = form.submit(|_| async { Ok(()) }, "Saved", "Failed.", true).await;
        assert!(ok);
        assert_eq!(form.draft(), "");
        assert_eq!(form.state(), FormState::Succeeded("Saved".into()));
    }
}
