//! Input bindings: UI events mutate the query state and trigger fetches.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::controller::{Controller, FetchOutcome};
use crate::source::CatalogSource;
use crate::types::{Order, QueryState};
use crate::view::View;

/// Default pause in typing before a search fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// A user interaction with the page controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SizeChanged(u32),
    OrderChanged(Order),
    PrevPage,
    NextPage,
    /// The raw search box contents after a keystroke.
    SearchInput(String),
}

/// Delays a task until calls stop arriving for a fixed interval.
///
/// Each new call cancels the pending timer. Once the timer has elapsed the
/// task runs in its own tokio task, so later calls cannot abort it.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending timer with a new one that runs `task` on expiry.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        }));
    }

    /// Drop the pending timer, if it has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Owns the query state and routes UI events to the controller.
pub struct Bindings<S, V> {
    state: Arc<Mutex<QueryState>>,
    controller: Arc<Controller<S, V>>,
    debouncer: Debouncer,
}

impl<S, V> Bindings<S, V>
where
    S: CatalogSource + 'static,
    V: View + 'static,
{
    pub fn new(controller: Arc<Controller<S, V>>, initial: QueryState, debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
            controller,
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn controller(&self) -> &Arc<Controller<S, V>> {
        &self.controller
    }

    /// Copy of the current query state.
    pub fn state(&self) -> QueryState {
        lock(&self.state).clone()
    }

    /// Fetch the current state without changing it (initial load, reload).
    pub fn load(&self) -> JoinHandle<FetchOutcome> {
        self.spawn_fetch(self.state())
    }

    /// Apply an event. Returns the fetch it started, or `None` when the event
    /// changed nothing or the fetch was deferred by the search debounce.
    pub fn dispatch(&mut self, event: UiEvent) -> Option<JoinHandle<FetchOutcome>> {
        tracing::debug!(?event, "ui event");
        let snapshot = {
            let mut state = lock(&self.state);
            match event {
                UiEvent::SizeChanged(size) => state.set_size(size),
                UiEvent::OrderChanged(order) => state.set_order(order),
                UiEvent::PrevPage => {
                    if !state.prev_page() {
                        return None;
                    }
                }
                UiEvent::NextPage => state.next_page(),
                UiEvent::SearchInput(raw) => {
                    state.set_query(&raw);
                    drop(state);
                    self.schedule_search();
                    return None;
                }
            }
            state.clone()
        };
        Some(self.spawn_fetch(snapshot))
    }

    /// True while a search keystroke is waiting out the debounce delay.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn schedule_search(&mut self) {
        let state = Arc::clone(&self.state);
        let controller = Arc::clone(&self.controller);
        self.debouncer.schedule(async move {
            let snapshot = {
                let mut state = lock(&state);
                state.reset_page();
                state.clone()
            };
            tracing::debug!(query = %snapshot.query, "debounced search fired");
            controller.fetch_and_render(snapshot).await;
        });
    }

    fn spawn_fetch(&self, state: QueryState) -> JoinHandle<FetchOutcome> {
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move { controller.fetch_and_render(state).await })
    }
}

fn lock(state: &Mutex<QueryState>) -> MutexGuard<'_, QueryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
