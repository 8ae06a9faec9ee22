//! Fetch-and-render controller.
//!
//! Every call to [`Controller::fetch_and_render`] takes a new generation
//! number. Only the newest generation may write its result to the view, so
//! when requests overlap the last one issued wins, not the last one to
//! resolve. The loader is hidden from a drop guard and is therefore cleared
//! on success, failure, panic and cancellation alike.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::card::{CardAction, CardEvent};
use crate::detect::locate_items;
use crate::labels::Labels;
use crate::render::{render_items, Grid, GridMessage};
use crate::source::CatalogSource;
use crate::types::{QueryState, ShelfError, ShelfResult};
use crate::view::View;

/// How a fetch cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Items were painted (possibly the empty-list placeholder).
    Rendered { count: usize, page: u32 },
    /// The response held no item array.
    NoData,
    /// Transport, status or decode failure.
    Failed,
    /// A newer fetch started before this one resolved; its result was dropped.
    Superseded,
}

/// Drives one source and one view.
pub struct Controller<S, V> {
    source: S,
    view: Arc<Mutex<V>>,
    labels: Labels,
    generation: AtomicU64,
}

impl<S: CatalogSource, V: View> Controller<S, V> {
    pub fn new(source: S, view: V, labels: Labels) -> Self {
        Self::with_shared_view(source, Arc::new(Mutex::new(view)), labels)
    }

    pub fn with_shared_view(source: S, view: Arc<Mutex<V>>, labels: Labels) -> Self {
        Self {
            source,
            view,
            labels,
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Lock the view for reading or direct manipulation.
    pub fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn shared_view(&self) -> Arc<Mutex<V>> {
        Arc::clone(&self.view)
    }

    /// Number of fetch cycles started so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Run one full cycle: loader on, fetch, locate, render, status, loader off.
    pub async fn fetch_and_render(&self, state: QueryState) -> FetchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut view = self.view();
            view.show_loader();
            view.clear_grid();
            view.set_status(&self.labels.loading);
        }
        let _loader = LoaderGuard {
            controller: self,
            generation,
        };

        let result = self.load(&state).await;

        if !self.is_current(generation) {
            tracing::debug!(generation, page = state.page, "dropping superseded response");
            return FetchOutcome::Superseded;
        }

        let mut view = self.view();
        match result {
            Ok((grid, count)) => {
                view.paint(grid);
                view.set_status(&self.labels.status_count(count, state.page));
                FetchOutcome::Rendered {
                    count,
                    page: state.page,
                }
            }
            Err(ShelfError::Shape(e)) => {
                tracing::warn!(error = %e, "catalog response has no item list");
                view.paint(Grid::Message(GridMessage::NoData));
                view.set_status(&self.labels.status_zero());
                FetchOutcome::NoData
            }
            Err(e) => {
                tracing::error!(error = %e, page = state.page, "catalog load failed");
                view.paint(Grid::Message(GridMessage::LoadError));
                view.set_status(&self.labels.status_error);
                FetchOutcome::Failed
            }
        }
    }

    async fn load(&self, state: &QueryState) -> ShelfResult<(Grid, usize)> {
        let response = self.source.fetch(state).await?;
        let located = locate_items(&response)?;
        tracing::debug!(
            location = %located.location,
            count = located.items.len(),
            "located catalog items"
        );
        Ok((render_items(located.items, &self.labels), located.items.len()))
    }

    /// Apply a buy or favorite action to a painted card.
    ///
    /// Returns `None` when no card is painted at `index`.
    pub fn interact(&self, index: usize, action: CardAction) -> Option<CardEvent> {
        let mut view = self.view();
        let (event, card) = {
            let card = view.grid_mut()?.card_mut(index)?;
            (card.apply(action), card.clone())
        };
        tracing::info!(?event, index, "card interaction");

        match &event {
            CardEvent::AddedToCart { title } => view.notify(&self.labels.cart_notice(title)),
            CardEvent::FavoriteToggled { .. } => view.refresh_card(index, &card),
        }
        Some(event)
    }
}

/// Hides the loader when a fetch cycle ends, unless a newer cycle owns it.
struct LoaderGuard<'a, S: CatalogSource, V: View> {
    controller: &'a Controller<S, V>,
    generation: u64,
}

impl<S: CatalogSource, V: View> Drop for LoaderGuard<'_, S, V> {
    fn drop(&mut self) {
        if self.controller.is_current(self.generation) {
            self.controller.view().hide_loader();
        }
    }
}
