//! The UI surface a controller paints on.

use crate::card::Card;
use crate::render::Grid;

/// Mount points for the loader, the grid and the status line.
///
/// Implementations own what is currently painted; the controller only
/// writes through this trait.
pub trait View: Send {
    fn show_loader(&mut self);
    fn hide_loader(&mut self);
    fn clear_grid(&mut self);
    fn paint(&mut self, grid: Grid);
    fn set_status(&mut self, text: &str);

    /// Surface a confirmation to the user.
    fn notify(&mut self, message: &str);

    /// The grid currently painted, if any.
    fn grid_mut(&mut self) -> Option<&mut Grid>;

    /// Called after a card changed in place.
    fn refresh_card(&mut self, _index: usize, _card: &Card) {}
}

/// A view that just records what it was given.
#[derive(Debug, Default)]
pub struct MemoryView {
    pub loader_visible: bool,
    pub grid: Option<Grid>,
    pub status: String,
    pub notifications: Vec<String>,
    /// Number of `paint` calls so far.
    pub paints: usize,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for MemoryView {
    fn show_loader(&mut self) {
        self.loader_visible = true;
    }

    fn hide_loader(&mut self) {
        self.loader_visible = false;
    }

    fn clear_grid(&mut self) {
        self.grid = None;
    }

    fn paint(&mut self, grid: Grid) {
        self.grid = Some(grid);
        self.paints += 1;
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }

    fn grid_mut(&mut self) -> Option<&mut Grid> {
        self.grid.as_mut()
    }
}
