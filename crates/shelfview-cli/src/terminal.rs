//! Terminal rendering of the catalog grid.

use shelfview::{Card, Grid, Labels, View};

/// Plain-text line for one card.
pub fn card_line(index: usize, card: &Card) -> String {
    let mut line = format!(
        "{:>3}. {} {}  {}",
        index + 1,
        card.favorite_glyph(),
        card.stars,
        card.display_title()
    );
    line.push_str(&format!("  ({})", card.reviews));
    if !card.old_price.is_empty() {
        line.push_str(&format!("  ~{}~", card.old_price));
    }
    line.push_str(&format!("  {}", card.price));
    if card.image.is_none() {
        line.push_str("  [no image]");
    }
    line
}

/// All lines of a painted grid.
pub fn grid_lines(grid: &Grid, labels: &Labels) -> Vec<String> {
    match grid {
        Grid::Cards(cards) => cards
            .iter()
            .enumerate()
            .map(|(i, c)| card_line(i, c))
            .collect(),
        Grid::Message(m) => vec![format!("     {}", m.text(labels))],
    }
}

/// A [`View`] that prints to stderr as things change.
pub struct TerminalView {
    labels: Labels,
    grid: Option<Grid>,
    status: String,
}

impl TerminalView {
    pub fn new(labels: Labels) -> Self {
        Self {
            labels,
            grid: None,
            status: String::new(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }
}

impl View for TerminalView {
    fn show_loader(&mut self) {
        eprintln!("  \x1b[90m…\x1b[0m");
    }

    fn hide_loader(&mut self) {}

    fn clear_grid(&mut self) {
        self.grid = None;
    }

    fn paint(&mut self, grid: Grid) {
        eprintln!();
        for line in grid_lines(&grid, &self.labels) {
            eprintln!("{line}");
        }
        self.grid = Some(grid);
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
        if text != self.labels.loading {
            eprintln!();
            eprintln!("  \x1b[1m{text}\x1b[0m");
            eprintln!();
        }
    }

    fn notify(&mut self, message: &str) {
        eprintln!("  \x1b[32m\u{2714}\x1b[0m {message}");
    }

    fn grid_mut(&mut self) -> Option<&mut Grid> {
        self.grid.as_mut()
    }

    fn refresh_card(&mut self, index: usize, card: &Card) {
        eprintln!("{}", card_line(index, card));
    }
}
