//! Shelfview terminal front-end — fetch, print and browse catalog pages.

pub mod output;
pub mod repl;
pub mod terminal;

pub use output::OutputFormat;
pub use terminal::TerminalView;
