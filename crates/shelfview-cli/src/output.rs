//! One-shot output formats for `shelfview fetch`.

use serde::Serialize;

use shelfview::{escape_markup, Grid, Labels};

/// How a fetched page is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Serialize)]
struct JsonPage<'a> {
    status: &'a str,
    grid: &'a Grid,
}

/// Render a painted grid and its status line in the requested format.
pub fn render(
    format: OutputFormat,
    grid: &Grid,
    status: &str,
    labels: &Labels,
) -> anyhow::Result<String> {
    let out = match format {
        OutputFormat::Text => {
            let mut out = crate::terminal::grid_lines(grid, labels).join("\n");
            out.push_str("\n\n");
            out.push_str(status);
            out.push('\n');
            out
        }
        OutputFormat::Json => serde_json::to_string_pretty(&JsonPage { status, grid })?,
        OutputFormat::Html => html_document(grid, status, labels),
    };
    Ok(out)
}

/// Standalone page around the grid markup.
pub fn html_document(grid: &Grid, status: &str, labels: &Labels) -> String {
    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>Shelfview</title>\n</head>\n<body>\n",
            "<div id=\"pageInfo\">{status}</div>\n",
            "<main id=\"grid\" class=\"grid\">{grid}</main>\n",
            "</body>\n</html>\n"
        ),
        status = escape_markup(status),
        grid = grid.to_html(labels),
    )
}
