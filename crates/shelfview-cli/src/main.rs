//! Shelfview CLI — entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use shelfview::{
    resolve_api_base, resolve_config_path, Bindings, Controller, FetchOutcome, HttpCatalog,
    MemoryView, Order, QueryState, ShelfConfig,
};
use shelfview_cli::{output, repl, OutputFormat, TerminalView};

#[derive(Parser)]
#[command(
    name = "shelfview",
    about = "Shelfview — browse a paginated, searchable catalog from the terminal",
    version
)]
struct Cli {
    /// Catalog API endpoint. Also reads SHELFVIEW_API.
    #[arg(long, global = true)]
    api: Option<String>,

    /// Path to a JSON config file. Also reads SHELFVIEW_CONFIG.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively (default).
    Browse {
        /// Items per page.
        #[arg(long)]
        size: Option<u32>,

        /// Sort order (asc, desc).
        #[arg(long)]
        order: Option<Order>,

        /// Initial search text.
        #[arg(long)]
        query: Option<String>,
    },

    /// Fetch one page and print it.
    Fetch {
        /// Page number, starting at 1.
        #[arg(long, default_value = "1")]
        page: u32,

        /// Items per page.
        #[arg(long)]
        size: Option<u32>,

        /// Sort order (asc, desc).
        #[arg(long)]
        order: Option<Order>,

        /// Search text.
        #[arg(long)]
        query: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   shelfview completions bash > ~/.local/share/bash-completion/completions/shelfview
    ///   shelfview completions zsh > ~/.zfunc/_shelfview
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn initial_state(
    config: &ShelfConfig,
    size: Option<u32>,
    order: Option<Order>,
    query: Option<&str>,
) -> QueryState {
    let mut state = config.initial_state();
    if let Some(size) = size {
        state.set_size(size);
    }
    if let Some(order) = order {
        state.set_order(order);
    }
    if let Some(query) = query {
        state.set_query(query);
    }
    state
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = ShelfConfig::load_or_default(&config_path)?;
    let api_base = resolve_api_base(cli.api.as_deref(), &config);

    match cli.command.unwrap_or(Commands::Browse {
        size: None,
        order: None,
        query: None,
    }) {
        Commands::Browse { size, order, query } => {
            let source = HttpCatalog::new(&api_base, config.timeout_ms)?;
            tracing::info!("Catalog: {}", source.base());
            let view = TerminalView::new(config.labels.clone());
            let controller = Arc::new(Controller::new(source, view, config.labels.clone()));
            let state = initial_state(&config, size, order, query.as_deref());
            let bindings = Bindings::new(controller, state, config.debounce());
            repl::run(bindings, &api_base).await?;
        }

        Commands::Fetch {
            page,
            size,
            order,
            query,
            format,
            out,
        } => {
            let source = HttpCatalog::new(&api_base, config.timeout_ms)?;
            let controller = Controller::new(source, MemoryView::new(), config.labels.clone());
            let mut state = initial_state(&config, size, order, query.as_deref());
            state.page = page.max(1);

            let outcome = controller.fetch_and_render(state).await;
            let rendered = {
                let view = controller.view();
                match &view.grid {
                    Some(grid) => output::render(format, grid, &view.status, &config.labels)?,
                    None => anyhow::bail!("no grid was painted"),
                }
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => print!("{rendered}"),
            }

            if outcome == FetchOutcome::Failed {
                std::process::exit(1);
            }
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "shelfview", &mut std::io::stdout());
        }
    }

    Ok(())
}
