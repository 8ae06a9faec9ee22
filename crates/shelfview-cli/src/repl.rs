//! Interactive catalog browser.
//!
//! Launch with `shelfview browse` (or no subcommand). Each command is one
//! UI event: paging, sort, page size, search, and the card actions.
//! Type `/help` for available commands, Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use shelfview::{Bindings, CardAction, CatalogSource, Order, UiEvent};

use crate::terminal::TerminalView;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/next", "Go to the next page"),
    ("/prev", "Go to the previous page"),
    ("/size", "Set page size, e.g. /size 48"),
    ("/order", "Set sort order: asc or desc"),
    ("/search", "Search the catalog (empty clears)"),
    ("/buy", "Add card N to the cart"),
    ("/fav", "Toggle favorite on card N"),
    ("/state", "Show the current query state"),
    ("/reload", "Fetch the current page again"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the browser"),
];

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Event(UiEvent),
    Card { index: usize, action: CardAction },
    State,
    Reload,
    Clear,
    Help,
    Exit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let input = line.strip_prefix('/').unwrap_or(line);
    if input.is_empty() {
        return Ok(Some(ReplCommand::Help));
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("");

    let command = match cmd {
        "next" | "n" => ReplCommand::Event(UiEvent::NextPage),
        "prev" | "p" => ReplCommand::Event(UiEvent::PrevPage),
        "size" => {
            let size = args
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| "Usage: /size <positive number>".to_string())?;
            ReplCommand::Event(UiEvent::SizeChanged(size))
        }
        "order" => {
            let order = args
                .parse::<Order>()
                .map_err(|_| "Usage: /order asc|desc".to_string())?;
            ReplCommand::Event(UiEvent::OrderChanged(order))
        }
        "search" | "s" => ReplCommand::Event(UiEvent::SearchInput(args.to_string())),
        "buy" => card_command(args, CardAction::Buy, "/buy")?,
        "fav" => card_command(args, CardAction::Favorite, "/fav")?,
        "state" => ReplCommand::State,
        "reload" | "r" => ReplCommand::Reload,
        "clear" | "cls" => ReplCommand::Clear,
        "help" | "h" | "?" => ReplCommand::Help,
        "exit" | "quit" | "q" => ReplCommand::Exit,
        _ => return Err(format!("Unknown command '/{cmd}'. Type /help for commands.")),
    };
    Ok(Some(command))
}

fn card_command(args: &str, action: CardAction, usage: &str) -> Result<ReplCommand, String> {
    let number = args
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("Usage: {usage} <card number>"))?;
    Ok(ReplCommand::Card {
        index: number - 1,
        action,
    })
}

/// REPL helper for tab completion.
#[derive(Default)]
struct BrowseHelper;

impl Completer for BrowseHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        if let Some(arg) = input.strip_prefix("/order ") {
            let start = input.len() - arg.len();
            let matches: Vec<Pair> = ["asc", "desc"]
                .iter()
                .filter(|o| o.starts_with(arg.trim()))
                .map(|o| Pair {
                    display: o.to_string(),
                    replacement: o.to_string(),
                })
                .collect();
            return Ok((start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for BrowseHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for BrowseHelper {}
impl Validator for BrowseHelper {}
impl Helper for BrowseHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Run the interactive browser until `/exit` or EOF.
pub async fn run<S>(mut bindings: Bindings<S, TerminalView>, api_base: &str) -> anyhow::Result<()>
where
    S: CatalogSource + 'static,
{
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mshelfview v{}\x1b[0m \x1b[90m{api_base}\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );

    bindings.load().await?;

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<BrowseHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(BrowseHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".shelfview_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let prompt = " \x1b[36mshelf>\x1b[0m ";

    loop {
        let line = tokio::task::block_in_place(|| rl.readline(prompt));
        match line {
            Ok(line) => match parse_command(&line) {
                Ok(None) => continue,
                Ok(Some(ReplCommand::Exit)) => {
                    eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                    break;
                }
                Ok(Some(command)) => execute(&mut bindings, command).await?,
                Err(message) => eprintln!("  {message}"),
            },
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}

async fn execute<S>(bindings: &mut Bindings<S, TerminalView>, command: ReplCommand) -> anyhow::Result<()>
where
    S: CatalogSource + 'static,
{
    match command {
        ReplCommand::Event(event) => {
            if let Some(fetch) = bindings.dispatch(event) {
                fetch.await?;
            }
        }
        ReplCommand::Card { index, action } => {
            if bindings.controller().interact(index, action).is_none() {
                eprintln!("  No card #{} on this page.", index + 1);
            }
        }
        ReplCommand::State => {
            let state = bindings.state();
            eprintln!();
            eprintln!("  Page:   {}", state.page);
            eprintln!("  Size:   {}", state.size);
            eprintln!("  Order:  {}", state.order);
            eprintln!(
                "  Search: {}",
                if state.query.is_empty() { "-" } else { state.query.as_str() }
            );
            eprintln!();
        }
        ReplCommand::Reload => {
            bindings.load().await?;
        }
        ReplCommand::Clear => eprint!("\x1b[2J\x1b[H"),
        ReplCommand::Help => cmd_help(),
        ReplCommand::Exit => {}
    }
    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<18} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: searches wait for a short pause before fetching.");
    eprintln!();
}
