use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use docsift::config::{self, ClientConfig};
use docsift::error::GENERIC_FAILURE;
use docsift::highlight::{self, HighlightSpan};
use docsift::session::{DocumentState, DocumentView, SearchSession, SearchState};
use docsift::SearchClient;

mod cli;
use cli::display;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, so clap's `env` fallbacks see .env values
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::error_line(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "docsift=warn",
        1 => "docsift=debug",
        _ => "docsift=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::resolve(cli.backend_url.as_deref(), cli.page_size);
    tracing::debug!(backend = %config.base_url, page_size = config.page_size, "config resolved");

    match cli.command {
        Commands::Search {
            query,
            flags,
            page,
            json,
            interactive,
        } => {
            let client = SearchClient::new(&config)?;
            let mut session = SearchSession::new(flags.to_options()?, config.page_size)?;

            if submit(&client, &mut session, &query).await? {
                session.go_to(page);
                if json {
                    println!("{}", serde_json::to_string_pretty(&session.page())?);
                } else {
                    show_page(&session);
                }
            } else if !interactive {
                bail!("{}", session.error().unwrap_or(GENERIC_FAILURE));
            } else {
                display::error_line(session.error().unwrap_or(GENERIC_FAILURE));
            }

            if interactive {
                run_interactive(&client, &mut session).await?;
            }
            Ok(())
        }

        Commands::Open {
            target,
            query,
            html,
        } => {
            let client = SearchClient::new(&config)?;
            let view = match (DocumentView::from_href(&target), query) {
                (Some(linked), None) => linked,
                (Some(linked), Some(q)) => DocumentView::open(linked.filename(), Some(q)),
                (None, q) => DocumentView::open(target, q),
            };
            open_document(&client, view, html).await
        }

        Commands::Highlight { query, file, html } => {
            let text = match &file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };

            if html {
                println!("{}", highlight::highlight_html(&text, Some(&query)));
            } else {
                let title = file
                    .as_ref()
                    .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
                let spans = highlight::highlight_spans(&text, Some(&query));
                show_document(&title, Some(&query), &text, &spans);
            }
            Ok(())
        }

        Commands::Reindex => {
            let client = SearchClient::new(&config)?;
            tracing::info!(backend = %client.base_url(), "re-index requested");
            let message = client
                .reindex()
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            display::notice(&message);
            Ok(())
        }
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Run one search through the session. `false` means it settled as failed;
/// the message is in `session.error()`.
async fn submit(client: &SearchClient, session: &mut SearchSession, query: &str) -> Result<bool> {
    let request = session.begin_search(query)?;
    let outcome = client.search(&request).await.map(|response| response.results);
    session.settle(outcome)?;
    Ok(session.state() == &SearchState::Success)
}

fn show_page(session: &SearchSession) {
    display::results_page(session.query().unwrap_or_default(), &session.page(), |r| {
        session.document_href(r)
    });
}

const INTERACTIVE_HELP: &str =
    "n next · p prev · g N go to page · o N open result · s QUERY search · q quit";

async fn run_interactive(client: &SearchClient, session: &mut SearchSession) -> Result<()> {
    println!("{}", display::themed(display::GRAY, &[], INTERACTIVE_HELP));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", display::themed(display::CYAN, &[display::BOLD], "docsift>"));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, arg) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, a)| (c, a.trim()));

        match command {
            "" => {}
            "q" | "quit" => break,
            "n" | "next" => {
                session.next_page();
                show_page(session);
            }
            "p" | "prev" => {
                session.prev_page();
                show_page(session);
            }
            "g" | "goto" => match arg.parse::<usize>() {
                Ok(page) => {
                    session.go_to(page);
                    show_page(session);
                }
                Err(_) => display::error_line("usage: g <page>"),
            },
            "o" | "open" => {
                let href = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|rank| session.results().get(rank.checked_sub(1)?))
                    .map(|result| session.document_href(result));
                match href.as_deref().and_then(DocumentView::from_href) {
                    Some(view) => {
                        if let Err(e) = open_document(client, view, false).await {
                            display::error_line(&e.to_string());
                        }
                    }
                    None => display::error_line("usage: o <rank> (a rank shown in the list)"),
                }
            }
            "s" | "search" => match submit(client, session, arg).await {
                Ok(true) => show_page(session),
                Ok(false) => display::error_line(session.error().unwrap_or(GENERIC_FAILURE)),
                Err(e) => display::error_line(&e.to_string()),
            },
            "h" | "help" | "?" => println!("{}", INTERACTIVE_HELP),
            other => display::error_line(&format!("unknown command `{}` ({})", other, INTERACTIVE_HELP)),
        }
    }
    Ok(())
}

// ============================================================================
// DOCUMENTS
// ============================================================================

async fn open_document(client: &SearchClient, mut view: DocumentView, html: bool) -> Result<()> {
    let outcome = client.fetch_document(view.filename()).await;
    view.settle(outcome);

    if let DocumentState::Failed(message) = view.state() {
        bail!("{}", message);
    }
    if html {
        if let Some(rendered) = view.highlighted() {
            println!("{}", rendered);
        }
        return Ok(());
    }
    if let (Some(text), Some(spans)) = (view.text(), view.spans()) {
        show_document(view.filename(), view.query(), text, &spans);
    }
    Ok(())
}

fn show_document(title: &str, query: Option<&str>, text: &str, spans: &[HighlightSpan]) {
    let hits = spans.iter().filter(|s| s.matched).count();
    let terms = highlight::matched_terms(text, spans);

    display::section_top(&display::truncate(&display::printable(title), 60));
    display::row(&format!("  query:   {}", display::printable(query.unwrap_or("-"))));
    display::row(&format!(
        "  matches: {}{}",
        hits,
        if terms.is_empty() {
            String::new()
        } else {
            format!(
                "  ({})",
                display::truncate(&display::printable(&terms.join(", ")), 50)
            )
        }
    ));
    display::section_bot();
    println!("{}", display::marked(text, spans));
}
