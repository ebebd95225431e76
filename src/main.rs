use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use notesift::config::Config;
use notesift::model::buffer::TextBuffer;
use notesift::preview::render_markdown;
use notesift::primitives::position::LineIndex;
use notesift::search::SearchSession;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Find text in a markdown note
#[derive(Parser, Debug)]
#[command(name = "notesift")]
#[command(about = "Search a markdown note and highlight the matches", long_about = None)]
#[command(version)]
struct Args {
    /// Note to search
    #[arg(value_name = "FILE", required_unless_present = "dump_config")]
    file: Option<PathBuf>,

    /// Literal text to look for
    #[arg(value_name = "QUERY", required_unless_present = "dump_config")]
    query: Option<String>,

    /// Match case (overrides the configuration)
    #[arg(long)]
    case_sensitive: bool,

    /// Print the rendered note as HTML with the matches marked
    #[arg(long)]
    preview: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> AnyhowResult<ExitCode> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };

    if args.dump_config {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }

    let (Some(path), Some(query)) = (args.file.as_ref(), args.query.as_ref()) else {
        anyhow::bail!("FILE and QUERY are required");
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    tracing::info!(path = %path.display(), chars = text.chars().count(), "note loaded");

    let buffer = TextBuffer::new(text);
    let mut session = SearchSession::new(buffer.clone(), &config.search);
    if args.case_sensitive {
        session.set_case_sensitive(true);
    }
    session.set_query(query.as_str());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.preview {
        let mut root = render_markdown(buffer.as_str());
        let report = session.highlight_preview(&mut root);
        tracing::info!(marks = report.marks, skipped = report.skipped, "preview rendered");
        writeln!(out, "{}", root.to_html())?;
    } else {
        let index = LineIndex::new(buffer.as_str());
        for span in session.matches().spans() {
            let position = index.line_column(span.start);
            let line_text = &buffer.as_str()[index.line_bytes(position.line - 1)];
            writeln!(out, "{}:{}: {}", position.line, position.column, line_text)?;
        }
    }

    if let Some(status) = session.status_message() {
        eprintln!("{status}");
    }

    Ok(if session.matches().is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing(log_file: Option<&Path>) -> AnyhowResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}
