use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dlogs::tail::{self, Outcome};
use dlogs_core::{Config, JsonSink, LineFormatter, LineParser, Pipeline, Sink};
use dlogs_feeds::LineFeed;
use dlogs_term::{color_enabled, TerminalSink};

#[derive(Parser)]
#[command(name = "dlogs", about = "dlogs — colourised, field-aware tail for docker-compose logs")]
struct Cli {
    /// Read lines from stdin instead of spawning the log command.
    #[arg(long, conflicts_with = "file")]
    stdin: bool,

    /// Read lines from a file instead of spawning the log command.
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Emit one JSON object per line instead of styled text.
    #[arg(long)]
    json: bool,

    /// Disable ANSI colours (also honoured: NO_COLOR).
    #[arg(long)]
    no_color: bool,

    /// Do not infer severity from keywords when a line has no level= tag.
    #[arg(long)]
    no_keyword_fallback: bool,

    /// Keep t=/ts=/time= tokens in the displayed message.
    #[arg(long)]
    keep_timestamp: bool,

    /// Config file to use instead of ~/.config/dlogs/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/dlogs-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Command to tail instead of the configured one (after `--`).
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/dlogs-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("dlogs debug log started — tail -f /tmp/dlogs-debug.log");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load()?,
    };
    if cli.no_keyword_fallback {
        config.parser.keyword_fallback = false;
    }
    if cli.keep_timestamp {
        config.parser.strip_timestamp_from_message = false;
    }
    if !cli.command.is_empty() {
        config.source.command = cli.command.clone();
    }

    let styles = config.style_table().context("building style table")?;
    let parser = LineParser::new(&config.parser).context("building line parser")?;
    let mut pipeline = Pipeline::new(LineFormatter::new(parser, styles));

    let mut sink: Box<dyn Sink> = if cli.json {
        Box::new(JsonSink::new(io::stdout()))
    } else {
        Box::new(TerminalSink::stdout(color_enabled(cli.no_color)))
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run(&cli, &config, &mut pipeline, sink.as_mut()));
    // A file feed on a FIFO can leave a blocking-pool read parked; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn run(
    cli: &Cli,
    config: &Config,
    pipeline: &mut Pipeline,
    sink: &mut dyn Sink,
) -> anyhow::Result<()> {
    let mut feed = if cli.stdin {
        LineFeed::stdin()?
    } else if let Some(path) = &cli.file {
        LineFeed::open(path).await?
    } else {
        LineFeed::spawn(&config.source.command)?
    };

    match tail::tail(&mut feed, pipeline, sink, interrupted()).await {
        Ok(Outcome::Exhausted(stats)) | Ok(Outcome::Interrupted(stats)) => {
            tracing::info!(?stats, "tail finished");
            Ok(())
        }
        // Downstream closed (e.g. piped into `head`).
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            feed.shutdown().await;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
