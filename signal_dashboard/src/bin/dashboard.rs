use std::{io::Write, path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ohlc_feed::{io::load_bars, models::bar::Bar, validate::validate_bars};
use signal_dashboard::{
    analysis::gemini::GeminiModel,
    chart::{JsonLinesSink, build_frame, replay},
    chat::ChatSession,
    context::DataContext,
};

#[derive(Parser)]
#[command(version, about = "Signal Dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Emit the chart payload for the loaded dataset.
    Chart {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value = "TSLA")]
        symbol: String,
        /// Write to this path instead of stdout.
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
        /// Replay the series incrementally, one JSON frame per line.
        #[arg(long)]
        animate: bool,
        /// Pause between animation frames.
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
    },
    /// Ask the analysis model one question about the dataset.
    Ask {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value = "TSLA")]
        symbol: String,
        question: String,
        /// Print the rendered prompt instead of calling the model.
        #[arg(long)]
        dry_run: bool,
    },
    /// Load the dataset and print the validation report only.
    Validate {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
}

/// Loads the bars and emits the once-per-load validation report.
fn load_and_report(file: &PathBuf) -> Result<Vec<Bar>> {
    let bars = load_bars(file)?;
    let report = validate_bars(&bars);
    if report.is_clean() {
        info!("{report}");
    } else {
        warn!("{report}");
    }
    Ok(bars)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Chart {
            file,
            symbol,
            out,
            animate,
            delay_ms,
        } => {
            let bars = load_and_report(&file)?;
            info!(symbol = %symbol, bars = bars.len(), "building chart series");

            let writer: Box<dyn Write + Send> = match out {
                Some(path) => Box::new(std::fs::File::create(path)?),
                None => Box::new(std::io::stdout()),
            };

            if animate {
                let mut sink = JsonLinesSink::new(writer);
                replay(&bars, &mut sink, Duration::from_millis(delay_ms)).await?;
            } else {
                let frame = build_frame(&bars);
                let mut writer = writer;
                serde_json::to_writer_pretty(&mut writer, &frame.chart_config())?;
                writeln!(writer)?;
            }
        }
        Cmd::Ask {
            file,
            symbol,
            question,
            dry_run,
        } => {
            let bars = load_and_report(&file)?;

            if dry_run {
                println!("{}", DataContext::from_bars(&symbol, &bars).prompt(&question));
                return Ok(());
            }

            let model = GeminiModel::from_env()?;
            if model.is_none() {
                warn!("GOOGLE_API_KEY is not set; the model call will be skipped");
            }
            let mut session = ChatSession::new(
                model.map(|m| Box::new(m) as Box<dyn signal_dashboard::analysis::AnalysisModel + Send + Sync>),
            );

            session.ask(&symbol, &bars, &question).await;
            for message in session.messages() {
                let who = match message.role {
                    signal_dashboard::chat::Role::User => "you",
                    signal_dashboard::chat::Role::Assistant => "assistant",
                };
                println!("[{who}] {}", message.content);
            }
        }
        Cmd::Validate { file } => {
            let bars = load_bars(&file)?;
            println!("{}", validate_bars(&bars));
        }
    }

    Ok(())
}
