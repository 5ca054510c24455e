use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use phantom_keys::{
    EngineEvent, EngineHandle, KeySink, RunConfig, Status, TerminalSink,
    TypingEngine, parse_duration,
};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Inject keystrokes into the focused window
    Keyboard,
    /// Print keystrokes to stdout
    Stdout,
}

#[derive(Parser, Debug)]
#[command(
    name = "phantom-keys",
    about = "Type text into the focused window the way a person would",
    version
)]
struct Args {
    /// Text to type (read from stdin when neither --text nor --file is given)
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// File containing the text to type
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON profile with pacing settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Typing speed in words per minute
    #[arg(long)]
    wpm: Option<f64>,

    /// Chance of mistyping each character, 0.0 to 1.0
    #[arg(long)]
    typo_rate: Option<f64>,

    /// How much keystroke timing varies, 0.0 to 1.0
    #[arg(long)]
    variability: Option<f64>,

    /// Never type words in fast bursts
    #[arg(long)]
    no_burst: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Countdown before typing starts, e.g. `5s` or `500ms`
    #[arg(long, default_value = "5s", value_parser = parse_duration)]
    start_delay: Duration,

    /// Where keystrokes are delivered
    #[arg(short, long, value_enum, default_value_t = default_output())]
    output: Output,

    /// Print the final summary as a JSON object
    #[arg(long)]
    json: bool,

    /// Log control and pacing details
    #[arg(short, long)]
    verbose: bool,
}

fn default_output() -> Output {
    if cfg!(feature = "keyboard") {
        Output::Keyboard
    } else {
        Output::Stdout
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let (config, text_from_stdin) = build_config(&args)?;
    config.validate().context("Invalid run configuration")?;

    let sink = open_output(args.output).context("Failed to open output")?;
    let completed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&completed);
    let mut engine = TypingEngine::with_handler(sink, move |event: &EngineEvent| {
        report_event(event);
        if event.as_status() == Some(Status::Complete) {
            flag.store(true, Ordering::SeqCst);
        }
    });
    let handle = engine.handle();

    if !countdown(args.start_delay).await {
        eprintln!("Typing was cancelled");
        return Ok(());
    }

    let interrupt = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.stop();
        }
    });

    if !text_from_stdin && std::io::stdin().is_terminal() {
        eprintln!("Press Enter to pause or resume, q then Enter to stop.");
        spawn_controls(handle.clone());
    }

    let stats = engine
        .type_text(&config)
        .await
        .context("Typing run failed")?;

    let completed = completed.load(Ordering::SeqCst);
    if args.json {
        let summary = serde_json::json!({ "completed": completed, "stats": stats });
        eprintln!("{summary}");
    } else if completed {
        eprintln!("{stats}");
    } else {
        eprintln!("Typing was cancelled ({stats})");
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge the profile, the command-line overrides, and the text source.
///
/// Returns the config and whether its text was read from stdin.
fn build_config(args: &Args) -> Result<(RunConfig, bool)> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    let mut from_stdin = false;
    if let Some(text) = &args.text {
        config.text = text.clone();
    } else if let Some(path) = &args.file {
        config.text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?;
    } else if config.text.is_empty() {
        std::io::stdin()
            .read_to_string(&mut config.text)
            .context("Failed to read text from stdin")?;
        from_stdin = true;
    }
    config.text = config.text.trim().to_string();

    if let Some(wpm) = args.wpm {
        config.wpm = wpm;
    }
    if let Some(rate) = args.typo_rate {
        config.typo_probability = rate;
    }
    if let Some(variability) = args.variability {
        config.variability = variability;
    }
    if args.no_burst {
        config.burst_mode = false;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    Ok((config, from_stdin))
}

fn open_output(output: Output) -> Result<Box<dyn KeySink>> {
    match output {
        Output::Stdout => Ok(Box::new(TerminalSink::stdout())),
        #[cfg(feature = "keyboard")]
        Output::Keyboard => Ok(Box::new(phantom_keys::KeyboardSink::new()?)),
        #[cfg(not(feature = "keyboard"))]
        Output::Keyboard => Err(phantom_keys::EngineError::unsupported_output(
            "keyboard injection requires the `keyboard` feature",
        )
        .into()),
    }
}

fn report_event(event: &EngineEvent) {
    match event {
        EngineEvent::Status(status) => info!("{}", status),
        EngineEvent::Progress(progress) => debug!("{:.0}%", progress),
    }
}

/// Count down on stderr. Returns false if interrupted with Ctrl-C.
async fn countdown(delay: Duration) -> bool {
    let mut remaining = delay;
    while !remaining.is_zero() {
        eprintln!("Starting in {}...", remaining.as_secs_f64().ceil() as u64);
        let step = remaining.min(Duration::from_secs(1));
        tokio::select! {
            _ = tokio::time::sleep(step) => {}
            _ = tokio::signal::ctrl_c() => return false,
        }
        remaining -= step;
    }
    true
}

/// Toggle pause on every Enter; `q` stops the run.
///
/// Runs on a plain thread so a pending stdin read never holds up exit.
fn spawn_controls(handle: EngineHandle) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            match line.trim() {
                "q" | "quit" | "stop" => {
                    handle.stop();
                    break;
                }
                _ if handle.is_paused() => {
                    handle.resume();
                    info!("Resumed");
                }
                _ => {
                    handle.pause();
                    info!("Paused");
                }
            }
        }
    });
}
