//! CLI binary for truthlens.

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;
use truthlens::report::{json_report, render_snapshot};
use truthlens::{AnalysisController, Mode, Phase, Transition, TruthLensConfig, UiSnapshot};
use truthlens_client::{HttpBackend, VideoUpload};

/// TruthLens: check text for misinformation and videos for deepfakes.
#[derive(Parser)]
#[command(name = "truthlens", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base address, overriding config and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print the raw result and derived verdicts as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Fact-check text and score it for AI authorship.
    ///
    /// Reads TEXT, or --file, or standard input.
    Text {
        text: Option<String>,
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Check a video file for deepfake manipulation.
    Video { path: PathBuf },

    /// Interactive session driving the analysis controller.
    Shell,

    /// Inspect or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location.
    Path,
    /// Print the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so reports on stdout stay clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("truthlens=info,truthlens_client=info")),
        )
        .init();

    let cli = Cli::parse();

    // `config init` must work even when the target file is missing or broken.
    if let Command::Config {
        action: ConfigAction::Init { force },
    } = cli.command
    {
        return init_config(cli.config.as_deref(), force);
    }

    let mut config = TruthLensConfig::load(cli.config.as_deref())?.with_env_overrides();
    if let Some(url) = cli.api_url {
        config.backend.api_url = url;
    }

    match cli.command {
        Command::Text { text, file } => {
            let text = read_text(text, file.as_deref()).await?;
            let mut controller = build_controller(&config)?;
            let _ = controller.set_text(text);
            run_once(controller, cli.json).await
        }
        Command::Video { path } => {
            let upload = VideoUpload::from_path(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut controller = build_controller(&config)?;
            let _ = controller.change_mode(Mode::Video);
            if let Transition::Ignored(reason) = controller.set_file(upload) {
                eprintln!("{}: {reason}", path.display());
                return Ok(ExitCode::from(2));
            }
            run_once(controller, cli.json).await
        }
        Command::Shell => run_shell(&config).await,
        Command::Config { action } => run_config(action, cli.config.as_deref(), &config),
    }
}

fn build_controller(config: &TruthLensConfig) -> anyhow::Result<AnalysisController<HttpBackend>> {
    let backend = HttpBackend::new(config.client_config())?;
    info!(backend = %config.backend.api_url, "using analysis backend");
    Ok(AnalysisController::new(backend).with_upload_limit(config.upload.limit()))
}

async fn read_text(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("failed to read standard input")?;
    Ok(buf)
}

async fn submit_with_spinner(controller: &mut AnalysisController<HttpBackend>) -> Transition {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(match controller.mode() {
        Mode::Text => "Scanning for misinformation patterns...",
        Mode::Video => "Processing video frames for deepfake indicators...",
    });
    spinner.enable_steady_tick(Duration::from_millis(100));
    let outcome = controller.submit().await;
    spinner.finish_and_clear();
    outcome
}

fn print_snapshot(snapshot: &UiSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&json_report(snapshot))?);
    } else {
        print!("{}", render_snapshot(snapshot));
    }
    Ok(())
}

async fn run_once(
    mut controller: AnalysisController<HttpBackend>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    if let Transition::Ignored(reason) = submit_with_spinner(&mut controller).await {
        eprintln!("nothing submitted: {reason}");
        return Ok(ExitCode::from(2));
    }
    let snapshot = controller.snapshot();
    print_snapshot(&snapshot, json)?;
    Ok(if snapshot.phase == Phase::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

const SHELL_HELP: &str = "\
Commands:
  mode text|video   switch input mode
  text <content>    set the text to analyze
  file <path>       select a video file
  clear             drop the selected video
  submit            analyze the current input
  dismiss           dismiss an error
  show              show the current state
  help              show this help
  quit              leave the session";

async fn run_shell(config: &TruthLensConfig) -> anyhow::Result<ExitCode> {
    let mut controller = build_controller(config)?;
    println!("TruthLens v{}", env!("CARGO_PKG_VERSION"));
    println!("Backend: {}\n", config.backend.api_url);
    println!("{SHELL_HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(controller.mode());
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(cmd, rest)| (cmd, rest.trim()));

        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{SHELL_HELP}"),
            "mode" => match Mode::parse(rest) {
                Some(mode) => announce(controller.change_mode(mode)),
                None => println!("usage: mode text|video"),
            },
            "text" => {
                announce(controller.set_text(rest));
                println!("{} characters", controller.snapshot().input_chars);
            }
            "file" => match VideoUpload::from_path(rest).await {
                Ok(upload) => announce(controller.set_file(upload)),
                Err(e) => println!("could not read {rest}: {e}"),
            },
            "clear" => announce(controller.clear_file()),
            "submit" => {
                announce(submit_with_spinner(&mut controller).await);
                print!("{}", render_snapshot(&controller.snapshot()));
            }
            "dismiss" => announce(controller.dismiss_error()),
            "show" => print!("{}", render_snapshot(&controller.snapshot())),
            other => println!("unknown command {other:?}, type help"),
        }
        prompt(controller.mode());
    }
    Ok(ExitCode::SUCCESS)
}

fn prompt(mode: Mode) {
    print!("{mode}> ");
    let _ = std::io::stdout().flush();
}

fn announce(transition: Transition) {
    if let Transition::Ignored(reason) = transition {
        println!("ignored: {reason}");
    }
}

fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(TruthLensConfig::default_config_path)
}

fn run_config(
    action: ConfigAction,
    explicit: Option<&Path>,
    config: &TruthLensConfig,
) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Path => println!("{}", config_path(explicit).display()),
        ConfigAction::Show => print!("{}", toml::to_string_pretty(config)?),
        ConfigAction::Init { force } => return init_config(explicit, force),
    }
    Ok(ExitCode::SUCCESS)
}

fn init_config(explicit: Option<&Path>, force: bool) -> anyhow::Result<ExitCode> {
    let path = config_path(explicit);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    TruthLensConfig::default().save_to_file(&path)?;
    println!("wrote {}", path.display());
    Ok(ExitCode::SUCCESS)
}
