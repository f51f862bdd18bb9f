use clap::{Parser, Subcommand};
use gitsnap::card::Stat;
use gitsnap::config::{self, AppConfig};
use gitsnap::export::{ChromeRasterizer, ExportFormat};
use gitsnap::geometry::{Preset, Viewport, compute_geometry};
use gitsnap::github::GitHubClient;
use gitsnap::session::{Session, SessionError};
use gitsnap::theme::{find_theme, theme_ids};
use gitsnap::{output, render};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const LOG_ENV_VAR: &str = "GITSNAP_LOG";
const DEFAULT_PREVIEW_FILE: &str = "gitsnap-preview.html";

/// Styling flags shared by commands that build a card.
#[derive(clap::Args, Clone, Default)]
struct StyleArgs {
    /// Aspect preset (overrides card.preset)
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Background theme id (see `gitsnap themes`)
    #[arg(long)]
    theme: Option<String>,

    /// Hide the file explorer sidebar
    #[arg(long)]
    hide_explorer: bool,

    /// Hide the rendered README
    #[arg(long)]
    hide_readme: bool,

    /// Show this star count instead of the fetched one
    #[arg(long)]
    stars: Option<u64>,

    /// Show this fork count instead of the fetched one
    #[arg(long)]
    forks: Option<u64>,

    /// Show this watcher count instead of the fetched one
    #[arg(long)]
    watchers: Option<u64>,
}

#[derive(Parser)]
#[command(name = "gitsnap")]
#[command(version)]
#[command(about = "Render a GitHub repository as a social card image")]
#[command(long_about = "\
Render a GitHub repository as a social card image

The card shows a browser-style frame with the repository's top-level files,
its name, language, star/fork/watcher counts, and the rendered README, on a
themed gradient background.

  gitsnap card https://github.com/octocat/Hello-World
  gitsnap card github.com/rust-lang/rust --preset og --theme paper --format jpeg
  gitsnap preview github.com/octocat/Hello-World --viewport 390x844

Export needs a local Chrome or Chromium. Set GITHUB_TOKEN (or github.token in
gitsnap.toml) to raise the API rate limit.

Run 'gitsnap gen-config' to generate a documented gitsnap.toml.")]
struct Cli {
    /// Config file (default: ./gitsnap.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a repository and export its card as an image
    Card {
        /// Repository URL, e.g. https://github.com/octocat/Hello-World
        url: String,
        #[command(flatten)]
        style: StyleArgs,
        /// Image format (overrides export.format)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// Output directory (overrides export.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write an HTML page showing the card scaled for a viewport
    Preview {
        /// Repository URL
        url: String,
        #[command(flatten)]
        style: StyleArgs,
        /// Screen size as WIDTHxHEIGHT (overrides [viewport])
        #[arg(long)]
        viewport: Option<Viewport>,
        /// Output HTML file
        #[arg(short, long, default_value = DEFAULT_PREVIEW_FILE)]
        output: PathBuf,
    },
    /// Print the on-screen geometry of a preset as JSON
    Layout {
        #[arg(long, value_enum)]
        preset: Option<Preset>,
        /// Screen size as WIDTHxHEIGHT (overrides [viewport])
        #[arg(long)]
        viewport: Option<Viewport>,
    },
    /// List the built-in themes
    Themes,
    /// Print a stock gitsnap.toml with all options documented
    GenConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Card {
            url,
            style,
            format,
            output: out_dir,
        } => {
            let config = load_app_config(cli.config.as_deref())?;
            let session = generate(&config, &url, &style).await?;
            let card = session.card().ok_or(SessionError::NoCard)?;
            output::print_card(&card);

            let format = format.unwrap_or(config.export.format);
            let dir = out_dir.unwrap_or_else(|| config.export.output_dir.clone());
            let rasterizer = ChromeRasterizer::new(config.export.chrome_sandbox);
            let path = session.export(&rasterizer, format, &config.export.settings(), &dir)?;
            output::print_export(path.as_deref());
        }
        Command::Preview {
            url,
            style,
            viewport,
            output: out_file,
        } => {
            let config = load_app_config(cli.config.as_deref())?;
            let viewport = viewport.unwrap_or(config.viewport);
            let session = generate(&config, &url, &style).await?;
            let card = session.card().ok_or(SessionError::NoCard)?;
            output::print_card(&card);

            let geometry = compute_geometry(card.preset, viewport.width, viewport.height);
            let page = render::preview_page(&card, &geometry);
            std::fs::write(&out_file, page.into_string())?;
            output::print_preview(&out_file, viewport, &geometry);
        }
        Command::Layout { preset, viewport } => {
            let config = load_app_config(cli.config.as_deref())?;
            let preset = preset.unwrap_or(config.card.preset);
            let viewport = viewport.unwrap_or(config.viewport);
            let geometry = compute_geometry(preset, viewport.width, viewport.height);
            println!("{}", serde_json::to_string_pretty(&geometry)?);
        }
        Command::Themes => output::print_themes(),
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// `--config` must exist; the implicit `./gitsnap.toml` may not.
fn load_app_config(path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    let mut config = match path {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(Path::new("."))?,
    };
    config.apply_env_token(std::env::var(config::TOKEN_ENV_VAR).ok());
    Ok(config)
}

/// Build a session from config plus flags, fetch `url`, then apply stat
/// overrides so they win over the fetched values.
async fn generate(
    config: &AppConfig,
    url: &str,
    style: &StyleArgs,
) -> Result<Session<GitHubClient>, Box<dyn Error>> {
    let mut display = config.card.display_state()?;
    if let Some(preset) = style.preset {
        display.preset = preset;
    }
    if let Some(id) = &style.theme {
        display.theme = find_theme(id).ok_or_else(|| {
            format!(
                "unknown theme '{id}' (expected one of: {})",
                theme_ids().join(", ")
            )
        })?;
    }
    display.show_explorer &= !style.hide_explorer;
    display.show_readme &= !style.hide_readme;

    let client = GitHubClient::new(&config.github)?;
    let mut session = Session::new(client, config.icons.theme(), display);
    session.generate(url).await?;

    for (stat, value) in [
        (Stat::Stars, style.stars),
        (Stat::Forks, style.forks),
        (Stat::Watchers, style.watchers),
    ] {
        if let Some(value) = value {
            session.set_stat(stat, value);
        }
    }
    Ok(session)
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
