//! songslide-builder - Weekly record builder CLI
//!
//! Drives one editing session from a draft file: preview the canonical
//! JSON, export it as `week_<n>_songs.json`, or push it to the slide-update
//! service. Song preload from the remote songs source is best-effort and
//! never fails a command.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use songslide_builder::draft::load_draft;
use songslide_builder::export::write_record;
use songslide_builder::remote::RemoteClient;
use songslide_common::config::{load_toml_config, resolve_setting, TomlConfig};
use songslide_common::WeeklyDraft;

#[derive(Debug, Parser)]
#[command(name = "songslide-builder", about = "Weekly service record builder")]
struct Cli {
    /// Path to TOML config file (default ~/.config/songslide/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that builds a draft
#[derive(Debug, clap::Args)]
struct DraftArgs {
    /// Path to the TOML draft file
    #[arg(long)]
    draft: PathBuf,

    /// Override the week number with raw input (non-numeric values store 1)
    #[arg(long)]
    week: Option<String>,

    /// Preload songs from the remote songs source before generating
    #[arg(long)]
    fetch_songs: bool,

    /// Songs source URL (overrides SONGSLIDE_SONGS_URL and config file)
    #[arg(long)]
    songs_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the canonical JSON document for a draft
    Preview {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Write week_<n>_songs.json for a draft
    Generate {
        #[command(flatten)]
        draft: DraftArgs,

        /// Directory to write the export into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Push the canonical record to the slide-update service
    Push {
        #[command(flatten)]
        draft: DraftArgs,

        /// Slide-update service base URL (overrides SONGSLIDE_SLIDES_URL
        /// and config file)
        #[arg(long)]
        slides_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let toml_config = load_toml_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview { draft } => {
            let draft = prepare_draft(&draft, &toml_config).await?;
            println!("{}", draft.generate().to_pretty_json()?);
        }
        Commands::Generate { draft, out_dir } => {
            let draft = prepare_draft(&draft, &toml_config).await?;
            let path = write_record(&draft.generate(), &out_dir)?;
            println!("Wrote {}", path.display());
        }
        Commands::Push { draft, slides_url } => {
            let draft = prepare_draft(&draft, &toml_config).await?;
            push_record(&draft, slides_url, &toml_config).await?;
        }
    }

    Ok(())
}

/// Load the draft file and apply the shared session options
async fn prepare_draft(args: &DraftArgs, toml_config: &TomlConfig) -> Result<WeeklyDraft> {
    let mut draft = load_draft(&args.draft)?;

    if let Some(raw) = &args.week {
        draft.set_week_number_from_input(raw);
    }

    if args.fetch_songs {
        preload_songs(&mut draft, args.songs_url.clone(), toml_config).await;
    }

    Ok(draft)
}

/// Best-effort song preload: any failure logs a warning and leaves the
/// draft's songs unmodified
async fn preload_songs(draft: &mut WeeklyDraft, cli_url: Option<String>, toml_config: &TomlConfig) {
    let Some(songs_url) = resolve_setting(
        "Songs source URL",
        cli_url,
        "SONGSLIDE_SONGS_URL",
        toml_config.songs_url.as_deref(),
    ) else {
        warn!("No songs source URL configured, skipping preload");
        return;
    };

    let client = match RemoteClient::new() {
        Ok(client) => client,
        Err(e) => {
            warn!("Song preload skipped: {}", e);
            return;
        }
    };

    match client.fetch_songs(&songs_url).await {
        Ok(rows) if rows.is_empty() => {
            warn!("Songs source returned no rows, keeping draft songs");
        }
        Ok(rows) => {
            info!(count = rows.len(), "Replacing draft songs from remote source");
            draft.load_songs(rows);
        }
        Err(e) => {
            warn!("Song preload failed: {} (keeping draft songs)", e);
        }
    }
}

/// Push the record and surface the outcome to the user
async fn push_record(
    draft: &WeeklyDraft,
    cli_url: Option<String>,
    toml_config: &TomlConfig,
) -> Result<()> {
    let Some(slides_url) = resolve_setting(
        "Slides service URL",
        cli_url,
        "SONGSLIDE_SLIDES_URL",
        toml_config.slides_url.as_deref(),
    ) else {
        bail!(
            "Slides service URL not configured. Please configure using one of:\n\
             1. Command line: songslide-builder push --slides-url <url>\n\
             2. Environment: SONGSLIDE_SLIDES_URL=<url>\n\
             3. TOML config: ~/.config/songslide/config.toml (slides_url = \"<url>\")"
        );
    };

    let client = RemoteClient::new()?;
    let record = draft.generate();

    match client.update_slides(&slides_url, &record).await {
        Ok(response) => {
            println!("Google Slides updated: {}", response.message);
            Ok(())
        }
        Err(e) => bail!("Error updating Google Slides: {}", e),
    }
}
