mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jotimap-cli")]
#[command(about = "Jotihunt map command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// `--archive` / `--ts`, mirroring the HTTP query parameters.
#[derive(Debug, Args, PartialEq, Eq)]
struct SourceArgs {
    /// Read a Wayback Machine snapshot instead of the live feed.
    #[arg(long)]
    archive: bool,

    /// Snapshot timestamp (`YYYYMMDDhhmmss`); implies `--archive`.
    #[arg(long)]
    ts: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert an RD (EPSG:28992) coordinate to WGS84.
    Convert {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Parse free-form coordinate input such as "52,1 5,3" or "1234 5678".
    Parse {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        input: Vec<String>,
    },
    /// Convex hull of a JSON array of `{lat, lng}` points; `-` reads stdin.
    Hull { file: PathBuf },
    /// Fetch and parse the subscribed groups.
    Groups {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Render groups and territories as GeoJSON.
    Overlay {
        #[command(flatten)]
        source: SourceArgs,

        /// Tags YAML file; defaults to `JOTIMAP_TAGS_PATH`.
        #[arg(long)]
        tags: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Convert { x, y } => commands::run_convert(x, y),
        Commands::Parse { input } => commands::run_parse(&input.join(" "))?,
        Commands::Hull { file } => commands::run_hull(&file)?,
        Commands::Groups { source } => {
            let config = jotimap_core::load_app_config()?;
            commands::run_groups(&config, &source).await?
        }
        Commands::Overlay { source, tags } => {
            let config = jotimap_core::load_app_config()?;
            commands::run_overlay(&config, &source, tags.as_deref()).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
