use clap::{Parser, Subcommand};
use social_crop::catalog;
use social_crop::session::Session;
use social_crop::types::PlatformEntry;
use social_crop::{config, output};
use std::path::PathBuf;
use std::process::ExitCode;

/// Shared flags for commands that take an uploaded image.
#[derive(clap::Args, Clone)]
struct UploadArgs {
    /// CDN URL returned by the upload widget
    upload_url: String,

    /// Print JSON instead of the text listing
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "social-crop")]
#[command(about = "Pre-sized social media image links from one upload")]
#[command(long_about = "\
Pre-sized social media image links from one upload

Give social-crop the CDN URL of an uploaded image and it prints one
smart-crop link per platform size in the catalog:

  https://ucarecdn.com/<asset id>/-/scale_crop/<width>x<height>/smart/

The CDN crops server-side; social-crop never fetches anything.

Run 'social-crop gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Platform catalog (JSON), overrides the config's `catalog`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every platform size in the catalog
    List,
    /// Print the smart-crop link for every size
    Links(UploadArgs),
    /// Print the download plan (filename and URL per size)
    Downloads(UploadArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::format_error(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let load_session = || -> Result<Session, Box<dyn std::error::Error>> {
        let app_config = config::load_config(&cli.config_dir)?;
        let entries = load_entries(cli, &app_config)?;
        Ok(Session::from_config(&app_config, &entries)?)
    };

    match &cli.command {
        Command::List => {
            let session = load_session()?;
            output::print_catalog_output(session.render_configs());
        }
        Command::Links(args) => {
            let mut session = load_session()?;
            session.record_upload(&args.upload_url)?;
            let images = session.processed_images();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&images)?);
            } else if let Some(asset) = session.current_asset() {
                output::print_links_output(asset, &images);
            }
        }
        Command::Downloads(args) => {
            let mut session = load_session()?;
            session.record_upload(&args.upload_url)?;
            let requests = session.download_requests();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&requests)?);
            } else {
                output::print_download_plan(&requests);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "social_crop=debug"
    } else {
        "social_crop=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the catalog: `--catalog`, then the config's `catalog`, then the bundled one.
fn load_entries(
    cli: &Cli,
    app_config: &config::AppConfig,
) -> Result<Vec<PlatformEntry>, catalog::CatalogError> {
    let path = cli
        .catalog
        .clone()
        .or_else(|| app_config.catalog_path(&cli.config_dir));
    match path {
        Some(p) => catalog::load_catalog(&p),
        None => catalog::bundled_catalog(),
    }
}
