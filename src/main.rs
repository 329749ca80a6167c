use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn, LevelFilter};
use std::io;

mod channel;
mod cli;
mod providers;
mod utils;

use providers::ytdlp::YtDlpExtractor;
use utils::{config::Config, is_command_available};

#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about = "Lists the video titles of a YouTube channel", long_about = None)]
pub struct Args {
    /// URL of the channel's main page or its Videos tab (prompts when omitted)
    #[clap(value_parser)]
    pub url: Option<String>,

    /// Print the titles as a JSON array
    #[clap(short, long)]
    pub json: bool,

    /// Path or name of the yt-dlp executable
    #[clap(long, value_name = "PATH")]
    pub ytdlp: Option<String>,

    /// Edit config file using $EDITOR
    #[clap(short, long)]
    pub edit: bool,

    /// Enable debug mode (prints debug info to stdout)
    #[clap(long)]
    pub debug: bool,
}

fn edit_config() -> anyhow::Result<()> {
    if cfg!(target_os = "windows") {
        return Err(anyhow::anyhow!("The `edit` flag is not supported on Windows."));
    }

    let editor = std::env::var("EDITOR").context("EDITOR environment variable not set!")?;
    let config_path = Config::config_path()?;

    // Make sure there is something to edit.
    Config::load_from_file(&config_path)?;

    std::process::Command::new(editor)
        .arg(&config_path)
        .status()
        .context("Failed to open config file with editor")?;

    info!("Done editing config file.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();

    let log_level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    rich_logger::init(log_level)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {:?}", e))?;

    if args.edit {
        if let Err(e) = edit_config() {
            error!("{:#}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let config = Config::load_config().context("Failed to load config file")?;
    Config::program_configuration(&mut args, &config);

    if args.debug {
        log::set_max_level(LevelFilter::Debug);
    }
    debug!("Running with settings: {:?}", args);

    let executable = args.ytdlp.clone().unwrap_or_default();
    if !is_command_available(&executable) {
        warn!("{} is not available! fetching video titles will not work", executable);
    }

    let mut extractor = YtDlpExtractor::from_config(&executable, &config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    cli::run(&args, &mut extractor, &mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
