use crate::{
    channel::ChannelUrl,
    providers::{ExtractError, ListingExtractor},
    utils::{
        config::Config,
        ytdlp::{YtDlp, YtDlpArgs, YtDlpSpawn},
    },
};
use lazy_static::lazy_static;
use log::{debug, error};
use regex::Regex;
use std::process::Output;

lazy_static! {
    static ref ERROR_LINE: Regex = Regex::new(r"(?m)^ERROR:[ \t]*(.+?)[ \t\r]*$").unwrap();
}

pub struct YtDlpExtractor {
    ytdlp: YtDlp,
    quiet: bool,
    force_generic_extractor: bool,
    ignore_errors: bool,
}

impl YtDlpExtractor {
    pub fn new(ytdlp: YtDlp) -> Self {
        Self {
            ytdlp,
            quiet: true,
            force_generic_extractor: true,
            ignore_errors: true,
        }
    }

    pub fn from_config(executable: &str, config: &Config) -> Self {
        debug!("Creating yt-dlp extractor for executable: {}", executable);
        Self {
            quiet: config.quiet,
            force_generic_extractor: config.force_generic_extractor,
            ignore_errors: config.ignore_errors,
            ..Self::new(YtDlp::with_executable(executable))
        }
    }

    fn listing_args(&self, url: &ChannelUrl) -> YtDlpArgs {
        YtDlpArgs {
            url: url.as_str().to_string(),
            quiet: self.quiet,
            no_warnings: self.quiet,
            flat_playlist: true,
            force_generic_extractor: self.force_generic_extractor,
            ignore_errors: self.ignore_errors,
            dump_single_json: true,
        }
    }
}

fn error_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);

    let errors: Vec<&str> = ERROR_LINE
        .captures_iter(&stderr)
        .filter_map(|capture| capture.get(1).map(|m| m.as_str()))
        .collect();

    if !errors.is_empty() {
        return errors.join("\n");
    }

    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("yt-dlp exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}

fn parse_output(output: Output) -> Result<serde_json::Value, ExtractError> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();

    if stdout.is_empty() {
        if output.status.success() {
            return Err(ExtractError::Other(String::from("yt-dlp produced no output")));
        }

        let message = error_message(&output);
        error!("yt-dlp failed: {}", message);
        return Err(ExtractError::Download(message));
    }

    if !output.status.success() {
        debug!(
            "yt-dlp exited with {} but produced a listing: {}",
            output.status,
            error_message(&output)
        );
    }

    Ok(serde_json::from_str(stdout)?)
}

impl ListingExtractor for YtDlpExtractor {
    fn extract_flat_listing(&mut self, url: &ChannelUrl) -> Result<serde_json::Value, ExtractError> {
        let args = self.listing_args(url);
        debug!("Requesting flat listing with arguments: {:?}", args);

        let session = self.ytdlp.spawn(&args)?;
        let output = session.finish()?;

        parse_output(output)
    }
}
