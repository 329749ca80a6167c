use crate::{
    channel::{fetcher::get_channel_video_titles, ChannelUrl},
    providers::ListingExtractor,
    Args,
};
use anyhow::Context;
use log::{debug, info};
use std::io::{BufRead, Write};

const EXAMPLE_URLS: [&str; 3] = [
    "https://www.youtube.com/@MrBeast",
    "https://www.youtube.com/c/mkbhd",
    "https://www.youtube.com/channel/UCBJycsmduvYEL83R_U4JriQ",
];

pub fn get_input<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<String> {
    writeln!(output, "--- YouTube Video Title Downloader ---")?;
    writeln!(
        output,
        "Please provide the URL of the YouTube channel's main page or its 'Videos' tab."
    )?;
    writeln!(output, "Examples:")?;
    for example in EXAMPLE_URLS {
        writeln!(output, "  - {}", example)?;
    }
    writeln!(output)?;

    write!(output, "Enter your YouTube URL:  ")?;
    output.flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read input from stdin")?;

    let result = line.trim().to_string();
    debug!("User entered input: {}", result);
    Ok(result)
}

pub fn render_titles<W: Write>(
    output: &mut W,
    titles: Option<&[String]>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let titles = titles.unwrap_or_default();
        writeln!(output, "{}", serde_json::to_string_pretty(titles)?)?;
        return Ok(());
    }

    match titles {
        Some(titles) if !titles.is_empty() => {
            writeln!(output, "\n--- All Video Titles ---")?;
            for (i, title) in titles.iter().enumerate() {
                writeln!(output, "{}. {}", i + 1, title)?;
            }
            writeln!(output, "\nSuccessfully downloaded {} titles.", titles.len())?;
        }
        _ => writeln!(output, "\nCould not retrieve any video titles.")?,
    }

    Ok(())
}

pub fn run<E, R, W>(
    settings: &Args,
    extractor: &mut E,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()>
where
    E: ListingExtractor,
    R: BufRead,
    W: Write,
{
    let raw_url = match &settings.url {
        Some(url) => url.clone(),
        None => get_input(input, output)?,
    };

    let url = match raw_url.parse::<ChannelUrl>() {
        Ok(url) => url,
        Err(e) => {
            debug!("Rejected input {:?}: {}", raw_url, e);
            info!("No URL entered. Exiting.");
            return Ok(());
        }
    };

    let titles = get_channel_video_titles(extractor, &url);
    render_titles(output, titles.as_deref(), settings.json)
}
