use crate::{
    channel::{ChannelUrl, VideoEntry},
    providers::{ExtractError, ListingExtractor},
};
use log::{debug, error, info};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Could not find a list of videos for this URL. Is it a valid channel URL?")]
    NotFound,
    #[error("Could not process the URL. Please check if it's correct.")]
    Extraction(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<ExtractError> for FetchError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Download(message) => FetchError::Extraction(message),
            other => FetchError::Unexpected(other.to_string()),
        }
    }
}

fn found_message(entry_count: usize) -> String {
    format!("Found {} videos. Extracting titles...", entry_count)
}

/// Lines shown to the user for a failed fetch.
fn failure_lines(err: &FetchError) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    if let FetchError::Extraction(message) = err {
        lines.push(format!("yt-dlp error message: {}", message));
    }
    lines
}

fn listing_entries(listing: &Value) -> Option<&Vec<Value>> {
    listing.as_object()?.get("entries")?.as_array()
}

/// Collects the titles of a flat channel listing in the order the extractor
/// returned them. Null entries and entries without a title are skipped.
pub fn fetch_titles<E: ListingExtractor>(
    extractor: &mut E,
    url: &ChannelUrl,
) -> Result<Vec<String>, FetchError> {
    let listing = extractor.extract_flat_listing(url)?;

    let entries = listing_entries(&listing).ok_or(FetchError::NotFound)?;
    info!("{}", found_message(entries.len()));

    let titles = entries
        .iter()
        .filter_map(VideoEntry::from_value)
        .filter_map(|entry| {
            if entry.title.is_none() {
                debug!(
                    "Skipping entry without a title: {}",
                    entry
                        .id
                        .as_deref()
                        .or(entry.url.as_deref())
                        .unwrap_or("<unknown>")
                );
            }
            entry.title
        })
        .collect::<Vec<String>>();

    debug!("Kept {} of {} entries.", titles.len(), entries.len());
    Ok(titles)
}

/// Fetches the titles and reports failures to the user. Every failure
/// collapses to `None`; an empty `Some` means the listing had no titles.
pub fn get_channel_video_titles<E: ListingExtractor>(
    extractor: &mut E,
    url: &ChannelUrl,
) -> Option<Vec<String>> {
    info!("Attempting to fetch videos from: {}", url);

    match fetch_titles(extractor, url) {
        Ok(titles) => Some(titles),
        Err(e) => {
            for line in failure_lines(&e) {
                error!("{}", line);
            }
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::{failure_lines, fetch_titles, found_message, get_channel_video_titles, FetchError};
    use crate::{
        channel::ChannelUrl,
        providers::{ExtractError, ListingExtractor},
        utils::SpawnError,
    };
    use serde_json::{json, Value};

    struct FixedListing {
        response: Value,
        calls: usize,
    }

    impl FixedListing {
        fn new(response: Value) -> Self {
            Self { response, calls: 0 }
        }
    }

    impl ListingExtractor for FixedListing {
        fn extract_flat_listing(&mut self, _url: &ChannelUrl) -> Result<Value, ExtractError> {
            self.calls += 1;
            Ok(self.response.clone())
        }
    }

    struct FailingListing(fn() -> ExtractError);

    impl ListingExtractor for FailingListing {
        fn extract_flat_listing(&mut self, _url: &ChannelUrl) -> Result<Value, ExtractError> {
            Err((self.0)())
        }
    }

    fn url() -> ChannelUrl {
        "https://www.youtube.com/@MrBeast".parse().unwrap()
    }

    #[test]
    fn test_titles_keep_listing_order() {
        let mut extractor = FixedListing::new(json!({
            "entries": [{"title": "C"}, {"title": "A"}, {"title": "B"}, {"title": "A"}]
        }));

        assert_eq!(
            fetch_titles(&mut extractor, &url()).unwrap(),
            vec!["C", "A", "B", "A"]
        );
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let mut extractor = FixedListing::new(json!({
            "entries": [{"title": "A"}, null, {"title": "B"}, {"novideo": 1}]
        }));

        assert_eq!(
            get_channel_video_titles(&mut extractor, &url()),
            Some(vec![String::from("A"), String::from("B")])
        );
    }

    #[test]
    fn test_non_string_titles_are_skipped() {
        let mut extractor = FixedListing::new(json!({
            "entries": [{"title": null}, {"title": 12}, "loose", {"title": "kept"}]
        }));

        assert_eq!(fetch_titles(&mut extractor, &url()).unwrap(), vec!["kept"]);
    }

    #[test]
    fn test_missing_entries_is_not_found() {
        let mut extractor = FixedListing::new(json!({}));

        assert_eq!(
            fetch_titles(&mut extractor, &url()),
            Err(FetchError::NotFound)
        );
        assert_eq!(get_channel_video_titles(&mut extractor, &url()), None);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            failure_lines(&FetchError::NotFound),
            vec!["Could not find a list of videos for this URL. Is it a valid channel URL?"]
        );
    }

    #[test]
    fn test_extraction_failure_shows_raw_message() {
        let err = FetchError::Extraction(String::from("[generic] Unable to download webpage"));

        assert_eq!(
            failure_lines(&err),
            vec![
                "Could not process the URL. Please check if it's correct.",
                "yt-dlp error message: [generic] Unable to download webpage",
            ]
        );
    }

    #[test]
    fn test_unexpected_failure_shows_raw_message() {
        let err = FetchError::Unexpected(String::from("No such file or directory"));

        assert_eq!(
            failure_lines(&err),
            vec!["An unexpected error occurred: No such file or directory"]
        );
    }

    #[test]
    fn test_found_count_includes_null_entries() {
        let listing = json!({"entries": [{"title": "A"}, null, {"novideo": 1}]});
        let count = super::listing_entries(&listing).unwrap().len();

        assert_eq!(found_message(count), "Found 3 videos. Extracting titles...");
    }

    #[test]
    fn test_unusable_entries_is_not_found() {
        for response in [json!({"entries": null}), json!({"entries": {}}), json!([])] {
            let mut extractor = FixedListing::new(response);
            assert_eq!(
                fetch_titles(&mut extractor, &url()),
                Err(FetchError::NotFound)
            );
        }
    }

    #[test]
    fn test_empty_listing_is_empty_not_absent() {
        let mut extractor = FixedListing::new(json!({"entries": []}));

        assert_eq!(get_channel_video_titles(&mut extractor, &url()), Some(vec![]));
    }

    #[test]
    fn test_extraction_failure_is_recovered() {
        let mut extractor = FailingListing(|| {
            ExtractError::Download(String::from("[youtube:tab] This channel does not exist."))
        });

        assert_eq!(
            fetch_titles(&mut extractor, &url()),
            Err(FetchError::Extraction(String::from(
                "[youtube:tab] This channel does not exist."
            )))
        );
        assert_eq!(get_channel_video_titles(&mut extractor, &url()), None);
    }

    #[test]
    fn test_other_failures_are_unexpected() {
        let mut extractor = FailingListing(|| {
            ExtractError::Spawn(SpawnError::IOError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No such file or directory",
            )))
        });

        assert_eq!(
            fetch_titles(&mut extractor, &url()),
            Err(FetchError::Unexpected(String::from(
                "No such file or directory"
            )))
        );
        assert_eq!(get_channel_video_titles(&mut extractor, &url()), None);
    }

    #[test]
    fn test_repeated_fetch_is_identical() {
        let mut extractor = FixedListing::new(json!({
            "entries": [{"title": "one"}, {"title": "two"}]
        }));

        let first = get_channel_video_titles(&mut extractor, &url());
        let second = get_channel_video_titles(&mut extractor, &url());

        assert_eq!(first, second);
        assert_eq!(extractor.calls, 2);
    }
}
