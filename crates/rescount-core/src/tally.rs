//! Per-section resolution tallies.
//!
//! Every movie, or every episode of every show, lands in exactly one
//! resolution bucket. Show and season totals are counted separately from
//! the buckets.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::models::{LibrarySection, MediaItem, SectionContents, SectionKind};
use crate::resolution::Rank;

/// Target for per-item diagnostic lines.
pub const ITEM_LOG_TARGET: &str = "rescount::items";

/// Item counts keyed by resolution label. `None` is the bucket for items
/// without a label and is distinct from any string key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionCounts {
    counts: BTreeMap<Option<String>, u64>,
}

impl ResolutionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one item to `bucket`, creating the bucket at zero if unseen.
    pub fn increment(&mut self, bucket: Option<&str>) {
        *self.counts.entry(bucket.map(str::to_owned)).or_insert(0) += 1;
    }

    pub fn get(&self, bucket: Option<&str>) -> u64 {
        self.counts
            .get(&bucket.map(str::to_owned))
            .copied()
            .unwrap_or(0)
    }

    /// Sum over all buckets.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<&str>, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_deref(), *v))
    }

    /// Buckets ordered for display, highest rank first. Buckets of equal
    /// rank keep key order, so the result is deterministic.
    pub fn ranked(&self) -> Vec<(Option<&str>, u64)> {
        let mut buckets: Vec<_> = self.iter().collect();
        buckets.sort_by_key(|(label, _)| Reverse(Rank::classify(*label)));
        buckets
    }
}

impl<'a> FromIterator<(Option<&'a str>, u64)> for ResolutionCounts {
    fn from_iter<I: IntoIterator<Item = (Option<&'a str>, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (bucket, count) in iter {
            *counts.entry(bucket.map(str::to_owned)).or_insert(0) += count;
        }
        Self { counts }
    }
}

/// Aggregated counts for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub kind: SectionKind,
    pub resolutions: ResolutionCounts,
    pub total_items: u64,
    /// Always zero for movie sections.
    pub total_shows: u64,
    /// Always zero for movie sections.
    pub total_seasons: u64,
}

impl Tally {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            resolutions: ResolutionCounts::new(),
            total_items: 0,
            total_shows: 0,
            total_seasons: 0,
        }
    }

    fn record(&mut self, item: &MediaItem) {
        self.resolutions.increment(item.resolution.as_deref());
        self.total_items += 1;
    }
}

/// Tally every item in `section`. With `verbose` set, one diagnostic line
/// per item is logged on [`ITEM_LOG_TARGET`]; counts are unaffected.
pub fn tally(section: &LibrarySection, verbose: bool) -> Tally {
    let kind = section.kind();
    let mut tally = Tally::new(kind);

    match &section.contents {
        SectionContents::Movies(items) => {
            for item in items {
                tally.record(item);
                if verbose {
                    tracing::info!(target: ITEM_LOG_TARGET, "{}", describe_item(kind, None, item));
                }
            }
        }
        SectionContents::Shows(shows) => {
            for show in shows {
                tally.total_shows += 1;
                tally.total_seasons += u64::from(show.season_count);
                for episode in &show.episodes {
                    tally.record(episode);
                    if verbose {
                        tracing::info!(
                            target: ITEM_LOG_TARGET,
                            "{}",
                            describe_item(kind, Some(&show.title), episode)
                        );
                    }
                }
            }
        }
    }

    tracing::debug!(
        section = %section.title,
        items = tally.total_items,
        buckets = tally.resolutions.len(),
        "Section tallied"
    );
    tally
}

/// `Movie: Title (1080 - 1920x1080)` or `TV Show: Show - Episode (720 - 1280x720)`.
pub fn describe_item(kind: SectionKind, show_title: Option<&str>, item: &MediaItem) -> String {
    let resolution = item.resolution.as_deref().unwrap_or("None");
    match show_title {
        Some(show) => format!(
            "{}: {} - {} ({} - {})",
            kind.item_label(),
            show,
            item.title,
            resolution,
            item.dimensions()
        ),
        None => format!(
            "{}: {} ({} - {})",
            kind.item_label(),
            item.title,
            resolution,
            item.dimensions()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Show;

    fn movie(title: &str, resolution: Option<&str>) -> MediaItem {
        MediaItem::new(title, resolution)
    }

    #[test]
    fn test_increment_creates_bucket() {
        let mut counts = ResolutionCounts::new();
        counts.increment(Some("1080"));
        assert_eq!(counts.get(Some("1080")), 1);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_increment_existing_bucket_only() {
        let mut counts = ResolutionCounts::new();
        counts.increment(Some("1080"));
        counts.increment(Some("720"));
        counts.increment(Some("1080"));
        assert_eq!(counts.get(Some("1080")), 2);
        assert_eq!(counts.get(Some("720")), 1);
        assert_eq!(counts.get(Some("480")), 0);
    }

    #[test]
    fn test_absent_bucket_is_distinct() {
        let mut counts = ResolutionCounts::new();
        counts.increment(None);
        counts.increment(Some("none"));
        counts.increment(Some("None"));
        assert_eq!(counts.get(None), 1);
        assert_eq!(counts.get(Some("none")), 1);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_labels_keep_original_case() {
        let mut counts = ResolutionCounts::new();
        counts.increment(Some("SD"));
        counts.increment(Some("sd"));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(Some("SD")), 1);
    }

    #[test]
    fn test_ranked_order() {
        let counts: ResolutionCounts = [
            (Some("480"), 1),
            (Some("720"), 1),
            (Some("1080"), 1),
            (Some("4k"), 1),
            (Some("sd"), 1),
            (None, 1),
        ]
        .into_iter()
        .collect();
        let order: Vec<_> = counts.ranked().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            order,
            vec![Some("4k"), Some("1080"), Some("720"), Some("480"), Some("sd"), None]
        );
    }

    #[test]
    fn test_tally_movies() {
        let section = LibrarySection::movies(
            "Movies",
            vec![
                movie("Alien", Some("1080")).with_dimensions(1920, 1040),
                movie("Heat", Some("720")),
                movie("Ran", Some("1080")),
                movie("Metropolis", None),
            ],
        );
        let tally = tally(&section, false);

        assert_eq!(tally.kind, SectionKind::Movie);
        assert_eq!(tally.total_items, 4);
        assert_eq!(tally.resolutions.get(Some("1080")), 2);
        assert_eq!(tally.resolutions.get(Some("720")), 1);
        assert_eq!(tally.resolutions.get(None), 1);
        assert_eq!(tally.total_shows, 0);
        assert_eq!(tally.total_seasons, 0);
    }

    #[test]
    fn test_tally_single_show() {
        let section = LibrarySection::shows(
            "TV Shows",
            vec![Show {
                title: "Example Show".into(),
                season_count: 1,
                episodes: vec![movie("Pilot", Some("720")).with_dimensions(1280, 720)],
            }],
        );
        let tally = tally(&section, false);

        assert_eq!(tally.kind, SectionKind::Show);
        assert_eq!(tally.total_items, 1);
        assert_eq!(tally.total_shows, 1);
        assert_eq!(tally.total_seasons, 1);
        assert_eq!(tally.resolutions.get(Some("720")), 1);
        assert_eq!(tally.resolutions.len(), 1);
    }

    #[test]
    fn test_show_totals_independent_of_episodes() {
        let section = LibrarySection::shows(
            "TV Shows",
            vec![
                Show {
                    title: "Unaired".into(),
                    season_count: 2,
                    episodes: vec![],
                },
                Show {
                    title: "Long Runner".into(),
                    season_count: 3,
                    episodes: vec![
                        movie("E1", Some("sd")),
                        movie("E2", Some("sd")),
                        movie("E3", Some("1080")),
                    ],
                },
            ],
        );
        let tally = tally(&section, false);

        assert_eq!(tally.total_shows, 2);
        assert_eq!(tally.total_seasons, 5);
        assert_eq!(tally.total_items, 3);
        assert_eq!(tally.resolutions.get(Some("sd")), 2);
    }

    #[test]
    fn test_bucket_sum_matches_total() {
        let labels = [Some("1080"), None, Some("4k"), Some("1080"), Some("odd"), Some("sd")];
        let items = labels
            .iter()
            .enumerate()
            .map(|(i, l)| movie(&format!("Movie {i}"), *l))
            .collect();
        let tally = tally(&LibrarySection::movies("Movies", items), false);

        assert_eq!(tally.total_items, labels.len() as u64);
        assert_eq!(tally.resolutions.total(), tally.total_items);
    }

    #[test]
    fn test_verbose_does_not_change_counts() {
        let section = LibrarySection::movies(
            "Movies",
            vec![movie("Alien", Some("1080")), movie("Heat", None)],
        );
        assert_eq!(tally(&section, true), tally(&section, false));
    }

    #[test]
    fn test_empty_section() {
        let tally = tally(&LibrarySection::shows("Empty", vec![]), false);
        assert_eq!(tally.total_items, 0);
        assert!(tally.resolutions.is_empty());
    }

    #[test]
    fn test_describe_item() {
        let item = movie("Alien", Some("1080")).with_dimensions(1920, 1080);
        assert_eq!(
            describe_item(SectionKind::Movie, None, &item),
            "Movie: Alien (1080 - 1920x1080)"
        );

        let episode = movie("Pilot", None);
        assert_eq!(
            describe_item(SectionKind::Show, Some("Example Show"), &episode),
            "TV Show: Example Show - Pilot (None - NonexNone)"
        );
    }
}
