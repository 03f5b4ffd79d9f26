//! Full-run pipeline: enumerate, load and tally every selected section.
//!
//! Sections are processed one at a time. Nothing is returned until every
//! section has been tallied, so a failure part-way through never yields a
//! partial report.

use crate::catalog::Catalog;
use crate::error::RescountError;
use crate::models::{LibrarySection, SectionKind, SectionRef};
use crate::report::SectionTally;
use crate::tally::tally;

/// Which sections a run reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSelection {
    /// Every movie and show section, in catalog order.
    All,
    /// Only the named sections, in the given order. Names match
    /// case-insensitively.
    Named(Vec<String>),
}

impl SectionSelection {
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Self::All
        } else {
            Self::Named(names)
        }
    }

    fn resolve(&self, available: Vec<SectionRef>) -> Result<Vec<SectionRef>, RescountError> {
        match self {
            Self::All => Ok(available),
            Self::Named(names) => names
                .iter()
                .map(|name| {
                    available
                        .iter()
                        .find(|s| s.title.eq_ignore_ascii_case(name))
                        .cloned()
                        .ok_or_else(|| RescountError::SectionNotFound(name.clone()))
                })
                .collect(),
        }
    }
}

/// Tally every selected section of `catalog`.
pub async fn collect_tallies<C: Catalog>(
    catalog: &C,
    selection: &SectionSelection,
    verbose: bool,
) -> Result<Vec<SectionTally>, RescountError> {
    let available = catalog.sections().await.map_err(catalog_error)?;
    let selected = selection.resolve(available)?;
    tracing::info!(sections = selected.len(), "Tallying library sections");

    let mut tallies = Vec::with_capacity(selected.len());
    for section_ref in &selected {
        tracing::info!(section = %section_ref.title, kind = %section_ref.kind, "Loading section");
        let section = load_section(catalog, section_ref)
            .await
            .map_err(catalog_error)?;
        tallies.push(SectionTally {
            name: section.title.clone(),
            tally: tally(&section, verbose),
        });
    }
    Ok(tallies)
}

async fn load_section<C: Catalog>(
    catalog: &C,
    section: &SectionRef,
) -> Result<LibrarySection, C::Error> {
    Ok(match section.kind {
        SectionKind::Movie => LibrarySection::movies(&section.title, catalog.movies(section).await?),
        SectionKind::Show => LibrarySection::shows(&section.title, catalog.shows(section).await?),
    })
}

fn catalog_error<E: std::error::Error>(e: E) -> RescountError {
    RescountError::Catalog(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaItem, Show};

    #[derive(Debug, thiserror::Error)]
    #[error("server unreachable")]
    struct Unreachable;

    /// In-memory catalog. `fail_on` names a section whose load fails.
    #[derive(Default)]
    struct FakeCatalog {
        movies: Vec<(SectionRef, Vec<MediaItem>)>,
        shows: Vec<(SectionRef, Vec<Show>)>,
        fail_on: Option<String>,
        fail_listing: bool,
    }

    impl FakeCatalog {
        fn sample() -> Self {
            Self {
                movies: vec![(
                    section_ref("1", "Movies", SectionKind::Movie),
                    vec![
                        MediaItem::new("Alien", Some("1080")),
                        MediaItem::new("Heat", Some("4k")),
                    ],
                )],
                shows: vec![(
                    section_ref("2", "TV Shows", SectionKind::Show),
                    vec![Show {
                        title: "Example Show".into(),
                        season_count: 1,
                        episodes: vec![MediaItem::new("Pilot", Some("720"))],
                    }],
                )],
                ..Default::default()
            }
        }

        fn check(&self, section: &SectionRef) -> Result<(), Unreachable> {
            match &self.fail_on {
                Some(title) if *title == section.title => Err(Unreachable),
                _ => Ok(()),
            }
        }
    }

    fn section_ref(key: &str, title: &str, kind: SectionKind) -> SectionRef {
        SectionRef {
            key: key.into(),
            title: title.into(),
            kind,
        }
    }

    impl Catalog for FakeCatalog {
        type Error = Unreachable;

        async fn sections(&self) -> Result<Vec<SectionRef>, Unreachable> {
            if self.fail_listing {
                return Err(Unreachable);
            }
            let mut all: Vec<SectionRef> = self.movies.iter().map(|(s, _)| s.clone()).collect();
            all.extend(self.shows.iter().map(|(s, _)| s.clone()));
            all.sort_by(|a, b| a.key.cmp(&b.key));
            Ok(all)
        }

        async fn movies(&self, section: &SectionRef) -> Result<Vec<MediaItem>, Unreachable> {
            self.check(section)?;
            Ok(self
                .movies
                .iter()
                .find(|(s, _)| s.key == section.key)
                .map(|(_, items)| items.clone())
                .unwrap_or_default())
        }

        async fn shows(&self, section: &SectionRef) -> Result<Vec<Show>, Unreachable> {
            self.check(section)?;
            Ok(self
                .shows
                .iter()
                .find(|(s, _)| s.key == section.key)
                .map(|(_, shows)| shows.clone())
                .unwrap_or_default())
        }
    }

    #[test]
    fn test_selection_from_names() {
        assert_eq!(SectionSelection::from_names(vec![]), SectionSelection::All);
        assert_eq!(
            SectionSelection::from_names(vec!["Movies".into()]),
            SectionSelection::Named(vec!["Movies".into()])
        );
    }

    #[tokio::test]
    async fn test_collect_all_sections() {
        let catalog = FakeCatalog::sample();
        let tallies = collect_tallies(&catalog, &SectionSelection::All, false)
            .await
            .unwrap();

        assert_eq!(tallies.len(), 2);
        assert_eq!(tallies[0].name, "Movies");
        assert_eq!(tallies[0].tally.total_items, 2);
        assert_eq!(tallies[0].tally.resolutions.get(Some("4k")), 1);
        assert_eq!(tallies[1].name, "TV Shows");
        assert_eq!(tallies[1].tally.total_shows, 1);
        assert_eq!(tallies[1].tally.total_seasons, 1);
        assert_eq!(tallies[1].tally.resolutions.get(Some("720")), 1);
    }

    #[tokio::test]
    async fn test_collect_named_sections_in_requested_order() {
        let catalog = FakeCatalog::sample();
        let selection = SectionSelection::Named(vec!["tv shows".into(), "Movies".into()]);
        let tallies = collect_tallies(&catalog, &selection, false).await.unwrap();

        let names: Vec<&str> = tallies.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["TV Shows", "Movies"]);
    }

    #[tokio::test]
    async fn test_missing_named_section() {
        let catalog = FakeCatalog::sample();
        let selection = SectionSelection::Named(vec!["Anime".into()]);
        let err = collect_tallies(&catalog, &selection, false)
            .await
            .unwrap_err();
        assert!(matches!(err, RescountError::SectionNotFound(name) if name == "Anime"));
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let catalog = FakeCatalog {
            fail_listing: true,
            ..FakeCatalog::sample()
        };
        let err = collect_tallies(&catalog, &SectionSelection::All, false)
            .await
            .unwrap_err();
        assert!(matches!(err, RescountError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_section_failure_yields_no_partial_result() {
        let catalog = FakeCatalog {
            fail_on: Some("TV Shows".into()),
            ..FakeCatalog::sample()
        };
        let result = collect_tallies(&catalog, &SectionSelection::All, false).await;
        match result {
            Err(RescountError::Catalog(message)) => assert_eq!(message, "server unreachable"),
            other => panic!("expected catalog error, got {other:?}"),
        }
    }
}
