use serde::Deserialize;

use rescount_core::models::{MediaItem, SectionKind, SectionRef};

use super::error::PlexError;

/// Every Plex JSON response wraps its payload in a `MediaContainer`.
#[derive(Debug, Deserialize)]
pub struct PlexResponse<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: T,
}

// ── Server root ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub friendly_name: Option<String>,
    pub version: Option<String>,
}

// ── Library sections ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DirectoryContainer {
    #[serde(rename = "Directory", default)]
    pub directory: Vec<PlexDirectory>,
}

#[derive(Debug, Deserialize)]
pub struct PlexDirectory {
    pub key: String,
    #[serde(rename = "type")]
    pub section_type: String,
    pub title: String,
}

// ── Metadata listings ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataContainer {
    /// Present on paged listings; the number of items across all pages.
    pub total_size: Option<u64>,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<PlexMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlexMetadata {
    /// Missing on synthetic entries such as the "All episodes" child of a show.
    #[serde(default)]
    pub rating_key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    #[serde(rename = "Media", default)]
    pub media: Vec<PlexMedia>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlexMedia {
    pub video_resolution: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// ── Conversions to core models ──────────────────────────────────

impl PlexDirectory {
    /// `None` for section types that are not tallied (music, photos).
    pub fn into_section_ref(self) -> Option<SectionRef> {
        let kind = SectionKind::from_type_str(&self.section_type)?;
        Some(SectionRef {
            key: self.key,
            title: self.title,
            kind,
        })
    }
}

impl PlexMetadata {
    pub fn is_season(&self) -> bool {
        self.item_type.as_deref() == Some("season")
    }

    /// Convert a movie or episode using its first media descriptor.
    ///
    /// An item with no media at all is rejected rather than skipped: the
    /// server always attaches at least one, so its absence means the
    /// response is not what this client understands.
    pub fn into_media_item(self) -> Result<MediaItem, PlexError> {
        let Some(media) = self.media.into_iter().next() else {
            return Err(PlexError::Shape(format!(
                "item {:?} (ratingKey {}) has no media",
                self.title, self.rating_key
            )));
        };
        Ok(MediaItem {
            title: self.title,
            resolution: media.video_resolution,
            width: media.width,
            height: media.height,
        })
    }
}
