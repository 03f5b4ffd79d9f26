use serde::{Deserialize, Serialize};

use super::{MediaItem, Show};

/// The kind of content a library section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Movie,
    Show,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
        }
    }

    /// Parse a server-side section type. Music, photo and other section
    /// types are not tallied and yield `None`.
    pub fn from_type_str(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "show" => Some(Self::Show),
            _ => None,
        }
    }

    /// Label used in per-item diagnostic lines.
    pub fn item_label(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Show => "TV Show",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a section as listed by the catalog, before its contents are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    pub key: String,
    pub title: String,
    pub kind: SectionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContents {
    Movies(Vec<MediaItem>),
    Shows(Vec<Show>),
}

/// A fully enumerated library section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySection {
    pub title: String,
    pub contents: SectionContents,
}

impl LibrarySection {
    pub fn movies(title: impl Into<String>, items: Vec<MediaItem>) -> Self {
        Self {
            title: title.into(),
            contents: SectionContents::Movies(items),
        }
    }

    pub fn shows(title: impl Into<String>, shows: Vec<Show>) -> Self {
        Self {
            title: title.into(),
            contents: SectionContents::Shows(shows),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self.contents {
            SectionContents::Movies(_) => SectionKind::Movie,
            SectionContents::Shows(_) => SectionKind::Show,
        }
    }
}
