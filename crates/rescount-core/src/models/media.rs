use serde::{Deserialize, Serialize};

/// One playable title: a movie, or a single episode of a show.
///
/// Only the first media descriptor reported by the server is kept; the
/// resolution label is stored exactly as the server returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub title: String,
    pub resolution: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl MediaItem {
    /// Pixel dimensions as `WxH`, with `None` in place of unknown values.
    pub fn dimensions(&self) -> String {
        format!("{}x{}", or_none(self.width), or_none(self.height))
    }
}

#[cfg(test)]
impl MediaItem {
    pub fn new(title: impl Into<String>, resolution: Option<&str>) -> Self {
        Self {
            title: title.into(),
            resolution: resolution.map(str::to_owned),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

fn or_none(value: Option<u32>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

/// A TV series with its season count and every episode across all seasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub title: String,
    pub season_count: u32,
    pub episodes: Vec<MediaItem>,
}
