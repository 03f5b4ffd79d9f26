//! Resolution labels: ranking and display.
//!
//! Servers report a video resolution as free-form text. Line counts ("480",
//! "1080"), kilo-scale labels ("4k", "8k") and qualitative tiers ("sd", "hd",
//! "uhd") all occur, and some items carry no label at all. Every label maps
//! to a [`Rank`] so buckets can be ordered for display; labels that fit no
//! known shape still get a rank and are never rejected.

use std::cmp::Ordering;

/// Qualitative tiers, lowest first.
const QUALITATIVE_TIERS: &[(&str, u8)] = &[("sd", 0), ("hd", 1), ("uhd", 2)];

/// Display position of a resolution bucket. Higher ranks are listed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    /// An absent label, or one that matches no known shape.
    Unknown,
    Qualitative(u8),
    Numeric(u64),
    /// `<n>k`, ranked as `n * 1000`.
    KiloScale(u64),
}

impl Rank {
    pub fn classify(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Unknown;
        };
        let lower = label.to_ascii_lowercase();

        if let Some(prefix) = lower.strip_suffix('k') {
            return parse_count(prefix).map_or(Self::Unknown, Self::KiloScale);
        }
        if let Some(lines) = parse_count(&lower) {
            return Self::Numeric(lines);
        }
        QUALITATIVE_TIERS
            .iter()
            .find(|(name, _)| *name == lower)
            .map_or(Self::Unknown, |&(_, tier)| Self::Qualitative(tier))
    }

    /// Numeric sort weight. Unknown labels weigh -1, below every tier.
    pub fn value(self) -> i128 {
        match self {
            Self::Unknown => -1,
            Self::Qualitative(tier) => i128::from(tier),
            Self::Numeric(lines) => i128::from(lines),
            Self::KiloScale(k) => i128::from(k) * 1000,
        }
    }

    // Breaks ties between variants of equal weight, e.g. "4000" and "4k".
    fn variant_order(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Qualitative(_) => 1,
            Self::Numeric(_) => 2,
            Self::KiloScale(_) => 3,
        }
    }
}

/// Parse a line count from plain ASCII digits. Digit strings too long for
/// `u64` saturate so they still rank above every shorter number.
fn parse_count(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse::<u64>().unwrap_or(u64::MAX))
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value()
            .cmp(&other.value())
            .then_with(|| self.variant_order().cmp(&other.variant_order()))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Report label for a bucket, including the trailing colon.
///
/// Pure line counts get a `P` suffix ("1080P:"), everything else is
/// upper-cased as-is ("SD:", "4K:"). Absent and empty labels render as
/// "None:".
pub fn display_label(label: Option<&str>) -> String {
    match label {
        None | Some("") => "None:".to_string(),
        Some(l) if l.bytes().all(|b| b.is_ascii_digit()) => format!("{l}P:"),
        Some(l) => format!("{}:", l.to_uppercase()),
    }
}
