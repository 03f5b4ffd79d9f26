//! Plain-text resolution report.
//!
//! Each section is printed as a two-column table preceded by a blank line:
//!
//! ```text
//!
//! Library:  Movies
//! Total:       999
//! 4K:          127
//! 1080P:       570
//! ```
//!
//! Labels are left-aligned and padded to the widest label in the section,
//! never narrower than `"Library: "`. Counts are right-aligned to the widest
//! count, never narrower than the section name.

use std::fmt::Write;

use crate::models::SectionKind;
use crate::resolution::display_label;
use crate::tally::Tally;

const HEADER_LABEL: &str = "Library:";
const MIN_LABEL_WIDTH: usize = "Library: ".len();

/// A tallied section, in the order it should be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTally {
    pub name: String,
    pub tally: Tally,
}

/// Render every section. The input is not modified, and the same input
/// always renders to the same text.
pub fn render(sections: &[SectionTally]) -> String {
    let mut out = String::new();
    for section in sections {
        render_section(&mut out, section);
    }
    out
}

fn render_section(out: &mut String, section: &SectionTally) {
    let rows = section_rows(&section.tally);

    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_LABEL_WIDTH);
    let count_width = rows
        .iter()
        .map(|(_, count)| count.chars().count())
        .max()
        .unwrap_or(0)
        .max(section.name.chars().count());

    // Writing into a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{HEADER_LABEL:<label_width$} {:>count_width$}",
        section.name
    );
    for (label, count) in &rows {
        let _ = writeln!(out, "{label:<label_width$} {count:>count_width$}");
    }
}

/// Label and formatted count for every line below the header.
fn section_rows(tally: &Tally) -> Vec<(String, String)> {
    let mut rows = vec![("Total:".to_string(), group_thousands(tally.total_items))];
    if tally.kind == SectionKind::Show {
        rows.push(("Series:".to_string(), group_thousands(tally.total_shows)));
        rows.push(("Seasons:".to_string(), group_thousands(tally.total_seasons)));
    }
    rows.extend(
        tally
            .resolutions
            .ranked()
            .into_iter()
            .map(|(label, count)| (display_label(label), group_thousands(count))),
    );
    rows
}

/// Format `n` with a comma between every group of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
