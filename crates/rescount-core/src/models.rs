mod library;
mod media;

pub use library::{LibrarySection, SectionContents, SectionKind, SectionRef};
pub use media::{MediaItem, Show};
