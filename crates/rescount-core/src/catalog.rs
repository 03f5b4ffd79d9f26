//! Read-only access to a media server's library catalog.
//!
//! Server clients implement [`Catalog`] and convert their wire types into
//! the plain models in [`crate::models`], so tallying never touches a
//! server-specific type.

use std::future::Future;

use crate::models::{MediaItem, SectionRef, Show};

pub trait Catalog: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// List the movie and show sections. Other section types are omitted.
    fn sections(&self) -> impl Future<Output = Result<Vec<SectionRef>, Self::Error>> + Send;

    /// Every item in a movie section.
    fn movies(
        &self,
        section: &SectionRef,
    ) -> impl Future<Output = Result<Vec<MediaItem>, Self::Error>> + Send;

    /// Every show in a show section, each with its season count and episodes.
    fn shows(
        &self,
        section: &SectionRef,
    ) -> impl Future<Output = Result<Vec<Show>, Self::Error>> + Send;
}
