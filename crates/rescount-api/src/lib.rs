//! Media server clients that feed the resolution tallier.

pub mod plex;
