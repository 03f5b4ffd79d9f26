use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use rescount_core::catalog::Catalog;
use rescount_core::models::{MediaItem, SectionRef, Show};

use super::error::PlexError;
use super::types::{
    DirectoryContainer, MetadataContainer, PlexDirectory, PlexMetadata, PlexResponse, ServerInfo,
};

const TOKEN_HEADER: &str = "X-Plex-Token";

/// Items requested per page when listing a section.
const PAGE_SIZE: u64 = 200;

/// Plex Media Server client over the JSON HTTP API.
pub struct PlexClient {
    base_url: Url,
    token: String,
    http: Client,
}

impl PlexClient {
    /// Build a client without contacting the server.
    ///
    /// The base URL may carry a path prefix (a server behind a reverse
    /// proxy); endpoints are resolved relative to it.
    pub fn new(base_url: &str, token: String) -> Result<Self, PlexError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            token,
            http: Client::new(),
        })
    }

    /// Build a client and verify the server accepts the token.
    pub async fn connect(base_url: &str, token: String) -> Result<Self, PlexError> {
        let client = Self::new(base_url, token)?;
        let info = client.server_info().await?;
        tracing::info!(
            server = info.friendly_name.as_deref().unwrap_or("unknown"),
            version = info.version.as_deref().unwrap_or("unknown"),
            "Connected to Plex"
        );
        Ok(client)
    }

    pub async fn server_info(&self) -> Result<ServerInfo, PlexError> {
        self.get_container("", &[]).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, PlexError> {
        Ok(self.base_url.join(path)?)
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, PlexError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Plex API error");
        if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(PlexError::Auth("server rejected the access token".into()))
        } else {
            Err(PlexError::Api {
                status: status.as_u16(),
                message: body,
            })
        }
    }

    /// GET `path` and unwrap the `MediaContainer` payload.
    async fn get_container<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlexError> {
        let resp = self
            .http
            .get(self.endpoint(path)?)
            .header(TOKEN_HEADER, &self.token)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: PlexResponse<T> = resp
            .json()
            .await
            .map_err(|e| PlexError::Parse(e.to_string()))?;
        Ok(body.media_container)
    }

    /// Fetch a metadata listing page by page until the server's total is reached.
    async fn get_all_metadata(&self, path: &str) -> Result<Vec<PlexMetadata>, PlexError> {
        let mut items = Vec::new();
        let mut start: u64 = 0;

        loop {
            let page: MetadataContainer = self
                .get_container(
                    path,
                    &[
                        ("X-Plex-Container-Start", start.to_string()),
                        ("X-Plex-Container-Size", PAGE_SIZE.to_string()),
                    ],
                )
                .await?;

            let fetched = page.metadata.len() as u64;
            items.extend(page.metadata);
            start += fetched;

            tracing::debug!(path, fetched, total = ?page.total_size, "Fetched page");

            if !has_more(start, fetched, page.total_size) {
                break;
            }
        }

        Ok(items)
    }

    async fn section_listing(&self, section: &SectionRef) -> Result<Vec<PlexMetadata>, PlexError> {
        self.get_all_metadata(&format!("library/sections/{}/all", section.key))
            .await
    }

    async fn season_count(&self, rating_key: &str) -> Result<u32, PlexError> {
        let children: MetadataContainer = self
            .get_container(
                &format!("library/metadata/{rating_key}/children"),
                &[("excludeAllLeaves", "1".to_string())],
            )
            .await?;
        Ok(children.metadata.iter().filter(|m| m.is_season()).count() as u32)
    }

    async fn episodes(&self, rating_key: &str) -> Result<Vec<MediaItem>, PlexError> {
        self.get_all_metadata(&format!("library/metadata/{rating_key}/allLeaves"))
            .await?
            .into_iter()
            .map(PlexMetadata::into_media_item)
            .collect()
    }
}

/// Whether another page should be requested after `start` items.
///
/// An empty page always ends the listing. Without a total the server is
/// assumed to have ignored paging and returned everything at once.
fn has_more(start: u64, fetched: u64, total_size: Option<u64>) -> bool {
    fetched > 0 && total_size.is_some_and(|total| start < total)
}

impl Catalog for PlexClient {
    type Error = PlexError;

    async fn sections(&self) -> Result<Vec<SectionRef>, PlexError> {
        let container: DirectoryContainer = self.get_container("library/sections", &[]).await?;

        let mut sections = Vec::new();
        for directory in container.directory {
            let title = directory.title.clone();
            let section_type = directory.section_type.clone();
            match PlexDirectory::into_section_ref(directory) {
                Some(section) => sections.push(section),
                None => tracing::debug!(%title, %section_type, "Skipping section"),
            }
        }
        Ok(sections)
    }

    async fn movies(&self, section: &SectionRef) -> Result<Vec<MediaItem>, PlexError> {
        self.section_listing(section)
            .await?
            .into_iter()
            .map(PlexMetadata::into_media_item)
            .collect()
    }

    async fn shows(&self, section: &SectionRef) -> Result<Vec<Show>, PlexError> {
        let listing = self.section_listing(section).await?;

        let mut shows = Vec::with_capacity(listing.len());
        for show in listing {
            let season_count = self.season_count(&show.rating_key).await?;
            let episodes = self.episodes(&show.rating_key).await?;
            tracing::debug!(
                show = %show.title,
                seasons = season_count,
                episodes = episodes.len(),
                "Loaded show"
            );
            shows.push(Show {
                title: show.title,
                season_count,
                episodes,
            });
        }
        Ok(shows)
    }
}
