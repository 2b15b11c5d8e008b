use crate::error::{AppError, Result};
use crate::models::PlaylistSummary;
use reqwest::Client;
use serde::Deserialize;

const PROVIDER: &str = "Spotify";
const SEARCH_LIMIT: &str = "10";

/// Issued once as a last resort when every mood keyword comes back empty,
/// independent of the mood table.
const TERMINAL_QUERY: &str = "chill";

/// Walks an ordered keyword chain against the Spotify search API and
/// returns the first usable playlist.
#[derive(Debug, Clone)]
pub struct PlaylistResolver {
    client: Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    playlists: Option<PlaylistPage>,
}

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    // Spotify search pages are known to contain JSON nulls between items.
    #[serde(default)]
    items: Vec<Option<SpotifyPlaylist>>,
}

#[derive(Debug, Deserialize)]
struct SpotifyPlaylist {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    external_urls: Option<ExternalUrls>,
    #[serde(default)]
    images: Vec<SpotifyImage>,
    tracks: Option<TracksRef>,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct TracksRef {
    total: Option<u32>,
}

impl PlaylistResolver {
    pub fn new(client: Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// Tries each keyword in order and accepts the first non-empty result
    /// set. If the whole chain comes back empty, one final generic search
    /// runs before giving up with `NotFound`.
    pub async fn resolve(&self, keywords: &[String], token: &str) -> Result<PlaylistSummary> {
        for keyword in keywords {
            let items = self.search(keyword, token).await?;
            if !items.is_empty() {
                tracing::debug!("Keyword {:?} matched {} playlists", keyword, items.len());
                return pick(items);
            }
            tracing::debug!("Keyword {:?} matched nothing, falling back", keyword);
        }

        let items = self.search(TERMINAL_QUERY, token).await?;
        if items.is_empty() {
            return Err(AppError::NotFound("no matching playlist".to_string()));
        }
        pick(items)
    }

    async fn search(&self, query: &str, token: &str) -> Result<Vec<SpotifyPlaylist>> {
        let url = format!("{}/v1/search", self.api_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "playlist"), ("limit", SEARCH_LIMIT)])
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                provider: PROVIDER,
                source: e,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!("Spotify search failed with status {}", status);
            return Err(AppError::UpstreamStatus {
                provider: PROVIDER,
                status,
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| AppError::Upstream {
            provider: PROVIDER,
            source: e,
        })?;

        Ok(body
            .playlists
            .map(|page| page.items.into_iter().flatten().collect())
            .unwrap_or_default())
    }
}

/// Prefers the first item that actually reports tracks; a playlist with an
/// unknown or zero track count is still accepted as the last resort.
fn pick(mut items: Vec<SpotifyPlaylist>) -> Result<PlaylistSummary> {
    let index = items
        .iter()
        .position(|p| p.tracks.as_ref().and_then(|t| t.total).unwrap_or(0) > 0)
        .unwrap_or(0);
    let playlist = items.swap_remove(index);

    let url = playlist
        .external_urls
        .and_then(|u| u.spotify)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::NotFound("playlist has no external link".to_string()))?;

    Ok(PlaylistSummary {
        id: playlist.id,
        name: playlist.name,
        url,
        description: playlist.description,
        cover_image: playlist.images.into_iter().next().map(|image| image.url),
    })
}
