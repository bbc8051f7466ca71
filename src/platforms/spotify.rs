use serde::Deserialize;
use serde_json::Value;

use crate::config::SpotifyConfig;
use crate::core::coerce::{coerce_int, ms_to_seconds};
use crate::error::FetchError;
use crate::http::{BlockingClient, HttpClient};
use crate::models::{Track, TrackId};
use crate::platforms::{Platform, PlatformBase};

/// stats.fm API, which mirrors a user's Spotify playback.
pub const DEFAULT_API_URL: &str = "https://api.stats.fm/api/v1";

const TRACK_LINK: &str = "https://open.spotify.com/track";
const ALBUM_LINK: &str = "https://open.spotify.com/album";

/// Current-track lookup through stats.fm for a single username.
pub struct SpotifyPlatform<C = BlockingClient> {
    base: PlatformBase,
    api_url: String,
    client: C,
}

#[derive(Deserialize)]
struct CurrentStream {
    item: Option<StreamItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamItem {
    track: StreamTrack,
    progress_ms: Value,
    device_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamTrack {
    id: TrackId,
    name: String,
    artists: Vec<StreamArtist>,
    albums: Vec<StreamAlbum>,
    duration_ms: Value,
    #[serde(default)]
    external_ids: Option<ExternalIds>,
}

#[derive(Deserialize)]
struct StreamArtist {
    name: String,
}

#[derive(Deserialize)]
struct StreamAlbum {
    image: Option<String>,
}

/// stats.fm sends `null` instead of an empty list for unmatched tracks.
#[derive(Deserialize)]
struct ExternalIds {
    #[serde(default)]
    spotify: Option<Vec<String>>,
}

impl ExternalIds {
    fn first_spotify(ids: Option<ExternalIds>) -> Option<String> {
        ids?.spotify?.into_iter().next()
    }
}

#[derive(Deserialize)]
struct AlbumsResponse {
    items: Vec<AlbumRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumRef {
    #[serde(default)]
    external_ids: Option<ExternalIds>,
}

impl SpotifyPlatform<BlockingClient> {
    pub fn new(username: &str, config: &SpotifyConfig) -> Result<Self, FetchError> {
        let client = BlockingClient::new(&config.http_options())?;
        Ok(Self::with_client(username, &config.api_url, client))
    }
}

impl<C: HttpClient> SpotifyPlatform<C> {
    pub fn with_client(username: &str, api_url: &str, client: C) -> Self {
        Self {
            base: PlatformBase::new(username),
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn username(&self) -> &str {
        self.base.credential()
    }

    /// Resolves the Spotify album permalink for a stats.fm track id.
    /// Any failure along the way yields `None`.
    pub fn get_album_link(&self, internal_track_id: &TrackId) -> Option<String> {
        match self.fetch_album_link(internal_track_id) {
            Ok(link) => link,
            Err(e) => {
                log::debug!(
                    "[Spotify] Album lookup for track {} failed: {}",
                    internal_track_id,
                    e
                );
                None
            }
        }
    }

    fn fetch_album_link(&self, internal_track_id: &TrackId) -> Result<Option<String>, FetchError> {
        let url = format!("{}/tracks/{}/albums", self.api_url, internal_track_id);
        let resp = self.client.get(&url, self.base.headers())?;
        if resp.status != 200 {
            return Ok(None);
        }

        let albums: AlbumsResponse = resp.json()?;
        let album_id = albums
            .items
            .into_iter()
            .next()
            .and_then(|album| ExternalIds::first_spotify(album.external_ids));

        Ok(album_id.map(|id| format!("{}/{}", ALBUM_LINK, id)))
    }

    fn convert_item(&self, item: StreamItem) -> Result<Track, FetchError> {
        let track = item.track;
        let duration_ms = millis_field("durationMs", &track.duration_ms)?;
        let progress_ms = millis_field("progressMs", &item.progress_ms)?;

        let id = ExternalIds::first_spotify(track.external_ids)
            .map(TrackId::Text)
            .unwrap_or(TrackId::Number(0));

        let album = self.get_album_link(&track.id);
        let link = format!("{}/{}", TRACK_LINK, id);

        Ok(Track {
            active: true,
            id: Some(id),
            title: Some(track.name),
            artist: track.artists.into_iter().map(|a| a.name).collect(),
            album,
            thumb: track.albums.into_iter().next().and_then(|a| a.image),
            duration: Some(ms_to_seconds(duration_ms)),
            progress: Some(ms_to_seconds(progress_ms)),
            link: Some(link),
            device: item.device_name,
            download_url: None,
        })
    }
}

/// Millisecond counters are usually integers, but floats show up too.
fn millis_field(field: &'static str, value: &Value) -> Result<i64, FetchError> {
    coerce_int(value).map_err(|reason| FetchError::Field { field, reason })
}

impl<C: HttpClient> Platform for SpotifyPlatform<C> {
    fn name(&self) -> &str {
        "Spotify"
    }

    fn fetch_track(&self) -> Result<Track, FetchError> {
        let url = format!("{}/users/{}/streams/current", self.api_url, self.username());
        log::debug!("[Spotify] GET {}", url);

        let resp = self.client.get(&url, self.base.headers())?;
        match resp.status {
            200 => {}
            204 => return Ok(Track::inactive()),
            status => return Err(FetchError::Status(status)),
        }

        let stream: CurrentStream = resp.json()?;
        let track = match stream.item {
            Some(item) => self.convert_item(item)?,
            None => Track::inactive(),
        };

        log::debug!("[Spotify] Current track: {}", track.summary());
        Ok(track)
    }
}
