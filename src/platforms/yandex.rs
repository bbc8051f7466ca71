use serde_json::{Map, Value};

use crate::config::YandexConfig;
use crate::core::coerce::{coerce_int, ms_to_seconds, ArtistField};
use crate::error::FetchError;
use crate::http::{BlockingClient, Headers, HttpClient};
use crate::models::{Track, TrackId};
use crate::platforms::{Platform, PlatformBase};

/// Proxy in front of Yandex Music that reports the token owner's current track.
pub const DEFAULT_API_URL: &str = "https://track.mipoh.ru";

const TRACK_LINK: &str = "https://music.yandex.ru/track";
const BODY_PREVIEW_CHARS: usize = 200;

pub struct YandexMusicPlatform<C = BlockingClient> {
    base: PlatformBase,
    api_url: String,
    client: C,
}

impl YandexMusicPlatform<BlockingClient> {
    pub fn new(token: &str, config: &YandexConfig) -> Result<Self, FetchError> {
        let client = BlockingClient::new(&config.http_options())?;
        Ok(Self::with_client(token, &config.api_url, client))
    }
}

impl<C: HttpClient> YandexMusicPlatform<C> {
    pub fn with_client(token: &str, api_url: &str, client: C) -> Self {
        let base = PlatformBase::new(token);
        let headers = Headers::from([
            ("User-Agent".to_string(), "Mozilla/5.0".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("ya-token".to_string(), base.credential().to_string()),
        ]);

        Self {
            base: base.with_headers(headers),
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn token(&self) -> &str {
        self.base.credential()
    }
}

impl<C: HttpClient> Platform for YandexMusicPlatform<C> {
    fn name(&self) -> &str {
        "YandexMusic"
    }

    fn fetch_track(&self) -> Result<Track, FetchError> {
        if self.token().is_empty() {
            return Ok(Track::inactive());
        }

        let url = format!("{}/get_current_track_beta", self.api_url);
        log::debug!("[YandexMusic] GET {}", url);

        let resp = self.client.get(&url, self.base.headers())?;
        log::debug!(
            "[YandexMusic] get_current_track status={}, body={}",
            resp.status,
            resp.body_preview(BODY_PREVIEW_CHARS)
        );
        if resp.status != 200 {
            return Err(FetchError::Status(resp.status));
        }

        let data: Value = resp.json()?;
        let keys: Vec<&str> = data
            .as_object()
            .map(|obj| obj.keys().map(String::as_str).collect())
            .unwrap_or_default();
        log::debug!("[YandexMusic] get_current_track data keys={:?}", keys);

        let Some(raw) = data.get("track") else {
            log::debug!("[YandexMusic] no 'track' key");
            return Ok(Track::inactive());
        };
        log::debug!("[YandexMusic] raw track: {}", raw);

        let fields = raw.as_object().ok_or_else(|| FetchError::Field {
            field: "track",
            reason: format!("expected an object, got {}", raw),
        })?;
        let track = convert_track(fields, data.get("progress_ms"))?;

        log::debug!(
            "[YandexMusic] built track: {}, album={:?}, duration={:?}, progress={:?}",
            track.summary(),
            track.album,
            track.duration,
            track.progress
        );
        Ok(track)
    }
}

fn convert_track(fields: &Map<String, Value>, progress_ms: Option<&Value>) -> Result<Track, FetchError> {
    let id = fields.get("track_id").and_then(TrackId::from_value);

    let artist = fields
        .get("artist")
        .map(|v| ArtistField::from_value(v).into_names())
        .unwrap_or_default();

    let duration = match fields.get("duration") {
        Some(v) => coerce_int(v).map_err(|reason| FetchError::Field {
            field: "duration",
            reason,
        })?,
        None => 0,
    };

    let progress_ms = match progress_ms {
        Some(v) => coerce_int(v).unwrap_or_else(|reason| {
            log::debug!("[YandexMusic] progress_ms ignored: {}", reason);
            0
        }),
        None => 0,
    };

    let link = id.as_ref().map(|id| format!("{}/{}", TRACK_LINK, id));

    Ok(Track {
        active: true,
        id,
        title: text_field(fields, "title"),
        artist,
        album: text_field(fields, "album"),
        thumb: text_field(fields, "img"),
        duration: Some(duration),
        progress: Some(ms_to_seconds(progress_ms)),
        link,
        device: None,
        download_url: text_field(fields, "download_link"),
    })
}

/// Passes strings through as-is; numbers are kept in their text form.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
