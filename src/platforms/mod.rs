pub mod spotify;
pub mod yandex;

use crate::config::Config;
use crate::error::FetchError;
use crate::http::Headers;
use crate::models::Track;

use self::spotify::SpotifyPlatform;
use self::yandex::YandexMusicPlatform;

/// 플랫폼이 따로 지정하지 않으면 사용하는 기본 헤더.
pub fn default_headers() -> Headers {
    Headers::from([
        ("User-Agent".to_string(), "Mozilla/5.0".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ])
}

/// 모든 플랫폼이 공유하는 상태: 자격증명(사용자명 또는 API 토큰)과 요청 헤더.
#[derive(Debug, Clone)]
pub struct PlatformBase {
    credential: String,
    headers: Headers,
}

impl PlatformBase {
    pub fn new(credential: &str) -> Self {
        Self {
            credential: credential.trim().to_string(),
            headers: default_headers(),
        }
    }

    /// 기본 헤더를 통째로 교체한다.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// 현재 재생 중인 곡을 알려주는 음악 서비스 트레이트.
/// stats.fm(Spotify), Yandex Music 등을 이 트레이트로 추상화한다.
pub trait Platform {
    fn name(&self) -> &str;

    /// 현재 곡을 가져와 정규화한다. `Ok(Track::inactive())`는 재생 중인 곡이 없다는 뜻이고,
    /// 에러는 통신 또는 응답 파싱 실패다.
    fn fetch_track(&self) -> Result<Track, FetchError>;

    /// `fetch_track`과 같지만 모든 실패를 로그로 남기고 비활성 트랙을 반환한다.
    fn get_track(&self) -> Track {
        match self.fetch_track() {
            Ok(track) => track,
            Err(e) => {
                log::warn!("[{}] get_current_track failed: {}", self.name(), e);
                Track::inactive()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlatformKind {
    Spotify,
    Yandex,
}

impl PlatformKind {
    pub fn is_configured(self, config: &Config) -> bool {
        match self {
            PlatformKind::Spotify => config.spotify.is_configured(),
            PlatformKind::Yandex => config.yandex.is_configured(),
        }
    }

    /// 설정 파일에 저장된 이 플랫폼의 자격증명.
    pub fn configured_credential(self, config: &Config) -> Option<String> {
        match self {
            PlatformKind::Spotify => config.spotify.username.clone(),
            PlatformKind::Yandex => config.yandex.token.clone(),
        }
    }
}

/// `config`의 설정으로 `kind`에 해당하는 플랫폼을 생성한다.
pub fn create(kind: PlatformKind, config: &Config, credential: &str) -> anyhow::Result<Box<dyn Platform>> {
    let platform: Box<dyn Platform> = match kind {
        PlatformKind::Spotify => Box::new(SpotifyPlatform::new(credential, &config.spotify)?),
        PlatformKind::Yandex => Box::new(YandexMusicPlatform::new(credential, &config.yandex)?),
    };
    Ok(platform)
}
