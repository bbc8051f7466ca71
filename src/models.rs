use std::fmt;

use serde::{Deserialize, Serialize};

/// Provider-specific track identifier. stats.fm and Yandex hand out both
/// strings and numbers, so both are kept as they came.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(i64),
    Text(String),
}

impl TrackId {
    /// Reads an id out of a loose JSON value. `null` and non-scalar values have no id.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(TrackId::Text(s.clone())),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(TrackId::Number(i)),
                None => Some(TrackId::Text(n.to_string())),
            },
            _ => None,
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::Number(n) => write!(f, "{}", n),
            TrackId::Text(s) => f.write_str(s),
        }
    }
}

/// 모든 플랫폼이 공통으로 반환하는 "현재 재생 중" 정보.
///
/// 비활성 트랙은 `active = false` 외에 아무 값도 갖지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Track {
    pub active: bool,
    pub id: Option<TrackId>,
    pub title: Option<String>,
    pub artist: Vec<String>,
    pub album: Option<String>,
    pub thumb: Option<String>,
    pub duration: Option<i64>,
    pub progress: Option<i64>,
    pub link: Option<String>,
    pub device: Option<String>,
    pub download_url: Option<String>,
}

impl Track {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("알 수 없음")
    }

    pub fn display_artist(&self) -> String {
        if self.artist.is_empty() {
            "알 수 없음".to_string()
        } else {
            self.artist.join(", ")
        }
    }

    pub fn summary(&self) -> String {
        format!("{} - {}", self.display_artist(), self.display_title())
    }
}

/// 초 단위 시간을 `m:ss` 형식으로 변환한다.
pub fn format_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inactive_has_no_fields() {
        let track = Track::inactive();
        assert!(!track.active);
        assert_eq!(track, Track::default());
        assert!(track.artist.is_empty());
        assert!(track.id.is_none());
    }

    #[test]
    fn test_track_id_from_value() {
        assert_eq!(TrackId::from_value(&json!(42)), Some(TrackId::Number(42)));
        assert_eq!(
            TrackId::from_value(&json!("abc")),
            Some(TrackId::Text("abc".to_string()))
        );
        assert_eq!(TrackId::from_value(&json!(null)), None);
        assert_eq!(TrackId::from_value(&json!([1])), None);
    }

    #[test]
    fn test_track_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&TrackId::Number(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&TrackId::Text("x".to_string())).unwrap(),
            "\"x\""
        );
    }

    #[test]
    fn test_summary() {
        let track = Track {
            active: true,
            title: Some("Song".to_string()),
            artist: vec!["A".to_string(), "B".to_string()],
            ..Default::default()
        };
        assert_eq!(track.summary(), "A, B - Song");
        assert_eq!(Track::inactive().summary(), "알 수 없음 - 알 수 없음");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(200), "3:20");
        assert_eq!(format_seconds(-5), "0:00");
    }
}
