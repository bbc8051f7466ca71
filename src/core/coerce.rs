use serde::Deserialize;
use serde_json::Value;

/// Shapes the `artist` field arrives in from loosely typed upstream APIs.
///
/// - "A, B" → a comma separated string
/// - ["A", "B"] → a list of names
/// - anything else (null, numbers, objects) → no artists
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArtistField {
    Joined(String),
    List(Vec<Value>),
    Other(Value),
}

impl ArtistField {
    pub fn from_value(value: &Value) -> Self {
        // `Other` accepts any JSON value, so this cannot fail.
        ArtistField::deserialize(value).unwrap_or_else(|_| ArtistField::Other(value.clone()))
    }

    pub fn into_names(self) -> Vec<String> {
        match self {
            ArtistField::Joined(s) => s
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            ArtistField::List(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
            ArtistField::Other(_) => Vec::new(),
        }
    }
}

/// Coerces a JSON number or numeric string to an integer.
/// Fractional numbers are truncated toward zero.
pub fn coerce_int(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
                _ => Err(format!("{} is out of range", n)),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("{:?} is not an integer: {}", s, e)),
        other => Err(format!("expected a number, got {}", other)),
    }
}

/// Milliseconds to whole seconds, rounding toward negative infinity.
pub fn ms_to_seconds(ms: i64) -> i64 {
    ms.div_euclid(1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(value: Value) -> Vec<String> {
        ArtistField::from_value(&value).into_names()
    }

    #[test]
    fn test_artist_joined_string() {
        assert_eq!(names(json!("A, B ,C")), vec!["A", "B", "C"]);
        assert_eq!(names(json!("Solo")), vec!["Solo"]);
    }

    #[test]
    fn test_artist_joined_string_drops_empty_segments() {
        assert_eq!(names(json!(" , X,, ")), vec!["X"]);
        assert!(names(json!("")).is_empty());
    }

    #[test]
    fn test_artist_list_is_kept_in_order() {
        assert_eq!(names(json!(["A", "B"])), vec!["A", "B"]);
        assert!(names(json!([])).is_empty());
    }

    #[test]
    fn test_artist_other_shapes_are_empty() {
        assert!(names(json!(null)).is_empty());
        assert!(names(json!(42)).is_empty());
        assert!(names(json!({"name": "A"})).is_empty());
        assert_eq!(ArtistField::from_value(&json!(42)), ArtistField::Other(json!(42)));
    }

    #[test]
    fn test_coerce_int_numbers() {
        assert_eq!(coerce_int(&json!(180)), Ok(180));
        assert_eq!(coerce_int(&json!(180.9)), Ok(180));
        assert_eq!(coerce_int(&json!(-3)), Ok(-3));
    }

    #[test]
    fn test_coerce_int_strings() {
        assert_eq!(coerce_int(&json!("180")), Ok(180));
        assert_eq!(coerce_int(&json!(" 9000 ")), Ok(9000));
        assert!(coerce_int(&json!("abc")).is_err());
        assert!(coerce_int(&json!("1.5")).is_err());
    }

    #[test]
    fn test_coerce_int_rejects_other_types() {
        assert!(coerce_int(&json!(null)).is_err());
        assert!(coerce_int(&json!(true)).is_err());
        assert!(coerce_int(&json!([1])).is_err());
    }

    #[test]
    fn test_ms_to_seconds_floors() {
        assert_eq!(ms_to_seconds(200_000), 200);
        assert_eq!(ms_to_seconds(50_999), 50);
        assert_eq!(ms_to_seconds(999), 0);
        assert_eq!(ms_to_seconds(-1), -1);
    }
}
