use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::{DELIMITER, NAME_MAX_LEN, PACK_TEXT_MAX_LEN};

/// Characters that would break the line format if they appeared in a field.
const FORBIDDEN_CHARS: &[char] = &[DELIMITER, '\n', '\r', '\0'];

fn validate_field(field: &'static str, value: &str, max: usize) -> Result<(), TypeError> {
    if value.is_empty() {
        return Err(TypeError::Empty { field });
    }
    if value.len() > max {
        return Err(TypeError::TooLong {
            field,
            len: value.len(),
            max,
        });
    }
    if let Some(ch) = value.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(TypeError::ForbiddenChar { field, ch });
    }
    Ok(())
}

/// A single leaderboard record.
///
/// The name is the identity key (case-sensitive, exact match). A
/// `LeaderboardEntry` can only be built through [`LeaderboardEntry::new`],
/// so its name is always non-empty, at most [`NAME_MAX_LEN`] bytes, and free
/// of the delimiter and line breaks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LeaderboardEntryFields")]
pub struct LeaderboardEntry {
    name: String,
    score: i32,
}

impl LeaderboardEntry {
    /// Create a validated entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use highscore_types::LeaderboardEntry;
    ///
    /// assert!(LeaderboardEntry::new("Hello World", 12345).is_ok());
    /// assert!(LeaderboardEntry::new("", 1).is_err());
    /// assert!(LeaderboardEntry::new("a~b", 1).is_err());
    /// ```
    pub fn new(name: impl Into<String>, score: i32) -> Result<Self, TypeError> {
        let name = name.into();
        validate_field("name", &name, NAME_MAX_LEN)?;
        Ok(Self { name, score })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Unvalidated wire form; deserialization goes through [`LeaderboardEntry::new`].
#[derive(Deserialize)]
struct LeaderboardEntryFields {
    name: String,
    score: i32,
}

impl TryFrom<LeaderboardEntryFields> for LeaderboardEntry {
    type Error = TypeError;

    fn try_from(fields: LeaderboardEntryFields) -> Result<Self, TypeError> {
        Self::new(fields.name, fields.score)
    }
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.score)
    }
}

/// A single line of a pack feed. Duplicates are allowed; there is no key.
///
/// The text is 1..=[`PACK_TEXT_MAX_LEN`] bytes, free of the delimiter and
/// line breaks, and does not end with a space.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PackEntryFields")]
pub struct PackEntry {
    text: String,
}

impl PackEntry {
    pub fn new(text: impl Into<String>) -> Result<Self, TypeError> {
        let text = text.into();
        validate_field("text", &text, PACK_TEXT_MAX_LEN)?;
        // the text ends its line, and document lines are space-trimmed
        if text.ends_with(' ') {
            return Err(TypeError::TrailingSpace { field: "text" });
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Deserialize)]
struct PackEntryFields {
    text: String,
}

impl TryFrom<PackEntryFields> for PackEntry {
    type Error = TypeError;

    fn try_from(fields: PackEntryFields) -> Result<Self, TypeError> {
        Self::new(fields.text)
    }
}

impl fmt::Display for PackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_entries() {
        let e = LeaderboardEntry::new("alice", -5).unwrap();
        assert_eq!(e.name(), "alice");
        assert_eq!(e.score(), -5);
        assert!(LeaderboardEntry::new("x".repeat(NAME_MAX_LEN), i32::MAX).is_ok());
        assert!(PackEntry::new("x".repeat(PACK_TEXT_MAX_LEN)).is_ok());
    }

    #[test]
    fn reject_empty() {
        assert_eq!(
            LeaderboardEntry::new("", 0).unwrap_err(),
            TypeError::Empty { field: "name" }
        );
        assert_eq!(
            PackEntry::new("").unwrap_err(),
            TypeError::Empty { field: "text" }
        );
    }

    #[test]
    fn reject_too_long() {
        let err = LeaderboardEntry::new("x".repeat(NAME_MAX_LEN + 1), 0).unwrap_err();
        assert!(matches!(err, TypeError::TooLong { len: 17, max: 16, .. }));
        assert!(PackEntry::new("x".repeat(PACK_TEXT_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn length_is_counted_in_bytes() {
        // 6 x 3-byte characters = 18 bytes
        assert!(LeaderboardEntry::new("日本語日本語", 0).is_err());
        assert!(LeaderboardEntry::new("日本語", 0).is_ok());
    }

    #[test]
    fn reject_forbidden_chars() {
        assert_eq!(
            LeaderboardEntry::new("a~b", 0).unwrap_err(),
            TypeError::ForbiddenChar { field: "name", ch: '~' }
        );
        assert!(LeaderboardEntry::new("a\nb", 0).is_err());
        assert!(PackEntry::new("line\r").is_err());
        assert!(PackEntry::new("tilde~").is_err());
    }

    #[test]
    fn pack_text_may_not_end_with_space() {
        assert_eq!(
            PackEntry::new("hello ").unwrap_err(),
            TypeError::TrailingSpace { field: "text" }
        );
        assert!(PackEntry::new(" hello").is_ok());
        assert!(PackEntry::new("a b").is_ok());
    }

    #[test]
    fn serializes_as_json() {
        let e = LeaderboardEntry::new("bob", 7).unwrap();
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json, serde_json::json!({"name": "bob", "score": 7}));
    }

    #[test]
    fn deserializes_through_validation() {
        let e: LeaderboardEntry = serde_json::from_str(r#"{"name":"bob","score":-7}"#).unwrap();
        assert_eq!(e, LeaderboardEntry::new("bob", -7).unwrap());
        let p: PackEntry = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(p.text(), "hi");

        for bad in [
            r#"{"name":"","score":1}"#,
            r#"{"name":"a~b","score":1}"#,
            r#"{"name":"xxxxxxxxxxxxxxxxx","score":1}"#,
        ] {
            let err = serde_json::from_str::<LeaderboardEntry>(bad).unwrap_err();
            assert!(err.is_data(), "{bad}");
        }
        assert!(serde_json::from_str::<PackEntry>(r#"{"text":"hi "}"#).is_err());
        assert!(serde_json::from_str::<PackEntry>(r#"{"text":"a
b"}"#).is_err());
    }

    #[test]
    fn json_roundtrip() {
        let e = LeaderboardEntry::new("日本語", i32::MIN).unwrap();
        let back: LeaderboardEntry = serde_json::from_str(&serde_json::to_string(&e).unwrap()).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn display() {
        assert_eq!(LeaderboardEntry::new("bob", 7).unwrap().to_string(), "bob (7)");
        assert_eq!(PackEntry::new("hi").unwrap().to_string(), "hi");
    }
}
