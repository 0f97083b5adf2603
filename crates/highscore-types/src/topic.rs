//! Topic identifiers.
//!
//! A topic selects exactly one persisted document. The leaderboard and pack
//! namespaces are disjoint and distinguished by a path prefix:
//!
//! - `highscore/<name>` (or a bare `<name>`) — a leaderboard document
//! - `pack/<name>` — a pack document
//!
//! Valid topic names:
//! - Must be non-empty and at most [`TOPIC_MAX_LEN`] bytes
//! - May only contain ASCII letters, digits, `-` and `_`
//!
//! In particular a name can never contain `.`, `/` or `\`, so it is always
//! safe to join onto a storage root.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TypeError;
use crate::TOPIC_MAX_LEN;

/// Which document family a topic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicKind {
    Leaderboard,
    Pack,
}

impl TopicKind {
    /// Path prefix of this namespace.
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Leaderboard => "highscore",
            Self::Pack => "pack",
        }
    }

    pub const ALL: [TopicKind; 2] = [TopicKind::Leaderboard, TopicKind::Pack];
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Validate a topic name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use highscore_types::topic::validate_topic_name;
///
/// assert!(validate_topic_name("tetris").is_ok());
/// assert!(validate_topic_name("level_2-hard").is_ok());
/// assert!(validate_topic_name("").is_err());
/// assert!(validate_topic_name("../etc").is_err());
/// ```
pub fn validate_topic_name(name: &str) -> Result<(), TypeError> {
    if name.is_empty() {
        return Err(TypeError::InvalidTopic {
            topic: name.to_string(),
            reason: "topic must not be empty".into(),
        });
    }

    if name.len() > TOPIC_MAX_LEN {
        return Err(TypeError::InvalidTopic {
            topic: name.to_string(),
            reason: format!("longer than {TOPIC_MAX_LEN} bytes"),
        });
    }

    if let Some(ch) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(TypeError::InvalidTopic {
            topic: name.to_string(),
            reason: format!("contains forbidden character: {ch:?}"),
        });
    }

    Ok(())
}

/// A validated, namespaced topic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Topic {
    kind: TopicKind,
    name: String,
}

impl Topic {
    pub fn new(kind: TopicKind, name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        validate_topic_name(&name)?;
        Ok(Self { kind, name })
    }

    pub fn leaderboard(name: impl Into<String>) -> Result<Self, TypeError> {
        Self::new(TopicKind::Leaderboard, name)
    }

    pub fn pack(name: impl Into<String>) -> Result<Self, TypeError> {
        Self::new(TopicKind::Pack, name)
    }

    /// Parse the prefixed form. A bare name is a leaderboard topic.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        match s.split_once('/') {
            Some((prefix, name)) => {
                let kind = TopicKind::ALL
                    .into_iter()
                    .find(|k| k.prefix() == prefix)
                    .ok_or_else(|| TypeError::InvalidTopic {
                        topic: s.to_string(),
                        reason: format!("unknown namespace {prefix:?}"),
                    })?;
                Self::new(kind, name)
            }
            None => Self::leaderboard(s),
        }
    }

    pub fn kind(&self) -> TopicKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Topic {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_names() {
        assert!(validate_topic_name("tetris").is_ok());
        assert!(validate_topic_name("Level_2-hard").is_ok());
        assert!(validate_topic_name(&"a".repeat(TOPIC_MAX_LEN)).is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(validate_topic_name("").is_err());
    }

    #[test]
    fn reject_too_long() {
        assert!(validate_topic_name(&"a".repeat(TOPIC_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn reject_traversal_and_separators() {
        assert!(validate_topic_name("..").is_err());
        assert!(validate_topic_name("a.b").is_err());
        assert!(validate_topic_name("a/b").is_err());
        assert!(validate_topic_name("a\\b").is_err());
        assert!(validate_topic_name("has space").is_err());
    }

    #[test]
    fn parse_prefixes() {
        let t = Topic::parse("pack/news").unwrap();
        assert_eq!(t.kind(), TopicKind::Pack);
        assert_eq!(t.name(), "news");

        let t = Topic::parse("highscore/tetris").unwrap();
        assert_eq!(t.kind(), TopicKind::Leaderboard);

        let t: Topic = "tetris".parse().unwrap();
        assert_eq!(t.kind(), TopicKind::Leaderboard);
        assert_eq!(t.name(), "tetris");
    }

    #[test]
    fn parse_rejects_unknown_namespace_and_nesting() {
        assert!(Topic::parse("scores/tetris").is_err());
        assert!(Topic::parse("pack/a/b").is_err());
        assert!(Topic::parse("pack/").is_err());
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(Topic::pack("news").unwrap().to_string(), "pack/news");
        assert_eq!(
            Topic::leaderboard("tetris").unwrap().to_string(),
            "highscore/tetris"
        );
    }

    proptest! {
        #[test]
        fn display_parse_roundtrip(name in "[A-Za-z0-9_-]{1,64}", pack in any::<bool>()) {
            let kind = if pack { TopicKind::Pack } else { TopicKind::Leaderboard };
            let topic = Topic::new(kind, name).unwrap();
            prop_assert_eq!(Topic::parse(&topic.to_string()).unwrap(), topic);
        }

        #[test]
        fn names_with_dots_never_validate(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}") {
            let name = format!("{prefix}.{suffix}");
            prop_assert!(validate_topic_name(&name).is_err());
        }
    }
}
