use crate::domain::Version;
use crate::error::{Result, TagstampError};
use std::fmt;

/// Represents a git tag that carries a semantic version
///
/// The prefix is everything before the first digit ("v", "release-", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub prefix: String,
    pub version: Version,
}

impl Tag {
    /// Parse a tag name (e.g., "v1.2.3" -> prefix "v", version 1.2.3)
    pub fn parse(name: &str) -> Result<Self> {
        let split_at = name.find(|c: char| c.is_ascii_digit()).ok_or_else(|| {
            TagstampError::version(format!("Tag '{}' contains no version number", name))
        })?;
        let (prefix, version_part) = name.split_at(split_at);

        Ok(Tag {
            name: name.to_string(),
            prefix: prefix.to_string(),
            version: Version::parse(version_part)?,
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Structured output of `git describe --tags --long`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Describe {
    /// Nearest reachable tag name
    pub tag: String,
    /// Commits between the tag and HEAD
    pub distance: u32,
    /// Abbreviated HEAD commit id
    pub hash: String,
    /// Working tree has uncommitted changes
    pub dirty: bool,
}

impl Describe {
    /// Parse the long describe format: `<tag>-<distance>-g<hash>[<dirty_suffix>]`
    pub fn parse_long(raw: &str, dirty_suffix: &str) -> Result<Self> {
        let raw = raw.trim();
        let (body, dirty) = match raw.strip_suffix(dirty_suffix) {
            Some(body) if !dirty_suffix.is_empty() => (body, true),
            _ => (raw, false),
        };

        let mut parts = body.rsplitn(3, '-');
        let hash = parts.next().and_then(|h| h.strip_prefix('g'));
        let distance = parts.next().and_then(|d| d.parse::<u32>().ok());
        let tag = parts.next().filter(|t| !t.is_empty());

        match (tag, distance, hash) {
            (Some(tag), Some(distance), Some(hash)) => Ok(Describe {
                tag: tag.to_string(),
                distance,
                hash: hash.to_string(),
                dirty,
            }),
            _ => Err(TagstampError::git_unavailable(format!(
                "Unexpected describe output: '{}'",
                raw
            ))),
        }
    }

    /// True when HEAD is exactly at the tag with a clean working tree
    pub fn is_exact(&self) -> bool {
        self.distance == 0 && !self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parse() {
        let tag = Tag::parse("v1.2.3").unwrap();
        assert_eq!(tag.prefix, "v");
        assert_eq!(tag.version, Version::new(1, 2, 3));
    }

    #[test]
    fn test_tag_parse_custom_prefix() {
        let tag = Tag::parse("release-2.0.0-rc.1").unwrap();
        assert_eq!(tag.prefix, "release-");
        assert_eq!(tag.version.prerelease.as_deref(), Some("rc.1"));
    }

    #[test]
    fn test_tag_parse_no_prefix() {
        let tag = Tag::parse("0.4.0").unwrap();
        assert_eq!(tag.prefix, "");
        assert_eq!(tag.version, Version::new(0, 4, 0));
    }

    #[test]
    fn test_tag_round_trip() {
        for name in ["v1.2.3", "V0.0.1", "release-1.0.0+meta", "pkg/v3.1.4-beta.2"] {
            assert_eq!(Tag::parse(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_tag_parse_invalid() {
        assert!(Tag::parse("latest").is_err());
        assert!(Tag::parse("v1.2").is_err());
        assert!(Tag::parse("").is_err());
    }

    #[test]
    fn test_describe_parse_exact() {
        let d = Describe::parse_long("v1.2.3-0-gabc1234", "-dirty").unwrap();
        assert_eq!(d.tag, "v1.2.3");
        assert_eq!(d.distance, 0);
        assert_eq!(d.hash, "abc1234");
        assert!(!d.dirty);
        assert!(d.is_exact());
    }

    #[test]
    fn test_describe_parse_hyphenated_tag_and_dirty() {
        let d = Describe::parse_long("v2.0.0-rc.1-5-g0123abc-dirty\n", "-dirty").unwrap();
        assert_eq!(d.tag, "v2.0.0-rc.1");
        assert_eq!(d.distance, 5);
        assert_eq!(d.hash, "0123abc");
        assert!(d.dirty);
        assert!(!d.is_exact());
    }

    #[test]
    fn test_describe_parse_garbage() {
        assert!(Describe::parse_long("v1.2.3", "-dirty").is_err());
        assert!(Describe::parse_long("-3-gabc", "-dirty").is_err());
    }
}
