use crate::error::{Result, TagstampError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// The accepted grammar is Semantic Versioning 2.0.0 (as implemented by the
/// `semver` crate), optionally preceded by a `v` or `V`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a version string (e.g., "v1.2.3-rc.1+build.5")
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let clean = trimmed
            .strip_prefix(|c: char| c == 'v' || c == 'V')
            .unwrap_or(trimmed);

        let parsed = semver::Version::parse(clean)
            .map_err(|e| TagstampError::version(format!("'{}': {}", input, e)))?;

        Ok(Version::from(parsed))
    }

    /// Bump version according to bump type
    ///
    /// Lower components reset to zero; prerelease and build metadata are dropped.
    /// Fails with `MalformedVersion` when the bumped component would overflow.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let increment = |component: u64, name: &str| {
            component.checked_add(1).ok_or_else(|| {
                TagstampError::version(format!("cannot bump {} of {}: overflow", name, self))
            })
        };

        Ok(match bump_type {
            VersionBump::Major => Version::new(increment(self.major, "major")?, 0, 0),
            VersionBump::Minor => Version::new(self.major, increment(self.minor, "minor")?, 0),
            VersionBump::Patch => {
                Version::new(self.major, self.minor, increment(self.patch, "patch")?)
            }
        })
    }
}

impl From<semver::Version> for Version {
    fn from(v: semver::Version) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Version {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            prerelease: non_empty(v.pre.as_str()),
            build: non_empty(v.build.as_str()),
        }
    }
}

impl FromStr for Version {
    type Err = TagstampError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Compare prerelease identifiers by SemVer precedence; a release outranks any prerelease.
fn compare_prerelease(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (semver::Prerelease::new(a), semver::Prerelease::new(b)) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => a.cmp(b),
        },
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| {
                compare_prerelease(self.prerelease.as_deref(), other.prerelease.as_deref())
            })
            // build metadata has no precedence; only keeps Ord consistent with Eq
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl FromStr for VersionBump {
    type Err = TagstampError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(TagstampError::version(format!(
                "Unknown bump type: '{}'",
                other
            ))),
        }
    }
}
