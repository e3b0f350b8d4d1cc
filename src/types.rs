#![forbid(unsafe_code)]

//! Core domain types for versionbump
//!
//! `Version` is the `MAJOR.MINOR.PATCH[-dev.N]` value stored in both the
//! metadata document and the constant file. Parsing, formatting and the bump
//! arithmetic all live here.

use crate::error::VersionError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Version grammar: `^\d+\.\d+\.\d+(-dev\.\d+)?$`, restricted to ASCII digits
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-dev\.([0-9]+))?$")
        .expect("version pattern is a valid regex")
});

/// Release component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum BumpLevel {
    Major,
    Minor,
    #[default]
    Patch,
}

impl BumpLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A semantic version with an optional `-dev.N` prerelease counter
///
/// A version without a prerelease counter is a stable release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<u64>,
}

impl Version {
    /// Creates a stable release version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Returns a copy with the given prerelease counter
    pub const fn with_prerelease(self, counter: u64) -> Self {
        Version {
            prerelease: Some(counter),
            ..self
        }
    }

    /// Parses `MAJOR.MINOR.PATCH[-dev.N]`
    ///
    /// Leading zeros are accepted but not preserved by formatting.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidFormat(text.to_string());
        let caps = VERSION_PATTERN.captures(text).ok_or_else(invalid)?;

        let number = |index: usize| -> Result<u64, VersionError> {
            caps[index].parse::<u64>().map_err(|_| invalid())
        };

        let prerelease = match caps.get(4) {
            Some(m) => Some(m.as_str().parse::<u64>().map_err(|_| invalid())?),
            None => None,
        };

        Ok(Version {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            prerelease,
        })
    }

    /// The release triplet with any prerelease counter dropped
    pub const fn release(&self) -> Self {
        Version::new(self.major, self.minor, self.patch)
    }

    pub const fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Increments one release component, zeroing the lower ones
    ///
    /// The prerelease counter is always discarded.
    pub fn bump_release(&self, level: BumpLevel) -> Result<Self, VersionError> {
        let base = self.release();
        let bumped = match level {
            BumpLevel::Major => Version::new(self.increment(base.major, "major")?, 0, 0),
            BumpLevel::Minor => {
                Version::new(base.major, self.increment(base.minor, "minor")?, 0)
            }
            BumpLevel::Patch => Version::new(
                base.major,
                base.minor,
                self.increment(base.patch, "patch")?,
            ),
        };
        Ok(bumped)
    }

    /// Starts (`-dev.0`) or advances (`-dev.N+1`) the prerelease counter
    ///
    /// Release components are never changed.
    pub fn bump_prerelease(&self) -> Result<Self, VersionError> {
        let next = match self.prerelease {
            Some(counter) => self.increment(counter, "prerelease")?,
            None => 0,
        };
        Ok(self.with_prerelease(next))
    }

    fn increment(&self, value: u64, component: &'static str) -> Result<u64, VersionError> {
        value.checked_add(1).ok_or_else(|| VersionError::Overflow {
            component,
            version: self.to_string(),
        })
    }
}

/// Parses `text` and increments its release level, returning canonical text
pub fn bump_release_str(text: &str, level: BumpLevel) -> Result<String, VersionError> {
    Ok(Version::parse(text)?.bump_release(level)?.to_string())
}

/// Parses `text` and increments its prerelease counter, returning canonical text
pub fn bump_prerelease_str(text: &str) -> Result<String, VersionError> {
    Ok(Version::parse(text)?.bump_prerelease()?.to_string())
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(counter) = self.prerelease {
            write!(f, "-dev.{}", counter)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Version::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
