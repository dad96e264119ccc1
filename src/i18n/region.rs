//! Region type: the two locale variants the page can be shown in.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Directory (relative to the site root) holding the dictionary files
pub const RESOURCE_DIR: &str = "components";

/// A supported region.
///
/// The page defaults to Singapore; Malaysia is the only alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Malaysia
    MY,
    /// Singapore
    #[default]
    SG,
}

impl Region {
    /// Both regions, in toggle-label order
    pub const ALL: [Region; 2] = [Region::MY, Region::SG];

    /// Code as persisted and shown on the toggle slider ("MY" / "SG")
    pub fn code(&self) -> &'static str {
        match self {
            Region::MY => "MY",
            Region::SG => "SG",
        }
    }

    /// The other region
    pub fn toggled(&self) -> Region {
        match self {
            Region::MY => Region::SG,
            Region::SG => Region::MY,
        }
    }

    /// File name of this region's dictionary
    pub fn resource_file(&self) -> &'static str {
        match self {
            Region::MY => "i18n-zh-my.json",
            Region::SG => "i18n-zh-sg.json",
        }
    }

    /// Path of the dictionary relative to the site root,
    /// e.g. `components/i18n-zh-sg.json`
    pub fn resource_path(&self) -> String {
        format!("{}/{}", RESOURCE_DIR, self.resource_file())
    }

    /// Document title shown while this region is active
    pub fn page_title(&self) -> &'static str {
        match self {
            Region::MY => "自介 (华文，马来西亚)",
            Region::SG => "自介 (华文，新加坡)",
        }
    }

    /// Whether the toggle switch reads as "checked" (Singapore)
    pub fn is_checked(&self) -> bool {
        *self == Region::SG
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown region code: '{0}'")]
pub struct ParseRegionError(pub String);

impl FromStr for Region {
    type Err = ParseRegionError;

    /// Only the exact persisted codes are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MY" => Ok(Region::MY),
            "SG" => Ok(Region::SG),
            other => Err(ParseRegionError(other.to_string())),
        }
    }
}
