//! Device identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel for requests that did not identify their device
const UNKNOWN: &str = "unknown";

/// Reserved identifier for the browser-extension client class, which is
/// excluded from audit logging by agreement rather than by error.
const EXTENSION: &str = "extension";

/// Identifier of the device that submitted a query
///
/// Defaults to the `"unknown"` sentinel when the caller sent none. Sentinel
/// values suppress audit logging; see [`DeviceId::is_loggable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Create a device id from raw text, trimming whitespace.
    /// Blank input collapses to the unknown sentinel.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            Self::unknown()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Create a device id from an optional value, applying the sentinel
    /// default for absent callers.
    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map_or_else(Self::unknown, Self::new)
    }

    /// The sentinel id for unidentified devices
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    /// Whether moderation decisions from this device may be audit-logged.
    ///
    /// False for the unknown sentinel and for the reserved extension id;
    /// this is a privacy/volume filter, not an error condition.
    pub fn is_loggable(&self) -> bool {
        self.0 != UNKNOWN && self.0 != EXTENSION
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
