//! `pack.mcmeta` contents and the resource-format range the packs target.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Range of resource-pack formats a generated pack declares support for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceCompatibility {
    /// Lowest supported major format.
    pub min_major: u32,
    /// Lowest supported minor format.
    pub min_minor: u32,
    /// Highest supported major format.
    pub max_major: u32,
    /// Highest supported minor format.
    pub max_minor: u32,
    /// Legacy `pack_format` read by clients that ignore the range fields.
    pub fallback_pack_format: u32,
}

/// Formats 55.0 through 75.0, covering Java Edition 1.21.5 to 1.21.11.
pub const RESOURCE_COMPAT_1_21_5_TO_1_21_11: ResourceCompatibility = ResourceCompatibility {
    min_major: 55,
    min_minor: 0,
    max_major: 75,
    max_minor: 0,
    fallback_pack_format: 55,
};

/// The `pack` section of `pack.mcmeta`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackMeta {
    /// Text component or plain string shown in the pack list.
    pub description: Value,
    /// Legacy single format number.
    pub pack_format: u32,
    /// Inclusive major format range for older clients.
    pub supported_formats: [u32; 2],
    /// Lowest `[major, minor]` format supported.
    pub min_format: [u32; 2],
    /// Highest `[major, minor]` format supported.
    pub max_format: [u32; 2],
}

impl PackMeta {
    /// Builds the `pack` section for a description and compatibility range.
    #[must_use]
    pub fn new(description: Value, compatibility: ResourceCompatibility) -> Self {
        Self {
            description,
            pack_format: compatibility.fallback_pack_format,
            supported_formats: [compatibility.min_major, compatibility.max_major],
            min_format: [compatibility.min_major, compatibility.min_minor],
            max_format: [compatibility.max_major, compatibility.max_minor],
        }
    }
}

/// Full `pack.mcmeta` document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackMcmeta {
    /// Clock style a variant pack was built as; absent on the composite pack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_type: Option<String>,
    /// Pack section read by the client.
    pub pack: PackMeta,
}

impl PackMcmeta {
    /// Metadata targeting [`RESOURCE_COMPAT_1_21_5_TO_1_21_11`].
    #[must_use]
    pub fn new(meta_type: Option<String>, description: Value) -> Self {
        Self {
            meta_type,
            pack: PackMeta::new(description, RESOURCE_COMPAT_1_21_5_TO_1_21_11),
        }
    }
}
