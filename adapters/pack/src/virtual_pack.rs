//! In-memory representation of a resource pack before it is written to disk.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::{item_state::ItemState, metadata::PackMcmeta};

/// Pack contents keyed by path relative to `assets/minecraft/<kind>/`.
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualPack {
    /// Directory name of the pack, which doubles as its template name.
    pub name: String,
    /// Contents of `pack.mcmeta`.
    pub pack_mcmeta: PackMcmeta,
    /// Item-state files below `items/`.
    pub items: BTreeMap<String, ItemState>,
    /// Model files below `models/`.
    pub models: BTreeMap<String, Value>,
    /// Raw texture files below `textures/`.
    pub textures: BTreeMap<String, Vec<u8>>,
}

/// Reasons a virtual pack is refused before writing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PackValidationError {
    /// Resource locations must be lowercase.
    #[error("texture path must be lowercase: {0}")]
    UppercaseTexturePath(String),
    /// Item models cannot sample the block atlas.
    #[error("item model {model} uses block atlas texture reference: {texture}")]
    BlockAtlasTexture {
        /// Model path that holds the reference.
        model: String,
        /// Offending texture reference.
        texture: String,
    },
}

impl VirtualPack {
    /// Creates an empty pack with the given name and metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, pack_mcmeta: PackMcmeta) -> Self {
        Self {
            name: name.into(),
            pack_mcmeta,
            items: BTreeMap::new(),
            models: BTreeMap::new(),
            textures: BTreeMap::new(),
        }
    }

    /// Lowercase form of the name used inside resource locations.
    #[must_use]
    pub fn resource_key(&self) -> String {
        resource_key(&self.name)
    }

    /// Name shown to players, with underscores replaced by spaces.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }

    /// Checks texture paths and model texture references.
    pub fn validate(&self) -> Result<(), PackValidationError> {
        if let Some(path) = self
            .textures
            .keys()
            .find(|path| path.to_lowercase() != **path)
        {
            return Err(PackValidationError::UppercaseTexturePath(path.clone()));
        }

        for (model, payload) in &self.models {
            let Some(textures) = payload.get("textures").and_then(Value::as_object) else {
                continue;
            };
            for texture in textures.values().filter_map(Value::as_str) {
                if texture.starts_with("block/") {
                    return Err(PackValidationError::BlockAtlasTexture {
                        model: model.clone(),
                        texture: texture.to_owned(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Lowercase form of a pack name used inside resource locations.
#[must_use]
pub fn resource_key(pack_name: &str) -> String {
    pack_name.to_lowercase()
}
