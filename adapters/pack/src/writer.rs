//! Lays a [`VirtualPack`] out on disk.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{templates::PACK_MCMETA, virtual_pack::VirtualPack};

/// Namespace root every pack file below `assets/` lives in.
pub const ASSETS_ROOT: &str = "assets/minecraft";

/// Replaces `<output_root>/<pack name>` with the pack contents.
///
/// Returns the directory the pack was written to.
pub fn write_virtual_pack(pack: &VirtualPack, output_root: &Path) -> Result<PathBuf> {
    let pack_dir = output_root.join(&pack.name);
    if pack_dir.exists() {
        fs::remove_dir_all(&pack_dir)
            .with_context(|| format!("failed to clear {}", pack_dir.display()))?;
    }
    fs::create_dir_all(&pack_dir)
        .with_context(|| format!("failed to create {}", pack_dir.display()))?;

    write_json(&pack_dir.join(PACK_MCMETA), &pack.pack_mcmeta)?;

    let assets = pack_dir.join(ASSETS_ROOT);
    write_json_tree(&assets.join("items"), &pack.items)?;
    write_json_tree(&assets.join("models"), &pack.models)?;
    write_binary_tree(&assets.join("textures"), &pack.textures)?;

    log::info!("resource pack saved to {}", pack_dir.display());
    Ok(pack_dir)
}

/// Writes `value` as 4-space-indented UTF-8 JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialize {}", path.display()))?;

    write_bytes(path, &buffer)
}

fn write_json_tree<T: Serialize>(base: &Path, entries: &BTreeMap<String, T>) -> Result<()> {
    for (relative, payload) in entries {
        write_json(&base.join(relative), payload)?;
    }
    log::debug!("wrote {} files below {}", entries.len(), base.display());
    Ok(())
}

fn write_binary_tree(base: &Path, entries: &BTreeMap<String, Vec<u8>>) -> Result<()> {
    for (relative, payload) in entries {
        write_bytes(&base.join(relative), payload)?;
    }
    log::debug!("wrote {} files below {}", entries.len(), base.display());
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
