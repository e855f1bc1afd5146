use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Collects every PNG below `root`, keyed by the path `relocate` derives from its components.
pub(crate) fn index_textures<F>(root: &Path, relocate: F) -> Result<BTreeMap<String, Vec<u8>>>
where
    F: Fn(&[String]) -> String,
{
    let mut textures = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("failed to walk textures below {}", root.display()))?;
        if !entry.file_type().is_file() || !is_png(entry.path()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{} escapes {}", entry.path().display(), root.display()))?;
        let components: Vec<String> = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();
        let bytes = fs::read(entry.path())
            .with_context(|| format!("failed to read texture {}", entry.path().display()))?;
        let key = relocate(&components);
        log::debug!("indexed texture {key}");
        let _ = textures.insert(key, bytes);
    }

    log::info!("indexed {} textures", textures.len());
    Ok(textures)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("png"))
}
