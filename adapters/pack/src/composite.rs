//! Builds every variant and merges them into one pack keyed by item name.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use accurate_clocks_core::NormalizedCurve;
use anyhow::{bail, Context, Result};
use rand::RngCore;
use serde_json::Value;

use crate::{
    item_state::{named_variant_item_state, SelectCase},
    metadata::PackMcmeta,
    templates::{discover_templates, TemplatePack},
    variant::{build_variant, CLOCK_ITEM},
    virtual_pack::VirtualPack,
    writer::write_virtual_pack,
};

/// File the icon is copied to inside the composite pack.
pub const PACK_ICON: &str = "pack.png";

/// Locations and labels used for a full build.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeSettings {
    /// Directory holding one sub-directory per template.
    pub input_dir: PathBuf,
    /// Directory the variant packs and the composite pack are written to.
    pub output_dir: PathBuf,
    /// Directory name of the composite pack.
    pub composite_name: String,
    /// Image copied to `pack.png` of the composite pack.
    pub icon_path: PathBuf,
    /// Description shown for the composite pack.
    pub description: Value,
}

/// Builds, writes and merges all templates below `settings.input_dir`.
///
/// Returns the composite directory, or `None` when nothing could be built.
pub fn build_composite_pack(
    settings: &CompositeSettings,
    curve: &NormalizedCurve,
    rng: &mut dyn RngCore,
) -> Result<Option<PathBuf>> {
    let templates = discover_templates(&settings.input_dir)?;
    if templates.is_empty() {
        log::warn!("no templates found in {}", settings.input_dir.display());
        return Ok(None);
    }

    let variants = build_templates(&templates, curve, rng);
    if variants.is_empty() {
        log::warn!("no templates built successfully");
        return Ok(None);
    }

    for variant in &variants {
        let _ = write_virtual_pack(variant, &settings.output_dir)?;
    }

    let composite = merge_variants(
        &settings.composite_name,
        settings.description.clone(),
        &variants,
    );
    if !settings.icon_path.is_file() {
        bail!("missing pack icon: {}", settings.icon_path.display());
    }
    log::info!("assembling {}", composite.name);
    let composite_dir = write_virtual_pack(&composite, &settings.output_dir)?;
    copy_icon(&settings.icon_path, &composite_dir.join(PACK_ICON))?;

    log::info!(
        "{} generated with {} variants",
        composite.name,
        variants.len()
    );
    Ok(Some(composite_dir))
}

/// Builds each template, logging and skipping those that fail.
pub fn build_templates(
    templates: &[TemplatePack],
    curve: &NormalizedCurve,
    rng: &mut dyn RngCore,
) -> Vec<VirtualPack> {
    let mut built = Vec::with_capacity(templates.len());
    for template in templates {
        match build_variant(template, curve, rng) {
            Ok(pack) => built.push(pack),
            Err(error) => log::error!("skipping {}: {error:#}", template.name),
        }
    }
    built
}

/// Merges variant models and textures and selects between variants by custom name.
///
/// Later variants overwrite earlier files at the same path.
#[must_use]
pub fn merge_variants(name: &str, description: Value, variants: &[VirtualPack]) -> VirtualPack {
    let mut composite = VirtualPack::new(name, PackMcmeta::new(None, description));
    let mut cases = Vec::with_capacity(variants.len());

    for variant in variants {
        let Some(clock) = variant.items.get(CLOCK_ITEM) else {
            log::warn!("{}: missing {CLOCK_ITEM}, skipping from composite", variant.name);
            continue;
        };
        cases.push(SelectCase {
            when: variant.display_name(),
            model: clock.model.clone(),
        });

        merge_files(&mut composite.models, &variant.models, &variant.name, "models");
        merge_files(&mut composite.textures, &variant.textures, &variant.name, "textures");
    }

    let _ = composite
        .items
        .insert(CLOCK_ITEM.to_owned(), named_variant_item_state(cases));
    composite
}

fn merge_files<T: Clone>(
    target: &mut BTreeMap<String, T>,
    source: &BTreeMap<String, T>,
    variant: &str,
    kind: &str,
) {
    for (path, payload) in source {
        if target.insert(path.clone(), payload.clone()).is_some() {
            log::warn!("overwriting {kind}/{path} with {variant}");
        }
    }
}

fn copy_icon(icon: &Path, destination: &Path) -> Result<()> {
    let _ = fs::copy(icon, destination).with_context(|| {
        format!(
            "failed to copy {} to {}",
            icon.display(),
            destination.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_state::{ItemModel, ItemState};
    use serde_json::json;

    fn variant(name: &str, model: &str) -> VirtualPack {
        let meta = PackMcmeta::new(Some("digital".to_owned()), json!(""));
        let mut pack = VirtualPack::new(name, meta);
        let _ = pack.items.insert(
            CLOCK_ITEM.to_owned(),
            ItemState {
                model: ItemModel::model(model),
            },
        );
        let _ = pack
            .models
            .insert("item/clock/shared.json".to_owned(), json!({"owner": name}));
        let _ = pack
            .textures
            .insert(format!("item/clock/{}/bg.png", name.to_lowercase()), vec![1]);
        pack
    }

    #[test]
    fn merge_selects_variants_by_display_name() {
        let variants = [variant("Giant_Analog", "a"), variant("Square_Digital", "b")];
        let composite = merge_variants("AccurateClocks", json!("desc"), &variants);

        let clock = composite.items.get(CLOCK_ITEM).expect("combined clock item");
        let ItemModel::Select { cases, component, .. } = &clock.model else {
            panic!("combined clock must select on the custom name");
        };
        let names: Vec<&str> = cases.iter().map(|case| case.when.as_str()).collect();
        assert_eq!(names, ["Giant Analog", "Square Digital"]);
        assert_eq!(component.as_deref(), Some("minecraft:custom_name"));
        assert_eq!(cases[1].model, ItemModel::model("b"));
    }

    #[test]
    fn merge_keeps_last_writer_and_all_textures() {
        let variants = [variant("One", "a"), variant("Two", "b")];
        let composite = merge_variants("AccurateClocks", json!(""), &variants);

        assert_eq!(
            composite.models.get("item/clock/shared.json"),
            Some(&json!({"owner": "Two"})),
            "later variant should overwrite shared model"
        );
        assert_eq!(composite.textures.len(), 2);
        assert!(composite.pack_mcmeta.meta_type.is_none());
    }

    #[test]
    fn merge_skips_variants_without_clock_item() {
        let mut bare = variant("Bare", "x");
        bare.items.clear();
        let variants = [bare, variant("Kept", "k")];
        let composite = merge_variants("AccurateClocks", json!(""), &variants);

        let clock = composite.items.get(CLOCK_ITEM).expect("combined clock item");
        let ItemModel::Select { cases, .. } = &clock.model else {
            panic!("combined clock must select on the custom name");
        };
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].when, "Kept");
    }
}
