//! Pieces shared by the analog and digital builders.

use accurate_clocks_core::{clock_model_name, FallbackMode, NormalizedCurve};
use accurate_clocks_system_thresholds::build_threshold_tables;
use anyhow::{Context, Result};
use rand::RngCore;
use serde_json::Value;

use crate::{
    analog::build_analog_pack,
    digital::build_digital_pack,
    item_state::clock_item_state,
    metadata::PackMcmeta,
    templates::{ClockKind, TemplatePack},
    virtual_pack::{resource_key, VirtualPack},
};

/// File name of the clock item state inside `items/`.
pub const CLOCK_ITEM: &str = "clock.json";

const CLOCK_TEXTURE_ROOT: &str = "item/clock/";
const BLOCK_TEXTURE_ROOT: &str = "block/";

/// Resource locations of one variant, all nested below its resource key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantPaths {
    key: String,
}

impl VariantPaths {
    /// Paths for the pack with the given name.
    #[must_use]
    pub fn new(pack_name: &str) -> Self {
        Self {
            key: resource_key(pack_name),
        }
    }

    /// Lowercase resource key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Texture location prefix without a trailing slash, e.g. `item/clock/<key>`.
    #[must_use]
    pub fn texture_prefix(&self) -> String {
        format!("{CLOCK_TEXTURE_ROOT}{}", self.key)
    }

    /// Directory of generated models relative to `models/`, with a trailing slash.
    #[must_use]
    pub fn models_dir(&self) -> String {
        format!("{CLOCK_TEXTURE_ROOT}{}/", self.key)
    }

    /// File path of the shared parent model relative to `models/`.
    #[must_use]
    pub fn parent_model_file(&self) -> String {
        format!("{}clock_template.json", self.models_dir())
    }

    /// Namespaced reference to the shared parent model.
    #[must_use]
    pub fn parent_model_reference(&self) -> String {
        format!("minecraft:{}clock_template", self.models_dir())
    }

    /// File path of the model for a displayed time relative to `models/`.
    #[must_use]
    pub fn time_model_file(&self, hour: u32, minute: u32) -> String {
        format!("{}.json", clock_model_name(&self.models_dir(), hour, minute))
    }

    /// Reference used by range dispatch entries for a displayed time.
    #[must_use]
    pub fn time_model_reference(&self, hour: u32, minute: u32) -> String {
        clock_model_name(&self.models_dir(), hour, minute)
    }

    /// Re-roots a template texture reference into this variant's namespace.
    ///
    /// `item/clock/X` becomes `item/clock/<key>/X`, block-atlas references fall
    /// back to the variant background, and anything else is kept.
    #[must_use]
    pub fn relocate_texture_reference(&self, reference: &str) -> String {
        if let Some(suffix) = reference.strip_prefix(CLOCK_TEXTURE_ROOT) {
            format!("{}/{suffix}", self.texture_prefix())
        } else if reference.starts_with(BLOCK_TEXTURE_ROOT) {
            format!("{}/bg", self.texture_prefix())
        } else {
            reference.to_owned()
        }
    }

    /// Copies a model template and re-roots every string in its `textures` map.
    #[must_use]
    pub fn parent_model(&self, template: &Value) -> Value {
        let mut parent = template.clone();
        if let Some(textures) = parent.get_mut("textures").and_then(Value::as_object_mut) {
            for reference in textures.values_mut() {
                if let Some(path) = reference.as_str() {
                    *reference = Value::String(self.relocate_texture_reference(path));
                }
            }
        }
        parent
    }
}

/// Builds the pack for a template using the builder registered for its kind.
pub fn build_variant(
    template: &TemplatePack,
    curve: &NormalizedCurve,
    rng: &mut dyn RngCore,
) -> Result<VirtualPack> {
    let Some(kind) = template.kind() else {
        anyhow::bail!(
            "no builder registered for meta_type '{}'",
            template.meta_type
        );
    };

    log::info!("building {} ({})", template.name, kind.meta_type());
    let pack = match kind {
        ClockKind::Analog => build_analog_pack(template, curve, rng),
        ClockKind::Digital => build_digital_pack(template, curve, rng),
    }
    .with_context(|| format!("failed to build template {}", template.name))?;

    pack.validate()
        .with_context(|| format!("template {} produced an invalid pack", template.name))?;
    Ok(pack)
}

/// Empty variant pack carrying metadata derived from the template.
pub(crate) fn start_variant(template: &TemplatePack, kind: ClockKind) -> Result<VirtualPack> {
    let meta = template.load_meta()?;
    Ok(VirtualPack::new(
        template.name.clone(),
        PackMcmeta::new(Some(kind.meta_type().to_owned()), meta.description()),
    ))
}

/// Adds the clock item state driven by the curve.
pub(crate) fn insert_clock_item(
    pack: &mut VirtualPack,
    paths: &VariantPaths,
    curve: &NormalizedCurve,
    fallback_mode: FallbackMode,
    rng: &mut dyn RngCore,
) {
    let tables = build_threshold_tables(
        curve,
        |hour, minute| paths.time_model_reference(hour, minute),
        fallback_mode,
        rng,
    );
    let _ = pack
        .items
        .insert(CLOCK_ITEM.to_owned(), clock_item_state(&tables));
    log::info!("built item state for {}", pack.name);
}
