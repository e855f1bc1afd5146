//! Digital clocks: one model per minute that swaps hour and minute digit textures.

use std::path::Path;

use accurate_clocks_core::{ClockTime, FallbackMode, NormalizedCurve};
use anyhow::{bail, Context, Result};
use rand::RngCore;
use serde_json::{json, Value};

use crate::{
    templates::{load_json_template, ClockKind, TemplatePack, MODELS_DIR, TEXTURES_DIR},
    textures::index_textures,
    variant::{insert_clock_item, start_variant, VariantPaths},
    virtual_pack::VirtualPack,
};

const CLOCK_TEXTURES: &str = "item/clock";

/// Model for one displayed time, pointing at the hour and both minute digits.
#[must_use]
pub fn digit_model(paths: &VariantPaths, time: ClockTime) -> Value {
    let prefix = paths.texture_prefix();
    let minute = time.minute();
    json!({
        "parent": paths.parent_model_reference(),
        "textures": {
            "hour": format!("{prefix}/h/{}", time.hour()),
            "min1": format!("{prefix}/m1/{}", minute / 10),
            "min0": format!("{prefix}/m0/{}", minute % 10),
        }
    })
}

/// Builds a digital variant pack from its template directory.
pub fn build_digital_pack(
    template: &TemplatePack,
    curve: &NormalizedCurve,
    rng: &mut dyn RngCore,
) -> Result<VirtualPack> {
    let mut pack = start_variant(template, ClockKind::Digital)?;
    let paths = VariantPaths::new(&pack.name);

    let textures_dir = template.dir.join(TEXTURES_DIR).join(CLOCK_TEXTURES);
    if !textures_dir.is_dir() {
        bail!("missing textures directory: {}", textures_dir.display());
    }
    pack.textures = index_textures(&textures_dir, |parts| {
        format!("{}/{}", paths.texture_prefix(), parts.join("/"))
    })?;

    let template_model = load_digit_template(&template.dir.join(MODELS_DIR))
        .with_context(|| format!("failed to load model template for {}", template.name))?;
    let _ = pack
        .models
        .insert(paths.parent_model_file(), paths.parent_model(&template_model));
    for time in ClockTime::every_minute() {
        let _ = pack.models.insert(
            paths.time_model_file(time.hour(), time.minute()),
            digit_model(&paths, time),
        );
    }
    log::info!("built {} digital models for {}", pack.models.len(), pack.name);

    insert_clock_item(&mut pack, &paths, curve, FallbackMode::Shuffle, rng);
    Ok(pack)
}

fn load_digit_template(models_dir: &Path) -> Result<Value> {
    Ok(load_json_template(&models_dir.join("clock_template.json"))?)
}
