//! Analog clocks: one model per minute with both hands rotated into place.
//!
//! Element rotations are limited to ±45 degrees, so a hand pointing further
//! away is first swapped for the same element taken from a template drawn in
//! the nearest quarter-turn, then rotated by the remainder.

use std::{collections::BTreeMap, path::Path};

use accurate_clocks_core::{ClockTime, FallbackMode, NormalizedCurve, MINUTES_PER_HOUR};
use anyhow::{bail, Context, Result};
use rand::RngCore;
use serde_json::{json, Map, Value};

use crate::{
    templates::{load_json_template, ClockKind, TemplatePack, MODELS_DIR, TEXTURES_DIR},
    textures::index_textures,
    variant::{insert_clock_item, start_variant, VariantPaths},
    virtual_pack::VirtualPack,
};

const HOUR_HAND: &str = "hand_hour";
const MINUTE_HAND: &str = "hand_minute";
const DEGREES_PER_MINUTE_OF_HOUR_HAND: f64 = 360.0 / 12.0 / 60.0;
const DEGREES_PER_MINUTE: f64 = 360.0 / 60.0;

/// Quarter-turn orientation a template draws its hands in, counter-clockwise from up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Hands point up.
    Up,
    /// Hands point left.
    Left,
    /// Hands point down.
    Down,
    /// Hands point right.
    Right,
}

impl Quadrant {
    /// Base angle of the quadrant in degrees.
    #[must_use]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Up => 0,
            Self::Left => 90,
            Self::Down => 180,
            Self::Right => 270,
        }
    }
}

/// Splits an angle into the nearest quadrant and a remainder in `[-45, 45)`.
#[must_use]
pub fn split_angle(angle: f64) -> (Quadrant, f64) {
    // Adding zero folds -0.0 into 0.0 so the written angle never carries a sign.
    let angle = angle.rem_euclid(360.0) + 0.0;
    if angle < 45.0 {
        (Quadrant::Up, angle)
    } else if angle < 135.0 {
        (Quadrant::Left, angle - 90.0)
    } else if angle < 225.0 {
        (Quadrant::Down, angle - 180.0)
    } else if angle < 315.0 {
        (Quadrant::Right, angle - 270.0)
    } else {
        (Quadrant::Up, angle - 360.0)
    }
}

/// Hour-hand and minute-hand angles, in degrees, for a displayed time.
#[must_use]
pub fn hand_angles(time: ClockTime) -> (f64, f64) {
    let hour = -f64::from(time.minute_of_day()) * DEGREES_PER_MINUTE_OF_HOUR_HAND;
    let minute = -f64::from(time.minute() % MINUTES_PER_HOUR) * DEGREES_PER_MINUTE;
    (hour, minute)
}

/// Texture overrides for night hours (18:00 through 05:59).
#[must_use]
pub fn night_textures(hour: u32, texture_prefix: &str, has_night_background: bool) -> Option<Value> {
    if (6..18).contains(&hour) {
        return None;
    }

    let mut overrides = Map::new();
    let _ = overrides.insert(
        "hands".to_owned(),
        Value::String(format!("{texture_prefix}/hands_night")),
    );
    if has_night_background {
        let background = format!("{texture_prefix}/bg_night");
        let _ = overrides.insert("face".to_owned(), Value::String(background.clone()));
        let _ = overrides.insert("particle".to_owned(), Value::String(background));
    }
    Some(Value::Object(overrides))
}

/// Model templates with the hands drawn in each quadrant.
#[derive(Clone, Debug, PartialEq)]
pub struct RotationTemplates {
    up: Value,
    left: Value,
    down: Value,
    right: Value,
}

impl RotationTemplates {
    /// Loads `clock_template{,_3,_6,_9}.json` from a template models directory.
    pub fn load(models_dir: &Path) -> Result<Self> {
        Ok(Self {
            up: load_json_template(&models_dir.join("clock_template.json"))?,
            right: load_json_template(&models_dir.join("clock_template_3.json"))?,
            down: load_json_template(&models_dir.join("clock_template_6.json"))?,
            left: load_json_template(&models_dir.join("clock_template_9.json"))?,
        })
    }

    /// Creates the set from already parsed templates.
    #[must_use]
    pub fn new(up: Value, left: Value, down: Value, right: Value) -> Self {
        Self {
            up,
            left,
            down,
            right,
        }
    }

    /// Template whose hands point up; every minute model starts from it.
    #[must_use]
    pub fn base(&self) -> &Value {
        &self.up
    }

    fn for_quadrant(&self, quadrant: Quadrant) -> &Value {
        match quadrant {
            Quadrant::Up => &self.up,
            Quadrant::Left => &self.left,
            Quadrant::Down => &self.down,
            Quadrant::Right => &self.right,
        }
    }

    /// Builds the model for one displayed time.
    pub fn time_model(
        &self,
        time: ClockTime,
        parent_reference: &str,
        texture_override: Option<Value>,
    ) -> Result<Value> {
        let mut elements = self
            .base()
            .get("elements")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));

        let (hour_angle, minute_angle) = hand_angles(time);
        self.rotate_hand(&mut elements, HOUR_HAND, hour_angle)?;
        self.rotate_hand(&mut elements, MINUTE_HAND, minute_angle)?;

        let mut model = json!({
            "parent": parent_reference,
            "elements": elements,
        });
        if let Some(textures) = texture_override {
            model["textures"] = textures;
        }
        Ok(model)
    }

    fn rotate_hand(&self, elements: &mut Value, name: &str, angle: f64) -> Result<()> {
        let Some(element) = find_element_mut(elements, name) else {
            return Ok(());
        };

        let (quadrant, relative) = split_angle(angle);
        if quadrant != Quadrant::Up {
            let reference = self
                .for_quadrant(quadrant)
                .get("elements")
                .and_then(|elements| find_element(elements, name));
            if let Some(Value::Object(fields)) = reference {
                let Some(target) = element.as_object_mut() else {
                    bail!("element {name} is not an object");
                };
                for (key, value) in fields {
                    let _ = target.insert(key.clone(), value.clone());
                }
            }
        }

        let Some(target) = element.as_object_mut() else {
            bail!("element {name} is not an object");
        };
        let rotation = target
            .entry("rotation")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(rotation) = rotation.as_object_mut() else {
            bail!("rotation of element {name} is not an object");
        };
        let _ = rotation.insert("axis".to_owned(), Value::from("z"));
        let _ = rotation.insert("angle".to_owned(), Value::from(relative));
        Ok(())
    }
}

fn find_element<'a>(elements: &'a Value, name: &str) -> Option<&'a Value> {
    elements
        .as_array()?
        .iter()
        .find(|element| element.get("name").and_then(Value::as_str) == Some(name))
}

fn find_element_mut<'a>(elements: &'a mut Value, name: &str) -> Option<&'a mut Value> {
    elements
        .as_array_mut()?
        .iter_mut()
        .find(|element| element.get("name").and_then(Value::as_str) == Some(name))
}

/// Builds an analog variant pack from its template directory.
pub fn build_analog_pack(
    template: &TemplatePack,
    curve: &NormalizedCurve,
    rng: &mut dyn RngCore,
) -> Result<VirtualPack> {
    let mut pack = start_variant(template, ClockKind::Analog)?;
    let paths = VariantPaths::new(&pack.name);

    pack.textures = index_analog_textures(&template.dir.join(TEXTURES_DIR), &paths)?;

    let has_night_background = template
        .dir
        .join(TEXTURES_DIR)
        .join("item/clock/bg_night.png")
        .is_file();
    let rotations = RotationTemplates::load(&template.dir.join(MODELS_DIR))
        .with_context(|| format!("failed to load rotation templates for {}", template.name))?;

    let _ = pack.models.insert(
        paths.parent_model_file(),
        paths.parent_model(rotations.base()),
    );
    let parent_reference = paths.parent_model_reference();
    let texture_prefix = paths.texture_prefix();
    for time in ClockTime::every_minute() {
        let overrides = night_textures(time.hour(), &texture_prefix, has_night_background);
        let model = rotations.time_model(time, &parent_reference, overrides)?;
        let _ = pack
            .models
            .insert(paths.time_model_file(time.hour(), time.minute()), model);
    }
    log::info!("built {} analog models for {}", pack.models.len(), pack.name);

    insert_clock_item(&mut pack, &paths, curve, FallbackMode::Same, rng);
    Ok(pack)
}

fn index_analog_textures(
    root: &Path,
    paths: &VariantPaths,
) -> Result<BTreeMap<String, Vec<u8>>> {
    if !root.is_dir() {
        bail!("missing textures directory: {}", root.display());
    }
    index_textures(root, |parts| match parts {
        [item, clock, rest @ ..] if item == "item" && clock == "clock" && !rest.is_empty() => {
            format!("{}/{}", paths.texture_prefix(), rest.join("/"))
        }
        _ => parts.join("/"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(name: &str, marker: &str) -> Value {
        json!({
            "name": name,
            "from": [7, 7, 7],
            "to": [9, 9, 9],
            "marker": marker,
            "rotation": {"angle": 0, "axis": "y", "origin": [8, 8, 8]}
        })
    }

    fn template(marker: &str) -> Value {
        json!({
            "textures": {"hands": "item/clock/hands"},
            "elements": [hand(HOUR_HAND, marker), hand(MINUTE_HAND, marker)]
        })
    }

    fn rotations() -> RotationTemplates {
        RotationTemplates::new(
            template("up"),
            template("left"),
            template("down"),
            template("right"),
        )
    }

    #[test]
    fn split_angle_picks_nearest_quadrant() {
        assert_eq!(split_angle(0.0), (Quadrant::Up, 0.0));
        assert_eq!(split_angle(-0.0), (Quadrant::Up, 0.0));
        assert_eq!(split_angle(-30.0), (Quadrant::Up, -30.0));
        assert_eq!(split_angle(-90.0), (Quadrant::Right, 0.0));
        assert_eq!(split_angle(-150.0), (Quadrant::Down, 30.0));
        assert_eq!(split_angle(-240.0), (Quadrant::Left, 30.0));
        assert_eq!(split_angle(44.5), (Quadrant::Up, 44.5));
        assert_eq!(split_angle(45.0), (Quadrant::Left, -45.0));
    }

    #[test]
    fn hands_turn_clockwise() {
        assert_eq!(hand_angles(ClockTime::new(0, 0)), (-0.0, -0.0));
        assert_eq!(hand_angles(ClockTime::new(3, 0)), (-90.0, -0.0));
        assert_eq!(hand_angles(ClockTime::new(15, 30)), (-465.0, -180.0));
    }

    #[test]
    fn night_overrides_cover_evening_and_early_morning() {
        assert!(night_textures(12, "item/clock/x", true).is_none());
        assert!(night_textures(17, "item/clock/x", true).is_none());

        let evening = night_textures(18, "item/clock/x", false).expect("night at 18:00");
        assert_eq!(evening, json!({"hands": "item/clock/x/hands_night"}));

        let early = night_textures(5, "item/clock/x", true).expect("night at 05:00");
        assert_eq!(early["face"], "item/clock/x/bg_night");
        assert_eq!(early["particle"], "item/clock/x/bg_night");
    }

    #[test]
    fn time_model_swaps_hand_from_matching_quadrant() {
        let model = rotations()
            .time_model(ClockTime::new(6, 15), "minecraft:item/clock/x/clock_template", None)
            .expect("model builds");

        let elements = &model["elements"];
        let hour = find_element(elements, HOUR_HAND).expect("hour hand present");
        let minute = find_element(elements, MINUTE_HAND).expect("minute hand present");

        // 06:15 puts the hour hand at -187.5 degrees and the minute hand at -90.
        assert_eq!(hour["marker"], "down");
        assert_eq!(hour["rotation"]["angle"], 172.5 - 180.0);
        assert_eq!(hour["rotation"]["axis"], "z");
        assert_eq!(minute["marker"], "right");
        assert_eq!(minute["rotation"]["angle"], 0.0);
        assert_eq!(model["parent"], "minecraft:item/clock/x/clock_template");
        assert!(model.get("textures").is_none());
    }

    #[test]
    fn time_model_keeps_base_hand_near_twelve() {
        let model = rotations()
            .time_model(ClockTime::new(0, 5), "parent", Some(json!({"hands": "night"})))
            .expect("model builds");

        let minute = find_element(&model["elements"], MINUTE_HAND).expect("minute hand");
        assert_eq!(minute["marker"], "up");
        assert_eq!(minute["rotation"]["angle"], -30.0);
        assert_eq!(minute["rotation"]["origin"], json!([8, 8, 8]));
        assert_eq!(model["textures"]["hands"], "night");
    }
}
