#![allow(dead_code, unreachable_pub)]

use std::{fs, path::Path};

use serde_json::{json, Value};

pub const ANALOG: &str = "Giant_Analog_Clock";
pub const DIGITAL: &str = "Square_Digital_Clock";

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().expect("fixture path has a parent")).expect("fixture dir");
    fs::write(path, serde_json::to_vec_pretty(value).expect("fixture json")).expect("fixture file");
}

fn write_png(path: &Path, marker: u8) {
    fs::create_dir_all(path.parent().expect("fixture path has a parent")).expect("fixture dir");
    fs::write(path, [0x89, b'P', b'N', b'G', marker]).expect("fixture texture");
}

fn hand(name: &str, marker: &str) -> Value {
    json!({
        "name": name,
        "from": [7.5, 8, 7.5],
        "to": [8.5, 14, 8.5],
        "marker": marker,
        "rotation": {"angle": 0, "axis": "y", "origin": [8, 8, 8]},
        "faces": {"north": {"uv": [0, 0, 1, 6], "texture": "#hands"}}
    })
}

fn analog_model(marker: &str) -> Value {
    json!({
        "parent": "item/generated",
        "textures": {
            "face": "item/clock/bg",
            "hands": "item/clock/hands",
            "particle": "block/oak_planks"
        },
        "elements": [
            {"name": "face", "from": [0, 0, 8], "to": [16, 16, 8]},
            hand("hand_hour", marker),
            hand("hand_minute", marker)
        ]
    })
}

/// Writes an analog template with all four rotation templates.
pub fn analog_template(input_dir: &Path, with_night_background: bool) {
    let dir = input_dir.join(ANALOG);
    write_json(
        &dir.join("pack.mcmeta"),
        &json!({"meta_type": "Analog", "pack": {"description": "Giant analog clock"}}),
    );

    let models = dir.join("assets/minecraft/models/item/clock");
    write_json(&models.join("clock_template.json"), &analog_model("up"));
    write_json(&models.join("clock_template_3.json"), &analog_model("right"));
    write_json(&models.join("clock_template_6.json"), &analog_model("down"));
    write_json(&models.join("clock_template_9.json"), &analog_model("left"));

    let textures = dir.join("assets/minecraft/textures");
    write_png(&textures.join("item/clock/bg.png"), 1);
    write_png(&textures.join("item/clock/hands.png"), 2);
    write_png(&textures.join("item/clock/hands_night.png"), 3);
    if with_night_background {
        write_png(&textures.join("item/clock/bg_night.png"), 4);
    }
    write_png(&textures.join("misc/glint.png"), 5);
}

/// Writes a digital template with a single digit texture for each slot.
pub fn digital_template(input_dir: &Path) {
    let dir = input_dir.join(DIGITAL);
    write_json(
        &dir.join("pack.mcmeta"),
        &json!({"meta_type": "digital", "pack": {"description": {"text": "Square"}}}),
    );
    write_json(
        &dir.join("assets/minecraft/models/item/clock/clock_template.json"),
        &json!({
            "parent": "item/generated",
            "textures": {
                "layer0": "item/clock/bg",
                "hour": "item/clock/h/0",
                "min1": "item/clock/m1/0",
                "min0": "item/clock/m0/0"
            }
        }),
    );

    let textures = dir.join("assets/minecraft/textures/item/clock");
    write_png(&textures.join("bg.png"), 1);
    write_png(&textures.join("h/0.png"), 2);
    write_png(&textures.join("m1/0.png"), 3);
    write_png(&textures.join("m0/0.png"), 4);
}

/// Writes a template whose `meta_type` has no builder.
pub fn unknown_template(input_dir: &Path, name: &str) {
    write_json(
        &input_dir.join(name).join("pack.mcmeta"),
        &json!({"meta_type": "sundial", "pack": {"description": ""}}),
    );
}

/// Reads a JSON file written by the pack writer.
pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|error| panic!("failed to read {}: {error}", path.display()));
    serde_json::from_str(&text).expect("written file is valid JSON")
}
