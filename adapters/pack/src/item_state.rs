//! Typed schema for item-state JSON and the clock dispatch structures built from it.

use accurate_clocks_core::{ThresholdEntry, ThresholdTables, TICKS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Item property read by range dispatch to obtain the time of day.
pub const TIME_PROPERTY: &str = "minecraft:time";
/// Select property that branches on the dimension the item is viewed in.
pub const DIMENSION_PROPERTY: &str = "minecraft:context_dimension";
/// Select property that branches on an item component.
pub const COMPONENT_PROPERTY: &str = "minecraft:component";
/// Component holding the name given to an item in an anvil.
pub const CUSTOM_NAME_COMPONENT: &str = "minecraft:custom_name";
/// Dimension in which the real daytime is available.
pub const OVERWORLD: &str = "minecraft:overworld";

const VANILLA_CLOCK_FRAMES: u32 = 64;
const VANILLA_CLOCK_SCALE: f64 = 64.0;

/// Root object of an item-state file such as `items/clock.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemState {
    /// Model tree evaluated by the client.
    pub model: ItemModel,
}

/// Node of an item model tree, tagged by its `type` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemModel {
    /// Leaf that renders a single model.
    #[serde(rename = "minecraft:model")]
    Model {
        /// Reference to the model file.
        model: String,
    },
    /// Picks the last entry whose threshold does not exceed the scaled property value.
    #[serde(rename = "minecraft:range_dispatch")]
    RangeDispatch {
        /// Numeric property being dispatched on.
        property: String,
        /// Where the time property reads its value from.
        source: TimeSource,
        /// Multiplier applied to the property before comparing thresholds.
        scale: f64,
        /// Entries sorted by ascending threshold.
        entries: Vec<RangeEntry>,
    },
    /// Picks the case whose `when` value matches the property.
    #[serde(rename = "minecraft:select")]
    Select {
        /// Property being matched.
        property: String,
        /// Component inspected when `property` is [`COMPONENT_PROPERTY`].
        #[serde(default, skip_serializing_if = "Option::is_none")]
        component: Option<String>,
        /// Cases checked in order.
        cases: Vec<SelectCase>,
        /// Model used when no case matches.
        fallback: Box<ItemModel>,
    },
}

impl ItemModel {
    /// Leaf node rendering the given model reference.
    #[must_use]
    pub fn model(reference: impl Into<String>) -> Self {
        Self::Model {
            model: reference.into(),
        }
    }

    /// Range dispatch over the time property.
    #[must_use]
    pub fn time_dispatch(source: TimeSource, scale: f64, entries: Vec<RangeEntry>) -> Self {
        Self::RangeDispatch {
            property: TIME_PROPERTY.to_owned(),
            source,
            scale,
            entries,
        }
    }
}

/// Source of the value read by the time property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    /// In-world time of day.
    Daytime,
    /// Value that changes randomly, used where no world time exists.
    Random,
}

/// Single threshold-to-model pairing inside a range dispatch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeEntry {
    /// Model shown while this entry is active.
    pub model: ItemModel,
    /// Scaled property value at which the entry activates.
    pub threshold: f64,
}

impl From<&ThresholdEntry> for RangeEntry {
    fn from(entry: &ThresholdEntry) -> Self {
        Self {
            model: ItemModel::model(entry.model_reference.clone()),
            threshold: entry.threshold,
        }
    }
}

/// Single branch of a select node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectCase {
    /// Property value selecting this case.
    pub when: String,
    /// Model tree used when the case matches.
    pub model: ItemModel,
}

/// Clock item state for one variant: daytime in the overworld, random elsewhere.
#[must_use]
pub fn clock_item_state(tables: &ThresholdTables) -> ItemState {
    let daytime = tables.daytime.iter().map(RangeEntry::from).collect();
    let fallback = tables.fallback.iter().map(RangeEntry::from).collect();

    ItemState {
        model: dimension_select(
            ItemModel::time_dispatch(TimeSource::Daytime, TICKS_PER_DAY, daytime),
            ItemModel::time_dispatch(TimeSource::Random, TICKS_PER_DAY, fallback),
        ),
    }
}

/// Model tree of the unmodified game clock, used when no variant name matches.
#[must_use]
pub fn vanilla_clock_model() -> ItemModel {
    dimension_select(
        vanilla_clock_dispatch(TimeSource::Daytime),
        vanilla_clock_dispatch(TimeSource::Random),
    )
}

/// Combined clock item state choosing a variant by the item's custom name.
#[must_use]
pub fn named_variant_item_state(cases: Vec<SelectCase>) -> ItemState {
    ItemState {
        model: ItemModel::Select {
            property: COMPONENT_PROPERTY.to_owned(),
            component: Some(CUSTOM_NAME_COMPONENT.to_owned()),
            cases,
            fallback: Box::new(vanilla_clock_model()),
        },
    }
}

fn dimension_select(overworld: ItemModel, fallback: ItemModel) -> ItemModel {
    ItemModel::Select {
        property: DIMENSION_PROPERTY.to_owned(),
        component: None,
        cases: vec![SelectCase {
            when: OVERWORLD.to_owned(),
            model: overworld,
        }],
        fallback: Box::new(fallback),
    }
}

fn vanilla_clock_dispatch(source: TimeSource) -> ItemModel {
    let mut entries: Vec<RangeEntry> = (0..VANILLA_CLOCK_FRAMES)
        .map(|frame| RangeEntry {
            model: ItemModel::model(vanilla_frame_model(frame)),
            threshold: if frame == 0 {
                0.0
            } else {
                f64::from(frame) - 0.5
            },
        })
        .collect();
    // The dial wraps back to the first frame for the last half step.
    entries.push(RangeEntry {
        model: ItemModel::model(vanilla_frame_model(0)),
        threshold: VANILLA_CLOCK_SCALE - 0.5,
    });

    ItemModel::time_dispatch(source, VANILLA_CLOCK_SCALE, entries)
}

fn vanilla_frame_model(frame: u32) -> String {
    format!("minecraft:item/clock_{frame:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leaf_serializes_with_type_tag() {
        let value = serde_json::to_value(ItemModel::model("item/clock/x/clock_0000"))
            .expect("model serializes");
        assert_eq!(
            value,
            json!({"type": "minecraft:model", "model": "item/clock/x/clock_0000"})
        );
    }

    #[test]
    fn dimension_select_omits_component() {
        let value = serde_json::to_value(vanilla_clock_model()).expect("model serializes");
        assert_eq!(value["type"], "minecraft:select");
        assert_eq!(value["property"], DIMENSION_PROPERTY);
        assert!(value.get("component").is_none(), "component is optional");
        assert_eq!(value["cases"][0]["when"], OVERWORLD);
        assert_eq!(value["cases"][0]["model"]["source"], "daytime");
        assert_eq!(value["fallback"]["source"], "random");
    }

    #[test]
    fn vanilla_dispatch_wraps_to_first_frame() {
        let ItemModel::RangeDispatch { entries, scale, .. } =
            vanilla_clock_dispatch(TimeSource::Daytime)
        else {
            panic!("vanilla dispatch must be a range dispatch");
        };

        assert_eq!(scale, 64.0);
        assert_eq!(entries.len(), 65);
        assert_eq!(entries[0].threshold, 0.0);
        assert_eq!(entries[1].threshold, 0.5);
        assert_eq!(entries[63].threshold, 62.5);
        assert_eq!(entries[64].threshold, 63.5);
        assert_eq!(entries[64].model, ItemModel::model("minecraft:item/clock_00"));
    }

    #[test]
    fn item_state_round_trips_through_json() {
        let state = named_variant_item_state(vec![SelectCase {
            when: "Square Digital Clock".to_owned(),
            model: ItemModel::model("item/clock/square_digital_clock/clock_1200"),
        }]);
        let text = serde_json::to_string(&state).expect("state serializes");
        let parsed: ItemState = serde_json::from_str(&text).expect("state parses");
        assert_eq!(parsed, state);
    }
}
