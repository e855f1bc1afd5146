#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Resource-pack adapter for Accurate Clocks.
//!
//! Templates found on disk are turned into in-memory [`VirtualPack`]s by the
//! analog or digital builder, validated, and written out. The composite build
//! merges every variant into one pack whose clock item selects a variant by
//! the item's custom name.

pub mod analog;
pub mod composite;
pub mod digital;
pub mod item_state;
pub mod metadata;
pub mod templates;
mod textures;
pub mod variant;
pub mod virtual_pack;
pub mod writer;

pub use composite::{build_composite_pack, CompositeSettings};
pub use templates::{
    discover_templates, resolve_template_dir, ClockKind, TemplateError, TemplatePack,
};
pub use variant::build_variant;
pub use virtual_pack::{PackValidationError, VirtualPack};
pub use writer::write_virtual_pack;
