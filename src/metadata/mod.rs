//! Image metadata presentation
//!
//! Field definitions for exported image metadata and the row builder used by
//! the explore dialog.

pub mod explore;
pub mod fields;

pub use explore::{display_value, explore_rows, ExploreRow};
pub use fields::{field_definition, FieldDefinition, FieldOption, EXPORT_IMAGE_FIELDS};
