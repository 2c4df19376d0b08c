//! TOML-backed ship templates
//!
//! A template defines the defensive loadout every object stamped from it
//! starts with. Objects cannot be constructed without one.

pub mod registry;
pub mod schema;

pub use registry::{TemplateError, TemplateRegistry};
pub use schema::{DefenseSpec, ObjectClass, ShipTemplate, TemplateMeta};
