//! Meridian Core
//!
//! Provider abstractions shared by the Meridian infrastructure tool: the
//! `Provider` trait, the resource/state model, and validation error types.

pub mod provider;
pub mod resource;
pub mod validate;
