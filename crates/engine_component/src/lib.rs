//! # engine_component
//!
//! The "C" in ECS: defines what a component is and where components live.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all ECS data must satisfy.
//! - [`ErasedComponent`]: object-safe view used for heterogeneous storage.
//! - [`Entity`]: opaque handles minted by the world.
//! - [`World`]: the entity store (`create`, `assign`, `has`, `get`).
//! - [`Stamp`]: components recorded ahead of entity creation.

pub mod component;
pub mod entity;
pub mod stamp;
pub mod world;

pub use component::{Component, ComponentTypeId, ErasedComponent};
pub use entity::Entity;
pub use stamp::Stamp;
pub use world::{World, WorldError};
