//! ECS resources made available to systems.
//!
//! Long-lived data injected into the ECS world and read during rendering:
//!
//! Overview
//! - `backgroundstore` – loaded background images keyed by integer id
//! - `gameconfig` – room and diagnostic settings loaded from an INI file
//! - `roomsize` – current room (viewport) dimensions in pixels
//! - `worldtime` – simulation time and delta for backdrop scrolling

pub mod backgroundstore;
pub mod gameconfig;
pub mod roomsize;
pub mod worldtime;
