//! Backdrop layer component.
//!
//! A [`Backdrop`] entity places one background in the room: anchored at a
//! position, optionally tiled per axis, optionally stretched over the whole
//! room, scrolling at a fixed speed. The render pass sorts backdrops by
//! [`ZIndex`](crate::components::zindex::ZIndex) and dispatches each to the
//! matching draw operation.

use bevy_ecs::prelude::Component;

use crate::graphics::primitives::Color;
use crate::resources::backgroundstore::BackgroundId;

/// One background layer of the room.
#[derive(Component, Clone, Debug)]
pub struct Backdrop {
    /// Background to draw.
    pub background: BackgroundId,
    /// Pan offset (tiled) or top-left position (untiled), in pixels.
    pub x: f32,
    pub y: f32,
    /// Scroll speed in pixels per second.
    pub hspeed: f32,
    pub vspeed: f32,
    /// Per-axis scale applied to the image.
    pub xscale: f32,
    pub yscale: f32,
    /// Tile horizontally / vertically.
    pub htiled: bool,
    pub vtiled: bool,
    /// Stretch over the whole room instead of tiling or placing.
    pub stretched: bool,
    /// Blend color, broadcast to all four quad corners.
    pub color: Color,
    pub alpha: f32,
    pub visible: bool,
}

impl Backdrop {
    pub fn new(background: BackgroundId) -> Self {
        Self {
            background,
            x: 0.0,
            y: 0.0,
            hspeed: 0.0,
            vspeed: 0.0,
            xscale: 1.0,
            yscale: 1.0,
            htiled: false,
            vtiled: false,
            stretched: false,
            color: Color::WHITE,
            alpha: 1.0,
            visible: true,
        }
    }

    pub fn tiled(background: BackgroundId) -> Self {
        Self {
            htiled: true,
            vtiled: true,
            ..Self::new(background)
        }
    }

    pub fn stretched(background: BackgroundId) -> Self {
        Self {
            stretched: true,
            ..Self::new(background)
        }
    }

    pub fn with_scroll(mut self, hspeed: f32, vspeed: f32) -> Self {
        self.hspeed = hspeed;
        self.vspeed = vspeed;
        self
    }
}
