//! Simulation time resource.

use bevy_ecs::prelude::Resource;

/// Elapsed and per-frame time, with a global scale factor.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    /// Record a new frame delta and advance the elapsed clock.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt;
        self.elapsed += dt * self.time_scale;
    }

    /// Frame delta with the time scale applied.
    pub fn scaled_delta(&self) -> f32 {
        self.delta * self.time_scale
    }
}
