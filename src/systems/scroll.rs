//! Backdrop scrolling.

use bevy_ecs::prelude::*;

use crate::components::backdrop::Backdrop;
use crate::resources::worldtime::WorldTime;

/// Integrate backdrop pan offsets from their scroll speeds. The tiling
/// lattice wraps on any offset, so no normalization is needed here.
pub fn backdrop_scroll(mut query: Query<&mut Backdrop>, time: Res<WorldTime>) {
    let dt = time.scaled_delta();
    for mut backdrop in query.iter_mut() {
        backdrop.x += backdrop.hspeed * dt;
        backdrop.y += backdrop.vspeed * dt;
    }
}
