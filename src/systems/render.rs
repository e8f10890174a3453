//! Backdrop render pass.

use bevy_ecs::prelude::*;

use crate::components::backdrop::Backdrop;
use crate::components::zindex::ZIndex;
use crate::graphics::background::BackgroundRenderer;
use crate::graphics::primitives::PrimitiveRenderer;
use crate::resources::backgroundstore::BackgroundStore;
use crate::resources::roomsize::RoomSize;

/// Draw every visible backdrop into `sink`, back to front.
///
/// This runs between the caller's frame begin/end, mirroring immediate-mode
/// drawing: collect the visible layers, sort by z, then emit quads through a
/// [`BackgroundRenderer`] over the shared store.
pub fn backdrop_pass<R: PrimitiveRenderer>(world: &mut World, sink: &mut R) {
    let room = *world.resource::<RoomSize>();

    let mut to_draw: Vec<(Backdrop, ZIndex)> = {
        let mut q = world.query::<(&Backdrop, &ZIndex)>();
        q.iter(world)
            .filter(|(b, _)| b.visible)
            .map(|(b, z)| (b.clone(), *z))
            .collect()
    };
    to_draw.sort_by_key(|(_, z)| *z);

    let backgrounds = world.resource::<BackgroundStore>();
    let mut renderer = BackgroundRenderer::new(backgrounds, room, sink);

    for (layer, _z) in &to_draw {
        if layer.stretched {
            renderer.draw_stretched(
                layer.background,
                0.0,
                0.0,
                room.w as f32,
                room.h as f32,
                layer.color,
                layer.alpha,
            );
        } else if layer.htiled || layer.vtiled {
            renderer.draw_tiled_ext(
                layer.background,
                layer.x,
                layer.y,
                layer.xscale,
                layer.yscale,
                layer.color,
                layer.alpha,
                layer.htiled,
                layer.vtiled,
            );
        } else {
            renderer.draw_ext(
                layer.background,
                layer.x,
                layer.y,
                layer.xscale,
                layer.yscale,
                0.0,
                layer.color,
                layer.alpha,
            );
        }
    }
}
