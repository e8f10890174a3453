//! GameMaker-style background drawing.
//!
//! Every public operation resolves its background id through the registry
//! guard, clamps alpha to `[0, 1]`, and emits complete triangle-strip quads
//! in a fixed winding order: top-left, top-right, bottom-left, bottom-right.
//! UVs are always interpolated inside the background's atlas rectangle so
//! neighbouring images on the same texture page never bleed in.
//!
//! Tiling comes in four flavours: unbounded over the whole room, unbounded
//! with per-axis enable flags and scaling, and two area-bounded modes that
//! clip the tile lattice to an explicit box.

use log::warn;

use crate::graphics::primitives::{Color, PrimitiveKind, PrimitiveRenderer, TextureHandle, Vertex};
use crate::resources::backgroundstore::{Background, BackgroundId, BackgroundStore};
use crate::resources::roomsize::RoomSize;

/// Alpha is clamped to [0, 1], not [0, 255].
fn clamp_alpha(alpha: f32) -> f32 {
    if alpha <= 0.0 {
        0.0
    } else if alpha >= 1.0 {
        1.0
    } else {
        alpha
    }
}

/// Axis-aligned quad corners in strip order (TL, TR, BL, BR), at z = 0.
fn rect_corners(x: f32, y: f32, w: f32, h: f32) -> [(f32, f32, f32); 4] {
    [
        (x, y, 0.0),
        (x + w, y, 0.0),
        (x, y + h, 0.0),
        (x + w, y + h, 0.0),
    ]
}

/// Corners of a `w` x `h` rectangle rotated `rot` degrees about its top-left
/// corner at `(x, y)`, y-down screen space, positive angles counterclockwise.
///
/// The width edge and the height edge are rotated independently and summed,
/// which stays correct when a non-uniform scale has already been folded into
/// `w` and `h`. At `rot = 0` this reduces exactly to [`rect_corners`].
fn rotated_corners(x: f32, y: f32, w: f32, h: f32, rot: f32) -> [(f32, f32, f32); 4] {
    let (sin, cos) = rot.to_radians().sin_cos();
    let (wx, wy) = (w * cos, -w * sin);
    let (hx, hy) = (h * sin, h * cos);
    [
        (x, y, 0.0),
        (x + wx, y + wy, 0.0),
        (x + hx, y + hy, 0.0),
        (x + hx + wx, y + hy + wy, 0.0),
    ]
}

/// UV corners in the same strip order as the position corners.
fn uv_corners(u1: f32, v1: f32, u2: f32, v2: f32) -> [(f32, f32); 4] {
    [(u1, v1), (u2, v1), (u1, v2), (u2, v2)]
}

/// Map a sub-region in background-pixel space to atlas UV corners.
///
/// `width / atlas.w` is the number of background pixels per UV unit, so a
/// pixel offset divided by it lands at the right fraction of the atlas
/// rectangle. In-bounds regions can never leave the rectangle.
fn region_uvs(bck: &Background, left: f32, top: f32, width: f32, height: f32) -> (f32, f32, f32, f32) {
    let ppu_x = bck.width / bck.atlas.w;
    let ppu_y = bck.height / bck.atlas.h;
    (
        bck.atlas.x + left / ppu_x,
        bck.atlas.y + top / ppu_y,
        bck.atlas.x + (left + width) / ppu_x,
        bck.atlas.y + (top + height) / ppu_y,
    )
}

/// Immediate-mode background renderer over a borrowed registry and sink.
///
/// Construct one per pass; it is cheap and holds no state beyond the
/// borrows. All operations are no-ops on invalid ids (reported in strict
/// mode, see [`BackgroundStore::lookup`]).
pub struct BackgroundRenderer<'a, R: PrimitiveRenderer> {
    backgrounds: &'a BackgroundStore,
    room: RoomSize,
    sink: &'a mut R,
}

impl<'a, R: PrimitiveRenderer> BackgroundRenderer<'a, R> {
    pub fn new(backgrounds: &'a BackgroundStore, room: RoomSize, sink: &'a mut R) -> Self {
        Self {
            backgrounds,
            room,
            sink,
        }
    }

    fn lookup(&self, id: BackgroundId) -> Option<&'a Background> {
        let store = self.backgrounds;
        store.lookup(id)
    }

    /// The single quad emitter every public variant funnels through:
    /// one begin / four vertices / end sequence, corners and UVs paired by
    /// index in strip order.
    fn emit_quad(
        &mut self,
        texture: TextureHandle,
        corners: [(f32, f32, f32); 4],
        uvs: [(f32, f32); 4],
        colors: [Color; 4],
        alpha: f32,
    ) {
        self.sink
            .begin_texture(PrimitiveKind::TriangleStrip, texture);
        for i in 0..4 {
            let (x, y, z) = corners[i];
            let (u, v) = uvs[i];
            self.sink.vertex(Vertex {
                x,
                y,
                z,
                u,
                v,
                color: colors[i],
                alpha,
            });
        }
        self.sink.end();
    }

    /// Draw a background at native size with its top-left corner at `(x, y)`.
    pub fn draw(&mut self, id: BackgroundId, x: f32, y: f32, color: Color, alpha: f32) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let a = bck.atlas;
        self.emit_quad(
            bck.texture,
            rect_corners(x, y, bck.width, bck.height),
            uv_corners(a.x, a.y, a.x + a.w, a.y + a.h),
            [color; 4],
            alpha,
        );
    }

    /// Draw stretched to an explicit size, independent of the native one.
    pub fn draw_stretched(
        &mut self,
        id: BackgroundId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        alpha: f32,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let a = bck.atlas;
        self.emit_quad(
            bck.texture,
            rect_corners(x, y, width, height),
            uv_corners(a.x, a.y, a.x + a.w, a.y + a.h),
            [color; 4],
            alpha,
        );
    }

    /// Draw a sub-region of the background, `(left, top, width, height)` in
    /// background-pixel space, at `(x, y)`.
    pub fn draw_part(
        &mut self,
        id: BackgroundId,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        x: f32,
        y: f32,
        color: Color,
        alpha: f32,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let (u1, v1, u2, v2) = region_uvs(bck, left, top, width, height);
        self.emit_quad(
            bck.texture,
            rect_corners(x, y, width, height),
            uv_corners(u1, v1, u2, v2),
            [color; 4],
            alpha,
        );
    }

    /// Draw scaled and rotated about `(x, y)`. `rot` is in degrees.
    pub fn draw_ext(
        &mut self,
        id: BackgroundId,
        x: f32,
        y: f32,
        xscale: f32,
        yscale: f32,
        rot: f32,
        color: Color,
        alpha: f32,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let a = bck.atlas;
        self.emit_quad(
            bck.texture,
            rotated_corners(x, y, bck.width * xscale, bck.height * yscale, rot),
            uv_corners(a.x, a.y, a.x + a.w, a.y + a.h),
            [color; 4],
            alpha,
        );
    }

    /// Draw a sub-region with independent scaling, unrotated.
    pub fn draw_part_ext(
        &mut self,
        id: BackgroundId,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        x: f32,
        y: f32,
        xscale: f32,
        yscale: f32,
        color: Color,
        alpha: f32,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let (u1, v1, u2, v2) = region_uvs(bck, left, top, width, height);
        self.emit_quad(
            bck.texture,
            rect_corners(x, y, width * xscale, height * yscale),
            uv_corners(u1, v1, u2, v2),
            [color; 4],
            alpha,
        );
    }

    /// The fully general form: sub-region, independent scale, rotation and
    /// four independent corner colors, paired by corner index.
    pub fn draw_general(
        &mut self,
        id: BackgroundId,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        x: f32,
        y: f32,
        xscale: f32,
        yscale: f32,
        rot: f32,
        colors: [Color; 4],
        alpha: f32,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let (u1, v1, u2, v2) = region_uvs(bck, left, top, width, height);
        self.emit_quad(
            bck.texture,
            rotated_corners(x, y, width * xscale, height * yscale, rot),
            uv_corners(u1, v1, u2, v2),
            colors,
            alpha,
        );
    }

    /// Tile the background over the whole room. `(x, y)` is a pan offset
    /// establishing the lattice phase; any offset sign is handled.
    pub fn draw_tiled(&mut self, id: BackgroundId, x: f32, y: f32, color: Color, alpha: f32) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let (w, h) = (bck.width, bck.height);
        if w <= 0.0 || h <= 0.0 {
            warn!("background {id} has a degenerate size, tiling skipped");
            return;
        }
        // Normalize the pan offset into [0, tile) with correct sign handling.
        let ox = (if x < 0.0 { 0.0 } else { w }) - x % w;
        let oy = (if y < 0.0 { 0.0 } else { h }) - y % h;
        let hortil = (self.room.w as f32 / w).ceil() as i32 + 1;
        let vertil = (self.room.h as f32 / h).ceil() as i32 + 1;
        self.tile_grid(bck, -ox, -oy, w, h, hortil, vertil, color, alpha);
    }

    /// Tile with per-axis enable flags and scaling. A disabled axis draws a
    /// single row/column at the raw coordinate.
    pub fn draw_tiled_ext(
        &mut self,
        id: BackgroundId,
        x: f32,
        y: f32,
        xscale: f32,
        yscale: f32,
        color: Color,
        alpha: f32,
        htiled: bool,
        vtiled: bool,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let w = bck.width * xscale;
        let h = bck.height * yscale;
        if w <= 0.0 || h <= 0.0 {
            warn!("background {id} tiled with non-positive scale, skipped");
            return;
        }
        let (hortil, x0) = if htiled {
            let count = (self.room.w as f32 / w).ceil() as i32 + 1;
            (count, -((if x < 0.0 { 0.0 } else { w }) - x % w))
        } else {
            (1, x)
        };
        let (vertil, y0) = if vtiled {
            let count = (self.room.h as f32 / h).ceil() as i32 + 1;
            (count, -((if y < 0.0 { 0.0 } else { h }) - y % h))
        } else {
            (1, y)
        };
        self.tile_grid(bck, x0, y0, w, h, hortil, vertil, color, alpha);
    }

    /// Tile only inside the box `(x1, y1)`-`(x2, y2)`, lattice phased so
    /// that `(x, y)` falls on a tile boundary.
    pub fn draw_tiled_area(
        &mut self,
        id: BackgroundId,
        x: f32,
        y: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        alpha: f32,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        self.tile_area(bck, x, y, x1, y1, x2, y2, bck.width, bck.height, color, alpha);
    }

    /// Area-bounded tiling with scaled tiles.
    pub fn draw_tiled_area_ext(
        &mut self,
        id: BackgroundId,
        x: f32,
        y: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        xscale: f32,
        yscale: f32,
        color: Color,
        alpha: f32,
    ) {
        let alpha = clamp_alpha(alpha);
        let Some(bck) = self.lookup(id) else { return };
        let sw = bck.width * xscale;
        let sh = bck.height * yscale;
        self.tile_area(bck, x, y, x1, y1, x2, y2, sw, sh, color, alpha);
    }

    /// Emit a `hortil` x `vertil` grid of full-atlas quads starting at
    /// `(x0, y0)`, stepping one tile per cell.
    #[allow(clippy::too_many_arguments)]
    fn tile_grid(
        &mut self,
        bck: &Background,
        x0: f32,
        y0: f32,
        w: f32,
        h: f32,
        hortil: i32,
        vertil: i32,
        color: Color,
        alpha: f32,
    ) {
        let a = bck.atlas;
        let uvs = uv_corners(a.x, a.y, a.x + a.w, a.y + a.h);
        let mut xv = x0;
        for _ in 0..hortil {
            let mut yv = y0;
            for _ in 0..vertil {
                self.emit_quad(bck.texture, rect_corners(xv, yv, w, h), uvs, [color; 4], alpha);
                yv += h;
            }
            xv += w;
        }
    }

    /// Area-bounded tiling core shared by the plain and scaled variants.
    ///
    /// The lattice origin per axis is the tile boundary at or before `x1`
    /// for a lattice phased through `(x, y)`. Cells straddling the box edges
    /// are trimmed and their UVs recomputed from the trimmed sub-region.
    ///
    /// The `+ 1.0` in the far-edge trim is inherited from the reference
    /// behavior: cells at the far edge overhang the box by exactly one
    /// pixel. Pinned by `area_tiling_far_edge_overhang_is_one_pixel`.
    #[allow(clippy::too_many_arguments)]
    fn tile_area(
        &mut self,
        bck: &Background,
        x: f32,
        y: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        sw: f32,
        sh: f32,
        color: Color,
        alpha: f32,
    ) {
        if sw <= 0.0 || sh <= 0.0 {
            warn!("area tiling with non-positive tile size, skipped");
            return;
        }
        let a = bck.atlas;
        let i0 = x1 - (x1 % sw - x % sw) - if x1 % sw < x % sw { sw } else { 0.0 };
        let j0 = y1 - (y1 % sh - y % sh) - if y1 % sh < y % sh { sh } else { 0.0 };

        let mut i = i0;
        while i <= x2 {
            let mut j = j0;
            while j <= y2 {
                let left = if i <= x1 { x1 - i } else { 0.0 };
                let top = if j <= y1 { y1 - j } else { 0.0 };
                let width = if x2 <= i + sw {
                    (sw - (i + sw - x2) + 1.0) - left
                } else {
                    sw - left
                };
                let height = if y2 <= j + sh {
                    (sh - (j + sh - y2) + 1.0) - top
                } else {
                    sh - top
                };

                let u1 = a.x + left / sw * a.w;
                let v1 = a.y + top / sh * a.h;
                let u2 = a.x + (left + width) / sw * a.w;
                let v2 = a.y + (top + height) / sh * a.h;

                self.emit_quad(
                    bck.texture,
                    rect_corners(i + left, j + top, width, height),
                    uv_corners(u1, v1, u2, v2),
                    [color; 4],
                    alpha,
                );
                j += sh;
            }
            i += sw;
        }
    }

    /// Atlas UV width occupied by the background, or `-1.0` for a bad id.
    pub fn texture_width_factor(&self, id: BackgroundId) -> f32 {
        self.lookup(id).map_or(-1.0, |b| b.atlas.w)
    }

    /// Atlas UV height occupied by the background, or `-1.0` for a bad id.
    pub fn texture_height_factor(&self, id: BackgroundId) -> f32 {
        self.lookup(id).map_or(-1.0, |b| b.atlas.h)
    }

    /// Native-size quad at an explicit depth, for 3D contexts. Color and
    /// alpha are fixed at opaque white.
    pub fn draw_at_depth(&mut self, id: BackgroundId, x: f32, y: f32, z: f32) {
        let Some(bck) = self.lookup(id) else { return };
        let a = bck.atlas;
        let mut corners = rect_corners(x, y, bck.width, bck.height);
        for c in &mut corners {
            c.2 = z;
        }
        self.emit_quad(
            bck.texture,
            corners,
            uv_corners(a.x, a.y, a.x + a.w, a.y + a.h),
            [Color::WHITE; 4],
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::primitives::RecordingRenderer;
    use crate::resources::backgroundstore::AtlasRect;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    // A 64x64 background occupying the quarter page [0.25, 0.5] x [0.5, 0.75]
    // on texture 7. One UV unit is 256 background pixels on both axes.
    fn store() -> BackgroundStore {
        let mut store = BackgroundStore::new().with_strict(false);
        store.insert(
            "clouds",
            Background {
                width: 64.0,
                height: 64.0,
                atlas: AtlasRect {
                    x: 0.25,
                    y: 0.5,
                    w: 0.25,
                    h: 0.25,
                },
                texture: TextureHandle(7),
            },
        );
        store
    }

    fn room(w: i32, h: i32) -> RoomSize {
        RoomSize { w, h }
    }

    fn positions(sink: &RecordingRenderer) -> Vec<[(f32, f32); 4]> {
        sink.primitives
            .iter()
            .map(|p| {
                let v = &p.vertices;
                assert_eq!(v.len(), 4);
                [(v[0].x, v[0].y), (v[1].x, v[1].y), (v[2].x, v[2].y), (v[3].x, v[3].y)]
            })
            .collect()
    }

    #[test]
    fn plain_draw_spans_native_size() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw(0, 10.0, 20.0, Color::WHITE, 1.0);

        assert_eq!(sink.primitives.len(), 1);
        let p = &sink.primitives[0];
        assert_eq!(p.kind, PrimitiveKind::TriangleStrip);
        assert_eq!(p.texture, TextureHandle(7));
        // Strip order TL, TR, BL, BR at native 64x64.
        assert_eq!((p.vertices[0].x, p.vertices[0].y), (10.0, 20.0));
        assert_eq!((p.vertices[1].x, p.vertices[1].y), (74.0, 20.0));
        assert_eq!((p.vertices[2].x, p.vertices[2].y), (10.0, 84.0));
        assert_eq!((p.vertices[3].x, p.vertices[3].y), (74.0, 84.0));
        // Full atlas rectangle.
        assert_eq!((p.vertices[0].u, p.vertices[0].v), (0.25, 0.5));
        assert_eq!((p.vertices[3].u, p.vertices[3].v), (0.5, 0.75));
        assert!(p.vertices.iter().all(|v| v.z == 0.0));
    }

    #[test]
    fn stretched_uses_explicit_size() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_stretched(0, 0.0, 0.0, 100.0, 10.0, Color::WHITE, 1.0);

        let p = &sink.primitives[0];
        assert_eq!((p.vertices[3].x, p.vertices[3].y), (100.0, 10.0));
        assert_eq!((p.vertices[3].u, p.vertices[3].v), (0.5, 0.75));
    }

    #[test]
    fn part_uvs_are_monotonic_and_inside_the_atlas_rect() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        // 256 pixels per UV unit: 16px = 0.0625 UV.
        r.draw_part(0, 16.0, 32.0, 32.0, 16.0, 0.0, 0.0, Color::WHITE, 1.0);

        let p = &sink.primitives[0];
        let (u1, v1) = (p.vertices[0].u, p.vertices[0].v);
        let (u2, v2) = (p.vertices[3].u, p.vertices[3].v);
        assert!(approx_eq(u1, 0.25 + 16.0 / 256.0));
        assert!(approx_eq(u2, 0.25 + 48.0 / 256.0));
        assert!(approx_eq(v1, 0.5 + 32.0 / 256.0));
        assert!(approx_eq(v2, 0.5 + 48.0 / 256.0));
        assert!(u1 < u2 && v1 < v2);
        for v in &p.vertices {
            assert!(v.u >= 0.25 && v.u <= 0.5);
            assert!(v.v >= 0.5 && v.v <= 0.75);
        }
        // Position spans the requested width/height.
        assert_eq!((p.vertices[3].x, p.vertices[3].y), (32.0, 16.0));
    }

    #[test]
    fn ext_at_zero_rotation_matches_the_stretched_quad() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_ext(0, 5.0, 6.0, 2.0, 0.5, 0.0, Color::WHITE, 1.0);
        r.draw_stretched(0, 5.0, 6.0, 128.0, 32.0, Color::WHITE, 1.0);

        let quads = positions(&sink);
        for corner in 0..4 {
            assert!(approx_eq(quads[0][corner].0, quads[1][corner].0));
            assert!(approx_eq(quads[0][corner].1, quads[1][corner].1));
        }
    }

    #[test]
    fn ext_rotates_the_edges_independently() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_ext(0, 100.0, 100.0, 1.0, 1.0, 90.0, Color::WHITE, 1.0);

        let q = positions(&sink)[0];
        // 90 degrees counterclockwise in y-down space: the width edge points
        // up, the height edge points right.
        assert!(approx_eq(q[0].0, 100.0) && approx_eq(q[0].1, 100.0));
        assert!(approx_eq(q[1].0, 100.0) && approx_eq(q[1].1, 36.0));
        assert!(approx_eq(q[2].0, 164.0) && approx_eq(q[2].1, 100.0));
        assert!(approx_eq(q[3].0, 164.0) && approx_eq(q[3].1, 36.0));
    }

    #[test]
    fn general_assigns_one_color_per_corner() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        let colors = [Color(1), Color(2), Color(3), Color(4)];
        r.draw_general(0, 0.0, 0.0, 64.0, 64.0, 0.0, 0.0, 1.0, 1.0, 0.0, colors, 1.0);

        let p = &sink.primitives[0];
        for (vertex, expected) in p.vertices.iter().zip(colors) {
            assert_eq!(vertex.color, expected);
        }
    }

    #[test]
    fn alpha_is_clamped_to_unit_range() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw(0, 0.0, 0.0, Color::WHITE, 1.5);
        r.draw(0, 0.0, 0.0, Color::WHITE, -0.5);
        r.draw(0, 0.0, 0.0, Color::WHITE, 0.3);

        assert!(sink.primitives[0].vertices.iter().all(|v| v.alpha == 1.0));
        assert!(sink.primitives[1].vertices.iter().all(|v| v.alpha == 0.0));
        assert!(sink.primitives[2].vertices.iter().all(|v| v.alpha == 0.3));
    }

    #[test]
    fn invalid_ids_are_no_ops_and_queries_return_the_sentinel() {
        let mut store = store();
        store.remove(0);
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw(-1, 0.0, 0.0, Color::WHITE, 1.0);
        r.draw(0, 0.0, 0.0, Color::WHITE, 1.0); // tombstoned
        r.draw(99, 0.0, 0.0, Color::WHITE, 1.0);
        assert_eq!(r.texture_width_factor(-1), -1.0);
        assert_eq!(r.texture_height_factor(0), -1.0);
        assert!(sink.primitives.is_empty());
    }

    #[test]
    fn texture_factors_report_the_atlas_extent() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        assert_eq!(r.texture_width_factor(0), 0.25);
        assert_eq!(r.texture_height_factor(0), 0.25);
    }

    /// Checks that the emitted tile columns/rows form a contiguous lattice
    /// covering [0, room) on both axes.
    fn assert_covers_room(sink: &RecordingRenderer, room_w: f32, room_h: f32, tile: f32) {
        let mut xs: Vec<f32> = sink.primitives.iter().map(|p| p.vertices[0].x).collect();
        let mut ys: Vec<f32> = sink.primitives.iter().map(|p| p.vertices[0].y).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs.dedup();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ys.dedup();

        assert!(xs[0] <= 0.0, "left edge uncovered: first column at {}", xs[0]);
        assert!(ys[0] <= 0.0, "top edge uncovered: first row at {}", ys[0]);
        assert!(xs.last().unwrap() + tile >= room_w, "right edge uncovered");
        assert!(ys.last().unwrap() + tile >= room_h, "bottom edge uncovered");
        for pair in xs.windows(2) {
            assert!(approx_eq(pair[1] - pair[0], tile), "gap between columns");
        }
        for pair in ys.windows(2) {
            assert!(approx_eq(pair[1] - pair[0], tile), "gap between rows");
        }
    }

    #[test]
    fn unbounded_tiling_covers_the_room_for_any_offset() {
        let store = store();
        for offset in [0.0_f32, 37.0, -10.0, -128.0, 200.5] {
            let mut sink = RecordingRenderer::new();
            let mut r = BackgroundRenderer::new(&store, room(100, 80), &mut sink);
            r.draw_tiled(0, offset, offset, Color::WHITE, 1.0);

            // ceil(100/64)+1 = 3 columns, ceil(80/64)+1 = 3 rows.
            assert_eq!(sink.primitives.len(), 9, "offset {offset}");
            assert_covers_room(&sink, 100.0, 80.0, 64.0);
        }
    }

    #[test]
    fn tiled_ext_respects_per_axis_flags() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(100, 80), &mut sink);
        r.draw_tiled_ext(0, 12.0, 30.0, 1.0, 1.0, Color::WHITE, 1.0, true, false);

        // One row only, pinned at the raw y coordinate.
        assert_eq!(sink.primitives.len(), 3);
        assert!(sink.primitives.iter().all(|p| p.vertices[0].y == 30.0));
    }

    #[test]
    fn tiled_ext_scales_the_lattice() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(100, 80), &mut sink);
        r.draw_tiled_ext(0, 0.0, 0.0, 0.5, 0.5, Color::WHITE, 1.0, true, true);

        // 32px tiles: ceil(100/32)+1 = 5 columns, ceil(80/32)+1 = 4 rows.
        assert_eq!(sink.primitives.len(), 20);
        assert_covers_room(&sink, 100.0, 80.0, 32.0);
    }

    #[test]
    fn area_tiling_trims_to_the_box() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_tiled_area(0, 0.0, 0.0, 10.0, 10.0, 100.0, 100.0, Color::WHITE, 1.0);

        assert!(!sink.primitives.is_empty());
        for q in positions(&sink) {
            assert!(q[0].0 >= 10.0 && q[0].1 >= 10.0, "quad starts before the box");
            // Far edge: inherited one-pixel overhang past the box.
            assert!(q[3].0 <= 101.0 && q[3].1 <= 101.0, "quad beyond the trim");
        }
        // UVs stay inside the atlas rect for trimmed cells too.
        for p in &sink.primitives {
            for v in &p.vertices {
                assert!(v.u >= 0.25 - EPSILON && v.u <= 0.5 + EPSILON);
                assert!(v.v >= 0.5 - EPSILON && v.v <= 0.75 + EPSILON);
            }
        }
    }

    #[test]
    fn area_tiling_far_edge_overhang_is_one_pixel() {
        // Pins the inherited +1 in the far-edge trim: with 64px tiles and a
        // box ending at 100, the last cell spans 64..101, not 64..100.
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_tiled_area(0, 0.0, 0.0, 10.0, 10.0, 100.0, 100.0, Color::WHITE, 1.0);

        let right_edges: Vec<f32> = positions(&sink).iter().map(|q| q[3].0).collect();
        let max = right_edges.iter().cloned().fold(f32::MIN, f32::max);
        assert!(approx_eq(max, 101.0), "expected 1px overhang, got {max}");
    }

    #[test]
    fn area_tiling_first_cell_clips_left_and_top() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_tiled_area(0, 0.0, 0.0, 10.0, 10.0, 100.0, 100.0, Color::WHITE, 1.0);

        // Lattice phased at 0: the first cell is trimmed from 0..64 to
        // 10..64, and its UVs start 10px into the image.
        let first = &sink.primitives[0];
        assert_eq!((first.vertices[0].x, first.vertices[0].y), (10.0, 10.0));
        assert!(approx_eq(first.vertices[0].u, 0.25 + 10.0 / 64.0 * 0.25));
        assert!(approx_eq(first.vertices[0].v, 0.5 + 10.0 / 64.0 * 0.25));
    }

    #[test]
    fn area_tiling_lattice_is_phased_through_the_offset() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        // Offset 16 shifts tile boundaries to ...,16,80,144,...
        r.draw_tiled_area(0, 16.0, 16.0, 20.0, 20.0, 200.0, 200.0, Color::WHITE, 1.0);

        let mut interior_starts: Vec<f32> = positions(&sink)
            .iter()
            .map(|q| q[0].0)
            .filter(|x| *x > 20.0)
            .collect();
        interior_starts.sort_by(|a, b| a.partial_cmp(b).unwrap());
        interior_starts.dedup();
        for x in interior_starts {
            assert!(approx_eq((x - 16.0) % 64.0, 0.0), "column {x} off-lattice");
        }
    }

    #[test]
    fn area_tiling_with_scale_keeps_quads_in_the_box() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_tiled_area_ext(0, 0.0, 0.0, 5.0, 5.0, 200.0, 150.0, 2.0, 2.0, Color::WHITE, 1.0);

        assert!(!sink.primitives.is_empty());
        for q in positions(&sink) {
            assert!(q[0].0 >= 5.0 && q[0].1 >= 5.0);
            assert!(q[3].0 <= 201.0 && q[3].1 <= 151.0);
        }
    }

    #[test]
    fn depth_variant_carries_z_through_all_corners() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(640, 480), &mut sink);
        r.draw_at_depth(0, 10.0, 20.0, -3.5);

        let p = &sink.primitives[0];
        assert!(p.vertices.iter().all(|v| v.z == -3.5));
        assert_eq!((p.vertices[3].x, p.vertices[3].y), (74.0, 84.0));
        assert!(p.vertices.iter().all(|v| v.color == Color::WHITE && v.alpha == 1.0));
    }

    #[test]
    fn degenerate_scale_emits_nothing() {
        let store = store();
        let mut sink = RecordingRenderer::new();
        let mut r = BackgroundRenderer::new(&store, room(100, 80), &mut sink);
        r.draw_tiled_ext(0, 0.0, 0.0, 0.0, 1.0, Color::WHITE, 1.0, true, true);
        r.draw_tiled_area_ext(0, 0.0, 0.0, 0.0, 0.0, 50.0, 50.0, -1.0, 1.0, Color::WHITE, 1.0);
        assert!(sink.primitives.is_empty());
    }
}
