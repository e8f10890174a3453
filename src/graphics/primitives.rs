//! Immediate-mode primitive stream.
//!
//! The background emitters do not talk to a GPU directly; they push vertices
//! into anything implementing [`PrimitiveRenderer`]. A backend adapter
//! (OpenGL, DirectX, a software rasterizer) translates begin/vertex/end
//! calls into real draw commands. [`RecordingRenderer`] is the sink used by
//! tests and the demo binary.

use log::warn;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Primitive topologies understood by the collaborator renderer.
///
/// Background drawing only ever emits [`PrimitiveKind::TriangleStrip`]; the
/// remaining variants mirror the full immediate-mode contract so other
/// emitters can share the same sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
    TriangleFan,
}

/// Opaque handle to a texture page owned by the graphics backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TextureHandle(pub u32);

/// Packed color value, passed through the vertex stream unmodified.
///
/// No channel decoding happens anywhere in this crate; the backend decides
/// how to interpret the bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0x00FF_FFFF);
}

/// One vertex of the immediate stream. 2D emitters set `z = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub u: f32,
    pub v: f32,
    pub color: Color,
    pub alpha: f32,
}

/// Immediate-mode vertex sink.
///
/// Synchronous and single-threaded by contract: the backing graphics context
/// is assumed current on the calling thread, and every primitive is complete
/// before the emitting call returns.
pub trait PrimitiveRenderer {
    /// Open a textured primitive of the given topology.
    fn begin_texture(&mut self, kind: PrimitiveKind, texture: TextureHandle);
    /// Append a vertex to the open primitive.
    fn vertex(&mut self, v: Vertex);
    /// Close the open primitive.
    fn end(&mut self);
}

/// A finished primitive captured by [`RecordingRenderer`].
#[derive(Clone, Debug)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub texture: TextureHandle,
    pub vertices: SmallVec<[Vertex; 4]>,
}

/// Capturing sink for tests and headless runs.
///
/// Stores every completed primitive in emission order. Out-of-sequence
/// calls (vertex or end with no open primitive, begin while one is open)
/// are logged and dropped rather than panicking.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub primitives: Vec<Primitive>,
    open: Option<Primitive>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all captured primitives, keeping the sink usable.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.open = None;
    }

    /// Total vertices across all captured primitives.
    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.vertices.len()).sum()
    }
}

impl PrimitiveRenderer for RecordingRenderer {
    fn begin_texture(&mut self, kind: PrimitiveKind, texture: TextureHandle) {
        if self.open.is_some() {
            warn!("begin_texture while a primitive is open, discarding the open one");
        }
        self.open = Some(Primitive {
            kind,
            texture,
            vertices: SmallVec::new(),
        });
    }

    fn vertex(&mut self, v: Vertex) {
        match self.open.as_mut() {
            Some(p) => p.vertices.push(v),
            None => warn!("vertex with no open primitive, dropped"),
        }
    }

    fn end(&mut self) {
        match self.open.take() {
            Some(p) => self.primitives.push(p),
            None => warn!("end with no open primitive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_a_complete_primitive() {
        let mut sink = RecordingRenderer::new();
        sink.begin_texture(PrimitiveKind::TriangleStrip, TextureHandle(3));
        sink.vertex(Vertex {
            x: 1.0,
            y: 2.0,
            z: 0.0,
            u: 0.0,
            v: 0.0,
            color: Color::WHITE,
            alpha: 1.0,
        });
        sink.end();

        assert_eq!(sink.primitives.len(), 1);
        assert_eq!(sink.primitives[0].kind, PrimitiveKind::TriangleStrip);
        assert_eq!(sink.primitives[0].texture, TextureHandle(3));
        assert_eq!(sink.vertex_count(), 1);
    }

    #[test]
    fn stray_calls_are_dropped() {
        let mut sink = RecordingRenderer::new();
        sink.vertex(Vertex {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            u: 0.0,
            v: 0.0,
            color: Color::WHITE,
            alpha: 1.0,
        });
        sink.end();
        assert!(sink.primitives.is_empty());
    }

    #[test]
    fn clear_resets_captures() {
        let mut sink = RecordingRenderer::new();
        sink.begin_texture(PrimitiveKind::TriangleStrip, TextureHandle(0));
        sink.end();
        sink.clear();
        assert!(sink.primitives.is_empty());
    }
}
