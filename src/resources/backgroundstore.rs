//! Background registry.
//!
//! Backgrounds live in an id-indexed slot arena: ids are handed out
//! sequentially on insert and never reused, so a removed background leaves a
//! tombstone behind and stale ids fail cleanly. Records also register under
//! a name for asset-by-name lookup, and the whole registry can be populated
//! from a JSON manifest.
//!
//! Renderers only read records; load/unload must not race a render pass.
//! The registry performs no locking of its own.

use bevy_ecs::prelude::Resource;
use log::{error, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::graphics::primitives::TextureHandle;

/// GameMaker-style integer asset id. Negative values are always invalid.
pub type BackgroundId = i32;

/// UV sub-rectangle of a shared texture page, in fractional coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct AtlasRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One loaded background image. Immutable once inserted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Background {
    /// Native width in pixels.
    pub width: f32,
    /// Native height in pixels.
    pub height: f32,
    /// Atlas rectangle occupied on the texture page.
    pub atlas: AtlasRect,
    /// Texture page holding the image data.
    pub texture: TextureHandle,
}

/// Manifest entry: a named background definition.
#[derive(Debug, Deserialize, Serialize)]
pub struct BackgroundDef {
    pub name: String,
    #[serde(flatten)]
    pub background: Background,
}

/// Registry of loaded backgrounds, indexed by [`BackgroundId`].
#[derive(Resource, Debug, Default)]
pub struct BackgroundStore {
    slots: Vec<Option<Background>>,
    names: FxHashMap<String, BackgroundId>,
    strict: bool,
}

impl BackgroundStore {
    /// Create an empty store. Handle validation diagnostics follow the build
    /// profile: enabled in debug builds, skipped in release builds.
    pub fn new() -> Self {
        BackgroundStore {
            slots: Vec::new(),
            names: FxHashMap::default(),
            strict: cfg!(debug_assertions),
        }
    }

    /// Override the diagnostic mode chosen by [`BackgroundStore::new`].
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether failed lookups are reported through the log.
    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Insert a background under a name and return its new id.
    pub fn insert(&mut self, name: impl Into<String>, background: Background) -> BackgroundId {
        let id = self.slots.len() as BackgroundId;
        self.slots.push(Some(background));
        self.names.insert(name.into(), id);
        id
    }

    /// Remove a background, leaving a tombstone. The id is never reused.
    pub fn remove(&mut self, id: BackgroundId) -> Option<Background> {
        let slot = self.slots.get_mut(usize::try_from(id).ok()?)?;
        let removed = slot.take();
        if removed.is_some() {
            self.names.retain(|_, v| *v != id);
        }
        removed
    }

    /// Plain lookup: `None` for negative, out-of-range, or removed ids.
    pub fn get(&self, id: BackgroundId) -> Option<&Background> {
        self.slots.get(usize::try_from(id).ok()?)?.as_ref()
    }

    /// Guarded lookup used by every draw operation: like [`get`], but a miss
    /// is reported through the diagnostic sink in strict mode. The caller
    /// turns `None` into a no-op (or a `-1` sentinel for value queries).
    ///
    /// [`get`]: BackgroundStore::get
    pub fn lookup(&self, id: BackgroundId) -> Option<&Background> {
        let found = self.get(id);
        if found.is_none() && self.strict {
            error!("Attempting to draw non-existing background {id}");
        }
        found
    }

    /// Resolve a background name to its id.
    pub fn id_of(&self, name: impl AsRef<str>) -> Option<BackgroundId> {
        self.names.get(name.as_ref()).copied()
    }

    /// Number of live (non-tombstoned) backgrounds.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load background definitions from a JSON manifest (an array of
    /// [`BackgroundDef`]) and insert them all. Returns how many were added.
    pub fn load_manifest(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let defs: Vec<BackgroundDef> = serde_json::from_str(json)?;
        let count = defs.len();
        for def in defs {
            let id = self.insert(def.name.clone(), def.background);
            info!("Loaded background '{}' as id {}", def.name, id);
        }
        Ok(count)
    }
}
