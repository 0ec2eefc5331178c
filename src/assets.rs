//! Asset manifest, loading gate and named lookup
//!
//! Images and audio load asynchronously in the browser. Each completion or
//! failure is reported to an [`AssetGate`], which the game loop polls while
//! in the `Loading` phase.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading assets
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("failed to load asset '{name}': {reason}")]
    LoadFailed { name: String, reason: String },
    #[error("asset loading timed out after {waited_ms:.0}ms ({completed}/{expected} loaded)")]
    TimedOut {
        completed: usize,
        expected: usize,
        waited_ms: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Image,
    Audio,
}

impl AssetKind {
    /// Whether the welcome screen waits for this asset.
    ///
    /// Some browsers hold back media preloading until a user gesture, and a
    /// missing clip falls back to silence, so only images gate the start.
    pub fn gates_start(self) -> bool {
        matches!(self, AssetKind::Image)
    }
}

/// One entry of the asset manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSpec {
    pub name: &'static str,
    pub path: &'static str,
    pub kind: AssetKind,
}

/// Asset names used by the renderer and audio
pub mod names {
    pub const CHICKEN: &str = "chicken";
    pub const CHICKEN_WALK_1: &str = "chicken_walk_1";
    pub const CHICKEN_WALK_2: &str = "chicken_walk_2";
    pub const CHICKEN_JUMP: &str = "chicken_jump";
    pub const EGG: &str = "egg";
    pub const EGG_CRACKED: &str = "egg_cracked";
    pub const MASCOT: &str = "mascot";
    pub const CLUCK: &str = "cluck";
    pub const POP: &str = "pop";
}

/// Everything the game loads before the welcome screen
pub const MANIFEST: &[AssetSpec] = &[
    AssetSpec { name: names::CHICKEN, path: "img/chicken.png", kind: AssetKind::Image },
    AssetSpec { name: names::CHICKEN_WALK_1, path: "img/chicken_walk_1.png", kind: AssetKind::Image },
    AssetSpec { name: names::CHICKEN_WALK_2, path: "img/chicken_walk_2.png", kind: AssetKind::Image },
    AssetSpec { name: names::CHICKEN_JUMP, path: "img/chicken_jump.png", kind: AssetKind::Image },
    AssetSpec { name: names::EGG, path: "img/egg.png", kind: AssetKind::Image },
    AssetSpec { name: names::EGG_CRACKED, path: "img/egg_cracked.png", kind: AssetKind::Image },
    AssetSpec { name: names::MASCOT, path: "img/mascot.png", kind: AssetKind::Image },
    AssetSpec { name: names::CLUCK, path: "audio/cluck.mp3", kind: AssetKind::Audio },
    AssetSpec { name: names::POP, path: "audio/pop.mp3", kind: AssetKind::Audio },
];

/// Number of manifest entries the loading gate waits for
pub fn gated_count() -> usize {
    MANIFEST.iter().filter(|s| s.kind.gates_start()).count()
}

/// Loading progress as seen by the game loop
#[derive(Debug, Clone, PartialEq)]
pub enum GateStatus {
    Pending { completed: usize, expected: usize },
    Ready,
    Failed(AssetError),
}

/// Join-all over the asset loads, with a timeout and a failure path
#[derive(Debug, Clone)]
pub struct AssetGate {
    expected: usize,
    loaded: HashSet<String>,
    started_at: f64,
    timeout_ms: f64,
    failure: Option<AssetError>,
}

impl AssetGate {
    pub fn new(expected: usize, started_at: f64, timeout_ms: f64) -> Self {
        Self {
            expected,
            loaded: HashSet::new(),
            started_at,
            timeout_ms,
            failure: None,
        }
    }

    pub fn completed(&self) -> usize {
        self.loaded.len()
    }

    /// One asset finished loading; repeats for the same name count once
    pub fn complete(&mut self, name: &str) {
        if self.loaded.contains(name) {
            return;
        }
        if self.loaded.len() >= self.expected {
            log::warn!("Unexpected completion for '{}'", name);
            return;
        }
        self.loaded.insert(name.to_string());
        log::debug!("Loaded '{}' ({}/{})", name, self.loaded.len(), self.expected);
    }

    /// One asset failed; the first failure wins
    pub fn fail(&mut self, name: &str, reason: impl Into<String>) {
        let err = AssetError::LoadFailed {
            name: name.to_string(),
            reason: reason.into(),
        };
        log::warn!("{}", err);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    /// Ready exactly when every expected asset has completed
    pub fn poll(&self, now: f64) -> GateStatus {
        if let Some(err) = &self.failure {
            return GateStatus::Failed(err.clone());
        }
        let completed = self.loaded.len();
        if completed == self.expected {
            return GateStatus::Ready;
        }
        let waited_ms = now - self.started_at;
        if waited_ms >= self.timeout_ms {
            return GateStatus::Failed(AssetError::TimedOut {
                completed,
                expected: self.expected,
                waited_ms,
            });
        }
        GateStatus::Pending {
            completed,
            expected: self.expected,
        }
    }
}

/// Loaded assets by name; unknown names resolve to a fallback
#[derive(Debug, Clone)]
pub struct AssetStore<T> {
    items: HashMap<String, T>,
    fallback: T,
}

impl<T> AssetStore<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            items: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, item: T) {
        self.items.insert(name.into(), item);
    }

    /// Named asset, or the fallback when it is missing
    pub fn get(&self, name: &str) -> &T {
        self.items.get(name).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
