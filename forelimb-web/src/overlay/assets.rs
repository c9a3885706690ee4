//! Model asset bookkeeping - which load belongs to which selection
//!
//! Loading happens on the host and is asynchronous, so a load started for a
//! species the user has already switched away from can finish late. Every
//! selection bumps a generation counter; a completion is applied only when
//! its ticket carries the current generation. Successful loads are cached by
//! path either way, so switching back reuses the loaded source.

use std::collections::HashMap;

use serde::Serialize;

use super::model::{AssetHandle, ModelSlot};
use crate::config::SpeciesEntry;

/// Superseded loads kept around so a late success can still be cached
const MAX_STALE_LOADS: usize = 8;

/// Handed to the host when a model must be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadTicket {
    pub generation: u64,
    pub species: String,
    pub path: String,
}

/// Outcome of selecting a species
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRequest {
    /// Species has no model; the wireframe is shown
    NoAsset,
    /// Already loaded earlier; shown immediately
    Cached(AssetHandle),
    /// Host must load `ticket.path` and report back with `ticket.generation`
    Load(LoadTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    NoPath,
    Loading(u64),
    Ready(AssetHandle),
    Failed,
}

pub struct AssetTracker {
    generation: u64,
    selected: Option<String>,
    state: LoadState,
    /// In-flight loads: generation → path
    in_flight: HashMap<u64, String>,
    /// Loaded sources by path
    cache: HashMap<String, AssetHandle>,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self {
            generation: 0,
            selected: None,
            state: LoadState::NoPath,
            in_flight: HashMap::new(),
            cache: HashMap::new(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Switch to `species`. Any load still in flight becomes stale.
    pub fn select(&mut self, species: &SpeciesEntry) -> AssetRequest {
        self.generation += 1;
        self.selected = Some(species.id.clone());
        self.prune_stale();

        let Some(path) = species.model_path.as_ref() else {
            self.state = LoadState::NoPath;
            return AssetRequest::NoAsset;
        };

        if let Some(&handle) = self.cache.get(path) {
            log::debug!("Reusing cached model {path} for {}", species.id);
            self.state = LoadState::Ready(handle);
            return AssetRequest::Cached(handle);
        }

        self.state = LoadState::Loading(self.generation);
        self.in_flight.insert(self.generation, path.clone());
        log::info!("Loading model {path} for {} (generation {})", species.id, self.generation);
        AssetRequest::Load(LoadTicket {
            generation: self.generation,
            species: species.id.clone(),
            path: path.clone(),
        })
    }

    /// Forget the oldest superseded loads the host never reported back on
    fn prune_stale(&mut self) {
        while self.in_flight.len() > MAX_STALE_LOADS {
            let Some(&oldest) = self.in_flight.keys().min() else {
                break;
            };
            if let Some(path) = self.in_flight.remove(&oldest) {
                log::debug!("Abandoning load of {path} (generation {oldest})");
            }
        }
    }

    /// Apply a finished load. Returns `true` when it changed what is shown.
    pub fn complete(&mut self, generation: u64, result: Result<AssetHandle, String>) -> bool {
        let Some(path) = self.in_flight.remove(&generation) else {
            log::warn!("Ignoring completion for unknown load generation {generation}");
            return false;
        };

        if let Ok(handle) = &result {
            self.cache.insert(path.clone(), *handle);
        }

        if self.state != LoadState::Loading(generation) {
            log::debug!("Discarding stale load of {path} (generation {generation})");
            return false;
        }

        self.state = match result {
            Ok(handle) => LoadState::Ready(handle),
            Err(message) => {
                log::error!("Error loading model {path}: {message}");
                LoadState::Failed
            }
        };
        true
    }

    pub fn slot(&self) -> ModelSlot {
        match self.state {
            LoadState::NoPath | LoadState::Loading(_) => ModelSlot::Wireframe,
            LoadState::Ready(handle) => ModelSlot::LoadedAsset(handle),
            LoadState::Failed => ModelSlot::NoModel,
        }
    }
}

impl Default for AssetTracker {
    fn default() -> Self {
        Self::new()
    }
}
