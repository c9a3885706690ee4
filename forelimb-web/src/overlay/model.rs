//! What the overlay draws for the selected species

/// Host-side id of a loaded model scene graph. The host clones the source
/// graph per display so switching species never mutates the cached original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(pub u32);

/// Render backend for the current species, picked once per selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSlot {
    /// Load failed: nothing is drawn
    NoModel,
    /// No model yet (none configured, or still loading): draw the hand wireframe
    Wireframe,
    /// Host draws this asset with the overlay's transform
    LoadedAsset(AssetHandle),
}

impl ModelSlot {
    /// Numeric tag for the flat JS transform buffer
    pub fn code(&self) -> f32 {
        match self {
            Self::NoModel => 0.0,
            Self::Wireframe => 1.0,
            Self::LoadedAsset(_) => 2.0,
        }
    }

    pub fn handle(&self) -> Option<AssetHandle> {
        match self {
            Self::LoadedAsset(handle) => Some(*handle),
            _ => None,
        }
    }
}
