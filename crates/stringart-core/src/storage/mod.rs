//! Named scene storage.
//!
//! Backends hold each scene as its JSON document text under a short name,
//! like the browser editor keeps its drawing in local storage. Loading
//! parses and resolves the document, so a stored scene that no longer
//! resolves is reported as damaged instead of being half loaded.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::document::{DocumentError, SceneDocument};
use crate::scene::Scene;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use thiserror::Error;

/// Longest accepted scene name.
pub const MAX_NAME_LEN: usize = 64;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No stored scene named {0:?}")]
    NotFound(String),
    #[error("Invalid scene name {0:?}: use 1-64 letters, digits, '-' or '_'")]
    InvalidName(String),
    #[error("Stored scene {name:?} is damaged: {source}")]
    Damaged {
        name: String,
        #[source]
        source: DocumentError,
    },
    #[error("Failed to encode scene: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future so the embedding layer can complete I/O asynchronously.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Check a scene name. Names double as file stems, so only a conservative
/// character set is allowed.
pub fn validate_name(name: &str) -> StorageResult<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

/// A backend holding document text by name.
///
/// Implementors provide raw text access; scene-level saving and loading is
/// layered on top by the provided methods.
pub trait Storage: Send + Sync {
    /// Read the document text stored under `name`.
    fn read(&self, name: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Store document text under `name`, replacing any previous scene.
    fn write(&self, name: &str, json: String) -> BoxFuture<'_, StorageResult<()>>;

    /// Remove a stored scene. Returns whether anything was removed.
    fn remove(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;

    /// Names of all stored scenes, sorted.
    fn names(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Serialize `scene` and store it under `name`.
    fn save_scene<'a>(&'a self, name: &'a str, scene: &Scene) -> BoxFuture<'a, StorageResult<()>> {
        let json = SceneDocument::from_scene(scene).to_json();
        Box::pin(async move {
            validate_name(name)?;
            self.write(name, json?).await?;
            log::info!("Stored scene {name:?}");
            Ok(())
        })
    }

    /// Load and resolve the scene stored under `name`.
    fn load_scene<'a>(&'a self, name: &'a str) -> BoxFuture<'a, StorageResult<Scene>> {
        Box::pin(async move {
            validate_name(name)?;
            let json = self.read(name).await?;
            SceneDocument::from_json(&json)
                .and_then(|document| document.to_scene())
                .map_err(|source| StorageError::Damaged {
                    name: name.to_string(),
                    source,
                })
        })
    }
}
