//! Saveable trait for world data that can be written to and read from disk
//!
//! The trait separates "what does this look like on disk" from the file handling
//! in `manager`, so new saveable types only describe their data mapping.

use super::types::SaveError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for types that can be saved and loaded
///
/// # Design Pattern: Trait-based Serialization
///
/// Each implementor picks a plain serde data type (`Data`) as its on-disk shape and
/// converts to/from it. Validation belongs in `from_save_data`: anything that would
/// break an in-memory invariant must be rejected there with
/// `SaveError::CorruptedData` rather than patched up.
///
/// # Example
///
/// ```ignore
/// impl Saveable for Tilemap {
///     type Data = TilemapSaveData;
///
///     fn to_save_data(&self) -> TilemapSaveData { /* ... */ }
///
///     fn from_save_data(data: TilemapSaveData) -> Result<Self, SaveError> { /* ... */ }
/// }
/// ```
pub trait Saveable {
    type Data: Serialize + DeserializeOwned;

    /// Convert to the serializable representation
    fn to_save_data(&self) -> Self::Data;

    /// Rebuild from the serializable representation, validating as we go
    fn from_save_data(data: Self::Data) -> Result<Self, SaveError>
    where
        Self: Sized;
}
