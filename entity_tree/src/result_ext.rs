//! Extensions for mapping errors to `ModelResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(ModelError::…))`
//! patterns when converting `serde_json` failures into the crate's
//! `ModelResult<T>` alias (`Result<T, Arc<ModelError>>`).
//!
//! - Use [`ModelResultExt::into_model`] for error types that implement
//!   `Into<ModelError>` and carry no field context.
//! - Use [`FieldResultExt::for_field`] when the failure belongs to a specific
//!   entity field and should become [`ModelError::InvalidValue`].
//!
//! # Examples
//!
//! ```
//! use entity_tree::{FieldResultExt, ModelResult, ModelResultExt};
//!
//! fn encode() -> ModelResult<serde_json::Value> {
//!     serde_json::to_value(&42).into_model()
//! }
//!
//! fn decode(value: serde_json::Value) -> ModelResult<u16> {
//!     serde_json::from_value(value).for_field("Server", "port")
//! }
//! ```

use std::sync::Arc;

use crate::{ModelError, ModelResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<ModelError>`
/// into a `ModelResult<T>`.
pub trait ModelResultExt<T, E> {
    /// Convert `Result<T, E>` into `ModelResult<T>` using `Into<ModelError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ModelError>`.
    fn into_model(self) -> ModelResult<T>;
}

impl<T, E> ModelResultExt<T, E> for Result<T, E>
where
    E: Into<ModelError>,
{
    fn into_model(self) -> ModelResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension tailored to attributing `serde_json` failures to an entity field.
pub trait FieldResultExt<T> {
    /// Convert `Result<T, serde_json::Error>` into `ModelResult<T>` as a
    /// [`ModelError::InvalidValue`] naming `entity` and `field`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidValue` wrapped in `Arc` when the input is
    /// `Err`.
    fn for_field(self, entity: &'static str, field: &str) -> ModelResult<T>;
}

impl<T> FieldResultExt<T> for Result<T, serde_json::Error> {
    fn for_field(self, entity: &'static str, field: &str) -> ModelResult<T> {
        self.map_err(|e| Arc::new(ModelError::invalid_value(entity, field, e)))
    }
}
