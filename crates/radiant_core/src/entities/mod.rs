//! Per-category records as served by the asset API.
//!
//! Field names mirror the API's camelCase JSON so persisted snapshots use the
//! same shape as the wire format.

mod agents;
mod cosmetics;
mod gameplay;
mod progression;
mod weapons;

pub use agents::*;
pub use cosmetics::*;
pub use gameplay::*;
pub use progression::*;
pub use weapons::*;

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
