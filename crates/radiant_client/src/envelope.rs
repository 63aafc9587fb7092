use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::Deref;
use tracing::warn;

/// Wrapper every asset endpoint puts around its payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub data: T,
}

/// A list that skips elements which fail to decode instead of failing as a whole.
///
/// The agents endpoint has shipped malformed entries before; one broken
/// element must not take the whole category down with it.
#[derive(Debug, Clone, PartialEq)]
pub struct LossyList<T>(pub Vec<T>);

impl<T> LossyList<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for LossyList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LossyList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let mut items = Vec::with_capacity(raw.len());

        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(item) => items.push(item),
                Err(e) => warn!(index, error = %e, "Skipping malformed list element"),
            }
        }

        Ok(Self(items))
    }
}
