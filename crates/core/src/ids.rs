//! Typed Identifiers

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifier as it appears on the wire.
///
/// The API hands out either numeric or textual identifiers; both are kept
/// verbatim so they round-trip into request paths unchanged. Comparison goes
/// by the path text, so `3` and `"3"` are the same identifier while `"03"` is
/// not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric identifier, e.g. `7`.
    Number(u64),

    /// Textual identifier, e.g. `"65f1c0..."`.
    Text(String),
}

#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
enum IdKey<'a> {
    Number(u64),
    Text(&'a str),
}

impl RawId {
    fn key(&self) -> IdKey<'_> {
        match self {
            Self::Number(number) => IdKey::Number(*number),
            Self::Text(text) => match text.parse::<u64>() {
                Ok(number) if number.to_string() == *text => IdKey::Number(number),
                _ => IdKey::Text(text),
            },
        }
    }
}

impl PartialEq for RawId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RawId {}

impl Hash for RawId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for RawId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RawId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Display for RawId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Number(number) => Display::fmt(number, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for RawId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        value
            .parse::<u64>()
            .map_or_else(|_err| Self::Text(value.to_string()), Self::Number)
    }
}

/// Identifier tagged with the entity it belongs to.
pub struct TypedId<T>(RawId, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw identifier.
    pub const fn from_raw(raw: RawId) -> Self {
        Self(raw, PhantomData)
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub const fn as_raw(&self) -> &RawId {
        &self.0
    }

    /// Unwrap into the raw identifier.
    #[must_use]
    pub fn into_raw(self) -> RawId {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<RawId> for TypedId<T> {
    fn from(value: RawId) -> Self {
        Self::from_raw(value)
    }
}

impl<T> From<u64> for TypedId<T> {
    fn from(value: u64) -> Self {
        Self::from_raw(RawId::Number(value))
    }
}

impl<T> From<&str> for TypedId<T> {
    fn from(value: &str) -> Self {
        Self::from_raw(RawId::from(value))
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(Self::from_raw)
    }
}
