//! Identifiers for stops and routes.
//!
//! Both are `Arc<str>` so they can be copied into itineraries and milestones
//! without reallocating.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }
    };
}

impl_identifier!(StopId);
impl_identifier!(RouteId);

impl StopId {
    /// Derive a stop identity from its display name.
    ///
    /// Lowercases, collapses every run of non-alphanumeric characters into a
    /// single `-` and trims leading/trailing dashes, so "Bankerohan  Market"
    /// and "bankerohan-market!" name the same stop.
    pub fn from_name(name: &str) -> Self {
        Self::new(normalize_name(name))
    }
}

impl RouteId {
    pub fn from_parts(route_number: &str, time_period: &str) -> Self {
        Self::new(format!("{route_number}-{time_period}"))
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StopId::new("roxas-avenue");
        let id2 = StopId::new("roxas-avenue");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0));
    }

    #[test]
    fn test_normalized_stop_names() {
        assert_eq!(StopId::from_name("Bankerohan Market").as_str(), "bankerohan-market");
        assert_eq!(StopId::from_name("  Bankerohan -- MARKET!! ").as_str(), "bankerohan-market");
        assert_eq!(StopId::from_name("SM City (Ecoland)").as_str(), "sm-city-ecoland");
        assert_eq!(StopId::from_name("---").as_str(), "");
    }

    #[test]
    fn test_route_id_from_parts() {
        assert_eq!(RouteId::from_parts("R103", "AM").as_str(), "R103-AM");
    }

    #[test]
    fn test_identifier_serde_as_string() {
        let id = RouteId::new("R103-AM");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"R103-AM\"");
        let back: RouteId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
