//! Strongly-typed identifiers shared by every relation.
//!
//! Upstream feeds key everything by free-form strings (`EQ001`, `SITE-7`), so the
//! newtypes wrap `String` rather than a UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::FleetError;

/// Identifier of a piece of equipment (unique in the registry, shared key across relations).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(String);

/// Identifier of a job site.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap an identifier without validation.
            ///
            /// Relations are consumed as already-typed input; use `FromStr` when the
            /// value comes from an untrusted source.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $t {
            type Err = FleetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(FleetError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_string_newtype!(EquipmentId, "EquipmentId");
impl_string_newtype!(SiteId, "SiteId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_empty() {
        let id: EquipmentId = " EQ001 ".parse().unwrap();
        assert_eq!(id.as_str(), "EQ001");

        let err = "   ".parse::<SiteId>().unwrap_err();
        assert_eq!(err, FleetError::invalid_id("SiteId: empty"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SiteId::new("S-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"S-1\"");
        let back: SiteId = serde_json::from_str("\"S-1\"").unwrap();
        assert_eq!(back, id);
    }
}
