//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every record in the atlas has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. All IDs use UUID v7 (time-ordered)
//! so that BTreeMap-indexed stores iterate records in insertion order.
//!
//! The `new()` constructors exist for app-side generation (tests, seed
//! data); an external store may mint its own ids and convert via `From`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a society (one culture/population record).
    SocietyId
}

define_id! {
    /// Unique identifier for a language.
    LanguageId
}

define_id! {
    /// Unique identifier for a language family (classification root).
    LanguageFamilyId
}

define_id! {
    /// Unique identifier for a phylogenetic language tree.
    LanguageTreeId
}

define_id! {
    /// Unique identifier for a cultural variable description.
    VariableId
}

define_id! {
    /// Unique identifier for one code of a categorical variable.
    CodeId
}

define_id! {
    /// Unique identifier for one coded observation of a cultural variable.
    CodedValueId
}

define_id! {
    /// Unique identifier for an environmental variable.
    EnvironmentalVariableId
}

define_id! {
    /// Unique identifier for one environmental measurement.
    EnvironmentalValueId
}

define_id! {
    /// Unique identifier for a geographic region polygon.
    RegionId
}

define_id! {
    /// Unique identifier for a bibliographic source.
    SourceId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let society = SocietyId::new();
        let language = LanguageId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(society.into_inner(), Uuid::nil());
        assert_ne!(language.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = SocietyId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<SocietyId, _> = serde_json::from_str(
            json.as_deref().unwrap_or(""),
        );
        assert!(restored.is_ok());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = RegionId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
