//! Status and category enums for catalog entities.
//!
//! All enums here are stored in Postgres as TEXT and converted through
//! `as_str`/`FromStr`, so no database enum types are required.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an enum from its stored text form.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unrecognized {kind} value: {value}")]
pub struct ParseEnumError {
    /// Which enum failed to parse.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// The stored text form of this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// All values, in declaration order.
            #[must_use]
            pub const fn all() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        kind: stringify!($name),
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

text_enum! {
    /// Catalog grouping a product belongs to.
    ProductCategory {
        Rings => "rings",
        Necklaces => "necklaces",
        Earrings => "earrings",
        Bracelets => "bracelets",
        Pendants => "pendants",
        Sets => "sets",
    }
}

text_enum! {
    /// Kind of inbound contact inquiry.
    InquiryType {
        General => "general",
        CustomDesign => "custom_design",
        Repair => "repair",
        OrderStatus => "order_status",
        Wholesale => "wholesale",
    }
}

text_enum! {
    /// Lifecycle status of a contact submission.
    SubmissionStatus {
        New => "new",
        Read => "read",
        Replied => "replied",
    }
}

text_enum! {
    /// Kind of product mutation recorded in the audit trail.
    ChangeType {
        Created => "created",
        Updated => "updated",
        Deleted => "deleted",
    }
}

text_enum! {
    /// Staff role for back-office access.
    AdminRole {
        SuperAdmin => "super_admin",
        Admin => "admin",
        Viewer => "viewer",
    }
}

text_enum! {
    /// Catalog sort order.
    CatalogSort {
        Popularity => "popularity",
        PriceAsc => "price_asc",
        PriceDesc => "price_desc",
        Newest => "newest",
    }
}

impl Default for InquiryType {
    fn default() -> Self {
        Self::General
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::New
    }
}

impl Default for CatalogSort {
    fn default() -> Self {
        Self::Popularity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_text_roundtrip() {
        for category in ProductCategory::all() {
            assert_eq!(
                ProductCategory::from_str(category.as_str()).expect("roundtrip"),
                *category
            );
        }
        for status in SubmissionStatus::all() {
            assert_eq!(
                SubmissionStatus::from_str(status.as_str()).expect("roundtrip"),
                *status
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = AdminRole::from_str("owner").expect_err("unknown role");
        assert_eq!(err.kind, "AdminRole");
        assert_eq!(err.value, "owner");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&InquiryType::CustomDesign).expect("serialize");
        assert_eq!(json, "\"custom_design\"");
        let back: InquiryType = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, InquiryType::CustomDesign);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::New);
        assert_eq!(CatalogSort::default(), CatalogSort::Popularity);
    }
}
