//! Newtype IDs for type-safe identifiers.
//!
//! Every identifier here originates in the product database or the payment
//! provider; the storefront never mints its own.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Product document id.
    ProductId
);
define_id!(
    /// Category document id.
    CategoryId
);
define_id!(
    /// Supplier item number, the public product key used in product URLs.
    ItemNumber
);
define_id!(
    /// Hosted checkout session id.
    CheckoutSessionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "prod-456".into();
        assert_eq!(id.as_str(), "prod-456");
        assert_eq!(format!("{}", id), "prod-456");
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(ItemNumber::new("DC-100"), ItemNumber::new("DC-100"));
        assert_ne!(ItemNumber::new("DC-100"), ItemNumber::new("DC-101"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ItemNumber::new("GL-2231")).unwrap();
        assert_eq!(json, "\"GL-2231\"");
        let back: ItemNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "GL-2231");
    }

    #[test]
    fn test_blank_id_is_empty() {
        assert!(CategoryId::new("  ").is_empty());
        assert!(!CategoryId::new("cat-1").is_empty());
    }
}
