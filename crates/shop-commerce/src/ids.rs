//! Newtype IDs for type-safe identifiers.
//!
//! The backend hands out numeric identifiers for every resource. Wrapping
//! them prevents passing a `CartItemId` where a `ProductId` is expected, a
//! mix-up the cart endpoints would happily accept.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A server-assigned identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(CustomerId);
define_id!(OrderId);
define_id!(OrderItemId);
define_id!(CartItemId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(123);
        assert_eq!(id.get(), 123);
    }

    #[test]
    fn test_id_parse() {
        let id: CartItemId = " 42 ".parse().unwrap();
        assert_eq!(id, CartItemId::new(42));
        assert!("abc".parse::<CartItemId>().is_err());
    }

    #[test]
    fn test_id_display() {
        let id = OrderId::new(789);
        assert_eq!(format!("{}", id), "789");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&CategoryId::new(7)).unwrap();
        assert_eq!(json, "7");
        let id: CategoryId = serde_json::from_str("7").unwrap();
        assert_eq!(id, CategoryId::new(7));
    }
}
