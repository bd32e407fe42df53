//! Newtype IDs for the stored entities.
//!
//! Each ID wraps the `SERIAL` primary key of its table, so a `UserId` can
//! never be passed where a `CategoryId` is expected.

/// Declare one or more `i32` ID newtypes.
///
/// Every generated type is `Copy`, hashable, serializes as a bare number,
/// parses from and displays as its decimal value, and (with the `postgres`
/// feature) maps to `INTEGER` through `#[sqlx(transparent)]`.
///
/// # Example
///
/// ```rust
/// # use mercantile_core::define_id;
/// define_id!(AccountId, ShelfId);
///
/// let account_id: AccountId = "12".parse().unwrap();
/// assert_eq!(account_id.as_i32(), 12);
///
/// // Distinct types; this does not compile:
/// // let _: AccountId = ShelfId::new(1);
/// ```
#[macro_export]
macro_rules! define_id {
    ($($name:ident),+ $(,)?) => {$(
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    )+};
}

define_id!(UserId, CategoryId, ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrips_through_i32() {
        let id = ProductId::from(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
    }

    #[test]
    fn test_id_display_and_parse() {
        assert_eq!(CategoryId::new(7).to_string(), "7");
        assert_eq!(" 7 ".parse::<CategoryId>().unwrap(), CategoryId::new(7));
        assert!("seven".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_ids_order_numerically() {
        assert!(UserId::new(2) < UserId::new(10));
    }
}
