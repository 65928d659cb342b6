//! [`RoomType`] definitions.

use common::Money;
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Room;

/// Type of a [`Room`], shared by all the [`Room`]s of the same kind.
///
/// Defines the nightly price and the capacity of its [`Room`]s.
#[derive(Clone, Debug)]
pub struct RoomType {
    /// ID of this [`RoomType`].
    pub id: Id,

    /// [`Name`] of this [`RoomType`].
    pub name: Name,

    /// Nightly price of a [`Room`] of this [`RoomType`].
    pub base_price: Money,

    /// Maximum number of guests a [`Room`] of this [`RoomType`] hosts.
    pub capacity: Capacity,
}

impl RoomType {
    /// Maximum number of decimal places in a [`RoomType::base_price`].
    pub const PRICE_SCALE: u32 = 4;

    /// Maximum number of integer digits in a [`RoomType::base_price`].
    pub const PRICE_DIGITS: u32 = 15;

    /// Checks whether the provided `price` is storable as a
    /// [`RoomType::base_price`] without being rounded.
    ///
    /// Negative prices are checked separately.
    #[must_use]
    pub fn fits_price(price: &Money) -> bool {
        let limit = Decimal::from(10_i64.pow(Self::PRICE_DIGITS));
        price.amount.normalize().scale() <= Self::PRICE_SCALE
            && price.amount.abs() < limit
    }
}

/// ID of a [`RoomType`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`RoomType`] (`Single`, `Deluxe Suite`, etc.).
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 64
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Maximum number of guests hosted by a [`Room`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Capacity(i16);

impl Capacity {
    /// Creates a new [`Capacity`] if the given number of `guests` is
    /// positive.
    #[must_use]
    pub fn new(guests: i16) -> Option<Self> {
        (guests > 0).then_some(Self(guests))
    }
}

impl FromStr for Capacity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Capacity`")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;

    use super::{Capacity, Name, RoomType};

    #[test]
    fn validates_name() {
        assert!(Name::new("Deluxe Suite").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" Single").is_none());
        assert!(Name::new("x".repeat(65)).is_none());
    }

    #[test]
    fn validates_capacity() {
        assert!(Capacity::new(2).is_some());
        assert!(Capacity::new(0).is_none());
        assert!(Capacity::new(-1).is_none());
        assert!("4".parse::<Capacity>().is_ok());
        assert!("four".parse::<Capacity>().is_err());
    }

    #[test]
    fn checks_price_fits_storage() {
        for ok in ["100USD", "99.9999EUR", "120.50000GBP", "999999999999999USD"]
        {
            let price = Money::from_str(ok).unwrap();
            assert!(RoomType::fits_price(&price), "{ok}");
        }
        for bad in ["100.00001USD", "1000000000000000USD"] {
            assert!(
                !RoomType::fits_price(&Money::from_str(bad).unwrap()),
                "{bad}",
            );
        }
    }
}
