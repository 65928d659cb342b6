//! [`Room`] definitions.

use common::define_kind;
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::room_type;
#[cfg(doc)]
use crate::domain::RoomType;

/// Hotel room.
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// [`Number`] of this [`Room`] shown to guests.
    pub number: Number,

    /// ID of the [`RoomType`] of this [`Room`].
    pub room_type_id: room_type::Id,

    /// [`Floor`] this [`Room`] is located on.
    pub floor: Floor,

    /// [`Status`] of this [`Room`].
    pub status: Status,
}

impl Room {
    /// Indicates whether this [`Room`] may be booked at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == Status::Available
    }
}

/// ID of a [`Room`].
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

/// Number of a [`Room`] (`101`, `12B`, etc.).
///
/// [`Room`]s are listed in the lexicographical order of their [`Number`]s.
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Number`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        !number.is_empty()
            && number.len() <= 16
            && number.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

/// Floor of a [`Room`].
///
/// Negative for basement floors.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Floor(i16);

define_kind! {
    #[doc = "Status of a [`Room`]."]
    enum Status {
        #[doc = "[`Room`] may be booked."]
        Available = 1,

        #[doc = "[`Room`] is taken out of service and cannot be booked."]
        OutOfService = 2,
    }
}

#[cfg(test)]
mod spec {
    use super::{Number, Status};

    #[test]
    fn validates_number() {
        assert!(Number::new("101").is_some());
        assert!(Number::new("12B").is_some());
        assert!(Number::new("PH-1").is_some());
        assert!(Number::new("").is_none());
        assert!(Number::new("1 01").is_none());
        assert!(Number::new("1".repeat(17)).is_none());
    }

    #[test]
    fn orders_numbers_lexicographically() {
        let mut numbers = ["201", "101", "102"]
            .into_iter()
            .map(|n| Number::new(n).unwrap())
            .collect::<Vec<_>>();
        numbers.sort();
        assert_eq!(
            numbers.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>(),
            ["101", "102", "201"],
        );
    }

    #[test]
    fn encodes_status() {
        assert_eq!(Status::Available.u8(), 1);
        assert_eq!(Status::from_u8(2), Some(Status::OutOfService));
        assert_eq!(Status::from_u8(3), None);
        assert_eq!(Status::OutOfService.to_string(), "OUT_OF_SERVICE");
    }
}
