//! [`Guest`] definitions.

use std::sync::LazyLock;

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Reservation;

/// Hotel guest, the holder of [`Reservation`]s.
#[derive(Clone, Debug)]
pub struct Guest {
    /// ID of this [`Guest`].
    pub id: Id,

    /// First [`Name`] of this [`Guest`].
    pub first_name: Name,

    /// Last [`Name`] of this [`Guest`].
    pub last_name: Name,

    /// [`Email`] of this [`Guest`], unique among all [`Guest`]s.
    pub email: Email,

    /// [`Phone`] of this [`Guest`].
    pub phone: Phone,

    /// Postal [`Address`] of this [`Guest`], if provided.
    pub address: Option<Address>,
}

impl Guest {
    /// Returns the full name of this [`Guest`].
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// ID of a [`Guest`].
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

/// First or last name of a [`Guest`].
#[derive(AsRef, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd)]
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
        name.trim() == name && !name.is_empty() && name.len() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a [`Guest`].
///
/// Compared as is, so addresses differing only in case are distinct.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format:
        /// - Exactly one `@` separating a local part and a domain;
        /// - No whitespace anywhere;
        /// - Domain contains a dot not at its edges.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`Guest`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format: an optional leading
        /// `+` followed by digits, optionally grouped by single spaces,
        /// dashes or parentheses.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?[\d()]+([-\s]?[\d()]+)*$").expect("valid regex")
        });

        let number = number.as_ref();
        number.len() <= 32
            && number.chars().filter(char::is_ascii_digit).count() >= 3
            && REGEX.is_match(number)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Postal address of a [`Guest`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address && !address.is_empty() && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Address, Email, Name, Phone};

    #[test]
    fn validates_name() {
        assert!(Name::new("Ada").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new("   ").is_none());
        assert!(Name::new("Ada ").is_none());
    }

    #[test]
    fn validates_email() {
        assert!(Email::new("ada@example.com").is_some());
        assert!(Email::new("ada.lovelace+hotel@mail.example.org").is_some());
        assert!(Email::new("").is_none());
        assert!(Email::new("ada").is_none());
        assert!(Email::new("ada@example").is_none());
        assert!(Email::new("ada@@example.com").is_none());
        assert!(Email::new("ada @example.com").is_none());
        assert!(Email::new("ada@example.").is_none());
    }

    #[test]
    fn validates_phone() {
        assert!(Phone::new("+1 555-123-4567").is_some());
        assert!(Phone::new("(044) 123 45 67").is_some());
        assert!(Phone::new("5551234").is_some());
        assert!(Phone::new("").is_none());
        assert!(Phone::new("call me").is_none());
        assert!(Phone::new("12").is_none());
        assert!(Phone::new("555  1234").is_none());
    }

    #[test]
    fn validates_address() {
        assert!(Address::new("221B Baker Street, London").is_some());
        assert!(Address::new("").is_none());
        assert!(Address::new(" Baker Street").is_none());
    }
}
