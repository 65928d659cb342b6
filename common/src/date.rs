//! Calendar date utilities.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use derive_more::{Debug, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::macros::format_description;

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date without any time zone attached.
///
/// The `Of` type parameter describes the meaning of the date (check-in,
/// check-out, etc.), so dates of different meaning cannot be mixed up by
/// accident, while still being comparable with each other.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar_date(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day)
            .ok()
            .map(Self::from)
    }

    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        time::OffsetDateTime::now_utc().date().into()
    }

    /// Parses a [`Date`] from the `YYYY-MM-DD` format.
    ///
    /// # Errors
    ///
    /// If the `input` is not a valid `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input, format_description!("[year]-[month]-[day]"))
            .map(Self::from)
            .map_err(ParseError)
    }

    /// Returns the number of whole days passed from the `earlier` [`Date`]
    /// till this one.
    ///
    /// Negative if the `earlier` [`Date`] is actually later than this one.
    #[must_use]
    pub fn days_since<Other: ?Sized>(&self, earlier: &DateOf<Other>) -> i64 {
        (self.inner - earlier.inner).whole_days()
    }

    /// Returns the [`Date`] shifted by the provided number of `days`.
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        self.inner
            .checked_add(time::Duration::days(days))
            .map(Self::from)
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> From<time::Date> for DateOf<Of> {
    fn from(inner: time::Date) -> Self {
        Self {
            inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<DateOf<Of>> for time::Date {
    fn from(date: DateOf<Of>) -> Self {
        date.inner
    }
}

impl<Of: ?Sized> FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.inner.to_calendar_date();
        write!(f, "{year:04}-{:02}-{day:02}", u8::from(month))
    }
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized, Other: ?Sized> PartialEq<DateOf<Other>> for DateOf<Of> {
    fn eq(&self, other: &DateOf<Other>) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized, Other: ?Sized> PartialOrd<DateOf<Other>> for DateOf<Of> {
    fn partial_cmp(&self, other: &DateOf<Other>) -> Option<Ordering> {
        Some(self.inner.cmp(&other.inner))
    }
}

impl<Of: ?Sized> Hash for DateOf<Of> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> FromSql<'_> for DateOf<Of> {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self::from)
    }
}

#[cfg(feature = "postgres")]
impl<Of: ?Sized> ToSql for DateOf<Of> {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.inner.to_sql(ty, w)
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::DateOf;

    impl<Of: ?Sized> Serialize for DateOf<Of> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateOf<Of> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Self::parse(&s).map_err(D::Error::custom)
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in a `YYYY-MM-DD` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = crate::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::parse(s).map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Date;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats() {
        assert_eq!(
            date("2025-01-05"),
            Date::from_calendar_date(2025, 1, 5).unwrap(),
        );
        assert_eq!(date("2025-01-05").to_string(), "2025-01-05");
        assert_eq!(date("0999-12-31").to_string(), "0999-12-31");

        assert!(Date::parse("2025-1-5").is_err());
        assert!(Date::parse("2025-02-30").is_err());
        assert!(Date::parse("05.01.2025").is_err());
        assert!(Date::parse("").is_err());
    }

    #[test]
    fn counts_days() {
        assert_eq!(date("2025-01-05").days_since(&date("2025-01-01")), 4);
        assert_eq!(date("2025-03-01").days_since(&date("2024-02-28")), 367);
        assert_eq!(date("2025-01-01").days_since(&date("2025-01-05")), -4);
        assert_eq!(date("2025-01-01").days_since(&date("2025-01-01")), 0);
    }

    #[test]
    fn compares_across_kinds() {
        struct CheckIn;
        struct CheckOut;

        let check_in = date("2025-01-05").coerce::<CheckIn>();
        let check_out = date("2025-01-05").coerce::<CheckOut>();
        assert!(check_in == check_out);
        assert!(check_in < date("2025-01-06").coerce::<CheckOut>());
        assert!(
            date("2025-01-01").checked_add_days(31).unwrap()
                == date("2025-02-01")
        );
    }
}
