//! [`Reservation`] definitions.

use common::{define_kind, unit, DateOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use common::Date;

use crate::domain::{guest, room};
#[cfg(doc)]
use crate::domain::{Guest, Room};

/// Reservation of one or more [`Room`]s by a [`Guest`] for a [`Stay`].
#[derive(Clone, Debug)]
pub struct Reservation {
    /// ID of this [`Reservation`].
    pub id: Id,

    /// ID of the [`Guest`] holding this [`Reservation`].
    pub guest_id: guest::Id,

    /// [`Stay`] this [`Reservation`] is made for.
    pub stay: Stay,

    /// IDs of the [`Room`]s linked to this [`Reservation`].
    ///
    /// Sorted and free of duplicates.
    pub room_ids: Vec<room::Id>,

    /// Total amount to be paid for this [`Reservation`].
    pub total: Money,

    /// [`Status`] of this [`Reservation`].
    pub status: Status,
}

impl Reservation {
    /// Indicates whether this [`Reservation`] holds the provided [`Room`]
    /// on any night of the provided [`Stay`].
    #[must_use]
    pub fn occupies(&self, room_id: room::Id, stay: &Stay) -> bool {
        self.status.holds_rooms()
            && self.stay.overlaps(stay)
            && self.room_ids.binary_search(&room_id).is_ok()
    }
}

/// ID of a [`Reservation`].
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

/// [`Date`] of the first night of a [`Stay`].
pub type CheckInDate = DateOf<(Reservation, unit::CheckIn)>;

/// [`Date`] of the departure ending a [`Stay`].
///
/// The night before this [`Date`] is the last night of the [`Stay`], so the
/// [`Room`] is free for another [`Stay`] starting on it.
pub type CheckOutDate = DateOf<(Reservation, unit::CheckOut)>;

/// Half-open range of nights `[check_in, check_out)` spent in a hotel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Stay {
    /// [`CheckInDate`] of this [`Stay`].
    check_in: CheckInDate,

    /// [`CheckOutDate`] of this [`Stay`].
    check_out: CheckOutDate,
}

impl Stay {
    /// Creates a new [`Stay`] if the `check_out` is strictly after the
    /// `check_in`.
    #[must_use]
    pub fn new(
        check_in: CheckInDate,
        check_out: CheckOutDate,
    ) -> Option<Self> {
        (check_out > check_in).then_some(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the [`CheckInDate`] of this [`Stay`].
    #[must_use]
    pub fn check_in(&self) -> CheckInDate {
        self.check_in
    }

    /// Returns the [`CheckOutDate`] of this [`Stay`].
    #[must_use]
    pub fn check_out(&self) -> CheckOutDate {
        self.check_out
    }

    /// Returns the number of nights of this [`Stay`].
    ///
    /// Always at least `1`.
    #[must_use]
    pub fn nights(&self) -> u32 {
        u32::try_from(self.check_out.days_since(&self.check_in))
            .unwrap_or(u32::MAX)
    }

    /// Indicates whether this [`Stay`] shares at least one night with the
    /// `other` one.
    ///
    /// A [`Stay`] ending on the day another one starts doesn't overlap it.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Quotes the total price of this [`Stay`] in [`Room`]s with the provided
    /// nightly prices.
    ///
    /// [`None`] is returned if no prices are provided, if they are in
    /// different currencies, or if the total overflows.
    #[must_use]
    pub fn quote(
        &self,
        nightly: impl IntoIterator<Item = Money>,
    ) -> Option<Money> {
        let nights = self.nights();
        let mut prices = nightly.into_iter();
        let first = prices.next()?.checked_mul(nights)?;
        prices.try_fold(first, |total, p| {
            total.checked_add(p.checked_mul(nights)?)
        })
    }
}

define_kind! {
    #[doc = "Status of a [`Reservation`]."]
    enum Status {
        #[doc = "[`Reservation`] holds its [`Room`]s for its [`Stay`]."]
        Confirmed = 1,

        #[doc = "[`Guest`] has checked out, so the [`Room`]s are free."]
        Completed = 2,

        #[doc = "[`Reservation`] was called off before taking place."]
        Cancelled = 3,
    }
}

impl Status {
    /// Indicates whether a [`Reservation`] in this [`Status`] keeps its
    /// [`Room`]s from being booked by others.
    #[must_use]
    pub fn holds_rooms(self) -> bool {
        self == Self::Confirmed
    }

    /// Indicates whether a [`Reservation`] may move from this [`Status`] into
    /// the `next` one.
    #[must_use]
    pub fn can_transit_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Confirmed, Self::Completed | Self::Cancelled) => true,
            (Self::Confirmed, Self::Confirmed)
            | (Self::Completed | Self::Cancelled, _) => false,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Date, Money};
    use rust_decimal::Decimal;

    use super::{Status, Stay};

    fn stay(check_in: &str, check_out: &str) -> Stay {
        Stay::new(
            Date::parse(check_in).unwrap().coerce(),
            Date::parse(check_out).unwrap().coerce(),
        )
        .unwrap()
    }

    fn usd(amount: i64) -> Money {
        Money {
            amount: Decimal::from(amount),
            currency: Currency::Usd,
        }
    }

    #[test]
    fn rejects_empty_and_reversed_stays() {
        let day = Date::parse("2025-01-05").unwrap();
        assert!(Stay::new(day.coerce(), day.coerce()).is_none());
        assert!(Stay::new(
            day.coerce(),
            day.checked_add_days(-1).unwrap().coerce(),
        )
        .is_none());
        assert!(Stay::new(
            day.coerce(),
            day.checked_add_days(1).unwrap().coerce(),
        )
        .is_some());
    }

    #[test]
    fn counts_nights() {
        assert_eq!(stay("2025-01-01", "2025-01-02").nights(), 1);
        assert_eq!(stay("2025-01-01", "2025-01-05").nights(), 4);
        assert_eq!(stay("2024-02-28", "2024-03-01").nights(), 2);
    }

    #[test]
    fn overlaps_as_half_open_range() {
        let booked = stay("2025-01-01", "2025-01-05");

        assert!(!booked.overlaps(&stay("2025-01-05", "2025-01-08")));
        assert!(!stay("2025-01-05", "2025-01-08").overlaps(&booked));
        assert!(!booked.overlaps(&stay("2024-12-28", "2025-01-01")));

        assert!(booked.overlaps(&stay("2025-01-04", "2025-01-06")));
        assert!(booked.overlaps(&stay("2024-12-31", "2025-01-02")));
        assert!(booked.overlaps(&stay("2025-01-02", "2025-01-03")));
        assert!(booked.overlaps(&stay("2024-12-01", "2025-02-01")));
        assert!(booked.overlaps(&booked));
    }

    #[test]
    fn quotes_sum_over_rooms() {
        let stay = stay("2025-01-01", "2025-01-04");

        assert_eq!(stay.quote([usd(100)]), Some(usd(300)));
        assert_eq!(stay.quote([usd(100), usd(80)]), Some(usd(540)));
        assert_eq!(stay.quote(std::iter::empty()), None);
        assert_eq!(
            stay.quote([
                usd(100),
                Money {
                    amount: Decimal::from(80),
                    currency: Currency::Eur,
                },
            ]),
            None,
        );

        let huge = Money {
            amount: Decimal::MAX,
            currency: Currency::Usd,
        };
        assert_eq!(stay.quote([huge]), None);
        assert_eq!(stay.quote([usd(1), huge]), None);
    }

    #[test]
    fn transits_only_from_confirmed() {
        assert!(Status::Confirmed.can_transit_to(Status::Cancelled));
        assert!(Status::Confirmed.can_transit_to(Status::Completed));
        assert!(!Status::Confirmed.can_transit_to(Status::Confirmed));
        for from in [Status::Completed, Status::Cancelled] {
            for &to in Status::ALL {
                assert!(!from.can_transit_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn only_confirmed_holds_rooms() {
        assert!(Status::Confirmed.holds_rooms());
        assert!(!Status::Completed.holds_rooms());
        assert!(!Status::Cancelled.holds_rooms());
    }
}
