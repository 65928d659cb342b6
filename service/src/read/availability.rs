//! Availability read model definitions.

use common::Money;

use crate::{
    domain::{reservation::Stay, room},
    read::room::Listing,
};
#[cfg(doc)]
use crate::domain::{reservation::Status, Reservation, Room};

/// Selector of the available [`Room`]s not occupied by any
/// [`Status::Confirmed`] [`Reservation`] overlapping the [`Stay`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Vacant(pub Stay);

/// Selector of the [`Room`]s among the provided ones which are occupied by a
/// [`Status::Confirmed`] [`Reservation`] overlapping the [`Stay`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Occupied {
    /// [`Stay`] to check the [`Room`]s for.
    pub stay: Stay,

    /// IDs of the [`Room`]s to check.
    pub room_ids: Vec<room::Id>,
}

/// Result of searching [`Room`]s available for a [`Stay`].
///
/// Reflects the moment of the search only, so booking re-checks it.
#[derive(Clone, Debug)]
pub struct Search {
    /// [`Stay`] the search was performed for.
    stay: Stay,

    /// [`Listing`]s of the found [`Room`]s, ordered by [`room::Number`].
    rooms: Vec<Listing>,
}

impl Search {
    /// Creates a new [`Search`] result out of the provided [`Listing`]s.
    #[must_use]
    pub fn new(stay: Stay, mut rooms: Vec<Listing>) -> Self {
        rooms.sort_by(|a, b| a.room.number.cmp(&b.room.number));
        Self { stay, rooms }
    }

    /// Returns the [`Stay`] this [`Search`] was performed for.
    #[must_use]
    pub fn stay(&self) -> Stay {
        self.stay
    }

    /// Returns the found [`Listing`]s, ordered by [`room::Number`].
    #[must_use]
    pub fn rooms(&self) -> &[Listing] {
        &self.rooms
    }

    /// Returns the number of nights of the searched [`Stay`].
    #[must_use]
    pub fn nights(&self) -> u32 {
        self.stay.nights()
    }

    /// Indicates whether the [`Room`] was found by this [`Search`].
    #[must_use]
    pub fn contains(&self, room_id: room::Id) -> bool {
        self.rooms.iter().any(|l| l.room.id == room_id)
    }

    /// Quotes the total price of booking the provided found [`Room`]s for
    /// the searched [`Stay`].
    ///
    /// [`None`] is returned if any of the [`Room`]s wasn't found, or if
    /// their prices are in different currencies.
    #[must_use]
    pub fn quote(&self, room_ids: &[room::Id]) -> Option<Money> {
        let prices = room_ids
            .iter()
            .map(|id| {
                self.rooms
                    .iter()
                    .find(|l| l.room.id == *id)
                    .map(Listing::nightly_price)
            })
            .collect::<Option<Vec<_>>>()?;
        self.stay.quote(prices)
    }
}
