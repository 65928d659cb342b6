//! [`Reservation`] read model definitions.

use crate::domain::{guest, room, Reservation};
#[cfg(doc)]
use crate::domain::{reservation::Status, Guest, Room};

/// [`Reservation`] read together with its [`Guest`] contacts and the
/// [`room::Number`]s of its [`Room`]s.
#[derive(Clone, Debug)]
pub struct Overview {
    /// Overviewed [`Reservation`].
    pub reservation: Reservation,

    /// First [`guest::Name`] of the [`Guest`].
    pub guest_first_name: guest::Name,

    /// Last [`guest::Name`] of the [`Guest`].
    pub guest_last_name: guest::Name,

    /// [`guest::Email`] of the [`Guest`].
    pub guest_email: guest::Email,

    /// [`room::Number`]s of the reserved [`Room`]s, sorted.
    pub room_numbers: Vec<room::Number>,
}

impl Overview {
    /// Returns the full name of the [`Guest`].
    #[must_use]
    pub fn guest_full_name(&self) -> String {
        format!("{} {}", self.guest_first_name, self.guest_last_name)
    }
}

/// Selector of [`Overview`]s of the [`Status::Confirmed`] and
/// [`Status::Completed`] [`Reservation`]s, the most recent check-ins first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Active;
