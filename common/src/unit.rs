//! Marker types.

/// Marker type describing an arrival, the first occupied day of a stay.
#[derive(Clone, Copy, Debug)]
pub struct CheckIn;

/// Marker type describing a departure, the first free day after a stay.
#[derive(Clone, Copy, Debug)]
pub struct CheckOut;
