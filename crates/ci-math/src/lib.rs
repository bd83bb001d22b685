//! Cafe Intel math utilities.

pub mod math;

pub use math::bins::*;
pub use math::geo::*;
pub use math::rank::*;
