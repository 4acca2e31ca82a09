//! Shared utilities: easing curves used by transition interpolation.

pub mod easing;
