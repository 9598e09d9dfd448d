//! Frontend widget settings derived from rendered element data.

pub mod slider;

pub use slider::{SliderCommand, SliderMount, SliderSettings};
