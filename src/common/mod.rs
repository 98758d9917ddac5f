//! Shared utilities: unit conversion, color math and numeric formatting.

pub mod color;
pub mod fmt;
pub mod unit;

pub use color::RGBColor;
