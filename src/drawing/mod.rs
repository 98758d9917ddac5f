//! Fill and color resolution for drawing markup.

pub mod color;
pub mod gradient;

pub use color::{ResolvedColor, resolve_color, resolve_solid_fill};
pub use gradient::{GradientFill, GradientStop, resolve_gradient_fill};
