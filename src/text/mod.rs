//! Text style cascade and paragraph rendering.

pub mod cascade;
pub mod hyperlink;
pub mod render;
pub mod style;

pub use cascade::{Placeholder, resolve_paragraph_style};
pub use hyperlink::is_allowed_external_url;
pub use render::{TextBodyOptions, render_text_body};
pub use style::{ParagraphStyle, RunStyle};
