//! Pitaya - presentation rendering primitives
//!
//! The transformation core of a slide renderer: resolving OOXML drawing
//! and chart markup into renderer-ready structures.
//!
//! Two components do the heavy lifting:
//!
//! - **Text style cascade** ([`text`]): merges the seven layers of
//!   presentation text styling (presentation defaults, master styles,
//!   placeholder list-styles, shape list-style, paragraph and run
//!   properties) and renders paragraphs into a lightweight DOM.
//! - **Chart translator** ([`chart`]): projects a `chartSpace` document
//!   onto a generic declarative chart-option object plus an optional
//!   data-table model.
//!
//! Both are total, synchronous transformations over an immutable XML
//! tree: malformed or partial input degrades to documented defaults
//! instead of failing.
//!
//! # Example - rendering a text body
//!
//! ```
//! use pitaya::context::{RenderContext, Theme};
//! use pitaya::dom::Element;
//! use pitaya::text::{TextBodyOptions, render_text_body};
//! use pitaya::xml::{NodeRef, XmlNode};
//!
//! # fn main() -> pitaya::Result<()> {
//! let doc = XmlNode::parse_str(
//!     r#"<p:txBody xmlns:p="p" xmlns:a="a">
//!         <a:p><a:r><a:t>Hello</a:t></a:r></a:p>
//!     </p:txBody>"#,
//! )?;
//!
//! let ctx = RenderContext::new(Theme::default());
//! let mut container = Element::new("div");
//! render_text_body(
//!     doc.node(),
//!     None,
//!     NodeRef::absent(),
//!     NodeRef::absent(),
//!     &ctx,
//!     &TextBodyOptions::default(),
//!     &mut container,
//! );
//! assert_eq!(container.text_content(), "Hello");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - translating a chart
//!
//! ```
//! use pitaya::chart::translate_chart;
//! use pitaya::context::{RenderContext, Theme};
//! use pitaya::xml::XmlNode;
//!
//! # fn main() -> pitaya::Result<()> {
//! let doc = XmlNode::parse_str(r#"<c:chartSpace xmlns:c="c"/>"#)?;
//! let ctx = RenderContext::new(Theme::default());
//! let out = translate_chart(doc.node(), &ctx);
//! assert!(out.option.is_unsupported());
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod common;
pub mod context;
pub mod dom;
pub mod drawing;
pub mod error;
pub mod text;
pub mod xml;

pub use chart::{ChartOption, ChartOutput, translate_chart};
pub use context::{RenderContext, Theme};
pub use dom::Element;
pub use error::{Error, Result};
pub use text::{TextBodyOptions, render_text_body};
pub use xml::{NodeRef, XmlNode};
