//! Chart document translation.
//!
//! Turns a `chartSpace` document into the generic option model of
//! [`option`], plus an optional data-table companion. The translation is
//! total: structurally unusable input yields a placeholder option, never
//! an error.

pub mod axis;
pub mod format;
pub mod label;
pub mod legend;
pub mod option;
pub mod palette;
pub mod series;
pub mod translate;

pub use format::format_value;
pub use option::{ChartOption, DataPoint, DataTable, SeriesOption};
pub use translate::{ChartOutput, translate_chart};

use crate::common::unit::centipt_to_pt;
use crate::context::RenderContext;
use crate::drawing::color::resolve_solid_fill;
use crate::xml::NodeRef;

/// Text styling read off a `txPr` element (or a `rich` body, which nests
/// its default run properties the same way). Shared by titles, legends
/// and data labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyle {
    pub color: Option<String>,
    pub size_pt: Option<f64>,
    pub bold: Option<bool>,
}

impl TextStyle {
    pub fn from_tx_pr(tx_pr: NodeRef, ctx: &RenderContext<'_>) -> Self {
        let def_rpr = tx_pr.descend(&["p", "pPr", "defRPr"]);
        Self {
            color: resolve_solid_fill(def_rpr, ctx).map(|c| c.to_css()),
            size_pt: def_rpr.num_attr("sz").map(centipt_to_pt),
            bold: def_rpr.bool_attr("b"),
        }
    }

    /// Convert into the option-tree representation, `None` when empty.
    pub fn into_option(self) -> Option<option::TextStyleOption> {
        let style = option::TextStyleOption {
            color: self.color,
            font_size: self.size_pt,
            font_weight: self.bold.and_then(|b| b.then(|| "bold".to_string())),
        };
        (!style.is_empty()).then_some(style)
    }
}

/// Text of a `tx` reference: rich-text runs joined across paragraphs,
/// else the first cached string value.
pub(crate) fn rich_or_cached_text(tx: NodeRef) -> Option<String> {
    let rich = tx.child("rich");
    if rich.exists() {
        let mut out = String::new();
        for p in rich.children("p") {
            for r in p.children("r") {
                out.push_str(&r.child("t").text());
            }
        }
        return (!out.is_empty()).then_some(out);
    }
    let cached = tx.descend(&["strRef", "strCache", "pt", "v"]).text();
    (!cached.is_empty()).then_some(cached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Theme;
    use crate::xml::XmlNode;

    #[test]
    fn test_rich_text_joins_runs() {
        let doc = XmlNode::parse_str(
            r#"<c:tx xmlns:c="x" xmlns:a="y"><c:rich>
                <a:p><a:r><a:t>Sales </a:t></a:r><a:r><a:t>2024</a:t></a:r></a:p>
            </c:rich></c:tx>"#,
        )
        .unwrap();
        assert_eq!(rich_or_cached_text(doc.node()).as_deref(), Some("Sales 2024"));
    }

    #[test]
    fn test_cached_string_fallback() {
        let doc = XmlNode::parse_str(
            r#"<c:tx xmlns:c="x"><c:strRef><c:strCache>
                <c:pt idx="0"><c:v>Series 1</c:v></c:pt>
            </c:strCache></c:strRef></c:tx>"#,
        )
        .unwrap();
        assert_eq!(rich_or_cached_text(doc.node()).as_deref(), Some("Series 1"));
        assert!(rich_or_cached_text(NodeRef::absent()).is_none());
    }

    #[test]
    fn test_text_style_reader() {
        let ctx = RenderContext::new(Theme::default());
        let doc = XmlNode::parse_str(
            r#"<c:txPr xmlns:c="x" xmlns:a="y"><a:p><a:pPr><a:defRPr sz="1400" b="1">
                <a:solidFill><a:srgbClr val="404040"/></a:solidFill>
            </a:defRPr></a:pPr></a:p></c:txPr>"#,
        )
        .unwrap();
        let style = TextStyle::from_tx_pr(doc.node(), &ctx);
        assert_eq!(style.size_pt, Some(14.0));
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.color.as_deref(), Some("#404040"));

        let empty = TextStyle::from_tx_pr(NodeRef::absent(), &ctx);
        assert!(empty.into_option().is_none());
    }
}
