//! The seven-layer text style cascade.
//!
//! Paragraph style is resolved by merging, lowest priority first:
//!
//! 1. the presentation's default text style,
//! 2. the master's per-category text style (title/body/other),
//! 3. the master placeholder's own list-style,
//! 4. the layout placeholder's own list-style,
//! 5. the shape's own list-style,
//! 6. the paragraph's own properties.
//!
//! Layer 7 (the run's own properties) is resolved per run by the renderer.
//! Layers 1-5 select a sub-style by nesting level; layers 3-4 first locate
//! the matching placeholder shape by `idx`, falling back to `type`.

use crate::context::RenderContext;
use crate::text::style::{MAX_INDENT_LEVEL, ParagraphStyle, merge_paragraph_props};
use crate::xml::NodeRef;

/// Placeholder descriptor of the shape being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placeholder<'a> {
    /// Placeholder type code (`title`, `body`, `sldNum`, ...)
    pub ph_type: Option<&'a str>,
    /// Placeholder index
    pub idx: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    /// Read the placeholder descriptor off a shape node, if it has one.
    pub fn from_shape(sp: NodeRef<'a>) -> Option<Placeholder<'a>> {
        let ph = sp.descend(&["nvSpPr", "nvPr", "ph"]);
        if !ph.exists() {
            return None;
        }
        Some(Placeholder {
            ph_type: ph.attr("type"),
            idx: ph.attr("idx"),
        })
    }
}

/// Master text style category a placeholder type selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleCategory {
    Title,
    Body,
    Other,
}

/// Map a placeholder type to its master text style category.
pub fn placeholder_category(ph_type: Option<&str>) -> StyleCategory {
    match ph_type {
        Some("title" | "ctrTitle") => StyleCategory::Title,
        Some("body" | "subTitle" | "obj" | "dt" | "ftr" | "sldNum") => StyleCategory::Body,
        _ => StyleCategory::Other,
    }
}

impl StyleCategory {
    /// Element name of this category inside the master's `txStyles`.
    #[inline]
    pub const fn element_name(&self) -> &'static str {
        match self {
            Self::Title => "titleStyle",
            Self::Body => "bodyStyle",
            Self::Other => "otherStyle",
        }
    }
}

/// Select the per-level sub-style of a list-style node: `lvl{n+1}pPr`,
/// else the style's `defPPr` fallback.
pub(crate) fn level_style<'a>(lst_style: NodeRef<'a>, level: usize) -> NodeRef<'a> {
    let name = format!("lvl{}pPr", level.min(MAX_INDENT_LEVEL) + 1);
    let node = lst_style.child(&name);
    if node.exists() {
        node
    } else {
        lst_style.child("defPPr")
    }
}

/// Find the placeholder shape matching a descriptor: first by `idx`
/// equality, then by `type` equality.
pub(crate) fn find_placeholder<'a>(
    candidates: &[NodeRef<'a>],
    ph: Placeholder<'_>,
) -> NodeRef<'a> {
    if let Some(idx) = ph.idx {
        for &sp in candidates {
            if sp.descend(&["nvSpPr", "nvPr", "ph"]).attr("idx") == Some(idx) {
                return sp;
            }
        }
    }
    if let Some(ph_type) = ph.ph_type {
        for &sp in candidates {
            if sp.descend(&["nvSpPr", "nvPr", "ph"]).attr("type") == Some(ph_type) {
                return sp;
            }
        }
    }
    NodeRef::absent()
}

/// Resolve the merged paragraph style across cascade layers 1-6.
pub fn resolve_paragraph_style<'a>(
    ppr: NodeRef<'a>,
    level: usize,
    placeholder: Option<Placeholder<'_>>,
    shape_lst_style: NodeRef<'a>,
    ctx: &RenderContext<'a>,
) -> ParagraphStyle<'a> {
    let mut style = ParagraphStyle::default();

    // 1. presentation default text style
    merge_paragraph_props(&mut style, level_style(ctx.default_text_style, level));

    // 2. master category style
    let category = placeholder_category(placeholder.and_then(|p| p.ph_type));
    let category_style = ctx.master_text_styles.child(category.element_name());
    merge_paragraph_props(&mut style, level_style(category_style, level));

    // 3-4. master then layout placeholder list-styles
    if let Some(ph) = placeholder {
        for candidates in [&ctx.master_placeholders, &ctx.layout_placeholders] {
            let sp = find_placeholder(candidates, ph);
            let lst = sp.descend(&["txBody", "lstStyle"]);
            merge_paragraph_props(&mut style, level_style(lst, level));
        }
    }

    // 5. shape list-style
    merge_paragraph_props(&mut style, level_style(shape_lst_style, level));

    // 6. paragraph properties, no level indirection
    merge_paragraph_props(&mut style, ppr);

    style
}

/// The shape list-style's level-specific default run properties node,
/// used by the renderer to rescue a color suppressed by an empty higher
/// layer `defRPr`.
pub(crate) fn shape_level_def_rpr<'a>(
    shape_lst_style: NodeRef<'a>,
    level: usize,
) -> NodeRef<'a> {
    level_style(shape_lst_style, level).child("defRPr")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{RenderContext, Theme};
    use crate::text::style::{Alignment, Bullet};
    use crate::xml::XmlNode;

    #[test]
    fn test_category_mapping() {
        assert_eq!(placeholder_category(Some("title")), StyleCategory::Title);
        assert_eq!(placeholder_category(Some("ctrTitle")), StyleCategory::Title);
        assert_eq!(placeholder_category(Some("body")), StyleCategory::Body);
        assert_eq!(placeholder_category(Some("sldNum")), StyleCategory::Body);
        assert_eq!(placeholder_category(Some("pic")), StyleCategory::Other);
        assert_eq!(placeholder_category(None), StyleCategory::Other);
    }

    #[test]
    fn test_level_selection_with_fallback() {
        let doc = XmlNode::parse_str(
            r#"<a:lstStyle xmlns:a="x">
                <a:defPPr algn="r"/>
                <a:lvl1pPr algn="ctr"/>
            </a:lstStyle>"#,
        )
        .unwrap();
        let lst = doc.node();
        assert_eq!(level_style(lst, 0).attr("algn"), Some("ctr"));
        // no lvl2pPr: falls back to defPPr
        assert_eq!(level_style(lst, 1).attr("algn"), Some("r"));
    }

    #[test]
    fn test_placeholder_matching_idx_before_type() {
        let doc = XmlNode::parse_str(
            r#"<p:spTree xmlns:p="x">
                <p:sp><p:nvSpPr><p:nvPr><p:ph type="body" idx="2"/></p:nvPr></p:nvSpPr></p:sp>
                <p:sp><p:nvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr></p:sp>
            </p:spTree>"#,
        )
        .unwrap();
        let shapes: Vec<_> = doc.node().children("sp").collect();

        let by_idx = find_placeholder(
            &shapes,
            Placeholder {
                ph_type: Some("body"),
                idx: Some("1"),
            },
        );
        assert_eq!(
            by_idx.descend(&["nvSpPr", "nvPr", "ph"]).attr("idx"),
            Some("1")
        );

        // unmatched idx falls through to type matching
        let by_type = find_placeholder(
            &shapes,
            Placeholder {
                ph_type: Some("body"),
                idx: Some("9"),
            },
        );
        assert_eq!(
            by_type.descend(&["nvSpPr", "nvPr", "ph"]).attr("idx"),
            Some("2")
        );

        let none = find_placeholder(
            &shapes,
            Placeholder {
                ph_type: Some("title"),
                idx: None,
            },
        );
        assert!(!none.exists());
    }

    #[test]
    fn test_cascade_override_monotonicity() {
        // master body style says centered with a dash bullet; the shape
        // list-style overrides the bullet; the paragraph overrides align.
        let master = XmlNode::parse_str(
            r#"<p:txStyles xmlns:p="x" xmlns:a="y">
                <p:bodyStyle><a:lvl1pPr algn="ctr"><a:buChar char="-"/></a:lvl1pPr></p:bodyStyle>
            </p:txStyles>"#,
        )
        .unwrap();
        let shape_lst = XmlNode::parse_str(
            r#"<a:lstStyle xmlns:a="y"><a:lvl1pPr><a:buChar char="*"/></a:lvl1pPr></a:lstStyle>"#,
        )
        .unwrap();
        let para = XmlNode::parse_str(r#"<a:pPr xmlns:a="y" algn="r"/>"#).unwrap();

        let mut ctx = RenderContext::new(Theme::default());
        ctx.master_text_styles = master.node();

        let style = resolve_paragraph_style(
            para.node(),
            0,
            Some(Placeholder {
                ph_type: Some("body"),
                idx: None,
            }),
            shape_lst.node(),
            &ctx,
        );

        assert_eq!(style.align, Some(Alignment::Right));
        assert_eq!(style.bullet, Some(Bullet::Char("*".to_string())));
    }
}
