//! Legend placement.

use crate::chart::TextStyle;
use crate::chart::option::LegendOption;
use crate::common::fmt::fmt_num_2dp;
use crate::context::RenderContext;
use crate::xml::NodeRef;

/// Build the legend option. An absent legend element means hidden.
pub fn legend_option(legend: NodeRef, ctx: &RenderContext<'_>) -> LegendOption {
    if !legend.exists() {
        return LegendOption::hidden();
    }

    let mut option = LegendOption {
        show: true,
        ..Default::default()
    };
    match legend.child("legendPos").attr("val").unwrap_or("r") {
        "b" => {
            option.orient = Some("horizontal".to_string());
            option.bottom = Some("0".to_string());
        },
        "t" => {
            option.orient = Some("horizontal".to_string());
            // leave room for the title above
            option.top = Some("6%".to_string());
        },
        "l" => {
            option.orient = Some("vertical".to_string());
            option.left = Some("0".to_string());
        },
        "tr" => {
            option.orient = Some("vertical".to_string());
            option.top = Some("6%".to_string());
            option.right = Some("0".to_string());
        },
        // "r" and anything unrecognized
        _ => {
            option.orient = Some("vertical".to_string());
            option.right = Some("0".to_string());
        },
    }

    option.overlay = legend.child("overlay").bool_attr("val").unwrap_or(false);

    // Explicit manual layout fractions replace the computed placement.
    let manual = legend.descend(&["layout", "manualLayout"]);
    if manual.exists() {
        if let Some(x) = manual.child("x").num_attr("val") {
            option.left = Some(layout_pct(x));
            option.right = None;
        }
        if let Some(y) = manual.child("y").num_attr("val") {
            option.top = Some(layout_pct(y));
            option.bottom = None;
        }
        if let Some(w) = manual.child("w").num_attr("val") {
            option.width = Some(layout_pct(w));
        }
        if let Some(h) = manual.child("h").num_attr("val") {
            option.height = Some(layout_pct(h));
        }
    }

    let style = TextStyle::from_tx_pr(legend.child("txPr"), ctx);
    option.text_style = style.into_option();
    option
}

/// A 0..1 layout fraction as a percent string, two decimals at most.
pub fn layout_pct(fraction: f64) -> String {
    format!("{}%", fmt_num_2dp(fraction * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Theme;
    use crate::xml::XmlNode;

    fn ctx() -> RenderContext<'static> {
        RenderContext::new(Theme::default())
    }

    #[test]
    fn test_absent_legend_hidden() {
        let option = legend_option(NodeRef::absent(), &ctx());
        assert!(!option.show);
    }

    #[test]
    fn test_position_codes() {
        for (code, check) in [
            ("b", "horizontal-bottom"),
            ("t", "horizontal-top"),
            ("l", "vertical-left"),
            ("tr", "vertical-top-right"),
            ("r", "vertical-right"),
            ("zz", "vertical-right"),
        ] {
            let xml =
                format!(r#"<c:legend xmlns:c="x"><c:legendPos val="{code}"/></c:legend>"#);
            let doc = XmlNode::parse_str(&xml).unwrap();
            let option = legend_option(doc.node(), &ctx());
            assert!(option.show);
            match check {
                "horizontal-bottom" => {
                    assert_eq!(option.orient.as_deref(), Some("horizontal"));
                    assert!(option.bottom.is_some());
                },
                "horizontal-top" => {
                    assert_eq!(option.orient.as_deref(), Some("horizontal"));
                    assert!(option.top.is_some());
                },
                "vertical-left" => {
                    assert_eq!(option.orient.as_deref(), Some("vertical"));
                    assert!(option.left.is_some());
                },
                "vertical-top-right" => {
                    assert_eq!(option.orient.as_deref(), Some("vertical"));
                    assert!(option.top.is_some() && option.right.is_some());
                },
                _ => {
                    assert_eq!(option.orient.as_deref(), Some("vertical"));
                    assert!(option.right.is_some());
                },
            }
        }
    }

    #[test]
    fn test_manual_layout_overrides() {
        let doc = XmlNode::parse_str(
            r#"<c:legend xmlns:c="x">
                <c:legendPos val="r"/>
                <c:overlay val="1"/>
                <c:layout><c:manualLayout>
                    <c:x val="0.125"/><c:y val="0.3333"/><c:w val="0.25"/><c:h val="0.1"/>
                </c:manualLayout></c:layout>
            </c:legend>"#,
        )
        .unwrap();
        let option = legend_option(doc.node(), &ctx());
        assert!(option.overlay);
        assert_eq!(option.left.as_deref(), Some("12.5%"));
        assert_eq!(option.top.as_deref(), Some("33.33%"));
        assert_eq!(option.width.as_deref(), Some("25%"));
        assert_eq!(option.height.as_deref(), Some("10%"));
        assert!(option.right.is_none());
    }
}
