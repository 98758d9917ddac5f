//! Axis parsing.

use crate::chart::TextStyle;
use crate::chart::option::{AxisLabelOption, AxisLineOption, AxisOption, LineStyleOption, Visibility};
use crate::context::RenderContext;
use crate::drawing::color::resolve_solid_fill;
use crate::xml::NodeRef;
use once_cell::sync::Lazy;

/// Parsed state of one `catAx`/`valAx` element.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisInfo {
    pub deleted: bool,
    pub tick_lbl_pos: String,
    pub orientation: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub major_gridlines: bool,
    pub format_code: Option<String>,
    /// Tick label styling from the axis's `txPr`
    pub label_style: TextStyle,
    /// Axis line stroke color from `spPr/ln`
    pub line_color: Option<String>,
}

/// Defaults used for an absent axis element.
pub static DEFAULT_AXIS_INFO: Lazy<AxisInfo> = Lazy::new(|| AxisInfo {
    deleted: false,
    tick_lbl_pos: "nextTo".to_string(),
    orientation: "minMax".to_string(),
    min: None,
    max: None,
    major_gridlines: false,
    format_code: None,
    label_style: TextStyle::default(),
    line_color: None,
});

impl AxisInfo {
    /// Parse an axis element; an absent node yields the defaults.
    pub fn from_node(ax: NodeRef, ctx: &RenderContext<'_>) -> Self {
        if !ax.exists() {
            return DEFAULT_AXIS_INFO.clone();
        }
        let scaling = ax.child("scaling");
        Self {
            deleted: ax.child("delete").bool_attr("val").unwrap_or(false),
            tick_lbl_pos: ax
                .child("tickLblPos")
                .attr("val")
                .unwrap_or("nextTo")
                .to_string(),
            orientation: scaling
                .child("orientation")
                .attr("val")
                .unwrap_or("minMax")
                .to_string(),
            min: scaling.child("min").num_attr("val"),
            max: scaling.child("max").num_attr("val"),
            major_gridlines: ax.child("majorGridlines").exists(),
            format_code: ax
                .child("numFmt")
                .attr("formatCode")
                .map(|c| c.to_string()),
            label_style: TextStyle::from_tx_pr(ax.child("txPr"), ctx),
            line_color: resolve_solid_fill(ax.child("spPr").child("ln"), ctx)
                .map(|c| c.to_css()),
        }
    }

    /// A deleted axis hides everything; `tickLblPos="none"` hides only
    /// the labels.
    #[inline]
    pub fn labels_visible(&self) -> bool {
        !self.deleted && self.tick_lbl_pos != "none"
    }

    #[inline]
    pub fn line_visible(&self) -> bool {
        !self.deleted
    }

    /// Build a category axis option carrying the category labels.
    pub fn category_option(&self, categories: Vec<String>) -> AxisOption {
        AxisOption {
            kind: "category".to_string(),
            data: Some(categories),
            inverse: self.orientation == "maxMin",
            axis_line: self.line_option(),
            axis_tick: Visibility::new(self.line_visible()),
            axis_label: self.label_option(self.format_code.clone()),
            split_line: Visibility::new(false),
            ..Default::default()
        }
    }

    /// Build a value axis option. `fallback_code` is a percent-bearing
    /// series format code used when the axis itself carries none.
    pub fn value_option(&self, fallback_code: Option<&str>) -> AxisOption {
        let format_code = self
            .format_code
            .clone()
            .or_else(|| fallback_code.map(|c| c.to_string()));
        AxisOption {
            kind: "value".to_string(),
            min: self.min,
            max: self.max,
            inverse: self.orientation == "maxMin",
            axis_line: self.line_option(),
            axis_tick: Visibility::new(self.line_visible()),
            axis_label: self.label_option(format_code),
            split_line: Visibility::new(self.major_gridlines && !self.deleted),
            ..Default::default()
        }
    }

    fn line_option(&self) -> AxisLineOption {
        AxisLineOption {
            show: self.line_visible(),
            line_style: self
                .line_color
                .clone()
                .map(|color| LineStyleOption { color: Some(color) }),
        }
    }

    fn label_option(&self, format_code: Option<String>) -> AxisLabelOption {
        AxisLabelOption {
            show: self.labels_visible(),
            format_code,
            color: self.label_style.color.clone(),
            font_size: self.label_style.size_pt,
        }
    }
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
    fn test_absent_axis_defaults() {
        let info = AxisInfo::from_node(NodeRef::absent(), &ctx());
        assert_eq!(info, *DEFAULT_AXIS_INFO);
        assert!(info.labels_visible());
        assert!(!info.major_gridlines);
    }

    #[test]
    fn test_deleted_axis_hides_everything() {
        let doc = XmlNode::parse_str(
            r#"<c:valAx xmlns:c="x"><c:delete val="1"/><c:majorGridlines/></c:valAx>"#,
        )
        .unwrap();
        let info = AxisInfo::from_node(doc.node(), &ctx());
        assert!(info.deleted);
        assert!(!info.labels_visible());
        let opt = info.value_option(None);
        assert!(!opt.axis_line.show);
        assert!(!opt.axis_label.show);
        // gridlines stay off on a deleted axis even when declared
        assert!(!opt.split_line.show);
    }

    #[test]
    fn test_tick_label_position_none_hides_only_labels() {
        let doc = XmlNode::parse_str(
            r#"<c:catAx xmlns:c="x"><c:tickLblPos val="none"/></c:catAx>"#,
        )
        .unwrap();
        let info = AxisInfo::from_node(doc.node(), &ctx());
        assert!(!info.labels_visible());
        assert!(info.line_visible());
    }

    #[test]
    fn test_bounds_and_format_fallback() {
        let doc = XmlNode::parse_str(
            r#"<c:valAx xmlns:c="x">
                <c:scaling><c:orientation val="maxMin"/><c:min val="0"/><c:max val="50"/></c:scaling>
            </c:valAx>"#,
        )
        .unwrap();
        let info = AxisInfo::from_node(doc.node(), &ctx());
        let opt = info.value_option(Some("0.0%"));
        assert_eq!(opt.min, Some(0.0));
        assert_eq!(opt.max, Some(50.0));
        assert!(opt.inverse);
        assert_eq!(opt.axis_label.format_code.as_deref(), Some("0.0%"));

        let doc = XmlNode::parse_str(
            r#"<c:valAx xmlns:c="x"><c:numFmt formatCode="0.00"/></c:valAx>"#,
        )
        .unwrap();
        let own = AxisInfo::from_node(doc.node(), &ctx());
        let opt = own.value_option(Some("0.0%"));
        assert_eq!(opt.axis_label.format_code.as_deref(), Some("0.00"));
    }

    #[test]
    fn test_label_and_line_styling() {
        let doc = XmlNode::parse_str(
            r#"<c:valAx xmlns:c="x" xmlns:a="y">
                <c:spPr><a:ln><a:solidFill><a:srgbClr val="D9D9D9"/></a:solidFill></a:ln></c:spPr>
                <c:txPr><a:p><a:pPr><a:defRPr sz="900">
                    <a:solidFill><a:srgbClr val="595959"/></a:solidFill>
                </a:defRPr></a:pPr></a:p></c:txPr>
            </c:valAx>"#,
        )
        .unwrap();
        let info = AxisInfo::from_node(doc.node(), &ctx());
        assert_eq!(info.label_style.color.as_deref(), Some("#595959"));
        assert_eq!(info.label_style.size_pt, Some(9.0));
        assert_eq!(info.line_color.as_deref(), Some("#D9D9D9"));

        let opt = info.value_option(None);
        assert_eq!(opt.axis_label.color.as_deref(), Some("#595959"));
        assert_eq!(opt.axis_label.font_size, Some(9.0));
        let line_style = opt.axis_line.line_style.unwrap();
        assert_eq!(line_style.color.as_deref(), Some("#D9D9D9"));
    }
}
