//! Data label configuration.
//!
//! `dLbls` appears at chart-type level and per series; a series without
//! its own falls back to the chart-type-level config. `dLbl` children
//! hold sparse per-point patches that overlay only the fields they carry.

use std::collections::HashMap;

use crate::chart::TextStyle;
use crate::chart::option::{LabelFormatter, SeriesLabelOption};
use crate::context::RenderContext;
use crate::xml::NodeRef;

/// Resolved label configuration of one `dLbls` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLabelConfig {
    pub show_value: bool,
    pub show_category: bool,
    pub show_series: bool,
    pub show_percent: bool,
    pub position: Option<String>,
    pub style: TextStyle,
}

impl DataLabelConfig {
    /// Whether any part of the label is requested.
    #[inline]
    pub fn shows_anything(&self) -> bool {
        self.show_value || self.show_category || self.show_series || self.show_percent
    }
}

/// Read a `dLbls` element; `None` when absent.
pub fn read_data_labels(dlbls: NodeRef, ctx: &RenderContext<'_>) -> Option<DataLabelConfig> {
    if !dlbls.exists() {
        return None;
    }
    Some(DataLabelConfig {
        show_value: show_flag(dlbls, "showVal"),
        show_category: show_flag(dlbls, "showCatName"),
        show_series: show_flag(dlbls, "showSerName"),
        show_percent: show_flag(dlbls, "showPercent"),
        position: dlbls
            .child("dLblPos")
            .attr("val")
            .and_then(map_position)
            .map(|p| p.to_string()),
        style: TextStyle::from_tx_pr(dlbls.child("txPr"), ctx),
    })
}

fn show_flag(dlbls: NodeRef, name: &str) -> bool {
    dlbls.child(name).bool_attr("val").unwrap_or(false)
}

fn map_position(code: &str) -> Option<&'static str> {
    match code {
        "ctr" => Some("inside"),
        "inEnd" => Some("insideTop"),
        "inBase" => Some("insideBottom"),
        "outEnd" => Some("top"),
        "l" => Some("left"),
        "r" => Some("right"),
        "t" => Some("top"),
        "b" => Some("bottom"),
        "bestFit" => Some("outside"),
        _ => None,
    }
}

/// Per-point label patch: only explicitly present fields overlay the base.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLabelPatch {
    pub delete: bool,
    pub show_value: Option<bool>,
    pub show_category: Option<bool>,
    pub show_series: Option<bool>,
    pub show_percent: Option<bool>,
    pub position: Option<String>,
    pub style: TextStyle,
}

/// Collect the sparse `dLbl` patches of a series' `dLbls` element.
pub fn read_label_patches(
    dlbls: NodeRef,
    ctx: &RenderContext<'_>,
) -> HashMap<usize, DataLabelPatch> {
    let mut patches = HashMap::new();
    for dlbl in dlbls.children("dLbl") {
        let Some(idx) = dlbl.child("idx").num_attr("val").map(|v| v as usize) else {
            continue;
        };
        patches.insert(
            idx,
            DataLabelPatch {
                delete: dlbl.child("delete").bool_attr("val").unwrap_or(false),
                show_value: dlbl.child("showVal").bool_attr("val"),
                show_category: dlbl.child("showCatName").bool_attr("val"),
                show_series: dlbl.child("showSerName").bool_attr("val"),
                show_percent: dlbl.child("showPercent").bool_attr("val"),
                position: dlbl
                    .child("dLblPos")
                    .attr("val")
                    .and_then(map_position)
                    .map(|p| p.to_string()),
                style: TextStyle::from_tx_pr(dlbl.child("txPr"), ctx),
            },
        );
    }
    patches
}

/// Overlay a patch on a base config without mutating the base.
pub fn apply_patch(base: &DataLabelConfig, patch: &DataLabelPatch) -> DataLabelConfig {
    DataLabelConfig {
        show_value: patch.show_value.unwrap_or(base.show_value),
        show_category: patch.show_category.unwrap_or(base.show_category),
        show_series: patch.show_series.unwrap_or(base.show_series),
        show_percent: patch.show_percent.unwrap_or(base.show_percent),
        position: patch.position.clone().or_else(|| base.position.clone()),
        style: TextStyle {
            color: patch.style.color.clone().or_else(|| base.style.color.clone()),
            size_pt: patch.style.size_pt.or(base.style.size_pt),
            bold: patch.style.bold.or(base.style.bold),
        },
    }
}

/// Build the series-level label option, using the pie percent-of-total
/// function formatter when labels show values under a percent format code.
pub fn series_label_option(
    config: &DataLabelConfig,
    format_code: Option<&str>,
    pie: bool,
) -> SeriesLabelOption {
    let formatter = if pie {
        pie_formatter(config, format_code)
    } else {
        template_formatter(config)
    };
    SeriesLabelOption {
        show: config.shows_anything(),
        position: config.position.clone(),
        formatter,
        color: config.style.color.clone(),
        font_size: config.style.size_pt,
        font_weight: config.style.bold.and_then(|b| b.then(|| "bold".to_string())),
    }
}

fn pie_formatter(config: &DataLabelConfig, format_code: Option<&str>) -> Option<LabelFormatter> {
    if config.show_value {
        if let Some(code) = format_code.filter(|c| c.contains('%')) {
            return Some(LabelFormatter::PercentOfTotal {
                format_code: code.to_string(),
            });
        }
    }
    let mut parts = Vec::new();
    if config.show_category {
        parts.push("{b}");
    }
    if config.show_value {
        parts.push("{c}");
    }
    if config.show_percent {
        parts.push("{d}%");
    }
    if parts.is_empty() {
        // labels configured but nothing requested explicitly
        return Some(LabelFormatter::Template("{b}: {c} ({d}%)".to_string()));
    }
    Some(LabelFormatter::Template(parts.join(" ")))
}

fn template_formatter(config: &DataLabelConfig) -> Option<LabelFormatter> {
    if !config.shows_anything() {
        return None;
    }
    let mut parts = Vec::new();
    if config.show_series {
        parts.push("{a}");
    }
    if config.show_category {
        parts.push("{b}");
    }
    if config.show_value {
        parts.push("{c}");
    }
    (!parts.is_empty()).then(|| LabelFormatter::Template(parts.join(" ")))
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
    fn test_read_flags_and_style() {
        let doc = XmlNode::parse_str(
            r#"<c:dLbls xmlns:c="x" xmlns:a="y">
                <c:dLblPos val="outEnd"/>
                <c:showVal val="1"/>
                <c:showCatName val="0"/>
                <c:txPr><a:p><a:pPr><a:defRPr sz="900" b="1">
                    <a:solidFill><a:srgbClr val="333333"/></a:solidFill>
                </a:defRPr></a:pPr></a:p></c:txPr>
            </c:dLbls>"#,
        )
        .unwrap();
        let config = read_data_labels(doc.node(), &ctx()).unwrap();
        assert!(config.show_value);
        assert!(!config.show_category);
        assert_eq!(config.position.as_deref(), Some("top"));
        assert_eq!(config.style.color.as_deref(), Some("#333333"));
        assert_eq!(config.style.size_pt, Some(9.0));
        assert_eq!(config.style.bold, Some(true));

        assert!(read_data_labels(NodeRef::absent(), &ctx()).is_none());
    }

    #[test]
    fn test_patch_overlays_only_present_fields() {
        let base = DataLabelConfig {
            show_value: true,
            show_category: true,
            position: Some("top".to_string()),
            ..Default::default()
        };
        let patch = DataLabelPatch {
            show_category: Some(false),
            ..Default::default()
        };
        let merged = apply_patch(&base, &patch);
        assert!(merged.show_value);
        assert!(!merged.show_category);
        assert_eq!(merged.position.as_deref(), Some("top"));
    }

    #[test]
    fn test_pie_percent_code_builds_function_formatter() {
        let config = DataLabelConfig {
            show_value: true,
            ..Default::default()
        };
        assert_eq!(
            series_label_option(&config, Some("0.0%"), true).formatter,
            Some(LabelFormatter::PercentOfTotal {
                format_code: "0.0%".to_string()
            })
        );
        // non-percent code stays a template
        assert_eq!(
            series_label_option(&config, Some("0.00"), true).formatter,
            Some(LabelFormatter::Template("{c}".to_string()))
        );
    }

    #[test]
    fn test_pie_default_template() {
        // labels configured (dLbls present) but no show flag set
        let config = DataLabelConfig {
            position: Some("outside".to_string()),
            ..Default::default()
        };
        let option = series_label_option(&config, None, true);
        assert!(!option.show);
        assert_eq!(
            option.formatter,
            Some(LabelFormatter::Template("{b}: {c} ({d}%)".to_string()))
        );
    }
}
