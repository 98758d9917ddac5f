//! Series extraction from a chart-type element.

use std::collections::HashMap;

use crate::chart::label::{DataLabelPatch, read_label_patches};
use crate::chart::option::{ColorValue, GradientColorStop, LinearGradient};
use crate::context::RenderContext;
use crate::drawing::color::resolve_solid_fill;
use crate::drawing::gradient::{GradientFill, resolve_gradient_fill};
use crate::xml::NodeRef;

/// One parsed series, chart-type agnostic.
#[derive(Debug, Clone, Default)]
pub struct SeriesData<'a> {
    pub name: String,
    /// Explicit order key; parse index when absent. Series are emitted in
    /// ascending order-key order, ties kept in document order.
    pub order: f64,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    /// Scatter x coordinates
    pub x_values: Option<Vec<f64>>,
    pub fill: Option<ColorValue>,
    /// Sparse per-point fill overrides from `dPt` elements
    pub point_colors: HashMap<usize, ColorValue>,
    /// Series-level pie explosion
    pub explosion: Option<f64>,
    /// Sparse per-point explosion overrides
    pub point_explosions: HashMap<usize, f64>,
    pub marker_symbol: Option<String>,
    pub marker_size: Option<f64>,
    pub format_code: Option<String>,
    /// The series' own `dLbls` node, resolved lazily by the translator
    pub dlbls: NodeRef<'a>,
    /// Sparse per-point label patches
    pub label_patches: HashMap<usize, DataLabelPatch>,
}

/// Parse and sort every `ser` child of a chart-type element.
pub fn parse_series<'a>(chart_el: NodeRef<'a>, ctx: &RenderContext<'a>) -> Vec<SeriesData<'a>> {
    let mut series: Vec<SeriesData<'a>> = chart_el
        .children("ser")
        .enumerate()
        .map(|(idx, ser)| parse_one(ser, idx, ctx))
        .collect();
    series.sort_by(|a, b| {
        a.order
            .partial_cmp(&b.order)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    series
}

fn parse_one<'a>(ser: NodeRef<'a>, idx: usize, ctx: &RenderContext<'a>) -> SeriesData<'a> {
    let mut categories = read_categories(ser.child("cat"));
    let mut values = read_values(ser.child("val"));
    let mut x_values = None;

    // Scatter series cache their coordinates separately.
    let y_val = ser.child("yVal");
    if y_val.exists() {
        values = read_values(y_val);
    }
    let x_val = ser.child("xVal");
    if x_val.exists() {
        let nums = read_values(x_val);
        if !nums.is_empty() {
            x_values = Some(nums);
        }
        if categories.is_empty() {
            // a string-typed x cache doubles as pseudo-categories
            let pseudo = padded_strings(x_val.descend(&["strRef", "strCache"]));
            if !pseudo.is_empty() {
                categories = pseudo;
            }
        }
    }

    let mut point_colors = HashMap::new();
    let mut point_explosions = HashMap::new();
    for dpt in ser.children("dPt") {
        let Some(i) = dpt.child("idx").num_attr("val").map(|v| v as usize) else {
            continue;
        };
        if let Some(fill) = series_fill(dpt.child("spPr"), ctx) {
            point_colors.insert(i, fill);
        }
        if let Some(explosion) = dpt.child("explosion").num_attr("val") {
            point_explosions.insert(i, explosion);
        }
    }

    let marker = ser.child("marker");

    SeriesData {
        name: super::rich_or_cached_text(ser.child("tx")).unwrap_or_default(),
        order: ser
            .child("order")
            .num_attr("val")
            .unwrap_or(idx as f64),
        categories,
        values,
        x_values,
        fill: series_fill(ser.child("spPr"), ctx),
        point_colors,
        explosion: ser.child("explosion").num_attr("val"),
        point_explosions,
        marker_symbol: marker.child("symbol").attr("val").map(|s| s.to_string()),
        marker_size: marker.child("size").num_attr("val"),
        format_code: read_format_code(ser),
        dlbls: ser.child("dLbls"),
        label_patches: read_label_patches(ser.child("dLbls"), ctx),
    }
}

/// Categories: string cache, else a numeric cache read as display strings.
pub fn read_categories(cat: NodeRef) -> Vec<String> {
    let str_cache = cat.descend(&["strRef", "strCache"]);
    if str_cache.exists() {
        return padded_strings(str_cache);
    }
    padded_strings(cat.descend(&["numRef", "numCache"]))
}

/// Values padded to the declared point count; missing or unparsable
/// entries read as zero.
pub fn read_values(val: NodeRef) -> Vec<f64> {
    let cache = val.descend(&["numRef", "numCache"]);
    let count = cache.child("ptCount").num_attr("val").unwrap_or(0.0) as usize;
    let mut out = vec![0.0f64; count];
    for pt in cache.children("pt") {
        let Some(i) = pt.num_attr("idx").map(|v| v as usize) else {
            continue;
        };
        if i >= out.len() {
            out.resize(i + 1, 0.0);
        }
        out[i] = fast_float2::parse(pt.child("v").text().trim()).unwrap_or(0.0);
    }
    out
}

fn padded_strings(cache: NodeRef) -> Vec<String> {
    if !cache.exists() {
        return Vec::new();
    }
    let count = cache.child("ptCount").num_attr("val").unwrap_or(0.0) as usize;
    let mut out = vec![String::new(); count];
    for pt in cache.children("pt") {
        let Some(i) = pt.num_attr("idx").map(|v| v as usize) else {
            continue;
        };
        if i >= out.len() {
            out.resize(i + 1, String::new());
        }
        out[i] = pt.child("v").text();
    }
    out
}

fn read_format_code(ser: NodeRef) -> Option<String> {
    let code = ser
        .descend(&["val", "numRef", "numCache", "formatCode"])
        .text();
    if code.is_empty() { None } else { Some(code) }
}

/// Series fill: direct solid fill, then gradient, then the line stroke
/// color line/area series carry instead.
pub fn series_fill(sppr: NodeRef, ctx: &RenderContext<'_>) -> Option<ColorValue> {
    if let Some(color) = resolve_solid_fill(sppr, ctx) {
        return Some(ColorValue::Solid(color.to_css()));
    }
    if let Some(gradient) = resolve_gradient_fill(sppr.child("gradFill"), ctx) {
        return Some(gradient_color_value(&gradient));
    }
    resolve_solid_fill(sppr.child("ln"), ctx).map(|c| ColorValue::Solid(c.to_css()))
}

/// Project a resolved gradient onto the generic unit-square descriptor.
pub fn gradient_color_value(gradient: &GradientFill) -> ColorValue {
    let c = gradient.coords();
    ColorValue::Gradient(LinearGradient {
        kind: "linear",
        x: c.x0,
        y: c.y0,
        x2: c.x1,
        y2: c.y1,
        color_stops: gradient
            .stops
            .iter()
            .map(|s| GradientColorStop {
                offset: s.pos,
                color: s.color.to_css(),
            })
            .collect(),
    })
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
    fn test_explicit_order_beats_document_order() {
        let doc = XmlNode::parse_str(
            r#"<c:barChart xmlns:c="x">
                <c:ser><c:order val="2"/><c:tx><c:strRef><c:strCache><c:pt idx="0"><c:v>C</c:v></c:pt></c:strCache></c:strRef></c:tx></c:ser>
                <c:ser><c:order val="0"/><c:tx><c:strRef><c:strCache><c:pt idx="0"><c:v>A</c:v></c:pt></c:strCache></c:strRef></c:tx></c:ser>
                <c:ser><c:order val="1"/><c:tx><c:strRef><c:strCache><c:pt idx="0"><c:v>B</c:v></c:pt></c:strCache></c:strRef></c:tx></c:ser>
            </c:barChart>"#,
        )
        .unwrap();
        let series = parse_series(doc.node(), &ctx());
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_values_padded_to_point_count() {
        let doc = XmlNode::parse_str(
            r#"<c:val xmlns:c="x"><c:numRef><c:numCache>
                <c:ptCount val="4"/>
                <c:pt idx="0"><c:v>1.5</c:v></c:pt>
                <c:pt idx="2"><c:v>bogus</c:v></c:pt>
                <c:pt idx="3"><c:v>7</c:v></c:pt>
            </c:numCache></c:numRef></c:val>"#,
        )
        .unwrap();
        assert_eq!(read_values(doc.node()), [1.5, 0.0, 0.0, 7.0]);
    }

    #[test]
    fn test_category_numeric_cache_fallback() {
        let doc = XmlNode::parse_str(
            r#"<c:cat xmlns:c="x"><c:numRef><c:numCache>
                <c:ptCount val="2"/>
                <c:pt idx="0"><c:v>2021</c:v></c:pt>
                <c:pt idx="1"><c:v>2022</c:v></c:pt>
            </c:numCache></c:numRef></c:cat>"#,
        )
        .unwrap();
        assert_eq!(read_categories(doc.node()), ["2021", "2022"]);
    }

    #[test]
    fn test_scatter_caches_and_pseudo_categories() {
        let doc = XmlNode::parse_str(
            r#"<c:scatterChart xmlns:c="x"><c:ser>
                <c:xVal><c:strRef><c:strCache>
                    <c:ptCount val="2"/>
                    <c:pt idx="0"><c:v>Jan</c:v></c:pt>
                    <c:pt idx="1"><c:v>Feb</c:v></c:pt>
                </c:strCache></c:strRef></c:xVal>
                <c:yVal><c:numRef><c:numCache>
                    <c:ptCount val="2"/>
                    <c:pt idx="0"><c:v>10</c:v></c:pt>
                    <c:pt idx="1"><c:v>20</c:v></c:pt>
                </c:numCache></c:numRef></c:yVal>
            </c:ser></c:scatterChart>"#,
        )
        .unwrap();
        let series = parse_series(doc.node(), &ctx());
        assert_eq!(series[0].values, [10.0, 20.0]);
        assert_eq!(series[0].x_values, None);
        assert_eq!(series[0].categories, ["Jan", "Feb"]);
    }

    #[test]
    fn test_point_overrides_and_fill() {
        let doc = XmlNode::parse_str(
            r#"<c:pieChart xmlns:c="x" xmlns:a="y"><c:ser>
                <c:spPr><a:solidFill><a:srgbClr val="4472C4"/></a:solidFill></c:spPr>
                <c:explosion val="5"/>
                <c:dPt><c:idx val="1"/>
                    <c:explosion val="25"/>
                    <c:spPr><a:solidFill><a:srgbClr val="ED7D31"/></a:solidFill></c:spPr>
                </c:dPt>
            </c:ser></c:pieChart>"#,
        )
        .unwrap();
        let series = parse_series(doc.node(), &ctx());
        let s = &series[0];
        assert_eq!(s.fill, Some(ColorValue::Solid("#4472C4".to_string())));
        assert_eq!(s.explosion, Some(5.0));
        assert_eq!(s.point_explosions.get(&1), Some(&25.0));
        assert_eq!(
            s.point_colors.get(&1),
            Some(&ColorValue::Solid("#ED7D31".to_string()))
        );
    }

    #[test]
    fn test_line_stroke_fallback_fill() {
        let doc = XmlNode::parse_str(
            r#"<c:lineChart xmlns:c="x" xmlns:a="y"><c:ser>
                <c:spPr><a:ln><a:solidFill><a:srgbClr val="70AD47"/></a:solidFill></a:ln></c:spPr>
            </c:ser></c:lineChart>"#,
        )
        .unwrap();
        let series = parse_series(doc.node(), &ctx());
        assert_eq!(
            series[0].fill,
            Some(ColorValue::Solid("#70AD47".to_string()))
        );
    }
}
