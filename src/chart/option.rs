//! The declarative chart option model.
//!
//! A generic, renderer-agnostic option tree in the shape most declarative
//! charting engines accept: title, legend, axes, series and palette. The
//! whole tree serializes to camel-case JSON for a JavaScript chart widget.

use serde::Serialize;

/// Complete chart option.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TitleOption>,
    pub legend: LegendOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar: Option<RadarOption>,
    pub series: Vec<SeriesOption>,
    /// CSS color of the chart canvas
    pub background_color: String,
    /// Accent-derived series palette, `#RRGGBB` entries
    pub color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_background_color: Option<String>,
    /// Stacked series are normalized to percentages by the renderer
    pub percent_stacked: bool,
}

impl ChartOption {
    /// Placeholder option for inputs the translator cannot represent:
    /// the message renders where the chart would have been.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            title: Some(TitleOption {
                text: message.into(),
                left: Some("center".to_string()),
                top: Some("middle".to_string()),
                ..Default::default()
            }),
            legend: LegendOption::hidden(),
            background_color: "#FFFFFF".to_string(),
            ..Default::default()
        }
    }

    /// Whether this option is the unsupported-chart placeholder.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        self.series.is_empty() && self.radar.is_none() && self.x_axis.is_none()
    }
}

/// Chart title.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitleOption {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyleOption>,
}

/// Font styling shared by titles, legends and labels.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

impl TextStyleOption {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.font_size.is_none() && self.font_weight.is_none()
    }
}

/// Legend placement.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOption {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Whether the legend overlays the plot instead of reserving space
    pub overlay: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyleOption>,
}

impl LegendOption {
    /// A hidden legend.
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Tooltip behavior.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOption {
    pub trigger: &'static str,
}

impl TooltipOption {
    pub const AXIS: Self = Self { trigger: "axis" };
    pub const ITEM: Self = Self { trigger: "item" };
}

/// One axis of a cartesian chart.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOption {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub inverse: bool,
    pub axis_line: AxisLineOption,
    pub axis_tick: Visibility,
    pub axis_label: AxisLabelOption,
    pub split_line: Visibility,
}

/// Axis line visibility and stroke color.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLineOption {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyleOption>,
}

/// Stroke styling of an axis line.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineStyleOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A nested show flag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Visibility {
    pub show: bool,
}

impl Visibility {
    #[inline]
    pub fn new(show: bool) -> Self {
        Self { show }
    }
}

/// Axis label visibility and formatting.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabelOption {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// Radar coordinate system: one spoke per category.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarOption {
    pub indicator: Vec<RadarIndicator>,
}

/// One radar spoke.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RadarIndicator {
    pub name: String,
    pub max: f64,
}

/// One rendered series.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SeriesLabelOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_mode: Option<String>,
    /// Inner/outer radius pair for doughnut charts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<[String; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_style: Option<AreaStyle>,
}

/// Marker turning a line series into an area series.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AreaStyle {}

/// One data point. Unpatched points stay bare numbers; only points
/// carrying an override are promoted to the structured shape, so a series
/// array can legally mix both shapes.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DataPoint {
    Number(f64),
    /// Scatter `[x, y]` pair
    Pair([f64; 2]),
    /// Radar point: one value per indicator
    Multi(MultiPoint),
    Detailed(Box<DetailedPoint>),
}

/// A named multi-value data point (radar series).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultiPoint {
    pub name: String,
    pub value: Vec<f64>,
}

impl DataPoint {
    /// The numeric value of this point (the y value for pairs).
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Pair([_, y]) => *y,
            Self::Multi(m) => m.value.iter().copied().fold(f64::MIN, f64::max),
            Self::Detailed(d) => d.value,
        }
    }
}

/// Structured data point shape for patched points.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPoint {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<SeriesLabelOption>,
}

/// Fill of a series or point.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    pub color: ColorValue,
}

/// A solid CSS color or a linear-gradient descriptor.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ColorValue {
    Solid(String),
    Gradient(LinearGradient),
}

/// Generic linear gradient on the unit square.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradient {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub color_stops: Vec<GradientColorStop>,
}

/// One gradient stop.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradientColorStop {
    pub offset: f64,
    pub color: String,
}

/// Data label configuration attached to a series or point.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesLabelOption {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<LabelFormatter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
}

/// Label formatter: a static template assembled from the requested parts,
/// or the percent-of-total function formatter pie charts use when labels
/// show values under a percent format code.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum LabelFormatter {
    Template(String),
    PercentOfTotal {
        #[serde(rename = "percentFormatCode")]
        format_code: String,
    },
}

/// Tabular companion model built from a `dTable` element.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    pub categories: Vec<String>,
    pub series_arr: Vec<DataTableRow>,
    pub show_keys: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_code: Option<String>,
}

/// One data-table row: a series with its formatted values.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataTableRow {
    pub name: String,
    /// Legend-key swatch color, when show-keys is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_color: Option<String>,
    pub values: Vec<String>,
}
