//! Chart-type dispatch and option assembly.

use log::warn;

use crate::chart::axis::AxisInfo;
use crate::chart::label::{
    DataLabelConfig, apply_patch, read_data_labels, series_label_option,
};
use crate::chart::legend::{layout_pct, legend_option};
use crate::chart::option::{
    AreaStyle, ChartOption, ColorValue, DataPoint, DataTable, DataTableRow, DetailedPoint,
    ItemStyle, MultiPoint, RadarIndicator, RadarOption, SeriesLabelOption, SeriesOption,
    TitleOption, TooltipOption,
};
use crate::chart::palette::{chart_background, chart_palette, plot_area_background};
use crate::chart::series::{SeriesData, parse_series};
use crate::chart::{TextStyle, format_value, rich_or_cached_text};
use crate::context::RenderContext;
use crate::xml::NodeRef;

/// Recognized chart types, in scan priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Bar3D,
    Line,
    Line3D,
    Area,
    Area3D,
    Pie,
    Pie3D,
    Doughnut,
    Radar,
    Scatter,
    Surface3D,
}

impl ChartKind {
    /// Priority-ordered scan table; the first element present in the plot
    /// area with at least one series drives the whole chart.
    const SCAN: [(ChartKind, &'static str); 12] = [
        (Self::Bar, "barChart"),
        (Self::Bar3D, "bar3DChart"),
        (Self::Line, "lineChart"),
        (Self::Line3D, "line3DChart"),
        (Self::Area, "areaChart"),
        (Self::Area3D, "area3DChart"),
        (Self::Pie, "pieChart"),
        (Self::Pie3D, "pie3DChart"),
        (Self::Doughnut, "doughnutChart"),
        (Self::Radar, "radarChart"),
        (Self::Scatter, "scatterChart"),
        (Self::Surface3D, "surface3DChart"),
    ];

    /// Series type string in the option model.
    fn series_type(self) -> &'static str {
        match self {
            Self::Bar | Self::Bar3D => "bar",
            Self::Line | Self::Line3D | Self::Area | Self::Area3D => "line",
            Self::Pie | Self::Pie3D | Self::Doughnut => "pie",
            Self::Radar => "radar",
            Self::Scatter => "scatter",
            Self::Surface3D => "surface",
        }
    }

    #[inline]
    fn is_area(self) -> bool {
        matches!(self, Self::Area | Self::Area3D)
    }

    #[inline]
    fn is_pie(self) -> bool {
        matches!(self, Self::Pie | Self::Pie3D | Self::Doughnut)
    }
}

/// Translator output: the option tree plus the optional data table.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub option: ChartOption,
    pub data_table: Option<DataTable>,
}

/// Outer radius shared by pie and doughnut series.
const PIE_OUTER_RADIUS_PCT: f64 = 70.0;

/// Explosion-derived selected offsets are capped at this.
const MAX_SELECTED_OFFSET: f64 = 15.0;

/// Translate a `chartSpace` document into a chart option.
///
/// Never fails: a missing plot area, an unrecognized chart type or a
/// matched type with zero series all yield a placeholder option.
pub fn translate_chart<'a>(
    chart_space: NodeRef<'a>,
    ctx: &RenderContext<'a>,
) -> ChartOutput {
    // Chart-local scheme overrides and a fresh color cache.
    let ctx = ctx.for_chart(chart_space.child("clrMapOvr"));

    let chart = chart_space.child("chart");
    let plot_area = chart.child("plotArea");
    let background = chart_background(chart_space, &ctx);

    if !plot_area.exists() {
        warn!("chart document has no plot area");
        return placeholder("Unsupported chart", background);
    }

    let found = ChartKind::SCAN.iter().find_map(|&(kind, name)| {
        let el = plot_area.child(name);
        if !el.exists() {
            return None;
        }
        let series = parse_series(el, &ctx);
        (!series.is_empty()).then_some((kind, el, series))
    });
    let Some((kind, chart_el, series)) = found else {
        warn!("plot area has no recognized chart type with series");
        return placeholder("Unsupported chart type", background);
    };
    if kind == ChartKind::Surface3D {
        warn!("surface charts are not renderable");
        return placeholder("Unsupported chart type", background);
    }

    let style_id = chart_space
        .child("style")
        .num_attr("val")
        .map(|v| v as u32);
    let chart_labels = read_data_labels(chart_el.child("dLbls"), &ctx);

    let mut option = ChartOption {
        title: title_option(chart, &ctx),
        legend: legend_option(chart.child("legend"), &ctx),
        background_color: background,
        plot_background_color: plot_area_background(plot_area, &ctx),
        color: chart_palette(style_id, &ctx),
        ..Default::default()
    };

    if kind.is_pie() {
        build_pie(kind, chart_el, &series, &chart_labels, &mut option, &ctx);
    } else if kind == ChartKind::Radar {
        build_radar(plot_area, &series, &chart_labels, &mut option, &ctx);
    } else if kind == ChartKind::Scatter {
        build_scatter(plot_area, &series, &chart_labels, &mut option, &ctx);
    } else {
        build_cartesian(kind, chart_el, plot_area, &series, &chart_labels, &mut option, &ctx);
    }

    let data_table = data_table(plot_area, &series);
    ChartOutput { option, data_table }
}

fn placeholder(message: &str, background: String) -> ChartOutput {
    let mut option = ChartOption::unsupported(message);
    option.background_color = background;
    ChartOutput {
        option,
        data_table: None,
    }
}

fn title_option(chart: NodeRef<'_>, ctx: &RenderContext<'_>) -> Option<TitleOption> {
    if chart
        .child("autoTitleDeleted")
        .bool_attr("val")
        .unwrap_or(false)
    {
        return None;
    }
    let title = chart.child("title");
    let text = rich_or_cached_text(title.child("tx"))?;

    let mut style = TextStyle::from_tx_pr(title.child("txPr"), ctx);
    if style == TextStyle::default() {
        style = TextStyle::from_tx_pr(title.descend(&["tx", "rich"]), ctx);
    }

    let mut option = TitleOption {
        text,
        left: Some("center".to_string()),
        top: None,
        text_style: style.into_option(),
    };
    let manual = title.descend(&["layout", "manualLayout"]);
    if let Some(x) = manual.child("x").num_attr("val") {
        option.left = Some(layout_pct(x));
    }
    if let Some(y) = manual.child("y").num_attr("val") {
        option.top = Some(layout_pct(y));
    }
    Some(option)
}

/// Resolve a series' label config: its own `dLbls`, else the chart-type
/// level one.
fn series_labels<'a>(
    s: &SeriesData<'a>,
    chart_labels: &Option<DataLabelConfig>,
    ctx: &RenderContext<'a>,
) -> Option<DataLabelConfig> {
    read_data_labels(s.dlbls, ctx).or_else(|| chart_labels.clone())
}

fn build_cartesian<'a>(
    kind: ChartKind,
    chart_el: NodeRef<'a>,
    plot_area: NodeRef<'a>,
    series: &[SeriesData<'a>],
    chart_labels: &Option<DataLabelConfig>,
    option: &mut ChartOption,
    ctx: &RenderContext<'a>,
) {
    let horizontal = chart_el.child("barDir").attr("val") == Some("bar");
    let grouping = chart_el.child("grouping").attr("val").unwrap_or("clustered");
    let stacked = matches!(grouping, "stacked" | "percentStacked");
    option.percent_stacked = grouping == "percentStacked";

    let cat_info = AxisInfo::from_node(plot_area.child("catAx"), ctx);
    let val_info = AxisInfo::from_node(plot_area.child("valAx"), ctx);
    let percent_code = series
        .iter()
        .find_map(|s| s.format_code.as_deref().filter(|c| c.contains('%')));

    let categories = series
        .first()
        .map(|s| s.categories.clone())
        .unwrap_or_default();
    let cat_axis = cat_info.category_option(categories);
    let val_axis = val_info.value_option(percent_code);
    if horizontal {
        option.x_axis = Some(val_axis);
        option.y_axis = Some(cat_axis);
    } else {
        option.x_axis = Some(cat_axis);
        option.y_axis = Some(val_axis);
    }
    option.tooltip = Some(TooltipOption::AXIS);

    for s in series {
        let labels = series_labels(s, chart_labels, ctx);
        let label = labels
            .as_ref()
            .map(|config| series_label_option(config, s.format_code.as_deref(), false));
        option.series.push(SeriesOption {
            name: s.name.clone(),
            kind: kind.series_type().to_string(),
            data: cartesian_points(s, &labels),
            stack: stacked.then(|| "total".to_string()),
            item_style: s
                .fill
                .clone()
                .map(|color| ItemStyle { color }),
            label,
            symbol: s.marker_symbol.clone(),
            symbol_size: s.marker_size,
            area_style: kind.is_area().then(AreaStyle::default),
            ..Default::default()
        });
    }
}

/// Points of a cartesian series. Unpatched points stay bare numbers;
/// a point with a color or label override is promoted to the structured
/// shape carrying only its overrides.
fn cartesian_points(s: &SeriesData<'_>, base: &Option<DataLabelConfig>) -> Vec<DataPoint> {
    s.values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let color = s.point_colors.get(&i);
            let patch = s.label_patches.get(&i);
            if color.is_none() && patch.is_none() {
                return DataPoint::Number(value);
            }
            let mut point = DetailedPoint {
                value,
                ..Default::default()
            };
            if let Some(color) = color {
                point.item_style = Some(ItemStyle {
                    color: color.clone(),
                });
            }
            if let Some(patch) = patch {
                point.label = Some(if patch.delete {
                    SeriesLabelOption::default()
                } else {
                    let merged = apply_patch(&base.clone().unwrap_or_default(), patch);
                    series_label_option(&merged, s.format_code.as_deref(), false)
                });
            }
            DataPoint::Detailed(Box::new(point))
        })
        .collect()
}

fn build_pie<'a>(
    kind: ChartKind,
    chart_el: NodeRef<'a>,
    series: &[SeriesData<'a>],
    chart_labels: &Option<DataLabelConfig>,
    option: &mut ChartOption,
    ctx: &RenderContext<'a>,
) {
    // Pie charts render only their first series.
    let Some(s) = series.first() else { return };
    option.tooltip = Some(TooltipOption::ITEM);

    let any_explosion = s.explosion.is_some() || !s.point_explosions.is_empty();
    let data = s
        .values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let explosion = s
                .point_explosions
                .get(&i)
                .copied()
                .or(s.explosion)
                .unwrap_or(0.0);
            let mut point = DetailedPoint {
                value,
                name: s.categories.get(i).cloned(),
                ..Default::default()
            };
            if explosion > 0.0 {
                point.selected = Some(true);
                point.selected_offset = Some(explosion.min(MAX_SELECTED_OFFSET));
            }
            if let Some(color) = s.point_colors.get(&i) {
                point.item_style = Some(ItemStyle {
                    color: color.clone(),
                });
            }
            DataPoint::Detailed(Box::new(point))
        })
        .collect();

    let radius = (kind == ChartKind::Doughnut).then(|| {
        let hole = chart_el
            .child("holeSize")
            .num_attr("val")
            .unwrap_or(50.0)
            .clamp(0.0, 90.0);
        let inner = PIE_OUTER_RADIUS_PCT * hole / 100.0;
        [format!("{inner}%"), format!("{PIE_OUTER_RADIUS_PCT}%")]
    });

    option.series.push(SeriesOption {
        name: s.name.clone(),
        kind: "pie".to_string(),
        data,
        label: series_labels(s, chart_labels, ctx)
            .as_ref()
            .map(|config| series_label_option(config, s.format_code.as_deref(), true)),
        selected_mode: any_explosion.then(|| "single".to_string()),
        radius,
        ..Default::default()
    });
}

fn build_radar<'a>(
    plot_area: NodeRef<'a>,
    series: &[SeriesData<'a>],
    chart_labels: &Option<DataLabelConfig>,
    option: &mut ChartOption,
    ctx: &RenderContext<'a>,
) {
    let val_info = AxisInfo::from_node(plot_area.child("valAx"), ctx);

    let mut categories = series
        .first()
        .map(|s| s.categories.clone())
        .unwrap_or_default();
    rotate_clockwise(&mut categories);

    let max = val_info.max.unwrap_or_else(|| {
        let observed = series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0f64, f64::max);
        if observed > 0.0 {
            (observed * 1.1).ceil()
        } else {
            100.0
        }
    });
    option.radar = Some(RadarOption {
        indicator: categories
            .iter()
            .map(|name| RadarIndicator {
                name: name.clone(),
                max,
            })
            .collect(),
    });
    option.tooltip = Some(TooltipOption::ITEM);

    let mut radar_series = SeriesOption {
        name: String::new(),
        kind: "radar".to_string(),
        ..Default::default()
    };
    for s in series {
        let mut values = s.values.clone();
        rotate_clockwise(&mut values);
        radar_series.data.push(DataPoint::Multi(MultiPoint {
            name: s.name.clone(),
            value: values,
        }));
    }
    if let Some(s) = series.first() {
        radar_series.label = series_labels(s, chart_labels, ctx)
            .as_ref()
            .map(|config| series_label_option(config, s.format_code.as_deref(), false));
    }
    option.series.push(radar_series);
}

/// Reorder for a clockwise-from-top display convention: the first entry
/// stays put, the remainder reverses.
fn rotate_clockwise<T>(items: &mut [T]) {
    if items.len() > 1 {
        items[1..].reverse();
    }
}

fn build_scatter<'a>(
    plot_area: NodeRef<'a>,
    series: &[SeriesData<'a>],
    chart_labels: &Option<DataLabelConfig>,
    option: &mut ChartOption,
    ctx: &RenderContext<'a>,
) {
    let val_info = AxisInfo::from_node(plot_area.child("valAx"), ctx);
    let numeric_x = series.iter().any(|s| s.x_values.is_some());

    let x_info = AxisInfo::from_node(plot_area.child("catAx"), ctx);
    option.x_axis = Some(if numeric_x {
        x_info.value_option(None)
    } else {
        let categories = series
            .first()
            .map(|s| s.categories.clone())
            .unwrap_or_default();
        x_info.category_option(categories)
    });
    option.y_axis = Some(val_info.value_option(None));
    option.tooltip = Some(TooltipOption::ITEM);

    for s in series {
        let data = s
            .values
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                let x = s
                    .x_values
                    .as_ref()
                    .and_then(|xs| xs.get(i).copied())
                    .unwrap_or(i as f64);
                DataPoint::Pair([x, y])
            })
            .collect();
        option.series.push(SeriesOption {
            name: s.name.clone(),
            kind: "scatter".to_string(),
            data,
            item_style: s.fill.clone().map(|color| ItemStyle { color }),
            label: series_labels(s, chart_labels, ctx)
                .as_ref()
                .map(|config| series_label_option(config, s.format_code.as_deref(), false)),
            symbol: s.marker_symbol.clone(),
            symbol_size: s.marker_size,
            ..Default::default()
        });
    }
}

fn data_table(plot_area: NodeRef<'_>, series: &[SeriesData<'_>]) -> Option<DataTable> {
    let dt = plot_area.child("dTable");
    if !dt.exists() {
        return None;
    }
    let show_keys = dt.child("showKeys").bool_attr("val").unwrap_or(true);
    let format_code = series.iter().find_map(|s| s.format_code.clone());

    Some(DataTable {
        categories: series
            .first()
            .map(|s| s.categories.clone())
            .unwrap_or_default(),
        series_arr: series
            .iter()
            .map(|s| DataTableRow {
                name: s.name.clone(),
                key_color: show_keys
                    .then(|| match &s.fill {
                        Some(ColorValue::Solid(hex)) => Some(hex.clone()),
                        _ => None,
                    })
                    .flatten(),
                values: s
                    .values
                    .iter()
                    .map(|&v| format_value(v, format_code.as_deref()))
                    .collect(),
            })
            .collect(),
        show_keys,
        format_code,
    })
}
