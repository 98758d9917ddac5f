//! Color resolution.
//!
//! Resolves a fill or color parent node into a concrete hex color plus
//! alpha, honoring scheme-slot remapping, system-color snapshots, preset
//! colors, and the common color transforms (`alpha`, `lumMod`, `lumOff`,
//! `shade`, `tint`). Results are memoized in the render context's
//! per-render color cache.
//!
//! Resolution is always best-effort: anything unrecognized yields `None`,
//! which callers treat as "no color contribution from this layer".

use crate::common::RGBColor;
use crate::common::unit::pct_to_ratio;
use crate::context::RenderContext;
use crate::xml::NodeRef;

/// Preset color names to hex, the subset that shows up in real decks.
static PRESET_COLORS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "black" => "000000",
    "white" => "FFFFFF",
    "red" => "FF0000",
    "green" => "008000",
    "lime" => "00FF00",
    "blue" => "0000FF",
    "yellow" => "FFFF00",
    "cyan" => "00FFFF",
    "magenta" => "FF00FF",
    "gray" => "808080",
    "grey" => "808080",
    "ltGray" => "C0C0C0",
    "dkGray" => "404040",
    "silver" => "C0C0C0",
    "maroon" => "800000",
    "navy" => "000080",
    "olive" => "808000",
    "purple" => "800080",
    "teal" => "008080",
    "orange" => "FFA500",
};

/// A resolved color: hex without `#` prefix, alpha in 0..1.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColor {
    /// Hex color, `RRGGBB`, no `#` prefix
    pub color: String,
    /// Opacity, 0.0 (transparent) to 1.0 (opaque)
    pub alpha: f64,
}

impl ResolvedColor {
    /// Create an opaque resolved color.
    #[inline]
    pub fn opaque(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            alpha: 1.0,
        }
    }

    /// CSS representation: `#RRGGBB`, or `rgba(...)` when translucent.
    pub fn to_css(&self) -> String {
        if self.alpha >= 1.0 {
            return format!("#{}", self.color);
        }
        match RGBColor::from_hex(&self.color) {
            Some(rgb) => format!(
                "rgba({},{},{},{})",
                rgb.r,
                rgb.g,
                rgb.b,
                (self.alpha * 1000.0).round() / 1000.0
            ),
            None => format!("#{}", self.color),
        }
    }
}

const COLOR_ELEMENT_NAMES: [&str; 4] = ["srgbClr", "schemeClr", "sysClr", "prstClr"];

/// Resolve the first recognized color child of `parent` (a `solidFill`,
/// `buClr`, `gs`, or similar wrapper) against the render context.
pub fn resolve_color(parent: NodeRef, ctx: &RenderContext) -> Option<ResolvedColor> {
    let color_node = parent
        .all_children()
        .find(|c| COLOR_ELEMENT_NAMES.contains(&c.name()))?;

    let key = cache_key(color_node);
    if let Some(hit) = ctx.cached_color(&key) {
        return hit;
    }

    let resolved = resolve_color_node(color_node, ctx);
    ctx.cache_color(key, resolved.clone());
    resolved
}

/// Resolve the `solidFill` child of `parent`, when present.
#[inline]
pub fn resolve_solid_fill(parent: NodeRef, ctx: &RenderContext) -> Option<ResolvedColor> {
    let solid = parent.child("solidFill");
    if solid.exists() {
        resolve_color(solid, ctx)
    } else {
        None
    }
}

fn resolve_color_node(node: NodeRef, ctx: &RenderContext) -> Option<ResolvedColor> {
    let base = match node.name() {
        "srgbClr" => node.attr("val").map(|v| v.to_string()),
        "schemeClr" => {
            let slot = node.attr("val")?;
            ctx.scheme_color(slot).map(|v| v.to_string())
        },
        "sysClr" => node.attr("lastClr").map(|v| v.to_string()),
        "prstClr" => node
            .attr("val")
            .and_then(|v| PRESET_COLORS.get(v))
            .map(|v| (*v).to_string()),
        _ => None,
    }?;

    let mut rgb = RGBColor::from_hex(&base)?;
    let mut alpha = 1.0f64;

    for transform in node.all_children() {
        let val = transform.num_attr("val").map(pct_to_ratio);
        match (transform.name(), val) {
            ("alpha", Some(v)) => alpha = v.clamp(0.0, 1.0),
            ("shade", Some(v)) => {
                let scale = |c: u8| (c as f64 * v).round().clamp(0.0, 255.0) as u8;
                rgb = RGBColor::new(scale(rgb.r), scale(rgb.g), scale(rgb.b));
            },
            ("tint", Some(v)) => {
                let mix = |c: u8| {
                    (c as f64 * v + 255.0 * (1.0 - v)).round().clamp(0.0, 255.0) as u8
                };
                rgb = RGBColor::new(mix(rgb.r), mix(rgb.g), mix(rgb.b));
            },
            ("lumMod", Some(v)) => {
                let (h, s, l) = rgb.to_hsl();
                rgb = RGBColor::from_hsl(h, s, l * v);
            },
            ("lumOff", Some(v)) => {
                let (h, s, l) = rgb.to_hsl();
                rgb = RGBColor::from_hsl(h, s, l + v);
            },
            _ => {},
        }
    }

    Some(ResolvedColor {
        color: rgb.to_hex(),
        alpha,
    })
}

/// Stable textual key for memoization: element name, attributes, and the
/// transform children with their values.
fn cache_key(node: NodeRef) -> String {
    let mut key = String::from(node.name());
    for (k, v) in node.attrs() {
        key.push('|');
        key.push_str(k);
        key.push('=');
        key.push_str(v);
    }
    for child in node.all_children() {
        key.push('/');
        key.push_str(child.name());
        if let Some(v) = child.attr("val") {
            key.push('=');
            key.push_str(v);
        }
    }
    key
}
