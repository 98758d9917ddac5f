//! Merged paragraph and run style aggregates.
//!
//! A paragraph's visual style is the product of up to seven ordered layers
//! of markup (see [`crate::text::cascade`]). Each layer contributes through
//! the same field-level merge rule: a layer overwrites only the fields its
//! source node explicitly carries, and never clears a field set by a
//! lower-priority layer unless it carries an explicit value of its own
//! (`buNone` counts as an explicit bullet value).

use crate::common::unit::{centipt_to_pt, pct_to_ratio};
use crate::context::RenderContext;
use crate::drawing::color::{ResolvedColor, resolve_solid_fill};
use crate::drawing::gradient::{GradientFill, resolve_gradient_fill};
use crate::xml::NodeRef;

/// Nesting levels supported by list styles (`lvl1pPr` .. `lvl9pPr`).
pub const MAX_INDENT_LEVEL: usize = 8;

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Map an alignment code (`l`, `ctr`, `r`, `just`, `dist`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "l" => Some(Self::Left),
            "ctr" => Some(Self::Center),
            "r" => Some(Self::Right),
            "just" | "dist" => Some(Self::Justify),
            _ => None,
        }
    }

    /// CSS `text-align` value.
    #[inline]
    pub const fn css(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Line height, either a font-relative ratio or an absolute point value.
///
/// `spcPct val="150000"` is the ratio `1.5`; `spcPts val="1200"` is `12pt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    /// Unitless multiple of the font size
    Ratio(f64),
    /// Absolute line height in points
    Points(f64),
}

/// Space before/after a paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// Absolute points
    Points(f64),
    /// Ratio of the paragraph's effective font size
    FontRelative(f64),
}

/// Bullet source. `None` is the explicit `buNone` marker, which beats any
/// char or auto-number source on the same or a lower layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Bullet {
    None,
    /// Literal bullet character
    Char(String),
    /// Auto-numbered bullet; carries the numbering scheme code
    AutoNum(String),
}

/// Merged paragraph style across cascade layers 1-6.
#[derive(Debug, Clone, Default)]
pub struct ParagraphStyle<'a> {
    pub align: Option<Alignment>,
    /// Left margin in EMUs
    pub margin_left: Option<f64>,
    /// First-line indent in EMUs
    pub indent: Option<f64>,
    pub line_height: Option<LineHeight>,
    pub space_before: Option<Spacing>,
    pub space_after: Option<Spacing>,
    pub bullet: Option<Bullet>,
    /// Bullet typeface
    pub bullet_font: Option<String>,
    /// `buClr` node of the highest layer that carried one
    pub bullet_color: NodeRef<'a>,
    /// Default run properties node of the highest layer that carried one.
    /// Overwritten whole per layer, matching the source format's semantics;
    /// the run renderer rescues a lost color from the shape list-style.
    pub def_rpr: NodeRef<'a>,
}

/// Merge one `pPr`-shaped node (a `lvlNpPr`, `defPPr` or the paragraph's
/// own `pPr`) into the accumulator. Reads only fields present on the node.
pub fn merge_paragraph_props<'a>(style: &mut ParagraphStyle<'a>, ppr: NodeRef<'a>) {
    if !ppr.exists() {
        return;
    }

    if let Some(align) = ppr.attr("algn").and_then(Alignment::from_code) {
        style.align = Some(align);
    }
    if let Some(mar_l) = ppr.num_attr("marL") {
        style.margin_left = Some(mar_l);
    }
    if let Some(indent) = ppr.num_attr("indent") {
        style.indent = Some(indent);
    }

    let ln_spc = ppr.child("lnSpc");
    if let Some(pct) = ln_spc.child("spcPct").num_attr("val") {
        style.line_height = Some(LineHeight::Ratio(pct_to_ratio(pct)));
    } else if let Some(pts) = ln_spc.child("spcPts").num_attr("val") {
        style.line_height = Some(LineHeight::Points(centipt_to_pt(pts)));
    }

    if let Some(spacing) = read_spacing(ppr.child("spcBef")) {
        style.space_before = Some(spacing);
    }
    if let Some(spacing) = read_spacing(ppr.child("spcAft")) {
        style.space_after = Some(spacing);
    }

    // buNone beats char/auto-num carried by the same node.
    if ppr.child("buNone").exists() {
        style.bullet = Some(Bullet::None);
    } else if let Some(ch) = ppr.child("buChar").attr("char") {
        style.bullet = Some(Bullet::Char(ch.to_string()));
    } else if ppr.child("buAutoNum").exists() {
        let scheme = ppr.child("buAutoNum").attr("type").unwrap_or("arabicPeriod");
        style.bullet = Some(Bullet::AutoNum(scheme.to_string()));
    }

    if let Some(face) = ppr.child("buFont").attr("typeface") {
        style.bullet_font = Some(face.to_string());
    }
    if ppr.child("buClr").exists() {
        style.bullet_color = ppr.child("buClr");
    }
    if ppr.child("defRPr").exists() {
        style.def_rpr = ppr.child("defRPr");
    }
}

fn read_spacing(node: NodeRef) -> Option<Spacing> {
    if let Some(pts) = node.child("spcPts").num_attr("val") {
        return Some(Spacing::Points(centipt_to_pt(pts)));
    }
    if let Some(pct) = node.child("spcPct").num_attr("val") {
        return Some(Spacing::FontRelative(pct_to_ratio(pct)));
    }
    None
}

/// Capitalization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caps {
    None,
    All,
    Small,
}

/// Text outline (stroke) style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineStyle {
    /// Stroke width in EMUs
    pub width: Option<f64>,
    pub color: Option<ResolvedColor>,
    pub gradient: Option<GradientFill>,
}

/// Merged run style: paragraph default run properties, then the run's own.
#[derive(Debug, Clone, Default)]
pub struct RunStyle<'a> {
    /// Font size in points (before auto-fit scaling)
    pub size_pt: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike: Option<bool>,
    /// Solid text color
    pub color: Option<ResolvedColor>,
    /// Gradient text fill; replaces the solid color when present
    pub gradient: Option<GradientFill>,
    /// Explicit `noFill` marker
    pub no_fill: bool,
    /// Resolved font family
    pub font: Option<String>,
    /// Hyperlink relationship id
    pub hyperlink_rid: Option<&'a str>,
    /// Letter spacing in points
    pub letter_spacing_pt: Option<f64>,
    /// Kerning threshold in points; zero means "always on"
    pub kern_min_pt: Option<f64>,
    pub caps: Option<Caps>,
    /// Baseline shift as a percentage (positive = superscript)
    pub baseline_pct: Option<f64>,
    pub outline: Option<OutlineStyle>,
}

/// Merge one `rPr`-shaped node into the accumulator. A later layer always
/// overwrites a field it explicitly sets; color resolution failures are
/// treated as "no contribution" and leave the inherited value alone.
pub fn merge_run_props<'a>(style: &mut RunStyle<'a>, rpr: NodeRef<'a>, ctx: &RenderContext) {
    if !rpr.exists() {
        return;
    }

    if let Some(sz) = rpr.num_attr("sz") {
        style.size_pt = Some(centipt_to_pt(sz));
    }
    if let Some(b) = rpr.bool_attr("b") {
        style.bold = Some(b);
    }
    if let Some(i) = rpr.bool_attr("i") {
        style.italic = Some(i);
    }
    if let Some(u) = rpr.attr("u") {
        style.underline = Some(u != "none");
    }
    if let Some(s) = rpr.attr("strike") {
        style.strike = Some(s != "noStrike");
    }
    if let Some(spc) = rpr.num_attr("spc") {
        style.letter_spacing_pt = Some(centipt_to_pt(spc));
    }
    if let Some(kern) = rpr.num_attr("kern") {
        style.kern_min_pt = Some(centipt_to_pt(kern));
    }
    if let Some(cap) = rpr.attr("cap") {
        style.caps = Some(match cap {
            "all" => Caps::All,
            "small" => Caps::Small,
            _ => Caps::None,
        });
    }
    if let Some(baseline) = rpr.num_attr("baseline") {
        style.baseline_pct = Some(pct_to_ratio(baseline) * 100.0);
    }

    if rpr.child("noFill").exists() {
        style.no_fill = true;
        style.color = None;
        style.gradient = None;
    } else if rpr.child("solidFill").exists() {
        if let Some(color) = resolve_solid_fill(rpr, ctx) {
            style.color = Some(color);
            style.gradient = None;
            style.no_fill = false;
        }
    } else if rpr.child("gradFill").exists() {
        if let Some(gradient) = resolve_gradient_fill(rpr.child("gradFill"), ctx) {
            style.gradient = Some(gradient);
            style.no_fill = false;
        }
    }

    if let Some(face) = run_typeface(rpr) {
        style.font = Some(resolve_typeface(face, ctx));
    }

    let link = rpr.child("hlinkClick");
    if let Some(rid) = link.attr("id") {
        style.hyperlink_rid = Some(rid);
    }

    let ln = rpr.child("ln");
    if ln.exists() {
        let mut outline = OutlineStyle {
            width: ln.num_attr("w"),
            ..style.outline.clone().unwrap_or_default()
        };
        if let Some(color) = resolve_solid_fill(ln, ctx) {
            outline.color = Some(color);
        }
        if let Some(gradient) = resolve_gradient_fill(ln.child("gradFill"), ctx) {
            outline.gradient = Some(gradient);
        }
        style.outline = Some(outline);
    }
}

/// Explicit typeface on a run properties node: latin, then east-Asian,
/// then complex-script.
fn run_typeface(rpr: NodeRef) -> Option<&str> {
    for slot in ["latin", "ea", "cs"] {
        if let Some(face) = rpr.child(slot).attr("typeface") {
            if !face.is_empty() {
                return Some(face);
            }
        }
    }
    None
}

/// Resolve a typeface value that may reference the theme's major or minor
/// font placeholder (`+mj-lt`, `+mn-ea`, ...). Unresolvable tokens fall
/// back to their literal text.
pub fn resolve_typeface(face: &str, ctx: &RenderContext) -> String {
    if let Some(token) = face.strip_prefix('+') {
        let (table, script) = match token.split_once('-') {
            Some(("mj", script)) => (&ctx.theme.major_fonts, script),
            Some(("mn", script)) => (&ctx.theme.minor_fonts, script),
            _ => return face.to_string(),
        };
        return table
            .by_script(script)
            .map(|f| f.to_string())
            .unwrap_or_else(|| face.to_string());
    }
    face.to_string()
}

/// Font fallback when no layer carried a typeface: theme minor latin, then
/// theme minor east-Asian.
pub fn fallback_font(ctx: &RenderContext) -> Option<String> {
    ctx.theme
        .minor_fonts
        .by_script("latin")
        .or_else(|| ctx.theme.minor_fonts.by_script("ea"))
        .map(|f| f.to_string())
}
