//! Paragraph and run rendering.
//!
//! Turns a `txBody` into styled DOM elements: one block element per
//! paragraph, one inline element per run, bullets and auto-numbering
//! rendered in front of the first run. Rendering never fails; anything
//! the markup does not provide falls back to a documented default.

use crate::common::fmt::{fmt_num_2dp, fmt_pt, fmt_px};
use crate::common::unit::{centipt_to_pt, emu_to_px, pct_to_ratio};
use crate::context::RenderContext;
use crate::dom::Element;
use crate::drawing::color::{ResolvedColor, resolve_color, resolve_solid_fill};
use crate::text::cascade::{Placeholder, resolve_paragraph_style, shape_level_def_rpr};
use crate::text::hyperlink::resolve_hyperlink;
use crate::text::style::{
    Bullet, Caps, LineHeight, MAX_INDENT_LEVEL, OutlineStyle, ParagraphStyle, RunStyle, Spacing,
    fallback_font, merge_run_props,
};
use crate::xml::NodeRef;

/// Caller-provided rendering options: override colors and emphasis coming
/// from the hosting shape or table cell.
#[derive(Debug, Clone, Default)]
pub struct TextBodyOptions {
    /// Color used when no cascade layer yields one
    pub fallback_color: Option<ResolvedColor>,
    /// Table cell text color, applied above the inherited cascade color
    pub cell_text_color: Option<ResolvedColor>,
    pub bold_override: Option<bool>,
    pub italic_override: Option<bool>,
}

/// Placeholder types whose paragraphs never render bullets.
const BULLET_SUPPRESSED_TYPES: [&str; 6] =
    ["sldNum", "dt", "ftr", "title", "ctrTitle", "subTitle"];

/// Font size in points when no cascade layer provides one.
const DEFAULT_FONT_SIZE_PT: f64 = 12.0;

/// Text outline stroke width when `ln` gives none: one CSS pixel.
const DEFAULT_OUTLINE_WIDTH_EMU: f64 = 9525.0;

/// Auto-fit scaling read off the body's `normAutofit` element.
#[derive(Debug, Clone, Copy)]
struct AutoFit {
    font_scale: f64,
    ln_reduction: f64,
}

impl AutoFit {
    fn from_body_pr(body_pr: NodeRef) -> Self {
        let fit = body_pr.child("normAutofit");
        Self {
            font_scale: fit.num_attr("fontScale").map(pct_to_ratio).unwrap_or(1.0),
            ln_reduction: fit
                .num_attr("lnSpcReduction")
                .map(pct_to_ratio)
                .unwrap_or(0.0),
        }
    }
}

/// Render every paragraph of a `txBody` into `container`.
///
/// `placeholder` identifies the hosting shape's placeholder slot (drives
/// the cascade's category and placeholder layers and bullet suppression),
/// `shape_lst_style` is the shape's own `lstStyle` node and `body_pr` its
/// `bodyPr` (auto-fit scaling).
pub fn render_text_body(
    body: NodeRef,
    placeholder: Option<Placeholder<'_>>,
    shape_lst_style: NodeRef,
    body_pr: NodeRef,
    ctx: &RenderContext,
    opts: &TextBodyOptions,
    container: &mut Element,
) {
    let autofit = AutoFit::from_body_pr(body_pr);
    let mut auto_num = 0u32;
    for p in body.children("p") {
        container.append(render_paragraph(
            p,
            placeholder,
            shape_lst_style,
            autofit,
            &mut auto_num,
            ctx,
            opts,
        ));
    }
}

/// Inline content of a paragraph, in document order.
enum Item<'a> {
    /// `r` or `fld`
    Run(NodeRef<'a>),
    Break,
}

fn paragraph_items(p: NodeRef<'_>) -> Vec<Item<'_>> {
    p.all_children()
        .filter_map(|c| match c.name() {
            "r" | "fld" => Some(Item::Run(c)),
            "br" => Some(Item::Break),
            _ => None,
        })
        .collect()
}

fn render_paragraph<'a>(
    p: NodeRef<'a>,
    placeholder: Option<Placeholder<'_>>,
    shape_lst_style: NodeRef<'a>,
    autofit: AutoFit,
    auto_num: &mut u32,
    ctx: &RenderContext<'a>,
    opts: &TextBodyOptions,
) -> Element {
    let ppr = p.child("pPr");
    let level = ppr
        .num_attr("lvl")
        .map(|v| v as usize)
        .unwrap_or(0)
        .min(MAX_INDENT_LEVEL);
    let style = resolve_paragraph_style(ppr, level, placeholder, shape_lst_style, ctx);
    let shape_def_rpr = shape_level_def_rpr(shape_lst_style, level);

    let mut block = Element::new("div");
    block.set_style(
        "text-align",
        style.align.map(|a| a.css()).unwrap_or("left"),
    );
    if let Some(mar_l) = style.margin_left {
        block.set_style("margin-left", fmt_px(emu_to_px(mar_l)));
    }
    if let Some(indent) = style.indent {
        block.set_style("text-indent", fmt_px(emu_to_px(indent)));
    }

    // Auto-fit shrinks both line-height flavors.
    let mut absolute_lh_pt = None;
    match style.line_height {
        Some(LineHeight::Ratio(r)) => {
            block.set_style("line-height", fmt_num_2dp(r * (1.0 - autofit.ln_reduction)));
        },
        Some(LineHeight::Points(pt)) => {
            let adjusted = pt * (1.0 - autofit.ln_reduction);
            absolute_lh_pt = Some(adjusted);
            block.set_style("line-height", fmt_pt(adjusted));
        },
        None => {},
    }

    let items = paragraph_items(p);
    let eff_size = effective_font_size(&style, &items);

    if let Some(spacing) = style.space_before {
        block.set_style("margin-top", fmt_pt(spacing_pt(spacing, eff_size)));
    }
    if let Some(spacing) = style.space_after {
        block.set_style("margin-bottom", fmt_pt(spacing_pt(spacing, eff_size)));
    }

    let has_text = items
        .iter()
        .any(|i| matches!(i, Item::Run(r) if !r.child("t").text().is_empty()));
    let ph_type = placeholder.and_then(|ph| ph.ph_type);
    let suppressed = !has_text || ph_type.is_some_and(|t| BULLET_SUPPRESSED_TYPES.contains(&t));
    if !suppressed {
        match &style.bullet {
            Some(Bullet::Char(ch)) => {
                block.append(bullet_span(
                    ch.clone(),
                    &style,
                    &items,
                    shape_def_rpr,
                    eff_size,
                    autofit,
                    ctx,
                    opts,
                ));
            },
            Some(Bullet::AutoNum(scheme)) => {
                // The counter advances only when a number actually renders.
                *auto_num += 1;
                block.append(bullet_span(
                    format_auto_number(scheme, *auto_num),
                    &style,
                    &items,
                    shape_def_rpr,
                    eff_size,
                    autofit,
                    ctx,
                    opts,
                ));
            },
            _ => {},
        }
    }

    let has_break = items.iter().any(|i| matches!(i, Item::Break));
    if let (Some(lh), true) = (absolute_lh_pt, has_break) {
        // With an absolute line height, physical lines become sized blocks
        // so that empty lines still occupy their height.
        let mut line = new_line(lh);
        for item in &items {
            match item {
                Item::Run(r) => line.append(render_run(
                    *r,
                    &style,
                    shape_def_rpr,
                    eff_size,
                    autofit,
                    ctx,
                    opts,
                )),
                Item::Break => {
                    block.append(line);
                    line = new_line(lh);
                },
            }
        }
        block.append(line);
    } else {
        for item in &items {
            match item {
                Item::Run(r) => block.append(render_run(
                    *r,
                    &style,
                    shape_def_rpr,
                    eff_size,
                    autofit,
                    ctx,
                    opts,
                )),
                Item::Break => block.append(Element::new("br")),
            }
        }
    }

    // A trailing `endParaRPr` after a break (or in an empty paragraph)
    // keeps the final empty line at its intended height.
    let end_rpr = p.child("endParaRPr");
    let ends_with_break = matches!(items.last(), Some(Item::Break));
    if end_rpr.exists() && (items.is_empty() || ends_with_break) {
        let size = end_rpr.num_attr("sz").map(centipt_to_pt).unwrap_or(eff_size)
            * autofit.font_scale;
        let mut spacer = Element::new("span");
        spacer.set_style("font-size", fmt_pt(size));
        spacer.append_text("\u{200B}");
        block.append(spacer);
    }

    block
}

fn new_line(height_pt: f64) -> Element {
    let mut line = Element::new("div");
    line.set_style("height", fmt_pt(height_pt));
    line.set_style("line-height", fmt_pt(height_pt));
    line
}

/// Effective font size of a paragraph: the merged default run properties'
/// size, else the first sized run, else 12pt.
fn effective_font_size(style: &ParagraphStyle<'_>, items: &[Item<'_>]) -> f64 {
    if let Some(sz) = style.def_rpr.num_attr("sz") {
        return centipt_to_pt(sz);
    }
    for item in items {
        if let Item::Run(r) = item {
            if let Some(sz) = r.child("rPr").num_attr("sz") {
                return centipt_to_pt(sz);
            }
        }
    }
    DEFAULT_FONT_SIZE_PT
}

fn spacing_pt(spacing: Spacing, eff_size: f64) -> f64 {
    match spacing {
        Spacing::Points(pt) => pt,
        Spacing::FontRelative(ratio) => ratio * eff_size,
    }
}

#[allow(clippy::too_many_arguments)]
fn bullet_span<'a>(
    glyph: String,
    style: &ParagraphStyle<'a>,
    items: &[Item<'a>],
    shape_def_rpr: NodeRef<'a>,
    eff_size: f64,
    autofit: AutoFit,
    ctx: &RenderContext<'a>,
    opts: &TextBodyOptions,
) -> Element {
    let mut span = Element::new("span");
    span.set_attr("class", "bullet");
    if let Some(font) = &style.bullet_font {
        span.set_style("font-family", font.clone());
    }
    span.set_style("font-size", fmt_pt(eff_size * autofit.font_scale));
    span.set_style(
        "color",
        bullet_color(style, items, shape_def_rpr, ctx, opts).to_css(),
    );
    span.append_text(glyph);
    span
}

/// Bullet color: explicit `buClr`, then the paragraph's default run color,
/// then the first run's own color, then the shape list-style level's
/// default run color, then the caller's colors, then black.
fn bullet_color<'a>(
    style: &ParagraphStyle<'a>,
    items: &[Item<'a>],
    shape_def_rpr: NodeRef<'a>,
    ctx: &RenderContext<'a>,
    opts: &TextBodyOptions,
) -> ResolvedColor {
    resolve_color(style.bullet_color, ctx)
        .or_else(|| resolve_solid_fill(style.def_rpr, ctx))
        .or_else(|| first_run_color(items, ctx))
        .or_else(|| resolve_solid_fill(shape_def_rpr, ctx))
        .or_else(|| opts.fallback_color.clone())
        .or_else(|| opts.cell_text_color.clone())
        .unwrap_or_else(|| ResolvedColor::opaque("000000"))
}

fn first_run_color(items: &[Item<'_>], ctx: &RenderContext<'_>) -> Option<ResolvedColor> {
    items.iter().find_map(|item| match item {
        Item::Run(r) => resolve_solid_fill(r.child("rPr"), ctx),
        Item::Break => None,
    })
}

/// Format an auto-number bullet for a 1-based ordinal.
pub fn format_auto_number(scheme: &str, n: u32) -> String {
    match scheme {
        "arabicPlain" => n.to_string(),
        "arabicParenR" => format!("{})", n),
        "arabicParenBoth" => format!("({})", n),
        "alphaLcPeriod" => format!("{}.", to_alpha(n, false)),
        "alphaUcPeriod" => format!("{}.", to_alpha(n, true)),
        "alphaLcParenR" => format!("{})", to_alpha(n, false)),
        "alphaUcParenR" => format!("{})", to_alpha(n, true)),
        "alphaLcParenBoth" => format!("({})", to_alpha(n, false)),
        "alphaUcParenBoth" => format!("({})", to_alpha(n, true)),
        "romanLcPeriod" => format!("{}.", to_roman(n).to_lowercase()),
        "romanUcPeriod" => format!("{}.", to_roman(n)),
        "romanLcParenR" => format!("{})", to_roman(n).to_lowercase()),
        "romanUcParenR" => format!("{})", to_roman(n)),
        "romanLcParenBoth" => format!("({})", to_roman(n).to_lowercase()),
        "romanUcParenBoth" => format!("({})", to_roman(n)),
        // arabicPeriod and anything unrecognized
        _ => format!("{}.", n),
    }
}

/// Bijective base-26 alphabetic numbering: 1 = a, 26 = z, 27 = aa.
fn to_alpha(mut n: u32, upper: bool) -> String {
    let mut digits = Vec::new();
    while n > 0 {
        n -= 1;
        let c = b'a' + (n % 26) as u8;
        digits.push(if upper { c.to_ascii_uppercase() } else { c });
        n /= 26;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

fn to_roman(mut n: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn render_run<'a>(
    r: NodeRef<'a>,
    style: &ParagraphStyle<'a>,
    shape_def_rpr: NodeRef<'a>,
    eff_size: f64,
    autofit: AutoFit,
    ctx: &RenderContext<'a>,
    opts: &TextBodyOptions,
) -> Element {
    let rpr = r.child("rPr");

    let mut run = RunStyle::default();
    merge_run_props(&mut run, style.def_rpr, ctx);
    let inherited_bold = run.bold;
    let inherited_italic = run.italic;
    merge_run_props(&mut run, rpr, ctx);

    // An explicit-but-empty defRPr on a higher layer wipes out a color the
    // shape list-style carried; rescue it from the level's own defRPr.
    if run.color.is_none() && run.gradient.is_none() && !run.no_fill {
        if let Some(color) = resolve_solid_fill(shape_def_rpr, ctx) {
            run.color = Some(color);
        }
    }

    let explicit_fill = rpr.child("solidFill").exists() && resolve_solid_fill(rpr, ctx).is_some();

    let href = run.hyperlink_rid.and_then(|rid| resolve_hyperlink(rid, ctx));
    let mut el = Element::new(if href.is_some() { "a" } else { "span" });
    if let Some(href) = &href {
        el.set_attr("href", href.clone());
    }

    let mut size_pt = run.size_pt.unwrap_or(eff_size) * autofit.font_scale;
    if let Some(shift) = run.baseline_pct {
        if shift.abs() >= 20.0 {
            size_pt *= 0.65;
        }
        el.set_style("vertical-align", format!("{}%", fmt_num_2dp(shift)));
    }
    el.set_style("font-size", fmt_pt(size_pt));

    if run.no_fill {
        el.set_style("color", "transparent");
        if let Some(outline) = &run.outline {
            apply_stroke(&mut el, outline);
            if let Some(gradient) = &outline.gradient {
                el.set_style("-webkit-mask-image", gradient.to_css());
            }
        }
    } else if let Some(gradient) = &run.gradient {
        el.set_style("background-image", gradient.to_css());
        el.set_style("-webkit-background-clip", "text");
        el.set_style("background-clip", "text");
        el.set_style("color", "transparent");
        if let Some(outline) = &run.outline {
            apply_stroke(&mut el, outline);
        }
    } else {
        let color = explicit_fill
            .then(|| run.color.clone())
            .flatten()
            .or_else(|| {
                href.as_ref()
                    .and_then(|_| ctx.scheme_color("hlink").map(ResolvedColor::opaque))
            })
            .or_else(|| opts.cell_text_color.clone())
            .or_else(|| opts.fallback_color.clone())
            .or_else(|| run.color.clone())
            .unwrap_or_else(|| ResolvedColor::opaque("000000"));
        el.set_style("color", color.to_css());
        if let Some(outline) = &run.outline {
            apply_stroke(&mut el, outline);
        }
    }

    if let Some(b) = rpr.bool_attr("b").or(opts.bold_override).or(inherited_bold) {
        el.set_style("font-weight", if b { "bold" } else { "normal" });
    }
    if let Some(i) = rpr
        .bool_attr("i")
        .or(opts.italic_override)
        .or(inherited_italic)
    {
        el.set_style("font-style", if i { "italic" } else { "normal" });
    }

    let mut decoration = String::new();
    if run.underline == Some(true) {
        decoration.push_str("underline");
    }
    if run.strike == Some(true) {
        if !decoration.is_empty() {
            decoration.push(' ');
        }
        decoration.push_str("line-through");
    }
    if !decoration.is_empty() {
        el.set_style("text-decoration", decoration);
    }

    if let Some(spc) = run.letter_spacing_pt {
        el.set_style("letter-spacing", fmt_pt(spc));
    }
    if let Some(kern) = run.kern_min_pt {
        // kern="0" means kerning at every size.
        let on = kern == 0.0 || size_pt >= kern;
        el.set_style("font-kerning", if on { "normal" } else { "none" });
    }
    match run.caps {
        Some(Caps::All) => el.set_style("text-transform", "uppercase"),
        Some(Caps::Small) => el.set_style("font-variant", "small-caps"),
        _ => {},
    }
    if let Some(font) = run.font.clone().or_else(|| fallback_font(ctx)) {
        el.set_style("font-family", font);
    }

    let raw = r.child("t").text();
    if raw.contains('\t') {
        el.set_style("white-space", "pre");
    }
    el.append_text(rewrite_spaces(&raw));
    el
}

fn apply_stroke(el: &mut Element, outline: &OutlineStyle) {
    let width_px = emu_to_px(outline.width.unwrap_or(DEFAULT_OUTLINE_WIDTH_EMU));
    let color = outline
        .color
        .as_ref()
        .map(|c| c.to_css())
        .or_else(|| {
            outline
                .gradient
                .as_ref()
                .and_then(|g| g.stops.first())
                .map(|s| s.color.to_css())
        })
        .unwrap_or_else(|| "#000000".to_string());
    el.set_style("-webkit-text-stroke", format!("{} {}", fmt_px(width_px), color));
}

/// Rewrite runs of two or more spaces so every other space becomes NBSP,
/// keeping the run visible without forcing `pre` whitespace.
fn rewrite_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = 0usize;
    for c in text.chars() {
        if c == ' ' {
            pending += 1;
            continue;
        }
        flush_spaces(&mut out, pending);
        pending = 0;
        out.push(c);
    }
    flush_spaces(&mut out, pending);
    out
}

fn flush_spaces(out: &mut String, count: usize) {
    if count < 2 {
        out.extend(std::iter::repeat_n(' ', count));
        return;
    }
    for i in 0..count {
        out.push(if i % 2 == 0 { '\u{00A0}' } else { ' ' });
    }
}
