//! Background and accent palette resolution.

use crate::common::RGBColor;
use crate::context::RenderContext;
use crate::drawing::color::resolve_solid_fill;
use crate::xml::NodeRef;

/// Office default accents, used when the theme defines none.
const DEFAULT_ACCENTS: [&str; 6] = [
    "4472C4", "ED7D31", "A5A5A5", "FFC000", "5B9BD5", "70AD47",
];

const ACCENT_SLOTS: [&str; 6] = [
    "accent1", "accent2", "accent3", "accent4", "accent5", "accent6",
];

/// Series palette derived from the theme accents and the chart style id:
/// even ids rotate the palette by one, ids of 100 and above lighten the
/// back half. This approximates the native chart-style color variation
/// using only scheme colors.
pub fn chart_palette(style_id: Option<u32>, ctx: &RenderContext<'_>) -> Vec<String> {
    let mut accents: Vec<String> = ACCENT_SLOTS
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            ctx.scheme_color(slot)
                .unwrap_or(DEFAULT_ACCENTS[i])
                .to_string()
        })
        .collect();

    if let Some(id) = style_id {
        if id % 2 == 0 {
            accents.rotate_left(1);
        }
        if id >= 100 {
            let half = accents.len() / 2;
            for hex in accents.iter_mut().skip(half) {
                if let Some(rgb) = RGBColor::from_hex(hex) {
                    *hex = rgb.lighten(0.4).to_hex();
                }
            }
        }
    }

    accents.into_iter().map(|hex| format!("#{hex}")).collect()
}

/// Chart canvas background: explicit no-fill is transparent, an explicit
/// solid fill wins, no fill node at all means white.
pub fn chart_background(chart_space: NodeRef, ctx: &RenderContext<'_>) -> String {
    let sppr = chart_space.child("spPr");
    if sppr.child("noFill").exists() {
        return "transparent".to_string();
    }
    resolve_solid_fill(sppr, ctx)
        .map(|c| c.to_css())
        .unwrap_or_else(|| "#FFFFFF".to_string())
}

/// Plot-area background: only an explicit solid fill counts.
pub fn plot_area_background(plot_area: NodeRef, ctx: &RenderContext<'_>) -> Option<String> {
    resolve_solid_fill(plot_area.child("spPr"), ctx).map(|c| c.to_css())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Theme;
    use crate::xml::XmlNode;

    fn themed_ctx() -> RenderContext<'static> {
        let mut theme = Theme::default();
        for (i, slot) in ACCENT_SLOTS.iter().enumerate() {
            theme
                .color_scheme
                .insert((*slot).to_string(), format!("00000{i}"));
        }
        RenderContext::new(theme)
    }

    #[test]
    fn test_palette_odd_style_keeps_order() {
        let palette = chart_palette(Some(3), &themed_ctx());
        assert_eq!(palette[0], "#000000");
        assert_eq!(palette[5], "#000005");
    }

    #[test]
    fn test_palette_even_style_rotates() {
        let palette = chart_palette(Some(2), &themed_ctx());
        assert_eq!(palette[0], "#000001");
        assert_eq!(palette[5], "#000000");
    }

    #[test]
    fn test_palette_high_style_lightens_back_half() {
        let palette = chart_palette(Some(101), &themed_ctx());
        // front half untouched
        assert_eq!(palette[0], "#000000");
        // back half blended towards white
        assert_ne!(palette[3], "#000003");
        let rgb = RGBColor::from_hex(&palette[3][1..]).unwrap();
        assert!(rgb.r > 0);
    }

    #[test]
    fn test_palette_empty_theme_uses_defaults() {
        let palette = chart_palette(None, &RenderContext::new(Theme::default()));
        assert_eq!(palette[0], "#4472C4");
        assert_eq!(palette.len(), 6);
    }

    #[test]
    fn test_backgrounds() {
        let ctx = themed_ctx();

        let no_fill = XmlNode::parse_str(
            r#"<c:chartSpace xmlns:c="x" xmlns:a="y"><c:spPr><a:noFill/></c:spPr></c:chartSpace>"#,
        )
        .unwrap();
        assert_eq!(chart_background(no_fill.node(), &ctx), "transparent");

        let solid = XmlNode::parse_str(
            r#"<c:chartSpace xmlns:c="x" xmlns:a="y"><c:spPr>
                <a:solidFill><a:srgbClr val="FAFAFA"/></a:solidFill>
            </c:spPr></c:chartSpace>"#,
        )
        .unwrap();
        assert_eq!(chart_background(solid.node(), &ctx), "#FAFAFA");

        let absent = XmlNode::parse_str(r#"<c:chartSpace xmlns:c="x"/>"#).unwrap();
        assert_eq!(chart_background(absent.node(), &ctx), "#FFFFFF");

        assert!(plot_area_background(absent.node(), &ctx).is_none());
    }
}
