//! Gradient fill resolution.
//!
//! Converts a `gradFill` element into a generic linear-gradient descriptor:
//! resolved stops sorted by position plus a direction derived from the
//! `lin` angle. Fewer than two resolvable stops means no gradient.

use crate::common::fmt::fmt_num;
use crate::common::unit::{angle_to_deg, pct_to_ratio};
use crate::context::RenderContext;
use crate::drawing::color::{ResolvedColor, resolve_color};
use crate::xml::NodeRef;
use smallvec::SmallVec;

/// One resolved gradient stop.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Offset along the gradient line, 0.0 to 1.0
    pub pos: f64,
    /// Stop color
    pub color: ResolvedColor,
}

/// Normalized endpoint coordinates of the gradient line (unit square).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientCoords {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A linear gradient: direction plus ordered stops.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientFill {
    /// Gradient angle in degrees (0 = left-to-right, 90 = top-to-bottom)
    pub angle_deg: f64,
    /// Stops sorted ascending by position
    pub stops: SmallVec<[GradientStop; 4]>,
}

/// Default direction when no `lin` angle is given: top-to-bottom.
const DEFAULT_ANGLE_DEG: f64 = 90.0;

impl GradientFill {
    /// Endpoints of the gradient line on the unit square.
    pub fn coords(&self) -> GradientCoords {
        let theta = self.angle_deg.to_radians();
        GradientCoords {
            x0: 0.5 - 0.5 * theta.cos(),
            y0: 0.5 - 0.5 * theta.sin(),
            x1: 0.5 + 0.5 * theta.cos(),
            y1: 0.5 + 0.5 * theta.sin(),
        }
    }

    /// CSS `linear-gradient(...)` descriptor.
    ///
    /// CSS measures 0deg as bottom-to-top and grows clockwise, while the
    /// source angle measures 0deg as left-to-right growing clockwise, so
    /// the angle shifts by 90.
    pub fn to_css(&self) -> String {
        let css_angle = (self.angle_deg + 90.0).rem_euclid(360.0);
        let mut out = format!("linear-gradient({}deg", fmt_num(css_angle));
        for stop in &self.stops {
            out.push_str(", ");
            out.push_str(&stop.color.to_css());
            out.push(' ');
            out.push_str(&fmt_num((stop.pos * 10000.0).round() / 100.0));
            out.push('%');
        }
        out.push(')');
        out
    }
}

/// Resolve a `gradFill` element. Returns `None` when fewer than two stops
/// resolve to a position and a color.
pub fn resolve_gradient_fill(grad: NodeRef, ctx: &RenderContext) -> Option<GradientFill> {
    if grad.name() != "gradFill" {
        return None;
    }

    let mut stops: SmallVec<[GradientStop; 4]> = SmallVec::new();
    for gs in grad.child("gsLst").children("gs") {
        let pos = match gs.num_attr("pos") {
            Some(p) => pct_to_ratio(p).clamp(0.0, 1.0),
            None => continue,
        };
        // A stop whose color cannot be resolved is excluded entirely.
        if let Some(color) = resolve_color(gs, ctx) {
            stops.push(GradientStop { pos, color });
        }
    }

    if stops.len() < 2 {
        return None;
    }
    stops.sort_by(|a, b| a.pos.partial_cmp(&b.pos).unwrap_or(std::cmp::Ordering::Equal));

    let angle_deg = grad
        .child("lin")
        .num_attr("ang")
        .map(angle_to_deg)
        .unwrap_or(DEFAULT_ANGLE_DEG);

    Some(GradientFill { angle_deg, stops })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Theme;
    use crate::xml::XmlNode;

    fn ctx() -> RenderContext<'static> {
        RenderContext::new(Theme::default())
    }

    fn grad(xml: &str) -> XmlNode {
        XmlNode::parse_str(xml).unwrap()
    }

    #[test]
    fn test_horizontal_gradient_direction() {
        let doc = grad(
            r#"<a:gradFill xmlns:a="x"><a:gsLst>
               <a:gs pos="0"><a:srgbClr val="FF0000"/></a:gs>
               <a:gs pos="100000"><a:srgbClr val="0000FF"/></a:gs>
               </a:gsLst><a:lin ang="0"/></a:gradFill>"#,
        );
        let g = resolve_gradient_fill(doc.node(), &ctx()).unwrap();
        let c = g.coords();
        // angle 0: horizontal, left-to-right
        assert!((c.y0 - c.y1).abs() < 1e-9);
        assert!((c.x1 - c.x0).abs() > 0.9);
    }

    #[test]
    fn test_vertical_gradient_direction() {
        let doc = grad(
            r#"<a:gradFill xmlns:a="x"><a:gsLst>
               <a:gs pos="0"><a:srgbClr val="FF0000"/></a:gs>
               <a:gs pos="100000"><a:srgbClr val="0000FF"/></a:gs>
               </a:gsLst><a:lin ang="5400000"/></a:gradFill>"#,
        );
        let g = resolve_gradient_fill(doc.node(), &ctx()).unwrap();
        let c = g.coords();
        // angle 90 deg: vertical, top-to-bottom
        assert!((c.x0 - c.x1).abs() < 1e-9);
        assert!(c.y0.abs() < 1e-9);
        assert!((c.y1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_angle_is_top_to_bottom() {
        let doc = grad(
            r#"<a:gradFill xmlns:a="x"><a:gsLst>
               <a:gs pos="0"><a:srgbClr val="FF0000"/></a:gs>
               <a:gs pos="100000"><a:srgbClr val="0000FF"/></a:gs>
               </a:gsLst></a:gradFill>"#,
        );
        let g = resolve_gradient_fill(doc.node(), &ctx()).unwrap();
        assert_eq!(g.angle_deg, 90.0);
    }

    #[test]
    fn test_stops_sorted_and_sys_clr_fallback() {
        let doc = grad(
            r#"<a:gradFill xmlns:a="x"><a:gsLst>
               <a:gs pos="100000"><a:srgbClr val="0000FF"/></a:gs>
               <a:gs pos="0"><a:sysClr val="window" lastClr="FFFFFF"><a:alpha val="80000"/></a:sysClr></a:gs>
               </a:gsLst></a:gradFill>"#,
        );
        let g = resolve_gradient_fill(doc.node(), &ctx()).unwrap();
        assert_eq!(g.stops[0].pos, 0.0);
        assert_eq!(g.stops[0].color.color, "FFFFFF");
        assert_eq!(g.stops[0].color.alpha, 0.8);
        assert_eq!(g.stops[1].pos, 1.0);
    }

    #[test]
    fn test_too_few_stops() {
        let doc = grad(
            r#"<a:gradFill xmlns:a="x"><a:gsLst>
               <a:gs pos="0"><a:srgbClr val="FF0000"/></a:gs>
               <a:gs pos="100000"><a:schemeClr val="accent1"/></a:gs>
               </a:gsLst></a:gradFill>"#,
        );
        // accent1 not in the (empty) theme: that stop is excluded, leaving one.
        assert!(resolve_gradient_fill(doc.node(), &ctx()).is_none());
    }

    #[test]
    fn test_css_descriptor() {
        let doc = grad(
            r#"<a:gradFill xmlns:a="x"><a:gsLst>
               <a:gs pos="0"><a:srgbClr val="FF0000"/></a:gs>
               <a:gs pos="100000"><a:srgbClr val="0000FF"/></a:gs>
               </a:gsLst><a:lin ang="0"/></a:gradFill>"#,
        );
        let g = resolve_gradient_fill(doc.node(), &ctx()).unwrap();
        assert_eq!(
            g.to_css(),
            "linear-gradient(90deg, #FF0000 0%, #0000FF 100%)"
        );
    }
}
