//! Per-render context: theme, relationships, placeholder catalogs, caches.
//!
//! A [`RenderContext`] is assembled once per slide render from the resolved
//! theme, the active master and layout, and the slide's relationship part.
//! It is read-mostly; the only mutation is through the two per-render
//! caches (color resolution, media URLs), which live behind `RefCell` so a
//! context is deliberately single-threaded for its lifetime.

use crate::drawing::color::ResolvedColor;
use crate::xml::NodeRef;
use std::cell::RefCell;
use std::collections::HashMap;

/// Typefaces of one theme font slot, keyed by script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontScheme {
    /// Latin script typeface
    pub latin: String,
    /// East-Asian script typeface
    pub ea: String,
    /// Complex-script typeface
    pub cs: String,
}

impl FontScheme {
    /// Look up a typeface by script key (`lt`/`latin`, `ea`, `cs`).
    pub fn by_script(&self, script: &str) -> Option<&str> {
        let face = match script {
            "lt" | "latin" => &self.latin,
            "ea" => &self.ea,
            "cs" => &self.cs,
            _ => return None,
        };
        if face.is_empty() { None } else { Some(face) }
    }
}

/// Resolved document theme: color scheme and font tables.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Scheme slot name -> hex color without `#` (e.g. "accent1" -> "4472C4")
    pub color_scheme: HashMap<String, String>,
    /// Major (heading) fonts
    pub major_fonts: FontScheme,
    /// Minor (body) fonts
    pub minor_fonts: FontScheme,
}

impl Theme {
    /// Extract a theme from a parsed `theme` part root element.
    ///
    /// Each scheme slot carries either an explicit `srgbClr` or a system
    /// color with a `lastClr` snapshot; slots with neither are skipped.
    pub fn from_theme_xml(root: NodeRef) -> Theme {
        let elements = root.child("themeElements");
        let mut color_scheme = HashMap::new();

        for slot in elements.child("clrScheme").all_children() {
            let hex = slot
                .child("srgbClr")
                .attr("val")
                .or_else(|| slot.child("sysClr").attr("lastClr"));
            if let Some(hex) = hex {
                color_scheme.insert(slot.name().to_string(), hex.to_string());
            }
        }

        let font_slot = |name: &str| -> FontScheme {
            let node = elements.child("fontScheme").child(name);
            FontScheme {
                latin: node.child("latin").attr("typeface").unwrap_or("").to_string(),
                ea: node.child("ea").attr("typeface").unwrap_or("").to_string(),
                cs: node.child("cs").attr("typeface").unwrap_or("").to_string(),
            }
        };

        Theme {
            color_scheme,
            major_fonts: font_slot("majorFont"),
            minor_fonts: font_slot("minorFont"),
        }
    }

}

/// One entry of a part's relationship map.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Relationship target (path or URL)
    pub target: String,
    /// `External` for external targets, `None` for internal parts
    pub target_mode: Option<String>,
    /// Relationship type URI
    pub rel_type: String,
}

/// Everything the cascade and chart translator need to resolve styles for
/// one slide render.
#[derive(Debug, Default)]
pub struct RenderContext<'a> {
    /// Resolved document theme
    pub theme: Theme,
    /// Master color map (scheme slot remapping, e.g. "tx1" -> "dk1"),
    /// possibly with layout/chart overrides applied
    pub color_map: HashMap<String, String>,
    /// Slide relationship map: rId -> relationship
    pub relationships: HashMap<String, Relationship>,
    /// Master `txStyles` node (titleStyle/bodyStyle/otherStyle)
    pub master_text_styles: NodeRef<'a>,
    /// Presentation-level `defaultTextStyle` node
    pub default_text_style: NodeRef<'a>,
    /// Placeholder shape nodes of the active master
    pub master_placeholders: Vec<NodeRef<'a>>,
    /// Placeholder shape nodes of the active layout
    pub layout_placeholders: Vec<NodeRef<'a>>,
    color_cache: RefCell<HashMap<String, Option<ResolvedColor>>>,
    media_cache: RefCell<HashMap<String, String>>,
}

impl<'a> RenderContext<'a> {
    /// Create a context for a theme with empty maps and caches.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    /// Read the master `clrMap` element's raw attribute list into the
    /// scheme remapping table.
    pub fn load_color_map(&mut self, clr_map: NodeRef) {
        for (from, to) in clr_map.attrs() {
            self.color_map.insert(from.to_string(), to.to_string());
        }
    }

    /// Apply a `clrMapOvr` element. An explicit `overrideClrMapping` child
    /// replaces matching entries; the master-mapping marker leaves the
    /// inherited map untouched.
    pub fn apply_color_map_override(&mut self, clr_map_ovr: NodeRef) {
        let ovr = clr_map_ovr.child("overrideClrMapping");
        if ovr.exists() {
            for (from, to) in ovr.attrs() {
                self.color_map.insert(from.to_string(), to.to_string());
            }
        }
    }

    /// Resolve a scheme slot through the color map, then the theme.
    pub fn scheme_color(&self, slot: &str) -> Option<&str> {
        let mapped = self.color_map.get(slot).map(|s| s.as_str()).unwrap_or(slot);
        self.theme.color_scheme.get(mapped).map(|s| s.as_str())
    }

    /// Look up a relationship by id.
    pub fn relationship(&self, rid: &str) -> Option<&Relationship> {
        self.relationships.get(rid)
    }

    /// Derive a child context for one chart: same theme and inputs, scheme
    /// map overridden by the chart's `clrMapOvr`, and fresh caches so chart
    /// color resolution cannot pollute the slide-level cache.
    pub fn for_chart(&self, clr_map_ovr: NodeRef) -> RenderContext<'a> {
        let mut ctx = RenderContext {
            theme: self.theme.clone(),
            color_map: self.color_map.clone(),
            relationships: self.relationships.clone(),
            master_text_styles: self.master_text_styles,
            default_text_style: self.default_text_style,
            master_placeholders: self.master_placeholders.clone(),
            layout_placeholders: self.layout_placeholders.clone(),
            color_cache: RefCell::new(HashMap::new()),
            media_cache: RefCell::new(HashMap::new()),
        };
        ctx.apply_color_map_override(clr_map_ovr);
        ctx
    }

    pub(crate) fn cached_color(&self, key: &str) -> Option<Option<ResolvedColor>> {
        self.color_cache.borrow().get(key).cloned()
    }

    pub(crate) fn cache_color(&self, key: String, value: Option<ResolvedColor>) {
        self.color_cache.borrow_mut().insert(key, value);
    }

    /// Cached media URL for a relationship id, if one has been registered.
    pub fn cached_media_url(&self, rid: &str) -> Option<String> {
        self.media_cache.borrow().get(rid).cloned()
    }

    /// Register a media URL for a relationship id for this render.
    pub fn cache_media_url(&self, rid: impl Into<String>, url: impl Into<String>) {
        self.media_cache.borrow_mut().insert(rid.into(), url.into());
    }
}

/// Normalize a relative relationship target against a base directory.
///
/// Used to locate a chart part from a graphic frame's relationship, e.g.
/// `resolve_rel_target("ppt/slides", "../charts/chart1.xml")` yields
/// `"ppt/charts/chart1.xml"`.
pub fn resolve_rel_target(base_dir: &str, target: &str) -> String {
    if target.starts_with('/') {
        return target.trim_start_matches('/').to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for piece in target.split('/') {
        match piece {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlNode;

    const THEME: &str = r#"<a:theme xmlns:a="x" name="Office">
      <a:themeElements>
        <a:clrScheme name="Office">
          <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
          <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
          <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
          <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
        </a:clrScheme>
        <a:fontScheme name="Office">
          <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
          <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface="MS Gothic"/><a:cs typeface=""/></a:minorFont>
        </a:fontScheme>
      </a:themeElements>
    </a:theme>"#;

    #[test]
    fn test_theme_extraction() {
        let doc = XmlNode::parse_str(THEME).unwrap();
        let theme = Theme::from_theme_xml(doc.node());

        assert_eq!(theme.color_scheme.get("accent1").unwrap(), "4472C4");
        assert_eq!(theme.color_scheme.get("dk1").unwrap(), "000000");
        assert_eq!(theme.color_scheme.get("hlink").unwrap(), "0563C1");
        assert_eq!(theme.major_fonts.latin, "Calibri Light");
        assert_eq!(theme.minor_fonts.by_script("ea"), Some("MS Gothic"));
        assert_eq!(theme.minor_fonts.by_script("cs"), None);
    }

    #[test]
    fn test_scheme_color_remap() {
        let doc = XmlNode::parse_str(THEME).unwrap();
        let mut ctx = RenderContext::new(Theme::from_theme_xml(doc.node()));
        let map = XmlNode::parse_str(r#"<p:clrMap xmlns:p="x" bg1="lt1" tx1="dk1"/>"#).unwrap();
        ctx.load_color_map(map.node());

        assert_eq!(ctx.scheme_color("tx1"), Some("000000"));
        assert_eq!(ctx.scheme_color("bg1"), Some("FFFFFF"));
        assert_eq!(ctx.scheme_color("accent1"), Some("4472C4"));
        assert_eq!(ctx.scheme_color("accent9"), None);
    }

    #[test]
    fn test_color_map_override_isolation() {
        let doc = XmlNode::parse_str(THEME).unwrap();
        let mut ctx = RenderContext::new(Theme::from_theme_xml(doc.node()));
        let map = XmlNode::parse_str(r#"<p:clrMap xmlns:p="x" tx1="dk1"/>"#).unwrap();
        ctx.load_color_map(map.node());

        let ovr = XmlNode::parse_str(
            r#"<c:clrMapOvr xmlns:c="x" xmlns:a="y"><a:overrideClrMapping tx1="lt1"/></c:clrMapOvr>"#,
        )
        .unwrap();
        let chart_ctx = ctx.for_chart(ovr.node());

        assert_eq!(chart_ctx.scheme_color("tx1"), Some("FFFFFF"));
        // parent untouched
        assert_eq!(ctx.scheme_color("tx1"), Some("000000"));
    }

    #[test]
    fn test_resolve_rel_target() {
        assert_eq!(
            resolve_rel_target("ppt/slides", "../charts/chart1.xml"),
            "ppt/charts/chart1.xml"
        );
        assert_eq!(
            resolve_rel_target("ppt/slides", "slide2.xml"),
            "ppt/slides/slide2.xml"
        );
        assert_eq!(
            resolve_rel_target("ppt/slides", "/ppt/media/image1.png"),
            "ppt/media/image1.png"
        );
    }
}
