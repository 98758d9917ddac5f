//! Null-safe XML node tree.
//!
//! The cascade and chart translator navigate deeply nested, frequently
//! absent markup structure. Rather than threading `Option` checks through
//! every call site, parsing materializes an owned [`XmlNode`] tree once and
//! all navigation happens through the [`NodeRef`] cursor: a `Copy` handle
//! that behaves as an empty node when the underlying structure is absent.
//!
//! Element and attribute names are matched by local name; namespace
//! prefixes (`a:`, `c:`, `p:`, `r:`) are stripped at parse time.

use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

/// An owned XML element with its attributes, text content and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parse a document from raw bytes and return its root element.
    pub fn parse(bytes: &[u8]) -> Result<XmlNode> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(Self::from_start(e)?);
                },
                Ok(Event::Empty(ref e)) => {
                    let node = Self::from_start(e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None if root.is_none() => root = Some(node),
                        None => {},
                    }
                },
                Ok(Event::Text(e)) => {
                    // Entity and character references arrive as separate
                    // GeneralRef events, so text spans are literal here.
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(std::str::from_utf8(e.as_ref())?);
                    }
                },
                Ok(Event::GeneralRef(e)) => {
                    if let Some(current) = stack.last_mut() {
                        let resolved = e
                            .resolve_char_ref()
                            .map_err(|e| Error::Xml(e.to_string()))?;
                        if let Some(ch) = resolved {
                            current.text.push(ch);
                        } else {
                            let name = std::str::from_utf8(e.as_ref())?;
                            if let Some(text) = resolve_predefined_entity(name) {
                                current.text.push_str(text);
                            }
                        }
                    }
                },
                Ok(Event::End(_)) => {
                    if let Some(done) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(done),
                            None if root.is_none() => root = Some(done),
                            None => {},
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        root.ok_or_else(|| Error::Xml("document has no root element".to_string()))
    }

    /// Parse a document from a string slice.
    #[inline]
    pub fn parse_str(xml: &str) -> Result<XmlNode> {
        Self::parse(xml.as_bytes())
    }

    fn from_start(e: &BytesStart) -> Result<XmlNode> {
        let name = std::str::from_utf8(e.local_name().as_ref())?.to_string();
        let mut attrs = Vec::new();
        for attr in e.attributes().filter_map(|a| a.ok()) {
            let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
            let raw = std::str::from_utf8(&attr.value)?;
            let value = unescape(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            attrs.push((key, value));
        }
        Ok(XmlNode {
            name,
            attrs,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Local element name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Obtain a null-safe cursor over this node.
    #[inline]
    pub fn node(&self) -> NodeRef<'_> {
        NodeRef(Some(self))
    }
}

/// Null-safe cursor over an [`XmlNode`] tree.
///
/// Every navigation method on an absent cursor yields another absent
/// cursor (or an empty value), so arbitrarily deep lookups never panic:
///
/// ```
/// use pitaya::xml::{NodeRef, XmlNode};
///
/// let doc = XmlNode::parse_str("<a:p><a:pPr lvl=\"1\"/></a:p>").unwrap();
/// let p = doc.node();
/// assert_eq!(p.child("pPr").num_attr("lvl"), Some(1.0));
/// assert!(!p.child("pPr").child("buClr").child("srgbClr").exists());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeRef<'a>(Option<&'a XmlNode>);

impl<'a> NodeRef<'a> {
    /// The absent cursor.
    #[inline]
    pub const fn absent() -> NodeRef<'static> {
        NodeRef(None)
    }

    /// Whether this cursor points at a real element.
    #[inline]
    pub fn exists(self) -> bool {
        self.0.is_some()
    }

    /// Local element name; empty for an absent cursor.
    #[inline]
    pub fn name(self) -> &'a str {
        self.0.map(|n| n.name.as_str()).unwrap_or("")
    }

    /// First child with the given local name.
    pub fn child(self, name: &str) -> NodeRef<'a> {
        NodeRef(
            self.0
                .and_then(|n| n.children.iter().find(|c| c.name == name)),
        )
    }

    /// Walk a chain of child names; absent at any step stays absent.
    pub fn descend(self, path: &[&str]) -> NodeRef<'a> {
        path.iter().fold(self, |node, name| node.child(name))
    }

    /// All children with the given local name, in document order.
    pub fn children(self, name: &str) -> impl Iterator<Item = NodeRef<'a>> {
        self.0
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter(move |c| c.name == name)
            .map(|c| NodeRef(Some(c)))
    }

    /// All children regardless of name, in document order.
    pub fn all_children(self) -> impl Iterator<Item = NodeRef<'a>> {
        self.0
            .into_iter()
            .flat_map(|n| n.children.iter())
            .map(|c| NodeRef(Some(c)))
    }

    /// Attribute value by local name.
    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.0.and_then(|n| {
            n.attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        })
    }

    /// Attribute parsed as a number; `None` when absent or unparsable.
    pub fn num_attr(self, name: &str) -> Option<f64> {
        self.attr(name)
            .and_then(|v| fast_float2::parse::<f64, _>(v).ok())
    }

    /// Attribute parsed as an OOXML boolean (`1`/`true`).
    pub fn bool_attr(self, name: &str) -> Option<bool> {
        self.attr(name).map(|v| v == "1" || v == "true")
    }

    /// Raw attribute list (local name, value). Used where attribute names
    /// themselves carry data, e.g. color-map overrides.
    pub fn attrs(self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.0
            .into_iter()
            .flat_map(|n| n.attrs.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Concatenated text content of this node and all descendants.
    pub fn text(self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(self, out: &mut String) {
        if let Some(n) = self.0 {
            out.push_str(&n.text);
            for c in &n.children {
                NodeRef(Some(c)).collect_text(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<p:sp xmlns:p="x" xmlns:a="y">
        <p:nvSpPr><p:nvPr><p:ph type="title" idx="1"/></p:nvPr></p:nvSpPr>
        <p:txBody>
            <a:p>
                <a:r><a:rPr sz="1800" b="1"/><a:t>Hello &amp; bye</a:t></a:r>
                <a:r><a:t>second</a:t></a:r>
            </a:p>
        </p:txBody>
    </p:sp>"#;

    #[test]
    fn test_local_name_navigation() {
        let doc = XmlNode::parse_str(SAMPLE).unwrap();
        let sp = doc.node();
        assert_eq!(sp.name(), "sp");

        let ph = sp.descend(&["nvSpPr", "nvPr", "ph"]);
        assert!(ph.exists());
        assert_eq!(ph.attr("type"), Some("title"));
        assert_eq!(ph.attr("idx"), Some("1"));
    }

    #[test]
    fn test_absent_is_silent() {
        let doc = XmlNode::parse_str(SAMPLE).unwrap();
        let nowhere = doc.node().descend(&["missing", "also", "gone"]);
        assert!(!nowhere.exists());
        assert_eq!(nowhere.attr("x"), None);
        assert_eq!(nowhere.text(), "");
        assert_eq!(nowhere.all_children().count(), 0);
    }

    #[test]
    fn test_text_unescaped() {
        let doc = XmlNode::parse_str(SAMPLE).unwrap();
        let para = doc.node().descend(&["txBody", "p"]);
        let runs: Vec<_> = para.children("r").collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].child("t").text(), "Hello & bye");
        assert_eq!(runs[1].child("t").text(), "second");
    }

    #[test]
    fn test_entity_and_char_references_in_text() {
        let doc = XmlNode::parse_str(
            r#"<a:t xmlns:a="x">A &amp; B &lt;tag&gt; &quot;q&quot; &#169;&#xA9;</a:t>"#,
        )
        .unwrap();
        assert_eq!(doc.node().text(), "A & B <tag> \"q\" ©©");
    }

    #[test]
    fn test_num_and_bool_attrs() {
        let doc = XmlNode::parse_str(SAMPLE).unwrap();
        let rpr = doc.node().descend(&["txBody", "p", "r", "rPr"]);
        assert_eq!(rpr.num_attr("sz"), Some(1800.0));
        assert_eq!(rpr.bool_attr("b"), Some(true));
        assert_eq!(rpr.bool_attr("i"), None);
        assert_eq!(rpr.num_attr("missing"), None);
    }
}
