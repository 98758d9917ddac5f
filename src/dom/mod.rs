//! In-memory output DOM.
//!
//! The text cascade appends styled elements here; the hosting renderer
//! mounts the finished subtree into a slide container. The model is a
//! minimal element tree (tag, attributes, inline style declarations,
//! children) with an HTML serializer used by diagnostics and tests.

/// A DOM node: element or text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A DOM element with attributes, inline styles and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Tag name.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set (or replace) an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set (or replace) an inline style declaration.
    pub fn set_style(&mut self, prop: impl Into<String>, value: impl Into<String>) {
        let prop = prop.into();
        let value = value.into();
        match self.style.iter_mut().find(|(k, _)| *k == prop) {
            Some(slot) => slot.1 = value,
            None => self.style.push((prop, value)),
        }
    }

    /// Inline style value by property name.
    pub fn style_value(&self, prop: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Append a child element.
    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append a text node.
    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Child nodes in order.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in order (text nodes skipped).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text content of this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Depth-first search for the first descendant with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find(tag) {
                return Some(found);
            }
        }
        None
    }

    /// Serialize this subtree as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (k, v) in &self.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            escape_into(v, out);
            out.push('"');
        }
        if !self.style.is_empty() {
            out.push_str(" style=\"");
            for (i, (k, v)) in self.style.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(k);
                out.push_str(": ");
                escape_into(v, out);
                out.push(';');
            }
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(t) => escape_into(t, out),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_serialize() {
        let mut div = Element::new("div");
        div.set_style("text-align", "center");
        let mut span = Element::new("span");
        span.set_style("color", "#FF0000");
        span.append_text("a < b");
        div.append(span);

        assert_eq!(
            div.to_html(),
            "<div style=\"text-align: center;\">\
             <span style=\"color: #FF0000;\">a &lt; b</span></div>"
        );
    }

    #[test]
    fn test_set_style_replaces() {
        let mut e = Element::new("span");
        e.set_style("color", "#000000");
        e.set_style("color", "#FFFFFF");
        assert_eq!(e.style_value("color"), Some("#FFFFFF"));
        assert_eq!(e.to_html().matches("color").count(), 1);
    }

    #[test]
    fn test_text_content_and_find() {
        let mut outer = Element::new("div");
        let mut inner = Element::new("a");
        inner.set_attr("href", "https://example.com");
        inner.append_text("link");
        outer.append(inner);
        outer.append_text("!");

        assert_eq!(outer.text_content(), "link!");
        assert_eq!(
            outer.find("a").and_then(|a| a.attr("href")),
            Some("https://example.com")
        );
        assert!(outer.find("table").is_none());
    }
}
