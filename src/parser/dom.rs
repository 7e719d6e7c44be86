//! Minimal immutable element tree built from quick-xml events.
//!
//! Element and attribute names are stored as local names (namespace
//! prefixes stripped); lookups therefore tolerate prefix renames across
//! producers. Only what the route lookups need is kept: names, attributes,
//! direct text, children.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ParseError;

/// One XML element. Immutable once the document is parsed.
#[derive(Clone, Debug, Default)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Local element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by local attribute name.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == local)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated direct text content, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given local name.
    pub fn child(&self, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == local)
    }

    /// Descend through `path` by local names, first match at each step.
    pub fn find_path(&self, path: &[&str]) -> Option<&Element> {
        let mut cur = self;
        for step in path {
            cur = cur.child(step)?;
        }
        Some(cur)
    }
}

fn local_name(raw: &[u8]) -> String {
    let local = match raw.iter().rposition(|&b| b == b':') {
        Some(i) => &raw[i + 1..],
        None => raw,
    };
    String::from_utf8_lossy(local).into_owned()
}

fn element_from_start(start: &BytesStart, path: &Path) -> Result<Element, ParseError> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::malformed(path, e))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::malformed(path, e))?;
        attrs.push((local_name(attr.key.as_ref()), value.into_owned()));
    }
    Ok(Element {
        name: local_name(start.name().as_ref()),
        attrs,
        text: String::new(),
        children: Vec::new(),
    })
}

/// Parse `path` into an element tree rooted at the document element.
pub fn parse_file(path: &Path) -> Result<Element, ParseError> {
    let mut reader = Reader::from_file(path).map_err(|e| ParseError::unreadable(path, e))?;
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(element_from_start(e, path)?);
            }
            Ok(Event::Empty(ref e)) => {
                let el = element_from_start(e, path)?;
                attach(&mut stack, &mut root, el, path)?;
            }
            Ok(Event::End(_)) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| ParseError::malformed(path, "unbalanced end tag"))?;
                attach(&mut stack, &mut root, el, path)?;
            }
            Ok(Event::Text(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    let text = t.unescape().map_err(|e| ParseError::malformed(path, e))?;
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    top.text
                        .push_str(&String::from_utf8_lossy(t.clone().into_inner().as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ParseError::malformed(path, e)),
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::malformed(path, "unclosed element"));
    }
    root.ok_or_else(|| ParseError::malformed(path, "no root element"))
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    el: Element,
    path: &Path,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => {
            if root.is_some() {
                return Err(ParseError::malformed(path, "multiple root elements"));
            }
            *root = Some(el);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(xml: &str) -> Element {
        // Round-trip through a temp file; parse_file is the only entry point.
        use std::sync::atomic::{AtomicUsize, Ordering};
        static SEQ: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir();
        let path = dir.join(format!(
            "scenedex-dom-test-{}-{}.xml",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::write(&path, xml).unwrap();
        let el = parse_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        el
    }

    #[test]
    fn test_prefixes_stripped() {
        let root = parse_str(
            r#"<a:root xmlns:a="urn:x"><a:child key="v">hi</a:child></a:root>"#,
        );
        assert_eq!(root.name(), "root");
        let child = root.child("child").unwrap();
        assert_eq!(child.attr("key"), Some("v"));
        assert_eq!(child.text(), "hi");
    }

    #[test]
    fn test_find_path() {
        let root = parse_str("<r><a><b><c>deep</c></b></a></r>");
        assert_eq!(root.find_path(&["a", "b", "c"]).unwrap().text(), "deep");
        assert!(root.find_path(&["a", "x"]).is_none());
    }
}
