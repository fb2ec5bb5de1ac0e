//! Owned xml tree that keeps every byte it does not understand.
//!
//! Start tags, declarations, comments and whitespace are stored raw, so a
//! document written back without edits is identical to the one parsed.

use crate::job_error::XmlError;
use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Escaped character data, as found in the source.
    Text(String),
    CData(String),
    Comment(String),
    Decl(String),
    ProcessingInstruction(String),
    /// The whole `<!DOCTYPE ..>` markup.
    DocType(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    /// Everything between `<` and `>` (or `/>`), attributes included.
    raw_start: String,
    self_closing: bool,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.name == name)
    }

    /// # find
    ///
    /// First descendant matching `path`, relative to this element.
    pub fn find(&self, path: &[&str]) -> Option<&XmlElement> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self
                .child_elements()
                .filter(|e| e.name == *head)
                .find_map(|e| e.find(rest)),
        }
    }

    /// # find all
    ///
    /// Every descendant matching `path`, in document order.
    pub fn find_all<'a>(&'a self, path: &[&str]) -> Vec<&'a XmlElement> {
        let mut result = Vec::new();
        collect(self, path, &mut result);
        result
    }

    pub fn find_mut(&mut self, path: &[&str]) -> Option<&mut XmlElement> {
        self.find_all_mut(path).into_iter().next()
    }

    pub fn find_all_mut<'a>(&'a mut self, path: &[&str]) -> Vec<&'a mut XmlElement> {
        let mut result = Vec::new();
        collect_mut(self, path, &mut result);
        result
    }

    /// # text
    ///
    /// Unescaped character data of this element.
    /// `None` when the element carries no text at all, like `<description/>`.
    pub fn text(&self) -> Result<Option<String>, XmlError> {
        let mut text: Option<String> = None;
        for node in &self.children {
            match node {
                XmlNode::Text(raw) => text
                    .get_or_insert_with(String::new)
                    .push_str(&unescape(raw)?),
                XmlNode::CData(raw) => text.get_or_insert_with(String::new).push_str(raw),
                _ => {}
            }
        }

        Ok(text)
    }

    /// Replace all content of this element by `value`.
    pub fn set_text(&mut self, value: &str) {
        self.children.clear();
        if !value.is_empty() {
            self.children
                .push(XmlNode::Text(partial_escape(value).into_owned()));
        }
        self.self_closing = false;
    }

    fn write_to(&self, out: &mut String) {
        if self.self_closing && self.children.is_empty() {
            let _ = write!(out, "<{}/>", self.raw_start);
            return;
        }

        let _ = write!(out, "<{}>", self.raw_start);
        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }

    fn from_start(raw: &[u8], name: &[u8], self_closing: bool) -> Result<Self, XmlError> {
        Ok(Self {
            name: std::str::from_utf8(name)?.to_string(),
            raw_start: std::str::from_utf8(raw)?.to_string(),
            self_closing,
            children: Vec::new(),
        })
    }
}

fn collect<'a>(element: &'a XmlElement, path: &[&str], out: &mut Vec<&'a XmlElement>) {
    match path.split_first() {
        None => out.push(element),
        Some((head, rest)) => {
            for child in element.child_elements().filter(|e| e.name == *head) {
                collect(child, rest, out);
            }
        }
    }
}

fn collect_mut<'a>(element: &'a mut XmlElement, path: &[&str], out: &mut Vec<&'a mut XmlElement>) {
    match path.split_first() {
        None => out.push(element),
        Some((head, rest)) => {
            for node in element.children.iter_mut() {
                if let XmlNode::Element(child) = node {
                    if child.name == *head {
                        collect_mut(child, rest, out);
                    }
                }
            }
        }
    }
}

impl XmlNode {
    fn write_to(&self, out: &mut String) {
        match self {
            XmlNode::Element(e) => e.write_to(out),
            XmlNode::Text(raw) => out.push_str(raw),
            XmlNode::CData(raw) => {
                let _ = write!(out, "<![CDATA[{}]]>", raw);
            }
            XmlNode::Comment(raw) => {
                let _ = write!(out, "<!--{}-->", raw);
            }
            XmlNode::Decl(raw) | XmlNode::ProcessingInstruction(raw) => {
                let _ = write!(out, "<?{}?>", raw);
            }
            XmlNode::DocType(raw) => out.push_str(raw),
        }
    }
}

/// The doctype markup as written in the source, keyword case and spacing
/// included.
fn raw_doctype(content: &str, start: usize, end: usize) -> Option<&str> {
    let scanned = content.get(start.saturating_sub(1)..end)?;
    scanned.find("<!").map(|at| &scanned[at..])
}

/// # Xml Document
///
/// A parsed document with exactly one root element.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
}

impl XmlDocument {
    pub fn parse(content: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(content);
        let mut top_level: Vec<XmlNode> = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event()?;
            let end = reader.buffer_position() as usize;

            let node = match event {
                Event::Start(e) => {
                    stack.push(XmlElement::from_start(&e, e.name().as_ref(), false)?);
                    continue;
                }
                Event::End(_) => match stack.pop() {
                    Some(element) => XmlNode::Element(element),
                    None => return Err(XmlError::NoRoot),
                },
                Event::Empty(e) => {
                    XmlNode::Element(XmlElement::from_start(&e, e.name().as_ref(), true)?)
                }
                Event::Text(e) => XmlNode::Text(std::str::from_utf8(&e)?.to_string()),
                Event::CData(e) => XmlNode::CData(std::str::from_utf8(&e)?.to_string()),
                Event::Comment(e) => XmlNode::Comment(std::str::from_utf8(&e)?.to_string()),
                Event::Decl(e) => XmlNode::Decl(std::str::from_utf8(&e)?.to_string()),
                Event::PI(e) => {
                    XmlNode::ProcessingInstruction(std::str::from_utf8(&e)?.to_string())
                }
                Event::DocType(e) => match raw_doctype(content, start, end) {
                    Some(raw) => XmlNode::DocType(raw.to_string()),
                    None => XmlNode::DocType(format!("<!DOCTYPE {}>", std::str::from_utf8(&e)?)),
                },
                Event::Eof => break,
            };

            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => top_level.push(node),
            }
        }

        if let Some(unclosed) = stack.pop() {
            return Err(XmlError::Unclosed(unclosed.name));
        }

        let document = Self { nodes: top_level };
        if document.root().is_none() {
            return Err(XmlError::NoRoot);
        }

        Ok(document)
    }

    pub fn root(&self) -> Option<&XmlElement> {
        self.nodes.iter().find_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    fn root_mut(&mut self) -> Option<&mut XmlElement> {
        self.nodes.iter_mut().find_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// # find
    ///
    /// `path` starts with the root element name, e.g. `["project", "description"]`.
    pub fn find(&self, path: &[&str]) -> Option<&XmlElement> {
        let (head, rest) = path.split_first()?;
        self.root().filter(|r| r.name == *head)?.find(rest)
    }

    pub fn find_all(&self, path: &[&str]) -> Vec<&XmlElement> {
        match (path.split_first(), self.root()) {
            (Some((head, rest)), Some(root)) if root.name == *head => root.find_all(rest),
            _ => Vec::new(),
        }
    }

    pub fn find_all_mut(&mut self, path: &[&str]) -> Vec<&mut XmlElement> {
        let Some((head, rest)) = path.split_first() else {
            return Vec::new();
        };
        match self.root_mut() {
            Some(root) if root.name == *head => root.find_all_mut(rest),
            _ => Vec::new(),
        }
    }

    pub fn exists(&self, path: &[&str]) -> bool {
        self.find(path).is_some()
    }

    /// Unescaped text of the node at `path`; `None` if the node is absent.
    /// A present but empty node yields `Some("")`.
    pub fn text_at(&self, path: &[&str]) -> Result<Option<String>, XmlError> {
        match self.find(path) {
            Some(element) => Ok(Some(element.text()?.unwrap_or_default())),
            None => Ok(None),
        }
    }

    /// # set text
    ///
    /// Replace the text of the node at `path`. There is no schema to create a
    /// missing node against, so an absent node is an error.
    pub fn set_text(&mut self, path: &[&str], value: &str) -> Result<(), XmlError> {
        let element = self
            .find_all_mut(path)
            .into_iter()
            .next()
            .ok_or_else(|| XmlError::MissingNode(path.join("/")))?;
        element.set_text(value);
        Ok(())
    }

    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_to(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"<?xml version='1.1' encoding='UTF-8'?>
<project>
  <!-- managed by hand -->
  <description>Nightly &amp; release</description>
  <keepDependencies>false</keepDependencies>
  <scm class="hudson.scm.SubversionSCM" plugin="subversion@2.17">
    <locations>
      <hudson.scm.SubversionSCM_-ModuleLocation>
        <remote>https://svn.example.com/trunk</remote>
        <local>.</local>
      </hudson.scm.SubversionSCM_-ModuleLocation>
    </locations>
    <browser class="hudson.scm.browsers.ViewSVN">
      <url><![CDATA[https://viewsvn.example.com/]]></url>
    </browser>
  </scm>
  <triggers />
  <disabled>false</disabled>
</project>"#;

    #[test]
    fn test_round_trip_is_identical() {
        let doc = XmlDocument::parse(CONFIG).unwrap();
        assert_eq!(doc.to_xml_string(), CONFIG);
    }

    #[test]
    fn test_round_trip_keeps_doctype_markup() {
        let content = "<?xml version=\"1.0\"?>\n<!doctype  project>\n<project><description/></project>";
        let doc = XmlDocument::parse(content).unwrap();
        assert_eq!(doc.to_xml_string(), content);
    }

    #[test]
    fn test_find_and_text() {
        let doc = XmlDocument::parse(CONFIG).unwrap();
        assert_eq!(doc.root().unwrap().name(), "project");
        assert_eq!(
            doc.text_at(&["project", "description"]).unwrap(),
            Some("Nightly & release".to_string())
        );
        assert_eq!(
            doc.text_at(&["project", "scm", "browser", "url"]).unwrap(),
            Some("https://viewsvn.example.com/".to_string())
        );
        assert_eq!(doc.text_at(&["project", "triggers"]).unwrap(), Some(String::new()));
        assert_eq!(doc.text_at(&["project", "missing"]).unwrap(), None);
        assert!(!doc.exists(&["other", "description"]));
    }

    #[test]
    fn test_set_text_only_touches_target() {
        let mut doc = XmlDocument::parse(CONFIG).unwrap();
        doc.set_text(&["project", "description"], "a < b").unwrap();

        let expected = CONFIG.replace(
            "<description>Nightly &amp; release</description>",
            "<description>a &lt; b</description>",
        );
        assert_eq!(doc.to_xml_string(), expected);
        assert_eq!(
            doc.text_at(&["project", "description"]).unwrap(),
            Some("a < b".to_string())
        );
    }

    #[test]
    fn test_set_text_expands_self_closing() {
        let mut doc = XmlDocument::parse("<project><description/></project>").unwrap();
        doc.set_text(&["project", "description"], "hello").unwrap();
        assert_eq!(
            doc.to_xml_string(),
            "<project><description>hello</description></project>"
        );
    }

    #[test]
    fn test_set_text_missing_node() {
        let mut doc = XmlDocument::parse(CONFIG).unwrap();
        let result = doc.set_text(&["project", "scm", "browser", "location"], "x");
        assert!(matches!(result, Err(XmlError::MissingNode(p)) if p == "project/scm/browser/location"));
        assert_eq!(doc.to_xml_string(), CONFIG);
    }

    #[test]
    fn test_find_all_in_document_order() {
        let doc = XmlDocument::parse(
            "<a><b><c>1</c></b><x/><b><c>2</c><c>3</c></b></a>",
        )
        .unwrap();
        let texts: Vec<String> = doc
            .find_all(&["a", "b", "c"])
            .into_iter()
            .map(|e| e.text().unwrap().unwrap())
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_rejects_empty_and_broken() {
        assert!(matches!(XmlDocument::parse(""), Err(XmlError::NoRoot)));
        assert!(XmlDocument::parse("<a><b></a>").is_err());
    }
}
