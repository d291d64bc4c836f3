//! XML tree for SNS responses.
//!
//! Responses are parsed once into an owned [`XmlNode`] tree which decoders
//! then navigate by element path. Namespace prefixes and attributes are
//! dropped; only element names, children and text are kept.

use crate::error::SnsError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// An element in a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an element with no text or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the element text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Element name without namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element text, empty when the element has none.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Follow a path of element names, taking the first match at each step.
    ///
    /// An empty path returns `self`.
    pub fn get(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Text of the element at `path`, if the element exists.
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.get(path).map(XmlNode::text)
    }

    /// All elements matching the full path.
    ///
    /// The last path segment may repeat (`member`, `entry`); every repetition
    /// under the first match of the leading segments is returned.
    pub fn all(&self, path: &[&str]) -> Vec<&XmlNode> {
        match path.split_last() {
            None => vec![self],
            Some((last, parents)) => self
                .get(parents)
                .map(|parent| parent.children.iter().filter(|c| c.name == *last).collect())
                .unwrap_or_default(),
        }
    }
}

/// A parsed document, wrapping a synthetic root so that paths start at the
/// top-level element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlNode,
}

impl XmlDocument {
    /// Wrap an already-built top-level element.
    pub fn from_element(element: XmlNode) -> Self {
        Self {
            root: XmlNode::default().with_child(element),
        }
    }

    /// Navigate from the document root.
    pub fn get(&self, path: &[&str]) -> Option<&XmlNode> {
        self.root.get(path)
    }

    /// Text of the element at `path` from the document root.
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.root.text_at(path)
    }

    /// All elements matching `path` from the document root.
    pub fn all(&self, path: &[&str]) -> Vec<&XmlNode> {
        self.root.all(path)
    }
}

fn local_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    match name.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => name.into_owned(),
    }
}

fn parse_error(message: impl std::fmt::Display) -> SnsError {
    SnsError::Decode {
        operation: "xml".to_string(),
        message: message.to_string(),
    }
}

// Whitespace between child elements is layout, not content. Leaf text is
// kept exactly as sent.
fn drop_indentation(node: &mut XmlNode) {
    if !node.children.is_empty() && node.text.trim().is_empty() {
        node.text.clear();
    }
}

/// Parse a response body into a document.
pub fn parse(xml: &str) -> Result<XmlDocument, SnsError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlNode> = vec![XmlNode::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(XmlNode::new(local_name(e.name().as_ref())));
            }
            Ok(Event::Empty(e)) => {
                let node = XmlNode::new(local_name(e.name().as_ref()));
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(parse_error)?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(parse_error("unexpected closing tag"));
                }
                if let Some(mut node) = stack.pop() {
                    drop_indentation(&mut node);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(e)),
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(parse_error("unclosed element at end of document"));
    }
    let mut root = stack.pop().unwrap_or_default();
    drop_indentation(&mut root);
    if root.children.is_empty() {
        return Err(parse_error("document has no root element"));
    }

    Ok(XmlDocument { root })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_XML: &str = r#"<?xml version="1.0"?>
<ListPlatformApplicationsResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <ListPlatformApplicationsResult>
    <PlatformApplications>
      <member><PlatformApplicationArn>arn:a</PlatformApplicationArn></member>
      <member><PlatformApplicationArn>arn:b</PlatformApplicationArn></member>
    </PlatformApplications>
    <NextToken/>
  </ListPlatformApplicationsResult>
</ListPlatformApplicationsResponse>"#;

    #[test]
    fn test_parse_and_navigate() {
        let doc = parse(LIST_XML).unwrap();
        let result = doc
            .get(&["ListPlatformApplicationsResponse", "ListPlatformApplicationsResult"])
            .unwrap();

        let members = result.all(&["PlatformApplications", "member"]);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].text_at(&["PlatformApplicationArn"]), Some("arn:a"));
        assert_eq!(members[1].text_at(&["PlatformApplicationArn"]), Some("arn:b"));
    }

    #[test]
    fn test_empty_element_has_empty_text() {
        let doc = parse(LIST_XML).unwrap();
        let token = doc.text_at(&[
            "ListPlatformApplicationsResponse",
            "ListPlatformApplicationsResult",
            "NextToken",
        ]);
        assert_eq!(token, Some(""));
    }

    #[test]
    fn test_missing_path() {
        let doc = parse(LIST_XML).unwrap();
        assert!(doc.get(&["ListPlatformApplicationsResponse", "Nope"]).is_none());
        assert!(doc.all(&["Nope", "member"]).is_empty());
    }

    #[test]
    fn test_text_is_unescaped() {
        let doc = parse("<A><B>a &amp; b &lt;c&gt;</B></A>").unwrap();
        assert_eq!(doc.text_at(&["A", "B"]), Some("a & b <c>"));
    }

    #[test]
    fn test_cdata_text() {
        let doc = parse("<A><B><![CDATA[{\"x\":1}]]></B></A>").unwrap();
        assert_eq!(doc.text_at(&["A", "B"]), Some("{\"x\":1}"));
    }

    #[test]
    fn test_namespace_prefix_is_dropped() {
        let doc = parse(r#"<ns:A xmlns:ns="urn:x"><ns:B>v</ns:B></ns:A>"#).unwrap();
        assert_eq!(doc.text_at(&["A", "B"]), Some("v"));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse("").is_err());
        assert!(parse("just text").is_err());
        assert!(parse("<A><B></A>").is_err());
        assert!(parse("<A>").is_err());
    }

    #[test]
    fn test_leaf_whitespace_is_preserved() {
        let doc = parse("<A>\n  <B>  padded  </B>\n  <C>   </C>\n</A>").unwrap();
        assert_eq!(doc.text_at(&["A", "B"]), Some("  padded  "));
        assert_eq!(doc.text_at(&["A", "C"]), Some("   "));
        assert_eq!(doc.text_at(&["A"]), Some(""));
    }

    #[test]
    fn test_hand_built_tree() {
        let doc = XmlDocument::from_element(
            XmlNode::new("A").with_child(XmlNode::new("B").with_text("v")),
        );
        assert_eq!(doc.text_at(&["A", "B"]), Some("v"));
    }
}
