//! XML text to [`Document`] conversion, built on `roxmltree`

use super::{Document, NodeId, QName};
use crate::utils::error::CalsError;

/// Parse an XML fragment into a [`Document`]
///
/// Only element structure, attributes and direct text content are kept;
/// comments and processing instructions are dropped. Attribute names are
/// stored by local name (CALS attributes are unqualified).
pub fn parse(xml: &str) -> Result<Document, CalsError> {
    let tree = roxmltree::Document::parse(xml).map_err(|err| CalsError::parse(err.to_string()))?;

    let mut doc = Document::new();
    convert_element(&mut doc, tree.root_element())?;
    Ok(doc)
}

fn convert_element(doc: &mut Document, source: roxmltree::Node) -> Result<NodeId, CalsError> {
    let name = QName::new(
        source.tag_name().name(),
        source.tag_name().namespace().unwrap_or(""),
    );
    let id = doc.create_element(name);

    for attr in source.attributes() {
        doc.set_attribute(id, attr.name(), attr.value())
            .map_err(|err| CalsError::parse(err.message))?;
    }

    let mut text = String::new();
    for child in source.children() {
        if child.is_element() {
            let child_id = convert_element(doc, child)?;
            doc.append_child(id, child_id);
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or(""));
        }
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        doc.set_text(id, trimmed);
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_fragment() {
        let doc = parse(r#"<table frame="all"><tgroup cols="1"/></table>"#).unwrap();
        let root = doc.root();
        assert_eq!(doc.name(root).local, "table");
        assert_eq!(doc.attribute(root, "frame"), Some("all"));

        let tgroup = doc.children(root)[0];
        assert_eq!(doc.name(tgroup).local, "tgroup");
        assert_eq!(doc.attribute(tgroup, "cols"), Some("1"));
    }

    #[test]
    fn test_parse_namespaced() {
        let doc = parse(r#"<table xmlns="urn:example:cals"><tgroup cols="1"/></table>"#).unwrap();
        assert_eq!(doc.name(doc.root()).namespace_uri, "urn:example:cals");
        let tgroup = doc.children(doc.root())[0];
        assert_eq!(doc.name(tgroup).namespace_uri, "urn:example:cals");
    }

    #[test]
    fn test_parse_text_content() {
        let doc = parse(r#"<entry colname="column-0">Cell text</entry>"#).unwrap();
        assert_eq!(doc.text(doc.root()), "Cell text");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse("<table><tgroup></table>").is_err());
    }
}
