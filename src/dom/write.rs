//! [`Document`] to XML text conversion, built on `xmlwriter`

use xmlwriter::{Indent, Options, XmlWriter};

use super::{Document, NodeId};

/// Serialize the document on a single line
pub fn to_xml(doc: &Document) -> String {
    serialize(doc, Indent::None)
}

/// Serialize the document with two-space indentation
pub fn to_xml_pretty(doc: &Document) -> String {
    serialize(doc, Indent::Spaces(2))
}

fn serialize(doc: &Document, indent: Indent) -> String {
    let mut writer = XmlWriter::new(Options {
        indent,
        ..Options::default()
    });
    write_element(doc, doc.root(), "", &mut writer);
    writer.end_document()
}

fn write_element(doc: &Document, id: NodeId, parent_ns: &str, writer: &mut XmlWriter) {
    let name = doc.name(id);
    writer.start_element(&name.local);

    // Default-namespace declarations only; CALS fragments are prefixless.
    if name.namespace_uri != parent_ns {
        writer.write_attribute("xmlns", &name.namespace_uri);
    }

    for (attr, value) in doc.attributes(id) {
        writer.write_attribute(attr, value);
    }

    let text = doc.text(id);
    if !text.is_empty() {
        writer.write_text(text);
    }

    for &child in doc.children(id) {
        write_element(doc, child, &name.namespace_uri, writer);
    }

    writer.end_element();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn test_write_round_trip_text() {
        let doc = parse(r#"<row><entry colname="column-0">A</entry></row>"#).unwrap();
        let xml = to_xml(&doc);
        assert!(xml.contains(r#"<entry colname="column-0">A</entry>"#));
    }

    #[test]
    fn test_write_namespace_once() {
        let doc = parse(r#"<table xmlns="urn:x"><tgroup cols="1"/></table>"#).unwrap();
        let xml = to_xml(&doc);
        assert_eq!(xml.matches("xmlns=\"urn:x\"").count(), 1);
    }

    #[test]
    fn test_write_escapes_text() {
        let mut doc = parse(r#"<entry/>"#).unwrap();
        let root = doc.root();
        doc.set_text(root, "a < b");
        let xml = to_xml(&doc);
        assert!(xml.contains("a &lt; b"));
    }
}
