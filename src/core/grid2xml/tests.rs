//! Regression tests for grid synthesis

use crate::config::CalsTableDefinition;
use crate::dom::{self, to_xml, Document, NodeId};
use crate::model::GridModel;

fn round_trip(xml: &str) -> (Document, NodeId, GridModel) {
    let definition = CalsTableDefinition::with_defaults();
    let mut doc = dom::parse(xml).unwrap();
    let tgroup = definition.find_first_tgroup(&doc).unwrap();
    let grid = definition.build_grid(&doc, tgroup).unwrap();
    let committed = doc.transact(|d| definition.synthesize(&grid, d, tgroup));
    assert!(committed);
    (doc, tgroup, grid)
}

#[test]
fn test_writes_cols_and_frame() {
    let (doc, tgroup, _) = round_trip(
        r#"<table frame="all"><tgroup cols="2">
            <tbody><row><entry/><entry/></row></tbody>
        </tgroup></table>"#,
    );
    assert_eq!(doc.attribute(tgroup, "cols"), Some("2"));
    assert_eq!(doc.attribute(doc.root(), "frame"), Some("all"));
}

#[test]
fn test_frame_follows_borders_flag() {
    let definition = CalsTableDefinition::with_defaults();
    let mut doc = dom::parse(
        r#"<table frame="all"><tgroup cols="1"><tbody><row><entry/></row></tbody></tgroup></table>"#,
    )
    .unwrap();
    let tgroup = definition.find_first_tgroup(&doc).unwrap();
    let mut grid = definition.build_grid(&doc, tgroup).unwrap();
    grid.set_borders(false);
    assert!(doc.transact(|d| definition.synthesize(&grid, d, tgroup)));
    assert_eq!(doc.attribute(doc.root(), "frame"), Some("none"));
}

#[test]
fn test_synthesizes_missing_colspecs() {
    let (doc, tgroup, _) = round_trip(
        r#"<tgroup cols="3"><tbody><row><entry/><entry/><entry/></row></tbody></tgroup>"#,
    );
    let colspecs: Vec<NodeId> = doc
        .children(tgroup)
        .iter()
        .copied()
        .filter(|&c| doc.name(c).local == "colspec")
        .collect();
    assert_eq!(colspecs.len(), 3);
    assert_eq!(doc.attribute(colspecs[0], "colname"), Some("column-0"));
    assert_eq!(doc.attribute(colspecs[0], "colnum"), Some("1"));
    assert_eq!(doc.attribute(colspecs[0], "colwidth"), Some("1*"));
    assert_eq!(doc.attribute(colspecs[0], "colsep"), Some("1"));
    assert_eq!(doc.attribute(colspecs[0], "rowsep"), Some("1"));
    assert_eq!(doc.attribute(colspecs[2], "colname"), Some("column-2"));

    // Colspecs sit before the body container.
    let tbody_position = doc
        .children(tgroup)
        .iter()
        .position(|&c| doc.name(c).local == "tbody")
        .unwrap();
    assert!(doc
        .children(tgroup)
        .iter()
        .take(tbody_position)
        .all(|&c| doc.name(c).local == "colspec"));
}

#[test]
fn test_single_column_cell_keeps_colname_only() {
    let (doc, _, grid) = round_trip(
        r#"<tgroup cols="2">
            <colspec colname="a"/><colspec colname="b"/>
            <tbody><row><entry colname="a">x</entry><entry colname="b"/></row></tbody>
        </tgroup>"#,
    );
    let element = grid.cell_at(0, 0).element.unwrap();
    assert_eq!(doc.attribute(element, "colname"), Some("a"));
    assert_eq!(doc.attribute(element, "namest"), None);
    assert_eq!(doc.attribute(element, "nameend"), None);
    assert_eq!(doc.attribute(element, "morerows"), None);
    assert_eq!(doc.text(element), "x");
}

#[test]
fn test_column_spanning_cell_gets_namest_nameend() {
    let definition = CalsTableDefinition::with_defaults();
    let mut doc = dom::parse(
        r#"<tgroup cols="2">
            <colspec colname="a"/><colspec colname="b"/>
            <tbody><row><entry colname="a">x</entry><entry colname="b"/></row></tbody>
        </tgroup>"#,
    )
    .unwrap();
    let tgroup = definition.find_first_tgroup(&doc).unwrap();
    let mut grid = definition.build_grid(&doc, tgroup).unwrap();
    let merged = grid.merge_with_cell_to_the_right(0, 0);
    assert!(doc.transact(|d| definition.synthesize(&grid, d, tgroup)));

    let element = grid.cell(merged).element.unwrap();
    assert_eq!(doc.attribute(element, "namest"), Some("a"));
    assert_eq!(doc.attribute(element, "nameend"), Some("b"));
    assert_eq!(doc.attribute(element, "colname"), None);

    // The absorbed cell's element is gone from the tree.
    let xml = to_xml(&doc);
    assert_eq!(xml.matches("<entry").count(), 1);
}

#[test]
fn test_row_spanning_cell_gets_morerows() {
    let definition = CalsTableDefinition::with_defaults();
    let mut doc = dom::parse(
        r#"<tgroup cols="2">
            <tbody>
                <row><entry>a</entry><entry>b</entry></row>
                <row><entry>c</entry><entry>d</entry></row>
            </tbody>
        </tgroup>"#,
    )
    .unwrap();
    let tgroup = definition.find_first_tgroup(&doc).unwrap();
    let mut grid = definition.build_grid(&doc, tgroup).unwrap();
    let merged = grid.merge_with_cell_below(0, 1);
    assert!(doc.transact(|d| definition.synthesize(&grid, d, tgroup)));

    let element = grid.cell(merged).element.unwrap();
    assert_eq!(doc.attribute(element, "morerows"), Some("1"));

    // Second row keeps only the unmerged cell.
    let tbody = doc
        .find_child(tgroup, |d, id| d.name(id).local == "tbody")
        .unwrap();
    let rows = doc.children(tbody);
    assert_eq!(rows.len(), 2);
    assert_eq!(doc.children(rows[1]).len(), 1);
}

#[test]
fn test_header_container_created_and_dropped() {
    // thead appears when the grid has header rows.
    let (doc, tgroup, _) = round_trip(
        r#"<tgroup cols="1">
            <thead><row><entry>h</entry></row></thead>
            <tbody><row><entry>b</entry></row></tbody>
        </tgroup>"#,
    );
    let thead = doc.find_child(tgroup, |d, id| d.name(id).local == "thead");
    assert!(thead.is_some());
    assert_eq!(doc.children(thead.unwrap()).len(), 1);

    // And disappears when header rows are gone.
    let definition = CalsTableDefinition::with_defaults();
    let mut doc = dom::parse(
        r#"<tgroup cols="1">
            <thead><row><entry>h</entry></row></thead>
            <tbody><row><entry>b</entry></row></tbody>
        </tgroup>"#,
    )
    .unwrap();
    let tgroup = definition.find_first_tgroup(&doc).unwrap();
    let grid = definition.build_grid(&doc, tgroup).unwrap();
    let headerless = GridModel::from_parts(
        grid.width(),
        grid.height(),
        0,
        grid.borders(),
        (0..grid.height())
            .flat_map(|r| grid.origin_cells_in_row(r))
            .map(|id| grid.cell(id).clone())
            .collect(),
        (0..grid.height() * grid.width())
            .map(|i| grid.cell_id_at(i / grid.width(), i % grid.width()))
            .collect(),
        grid.column_specifications().to_vec(),
    );
    assert!(doc.transact(|d| definition.synthesize(&headerless, d, tgroup)));
    assert!(doc
        .find_child(tgroup, |d, id| d.name(id).local == "thead")
        .is_none());
    let tbody = doc
        .find_child(tgroup, |d, id| d.name(id).local == "tbody")
        .unwrap();
    assert_eq!(doc.children(tbody).len(), 2);
}

#[test]
fn test_explicit_cell_separators_written_inherited_omitted() {
    let (doc, _, grid) = round_trip(
        r#"<tgroup cols="2">
            <tbody><row><entry colsep="0"/><entry/></row></tbody>
        </tgroup>"#,
    );
    let explicit = grid.cell_at(0, 0).element.unwrap();
    assert_eq!(doc.attribute(explicit, "colsep"), Some("0"));
    let inherited = grid.cell_at(0, 1).element.unwrap();
    assert_eq!(doc.attribute(inherited, "colsep"), None);
    assert_eq!(doc.attribute(inherited, "rowsep"), None);
}
