//! # calsflow
//!
//! Bidirectional mapping between CALS XML tables and an abstract grid model.
//!
//! ## Features
//!
//! - **Bidirectional**: CALS markup → grid model and grid model → CALS markup
//! - **Span-aware**: `namest`/`nameend` column spans and `morerows` row spans
//! - **Configurable Vocabulary**: every element and attribute name, namespace,
//!   and attribute token can be remapped through [`CalsOptions`]
//! - **Defaulting**: missing `colspec` elements, widths, and separators are
//!   filled in the way CALS consumers expect
//! - **Width Arithmetic**: mixed proportional/fixed `colwidth` values can be
//!   parsed, added, halved, and converted to percentages
//! - **Border Editing**: per-cell border toggling expressed through the
//!   `rowsep`/`colsep` ownership rules
//!
//! ## Usage Examples
//!
//! ### Reading a table into the grid model
//!
//! ```rust
//! use calsflow::CalsTableDefinition;
//!
//! let definition = CalsTableDefinition::with_defaults();
//! let doc = calsflow::dom::parse(
//!     r#"<table frame="all"><tgroup cols="2">
//!         <tbody>
//!             <row><entry>a</entry><entry>b</entry></row>
//!             <row><entry namest="column-0" nameend="column-1">wide</entry></row>
//!         </tbody>
//!     </tgroup></table>"#,
//! ).unwrap();
//!
//! let tgroup = definition.find_first_tgroup(&doc).unwrap();
//! let grid = definition.build_grid(&doc, tgroup).unwrap();
//! assert_eq!(grid.width(), 2);
//! assert_eq!(grid.height(), 2);
//! assert!(grid.cell_at(1, 0).is_spanning());
//! ```
//!
//! ### Writing the grid model back
//!
//! ```rust
//! use calsflow::CalsTableDefinition;
//!
//! let definition = CalsTableDefinition::with_defaults();
//! let mut doc = calsflow::dom::parse(
//!     r#"<table><tgroup cols="1"><tbody>
//!         <row><entry>only</entry></row>
//!     </tbody></tgroup></table>"#,
//! ).unwrap();
//!
//! let tgroup = definition.find_first_tgroup(&doc).unwrap();
//! let grid = definition.build_grid(&doc, tgroup).unwrap();
//! assert!(doc.transact(|d| definition.synthesize(&grid, d, tgroup)));
//! assert!(calsflow::dom::to_xml(&doc).contains("colspec"));
//! ```

/// Configuration layer: option pairs, resolved vocabulary, token codecs
pub mod config;

/// Core mapping passes between XML and the grid model
pub mod core;

/// Lightweight XML document arena with transactional mutation
pub mod dom;

/// Feature modules built on the core passes
pub mod features;

/// The abstract grid model
pub mod model;

/// Utility modules
pub mod utils;

// Re-export the configuration surface
pub use config::{
    AttributeNames, AttributeNameOptions, BooleanCodec, BooleanTokenOptions, CalsOptions,
    CalsTableDefinition, ElementOptions, FrameCodec, FrameTokenOptions,
    HorizontalAlignmentCodec, HorizontalTokenOptions, NamespaceOption, ResolvedCalsConfig,
    VerticalAlignmentCodec, VerticalTokenOptions,
};

// Re-export the grid model types
pub use model::{
    Cell, CellData, CellId, CellSpan, ColumnSpecification, GridCoord, GridModel,
    HorizontalAlignment, VerticalAlignment,
};

// Re-export feature entry points
pub use features::borders::{toggle_cell_borders, BorderToggleOutcome, CellBorderRequest};
pub use features::widths;

// Re-export errors
pub use utils::error::{CalsError, CalsResult, ConfigError, StructureError, WriteError};

use dom::Document;

/// Parse `xml` and verify that its first table group builds a legal grid
///
/// Answers `Ok(())` for well-formed input containing a structurally valid
/// CALS table; every defect surfaces as the corresponding [`CalsError`]
/// variant.
pub fn check_table(xml: &str) -> CalsResult<()> {
    let definition = CalsTableDefinition::with_defaults();
    let doc = dom::parse(xml)?;
    let tgroup = definition
        .find_first_tgroup(&doc)
        .ok_or_else(|| CalsError::invalid("document contains no table group"))?;
    definition.build_grid(&doc, tgroup)?;
    Ok(())
}

/// Rebuild the first table in `xml` through the grid model and serialize it
///
/// A round trip through [`CalsTableDefinition::build_grid`] and
/// [`CalsTableDefinition::synthesize`]: colspecs are regenerated, spans are
/// re-expressed, and defaulted values stay implicit.
pub fn normalize_table(xml: &str) -> CalsResult<String> {
    normalize_document(xml, dom::to_xml)
}

/// [`normalize_table`] with indented output
pub fn normalize_table_pretty(xml: &str) -> CalsResult<String> {
    normalize_document(xml, dom::to_xml_pretty)
}

fn normalize_document(xml: &str, render: fn(&Document) -> String) -> CalsResult<String> {
    let definition = CalsTableDefinition::with_defaults();
    let mut doc = dom::parse(xml)?;
    let tgroup = definition
        .find_first_tgroup(&doc)
        .ok_or_else(|| CalsError::invalid("document contains no table group"))?;
    let grid = definition.build_grid(&doc, tgroup)?;
    if !doc.transact(|d| definition.synthesize(&grid, d, tgroup)) {
        return Err(CalsError::Write(WriteError::new(
            "table synthesis did not commit",
        )));
    }
    Ok(render(&doc))
}
