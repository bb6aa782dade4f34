//! Grid → XML: the DOM synthesizer
//!
//! Converts a (possibly mutated) grid model back into standard CALS
//! markup: column count, frame attribute, regenerated colspecs, header/body
//! containers and one entry element per distinct cell with its span
//! attributes. All writes belong inside one caller-managed transaction
//! scope so they land together or not at all.

mod generator;

#[cfg(test)]
mod tests;

use crate::config::CalsTableDefinition;
use crate::dom::{Document, NodeId};
use crate::model::GridModel;

/// Write `grid` back into the document under `tgroup`
///
/// Returns `false` when any element creation or attribute write is rejected;
/// the caller must then treat the enclosing transaction as not committed.
pub fn synthesize(
    definition: &CalsTableDefinition,
    grid: &GridModel,
    doc: &mut Document,
    tgroup: NodeId,
) -> bool {
    generator::synthesize_table(definition, grid, doc, tgroup).is_ok()
}
