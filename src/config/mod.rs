//! Table definition and configuration resolution
//!
//! Resolves a partially-specified [`CalsOptions`] tree against the CALS
//! defaults into a [`ResolvedCalsConfig`]: full element identity, attribute
//! names, and bidirectional token codecs used by both directions of the
//! mapping. [`CalsTableDefinition`] bundles the resolved configuration with
//! the optional table-figure filter and the builder/synthesizer entry points.

pub mod defaults;
mod options;

pub use options::{
    AttributeNameOptions, BooleanTokenOptions, CalsOptions, ElementOptions, FrameTokenOptions,
    HorizontalTokenOptions, NamespaceOption, VerticalTokenOptions,
};

use std::fmt;

use crate::dom::{Document, NodeId, QName};
use crate::model::{GridModel, HorizontalAlignment, VerticalAlignment};
use crate::utils::error::{ConfigError, StructureError};

/// Bidirectional codec between booleans and the configured yes/no tokens
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanCodec {
    yes: String,
    no: String,
}

impl BooleanCodec {
    pub fn encode(&self, value: bool) -> &str {
        if value {
            &self.yes
        } else {
            &self.no
        }
    }

    /// Decode a token; anything that is neither configured value is `None`
    pub fn decode(&self, token: &str) -> Option<bool> {
        if token == self.yes {
            Some(true)
        } else if token == self.no {
            Some(false)
        } else {
            None
        }
    }
}

/// Codec between the table border flag and the frame all/none tokens
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCodec {
    all: String,
    none: String,
}

impl FrameCodec {
    pub fn encode(&self, borders: bool) -> &str {
        if borders {
            &self.all
        } else {
            &self.none
        }
    }

    pub fn decode(&self, token: &str) -> Option<bool> {
        if token == self.all {
            Some(true)
        } else if token == self.none {
            Some(false)
        } else {
            None
        }
    }
}

/// Codec between [`HorizontalAlignment`] keys and attribute tokens
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalAlignmentCodec {
    left: String,
    right: String,
    center: String,
    justify: String,
}

impl HorizontalAlignmentCodec {
    pub fn encode(&self, alignment: HorizontalAlignment) -> &str {
        match alignment {
            HorizontalAlignment::Left => &self.left,
            HorizontalAlignment::Right => &self.right,
            HorizontalAlignment::Center => &self.center,
            HorizontalAlignment::Justify => &self.justify,
        }
    }

    pub fn decode(&self, token: &str) -> Option<HorizontalAlignment> {
        if token == self.left {
            Some(HorizontalAlignment::Left)
        } else if token == self.right {
            Some(HorizontalAlignment::Right)
        } else if token == self.center {
            Some(HorizontalAlignment::Center)
        } else if token == self.justify {
            Some(HorizontalAlignment::Justify)
        } else {
            None
        }
    }
}

/// Codec between [`VerticalAlignment`] keys and attribute tokens
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalAlignmentCodec {
    top: String,
    middle: String,
    bottom: String,
}

impl VerticalAlignmentCodec {
    pub fn encode(&self, alignment: VerticalAlignment) -> &str {
        match alignment {
            VerticalAlignment::Top => &self.top,
            VerticalAlignment::Middle => &self.middle,
            VerticalAlignment::Bottom => &self.bottom,
        }
    }

    pub fn decode(&self, token: &str) -> Option<VerticalAlignment> {
        if token == self.top {
            Some(VerticalAlignment::Top)
        } else if token == self.middle {
            Some(VerticalAlignment::Middle)
        } else if token == self.bottom {
            Some(VerticalAlignment::Bottom)
        } else {
            None
        }
    }
}

/// Resolved attribute local names
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNames {
    pub cols: String,
    pub colname: String,
    pub colnum: String,
    pub colwidth: String,
    pub colsep: String,
    pub rowsep: String,
    pub morerows: String,
    pub namest: String,
    pub nameend: String,
    pub align: String,
    pub valign: String,
    pub frame: String,
}

/// Fully-resolved structural parameters for one table configuration
///
/// Immutable; built once per table-definition instantiation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCalsConfig {
    pub table: QName,
    pub tgroup: QName,
    pub colspec: QName,
    pub thead: QName,
    pub tbody: QName,
    pub row: QName,
    pub entry: QName,
    pub attr: AttributeNames,
    pub boolean: BooleanCodec,
    pub frame: FrameCodec,
    pub horizontal: HorizontalAlignmentCodec,
    pub vertical: VerticalAlignmentCodec,
}

fn resolved_name(
    path: &str,
    value: Option<&String>,
    default: &str,
) -> Result<String, ConfigError> {
    let name = value.map(String::as_str).unwrap_or(default);
    if name.is_empty() {
        return Err(ConfigError::invalid_value(path, "must not be empty"));
    }
    Ok(name.to_string())
}

impl ResolvedCalsConfig {
    /// Resolve a partial option tree into a total configuration
    ///
    /// Pure; fails only on empty local names or tokens. Unknown option keys
    /// are rejected earlier, by [`CalsOptions::from_pairs`].
    pub fn resolve(options: &CalsOptions) -> Result<Self, ConfigError> {
        // The tgroup namespace resolves first; every other element falls
        // back to it.
        let tgroup_ns = match &options.tgroup.namespace_uri {
            NamespaceOption::Explicit(uri) => uri.clone(),
            NamespaceOption::Default | NamespaceOption::FallbackToTgroup => String::new(),
        };
        let element = |path: &str,
                       slot: &ElementOptions,
                       default: &str|
         -> Result<QName, ConfigError> {
            let local = resolved_name(path, slot.local_name.as_ref(), default)?;
            let namespace = match &slot.namespace_uri {
                NamespaceOption::Explicit(uri) => uri.clone(),
                NamespaceOption::Default | NamespaceOption::FallbackToTgroup => tgroup_ns.clone(),
            };
            Ok(QName::new(local, namespace))
        };

        let attr = AttributeNames {
            cols: resolved_name(
                "attribute_names.cols",
                options.attribute_names.cols.as_ref(),
                defaults::COLS_ATTRIBUTE,
            )?,
            colname: resolved_name(
                "attribute_names.colname",
                options.attribute_names.colname.as_ref(),
                defaults::COLNAME_ATTRIBUTE,
            )?,
            colnum: resolved_name(
                "attribute_names.colnum",
                options.attribute_names.colnum.as_ref(),
                defaults::COLNUM_ATTRIBUTE,
            )?,
            colwidth: resolved_name(
                "attribute_names.colwidth",
                options.attribute_names.colwidth.as_ref(),
                defaults::COLWIDTH_ATTRIBUTE,
            )?,
            colsep: resolved_name(
                "attribute_names.colsep",
                options.attribute_names.colsep.as_ref(),
                defaults::COLSEP_ATTRIBUTE,
            )?,
            rowsep: resolved_name(
                "attribute_names.rowsep",
                options.attribute_names.rowsep.as_ref(),
                defaults::ROWSEP_ATTRIBUTE,
            )?,
            morerows: resolved_name(
                "attribute_names.morerows",
                options.attribute_names.morerows.as_ref(),
                defaults::MOREROWS_ATTRIBUTE,
            )?,
            namest: resolved_name(
                "attribute_names.namest",
                options.attribute_names.namest.as_ref(),
                defaults::NAMEST_ATTRIBUTE,
            )?,
            nameend: resolved_name(
                "attribute_names.nameend",
                options.attribute_names.nameend.as_ref(),
                defaults::NAMEEND_ATTRIBUTE,
            )?,
            align: resolved_name(
                "attribute_names.align",
                options.attribute_names.align.as_ref(),
                defaults::ALIGN_ATTRIBUTE,
            )?,
            valign: resolved_name(
                "attribute_names.valign",
                options.attribute_names.valign.as_ref(),
                defaults::VALIGN_ATTRIBUTE,
            )?,
            frame: resolved_name(
                "attribute_names.frame",
                options.attribute_names.frame.as_ref(),
                defaults::FRAME_ATTRIBUTE,
            )?,
        };

        Ok(ResolvedCalsConfig {
            table: element("table.local_name", &options.table, defaults::TABLE_LOCAL_NAME)?,
            tgroup: element(
                "tgroup.local_name",
                &options.tgroup,
                defaults::TGROUP_LOCAL_NAME,
            )?,
            colspec: element(
                "colspec.local_name",
                &options.colspec,
                defaults::COLSPEC_LOCAL_NAME,
            )?,
            thead: element("thead.local_name", &options.thead, defaults::THEAD_LOCAL_NAME)?,
            tbody: element("tbody.local_name", &options.tbody, defaults::TBODY_LOCAL_NAME)?,
            row: element("row.local_name", &options.row, defaults::ROW_LOCAL_NAME)?,
            entry: element("entry.local_name", &options.entry, defaults::ENTRY_LOCAL_NAME)?,
            attr,
            boolean: BooleanCodec {
                yes: resolved_name(
                    "boolean_tokens.yes",
                    options.boolean_tokens.yes.as_ref(),
                    defaults::YES_VALUE,
                )?,
                no: resolved_name(
                    "boolean_tokens.no",
                    options.boolean_tokens.no.as_ref(),
                    defaults::NO_VALUE,
                )?,
            },
            frame: FrameCodec {
                all: resolved_name(
                    "frame_tokens.all",
                    options.frame_tokens.all.as_ref(),
                    defaults::ALL_VALUE,
                )?,
                none: resolved_name(
                    "frame_tokens.none",
                    options.frame_tokens.none.as_ref(),
                    defaults::NONE_VALUE,
                )?,
            },
            horizontal: HorizontalAlignmentCodec {
                left: resolved_name(
                    "horizontal_tokens.left",
                    options.horizontal_tokens.left.as_ref(),
                    defaults::LEFT_VALUE,
                )?,
                right: resolved_name(
                    "horizontal_tokens.right",
                    options.horizontal_tokens.right.as_ref(),
                    defaults::RIGHT_VALUE,
                )?,
                center: resolved_name(
                    "horizontal_tokens.center",
                    options.horizontal_tokens.center.as_ref(),
                    defaults::CENTER_VALUE,
                )?,
                justify: resolved_name(
                    "horizontal_tokens.justify",
                    options.horizontal_tokens.justify.as_ref(),
                    defaults::JUSTIFY_VALUE,
                )?,
            },
            vertical: VerticalAlignmentCodec {
                top: resolved_name(
                    "vertical_tokens.top",
                    options.vertical_tokens.top.as_ref(),
                    defaults::TOP_VALUE,
                )?,
                middle: resolved_name(
                    "vertical_tokens.middle",
                    options.vertical_tokens.middle.as_ref(),
                    defaults::MIDDLE_VALUE,
                )?,
                bottom: resolved_name(
                    "vertical_tokens.bottom",
                    options.vertical_tokens.bottom.as_ref(),
                    defaults::BOTTOM_VALUE,
                )?,
            },
        })
    }

    fn matches(&self, doc: &Document, id: NodeId, name: &QName) -> bool {
        doc.name(id) == name
    }

    pub fn is_table(&self, doc: &Document, id: NodeId) -> bool {
        self.matches(doc, id, &self.table)
    }

    pub fn is_tgroup(&self, doc: &Document, id: NodeId) -> bool {
        self.matches(doc, id, &self.tgroup)
    }

    pub fn is_colspec(&self, doc: &Document, id: NodeId) -> bool {
        self.matches(doc, id, &self.colspec)
    }

    pub fn is_thead(&self, doc: &Document, id: NodeId) -> bool {
        self.matches(doc, id, &self.thead)
    }

    pub fn is_tbody(&self, doc: &Document, id: NodeId) -> bool {
        self.matches(doc, id, &self.tbody)
    }

    pub fn is_row(&self, doc: &Document, id: NodeId) -> bool {
        self.matches(doc, id, &self.row)
    }

    pub fn is_entry(&self, doc: &Document, id: NodeId) -> bool {
        self.matches(doc, id, &self.entry)
    }
}

type TableFigureFilter = Box<dyn Fn(&Document, NodeId) -> bool>;

/// The bundled CALS table definition: configuration, builder, synthesizer
///
/// This is the object a host registers with its table-definition registry.
pub struct CalsTableDefinition {
    config: ResolvedCalsConfig,
    table_figure_filter: Option<TableFigureFilter>,
}

impl fmt::Debug for CalsTableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalsTableDefinition")
            .field("config", &self.config)
            .field("table_figure_filter", &self.table_figure_filter.is_some())
            .finish()
    }
}

impl CalsTableDefinition {
    pub fn new(options: &CalsOptions) -> Result<Self, ConfigError> {
        Ok(CalsTableDefinition {
            config: ResolvedCalsConfig::resolve(options)?,
            table_figure_filter: None,
        })
    }

    /// Definition with the built-in CALS defaults
    pub fn with_defaults() -> Self {
        CalsTableDefinition::new(&CalsOptions::default())
            .expect("built-in defaults always resolve")
    }

    /// Restrict which table-shaped ancestors count as CALS tables
    ///
    /// The filter is composed with the name check by logical AND.
    pub fn with_table_figure_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Document, NodeId) -> bool + 'static,
    {
        self.table_figure_filter = Some(Box::new(filter));
        self
    }

    pub fn config(&self) -> &ResolvedCalsConfig {
        &self.config
    }

    /// Whether `id` is a recognized table-figure element
    pub fn is_table_figure(&self, doc: &Document, id: NodeId) -> bool {
        self.config.is_table(doc, id)
            && self
                .table_figure_filter
                .as_ref()
                .map_or(true, |filter| filter(doc, id))
    }

    /// Whether `node` is part of a recognized CALS table
    ///
    /// True for both the table-figure and the tgroup element; false for
    /// absent input. The table-figure filter constrains figure elements
    /// only, so a rootless fragment's tgroup is accepted on its name alone.
    pub fn is_cals_table(&self, doc: &Document, node: Option<NodeId>) -> bool {
        let Some(id) = node else {
            return false;
        };
        if self.is_table_figure(doc, id) {
            return true;
        }
        if !self.config.is_tgroup(doc, id) {
            return false;
        }
        // A tgroup inside some other element is not ours; a rootless
        // fragment's tgroup is accepted.
        match doc.parent(id) {
            Some(parent) => self.is_table_figure(doc, parent),
            None => true,
        }
    }

    /// First tgroup element in document order, if any
    pub fn find_first_tgroup(&self, doc: &Document) -> Option<NodeId> {
        doc.find_descendant(doc.root(), |d, id| self.config.is_tgroup(d, id))
    }

    /// Build the grid model for the table around `tgroup`
    pub fn build_grid(
        &self,
        doc: &Document,
        tgroup: NodeId,
    ) -> Result<GridModel, StructureError> {
        crate::core::xml2grid::build_grid(self, doc, tgroup)
    }

    /// Write a (possibly mutated) grid model back under `tgroup`
    ///
    /// Must run inside a caller-managed [`Document::transact`] scope; a
    /// `false` return means the transaction must not commit.
    pub fn synthesize(&self, grid: &GridModel, doc: &mut Document, tgroup: NodeId) -> bool {
        crate::core::grid2xml::synthesize(self, grid, doc, tgroup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = ResolvedCalsConfig::resolve(&CalsOptions::default()).unwrap();
        assert_eq!(config.tgroup, QName::new("tgroup", ""));
        assert_eq!(config.entry, QName::new("entry", ""));
        assert_eq!(config.attr.morerows, "morerows");
        assert_eq!(config.boolean.encode(true), "1");
        assert_eq!(config.frame.encode(false), "none");
    }

    #[test]
    fn test_namespace_falls_back_to_tgroup() {
        let mut options = CalsOptions::default();
        options.tgroup.namespace_uri = NamespaceOption::Explicit("urn:example:cals".to_string());
        let config = ResolvedCalsConfig::resolve(&options).unwrap();
        assert_eq!(config.tgroup.namespace_uri, "urn:example:cals");
        assert_eq!(config.entry.namespace_uri, "urn:example:cals");
        assert_eq!(config.table.namespace_uri, "urn:example:cals");
    }

    #[test]
    fn test_explicit_namespace_wins_over_fallback() {
        let mut options = CalsOptions::default();
        options.tgroup.namespace_uri = NamespaceOption::Explicit("urn:a".to_string());
        options.table.namespace_uri = NamespaceOption::Explicit("urn:b".to_string());
        options.row.namespace_uri = NamespaceOption::FallbackToTgroup;
        let config = ResolvedCalsConfig::resolve(&options).unwrap();
        assert_eq!(config.table.namespace_uri, "urn:b");
        assert_eq!(config.row.namespace_uri, "urn:a");
    }

    #[test]
    fn test_empty_local_name_rejected() {
        let mut options = CalsOptions::default();
        options.entry.local_name = Some(String::new());
        let err = ResolvedCalsConfig::resolve(&options).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_alignment_codec_round_trip() {
        let config = ResolvedCalsConfig::resolve(&CalsOptions::default()).unwrap();
        let token = config.horizontal.encode(HorizontalAlignment::Justify);
        assert_eq!(config.horizontal.decode(token), Some(HorizontalAlignment::Justify));
        assert_eq!(config.horizontal.decode("wat"), None);
        assert_eq!(config.vertical.decode("middle"), Some(VerticalAlignment::Middle));
    }

    #[test]
    fn test_is_cals_table() {
        let def = CalsTableDefinition::with_defaults();
        let doc =
            crate::dom::parse(r#"<table frame="all"><tgroup cols="1"><tbody/></tgroup></table>"#)
                .unwrap();
        let table = doc.root();
        let tgroup = doc.children(table)[0];
        let tbody = doc.children(tgroup)[0];

        assert!(def.is_cals_table(&doc, Some(table)));
        assert!(def.is_cals_table(&doc, Some(tgroup)));
        assert!(!def.is_cals_table(&doc, Some(tbody)));
        assert!(!def.is_cals_table(&doc, None));
    }

    #[test]
    fn test_rootless_tgroup_accepted_despite_filter() {
        // With no figure element there is nothing to run the filter on.
        let def = CalsTableDefinition::with_defaults()
            .with_table_figure_filter(|_, _| false);
        let doc = crate::dom::parse(r#"<tgroup cols="1"><tbody/></tgroup>"#).unwrap();
        assert!(def.is_cals_table(&doc, Some(doc.root())));
    }

    #[test]
    fn test_table_figure_filter_composes_with_and() {
        let def = CalsTableDefinition::with_defaults()
            .with_table_figure_filter(|doc, id| doc.attribute(id, "role") == Some("cals"));
        let doc = crate::dom::parse(r#"<table><tgroup cols="1"/></table>"#).unwrap();
        assert!(!def.is_table_figure(&doc, doc.root()));

        let doc = crate::dom::parse(r#"<table role="cals"><tgroup cols="1"/></table>"#).unwrap();
        assert!(def.is_table_figure(&doc, doc.root()));
    }
}
