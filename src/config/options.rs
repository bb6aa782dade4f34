//! Partially-specified table options
//!
//! Everything in here is optional; resolution against the built-in defaults
//! happens in [`super::ResolvedCalsConfig::resolve`]. Options can be built
//! directly as structs, or merged from string key/value pairs with
//! [`CalsOptions::from_pairs`], which rejects unknown keys at any nesting
//! level so caller typos surface at construction time.

use crate::utils::error::ConfigError;

/// Namespace URI option for one element
///
/// The source format this replaces used a sentinel marker object for
/// "inherit the tgroup namespace"; here it is an explicit variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NamespaceOption {
    /// Not specified; use the slot's built-in default (fallback to tgroup)
    #[default]
    Default,
    /// Explicitly requested fallback to the resolved tgroup namespace
    FallbackToTgroup,
    /// A concrete namespace URI; the empty string means "no namespace"
    Explicit(String),
}

/// Identity options for one element kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementOptions {
    pub local_name: Option<String>,
    pub namespace_uri: NamespaceOption,
}

/// Attribute local name overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeNameOptions {
    pub cols: Option<String>,
    pub colname: Option<String>,
    pub colnum: Option<String>,
    pub colwidth: Option<String>,
    pub colsep: Option<String>,
    pub rowsep: Option<String>,
    pub morerows: Option<String>,
    pub namest: Option<String>,
    pub nameend: Option<String>,
    pub align: Option<String>,
    pub valign: Option<String>,
    pub frame: Option<String>,
}

/// Token values for boolean attributes (`colsep`, `rowsep`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanTokenOptions {
    pub yes: Option<String>,
    pub no: Option<String>,
}

/// Token values for the table-level `frame` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTokenOptions {
    pub all: Option<String>,
    pub none: Option<String>,
}

/// Token values for horizontal alignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorizontalTokenOptions {
    pub left: Option<String>,
    pub right: Option<String>,
    pub center: Option<String>,
    pub justify: Option<String>,
}

/// Token values for vertical alignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerticalTokenOptions {
    pub top: Option<String>,
    pub middle: Option<String>,
    pub bottom: Option<String>,
}

/// The full partially-specified option tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalsOptions {
    pub table: ElementOptions,
    pub tgroup: ElementOptions,
    pub colspec: ElementOptions,
    pub thead: ElementOptions,
    pub tbody: ElementOptions,
    pub row: ElementOptions,
    pub entry: ElementOptions,
    pub attribute_names: AttributeNameOptions,
    pub boolean_tokens: BooleanTokenOptions,
    pub frame_tokens: FrameTokenOptions,
    pub horizontal_tokens: HorizontalTokenOptions,
    pub vertical_tokens: VerticalTokenOptions,
}

impl CalsOptions {
    /// Merge dotted-path key/value pairs over the defaults
    ///
    /// Keys follow the option tree, e.g. `entry.local_name`,
    /// `tgroup.namespace_uri`, `attribute_names.colsep`,
    /// `boolean_tokens.yes`. Any key not present in the tree fails with
    /// [`ConfigError::UnsupportedOption`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = CalsOptions::default();
        for (key, value) in pairs {
            options.set(key.as_ref(), value.as_ref())?;
        }
        Ok(options)
    }

    /// Set one option by dotted path
    pub fn set(&mut self, path: &str, value: &str) -> Result<(), ConfigError> {
        let element = |slot: &mut ElementOptions, field: &str| -> Result<(), ConfigError> {
            match field {
                "local_name" => slot.local_name = Some(value.to_string()),
                "namespace_uri" => {
                    slot.namespace_uri = NamespaceOption::Explicit(value.to_string())
                }
                _ => return Err(ConfigError::unsupported(path)),
            }
            Ok(())
        };

        let (head, field) = match path.split_once('.') {
            Some(parts) => parts,
            None => return Err(ConfigError::unsupported(path)),
        };

        match head {
            "table" => element(&mut self.table, field),
            "tgroup" => element(&mut self.tgroup, field),
            "colspec" => element(&mut self.colspec, field),
            "thead" => element(&mut self.thead, field),
            "tbody" => element(&mut self.tbody, field),
            "row" => element(&mut self.row, field),
            "entry" => element(&mut self.entry, field),
            "attribute_names" => {
                let slot = match field {
                    "cols" => &mut self.attribute_names.cols,
                    "colname" => &mut self.attribute_names.colname,
                    "colnum" => &mut self.attribute_names.colnum,
                    "colwidth" => &mut self.attribute_names.colwidth,
                    "colsep" => &mut self.attribute_names.colsep,
                    "rowsep" => &mut self.attribute_names.rowsep,
                    "morerows" => &mut self.attribute_names.morerows,
                    "namest" => &mut self.attribute_names.namest,
                    "nameend" => &mut self.attribute_names.nameend,
                    "align" => &mut self.attribute_names.align,
                    "valign" => &mut self.attribute_names.valign,
                    "frame" => &mut self.attribute_names.frame,
                    _ => return Err(ConfigError::unsupported(path)),
                };
                *slot = Some(value.to_string());
                Ok(())
            }
            "boolean_tokens" => {
                let slot = match field {
                    "yes" => &mut self.boolean_tokens.yes,
                    "no" => &mut self.boolean_tokens.no,
                    _ => return Err(ConfigError::unsupported(path)),
                };
                *slot = Some(value.to_string());
                Ok(())
            }
            "frame_tokens" => {
                let slot = match field {
                    "all" => &mut self.frame_tokens.all,
                    "none" => &mut self.frame_tokens.none,
                    _ => return Err(ConfigError::unsupported(path)),
                };
                *slot = Some(value.to_string());
                Ok(())
            }
            "horizontal_tokens" => {
                let slot = match field {
                    "left" => &mut self.horizontal_tokens.left,
                    "right" => &mut self.horizontal_tokens.right,
                    "center" => &mut self.horizontal_tokens.center,
                    "justify" => &mut self.horizontal_tokens.justify,
                    _ => return Err(ConfigError::unsupported(path)),
                };
                *slot = Some(value.to_string());
                Ok(())
            }
            "vertical_tokens" => {
                let slot = match field {
                    "top" => &mut self.vertical_tokens.top,
                    "middle" => &mut self.vertical_tokens.middle,
                    "bottom" => &mut self.vertical_tokens.bottom,
                    _ => return Err(ConfigError::unsupported(path)),
                };
                *slot = Some(value.to_string());
                Ok(())
            }
            _ => Err(ConfigError::unsupported(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_known_keys() {
        let options = CalsOptions::from_pairs([
            ("entry.local_name", "td"),
            ("tgroup.namespace_uri", "urn:example:cals"),
            ("boolean_tokens.yes", "yes"),
        ])
        .unwrap();
        assert_eq!(options.entry.local_name.as_deref(), Some("td"));
        assert_eq!(
            options.tgroup.namespace_uri,
            NamespaceOption::Explicit("urn:example:cals".to_string())
        );
        assert_eq!(options.boolean_tokens.yes.as_deref(), Some("yes"));
    }

    #[test]
    fn test_from_pairs_rejects_unknown_top_level() {
        let err = CalsOptions::from_pairs([("tabel.local_name", "table")]).unwrap_err();
        assert_eq!(err, ConfigError::unsupported("tabel.local_name"));
    }

    #[test]
    fn test_from_pairs_rejects_unknown_nested() {
        let err = CalsOptions::from_pairs([("entry.localname", "td")]).unwrap_err();
        assert_eq!(err, ConfigError::unsupported("entry.localname"));

        let err = CalsOptions::from_pairs([("boolean_tokens.maybe", "2")]).unwrap_err();
        assert_eq!(err, ConfigError::unsupported("boolean_tokens.maybe"));
    }

    #[test]
    fn test_from_pairs_rejects_bare_key() {
        let err = CalsOptions::from_pairs([("entry", "td")]).unwrap_err();
        assert_eq!(err, ConfigError::unsupported("entry"));
    }
}
