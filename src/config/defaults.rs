//! Built-in CALS defaults
//!
//! Element and attribute local names plus the attribute token values used
//! when an option is left unspecified. Namespace URIs have no constant here:
//! every element's namespace defaults to "fallback to tgroup", and tgroup's
//! own namespace defaults to the empty string.

pub const TABLE_LOCAL_NAME: &str = "table";
pub const TGROUP_LOCAL_NAME: &str = "tgroup";
pub const COLSPEC_LOCAL_NAME: &str = "colspec";
pub const THEAD_LOCAL_NAME: &str = "thead";
pub const TBODY_LOCAL_NAME: &str = "tbody";
pub const ROW_LOCAL_NAME: &str = "row";
pub const ENTRY_LOCAL_NAME: &str = "entry";

pub const COLS_ATTRIBUTE: &str = "cols";
pub const COLNAME_ATTRIBUTE: &str = "colname";
pub const COLNUM_ATTRIBUTE: &str = "colnum";
pub const COLWIDTH_ATTRIBUTE: &str = "colwidth";
pub const COLSEP_ATTRIBUTE: &str = "colsep";
pub const ROWSEP_ATTRIBUTE: &str = "rowsep";
pub const MOREROWS_ATTRIBUTE: &str = "morerows";
pub const NAMEST_ATTRIBUTE: &str = "namest";
pub const NAMEEND_ATTRIBUTE: &str = "nameend";
pub const ALIGN_ATTRIBUTE: &str = "align";
pub const VALIGN_ATTRIBUTE: &str = "valign";
pub const FRAME_ATTRIBUTE: &str = "frame";

pub const YES_VALUE: &str = "1";
pub const NO_VALUE: &str = "0";
pub const ALL_VALUE: &str = "all";
pub const NONE_VALUE: &str = "none";

pub const LEFT_VALUE: &str = "left";
pub const RIGHT_VALUE: &str = "right";
pub const CENTER_VALUE: &str = "center";
pub const JUSTIFY_VALUE: &str = "justify";

pub const TOP_VALUE: &str = "top";
pub const MIDDLE_VALUE: &str = "middle";
pub const BOTTOM_VALUE: &str = "bottom";

/// Default CALS column width
pub const DEFAULT_COLUMN_WIDTH: &str = "1*";
