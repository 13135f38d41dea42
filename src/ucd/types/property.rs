//! Property identifiers and the registry that issues them.
//!
//! A [`PropertyKey`] is a small `Copy` handle into a [`Registry`]. Every
//! registry starts with the same built-in catalog in the same order, so the
//! well-known keys in [`keys`] are valid handles for any registry. Keys that
//! show up in data but are not built in are registered on first use.
//!
//! Registration order is significant: the store keeps per-group maps ordered
//! by key, which makes XML attributes and diff reports come out in catalog
//! order rather than alphabetically.

use std::collections::HashMap;
use std::fmt;

use log::warn;

/// Handle to a registered property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyKey(u32);

impl PropertyKey {
    /// Position of this key in registration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Self-reference rule for built-in keys; user keys have none.
    pub fn self_reference(self) -> SelfReference {
        BUILTIN
            .get(self.index())
            .map(|def| def.self_reference)
            .unwrap_or(SelfReference::None)
    }

    pub fn is_builtin(self) -> bool {
        self.index() < BUILTIN.len()
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match BUILTIN.get(self.index()) {
            Some(def) => f.write_str(def.short),
            None => write!(f, "prop#{}", self.0),
        }
    }
}

/// How a property's value may mention the codepoint that carries it.
///
/// Used by normalization to replace such mentions with `#`, which lets
/// neighbouring codepoints with "the same" value coalesce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfReference {
    None,
    /// Every occurrence of the hex form inside the value (names such as `CJK UNIFIED IDEOGRAPH-4E00`).
    Substring,
    /// Only a value that is exactly the hex form (single-codepoint mappings).
    Whole,
}

pub(crate) struct BuiltinDef {
    pub short: &'static str,
    pub long: &'static str,
    pub aliases: &'static [&'static str],
    pub enumerated: bool,
    pub self_reference: SelfReference,
}

macro_rules! builtin_keys {
    ($( $name:ident => ($short:literal, $long:literal, $enumerated:expr, $self_ref:ident $(, $alias:literal)*); )*) => {
        #[allow(non_camel_case_types, clippy::upper_case_acronyms, dead_code)]
        #[repr(u32)]
        enum Slot { $( $name, )* }

        /// Well-known property keys, valid in every [`Registry`].
        pub mod keys {
            use super::{PropertyKey, Slot};
            $( pub const $name: PropertyKey = PropertyKey(Slot::$name as u32); )*
        }

        pub(crate) static BUILTIN: &[BuiltinDef] = &[
            $( BuiltinDef {
                short: $short,
                long: $long,
                aliases: &[$($alias),*],
                enumerated: $enumerated,
                self_reference: SelfReference::$self_ref,
            }, )*
        ];
    };
}

builtin_keys! {
    TYPE => ("type", "type", true, None);
    AGE => ("age", "Age", true, None);
    NA => ("na", "Name", false, Substring);
    JSN => ("JSN", "Jamo_Short_Name", true, None);
    GC => ("gc", "General_Category", true, None);
    CCC => ("ccc", "Canonical_Combining_Class", true, None);
    DT => ("dt", "Decomposition_Type", true, None);
    DM => ("dm", "Decomposition_Mapping", false, Whole);
    NT => ("nt", "Numeric_Type", true, None);
    NV => ("nv", "Numeric_Value", false, None);
    BC => ("bc", "Bidi_Class", true, None);
    BPT => ("bpt", "Bidi_Paired_Bracket_Type", true, None);
    BPB => ("bpb", "Bidi_Paired_Bracket", false, None);
    BIDI_M => ("Bidi_M", "Bidi_Mirrored", true, None);
    BMG => ("bmg", "Bidi_Mirroring_Glyph", false, None);
    SUC => ("suc", "Simple_Uppercase_Mapping", false, Whole);
    SLC => ("slc", "Simple_Lowercase_Mapping", false, Whole);
    STC => ("stc", "Simple_Titlecase_Mapping", false, Whole);
    UC => ("uc", "Uppercase_Mapping", false, Whole);
    LC => ("lc", "Lowercase_Mapping", false, Whole);
    TC => ("tc", "Titlecase_Mapping", false, Whole);
    SCC => ("scc", "Special_Case_Condition", false, None);
    SCF => ("scf", "Simple_Case_Folding", false, Whole);
    CF => ("cf", "Case_Folding", false, Whole);
    JT => ("jt", "Joining_Type", true, None);
    JG => ("jg", "Joining_Group", true, None);
    EA => ("ea", "East_Asian_Width", true, None);
    LB => ("lb", "Line_Break", true, None);
    SC => ("sc", "Script", true, None);
    SCX => ("scx", "Script_Extensions", true, None);
    DASH => ("Dash", "Dash", true, None);
    WSPACE => ("WSpace", "White_Space", true, None, "space");
    HYPHEN => ("Hyphen", "Hyphen", true, None);
    QMARK => ("QMark", "Quotation_Mark", true, None);
    RADICAL => ("Radical", "Radical", true, None);
    IDEO => ("Ideo", "Ideographic", true, None);
    UIDEO => ("UIdeo", "Unified_Ideograph", true, None);
    IDSB => ("IDSB", "IDS_Binary_Operator", true, None);
    IDST => ("IDST", "IDS_Trinary_Operator", true, None);
    HST => ("hst", "Hangul_Syllable_Type", true, None);
    DI => ("DI", "Default_Ignorable_Code_Point", true, None);
    ODI => ("ODI", "Other_Default_Ignorable_Code_Point", true, None);
    ALPHA => ("Alpha", "Alphabetic", true, None);
    OALPHA => ("OAlpha", "Other_Alphabetic", true, None);
    UPPER => ("Upper", "Uppercase", true, None);
    OUPPER => ("OUpper", "Other_Uppercase", true, None);
    LOWER => ("Lower", "Lowercase", true, None);
    OLOWER => ("OLower", "Other_Lowercase", true, None);
    MATH => ("Math", "Math", true, None);
    OMATH => ("OMath", "Other_Math", true, None);
    HEX => ("Hex", "Hex_Digit", true, None);
    AHEX => ("AHex", "ASCII_Hex_Digit", true, None);
    NCHAR => ("NChar", "Noncharacter_Code_Point", true, None);
    VS => ("VS", "Variation_Selector", true, None);
    BIDI_C => ("Bidi_C", "Bidi_Control", true, None);
    JOIN_C => ("Join_C", "Join_Control", true, None);
    GR_BASE => ("Gr_Base", "Grapheme_Base", true, None);
    GR_EXT => ("Gr_Ext", "Grapheme_Extend", true, None);
    OGR_EXT => ("OGr_Ext", "Other_Grapheme_Extend", true, None);
    GR_LINK => ("Gr_Link", "Grapheme_Link", true, None);
    STERM => ("STerm", "Sentence_Terminal", true, None);
    EXT => ("Ext", "Extender", true, None);
    TERM => ("Term", "Terminal_Punctuation", true, None);
    DIA => ("Dia", "Diacritic", true, None);
    DEP => ("Dep", "Deprecated", true, None);
    IDS => ("IDS", "ID_Start", true, None);
    OIDS => ("OIDS", "Other_ID_Start", true, None);
    XIDS => ("XIDS", "XID_Start", true, None);
    IDC => ("IDC", "ID_Continue", true, None);
    OIDC => ("OIDC", "Other_ID_Continue", true, None);
    XIDC => ("XIDC", "XID_Continue", true, None);
    SD => ("SD", "Soft_Dotted", true, None);
    LOE => ("LOE", "Logical_Order_Exception", true, None);
    PAT_WS => ("Pat_WS", "Pattern_White_Space", true, None);
    PAT_SYN => ("Pat_Syn", "Pattern_Syntax", true, None);
    GCB => ("GCB", "Grapheme_Cluster_Break", true, None);
    WB => ("WB", "Word_Break", true, None);
    SB => ("SB", "Sentence_Break", true, None);
    CE => ("CE", "Composition_Exclusion", true, None);
    COMP_EX => ("Comp_Ex", "Full_Composition_Exclusion", true, None);
    NFC_QC => ("NFC_QC", "NFC_Quick_Check", true, None);
    NFD_QC => ("NFD_QC", "NFD_Quick_Check", true, None);
    NFKC_QC => ("NFKC_QC", "NFKC_Quick_Check", true, None);
    NFKD_QC => ("NFKD_QC", "NFKD_Quick_Check", true, None);
    XO_NFC => ("XO_NFC", "Expands_On_NFC", true, None);
    XO_NFD => ("XO_NFD", "Expands_On_NFD", true, None);
    XO_NFKC => ("XO_NFKC", "Expands_On_NFKC", true, None);
    XO_NFKD => ("XO_NFKD", "Expands_On_NFKD", true, None);
    FC_NFKC => ("FC_NFKC", "FC_NFKC_Closure", false, None, "FNC");
    CI => ("CI", "Case_Ignorable", true, None);
    CASED => ("Cased", "Cased", true, None);
    CWCF => ("CWCF", "Changes_When_Casefolded", true, None);
    CWCM => ("CWCM", "Changes_When_Casemapped", true, None);
    CWKCF => ("CWKCF", "Changes_When_NFKC_Casefolded", true, None);
    CWL => ("CWL", "Changes_When_Lowercased", true, None);
    CWT => ("CWT", "Changes_When_Titlecased", true, None);
    CWU => ("CWU", "Changes_When_Uppercased", true, None);
    NFKC_CF => ("NFKC_CF", "NFKC_Casefold", false, None);
    INSC => ("InSC", "Indic_Syllabic_Category", true, None);
    INMC => ("InMC", "Indic_Matra_Category", true, None);
    INPC => ("InPC", "Indic_Positional_Category", true, None);
    PCM => ("PCM", "Prepended_Concatenation_Mark", true, None);
    VO => ("vo", "Vertical_Orientation", true, None);
    RI => ("RI", "Regional_Indicator", true, None);
    EMOJI => ("Emoji", "Emoji", true, None);
    EPRES => ("EPres", "Emoji_Presentation", true, None);
    EMOD => ("EMod", "Emoji_Modifier", true, None);
    EBASE => ("EBase", "Emoji_Modifier_Base", true, None);
    ECOMP => ("EComp", "Emoji_Component", true, None);
    EXTPICT => ("ExtPict", "Extended_Pictographic", true, None);
    BLK => ("blk", "Block", true, None);
    ISC => ("isc", "ISO_Comment", false, None);
    NA1 => ("na1", "Unicode_1_Name", false, None);
    NAME_ALIAS => ("Name_Alias", "Name_Alias", false, None);
}

/// Description of one registered property.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub short_name: String,
    pub long_name: String,
    pub aliases: Vec<String>,
    pub enumerated: bool,
}

impl PropertyDef {
    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.short_name.as_str())
            .chain(std::iter::once(self.long_name.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
    }
}

/// Catalog of property identifiers.
///
/// Passed explicitly to everything that needs to resolve or print property
/// names; two databases compared against each other must share one registry.
#[derive(Debug, Clone)]
pub struct Registry {
    defs: Vec<PropertyDef>,
    by_name: HashMap<String, PropertyKey>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry holding the built-in catalog.
    pub fn new() -> Self {
        let mut registry = Registry {
            defs: Vec::with_capacity(BUILTIN.len()),
            by_name: HashMap::new(),
        };
        for def in BUILTIN {
            registry.insert(PropertyDef {
                short_name: def.short.to_string(),
                long_name: def.long.to_string(),
                aliases: def.aliases.iter().map(|a| a.to_string()).collect(),
                enumerated: def.enumerated,
            });
        }
        registry
    }

    fn insert(&mut self, def: PropertyDef) -> PropertyKey {
        let key = PropertyKey(self.defs.len() as u32);
        for name in def.names() {
            self.by_name.entry(name.to_string()).or_insert(key);
        }
        self.defs.push(def);
        key
    }

    /// Registers a property, or returns the existing key if `short_name` is already known.
    pub fn intern(
        &mut self,
        short_name: &str,
        long_name: Option<&str>,
        aliases: &[&str],
        enumerated: bool,
    ) -> PropertyKey {
        if let Some(&key) = self.by_name.get(short_name) {
            return key;
        }
        self.insert(PropertyDef {
            short_name: short_name.to_string(),
            long_name: long_name.unwrap_or(short_name).to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            enumerated,
        })
    }

    /// Resolves a name without registering anything.
    ///
    /// Exact matches win; otherwise short names, long names and aliases are
    /// compared case-insensitively in registration order.
    pub fn lookup(&self, name: &str) -> Option<PropertyKey> {
        if let Some(&key) = self.by_name.get(name) {
            return Some(key);
        }
        self.defs
            .iter()
            .position(|def| def.names().any(|n| n.eq_ignore_ascii_case(name)))
            .map(|index| PropertyKey(index as u32))
    }

    /// Resolves a name, registering a new non-enumerated key if nothing matches.
    pub fn from_string(&mut self, name: &str) -> PropertyKey {
        if let Some(key) = self.lookup(name) {
            return key;
        }
        warn!("Unknown property '{}', registering it", name);
        self.intern(name, None, &[], false)
    }

    /// All keys in registration order.
    pub fn all_keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        (0..self.defs.len()).map(|index| PropertyKey(index as u32))
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn def(&self, key: PropertyKey) -> Option<&PropertyDef> {
        self.defs.get(key.index())
    }

    /// Short name of `key`; keys issued by another registry fall back to their `Display` form.
    pub fn short_name(&self, key: PropertyKey) -> String {
        match self.def(key) {
            Some(def) => def.short_name.clone(),
            None => key.to_string(),
        }
    }

    pub fn long_name(&self, key: PropertyKey) -> String {
        match self.def(key) {
            Some(def) => def.long_name.clone(),
            None => key.to_string(),
        }
    }

    /// `"short (long)"`, or just the short name when both are the same.
    pub fn both_names(&self, key: PropertyKey) -> String {
        match self.def(key) {
            Some(def) if def.short_name != def.long_name => {
                format!("{} ({})", def.short_name, def.long_name)
            }
            Some(def) => def.short_name.clone(),
            None => key.to_string(),
        }
    }

    pub fn is_enumerated(&self, key: PropertyKey) -> bool {
        self.def(key).map(|def| def.enumerated).unwrap_or(false)
    }
}
