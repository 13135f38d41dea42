//! Fixed value vocabularies and value-alias resolution.
//!
//! Several source files spell values differently from the short aliases the
//! repertoire stores (`Latin` vs `Latn`, `<compat>` vs `com`). A
//! [`Vocabulary`] maps the source spelling to the stored one; tokens outside
//! the vocabulary are reported and left out.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};

use crate::ucd::format::parser::RecordParser;
use crate::ucd::types::error::Result;

/// A closed source-token → stored-value table.
#[derive(Debug)]
pub struct Vocabulary {
    pub name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl Vocabulary {
    /// Case-insensitive lookup.
    pub fn lookup(&self, token: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(from, _)| from.eq_ignore_ascii_case(token))
            .map(|(_, to)| *to)
    }

    /// Lookup that reports unknown tokens.
    pub fn map(&self, token: &str, source: &str, line: usize) -> Option<&'static str> {
        let value = self.lookup(token);
        if value.is_none() {
            warn!("{}:{}: unknown {} value '{}' (ignored)", source, line, self.name, token);
        }
        value
    }
}

pub static SCRIPT: Vocabulary = Vocabulary {
    name: "script",
    entries: &[
        ("Adlam", "Adlm"),
        ("Ahom", "Ahom"),
        ("Anatolian_Hieroglyphs", "Hluw"),
        ("Arabic", "Arab"),
        ("Armenian", "Armn"),
        ("Avestan", "Avst"),
        ("Balinese", "Bali"),
        ("Bamum", "Bamu"),
        ("Bassa_Vah", "Bass"),
        ("Batak", "Batk"),
        ("Bengali", "Beng"),
        ("Bhaiksuki", "Bhks"),
        ("Bopomofo", "Bopo"),
        ("Brahmi", "Brah"),
        ("Braille", "Brai"),
        ("Buginese", "Bugi"),
        ("Buhid", "Buhd"),
        ("Canadian_Aboriginal", "Cans"),
        ("Canadian-Aboriginal", "Cans"),
        ("Carian", "Cari"),
        ("Caucasian_Albanian", "Aghb"),
        ("Chakma", "Cakm"),
        ("Cham", "Cham"),
        ("Cherokee", "Cher"),
        ("Chorasmian", "Chrs"),
        ("Common", "Zyyy"),
        ("Coptic", "Copt"),
        ("Cuneiform", "Xsux"),
        ("Cypriot", "Cprt"),
        ("Cypro_Minoan", "Cpmn"),
        ("Cyrillic", "Cyrl"),
        ("Deseret", "Dsrt"),
        ("Devanagari", "Deva"),
        ("Dives_Akuru", "Diak"),
        ("Dogra", "Dogr"),
        ("Duployan", "Dupl"),
        ("Egyptian_Hieroglyphs", "Egyp"),
        ("Elbasan", "Elba"),
        ("Elymaic", "Elym"),
        ("Ethiopic", "Ethi"),
        ("Georgian", "Geor"),
        ("Glagolitic", "Glag"),
        ("Gothic", "Goth"),
        ("Grantha", "Gran"),
        ("Greek", "Grek"),
        ("Gujarati", "Gujr"),
        ("Gunjala_Gondi", "Gong"),
        ("Gurmukhi", "Guru"),
        ("Han", "Hani"),
        ("Hangul", "Hang"),
        ("Hanifi_Rohingya", "Rohg"),
        ("Hanunoo", "Hano"),
        ("Hatran", "Hatr"),
        ("Hebrew", "Hebr"),
        ("Hiragana", "Hira"),
        ("Imperial_Aramaic", "Armi"),
        ("Inherited", "Zinh"),
        ("Inscriptional_Pahlavi", "Phli"),
        ("Inscriptional_Parthian", "Prti"),
        ("Javanese", "Java"),
        ("Kaithi", "Kthi"),
        ("Kannada", "Knda"),
        ("Katakana", "Kana"),
        ("Katakana_Or_Hiragana", "Hrkt"),
        ("Kawi", "Kawi"),
        ("Kayah_Li", "Kali"),
        ("Kharoshthi", "Khar"),
        ("Khitan_Small_Script", "Kits"),
        ("Khmer", "Khmr"),
        ("Khojki", "Khoj"),
        ("Khudawadi", "Sind"),
        ("Lao", "Laoo"),
        ("Latin", "Latn"),
        ("Lepcha", "Lepc"),
        ("Limbu", "Limb"),
        ("Linear_A", "Lina"),
        ("Linear_B", "Linb"),
        ("Lisu", "Lisu"),
        ("Lycian", "Lyci"),
        ("Lydian", "Lydi"),
        ("Mahajani", "Mahj"),
        ("Makasar", "Maka"),
        ("Malayalam", "Mlym"),
        ("Mandaic", "Mand"),
        ("Manichaean", "Mani"),
        ("Marchen", "Marc"),
        ("Masaram_Gondi", "Gonm"),
        ("Medefaidrin", "Medf"),
        ("Meetei_Mayek", "Mtei"),
        ("Mende_Kikakui", "Mend"),
        ("Meroitic_Cursive", "Merc"),
        ("Meroitic_Hieroglyphs", "Mero"),
        ("Miao", "Plrd"),
        ("Modi", "Modi"),
        ("Mongolian", "Mong"),
        ("Mro", "Mroo"),
        ("Multani", "Mult"),
        ("Myanmar", "Mymr"),
        ("Nabataean", "Nbat"),
        ("Nag_Mundari", "Nagm"),
        ("Nandinagari", "Nand"),
        ("New_Tai_Lue", "Talu"),
        ("Newa", "Newa"),
        ("Nko", "Nkoo"),
        ("Nushu", "Nshu"),
        ("Nyiakeng_Puachue_Hmong", "Hmnp"),
        ("Ogham", "Ogam"),
        ("Ol_Chiki", "Olck"),
        ("Old_Hungarian", "Hung"),
        ("Old_Italic", "Ital"),
        ("Old-Italic", "Ital"),
        ("Old_North_Arabian", "Narb"),
        ("Old_Permic", "Perm"),
        ("Old_Persian", "Xpeo"),
        ("Old_Sogdian", "Sogo"),
        ("Old_South_Arabian", "Sarb"),
        ("Old_Turkic", "Orkh"),
        ("Old_Uyghur", "Ougr"),
        ("Oriya", "Orya"),
        ("Osage", "Osge"),
        ("Osmanya", "Osma"),
        ("Pahawh_Hmong", "Hmng"),
        ("Palmyrene", "Palm"),
        ("Pau_Cin_Hau", "Pauc"),
        ("Phags_Pa", "Phag"),
        ("Phoenician", "Phnx"),
        ("Psalter_Pahlavi", "Phlp"),
        ("Rejang", "Rjng"),
        ("Runic", "Runr"),
        ("Samaritan", "Samr"),
        ("Saurashtra", "Saur"),
        ("Sharada", "Shrd"),
        ("Shavian", "Shaw"),
        ("Siddham", "Sidd"),
        ("Sign_Writing", "Sgnw"),
        ("SignWriting", "Sgnw"),
        ("Sinhala", "Sinh"),
        ("Sogdian", "Sogd"),
        ("Sora_Sompeng", "Sora"),
        ("Soyombo", "Soyo"),
        ("Sundanese", "Sund"),
        ("Syloti_Nagri", "Sylo"),
        ("Syriac", "Syrc"),
        ("Tagalog", "Tglg"),
        ("Tagbanwa", "Tagb"),
        ("Tai_Le", "Tale"),
        ("Tai_Tham", "Lana"),
        ("Tai_Viet", "Tavt"),
        ("Takri", "Takr"),
        ("Tamil", "Taml"),
        ("Tangsa", "Tnsa"),
        ("Tangut", "Tang"),
        ("Telugu", "Telu"),
        ("Thaana", "Thaa"),
        ("Thai", "Thai"),
        ("Tibetan", "Tibt"),
        ("Tifinagh", "Tfng"),
        ("Tirhuta", "Tirh"),
        ("Toto", "Toto"),
        ("Ugaritic", "Ugar"),
        ("Unknown", "Zzzz"),
        ("Vai", "Vaii"),
        ("Vithkuqi", "Vith"),
        ("Wancho", "Wcho"),
        ("Warang_Citi", "Wara"),
        ("Yezidi", "Yezi"),
        ("Yi", "Yiii"),
        ("Zanabazar_Square", "Zanb"),
    ],
};

pub static GRAPHEME_CLUSTER_BREAK: Vocabulary = Vocabulary {
    name: "grapheme cluster break",
    entries: &[
        ("Control", "CN"),
        ("CR", "CR"),
        ("Extend", "EX"),
        ("L", "L"),
        ("LF", "LF"),
        ("LV", "LV"),
        ("LVT", "LVT"),
        ("Prepend", "PP"),
        ("Regional_Indicator", "RI"),
        ("SpacingMark", "SM"),
        ("T", "T"),
        ("V", "V"),
        ("Other", "XX"),
        ("E_Base", "EB"),
        ("E_Base_GAZ", "EBG"),
        ("E_Modifier", "EM"),
        ("Glue_After_Zwj", "GAZ"),
        ("ZWJ", "ZWJ"),
    ],
};

pub static WORD_BREAK: Vocabulary = Vocabulary {
    name: "word break",
    entries: &[
        ("CR", "CR"),
        ("Double_Quote", "DQ"),
        ("ExtendNumLet", "EX"),
        ("Extend", "Extend"),
        ("Format", "FO"),
        ("Hebrew_Letter", "HL"),
        ("Katakana", "KA"),
        ("ALetter", "LE"),
        ("LF", "LF"),
        ("MidNumLet", "MB"),
        ("MidLetter", "ML"),
        ("MidNum", "MN"),
        ("Newline", "NL"),
        ("Numeric", "NU"),
        ("Other", "XX"),
        ("Regional_Indicator", "RI"),
        ("Single_Quote", "SQ"),
        ("E_Base", "EB"),
        ("E_Base_GAZ", "EBG"),
        ("E_Modifier", "EM"),
        ("Glue_After_Zwj", "GAZ"),
        ("ZWJ", "ZWJ"),
        ("WSegSpace", "WSegSpace"),
    ],
};

pub static SENTENCE_BREAK: Vocabulary = Vocabulary {
    name: "sentence break",
    entries: &[
        ("ATerm", "AT"),
        ("Close", "CL"),
        ("CR", "CR"),
        ("Extend", "EX"),
        ("Format", "FO"),
        ("OLetter", "LE"),
        ("LF", "LF"),
        ("Lower", "LO"),
        ("Numeric", "NU"),
        ("SContinue", "SC"),
        ("Sep", "SE"),
        ("Sp", "SP"),
        ("STerm", "ST"),
        ("Upper", "UP"),
        ("Other", "XX"),
    ],
};

/// `<tag>` of a UnicodeData decomposition field → `dt` value.
pub static DECOMPOSITION_TYPE: Vocabulary = Vocabulary {
    name: "decomposition type",
    entries: &[
        ("compat", "com"),
        ("circle", "enc"),
        ("final", "fin"),
        ("font", "font"),
        ("fraction", "fra"),
        ("initial", "init"),
        ("isolated", "iso"),
        ("medial", "med"),
        ("narrow", "nar"),
        ("noBreak", "nb"),
        ("small", "sml"),
        ("square", "sqr"),
        ("super", "sup"),
        ("sub", "sub"),
        ("vertical", "vert"),
        ("wide", "wide"),
    ],
};

/// Loose form used to match value names: no `_`, `-` or spaces, upper case.
pub fn loose(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Long → short value names per property, from `PropertyValueAliases.txt`.
#[derive(Debug, Clone, Default)]
pub struct ValueAliases {
    by_property: HashMap<String, HashMap<String, String>>,
}

impl ValueAliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `PropertyValueAliases.txt`. Lines look like
    /// `bc ; R ; Right_To_Left`; every name on the line maps to the short one.
    pub fn load(path: &Path) -> Result<Self> {
        let mut aliases = ValueAliases::new();
        RecordParser::semicolon()
            .without_missing_directives()
            .parse_file(path, |record| {
                if record.fields.len() < 3 {
                    return;
                }
                let property = &record.fields[0];
                let short = &record.fields[1];
                let values = aliases.by_property.entry(property.clone()).or_default();
                for name in &record.fields[1..] {
                    if !name.is_empty() {
                        values.insert(loose(name), short.clone());
                    }
                }
            })?;
        debug!("Loaded value aliases for {} properties", aliases.by_property.len());
        Ok(aliases)
    }

    pub fn insert(&mut self, property: &str, short: &str, long: &str) {
        let values = self.by_property.entry(property.to_string()).or_default();
        values.insert(loose(short), short.to_string());
        values.insert(loose(long), short.to_string());
    }

    /// Short value name for `value` of `property`, if known.
    pub fn short_value(&self, property: &str, value: &str) -> Option<&str> {
        self.by_property
            .get(property)
            .and_then(|values| values.get(&loose(value)))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_property.is_empty()
    }
}
