//! Text formats: the UCD line-record files and the UCD XML document.

pub mod parser;
pub mod xml;

pub use parser::{parse_range, Record, RecordKind, RecordParser};
pub use xml::{read_ucd, write_ucd, XmlOptions, NAMESPACE};
