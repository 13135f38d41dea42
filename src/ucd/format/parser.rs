//! Line-oriented tokenizer for UCD text files.
//!
//! UCD files are mostly `;`-separated records with `#` comments:
//!
//! ```text
//! # @missing: 0000..10FFFF; Unknown
//! 0041..005A    ; Latin # L&  [26] LATIN CAPITAL LETTER A..LATIN CAPITAL LETTER Z
//! ```
//!
//! [`RecordParser`] turns such text into [`Record`]s: trimmed fields, empty
//! fields preserved, comments stripped. `@missing` directives are surfaced as
//! [`RecordKind::Missing`] records, except the ones covering the whole
//! codespace, which carry nothing a loader's global default does not already
//! provide.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

use log::{info, trace, warn};
use regex::Regex;

use crate::ucd::types::codepoint::{parse_codepoint, CodepointRange};
use crate::ucd::types::error::{Result, UcdError};

static MISSING_PATTERN: OnceLock<Regex> = OnceLock::new();

fn missing_regex() -> &'static Regex {
    MISSING_PATTERN
        .get_or_init(|| Regex::new(r"^(?:#\s*)?@missing:\s*(.*)$").expect("Invalid @missing regex pattern"))
}

/// Whether a record is ordinary data or an `@missing` default declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Data,
    Missing,
}

/// One tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source.
    pub line: usize,
    pub kind: RecordKind,
    pub fields: Vec<String>,
}

impl Record {
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn is_missing(&self) -> bool {
        self.kind == RecordKind::Missing
    }

    /// Parses field `index` as a codepoint range.
    pub fn range(&self, index: usize) -> Result<CodepointRange> {
        match self.field(index) {
            Some(field) => parse_range(field),
            None => Err(UcdError::InvalidFormat(format!(
                "line {}: no field {}",
                self.line, index
            ))),
        }
    }

    /// Like [`Record::range`], but logs and returns `None` on failure so the
    /// caller can skip the line.
    pub fn range_or_warn(&self, index: usize, source: &str) -> Option<CodepointRange> {
        match self.range(index) {
            Ok(range) => Some(range),
            Err(e) => {
                warn!("{}:{}: {} (line skipped)", source, self.line, e);
                None
            }
        }
    }
}

/// Parses `XXXX` or `XXXX..YYYY`, each end optionally prefixed with `U+`.
pub fn parse_range(field: &str) -> Result<CodepointRange> {
    let field = field.trim();
    let strip = |s: &str| -> Result<u32> {
        let s = s.trim();
        parse_codepoint(s.strip_prefix("U+").unwrap_or(s))
    };
    match field.split_once("..") {
        Some((first, last)) => CodepointRange::new(strip(first)?, strip(last)?),
        None => CodepointRange::single(strip(field)?),
    }
}

/// Parses a field that is expected to use `U+XXXX` notation.
///
/// A missing prefix is reported but the value is still parsed.
pub fn parse_u_range(field: &str, line: usize) -> Result<CodepointRange> {
    let trimmed = field.trim();
    if !trimmed.contains("..") && !trimmed.starts_with("U+") {
        warn!("line {}: code point does not start with U+ ('{}')", line, trimmed);
    }
    parse_range(trimmed)
}

/// Configurable tokenizer for delimited or fixed-column text.
#[derive(Debug, Clone)]
pub struct RecordParser {
    delimiter: char,
    skip_header: bool,
    missing_directives: bool,
    columns: Option<Vec<usize>>,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::semicolon()
    }
}

impl RecordParser {
    pub fn new(delimiter: char) -> Self {
        RecordParser {
            delimiter,
            skip_header: false,
            missing_directives: true,
            columns: None,
        }
    }

    /// The standard UCD `;`-delimited format.
    pub fn semicolon() -> Self {
        Self::new(';')
    }

    pub fn tab() -> Self {
        Self::new('\t')
    }

    /// Fixed-width records cut at the given 1-based column offsets.
    ///
    /// `n` offsets yield `n - 1` fields. Such files start with a free-form
    /// header, which is skipped up to the first blank line.
    pub fn fixed_columns(columns: Vec<usize>) -> Self {
        RecordParser {
            delimiter: ';',
            skip_header: true,
            missing_directives: false,
            columns: Some(columns),
        }
    }

    /// Ignores everything up to and including the first blank line.
    pub fn skip_header(mut self) -> Self {
        self.skip_header = true;
        self
    }

    /// Treats `@missing:` lines as plain comments.
    pub fn without_missing_directives(mut self) -> Self {
        self.missing_directives = false;
        self
    }

    /// Tokenizes a file, calling `handler` for each record.
    ///
    /// Only I/O failures are errors; malformed content is the handler's concern.
    /// Returns the number of records produced.
    pub fn parse_file<F>(&self, path: impl AsRef<Path>, handler: F) -> Result<usize>
    where
        F: FnMut(&Record),
    {
        let path = path.as_ref();
        info!("Parsing {}", path.display());
        let file = File::open(path).map_err(|e| UcdError::resource(path, e))?;
        self.parse_reader(BufReader::new(file), handler)
            .map_err(|e| match e {
                UcdError::Io(source) => UcdError::resource(path, source),
                other => other,
            })
    }

    pub fn parse_reader<R, F>(&self, reader: R, mut handler: F) -> Result<usize>
    where
        R: BufRead,
        F: FnMut(&Record),
    {
        let mut state = LineState::new(self);
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(record) = state.feed(&line, index + 1) {
                handler(&record);
            }
        }
        Ok(state.records)
    }

    /// Tokenizes in-memory text.
    pub fn parse_str<F>(&self, text: &str, mut handler: F) -> usize
    where
        F: FnMut(&Record),
    {
        let mut state = LineState::new(self);
        for (index, line) in text.lines().enumerate() {
            if let Some(record) = state.feed(line, index + 1) {
                handler(&record);
            }
        }
        state.records
    }

    /// Convenience wrapper collecting every record of `text`.
    pub fn records(&self, text: &str) -> Vec<Record> {
        let mut records = Vec::new();
        self.parse_str(text, |record| records.push(record.clone()));
        records
    }

    fn split(&self, content: &str) -> Vec<String> {
        content
            .split(self.delimiter)
            .map(|field| field.trim().to_string())
            .collect()
    }

    fn slice_columns(&self, columns: &[usize], line: &str, number: usize) -> Option<Record> {
        if line.trim().is_empty() {
            return None;
        }
        let mut fields = Vec::with_capacity(columns.len().saturating_sub(1));
        for pair in columns.windows(2) {
            let start = pair[0].saturating_sub(1).min(line.len());
            let end = pair[1].saturating_sub(1).clamp(start, line.len());
            match line.get(start..end) {
                Some(field) => fields.push(field.trim().to_string()),
                None => {
                    warn!("line {}: column {} splits a character (line skipped)", number, pair[0]);
                    return None;
                }
            }
        }
        Some(Record {
            line: number,
            kind: RecordKind::Data,
            fields,
        })
    }
}

/// Per-source progress through the header and record counting.
struct LineState<'p> {
    parser: &'p RecordParser,
    in_header: bool,
    records: usize,
}

impl<'p> LineState<'p> {
    fn new(parser: &'p RecordParser) -> Self {
        LineState {
            parser,
            in_header: parser.skip_header,
            records: 0,
        }
    }

    fn feed(&mut self, line: &str, number: usize) -> Option<Record> {
        if self.in_header {
            if line.trim().is_empty() {
                self.in_header = false;
            }
            return None;
        }
        let record = match &self.parser.columns {
            Some(columns) => self.parser.slice_columns(columns, line, number),
            None => self.delimited(line, number),
        };
        if record.is_some() {
            self.records += 1;
        }
        record
    }

    fn delimited(&self, line: &str, number: usize) -> Option<Record> {
        let mut kind = RecordKind::Data;
        let mut content = line;
        let directive = missing_regex()
            .captures(line.trim_start())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        match directive {
            Some(_) if !self.parser.missing_directives => return None,
            Some(rest) => {
                if covers_whole_codespace(rest, self.parser.delimiter) {
                    trace!("line {}: dropping whole-codespace @missing", number);
                    return None;
                }
                kind = RecordKind::Missing;
                content = rest.split('#').next().unwrap_or(rest);
            }
            None => {
                if let Some(hash) = line.find('#') {
                    content = &line[..hash];
                }
            }
        }

        if content.trim().len() < 2 {
            return None;
        }
        Some(Record {
            line: number,
            kind,
            fields: self.parser.split(content),
        })
    }
}

fn covers_whole_codespace(directive: &str, delimiter: char) -> bool {
    let range = directive.split(delimiter).next().unwrap_or("");
    matches!(parse_range(range), Ok(range) if range.is_whole_codespace())
}
