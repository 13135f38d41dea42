//! Blocks, name aliases, named sequences and the other side tables.

use std::collections::BTreeSet;

use log::{debug, info, warn};

use super::{Loader, UcdFile};
use crate::ucd::database::Ucd;
use crate::ucd::format::parser::RecordParser;
use crate::ucd::tables::{Block, Catalog, CatalogEntry, NamedSequence};
use crate::ucd::types::codepoint::{parse_codepoint, parse_codepoints};
use crate::ucd::types::error::Result;
use crate::ucd::types::property::keys;
use crate::ucd::types::value::{NameAlias, PropertyValue};
use crate::ucd::types::version::UnicodeVersion;

/// Reads `Blocks.txt` into the blocks table and the `blk` property.
///
/// Before 3.1.0 the file has three columns (`first; last; name`). From 6.1.0
/// on, `blk` values are the short aliases found in `PropertyValueAliases.txt`.
pub(super) fn load_blocks(loader: &mut Loader<'_>) -> Result<()> {
    let path = loader.path(UcdFile::Blocks);
    let name = UcdFile::Blocks.path();
    let version = loader.version;
    let three_columns = !version.is_at_least(UnicodeVersion::V3_1_0);
    let aliases = version
        .is_at_least(UnicodeVersion::V6_1_0)
        .then_some(&loader.value_aliases);
    let ucd = &mut *loader.ucd;

    let records = RecordParser::semicolon()
        .without_missing_directives()
        .parse_file(&path, |record| {
            let parsed = if three_columns {
                parse_codepoint(&record.fields[0]).and_then(|first| {
                    let last = parse_codepoint(record.field(1).unwrap_or_default())?;
                    Ok((first, last, record.field(2)))
                })
            } else {
                record.range(0).map(|range| (range.first, range.last, record.field(1)))
            };
            let (first, last, block_name) = match parsed {
                Ok((first, last, Some(block_name))) if !block_name.is_empty() => (first, last, block_name),
                Ok(_) => {
                    warn!("{}:{}: block without a name (line skipped)", name, record.line);
                    return;
                }
                Err(e) => {
                    warn!("{}:{}: {} (line skipped)", name, record.line, e);
                    return;
                }
            };

            ucd.blocks.add(Block::new(first, last, block_name));
            let value = aliases
                .and_then(|aliases| aliases.short_value("blk", block_name))
                .unwrap_or(block_name);
            ucd.repertoire.put(first, last, keys::BLK, value);
        })?;
    debug!("{}: {} blocks", name, records);

    let no_block = match aliases {
        Some(aliases) => aliases.short_value("blk", "No_Block").unwrap_or("NB"),
        None => "No_Block",
    };
    ucd.repertoire.put_default(keys::BLK, no_block);
    Ok(())
}

/// Reads `NameAliases.txt` into alias sets. The third column (alias type)
/// exists from 6.1.0 on.
pub(super) fn load_name_aliases(loader: &mut Loader<'_>) -> Result<()> {
    let path = loader.path(UcdFile::NameAliases);
    let name = UcdFile::NameAliases.path();
    let typed = loader.version.is_at_least(UnicodeVersion::V6_1_0);
    let repertoire = &mut loader.ucd.repertoire;

    RecordParser::semicolon()
        .without_missing_directives()
        .parse_file(&path, |record| {
            let cp = match parse_codepoint(&record.fields[0]) {
                Ok(cp) => cp,
                Err(e) => {
                    warn!("{}:{}: {} (line skipped)", name, record.line, e);
                    return;
                }
            };
            let Some(alias) = record.field(1).filter(|alias| !alias.is_empty()) else {
                warn!("{}:{}: missing alias (line skipped)", name, record.line);
                return;
            };
            let kind = if typed { record.field(2) } else { None };

            let mut aliases: BTreeSet<NameAlias> = repertoire
                .get_object(cp, keys::NAME_ALIAS)
                .and_then(PropertyValue::as_aliases)
                .cloned()
                .unwrap_or_default();
            aliases.insert(NameAlias::new(alias, kind));
            repertoire.put_forced(cp, cp, keys::NAME_ALIAS, aliases);
        })?;
    Ok(())
}

/// Reads `NamedSequences.txt` or `NamedSequencesProv.txt` (`name; cps`).
pub(super) fn load_named_sequences(loader: &mut Loader<'_>, provisional: bool) -> Result<()> {
    let file = if provisional {
        UcdFile::NamedSequencesProv
    } else {
        UcdFile::NamedSequences
    };
    let path = loader.path(file);
    let name = file.path();
    let ucd = &mut *loader.ucd;
    let table = if provisional {
        &mut ucd.provisional_named_sequences
    } else {
        &mut ucd.named_sequences
    };

    RecordParser::semicolon()
        .without_missing_directives()
        .parse_file(&path, |record| {
            let (Some(sequence_name), Some(cps)) = (record.field(0), record.field(1)) else {
                warn!("{}:{}: expected 'name; cps' (line skipped)", name, record.line);
                return;
            };
            match parse_codepoints(cps) {
                Ok(sequence) => table.add(NamedSequence::new(sequence_name, sequence)),
                Err(e) => warn!("{}:{}: {} (line skipped)", name, record.line, e),
            }
        })?;
    debug!("{}: {} sequences", name, table.len());
    Ok(())
}

/// Reads a `;`-separated file whose columns are the fields of `E`, into the
/// table picked out of the database by `table`.
pub(super) fn load_catalog<E, F>(loader: &mut Loader<'_>, file: UcdFile, table: F) -> Result<()>
where
    E: CatalogEntry,
    F: FnOnce(&mut Ucd) -> &mut Catalog<E>,
{
    let path = loader.path(file);
    let name = file.path();
    info!("Reading {}", name);
    let table = table(&mut *loader.ucd);

    let records = RecordParser::semicolon()
        .without_missing_directives()
        .parse_file(&path, |record| {
            let values: Vec<&str> = (0..E::FIELDS.len())
                .map(|index| record.field(index).unwrap_or_default())
                .collect();
            match E::from_values(&values) {
                Ok(entry) => table.add(entry),
                Err(e) => warn!("{}:{}: {} (line skipped)", name, record.line, e),
            }
        })?;
    debug!("{}: {} records, {} {}", name, records, table.len(), E::TITLE);
    Ok(())
}
