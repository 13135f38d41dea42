//! The UCD XML representation.
//!
//! # Document Structure
//! ```text
//! <ucd xmlns="http://www.unicode.org/ns/2003/ucd/1.0">
//!   <description>Unicode 15.0.0</description>
//!   <repertoire>
//!     <group gc="Lo" ...>                         (grouped form only)
//!       <char cp="0041" na="LATIN CAPITAL LETTER A" .../>
//!       <reserved first-cp="0378" last-cp="0379" .../>
//!     </group>
//!   </repertoire>
//!   <blocks><block first-cp="0000" last-cp="007F" name="Basic Latin"/></blocks>
//!   <named-sequences><named-sequence name="..." cps="..."/></named-sequences>
//!   <provisional-named-sequences>...</provisional-named-sequences>
//!   <normalization-corrections>
//!     <normalization-correction cp="F951" old="96FB" new="964B" version="3.2.0"/>
//!   </normalization-corrections>
//!   <standardized-variants><standardized-variant cps="..." desc="..." when="..."/></standardized-variants>
//!   <cjk-radicals><cjk-radical number="1" radical="2F00" ideograph="4E00"/></cjk-radicals>
//!   <emoji-sources><emoji-source unicode="..." docomo="..." kddi="..." softbank="..."/></emoji-sources>
//! </ucd>
//! ```
//!
//! Repertoire elements are named after the group's `type` property, or
//! `code-point` when it has none. Every other text property becomes an
//! attribute named by its short name; `Name_Alias` sets become
//! `<name-alias>` children. In the grouped form an element omits the
//! attributes whose value it inherits from its `<group>`.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufRead, Write};

use log::{debug, info, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::ucd::database::Ucd;
use crate::ucd::store::{Group, Repertoire};
use crate::ucd::tables::{
    Block, Catalog, CatalogEntry, CjkRadical, EmojiSource, NamedSequence, NormalizationCorrection,
    StandardizedVariant,
};
use crate::ucd::types::codepoint::{parse_codepoint, parse_codepoints, to_u};
use crate::ucd::types::error::{Result, UcdError};
use crate::ucd::types::property::{keys, PropertyKey, Registry};
use crate::ucd::types::value::{NameAlias, PropertyValue};

pub const NAMESPACE: &str = "http://www.unicode.org/ns/2003/ucd/1.0";

/// Element names that denote repertoire entries.
const ENTRY_ELEMENTS: [&str; 5] = ["char", "reserved", "surrogate", "noncharacter", "code-point"];

/// Output options for [`write_ucd`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlOptions {
    /// Ranges of at most `explode_limit + 1` codepoints are written as one
    /// element per codepoint.
    pub explode_limit: u32,
    /// Wrap entries in `<group>` elements carrying the dominant values.
    pub grouped: bool,
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| UcdError::Xml(e.to_string()))
}

/// Text-valued attributes of `group`, skipping `type`, alias sets, and
/// values equal to the ones inherited from `inherited`.
fn group_attributes(group: &Group, registry: &Registry, inherited: Option<&Group>) -> Vec<(String, String)> {
    group
        .properties()
        .filter(|(key, _)| *key != keys::TYPE && *key != keys::NAME_ALIAS)
        .filter_map(|(key, value)| value.as_text().map(|text| (key, text)))
        .filter(|(key, text)| inherited.and_then(|g| g.get(*key)) != Some(*text))
        .map(|(key, text)| (registry.short_name(key), text.to_string()))
        .collect()
}

fn write_entry<W: Write>(
    writer: &mut Writer<W>,
    element: &str,
    position: &[(&str, String)],
    attributes: &[(String, String)],
    aliases: Option<&BTreeSet<NameAlias>>,
) -> Result<()> {
    let mut start = BytesStart::new(element);
    for (name, value) in position {
        start.push_attribute((*name, value.as_str()));
    }
    for (name, value) in attributes {
        start.push_attribute((name.as_str(), value.as_str()));
    }

    let Some(aliases) = aliases.filter(|aliases| !aliases.is_empty()) else {
        return emit(writer, Event::Empty(start));
    };
    emit(writer, Event::Start(start))?;
    for alias in aliases {
        let mut child = BytesStart::new("name-alias");
        child.push_attribute(("alias", alias.alias.as_str()));
        if let Some(kind) = &alias.kind {
            child.push_attribute(("type", kind.as_str()));
        }
        emit(writer, Event::Empty(child))?;
    }
    emit(writer, Event::End(BytesEnd::new(element)))
}

/// Writes the part of `group` that falls inside `container` (or all of it).
fn write_group<W: Write>(
    writer: &mut Writer<W>,
    group: &Group,
    registry: &Registry,
    explode_limit: u32,
    container: Option<&Group>,
) -> Result<()> {
    if group.property_count() == 0 {
        return Ok(());
    }
    let (first, last) = match container {
        Some(container) => (group.first().max(container.first()), group.last().min(container.last())),
        None => (group.first(), group.last()),
    };
    let element = group.get(keys::TYPE).unwrap_or("code-point");
    let attributes = group_attributes(group, registry, container);
    let aliases = group.get_object(keys::NAME_ALIAS).and_then(PropertyValue::as_aliases);

    let explode = first == last || last - first - 1 < explode_limit;
    if explode {
        for cp in first..=last {
            write_entry(writer, element, &[("cp", to_u(cp))], &attributes, aliases)?;
        }
        Ok(())
    } else {
        let position = [("first-cp", to_u(first)), ("last-cp", to_u(last))];
        write_entry(writer, element, &position, &attributes, aliases)
    }
}

fn write_repertoire<W: Write>(
    writer: &mut Writer<W>,
    repertoire: &Repertoire,
    registry: &Registry,
    options: &XmlOptions,
    groups: Option<&Repertoire>,
) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new("repertoire")))?;
    match groups {
        None => {
            for group in repertoire.iter() {
                write_group(writer, group, registry, options.explode_limit, None)?;
            }
        }
        Some(groups) => {
            for coarse in groups.iter() {
                let mut start = BytesStart::new("group");
                for (name, value) in group_attributes(coarse, registry, None) {
                    start.push_attribute((name.as_str(), value.as_str()));
                }
                emit(writer, Event::Start(start))?;
                for group in repertoire.on_subset(coarse.first(), coarse.last()) {
                    write_group(writer, group, registry, options.explode_limit, Some(coarse))?;
                }
                emit(writer, Event::End(BytesEnd::new("group")))?;
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new("repertoire")))
}

fn write_catalog<W: Write, E: CatalogEntry>(writer: &mut Writer<W>, table: &Catalog<E>) -> Result<()> {
    if table.is_empty() {
        return Ok(());
    }
    emit(writer, Event::Start(BytesStart::new(E::LIST_ELEMENT)))?;
    for entry in table.iter() {
        let mut element = BytesStart::new(E::ELEMENT);
        for (name, value) in E::FIELDS.iter().zip(entry.values()) {
            element.push_attribute((*name, value.as_str()));
        }
        emit(writer, Event::Empty(element))?;
    }
    emit(writer, Event::End(BytesEnd::new(E::LIST_ELEMENT)))
}

/// Serializes `ucd` to `out`.
pub fn write_ucd<W: Write>(ucd: &Ucd, registry: &Registry, out: W, options: &XmlOptions) -> Result<()> {
    let groups = options.grouped.then(|| ucd.group());
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    let mut root = BytesStart::new("ucd");
    root.push_attribute(("xmlns", NAMESPACE));
    emit(&mut writer, Event::Start(root))?;

    emit(&mut writer, Event::Start(BytesStart::new("description")))?;
    emit(&mut writer, Event::Text(BytesText::new(&ucd.description)))?;
    emit(&mut writer, Event::End(BytesEnd::new("description")))?;

    write_repertoire(&mut writer, &ucd.repertoire, registry, options, groups.as_ref())?;

    if !ucd.blocks.is_empty() {
        emit(&mut writer, Event::Start(BytesStart::new("blocks")))?;
        for block in ucd.blocks.by_range() {
            let mut element = BytesStart::new("block");
            element.push_attribute(("first-cp", to_u(block.first).as_str()));
            element.push_attribute(("last-cp", to_u(block.last).as_str()));
            element.push_attribute(("name", block.name.as_str()));
            emit(&mut writer, Event::Empty(element))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("blocks")))?;
    }

    for (element, table) in [
        ("named-sequences", &ucd.named_sequences),
        ("provisional-named-sequences", &ucd.provisional_named_sequences),
    ] {
        if table.is_empty() {
            continue;
        }
        emit(&mut writer, Event::Start(BytesStart::new(element)))?;
        for sequence in table.iter() {
            let mut child = BytesStart::new("named-sequence");
            child.push_attribute(("name", sequence.name.as_str()));
            child.push_attribute(("cps", sequence.cps().as_str()));
            emit(&mut writer, Event::Empty(child))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new(element)))?;
    }

    write_catalog(&mut writer, &ucd.normalization_corrections)?;
    write_catalog(&mut writer, &ucd.standardized_variants)?;
    write_catalog(&mut writer, &ucd.cjk_radicals)?;
    write_catalog(&mut writer, &ucd.emoji_sources)?;

    emit(&mut writer, Event::End(BytesEnd::new("ucd")))?;
    writer
        .into_inner()
        .flush()
        .map_err(UcdError::from)
}

/// Collects the attributes of `element` as `(local name, unescaped value)`.
fn attributes(element: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    element
        .attributes()
        .map(|attr_result| {
            let attr = attr_result.map_err(|e| UcdError::Xml(format!("Failed to parse XML attribute: {}", e)))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| UcdError::Xml(format!("Failed to decode XML value: {}", e)))?
                .into_owned();
            Ok((key, value))
        })
        .collect()
}

fn required<'a>(attributes: &'a [(String, String)], name: &str, element: &str) -> Result<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .ok_or_else(|| UcdError::Xml(format!("<{}> without '{}' attribute", element, name)))
}

fn catalog_entry<E: CatalogEntry>(element: &BytesStart<'_>) -> Result<E> {
    let attributes = attributes(element)?;
    let values: Vec<&str> = E::FIELDS
        .iter()
        .map(|field| {
            attributes
                .iter()
                .find(|(key, _)| key.as_str() == *field)
                .map(|(_, value)| value.as_str())
                .unwrap_or_default()
        })
        .collect();
    E::from_values(&values).map_err(|e| UcdError::Xml(format!("<{}>: {}", E::ELEMENT, e)))
}

/// Adds `element` to the side table it belongs to. Returns `false` when it
/// is not a side-table element.
fn read_catalog_element(ucd: &mut Ucd, name: &str, element: &BytesStart<'_>) -> Result<bool> {
    if name == NormalizationCorrection::ELEMENT {
        ucd.normalization_corrections.add(catalog_entry(element)?);
    } else if name == StandardizedVariant::ELEMENT {
        ucd.standardized_variants.add(catalog_entry(element)?);
    } else if name == CjkRadical::ELEMENT {
        ucd.cjk_radicals.add(catalog_entry(element)?);
    } else if name == EmojiSource::ELEMENT {
        ucd.emoji_sources.add(catalog_entry(element)?);
    } else {
        return Ok([
            NormalizationCorrection::LIST_ELEMENT,
            StandardizedVariant::LIST_ELEMENT,
            CjkRadical::LIST_ELEMENT,
            EmojiSource::LIST_ELEMENT,
        ]
        .contains(&name));
    }
    Ok(true)
}

/// Builds a group from a repertoire element. Values inherited from the
/// enclosing `<group>` are defaults: the element's own attributes win.
fn entry_from_xml(
    element: &str,
    attributes: &[(String, String)],
    inherited: &BTreeMap<PropertyKey, String>,
    registry: &mut Registry,
) -> Result<Group> {
    let (first, last) = match attributes.iter().find(|(key, _)| key == "cp") {
        Some((_, cp)) => {
            let cp = parse_codepoint(cp)?;
            (cp, cp)
        }
        None => (
            parse_codepoint(required(attributes, "first-cp", element)?)?,
            parse_codepoint(required(attributes, "last-cp", element)?)?,
        ),
    };

    let mut group = Group::new(first, last);
    let mut refused = Vec::new();
    for (name, value) in attributes {
        if matches!(name.as_str(), "cp" | "first-cp" | "last-cp") {
            continue;
        }
        let key = registry.from_string(name);
        refused.extend(group.put_checked(key, PropertyValue::Text(value.clone())));
    }
    if element != "code-point" {
        refused.extend(group.put_checked(keys::TYPE, PropertyValue::Text(element.to_string())));
    }
    for conflict in refused {
        warn!("<{}>: {}", element, conflict.describe(registry));
    }
    for (key, value) in inherited {
        group.put_default(*key, value.as_str());
    }
    Ok(group)
}

/// Parser state between events.
#[derive(Default)]
struct ReadState {
    in_description: bool,
    inherited: BTreeMap<PropertyKey, String>,
    entry: Option<Group>,
    provisional: Option<bool>,
}

impl ReadState {
    fn start(&mut self, ucd: &mut Ucd, registry: &mut Registry, element: &BytesStart<'_>, empty: bool) -> Result<()> {
        let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
        if read_catalog_element(ucd, &name, element)? {
            return Ok(());
        }
        match name.as_str() {
            "ucd" | "repertoire" | "blocks" => {}
            "description" => self.in_description = !empty,
            "group" => {
                self.inherited = attributes(element)?
                    .into_iter()
                    .map(|(key, value)| (registry.from_string(&key), value))
                    .collect();
            }
            "name-alias" => {
                let attributes = attributes(element)?;
                let alias = NameAlias::new(
                    required(&attributes, "alias", "name-alias")?,
                    attributes.iter().find(|(key, _)| key == "type").map(|(_, v)| v.as_str()),
                );
                let Some(entry) = self.entry.as_mut() else {
                    warn!("<name-alias {}> outside a repertoire entry (ignored)", alias);
                    return Ok(());
                };
                let mut aliases = entry
                    .get_object(keys::NAME_ALIAS)
                    .and_then(PropertyValue::as_aliases)
                    .cloned()
                    .unwrap_or_default();
                aliases.insert(alias);
                entry.put_forced(keys::NAME_ALIAS, aliases);
            }
            "block" => {
                let attributes = attributes(element)?;
                ucd.blocks.add(Block::new(
                    parse_codepoint(required(&attributes, "first-cp", "block")?)?,
                    parse_codepoint(required(&attributes, "last-cp", "block")?)?,
                    required(&attributes, "name", "block")?,
                ));
            }
            "named-sequences" => self.provisional = Some(false),
            "provisional-named-sequences" => self.provisional = Some(true),
            "named-sequence" => {
                let attributes = attributes(element)?;
                let sequence = NamedSequence::new(
                    required(&attributes, "name", "named-sequence")?,
                    parse_codepoints(required(&attributes, "cps", "named-sequence")?)?,
                );
                match self.provisional {
                    Some(true) => ucd.provisional_named_sequences.add(sequence),
                    Some(false) => ucd.named_sequences.add(sequence),
                    None => warn!("{} outside a named-sequences list (ignored)", sequence),
                }
            }
            entry if ENTRY_ELEMENTS.contains(&entry) => {
                let group = entry_from_xml(entry, &attributes(element)?, &self.inherited, registry)?;
                if empty {
                    ucd.repertoire.replace_range(group);
                } else {
                    self.entry = Some(group);
                }
            }
            other => debug!("Skipping <{}>", other),
        }
        Ok(())
    }

    fn end(&mut self, ucd: &mut Ucd, element: &BytesEnd<'_>) {
        let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
        match name.as_str() {
            "description" => self.in_description = false,
            "group" => self.inherited.clear(),
            "named-sequences" | "provisional-named-sequences" => self.provisional = None,
            entry if ENTRY_ELEMENTS.contains(&entry) => {
                if let Some(group) = self.entry.take() {
                    ucd.repertoire.replace_range(group);
                }
            }
            _ => {}
        }
    }
}

/// Reads a document produced by [`write_ucd`], grouped or not.
///
/// Unknown attribute names are registered in `registry` as they are met.
pub fn read_ucd<R: BufRead>(registry: &mut Registry, input: R) -> Result<Ucd> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut ucd = Ucd::new();
    let mut state = ReadState::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => state.start(&mut ucd, registry, &e, false)?,
            Ok(Event::Empty(e)) => state.start(&mut ucd, registry, &e, true)?,
            Ok(Event::End(e)) => state.end(&mut ucd, &e),
            Ok(Event::Text(t)) if state.in_description => {
                let text = t
                    .unescape()
                    .map_err(|e| UcdError::Xml(format!("Failed to decode description: {}", e)))?;
                ucd.description.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(UcdError::Xml(format!(
                    "Failed to read UCD XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    info!(
        "Read '{}': {} groups, {} blocks, {} named sequences",
        ucd.description,
        ucd.repertoire.group_count(),
        ucd.blocks.len(),
        ucd.named_sequences.len() + ucd.provisional_named_sequences.len()
    );
    Ok(ucd)
}
