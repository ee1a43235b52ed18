// XLSX package reading.
//
// Reads only what table extraction needs: the shared string table, the first
// worksheet listed in xl/workbook.xml, and that worksheet's <sheetData> cells.
// Formatting, formulas and every other sheet are ignored.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use sheetrecon_engine::{extract_table, RawCell, RawRow, SharedStrings, Table};
use zip::ZipArchive;

use crate::error::ReadError;

/// Worksheet part used when the workbook relationships cannot be resolved.
const DEFAULT_WORKSHEET_PATH: &str = "xl/worksheets/sheet1.xml";

/// Load the first worksheet of an XLSX file as a table.
///
/// The file is opened, fully parsed and closed before this returns, on every
/// path including failure.
pub fn read_table(path: &Path) -> Result<Table, ReadError> {
    if !path.exists() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|e| ReadError::Unparseable {
        path: path.to_path_buf(),
        reason: format!("failed to open: {e}"),
    })?;
    read_table_from_reader(file, path)
}

/// Load the first worksheet from an in-memory XLSX package.
///
/// `label` only names the source in error messages.
pub fn read_table_from_bytes(bytes: &[u8], label: &Path) -> Result<Table, ReadError> {
    read_table_from_reader(Cursor::new(bytes), label)
}

/// Load the first worksheet from any seekable XLSX byte stream.
pub fn read_table_from_reader<R: Read + Seek>(reader: R, label: &Path) -> Result<Table, ReadError> {
    read_package(reader).map_err(|reason| ReadError::Unparseable {
        path: label.to_path_buf(),
        reason,
    })
}

fn read_package<R: Read + Seek>(reader: R) -> Result<Table, String> {
    let mut archive =
        ZipArchive::new(reader).map_err(|e| format!("not a valid XLSX package: {e}"))?;

    let shared_strings = match read_optional_zip_file(&mut archive, "xl/sharedStrings.xml")? {
        Some(xml) => Some(parse_shared_strings(&xml)?),
        None => None,
    };

    let workbook_xml = read_optional_zip_file(&mut archive, "xl/workbook.xml")?
        .ok_or_else(|| "missing xl/workbook.xml".to_string())?;
    let sheet = find_first_sheet(&workbook_xml)?
        .ok_or_else(|| "workbook contains no worksheet".to_string())?;

    let rels_xml = read_optional_zip_file(&mut archive, "xl/_rels/workbook.xml.rels")?;
    let sheet_path = match (sheet.rid.as_deref(), rels_xml.as_deref()) {
        (Some(rid), Some(rels)) => find_relationship_target(rels, rid)?
            .map(|target| worksheet_part_path(&target))
            .unwrap_or_else(|| DEFAULT_WORKSHEET_PATH.to_string()),
        _ => DEFAULT_WORKSHEET_PATH.to_string(),
    };

    let sheet_xml = read_optional_zip_file(&mut archive, &sheet_path)?
        .ok_or_else(|| format!("worksheet '{}' not found at {sheet_path}", sheet.name))?;
    let rows = parse_sheet_rows(&sheet_xml)?;

    extract_table(&rows, shared_strings.as_ref()).map_err(|e| e.to_string())
}

/// Read a part from the package. `Ok(None)` when the part does not exist.
fn read_optional_zip_file<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Option<String>, String> {
    let mut file = match archive.by_name(path) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(format!("cannot open '{path}' in XLSX: {e}")),
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| format!("failed to read '{path}': {e}"))?;
    Ok(Some(content))
}

/// Relationship target → package path. Targets are relative to `xl/` unless absolute.
fn worksheet_part_path(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else if target.starts_with("xl/") {
        target.to_string()
    } else {
        format!("xl/{target}")
    }
}

// =============================================================================
// Workbook + relationships
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
struct SheetEntry {
    name: String,
    rid: Option<String>,
}

/// First `<sheet>` element of xl/workbook.xml, in document order.
fn find_first_sheet(workbook_xml: &str) -> Result<Option<SheetEntry>, String> {
    let mut reader = Reader::from_str(workbook_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"sheet" => {
                let mut entry = SheetEntry { name: String::new(), rid: None };
                for attr in e.attributes().flatten() {
                    let key = attr.key.as_ref();
                    if key == b"name" {
                        entry.name = unescape_xml(&String::from_utf8_lossy(&attr.value));
                    } else if key == b"r:id" || key.ends_with(b":id") {
                        entry.rid = Some(String::from_utf8_lossy(&attr.value).to_string());
                    }
                }
                return Ok(Some(entry));
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(format!("workbook XML parse error: {e}")),
            _ => {}
        }
        buf.clear();
    }
}

/// Target of relationship `rid` in xl/_rels/workbook.xml.rels.
fn find_relationship_target(rels_xml: &str, rid: &str) -> Result<Option<String>, String> {
    let mut reader = Reader::from_str(rels_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = Some(String::from_utf8_lossy(&attr.value).to_string()),
                        b"Target" => {
                            target = Some(String::from_utf8_lossy(&attr.value).to_string());
                        }
                        _ => {}
                    }
                }
                if id.as_deref() == Some(rid) {
                    return Ok(target);
                }
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(format!("relationships XML parse error: {e}")),
            _ => {}
        }
        buf.clear();
    }
}

// =============================================================================
// Shared strings
// =============================================================================

/// Parse xl/sharedStrings.xml. Each `<si>` is either `<t>` or rich-text runs
/// `<r><t>..</t></r>`, concatenated. Phonetic hints (`<rPh>`) are skipped.
fn parse_shared_strings(xml: &str) -> Result<SharedStrings, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false); // whitespace inside <t> is data

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;
    let mut current = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"si" => strings.push(String::new()),
            Ok(Event::Text(ref e)) if in_t => {
                current.push_str(&unescape_xml(&String::from_utf8_lossy(e.as_ref())));
            }
            Ok(Event::GeneralRef(ref e)) if in_t => {
                push_entity(&mut current, &String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"t" => in_t = false,
                b"rPh" => in_phonetic = false,
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("shared strings XML parse error: {e}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(SharedStrings::new(strings))
}

// =============================================================================
// Worksheet cells
// =============================================================================

/// Which text node of the current cell is being read.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    Inline,
}

/// A `<c>` element being assembled.
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    value: Option<String>,
    inline: Option<String>,
}

impl PendingCell {
    fn from_element(e: &BytesStart) -> Self {
        let mut cell = Self { reference: None, cell_type: None, value: None, inline: None };
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => cell.reference = Some(String::from_utf8_lossy(&attr.value).to_string()),
                b"t" => cell.cell_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
                _ => {}
            }
        }
        cell
    }

    fn text_mut(&mut self, target: TextTarget) -> Option<&mut String> {
        match target {
            TextTarget::Value => Some(self.value.get_or_insert_with(String::new)),
            TextTarget::Inline => Some(self.inline.get_or_insert_with(String::new)),
            TextTarget::None => None,
        }
    }

    /// Shared strings keep their index as the raw value; inline strings
    /// surface their `<is><t>` text; everything else keeps `<v>` as-is.
    fn finish(self) -> RawCell {
        match self.cell_type.as_deref() {
            Some("s") => RawCell { reference: self.reference, value: self.value, shared: true },
            Some("inlineStr") => RawCell {
                reference: self.reference,
                value: self.inline.or(self.value),
                shared: false,
            },
            _ => RawCell { reference: self.reference, value: self.value, shared: false },
        }
    }
}

/// Parse a worksheet's `<sheetData>` into raw rows in document order.
fn parse_sheet_rows(xml: &str) -> Result<Vec<RawRow>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut rows = Vec::new();
    let mut buf = Vec::new();
    let mut saw_sheet_data = false;
    let mut current_row: Option<RawRow> = None;
    let mut cell: Option<PendingCell> = None;
    let mut target = TextTarget::None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"sheetData" => saw_sheet_data = true,
                b"row" => current_row = Some(RawRow::default()),
                b"c" => cell = Some(PendingCell::from_element(e)),
                b"v" if cell.is_some() => target = TextTarget::Value,
                b"t" if cell.is_some() => target = TextTarget::Inline,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"sheetData" => saw_sheet_data = true,
                b"row" => rows.push(RawRow::default()),
                b"c" => {
                    if let Some(row) = current_row.as_mut() {
                        row.cells.push(PendingCell::from_element(e).finish());
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some(text) = cell.as_mut().and_then(|c| c.text_mut(target)) {
                    text.push_str(&unescape_xml(&String::from_utf8_lossy(e.as_ref())));
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if let Some(text) = cell.as_mut().and_then(|c| c.text_mut(target)) {
                    push_entity(text, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"v" | b"t" => target = TextTarget::None,
                b"c" => {
                    if let (Some(done), Some(row)) = (cell.take(), current_row.as_mut()) {
                        row.cells.push(done.finish());
                    }
                    target = TextTarget::None;
                }
                b"row" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "worksheet XML parse error at byte {}: {e}",
                    reader.buffer_position()
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_sheet_data {
        return Err("worksheet has no sheetData element".to_string());
    }
    Ok(rows)
}

// =============================================================================
// XML entities
// =============================================================================

/// Character for a predefined or numeric XML entity name (`amp`, `#38`, `#x26`).
fn entity_char(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

fn push_entity(out: &mut String, name: &str) {
    match entity_char(name) {
        Some(ch) => out.push(ch),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
    }
}

/// Decode entity references left in a text run. Unknown entities stay literal.
fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';') {
            Some(semi) => {
                push_entity(&mut out, &after[..semi]);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
