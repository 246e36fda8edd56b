//! Reading a delimited file into decoded header and row strings.
//!
//! The delimiter follows the file extension (`.tsv` is tab separated, anything
//! else is comma separated) unless one is given on the command line. Bytes are
//! decoded through `encoding_rs`, UTF-8 unless another label is supplied.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow, bail};
use encoding_rs::{Encoding, UTF_8};

pub const COMMA: u8 = b',';
pub const TAB: u8 = b'\t';

/// Header names plus every data row, decoded but otherwise untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'")),
        None => Ok(UTF_8),
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    if let Some(delimiter) = provided {
        return delimiter;
    }
    let is_tsv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
    if is_tsv { TAB } else { COMMA }
}

/// Reads the whole file at `path`. Short rows are kept as they are; a row with
/// more fields than the header is an error naming its 1-based line.
pub fn read_table(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<RawTable> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    read_table_from(BufReader::new(file), delimiter, encoding)
        .with_context(|| format!("Reading {path:?}"))
}

fn read_table_from<R: Read>(
    reader: R,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);
    let headers = decode_fields(reader.byte_headers().context("Reading header row")?, encoding)
        .context("Decoding header row")?;

    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let line = idx + 2;
        let record = record.with_context(|| format!("Reading row {line}"))?;
        if record.len() > headers.len() {
            bail!(
                "Row {line} has {} fields but the header has {}",
                record.len(),
                headers.len()
            );
        }
        let fields =
            decode_fields(&record, encoding).with_context(|| format!("Decoding row {line}"))?;
        rows.push(fields);
    }
    Ok(RawTable { headers, rows })
}

fn decode_fields(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| {
            let (text, _, had_errors) = encoding.decode(field);
            if had_errors {
                Err(anyhow!("Invalid {} byte sequence", encoding.name()))
            } else {
                Ok(text.into_owned())
            }
        })
        .collect()
}
