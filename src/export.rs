//! CSV encoding of generated tables.
use crate::generator::Datasets;
use crate::models::{Credit, Title, CREDIT_COLUMNS, TITLE_COLUMNS};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const TITLES_FILE: &str = "titles.csv";
pub const CREDITS_FILE: &str = "credits.csv";

/// One encoded table ready to be saved or downloaded.
#[derive(Debug, Clone)]
pub struct EncodedTable {
    pub file_name: &'static str,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct EncodedDatasets {
    pub titles: EncodedTable,
    pub credits: EncodedTable,
}

pub fn encode_titles(titles: &[Title]) -> Result<Vec<u8>> {
    encode_records(&TITLE_COLUMNS, titles).context("Failed to encode titles table")
}

pub fn encode_credits(credits: &[Credit]) -> Result<Vec<u8>> {
    encode_records(&CREDIT_COLUMNS, credits).context("Failed to encode credits table")
}

pub fn decode_titles(bytes: &[u8]) -> Result<Vec<Title>> {
    decode_records(&TITLE_COLUMNS, bytes).context("Failed to decode titles table")
}

pub fn decode_credits(bytes: &[u8]) -> Result<Vec<Credit>> {
    decode_records(&CREDIT_COLUMNS, bytes).context("Failed to decode credits table")
}

pub fn encode_datasets(datasets: &Datasets) -> Result<EncodedDatasets> {
    Ok(EncodedDatasets {
        titles: EncodedTable {
            file_name: TITLES_FILE,
            rows: datasets.titles.len(),
            bytes: encode_titles(&datasets.titles)?,
        },
        credits: EncodedTable {
            file_name: CREDITS_FILE,
            rows: datasets.credits.len(),
            bytes: encode_credits(&datasets.credits)?,
        },
    })
}

fn encode_records<T: Serialize>(columns: &[&str], records: &[T]) -> Result<Vec<u8>> {
    // Header is written by hand so empty tables still carry it.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(columns)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))
}

fn decode_records<T: DeserializeOwned>(columns: &[&str], bytes: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader.headers()?.clone();
    if !headers.iter().eq(columns.iter().copied()) {
        anyhow::bail!("Unexpected CSV header: {:?}", headers);
    }
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(Into::into)
}
