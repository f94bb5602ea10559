use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::sheet;

pub const DEFAULT_BASE_URL: &str = "https://koktem.kz/";

const UTM_SUFFIX: &str = "?utm_source=google&utm_medium=cpc&utm_campaign={campaignid}&utm_content={adgroupid}&utm_term={keyword}";

const HEADER_MARKERS: [&str; 3] = ["campaign", "headline 1", "adgoup"];

/// Editor import columns, in output order.
pub const OUTPUT_FIELDS: [&str; 10] = [
    "Campaign",
    "Ad group",
    "Keyword",
    "Headline 1",
    "Headline 2",
    "Headline 3",
    "Description 1",
    "Description 2",
    "Max CPC",
    "Final URL",
];

/// Source template headers, matched as case-insensitive substrings, in
/// `OUTPUT_FIELDS` order. "Adgoup" is the template's own spelling.
const SOURCE_COLUMNS: [&str; 10] = [
    "Campaign",
    "Adgoup",
    "Фраза (с минус-словами)",
    "Headline 1",
    "Headline 2",
    "Headline 3",
    "Description 1",
    "Description 2",
    "MAX CPC",
    "Ссылка",
];

#[derive(Clone, Debug, PartialEq)]
pub struct ConvertOptions {
    pub base_url: String,
    /// Applied in order to every cell, before any per-column cleanup.
    pub replacements: Vec<(String, String)>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            replacements: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    Almaty,
    Tashkent,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Almaty, Preset::Tashkent];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Almaty => "almaty",
            Preset::Tashkent => "tashkent",
        }
    }

    pub fn options(self) -> ConvertOptions {
        match self {
            Preset::Almaty => ConvertOptions {
                base_url: "https://kz.henrybonnar.com/".to_string(),
                replacements: Vec::new(),
            },
            Preset::Tashkent => ConvertOptions {
                base_url: "https://uz.henrybonnar.com/".to_string(),
                replacements: [
                    ("Алматы", "Ташкент"),
                    ("Алматыда", "Ташкентте"),
                    ("almaty", "tashkent"),
                    ("Almaty", "Tashkent"),
                ]
                .into_iter()
                .map(|(old, new)| (old.to_string(), new.to_string()))
                .collect(),
            },
        }
    }

    pub fn output_file_name(self) -> String {
        format!("google_ads_{}.csv", self.name())
    }
}

/// Column index for each output field; `None` when the template lacks it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnMap {
    indices: [Option<usize>; OUTPUT_FIELDS.len()],
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (slot, source) in SOURCE_COLUMNS.iter().enumerate() {
            let source = source.to_lowercase();
            // Later columns win when several headers match.
            for (idx, name) in header.iter().enumerate() {
                if name.to_lowercase().contains(&source) {
                    map.indices[slot] = Some(idx);
                }
            }
        }
        map
    }

    pub fn index(&self, field: &str) -> Option<usize> {
        OUTPUT_FIELDS
            .iter()
            .position(|f| *f == field)
            .and_then(|slot| self.indices[slot])
    }
}

/// Finds the first row that looks like the template header. Returns its
/// position and the column map built from it.
pub fn find_header(rows: &[Vec<String>]) -> Result<(usize, ColumnMap)> {
    rows.iter()
        .position(|row| {
            let joined = row.join(" ").to_lowercase();
            HEADER_MARKERS.iter().any(|marker| joined.contains(marker))
        })
        .map(|idx| (idx, ColumnMap::from_header(&rows[idx])))
        .ok_or(ImportError::HeaderNotFound)
}

fn final_url(value: &str, base_url: &str) -> String {
    let mut url = if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        base_url.to_string()
    } else {
        value.to_string()
    };

    if !url.starts_with("http") {
        url = if url.contains('.') {
            format!("https://{}", url)
        } else {
            base_url.to_string()
        };
    }

    if !url.contains('?') {
        url.push_str(UTM_SUFFIX);
    }
    url
}

pub fn convert_row(row: &[String], map: &ColumnMap, options: &ConvertOptions) -> Vec<String> {
    OUTPUT_FIELDS
        .iter()
        .map(|&field| {
            let mut value = map
                .index(field)
                .and_then(|idx| row.get(idx))
                .map(|cell| cell.trim().to_string())
                .unwrap_or_default();

            for (old, new) in &options.replacements {
                value = value.replace(old.as_str(), new);
            }

            match field {
                "Keyword" => value.trim_matches('"').to_string(),
                "Max CPC" => value.replace(',', "."),
                "Final URL" => final_url(&value, &options.base_url),
                _ => value,
            }
        })
        .collect()
}

/// Converts every data row below the header, skipping rows with no content.
pub fn convert_rows(rows: &[Vec<String>], options: &ConvertOptions) -> Result<Vec<Vec<String>>> {
    let (header_idx, map) = find_header(rows)?;
    debug!("Header found on row {}: {:?}", header_idx + 1, map);

    Ok(rows[header_idx + 1..]
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .map(|row| convert_row(row, &map, options))
        .collect())
}

/// Reads `input`, converts it and writes the Editor CSV to `output`.
/// Returns the number of ad rows written.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> Result<usize> {
    if !input.exists() {
        return Err(ImportError::NotFound(input.to_path_buf()));
    }
    let rows = sheet::read_rows(&fs::read(input)?)?;
    let converted = convert_rows(&rows, options)?;

    let file = fs::File::create(output)?;
    sheet::write_rows(std::io::BufWriter::new(file), &OUTPUT_FIELDS, &converted)?;

    info!(
        "Wrote {} rows to {} (base URL {})",
        converted.len(),
        output.display(),
        options.base_url
    );
    Ok(converted.len())
}
