//! Two-column (`data`, `label`) batch files.
//!
//! Cells are split on raw commas: quoted fields and embedded commas are not
//! supported.

use tracing::{error, warn};

use crate::barcode::{encode, EncodedCode};
use crate::error::LabelError;
use crate::symbology::Symbology;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Line index in the source file (the header is line 0).
    pub id: usize,
    pub data: String,
    pub label: String,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub item: BatchItem,
    pub result: Result<EncodedCode, LabelError>,
}

pub fn parse_batch(text: &str) -> Result<Vec<BatchItem>, LabelError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let headers: Vec<&str> = lines[0].split(',').map(str::trim).collect();

    let data_col = headers.iter().position(|h| *h == "data");
    let label_col = headers.iter().position(|h| *h == "label");
    let (data_col, label_col) = match (data_col, label_col) {
        (Some(d), Some(l)) => (d, l),
        _ => return Err(LabelError::MissingColumns),
    };

    let mut items = Vec::new();
    for (id, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        if values.len() < 2 {
            warn!(line = id, "skipping row with fewer than two cells");
            continue;
        }
        match (values.get(data_col), values.get(label_col)) {
            (Some(data), Some(label)) => items.push(BatchItem {
                id,
                data: data.to_string(),
                label: label.to_string(),
            }),
            _ => warn!(line = id, "skipping row missing data or label cell"),
        }
    }
    Ok(items)
}

/// Encode every row; a failed row is logged and reported, never fatal.
pub fn encode_batch(items: &[BatchItem], symbology: Symbology) -> Vec<BatchOutcome> {
    items
        .iter()
        .map(|item| {
            let result = encode(&item.data, symbology);
            match &result {
                Err(e) if e.is_input_error() => {
                    warn!(line = item.id, data = %item.data, error = %e, "row skipped")
                }
                Err(e) => error!(line = item.id, error = %e, "row failed"),
                Ok(_) => {}
            }
            BatchOutcome {
                item: item.clone(),
                result,
            }
        })
        .collect()
}
