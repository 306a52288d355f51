//! Job files on disk.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::barcode::EncodedCode;
use crate::builder::BatchLabel;
use crate::error::LabelError;
use crate::symbology::Symbology;

/// Longest code part of a file name; longer codes keep a prefix plus a hash tag.
pub const MAX_NAME_PART: usize = 64;
const HASH_TAG_LEN: usize = 8;

fn prefix(code: &EncodedCode) -> &'static str {
    if code.symbology == Symbology::Qr {
        "qrcode"
    } else {
        "barcode"
    }
}

fn name_part(code: &EncodedCode) -> String {
    let full = code.full_code();
    let safe: String = full
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.len() <= MAX_NAME_PART {
        return safe;
    }
    let digest = Sha256::digest(full.as_bytes());
    let tag: String = digest[..HASH_TAG_LEN / 2]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    // `safe` is ASCII, so any byte index is a char boundary
    format!("{}-{}", &safe[..MAX_NAME_PART - HASH_TAG_LEN - 1], tag)
}

/// File name for a saved job, e.g. `barcode-4006381333931.epl`.
pub fn job_file_name(code: &EncodedCode) -> String {
    format!("{}-{}.epl", prefix(code), name_part(code))
}

/// File name for a batch row's job, e.g. `barcode-3-4006381333931.epl`.
pub fn batch_job_file_name(label: &BatchLabel) -> String {
    format!("{}-{}-{}.epl", prefix(&label.code), label.item.id, name_part(&label.code))
}

/// Write one file per label into `dir`; returns how many were written.
///
/// A row that cannot be written is logged and skipped.
pub fn write_batch_jobs(labels: &[BatchLabel], dir: &Path) -> Result<usize, LabelError> {
    fs::create_dir_all(dir)?;
    let mut written = 0;
    for label in labels {
        let path = dir.join(batch_job_file_name(label));
        match fs::write(&path, &label.job) {
            Ok(()) => {
                debug!(line = label.item.id, path = %path.display(), "job written");
                written += 1;
            }
            Err(e) => warn!(
                line = label.item.id,
                path = %path.display(),
                error = %e,
                "job not written"
            ),
        }
    }
    Ok(written)
}
