//! Retail barcode labels for EPL2 thermal printers (203 dpi).
//! - Normalizes user input and appends GS1 check digits (EAN-13, UPC-A)
//! - Validates pass-through data for CODE128 / CODE39 / QR
//! - Reads two-column `data,label` batch files row by row
//! - Builds EPL2 jobs: native 1-D barcodes, rasterized QR, captions in the
//!   resident font or a TrueType font (Arabic shaping + BiDi)

pub mod barcode;
pub mod batch;
pub mod builder;
pub mod consts;
pub mod epl;
pub mod error;
pub mod export;
pub mod graphics;
pub mod printer;
pub mod symbology;

pub use barcode::{check_digit, encode, is_valid, normalize, EncodedCode};
pub use batch::{encode_batch, parse_batch, BatchItem, BatchOutcome};
pub use builder::{build_batch_jobs, BatchLabel, LabelConfig, LabelJob};
pub use error::LabelError;
pub use export::{batch_job_file_name, job_file_name, write_batch_jobs};
pub use printer::send_raw_to_printer;
pub use symbology::Symbology;
