//! Batch file → label jobs on disk.

use std::fs;
use std::path::Path;

use barcode_label::{
    batch_job_file_name, build_batch_jobs, encode_batch, parse_batch, write_batch_jobs,
    BatchLabel, LabelConfig, Symbology,
};

const SHEET: &str = "data,label\n\
                     036000291452,Soda\n\
                     ,Empty\n\
                     \n\
                     12345,Gum\n";

fn labels_for(text: &str, symbology: Symbology) -> Vec<BatchLabel> {
    let items = parse_batch(text).unwrap();
    build_batch_jobs(encode_batch(&items, symbology), LabelConfig::default(), None)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn one_job_per_good_row() {
    let items = parse_batch(SHEET).unwrap();
    assert_eq!(items.len(), 3);

    let outcomes = encode_batch(&items, Symbology::Upc);
    assert!(outcomes[1].result.is_err());

    let labels = build_batch_jobs(outcomes, LabelConfig::default(), None);
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].item.label, "Soda");
    assert_eq!(labels[0].code.full_code(), "036000291452");
    assert_eq!(labels[1].code.full_code(), "000000123457");

    for label in &labels {
        let text = String::from_utf8(label.job.clone()).unwrap();
        assert!(text.starts_with("N\r\n"));
        assert!(text.ends_with("P1\r\n"));
        assert!(text.contains(&format!("N,\"{}\"", label.item.label)));
        assert!(text.contains(&format!(",UA0,2,6,50,B,\"{}\"", label.code.data)));
    }
}

#[test]
fn jobs_are_named_by_line_and_code() {
    let dir = tempfile::tempdir().unwrap();
    let labels = labels_for("label,data\nHello,hello world\nBye,bye\n", Symbology::Qr);

    assert_eq!(write_batch_jobs(&labels, dir.path()).unwrap(), 2);
    assert_eq!(file_names(dir.path()), vec!["qrcode-1-hello_world.epl", "qrcode-2-bye.epl"]);
}

#[test]
fn rows_with_the_same_code_keep_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let labels = labels_for("data,label\n123,Apple\n123,Pear\n", Symbology::Code128);

    assert_eq!(write_batch_jobs(&labels, dir.path()).unwrap(), 2);
    assert_eq!(file_names(dir.path()), vec!["barcode-1-123.epl", "barcode-2-123.epl"]);
    let apple = fs::read_to_string(dir.path().join("barcode-1-123.epl")).unwrap();
    assert!(apple.contains("\"Apple\""));
}

#[test]
fn very_long_rows_are_still_written() {
    let dir = tempfile::tempdir().unwrap();
    let sheet = format!("data,label\nfirst,A\n{},Long\nlast,C\n", "x".repeat(300));
    let labels = labels_for(&sheet, Symbology::Qr);
    assert_eq!(labels.len(), 3);

    assert_eq!(write_batch_jobs(&labels, dir.path()).unwrap(), 3);
    let names = file_names(dir.path());
    assert_eq!(names.len(), 3);
    assert!(names.iter().all(|n| n.len() < 100));
    assert!(names.contains(&"qrcode-1-first.epl".to_string()));
    assert!(names.contains(&"qrcode-3-last.epl".to_string()));
}

#[test]
fn a_row_that_cannot_be_written_does_not_stop_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let labels = labels_for("data,label\nA1,One\nB2,Two\nC3,Three\n", Symbology::Code39);

    // a directory in the way of the middle row's file
    fs::create_dir(dir.path().join(batch_job_file_name(&labels[1]))).unwrap();

    assert_eq!(write_batch_jobs(&labels, dir.path()).unwrap(), 2);
    assert!(dir.path().join("barcode-1-A1.epl").is_file());
    assert!(dir.path().join("barcode-3-C3.epl").is_file());
}

#[test]
fn invalid_font_skips_rows_instead_of_failing() {
    let items = parse_batch("data,label\nABC,First\n").unwrap();
    let labels = build_batch_jobs(
        encode_batch(&items, Symbology::Code39),
        LabelConfig::default(),
        Some(&b"definitely not a font"[..]),
    );
    assert!(labels.is_empty());
}
