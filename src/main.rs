//! barcode-label - encode retail barcodes and write EPL2 label jobs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use barcode_label::{
    build_batch_jobs, encode, encode_batch, parse_batch, send_raw_to_printer, write_batch_jobs,
    LabelConfig, LabelJob, Symbology,
};

#[derive(Parser)]
#[command(name = "barcode-label", version, about = "Retail barcode label generator")]
struct Cli {
    /// Printer darkness (0-15)
    #[arg(long, global = true)]
    darkness: Option<u8>,

    /// Print speed (1-6)
    #[arg(long, global = true)]
    speed: Option<u8>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode one value and optionally write or print its label
    Encode {
        data: String,
        #[arg(short = 't', long = "type", default_value = "CODE128")]
        symbology: Symbology,
        /// Caption printed above the barcode
        #[arg(long)]
        label: Option<String>,
        /// TrueType font for the caption
        #[arg(long)]
        font: Option<PathBuf>,
        /// Write the EPL job to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Send the job to this printer (Windows)
        #[arg(long)]
        printer: Option<String>,
    },
    /// Encode every row of a `data,label` file
    Batch {
        file: PathBuf,
        #[arg(short = 't', long = "type", default_value = "CODE128")]
        symbology: Symbology,
        #[arg(long)]
        font: Option<PathBuf>,
        /// Directory for one job file per row
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        printer: Option<String>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = LabelConfig::default();
    if let Some(d) = cli.darkness {
        config = config.with_darkness(d);
    }
    if let Some(s) = cli.speed {
        config = config.with_speed(s);
    }

    match cli.command {
        Command::Encode {
            data,
            symbology,
            label,
            font,
            out,
            printer,
        } => {
            let code = encode(&data, symbology)
                .with_context(|| format!("cannot encode {:?} as {}", data, symbology))?;
            println!("{}", code);

            if out.is_none() && printer.is_none() {
                return Ok(());
            }
            let font_bytes = read_font(font.as_deref())?;
            let mut job = LabelJob::new(config, &code);
            if let Some(text) = label.as_deref() {
                job = job.caption(text);
            }
            if let Some(f) = font_bytes.as_deref() {
                job = job.font(f);
            }
            let bytes = job.finish()?;

            if let Some(path) = out {
                fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
                info!("wrote {}", path.display());
            }
            if let Some(name) = printer {
                send_raw_to_printer(&name, &bytes)?;
            }
        }
        Command::Batch {
            file,
            symbology,
            font,
            out_dir,
            printer,
        } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let items = parse_batch(&text)?;
            let outcomes = encode_batch(&items, symbology);
            for o in &outcomes {
                match &o.result {
                    Ok(code) => println!("{}\tok\t{}\t{}", o.item.id, code, o.item.label),
                    Err(e) => println!("{}\tskipped\t{}", o.item.id, e),
                }
            }

            if out_dir.is_none() && printer.is_none() {
                return Ok(());
            }
            let font_bytes = read_font(font.as_deref())?;
            let labels = build_batch_jobs(outcomes, config, font_bytes.as_deref());
            info!("{} of {} rows produced labels", labels.len(), items.len());

            if let Some(dir) = &out_dir {
                let written = write_batch_jobs(&labels, dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
                info!(
                    "wrote {} of {} jobs to {} ({} failed)",
                    written,
                    labels.len(),
                    dir.display(),
                    labels.len() - written
                );
            }
            if let Some(name) = &printer {
                let mut sent = 0;
                for label in &labels {
                    match send_raw_to_printer(name, &label.job) {
                        Ok(()) => sent += 1,
                        Err(e) => warn!(line = label.item.id, error = %e, "job not printed"),
                    }
                }
                info!(
                    "sent {} of {} jobs to {} ({} failed)",
                    sent,
                    labels.len(),
                    name,
                    labels.len() - sent
                );
            }
        }
    }
    Ok(())
}

fn read_font(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    path.map(|p| fs::read(p).with_context(|| format!("reading font {}", p.display())))
        .transpose()
}
