use tracing::{debug, warn};

use crate::barcode::EncodedCode;
use crate::batch::{BatchItem, BatchOutcome};
use crate::consts::*;
use crate::epl::{epl_line, gw_bytes, image_to_row_bytes, quote};
use crate::error::LabelError;
use crate::graphics::{render_caption_1bit, render_qr_1bit, rotate90};
use crate::symbology::Symbology;

const EAN_UPC_MODULES: u32 = 95;
const BUILTIN_FONT: u8 = 3; // EPL resident font 3 (14x22 dots)
const BUILTIN_FONT_H: u32 = 22;
const LINE_SPACING: u32 = 8;

/// Printer and layout settings for one label job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelConfig {
    pub width: u32,
    pub height: u32,
    pub gap: u32,
    pub darkness: u8,
    pub speed: u8,
    pub narrow: u32,
    pub wide_ratio: u32,
    pub bar_height: u32,
    pub font_px: f32,
    pub qr_module: u32,
    pub margin: u32,
    pub landscape: bool,
    pub invert_bits: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            width: LABEL_W,
            height: LABEL_H,
            gap: LABEL_GAP,
            darkness: DARKNESS,
            speed: SPEED,
            narrow: NARROW,
            wide_ratio: WIDE,
            bar_height: HEIGHT,
            font_px: FONT_PX,
            qr_module: QR_MODULE,
            margin: MARGIN,
            landscape: FORCE_LANDSCAPE,
            invert_bits: INVERT_BITS,
        }
    }
}

impl LabelConfig {
    pub fn with_darkness(mut self, darkness: u8) -> Self {
        self.darkness = darkness.min(15);
        self
    }

    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed.clamp(1, 6);
        self
    }
}

/// EPL2 barcode selector for the 1-D symbologies.
pub fn epl_selector(symbology: Symbology) -> Option<&'static str> {
    match symbology {
        Symbology::Code128 => Some("1"),
        Symbology::Code39 => Some("3"),
        Symbology::Ean13 => Some("E30"),
        Symbology::Upc => Some("UA0"),
        Symbology::Qr => None,
    }
}

fn center_x(label_w: u32, content_w: u32, margin: u32) -> u32 {
    if content_w >= label_w {
        return 0;
    }
    ((label_w - content_w) / 2).max(margin.min(label_w - content_w))
}

/// One printable label: optional caption lines above a barcode.
pub struct LabelJob<'a> {
    config: LabelConfig,
    code: &'a EncodedCode,
    caption: Option<&'a str>,
    font: Option<&'a [u8]>,
}

impl<'a> LabelJob<'a> {
    pub fn new(config: LabelConfig, code: &'a EncodedCode) -> Self {
        Self {
            config,
            code,
            caption: None,
            font: None,
        }
    }

    /// Caption text; each line of a multi-line caption is printed on its own row.
    pub fn caption(mut self, text: &'a str) -> Self {
        if !text.trim().is_empty() {
            self.caption = Some(text);
        }
        self
    }

    /// TrueType bytes for the caption; without them the printer's resident font is used.
    pub fn font(mut self, font_bytes: &'a [u8]) -> Self {
        self.font = Some(font_bytes);
        self
    }

    pub fn finish(self) -> Result<Vec<u8>, LabelError> {
        let cfg = &self.config;
        let mut buf = Vec::new();
        epl_line(&mut buf, "N");
        epl_line(&mut buf, &format!("q{}", cfg.width));
        epl_line(&mut buf, &format!("Q{},{}", cfg.height, cfg.gap));
        epl_line(&mut buf, &format!("D{}", cfg.darkness));
        epl_line(&mut buf, &format!("S{}", cfg.speed));

        let mut y = cfg.margin;
        if let Some(text) = self.caption {
            for line in text.lines().filter(|l| !l.trim().is_empty()) {
                y += self.put_caption_line(&mut buf, line.trim_end(), y)? + LINE_SPACING;
            }
        }
        self.put_barcode(&mut buf, y)?;

        epl_line(&mut buf, "P1");
        debug!(symbology = %self.code.symbology, bytes = buf.len(), "label job assembled");
        Ok(buf)
    }

    // Returns the line height in dots.
    fn put_caption_line(&self, buf: &mut Vec<u8>, text: &str, y: u32) -> Result<u32, LabelError> {
        let cfg = &self.config;
        let Some(font_bytes) = self.font else {
            let (x, yy, rot) = if cfg.landscape {
                (y, cfg.margin, 1)
            } else {
                (cfg.margin, y, 0)
            };
            let cmd = format!("A{},{},{},{},1,1,N,{}", x, yy, rot, BUILTIN_FONT, quote(text));
            epl_line(buf, &cmd);
            return Ok(BUILTIN_FONT_H);
        };

        let mut img = render_caption_1bit(text, font_bytes, cfg.font_px, 3)?;
        if cfg.landscape {
            img = rotate90(&img);
        }
        let (w, h, rows) = image_to_row_bytes(&img, cfg.invert_bits);
        let x = center_x(cfg.width, w, cfg.margin);
        if cfg.landscape {
            gw_bytes(buf, y, x, w, h, &rows);
            Ok(w)
        } else {
            gw_bytes(buf, x, y, w, h, &rows);
            Ok(h)
        }
    }

    fn put_barcode(&self, buf: &mut Vec<u8>, y: u32) -> Result<(), LabelError> {
        let cfg = &self.config;
        let code = self.code;
        let Some(selector) = epl_selector(code.symbology) else {
            let mut img = render_qr_1bit(&code.data, cfg.qr_module)?;
            if cfg.landscape {
                img = rotate90(&img);
            }
            let (w, h, rows) = image_to_row_bytes(&img, cfg.invert_bits);
            let x = center_x(cfg.width, w, cfg.margin);
            if cfg.landscape {
                gw_bytes(buf, y, x, w, h, &rows);
            } else {
                gw_bytes(buf, x, y, w, h, &rows);
            }
            return Ok(());
        };

        // EAN/UPC take the data digits; the printer appends the same check digit.
        let x = match code.symbology {
            Symbology::Ean13 | Symbology::Upc => {
                center_x(cfg.width, EAN_UPC_MODULES * cfg.narrow, cfg.margin)
            }
            _ => cfg.margin,
        };
        let (bx, by, rot) = if cfg.landscape { (y, x, 1) } else { (x, y, 0) };
        let cmd = format!(
            "B{},{},{},{},{},{},{},B,{}",
            bx,
            by,
            rot,
            selector,
            cfg.narrow,
            cfg.narrow * cfg.wide_ratio,
            cfg.bar_height,
            quote(&code.data)
        );
        epl_line(buf, &cmd);
        Ok(())
    }
}

/// Label bytes for one successfully encoded batch row.
#[derive(Debug)]
pub struct BatchLabel {
    pub item: BatchItem,
    pub code: EncodedCode,
    pub job: Vec<u8>,
}

/// Build one job per encoded row, captioned with the row's label.
pub fn build_batch_jobs(
    outcomes: Vec<BatchOutcome>,
    config: LabelConfig,
    font: Option<&[u8]>,
) -> Vec<BatchLabel> {
    let mut labels = Vec::new();
    for BatchOutcome { item, result } in outcomes {
        let Ok(code) = result else { continue };
        let mut job = LabelJob::new(config, &code).caption(&item.label);
        if let Some(f) = font {
            job = job.font(f);
        }
        match job.finish() {
            Ok(bytes) => labels.push(BatchLabel {
                item,
                code,
                job: bytes,
            }),
            Err(e) => warn!(line = item.id, error = %e, "label not built"),
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::encode;

    fn lines(job: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(job)
            .split("\r\n")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn ean13_job_has_header_barcode_and_print() {
        let code = encode("400638133393", Symbology::Ean13).unwrap();
        let job = LabelJob::new(LabelConfig::default(), &code)
            .finish()
            .unwrap();
        let l = lines(&job);
        assert_eq!(&l[..5], &["N", "q440", "Q320,24", "D8", "S2"]);
        assert_eq!(l[5], "B125,10,0,E30,2,6,50,B,\"400638133393\"");
        assert_eq!(l[6], "P1");
    }

    #[test]
    fn builtin_caption_pushes_barcode_down() {
        let code = encode("ABC-1", Symbology::Code39).unwrap();
        let job = LabelJob::new(LabelConfig::default(), &code)
            .caption("Say \"hi\"")
            .finish()
            .unwrap();
        let l = lines(&job);
        assert_eq!(l[5], "A10,10,0,3,1,1,N,\"Say \\\"hi\\\"\"");
        assert_eq!(l[6], "B10,40,0,3,2,6,50,B,\"ABC-1\"");
    }

    #[test]
    fn multi_line_caption_prints_every_line() {
        let code = encode("ABC-1", Symbology::Code39).unwrap();
        let job = LabelJob::new(LabelConfig::default(), &code)
            .caption("Apple\r\n\nRed, 1kg\n")
            .finish()
            .unwrap();
        let l = lines(&job);
        assert_eq!(l[5], "A10,10,0,3,1,1,N,\"Apple\"");
        assert_eq!(l[6], "A10,40,0,3,1,1,N,\"Red, 1kg\"");
        assert_eq!(l[7], "B10,70,0,3,2,6,50,B,\"ABC-1\"");
        assert_eq!(l[8], "P1");
    }

    #[test]
    fn blank_caption_is_ignored() {
        let code = encode("12345", Symbology::Upc).unwrap();
        let job = LabelJob::new(LabelConfig::default(), &code)
            .caption("  ")
            .finish()
            .unwrap();
        assert!(lines(&job)[5].starts_with("B125,10,0,UA0,"));
    }

    #[test]
    fn qr_is_sent_as_graphic() {
        let code = encode("hello", Symbology::Qr).unwrap();
        let job = LabelJob::new(LabelConfig::default(), &code)
            .finish()
            .unwrap();
        let text = String::from_utf8_lossy(&job);
        assert!(text.contains("\r\nGW"));
        assert!(job.ends_with(b"P1\r\n"));
    }

    #[test]
    fn landscape_swaps_coordinates() {
        let cfg = LabelConfig {
            landscape: true,
            ..LabelConfig::default()
        };
        let code = encode("X1", Symbology::Code128).unwrap();
        let job = LabelJob::new(cfg, &code).finish().unwrap();
        assert_eq!(lines(&job)[5], "B10,10,1,1,2,6,50,B,\"X1\"");
    }

    #[test]
    fn config_overrides_are_clamped() {
        let cfg = LabelConfig::default().with_darkness(40).with_speed(0);
        assert_eq!((cfg.darkness, cfg.speed), (15, 1));
    }
}
