use ar_reshaper::{ArabicReshaper, ReshaperConfig};
use image::{DynamicImage, GrayImage, Luma};
use qrcode::{Color, QrCode};
use rusttype::{point, Font, Scale};
use unicode_bidi::BidiInfo;

use crate::error::LabelError;

/// Return visually ordered string with Arabic runs reshaped, LTR runs unchanged.
/// This keeps numbers LTR and Arabic RTL, then we can render visually left→right.
/// Each BiDi paragraph is reordered on its own; paragraphs are joined with `\n`.
pub fn bidi_then_shape(text: &str, reshaper: &ArabicReshaper) -> String {
    let info = BidiInfo::new(text, None);

    let mut lines = Vec::with_capacity(info.paragraphs.len());
    for para in &info.paragraphs {
        let (levels, ranges) = info.visual_runs(para, para.range.clone());
        let mut out = String::new();
        // `levels` is per byte; a run's level is the level of its first byte
        for range in ranges {
            let rtl = levels[range.start].is_rtl();
            let slice = &text[range];
            if rtl {
                // reshape, then reverse into visual left→right order
                out.extend(reshaper.reshape(slice).chars().rev());
            } else {
                out.push_str(slice); // keep LTR (e.g., SKUs)
            }
        }
        lines.push(out.trim_matches(|c: char| c == '\n' || c == '\r').to_string());
    }
    lines.join("\n")
}

/// Render one caption line as a tight 1-bit image.
pub fn render_caption_1bit(
    text: &str,
    font_bytes: &[u8],
    font_px: f32,
    pad_lr: u32,
) -> Result<GrayImage, LabelError> {
    let font = Font::try_from_bytes(font_bytes)
        .ok_or_else(|| LabelError::Font("unsupported or corrupt font data".into()))?;
    let reshaper = ArabicReshaper::new(ReshaperConfig::default());
    let visual = bidi_then_shape(text, &reshaper);

    let scale = Scale {
        x: font_px,
        y: font_px,
    };
    let vm = font.v_metrics(scale);
    let ascent = vm.ascent.ceil();
    let descent = vm.descent.floor();
    let line_h = (ascent - descent).ceil().max(1.0) as u32;

    // Measure tight width
    let text_w = font
        .layout(&visual, scale, point(0.0, ascent))
        .filter_map(|g| g.pixel_bounding_box().map(|bb| bb.max.x))
        .max()
        .unwrap_or(0)
        .max(0) as u32;

    let w = (text_w + pad_lr * 2).max(2);
    let mut img = GrayImage::from_pixel(w, line_h, Luma([255u8]));

    // Hard threshold to avoid gray.
    for g in font.layout(&visual, scale, point(pad_lr as f32, ascent)) {
        if let Some(bb) = g.pixel_bounding_box() {
            g.draw(|x, y, v| {
                if v > 0.5 {
                    let px = x as i32 + bb.min.x;
                    let py = y as i32 + bb.min.y;
                    if px >= 0 && py >= 0 && (px as u32) < w && (py as u32) < line_h {
                        img.put_pixel(px as u32, py as u32, Luma([0]));
                    }
                }
            });
        }
    }

    Ok(img)
}

/// Rasterize `data` as a QR symbol, `module` dots per module, with a 4-module quiet zone.
pub fn render_qr_1bit(data: &str, module: u32) -> Result<GrayImage, LabelError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| LabelError::QrEncode(e.to_string()))?;
    let colors = code.to_colors();
    let count = code.width() as u32;
    let module = module.max(1);
    let quiet = 4 * module;
    let size = count * module + quiet * 2;

    let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x = (i as u32) % count;
        let y = (i as u32) / count;
        for dy in 0..module {
            for dx in 0..module {
                img.put_pixel(quiet + x * module + dx, quiet + y * module + dy, Luma([0u8]));
            }
        }
    }
    Ok(img)
}

/// Rotate 90 degrees clockwise to compensate for driver-locked landscape orientation.
pub fn rotate90(img: &GrayImage) -> GrayImage {
    DynamicImage::ImageLuma8(img.clone()).rotate90().to_luma8()
}
