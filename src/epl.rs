use image::GrayImage;

/// Helper to append an EPL ASCII command line terminated with CRLF
pub fn epl_line(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

/// Escape a value for use inside a quoted EPL data field.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Convert a 1-bit image (Luma 0=black, 255=white) into row-packed bytes.
/// Returns (width, height, rows)
pub fn image_to_row_bytes(img: &GrayImage, invert: bool) -> (u32, u32, Vec<u8>) {
    let w = img.width();
    let h = img.height();
    let bpr = ((w + 7) / 8) as usize;
    let mut out = vec![0u8; bpr * h as usize];

    for y in 0..h as usize {
        for x in 0..w as usize {
            let black = img.get_pixel(x as u32, y as u32).0[0] < 128;
            if black {
                let idx = y * bpr + (x / 8);
                out[idx] |= 1 << (7 - (x % 8));
            }
        }
    }
    if invert {
        for b in &mut out {
            *b = !*b;
        }
    }
    (w, h, out)
}

/// Append GW header + raw binary rows + CRLF
pub fn gw_bytes(buf: &mut Vec<u8>, x: u32, y: u32, w: u32, h: u32, rows: &[u8]) {
    let bpr = ((w + 7) / 8) as usize;
    epl_line(buf, &format!("GW{},{},{},{}", x, y, bpr, h));
    buf.extend_from_slice(rows);
    buf.extend_from_slice(b"\r\n");
}
