// Label and printer tuning constants (203 dpi)
pub const LABEL_W: u32 = 440;    // dots (≈55 mm)
pub const LABEL_H: u32 = 320;    // dots (≈40 mm)
pub const LABEL_GAP: u32 = 24;   // gap between labels

pub const FONT_PX: f32 = 36.0;   // caption raster size
pub const DARKNESS: u8 = 8;      // D0..D15
pub const SPEED: u8 = 2;         // S1..S6

pub const NARROW: u32 = 2;       // 1-D module width (2–3)
pub const WIDE: u32 = 3;         // wide bar ratio for CODE39
pub const HEIGHT: u32 = 50;      // bar height
pub const QR_MODULE: u32 = 4;    // dots per QR module

pub const MARGIN: u32 = 10;      // top/left padding

pub const FORCE_LANDSCAPE: bool = false; // rotate content in code if driver prints landscape
pub const INVERT_BITS: bool = true;      // flip GW bits → black on white

// Symbology data lengths (without check digit)
pub const EAN13_DATA_LEN: usize = 12;
pub const UPC_DATA_LEN: usize = 11;
