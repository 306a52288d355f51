use std::fmt;
use std::str::FromStr;

use crate::consts::{EAN13_DATA_LEN, UPC_DATA_LEN};
use crate::error::LabelError;

/// Barcode encoding selected for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Qr,
    Code128,
    Ean13,
    Upc,
    Code39,
}

impl Symbology {
    pub const ALL: [Symbology; 5] = [
        Symbology::Qr,
        Symbology::Code128,
        Symbology::Ean13,
        Symbology::Upc,
        Symbology::Code39,
    ];

    /// Number of data digits before the check digit, for the numeric codes.
    pub fn data_length(self) -> Option<usize> {
        match self {
            Symbology::Ean13 => Some(EAN13_DATA_LEN),
            Symbology::Upc => Some(UPC_DATA_LEN),
            Symbology::Qr | Symbology::Code128 | Symbology::Code39 => None,
        }
    }

    pub fn has_check_digit(self) -> bool {
        self.data_length().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbology::Qr => "QR",
            Symbology::Code128 => "CODE128",
            Symbology::Ean13 => "EAN13",
            Symbology::Upc => "UPC",
            Symbology::Code39 => "CODE39",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QR" | "QRCODE" => Ok(Symbology::Qr),
            "CODE128" => Ok(Symbology::Code128),
            "EAN13" | "EAN-13" => Ok(Symbology::Ean13),
            "UPC" | "UPC-A" | "UPCA" => Ok(Symbology::Upc),
            "CODE39" => Ok(Symbology::Code39),
            _ => Err(LabelError::UnknownSymbology(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("ean-13".parse::<Symbology>().unwrap(), Symbology::Ean13);
        assert_eq!(" UPC-A ".parse::<Symbology>().unwrap(), Symbology::Upc);
        assert_eq!("qr".parse::<Symbology>().unwrap(), Symbology::Qr);
        for s in Symbology::ALL {
            assert_eq!(s.name().parse::<Symbology>().unwrap(), s);
        }
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "pdf417".parse::<Symbology>().unwrap_err();
        assert!(matches!(err, LabelError::UnknownSymbology(ref s) if s == "pdf417"));
    }

    #[test]
    fn only_numeric_codes_carry_check_digit() {
        assert_eq!(Symbology::Ean13.data_length(), Some(12));
        assert_eq!(Symbology::Upc.data_length(), Some(11));
        assert!(!Symbology::Qr.has_check_digit());
        assert!(!Symbology::Code128.has_check_digit());
        assert!(!Symbology::Code39.has_check_digit());
    }
}
