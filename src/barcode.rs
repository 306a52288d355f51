use std::fmt;

use tracing::debug;

use crate::error::LabelError;
use crate::symbology::Symbology;

/// Strip non-digits, then left-pad with zeros or truncate to `required_length`.
pub fn normalize(raw: &str, required_length: usize) -> Result<String, LabelError> {
    if required_length == 0 {
        return Err(LabelError::Precondition("required length must be positive".into()));
    }
    let mut code = raw.to_string();
    code.retain(|c| c.is_ascii_digit());
    if code.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    if code.len() < required_length {
        debug!(digits = code.len(), required_length, "left-padding with zeros");
        code = format!("{:0>width$}", code, width = required_length);
    } else if code.len() > required_length {
        debug!(digits = code.len(), required_length, "truncating to prefix");
        code.truncate(required_length); // ASCII only, so byte index == char index
    }
    Ok(code)
}

/// GS1 modulo-10 check digit for an already normalized digit string.
pub fn check_digit(normalized: &str, required_length: usize) -> Result<u8, LabelError> {
    if normalized.len() != required_length {
        return Err(LabelError::Precondition(format!(
            "expected {} digits, got {}",
            required_length,
            normalized.len()
        )));
    }
    if !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LabelError::Precondition(format!("{:?} is not a digit string", normalized)));
    }
    Ok(mod10_complement(weighted_sum(normalized.as_bytes())))
}

/// True if the last digit of `full_code` is the check digit of the rest.
pub fn is_valid(full_code: &str) -> bool {
    if full_code.len() < 2 || !full_code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (data, check) = full_code.split_at(full_code.len() - 1);
    let expected = mod10_complement(weighted_sum(data.as_bytes()));
    check.as_bytes()[0] - b'0' == expected
}

// Weights alternate 3,1 starting from the digit next to the check digit.
fn weighted_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = (b - b'0') as u32;
            if i % 2 == 0 { d * 3 } else { d }
        })
        .sum()
}

fn mod10_complement(sum: u32) -> u8 {
    ((10 - sum % 10) % 10) as u8
}

/// Final code handed to the label renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCode {
    pub symbology: Symbology,
    pub data: String,
    pub check_digit: Option<u8>,
}

impl EncodedCode {
    /// Data followed by its check digit, if the symbology has one.
    pub fn full_code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EncodedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)?;
        if let Some(check) = self.check_digit {
            write!(f, "{}", check)?;
        }
        Ok(())
    }
}

/// Turn raw user text into the code for `symbology`.
///
/// CODE39 data is upper-cased first, the way label printers key it in.
pub fn encode(raw: &str, symbology: Symbology) -> Result<EncodedCode, LabelError> {
    match symbology.data_length() {
        Some(len) => {
            let data = normalize(raw, len)?;
            let check = check_digit(&data, len)?;
            Ok(EncodedCode {
                symbology,
                data,
                check_digit: Some(check),
            })
        }
        None => {
            if raw.trim().is_empty() {
                return Err(LabelError::EmptyInput);
            }
            let data = match symbology {
                Symbology::Code39 => raw.to_ascii_uppercase(),
                _ => raw.to_string(),
            };
            validate_charset(&data, symbology)?;
            Ok(EncodedCode {
                symbology,
                data,
                check_digit: None,
            })
        }
    }
}

fn validate_charset(data: &str, symbology: Symbology) -> Result<(), LabelError> {
    let allowed: fn(char) -> bool = match symbology {
        Symbology::Code39 => |c: char| {
            c.is_ascii_digit() || c.is_ascii_uppercase() || " -.$/+%".contains(c)
        },
        Symbology::Code128 => |c: char| c.is_ascii(),
        _ => return Ok(()),
    };
    match data.chars().find(|&c| !allowed(c)) {
        Some(ch) => Err(LabelError::InvalidCharacter {
            symbology: symbology.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}
