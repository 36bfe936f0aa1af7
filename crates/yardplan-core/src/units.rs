//! Unit handling for yard measurements
//!
//! All model coordinates are decimal feet. This module formats feet for
//! display labels and parses user-entered lengths, accepting decimal feet
//! ("12.5"), whole-and-fraction feet ("12 1/2"), and feet-and-inches
//! notation (`12'6"`).

/// Number of decimal places kept for stored positions and dimensions.
///
/// Values entered or produced by interactive edits are rounded to this
/// before being committed to a layout.
pub const POSITION_DECIMALS: u32 = 2;

/// Format a length in feet for display
///
/// * `value_ft` - Value in feet
/// * `precision` - Number of decimal places
pub fn format_feet(value_ft: f64, precision: usize) -> String {
    format!("{:.*}", precision, value_ft)
}

/// Round a length to the stored position precision (2 decimal places)
pub fn round_position(value_ft: f64) -> f64 {
    let scale = 10f64.powi(POSITION_DECIMALS as i32);
    (value_ft * scale).round() / scale
}

/// Parse a length string to feet
///
/// * `input` - String to parse
pub fn parse_feet(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    let (input, sign) = match input.strip_prefix('-') {
        Some(rest) => (rest.trim(), -1.0),
        None => (input, 1.0),
    };

    if input.contains('\'') || input.contains('"') {
        return parse_feet_inches(input).map(|v| sign * v);
    }

    if input.contains('/') {
        // Whole-and-fraction feet, e.g. "12 1/2"
        let mut total_ft = 0.0;
        for part in input.split_whitespace() {
            if part.contains('/') {
                let frac_parts: Vec<&str> = part.split('/').collect();
                if frac_parts.len() != 2 {
                    return Err("Invalid fraction format".to_string());
                }
                let num = frac_parts[0].parse::<f64>().map_err(|_| "Invalid numerator")?;
                let den = frac_parts[1].parse::<f64>().map_err(|_| "Invalid denominator")?;
                if den == 0.0 {
                    return Err("Division by zero".to_string());
                }
                total_ft += num / den;
            } else {
                total_ft += part.parse::<f64>().map_err(|_| "Invalid number part")?;
            }
        }
        return Ok(sign * total_ft);
    }

    input
        .parse::<f64>()
        .map(|v| sign * v)
        .map_err(|e| e.to_string())
}

/// Parse feet-and-inches notation, e.g. `12'6"`, `12'`, or `6"`
fn parse_feet_inches(input: &str) -> Result<f64, String> {
    let mut total_ft = 0.0;
    let mut rest = input;

    if let Some(idx) = rest.find('\'') {
        let feet_part = rest[..idx].trim();
        if !feet_part.is_empty() {
            total_ft += feet_part
                .parse::<f64>()
                .map_err(|_| "Invalid feet part".to_string())?;
        }
        rest = &rest[idx + 1..];
    }

    let rest = rest.trim();
    if !rest.is_empty() {
        let inches_part = rest
            .strip_suffix('"')
            .ok_or_else(|| "Expected inches to end with \"".to_string())?
            .trim();
        if !inches_part.is_empty() {
            let inches = inches_part
                .parse::<f64>()
                .map_err(|_| "Invalid inches part".to_string())?;
            total_ft += inches / 12.0;
        }
    }

    Ok(total_ft)
}
