//! Field extraction from single `(symbol ...)` and `(sheet ...)` blocks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::SymbolRecord;

/// Coordinates of an `(at x y [angle])` block.
static AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(at\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)(?:\s+(-?\d+(?:\.\d+)?))?\s*\)")
        .expect("valid (at ...) pattern")
});

/// `(property "<name>" "<value>"` at the start of a property block.
static PROPERTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\(property\s+"((?:[^"\\]|\\.)*)"\s+"((?:[^"\\]|\\.)*)""#)
        .expect("valid property pattern")
});

static SHEET_FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Sheet\s*file$").expect("valid sheet file name pattern"));

/// Name/value pairs of every `(property ...)` nested in a block, in document order.
fn properties(block: &str) -> impl Iterator<Item = (String, String)> + '_ {
    sch2board_sexpr::blocks(block, "property").filter_map(|prop| {
        let caps = PROPERTY_RE.captures(prop.text)?;
        Some((unescape(&caps[1]), unescape(&caps[2])))
    })
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Extract the reference and placement of a symbol block.
///
/// Returns `None` when the block has no `Reference` property, no `(at x y)`,
/// or a coordinate that does not parse.
pub fn extract_symbol_record(block: &str) -> Option<SymbolRecord> {
    let label = properties(block)
        .find(|(name, _)| name == "Reference")
        .map(|(_, value)| value.trim().to_string())
        .filter(|label| !label.is_empty())?;

    let at_block = sch2board_sexpr::blocks(block, "at").next()?;
    let at = AT_RE.captures(at_block.text)?;
    let x: f64 = at[1].parse().ok()?;
    let y: f64 = at[2].parse().ok()?;
    let rotation = match at.get(3) {
        Some(angle) => Some(angle.as_str().parse::<f64>().ok()?),
        None => None,
    };

    Some(SymbolRecord {
        label,
        x,
        y,
        rotation,
    })
}

/// Child schematic files referenced by a sheet block, in declaration order.
///
/// Both the `"Sheetfile"` and the older `"Sheet file"` property names are
/// recognised.
pub fn extract_sheet_files(block: &str) -> Vec<String> {
    properties(block)
        .filter(|(name, value)| SHEET_FILE_NAME_RE.is_match(name) && !value.is_empty())
        .map(|(_, value)| value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESISTOR: &str = r#"(symbol (lib_id "Device:R") (at 101.6 -50.8 90) (unit 1)
        (in_bom yes) (on_board yes)
        (uuid 6c3f0a36-1111-4c5e-9d3e-2b0c1f7e0001)
        (property "Reference" "R12" (at 104.14 -49.53 0)
          (effects (font (size 1.27 1.27)) (justify left)))
        (property "Value" "10k" (at 104.14 -52.07 0)))"#;

    #[test]
    fn test_extract_symbol_record() {
        let record = extract_symbol_record(RESISTOR).unwrap();
        assert_eq!(record.label, "R12");
        assert_eq!(record.x, 101.6);
        assert_eq!(record.y, -50.8);
        assert_eq!(record.rotation, Some(90.0));
    }

    #[test]
    fn test_rotation_is_optional() {
        let block = r#"(symbol (at 10 20) (property "Reference" "C1"))"#;
        let record = extract_symbol_record(block).unwrap();
        assert_eq!((record.x, record.y, record.rotation), (10.0, 20.0, None));
    }

    #[test]
    fn test_label_is_trimmed() {
        let block = r#"(symbol (at 1 2 0) (property "Reference" " U1 "))"#;
        assert_eq!(extract_symbol_record(block).unwrap().label, "U1");
    }

    #[test]
    fn test_missing_reference_yields_nothing() {
        let block = r#"(symbol (at 1 2 0) (property "Value" "10k"))"#;
        assert!(extract_symbol_record(block).is_none());
    }

    #[test]
    fn test_missing_position_yields_nothing() {
        let block = r#"(symbol (property "Reference" "R1"))"#;
        assert!(extract_symbol_record(block).is_none());
    }

    #[test]
    fn test_malformed_position_yields_nothing() {
        let block = r#"(symbol (at one 2) (property "Reference" "R1"))"#;
        assert!(extract_symbol_record(block).is_none());
    }

    #[test]
    fn test_reference_inside_value_is_not_a_property() {
        let block = r#"(symbol (at 1 2) (property "Value" "(property \"Reference\" \"X\")"))"#;
        assert!(extract_symbol_record(block).is_none());
    }

    #[test]
    fn test_position_inside_quoted_value_is_ignored() {
        let block = r#"(symbol (lib_id "X:(at 9 9)") (at 3 4 180)
            (property "Reference" "J1"))"#;
        let record = extract_symbol_record(block).unwrap();
        assert_eq!((record.x, record.y, record.rotation), (3.0, 4.0, Some(180.0)));

        let quoted_only = r#"(symbol (property "Reference" "J1") (property "Value" "(at 9 9)"))"#;
        assert!(extract_symbol_record(quoted_only).is_none());
    }

    #[test]
    fn test_extract_sheet_files() {
        let block = r#"(sheet (at 50 50) (size 20 10)
            (property "Sheetname" "Power" (at 50 49 0))
            (property "Sheetfile" "power.kicad_sch" (at 50 61 0))
            (property "Sheet file" "legacy.kicad_sch")
            (property "Sheet   file" "spaced.kicad_sch")
            (property "Sheetfile" ""))"#;
        assert_eq!(
            extract_sheet_files(block),
            vec!["power.kicad_sch", "legacy.kicad_sch", "spaced.kicad_sch"]
        );
    }

    #[test]
    fn test_sheet_without_file() {
        let block = r#"(sheet (at 0 0) (property "Sheetname" "Empty"))"#;
        assert!(extract_sheet_files(block).is_empty());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"a\"b\\c"#), r#"a"b\c"#);
    }
}
