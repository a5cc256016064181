// Routine module
// Read-only catalog entry owned by the remote API

use serde::{Deserialize, Serialize};

/// A workout routine that can be dragged onto the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Routine {
    pub id: String,
    pub name: String,
    /// Hex-like colour code as stored by the API, usually without the leading `#`.
    pub colour_code: String,
}

impl Routine {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        colour_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colour_code: colour_code.into(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Routine id cannot be empty".to_string());
        }

        if self.name.trim().is_empty() {
            return Err("Routine name cannot be empty".to_string());
        }

        if !Self::is_valid_colour_code(&self.colour_code) {
            return Err("Routine colour must be a 3 or 6 digit hex code".to_string());
        }

        Ok(())
    }

    /// Colour as a CSS-style `#rrggbb` string.
    pub fn color_hex(&self) -> String {
        let code = self.colour_code.trim().trim_start_matches('#');
        if code.len() == 3 {
            let expanded: String = code.chars().flat_map(|c| [c, c]).collect();
            return format!("#{}", expanded.to_ascii_lowercase());
        }
        format!("#{}", code.to_ascii_lowercase())
    }

    pub fn is_valid_colour_code(code: &str) -> bool {
        let code = code.trim().trim_start_matches('#');
        matches!(code.len(), 3 | 6) && code.chars().all(|c| c.is_ascii_hexdigit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ff0000", true ; "six digits")]
    #[test_case("#0aF", true ; "three digits with hash")]
    #[test_case("ff00", false ; "four digits")]
    #[test_case("zzzzzz", false ; "not hex")]
    #[test_case("", false ; "empty")]
    fn test_colour_code_validation(code: &str, expected: bool) {
        assert_eq!(Routine::is_valid_colour_code(code), expected);
    }

    #[test]
    fn test_color_hex_expands_short_codes() {
        let routine = Routine::new("r1", "Legs", "0aF");
        assert_eq!(routine.color_hex(), "#00aaff");
    }

    #[test]
    fn test_color_hex_adds_hash() {
        let routine = Routine::new("r1", "Legs", "FF8800");
        assert_eq!(routine.color_hex(), "#ff8800");
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let routine = Routine::new("r1", "  ", "ff0000");
        assert!(routine.validate().is_err());
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let routine: Routine =
            serde_json::from_str(r#"{"id":"r1","name":"Push day","colour_code":"00ff00"}"#)
                .unwrap();
        assert_eq!(routine, Routine::new("r1", "Push day", "00ff00"));
    }
}
