use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating item barcodes.
    /// Alphanumeric groups with optional single hyphens between them
    /// - Valid: "8991002100", "SKU-2024-001", "a1"
    /// - Invalid: "-123", "123-", "12--34", "12 34"
    pub static ref BARCODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_regex_valid() {
        assert!(BARCODE_REGEX.is_match("8991002100"));
        assert!(BARCODE_REGEX.is_match("SKU-2024-001"));
        assert!(BARCODE_REGEX.is_match("a1"));
        assert!(BARCODE_REGEX.is_match("A-B-C"));
    }

    #[test]
    fn test_barcode_regex_invalid() {
        assert!(!BARCODE_REGEX.is_match("-123")); // starts with hyphen
        assert!(!BARCODE_REGEX.is_match("123-")); // ends with hyphen
        assert!(!BARCODE_REGEX.is_match("12--34")); // double hyphen
        assert!(!BARCODE_REGEX.is_match("12 34")); // space
        assert!(!BARCODE_REGEX.is_match("")); // empty
    }
}
