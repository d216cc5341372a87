//! Static extension-to-signature catalog.
//!
//! # Overview
//!
//! The catalog is loaded once at startup from a JSON document embedded in
//! the binary (`data/signatures.json`) and indexed by extension. Each
//! record carries one or more candidate signatures as whitespace-separated
//! hex byte strings, plus an optional byte offset at which the signature
//! is expected (e.g. `tar` magic lives at offset 257, `iso` at 32769).
//!
//! # Example
//!
//! ```
//! use sigdupe::signature::SignatureCatalog;
//!
//! let catalog = SignatureCatalog::load().unwrap();
//! let rule = catalog.rule("pdf").unwrap();
//! assert_eq!(rule.signatures[0], b"%PDF");
//! assert!(catalog.known_extensions().contains(&"png".to_string()));
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Embedded signature catalog data.
const CATALOG_JSON: &str = include_str!("../../data/signatures.json");

/// Errors that can occur while loading the signature catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing JSON could not be parsed.
    #[error("malformed signature catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A signature hex string contained non-hex characters or an odd
    /// number of digits.
    #[error("invalid hex signature {value:?} for extension '{extension}'")]
    InvalidHex {
        /// Extension the bad record belongs to
        extension: String,
        /// The offending hex string
        value: String,
    },

    /// A record listed no candidate signatures.
    #[error("extension '{0}' has no candidate signatures")]
    EmptySignature(String),

    /// Two records claimed the same extension.
    #[error("extension '{0}' appears more than once in the catalog")]
    DuplicateExtension(String),
}

/// On-disk shape of one catalog record.
#[derive(Debug, Deserialize)]
struct RawRule {
    extension: String,
    signature: Vec<String>,
    #[serde(default)]
    offset: u64,
}

/// Signature rule for a single extension.
///
/// Holds the decoded candidate signatures in catalog order. A file
/// matches the rule when the bytes at `offset` equal any one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRule {
    /// Extension this rule applies to (lowercase, no leading dot)
    pub extension: String,
    /// Candidate signatures, tried in order
    pub signatures: Vec<Vec<u8>>,
    /// Byte offset into the file where the signature is expected
    pub offset: u64,
}

impl SignatureRule {
    /// Length of the longest candidate signature.
    #[must_use]
    pub fn max_signature_len(&self) -> usize {
        self.signatures.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of bytes of the file that verification needs to see.
    ///
    /// Never more than `offset + max(signature lengths)`; the rest of the
    /// file is irrelevant to the signature check.
    #[must_use]
    pub fn read_len(&self) -> u64 {
        self.offset + self.max_signature_len() as u64
    }
}

/// Immutable index of signature rules, keyed by extension.
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    rules: HashMap<String, SignatureRule>,
}

impl SignatureCatalog {
    /// Load the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded JSON is malformed, a hex
    /// string fails to decode, a record has no signatures, or an
    /// extension is defined twice.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json_str(CATALOG_JSON)
    }

    /// Parse a catalog from a JSON string.
    ///
    /// Exposed so tests can exercise malformed catalogs without touching
    /// the embedded data.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawRule> = serde_json::from_str(json)?;

        let mut rules = HashMap::with_capacity(raw.len());
        for record in raw {
            if record.signature.is_empty() {
                return Err(CatalogError::EmptySignature(record.extension));
            }

            let mut signatures = Vec::with_capacity(record.signature.len());
            for hex in &record.signature {
                let bytes =
                    parse_hex_signature(hex).ok_or_else(|| CatalogError::InvalidHex {
                        extension: record.extension.clone(),
                        value: hex.clone(),
                    })?;
                signatures.push(bytes);
            }

            let rule = SignatureRule {
                extension: record.extension.clone(),
                signatures,
                offset: record.offset,
            };

            if rules.insert(record.extension.clone(), rule).is_some() {
                return Err(CatalogError::DuplicateExtension(record.extension));
            }
        }

        log::debug!("Signature catalog loaded: {} extensions", rules.len());
        Ok(Self { rules })
    }

    /// Look up the rule for a normalized extension.
    #[must_use]
    pub fn rule(&self, extension: &str) -> Option<&SignatureRule> {
        self.rules.get(extension)
    }

    /// Whether the catalog has a rule for the given extension.
    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.rules.contains_key(extension)
    }

    /// All known extensions, sorted.
    ///
    /// Used to validate user input and to render the supported-extension
    /// listing when an unknown extension is requested.
    #[must_use]
    pub fn known_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.rules.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    /// Number of rules in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Decode a whitespace-insensitive hex byte string.
///
/// Returns `None` for empty input, odd digit counts, or non-hex
/// characters.
fn parse_hex_signature(hex: &str) -> Option<Vec<u8>> {
    let compact: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() || compact.len() % 2 != 0 {
        return None;
    }

    (0..compact.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&compact[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_signature() {
        assert_eq!(
            parse_hex_signature("89 50 4E 47"),
            Some(vec![0x89, 0x50, 0x4E, 0x47])
        );
        assert_eq!(parse_hex_signature("FFD8FF"), Some(vec![0xFF, 0xD8, 0xFF]));
        assert_eq!(parse_hex_signature("ff d8"), Some(vec![0xFF, 0xD8]));
        assert_eq!(parse_hex_signature(""), None);
        assert_eq!(parse_hex_signature("F"), None);
        assert_eq!(parse_hex_signature("GG"), None);
    }

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = SignatureCatalog::load().unwrap();

        assert!(!catalog.is_empty());
        assert!(catalog.contains("pdf"));
        assert!(catalog.contains("png"));
        assert!(!catalog.contains("nonsense"));

        let pdf = catalog.rule("pdf").unwrap();
        assert_eq!(pdf.signatures, vec![b"%PDF".to_vec()]);
        assert_eq!(pdf.offset, 0);
    }

    #[test]
    fn test_offset_rules() {
        let catalog = SignatureCatalog::load().unwrap();

        let tar = catalog.rule("tar").unwrap();
        assert_eq!(tar.offset, 257);
        assert_eq!(tar.signatures, vec![b"ustar".to_vec()]);
        assert_eq!(tar.read_len(), 257 + 5);

        let iso = catalog.rule("iso").unwrap();
        assert_eq!(iso.offset, 32769);
    }

    #[test]
    fn test_multiple_candidate_signatures() {
        let catalog = SignatureCatalog::load().unwrap();

        let gif = catalog.rule("gif").unwrap();
        assert_eq!(gif.signatures.len(), 2);
        assert_eq!(gif.signatures[0], b"GIF89a".to_vec());
        assert_eq!(gif.signatures[1], b"GIF87a".to_vec());
        assert_eq!(gif.max_signature_len(), 6);
    }

    #[test]
    fn test_known_extensions_sorted() {
        let catalog = SignatureCatalog::load().unwrap();
        let extensions = catalog.known_extensions();

        assert_eq!(extensions.len(), catalog.len());
        let mut sorted = extensions.clone();
        sorted.sort();
        assert_eq!(extensions, sorted);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = SignatureCatalog::from_json_str("not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let json = r#"[{ "extension": "bad", "signature": ["ZZ"] }]"#;
        let err = SignatureCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidHex { .. }));
    }

    #[test]
    fn test_empty_signature_list_rejected() {
        let json = r#"[{ "extension": "bad", "signature": [] }]"#;
        let err = SignatureCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySignature(_)));
    }

    #[test]
    fn test_duplicate_extension_rejected() {
        let json = r#"[
            { "extension": "pdf", "signature": ["25 50 44 46"] },
            { "extension": "pdf", "signature": ["25 50 44 46"] }
        ]"#;
        let err = SignatureCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateExtension(_)));
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let json = r#"[{ "extension": "pdf" }]"#;
        let err = SignatureCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
