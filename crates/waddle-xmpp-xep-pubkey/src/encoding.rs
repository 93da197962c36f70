//! Base64 handling for key material.
//!
//! Output is always canonical (standard alphabet, padded, single line). Input
//! is accepted leniently since peers may wrap or under-pad the key text.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::{DecodeError, Engine};

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode key bytes as single-line padded base64.
pub fn encode_key(key: &[u8]) -> String {
    STANDARD.encode(key)
}

/// Decode base64 key text.
///
/// ASCII whitespace is skipped, padding is optional and non-zero trailing
/// bits are tolerated. Anything outside the standard alphabet is an error.
pub fn decode_key(text: &str) -> Result<Vec<u8>, DecodeError> {
    if text.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        LENIENT.decode(compact)
    } else {
        LENIENT.decode(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key(b"AB"), "QUI=");
        assert_eq!(encode_key(b""), "");
        assert!(!encode_key(&[0u8; 200]).contains('\n'));
    }

    #[test]
    fn test_decode_key_canonical() {
        assert_eq!(decode_key("QUI=").unwrap(), b"AB");
    }

    #[test]
    fn test_decode_key_lenient() {
        assert_eq!(decode_key("QUI").unwrap(), b"AB");
        assert_eq!(decode_key("QR==").unwrap(), b"A");
        assert_eq!(decode_key(" QU\nI=\r\n").unwrap(), b"AB");
    }

    #[test]
    fn test_decode_key_invalid() {
        assert!(decode_key("not-base64!!").is_err());
    }
}
