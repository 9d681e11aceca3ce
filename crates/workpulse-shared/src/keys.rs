//! Codec for the server-supplied VAPID application server key.
//!
//! The backend hands out the key as a base64url string (RFC 4648, `-`/`_`
//! alphabet, no padding); the platform's push registration primitive wants
//! raw bytes. An off-by-one in padding or alphabet translation causes a
//! silent registration failure with an opaque platform error, so this is
//! tested against fixed fixtures independently of any network code.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::KeyCodecError;
use crate::types::ApplicationServerKey;

/// Decode a base64url key string into the byte buffer the push registration
/// primitive requires.
///
/// Right-pads with `=` to a multiple of 4, translates `-`→`+` and `_`→`/`
/// into standard base64, then decodes. Deterministic and allocation-exact.
pub fn decode_server_key(input: &str) -> Result<ApplicationServerKey, KeyCodecError> {
    if input.len() % 4 == 1 {
        // One leftover character can never encode a whole byte.
        return Err(KeyCodecError::InvalidLength);
    }

    let padding = (4 - input.len() % 4) % 4;
    let mut standard = String::with_capacity(input.len() + padding);
    for c in input.chars() {
        standard.push(match c {
            '-' => '+',
            '_' => '/',
            other => other,
        });
    }
    for _ in 0..padding {
        standard.push('=');
    }

    STANDARD
        .decode(&standard)
        .map(ApplicationServerKey)
        .map_err(|_| KeyCodecError::Base64Decode)
}

/// Encode subscription key bytes as standard base64 for the backend sync
/// request body.
pub fn encode_key_param(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SERVER_KEY_LEN;

    // Shaped like a real uncompressed P-256 public key: 87 base64url
    // characters decoding to 65 bytes with a leading 0x04.
    const VAPID_FIXTURE: &str =
        "BK8mUkzl2s3hF-q7rTnM9XwYxVZJpaQc_D4GeB1o5uCiSvHgLt0EyOW6fAjNbPm2dR8zKq7TxUn_wV-lY3sFQhg";

    #[test]
    fn test_vapid_fixture_decodes_to_p256_length() {
        let key = decode_server_key(VAPID_FIXTURE).unwrap();
        assert_eq!(key.len(), SERVER_KEY_LEN);
        assert_eq!(key.as_bytes()[0], 0x04);
    }

    #[test]
    fn test_known_answer() {
        // "AQID" is standard base64 for [1, 2, 3]; no padding, no
        // translation needed.
        let key = decode_server_key("AQID").unwrap();
        assert_eq!(key.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_alphabet_translation() {
        // '-' and '_' are the url-safe forms of '+' (62) and '/' (63).
        let key = decode_server_key("-_-_").unwrap();
        assert_eq!(key.as_bytes(), &[0xFB, 0xFF, 0xBF]);
    }

    #[test]
    fn test_length_two_extra_chars() {
        // 2 chars pad to "-A==" and decode to a single byte.
        let key = decode_server_key("-A").unwrap();
        assert_eq!(key.as_bytes(), &[0xF8]);
    }

    #[test]
    fn test_length_three_extra_chars() {
        // 3 chars pad to "AAA=" and decode to two bytes.
        let key = decode_server_key("AAA").unwrap();
        assert_eq!(key.as_bytes(), &[0, 0]);
    }

    #[test]
    fn test_length_one_extra_char_rejected() {
        assert_eq!(decode_server_key("A"), Err(KeyCodecError::InvalidLength));
    }

    #[test]
    fn test_empty_input() {
        let key = decode_server_key("").unwrap();
        assert!(key.is_empty());
    }

    #[test]
    fn test_invalid_character_rejected() {
        assert_eq!(
            decode_server_key("AQ!D"),
            Err(KeyCodecError::Base64Decode)
        );
    }

    #[test]
    fn test_reencode_roundtrips_length() {
        for fixture in ["AQID", "-A", "AAA", VAPID_FIXTURE] {
            let key = decode_server_key(fixture).unwrap();
            let reencoded = encode_key_param(key.as_bytes());
            let reference = STANDARD.decode(&reencoded).unwrap();
            assert_eq!(reference.len(), key.len());
        }
    }
}
