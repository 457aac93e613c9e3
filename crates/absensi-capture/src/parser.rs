use absensi_core::model::Identity;
use absensi_protocol::TokenPayload;

use crate::error::CaptureError;

/// Parse the decoded text of a scanned token into an identity.
///
/// Pure: the same input always yields the same output and no input panics.
/// Anything short of a complete, well-formed token payload (bad JSON, a
/// missing field, an extra key, an unrecognized gender) is an invalid
/// token, never a partial identity.
pub fn parse_identity(raw: &str) -> Result<Identity, CaptureError> {
    let payload = TokenPayload::decode(raw)?;
    Ok(payload.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use absensi_core::model::Gender;
    use crate::error::messages;

    #[test]
    fn test_parse_roundtrips_encoded_identity() {
        let identity = Identity {
            name: "Ahmad Rizki".into(),
            class: "10A".into(),
            gender: Gender::Putra,
        };
        let encoded = TokenPayload::from(identity.clone()).encode();
        assert_eq!(parse_identity(&encoded).unwrap(), identity);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = r#"{"name":"Siti","class":"11B","gender":"Putri"}"#;
        assert_eq!(parse_identity(raw).unwrap(), parse_identity(raw).unwrap());
    }

    #[test]
    fn test_malformed_input_is_invalid_token() {
        for raw in [
            "",
            "bukan json",
            "42",
            "[]",
            r#"{"name":"Ahmad"}"#,
            r#"{"name":"Ahmad","class":"10A","gender":"laki-laki"}"#,
            r#"{"name":"Ahmad","class":"10A","gender":"Putra","extra":true}"#,
        ] {
            let err = parse_identity(raw).unwrap_err();
            assert!(matches!(err, CaptureError::InvalidToken(_)), "input: {raw}");
            assert_eq!(err.user_message(), messages::INVALID_TOKEN);
        }
    }
}
