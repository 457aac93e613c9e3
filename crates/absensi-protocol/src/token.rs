use serde::{Deserialize, Serialize};

use absensi_core::model::{Gender, Identity};

use crate::error::ProtocolError;

/// The payload carried inside a student's QR token: a JSON object with
/// exactly the keys `name`, `class` and `gender`. Extra keys, missing keys
/// and unrecognized gender values are all rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenPayload {
    pub name: String,
    pub class: String,
    pub gender: Gender,
}

impl TokenPayload {
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(ProtocolError::Token)
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<Identity> for TokenPayload {
    fn from(identity: Identity) -> Self {
        Self {
            name: identity.name,
            class: identity.class,
            gender: identity.gender,
        }
    }
}

impl From<TokenPayload> for Identity {
    fn from(payload: TokenPayload) -> Self {
        Self {
            name: payload.name,
            class: payload.class,
            gender: payload.gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_canonical_payload() {
        let payload =
            TokenPayload::decode(r#"{"name":"Ahmad Rizki","class":"10A","gender":"Putra"}"#)
                .unwrap();
        assert_eq!(payload.name, "Ahmad Rizki");
        assert_eq!(payload.class, "10A");
        assert_eq!(payload.gender, Gender::Putra);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let payload = TokenPayload {
            name: "Siti Nurhaliza".into(),
            class: "11B".into(),
            gender: Gender::Putri,
        };
        assert_eq!(TokenPayload::decode(&payload.encode()).unwrap(), payload);
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        assert!(TokenPayload::decode(r#"{"name":"Ahmad","class":"10A"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_extra_key() {
        assert!(TokenPayload::decode(
            r#"{"name":"Ahmad","class":"10A","gender":"Putra","nis":"123"}"#
        )
        .is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_gender() {
        assert!(
            TokenPayload::decode(r#"{"name":"Ahmad","class":"10A","gender":"Pria"}"#).is_err()
        );
    }
}
