//! Apple Encrypted Archive (AEA1) auth-data extraction.
//!
//! Header:
//!   magic[4] = "AEA1" || profile[3] LE || reserved[1] || auth_data_len[4] LE
//!   || auth_data[auth_data_len]
//!
//! Auth data is a run of fields:
//!   field_len[4] LE || key || 0x00 || value      (field_len includes itself)
//!
//! The `com.apple.wkms.fcs-response` field holds JSON with the base64 HPKE
//! encapsulated key (`enc-request`) and wrapped key (`wrapped-key`).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::error::AuthDataError;
use crate::format::PrivateKeyFormat;
use crate::unwrap::KeyUnwrapper;

pub const MAGIC: &[u8; 4] = b"AEA1";

/// HKDF-SHA256 / AES-CTR / HMAC, symmetric, no signature
pub const PROFILE_HKDF_SHA256_AESCTR_HMAC_SYMMETRIC_NONE: u32 = 1;

/// magic + profile + reserved + auth_data_len
pub const HEADER_BYTES: usize = 4 + 3 + 1 + 4; // 12

/// Per-field length prefix
pub const FIELD_LEN_BYTES: usize = 4;

pub const FIELD_FCS_RESPONSE: &str = "com.apple.wkms.fcs-response";
pub const FIELD_FCS_KEY_URL: &str = "com.apple.wkms.fcs-key-url";

/// Parsed fixed-size archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub profile: u32,
    pub auth_data_len: u32,
}

impl ArchiveHeader {
    pub fn parse(data: &[u8]) -> Result<Self, AuthDataError> {
        if data.len() < HEADER_BYTES {
            return Err(AuthDataError::Truncated);
        }
        if &data[..4] != MAGIC {
            return Err(AuthDataError::BadMagic);
        }

        let profile = u32::from_le_bytes([data[4], data[5], data[6], 0]);
        if profile != PROFILE_HKDF_SHA256_AESCTR_HMAC_SYMMETRIC_NONE {
            return Err(AuthDataError::UnsupportedProfile(profile));
        }

        let auth_data_len = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        if auth_data_len == 0 {
            return Err(AuthDataError::EmptyAuthData);
        }

        Ok(Self {
            profile,
            auth_data_len,
        })
    }
}

/// Key/value fields from the auth-data blob, in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthData {
    fields: Vec<(String, String)>,
}

impl AuthData {
    /// Parse header and auth data from the start of an archive. Bytes past
    /// the auth data are ignored.
    pub fn parse(archive: &[u8]) -> Result<Self, AuthDataError> {
        let header = ArchiveHeader::parse(archive)?;
        let end = HEADER_BYTES
            .checked_add(header.auth_data_len as usize)
            .ok_or(AuthDataError::Truncated)?;
        let blob = archive.get(HEADER_BYTES..end).ok_or(AuthDataError::Truncated)?;
        Self::parse_blob(blob)
    }

    /// Parse a bare auth-data blob.
    pub fn parse_blob(mut blob: &[u8]) -> Result<Self, AuthDataError> {
        let mut fields = Vec::new();

        while !blob.is_empty() {
            if blob.len() < FIELD_LEN_BYTES {
                return Err(AuthDataError::MalformedField);
            }
            let field_len = u32::from_le_bytes([blob[0], blob[1], blob[2], blob[3]]) as usize;
            if field_len < FIELD_LEN_BYTES || field_len > blob.len() {
                return Err(AuthDataError::MalformedField);
            }

            let body = &blob[FIELD_LEN_BYTES..field_len];
            let nul = body
                .iter()
                .position(|&b| b == 0)
                .ok_or(AuthDataError::MalformedField)?;
            let key = core::str::from_utf8(&body[..nul]).map_err(|_| AuthDataError::MalformedField)?;
            let value =
                core::str::from_utf8(&body[nul + 1..]).map_err(|_| AuthDataError::MalformedField)?;
            fields.push((key.to_owned(), value.to_owned()));

            blob = &blob[field_len..];
        }

        tracing::debug!(fields = fields.len(), "parsed archive auth data");
        Ok(Self { fields })
    }

    /// Value for `key`; the last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Where the recipient private key can be fetched from.
    pub fn key_url(&self) -> Result<&str, AuthDataError> {
        self.get(FIELD_FCS_KEY_URL)
            .ok_or(AuthDataError::MissingField(FIELD_FCS_KEY_URL))
    }

    pub fn fcs_response(&self) -> Result<FcsResponse, AuthDataError> {
        let json = self
            .get(FIELD_FCS_RESPONSE)
            .ok_or(AuthDataError::MissingField(FIELD_FCS_RESPONSE))?;
        FcsResponse::from_json(json)
    }
}

#[derive(Deserialize)]
struct RawFcsResponse {
    #[serde(rename = "enc-request")]
    enc_request: String,
    #[serde(rename = "wrapped-key")]
    wrapped_key: String,
}

/// Decoded HPKE inputs carried by the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcsResponse {
    pub encapsulated_key: Vec<u8>,
    pub wrapped_key: Vec<u8>,
}

impl FcsResponse {
    pub fn from_json(json: &str) -> Result<Self, AuthDataError> {
        let raw: RawFcsResponse = serde_json::from_str(json)?;
        Ok(Self {
            encapsulated_key: STANDARD.decode(raw.enc_request)?,
            wrapped_key: STANDARD.decode(raw.wrapped_key)?,
        })
    }
}

/// Read the fcs-response from an archive header and unwrap the archive key.
pub fn unwrap_archive_key(
    raw_private_key: &[u8],
    format: PrivateKeyFormat,
    archive: &[u8],
) -> Result<Zeroizing<Vec<u8>>, AuthDataError> {
    let response = AuthData::parse(archive)?.fcs_response()?;
    let key = KeyUnwrapper::new().unwrap(
        raw_private_key,
        format,
        &response.encapsulated_key,
        &response.wrapped_key,
    )?;
    Ok(key)
}

/// Serialize one auth-data field (used to build archive headers).
pub fn encode_field(key: &str, value: &str) -> Vec<u8> {
    let len = FIELD_LEN_BYTES + key.len() + 1 + value.len();
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(&(len as u32).to_le_bytes());
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(value.as_bytes());
    out
}

/// Serialize a profile-1 header followed by `fields`.
pub fn encode_header(fields: &[(&str, &str)]) -> Vec<u8> {
    let blob: Vec<u8> = fields.iter().flat_map(|(k, v)| encode_field(k, v)).collect();
    let mut out = Vec::with_capacity(HEADER_BYTES + blob.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&PROFILE_HKDF_SHA256_AESCTR_HMAC_SYMMETRIC_NONE.to_le_bytes()[..3]);
    out.push(0);
    out.extend_from_slice(&(blob.len() as u32).to_le_bytes());
    out.extend_from_slice(&blob);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_roundtrip() {
        let hdr = encode_header(&[("a", "1"), ("b", "two")]);
        let parsed = ArchiveHeader::parse(&hdr).unwrap();
        assert_eq!(parsed.profile, 1);
        assert_eq!(parsed.auth_data_len as usize, hdr.len() - HEADER_BYTES);

        let auth = AuthData::parse(&hdr).unwrap();
        assert_eq!(auth.len(), 2);
        assert_eq!(auth.get("a"), Some("1"));
        assert_eq!(auth.get("b"), Some("two"));
        assert_eq!(auth.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn trailing_payload_ignored() {
        let mut hdr = encode_header(&[("k", "v")]);
        hdr.extend_from_slice(b"archive body follows");
        assert_eq!(AuthData::parse(&hdr).unwrap().get("k"), Some("v"));
    }

    #[test]
    fn value_may_contain_nul() {
        let blob = encode_field("k", "a\0b");
        assert_eq!(AuthData::parse_blob(&blob).unwrap().get("k"), Some("a\0b"));
    }

    #[test]
    fn last_duplicate_wins() {
        let hdr = encode_header(&[("k", "first"), ("k", "second")]);
        assert_eq!(AuthData::parse(&hdr).unwrap().get("k"), Some("second"));
    }

    #[test]
    fn rejects_bad_header() {
        assert_eq!(ArchiveHeader::parse(b"AEA1"), Err(AuthDataError::Truncated));

        let mut hdr = encode_header(&[("k", "v")]);
        hdr[0] = b'X';
        assert_eq!(ArchiveHeader::parse(&hdr), Err(AuthDataError::BadMagic));

        let mut hdr = encode_header(&[("k", "v")]);
        hdr[4] = 3;
        assert_eq!(ArchiveHeader::parse(&hdr), Err(AuthDataError::UnsupportedProfile(3)));

        let hdr = encode_header(&[]);
        assert_eq!(ArchiveHeader::parse(&hdr), Err(AuthDataError::EmptyAuthData));
    }

    #[test]
    fn rejects_truncated_auth_data() {
        let hdr = encode_header(&[("key", "value")]);
        assert_eq!(AuthData::parse(&hdr[..hdr.len() - 1]), Err(AuthDataError::Truncated));
    }

    #[test]
    fn rejects_malformed_fields() {
        // zero length would never advance
        assert_eq!(AuthData::parse_blob(&[0, 0, 0, 0]), Err(AuthDataError::MalformedField));
        // length past end
        assert_eq!(AuthData::parse_blob(&[9, 0, 0, 0, b'k', 0]), Err(AuthDataError::MalformedField));
        // no separator
        assert_eq!(AuthData::parse_blob(&[5, 0, 0, 0, b'k']), Err(AuthDataError::MalformedField));
        // dangling length prefix
        assert_eq!(AuthData::parse_blob(&[1, 0]), Err(AuthDataError::MalformedField));
    }

    #[test]
    fn fcs_response_decodes() {
        let json = r#"{"enc-request":"AAEC","wrapped-key":"/w==","extra":1}"#;
        let resp = FcsResponse::from_json(json).unwrap();
        assert_eq!(resp.encapsulated_key, vec![0, 1, 2]);
        assert_eq!(resp.wrapped_key, vec![0xff]);
    }

    #[test]
    fn fcs_response_errors() {
        assert_eq!(FcsResponse::from_json("not json"), Err(AuthDataError::InvalidJson));
        assert_eq!(
            FcsResponse::from_json(r#"{"enc-request":"AAEC"}"#),
            Err(AuthDataError::InvalidJson)
        );
        assert_eq!(
            FcsResponse::from_json(r#"{"enc-request":"!!","wrapped-key":"AA=="}"#),
            Err(AuthDataError::InvalidBase64)
        );
    }

    #[test]
    fn missing_fields_named() {
        let auth = AuthData::parse(&encode_header(&[("other", "x")])).unwrap();
        assert_eq!(auth.key_url(), Err(AuthDataError::MissingField(FIELD_FCS_KEY_URL)));
        assert_eq!(auth.fcs_response(), Err(AuthDataError::MissingField(FIELD_FCS_RESPONSE)));
    }
}
