use std::{fmt, str::FromStr};

use crate::error::{ObjectError, Result};
use crate::utils::{ObjectId, digest_parts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            other => Err(ObjectError::malformed(format!("unknown object kind {:?}", other))),
        }
    }
}

/// Parsed `"<kind> <len>\0"` prefix of an encoded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: ObjectKind,
    pub body_len: usize,
}

impl Header {
    pub fn new(kind: ObjectKind, body_len: usize) -> Self {
        Header { kind, body_len }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("{} {}\0", self.kind, self.body_len).into_bytes()
    }

    /// Parse the header at the start of `encoded`.
    ///
    /// Returns the header and the offset where the body starts. The declared
    /// length is not checked against the remaining bytes here; `decode` does
    /// that.
    pub fn parse(encoded: &[u8]) -> Result<(Header, usize)> {
        let nul = encoded
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| ObjectError::malformed("missing header terminator"))?;
        let header = &encoded[..nul];

        let space = header
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| ObjectError::malformed("header has no length field"))?;
        let kind = std::str::from_utf8(&header[..space])
            .map_err(|_| ObjectError::malformed("object kind is not ASCII"))?
            .parse::<ObjectKind>()?;
        let body_len = parse_length(&header[space + 1..])?;

        Ok((Header { kind, body_len }, nul + 1))
    }
}

/// Canonical decimal: digits only, no sign, no leading zeros except "0".
fn parse_length(field: &[u8]) -> Result<usize> {
    let text = String::from_utf8_lossy(field);
    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return Err(ObjectError::malformed(format!("invalid length field {:?}", text)));
    }
    if field.len() > 1 && field[0] == b'0' {
        return Err(ObjectError::malformed(format!("length field {:?} has leading zeros", text)));
    }
    text.parse::<usize>()
        .map_err(|_| ObjectError::malformed(format!("length field {:?} overflows", text)))
}

pub fn encode_header(kind: ObjectKind, body_len: usize) -> Vec<u8> {
    Header::new(kind, body_len).to_bytes()
}

/// Header followed by body: the bytes that get digested and stored.
pub fn encode(kind: ObjectKind, body: &[u8]) -> Vec<u8> {
    let mut full_data = encode_header(kind, body.len());
    full_data.extend_from_slice(body);
    full_data
}

/// Split an encoded object into kind and body, checking the declared length.
pub fn decode(encoded: &[u8]) -> Result<(ObjectKind, Vec<u8>)> {
    let (header, body_start) = Header::parse(encoded)?;
    let body = &encoded[body_start..];
    if body.len() != header.body_len {
        return Err(ObjectError::malformed(format!(
            "{} declares {} body bytes but {} follow the header",
            header.kind,
            header.body_len,
            body.len()
        )));
    }
    Ok((header.kind, body.to_vec()))
}

/// An in-memory object, not yet (or no longer) compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub kind: ObjectKind,
    pub body: Vec<u8>,
}

impl Object {
    pub fn new(kind: ObjectKind, body: Vec<u8>) -> Self {
        Object { kind, body }
    }

    pub fn blob(body: impl Into<Vec<u8>>) -> Self {
        Object::new(ObjectKind::Blob, body.into())
    }

    /// Digest of the encoded form, computed without allocating it.
    pub fn id(&self) -> ObjectId {
        let header = encode_header(self.kind, self.body.len());
        digest_parts(&[header.as_slice(), self.body.as_slice()])
    }

    pub fn encode(&self) -> Vec<u8> {
        encode(self.kind, &self.body)
    }

    pub fn decode(encoded: &[u8]) -> Result<Self> {
        let (kind, body) = decode(encoded)?;
        Ok(Object { kind, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::digest;

    #[test]
    fn header_layout() {
        assert_eq!(encode_header(ObjectKind::Blob, 6), b"blob 6\0");
        assert_eq!(encode_header(ObjectKind::Tree, 0), b"tree 0\0");
        assert_eq!(encode_header(ObjectKind::Blob, 1234), b"blob 1234\0");
    }

    #[test]
    fn encode_then_decode_blob() {
        let encoded = encode(ObjectKind::Blob, b"hello\n");
        assert_eq!(encoded, b"blob 6\0hello\n");
        assert_eq!(decode(&encoded).unwrap(), (ObjectKind::Blob, b"hello\n".to_vec()));
    }

    #[test]
    fn body_may_contain_nul_bytes() {
        let body = b"\0\0a\0";
        let encoded = encode(ObjectKind::Blob, body);
        assert_eq!(decode(&encoded).unwrap().1, body.to_vec());
    }

    #[test]
    fn object_id_matches_digest_of_encoding() {
        let object = Object::blob(b"hello\n".to_vec());
        assert_eq!(object.id(), digest(&object.encode()));
    }

    #[test]
    fn blob_id_is_sha256_of_git_style_encoding() {
        // sha256 of "blob 0\0"
        assert_eq!(
            Object::blob(Vec::new()).id().to_hex(),
            "473a0f4c3be8a93681a267e3b1e9a7dcda1185436fe141f7749120a303721813"
        );
    }

    #[test]
    fn declared_length_too_long() {
        let err = decode(b"blob 10\0hello").unwrap_err();
        assert!(matches!(err, ObjectError::MalformedObject { .. }));
    }

    #[test]
    fn declared_length_too_short() {
        let err = decode(b"blob 2\0hello").unwrap_err();
        assert!(matches!(err, ObjectError::MalformedObject { .. }));
    }

    #[test]
    fn missing_terminator() {
        assert!(matches!(
            decode(b"blob 5 hello").unwrap_err(),
            ObjectError::MalformedObject { .. }
        ));
    }

    #[test]
    fn unknown_kind() {
        assert!(matches!(
            decode(b"commit 0\0").unwrap_err(),
            ObjectError::MalformedObject { .. }
        ));
    }

    #[test]
    fn length_must_be_canonical() {
        let cases: [&[u8]; 5] = [
            b"blob \0",
            b"blob 05\0hello",
            b"blob +5\0hello",
            b"blob 5x\0hello",
            b"blob\0",
        ];
        for bad in cases {
            assert!(
                matches!(decode(bad), Err(ObjectError::MalformedObject { .. })),
                "{:?} should be rejected",
                String::from_utf8_lossy(bad)
            );
        }
    }

    #[test]
    fn overflowing_length() {
        let encoded = b"blob 99999999999999999999999999\0";
        assert!(matches!(
            decode(encoded).unwrap_err(),
            ObjectError::MalformedObject { .. }
        ));
    }

    #[test]
    fn header_parse_reports_body_offset() {
        let (header, offset) = Header::parse(b"tree 3\0abc").unwrap();
        assert_eq!(header, Header::new(ObjectKind::Tree, 3));
        assert_eq!(offset, 7);
    }
}
