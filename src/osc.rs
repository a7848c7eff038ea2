// src/osc.rs
//
// OSC 1.0 binary message codec.
//
// Layout of a message:
//   address   NUL-terminated ASCII, padded to a multiple of 4 bytes
//   type tags ',' followed by one tag per argument, same padding
//   arguments big-endian, each a multiple of 4 bytes

use thiserror::Error;

/// Errors produced while decoding an OSC packet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OscError {
    #[error("packet truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("string at byte {offset} is not NUL-terminated")]
    UnterminatedString { offset: usize },

    #[error("string at byte {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("address pattern must start with '/', got {0:?}")]
    InvalidAddress(String),

    #[error("type tag string must start with ',', got {0:?}")]
    InvalidTypeTags(String),

    #[error("unsupported argument type tag '{0}'")]
    UnsupportedTag(char),

    #[error("{0} trailing bytes after last argument")]
    TrailingBytes(usize),
}

/// A single decoded OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    Int(i32),
    Float(f32),
    Str(String),
}

impl OscArg {
    #[inline]
    pub fn tag(&self) -> char {
        match self {
            OscArg::Int(_) => 'i',
            OscArg::Float(_) => 'f',
            OscArg::Str(_) => 's',
        }
    }

    #[inline]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            OscArg::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// An owned OSC message.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscArg>,
}

impl OscMessage {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: OscArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Type tag string, including the leading ','.
    pub fn type_tags(&self) -> String {
        std::iter::once(',')
            .chain(self.args.iter().map(OscArg::tag))
            .collect()
    }

    /// Append the encoded message to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        write_str(buf, &self.address);
        write_str(buf, &self.type_tags());
        for arg in &self.args {
            match arg {
                OscArg::Int(v) => write_i32(buf, *v),
                OscArg::Float(v) => write_f32(buf, *v),
                OscArg::Str(s) => write_str(buf, s),
            }
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64);
        self.encode_into(&mut buf);
        buf
    }

    /// Decode a single message from a complete datagram.
    pub fn decode(packet: &[u8]) -> Result<Self, OscError> {
        let mut reader = Reader::new(packet);

        let address = reader.read_str()?;
        if !address.starts_with('/') {
            return Err(OscError::InvalidAddress(address.to_owned()));
        }

        let tags = reader.read_str()?;
        let tags = tags
            .strip_prefix(',')
            .ok_or_else(|| OscError::InvalidTypeTags(tags.to_owned()))?;

        let mut args = Vec::with_capacity(tags.len());
        for tag in tags.chars() {
            let arg = match tag {
                'i' => OscArg::Int(i32::from_be_bytes(reader.read_word()?)),
                'f' => OscArg::Float(f32::from_be_bytes(reader.read_word()?)),
                's' => OscArg::Str(reader.read_str()?.to_owned()),
                other => return Err(OscError::UnsupportedTag(other)),
            };
            args.push(arg);
        }

        match reader.remaining() {
            0 => Ok(Self {
                address: address.to_owned(),
                args,
            }),
            n => Err(OscError::TrailingBytes(n)),
        }
    }
}

//
// ===============================
// MARK: Encoding primitives
// ===============================
//

/// Bytes needed to hold `len` string bytes plus the NUL, rounded up to 4.
#[inline]
pub const fn padded_len(len: usize) -> usize {
    (len + 4) & !3
}

/// Write a NUL-terminated, 4-byte aligned string.
#[inline]
pub fn write_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    let pad = padded_len(s.len()) - s.len();
    buf.extend(std::iter::repeat_n(0u8, pad));
}

#[inline]
pub fn write_f32(buf: &mut Vec<u8>, value: f32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn write_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

//
// ===============================
// MARK: Decoding
// ===============================
//

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_word(&mut self) -> Result<[u8; 4], OscError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + 4)
            .ok_or(OscError::Truncated { offset: self.pos })?;
        self.pos += 4;
        let mut word = [0u8; 4];
        word.copy_from_slice(bytes);
        Ok(word)
    }

    fn read_str(&mut self) -> Result<&'a str, OscError> {
        let start = self.pos;
        let rest = &self.data[start..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(OscError::UnterminatedString { offset: start })?;

        let end = start + padded_len(nul);
        if end > self.data.len() {
            return Err(OscError::Truncated { offset: start });
        }

        let s = std::str::from_utf8(&rest[..nul])
            .map_err(|_| OscError::InvalidUtf8 { offset: start })?;
        self.pos = end;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        assert_eq!(padded_len(0), 4);
        assert_eq!(padded_len(3), 4);
        assert_eq!(padded_len(4), 8);
        assert_eq!(padded_len(9), 12);
    }

    #[test]
    fn test_encode_layout() {
        let msg = OscMessage::new("/muse/eeg").with_arg(OscArg::Float(1.0));
        let bytes = msg.encode();

        assert_eq!(&bytes[..12], b"/muse/eeg\0\0\0");
        assert_eq!(&bytes[12..16], b",f\0\0");
        assert_eq!(&bytes[16..], &1.0f32.to_be_bytes());
    }

    #[test]
    fn test_decode_mixed_args() {
        let msg = OscMessage::new("/a")
            .with_arg(OscArg::Int(-7))
            .with_arg(OscArg::Str("hey".into()))
            .with_arg(OscArg::Float(0.5));

        let decoded = OscMessage::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
        assert_eq!(decoded.type_tags(), ",isf");
    }

    #[test]
    fn test_decode_rejects_truncated_args() {
        let mut bytes = OscMessage::new("/x").with_arg(OscArg::Float(2.0)).encode();
        bytes.truncate(bytes.len() - 2);

        assert!(matches!(
            OscMessage::decode(&bytes),
            Err(OscError::Truncated { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_address() {
        let mut bytes = Vec::new();
        write_str(&mut bytes, "muse");
        write_str(&mut bytes, ",");

        assert_eq!(
            OscMessage::decode(&bytes),
            Err(OscError::InvalidAddress("muse".into()))
        );
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let mut bytes = Vec::new();
        write_str(&mut bytes, "/x");
        write_str(&mut bytes, ",d");
        bytes.extend_from_slice(&[0u8; 8]);

        assert_eq!(OscMessage::decode(&bytes), Err(OscError::UnsupportedTag('d')));
    }

    #[test]
    fn test_decode_rejects_missing_nul() {
        assert_eq!(
            OscMessage::decode(b"/abc"),
            Err(OscError::UnterminatedString { offset: 0 })
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = OscMessage::new("/x").encode();
        bytes.extend_from_slice(&[0u8; 4]);

        assert_eq!(OscMessage::decode(&bytes), Err(OscError::TrailingBytes(4)));
    }
}
