//! Binary value codec for bridge messages
//!
//! Implements the bridge's extensible binary message format: one
//! type-tag byte per value, compact size prefixes, little-endian
//! scalars, and 8-byte alignment padding before f64 payloads. Three
//! tags above the base format's reserved range extend it with the
//! ad-domain value objects:
//!
//! | Tag | Type | Field sequence |
//! |-----|--------------|-----------------------------------------------|
//! | 128 | AdSize | width:i32, height:i32 |
//! | 129 | AdError | code:i32, message:str, mediatedCode:i32, mediatedMessage:str |
//! | 130 | ResponseInfo | networkName:str, networkPlacement:str, placement:str?, creativeId:str?, revenue:str?, dspName:str? |
//!
//! Field counts and order are fixed per type and must match exactly
//! between encoder and decoder; this is a closed, paired protocol
//! between two sides built together, so no versioning or optional
//! field skipping is provided.

use crate::values::{AdError, AdSize, ResponseInfo};
use thiserror::Error;

// Base format type tags. These must stay consistent with the decoder
// on the far side of the bridge.
const TAG_NULL: u8 = 0;
const TAG_TRUE: u8 = 1;
const TAG_FALSE: u8 = 2;
const TAG_INT32: u8 = 3;
const TAG_INT64: u8 = 4;
const TAG_FLOAT64: u8 = 6;
const TAG_STRING: u8 = 7;
const TAG_LIST: u8 = 12;
const TAG_MAP: u8 = 13;

// Extension tags, chosen above the base format's reserved range.
const TAG_AD_SIZE: u8 = 128;
const TAG_AD_ERROR: u8 = 129;
const TAG_RESPONSE_INFO: u8 = 130;

/// Decode errors with positional context
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer ended before the value being read was complete
    #[error("unexpected end of message: need {need} more bytes at offset {offset}")]
    UnexpectedEof { offset: usize, need: usize },

    /// Type tag is not part of the base format subset or the ad
    /// extension range
    #[error("unknown type tag {tag} at offset {offset}")]
    UnknownTypeTag { tag: u8, offset: usize },

    /// A fixed field of an extension type had the wrong tag
    #[error("expected {expected} at offset {offset}, found tag {found}")]
    UnexpectedType {
        expected: &'static str,
        found: u8,
        offset: usize,
    },

    /// String payload is not valid UTF-8
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// Bytes remained after the top-level value was decoded
    #[error("trailing bytes after message: {remaining} bytes left")]
    TrailingBytes { remaining: usize },
}

/// A value expressible in the bridge message format
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeValue {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    Str(String),
    List(Vec<BridgeValue>),
    /// Ordered key/value pairs; the far side decodes into its own map
    /// type, so ordering only has to be stable, not sorted
    Map(Vec<(BridgeValue, BridgeValue)>),
    AdSize(AdSize),
    AdError(AdError),
    ResponseInfo(ResponseInfo),
}

impl From<&str> for BridgeValue {
    fn from(s: &str) -> Self {
        BridgeValue::Str(s.to_string())
    }
}

impl From<i32> for BridgeValue {
    fn from(v: i32) -> Self {
        BridgeValue::I32(v)
    }
}

impl From<AdSize> for BridgeValue {
    fn from(v: AdSize) -> Self {
        BridgeValue::AdSize(v)
    }
}

impl From<AdError> for BridgeValue {
    fn from(v: AdError) -> Self {
        BridgeValue::AdError(v)
    }
}

impl From<ResponseInfo> for BridgeValue {
    fn from(v: ResponseInfo) -> Self {
        BridgeValue::ResponseInfo(v)
    }
}

/// Encode a value into the bridge's binary message format
pub fn encode_message(value: &BridgeValue) -> Vec<u8> {
    let mut buf = Vec::new();
    write_value(&mut buf, value);
    buf
}

/// Decode a single value from the bridge's binary message format
///
/// Rejects trailing bytes after the top-level value.
pub fn decode_message(bytes: &[u8]) -> Result<BridgeValue, CodecError> {
    let mut reader = Reader::new(bytes);
    let value = reader.read_value()?;
    let remaining = bytes.len() - reader.pos;
    if remaining != 0 {
        return Err(CodecError::TrailingBytes { remaining });
    }
    Ok(value)
}

fn write_value(buf: &mut Vec<u8>, value: &BridgeValue) {
    match value {
        BridgeValue::Null => buf.push(TAG_NULL),
        BridgeValue::Bool(true) => buf.push(TAG_TRUE),
        BridgeValue::Bool(false) => buf.push(TAG_FALSE),
        BridgeValue::I32(v) => write_i32(buf, *v),
        BridgeValue::I64(v) => {
            buf.push(TAG_INT64);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        BridgeValue::F64(v) => {
            buf.push(TAG_FLOAT64);
            write_alignment(buf, 8);
            buf.extend_from_slice(&v.to_le_bytes());
        }
        BridgeValue::Str(s) => write_str(buf, s),
        BridgeValue::List(items) => {
            buf.push(TAG_LIST);
            write_size(buf, items.len());
            for item in items {
                write_value(buf, item);
            }
        }
        BridgeValue::Map(entries) => {
            buf.push(TAG_MAP);
            write_size(buf, entries.len());
            for (key, val) in entries {
                write_value(buf, key);
                write_value(buf, val);
            }
        }
        BridgeValue::AdSize(size) => {
            buf.push(TAG_AD_SIZE);
            write_i32(buf, size.width);
            write_i32(buf, size.height);
        }
        BridgeValue::AdError(error) => {
            buf.push(TAG_AD_ERROR);
            write_i32(buf, error.code);
            write_str(buf, &error.message);
            write_i32(buf, error.mediated_code);
            write_str(buf, &error.mediated_message);
        }
        BridgeValue::ResponseInfo(info) => {
            buf.push(TAG_RESPONSE_INFO);
            write_str(buf, &info.network_name);
            write_str(buf, &info.network_placement);
            write_opt_str(buf, info.placement.as_deref());
            write_opt_str(buf, info.creative_id.as_deref());
            write_opt_str(buf, info.revenue.as_deref());
            write_opt_str(buf, info.dsp_name.as_deref());
        }
    }
}

fn write_i32(buf: &mut Vec<u8>, v: i32) {
    buf.push(TAG_INT32);
    buf.extend_from_slice(&v.to_le_bytes());
}

fn write_str(buf: &mut Vec<u8>, s: &str) {
    buf.push(TAG_STRING);
    write_size(buf, s.len());
    buf.extend_from_slice(s.as_bytes());
}

fn write_opt_str(buf: &mut Vec<u8>, s: Option<&str>) {
    match s {
        Some(s) => write_str(buf, s),
        None => buf.push(TAG_NULL),
    }
}

fn write_size(buf: &mut Vec<u8>, size: usize) {
    if size < 254 {
        buf.push(size as u8);
    } else if size <= 0xFFFF {
        buf.push(254);
        buf.extend_from_slice(&(size as u16).to_le_bytes());
    } else {
        buf.push(255);
        buf.extend_from_slice(&(size as u32).to_le_bytes());
    }
}

fn write_alignment(buf: &mut Vec<u8>, alignment: usize) {
    let excess = buf.len() % alignment;
    if excess != 0 {
        buf.resize(buf.len() + alignment - excess, 0);
    }
}

/// Bounds-checked forward-only cursor over a message buffer
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        let available = self.buf.len() - self.pos;
        if len > available {
            return Err(CodecError::UnexpectedEof {
                offset: self.pos,
                need: len - available,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    fn align(&mut self, alignment: usize) -> Result<(), CodecError> {
        let excess = self.pos % alignment;
        if excess != 0 {
            self.take(alignment - excess)?;
        }
        Ok(())
    }

    fn read_size(&mut self) -> Result<usize, CodecError> {
        match self.read_u8()? {
            254 => {
                let bytes: [u8; 2] = self.take(2)?.try_into().unwrap();
                Ok(u16::from_le_bytes(bytes) as usize)
            }
            255 => {
                let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
                Ok(u32::from_le_bytes(bytes) as usize)
            }
            size => Ok(size as usize),
        }
    }

    fn read_value(&mut self) -> Result<BridgeValue, CodecError> {
        let tag_offset = self.pos;
        let tag = self.read_u8()?;
        self.read_value_of_tag(tag, tag_offset)
    }

    fn read_value_of_tag(&mut self, tag: u8, tag_offset: usize) -> Result<BridgeValue, CodecError> {
        match tag {
            TAG_NULL => Ok(BridgeValue::Null),
            TAG_TRUE => Ok(BridgeValue::Bool(true)),
            TAG_FALSE => Ok(BridgeValue::Bool(false)),
            TAG_INT32 => {
                let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
                Ok(BridgeValue::I32(i32::from_le_bytes(bytes)))
            }
            TAG_INT64 => {
                let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
                Ok(BridgeValue::I64(i64::from_le_bytes(bytes)))
            }
            TAG_FLOAT64 => {
                self.align(8)?;
                let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
                Ok(BridgeValue::F64(f64::from_le_bytes(bytes)))
            }
            TAG_STRING => Ok(BridgeValue::Str(self.read_string_body()?)),
            TAG_LIST => {
                let len = self.read_size()?;
                let mut items = Vec::new();
                for _ in 0..len {
                    items.push(self.read_value()?);
                }
                Ok(BridgeValue::List(items))
            }
            TAG_MAP => {
                let len = self.read_size()?;
                let mut entries = Vec::new();
                for _ in 0..len {
                    let key = self.read_value()?;
                    let val = self.read_value()?;
                    entries.push((key, val));
                }
                Ok(BridgeValue::Map(entries))
            }
            TAG_AD_SIZE => {
                let width = self.expect_i32("AdSize.width as int32")?;
                let height = self.expect_i32("AdSize.height as int32")?;
                Ok(BridgeValue::AdSize(AdSize::new(width, height)))
            }
            TAG_AD_ERROR => {
                let code = self.expect_i32("AdError.code as int32")?;
                let message = self.expect_str("AdError.message as string")?;
                let mediated_code = self.expect_i32("AdError.mediatedCode as int32")?;
                let mediated_message = self.expect_str("AdError.mediatedMessage as string")?;
                Ok(BridgeValue::AdError(AdError::new(
                    code,
                    message,
                    mediated_code,
                    mediated_message,
                )))
            }
            TAG_RESPONSE_INFO => {
                let network_name = self.expect_str("ResponseInfo.networkName as string")?;
                let network_placement =
                    self.expect_str("ResponseInfo.networkPlacement as string")?;
                let placement = self.expect_opt_str("ResponseInfo.placement as string or null")?;
                let creative_id =
                    self.expect_opt_str("ResponseInfo.creativeId as string or null")?;
                let revenue = self.expect_opt_str("ResponseInfo.revenue as string or null")?;
                let dsp_name = self.expect_opt_str("ResponseInfo.dspName as string or null")?;
                Ok(BridgeValue::ResponseInfo(ResponseInfo {
                    network_name,
                    network_placement,
                    placement,
                    creative_id,
                    revenue,
                    dsp_name,
                }))
            }
            _ => Err(CodecError::UnknownTypeTag {
                tag,
                offset: tag_offset,
            }),
        }
    }

    fn read_string_body(&mut self) -> Result<String, CodecError> {
        let len = self.read_size()?;
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }

    fn expect_i32(&mut self, expected: &'static str) -> Result<i32, CodecError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        if tag != TAG_INT32 {
            return Err(CodecError::UnexpectedType {
                expected,
                found: tag,
                offset,
            });
        }
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(i32::from_le_bytes(bytes))
    }

    fn expect_str(&mut self, expected: &'static str) -> Result<String, CodecError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        if tag != TAG_STRING {
            return Err(CodecError::UnexpectedType {
                expected,
                found: tag,
                offset,
            });
        }
        self.read_string_body()
    }

    fn expect_opt_str(&mut self, expected: &'static str) -> Result<Option<String>, CodecError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        match tag {
            TAG_NULL => Ok(None),
            TAG_STRING => Ok(Some(self.read_string_body()?)),
            _ => Err(CodecError::UnexpectedType {
                expected,
                found: tag,
                offset,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: BridgeValue) -> BridgeValue {
        decode_message(&encode_message(&value)).expect("decode succeeds")
    }

    #[test]
    fn scalars_round_trip() {
        for value in [
            BridgeValue::Null,
            BridgeValue::Bool(true),
            BridgeValue::Bool(false),
            BridgeValue::I32(-7),
            BridgeValue::I64(1 << 40),
            BridgeValue::Str("hello".to_string()),
            BridgeValue::Str(String::new()),
        ] {
            assert_eq!(round_trip(value.clone()), value);
        }
    }

    #[test]
    fn f64_round_trips_with_alignment_padding() {
        // A one-byte string key pushes the f64 payload off the 8-byte
        // boundary, forcing the writer to pad.
        let value = BridgeValue::Map(vec![(
            BridgeValue::Str("a".to_string()),
            BridgeValue::F64(1.5),
        )]);
        let bytes = encode_message(&value);
        assert_eq!(bytes.len(), 16);
        assert_eq!(decode_message(&bytes).unwrap(), value);
    }

    #[test]
    fn ad_size_round_trips() {
        let value = BridgeValue::AdSize(AdSize::new(300, 250));
        assert_eq!(round_trip(value.clone()), value);
    }

    #[test]
    fn ad_size_uses_reserved_tag() {
        let bytes = encode_message(&BridgeValue::AdSize(AdSize::new(300, 250)));
        assert_eq!(bytes[0], 128);
    }

    #[test]
    fn ad_error_round_trips() {
        let value = BridgeValue::AdError(AdError::new(204, "no fill", -5001, "timeout"));
        let bytes = encode_message(&value);
        assert_eq!(bytes[0], 129);
        assert_eq!(decode_message(&bytes).unwrap(), value);
    }

    #[test]
    fn response_info_round_trips_with_all_fields() {
        let info = ResponseInfo::new("net", "slot")
            .with_placement("home")
            .with_creative_id("c-1")
            .with_revenue("0.0042")
            .with_dsp_name("dsp");
        let value = BridgeValue::ResponseInfo(info);
        let bytes = encode_message(&value);
        assert_eq!(bytes[0], 130);
        assert_eq!(decode_message(&bytes).unwrap(), value);
    }

    #[test]
    fn response_info_round_trips_with_absent_optionals() {
        let combos = [
            ResponseInfo::new("net", "slot"),
            ResponseInfo::new("net", "slot").with_revenue("0"),
            ResponseInfo::new("net", "slot").with_placement("p").with_dsp_name("d"),
        ];
        for info in combos {
            let value = BridgeValue::ResponseInfo(info);
            assert_eq!(round_trip(value.clone()), value);
        }
    }

    #[test]
    fn event_message_shape_round_trips() {
        let value = BridgeValue::Map(vec![
            (BridgeValue::from("adId"), BridgeValue::I32(7)),
            (BridgeValue::from("eventName"), BridgeValue::from("onAdLoaded")),
            (
                BridgeValue::from("responseInfo"),
                BridgeValue::ResponseInfo(ResponseInfo::new("net", "slot")),
            ),
        ]);
        assert_eq!(round_trip(value.clone()), value);
    }

    #[test]
    fn nested_lists_round_trip() {
        let value = BridgeValue::List(vec![
            BridgeValue::Null,
            BridgeValue::List(vec![BridgeValue::I32(1), BridgeValue::I32(2)]),
            BridgeValue::AdSize(AdSize::new(320, 50)),
        ]);
        assert_eq!(round_trip(value.clone()), value);
    }

    #[test]
    fn size_prefix_wide_forms_round_trip() {
        // 300 exercises the u16 size form, 70_000 the u32 form.
        for len in [253usize, 254, 300, 70_000] {
            let value = BridgeValue::Str("x".repeat(len));
            assert_eq!(round_trip(value.clone()), value);
        }
    }

    #[test]
    fn empty_message_is_rejected() {
        assert!(matches!(
            decode_message(&[]),
            Err(CodecError::UnexpectedEof { offset: 0, .. })
        ));
    }

    #[test]
    fn unknown_tag_is_rejected_with_offset() {
        assert_eq!(
            decode_message(&[99]),
            Err(CodecError::UnknownTypeTag { tag: 99, offset: 0 })
        );
    }

    #[test]
    fn truncated_string_is_rejected() {
        // String tag claiming 5 bytes with only one present.
        assert!(matches!(
            decode_message(&[7, 5, b'a']),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn ad_size_with_wrong_field_tag_is_rejected() {
        // Tag 128 followed by a string where width:int32 is required.
        let err = decode_message(&[128, 7, 0]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedType {
                found: 7,
                offset: 1,
                ..
            }
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode_message(&BridgeValue::Null);
        bytes.push(0);
        assert_eq!(
            decode_message(&bytes),
            Err(CodecError::TrailingBytes { remaining: 1 })
        );
    }
}
