//! Varint-length-delimited message framing.
//!
//! Each frame on the wire is an unsigned LEB128 varint giving the payload
//! length in bytes, followed by exactly that many bytes of a serialized
//! protocol message. Decoding is resumable: bytes accumulate in an internal
//! buffer across partial reads, and a frame is surfaced only once it is
//! complete. The codec knows nothing about message kinds.

use bytes::{Buf, Bytes, BytesMut};
use prost::Message;

use crate::error::{Result, ServerError};

/// Longest legal encoding of a u64 varint.
const MAX_VARINT_LEN: usize = 10;

/// Streaming decoder for length-prefixed frames.
///
/// The read loop appends socket bytes to [`buffer_mut`](Self::buffer_mut)
/// and then calls [`decode_frame`](Self::decode_frame) until it reports that
/// more data is needed.
pub struct FrameCodec {
    buffer: BytesMut,
    max_frame_size: usize,
}

impl FrameCodec {
    /// Create a codec enforcing the given maximum payload length.
    pub fn new(max_frame_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(64 * 1024),
            max_frame_size,
        }
    }

    /// The accumulation buffer to read socket bytes into.
    pub fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buffer
    }

    /// Try to extract the next complete frame payload.
    ///
    /// Returns:
    /// - `Ok(Some(payload))` if a complete frame was extracted
    /// - `Ok(None)` if more data is needed
    /// - `Err(ServerError::Framing)` on a malformed or oversized length prefix
    pub fn decode_frame(&mut self) -> Result<Option<Bytes>> {
        let (length, prefix_len) = match peek_varint(&self.buffer)? {
            Some(decoded) => decoded,
            None => return Ok(None),
        };

        if length > self.max_frame_size as u64 {
            return Err(ServerError::Framing(format!(
                "declared length {} exceeds maximum {}",
                length, self.max_frame_size
            )));
        }
        let length = length as usize;

        if self.buffer.len() < prefix_len + length {
            // Partial payload; reserve up front so the pending reads land in
            // one contiguous allocation.
            self.buffer.reserve(prefix_len + length - self.buffer.len());
            return Ok(None);
        }

        self.buffer.advance(prefix_len);
        Ok(Some(self.buffer.split_to(length).freeze()))
    }
}

/// Decode a varint from the start of `buf` without consuming it.
///
/// `Ok(None)` means the prefix itself is still incomplete.
fn peek_varint(buf: &[u8]) -> Result<Option<(u64, usize)>> {
    let mut value = 0u64;
    for (i, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        value |= u64::from(byte & 0x7f) << (i * 7);
        if byte & 0x80 == 0 {
            // The tenth byte may only contribute the single remaining bit.
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(ServerError::Framing(
                    "length prefix overflows u64".to_string(),
                ));
            }
            return Ok(Some((value, i + 1)));
        }
    }
    if buf.len() >= MAX_VARINT_LEN {
        return Err(ServerError::Framing(
            "malformed length prefix: no terminating byte".to_string(),
        ));
    }
    Ok(None)
}

/// Serialize `message` into `dst` with its varint length prefix.
pub fn encode_frame<M: Message>(message: &M, dst: &mut BytesMut) {
    let len = message.encoded_len();
    dst.reserve(len + prost::encoding::encoded_len_varint(len as u64));
    prost::encoding::encode_varint(len as u64, dst);
    // encode_raw rather than encode: BytesMut grows on demand, so the
    // capacity check encode performs cannot fail here.
    message.encode_raw(dst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use xenon_proto::{request, EchoRequest, Request};

    fn echo_frame(message: &str) -> (Request, Vec<u8>) {
        let request: Request = request::Value::Echo(EchoRequest {
            message: message.to_string(),
        })
        .into();
        let mut buf = BytesMut::new();
        encode_frame(&request, &mut buf);
        (request, buf.to_vec())
    }

    #[test]
    fn test_roundtrip() {
        let (request, wire) = echo_frame("ping");

        let mut codec = FrameCodec::new(1024);
        codec.buffer_mut().extend_from_slice(&wire);

        let payload = codec.decode_frame().unwrap().expect("complete frame");
        let decoded = Request::decode(payload).unwrap();
        assert_eq!(decoded, request);
        assert!(codec.decode_frame().unwrap().is_none());
    }

    #[test]
    fn test_partial_delivery_at_every_offset() {
        let (request, wire) = echo_frame("partial delivery exercise");

        for split in 1..wire.len() {
            let mut codec = FrameCodec::new(1024);
            codec.buffer_mut().extend_from_slice(&wire[..split]);
            assert!(
                codec.decode_frame().unwrap().is_none(),
                "split at {split} yielded a frame early"
            );

            codec.buffer_mut().extend_from_slice(&wire[split..]);
            let payload = codec.decode_frame().unwrap().expect("complete frame");
            let decoded = Request::decode(payload).unwrap();
            assert_eq!(decoded, request, "split at {split}");
        }
    }

    #[test]
    fn test_multiple_frames_in_one_read() {
        let (first, wire_a) = echo_frame("one");
        let (second, wire_b) = echo_frame("two");

        let mut codec = FrameCodec::new(1024);
        codec.buffer_mut().extend_from_slice(&wire_a);
        codec.buffer_mut().extend_from_slice(&wire_b);

        let a = Request::decode(codec.decode_frame().unwrap().unwrap()).unwrap();
        let b = Request::decode(codec.decode_frame().unwrap().unwrap()).unwrap();
        assert_eq!(a, first);
        assert_eq!(b, second);
        assert!(codec.decode_frame().unwrap().is_none());
    }

    #[test]
    fn test_empty_payload_frame() {
        let mut codec = FrameCodec::new(1024);
        codec.buffer_mut().extend_from_slice(&[0x00]);

        let payload = codec.decode_frame().unwrap().expect("zero-length frame");
        assert!(payload.is_empty());
    }

    #[test]
    fn test_oversized_declared_length() {
        let (_, wire) = echo_frame("this payload is longer than ten bytes");

        let mut codec = FrameCodec::new(10);
        codec.buffer_mut().extend_from_slice(&wire);

        // The error must fire on the prefix alone, before the payload lands.
        let err = codec.decode_frame().unwrap_err();
        assert!(matches!(err, ServerError::Framing(_)));
    }

    #[test]
    fn test_malformed_prefix() {
        let mut codec = FrameCodec::new(1024);

        // Nine continuation bytes: still a legal, incomplete prefix.
        codec.buffer_mut().extend_from_slice(&[0x80; 9]);
        assert!(codec.decode_frame().unwrap().is_none());

        // A tenth continuation byte can never terminate a u64 varint.
        codec.buffer_mut().extend_from_slice(&[0x80]);
        let err = codec.decode_frame().unwrap_err();
        assert!(matches!(err, ServerError::Framing(_)));
    }

    #[test]
    fn test_prefix_overflow() {
        let mut codec = FrameCodec::new(1024);
        let mut wire = vec![0xff; 9];
        wire.push(0x02); // bit 64 set
        codec.buffer_mut().extend_from_slice(&wire);

        let err = codec.decode_frame().unwrap_err();
        assert!(matches!(err, ServerError::Framing(_)));
    }

    #[test]
    fn test_encode_prefix_matches_payload_len() {
        let (_, wire) = echo_frame("x");
        let (length, prefix_len) = peek_varint(&wire).unwrap().unwrap();
        assert_eq!(wire.len(), prefix_len + length as usize);
    }
}
