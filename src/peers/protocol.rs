//! Wire messages exchanged between peers.

use prost::Message;

use crate::error::{CacheError, Result};

// == Path Segments ==
/// Prefix marking a dot segment; `!` is always percent-encoded otherwise.
const DOT_SEGMENT_MARKER: char = '!';

/// Percent-encodes one path segment.
///
/// `.` and `..` would be collapsed by URL normalization before they reach the
/// peer, so they travel as `!.` and `!..`.
pub fn escape_segment(segment: &str) -> String {
    if is_dot_segment(segment) {
        format!("{}{}", DOT_SEGMENT_MARKER, segment)
    } else {
        urlencoding::encode(segment).into_owned()
    }
}

/// Reverses [`escape_segment`].
pub fn unescape_segment(raw: &str) -> Result<String> {
    if let Some(dots) = raw.strip_prefix(DOT_SEGMENT_MARKER) {
        if is_dot_segment(dots) {
            return Ok(dots.to_string());
        }
    }
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|e| CacheError::InvalidRequest(format!("segment {}: {}", raw, e)))
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

// == Response ==
/// Body of a successful peer reply.
#[derive(Clone, PartialEq, Message)]
pub struct Response {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

impl Response {
    pub fn new(value: Vec<u8>) -> Self {
        Self { value }
    }

    /// Serializes the message to its protobuf form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Parses a protobuf body.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        Self::decode(body).map_err(|e| CacheError::Decode(e.to_string()))
    }
}
