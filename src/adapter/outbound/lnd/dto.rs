//! REST gateway JSON messages.
//!
//! Streaming endpoints wrap every message in an envelope:
//! ```json
//! {"result": {...}}
//! {"error": {"code": 2, "message": "..."}}
//! ```
//! Byte fields are base64 and 64-bit integers are decimal strings.

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{ChannelOpenDecision, ChannelOpenRequest, PeerPubkey, PendingChanId};
use crate::error::{Error, Result};

/// One frame of a server stream.
#[derive(Debug, Deserialize)]
pub struct StreamFrame<T> {
    pub result: Option<T>,
    pub error: Option<GatewayError>,
}

impl<T> StreamFrame<T> {
    /// The payload, or the gateway error as [`Error::Protocol`].
    pub fn into_result(self) -> Result<T> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(Error::Protocol(error.to_string())),
            (Some(result), None) => Ok(result),
            (None, None) => Err(Error::Protocol("frame without result or error".into())),
        }
    }
}

/// Error body produced by the gateway.
#[derive(Debug, Deserialize)]
pub struct GatewayError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// `lnrpc.ChannelAcceptRequest`, reduced to what the policy needs.
#[derive(Debug, Deserialize)]
pub struct ChannelAcceptRequestDto {
    #[serde(default, deserialize_with = "base64_bytes")]
    pub node_pubkey: Vec<u8>,
    #[serde(default, deserialize_with = "base64_bytes")]
    pub pending_chan_id: Vec<u8>,
    #[serde(default, deserialize_with = "string_u64")]
    pub funding_amt: u64,
    #[serde(default, deserialize_with = "string_u64")]
    pub push_amt: u64,
}

impl From<ChannelAcceptRequestDto> for ChannelOpenRequest {
    fn from(dto: ChannelAcceptRequestDto) -> Self {
        Self {
            pending_chan_id: PendingChanId::new(dto.pending_chan_id),
            peer_pubkey: PeerPubkey::from_bytes(&dto.node_pubkey),
            funding_amt: dto.funding_amt,
            push_amt: dto.push_amt,
        }
    }
}

/// `lnrpc.ChannelAcceptResponse`.
#[derive(Debug, Serialize)]
pub struct ChannelAcceptResponseDto<'a> {
    pub accept: bool,
    #[serde(serialize_with = "base64_string")]
    pub pending_chan_id: &'a [u8],
}

impl<'a> From<&'a ChannelOpenDecision> for ChannelAcceptResponseDto<'a> {
    fn from(decision: &'a ChannelOpenDecision) -> Self {
        Self {
            accept: decision.accept,
            pending_chan_id: decision.pending_chan_id.as_bytes(),
        }
    }
}

/// `lnrpc.NodeInfo`; only the channel count matters.
#[derive(Debug, Deserialize)]
pub struct NodeInfoDto {
    #[serde(default)]
    pub num_channels: u32,
}

fn base64_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(&encoded)
        .or_else(|_| URL_SAFE.decode(&encoded))
        .map_err(de::Error::custom)
}

fn base64_string<S: Serializer>(bytes: &&[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U64Repr {
    Number(u64),
    Text(String),
}

fn string_u64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match U64Repr::deserialize(deserializer)? {
        U64Repr::Number(n) => Ok(n),
        U64Repr::Text(s) => s.parse().map_err(de::Error::custom),
    }
}
