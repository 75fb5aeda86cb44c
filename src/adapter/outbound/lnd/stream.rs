//! WebSocket-backed stream halves.
//!
//! Text frames carry JSON envelopes (see [`dto`](super::dto)). Pings are
//! answered by tungstenite itself on the next read or write; a close frame
//! or the end of the socket ends the stream.

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use super::dto::{ChannelAcceptRequestDto, ChannelAcceptResponseDto, StreamFrame};
use crate::domain::{ChannelOpenDecision, ChannelOpenRequest, FeedEvent, FeedKind};
use crate::error::Result;
use crate::port::{ChannelDecisionSink, ChannelRequestStream, EventFeed};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Next text frame, or `None` once the socket is closed.
async fn next_text<S>(source: &mut S, stream: &str) -> Option<Result<String>>
where
    S: futures_util::Stream<Item = std::result::Result<Message, tokio_tungstenite::tungstenite::Error>>
        + Unpin,
{
    loop {
        match source.next().await? {
            Ok(Message::Text(text)) => {
                trace!(stream, bytes = text.len(), "Received WebSocket text frame");
                return Some(Ok(text));
            }
            Ok(Message::Close(frame)) => {
                debug!(stream, frame = ?frame, "WebSocket closed by node");
                return None;
            }
            Ok(_) => {}
            Err(e) => return Some(Err(e.into())),
        }
    }
}

/// Inbound half of the channel acceptor socket.
pub(crate) struct WsRequestStream {
    source: SplitStream<WsStream>,
}

impl WsRequestStream {
    pub(crate) fn new(source: SplitStream<WsStream>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ChannelRequestStream for WsRequestStream {
    async fn next_request(&mut self) -> Option<Result<ChannelOpenRequest>> {
        let text = match next_text(&mut self.source, "channel_acceptor").await? {
            Ok(text) => text,
            Err(e) => return Some(Err(e)),
        };
        Some(parse_request(&text))
    }
}

fn parse_request(text: &str) -> Result<ChannelOpenRequest> {
    let frame: StreamFrame<ChannelAcceptRequestDto> = serde_json::from_str(text)?;
    Ok(frame.into_result()?.into())
}

/// Outbound half of the channel acceptor socket.
pub(crate) struct WsDecisionSink {
    sink: SplitSink<WsStream, Message>,
}

impl WsDecisionSink {
    pub(crate) fn new(sink: SplitSink<WsStream, Message>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl ChannelDecisionSink for WsDecisionSink {
    async fn send_decision(&mut self, decision: &ChannelOpenDecision) -> Result<()> {
        let json = serde_json::to_string(&ChannelAcceptResponseDto::from(decision))?;
        self.sink.send(Message::Text(json)).await?;
        Ok(())
    }
}

/// A server-streaming subscription.
pub(crate) struct WsFeed {
    kind: FeedKind,
    ws: WsStream,
}

impl WsFeed {
    pub(crate) fn new(kind: FeedKind, ws: WsStream) -> Self {
        Self { kind, ws }
    }
}

#[async_trait]
impl EventFeed for WsFeed {
    async fn next_event(&mut self) -> Option<Result<FeedEvent>> {
        let text = match next_text(&mut self.ws, self.kind.as_str()).await? {
            Ok(text) => text,
            Err(e) => return Some(Err(e)),
        };
        let event = serde_json::from_str::<StreamFrame<serde_json::Value>>(&text)
            .map_err(Into::into)
            .and_then(StreamFrame::into_result)
            .map(|payload| FeedEvent::new(self.kind, payload));
        Some(event)
    }
}
