//! # Socket.IO frame codec for the live chat
//!
//! The chat server speaks Socket.IO v5 on top of Engine.IO v4. Only the
//! WebSocket transport is used, so every WebSocket text frame is exactly one
//! Engine.IO packet:
//!
//! ```text
//! 0{"sid":"...","pingInterval":25000,...}   open
//! 2                                         ping  -> answer "3"
//! 40                                        namespace connected
//! 42["receiveMessage",{...}]                event
//! ```
//!
//! [`ChatProtocol`] is the transport-agnostic half of the connection: feed it
//! each inbound text frame and it returns the frames to write back plus the
//! chat events to hand to the view. The platform code in the `ui` crate only
//! moves strings between it and a WebSocket.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, Result};
use crate::models::ChatMessage;

pub const LOAD_MESSAGES: &str = "loadMessages";
pub const RECEIVE_MESSAGE: &str = "receiveMessage";
pub const SEND_MESSAGE: &str = "sendMessage";

/// Engine.IO open handshake payload.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    #[serde(default)]
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// One Engine.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn decode(frame: &str) -> Result<Self> {
        let mut chars = frame.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ApiError::Socket("empty frame".into()))?;
        let data = chars.as_str();
        Ok(match kind {
            '0' => EnginePacket::Open(serde_json::from_str(data)?),
            '1' => EnginePacket::Close,
            '2' => EnginePacket::Ping(data.to_string()),
            '3' => EnginePacket::Pong(data.to_string()),
            '4' => EnginePacket::Message(data.to_string()),
            '5' => EnginePacket::Upgrade,
            '6' => EnginePacket::Noop,
            other => {
                return Err(ApiError::Socket(format!(
                    "unknown engine packet type {other:?}"
                )))
            }
        })
    }

    pub fn encode(&self) -> String {
        match self {
            EnginePacket::Open(_) => "0".to_string(),
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(data) => format!("2{data}"),
            EnginePacket::Pong(data) => format!("3{data}"),
            EnginePacket::Message(data) => format!("4{data}"),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        }
    }
}

/// One Socket.IO packet, carried inside an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect,
    Disconnect,
    Event { name: String, payload: Value },
    ConnectError(String),
    /// Ack and binary packets. The chat never requests either.
    Unsupported(char),
}

impl SocketPacket {
    pub fn decode(data: &str) -> Result<Self> {
        let mut chars = data.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ApiError::Socket("empty socket packet".into()))?;
        let mut rest = chars.as_str();

        // Optional "/namespace," prefix.
        if rest.starts_with('/') {
            rest = match rest.find(',') {
                Some(idx) => &rest[idx + 1..],
                None => "",
            };
        }
        // Optional ack id.
        let body = rest.trim_start_matches(|c: char| c.is_ascii_digit());

        Ok(match kind {
            '0' => SocketPacket::Connect,
            '1' => SocketPacket::Disconnect,
            '2' => {
                let mut args: Vec<Value> = serde_json::from_str(body)?;
                if args.is_empty() {
                    return Err(ApiError::Socket("event without a name".into()));
                }
                let name = match args.remove(0) {
                    Value::String(name) => name,
                    other => {
                        return Err(ApiError::Socket(format!("event name {other} is not a string")))
                    }
                };
                let payload = if args.is_empty() {
                    Value::Null
                } else {
                    args.remove(0)
                };
                SocketPacket::Event { name, payload }
            }
            '4' => SocketPacket::ConnectError(body.to_string()),
            other => SocketPacket::Unsupported(other),
        })
    }

    /// Encode as the payload of an Engine.IO message (without the leading `4`).
    pub fn encode(&self) -> String {
        match self {
            SocketPacket::Connect => "0".to_string(),
            SocketPacket::Disconnect => "1".to_string(),
            SocketPacket::Event { name, payload } => {
                let args = Value::Array(vec![Value::String(name.clone()), payload.clone()]);
                format!("2{args}")
            }
            SocketPacket::ConnectError(msg) => format!("4{msg}"),
            SocketPacket::Unsupported(kind) => kind.to_string(),
        }
    }
}

/// Chat events the view cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Namespace joined; the backlog follows.
    Connected,
    Backlog(Vec<ChatMessage>),
    Received(ChatMessage),
    Closed,
}

/// What the transport must do after a frame was processed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub replies: Vec<String>,
    pub events: Vec<ChatEvent>,
}

/// Per-connection protocol state.
#[derive(Debug, Default)]
pub struct ChatProtocol {
    handshake: Option<Handshake>,
    connected: bool,
}

impl ChatProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn handshake(&self) -> Option<&Handshake> {
        self.handshake.as_ref()
    }

    /// Process one inbound text frame.
    pub fn on_frame(&mut self, frame: &str) -> Result<Step> {
        let mut step = Step::default();
        match EnginePacket::decode(frame)? {
            EnginePacket::Open(handshake) => {
                tracing::debug!(sid = %handshake.sid, "engine.io open");
                self.handshake = Some(handshake);
                step.replies
                    .push(EnginePacket::Message(SocketPacket::Connect.encode()).encode());
            }
            EnginePacket::Ping(data) => {
                step.replies.push(EnginePacket::Pong(data).encode());
            }
            EnginePacket::Close => {
                self.connected = false;
                step.events.push(ChatEvent::Closed);
            }
            EnginePacket::Message(data) => self.on_socket_packet(&data, &mut step)?,
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {}
        }
        Ok(step)
    }

    fn on_socket_packet(&mut self, data: &str, step: &mut Step) -> Result<()> {
        match SocketPacket::decode(data)? {
            SocketPacket::Connect => {
                self.connected = true;
                step.events.push(ChatEvent::Connected);
            }
            SocketPacket::Disconnect => {
                self.connected = false;
                step.events.push(ChatEvent::Closed);
            }
            SocketPacket::Event { name, payload } => match name.as_str() {
                LOAD_MESSAGES => {
                    let messages: Vec<ChatMessage> = serde_json::from_value(payload)?;
                    step.events.push(ChatEvent::Backlog(messages));
                }
                RECEIVE_MESSAGE => {
                    let message: ChatMessage = serde_json::from_value(payload)?;
                    step.events.push(ChatEvent::Received(message));
                }
                other => tracing::debug!(event = other, "ignoring socket event"),
            },
            SocketPacket::ConnectError(reason) => {
                return Err(ApiError::Socket(format!("connect refused: {reason}")));
            }
            SocketPacket::Unsupported(kind) => {
                tracing::debug!(%kind, "ignoring socket packet")
            }
        }
        Ok(())
    }
}

/// Full text frame for a `sendMessage` event.
pub fn encode_send_message(message: &ChatMessage) -> Result<String> {
    let packet = SocketPacket::Event {
        name: SEND_MESSAGE.to_string(),
        payload: serde_json::to_value(message)?,
    };
    Ok(EnginePacket::Message(packet.encode()).encode())
}

/// WebSocket URL for a Socket.IO server at `base`: the matching `ws`/`wss`
/// scheme, the `/socket.io/` endpoint under the base path and the Engine.IO
/// handshake query.
pub fn websocket_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| ApiError::Url(format!("{base}: {e}")))?;
    let scheme = match url.scheme() {
        "https" | "wss" => "wss",
        "http" | "ws" => "ws",
        other => return Err(ApiError::Url(format!("{base}: unsupported scheme {other}"))),
    };
    url.set_scheme(scheme)
        .map_err(|()| ApiError::Url(format!("{base}: cannot switch to {scheme}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::Url(format!("{base} cannot be a base")))?
        .pop_if_empty()
        .push("socket.io")
        .push("");
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair("EIO", "4")
        .append_pair("transport", "websocket");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_then_ping() {
        let mut proto = ChatProtocol::new();
        let step = proto
            .on_frame(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#)
            .unwrap();
        assert_eq!(step.replies, vec!["40".to_string()]);
        assert_eq!(proto.handshake().unwrap().ping_interval, 25000);

        let step = proto.on_frame("2").unwrap();
        assert_eq!(step.replies, vec!["3".to_string()]);
        assert!(step.events.is_empty());

        let step = proto.on_frame("40{\"sid\":\"xyz\"}").unwrap();
        assert_eq!(step.events, vec![ChatEvent::Connected]);
        assert!(proto.is_connected());
    }

    #[test]
    fn test_backlog_and_push_events() {
        let mut proto = ChatProtocol::new();
        let step = proto
            .on_frame(r#"42["loadMessages",[{"id":"m1","text":"a"},{"id":"m2","text":"b"}]]"#)
            .unwrap();
        match &step.events[..] {
            [ChatEvent::Backlog(list)] => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[1].id, "m2");
            }
            other => panic!("unexpected events {other:?}"),
        }

        let step = proto
            .on_frame(r#"42["receiveMessage",{"id":"m3","text":"c","replyTo":{"id":"m1","text":"a"}}]"#)
            .unwrap();
        match &step.events[..] {
            [ChatEvent::Received(msg)] => {
                assert_eq!(msg.reply_to.as_ref().unwrap().id, "m1");
            }
            other => panic!("unexpected events {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        let mut proto = ChatProtocol::new();
        let step = proto.on_frame(r#"42["typing",{"user":"ann"}]"#).unwrap();
        assert_eq!(step, Step::default());
    }

    #[test]
    fn test_namespace_and_ack_id_are_tolerated() {
        let packet = SocketPacket::decode(r#"2/chat,17["receiveMessage",{"id":"m1"}]"#).unwrap();
        match packet {
            SocketPacket::Event { name, payload } => {
                assert_eq!(name, "receiveMessage");
                assert_eq!(payload["id"], "m1");
            }
            other => panic!("unexpected packet {other:?}"),
        }
    }

    #[test]
    fn test_event_round_trips_name_and_payload() {
        let packet = SocketPacket::Event {
            name: "sendMessage".into(),
            payload: serde_json::json!({"id": "m9", "text": "gm"}),
        };
        let decoded = SocketPacket::decode(&packet.encode()).unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_encode_send_message_frame() {
        let msg = ChatMessage {
            id: "m1".into(),
            text: "gm".into(),
            ..Default::default()
        };
        let frame = encode_send_message(&msg).unwrap();
        assert!(frame.starts_with(r#"42["sendMessage",{"#));
        assert!(!frame.contains("replyTo"));
    }

    #[test]
    fn test_bad_frames_are_errors() {
        let mut proto = ChatProtocol::new();
        assert!(proto.on_frame("").is_err());
        assert!(proto.on_frame("9").is_err());
        assert!(proto.on_frame("44{\"message\":\"nope\"}").is_err());
        assert!(proto.on_frame("1").unwrap().events == vec![ChatEvent::Closed]);
    }

    #[test]
    fn test_websocket_url() {
        assert_eq!(
            websocket_url("https://chat.example/").unwrap().as_str(),
            "wss://chat.example/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            websocket_url("http://localhost:3001").unwrap().as_str(),
            "ws://localhost:3001/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_websocket_url_keeps_base_path_and_drops_query() {
        assert_eq!(
            websocket_url("https://host.example/chat/?token=x#top").unwrap().as_str(),
            "wss://host.example/chat/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            websocket_url("HTTPS://Chat.Example:8443").unwrap().as_str(),
            "wss://chat.example:8443/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            websocket_url("ws://localhost:3001").unwrap().as_str(),
            "ws://localhost:3001/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_websocket_url_rejects_unusable_bases() {
        assert!(matches!(websocket_url("chat.example"), Err(ApiError::Url(_))));
        assert!(matches!(websocket_url("ftp://chat.example"), Err(ApiError::Url(_))));
    }
}
