//! WebSocket transport for the live chat.
//!
//! [`connect`] opens one WebSocket and returns a [`SocketHandle`] for sending
//! text frames plus a receiver of [`Inbound`] frames. Framing and the
//! Socket.IO protocol are handled by [`api::ChatProtocol`]; this module only
//! moves strings.
//!
//! - **Web**: the browser's `WebSocket`, with its callbacks owned by the
//!   handle so that closing drops them.
//! - **Native**: `tokio-tungstenite`, driven by a task on the Dioxus runtime.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Something that arrived on the socket.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Frame(String),
    /// The connection ended. Carries the reason when one was given.
    Closed(String),
}

#[cfg(target_arch = "wasm32")]
pub use web_socket::SocketHandle;

#[cfg(not(target_arch = "wasm32"))]
pub use native_socket::SocketHandle;

/// Open a socket to `url`.
pub fn connect(url: &str) -> (SocketHandle, UnboundedReceiver<Inbound>) {
    let (tx, rx) = mpsc::unbounded();
    tracing::info!(%url, "opening chat socket");
    (SocketHandle::open(url, tx), rx)
}

fn closed(tx: &UnboundedSender<Inbound>, reason: impl Into<String>) {
    let _ = tx.unbounded_send(Inbound::Closed(reason.into()));
}

#[cfg(target_arch = "wasm32")]
mod web_socket {
    use std::rc::Rc;

    use futures::channel::mpsc::UnboundedSender;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CloseEvent, MessageEvent, WebSocket};

    use super::{closed, Inbound};

    struct Callbacks {
        _onmessage: Closure<dyn FnMut(MessageEvent)>,
        _onclose: Closure<dyn FnMut(CloseEvent)>,
        _onerror: Closure<dyn FnMut(web_sys::Event)>,
    }

    struct Inner {
        ws: Option<WebSocket>,
        _callbacks: Option<Callbacks>,
    }

    #[derive(Clone)]
    pub struct SocketHandle {
        inner: Rc<Inner>,
    }

    impl SocketHandle {
        pub(super) fn open(url: &str, tx: UnboundedSender<Inbound>) -> Self {
            let ws = match WebSocket::new(url) {
                Ok(ws) => ws,
                Err(e) => {
                    tracing::warn!("failed to create WebSocket: {e:?}");
                    closed(&tx, "failed to create WebSocket");
                    return Self {
                        inner: Rc::new(Inner {
                            ws: None,
                            _callbacks: None,
                        }),
                    };
                }
            };

            let frames = tx.clone();
            let onmessage = Closure::<dyn FnMut(MessageEvent)>::new(move |e: MessageEvent| {
                if let Some(text) = e.data().as_string() {
                    let _ = frames.unbounded_send(Inbound::Frame(text));
                }
            });
            ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

            let on_close_tx = tx.clone();
            let onclose = Closure::<dyn FnMut(CloseEvent)>::new(move |e: CloseEvent| {
                closed(&on_close_tx, e.reason());
            });
            ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

            let onerror = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
                tracing::warn!("chat socket error");
                closed(&tx, "connection error");
            });
            ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

            Self {
                inner: Rc::new(Inner {
                    ws: Some(ws),
                    _callbacks: Some(Callbacks {
                        _onmessage: onmessage,
                        _onclose: onclose,
                        _onerror: onerror,
                    }),
                }),
            }
        }

        pub fn send(&self, frame: String) -> api::Result<()> {
            let ws = self
                .inner
                .ws
                .as_ref()
                .ok_or_else(|| api::ApiError::Socket("not connected".into()))?;
            ws.send_with_str(&frame)
                .map_err(|e| api::ApiError::Socket(format!("{e:?}")))
        }

        /// Detach the callbacks and close the connection.
        pub fn close(&self) {
            if let Some(ws) = &self.inner.ws {
                ws.set_onmessage(None);
                ws.set_onclose(None);
                ws.set_onerror(None);
                let _ = ws.close();
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_socket {
    use dioxus::core::{spawn, Task};
    use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
    use futures::{SinkExt, StreamExt};
    use tokio_tungstenite::tungstenite::Message;

    use super::{closed, Inbound};

    #[derive(Clone)]
    pub struct SocketHandle {
        outbound: UnboundedSender<String>,
        task: Task,
    }

    impl SocketHandle {
        pub(super) fn open(url: &str, tx: UnboundedSender<Inbound>) -> Self {
            let (outbound, rx) = mpsc::unbounded();
            let task = spawn(pump(url.to_string(), rx, tx));
            Self { outbound, task }
        }

        pub fn send(&self, frame: String) -> api::Result<()> {
            self.outbound
                .unbounded_send(frame)
                .map_err(|e| api::ApiError::Socket(e.to_string()))
        }

        pub fn close(&self) {
            self.outbound.close_channel();
            self.task.cancel();
        }
    }

    async fn pump(
        url: String,
        mut outbound: UnboundedReceiver<String>,
        inbound: UnboundedSender<Inbound>,
    ) {
        let (ws, _) = match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("chat socket connect failed: {e}");
                closed(&inbound, e.to_string());
                return;
            }
        };
        let (mut sink, mut stream) = ws.split();

        loop {
            tokio::select! {
                frame = outbound.next() => match frame {
                    Some(text) => {
                        if let Err(e) = sink.send(Message::Text(text)).await {
                            closed(&inbound, e.to_string());
                            break;
                        }
                    }
                    None => {
                        let _ = sink.close().await;
                        break;
                    }
                },
                msg = stream.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        let _ = inbound.unbounded_send(Inbound::Frame(text));
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame.map(|f| f.reason.to_string()).unwrap_or_default();
                        closed(&inbound, reason);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        closed(&inbound, e.to_string());
                        break;
                    }
                    None => {
                        closed(&inbound, "");
                        break;
                    }
                },
            }
        }
    }
}
