use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::status::{ServerMessage, StatusFeed};

/// Delay before the first push, so a freshly connected client gets its
/// initial snapshot quickly instead of waiting a whole interval.
pub const INITIAL_PUSH_DELAY: Duration = Duration::from_millis(1_000);

const CLOSE_REASON: &str = "server closing";

/// Shared state for the status channel. `shutdown` is the process-wide
/// token; each connection derives a child token from it so server
/// shutdown reaches every open session.
#[derive(Clone)]
pub struct ChannelState {
    pub feed: Arc<StatusFeed>,
    pub push_interval: Duration,
    pub initial_delay: Duration,
    pub shutdown: CancellationToken,
}

impl ChannelState {
    pub fn new(feed: Arc<StatusFeed>, push_interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            feed,
            push_interval,
            initial_delay: INITIAL_PUSH_DELAY,
            shutdown,
        }
    }
}

/// Why one of a session's two activities stopped. Cancellation is the
/// cooperative case and is never reported as an error.
#[derive(Debug, Error)]
enum SessionEnd {
    #[error("client sent close frame")]
    ClientClosed,
    #[error("client stream ended")]
    StreamEnded,
    #[error("cancelled")]
    Cancelled,
    #[error("send failed: {0}")]
    SendFailed(axum::Error),
    #[error("receive failed: {0}")]
    ReceiveFailed(axum::Error),
    #[error("encoding failed: {0}")]
    EncodeFailed(serde_json::Error),
}

/// WebSocket upgrade handler for the status channel. Non-upgrade
/// requests never reach `handle_socket`; the extractor rejects them
/// with a client error.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<ChannelState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run one client's session to completion. The pusher and reader share a
/// cancellation token; whichever exits first cancels the other, and the
/// connection gets a single best-effort close handshake afterwards.
async fn handle_socket(socket: WebSocket, state: ChannelState) {
    info!("websocket client connected");

    let (sink, stream) = socket.split();
    let cancel = state.shutdown.child_token();

    let mut push_task = tokio::spawn(push_loop(
        sink,
        state.feed.clone(),
        state.initial_delay,
        state.push_interval,
        cancel.clone(),
    ));
    let mut read_task = tokio::spawn(read_loop(stream, cancel.clone()));

    let (push_outcome, read_outcome) = tokio::select! {
        pushed = &mut push_task => {
            cancel.cancel();
            let read = read_task.await;
            (pushed, read)
        }
        read = &mut read_task => {
            cancel.cancel();
            let pushed = push_task.await;
            (pushed, read)
        }
    };

    match read_outcome {
        Ok(end) => debug!(reason = %end, "reader stopped"),
        Err(err) => warn!(error = %err, "reader task failed"),
    }

    match push_outcome {
        Ok((mut sink, end)) => {
            debug!(reason = %end, "pusher stopped");
            let frame = CloseFrame {
                code: close_code::NORMAL,
                reason: CLOSE_REASON.into(),
            };
            // The client may already be gone; a failed close handshake is fine.
            if let Err(err) = sink.send(Message::Close(Some(frame))).await {
                debug!(error = %err, "close handshake failed");
            }
        }
        Err(err) => warn!(error = %err, "pusher task failed"),
    }

    info!("websocket client disconnected; still accepting new connections");
}

/// Outbound half: snapshot, serialize, send, sleep, until cancelled or
/// the send fails. Returns the sink so the session can close it.
async fn push_loop(
    mut sink: SplitSink<WebSocket, Message>,
    feed: Arc<StatusFeed>,
    initial_delay: Duration,
    interval: Duration,
    cancel: CancellationToken,
) -> (SplitSink<WebSocket, Message>, SessionEnd) {
    let mut rng = StdRng::from_entropy();

    tokio::select! {
        _ = cancel.cancelled() => return (sink, SessionEnd::Cancelled),
        _ = tokio::time::sleep(initial_delay) => {}
    }

    loop {
        let update = ServerMessage::StatusUpdate {
            statuses: feed.snapshot(&mut rng),
        };
        let json = match serde_json::to_string(&update) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize status update");
                cancel.cancel();
                return (sink, SessionEnd::EncodeFailed(err));
            }
        };

        if let Err(err) = sink.send(Message::Text(json)).await {
            if cancel.is_cancelled() {
                return (sink, SessionEnd::Cancelled);
            }
            warn!(error = %err, "failed to push status update");
            cancel.cancel();
            return (sink, SessionEnd::SendFailed(err));
        }
        debug!(items = feed.len(), "sent statusUpdate");

        tokio::select! {
            _ = cancel.cancelled() => return (sink, SessionEnd::Cancelled),
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

/// Inbound half: log whole text frames, stop on close/error/cancel.
/// Client payloads are recorded but not acted on.
async fn read_loop(mut stream: SplitStream<WebSocket>, cancel: CancellationToken) -> SessionEnd {
    let end = loop {
        let received = tokio::select! {
            _ = cancel.cancelled() => break SessionEnd::Cancelled,
            received = stream.next() => received,
        };

        match received {
            None => break SessionEnd::StreamEnded,
            Some(Err(err)) => {
                warn!(error = %err, "websocket receive error");
                break SessionEnd::ReceiveFailed(err);
            }
            Some(Ok(Message::Close(_))) => {
                info!("client closed connection");
                break SessionEnd::ClientClosed;
            }
            Some(Ok(Message::Text(text))) => {
                info!(payload = %text, "received client message");
            }
            // Ping/pong are handled by the protocol layer; binary frames
            // carry no channel traffic.
            Some(Ok(_)) => {}
        }
    };

    cancel.cancel();
    end
}
