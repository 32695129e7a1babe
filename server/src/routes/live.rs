//! Live Tutor websocket — relay between the browser and the voice upstream.
//!
//! DESIGN
//! ======
//! On upgrade the server opens the upstream socket first. If that fails the
//! browser gets one `Error` frame and the socket is closed. Otherwise the
//! browser gets `Ready` and the handler enters a `select!` loop:
//! - browser `Audio` frames → upstream binary PCM
//! - upstream audio and control events → browser frames
//!
//! Either side closing ends the session; the other side is then closed too.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade (authenticated by the session cookie)
//! 2. Connect upstream + send setup → `Ready`
//! 3. Relay until close / error
//! 4. Send `Close` to the browser, close upstream

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};
use voice::{LiveFrame, decode_frame, encode_frame};

use super::auth::AuthUser;
use crate::services::live as live_svc;
use crate::state::AppState;

/// `GET /api/live`
pub async fn handle_live(State(state): State<AppState>, auth: AuthUser, ws: WebSocketUpgrade) -> Response {
    let user_id = auth.user.id;
    ws.on_upgrade(move |socket| run_live(socket, state, user_id))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_live(mut socket: WebSocket, state: AppState, user_id: String) {
    let upstream = match live_svc::connect_upstream(&state.config.live).await {
        Ok(upstream) => upstream,
        Err(e) => {
            warn!(error = %e, %user_id, "live: upstream unavailable");
            let _ = send_frame(&mut socket, &LiveFrame::error(e.user_message())).await;
            let _ = send_frame(&mut socket, &LiveFrame::Close).await;
            let _ = socket.close().await;
            return;
        }
    };
    if send_frame(&mut socket, &LiveFrame::Ready).await.is_err() {
        return;
    }
    info!(%user_id, "live: session started");

    let (mut upstream_tx, mut upstream_rx) = upstream.split();
    let mut chunks_in: u64 = 0;
    let mut chunks_out: u64 = 0;

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Binary(bytes) => {
                        let frame = match decode_frame(&bytes) {
                            Ok(frame) => frame,
                            Err(e) => {
                                warn!(error = %e, %user_id, "live: invalid browser frame");
                                continue;
                            }
                        };
                        let closing = frame == LiveFrame::Close;
                        if matches!(frame, LiveFrame::Audio { .. }) {
                            chunks_in += 1;
                        }
                        if let Some(out) = live_svc::browser_to_upstream(frame) {
                            if upstream_tx.send(out).await.is_err() {
                                break;
                            }
                        }
                        if closing {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            msg = upstream_rx.next() => {
                let Some(Ok(msg)) = msg else {
                    let _ = send_frame(&mut socket, &LiveFrame::error(live_svc::CONNECTION_ERROR_MESSAGE)).await;
                    break;
                };
                let Some(frame) = live_svc::translate_upstream(msg) else { continue };
                if frame == LiveFrame::Close {
                    break;
                }
                if matches!(frame, LiveFrame::Audio { .. }) {
                    chunks_out += 1;
                }
                if send_frame(&mut socket, &frame).await.is_err() {
                    break;
                }
            }
        }
    }

    let _ = upstream_tx.close().await;
    let _ = send_frame(&mut socket, &LiveFrame::Close).await;
    info!(%user_id, chunks_in, chunks_out, "live: session ended");
}

async fn send_frame(socket: &mut WebSocket, frame: &LiveFrame) -> Result<(), axum::Error> {
    socket
        .send(Message::Binary(encode_frame(frame).into()))
        .await
}
