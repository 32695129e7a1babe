//! Live Tutor websocket session.
//!
//! ARCHITECTURE
//! ============
//! One binary websocket to `/api/live` carries `voice::LiveFrame`s both
//! ways. Outbound frames go through an unbounded channel drained by a send
//! task, so the microphone callback never awaits. Inbound frames drive the
//! playback queue and the [`LiveState`] flags.
//!
//! LIFECYCLE
//! =========
//! `connect` opens playback, the socket, then the microphone. Any failure
//! tears down what was opened and raises the error banner. `disconnect`
//! (also called on unmount) sends `Close`, releases the microphone, closes
//! both audio contexts, and resets the flags.
//!
//! [`LiveState`]: crate::state::live::LiveState

pub const MIC_ERROR: &str = "Failed to access microphone or connect.";
pub const CONNECTION_ERROR: &str = "Connection error.";

/// Websocket URL for the relay, matching the page's scheme.
#[must_use]
pub fn live_socket_url(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}/api/live")
}

#[cfg(feature = "hydrate")]
pub use session::LiveSession;

#[cfg(feature = "hydrate")]
mod session {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use futures::channel::mpsc;
    use futures::stream::SplitStream;
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use leptos::prelude::*;
    use voice::{LiveFrame, decode_frame, encode_frame, pcm};

    use super::{CONNECTION_ERROR, MIC_ERROR, live_socket_url};
    use crate::state::live::LiveState;
    use crate::util::audio::{Capture, Playback};
    use crate::util::browser::js_error;

    /// Handle to a running session.
    #[derive(Clone)]
    pub struct LiveSession {
        inner: Rc<Inner>,
    }

    struct Inner {
        live: RwSignal<LiveState>,
        tx: RefCell<Option<mpsc::UnboundedSender<Vec<u8>>>>,
        capture: RefCell<Option<Capture>>,
        playback: RefCell<Option<Playback>>,
        speech_seq: Cell<u64>,
        closed: Cell<bool>,
    }

    impl LiveSession {
        /// Open the session and start streaming the microphone.
        ///
        /// # Errors
        ///
        /// Returns an error string when the socket, the audio contexts, or
        /// microphone access fail. The banner is already set in `live`.
        pub async fn connect(live: RwSignal<LiveState>) -> Result<Self, String> {
            live.update(|s| {
                s.connecting = true;
                s.error = None;
            });
            let result = Self::open(live).await;
            if let Err(err) = &result {
                log::warn!("live session failed to start: {err}");
                live.set(LiveState { error: Some(MIC_ERROR.to_owned()), ..LiveState::default() });
            }
            result
        }

        pub fn disconnect(&self) {
            self.inner.teardown();
        }

        async fn open(live: RwSignal<LiveState>) -> Result<Self, String> {
            let location = web_sys::window().ok_or("no window")?.location();
            let protocol = location.protocol().map_err(|e| js_error(&e))?;
            let host = location.host().map_err(|e| js_error(&e))?;
            let url = live_socket_url(&protocol, &host);

            let playback = Playback::new()?;
            let ws = WebSocket::open(&url).map_err(|e| e.to_string())?;
            let (mut ws_write, ws_read) = ws.split();
            let (tx, mut rx) = mpsc::unbounded::<Vec<u8>>();

            let inner = Rc::new(Inner {
                live,
                tx: RefCell::new(Some(tx.clone())),
                capture: RefCell::new(None),
                playback: RefCell::new(Some(playback)),
                speech_seq: Cell::new(0),
                closed: Cell::new(false),
            });

            leptos::task::spawn_local(async move {
                while let Some(bytes) = rx.next().await {
                    if ws_write.send(Message::Bytes(bytes)).await.is_err() {
                        break;
                    }
                }
                let _ = ws_write.close().await;
            });

            let capture = Capture::start(move |samples: &[f32]| {
                let speaking = pcm::is_speaking(samples);
                if live.with_untracked(|s| s.user_speaking) != speaking {
                    live.update(|s| s.user_speaking = speaking);
                }
                let frame = LiveFrame::Audio { pcm: pcm::encode_pcm16(samples), sample_rate: voice::INPUT_SAMPLE_RATE };
                let _ = tx.unbounded_send(encode_frame(&frame));
            })
            .await;

            match capture {
                Ok(capture) => *inner.capture.borrow_mut() = Some(capture),
                Err(err) => {
                    inner.teardown();
                    return Err(err);
                }
            }

            leptos::task::spawn_local(receive_loop(Rc::clone(&inner), ws_read));
            Ok(Self { inner })
        }
    }

    async fn receive_loop(inner: Rc<Inner>, mut read: SplitStream<WebSocket>) {
        let mut chunks = 0u64;
        while let Some(message) = read.next().await {
            let bytes = match message {
                Ok(Message::Bytes(bytes)) => bytes,
                Ok(Message::Text(_)) => continue,
                Err(err) => {
                    log::warn!("live socket error: {err}");
                    inner.live.update(|s| s.error = Some(CONNECTION_ERROR.to_owned()));
                    break;
                }
            };
            let frame = match decode_frame(&bytes) {
                Ok(frame) => frame,
                Err(err) => {
                    log::warn!("dropping malformed live frame: {err}");
                    continue;
                }
            };
            if matches!(frame, LiveFrame::Audio { .. }) {
                chunks += 1;
            }
            if !inner.handle(frame) {
                break;
            }
        }
        log::info!("live session ended after {chunks} tutor chunks");
        inner.teardown();
    }

    impl Inner {
        /// Apply one inbound frame. Returns `false` when the session should end.
        fn handle(self: &Rc<Self>, frame: LiveFrame) -> bool {
            match frame {
                LiveFrame::Ready => self.live.update(|s| {
                    s.connecting = false;
                    s.connected = true;
                }),
                LiveFrame::Audio { pcm, sample_rate } => {
                    if let Some(playback) = self.playback.borrow().as_ref() {
                        if let Err(err) = playback.play(&pcm, sample_rate) {
                            log::warn!("live playback failed: {err}");
                        }
                    }
                    self.pulse_bot_speaking();
                }
                LiveFrame::Interrupted => {
                    if let Some(playback) = self.playback.borrow().as_ref() {
                        playback.interrupt();
                    }
                    self.live.update(|s| s.bot_speaking = false);
                }
                LiveFrame::TurnComplete => {}
                LiveFrame::Error { message } => self.live.update(|s| s.error = Some(message)),
                LiveFrame::Close => return false,
            }
            true
        }

        /// Raise the tutor-speaking flag and clear it after the hold window
        /// unless another chunk arrives first.
        fn pulse_bot_speaking(self: &Rc<Self>) {
            let seq = self.speech_seq.get() + 1;
            self.speech_seq.set(seq);
            if !self.live.with_untracked(|s| s.bot_speaking) {
                self.live.update(|s| s.bot_speaking = true);
            }
            let inner = Rc::clone(self);
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(voice::BOT_SPEAKING_HOLD_MS).await;
                if inner.speech_seq.get() == seq && !inner.closed.get() {
                    inner.live.update(|s| s.bot_speaking = false);
                }
            });
        }

        fn teardown(&self) {
            if self.closed.replace(true) {
                return;
            }
            if let Some(tx) = self.tx.borrow_mut().take() {
                let _ = tx.unbounded_send(encode_frame(&LiveFrame::Close));
                tx.close_channel();
            }
            if let Some(capture) = self.capture.borrow_mut().take() {
                capture.stop();
            }
            if let Some(playback) = self.playback.borrow_mut().take() {
                playback.close();
            }
            self.live.update(|s| *s = s.disconnected());
        }
    }
}

#[cfg(test)]
mod live_test {
    use super::*;

    #[test]
    fn socket_url_follows_page_scheme() {
        assert_eq!(live_socket_url("https:", "knix.lk"), "wss://knix.lk/api/live");
        assert_eq!(live_socket_url("http:", "localhost:3000"), "ws://localhost:3000/api/live");
    }
}
