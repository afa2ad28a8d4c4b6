//! Persistent WebSocket link to the rover.
//!
//! Wraps a `tokio_tungstenite` connection in a reconnect loop:
//! Connecting → Open → (close | error) → Closed → fixed delay → Connecting,
//! forever. There is no "give up" state — a kiosk-style display should sit
//! there silently retrying, and disconnection is surfaced to the UI only as
//! a status transition.
//!
//! The driver runs on a dedicated thread with its own current-thread tokio
//! runtime, so the synchronous dashboard loop never blocks on the network.
//! Inbound frames and lifecycle transitions arrive over a channel; outbound
//! commands are fire-and-forget and are dropped silently while the link is
//! not open (at-most-once, never queued across a disconnect).
//!
//! Malformed telemetry payloads are logged and dropped; the connection
//! stays up.

use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use echomap_core::{Command, LinkState, LinkStateMachine, TelemetryFrame};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Default delay between a disconnect and the next connection attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(1000);

/// Where and how to connect.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// WebSocket endpoint, e.g. `ws://192.168.4.1:81/`.
    pub url: String,
    /// Delay between a disconnect and the next attempt.
    pub reconnect_delay: Duration,
}

impl LinkConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

/// Event delivered to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkEvent {
    /// Connection lifecycle transition, for the status indicator.
    State(LinkState),
    /// One deserialized telemetry frame.
    Frame(TelemetryFrame),
}

/// Handle held by the UI thread: send commands, drain events, read status.
pub struct LinkHandle {
    machine: Arc<Mutex<LinkStateMachine>>,
    commands: UnboundedSender<Command>,
    events: mpsc::Receiver<LinkEvent>,
}

impl LinkHandle {
    /// Send a command to the rover.
    ///
    /// Dropped silently unless the link is open — commands are advisory and
    /// the peer sends no acknowledgment, so there is nothing to report.
    pub fn send(&self, command: Command) {
        if !self.machine.lock().unwrap().is_open() {
            log::debug!("link not open, dropping {command:?}");
            return;
        }
        let _ = self.commands.send(command);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LinkState {
        self.machine.lock().unwrap().state()
    }

    /// Non-blocking: the next pending event, if any.
    pub fn try_recv(&self) -> Option<LinkEvent> {
        self.events.try_recv().ok()
    }

    /// Block up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<LinkEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

/// Spawn the link driver on a background thread and return immediately.
/// The driver connects and retries forever; it stops when the handle and
/// its channels are dropped.
pub fn spawn(config: LinkConfig) -> LinkHandle {
    let machine = Arc::new(Mutex::new(LinkStateMachine::new()));
    let (cmd_tx, cmd_rx) = unbounded_channel();
    let (event_tx, event_rx) = mpsc::channel();

    let driver_machine = Arc::clone(&machine);
    thread::Builder::new()
        .name("echomap-link".into())
        .spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("tokio runtime");
            rt.block_on(drive(config, driver_machine, cmd_rx, event_tx));
        })
        .expect("spawn link thread");

    LinkHandle {
        machine,
        commands: cmd_tx,
        events: event_rx,
    }
}

/// The reconnect loop. One pass per connection attempt; each entry into
/// Closed arms exactly one delayed retry.
async fn drive(
    config: LinkConfig,
    machine: Arc<Mutex<LinkStateMachine>>,
    mut commands: UnboundedReceiver<Command>,
    events: mpsc::Sender<LinkEvent>,
) {
    loop {
        let epoch = machine.lock().unwrap().begin_attempt();
        if events.send(LinkEvent::State(LinkState::Connecting)).is_err() {
            return; // UI side is gone
        }

        match tokio_tungstenite::connect_async(config.url.as_str()).await {
            Ok((stream, _)) => {
                if machine.lock().unwrap().opened(epoch) {
                    log::info!("connected to {}", config.url);
                    let _ = events.send(LinkEvent::State(LinkState::Open));
                }
                run_session(stream, &mut commands, &events).await;
            }
            Err(e) => {
                log::warn!("connect to {} failed: {e}", config.url);
            }
        }

        if machine.lock().unwrap().closed(epoch)
            && events.send(LinkEvent::State(LinkState::Closed)).is_err()
        {
            return;
        }

        // Commands issued while disconnected are lost, not queued.
        while commands.try_recv().is_ok() {}
        tokio::time::sleep(config.reconnect_delay).await;
    }
}

/// Pump one open connection until it closes or errors.
async fn run_session(
    stream: WsStream,
    commands: &mut UnboundedReceiver<Command>,
    events: &mpsc::Sender<LinkEvent>,
) {
    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            inbound = read.next() => match inbound {
                None | Some(Ok(Message::Close(_))) => break,
                Some(Err(e)) => {
                    log::debug!("link receive error: {e}");
                    break;
                }
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<TelemetryFrame>(&text) {
                        Ok(frame) => {
                            if events.send(LinkEvent::Frame(frame)).is_err() {
                                break;
                            }
                        }
                        // Malformed payloads are dropped; the connection stays up.
                        Err(e) => log::warn!("dropping malformed telemetry frame: {e}"),
                    }
                }
                Some(Ok(_)) => {} // ping/pong/binary
            },
            outbound = commands.recv() => match outbound {
                Some(command) => {
                    let text = command.to_json().to_string();
                    if let Err(e) = write.send(Message::Text(text.into())).await {
                        log::debug!("link send error: {e}");
                        break;
                    }
                }
                None => break,
            },
        }
    }
}
