//! End-to-end link behavior against a local WebSocket listener.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use echomap_core::{Command, LinkState, TelemetryFrame};
use echomap_link::{LinkConfig, LinkEvent, LinkHandle};

const FRAME_JSON: &str = r#"{"front":50,"right":-1,"back":30,"left":100}"#;

fn wait_for_state(link: &LinkHandle, want: LinkState) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(LinkEvent::State(state)) = link.recv_timeout(Duration::from_millis(200))
            && state == want
        {
            return;
        }
    }
    panic!("link never reached {want}");
}

fn wait_for_frame(link: &LinkHandle) -> TelemetryFrame {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(LinkEvent::Frame(frame)) = link.recv_timeout(Duration::from_millis(200)) {
            return frame;
        }
    }
    panic!("no telemetry frame arrived");
}

#[test]
fn frames_flow_in_and_commands_flow_out() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let (cmd_tx, cmd_rx) = mpsc::channel::<String>();

    rt.spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        ws.send(Message::Text(FRAME_JSON.into())).await.unwrap();
        // Malformed payload must not kill the connection.
        ws.send(Message::Text("{not json".into())).await.unwrap();
        ws.send(Message::Text(FRAME_JSON.into())).await.unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if let Message::Text(text) = msg {
                let _ = cmd_tx.send(text.to_string());
            }
        }
    });

    let link = echomap_link::spawn(
        LinkConfig::new(format!("ws://{addr}/"))
            .with_reconnect_delay(Duration::from_millis(100)),
    );

    wait_for_state(&link, LinkState::Open);

    let frame = wait_for_frame(&link);
    assert_eq!(frame.front, 50.0);
    assert_eq!(frame.right, -1.0);

    // The bad payload was dropped, the next good frame still arrives.
    let frame = wait_for_frame(&link);
    assert_eq!(frame.back, 30.0);

    link.send(Command::Start);
    link.send(Command::Speed(3.0));
    let first = cmd_rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(first, r#"{"cmd":"start"}"#);
    let second = cmd_rx.recv_timeout(Duration::from_secs(10)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(value["speed"], 3.0);
}

#[test]
fn reconnects_after_every_close() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();

    // A peer that completes the handshake and hangs up immediately.
    rt.spawn(async move {
        loop {
            let (socket, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => return,
            };
            if let Ok(mut ws) = tokio_tungstenite::accept_async(socket).await {
                let _ = ws.close(None).await;
            }
        }
    });

    let delay = Duration::from_millis(50);
    let link = echomap_link::spawn(
        LinkConfig::new(format!("ws://{addr}/")).with_reconnect_delay(delay),
    );

    // Collect lifecycle transitions across several reconnect cycles.
    let started = Instant::now();
    let deadline = started + Duration::from_secs(10);
    let mut states = Vec::new();
    while Instant::now() < deadline {
        if let Some(LinkEvent::State(state)) = link.recv_timeout(Duration::from_millis(200)) {
            states.push(state);
        }
        if states.iter().filter(|s| **s == LinkState::Open).count() >= 3 {
            break;
        }
    }

    let opens = states.iter().filter(|s| **s == LinkState::Open).count();
    assert!(opens >= 3, "expected repeated reconnects, saw {states:?}");

    // No duplicate concurrent connections: between any two Opens the link
    // must have passed through Closed and Connecting again.
    let mut last_open: Option<usize> = None;
    for (i, state) in states.iter().enumerate() {
        if *state == LinkState::Open {
            if let Some(prev) = last_open {
                let between = &states[prev + 1..i];
                assert!(
                    between.contains(&LinkState::Closed),
                    "two opens without a close: {states:?}"
                );
                assert!(
                    between.contains(&LinkState::Connecting),
                    "reopened without a new attempt: {states:?}"
                );
            }
            last_open = Some(i);
        }
    }

    // Three cycles take at least two full reconnect delays.
    assert!(started.elapsed() >= delay * 2);
}
