use std::time::Duration;

use echomap_link::LinkEvent;

/// Stream frames and lifecycle transitions as lines on stdout.
pub fn run(url: &str, reconnect_ms: u64, max_frames: usize) {
    let link = echomap_link::spawn(super::make_link_config(url, reconnect_ms));
    eprintln!("watching {url}");

    let mut seen = 0usize;
    loop {
        match link.recv_timeout(Duration::from_secs(1)) {
            Some(LinkEvent::State(state)) => println!("link {state}"),
            Some(LinkEvent::Frame(frame)) => {
                println!(
                    "front={} right={} back={} left={}",
                    frame.front, frame.right, frame.back, frame.left
                );
                seen += 1;
                if max_frames > 0 && seen >= max_frames {
                    break;
                }
            }
            None => {}
        }
    }
}
