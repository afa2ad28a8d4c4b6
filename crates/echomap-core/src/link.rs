//! Connection lifecycle state machine.
//!
//! The async driver owns sockets and timers; this machine owns the state
//! and the decisions. Every connection attempt gets an epoch token, and
//! lifecycle events must present theirs — an event from a superseded
//! attempt carries a stale epoch and is ignored, so a late close from an
//! old socket can never corrupt the state of the current one. Each entry
//! into `Closed` arms exactly one reconnect.

/// Connection lifecycle state. There is no terminal state: the link retries
/// forever, and disconnection is surfaced as a status indicator only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Connecting,
    Open,
    Closed,
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Open => write!(f, "connected"),
            Self::Closed => write!(f, "disconnected"),
        }
    }
}

/// Tracks the active connection attempt and filters stale events.
#[derive(Debug, Clone, Default)]
pub struct LinkStateMachine {
    state: LinkState,
    epoch: u64,
    reconnect_armed: bool,
}

impl LinkStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new connection attempt, superseding any previous one.
    ///
    /// Returns the epoch token the driver must present with every lifecycle
    /// event for this attempt.
    pub fn begin_attempt(&mut self) -> u64 {
        self.epoch += 1;
        self.state = LinkState::Connecting;
        self.reconnect_armed = false;
        self.epoch
    }

    /// The attempt identified by `epoch` finished its handshake.
    /// Returns false (and changes nothing) for a stale epoch.
    pub fn opened(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.state = LinkState::Open;
        true
    }

    /// The attempt identified by `epoch` closed or errored.
    ///
    /// Returns true when the caller should arm the reconnect timer. Stale
    /// epochs and repeated close events for the same attempt return false,
    /// so at most one reconnect is ever pending.
    pub fn closed(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.reconnect_armed {
            return false;
        }
        self.state = LinkState::Closed;
        self.reconnect_armed = true;
        true
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == LinkState::Open
    }

    /// Epoch of the current attempt (0 before the first `begin_attempt`).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
