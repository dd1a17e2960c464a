//! Per-control state machine: `Idle -> Pending -> {Success | Error} -> Idle`.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use super::actions::ActionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlState {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Tracks which action controls are currently disabled.
#[derive(Default)]
pub struct ControlBoard {
    states: Mutex<HashMap<ActionKind, ControlState>>,
}

impl ControlBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, kind: ActionKind) -> ControlState {
        self.states.lock().get(&kind).copied().unwrap_or_default()
    }

    /// A control is disabled for exactly as long as its call is pending.
    pub fn is_disabled(&self, kind: ActionKind) -> bool {
        self.state(kind) == ControlState::Pending
    }

    /// Move `kind` to `Pending` unless it already is. The returned guard puts
    /// the control back to `Idle` when dropped, whatever happens to the call.
    pub fn try_begin(&self, kind: ActionKind) -> Option<PendingControl<'_>> {
        let mut states = self.states.lock();
        let state = states.entry(kind).or_default();
        if *state == ControlState::Pending {
            return None;
        }
        *state = ControlState::Pending;
        debug!(target: "triad_client::actions", action = %kind, "control disabled");
        Some(PendingControl { board: self, kind })
    }

    fn release(&self, kind: ActionKind) {
        self.states.lock().insert(kind, ControlState::Idle);
    }
}

pub struct PendingControl<'a> {
    board: &'a ControlBoard,
    kind: ActionKind,
}

impl PendingControl<'_> {
    /// Finish the call: the control is re-enabled and the outcome returned
    /// for reporting.
    pub fn settle(self, succeeded: bool) -> ControlState {
        if succeeded {
            ControlState::Success
        } else {
            ControlState::Error
        }
    }
}

impl Drop for PendingControl<'_> {
    fn drop(&mut self) {
        self.board.release(self.kind);
        debug!(target: "triad_client::actions", action = %self.kind, "control enabled");
    }
}
