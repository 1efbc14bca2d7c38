// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run session lifecycle: idle → running ⇄ paused → finished → idle.
//!
//! Commands that do not apply to the current state are no-ops rather than
//! errors, since UI dismissal can race with lifecycle commands.

use std::fmt;

use crate::models::SessionState;

/// Lifecycle command issued by a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
}

impl fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleCommand::Start => "start",
            LifecycleCommand::Pause => "pause",
            LifecycleCommand::Resume => "resume",
            LifecycleCommand::Stop => "stop",
            LifecycleCommand::Reset => "reset",
        };
        f.write_str(s)
    }
}

/// What the timer and location subscription should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerEffect {
    Activate,
    Deactivate,
}

/// An accepted state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub command: LifecycleCommand,
    pub from: SessionState,
    pub to: SessionState,
}

impl Transition {
    pub fn producers(&self) -> ProducerEffect {
        if self.to == SessionState::Running {
            ProducerEffect::Activate
        } else {
            ProducerEffect::Deactivate
        }
    }

    /// Whether the aggregate and the recording phase start over.
    pub fn clears_session(&self) -> bool {
        matches!(
            self.command,
            LifecycleCommand::Start | LifecycleCommand::Reset
        )
    }
}

/// Transition table for the session lifecycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct SessionStateMachine;

impl SessionStateMachine {
    /// Next state for `command`, or `None` if the command is a no-op here.
    ///
    /// `start()` is only accepted from `Idle`; a finished run has to be
    /// reset first. `reset()` is accepted from every state and discards
    /// any run in progress.
    pub fn transition(&self, from: SessionState, command: LifecycleCommand) -> Option<Transition> {
        use LifecycleCommand as C;
        use SessionState as S;

        let to = match (from, command) {
            (S::Idle, C::Start) => S::Running,
            (S::Running, C::Pause) => S::Paused,
            (S::Paused, C::Resume) => S::Running,
            (S::Running | S::Paused, C::Stop) => S::Finished,
            (_, C::Reset) => S::Idle,
            _ => return None,
        };

        Some(Transition { command, from, to })
    }
}
