//! Command orchestration from controller output to the runtime's command queue.

use crossbeam_channel::{Sender, TrySendError};
use thiserror::Error;

use crate::controller::events::SessionCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("session command queue is full")]
    QueueFull,
    #[error("session command processor disconnected")]
    Disconnected,
}

pub fn dispatch_session_command(
    cmd_tx: &Sender<SessionCommand>,
    cmd: SessionCommand,
) -> Result<(), DispatchError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued session command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "session command queue is full");
            Err(DispatchError::QueueFull)
        }
        Err(TrySendError::Disconnected(_)) => Err(DispatchError::Disconnected),
    }
}

/// Queues commands in order, stopping at the first failure.
pub fn dispatch_session_commands(
    cmd_tx: &Sender<SessionCommand>,
    commands: impl IntoIterator<Item = SessionCommand>,
) -> Result<usize, DispatchError> {
    let mut queued = 0;
    for cmd in commands {
        dispatch_session_command(cmd_tx, cmd)?;
        queued += 1;
    }
    Ok(queued)
}
