//! UCI engine process adapter.
//!
//! Spawns the engine executable and speaks UCI with it in a blocking
//! request/response style. Engine output is read on its own OS thread and
//! handed over through a channel, so every wait can be bounded by a timeout.
//! The adapter is meant to be driven from the engine worker thread, never
//! from the UI thread.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::uci::{UciCommand, UciOutputKind, best_move_text};
use crate::domain::{EnginePosition, MoveRequest};
use crate::error::EngineError;

/// How long the engine gets to finish the `uci`/`isready` handshake
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Slack on top of the search budget before a request counts as timed out
const REPLY_GRACE: Duration = Duration::from_secs(5);

/// Name of the UCI option controlling playing strength
const SKILL_OPTION: &str = "Skill Level";

/// The operations the controller needs from a move-producing engine
pub trait EngineBackend: Send {
    /// Set playing strength (UCI `Skill Level`, 0-20)
    fn configure_strength(&mut self, level: u8) -> Result<(), EngineError>;

    /// Ask for a move in `position`, searching for about `budget`
    fn request_move(
        &mut self,
        position: &EnginePosition,
        budget: Duration,
    ) -> Result<MoveRequest, EngineError>;

    /// Shut the engine down. Calling this more than once is harmless.
    fn quit(&mut self);
}

/// Messages sent from the engine reader thread
#[derive(Debug)]
enum EngineEvent {
    /// A line of output from the engine
    Output(String),
    /// Engine process exited
    Exited,
    /// Error occurred
    Error(String),
}

/// A running UCI engine subprocess
pub struct UciEngine {
    process: Option<Child>,
    stdin: Option<ChildStdin>,
    event_receiver: Receiver<EngineEvent>,
    skill: Option<u8>,
}

impl UciEngine {
    /// Launch the engine at `path` and complete the UCI handshake
    pub fn start(path: &Path) -> Result<Self, EngineError> {
        let unavailable = |reason: String| EngineError::Unavailable {
            path: path.to_path_buf(),
            reason,
        };

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| unavailable(e.to_string()))?;

        let stdin = child.stdin.take();
        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            return Err(unavailable("failed to open stdout".to_string()));
        };

        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        // Reader thread (OS thread for blocking I/O)
        thread::Builder::new()
            .name("uci-reader".to_string())
            .spawn(move || {
                let reader = BufReader::new(stdout);
                for line in reader.lines() {
                    match line {
                        Ok(text) => {
                            if event_tx.send(EngineEvent::Output(text)).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            let _ = event_tx.send(EngineEvent::Error(e.to_string()));
                            break;
                        }
                    }
                }
                let _ = event_tx.send(EngineEvent::Exited);
            })
            .map_err(|e| unavailable(e.to_string()))?;

        let mut engine = Self {
            process: Some(child),
            stdin,
            event_receiver: event_rx,
            skill: None,
        };

        if let Err(e) = engine.handshake() {
            engine.quit();
            return Err(unavailable(format!("handshake failed: {e}")));
        }

        tracing::info!("Engine started: {}", path.display());
        Ok(engine)
    }

    /// Send a UCI command to the engine
    fn send_command(&mut self, cmd: UciCommand) -> Result<(), EngineError> {
        let line = cmd.to_string();
        let stdin = self.stdin.as_mut().ok_or(EngineError::Terminated)?;
        tracing::trace!("> {line}");
        writeln!(stdin, "{line}")
            .and_then(|()| stdin.flush())
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::BrokenPipe => EngineError::Terminated,
                _ => EngineError::Io(e),
            })
    }

    /// Block until the engine prints a line matching `accept`
    fn wait_for(
        &mut self,
        timeout: Duration,
        accept: impl Fn(&UciOutputKind) -> bool,
    ) -> Result<UciOutputKind, EngineError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_receiver.recv_timeout(remaining) {
                Ok(EngineEvent::Output(line)) => {
                    tracing::trace!("< {line}");
                    let kind = UciOutputKind::parse(&line);
                    if accept(&kind) {
                        return Ok(kind);
                    }
                }
                Ok(EngineEvent::Exited) | Err(RecvTimeoutError::Disconnected) => {
                    self.stdin = None;
                    return Err(EngineError::Terminated);
                }
                Ok(EngineEvent::Error(e)) => return Err(EngineError::Protocol(e)),
                Err(RecvTimeoutError::Timeout) => return Err(EngineError::Timeout),
            }
        }
    }

    fn handshake(&mut self) -> Result<(), EngineError> {
        self.send_command(UciCommand::Uci)?;
        self.wait_for(HANDSHAKE_TIMEOUT, |k| *k == UciOutputKind::UciOk)?;
        self.sync(HANDSHAKE_TIMEOUT)
    }

    /// `isready` / `readyok` round trip
    fn sync(&mut self, timeout: Duration) -> Result<(), EngineError> {
        self.send_command(UciCommand::IsReady)?;
        self.wait_for(timeout, |k| *k == UciOutputKind::ReadyOk)
            .map(|_| ())
    }

    /// Throw away output left over from earlier requests
    fn drain_pending(&mut self) -> Result<(), EngineError> {
        loop {
            match self.event_receiver.try_recv() {
                Ok(EngineEvent::Output(line)) => tracing::trace!("< (stale) {line}"),
                Ok(EngineEvent::Error(e)) => tracing::warn!("Engine read error: {e}"),
                Ok(EngineEvent::Exited) | Err(TryRecvError::Disconnected) => {
                    self.stdin = None;
                    return Err(EngineError::Terminated);
                }
                Err(TryRecvError::Empty) => return Ok(()),
            }
        }
    }

    fn wait_for_best_move(&mut self, timeout: Duration) -> Result<String, EngineError> {
        match self.wait_for(timeout, |k| matches!(k, UciOutputKind::BestMove(_)))? {
            UciOutputKind::BestMove(payload) => Ok(payload),
            other => Err(EngineError::Protocol(format!("unexpected reply {other:?}"))),
        }
    }
}

impl EngineBackend for UciEngine {
    fn configure_strength(&mut self, level: u8) -> Result<(), EngineError> {
        if self.skill == Some(level) {
            return Ok(());
        }
        self.send_command(UciCommand::SetOption {
            name: SKILL_OPTION.to_string(),
            value: level.to_string(),
        })?;
        self.skill = Some(level);
        Ok(())
    }

    fn request_move(
        &mut self,
        position: &EnginePosition,
        budget: Duration,
    ) -> Result<MoveRequest, EngineError> {
        self.drain_pending()?;
        self.send_command(position.command())?;
        self.send_command(UciCommand::GoMoveTime(budget))?;

        let payload = match self.wait_for_best_move(budget + REPLY_GRACE) {
            Err(EngineError::Timeout) => {
                // ask for whatever it has; give up if even that does not come
                self.send_command(UciCommand::Stop)?;
                self.wait_for_best_move(REPLY_GRACE)?
            }
            other => other?,
        };

        let text = best_move_text(&payload).ok_or(EngineError::NoMove)?;
        MoveRequest::parse_uci(text)
            .ok_or_else(|| EngineError::Protocol(format!("unparseable move {text:?}")))
    }

    fn quit(&mut self) {
        let Some(mut child) = self.process.take() else {
            return;
        };
        let _ = self.send_command(UciCommand::Quit);
        self.stdin = None;
        let _ = child.kill();
        let _ = child.wait();
        tracing::info!("Engine stopped");
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        self.quit();
    }
}
