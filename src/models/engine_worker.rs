//! Runs an [`EngineBackend`] on a dedicated thread.
//!
//! The UI thread submits search jobs and polls for replies once per tick, so a
//! thinking engine never blocks rendering. Each job carries a generation
//! number; the controller bumps its generation on restart and ignores replies
//! tagged with an older one.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::domain::{EnginePosition, MoveRequest};
use crate::error::EngineError;
use crate::models::engine::EngineBackend;

/// One request for an engine move
#[derive(Debug, Clone)]
pub struct EngineJob {
    pub generation: u64,
    pub position: EnginePosition,
    pub skill: u8,
    pub budget: Duration,
}

/// The engine's answer to an [`EngineJob`]
#[derive(Debug)]
pub struct EngineReply {
    pub generation: u64,
    pub result: Result<MoveRequest, EngineError>,
}

enum WorkerMessage {
    Search(EngineJob),
    Quit,
}

/// Handle to the engine thread
pub struct EngineWorker {
    jobs: Option<Sender<WorkerMessage>>,
    replies: Receiver<EngineReply>,
}

impl EngineWorker {
    pub fn spawn(mut backend: Box<dyn EngineBackend>) -> Result<Self, EngineError> {
        let (job_tx, job_rx) = mpsc::channel::<WorkerMessage>();
        let (reply_tx, reply_rx) = mpsc::channel::<EngineReply>();

        thread::Builder::new()
            .name("engine-worker".to_string())
            .spawn(move || {
                for message in job_rx {
                    let job = match message {
                        WorkerMessage::Search(job) => job,
                        WorkerMessage::Quit => break,
                    };
                    let result = backend
                        .configure_strength(job.skill)
                        .and_then(|()| backend.request_move(&job.position, job.budget));
                    let terminated = matches!(result, Err(EngineError::Terminated));
                    let reply = EngineReply {
                        generation: job.generation,
                        result,
                    };
                    if reply_tx.send(reply).is_err() || terminated {
                        break;
                    }
                }
                backend.quit();
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            replies: reply_rx,
        })
    }

    /// Queue a search. Fails with `Terminated` once the worker has stopped.
    pub fn submit(&self, job: EngineJob) -> Result<(), EngineError> {
        let jobs = self.jobs.as_ref().ok_or(EngineError::Terminated)?;
        jobs.send(WorkerMessage::Search(job))
            .map_err(|_| EngineError::Terminated)
    }

    /// Non-blocking check for a finished search
    pub fn try_recv(&self) -> Result<Option<EngineReply>, EngineError> {
        match self.replies.try_recv() {
            Ok(reply) => Ok(Some(reply)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EngineError::Terminated),
        }
    }

    /// Ask the worker to quit the engine. Only the first call does anything.
    pub fn shutdown(&mut self) {
        if let Some(jobs) = self.jobs.take() {
            let _ = jobs.send(WorkerMessage::Quit);
        }
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    struct FixedEngine {
        reply: Option<MoveRequest>,
        quits: Arc<Mutex<usize>>,
    }

    impl EngineBackend for FixedEngine {
        fn configure_strength(&mut self, _level: u8) -> Result<(), EngineError> {
            Ok(())
        }

        fn request_move(
            &mut self,
            _position: &EnginePosition,
            _budget: Duration,
        ) -> Result<MoveRequest, EngineError> {
            self.reply.ok_or(EngineError::Terminated)
        }

        fn quit(&mut self) {
            *self.quits.lock().unwrap() += 1;
        }
    }

    fn job(generation: u64) -> EngineJob {
        EngineJob {
            generation,
            position: EnginePosition::default(),
            skill: 5,
            budget: Duration::from_millis(10),
        }
    }

    fn wait_reply(worker: &EngineWorker) -> Result<EngineReply, EngineError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(reply) = worker.try_recv()? {
                return Ok(reply);
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("no reply from engine worker");
    }

    #[test]
    fn test_reply_carries_generation() {
        let quits = Arc::new(Mutex::new(0));
        let worker = EngineWorker::spawn(Box::new(FixedEngine {
            reply: Some(MoveRequest::new((6, 4), (4, 4))),
            quits: quits.clone(),
        }))
        .unwrap();

        worker.submit(job(7)).unwrap();
        let reply = wait_reply(&worker).unwrap();
        assert_eq!(reply.generation, 7);
        assert_eq!(reply.result.unwrap(), MoveRequest::new((6, 4), (4, 4)));
    }

    #[test]
    fn test_terminated_engine_stops_worker() {
        let quits = Arc::new(Mutex::new(0));
        let worker = EngineWorker::spawn(Box::new(FixedEngine {
            reply: None,
            quits: quits.clone(),
        }))
        .unwrap();

        worker.submit(job(1)).unwrap();
        let reply = wait_reply(&worker).unwrap();
        assert!(matches!(reply.result, Err(EngineError::Terminated)));

        // the thread is gone: the reply channel disconnects
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if worker.try_recv().is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        assert!(matches!(worker.try_recv(), Err(EngineError::Terminated)));
        assert_eq!(*quits.lock().unwrap(), 1);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let quits = Arc::new(Mutex::new(0));
        let mut worker = EngineWorker::spawn(Box::new(FixedEngine {
            reply: None,
            quits: quits.clone(),
        }))
        .unwrap();

        worker.shutdown();
        worker.shutdown();
        assert!(matches!(worker.submit(job(1)), Err(EngineError::Terminated)));

        let deadline = Instant::now() + Duration::from_secs(5);
        while *quits.lock().unwrap() == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(*quits.lock().unwrap(), 1);
    }
}
