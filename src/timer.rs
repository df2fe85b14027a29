//! Cancellable periodic session ticks.
//!
//! A [`TickScheduler`] hands out one [`TickHandle`] per scheduled run. Every
//! tick carries the handle's [`TickToken`], so the owner can tell a live tick
//! from one that was already queued when the handle was cancelled.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::runtime::AppEvent;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one scheduled tick run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

impl TickToken {
    pub fn next() -> Self {
        TickToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Handle to a scheduled tick run. Dropping it cancels the run.
#[derive(Debug)]
pub struct TickHandle {
    token: TickToken,
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    pub fn new(token: TickToken) -> Self {
        Self {
            token,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn token(&self) -> TickToken {
        self.token
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            tracing::debug!(token = self.token.get(), "tick handle cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Something that can start a periodic tick run
pub trait TickScheduler: Send {
    fn schedule(&mut self, period: Duration) -> TickHandle;
}

/// Production scheduler: one sleeper thread per handle, feeding the app event channel
#[derive(Debug, Clone)]
pub struct ThreadTickScheduler {
    tx: Sender<AppEvent>,
}

impl ThreadTickScheduler {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl TickScheduler for ThreadTickScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        let handle = TickHandle::new(TickToken::next());
        let token = handle.token();
        let cancelled = handle.flag();
        let tx = self.tx.clone();

        thread::spawn(move || loop {
            thread::sleep(period);
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            if tx.send(AppEvent::SessionTick(token)).is_err() {
                break;
            }
        });

        tracing::debug!(token = token.get(), ?period, "tick thread scheduled");
        handle
    }
}

#[derive(Debug, Default)]
struct ManualLog {
    scheduled: Vec<TickToken>,
    handles: Vec<(TickToken, Arc<AtomicBool>)>,
}

/// Deterministic scheduler for tests: nothing ticks on its own, the test
/// delivers ticks by token. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct ManualTickScheduler {
    log: Arc<Mutex<ManualLog>>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every token handed out so far, oldest first
    pub fn scheduled(&self) -> Vec<TickToken> {
        self.log
            .lock()
            .map(|log| log.scheduled.clone())
            .unwrap_or_default()
    }

    pub fn last_token(&self) -> Option<TickToken> {
        self.scheduled().last().copied()
    }

    /// Tokens whose handle has not been cancelled (or dropped) yet
    pub fn live_tokens(&self) -> Vec<TickToken> {
        self.log
            .lock()
            .map(|log| {
                log.handles
                    .iter()
                    .filter(|(_, flag)| !flag.load(Ordering::SeqCst))
                    .map(|(token, _)| *token)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TickScheduler for ManualTickScheduler {
    fn schedule(&mut self, _period: Duration) -> TickHandle {
        let handle = TickHandle::new(TickToken::next());
        if let Ok(mut log) = self.log.lock() {
            log.scheduled.push(handle.token());
            log.handles.push((handle.token(), handle.flag()));
        }
        handle
    }
}
