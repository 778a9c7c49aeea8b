//! Record sinks.
//!
//! A [`Sink`] accepts fully-constructed records and owns everything past
//! that point: encoding, level filtering, sampling, and the output
//! destination. Sink failures are never surfaced to emit callers.

use crate::record::{Level, Record};
use crate::sampler::Sampler;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

pub trait Sink: Send + Sync {
    fn accept(&self, record: Record);

    /// Flush any buffered output. Default no-op.
    fn flush(&self) {}
}

// ── JSON line sink ────────────────────────────────────────────

/// Serializes records as newline-delimited JSON to a writer, applying
/// minimum-level filtering and sampling. The writer sits behind a mutex
/// so concurrent emits never interleave within a line.
pub struct JsonLineSink {
    out: Mutex<Box<dyn Write + Send>>,
    min_level: Level,
    sampler: Sampler,
}

impl JsonLineSink {
    pub fn new(out: Box<dyn Write + Send>, min_level: Level, sampler: Sampler) -> Self {
        Self {
            out: Mutex::new(out),
            min_level,
            sampler,
        }
    }

    pub fn stderr(min_level: Level, sampler: Sampler) -> Self {
        Self::new(Box::new(std::io::stderr()), min_level, sampler)
    }

    pub fn stdout(min_level: Level, sampler: Sampler) -> Self {
        Self::new(Box::new(std::io::stdout()), min_level, sampler)
    }

    fn out(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Sink for JsonLineSink {
    fn accept(&self, record: Record) {
        if record.level < self.min_level {
            return;
        }
        if !self.sampler.admit(&record.msg) {
            return;
        }
        let mut line = record.to_json_line();
        line.push('\n');
        if let Err(e) = self.out().write_all(line.as_bytes()) {
            tracing::debug!(error = %e, "Log sink write failed");
        }
    }

    fn flush(&self) {
        if let Err(e) = self.out().flush() {
            tracing::debug!(error = %e, "Log sink flush failed");
        }
    }
}

// ── Buffered sink ─────────────────────────────────────────────

enum Op {
    Record(Record),
    Flush(Sender<()>),
    Shutdown,
}

/// Wraps another sink with a bounded channel and a background thread so
/// `accept` never blocks on the inner sink's writer. Records are dropped
/// when the buffer is full.
pub struct BufferedSink {
    tx: Sender<Op>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl BufferedSink {
    pub fn new(inner: Arc<dyn Sink>, capacity: usize) -> std::io::Result<Self> {
        let (tx, rx) = bounded(capacity);
        let worker = std::thread::Builder::new()
            .name("lumber-sink".to_string())
            .spawn(move || Self::run(inner, rx))?;
        Ok(Self {
            tx,
            worker: Mutex::new(Some(worker)),
        })
    }

    fn run(inner: Arc<dyn Sink>, rx: Receiver<Op>) {
        for op in rx {
            match op {
                Op::Record(record) => inner.accept(record),
                Op::Flush(ack) => {
                    inner.flush();
                    let _ = ack.send(());
                }
                Op::Shutdown => break,
            }
        }
        inner.flush();
    }

    /// Drain queued records, flush the inner sink, and join the worker.
    /// Records accepted after shutdown are dropped.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Op::Shutdown);
        let handle = match self.worker.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl Sink for BufferedSink {
    fn accept(&self, record: Record) {
        match self.tx.try_send(Op::Record(record)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::debug!("Log buffer full, record dropped");
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }

    fn flush(&self) {
        let (ack_tx, ack_rx) = bounded(1);
        if self.tx.send(Op::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for BufferedSink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ── Capture sink ──────────────────────────────────────────────

/// Retains every accepted record in memory. Injected by tests in place
/// of a real output, so assertions can inspect emitted records.
#[derive(Default)]
pub struct CaptureSink {
    records: Mutex<Vec<Record>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything accepted so far, in emit order.
    pub fn records(&self) -> Vec<Record> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Remove and return everything accepted so far.
    pub fn take(&self) -> Vec<Record> {
        match self.records.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Sink for CaptureSink {
    fn accept(&self, record: Record) {
        match self.records.lock() {
            Ok(mut guard) => guard.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}
