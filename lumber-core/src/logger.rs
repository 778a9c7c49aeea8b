//! The logger handle.

use crate::config::{LogOutput, LoggingConfig};
use crate::error::LumberError;
use crate::field::Field;
use crate::record::{Level, Record};
use crate::sampler::Sampler;
use crate::sink::{BufferedSink, JsonLineSink, Sink};
use crate::scope::RequestScope;
use std::fs::OpenOptions;
use std::sync::Arc;

/// A cheaply clonable handle over a shared sink.
///
/// Constructed once at the application's composition root and passed to
/// every component that logs; tests construct one over a
/// [`crate::sink::CaptureSink`]. Emit calls are safe from any number of
/// concurrent request handlers, never return an error, and never block
/// beyond the sink's own synchronous hand-off.
///
/// Every record carries the call-site fields first, then the scope's
/// context fields (host, endpoint, method) appended in order.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Sink>,
}

impl Logger {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    /// Compose the sink stack described by the config: JSON lines to the
    /// configured output, level filter, sampling, and optionally the
    /// non-blocking background buffer.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, LumberError> {
        let sampler = Sampler::new(config.sampling.clone());
        let json = match &config.output {
            LogOutput::Stderr => JsonLineSink::stderr(config.level, sampler),
            LogOutput::Stdout => JsonLineSink::stdout(config.level, sampler),
            LogOutput::File { path } => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                JsonLineSink::new(Box::new(file), config.level, sampler)
            }
        };
        let json = Arc::new(json);
        let sink: Arc<dyn Sink> = if config.buffered {
            Arc::new(BufferedSink::new(json, config.buffer_capacity)?)
        } else {
            json
        };
        Ok(Self::new(sink))
    }

    pub fn debug(&self, scope: &RequestScope, msg: &str, fields: &[Field]) {
        self.emit(Level::Debug, scope, msg, fields);
    }

    pub fn info(&self, scope: &RequestScope, msg: &str, fields: &[Field]) {
        self.emit(Level::Info, scope, msg, fields);
    }

    pub fn warn(&self, scope: &RequestScope, msg: &str, fields: &[Field]) {
        self.emit(Level::Warn, scope, msg, fields);
    }

    pub fn error(&self, scope: &RequestScope, msg: &str, fields: &[Field]) {
        self.emit(Level::Error, scope, msg, fields);
    }

    fn emit(&self, level: Level, scope: &RequestScope, msg: &str, fields: &[Field]) {
        let mut all = Vec::with_capacity(fields.len() + 3);
        all.extend_from_slice(fields);
        all.extend(scope.fields());
        self.sink.accept(Record::new(level, msg, all));
    }

    pub fn flush(&self) {
        self.sink.flush();
    }
}
