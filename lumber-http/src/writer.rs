//! Response writer capability and the status-capturing decorator.

/// The write surface a handler sees: a status line and body bytes.
///
/// Infallible like the transport-facing writers it decorates; hosts own
/// their own write-error handling.
pub trait ResponseWriter: Send {
    /// Write the HTTP status code.
    fn write_header(&mut self, status: u16);

    /// Write body bytes to the client.
    fn write_body(&mut self, chunk: &[u8]);
}

impl<W: ResponseWriter + ?Sized> ResponseWriter for &mut W {
    fn write_header(&mut self, status: u16) {
        (**self).write_header(status);
    }

    fn write_body(&mut self, chunk: &[u8]) {
        (**self).write_body(chunk);
    }
}

impl<W: ResponseWriter + ?Sized> ResponseWriter for Box<W> {
    fn write_header(&mut self, status: u16) {
        (**self).write_header(status);
    }

    fn write_body(&mut self, chunk: &[u8]) {
        (**self).write_body(chunk);
    }
}

/// Pass-through decorator that records the first status code written.
///
/// Only the recording is idempotent: every `write_header` call, first or
/// repeated, is forwarded to the wrapped writer unchanged, so the host's
/// own duplicate-write protections still fire. Body writes pass through
/// untouched and never record. No buffering.
pub struct StatusWriter<W> {
    inner: W,
    status: Option<u16>,
}

impl<W: ResponseWriter> StatusWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            status: None,
        }
    }

    /// The recorded status code, or 200 when no header write ever
    /// occurred (the implicit HTTP default for body-only responses).
    pub fn status(&self) -> u16 {
        self.status.unwrap_or(200)
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: ResponseWriter> ResponseWriter for StatusWriter<W> {
    fn write_header(&mut self, status: u16) {
        if self.status.is_none() {
            self.status = Some(status);
        }
        self.inner.write_header(status);
    }

    fn write_body(&mut self, chunk: &[u8]) {
        self.inner.write_body(chunk);
    }
}

/// In-memory writer for tests: keeps every header write in order and
/// accumulates the body.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    pub header_writes: Vec<u16>,
    pub body: Vec<u8>,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first status written, or 200.
    pub fn status(&self) -> u16 {
        self.header_writes.first().copied().unwrap_or(200)
    }
}

impl ResponseWriter for ResponseRecorder {
    fn write_header(&mut self, status: u16) {
        self.header_writes.push(status);
    }

    fn write_body(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_200() {
        let writer = StatusWriter::new(ResponseRecorder::new());
        assert_eq!(writer.status(), 200);
    }

    #[test]
    fn first_header_write_is_recorded() {
        let mut writer = StatusWriter::new(ResponseRecorder::new());
        writer.write_header(300);
        assert_eq!(writer.status(), 300);
    }

    #[test]
    fn repeated_header_writes_forward_but_keep_first_status() {
        let mut writer = StatusWriter::new(ResponseRecorder::new());
        writer.write_header(404);
        writer.write_header(500);
        assert_eq!(writer.status(), 404);
        assert_eq!(writer.into_inner().header_writes, vec![404, 500]);
    }

    #[test]
    fn body_writes_pass_through_without_recording() {
        let mut writer = StatusWriter::new(ResponseRecorder::new());
        writer.write_body(b"hello ");
        writer.write_body(b"world");
        assert_eq!(writer.status(), 200);
        let recorder = writer.into_inner();
        assert_eq!(recorder.body, b"hello world");
        assert!(recorder.header_writes.is_empty());
    }

    #[test]
    fn decorator_works_over_a_trait_object() {
        let mut recorder = ResponseRecorder::new();
        {
            let dyn_writer: &mut dyn ResponseWriter = &mut recorder;
            let mut writer = StatusWriter::new(dyn_writer);
            writer.write_header(201);
            writer.write_body(b"{\"id\":1}");
            assert_eq!(writer.status(), 201);
        }
        assert_eq!(recorder.status(), 201);
        assert_eq!(recorder.body, b"{\"id\":1}");
    }
}
