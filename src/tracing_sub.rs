use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::Level;

/// Bytes kept while capturing; older output is dropped first.
const CAPTURE_LIMIT: usize = 64 * 1024;

/// Holds back stderr-bound log output while the UI owns the terminal, so it
/// can be printed once the terminal is restored.
#[derive(Debug, Default)]
pub struct CaptureBuffer {
    active: AtomicBool,
    bytes: Mutex<Vec<u8>>,
}

impl CaptureBuffer {
    pub fn start(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop capturing and return everything held back.
    pub fn finish(&self) -> String {
        self.active.store(false, Ordering::SeqCst);
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&std::mem::take(&mut *bytes)).into_owned()
    }

    fn append(&self, buf: &[u8]) {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        bytes.extend_from_slice(buf);
        if bytes.len() > CAPTURE_LIMIT {
            let excess = bytes.len() - CAPTURE_LIMIT;
            bytes.drain(..excess);
        }
    }
}

static STDERR_CAPTURE: OnceLock<Arc<CaptureBuffer>> = OnceLock::new();

/// The process-wide buffer used by the subscriber installed with [`init`].
pub fn stderr_capture() -> &'static Arc<CaptureBuffer> {
    STDERR_CAPTURE.get_or_init(Arc::default)
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Captured(Arc<CaptureBuffer>),
    Stderr(io::Stderr),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).write(buf),
            DelegatingInner::Captured(c) => {
                c.append(buf);
                Ok(buf.len())
            }
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => (&**f).flush(),
            DelegatingInner::Captured(_) => Ok(()),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

/// Hands each event a writer over the log file. Without a file, events go
/// to stderr, or into the capture buffer while it is active.
#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<File>>,
    capture: Arc<CaptureBuffer>,
}

impl SubscriberMakeWriter {
    pub fn stderr() -> Self {
        Self::with_capture(Arc::clone(stderr_capture()))
    }

    pub fn with_capture(capture: Arc<CaptureBuffer>) -> Self {
        Self {
            file: None,
            capture,
        }
    }

    /// Append to `path`, creating it if needed.
    pub fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Arc::new(file)),
            capture: Arc::clone(stderr_capture()),
        })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None if self.capture.is_active() => {
                DelegatingInner::Captured(Arc::clone(&self.capture))
            }
            None => DelegatingInner::Stderr(io::stderr()),
        };
        DelegatingWriter { inner }
    }
}

/// Install the global subscriber. With a log file everything down to DEBUG
/// is recorded; otherwise only warnings and errors go to stderr, held back
/// in [`stderr_capture`] while it is active. Safe to call multiple times;
/// later calls are no-ops.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let (writer, level) = match log_file {
        Some(path) => (SubscriberMakeWriter::file(path)?, Level::DEBUG),
        None => (SubscriberMakeWriter::stderr(), Level::WARN),
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_writer_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compose.log");
        let make = SubscriberMakeWriter::file(&path).unwrap();
        make.make_writer().write_all(b"first\n").unwrap();
        make.make_writer().write_all(b"second\n").unwrap();
        let logged = std::fs::read_to_string(&path).unwrap();
        assert_eq!(logged, "first\nsecond\n");
    }

    #[test]
    fn active_capture_holds_back_stderr_output() {
        let capture = Arc::new(CaptureBuffer::default());
        let make = SubscriberMakeWriter::with_capture(Arc::clone(&capture));
        capture.start();
        make.make_writer()
            .write_all(b"WARN tool entry rendered as placeholder\n")
            .unwrap();
        assert!(capture.is_active());
        assert_eq!(capture.finish(), "WARN tool entry rendered as placeholder\n");
        assert!(!capture.is_active());
        assert_eq!(capture.finish(), "");
    }

    #[test]
    fn events_reach_the_capture_through_a_subscriber() {
        let capture = Arc::new(CaptureBuffer::default());
        capture.start();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_writer(SubscriberMakeWriter::with_capture(Arc::clone(&capture)))
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("unknown widget kind");
            tracing::debug!("filtered out");
        });
        let held_back = capture.finish();
        assert!(held_back.contains("unknown widget kind"));
        assert!(!held_back.contains("filtered out"));
    }

    #[test]
    fn capture_keeps_only_the_newest_bytes() {
        let capture = CaptureBuffer::default();
        capture.start();
        capture.append(&vec![b'a'; CAPTURE_LIMIT]);
        capture.append(b"tail");
        let held_back = capture.finish();
        assert_eq!(held_back.len(), CAPTURE_LIMIT);
        assert!(held_back.ends_with("aatail"));
    }

    #[test]
    fn repeated_init_is_harmless() {
        init(None).unwrap();
        init(None).unwrap();
    }
}
