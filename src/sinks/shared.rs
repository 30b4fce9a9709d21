//! Byte sinks shared between the logger state and writing threads

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A writer that several threads can hold and lock for each line.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Wrap any writer so it can be installed as a sink.
pub fn shared<W: Write + Send + 'static>(writer: W) -> SharedWriter {
    Arc::new(Mutex::new(writer))
}

/// Write one complete line to a sink and flush it.
///
/// Errors are dropped: a failing sink must not break the caller, and there
/// is nowhere to report the failure without recursing into the logger.
pub(crate) fn write_line(sink: &SharedWriter, line: &str) {
    let mut writer = sink.lock();
    let _ = writer.write_all(line.as_bytes());
    let _ = writer.flush();
}

/// In-memory sink whose clones all append to the same buffer.
///
/// Handy for capturing output from `Logger::set_output` or
/// `Logger::with_console`.
///
/// ```
/// use cni_log::{Level, Logger, SharedBuffer};
///
/// let console = SharedBuffer::new();
/// let logger = Logger::with_console(console.clone());
/// logger.set_default_prefixer();
/// logger.infof(format_args!("hello {}", 7));
/// assert!(console.contents().ends_with("[info] hello 7\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
