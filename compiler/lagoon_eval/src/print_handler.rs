//! Destinations for `print`.
//!
//! - Stdout: the default for scripts run from the command line
//! - Buffer: captures output for tests and embedding hosts
//! - Silent: discards everything
//!
//! Enum dispatch keeps `print` free of vtable indirection.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn print(&self, msg: &str) -> io::Result<()> {
        write_flushed(&mut std::io::stdout().lock(), msg)
    }
}

fn write_flushed(out: &mut impl Write, msg: &str) -> io::Result<()> {
    out.write_all(msg.as_bytes())?;
    out.flush()
}

/// Captures output to a buffer.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler::default()
    }

    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    /// Writes `msg` as is; callers add the line terminator.
    ///
    /// Only the stdout handler can fail, when the stream is closed or full.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => {
                h.print(msg);
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between an interpreter and its host.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn buffer_handler_captures_in_order() {
        let handler = buffer_handler();
        handler.print("hello").unwrap();
        handler.print(" world\n").unwrap();
        assert_eq!(handler.get_output(), "hello world\n");
    }

    #[test]
    fn buffer_handler_clear_empties_buffer() {
        let handler = BufferPrintHandler::new();
        handler.print("x");
        handler.clear();
        assert!(handler.get_output().is_empty());
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let err = write_flushed(&mut ClosedPipe, "hello").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn silent_handler_discards_output() {
        let handler = silent_handler();
        assert!(handler.print("hello").is_ok());
        assert_eq!(handler.get_output(), "");
    }
}
