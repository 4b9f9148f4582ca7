//! Destination of the prelude's `print`.
//!
//! Programs write through a [`SharedPrintHandler`] owned by the runtime, so
//! embedders choose between the process stdout, an in-memory buffer (tests
//! and embedding hosts) or discarding output.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes straight to the process stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not the program's problem.
        let _ = writeln!(out, "{text}");
    }

    pub fn print(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{text}");
        let _ = out.flush();
    }
}

/// Collects output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, text: &str) {
        let mut buffer = self.buffer.lock();
        buffer.push_str(text);
        buffer.push('\n');
    }

    pub fn print(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Return the collected output and start over.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }
}

/// Print handler selected at interpreter construction.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    /// Drops everything.
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, text: &str) {
        match self {
            Self::Stdout(h) => h.println(text),
            Self::Buffer(h) => h.println(text),
            Self::Silent => {}
        }
    }

    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout(h) => h.print(text),
            Self::Buffer(h) => h.print(text),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.take(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn captures(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }
}

/// Shared between the runtime and its embedder.
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
