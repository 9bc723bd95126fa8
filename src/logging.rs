//! Log output that stays off the screen while the picker owns the terminal.
//!
//! [`writer`] is handed to the `tracing-subscriber` fmt layer. While a
//! [`HeldLogs`] guard is alive, log lines are buffered instead of written to
//! stderr, and the buffer is flushed when the guard drops.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static HELD: AtomicBool = AtomicBool::new(false);
static BUFFER: Mutex<Vec<u8>> = Mutex::new(Vec::new());

/// Writer for one log event.
pub enum LogSink {
    Stderr(io::Stderr),
    Held,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::Stderr(stderr) => stderr.write(buf),
            LogSink::Held => {
                lock_buffer().extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::Stderr(stderr) => stderr.flush(),
            LogSink::Held => Ok(()),
        }
    }
}

/// Make a writer for the current output mode.
pub fn writer() -> LogSink {
    if HELD.load(Ordering::Acquire) {
        LogSink::Held
    } else {
        LogSink::Stderr(io::stderr())
    }
}

/// Buffer log output until the returned guard is dropped.
pub fn hold() -> HeldLogs {
    HELD.store(true, Ordering::Release);
    HeldLogs { _private: () }
}

pub fn is_held() -> bool {
    HELD.load(Ordering::Acquire)
}

/// Releases held log output on drop.
pub struct HeldLogs {
    _private: (),
}

impl Drop for HeldLogs {
    fn drop(&mut self) {
        HELD.store(false, Ordering::Release);
        let held = take_held();
        if !held.is_empty() {
            let _ = io::stderr().write_all(&held);
        }
    }
}

fn lock_buffer() -> std::sync::MutexGuard<'static, Vec<u8>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn take_held() -> Vec<u8> {
    std::mem::take(&mut *lock_buffer())
}
