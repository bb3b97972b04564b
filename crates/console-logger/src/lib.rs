//! Console Logger
//!
//! `tracing` subscriber for wasm apps. Formatted events go to the browser
//! console (one console method per level) and the most recent lines are kept
//! in a circular buffer so they can be inspected after the fact.

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, OnceLock};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime, MakeWriter};

pub use tracing::level_filters::LevelFilter;

/// Number of lines kept by the global buffer
pub const DEFAULT_CAPACITY: usize = 200;

/// Fixed-size line buffer, oldest lines dropped first
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

static RECENT: OnceLock<Mutex<RingBuffer>> = OnceLock::new();

fn recent() -> &'static Mutex<RingBuffer> {
    RECENT.get_or_init(|| Mutex::new(RingBuffer::new(DEFAULT_CAPACITY)))
}

/// Snapshot of the buffered lines, oldest first
pub fn recent_lines() -> Vec<String> {
    match recent().lock() {
        Ok(buffer) => buffer.lines(),
        Err(_) => Vec::new(),
    }
}

/// Parse a level name such as `debug` or `warn`
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init(level: LevelFilter) -> bool {
    tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoTimer)
        .with_max_level(level)
        .try_init()
        .is_ok()
}

struct ChronoTimer;

impl FormatTime for ChronoTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Utc::now().format("%H:%M:%S%.3f"))
    }
}

#[derive(Clone, Copy)]
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Collects one formatted event and emits it on drop
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self { level, buf: Vec::new() }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        emit(self.level, line);
        if let Ok(mut buffer) = recent().lock() {
            buffer.push(line.to_string());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = line.into();
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        Level::INFO => web_sys::console::info_1(&value),
        _ => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut buffer = RingBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.lines(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut buffer = RingBuffer::new(0);
        buffer.push("ignored".to_string());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_writer_records_trimmed_line() {
        {
            let mut writer = ConsoleWriter::new(Level::WARN);
            writer.write_all(b"[TEST] marker-7f3a\n").unwrap();
        }
        let lines = recent_lines();
        assert!(lines.iter().any(|l| l == "[TEST] marker-7f3a"));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::WARN));
        assert_eq!(parse_level("loud"), None);
    }
}
