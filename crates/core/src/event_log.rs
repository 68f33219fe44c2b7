//! JSON-lines event log.
//!
//! One record per dispatched event (ticks excluded), written as it happens.
//! A failed write turns the log off; gameplay never depends on it.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::controller::Mode;
use crate::event::Event;

#[derive(Debug, Serialize)]
struct Record<'a> {
    t_ms: u64,
    episode: u32,
    event: &'a Event,
    mode: &'a Mode,
    score: u32,
}

pub struct EventLog {
    out: Option<Box<dyn Write>>,
    buf: Vec<u8>,
}

impl EventLog {
    /// Append to the file at `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::to_writer(BufWriter::new(file)))
    }

    pub fn to_writer(out: impl Write + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, t_ms: u64, episode: u32, event: &Event, mode: &Mode, score: u32) {
        if matches!(event, Event::Tick) {
            return;
        }
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        let rec = Record {
            t_ms,
            episode,
            event,
            mode,
            score,
        };
        if serde_json::to_writer(&mut self.buf, &rec).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
        }
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
