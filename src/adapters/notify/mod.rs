//! Notification sinks
//!
//! Both sinks emit one JSON object per line. The chat delivery step picks the
//! records up from there.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::core::models::Notification;
use crate::core::ports::{DeliveryError, Notifier};

/// Console stream notifications are written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error, used when stdout carries the JSON run summary
    Stderr,
}

/// Writes notifications to the console, one JSON object per line
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    stream: ConsoleStream,
}

impl ConsoleNotifier {
    /// Notifier writing to `stream`
    #[must_use]
    pub const fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    /// Stream this notifier writes to
    #[must_use]
    pub const fn stream(self) -> ConsoleStream {
        self.stream
    }
}

impl Notifier for ConsoleNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let line = serde_json::to_string(notification)?;
        match self.stream {
            ConsoleStream::Stdout => write_line(&mut io::stdout().lock(), &line)?,
            ConsoleStream::Stderr => write_line(&mut io::stderr().lock(), &line)?,
        }
        Ok(())
    }
}

fn write_line(out: &mut impl Write, line: &str) -> io::Result<()> {
    writeln!(out, "{line}")?;
    out.flush()
}

/// Appends notifications to a JSON-lines outbox file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxNotifier {
    path: PathBuf,
}

impl OutboxNotifier {
    /// Outbox at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the outbox file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Notifier for OutboxNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let line = serde_json::to_string(notification)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Where notifications should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The console
    Stdout,
    /// JSON-lines file
    Outbox(PathBuf),
}

impl Destination {
    /// Parse a destination; `-` means standard output
    #[must_use]
    pub fn parse(value: &Path) -> Self {
        if value.as_os_str() == "-" {
            Self::Stdout
        } else {
            Self::Outbox(value.to_path_buf())
        }
    }

    /// Build the notifier for this destination
    ///
    /// `console` picks the stream for the `-` destination so notification
    /// lines never mix with a JSON summary on stdout.
    #[must_use]
    pub fn notifier(&self, console: ConsoleStream) -> Box<dyn Notifier> {
        match self {
            Self::Stdout => Box::new(ConsoleNotifier::new(console)),
            Self::Outbox(path) => Box::new(OutboxNotifier::new(path.clone())),
        }
    }
}
