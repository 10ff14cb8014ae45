// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gustavo Noronha Silva <gustavo@noronha.dev.br>

use std::{
    borrow::Cow,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::OutputConfig;

static STYLE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("style marker pattern is valid"));

/// Removes ANSI colour/reset sequences, leaving every other byte alone.
pub fn strip_style_markers(text: &str) -> Cow<'_, str> {
    let mut stripped = STYLE_MARKER.replace_all(text, "");

    // Removing one marker can join the halves of another.
    while STYLE_MARKER.is_match(&stripped) {
        stripped = Cow::Owned(STYLE_MARKER.replace_all(&stripped, "").into_owned());
    }

    stripped
}

/// Where persistent log output for a worker goes.
pub trait LogSinks {
    fn find_log_sink(&mut self) -> Option<&mut dyn Write>;
}

pub struct NoLogSink;

impl LogSinks for NoLogSink {
    fn find_log_sink(&mut self) -> Option<&mut dyn Write> {
        None
    }
}

impl<S: LogSinks> LogSinks for Option<S> {
    fn find_log_sink(&mut self) -> Option<&mut dyn Write> {
        self.as_mut().and_then(|sinks| sinks.find_log_sink())
    }
}

/// Per-child log file, opened in append mode on first use.
pub struct LogFile {
    path: PathBuf,
    file: Option<File>,
    failed: bool,
}

impl LogFile {
    pub fn for_child(dir: &Path, child_num: u32) -> Self {
        LogFile {
            path: dir.join(format!("scrawl-child{child_num}.log")),
            file: None,
            failed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSinks for LogFile {
    fn find_log_sink(&mut self) -> Option<&mut dyn Write> {
        if self.file.is_none() && !self.failed {
            match OpenOptions::new().create(true).append(true).open(&self.path) {
                Ok(file) => self.file = Some(file),
                Err(e) => {
                    warn!("cannot open log file {}: {e}", self.path.display());
                    self.failed = true;
                }
            }
        }

        self.file.as_mut().map(|file| file as &mut dyn Write)
    }
}

fn flush_text(out: &mut dyn Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Sends rendered text to the console and the log. Both are best effort; a
/// failure on one never keeps the other from being written.
pub struct OutputRouter<C: Write, S: LogSinks> {
    config: OutputConfig,
    console: C,
    logs: S,
}

impl<C: Write, S: LogSinks> OutputRouter<C, S> {
    pub fn new(config: OutputConfig, console: C, logs: S) -> Self {
        OutputRouter {
            config,
            console,
            logs,
        }
    }

    pub fn route(&mut self, text: &str) {
        if self.config.console_enabled() {
            let text = if self.config.monochrome {
                strip_style_markers(text)
            } else {
                Cow::Borrowed(text)
            };

            if let Err(e) = flush_text(&mut self.console, &text) {
                warn!("console write failed: {e}");
            }
        }

        if self.config.logging {
            match self.logs.find_log_sink() {
                Some(sink) => {
                    if let Err(e) = flush_text(sink, &strip_style_markers(text)) {
                        warn!("log write failed: {e}");
                    }
                }
                None => debug!("no log sink available, skipping persistent log"),
            }
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn logs(&self) -> &S {
        &self.logs
    }
}
