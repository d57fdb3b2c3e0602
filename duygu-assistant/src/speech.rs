// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Speech collaborator: bounded-wait listening and speaking.
//!
//! Both methods take `&self` so the listening loop and the sleep-mode task
//! can share one instance; a reply may be spoken while a listen is pending.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

pub trait SpeechIo: Send + Sync {
    /// Wait up to `timeout` for speech to begin and return the recognized
    /// text. `None` on timeout or when nothing intelligible was heard.
    fn listen(&self, timeout: Duration, phrase_limit: Duration) -> Option<String>;

    /// Say `text`. Failures degrade to printing it.
    fn speak(&self, text: &str);

    /// False once no further input can ever arrive.
    fn is_open(&self) -> bool {
        true
    }
}

/// Keyboard input and printed output.
///
/// Stdin is read on a dedicated thread so `listen` can honor its timeout.
/// A typed line is one complete phrase, so `phrase_limit` does not apply.
pub struct ConsoleSpeech {
    lines: Mutex<Receiver<String>>,
    open: AtomicBool,
}

impl ConsoleSpeech {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("stdin read failed: {e}");
                        break;
                    }
                }
            }
            debug!("stdin closed");
        });
        Self {
            lines: Mutex::new(rx),
            open: AtomicBool::new(true),
        }
    }
}

impl Default for ConsoleSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechIo for ConsoleSpeech {
    fn listen(&self, timeout: Duration, _phrase_limit: Duration) -> Option<String> {
        let lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        match lines.recv_timeout(timeout) {
            Ok(line) => {
                let line = line.trim().to_lowercase();
                (!line.is_empty()).then_some(line)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.open.store(false, Ordering::SeqCst);
                None
            }
        }
    }

    fn speak(&self, text: &str) {
        let mut out = io::stdout().lock();
        if writeln!(out, "🤖 {text}").and_then(|_| out.flush()).is_err() {
            warn!(text, "console output failed");
        }
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// Replays a fixed script of utterances and records everything spoken.
/// Used for dry runs and tests.
#[derive(Default)]
pub struct ScriptedSpeech {
    script: Mutex<VecDeque<String>>,
    spoken: Mutex<Vec<String>>,
}

impl ScriptedSpeech {
    pub fn new<I, T>(script: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            script: Mutex::new(script.into_iter().map(Into::into).collect()),
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// Everything spoken so far, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear_spoken(&self) {
        self.spoken.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl SpeechIo for ScriptedSpeech {
    fn listen(&self, _timeout: Duration, _phrase_limit: Duration) -> Option<String> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).pop_front()
    }

    fn speak(&self, text: &str) {
        self.spoken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }

    fn is_open(&self) -> bool {
        !self.script.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}
