// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Desktop actions and the registry of named action sequences.
//!
//! The assistant never touches the browser or keyboard directly. It hands
//! [`Action`]s to an [`ActionSink`], which keeps platform automation out of
//! the command logic and lets tests record what would have happened.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

const SEARCH_URL: &str = "https://www.google.com/search?q=";
const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";
const SPOTIFY_SEARCH_URL: &str = "https://open.spotify.com/search/";

fn plus_joined(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join("+")
}

/// One side effect on the host desktop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Open a URL in the default browser.
    OpenUrl { url: String },
    /// Press a single key `repeat` times.
    KeyPress { key: String, repeat: u32 },
    /// Press a key combination, modifiers first.
    Hotkey { keys: Vec<String> },
}

impl Action {
    pub fn open(url: impl Into<String>) -> Self {
        Self::OpenUrl { url: url.into() }
    }

    pub fn press(key: impl Into<String>) -> Self {
        Self::press_n(key, 1)
    }

    pub fn press_n(key: impl Into<String>, repeat: u32) -> Self {
        Self::KeyPress {
            key: key.into(),
            repeat,
        }
    }

    pub fn hotkey(keys: &[&str]) -> Self {
        Self::Hotkey {
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Google search for `query`, words joined with '+'.
    pub fn search(query: &str) -> Self {
        Self::open(format!("{SEARCH_URL}{}", plus_joined(query)))
    }
}

/// Where songs and videos are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    YouTube,
    Spotify,
}

impl Platform {
    /// Platform named in a reply such as "youtube'dan olsun".
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if lower.contains("youtube") {
            Some(Self::YouTube)
        } else if lower.contains("spotify") {
            Some(Self::Spotify)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Spotify => "Spotify",
        }
    }

    /// Search page for `query` on this platform.
    pub fn search(self, query: &str) -> Action {
        let base = match self {
            Self::YouTube => YOUTUBE_SEARCH_URL,
            Self::Spotify => SPOTIFY_SEARCH_URL,
        };
        Action::open(format!("{base}{}", plus_joined(query)))
    }
}

/// Executes actions on the host.
pub trait ActionSink: Send + Sync {
    fn execute(&self, action: &Action) -> Result<()>;
}

impl<T: ActionSink + ?Sized> ActionSink for Arc<T> {
    fn execute(&self, action: &Action) -> Result<()> {
        (**self).execute(action)
    }
}

/// Logs each action instead of performing it. Default for the console binary.
#[derive(Debug, Default)]
pub struct LoggingActionSink;

impl ActionSink for LoggingActionSink {
    fn execute(&self, action: &Action) -> Result<()> {
        match action {
            Action::OpenUrl { url } => info!(url = %url, "open url"),
            Action::KeyPress { key, repeat } => info!(key = %key, repeat, "key press"),
            Action::Hotkey { keys } => info!(keys = %keys.join("+"), "hotkey"),
        }
        Ok(())
    }
}

/// Records every executed action.
#[derive(Debug, Default)]
pub struct RecordingActionSink {
    executed: Mutex<Vec<Action>>,
}

impl RecordingActionSink {
    pub fn executed(&self) -> Vec<Action> {
        self.executed.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ActionSink for RecordingActionSink {
    fn execute(&self, action: &Action) -> Result<()> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action.clone());
        Ok(())
    }
}

/// A named action sequence with its spoken announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    /// Unique name, referenced by router rules.
    pub name: String,
    pub description: String,
    pub steps: Vec<Action>,
    /// Spoken before the steps run.
    pub announcement: String,
}

impl ActionEntry {
    fn new(name: &str, description: &str, announcement: &str, steps: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps,
            announcement: announcement.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    entries: Vec<ActionEntry>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        let defaults = [
            ActionEntry::new("spotify", "Spotify web player", "Spotify açılıyor", vec![Action::open("https://open.spotify.com")]),
            ActionEntry::new("youtube", "YouTube", "YouTube açılıyor", vec![Action::open("https://www.youtube.com")]),
            ActionEntry::new("news", "Google News", "Google Haberler açılıyor", vec![Action::open("https://news.google.com")]),
            ActionEntry::new("netflix", "Netflix", "Netflix açılıyor", vec![Action::open("https://www.netflix.com")]),
            ActionEntry::new("maps", "Google Maps", "Google Haritalar açılıyor", vec![Action::open("https://www.google.com/maps")]),
            ActionEntry::new("pause", "Pause playback", "Müzik duraklatıldı", vec![Action::press("space")]),
            ActionEntry::new("resume", "Resume playback", "Müzik devam ediyor", vec![Action::press("space")]),
            ActionEntry::new("next", "Next track", "Sonraki şarkıya geçiliyor", vec![Action::press("nexttrack")]),
            ActionEntry::new("next_video", "Next YouTube video", "Video değiştiriliyor", vec![Action::hotkey(&["shift", "n"])]),
            ActionEntry::new("previous", "Previous track", "Önceki şarkıya geçiliyor", vec![Action::press("prevtrack")]),
            ActionEntry::new("fullscreen", "Toggle fullscreen video", "YouTube tam ekran yapıldı", vec![Action::press("f")]),
            ActionEntry::new("volume_up", "Raise volume", "Ses açılıyor", vec![Action::press_n("volumeup", 5)]),
            ActionEntry::new("volume_down", "Lower volume", "Ses kısılıyor", vec![Action::press_n("volumedown", 5)]),
            ActionEntry::new("new_tab", "Open a browser tab", "Yeni sekme açılıyor", vec![Action::hotkey(&["ctrl", "t"])]),
            ActionEntry::new("close_tab", "Close the browser tab", "Sekme kapatılıyor", vec![Action::hotkey(&["ctrl", "w"])]),
            ActionEntry::new(
                "switch_tab",
                "Close the tab and move to the next one",
                "Sekme kapatıldı ve diğer sekmeye geçildi",
                vec![Action::hotkey(&["ctrl", "w"]), Action::hotkey(&["ctrl", "tab"])],
            ),
        ];
        self.entries.extend(defaults);
    }

    /// Register an entry, replacing one with the same name.
    pub fn register(&mut self, entry: ActionEntry) {
        self.entries.retain(|e| e.name != entry.name);
        self.entries.push(entry);
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() < before
    }

    pub fn get(&self, name: &str) -> Option<&ActionEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn list(&self) -> &[ActionEntry] {
        &self.entries
    }
}
