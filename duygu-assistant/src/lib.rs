// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod actions;
pub mod assistant;
pub mod config;
pub mod router;
pub mod speech;

pub use actions::{Action, ActionRegistry, ActionSink, LoggingActionSink, Platform};
pub use assistant::{run, Assistant, Modes, Pending};
pub use config::AssistantConfig;
pub use router::{CommandRouter, Intent};
pub use speech::{ConsoleSpeech, ScriptedSpeech, SpeechIo};
