// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

use std::path::PathBuf;
use std::sync::Arc;

use duygu_assistant::{run, Assistant, AssistantConfig, ConsoleSpeech, LoggingActionSink};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AssistantConfig::load(config_path.as_deref())?;

    let assistant = Assistant::new(config, Arc::new(ConsoleSpeech::new()), LoggingActionSink);
    run(assistant).await
}
