// This file is part of the terraform-provider-morpheus project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Result;
use tf_provider::serve;
use tracing_subscriber::EnvFilter;

mod client;
mod cloud;
mod config;
mod morpheus_provider;
mod utils;

use morpheus_provider::MorpheusProvider;

/// Set by tf-provider users to have the server install its own file logger
const FRAMEWORK_LOG_FILE: &str = "GENERIC_PROVIDER_LOG_FILE";

/// Only one global subscriber can exist: leave it to tf-provider when its log file is requested
fn owns_logging(env: impl Fn(&str) -> Option<std::ffi::OsString>) -> bool {
    env(FRAMEWORK_LOG_FILE).is_none()
}

/// Log to stderr: stdout carries the plugin handshake
fn init_logging() {
    if !owns_logging(|var| std::env::var_os(var)) {
        return;
    }

    let filter = EnvFilter::try_from_env("TF_LOG_PROVIDER")
        .or_else(|_| EnvFilter::try_from_env("TF_LOG"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    serve("morpheus", MorpheusProvider::default()).await
}
