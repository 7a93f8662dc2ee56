// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-shot runner: load the configuration, run a single synchronisation
//! cycle, print the status report. The report is the only stdout output;
//! diagnostics and errors go to stderr. Any failure exits non-zero so a
//! scheduler can spot broken runs.

use std::env;
use std::io;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pumpsync::{Config, PumpController, SyncOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "pumpsync.json".to_string());

    match run(&config_path).await {
        Ok(outcome) => {
            println!("{outcome}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("pumpsync: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config_path: &str) -> pumpsync::Result<SyncOutcome> {
    let config = Config::from_file(config_path)?;
    let controller = PumpController::from_config(&config)?;
    controller.run_once().await
}
