// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `pumpsync` - Keep a floor-heating circulation pump in step with its
//! thermostat zone.
//!
//! A Tado zone reports how much heat it is currently delivering; the pump
//! that circulates water through the floor hangs off a Hue-bridged smart
//! plug. This crate performs one synchronisation cycle between the two:
//!
//! - **Authenticate**: exchange the account credentials for a bearer token
//! - **Observe**: read the zone state and the plug state
//! - **Decide**: the pump must run exactly while heating power is above zero
//! - **Correct**: switch the plug when it disagrees with the zone
//!
//! The cycle is strictly sequential and fail-fast: the first failing step
//! aborts the run, and the plug is never written on partial data. Running
//! the cycle periodically is left to an external scheduler such as cron.
//!
//! # Quick Start
//!
//! ```no_run
//! use pumpsync::{Config, PumpController};
//!
//! #[tokio::main]
//! async fn main() -> pumpsync::Result<()> {
//!     let config = Config::from_file("pumpsync.json")?;
//!     let controller = PumpController::from_config(&config)?;
//!
//!     let outcome = controller.run_once().await?;
//!     println!("{outcome}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Status report
//!
//! [`SyncOutcome`] renders the observations and the action taken, one per
//! line:
//!
//! ```text
//! Zone 6 setting: ON
//! Zone 6 heating power: 45%
//! Zone 6 current temperature: 21.2 °C
//! Zone 6 target temperature: 22.0 °C
//! Pump plug: off
//! PUMP TURNED ON
//! ```

pub mod config;
pub mod controller;
pub mod error;
mod http;
pub mod hue;
pub mod tado;

pub use config::Config;
pub use controller::{PumpAction, PumpController, SyncOutcome};
pub use error::{AuthError, ConfigError, Error, NetworkError, ParseError, Result};
pub use hue::{HueClient, PlugState};
pub use tado::{AccessToken, PowerSetting, TadoClient, ZoneState};
