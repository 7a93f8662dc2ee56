// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the smart plug driving the circulation pump.
//!
//! The plug is addressed through a Hue-bridge style REST surface rooted at
//! the configured base URL (typically `http://<bridge>/api/<user>`). Reads
//! go to `/lights/{id}`, writes to `/lights/{id}/state`. The bridge does
//! not authenticate requests beyond the application key embedded in the
//! base URL, so no token handling happens here.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{NetworkError, Result};
use crate::http;

// ============================================================================
// HueClient
// ============================================================================

/// Client for the bridged smart plug.
#[derive(Debug, Clone)]
pub struct HueClient {
    http: reqwest::Client,
    base_url: String,
    light_id: String,
}

impl HueClient {
    /// Creates a client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            base_url: config.plug_base_url.trim_end_matches('/').to_string(),
            light_id: config.plug_light_id.clone(),
        })
    }

    fn light_url(&self) -> String {
        format!(
            "{}/lights/{}",
            self.base_url,
            urlencoding::encode(&self.light_id)
        )
    }

    /// Reads the current on/off state of the plug.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a
    /// response body that does not match the light schema.
    pub async fn plug_state(&self) -> Result<PlugState> {
        let url = self.light_url();

        tracing::debug!(url = %url, "Fetching plug state");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(NetworkError::Http)?;

        http::read_json("plug", response).await
    }

    /// Switches the plug on or off.
    ///
    /// The bridge acknowledges with a result array which is logged but not
    /// interpreted; a non-2xx status is the failure signal.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn set_on(&self, on: bool) -> Result<()> {
        let url = format!("{}/state", self.light_url());

        tracing::debug!(url = %url, on, "Writing plug state");

        let response = self
            .http
            .put(&url)
            .json(&StateUpdate { on })
            .send()
            .await
            .map_err(NetworkError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                service: "plug",
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(NetworkError::Http)?;
        tracing::debug!(body = %body, "Plug acknowledged state write");

        Ok(())
    }
}

// ============================================================================
// Plug state schema
// ============================================================================

/// Read-only snapshot of the plug as reported by the bridge.
///
/// # Examples
///
/// ```
/// let json = r#"{ "state": { "on": true, "reachable": true }, "name": "Pump" }"#;
/// let plug: pumpsync::PlugState = serde_json::from_str(json).unwrap();
///
/// assert!(plug.is_on());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PlugState {
    state: LightState,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LightState {
    on: bool,
}

impl PlugState {
    /// Returns `true` if the plug relay is currently closed.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.on
    }
}

#[derive(Debug, Serialize)]
struct StateUpdate {
    on: bool,
}
