// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the thermostat cloud API.
//!
//! Two calls are implemented, matching what one sync run needs:
//!
//! - a password-grant token exchange against the OAuth endpoint,
//! - a zone-state fetch (`/homes/{home}/zones/{zone}/state`) carrying the
//!   bearer token.
//!
//! The zone-state document is decoded into [`ZoneState`], which exposes
//! exactly the paths the sync decision and the status report consume:
//! `setting.power`, `setting.temperature.celsius`,
//! `sensorDataPoints.insideTemperature.celsius`, and
//! `activityDataPoints.heatingPower.percentage`. Unknown fields in the
//! document are ignored; missing required paths abort the run as a parse
//! error.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AuthError, NetworkError, ParseError, Result};
use crate::http;

/// OAuth scope requested with the password grant.
const SCOPE: &str = "home.user";

// ============================================================================
// TadoClient
// ============================================================================

/// Client for the thermostat cloud service.
///
/// Holds the account credentials and the two configured endpoints. Each
/// run authenticates once and reads the zone once; there is no token
/// refresh and no session reuse across runs.
#[derive(Debug, Clone)]
pub struct TadoClient {
    http: reqwest::Client,
    auth_url: String,
    api_url: String,
    username: String,
    password: String,
    client_id: String,
    client_secret: String,
    home_id: String,
    zone_id: String,
}

impl TadoClient {
    /// Creates a client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: http::client()?,
            auth_url: config.auth_url.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            username: config.account_username.clone(),
            password: config.account_password.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            home_id: config.thermostat_home_id.clone(),
            zone_id: config.thermostat_zone_id.clone(),
        })
    }

    /// Exchanges the account credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] on a non-2xx answer and
    /// [`AuthError::MissingToken`] when the response carries no usable
    /// `access_token`. No further request is issued after either.
    pub async fn authenticate(&self) -> Result<AccessToken> {
        let params = [
            ("grant_type", "password"),
            ("scope", SCOPE),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];

        tracing::debug!(url = %self.auth_url, "Requesting access token");

        let response = self
            .http
            .post(&self.auth_url)
            .form(&params)
            .send()
            .await
            .map_err(NetworkError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(NetworkError::Http)?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(|source| {
            ParseError::Json {
                service: "token",
                source,
            }
        })?;

        tracing::debug!(
            token_type = ?token.token_type,
            expires_in = ?token.expires_in,
            "Received access token"
        );

        token
            .access_token
            .filter(|t| !t.is_empty())
            .map(AccessToken)
            .ok_or_else(|| AuthError::MissingToken.into())
    }

    /// Fetches the current state of the configured zone.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a
    /// response body that does not match the zone-state schema.
    pub async fn zone_state(&self, token: &AccessToken) -> Result<ZoneState> {
        let url = format!(
            "{}/homes/{}/zones/{}/state",
            self.api_url,
            urlencoding::encode(&self.home_id),
            urlencoding::encode(&self.zone_id),
        );

        tracing::debug!(url = %url, "Fetching zone state");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(NetworkError::Http)?;

        http::read_json("zone state", response).await
    }
}

/// Bearer credential for one session.
///
/// Obtained once per run and discarded at process exit; there is no
/// refresh. Only [`TadoClient::authenticate`] produces one.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Returns the raw bearer string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

// ============================================================================
// Zone state schema
// ============================================================================

/// Zone power setting as reported by the thermostat service.
///
/// # Examples
///
/// ```
/// use pumpsync::PowerSetting;
///
/// assert_eq!(PowerSetting::On.as_str(), "ON");
/// assert!(!PowerSetting::Off.is_on());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerSetting {
    /// The zone is switched on.
    On,
    /// The zone is switched off.
    Off,
}

impl PowerSetting {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    /// Returns `true` if the zone is switched on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only snapshot of one heating zone.
///
/// # Examples
///
/// ```
/// let json = r#"{
///     "setting": { "power": "ON", "temperature": { "celsius": 22.0 } },
///     "activityDataPoints": { "heatingPower": { "percentage": 45.0 } },
///     "sensorDataPoints": { "insideTemperature": { "celsius": 21.2 } }
/// }"#;
/// let zone: pumpsync::ZoneState = serde_json::from_str(json).unwrap();
///
/// assert!(zone.power().is_on());
/// assert!(zone.heating_power_percentage() > 0.0);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneState {
    setting: ZoneSetting,
    activity_data_points: ActivityDataPoints,
    sensor_data_points: SensorDataPoints,
}

#[derive(Debug, Clone, Deserialize)]
struct ZoneSetting {
    power: PowerSetting,
    temperature: TemperatureSetting,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct TemperatureSetting {
    celsius: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityDataPoints {
    heating_power: HeatingPowerReading,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct HeatingPowerReading {
    percentage: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SensorDataPoints {
    inside_temperature: TemperatureReading,
}

#[derive(Debug, Clone, Deserialize)]
struct TemperatureReading {
    celsius: f64,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

impl ZoneState {
    /// Returns the zone power setting.
    #[must_use]
    pub fn power(&self) -> PowerSetting {
        self.setting.power
    }

    /// Returns the target temperature in degrees Celsius.
    #[must_use]
    pub fn target_celsius(&self) -> f64 {
        self.setting.temperature.celsius
    }

    /// Returns the measured inside temperature in degrees Celsius.
    #[must_use]
    pub fn inside_celsius(&self) -> f64 {
        self.sensor_data_points.inside_temperature.celsius
    }

    /// Returns the heating power currently delivered, in percent of the
    /// zone's maximum output.
    #[must_use]
    pub fn heating_power_percentage(&self) -> f64 {
        self.activity_data_points.heating_power.percentage
    }

    /// Returns the timestamp of the inside-temperature reading, when the
    /// service supplied one.
    #[must_use]
    pub fn measured_at(&self) -> Option<DateTime<Utc>> {
        self.sensor_data_points.inside_temperature.timestamp
    }
}
