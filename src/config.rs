// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runtime configuration.
//!
//! Every identifier, credential, and endpoint the sync step touches is
//! externalized into a JSON file; nothing is baked into the source. The
//! file is deserialized with serde and validated before any request is
//! made, so a broken configuration never reaches the network.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default token endpoint of the thermostat cloud service.
pub const DEFAULT_AUTH_URL: &str = "https://auth.tado.com/oauth/token";

/// Default REST base URL of the thermostat cloud service.
pub const DEFAULT_API_URL: &str = "https://my.tado.com/api/v2";

/// Configuration for one sync run.
///
/// Deserialized from a JSON file with camelCase keys:
///
/// ```json
/// {
///   "accountUsername": "resident@example.com",
///   "accountPassword": "...",
///   "clientId": "tado-web-app",
///   "clientSecret": "...",
///   "thermostatHomeId": "1234",
///   "thermostatZoneId": "6",
///   "plugBaseUrl": "http://192.168.1.20/api/bridge-username",
///   "plugLightId": "6"
/// }
/// ```
///
/// `authUrl` and `apiUrl` may be set to point at a different service
/// instance; they default to the public Tado endpoints.
///
/// # Examples
///
/// ```
/// use pumpsync::Config;
///
/// let config = Config::from_json(r#"{
///     "accountUsername": "resident@example.com",
///     "accountPassword": "hunter2",
///     "clientId": "tado-web-app",
///     "clientSecret": "secret",
///     "thermostatHomeId": "1234",
///     "thermostatZoneId": "6",
///     "plugBaseUrl": "http://192.168.1.20/api/bridge-username",
///     "plugLightId": "6"
/// }"#).unwrap();
///
/// assert_eq!(config.thermostat_zone_id, "6");
/// assert_eq!(config.auth_url, pumpsync::config::DEFAULT_AUTH_URL);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Account login (email) for the thermostat cloud service.
    pub account_username: String,

    /// Account password for the thermostat cloud service.
    pub account_password: String,

    /// OAuth client id used for the password grant.
    pub client_id: String,

    /// OAuth client secret used for the password grant.
    pub client_secret: String,

    /// Token endpoint of the thermostat service.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// REST base URL of the thermostat service.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Home id within the thermostat account.
    pub thermostat_home_id: String,

    /// Zone id of the heated zone within the home.
    pub thermostat_zone_id: String,

    /// Base URL of the plug bridge, including the bridge API username.
    pub plug_base_url: String,

    /// Light id of the plug channel that powers the pump.
    pub plug_light_id: String,
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Config {
    /// Loads and validates the configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, is not valid
    /// JSON, or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses and validates the configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the JSON cannot be decoded or a field
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every required field is usable before any request is
    /// issued.
    fn validate(&self) -> Result<(), ConfigError> {
        required("accountUsername", &self.account_username)?;
        required("accountPassword", &self.account_password)?;
        required("clientId", &self.client_id)?;
        required("clientSecret", &self.client_secret)?;
        required("thermostatHomeId", &self.thermostat_home_id)?;
        required("thermostatZoneId", &self.thermostat_zone_id)?;
        required("plugLightId", &self.plug_light_id)?;
        http_url("authUrl", &self.auth_url)?;
        http_url("apiUrl", &self.api_url)?;
        http_url("plugBaseUrl", &self.plug_base_url)?;
        Ok(())
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    Ok(())
}

fn http_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    required(field, value)?;
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_json() -> String {
        r#"{
            "accountUsername": "resident@example.com",
            "accountPassword": "hunter2",
            "clientId": "tado-web-app",
            "clientSecret": "secret",
            "authUrl": "https://auth.example.com/oauth/token",
            "apiUrl": "https://api.example.com/api/v2",
            "thermostatHomeId": "1234",
            "thermostatZoneId": "6",
            "plugBaseUrl": "http://192.168.1.20/api/bridge-username",
            "plugLightId": "6"
        }"#
        .to_string()
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::from_json(&full_json()).unwrap();
        assert_eq!(config.account_username, "resident@example.com");
        assert_eq!(config.client_id, "tado-web-app");
        assert_eq!(config.auth_url, "https://auth.example.com/oauth/token");
        assert_eq!(config.thermostat_home_id, "1234");
        assert_eq!(config.plug_light_id, "6");
    }

    #[test]
    fn endpoint_urls_default_to_public_service() {
        let json = full_json()
            .lines()
            .filter(|line| !line.contains("authUrl") && !line.contains("apiUrl"))
            .collect::<Vec<_>>()
            .join("\n");
        let config = Config::from_json(&json).unwrap();
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let json = full_json().replace("accountUsername", "somebodyElse");
        let err = Config::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn empty_field_is_rejected() {
        let json = full_json().replace("hunter2", "");
        let err = Config::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField("accountPassword")
        ));
    }

    #[test]
    fn blank_field_is_rejected() {
        let json = full_json().replace("hunter2", "   ");
        let err = Config::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField("accountPassword")
        ));
    }

    #[test]
    fn non_http_plug_url_is_rejected() {
        let json = full_json().replace("http://192.168.1.20/api/bridge-username", "192.168.1.20");
        let err = Config::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                field: "plugBaseUrl",
                ..
            }
        ));
    }

    #[test]
    fn unreadable_file_is_reported_with_path() {
        let err = Config::from_file("/definitely/not/there.json").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => {
                assert_eq!(path.to_string_lossy(), "/definitely/not/there.json");
            }
            other => panic!("expected Read error, got {other}"),
        }
    }
}
