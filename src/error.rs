// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the pumpsync crate.
//!
//! Failures are grouped by the stage that produced them: configuration
//! loading, the token exchange, request transport, and response decoding.
//! Nothing is retried or recovered; the first error aborts the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The token exchange with the thermostat service failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// A request failed in transport or was answered with a non-2xx status.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// A response body could not be decoded into its expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be decoded.
    #[error("config file could not be decoded: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is missing or empty.
    #[error("config field `{0}` is missing or empty")]
    MissingField(&'static str),

    /// A URL-valued field does not look like an HTTP(S) URL.
    #[error("config field `{field}` is not an http(s) URL: {value}")]
    InvalidUrl {
        /// The offending field, named as in the file.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Errors raised during the password-grant token exchange.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint answered with a non-2xx status.
    #[error("token request rejected with HTTP {status}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
    },

    /// The token response carried no usable `access_token`.
    #[error("token response did not contain an access token")]
    MissingToken,
}

/// Errors raised by request transport.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The HTTP request itself failed (connect, TLS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An endpoint answered with a non-2xx status.
    #[error("{service} endpoint returned HTTP {status}")]
    Status {
        /// Which service answered.
        service: &'static str,
        /// The HTTP status code returned.
        status: u16,
    },
}

/// Errors raised while decoding response bodies.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A response body did not match the expected schema.
    #[error("{service} response could not be decoded: {source}")]
    Json {
        /// Which service answered.
        service: &'static str,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
