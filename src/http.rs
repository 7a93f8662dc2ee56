// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared HTTP plumbing for the two service clients.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{Error, NetworkError, ParseError};

/// Fixed request timeout applied to every service call.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the reqwest client both services run on.
pub(crate) fn client() -> Result<reqwest::Client, NetworkError> {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(NetworkError::Http)
}

/// Checks the status of a response and decodes its JSON body.
///
/// Non-2xx responses fail fast without touching the body; the error body
/// of a failed request is never parsed.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, Error> {
    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::Status {
            service,
            status: status.as_u16(),
        }
        .into());
    }

    let body = response.text().await.map_err(NetworkError::Http)?;
    tracing::debug!(service, body = %body, "Received response");

    serde_json::from_str(&body).map_err(|source| ParseError::Json { service, source }.into())
}
