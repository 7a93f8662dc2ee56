// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-level tests of the binary: output stream separation and exit
//! codes. The report must be the only stdout output so redirecting it or
//! mailing it from cron never picks up diagnostics.

use std::path::PathBuf;
use std::process::Command;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(server: &MockServer) -> PathBuf {
    let uri = server.uri();
    let config = serde_json::json!({
        "accountUsername": "resident@example.com",
        "accountPassword": "pump-pass",
        "clientId": "tado-web-app",
        "clientSecret": "client-secret",
        "authUrl": format!("{uri}/oauth/token"),
        "apiUrl": format!("{uri}/api/v2"),
        "thermostatHomeId": "1234",
        "thermostatZoneId": "6",
        "plugBaseUrl": format!("{uri}/bridge/hueuser"),
        "plugLightId": "6"
    });
    let config_path =
        std::env::temp_dir().join(format!("pumpsync-cli-{}.json", std::process::id()));
    std::fs::write(&config_path, config.to_string()).unwrap();
    config_path
}

async fn mount_heating_scenario(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "expires_in": 599
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/homes/1234/zones/6/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "setting": {
                "type": "HEATING",
                "power": "ON",
                "temperature": { "celsius": 22.0 }
            },
            "activityDataPoints": { "heatingPower": { "percentage": 45.0 } },
            "sensorDataPoints": { "insideTemperature": { "celsius": 21.2 } }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bridge/hueuser/lights/6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": { "on": false }
        })))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/bridge/hueuser/lights/6/state"))
        .and(body_json(serde_json::json!({ "on": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "success": { "/lights/6/state/on": true } }
        ])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn report_is_the_only_stdout_output() {
    let server = MockServer::start().await;
    mount_heating_scenario(&server).await;
    let config_path = write_config(&server);

    // The child process talks to the mock server over real TCP, so the
    // blocking wait must not park the runtime thread the server runs on.
    let spawn_path = config_path.clone();
    let output = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_pumpsync"))
            .arg(&spawn_path)
            .env("RUST_LOG", "debug")
            .output()
    })
    .await
    .unwrap()
    .unwrap();
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "Zone 6 setting: ON\n\
         Zone 6 heating power: 45%\n\
         Zone 6 current temperature: 21.2 °C\n\
         Zone 6 target temperature: 22.0 °C\n\
         Pump plug: off\n\
         PUMP TURNED ON\n"
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Requesting access token"));
    assert!(stderr.contains("Evaluated pump action"));
}

#[test]
fn unreadable_config_exits_nonzero_with_stderr_message() {
    let output = Command::new(env!("CARGO_BIN_EXE_pumpsync"))
        .arg("/definitely/not/there.json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("pumpsync: config error: cannot read config file"));
}
