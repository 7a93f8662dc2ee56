// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-shot synchronisation of the pump plug with the heating zone.
//!
//! [`PumpController::run_once`] performs the whole cycle: authenticate,
//! read the zone, read the plug, decide, and write the plug if the two
//! disagree. The decision itself is the pure function
//! [`PumpAction::required`] so it can be tested without any I/O.

use std::fmt;

use crate::config::Config;
use crate::error::Result;
use crate::hue::HueClient;
use crate::tado::{TadoClient, ZoneState};

// ============================================================================
// Decision rule
// ============================================================================

/// Corrective action for the pump plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpAction {
    /// The zone calls for heat but the pump is off.
    TurnOn,
    /// The zone is idle but the pump is still running.
    TurnOff,
}

impl PumpAction {
    /// Decides whether the plug must change state.
    ///
    /// The pump must run exactly while the zone delivers heat: any
    /// heating power above zero demands a running pump, zero (or below)
    /// demands a stopped one. Returns `None` when plug and zone already
    /// agree.
    ///
    /// # Examples
    ///
    /// ```
    /// use pumpsync::PumpAction;
    ///
    /// assert_eq!(PumpAction::required(45.0, false), Some(PumpAction::TurnOn));
    /// assert_eq!(PumpAction::required(0.0, true), Some(PumpAction::TurnOff));
    /// assert_eq!(PumpAction::required(45.0, true), None);
    /// ```
    #[must_use]
    pub fn required(heating_power_percentage: f64, pump_is_on: bool) -> Option<Self> {
        if heating_power_percentage > 0.0 {
            (!pump_is_on).then_some(Self::TurnOn)
        } else {
            pump_is_on.then_some(Self::TurnOff)
        }
    }

    /// Returns `true` if the action switches the plug on.
    #[must_use]
    pub const fn turns_on(&self) -> bool {
        matches!(self, Self::TurnOn)
    }
}

// ============================================================================
// PumpController
// ============================================================================

/// Drives one synchronisation cycle end to end.
#[derive(Debug, Clone)]
pub struct PumpController {
    tado: TadoClient,
    hue: HueClient,
    zone_id: String,
}

impl PumpController {
    /// Creates a controller with both service clients wired up from the
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            tado: TadoClient::new(config)?,
            hue: HueClient::new(config)?,
            zone_id: config.thermostat_zone_id.clone(),
        })
    }

    /// Runs one synchronisation cycle.
    ///
    /// The steps are strictly sequential: token exchange, zone read, plug
    /// read, then the plug write when a correction is needed. The first
    /// failing step aborts the cycle; in particular the plug is never
    /// written on stale or partial data.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step.
    pub async fn run_once(&self) -> Result<SyncOutcome> {
        let token = self.tado.authenticate().await?;
        let zone = self.tado.zone_state(&token).await?;
        let plug = self.hue.plug_state().await?;

        let pump_was_on = plug.is_on();
        let action = PumpAction::required(zone.heating_power_percentage(), pump_was_on);

        tracing::debug!(
            zone = %self.zone_id,
            heating_power = zone.heating_power_percentage(),
            pump_on = pump_was_on,
            action = ?action,
            measured_at = ?zone.measured_at(),
            "Evaluated pump action"
        );

        if let Some(action) = action {
            self.hue.set_on(action.turns_on()).await?;
        }

        Ok(SyncOutcome {
            zone_id: self.zone_id.clone(),
            zone,
            pump_was_on,
            action,
        })
    }
}

// ============================================================================
// SyncOutcome
// ============================================================================

/// Result of one completed synchronisation cycle.
///
/// Rendering it with [`fmt::Display`] produces the human-readable status
/// report, one observation per line, ending with the corrective action
/// when one was taken.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    zone_id: String,
    zone: ZoneState,
    pump_was_on: bool,
    action: Option<PumpAction>,
}

impl SyncOutcome {
    /// Returns the zone snapshot the decision was based on.
    #[must_use]
    pub fn zone(&self) -> &ZoneState {
        &self.zone
    }

    /// Returns the plug state before any correction.
    #[must_use]
    pub fn pump_was_on(&self) -> bool {
        self.pump_was_on
    }

    /// Returns the corrective action taken, if any.
    #[must_use]
    pub fn action(&self) -> Option<PumpAction> {
        self.action
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Zone {} setting: {}", self.zone_id, self.zone.power())?;
        writeln!(
            f,
            "Zone {} heating power: {}%",
            self.zone_id,
            self.zone.heating_power_percentage()
        )?;
        writeln!(
            f,
            "Zone {} current temperature: {:.1} °C",
            self.zone_id,
            self.zone.inside_celsius()
        )?;
        writeln!(
            f,
            "Zone {} target temperature: {:.1} °C",
            self.zone_id,
            self.zone.target_celsius()
        )?;
        write!(
            f,
            "Pump plug: {}",
            if self.pump_was_on { "on" } else { "off" }
        )?;
        // Keep the action line's exact wording: it is what consumers of the
        // cron mail have always grepped for.
        match self.action {
            Some(PumpAction::TurnOn) => write!(f, "\nPUMP TURNED ON"),
            Some(PumpAction::TurnOff) => write!(f, "\nPUMP TURNED OFF"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heating_zone_with_stopped_pump_turns_on() {
        assert_eq!(PumpAction::required(45.0, false), Some(PumpAction::TurnOn));
        assert_eq!(PumpAction::required(0.1, false), Some(PumpAction::TurnOn));
    }

    #[test]
    fn idle_zone_with_running_pump_turns_off() {
        assert_eq!(PumpAction::required(0.0, true), Some(PumpAction::TurnOff));
        assert_eq!(PumpAction::required(-1.0, true), Some(PumpAction::TurnOff));
    }

    #[test]
    fn matching_states_need_no_action() {
        assert_eq!(PumpAction::required(45.0, true), None);
        assert_eq!(PumpAction::required(0.0, false), None);
    }

    #[test]
    fn turn_on_is_the_only_action_that_turns_on() {
        assert!(PumpAction::TurnOn.turns_on());
        assert!(!PumpAction::TurnOff.turns_on());
    }

    fn sample_zone() -> ZoneState {
        serde_json::from_str(
            r#"{
                "setting": { "power": "ON", "temperature": { "celsius": 22.0 } },
                "activityDataPoints": { "heatingPower": { "percentage": 45.0 } },
                "sensorDataPoints": { "insideTemperature": { "celsius": 21.2 } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn report_lists_zone_and_plug_then_action() {
        let outcome = SyncOutcome {
            zone_id: "6".to_string(),
            zone: sample_zone(),
            pump_was_on: false,
            action: Some(PumpAction::TurnOn),
        };
        assert_eq!(
            outcome.to_string(),
            "Zone 6 setting: ON\n\
             Zone 6 heating power: 45%\n\
             Zone 6 current temperature: 21.2 °C\n\
             Zone 6 target temperature: 22.0 °C\n\
             Pump plug: off\n\
             PUMP TURNED ON"
        );
    }

    #[test]
    fn report_without_action_ends_with_plug_state() {
        let outcome = SyncOutcome {
            zone_id: "6".to_string(),
            zone: sample_zone(),
            pump_was_on: true,
            action: None,
        };
        assert!(outcome.to_string().ends_with("Pump plug: on"));
        assert!(!outcome.to_string().contains("PUMP TURNED"));
    }
}
