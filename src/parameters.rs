//! Scenario parameters.
//!
//! Every numeric constant of the model lives here: the time domain, the
//! regime-transition schedule, the two recycling delays, rate and fraction
//! constants, initial reservoir masses, initial isotope values, and the
//! step-changed ridge-flux magnitudes.
//!
//! Defaults reproduce the published Eguchi et al. (2019) configuration in
//! which a late step-change in ridge outgassing drives a large carbon-isotope
//! excursion.

use crate::errors::{ModelError, ModelResult};
use crate::timeseries::{FloatValue, Time};
use serde::{Deserialize, Serialize};

/// Parameters for a single simulation run.
///
/// The time grid is uniform with one step per Myr; fluxes are g/Myr, masses
/// are g, isotope ratios are permille. Fields left out of a TOML scenario file
/// fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Model start time (Myr).
    /// default: 0.0
    pub t_start: Time,

    /// Model end time (Myr), inclusive.
    /// default: 5000.0
    pub t_end: Time,

    /// Time of the first tectonic transition (Myr): subduction begins.
    /// default: 1000.0
    pub onset: Time,

    /// Time of the second tectonic transition (Myr): ridge outgassing steps
    /// up again.
    /// default: 2700.0
    pub tectonic_change: Time,

    /// Steps between subduction of carbonate and its release at arcs.
    /// default: 30
    pub carbonate_delay: usize,

    /// Steps between subduction of organic carbon and its release at ocean
    /// islands.
    /// default: 350
    pub organic_delay: usize,

    /// First-order weathering constant (Myr^-1): weathering flux is
    /// `fraction * k * atmosphere_mass`.
    /// default: 0.1
    pub weathering_constant: FloatValue,

    /// Fraction of weathered atmosphere-ocean carbon buried as organic
    /// carbon; the remainder is buried as carbonate.
    /// default: 0.2
    pub organic_fraction: FloatValue,

    /// Fraction of the organic weathering flux that is subducted.
    /// default: 0.6
    pub organic_subduction_fraction: FloatValue,

    /// Fraction of the carbonate weathering flux that is subducted.
    /// default: 0.6
    pub carbonate_subduction_fraction: FloatValue,

    /// Fraction of subducted organics released at arcs; the remainder
    /// resurfaces at ocean islands after the organic delay.
    /// default: 0.0
    pub organic_arc_fraction: FloatValue,

    /// Fraction of subducted carbonates released at arcs; the remainder
    /// resurfaces at ocean islands after the organic delay.
    /// default: 1.0
    pub carbonate_arc_fraction: FloatValue,

    /// Fraction of resurfacing organics retained in the deep mantle.
    /// default: 0.0
    pub organic_mantle_retention: FloatValue,

    /// Fraction of resurfacing carbonates retained in the deep mantle.
    /// default: 0.0
    pub carbonate_mantle_retention: FloatValue,

    /// Primitive mantle carbon dragged up with arc recycling, as a scale of
    /// the recycled arc components.
    /// default: 0.0
    pub arc_primitive_scale: FloatValue,

    /// Initial atmosphere-ocean carbon mass (g).
    /// default: 0.0
    pub initial_atmosphere_mass: FloatValue,

    /// Initial crustal carbonate carbon mass (g).
    /// default: 0.0
    pub initial_crustal_carbonate_mass: FloatValue,

    /// Initial crustal organic carbon mass (g).
    /// default: 0.0
    pub initial_crustal_organic_mass: FloatValue,

    /// Initial mantle carbonate carbon mass (g).
    /// default: 0.0
    pub initial_mantle_carbonate_mass: FloatValue,

    /// Initial mantle organic carbon mass (g).
    /// default: 0.0
    pub initial_mantle_organic_mass: FloatValue,

    /// Initial primordial mantle carbon mass (g). Effectively infinite on the
    /// model horizon; the primordial mantle only ever loses mass.
    /// default: 1e23
    pub initial_primordial_mantle_mass: FloatValue,

    /// Initial atmosphere-ocean d13C (permille).
    /// default: -5.0
    pub initial_atmosphere_d13c: FloatValue,

    /// Initial crustal carbonate d13C (permille).
    /// default: 0.0
    pub initial_carbonate_d13c: FloatValue,

    /// Initial crustal organic d13C (permille).
    /// default: -25.0
    pub initial_organic_d13c: FloatValue,

    /// d13C of primordial mantle carbon (permille), constant over the run.
    /// default: -5.0
    pub primordial_d13c: FloatValue,

    /// d13C of ridge outgassing (permille), constant over the run.
    /// default: -5.0
    pub ridge_d13c: FloatValue,

    /// Fractionation offset of crustal carbonate relative to the
    /// atmosphere-ocean (permille).
    /// default: 5.0
    pub carbonate_fractionation: FloatValue,

    /// Fractionation offset of crustal organic carbon relative to the
    /// atmosphere-ocean (permille).
    /// default: -20.0
    pub organic_fractionation: FloatValue,

    /// Ridge outgassing before the onset (g/Myr).
    /// default: 1e13
    pub ridge_baseline: FloatValue,

    /// Ridge outgassing from the onset to the second transition (g/Myr).
    /// default: 1e16
    pub ridge_after_onset: FloatValue,

    /// Ridge outgassing from the second transition onward (g/Myr).
    /// default: 1e19
    pub ridge_after_change: FloatValue,

    /// Primitive-mantle ocean-island outgassing (g/Myr), present in every
    /// regime.
    /// default: 1e13
    pub ocean_island_baseline: FloatValue,

    /// Primitive-mantle arc outgassing before arc recycling activates
    /// (g/Myr).
    /// default: 1e13
    pub arc_baseline: FloatValue,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_end: 5000.0,
            onset: 1000.0,
            tectonic_change: 2700.0,
            carbonate_delay: 30,
            organic_delay: 350,

            weathering_constant: 0.1,
            organic_fraction: 0.2,
            organic_subduction_fraction: 0.6,
            carbonate_subduction_fraction: 0.6,
            organic_arc_fraction: 0.0,
            carbonate_arc_fraction: 1.0,
            organic_mantle_retention: 0.0,
            carbonate_mantle_retention: 0.0,
            arc_primitive_scale: 0.0,

            initial_atmosphere_mass: 0.0,
            initial_crustal_carbonate_mass: 0.0,
            initial_crustal_organic_mass: 0.0,
            initial_mantle_carbonate_mass: 0.0,
            initial_mantle_organic_mass: 0.0,
            initial_primordial_mantle_mass: 1e23,

            initial_atmosphere_d13c: -5.0,
            initial_carbonate_d13c: 0.0,
            initial_organic_d13c: -25.0,
            primordial_d13c: -5.0,
            ridge_d13c: -5.0,
            carbonate_fractionation: 5.0,
            organic_fractionation: -20.0,

            ridge_baseline: 1e13,
            ridge_after_onset: 1e16,
            ridge_after_change: 1e19,
            ocean_island_baseline: 1e13,
            arc_baseline: 1e13,
        }
    }
}

impl SimulationParameters {
    /// Parse parameters from a TOML scenario, applying defaults for missing
    /// fields, then validate.
    pub fn from_toml_str(s: &str) -> ModelResult<Self> {
        let parameters: Self =
            toml::from_str(s).map_err(|e| ModelError::Configuration(e.to_string()))?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Fraction of weathered carbon buried as carbonate.
    pub fn carbonate_fraction(&self) -> FloatValue {
        1.0 - self.organic_fraction
    }

    /// Number of steps on the inclusive uniform grid.
    pub fn step_count(&self) -> usize {
        (self.t_end - self.t_start) as usize + 1
    }

    /// Model time at a step index.
    pub fn time_at(&self, step: usize) -> Time {
        self.t_start + step as Time
    }

    /// Check the configuration before the loop starts.
    ///
    /// Rejects unordered thresholds, fractions outside `[0, 1]`, negative
    /// rates, masses or fluxes, and a degenerate time domain.
    pub fn validate(&self) -> ModelResult<()> {
        if self.t_end <= self.t_start {
            return Err(config_error(format!(
                "t_end ({}) must be after t_start ({})",
                self.t_end, self.t_start
            )));
        }
        if (self.t_end - self.t_start).fract() != 0.0 {
            return Err(config_error(format!(
                "time domain [{}, {}] must span a whole number of unit steps",
                self.t_start, self.t_end
            )));
        }
        if self.onset < self.t_start || self.onset > self.t_end {
            return Err(config_error(format!(
                "onset ({}) must lie within the time domain [{}, {}]",
                self.onset, self.t_start, self.t_end
            )));
        }
        if self.carbonate_delay > self.organic_delay {
            return Err(config_error(format!(
                "carbonate delay ({}) must not exceed the organic delay ({})",
                self.carbonate_delay, self.organic_delay
            )));
        }
        if self.tectonic_change < self.onset + self.organic_delay as Time {
            return Err(config_error(format!(
                "tectonic change ({}) must not precede onset + organic delay ({})",
                self.tectonic_change,
                self.onset + self.organic_delay as Time
            )));
        }

        let fractions = [
            ("organic_fraction", self.organic_fraction),
            (
                "organic_subduction_fraction",
                self.organic_subduction_fraction,
            ),
            (
                "carbonate_subduction_fraction",
                self.carbonate_subduction_fraction,
            ),
            ("organic_arc_fraction", self.organic_arc_fraction),
            ("carbonate_arc_fraction", self.carbonate_arc_fraction),
            ("organic_mantle_retention", self.organic_mantle_retention),
            (
                "carbonate_mantle_retention",
                self.carbonate_mantle_retention,
            ),
            ("arc_primitive_scale", self.arc_primitive_scale),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(config_error(format!(
                    "{} ({}) must lie in [0, 1]",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("weathering_constant", self.weathering_constant),
            ("initial_atmosphere_mass", self.initial_atmosphere_mass),
            (
                "initial_crustal_carbonate_mass",
                self.initial_crustal_carbonate_mass,
            ),
            (
                "initial_crustal_organic_mass",
                self.initial_crustal_organic_mass,
            ),
            (
                "initial_mantle_carbonate_mass",
                self.initial_mantle_carbonate_mass,
            ),
            (
                "initial_mantle_organic_mass",
                self.initial_mantle_organic_mass,
            ),
            (
                "initial_primordial_mantle_mass",
                self.initial_primordial_mantle_mass,
            ),
            ("ridge_baseline", self.ridge_baseline),
            ("ridge_after_onset", self.ridge_after_onset),
            ("ridge_after_change", self.ridge_after_change),
            ("ocean_island_baseline", self.ocean_island_baseline),
            ("arc_baseline", self.arc_baseline),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(config_error(format!(
                    "{} ({}) must be non-negative",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

fn config_error(msg: String) -> ModelError {
    ModelError::Configuration(msg)
}
