//! Flux-weighted isotope mixing.
//!
//! Arc output mixes delayed subducted-carbonate, delayed subducted-organic
//! and primordial-mantle signatures; ocean-island output mixes the
//! complementary delayed sources with primordial mantle; the atmosphere-ocean
//! mixes ridge, arc and ocean-island outputs. Each delayed isotope value is
//! read at the same lag as its companion flux, so the mixing weights sum to
//! the pathway's total flux by construction.
//!
//! Crustal carbonate and organic ratios are not mixed: they follow the
//! current atmosphere-ocean value by constant fractionation offsets.

use crate::errors::{ModelError, ModelResult};
use crate::fluxes::Fluxes;
use crate::parameters::SimulationParameters;
use crate::regime::Regime;
use crate::timeseries::{FloatValue, Timeseries};
use serde::{Deserialize, Serialize};

/// d13C values derived at a single step (permille).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsotopeState {
    pub atmosphere: FloatValue,
    pub carbonate: FloatValue,
    pub organic: FloatValue,
    pub arc: FloatValue,
    pub ocean_island: FloatValue,
}

impl IsotopeState {
    /// The configured initial conditions; arc and ocean-island outputs start
    /// at the primordial signature.
    pub fn initial(parameters: &SimulationParameters) -> Self {
        Self {
            atmosphere: parameters.initial_atmosphere_d13c,
            carbonate: parameters.initial_carbonate_d13c,
            organic: parameters.initial_organic_d13c,
            arc: parameters.primordial_d13c,
            ocean_island: parameters.primordial_d13c,
        }
    }
}

/// Mix the isotopic composition of every output for `step` from the current
/// fluxes and the delayed source histories.
///
/// A pathway whose total flux is exactly zero feeds the atmosphere with
/// weight zero; its ratio collapses to the primordial end-member. A zero
/// *total outgassing* flux leaves the atmosphere-ocean ratio undefined and is
/// a [`ModelError::ZeroTotalFlux`] failure carrying the offending step.
pub fn mix_isotopes(
    step: usize,
    regime: Regime,
    fluxes: &Fluxes,
    carbonate_d13c: &Timeseries<FloatValue>,
    organic_d13c: &Timeseries<FloatValue>,
    parameters: &SimulationParameters,
) -> ModelResult<IsotopeState> {
    let primordial = parameters.primordial_d13c;

    let arc = if regime.arc_recycling_active() {
        let total = fluxes.arc();
        if total == 0.0 {
            primordial
        } else {
            (fluxes.arc_carbonate * carbonate_d13c.delayed(step, parameters.carbonate_delay)?
                + fluxes.arc_organic * organic_d13c.delayed(step, parameters.carbonate_delay)?
                + fluxes.arc_primitive * primordial)
                / total
        }
    } else {
        primordial
    };

    let ocean_island = if regime.ocean_island_recycling_active() {
        let total = fluxes.ocean_island();
        if total == 0.0 {
            primordial
        } else {
            (fluxes.ocean_island_carbonate
                * carbonate_d13c.delayed(step, parameters.organic_delay)?
                + fluxes.ocean_island_organic
                    * organic_d13c.delayed(step, parameters.organic_delay)?
                + fluxes.ocean_island_primitive * primordial)
                / total
        }
    } else {
        primordial
    };

    // Before any recycled material resurfaces, the atmosphere-ocean carries
    // the primordial signature directly.
    let atmosphere = if regime.arc_recycling_active() {
        let total = fluxes.outgassing_total();
        if total == 0.0 {
            return Err(ModelError::ZeroTotalFlux {
                flux: "total outgassing",
                step,
            });
        }
        (fluxes.ocean_island() * ocean_island
            + fluxes.arc() * arc
            + fluxes.ridge * parameters.ridge_d13c)
            / total
    } else {
        primordial
    };

    Ok(IsotopeState {
        atmosphere,
        carbonate: atmosphere + parameters.carbonate_fractionation,
        organic: atmosphere + parameters.organic_fractionation,
        arc,
        ocean_island,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    fn histories(parameters: &SimulationParameters) -> (Timeseries<FloatValue>, Timeseries<FloatValue>) {
        let n = parameters.step_count();
        (
            Timeseries::constant(parameters.initial_carbonate_d13c, n),
            Timeseries::constant(parameters.initial_organic_d13c, n),
        )
    }

    #[test]
    fn test_pre_onset_carries_the_primordial_signature() {
        let params = SimulationParameters::default();
        let (crb, org) = histories(&params);
        let fluxes = Fluxes::initial(&params);

        let iso = mix_isotopes(10, Regime::PreOnset, &fluxes, &crb, &org, &params).unwrap();
        assert_eq!(iso.atmosphere, -5.0);
        assert_eq!(iso.ocean_island, -5.0);
        assert!(is_close!(iso.carbonate, 0.0));
        assert!(is_close!(iso.organic, -25.0));
    }

    #[test]
    fn test_arc_mix_is_flux_weighted_over_delayed_sources() {
        let params = SimulationParameters::default();
        let (mut crb, mut org) = histories(&params);
        // isotope histories at the lagged step
        crb.set(1000, 2.0);
        org.set(1000, -22.0);

        let fluxes = Fluxes {
            arc_carbonate: 3e12,
            arc_organic: 1e12,
            arc_primitive: 0.0,
            ridge: 1e16,
            ocean_island_primitive: 1e13,
            ..Default::default()
        };
        let iso = mix_isotopes(1030, Regime::PendingOrganicArc, &fluxes, &crb, &org, &params)
            .unwrap();

        let expected = (3e12 * 2.0 + 1e12 * (-22.0)) / 4e12;
        assert!(
            is_close!(iso.arc, expected),
            "arc mix should be {:.3}, got {:.3}",
            expected,
            iso.arc
        );
        // ocean islands not yet recycling
        assert_eq!(iso.ocean_island, params.primordial_d13c);
    }

    #[test]
    fn test_atmosphere_mix_weights_sum_to_the_total() {
        let params = SimulationParameters::default();
        let (crb, org) = histories(&params);
        let fluxes = Fluxes {
            arc_carbonate: 5e12,
            ridge: 1e16,
            ocean_island_carbonate: 1e12,
            ocean_island_organic: 2e12,
            ocean_island_primitive: 1e13,
            ..Default::default()
        };
        let iso =
            mix_isotopes(1400, Regime::FullRecycling, &fluxes, &crb, &org, &params).unwrap();

        let manual = (fluxes.ocean_island() * iso.ocean_island
            + fluxes.arc() * iso.arc
            + fluxes.ridge * params.ridge_d13c)
            / fluxes.outgassing_total();
        assert!(is_close!(iso.atmosphere, manual));
        assert!(is_close!(
            fluxes.ocean_island() + fluxes.arc() + fluxes.ridge,
            fluxes.outgassing_total()
        ));
    }

    #[test]
    fn test_crustal_ratios_follow_the_atmosphere_by_fixed_offsets() {
        let params = SimulationParameters::default();
        let (crb, org) = histories(&params);
        let fluxes = Fluxes {
            arc_carbonate: 5e12,
            ridge: 1e16,
            ocean_island_primitive: 1e13,
            ..Default::default()
        };
        let iso =
            mix_isotopes(1400, Regime::FullRecycling, &fluxes, &crb, &org, &params).unwrap();
        assert!(is_close!(iso.carbonate, iso.atmosphere + 5.0));
        assert!(is_close!(iso.organic, iso.atmosphere - 20.0));
    }

    #[test]
    fn test_zero_flux_pathway_collapses_to_the_primordial_end_member() {
        let params = SimulationParameters {
            carbonate_arc_fraction: 0.0,
            arc_baseline: 0.0,
            ..Default::default()
        };
        let (crb, org) = histories(&params);
        let fluxes = Fluxes {
            ridge: 1e16,
            ocean_island_primitive: 1e13,
            ..Default::default()
        };
        let iso =
            mix_isotopes(1400, Regime::FullRecycling, &fluxes, &crb, &org, &params).unwrap();
        assert_eq!(iso.arc, params.primordial_d13c);
    }

    #[test]
    fn test_zero_total_outgassing_is_fatal_with_the_step() {
        let params = SimulationParameters::default();
        let (crb, org) = histories(&params);
        let fluxes = Fluxes::default();

        let err = mix_isotopes(1500, Regime::FullRecycling, &fluxes, &crb, &org, &params)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::ZeroTotalFlux {
                flux: "total outgassing",
                step: 1500
            }
        );
    }
}
