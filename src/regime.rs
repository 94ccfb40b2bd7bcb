//! Tectonic regime selection.
//!
//! The run passes through five mutually exclusive, temporally ordered regimes.
//! Each regime activates or deactivates specific recycling pathways; the
//! active regime is a pure, monotonically non-decreasing function of elapsed
//! time against the configured thresholds.

use crate::parameters::SimulationParameters;
use crate::timeseries::{FloatValue, Time};
use serde::{Deserialize, Serialize};

/// One of the five ordered tectonic phases.
///
/// Variant order is temporal order, so `PartialOrd`/`Ord` compare regimes by
/// how far the run has progressed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Regime {
    /// Before the first tectonic transition: baseline outgassing only, no
    /// subduction.
    PreOnset,
    /// Onset reached: subduction is running, but nothing subducted has had
    /// time to resurface.
    CarbonateRecycling,
    /// Carbonate delay elapsed: arcs release recycled material; the organic
    /// ocean-island pathway is still pending.
    PendingOrganicArc,
    /// Organic delay elapsed: arc and ocean-island recycling both active.
    FullRecycling,
    /// After the second tectonic transition: full recycling with the
    /// stepped-up ridge flux. Terminal; held for all remaining steps.
    PostTransition,
}

impl Regime {
    /// The regime active at model time `time`.
    ///
    /// Thresholds are half-open: a time exactly at a threshold belongs to the
    /// new regime. Conditions are checked in increasing time order and the
    /// first true condition wins.
    pub fn at(time: Time, parameters: &SimulationParameters) -> Self {
        if time < parameters.onset {
            Regime::PreOnset
        } else if time < parameters.onset + parameters.carbonate_delay as Time {
            Regime::CarbonateRecycling
        } else if time < parameters.onset + parameters.organic_delay as Time {
            Regime::PendingOrganicArc
        } else if time < parameters.tectonic_change {
            Regime::FullRecycling
        } else {
            Regime::PostTransition
        }
    }

    /// The regime active at a step index.
    pub fn at_step(step: usize, parameters: &SimulationParameters) -> Self {
        debug_assert!(
            step < parameters.step_count(),
            "step {} outside the configured horizon",
            step
        );
        Self::at(parameters.time_at(step), parameters)
    }

    /// Whether weathered carbon is being subducted.
    pub fn subduction_active(self) -> bool {
        self >= Regime::CarbonateRecycling
    }

    /// Whether arcs release material subducted one carbonate delay ago.
    pub fn arc_recycling_active(self) -> bool {
        self >= Regime::PendingOrganicArc
    }

    /// Whether ocean islands release material subducted one organic delay
    /// ago.
    pub fn ocean_island_recycling_active(self) -> bool {
        self >= Regime::FullRecycling
    }

    /// The prescribed ridge flux for this regime (g/Myr).
    pub fn ridge_flux(self, parameters: &SimulationParameters) -> FloatValue {
        match self {
            Regime::PreOnset => parameters.ridge_baseline,
            Regime::CarbonateRecycling | Regime::PendingOrganicArc | Regime::FullRecycling => {
                parameters.ridge_after_onset
            }
            Regime::PostTransition => parameters.ridge_after_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_half_open() {
        let params = SimulationParameters::default();
        // onset = 1000, carbonate delay = 30, organic delay = 350, change = 2700
        let expected = [
            (999, Regime::PreOnset),
            (1000, Regime::CarbonateRecycling),
            (1029, Regime::CarbonateRecycling),
            (1030, Regime::PendingOrganicArc),
            (1349, Regime::PendingOrganicArc),
            (1350, Regime::FullRecycling),
            (2699, Regime::FullRecycling),
            (2700, Regime::PostTransition),
        ];
        for (step, regime) in expected {
            assert_eq!(
                Regime::at_step(step, &params),
                regime,
                "wrong regime at step {}",
                step
            );
        }
    }

    #[test]
    fn test_regime_never_regresses() {
        let params = SimulationParameters::default();
        let mut previous = Regime::at_step(0, &params);
        for step in 1..params.step_count() {
            let current = Regime::at_step(step, &params);
            assert!(
                current >= previous,
                "regime regressed from {:?} to {:?} at step {}",
                previous,
                current,
                step
            );
            previous = current;
        }
        assert_eq!(previous, Regime::PostTransition);
    }

    #[test]
    fn test_equal_delays_skip_the_pending_regime() {
        let params = SimulationParameters {
            carbonate_delay: 0,
            organic_delay: 0,
            ..Default::default()
        };
        assert_eq!(Regime::at_step(999, &params), Regime::PreOnset);
        assert_eq!(Regime::at_step(1000, &params), Regime::FullRecycling);
    }

    #[test]
    fn test_pathway_activation_is_cumulative() {
        assert!(!Regime::PreOnset.subduction_active());
        assert!(Regime::CarbonateRecycling.subduction_active());
        assert!(!Regime::CarbonateRecycling.arc_recycling_active());
        assert!(Regime::PendingOrganicArc.arc_recycling_active());
        assert!(!Regime::PendingOrganicArc.ocean_island_recycling_active());
        assert!(Regime::FullRecycling.ocean_island_recycling_active());
        assert!(Regime::PostTransition.ocean_island_recycling_active());
    }

    #[test]
    fn test_ridge_flux_steps_with_the_schedule() {
        let params = SimulationParameters::default();
        assert_eq!(Regime::PreOnset.ridge_flux(&params), 1e13);
        assert_eq!(Regime::CarbonateRecycling.ridge_flux(&params), 1e16);
        assert_eq!(Regime::FullRecycling.ridge_flux(&params), 1e16);
        assert_eq!(Regime::PostTransition.ridge_flux(&params), 1e19);
    }
}
