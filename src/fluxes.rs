//! Instantaneous fluxes for one step.
//!
//! The flux model owns the recycling history: it records the current step's
//! subduction fluxes into their series and then queries the delay buffer for
//! the material that resurfaces at arcs (one carbonate delay after
//! subduction) and at ocean islands (one organic delay after subduction).
//!
//! Mixed outgassing pathways keep their component breakdown so that the
//! reservoir updater can debit the mantle pools and the isotope mixer can
//! weight each source without re-deriving the split.

use crate::errors::ModelResult;
use crate::parameters::SimulationParameters;
use crate::regime::Regime;
use crate::timeseries::{FloatValue, Timeseries};
use serde::{Deserialize, Serialize};

/// Every flux at a single step (g/Myr), all non-negative for a valid
/// configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fluxes {
    /// Atmosphere-ocean carbon buried as crustal organic carbon.
    pub weathering_organic: FloatValue,
    /// Atmosphere-ocean carbon buried as crustal carbonate.
    pub weathering_carbonate: FloatValue,
    /// Crustal organic carbon carried into the mantle.
    pub subducted_organic: FloatValue,
    /// Crustal carbonate carried into the mantle.
    pub subducted_carbonate: FloatValue,
    /// Mid-ocean-ridge outgassing of primordial mantle carbon.
    pub ridge: FloatValue,
    /// Arc outgassing sourced from delayed subducted carbonate.
    pub arc_carbonate: FloatValue,
    /// Arc outgassing sourced from delayed subducted organics.
    pub arc_organic: FloatValue,
    /// Arc outgassing sourced from primitive mantle carbon.
    pub arc_primitive: FloatValue,
    /// Ocean-island outgassing sourced from delayed subducted carbonate.
    pub ocean_island_carbonate: FloatValue,
    /// Ocean-island outgassing sourced from delayed subducted organics.
    pub ocean_island_organic: FloatValue,
    /// Ocean-island outgassing sourced from primitive mantle carbon.
    pub ocean_island_primitive: FloatValue,
}

impl Fluxes {
    /// Total arc outgassing.
    pub fn arc(&self) -> FloatValue {
        self.arc_carbonate + self.arc_organic + self.arc_primitive
    }

    /// Total ocean-island outgassing.
    pub fn ocean_island(&self) -> FloatValue {
        self.ocean_island_carbonate + self.ocean_island_organic + self.ocean_island_primitive
    }

    /// Total outgassing: ridge + arc + ocean island.
    pub fn outgassing_total(&self) -> FloatValue {
        self.ridge + self.arc() + self.ocean_island()
    }

    /// Total weathering out of the atmosphere-ocean.
    pub fn weathering_total(&self) -> FloatValue {
        self.weathering_organic + self.weathering_carbonate
    }

    /// The step-0 seed: baseline outgassing, weathering from the initial
    /// atmosphere-ocean mass, no subduction.
    pub fn initial(parameters: &SimulationParameters) -> Self {
        let k = parameters.weathering_constant;
        let mass = parameters.initial_atmosphere_mass;
        Fluxes {
            weathering_organic: parameters.organic_fraction * k * mass,
            weathering_carbonate: parameters.carbonate_fraction() * k * mass,
            ridge: parameters.ridge_baseline,
            arc_primitive: parameters.arc_baseline,
            ocean_island_primitive: parameters.ocean_island_baseline,
            ..Default::default()
        }
    }
}

/// Compute all fluxes for `step`.
///
/// `atmosphere_mass` is the just-updated mass at `step`; the weathering law
/// is first order in that mass. The current step's subduction fluxes are
/// written into their series before the delayed lookups run, which keeps a
/// zero-delay configuration well defined.
pub fn compute_fluxes(
    step: usize,
    regime: Regime,
    atmosphere_mass: FloatValue,
    subducted_carbonate: &mut Timeseries<FloatValue>,
    subducted_organic: &mut Timeseries<FloatValue>,
    parameters: &SimulationParameters,
) -> ModelResult<Fluxes> {
    let k = parameters.weathering_constant;
    let weathering_organic = parameters.organic_fraction * k * atmosphere_mass;
    let weathering_carbonate = parameters.carbonate_fraction() * k * atmosphere_mass;

    let (s_organic, s_carbonate) = if regime.subduction_active() {
        (
            parameters.organic_subduction_fraction * weathering_organic,
            parameters.carbonate_subduction_fraction * weathering_carbonate,
        )
    } else {
        (0.0, 0.0)
    };
    subducted_organic.set(step, s_organic);
    subducted_carbonate.set(step, s_carbonate);

    // Both arc components are keyed by the carbonate delay, both ocean-island
    // components by the organic delay.
    let (arc_carbonate, arc_organic, arc_primitive) = if regime.arc_recycling_active() {
        let carbonate = parameters.carbonate_arc_fraction
            * subducted_carbonate.delayed(step, parameters.carbonate_delay)?;
        let organic = parameters.organic_arc_fraction
            * subducted_organic.delayed(step, parameters.carbonate_delay)?;
        let primitive = parameters.arc_primitive_scale * (carbonate + organic);
        (carbonate, organic, primitive)
    } else {
        (0.0, 0.0, parameters.arc_baseline)
    };

    let (ocean_island_carbonate, ocean_island_organic) = if regime.ocean_island_recycling_active() {
        (
            (1.0 - parameters.carbonate_arc_fraction)
                * subducted_carbonate.delayed(step, parameters.organic_delay)?,
            (1.0 - parameters.organic_arc_fraction)
                * subducted_organic.delayed(step, parameters.organic_delay)?,
        )
    } else {
        (0.0, 0.0)
    };

    Ok(Fluxes {
        weathering_organic,
        weathering_carbonate,
        subducted_organic: s_organic,
        subducted_carbonate: s_carbonate,
        ridge: regime.ridge_flux(parameters),
        arc_carbonate,
        arc_organic,
        arc_primitive,
        ocean_island_carbonate,
        ocean_island_organic,
        ocean_island_primitive: parameters.ocean_island_baseline,
    })
}
