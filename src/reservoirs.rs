//! Reservoir masses and the explicit forward update.

use crate::fluxes::Fluxes;
use crate::parameters::SimulationParameters;
use crate::timeseries::FloatValue;
use serde::{Deserialize, Serialize};

/// The six carbon reservoirs at a single step (g).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirState {
    pub atmosphere: FloatValue,
    pub crustal_carbonate: FloatValue,
    pub crustal_organic: FloatValue,
    pub mantle_carbonate: FloatValue,
    pub mantle_organic: FloatValue,
    pub primordial_mantle: FloatValue,
}

impl ReservoirState {
    /// The configured initial conditions.
    pub fn initial(parameters: &SimulationParameters) -> Self {
        Self {
            atmosphere: parameters.initial_atmosphere_mass,
            crustal_carbonate: parameters.initial_crustal_carbonate_mass,
            crustal_organic: parameters.initial_crustal_organic_mass,
            mantle_carbonate: parameters.initial_mantle_carbonate_mass,
            mantle_organic: parameters.initial_mantle_organic_mass,
            primordial_mantle: parameters.initial_primordial_mantle_mass,
        }
    }

    /// Sum of the five surface and recycling reservoirs, excluding the
    /// primordial mantle.
    pub fn surface_total(&self) -> FloatValue {
        self.atmosphere
            + self.crustal_carbonate
            + self.crustal_organic
            + self.mantle_carbonate
            + self.mantle_organic
    }

    /// Total carbon across all six reservoirs.
    pub fn total(&self) -> FloatValue {
        self.surface_total() + self.primordial_mantle
    }

    /// One explicit forward update (Euler, unit step) using the previous
    /// step's fluxes.
    ///
    /// The mantle pools lose the fraction of the resurfacing arc and
    /// ocean-island components that is not retained in the deep mantle. The
    /// primordial mantle is source-only: it loses the primitive share of
    /// every outgassing pathway and never regains mass.
    pub fn advance(&self, fluxes_prev: &Fluxes, parameters: &SimulationParameters) -> Self {
        let atmosphere =
            self.atmosphere + fluxes_prev.outgassing_total() - fluxes_prev.weathering_total();
        let crustal_carbonate = self.crustal_carbonate + fluxes_prev.weathering_carbonate
            - fluxes_prev.subducted_carbonate;
        let crustal_organic =
            self.crustal_organic + fluxes_prev.weathering_organic - fluxes_prev.subducted_organic;

        let carbonate_resurfaced = (1.0 - parameters.carbonate_mantle_retention)
            * (fluxes_prev.arc_carbonate + fluxes_prev.ocean_island_carbonate);
        let organic_resurfaced = (1.0 - parameters.organic_mantle_retention)
            * (fluxes_prev.arc_organic + fluxes_prev.ocean_island_organic);
        let mantle_carbonate =
            self.mantle_carbonate + fluxes_prev.subducted_carbonate - carbonate_resurfaced;
        let mantle_organic =
            self.mantle_organic + fluxes_prev.subducted_organic - organic_resurfaced;

        let primordial_mantle = self.primordial_mantle
            - fluxes_prev.ridge
            - fluxes_prev.ocean_island_primitive
            - fluxes_prev.arc_primitive;

        Self {
            atmosphere,
            crustal_carbonate,
            crustal_organic,
            mantle_carbonate,
            mantle_organic,
            primordial_mantle,
        }
    }
}
