//! The integration loop and its result.
//!
//! One outer loop over time steps; within a step the active regime is
//! selected, the reservoirs take one explicit forward update from the
//! previous step's fluxes, the current step's fluxes are computed from the
//! updated atmosphere-ocean mass and the delayed recycling histories, and the
//! isotope mixer derives every d13C value. Step `n` reads only steps `< n`
//! through the delay accessor and step `n-1` through the previous flux
//! record.

use crate::errors::ModelResult;
use crate::fluxes::{compute_fluxes, Fluxes};
use crate::isotopes::{mix_isotopes, IsotopeState};
use crate::parameters::SimulationParameters;
use crate::regime::Regime;
use crate::reservoirs::ReservoirState;
use crate::timeseries::{FloatValue, Time, Timeseries};
use crate::timeseries_collection::{TimeseriesCollection, VariableType};
use crate::variables;
use log::{debug, info};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Full time-indexed output of a run: every reservoir, every flux and every
/// isotope series, addressed by the names in [`crate::variables`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    time: Array1<Time>,
    collection: TimeseriesCollection,
}

impl SimulationResult {
    /// The uniform time axis (Myr).
    pub fn time(&self) -> &Array1<Time> {
        &self.time
    }

    /// Number of steps on the grid.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// A series by its canonical name.
    pub fn series(&self, name: &str) -> Option<&Timeseries<FloatValue>> {
        self.collection.get_timeseries_by_name(name)
    }

    /// A single value of a named series.
    pub fn get(&self, name: &str, step: usize) -> Option<FloatValue> {
        self.series(name).map(|ts| ts.get(step))
    }

    /// The underlying collection, including the aggregate/component links.
    pub fn collection(&self) -> &TimeseriesCollection {
        &self.collection
    }
}

/// The coupled carbon-cycle model for one validated scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonCycleModel {
    parameters: SimulationParameters,
}

impl CarbonCycleModel {
    /// Build a model, rejecting invalid configurations before any work.
    pub fn new(parameters: SimulationParameters) -> ModelResult<Self> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Run the integration over the full horizon.
    ///
    /// The run either completes all steps or fails with a labeled error
    /// identifying kind and step; there are no internal retries, the
    /// computation is deterministic.
    pub fn simulate(&self) -> ModelResult<SimulationResult> {
        let parameters = &self.parameters;
        let n = parameters.step_count();
        info!(
            "integrating {} steps from {} to {} Myr",
            n, parameters.t_start, parameters.t_end
        );

        let mut store = SeriesStore::new(n);
        let mut state = ReservoirState::initial(parameters);
        let mut fluxes = Fluxes::initial(parameters);
        let mut isotopes = IsotopeState::initial(parameters);
        let mut regime = Regime::at_step(0, parameters);
        store.record(0, &state, &fluxes, &isotopes);

        for step in 1..n {
            let current = Regime::at_step(step, parameters);
            if current != regime {
                debug!(
                    "entering {:?} at step {} (t = {} Myr)",
                    current,
                    step,
                    parameters.time_at(step)
                );
                regime = current;
            }

            state = state.advance(&fluxes, parameters);
            fluxes = compute_fluxes(
                step,
                regime,
                state.atmosphere,
                &mut store.subducted_carbonate,
                &mut store.subducted_organic,
                parameters,
            )?;
            isotopes = mix_isotopes(
                step,
                regime,
                &fluxes,
                &store.carbonate_d13c,
                &store.organic_d13c,
                parameters,
            )?;
            store.record(step, &state, &fluxes, &isotopes);
        }

        info!("run finished in {:?}", regime);
        Ok(SimulationResult {
            time: Array1::from_iter((0..n).map(|step| parameters.time_at(step))),
            collection: store.into_collection(parameters),
        })
    }
}

/// Run a scenario end to end.
pub fn simulate(parameters: SimulationParameters) -> ModelResult<SimulationResult> {
    CarbonCycleModel::new(parameters)?.simulate()
}

/// All series of a run, exclusively owned by the loop while it executes.
struct SeriesStore {
    atmosphere: Timeseries<FloatValue>,
    crustal_carbonate: Timeseries<FloatValue>,
    crustal_organic: Timeseries<FloatValue>,
    mantle_carbonate: Timeseries<FloatValue>,
    mantle_organic: Timeseries<FloatValue>,
    primordial_mantle: Timeseries<FloatValue>,

    weathering_organic: Timeseries<FloatValue>,
    weathering_carbonate: Timeseries<FloatValue>,
    subducted_organic: Timeseries<FloatValue>,
    subducted_carbonate: Timeseries<FloatValue>,
    ridge: Timeseries<FloatValue>,
    arc: Timeseries<FloatValue>,
    ocean_island: Timeseries<FloatValue>,
    outgassing_total: Timeseries<FloatValue>,
    weathering_total: Timeseries<FloatValue>,

    atmosphere_d13c: Timeseries<FloatValue>,
    carbonate_d13c: Timeseries<FloatValue>,
    organic_d13c: Timeseries<FloatValue>,
    arc_d13c: Timeseries<FloatValue>,
    ocean_island_d13c: Timeseries<FloatValue>,
}

impl SeriesStore {
    fn new(n: usize) -> Self {
        Self {
            atmosphere: Timeseries::zeros(n),
            crustal_carbonate: Timeseries::zeros(n),
            crustal_organic: Timeseries::zeros(n),
            mantle_carbonate: Timeseries::zeros(n),
            mantle_organic: Timeseries::zeros(n),
            primordial_mantle: Timeseries::zeros(n),
            weathering_organic: Timeseries::zeros(n),
            weathering_carbonate: Timeseries::zeros(n),
            subducted_organic: Timeseries::zeros(n),
            subducted_carbonate: Timeseries::zeros(n),
            ridge: Timeseries::zeros(n),
            arc: Timeseries::zeros(n),
            ocean_island: Timeseries::zeros(n),
            outgassing_total: Timeseries::zeros(n),
            weathering_total: Timeseries::zeros(n),
            atmosphere_d13c: Timeseries::zeros(n),
            carbonate_d13c: Timeseries::zeros(n),
            organic_d13c: Timeseries::zeros(n),
            arc_d13c: Timeseries::zeros(n),
            ocean_island_d13c: Timeseries::zeros(n),
        }
    }

    fn record(
        &mut self,
        step: usize,
        state: &ReservoirState,
        fluxes: &Fluxes,
        isotopes: &IsotopeState,
    ) {
        self.atmosphere.set(step, state.atmosphere);
        self.crustal_carbonate.set(step, state.crustal_carbonate);
        self.crustal_organic.set(step, state.crustal_organic);
        self.mantle_carbonate.set(step, state.mantle_carbonate);
        self.mantle_organic.set(step, state.mantle_organic);
        self.primordial_mantle.set(step, state.primordial_mantle);

        self.weathering_organic.set(step, fluxes.weathering_organic);
        self.weathering_carbonate
            .set(step, fluxes.weathering_carbonate);
        self.subducted_organic.set(step, fluxes.subducted_organic);
        self.subducted_carbonate
            .set(step, fluxes.subducted_carbonate);
        self.ridge.set(step, fluxes.ridge);
        self.arc.set(step, fluxes.arc());
        self.ocean_island.set(step, fluxes.ocean_island());
        self.outgassing_total.set(step, fluxes.outgassing_total());
        self.weathering_total.set(step, fluxes.weathering_total());

        self.atmosphere_d13c.set(step, isotopes.atmosphere);
        self.carbonate_d13c.set(step, isotopes.carbonate);
        self.organic_d13c.set(step, isotopes.organic);
        self.arc_d13c.set(step, isotopes.arc);
        self.ocean_island_d13c.set(step, isotopes.ocean_island);
    }

    fn into_collection(self, parameters: &SimulationParameters) -> TimeseriesCollection {
        let n = self.atmosphere.len();
        // crustal + mantle organic carbon, the atmospheric-oxygen proxy
        let organic_total = Timeseries::from_values(
            self.crustal_organic.values() + self.mantle_organic.values(),
        );

        let mut collection = TimeseriesCollection::new();
        let endogenous = [
            (variables::RESERVOIR_ATMOSPHERE, self.atmosphere),
            (
                variables::RESERVOIR_CRUSTAL_CARBONATE,
                self.crustal_carbonate,
            ),
            (variables::RESERVOIR_CRUSTAL_ORGANIC, self.crustal_organic),
            (
                variables::RESERVOIR_MANTLE_CARBONATE,
                self.mantle_carbonate,
            ),
            (variables::RESERVOIR_MANTLE_ORGANIC, self.mantle_organic),
            (
                variables::RESERVOIR_PRIMORDIAL_MANTLE,
                self.primordial_mantle,
            ),
            (variables::RESERVOIR_ORGANIC_TOTAL, organic_total),
            (variables::FLUX_WEATHERING, self.weathering_total),
            (
                variables::FLUX_WEATHERING_ORGANIC,
                self.weathering_organic,
            ),
            (
                variables::FLUX_WEATHERING_CARBONATE,
                self.weathering_carbonate,
            ),
            (variables::FLUX_SUBDUCTION_ORGANIC, self.subducted_organic),
            (
                variables::FLUX_SUBDUCTION_CARBONATE,
                self.subducted_carbonate,
            ),
            (variables::FLUX_OUTGASSING, self.outgassing_total),
            (variables::FLUX_OUTGASSING_ARC, self.arc),
            (
                variables::FLUX_OUTGASSING_OCEAN_ISLAND,
                self.ocean_island,
            ),
            (variables::DELTA13C_ATMOSPHERE, self.atmosphere_d13c),
            (variables::DELTA13C_CARBONATE, self.carbonate_d13c),
            (variables::DELTA13C_ORGANIC, self.organic_d13c),
            (variables::DELTA13C_ARC, self.arc_d13c),
            (variables::DELTA13C_OCEAN_ISLAND, self.ocean_island_d13c),
            (
                variables::DELTA13C_PRIMORDIAL,
                Timeseries::constant(parameters.primordial_d13c, n),
            ),
        ];
        for (definition, timeseries) in endogenous {
            collection.add_timeseries(definition, timeseries, VariableType::Endogenous);
        }
        // the ridge schedule and its signature are prescribed by the scenario
        collection.add_timeseries(
            variables::FLUX_OUTGASSING_RIDGE,
            self.ridge,
            VariableType::Exogenous,
        );
        collection.add_timeseries(
            variables::DELTA13C_RIDGE,
            Timeseries::constant(parameters.ridge_d13c, n),
            VariableType::Exogenous,
        );

        for component in [
            variables::FLUX_OUTGASSING_RIDGE,
            variables::FLUX_OUTGASSING_ARC,
            variables::FLUX_OUTGASSING_OCEAN_ISLAND,
        ] {
            collection.link_component(variables::FLUX_OUTGASSING.name, component.name, 1.0);
        }
        for component in [
            variables::FLUX_WEATHERING_ORGANIC,
            variables::FLUX_WEATHERING_CARBONATE,
        ] {
            collection.link_component(variables::FLUX_WEATHERING.name, component.name, 1.0);
        }
        for component in [
            variables::RESERVOIR_CRUSTAL_ORGANIC,
            variables::RESERVOIR_MANTLE_ORGANIC,
        ] {
            collection.link_component(variables::RESERVOIR_ORGANIC_TOTAL.name, component.name, 1.0);
        }

        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_default_run_completes() {
        let result = simulate(SimulationParameters::default()).unwrap();
        assert_eq!(result.len(), 5001);
        assert_eq!(result.time()[0], 0.0);
        assert_eq!(result.time()[5000], 5000.0);

        let atmosphere = result
            .series(variables::RESERVOIR_ATMOSPHERE.name)
            .unwrap();
        assert_eq!(atmosphere.len(), 5001);
        assert!(atmosphere.last().is_finite());
    }

    #[test]
    fn test_invalid_configuration_fails_before_the_loop() {
        let parameters = SimulationParameters {
            organic_fraction: 1.5,
            ..Default::default()
        };
        assert!(simulate(parameters).is_err());
    }

    #[test]
    fn test_step_zero_is_seeded_from_initial_conditions() {
        let parameters = SimulationParameters {
            initial_atmosphere_mass: 1e14,
            ..Default::default()
        };
        let result = simulate(parameters).unwrap();
        assert_eq!(
            result.get(variables::RESERVOIR_ATMOSPHERE.name, 0).unwrap(),
            1e14
        );
        assert_eq!(
            result
                .get(variables::RESERVOIR_PRIMORDIAL_MANTLE.name, 0)
                .unwrap(),
            1e23
        );
        assert_eq!(
            result.get(variables::DELTA13C_ATMOSPHERE.name, 0).unwrap(),
            -5.0
        );
        // weathering seeded from the initial mass, total outgassing from baselines
        assert!(is_close!(
            result.get(variables::FLUX_WEATHERING.name, 0).unwrap(),
            0.1 * 1e14
        ));
        assert!(is_close!(
            result.get(variables::FLUX_OUTGASSING.name, 0).unwrap(),
            3e13
        ));
    }

    #[test]
    fn test_early_atmosphere_growth_matches_the_recurrence() {
        // pre-onset with zero initial mass: m[1] = F_tot[0], and
        // m[2] = m[1] + F_tot[1] - k * m[1]
        let result = simulate(SimulationParameters::default()).unwrap();
        let m1 = result.get(variables::RESERVOIR_ATMOSPHERE.name, 1).unwrap();
        let m2 = result.get(variables::RESERVOIR_ATMOSPHERE.name, 2).unwrap();
        assert!(is_close!(m1, 3e13));
        assert!(is_close!(m2, m1 + 3e13 - 0.1 * m1));
    }

    #[test]
    fn test_ridge_series_follows_the_schedule() {
        let result = simulate(SimulationParameters::default()).unwrap();
        let ridge = result.series(variables::FLUX_OUTGASSING_RIDGE.name).unwrap();
        assert_eq!(ridge.get(999), 1e13);
        assert_eq!(ridge.get(1000), 1e16);
        assert_eq!(ridge.get(2699), 1e16);
        assert_eq!(ridge.get(2700), 1e19);
    }

    #[test]
    fn test_organic_total_is_the_sum_of_its_components() {
        let result = simulate(SimulationParameters::default()).unwrap();
        for step in [0, 1500, 3000, 5000] {
            let total = result
                .get(variables::RESERVOIR_ORGANIC_TOTAL.name, step)
                .unwrap();
            let crustal = result
                .get(variables::RESERVOIR_CRUSTAL_ORGANIC.name, step)
                .unwrap();
            let mantle = result
                .get(variables::RESERVOIR_MANTLE_ORGANIC.name, step)
                .unwrap();
            assert!(is_close!(total, crustal + mantle));
        }
        let components = result
            .collection()
            .components_of(variables::RESERVOIR_ORGANIC_TOTAL.name);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn test_result_serialization_round_trip() {
        let parameters = SimulationParameters {
            t_end: 50.0,
            onset: 10.0,
            carbonate_delay: 2,
            organic_delay: 5,
            tectonic_change: 30.0,
            ..Default::default()
        };
        let result = simulate(parameters).unwrap();
        let json = serde_json::to_string(&result).expect("serialization failed");
        let parsed: SimulationResult = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(parsed.len(), result.len());
        assert_eq!(
            parsed.get(variables::RESERVOIR_ATMOSPHERE.name, 50),
            result.get(variables::RESERVOIR_ATMOSPHERE.name, 50)
        );
    }
}
