//! Long-term coupled evolution of carbon reservoirs, carbon fluxes and
//! carbon-isotope ratios across a planet's atmosphere-ocean, crust and mantle,
//! driven by a prescribed schedule of tectonic regime changes.
//!
//! The model integrates a six-reservoir mass-balance system with a fixed-step
//! explicit scheme. Recycling fluxes depend on values a fixed number of steps
//! in the past (subducted material resurfaces at arcs and ocean islands after
//! characteristic delays), and the governing equations switch form at
//! scheduled transition times.
//!
//! # Module Organisation
//!
//! - [`parameters`]: scenario configuration with documented defaults
//! - [`regime`]: which of the five tectonic regimes is active at a step
//! - [`timeseries`]: step-indexed series storage and the delayed lookup
//! - [`fluxes`]: instantaneous fluxes for a step (weathering, subduction,
//!   ridge / arc / ocean-island outgassing)
//! - [`reservoirs`]: reservoir masses and the explicit forward update
//! - [`isotopes`]: flux-weighted isotope mixing
//! - [`model`]: the integration loop and [`model::SimulationResult`]
//!
//! The single entry point is [`simulate`]:
//!
//! ```
//! use deepcarbon::{simulate, SimulationParameters};
//!
//! let result = simulate(SimulationParameters::default()).unwrap();
//! let atmosphere = result
//!     .series(deepcarbon::variables::RESERVOIR_ATMOSPHERE.name)
//!     .unwrap();
//! assert_eq!(atmosphere.len(), 5001);
//! ```

pub mod errors;
pub mod fluxes;
pub mod isotopes;
pub mod model;
pub mod parameters;
pub mod regime;
pub mod reservoirs;
pub mod timeseries;
pub mod timeseries_collection;
pub mod variables;

pub use errors::{ModelError, ModelResult};
pub use model::{simulate, CarbonCycleModel, SimulationResult};
pub use parameters::SimulationParameters;
pub use regime::Regime;
