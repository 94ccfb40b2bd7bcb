//! Canonical names and units for every output series.
//!
//! Components of an aggregate share the aggregate's name as a `|`-separated
//! prefix, e.g. `Flux|Outgassing|Ridge` under `Flux|Outgassing`. Consumers
//! should address [`crate::model::SimulationResult`] through these constants
//! rather than ad-hoc strings.

/// A named output series and its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableDef {
    pub name: &'static str,
    pub unit: &'static str,
}

pub const RESERVOIR_ATMOSPHERE: VariableDef = VariableDef {
    name: "Reservoir|Atmosphere-Ocean",
    unit: "g",
};
pub const RESERVOIR_CRUSTAL_CARBONATE: VariableDef = VariableDef {
    name: "Reservoir|Crustal Carbonate",
    unit: "g",
};
pub const RESERVOIR_CRUSTAL_ORGANIC: VariableDef = VariableDef {
    name: "Reservoir|Crustal Organic",
    unit: "g",
};
pub const RESERVOIR_MANTLE_CARBONATE: VariableDef = VariableDef {
    name: "Reservoir|Mantle Carbonate",
    unit: "g",
};
pub const RESERVOIR_MANTLE_ORGANIC: VariableDef = VariableDef {
    name: "Reservoir|Mantle Organic",
    unit: "g",
};
pub const RESERVOIR_PRIMORDIAL_MANTLE: VariableDef = VariableDef {
    name: "Reservoir|Primordial Mantle",
    unit: "g",
};
/// Crustal plus mantle organic carbon, the atmospheric-oxygen proxy.
pub const RESERVOIR_ORGANIC_TOTAL: VariableDef = VariableDef {
    name: "Reservoir|Organic Total",
    unit: "g",
};

pub const FLUX_WEATHERING: VariableDef = VariableDef {
    name: "Flux|Weathering",
    unit: "g / Myr",
};
pub const FLUX_WEATHERING_ORGANIC: VariableDef = VariableDef {
    name: "Flux|Weathering|Organic",
    unit: "g / Myr",
};
pub const FLUX_WEATHERING_CARBONATE: VariableDef = VariableDef {
    name: "Flux|Weathering|Carbonate",
    unit: "g / Myr",
};
pub const FLUX_SUBDUCTION_ORGANIC: VariableDef = VariableDef {
    name: "Flux|Subduction|Organic",
    unit: "g / Myr",
};
pub const FLUX_SUBDUCTION_CARBONATE: VariableDef = VariableDef {
    name: "Flux|Subduction|Carbonate",
    unit: "g / Myr",
};
pub const FLUX_OUTGASSING: VariableDef = VariableDef {
    name: "Flux|Outgassing",
    unit: "g / Myr",
};
pub const FLUX_OUTGASSING_RIDGE: VariableDef = VariableDef {
    name: "Flux|Outgassing|Ridge",
    unit: "g / Myr",
};
pub const FLUX_OUTGASSING_ARC: VariableDef = VariableDef {
    name: "Flux|Outgassing|Arc",
    unit: "g / Myr",
};
pub const FLUX_OUTGASSING_OCEAN_ISLAND: VariableDef = VariableDef {
    name: "Flux|Outgassing|Ocean Island",
    unit: "g / Myr",
};

pub const DELTA13C_ATMOSPHERE: VariableDef = VariableDef {
    name: "Delta13C|Atmosphere-Ocean",
    unit: "permille",
};
pub const DELTA13C_CARBONATE: VariableDef = VariableDef {
    name: "Delta13C|Carbonate",
    unit: "permille",
};
pub const DELTA13C_ORGANIC: VariableDef = VariableDef {
    name: "Delta13C|Organic",
    unit: "permille",
};
pub const DELTA13C_ARC: VariableDef = VariableDef {
    name: "Delta13C|Arc",
    unit: "permille",
};
pub const DELTA13C_OCEAN_ISLAND: VariableDef = VariableDef {
    name: "Delta13C|Ocean Island",
    unit: "permille",
};
pub const DELTA13C_RIDGE: VariableDef = VariableDef {
    name: "Delta13C|Ridge",
    unit: "permille",
};
pub const DELTA13C_PRIMORDIAL: VariableDef = VariableDef {
    name: "Delta13C|Primordial",
    unit: "permille",
};
