//! A collection of named output series.
//!
//! Allows access to every series by name across the whole result, and records
//! the aggregate/component relationships (total outgassing over its ridge,
//! arc and ocean-island components, total weathering over its split, total
//! organic carbon over its crustal and mantle pools) as graph edges.

use crate::timeseries::{FloatValue, Timeseries};
use crate::variables::VariableDef;
use petgraph::graph::NodeIndex;
use petgraph::{Direction, Graph};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VariableType {
    /// Values prescribed by the scenario (the stepped ridge schedule)
    Exogenous,
    /// Values determined within the model
    Endogenous,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeseriesItem {
    pub timeseries: Timeseries<FloatValue>,
    pub name: String,
    pub unit: String,
    pub variable_type: VariableType,
}

/// A collection of time series data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeseriesCollection {
    node_indexes: Vec<NodeIndex>,
    graph: Graph<TimeseriesItem, f64>,
}

impl TimeseriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new timeseries to the collection.
    ///
    /// Panics if a timeseries with the same name already exists in the
    /// collection; output names are fixed by [`crate::variables`].
    pub fn add_timeseries(
        &mut self,
        definition: VariableDef,
        timeseries: Timeseries<FloatValue>,
        variable_type: VariableType,
    ) {
        self.iter().for_each(|x| {
            if x.name == definition.name {
                panic!("timeseries {} already exists", definition.name)
            }
        });

        let node_index = self.graph.add_node(TimeseriesItem {
            timeseries,
            name: definition.name.to_string(),
            unit: definition.unit.to_string(),
            variable_type,
        });
        self.node_indexes.push(node_index);
    }

    /// Record that `component` is one of the weighted parts of `aggregate`.
    /// Both series must already be in the collection.
    pub fn link_component(&mut self, aggregate: &str, component: &str, weight: f64) {
        let from = *self.get_index(aggregate);
        let to = *self.get_index(component);
        self.graph.add_edge(from, to, weight);
    }

    /// The component series linked under an aggregate, if any.
    pub fn components_of(&self, name: &str) -> Vec<&TimeseriesItem> {
        self.graph
            .neighbors_directed(*self.get_index(name), Direction::Outgoing)
            .map(|x| &self.graph[x])
            .collect()
    }

    fn get_index(&self, name: &str) -> &NodeIndex {
        self.node_indexes
            .iter()
            .find(|x| self.graph[**x].name == name)
            .expect("timeseries not found")
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TimeseriesItem> {
        self.node_indexes
            .iter()
            .find(|x| self.graph[**x].name == name)
            .map(|x| &self.graph[*x])
    }

    pub fn get_timeseries_by_name(&self, name: &str) -> Option<&Timeseries<FloatValue>> {
        self.get_by_name(name).map(|item| &item.timeseries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeseriesItem> {
        self.node_indexes.iter().map(move |x| &self.graph[*x])
    }

    pub fn len(&self) -> usize {
        self.node_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_indexes.is_empty()
    }
}

impl IntoIterator for TimeseriesCollection {
    type Item = TimeseriesItem;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.node_indexes
            .iter()
            .map(move |x| self.graph[*x].clone())
            .collect::<Vec<_>>()
            .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables;

    fn some_series() -> Timeseries<FloatValue> {
        Timeseries::constant(1.0, 4)
    }

    #[test]
    fn test_adding_and_lookup() {
        let mut collection = TimeseriesCollection::new();
        collection.add_timeseries(
            variables::FLUX_OUTGASSING_RIDGE,
            some_series(),
            VariableType::Exogenous,
        );
        collection.add_timeseries(
            variables::RESERVOIR_ATMOSPHERE,
            some_series(),
            VariableType::Endogenous,
        );

        let item = collection
            .get_by_name(variables::FLUX_OUTGASSING_RIDGE.name)
            .unwrap();
        assert_eq!(item.unit, "g / Myr");
        assert_eq!(item.variable_type, VariableType::Exogenous);
        assert!(collection.get_by_name("Flux|Nonexistent").is_none());
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_component_links() {
        let mut collection = TimeseriesCollection::new();
        collection.add_timeseries(
            variables::FLUX_OUTGASSING,
            some_series(),
            VariableType::Endogenous,
        );
        collection.add_timeseries(
            variables::FLUX_OUTGASSING_RIDGE,
            some_series(),
            VariableType::Exogenous,
        );
        collection.add_timeseries(
            variables::FLUX_OUTGASSING_ARC,
            some_series(),
            VariableType::Endogenous,
        );
        collection.link_component(
            variables::FLUX_OUTGASSING.name,
            variables::FLUX_OUTGASSING_RIDGE.name,
            1.0,
        );
        collection.link_component(
            variables::FLUX_OUTGASSING.name,
            variables::FLUX_OUTGASSING_ARC.name,
            1.0,
        );

        let components = collection.components_of(variables::FLUX_OUTGASSING.name);
        assert_eq!(components.len(), 2);
        assert!(components
            .iter()
            .any(|item| item.name == variables::FLUX_OUTGASSING_ARC.name));
    }

    #[test]
    #[should_panic]
    fn test_adding_same_name_panics() {
        let mut collection = TimeseriesCollection::new();
        collection.add_timeseries(
            variables::RESERVOIR_ATMOSPHERE,
            some_series(),
            VariableType::Endogenous,
        );
        collection.add_timeseries(
            variables::RESERVOIR_ATMOSPHERE,
            some_series(),
            VariableType::Endogenous,
        );
    }
}
