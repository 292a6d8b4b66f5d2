use crate::models::SensorReading;
use indexmap::IndexMap;

/// Tracked machines and their latest readings.
///
/// Read-mostly; iteration order follows insertion order, which is also the
/// display order on the dashboard.
#[derive(Debug, Clone, Default)]
pub struct MachineRegistry {
    readings: IndexMap<String, SensorReading>,
}

impl MachineRegistry {
    pub fn new() -> Self {
        Self {
            readings: IndexMap::new(),
        }
    }

    /// Store a reading for a machine, replacing any previous one wholesale.
    pub fn insert(&mut self, id: impl Into<String>, reading: SensorReading) {
        self.readings.insert(id.into(), reading);
    }

    /// Latest reading for a machine; absence for unknown ids, never a default.
    pub fn get(&self, id: &str) -> Option<&SensorReading> {
        self.readings.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SensorReading)> {
        self.readings.iter()
    }

    /// Tracked machine ids in display order.
    pub fn ids(&self) -> Vec<String> {
        self.readings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
