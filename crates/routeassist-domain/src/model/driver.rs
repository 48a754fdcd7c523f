//! Driver roster

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub driver_id: String,
    pub name: String,
}

/// The set of valid driver ids, with display names
#[derive(Debug, Clone, Default)]
pub struct DriverRoster {
    names: HashMap<String, String>,
}

impl DriverRoster {
    pub fn from_records(records: impl IntoIterator<Item = DriverRecord>) -> Self {
        let mut names = HashMap::new();
        for record in records {
            // First row wins when the roster repeats an id
            names.entry(record.driver_id).or_insert(record.name);
        }
        Self { names }
    }

    pub fn contains(&self, driver_id: &str) -> bool {
        self.names.contains_key(driver_id)
    }

    pub fn name_of(&self, driver_id: &str) -> Option<&str> {
        self.names.get(driver_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
