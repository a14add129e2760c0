use std::collections::HashMap;

use crate::types::{Property, PropertyValue};

/// Last-known property values, keyed by property.
///
/// Entries only come from checksum-valid device replies and are overwritten
/// by the next confirmed exchange for the same property.
#[derive(Debug, Default)]
pub struct PropertyCache {
    values: HashMap<Property, PropertyValue>,
}

impl PropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: Property) -> Option<PropertyValue> {
        self.values.get(&property).copied()
    }

    pub(crate) fn store(&mut self, value: PropertyValue) {
        self.values.insert(value.property(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
