//! Test Data Builders
//!
//! Provides a builder for fund request payloads. Tests set only the
//! fields they care about; everything else comes from
//! [`FundFixtures::fund_data`].

use serde_json::{Map, Value};

use crate::fixtures::FundFixtures;

/// Builder for constructing fund request payloads
pub struct FundPayloadBuilder {
    fields: Map<String, Value>,
}

impl Default for FundPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FundPayloadBuilder {
    /// Creates a new builder holding the standard fixture payload
    pub fn new() -> Self {
        let fields = match FundFixtures::fund_data() {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        Self { fields }
    }

    /// Sets the fund identifier
    pub fn fund_id(self, fund_id: &str) -> Self {
        self.set("fund_id", fund_id)
    }

    /// Sets the fund name
    pub fn fund_name(self, name: &str) -> Self {
        self.set("fund_name", name)
    }

    /// Sets the NAV as written
    pub fn fund_nav(self, nav: &str) -> Self {
        self.set("fund_nav", nav)
    }

    /// Sets the performance as written
    pub fn fund_performance(self, performance: &str) -> Self {
        self.set("fund_performance", performance)
    }

    /// Sets any field to any JSON value
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Removes a field from the payload
    pub fn without(mut self, field: &str) -> Self {
        self.fields.remove(field);
        self
    }

    /// Builds the JSON payload
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}
