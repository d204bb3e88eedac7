//! Fuel price and profit margin configuration

use neocargo_types::FuelType;
use serde::{Deserialize, Serialize};

/// Current fuel prices (per litre) and profit margin percentage.
///
/// A single current record is read by the cost estimator; when none
/// has been configured yet the defaults below are materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceConfig {
    pub diesel_price: f64,
    pub gasoline_price: f64,
    pub alcohol_price: f64,
    pub profit_margin_percent: f64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            diesel_price: 3.869,
            gasoline_price: 4.449,
            alcohol_price: 3.499,
            profit_margin_percent: 20.0,
        }
    }
}

impl PriceConfig {
    /// Unit price for a fuel type
    pub fn price_of(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Diesel => self.diesel_price,
            FuelType::Gasoline => self.gasoline_price,
            FuelType::Alcohol => self.alcohol_price,
        }
    }
}
