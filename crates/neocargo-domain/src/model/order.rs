//! Client shipping orders and their quote options

use chrono::{DateTime, Utc};
use neocargo_types::{OrderStatus, QuoteChoice};
use serde::{Deserialize, Serialize};

/// One pre-computed price/time/vehicle triple offered to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteOption {
    pub price: f64,
    pub hours: f64,
    pub vehicle: String,
}

/// The three distinguished options computed by the quote selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteOptions {
    pub economical: QuoteOption,
    pub fast: QuoteOption,
    pub balanced: QuoteOption,
}

impl QuoteOptions {
    pub fn get(&self, choice: QuoteChoice) -> &QuoteOption {
        match choice {
            QuoteChoice::Economical => &self.economical,
            QuoteChoice::Fast => &self.fast,
            QuoteChoice::Balanced => &self.balanced,
        }
    }
}

/// A client shipment request, from quote drafting through completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub client: String,
    /// Free-text origin city label, resolved at the service boundary
    pub origin: String,
    /// Free-text destination city label, resolved at the service boundary
    pub destination: String,
    pub cargo_weight_kg: f64,
    /// Desired delivery deadline in days
    pub deadline_days: u32,
    #[serde(default)]
    pub notes: Option<String>,
    /// Quote option selected by the client
    #[serde(default)]
    pub chosen_option: Option<QuoteChoice>,
    /// Computed options, present once the order has been quoted
    #[serde(default)]
    pub quote_options: Option<QuoteOptions>,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub final_hours: Option<f64>,
    #[serde(default)]
    pub final_vehicle: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Clients may only cancel orders still in quoting or pending approval
    pub fn can_cancel(&self) -> bool {
        matches!(self.status, OrderStatus::Quote | OrderStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_status(status: OrderStatus) -> Order {
        Order {
            id: 1,
            client: "acme".to_string(),
            origin: "São Paulo - SP".to_string(),
            destination: "Rio de Janeiro - RJ".to_string(),
            cargo_weight_kg: 2000.0,
            deadline_days: 3,
            notes: None,
            chosen_option: None,
            quote_options: None,
            final_price: None,
            final_hours: None,
            final_vehicle: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_cancel_only_before_approval() {
        assert!(order_with_status(OrderStatus::Quote).can_cancel());
        assert!(order_with_status(OrderStatus::Pending).can_cancel());
        assert!(!order_with_status(OrderStatus::Approved).can_cancel());
        assert!(!order_with_status(OrderStatus::InTransit).can_cancel());
        assert!(!order_with_status(OrderStatus::Completed).can_cancel());
        assert!(!order_with_status(OrderStatus::Cancelled).can_cancel());
        assert!(!order_with_status(OrderStatus::Rejected).can_cancel());
    }

    #[test]
    fn test_quote_options_get() {
        let options = QuoteOptions {
            economical: QuoteOption {
                price: 100.0,
                hours: 8.0,
                vehicle: "a".to_string(),
            },
            fast: QuoteOption {
                price: 150.0,
                hours: 5.0,
                vehicle: "b".to_string(),
            },
            balanced: QuoteOption {
                price: 120.0,
                hours: 6.0,
                vehicle: "c".to_string(),
            },
        };
        assert_eq!(options.get(QuoteChoice::Economical).vehicle, "a");
        assert_eq!(options.get(QuoteChoice::Fast).vehicle, "b");
        assert_eq!(options.get(QuoteChoice::Balanced).vehicle, "c");
    }
}
