//! Cities served by the carrier and the routes between them

use serde::{Deserialize, Serialize};

/// A city the carrier operates in, unique per (name, state)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,
    /// Two-letter state code (e.g. "SP", "RJ")
    pub state: String,
    pub active: bool,
}

impl City {
    /// Full display name, "Name/State"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.name, self.state)
    }

    /// Extract the city name from a free-text label.
    ///
    /// The surrounding application encodes cities as "Name - State" or
    /// "Name/State"; a bare name is accepted as-is.
    pub fn parse_label(label: &str) -> &str {
        if let Some((name, _)) = label.split_once(" - ") {
            name.trim()
        } else if let Some((name, _)) = label.split_once('/') {
            name.trim()
        } else {
            label.trim()
        }
    }

    /// Case-insensitive name match against a parsed label
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A directed route between two cities, unique per (origin, destination)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: u64,
    pub origin: u64,
    pub destination: u64,
    pub distance_km: f64,
    pub estimated_hours: Option<f64>,
    pub toll_cost: f64,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_dash_format() {
        assert_eq!(City::parse_label("São Paulo - SP"), "São Paulo");
    }

    #[test]
    fn test_parse_label_slash_format() {
        assert_eq!(City::parse_label("Rio de Janeiro/RJ"), "Rio de Janeiro");
    }

    #[test]
    fn test_parse_label_bare_name() {
        assert_eq!(City::parse_label("  Campinas "), "Campinas");
    }

    #[test]
    fn test_matches_name_ignores_case() {
        let city = City {
            id: 1,
            name: "Campinas".to_string(),
            state: "SP".to_string(),
            active: true,
        };
        assert!(city.matches_name("campinas"));
        assert!(city.matches_name("CAMPINAS"));
        assert!(!city.matches_name("Santos"));
    }

    #[test]
    fn test_full_name() {
        let city = City {
            id: 1,
            name: "Santos".to_string(),
            state: "SP".to_string(),
            active: true,
        };
        assert_eq!(city.full_name(), "Santos/SP");
    }
}
