//! Free-text city label resolution

use neocargo_domain::model::{City, Route};
use neocargo_domain::repository::CityRepository;
use neocargo_types::{Error, Result};

/// Resolve a free-text label ("Santos - SP", "Santos/SP" or "Santos")
/// to an active registered city.
pub fn resolve_city<R: CityRepository>(repo: &R, label: &str) -> Result<City> {
    let name = City::parse_label(label);
    repo.find_city_by_name(name)?
        .ok_or_else(|| Error::CityNotFound(label.to_string()))
}

/// The directed route between two resolved cities
pub fn resolve_route<R: CityRepository>(repo: &R, origin: &City, destination: &City) -> Result<Route> {
    repo.find_route(origin.id, destination.id)?
        .ok_or_else(|| Error::NoRoute {
            origin: origin.full_name(),
            destination: destination.full_name(),
        })
}
