//! Durable store wrapping the record tables

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use tracing::debug;

use neocargo_domain::model::{
    Assignment, City, Driver, Order, PriceConfig, Route, Vehicle, VehicleSpec,
};
use neocargo_domain::repository::{
    AssignmentRepository, CityRepository, DriverRepository, OrderRepository, PriceConfigProvider,
    VehicleRepository,
};
use neocargo_types::Result;

use crate::tables::Tables;

const RECORDS_FILE: &str = "records.json";

/// Single-owner store; callers hold `&mut Store` to write, which
/// serializes all mutations.
pub struct Store {
    dir: Option<PathBuf>,
    tables: Tables,
}

impl Store {
    /// Create or load a store under the given data directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let path = dir.join(RECORDS_FILE);

        let tables = if path.exists() {
            let file = File::open(&path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)?
        } else {
            Tables::default()
        };

        debug!(dir = %dir.display(), "store opened");
        Ok(Self {
            dir: Some(dir),
            tables,
        })
    }

    /// Ephemeral store with no backing file
    pub fn in_memory() -> Self {
        Self {
            dir: None,
            tables: Tables::default(),
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Apply a mutation atomically.
    ///
    /// The closure runs against a draft copy of the tables. The draft
    /// is written to disk first and replaces the live tables only once
    /// the write succeeded, so a failed persist leaves memory and disk
    /// agreeing on the old state.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut draft = self.tables.clone();
        let value = f(&mut draft)?;
        self.persist(&draft)?;
        self.tables = draft;
        Ok(value)
    }

    fn persist(&self, tables: &Tables) -> Result<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let file = File::create(dir.join(RECORDS_FILE))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, tables)?;
        Ok(())
    }
}

impl VehicleRepository for Store {
    fn active_fleet(&self) -> Result<Vec<(Vehicle, VehicleSpec)>> {
        self.tables.active_fleet()
    }

    fn find_vehicle(&self, id: u64) -> Result<Option<Vehicle>> {
        self.tables.find_vehicle(id)
    }
}

impl DriverRepository for Store {
    fn drivers(&self) -> Result<Vec<Driver>> {
        self.tables.drivers()
    }

    fn find_driver(&self, id: u64) -> Result<Option<Driver>> {
        self.tables.find_driver(id)
    }
}

impl OrderRepository for Store {
    fn find_order(&self, id: u64) -> Result<Option<Order>> {
        self.tables.find_order(id)
    }
}

impl AssignmentRepository for Store {
    fn assignment_for_order(&self, order_id: u64) -> Result<Option<Assignment>> {
        self.tables.assignment_for_order(order_id)
    }

    fn busy_vehicle_ids(&self) -> Result<Vec<u64>> {
        self.tables.busy_vehicle_ids()
    }

    fn driver_has_in_progress(&self, driver_id: u64) -> Result<bool> {
        self.tables.driver_has_in_progress(driver_id)
    }
}

impl CityRepository for Store {
    fn find_city_by_name(&self, name: &str) -> Result<Option<City>> {
        self.tables.find_city_by_name(name)
    }

    fn find_city(&self, id: u64) -> Result<Option<City>> {
        self.tables.find_city(id)
    }

    fn find_route(&self, origin: u64, destination: u64) -> Result<Option<Route>> {
        self.tables.find_route(origin, destination)
    }
}

impl PriceConfigProvider for Store {
    fn current_prices(&self) -> Result<PriceConfig> {
        self.tables.current_prices()
    }
}
