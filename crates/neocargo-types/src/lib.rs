//! Core types for the neocargo freight brokering engine

mod error;

pub use error::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for CLI results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Fuel types a vehicle can run on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Diesel,
    Gasoline,
    Alcohol,
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FuelType::Diesel => write!(f, "diesel"),
            FuelType::Gasoline => write!(f, "gasoline"),
            FuelType::Alcohol => write!(f, "alcohol"),
        }
    }
}

/// Vehicle type tags with predefined technical specifications
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Flatbed,
    Van,
    Car,
    Motorcycle,
}

impl VehicleType {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Flatbed => "Flatbed",
            VehicleType::Van => "Van",
            VehicleType::Car => "Car",
            VehicleType::Motorcycle => "Motorcycle",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Driver license classes, ordered from lowest to highest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LicenseClass {
    B,
    C,
    D,
    E,
}

impl std::fmt::Display for LicenseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseClass::B => write!(f, "B"),
            LicenseClass::C => write!(f, "C"),
            LicenseClass::D => write!(f, "D"),
            LicenseClass::E => write!(f, "E"),
        }
    }
}

/// Order lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Quote being drafted; no options computed yet
    Quote,
    /// Quoted and awaiting staff approval
    Pending,
    Approved,
    Rejected,
    Cancelled,
    InTransit,
    Completed,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Quote => "quote",
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::InTransit => "in transit",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Assignment lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::InProgress => "in progress",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The three distinguished quote options offered to a client
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteChoice {
    Economical,
    Fast,
    Balanced,
}

impl std::fmt::Display for QuoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteChoice::Economical => write!(f, "economical"),
            QuoteChoice::Fast => write!(f, "fast"),
            QuoteChoice::Balanced => write!(f, "balanced"),
        }
    }
}

/// Problem categories a driver can report on a delivery
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Route,
    Cargo,
    Vehicle,
    Accident,
    Other,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::Route => write!(f, "route"),
            IssueType::Cargo => write!(f, "cargo"),
            IssueType::Vehicle => write!(f, "vehicle"),
            IssueType::Accident => write!(f, "accident"),
            IssueType::Other => write!(f, "other"),
        }
    }
}

/// Delivery issue status, transitioned forward only
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    UnderReview,
    Resolved,
}

impl IssueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::UnderReview => "under review",
            IssueStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
