//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use neocargo_types::{IssueType, OutputFormat, QuoteChoice};

#[derive(Parser)]
#[command(name = "neocargo")]
#[command(version)]
#[command(about = "Freight quoting and automatic delivery assignment")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load cities, routes, fleet and drivers from a TOML seed file
    Seed {
        /// Path to the seed file. Uses the configured one if omitted.
        file: Option<PathBuf>,
    },

    /// Quote a shipment without creating an order
    Quote {
        /// Origin city ("Santos - SP", "Santos/SP" or "Santos")
        origin: String,

        /// Destination city
        destination: String,

        /// Cargo weight in kg
        weight: f64,

        /// Maximum travel time in hours
        #[arg(long)]
        max_hours: Option<f64>,
    },

    /// Draft a new order
    OrderCreate {
        /// Client name
        client: String,

        /// Origin city
        origin: String,

        /// Destination city
        destination: String,

        /// Cargo weight in kg
        weight: f64,

        /// Delivery deadline in days
        deadline_days: u32,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Compute quote options for a drafted order
    OrderQuote {
        /// Order id
        id: u64,
    },

    /// Record the client's choice among the quoted options
    OrderConfirm {
        /// Order id
        id: u64,

        /// Option to confirm (economical, fast, balanced)
        choice: QuoteChoice,
    },

    /// Approve a pending order
    OrderApprove {
        /// Order id
        id: u64,
    },

    /// Reject a pending order
    OrderReject {
        /// Order id
        id: u64,
    },

    /// Cancel an order still in quoting or pending approval
    OrderCancel {
        /// Order id
        id: u64,
    },

    /// List orders
    Orders,

    /// Assign a vehicle and driver to an approved order
    Assign {
        /// Order id
        order_id: u64,
    },

    /// Put a pending delivery on the road
    Start {
        /// Assignment id
        assignment_id: u64,
    },

    /// Complete an in-progress delivery
    Complete {
        /// Assignment id
        assignment_id: u64,
    },

    /// Cancel a not-yet-completed delivery
    CancelDelivery {
        /// Assignment id
        assignment_id: u64,

        /// Cancellation reason, recorded in the assignment notes
        #[arg(long)]
        reason: Option<String>,
    },

    /// List delivery assignments
    Deliveries,

    /// Report a problem on an active delivery
    IssueReport {
        /// Assignment id
        assignment_id: u64,

        /// Problem category
        #[arg(long = "type", value_enum)]
        issue_type: IssueType,

        /// What happened
        description: String,
    },

    /// Move an open issue under review
    IssueReview {
        /// Issue id
        id: u64,
    },

    /// Resolve an issue
    IssueResolve {
        /// Issue id
        id: u64,

        /// How it was resolved
        resolution: String,
    },

    /// List delivery issues
    Issues,

    /// List the fleet
    Fleet,

    /// List drivers
    Drivers,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set the default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set the default seed file
        #[arg(long)]
        set_seed_file: Option<PathBuf>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
