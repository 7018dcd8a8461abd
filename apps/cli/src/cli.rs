//! Command line definition.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use drivecost_core::{ElectricityType, FuelType, VehicleProfile};

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "drivecost",
    version,
    about = "Vehicle cost of ownership and break-even calculator"
)]
pub struct Cli {
    /// Configuration file path (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage stored vehicle profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },

    /// Check a profile and list every problem found
    Validate(SourceArgs),

    /// Cost breakdown and consumption figures for one profile
    Calculate(SourceArgs),

    /// Compare 2 to 4 profiles side by side
    Compare {
        /// Profile IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Break-even point of an electric vehicle against a combustion one
    BreakEven {
        /// Electric profile ID
        electric: String,

        /// Combustion profile ID
        combustion: String,
    },

    /// Configuration management
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommands {
    /// Create a new profile
    Create {
        /// Profile name
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: ProfileFields,
    },

    /// List all profiles
    List,

    /// Show every field of a profile
    Show {
        /// Profile ID
        id: String,
    },

    /// Change fields of an existing profile
    Update {
        /// Profile ID
        id: String,

        /// New profile name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ProfileFields,
    },

    /// Delete a profile
    Delete {
        /// Profile ID
        id: String,
    },

    /// Store a profile from a JSON document
    Import {
        /// JSON file to read
        file: PathBuf,
    },

    /// Write a profile to a JSON document
    Export {
        /// Profile ID
        id: String,

        /// JSON file to write
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommands {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// A stored profile ID or a JSON document.
#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["id", "file"])))]
pub struct SourceArgs {
    /// Profile ID
    pub id: Option<String>,

    /// Read the profile from a JSON document instead of the store
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Optional field flags shared by `profile create` and `profile update`.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileFields {
    /// Fuel consumption in L/100 km
    #[arg(long)]
    pub fuel_consumption: Option<f64>,

    /// Electric consumption in kWh/100 km
    #[arg(long)]
    pub electric_consumption: Option<f64>,

    /// Fuel price per liter
    #[arg(long)]
    pub fuel_price: Option<f64>,

    /// Electricity price per kWh
    #[arg(long)]
    pub electricity_price: Option<f64>,

    /// Fuel type (Diesel, Ultimate, Super, SuperPlus, Ultimate Diesel)
    #[arg(long)]
    pub fuel_type: Option<FuelType>,

    /// Electricity type (Home socket, Public charging station)
    #[arg(long)]
    pub electricity_type: Option<ElectricityType>,

    /// Tank size in liters
    #[arg(long)]
    pub tank_size: Option<f64>,

    /// Battery size in kWh
    #[arg(long)]
    pub battery_size: Option<f64>,

    /// Kilometers driven per month
    #[arg(long = "monthly-km")]
    pub monthly_kilometers: Option<f64>,

    /// Annual car tax
    #[arg(long = "annual-tax")]
    pub annual_car_tax: Option<f64>,

    /// Annual car insurance
    #[arg(long = "annual-insurance")]
    pub annual_car_insurance: Option<f64>,

    /// Monthly financing rate
    #[arg(long)]
    pub financing_rate: Option<f64>,

    /// Financing period in months
    #[arg(long)]
    pub financing_period: Option<i32>,

    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<f64>,

    /// Expected years of ownership
    #[arg(long = "years")]
    pub expected_years_of_ownership: Option<i32>,
}

impl ProfileFields {
    /// Copies every given flag onto `profile`.
    pub fn apply(&self, profile: &mut VehicleProfile) {
        fn set<T: Copy>(target: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *target = v;
            }
        }

        set(&mut profile.fuel_consumption, self.fuel_consumption);
        set(&mut profile.electric_consumption, self.electric_consumption);
        set(&mut profile.fuel_price, self.fuel_price);
        set(&mut profile.electricity_price, self.electricity_price);
        set(&mut profile.tank_size, self.tank_size);
        set(&mut profile.battery_size, self.battery_size);
        set(&mut profile.monthly_kilometers, self.monthly_kilometers);
        set(&mut profile.annual_car_tax, self.annual_car_tax);
        set(&mut profile.annual_car_insurance, self.annual_car_insurance);
        set(&mut profile.financing_rate, self.financing_rate);
        set(&mut profile.financing_period, self.financing_period);
        set(&mut profile.purchase_price, self.purchase_price);
        set(
            &mut profile.expected_years_of_ownership,
            self.expected_years_of_ownership,
        );

        if self.fuel_type.is_some() {
            profile.fuel_type = self.fuel_type;
        }
        if self.electricity_type.is_some() {
            profile.electricity_type = self.electricity_type;
        }
    }
}
