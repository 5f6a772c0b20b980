pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod store;
pub mod utils;

pub use config::{cli::LocalStorage, TomlConfig};
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::ledger::RentalLedger;
pub use utils::error::{RentalError, Result};
