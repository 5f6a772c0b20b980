pub mod dashboard;
pub mod lease;
pub mod ledger;
pub mod renewals;

pub use crate::domain::model::{Payment, Property, Tenant};
pub use crate::domain::ports::{Clock, ConfigProvider, Storage};
pub use crate::utils::error::Result;
