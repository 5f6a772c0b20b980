pub mod dashboard;
pub mod health;
pub mod payments;
pub mod properties;
pub mod tenants;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
