// Spreadsheet-backed tables: one CSV file per table.

pub mod sheet;

use crate::domain::model::{Payment, Property, PropertyType, Tenant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
pub use sheet::{Sheet, SheetRow};

/// Property as stored: the section list lives in one JSON cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRow {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub sections: String,
    pub created_at: DateTime<Utc>,
}

impl SheetRow for PropertyRow {
    const SHEET: &'static str = "Properties";
    const HEADERS: &'static [&'static str] =
        &["id", "name", "address", "type", "sections", "createdAt"];

    fn id(&self) -> &str {
        &self.id
    }
}

impl TryFrom<&Property> for PropertyRow {
    type Error = serde_json::Error;

    fn try_from(property: &Property) -> Result<Self, Self::Error> {
        Ok(Self {
            id: property.id.clone(),
            name: property.name.clone(),
            address: property.address.clone(),
            property_type: property.property_type,
            sections: serde_json::to_string(&property.sections)?,
            created_at: property.created_at,
        })
    }
}

impl TryFrom<PropertyRow> for Property {
    type Error = serde_json::Error;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        let sections = if row.sections.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&row.sections)?
        };

        Ok(Self {
            id: row.id,
            name: row.name,
            address: row.address,
            property_type: row.property_type,
            sections,
            created_at: row.created_at,
        })
    }
}

impl SheetRow for Tenant {
    const SHEET: &'static str = "Tenants";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "fullName",
        "company",
        "contact",
        "citizenNumber",
        "address",
        "propertyId",
        "section",
        "contractYears",
        "startDateAD",
        "endDateAD",
        "amount",
        "amountType",
        "incrementPercent",
        "incrementInterval",
        "status",
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl SheetRow for Payment {
    const SHEET: &'static str = "Payments";
    const HEADERS: &'static [&'static str] = &[
        "id",
        "tenantId",
        "tenantName",
        "propertyId",
        "propertyName",
        "month",
        "year",
        "baseRent",
        "additionalAmount",
        "deductionAmount",
        "totalAmount",
        "paymentDate",
        "paymentMethod",
        "chequeNumber",
        "chequeBank",
        "depositedBank",
        "additionalNotes",
        "type",
        "createdAt",
    ];

    fn id(&self) -> &str {
        &self.id
    }
}
