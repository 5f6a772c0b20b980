use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[serde(alias = "Whole")]
    Whole,
    #[serde(alias = "Partial")]
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub sections: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountType {
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenantStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub full_name: String,
    pub company: String,
    pub contact: String,
    pub citizen_number: String,
    pub address: String,
    pub property_id: String,
    pub section: Option<String>,
    pub contract_years: u32,
    #[serde(rename = "startDateAD", alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDateAD", alias = "endDate")]
    pub end_date: NaiveDate,
    pub amount: f64,
    pub amount_type: AmountType,
    pub increment_percent: f64,
    pub increment_interval: u32,
    pub status: TenantStatus,
}

impl Tenant {
    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Rent,
    SecurityDeposit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Cheque,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub property_id: String,
    pub property_name: String,
    /// 押金記錄為 0
    pub month: u32,
    pub year: i32,
    pub base_rent: f64,
    pub additional_amount: f64,
    pub deduction_amount: f64,
    pub total_amount: f64,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub cheque_number: String,
    pub cheque_bank: String,
    pub deposited_bank: String,
    pub additional_notes: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_deposit(&self) -> bool {
        self.payment_type == PaymentType::SecurityDeposit
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub sections: Vec<String>,
}

/// 日期與年數先以原始值接收，交給租約計算器驗證
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantInput {
    pub full_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub citizen_number: String,
    #[serde(default)]
    pub address: String,
    pub property_id: String,
    #[serde(default)]
    pub section: Option<String>,
    pub contract_years: i64,
    #[serde(alias = "startDateAD")]
    pub start_date: String,
    pub amount: f64,
    pub amount_type: AmountType,
    /// 表單欄位留空時前端會送出 null
    #[serde(default)]
    pub increment_percent: Option<f64>,
    #[serde(default)]
    pub increment_interval: Option<u32>,
    #[serde(default = "default_status")]
    pub status: TenantStatus,
}

fn default_status() -> TenantStatus {
    TenantStatus::Active
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    pub tenant_id: String,
    #[serde(rename = "type", default = "default_payment_type")]
    pub payment_type: PaymentType,
    #[serde(default, deserialize_with = "number_or_string")]
    pub month: u32,
    #[serde(default, deserialize_with = "number_or_string")]
    pub year: i32,
    #[serde(default)]
    pub base_rent: f64,
    #[serde(default)]
    pub additional_amount: f64,
    #[serde(default)]
    pub deduction_amount: f64,
    /// Deposit amount; rent payments use `base_rent`.
    #[serde(default)]
    pub amount: f64,
    pub payment_date: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub cheque_number: String,
    #[serde(default)]
    pub cheque_bank: String,
    #[serde(default)]
    pub deposited_bank: String,
    #[serde(default, alias = "notes")]
    pub additional_notes: String,
}

fn default_payment_type() -> PaymentType {
    PaymentType::Rent
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    Text(String),
}

/// Accepts `3`, `"3"`, `""` and `null`; the last two mean the default.
fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
    T::Err: Display,
{
    match Option::<NumberOrString<T>>::deserialize(deserializer)? {
        None => Ok(T::default()),
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::Text(text)) if text.trim().is_empty() => Ok(T::default()),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid number '{}': {}", text, e))),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilter {
    pub tenant_id: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub payment_type: Option<PaymentType>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        self.tenant_id
            .as_deref()
            .map_or(true, |id| payment.tenant_id == id)
            && self.month.map_or(true, |m| payment.month == m)
            && self.year.map_or(true, |y| payment.year == y)
            && self.payment_type.map_or(true, |t| payment.payment_type == t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_type_accepts_both_casings() {
        let lower: PropertyType = serde_json::from_value(json!("partial")).unwrap();
        let title: PropertyType = serde_json::from_value(json!("Partial")).unwrap();
        assert_eq!(lower, PropertyType::Partial);
        assert_eq!(title, PropertyType::Partial);
        assert_eq!(serde_json::to_value(PropertyType::Whole).unwrap(), json!("whole"));
    }

    #[test]
    fn test_payment_month_and_year_from_form_strings() {
        let input: PaymentInput = serde_json::from_value(json!({
            "tenantId": "t1",
            "month": "3",
            "year": "2025",
            "baseRent": 25000.0,
            "paymentDate": "2025-03-05",
            "paymentMethod": "Cash",
        }))
        .unwrap();
        assert_eq!((input.month, input.year), (3, 2025));

        let deposit: PaymentInput = serde_json::from_value(json!({
            "tenantId": "t1",
            "type": "security_deposit",
            "month": "",
            "year": null,
            "amount": 5000.0,
            "paymentDate": "2025-03-05",
            "paymentMethod": "Cash",
        }))
        .unwrap();
        assert_eq!((deposit.month, deposit.year), (0, 0));

        let bad = serde_json::from_value::<PaymentInput>(json!({
            "tenantId": "t1",
            "month": "March",
            "year": 2025,
            "paymentDate": "2025-03-05",
            "paymentMethod": "Cash",
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_tenant_input_null_increments() {
        let input: TenantInput = serde_json::from_value(json!({
            "fullName": "Sita",
            "propertyId": "p1",
            "section": null,
            "startDateAD": "2025-01-01",
            "contractYears": 2,
            "amount": 25000.0,
            "amountType": "month",
            "incrementPercent": null,
            "incrementInterval": null,
        }))
        .unwrap();
        assert_eq!(input.start_date, "2025-01-01");
        assert_eq!(input.increment_percent, None);
        assert_eq!(input.increment_interval, None);
        assert_eq!(input.status, TenantStatus::Active);
    }

    #[test]
    fn test_tenant_dates_use_ad_keys() {
        let tenant = Tenant {
            id: "t1".to_string(),
            full_name: "Sita".to_string(),
            company: String::new(),
            contact: String::new(),
            citizen_number: String::new(),
            address: String::new(),
            property_id: "p1".to_string(),
            section: None,
            contract_years: 1,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            amount: 1000.0,
            amount_type: AmountType::Month,
            increment_percent: 0.0,
            increment_interval: 0,
            status: TenantStatus::Active,
        };

        let value = serde_json::to_value(&tenant).unwrap();
        assert_eq!(value["startDateAD"], "2025-01-01");
        assert_eq!(value["endDateAD"], "2025-12-31");
        assert!(value.get("endDate").is_none());

        let mut legacy = value.clone();
        let object = legacy.as_object_mut().unwrap();
        object.remove("startDateAD");
        object.insert("startDate".to_string(), json!("2025-01-01"));
        let restored: Tenant = serde_json::from_value(legacy).unwrap();
        assert_eq!(restored, tenant);
    }
}
