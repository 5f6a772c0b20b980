use crate::core::dashboard::{self, Dashboard, MonthlyRevenue};
use crate::core::lease::{parse_date, LeaseTerm};
use crate::core::renewals::{self, Renewal};
use crate::domain::model::{
    Payment, PaymentFilter, PaymentInput, PaymentMethod, PaymentType, Property, PropertyInput,
    PropertyType, Tenant, TenantInput,
};
use crate::domain::ports::{Clock, ConfigProvider, Storage};
use crate::store::{PropertyRow, Sheet};
use crate::utils::error::{RentalError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative};
use chrono::{NaiveDate, Utc};

/// CRUD over the properties, tenants and payments sheets.
///
/// Lock order when more than one sheet is touched: properties, tenants,
/// payments. Lookups of a referenced row release their lock before the
/// owning sheet is locked.
pub struct RentalLedger<S: Storage, C: Clock> {
    storage: S,
    clock: C,
    properties: Sheet<PropertyRow>,
    tenants: Sheet<Tenant>,
    payments: Sheet<Payment>,
    recent_limit: usize,
}

impl<S: Storage, C: Clock> RentalLedger<S, C> {
    pub fn new<P: ConfigProvider>(storage: S, clock: C, config: &P) -> Self {
        Self {
            storage,
            clock,
            properties: Sheet::new(config.properties_file()),
            tenants: Sheet::new(config.tenants_file()),
            payments: Sheet::new(config.payments_file()),
            recent_limit: config.recent_limit(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// 確保三個表格檔案都存在
    pub async fn init(&self) -> Result<()> {
        self.properties.all(&self.storage).await?;
        self.tenants.all(&self.storage).await?;
        self.payments.all(&self.storage).await?;
        tracing::info!(
            "📊 Sheets ready: {}, {}, {}",
            self.properties.file_name(),
            self.tenants.file_name(),
            self.payments.file_name()
        );
        Ok(())
    }

    // ---- properties ----

    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        self.properties
            .all(&self.storage)
            .await?
            .into_iter()
            .map(|row| Property::try_from(row).map_err(RentalError::from))
            .collect()
    }

    pub async fn count_properties(&self) -> Result<usize> {
        Ok(self.properties.all(&self.storage).await?.len())
    }

    pub async fn get_property(&self, id: &str) -> Result<Property> {
        let row = self
            .properties
            .find(&self.storage, id)
            .await?
            .ok_or_else(|| RentalError::not_found("Property", id))?;
        Ok(Property::try_from(row)?)
    }

    pub async fn add_property(&self, input: PropertyInput) -> Result<Property> {
        validate_property(&input)?;

        let property = Property {
            id: new_id(),
            name: input.name.trim().to_string(),
            address: input.address,
            property_type: input.property_type,
            sections: input.sections,
            created_at: Utc::now(),
        };
        let row = PropertyRow::try_from(&property)?;

        let _guard = self.properties.lock().await;
        let mut rows = self.properties.load(&self.storage).await?;
        rows.push(row);
        self.properties.save(&self.storage, &rows).await?;

        tracing::info!("🏠 Added property {} ({})", property.name, property.id);
        Ok(property)
    }

    pub async fn update_property(&self, id: &str, input: PropertyInput) -> Result<Property> {
        validate_property(&input)?;

        let _guard = self.properties.lock().await;
        let mut rows = self.properties.load(&self.storage).await?;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| RentalError::not_found("Property", id))?;

        let mut property = Property::try_from(row.clone())?;
        property.name = input.name.trim().to_string();
        property.address = input.address;
        property.property_type = input.property_type;
        property.sections = input.sections;
        *row = PropertyRow::try_from(&property)?;

        self.properties.save(&self.storage, &rows).await?;
        tracing::info!("🏠 Updated property {}", id);
        Ok(property)
    }

    pub async fn delete_property(&self, id: &str) -> Result<()> {
        let _guard = self.properties.lock().await;
        let mut rows = self.properties.load(&self.storage).await?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(RentalError::not_found("Property", id));
        }

        self.properties.save(&self.storage, &rows).await?;
        tracing::info!("🗑️ Deleted property {}", id);
        Ok(())
    }

    // ---- tenants ----

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>> {
        self.tenants.all(&self.storage).await
    }

    pub async fn count_active_tenants(&self) -> Result<usize> {
        Ok(self
            .list_tenants()
            .await?
            .iter()
            .filter(|t| t.is_active())
            .count())
    }

    pub async fn get_tenant(&self, id: &str) -> Result<Tenant> {
        self.tenants
            .find(&self.storage, id)
            .await?
            .ok_or_else(|| RentalError::not_found("Tenant", id))
    }

    pub async fn add_tenant(&self, input: TenantInput) -> Result<Tenant> {
        let tenant = self.build_tenant(new_id(), input).await?;

        let _guard = self.tenants.lock().await;
        let mut rows = self.tenants.load(&self.storage).await?;
        rows.push(tenant.clone());
        self.tenants.save(&self.storage, &rows).await?;

        tracing::info!(
            "👤 Added tenant {} ({}), lease {} → {}",
            tenant.full_name,
            tenant.id,
            tenant.start_date,
            tenant.end_date
        );
        Ok(tenant)
    }

    /// Replaces the tenant's fields and derives the end date again.
    pub async fn update_tenant(&self, id: &str, input: TenantInput) -> Result<Tenant> {
        let tenant = self.build_tenant(id.to_string(), input).await?;

        let _guard = self.tenants.lock().await;
        let mut rows = self.tenants.load(&self.storage).await?;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| RentalError::not_found("Tenant", id))?;
        *row = tenant.clone();

        self.tenants.save(&self.storage, &rows).await?;
        tracing::info!("👤 Updated tenant {}, lease now ends {}", id, tenant.end_date);
        Ok(tenant)
    }

    pub async fn delete_tenant(&self, id: &str) -> Result<()> {
        let _guard = self.tenants.lock().await;
        let mut rows = self.tenants.load(&self.storage).await?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(RentalError::not_found("Tenant", id));
        }

        self.tenants.save(&self.storage, &rows).await?;
        tracing::info!("🗑️ Deleted tenant {}", id);
        Ok(())
    }

    async fn build_tenant(&self, id: String, input: TenantInput) -> Result<Tenant> {
        validate_non_empty_string("fullName", &input.full_name)?;
        validate_non_negative("amount", input.amount)?;
        let increment_percent = input.increment_percent.unwrap_or_default();
        validate_non_negative("incrementPercent", increment_percent)?;

        let term = LeaseTerm::parse(&input.start_date, input.contract_years)?;
        let end_date = term.end_date()?;

        let property = referenced(self.get_property(&input.property_id).await)?;
        let section = input
            .section
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if let Some(section) = &section {
            if property.property_type == PropertyType::Partial
                && !property.sections.is_empty()
                && !property.sections.contains(section)
            {
                return Err(RentalError::validation(format!(
                    "Section '{}' does not exist in property '{}'",
                    section, property.name
                )));
            }
        }

        Ok(Tenant {
            id,
            full_name: input.full_name.trim().to_string(),
            company: input.company,
            contact: input.contact,
            citizen_number: input.citizen_number,
            address: input.address,
            property_id: input.property_id,
            section,
            contract_years: term.duration_years,
            start_date: term.start_date,
            end_date,
            amount: input.amount,
            amount_type: input.amount_type,
            increment_percent,
            increment_interval: input.increment_interval.unwrap_or_default(),
            status: input.status,
        })
    }

    pub async fn renewals(&self, within_days: Option<i64>) -> Result<Vec<Renewal>> {
        let properties = self.list_properties().await?;
        let tenants = self.list_tenants().await?;
        Ok(renewals::upcoming_renewals(
            tenants,
            &properties,
            self.today(),
            within_days,
        ))
    }

    // ---- payments ----

    pub async fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>> {
        Ok(self
            .payments
            .all(&self.storage)
            .await?
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect())
    }

    pub async fn get_payment(&self, id: &str) -> Result<Payment> {
        self.payments
            .find(&self.storage, id)
            .await?
            .ok_or_else(|| RentalError::not_found("Payment", id))
    }

    pub async fn record_payment(&self, input: PaymentInput) -> Result<Payment> {
        let payment_date = parse_date(&input.payment_date)?;
        if input.payment_method == PaymentMethod::Cheque && input.cheque_number.trim().is_empty() {
            return Err(RentalError::validation(
                "chequeNumber is required for cheque payments",
            ));
        }

        let tenant = referenced(self.get_tenant(&input.tenant_id).await)?;

        let payment = match input.payment_type {
            PaymentType::SecurityDeposit => {
                validate_non_negative("amount", input.amount)?;
                // 押金的物件名稱查不到時不視為錯誤
                let property_name = match self.get_property(&tenant.property_id).await {
                    Ok(property) => property.name,
                    Err(RentalError::NotFound { .. }) => "N/A".to_string(),
                    Err(e) => return Err(e),
                };

                Payment {
                    id: new_id(),
                    tenant_id: tenant.id,
                    tenant_name: tenant.full_name,
                    property_id: tenant.property_id,
                    property_name,
                    month: 0,
                    year: 0,
                    base_rent: input.amount,
                    additional_amount: 0.0,
                    deduction_amount: 0.0,
                    total_amount: input.amount,
                    payment_date,
                    payment_method: input.payment_method,
                    cheque_number: input.cheque_number,
                    cheque_bank: input.cheque_bank,
                    deposited_bank: input.deposited_bank,
                    additional_notes: input.additional_notes,
                    payment_type: PaymentType::SecurityDeposit,
                    created_at: Utc::now(),
                }
            }
            PaymentType::Rent => {
                if !(1..=12).contains(&input.month) {
                    return Err(RentalError::validation(format!(
                        "month must be between 1 and 12, got {}",
                        input.month
                    )));
                }
                if input.year < 1 {
                    return Err(RentalError::validation(format!(
                        "year must be positive, got {}",
                        input.year
                    )));
                }
                validate_non_negative("baseRent", input.base_rent)?;
                validate_non_negative("additionalAmount", input.additional_amount)?;
                validate_non_negative("deductionAmount", input.deduction_amount)?;

                let total_amount = input.base_rent + input.additional_amount - input.deduction_amount;
                if total_amount < 0.0 {
                    return Err(RentalError::validation(
                        "deductionAmount cannot exceed baseRent plus additionalAmount",
                    ));
                }

                let property = referenced(self.get_property(&tenant.property_id).await)?;

                Payment {
                    id: new_id(),
                    tenant_id: tenant.id,
                    tenant_name: tenant.full_name,
                    property_id: tenant.property_id,
                    property_name: property.name,
                    month: input.month,
                    year: input.year,
                    base_rent: input.base_rent,
                    additional_amount: input.additional_amount,
                    deduction_amount: input.deduction_amount,
                    total_amount,
                    payment_date,
                    payment_method: input.payment_method,
                    cheque_number: input.cheque_number,
                    cheque_bank: input.cheque_bank,
                    deposited_bank: input.deposited_bank,
                    additional_notes: input.additional_notes,
                    payment_type: PaymentType::Rent,
                    created_at: Utc::now(),
                }
            }
        };

        let _guard = self.payments.lock().await;
        let mut rows = self.payments.load(&self.storage).await?;
        rows.push(payment.clone());
        self.payments.save(&self.storage, &rows).await?;

        tracing::info!(
            "💰 Recorded {:?} payment {} of {:.2} for tenant {}",
            payment.payment_type,
            payment.id,
            payment.total_amount,
            payment.tenant_id
        );
        Ok(payment)
    }

    pub async fn delete_payment(&self, id: &str) -> Result<()> {
        let _guard = self.payments.lock().await;
        let mut rows = self.payments.load(&self.storage).await?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(RentalError::not_found("Payment", id));
        }

        self.payments.save(&self.storage, &rows).await?;
        tracing::info!("🗑️ Deleted payment {}", id);
        Ok(())
    }

    pub async fn recent_payments(&self, limit: Option<usize>) -> Result<Vec<Payment>> {
        let payments = self.payments.all(&self.storage).await?;
        Ok(dashboard::recent_payments(
            payments,
            limit.unwrap_or(self.recent_limit),
        ))
    }

    pub async fn monthly_revenue(&self) -> Result<MonthlyRevenue> {
        let payments = self.payments.all(&self.storage).await?;
        Ok(dashboard::monthly_revenue(&payments, self.today()))
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        let properties = self.list_properties().await?;
        let tenants = self.list_tenants().await?;
        let payments = self.payments.all(&self.storage).await?;

        Ok(dashboard::summarize(
            properties,
            tenants,
            payments,
            self.today(),
            self.recent_limit,
        ))
    }
}

fn validate_property(input: &PropertyInput) -> Result<()> {
    validate_non_empty_string("name", &input.name)?;
    if input.property_type == PropertyType::Partial && input.sections.is_empty() {
        return Err(RentalError::validation(
            "A partial property needs at least one section",
        ));
    }
    Ok(())
}

/// A missing row referenced from a request body is a bad request, not a 404.
fn referenced<T>(result: Result<T>) -> Result<T> {
    result.map_err(|e| match e {
        RentalError::NotFound { entity, id } => {
            RentalError::validation(format!("{} not found: {}", entity, id))
        }
        other => other,
    })
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AmountType, TenantStatus};
    use crate::domain::ports::FixedClock;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                RentalError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn data_dir(&self) -> &str {
            "unused"
        }

        fn properties_file(&self) -> &str {
            "properties.csv"
        }

        fn tenants_file(&self) -> &str {
            "tenants.csv"
        }

        fn payments_file(&self) -> &str {
            "payments.csv"
        }

        fn recent_limit(&self) -> usize {
            5
        }
    }

    fn ledger(today: (i32, u32, u32)) -> (RentalLedger<MockStorage, FixedClock>, MockStorage) {
        let storage = MockStorage::default();
        let clock = FixedClock(NaiveDate::from_ymd_opt(today.0, today.1, today.2).unwrap());
        (RentalLedger::new(storage.clone(), clock, &MockConfig), storage)
    }

    fn property_input(name: &str) -> PropertyInput {
        PropertyInput {
            name: name.to_string(),
            address: "New Road, Kathmandu".to_string(),
            property_type: PropertyType::Partial,
            sections: vec!["Ground floor".to_string(), "First floor".to_string()],
        }
    }

    fn tenant_input(property_id: &str, start_date: &str, years: i64) -> TenantInput {
        TenantInput {
            full_name: "Hari Thapa".to_string(),
            company: "Thapa Traders".to_string(),
            contact: "9841000000".to_string(),
            citizen_number: "27-01-123".to_string(),
            address: "Lalitpur".to_string(),
            property_id: property_id.to_string(),
            section: Some("Ground floor".to_string()),
            contract_years: years,
            start_date: start_date.to_string(),
            amount: 30_000.0,
            amount_type: AmountType::Month,
            increment_percent: Some(10.0),
            increment_interval: Some(2),
            status: TenantStatus::Active,
        }
    }

    fn rent_input(tenant_id: &str, month: u32, date: &str) -> PaymentInput {
        PaymentInput {
            tenant_id: tenant_id.to_string(),
            payment_type: PaymentType::Rent,
            month,
            year: 2025,
            base_rent: 30_000.0,
            additional_amount: 1_500.0,
            deduction_amount: 500.0,
            amount: 0.0,
            payment_date: date.to_string(),
            payment_method: PaymentMethod::Cash,
            cheque_number: String::new(),
            cheque_bank: String::new(),
            deposited_bank: String::new(),
            additional_notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_init_creates_sheets_with_headers() {
        let (ledger, storage) = ledger((2025, 1, 1));
        ledger.init().await.unwrap();
        assert_eq!(ledger.tenants.file_name(), "tenants.csv");

        let tenants = storage.get_file("tenants.csv").await.unwrap();
        let header = String::from_utf8(tenants).unwrap();
        assert!(header.starts_with("id,fullName,company"));
        assert!(storage.get_file("properties.csv").await.is_some());
        assert!(storage.get_file("payments.csv").await.is_some());
    }

    #[tokio::test]
    async fn test_property_crud() {
        let (ledger, _) = ledger((2025, 1, 1));

        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();
        assert_eq!(ledger.count_properties().await.unwrap(), 1);

        let mut update = property_input("Lakeside Annex");
        update.property_type = PropertyType::Whole;
        update.sections = vec![];
        let updated = ledger.update_property(&property.id, update).await.unwrap();
        assert_eq!(updated.name, "Lakeside Annex");
        assert_eq!(updated.created_at, property.created_at);

        let fetched = ledger.get_property(&property.id).await.unwrap();
        assert_eq!(fetched.property_type, PropertyType::Whole);

        ledger.delete_property(&property.id).await.unwrap();
        assert!(matches!(
            ledger.get_property(&property.id).await,
            Err(RentalError::NotFound { .. })
        ));
        assert!(matches!(
            ledger.delete_property(&property.id).await,
            Err(RentalError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_partial_property_requires_sections() {
        let (ledger, _) = ledger((2025, 1, 1));
        let mut input = property_input("Empty");
        input.sections.clear();
        assert!(matches!(
            ledger.add_property(input).await,
            Err(RentalError::ValidationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_tenant_derives_end_date() {
        let (ledger, _) = ledger((2025, 1, 1));
        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();

        let tenant = ledger
            .add_tenant(tenant_input(&property.id, "2024-02-29", 1))
            .await
            .unwrap();
        assert_eq!(tenant.end_date, NaiveDate::from_ymd_opt(2025, 2, 27).unwrap());

        let stored = ledger.get_tenant(&tenant.id).await.unwrap();
        assert_eq!(stored, tenant);
        assert_eq!(ledger.count_active_tenants().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_tenant_recomputes_end_date() {
        let (ledger, _) = ledger((2025, 1, 1));
        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();
        let tenant = ledger
            .add_tenant(tenant_input(&property.id, "2023-01-01", 1))
            .await
            .unwrap();

        let mut input = tenant_input(&property.id, "2023-01-01", 2);
        input.status = TenantStatus::Inactive;
        let updated = ledger.update_tenant(&tenant.id, input).await.unwrap();

        assert_eq!(updated.id, tenant.id);
        assert_eq!(updated.end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(ledger.count_active_tenants().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_tenant_input_errors() {
        let (ledger, _) = ledger((2025, 1, 1));
        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();

        let result = ledger.add_tenant(tenant_input(&property.id, "2025-01-01", 0)).await;
        assert!(matches!(result, Err(RentalError::InvalidDuration { years: 0 })));

        let result = ledger.add_tenant(tenant_input(&property.id, "01/01/2025", 1)).await;
        assert!(matches!(result, Err(RentalError::InvalidDate { .. })));

        let result = ledger.add_tenant(tenant_input("nope", "2025-01-01", 1)).await;
        assert!(matches!(result, Err(RentalError::ValidationError { .. })));

        let mut input = tenant_input(&property.id, "2025-01-01", 1);
        input.section = Some("Rooftop".to_string());
        assert!(matches!(
            ledger.add_tenant(input).await,
            Err(RentalError::ValidationError { .. })
        ));

        assert!(ledger.list_tenants().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_rent_and_deposit() {
        let (ledger, _) = ledger((2025, 3, 20));
        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();
        let tenant = ledger
            .add_tenant(tenant_input(&property.id, "2025-01-01", 2))
            .await
            .unwrap();

        let rent = ledger
            .record_payment(rent_input(&tenant.id, 3, "2025-03-05"))
            .await
            .unwrap();
        assert_eq!(rent.total_amount, 31_000.0);
        assert_eq!(rent.property_name, "Lakeside");
        assert_eq!(rent.tenant_name, "Hari Thapa");

        let mut deposit = rent_input(&tenant.id, 0, "2025-01-01");
        deposit.payment_type = PaymentType::SecurityDeposit;
        deposit.amount = 60_000.0;
        deposit.payment_method = PaymentMethod::Cheque;
        deposit.cheque_number = "000123".to_string();
        let deposit = ledger.record_payment(deposit).await.unwrap();
        assert_eq!((deposit.month, deposit.year), (0, 0));
        assert_eq!(deposit.total_amount, 60_000.0);

        let filter = PaymentFilter {
            payment_type: Some(PaymentType::SecurityDeposit),
            ..PaymentFilter::default()
        };
        assert_eq!(ledger.list_payments(&filter).await.unwrap().len(), 1);

        let revenue = ledger.monthly_revenue().await.unwrap();
        assert_eq!(revenue.total, 31_000.0);

        let recent = ledger.recent_payments(None).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, rent.id);

        ledger.delete_payment(&rent.id).await.unwrap();
        assert!(matches!(
            ledger.get_payment(&rent.id).await,
            Err(RentalError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_payment_validation() {
        let (ledger, _) = ledger((2025, 3, 20));
        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();
        let tenant = ledger
            .add_tenant(tenant_input(&property.id, "2025-01-01", 2))
            .await
            .unwrap();

        let result = ledger.record_payment(rent_input(&tenant.id, 13, "2025-03-05")).await;
        assert!(matches!(result, Err(RentalError::ValidationError { .. })));

        let mut cheque = rent_input(&tenant.id, 3, "2025-03-05");
        cheque.payment_method = PaymentMethod::Cheque;
        assert!(matches!(
            ledger.record_payment(cheque).await,
            Err(RentalError::ValidationError { .. })
        ));

        let mut over = rent_input(&tenant.id, 3, "2025-03-05");
        over.deduction_amount = 50_000.0;
        assert!(matches!(
            ledger.record_payment(over).await,
            Err(RentalError::ValidationError { .. })
        ));

        let result = ledger.record_payment(rent_input("ghost", 3, "2025-03-05")).await;
        assert!(matches!(result, Err(RentalError::ValidationError { .. })));

        let result = ledger.record_payment(rent_input(&tenant.id, 3, "March 5")).await;
        assert!(matches!(result, Err(RentalError::InvalidDate { .. })));
    }

    #[tokio::test]
    async fn test_deposit_falls_back_when_property_is_gone() {
        let (ledger, _) = ledger((2025, 3, 20));
        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();
        let tenant = ledger
            .add_tenant(tenant_input(&property.id, "2025-01-01", 2))
            .await
            .unwrap();
        ledger.delete_property(&property.id).await.unwrap();

        let mut deposit = rent_input(&tenant.id, 0, "2025-01-01");
        deposit.payment_type = PaymentType::SecurityDeposit;
        deposit.amount = 10_000.0;
        let deposit = ledger.record_payment(deposit).await.unwrap();
        assert_eq!(deposit.property_name, "N/A");
    }

    #[tokio::test]
    async fn test_renewals_and_dashboard() {
        let (ledger, _) = ledger((2025, 1, 1));
        let property = ledger.add_property(property_input("Lakeside")).await.unwrap();

        let ended = ledger
            .add_tenant(tenant_input(&property.id, "2023-01-01", 1))
            .await
            .unwrap();
        let long = ledger
            .add_tenant(tenant_input(&property.id, "2024-06-01", 3))
            .await
            .unwrap();
        let short = ledger
            .add_tenant(tenant_input(&property.id, "2024-03-16", 1))
            .await
            .unwrap();

        let renewals = ledger.renewals(None).await.unwrap();
        let ids: Vec<&str> = renewals.iter().map(|r| r.tenant.id.as_str()).collect();
        assert_eq!(ids, vec![short.id.as_str(), long.id.as_str()]);
        assert!(!ids.contains(&ended.id.as_str()));
        assert_eq!(renewals[0].time_remaining.total_days, 73);

        let dashboard = ledger.dashboard().await.unwrap();
        assert_eq!(dashboard.property_count, 1);
        assert_eq!(dashboard.active_tenant_count, 3);
        assert_eq!(dashboard.upcoming_renewals.len(), 2);
    }
}
