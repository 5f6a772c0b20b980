use crate::core::renewals::{upcoming_renewals, Renewal};
use crate::domain::model::{Payment, Property, Tenant};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub generated_on: NaiveDate,
    pub property_count: usize,
    pub active_tenant_count: usize,
    pub monthly_revenue: MonthlyRevenue,
    pub recent_payments: Vec<Payment>,
    pub upcoming_renewals: Vec<Renewal>,
}

/// Rent collected with a payment date inside the calendar month of `today`.
pub fn monthly_revenue(payments: &[Payment], today: NaiveDate) -> MonthlyRevenue {
    let total = payments
        .iter()
        .filter(|p| !p.is_deposit())
        .filter(|p| p.payment_date.year() == today.year() && p.payment_date.month() == today.month())
        .map(|p| p.total_amount)
        .sum();

    MonthlyRevenue {
        year: today.year(),
        month: today.month(),
        total,
    }
}

/// Newest rent payments first; deposits are left out.
pub fn recent_payments(payments: Vec<Payment>, limit: usize) -> Vec<Payment> {
    let mut rent: Vec<Payment> = payments.into_iter().filter(|p| !p.is_deposit()).collect();
    rent.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    rent.truncate(limit);
    rent
}

pub fn summarize(
    properties: Vec<Property>,
    tenants: Vec<Tenant>,
    payments: Vec<Payment>,
    today: NaiveDate,
    recent_limit: usize,
) -> Dashboard {
    let active_tenant_count = tenants.iter().filter(|t| t.is_active()).count();
    let revenue = monthly_revenue(&payments, today);

    Dashboard {
        generated_on: today,
        property_count: properties.len(),
        active_tenant_count,
        monthly_revenue: revenue,
        recent_payments: recent_payments(payments, recent_limit),
        upcoming_renewals: upcoming_renewals(tenants, &properties, today, None),
    }
}
