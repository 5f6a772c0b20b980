use crate::core::lease::{compute_remaining, RemainingTerm};
use crate::domain::model::{Property, Tenant};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Renewal {
    #[serde(flatten)]
    pub tenant: Tenant,
    pub property_name: String,
    pub end_date_formatted: String,
    pub time_remaining: RemainingTerm,
}

/// Leases that end after `today`, soonest first.
///
/// `within_days` further limits the list to leases ending in that many days.
pub fn upcoming_renewals(
    tenants: Vec<Tenant>,
    properties: &[Property],
    today: NaiveDate,
    within_days: Option<i64>,
) -> Vec<Renewal> {
    let names: HashMap<&str, &str> = properties
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let mut renewals: Vec<Renewal> = tenants
        .into_iter()
        .filter_map(|tenant| {
            let time_remaining = compute_remaining(tenant.end_date, today);
            if time_remaining.has_ended() {
                return None;
            }
            if within_days.is_some_and(|limit| time_remaining.total_days > limit) {
                return None;
            }

            let property_name = names
                .get(tenant.property_id.as_str())
                .map_or_else(|| "N/A".to_string(), |name| name.to_string());

            Some(Renewal {
                property_name,
                end_date_formatted: tenant.end_date.format("%Y-%m-%d").to_string(),
                time_remaining,
                tenant,
            })
        })
        .collect();

    // 穩定排序：同一天到期者維持原順序
    renewals.sort_by_key(|r| r.time_remaining.total_days);
    renewals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AmountType, PropertyType, TenantStatus};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tenant(id: &str, property_id: &str, end_date: NaiveDate) -> Tenant {
        Tenant {
            id: id.to_string(),
            full_name: format!("Tenant {}", id),
            company: String::new(),
            contact: String::new(),
            citizen_number: String::new(),
            address: String::new(),
            property_id: property_id.to_string(),
            section: None,
            contract_years: 1,
            start_date: date(2024, 1, 1),
            end_date,
            amount: 1000.0,
            amount_type: AmountType::Month,
            increment_percent: 0.0,
            increment_interval: 0,
            status: TenantStatus::Active,
        }
    }

    fn property(id: &str, name: &str) -> Property {
        Property {
            id: id.to_string(),
            name: name.to_string(),
            address: String::new(),
            property_type: PropertyType::Whole,
            sections: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_future_leases_sorted_soonest_first() {
        let today = date(2025, 1, 1);
        let tenants = vec![
            tenant("late", "p1", date(2026, 6, 30)),
            tenant("ended", "p1", date(2024, 12, 31)),
            tenant("today", "p1", date(2025, 1, 1)),
            tenant("soon", "p2", date(2025, 2, 1)),
            tenant("tie-a", "p1", date(2025, 3, 1)),
            tenant("tie-b", "missing", date(2025, 3, 1)),
        ];
        let properties = vec![property("p1", "Lakeside"), property("p2", "Hilltop")];

        let renewals = upcoming_renewals(tenants, &properties, today, None);
        let ids: Vec<&str> = renewals.iter().map(|r| r.tenant.id.as_str()).collect();

        assert_eq!(ids, vec!["soon", "tie-a", "tie-b", "late"]);
        assert!(renewals.iter().all(|r| r.time_remaining.total_days > 0));
        assert_eq!(renewals[0].property_name, "Hilltop");
        assert_eq!(renewals[0].time_remaining.total_days, 31);
        assert_eq!(renewals[2].property_name, "N/A");
        assert_eq!(renewals[3].end_date_formatted, "2026-06-30");
    }

    #[test]
    fn test_within_days_limit() {
        let today = date(2025, 1, 1);
        let tenants = vec![
            tenant("a", "p1", date(2025, 1, 31)),
            tenant("b", "p1", date(2025, 3, 1)),
        ];

        let renewals = upcoming_renewals(tenants, &[], today, Some(30));
        assert_eq!(renewals.len(), 1);
        assert_eq!(renewals[0].tenant.id, "a");
    }

    #[test]
    fn test_renewal_serializes_flat_tenant_fields() {
        let renewals = upcoming_renewals(
            vec![tenant("a", "p1", date(2025, 3, 15))],
            &[property("p1", "Lakeside")],
            date(2025, 1, 1),
            None,
        );
        let json = serde_json::to_value(&renewals[0]).unwrap();

        assert_eq!(json["fullName"], "Tenant a");
        assert_eq!(json["propertyName"], "Lakeside");
        assert_eq!(json["timeRemaining"]["months"], 2);
        assert_eq!(json["timeRemaining"]["days"], 14);
        assert_eq!(json["timeRemaining"]["totalDays"], 73);
    }
}
