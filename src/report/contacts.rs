use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;

use super::period::{finite_or_zero, ReportDate};

/// Relationship status of a contact, as sent by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactStatus {
    NeverContacted,
    AskInFuture,
    CultivateRelationship,
    ContactForAppointment,
    AppointmentScheduled,
    CallForDecision,
    PartnerFinancial,
    PartnerSpecial,
    PartnerPray,
    NotInterested,
    Unresponsive,
    NeverAsk,
    ResearchAbandoned,
    ExpiredReferral,
    Other(String),
}

impl ContactStatus {
    pub fn as_api_str(&self) -> &str {
        match self {
            ContactStatus::NeverContacted => "NEVER_CONTACTED",
            ContactStatus::AskInFuture => "ASK_IN_FUTURE",
            ContactStatus::CultivateRelationship => "CULTIVATE_RELATIONSHIP",
            ContactStatus::ContactForAppointment => "CONTACT_FOR_APPOINTMENT",
            ContactStatus::AppointmentScheduled => "APPOINTMENT_SCHEDULED",
            ContactStatus::CallForDecision => "CALL_FOR_DECISION",
            ContactStatus::PartnerFinancial => "PARTNER_FINANCIAL",
            ContactStatus::PartnerSpecial => "PARTNER_SPECIAL",
            ContactStatus::PartnerPray => "PARTNER_PRAY",
            ContactStatus::NotInterested => "NOT_INTERESTED",
            ContactStatus::Unresponsive => "UNRESPONSIVE",
            ContactStatus::NeverAsk => "NEVER_ASK",
            ContactStatus::ResearchAbandoned => "RESEARCH_ABANDONED",
            ContactStatus::ExpiredReferral => "EXPIRED_REFERRAL",
            ContactStatus::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> String {
        match self {
            ContactStatus::NeverContacted => "Never Contacted".into(),
            ContactStatus::AskInFuture => "Ask in Future".into(),
            ContactStatus::CultivateRelationship => "Cultivate Relationship".into(),
            ContactStatus::ContactForAppointment => "Contact for Appointment".into(),
            ContactStatus::AppointmentScheduled => "Appointment Scheduled".into(),
            ContactStatus::CallForDecision => "Call for Decision".into(),
            ContactStatus::PartnerFinancial => "Partner - Financial".into(),
            ContactStatus::PartnerSpecial => "Partner - Special".into(),
            ContactStatus::PartnerPray => "Partner - Pray".into(),
            ContactStatus::NotInterested => "Not Interested".into(),
            ContactStatus::Unresponsive => "Unresponsive".into(),
            ContactStatus::NeverAsk => "Never Ask".into(),
            ContactStatus::ResearchAbandoned => "Research Abandoned".into(),
            ContactStatus::ExpiredReferral => "Expired Referral".into(),
            ContactStatus::Other(raw) => raw.clone(),
        }
    }
}

impl From<&str> for ContactStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "NEVER_CONTACTED" => ContactStatus::NeverContacted,
            "ASK_IN_FUTURE" => ContactStatus::AskInFuture,
            "CULTIVATE_RELATIONSHIP" => ContactStatus::CultivateRelationship,
            "CONTACT_FOR_APPOINTMENT" => ContactStatus::ContactForAppointment,
            "APPOINTMENT_SCHEDULED" => ContactStatus::AppointmentScheduled,
            "CALL_FOR_DECISION" => ContactStatus::CallForDecision,
            "PARTNER_FINANCIAL" => ContactStatus::PartnerFinancial,
            "PARTNER_SPECIAL" => ContactStatus::PartnerSpecial,
            "PARTNER_PRAY" => ContactStatus::PartnerPray,
            "NOT_INTERESTED" => ContactStatus::NotInterested,
            "UNRESPONSIVE" => ContactStatus::Unresponsive,
            "NEVER_ASK" => ContactStatus::NeverAsk,
            "RESEARCH_ABANDONED" => ContactStatus::ResearchAbandoned,
            "EXPIRED_REFERRAL" => ContactStatus::ExpiredReferral,
            _ => ContactStatus::Other(value.to_string()),
        }
    }
}

impl From<String> for ContactStatus {
    fn from(value: String) -> Self {
        ContactStatus::from(value.as_str())
    }
}

impl From<ContactStatus> for String {
    fn from(value: ContactStatus) -> Self {
        value.as_api_str().to_string()
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// How often a partner has committed to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PledgeFrequency {
    #[serde(rename = "WEEKLY")]
    Weekly,
    #[serde(rename = "EVERY_2_WEEKS")]
    Every2Weeks,
    #[serde(rename = "MONTHLY")]
    Monthly,
    #[serde(rename = "EVERY_2_MONTHS")]
    Every2Months,
    #[serde(rename = "QUARTERLY")]
    Quarterly,
    #[serde(rename = "EVERY_4_MONTHS")]
    Every4Months,
    #[serde(rename = "EVERY_6_MONTHS")]
    Every6Months,
    #[serde(rename = "ANNUAL")]
    Annual,
    #[serde(rename = "EVERY_2_YEARS")]
    Every2Years,
}

impl PledgeFrequency {
    /// Length of one pledge cycle in months.
    pub fn months(&self) -> f64 {
        match self {
            PledgeFrequency::Weekly => 12.0 / 52.0,
            PledgeFrequency::Every2Weeks => 12.0 / 26.0,
            PledgeFrequency::Monthly => 1.0,
            PledgeFrequency::Every2Months => 2.0,
            PledgeFrequency::Quarterly => 3.0,
            PledgeFrequency::Every4Months => 4.0,
            PledgeFrequency::Every6Months => 6.0,
            PledgeFrequency::Annual => 12.0,
            PledgeFrequency::Every2Years => 24.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PledgeFrequency::Weekly => "Weekly",
            PledgeFrequency::Every2Weeks => "Every 2 Weeks",
            PledgeFrequency::Monthly => "Monthly",
            PledgeFrequency::Every2Months => "Every 2 Months",
            PledgeFrequency::Quarterly => "Quarterly",
            PledgeFrequency::Every4Months => "Every 4 Months",
            PledgeFrequency::Every6Months => "Every 6 Months",
            PledgeFrequency::Annual => "Annual",
            PledgeFrequency::Every2Years => "Every 2 Years",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub month: String,
    #[serde(default)]
    pub total: f64,
}

/// One contact's row in the monthly giving report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReportRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    pub pledge_amount: Option<f64>,
    #[serde(default)]
    pub pledge_currency: Option<CurrencyCode>,
    #[serde(default)]
    pub pledge_frequency: Option<PledgeFrequency>,
    #[serde(default)]
    pub months: Vec<MonthTotal>,
    #[serde(default)]
    pub total: f64,
}

impl ContactReportRow {
    pub fn average(&self) -> f64 {
        if self.months.is_empty() {
            return 0.0;
        }
        self.months
            .iter()
            .map(|month| finite_or_zero(month.total))
            .sum::<f64>()
            / self.months.len() as f64
    }

    pub fn minimum(&self) -> f64 {
        self.months
            .iter()
            .map(|month| finite_or_zero(month.total))
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    pub fn month_total(&self, index: usize) -> f64 {
        self.months
            .get(index)
            .map(|month| finite_or_zero(month.total))
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOrder {
    Name,
    Total,
    Average,
    Minimum,
    Month(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Returns the contacts ordered by `order`. The sort is stable, so ties
/// keep their input order in either direction.
pub fn sort_contacts(
    contacts: &[ContactReportRow],
    order: ContactOrder,
    direction: SortDirection,
) -> Vec<ContactReportRow> {
    let mut sorted = contacts.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_contacts(a, b, order);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

fn compare_contacts(a: &ContactReportRow, b: &ContactReportRow, order: ContactOrder) -> Ordering {
    let numeric = |x: f64, y: f64| x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    match order {
        ContactOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        ContactOrder::Total => numeric(finite_or_zero(a.total), finite_or_zero(b.total)),
        ContactOrder::Average => numeric(a.average(), b.average()),
        ContactOrder::Minimum => numeric(a.minimum(), b.minimum()),
        ContactOrder::Month(index) => numeric(a.month_total(index), b.month_total(index)),
    }
}

/// Sums each month column across contacts. The result is as long as the
/// longest month list; shorter lists contribute nothing past their end.
pub fn calculate_totals(contacts: &[ContactReportRow]) -> Vec<f64> {
    let width = contacts
        .iter()
        .map(|contact| contact.months.len())
        .max()
        .unwrap_or(0);
    let mut totals = vec![0.0; width];
    for contact in contacts {
        for (slot, month) in totals.iter_mut().zip(&contact.months) {
            *slot += finite_or_zero(month.total);
        }
    }
    totals
}

/// A currency group of the monthly giving report, as sent by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyGroup {
    pub currency: CurrencyCode,
    #[serde(default)]
    pub contacts: Vec<ContactReportRow>,
}

/// Ordered contacts of one currency plus their month-by-month totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyTable {
    pub currency: CurrencyCode,
    pub months: Vec<ReportDate>,
    pub ordered_contacts: Vec<ContactReportRow>,
    pub totals: Vec<f64>,
}

impl CurrencyTable {
    pub fn grand_total(&self) -> f64 {
        self.ordered_contacts
            .iter()
            .map(|contact| finite_or_zero(contact.total))
            .sum()
    }
}

pub fn build_currency_tables(
    groups: &[CurrencyGroup],
    order: ContactOrder,
    direction: SortDirection,
) -> Vec<CurrencyTable> {
    groups
        .iter()
        .map(|group| {
            let months = group
                .contacts
                .iter()
                .max_by_key(|contact| contact.months.len())
                .map(|contact| {
                    contact
                        .months
                        .iter()
                        .map(|month| ReportDate::parse(&month.month))
                        .collect()
                })
                .unwrap_or_default();
            let table = CurrencyTable {
                currency: group.currency.clone(),
                months,
                ordered_contacts: sort_contacts(&group.contacts, order, direction),
                totals: calculate_totals(&group.contacts),
            };
            tracing::debug!(
                currency = %table.currency,
                contacts = table.ordered_contacts.len(),
                months = table.totals.len(),
                "built currency table"
            );
            table
        })
        .collect()
}
