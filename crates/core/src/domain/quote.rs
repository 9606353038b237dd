use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::client::ClientId;
use crate::errors::DomainError;
use crate::pricing::PricingInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuoteId(pub u64);

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Billing state of a quote. An invoice is the same record once advanced to `Invoiced`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Invoiced,
}

impl InvoiceStatus {
    /// Accepts `unpaid`/`UNPAID`/`invoiced`/`INVOICED` and any other casing.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Some(Self::Unpaid),
            "invoiced" => Some(Self::Invoiced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Invoiced => "invoiced",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Detailed,
    Summarized,
}

impl DocumentType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "detailed" => Some(Self::Detailed),
            "summarized" => Some(Self::Summarized),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detailed => "detailed",
            Self::Summarized => "summarized",
        }
    }
}

/// Per-guest services billed once for every date they were provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Breakfast,
    Lunch,
    Dinner,
    Laundry,
}

impl ServiceCategory {
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Laundry];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Laundry => "laundry",
        }
    }

    pub fn dates_field(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast_dates",
            Self::Lunch => "lunch_dates",
            Self::Dinner => "dinner_dates",
            Self::Laundry => "laundry_dates",
        }
    }

    pub fn unit_cost_field(&self) -> &'static str {
        match self {
            Self::Breakfast => "unit_breakfast_cost",
            Self::Lunch => "unit_lunch_cost",
            Self::Dinner => "unit_dinner_cost",
            Self::Laundry => "unit_laundry_cost",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type ServiceDates = BTreeSet<NaiveDate>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSchedule {
    #[serde(default)]
    pub breakfast: ServiceDates,
    #[serde(default)]
    pub lunch: ServiceDates,
    #[serde(default)]
    pub dinner: ServiceDates,
    #[serde(default)]
    pub laundry: ServiceDates,
}

impl ServiceSchedule {
    pub fn dates(&self, category: ServiceCategory) -> &ServiceDates {
        match category {
            ServiceCategory::Breakfast => &self.breakfast,
            ServiceCategory::Lunch => &self.lunch,
            ServiceCategory::Dinner => &self.dinner,
            ServiceCategory::Laundry => &self.laundry,
        }
    }

    pub fn dates_mut(&mut self, category: ServiceCategory) -> &mut ServiceDates {
        match category {
            ServiceCategory::Breakfast => &mut self.breakfast,
            ServiceCategory::Lunch => &mut self.lunch,
            ServiceCategory::Dinner => &mut self.dinner,
            ServiceCategory::Laundry => &mut self.laundry,
        }
    }

    pub fn count(&self, category: ServiceCategory) -> usize {
        self.dates(category).len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceCategory, &ServiceDates)> {
        ServiceCategory::ALL.into_iter().map(move |category| (category, self.dates(category)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, dates)| dates.is_empty())
    }

    pub fn clear(&mut self) {
        for category in ServiceCategory::ALL {
            self.dates_mut(category).clear();
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCosts {
    #[serde(default)]
    pub bed: Decimal,
    #[serde(default)]
    pub breakfast: Decimal,
    #[serde(default)]
    pub lunch: Decimal,
    #[serde(default)]
    pub dinner: Decimal,
    #[serde(default)]
    pub laundry: Decimal,
}

impl UnitCosts {
    pub fn for_service(&self, category: ServiceCategory) -> Decimal {
        match category {
            ServiceCategory::Breakfast => self.breakfast,
            ServiceCategory::Lunch => self.lunch,
            ServiceCategory::Dinner => self.dinner,
            ServiceCategory::Laundry => self.laundry,
        }
    }

    pub fn set_service(&mut self, category: ServiceCategory, cost: Decimal) {
        match category {
            ServiceCategory::Breakfast => self.breakfast = cost,
            ServiceCategory::Lunch => self.lunch = cost,
            ServiceCategory::Dinner => self.dinner = cost,
            ServiceCategory::Laundry => self.laundry = cost,
        }
    }
}

/// The user-editable content of a quote. Dates stay optional so that a
/// half-filled form can still be priced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTerms {
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default)]
    pub number_of_beds: u32,
    #[serde(default)]
    pub number_of_guests: u32,
    #[serde(default)]
    pub unit_costs: UnitCosts,
    #[serde(default)]
    pub services: ServiceSchedule,
    #[serde(default)]
    pub discount_percentage: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub guest_details: Option<String>,
    #[serde(default)]
    pub document_type: DocumentType,
}

impl QuoteTerms {
    pub fn pricing_input(&self) -> PricingInput<'_> {
        PricingInput {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
            number_of_beds: self.number_of_beds,
            number_of_guests: self.number_of_guests,
            unit_costs: &self.unit_costs,
            services: &self.services,
            discount_percentage: self.discount_percentage,
            discount_amount: self.discount_amount,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub quote_number: Option<String>,
    pub terms: QuoteTerms,
    pub totals: QuoteTotals,
    pub invoice_status: InvoiceStatus,
}

impl Quote {
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        matches!((self.invoice_status, next), (InvoiceStatus::Unpaid, InvoiceStatus::Invoiced))
    }

    pub fn transition_to(&mut self, next: InvoiceStatus) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            self.invoice_status = next;
            return Ok(());
        }

        Err(DomainError::InvalidInvoiceTransition { from: self.invoice_status, to: next })
    }

    pub fn is_invoiced(&self) -> bool {
        self.invoice_status == InvoiceStatus::Invoiced
    }
}

/// A list-view row: the backend joins the client's name onto each quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub id: QuoteId,
    pub quote_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub number_of_guests: u32,
    pub total: Option<Decimal>,
    pub invoice_status: InvoiceStatus,
}

impl QuoteSummary {
    pub fn client_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim).filter(|last| !last.is_empty()) {
            Some(last) => format!("{} {last}", self.first_name.trim()),
            None => self.first_name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{
        InvoiceStatus, Quote, QuoteId, QuoteSummary, QuoteTerms, QuoteTotals, ServiceCategory,
        ServiceSchedule,
    };

    fn quote(status: InvoiceStatus) -> Quote {
        Quote {
            id: QuoteId(1),
            quote_number: Some("Q-0001".to_string()),
            terms: QuoteTerms::default(),
            totals: QuoteTotals::default(),
            invoice_status: status,
        }
    }

    #[test]
    fn unpaid_quote_can_be_invoiced_once() {
        let mut quote = quote(InvoiceStatus::Unpaid);
        quote.transition_to(InvoiceStatus::Invoiced).expect("unpaid -> invoiced");
        assert!(quote.is_invoiced());

        let error = quote
            .transition_to(InvoiceStatus::Invoiced)
            .expect_err("invoiced -> invoiced should fail");
        assert!(matches!(error, crate::errors::DomainError::InvalidInvoiceTransition { .. }));
    }

    #[test]
    fn invoiced_quote_cannot_return_to_unpaid() {
        let mut quote = quote(InvoiceStatus::Invoiced);
        assert!(!quote.can_transition_to(InvoiceStatus::Unpaid));
        assert!(quote.transition_to(InvoiceStatus::Unpaid).is_err());
        assert_eq!(quote.invoice_status, InvoiceStatus::Invoiced);
    }

    #[test]
    fn invoice_status_parsing_ignores_case() {
        assert_eq!(InvoiceStatus::parse("UNPAID"), Some(InvoiceStatus::Unpaid));
        assert_eq!(InvoiceStatus::parse(" invoiced "), Some(InvoiceStatus::Invoiced));
        assert_eq!(InvoiceStatus::parse("Invoiced"), Some(InvoiceStatus::Invoiced));
        assert_eq!(InvoiceStatus::parse("paid"), None);
    }

    #[test]
    fn service_schedule_deduplicates_and_sorts_dates() {
        let mut schedule = ServiceSchedule::default();
        let dates = schedule.dates_mut(ServiceCategory::Lunch);
        dates.insert(NaiveDate::from_ymd_opt(2025, 1, 3).expect("date"));
        dates.insert(NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"));
        dates.insert(NaiveDate::from_ymd_opt(2025, 1, 3).expect("date"));

        let ordered: Vec<_> = schedule.dates(ServiceCategory::Lunch).iter().copied().collect();
        assert_eq!(
            ordered,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"),
                NaiveDate::from_ymd_opt(2025, 1, 3).expect("date"),
            ]
        );
        assert!(!schedule.is_empty());

        schedule.clear();
        assert!(schedule.is_empty());
    }

    #[test]
    fn summary_client_name_skips_missing_last_name() {
        let mut summary = QuoteSummary {
            id: QuoteId(4),
            quote_number: "Q-0004".to_string(),
            first_name: "Thandi".to_string(),
            last_name: None,
            number_of_guests: 2,
            total: Some(Decimal::new(115_000, 2)),
            invoice_status: InvoiceStatus::Unpaid,
        };
        assert_eq!(summary.client_name(), "Thandi");

        summary.last_name = Some("Mokoena".to_string());
        assert_eq!(summary.client_name(), "Thandi Mokoena");
    }
}
