//! Edit-session state for a quote form.
//!
//! A [`QuoteDraft`] is never mutated in place. Every edit consumes the
//! current draft and returns the next one with totals already re-derived,
//! so callers can recompute on each keystroke without tracking which
//! fields feed the price.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::client::ClientId;
use crate::domain::quote::{DocumentType, Quote, QuoteTerms, QuoteTotals, ServiceCategory};
use crate::errors::DomainError;
use crate::pricing::{compute_totals, validate_service_dates};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuoteTerms", into = "QuoteTerms")]
pub struct QuoteDraft {
    terms: QuoteTerms,
    totals: QuoteTotals,
}

impl Default for QuoteDraft {
    fn default() -> Self {
        Self::from_terms(QuoteTerms::default())
    }
}

impl From<QuoteTerms> for QuoteDraft {
    fn from(terms: QuoteTerms) -> Self {
        Self::from_terms(terms)
    }
}

impl From<QuoteDraft> for QuoteTerms {
    fn from(draft: QuoteDraft) -> Self {
        draft.terms
    }
}

impl QuoteDraft {
    pub fn from_terms(terms: QuoteTerms) -> Self {
        let totals = compute_totals(&terms.pricing_input());
        Self { terms, totals }
    }

    /// Starts an edit session from a stored quote; stored totals are re-derived.
    pub fn from_quote(quote: &Quote) -> Self {
        Self::from_terms(quote.terms.clone())
    }

    pub fn terms(&self) -> &QuoteTerms {
        &self.terms
    }

    pub fn totals(&self) -> &QuoteTotals {
        &self.totals
    }

    fn edit(self, apply: impl FnOnce(&mut QuoteTerms)) -> Self {
        let mut terms = self.terms;
        apply(&mut terms);
        Self::from_terms(terms)
    }

    #[must_use]
    pub fn with_client(self, client_id: ClientId) -> Self {
        self.edit(|terms| terms.client_id = Some(client_id))
    }

    /// Moving either end of the stay drops every chosen service date.
    #[must_use]
    pub fn with_check_in(self, check_in: Option<NaiveDate>) -> Self {
        self.edit(|terms| {
            if terms.check_in_date != check_in {
                terms.services.clear();
            }
            terms.check_in_date = check_in;
        })
    }

    #[must_use]
    pub fn with_check_out(self, check_out: Option<NaiveDate>) -> Self {
        self.edit(|terms| {
            if terms.check_out_date != check_out {
                terms.services.clear();
            }
            terms.check_out_date = check_out;
        })
    }

    #[must_use]
    pub fn with_beds(self, number_of_beds: u32) -> Self {
        self.edit(|terms| terms.number_of_beds = number_of_beds)
    }

    #[must_use]
    pub fn with_guests(self, number_of_guests: u32) -> Self {
        self.edit(|terms| terms.number_of_guests = number_of_guests)
    }

    #[must_use]
    pub fn with_unit_bed_cost(self, cost: Decimal) -> Self {
        self.edit(|terms| terms.unit_costs.bed = cost)
    }

    #[must_use]
    pub fn with_unit_service_cost(self, category: ServiceCategory, cost: Decimal) -> Self {
        self.edit(|terms| terms.unit_costs.set_service(category, cost))
    }

    #[must_use]
    pub fn toggle_service_date(self, category: ServiceCategory, date: NaiveDate) -> Self {
        self.edit(|terms| {
            let dates = terms.services.dates_mut(category);
            if !dates.remove(&date) {
                dates.insert(date);
            }
        })
    }

    #[must_use]
    pub fn with_service_dates(
        self,
        category: ServiceCategory,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        self.edit(|terms| *terms.services.dates_mut(category) = dates.into_iter().collect())
    }

    #[must_use]
    pub fn with_discount_percentage(self, percentage: Decimal) -> Self {
        self.edit(|terms| {
            terms.discount_percentage = percentage;
            terms.discount_amount = Decimal::ZERO;
        })
    }

    #[must_use]
    pub fn with_discount_amount(self, amount: Decimal) -> Self {
        self.edit(|terms| {
            terms.discount_amount = amount;
            terms.discount_percentage = Decimal::ZERO;
        })
    }

    #[must_use]
    pub fn with_guest_details(self, details: Option<String>) -> Self {
        self.edit(|terms| terms.guest_details = details.filter(|value| !value.trim().is_empty()))
    }

    #[must_use]
    pub fn with_document_type(self, document_type: DocumentType) -> Self {
        self.edit(|terms| terms.document_type = document_type)
    }

    /// Gate for persisting: required fields, non-negative amounts, stay
    /// ordering, then every service category against the stay window.
    pub fn into_submission(self) -> Result<QuoteSubmission, DomainError> {
        let terms = &self.terms;
        let client_id = terms.client_id.ok_or(DomainError::MissingRequiredField("client_id"))?;
        if terms.number_of_beds == 0 {
            return Err(DomainError::MissingRequiredField("number_of_beds"));
        }
        if terms.number_of_guests == 0 {
            return Err(DomainError::MissingRequiredField("number_of_guests"));
        }
        if terms.unit_costs.bed <= Decimal::ZERO {
            return Err(DomainError::MissingRequiredField("unit_bed_cost"));
        }
        reject_negative_amounts(terms)?;
        let check_in =
            terms.check_in_date.ok_or(DomainError::MissingRequiredField("check_in_date"))?;
        let check_out =
            terms.check_out_date.ok_or(DomainError::MissingRequiredField("check_out_date"))?;
        if check_out < check_in {
            return Err(DomainError::InvalidStayWindow { check_in, check_out });
        }
        validate_service_dates(&terms.services, check_in, check_out)?;

        Ok(QuoteSubmission {
            client_id,
            check_in,
            check_out,
            terms: self.terms,
            totals: self.totals,
        })
    }
}

fn reject_negative_amounts(terms: &QuoteTerms) -> Result<(), DomainError> {
    for category in ServiceCategory::ALL {
        if terms.unit_costs.for_service(category) < Decimal::ZERO {
            return Err(DomainError::NegativeAmount(category.unit_cost_field()));
        }
    }
    if terms.discount_percentage < Decimal::ZERO {
        return Err(DomainError::NegativeAmount("discount_percentage"));
    }
    if terms.discount_amount < Decimal::ZERO {
        return Err(DomainError::NegativeAmount("discount_amount"));
    }
    Ok(())
}

/// Quote terms that passed [`QuoteDraft::into_submission`]; the only value
/// the backend adapter accepts for create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteSubmission {
    client_id: ClientId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    terms: QuoteTerms,
    totals: QuoteTotals,
}

impl QuoteSubmission {
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn terms(&self) -> &QuoteTerms {
        &self.terms
    }

    pub fn totals(&self) -> &QuoteTotals {
        &self.totals
    }
}
