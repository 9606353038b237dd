pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;
pub mod search;

pub use domain::client::{Client, ClientId, ClientProfile};
pub use domain::draft::{QuoteDraft, QuoteSubmission};
pub use domain::quote::{
    DocumentType, InvoiceStatus, Quote, QuoteId, QuoteSummary, QuoteTerms, QuoteTotals,
    ServiceCategory, ServiceDates, ServiceSchedule, UnitCosts,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use pricing::money::{
    format_zar, parse_count, parse_date, parse_optional_amount, round_money,
};
pub use pricing::{
    DateRangeResult, DateRangeValidator, DateRangeViolation, DeterministicPricingEngine,
    DeterministicQuoteRuntime, InclusiveDateRangeValidator, PricingEngine, PricingResult,
    QuoteEvaluation, QuoteRuntime,
};
