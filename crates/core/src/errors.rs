use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::quote::{InvoiceStatus, ServiceCategory};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid invoice transition from {from:?} to {to:?}")]
    InvalidInvoiceTransition { from: InvoiceStatus, to: InvoiceStatus },
    #[error("required field `{0}` is missing")]
    MissingRequiredField(&'static str),
    #[error("check-out date {check_out} is before check-in date {check_in}")]
    InvalidStayWindow { check_in: NaiveDate, check_out: NaiveDate },
    #[error("{category} date {date} is outside the stay {check_in} to {check_out}")]
    ServiceDateOutOfRange {
        category: ServiceCategory,
        date: NaiveDate,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
    #[error("service dates were rejected for the stay {check_in} to {check_out}")]
    ServiceDatesRejected { check_in: NaiveDate, check_out: NaiveDate },
    #[error("`{0}` must not be negative")]
    NegativeAmount(&'static str),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("backend failure: {0}")]
    Backend(String),
    #[error("record not found: {0}")]
    NotFound(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "The record could not be saved. Check inputs and try again.",
            Self::NotFound { .. } => "The requested record no longer exists.",
            Self::ServiceUnavailable { .. } => {
                "The booking service is temporarily unavailable. Please retry shortly."
            }
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. } => {
                *id = correlation_id
            }
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::NotFound(message) => {
                Self::NotFound { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Backend(message) => {
                Self::ServiceUnavailable { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::quote::ServiceCategory;
    use crate::errors::{ApplicationError, DomainError, InterfaceError};

    #[test]
    fn domain_error_maps_to_bad_request_interface_error() {
        let interface =
            ApplicationError::from(DomainError::MissingRequiredField("number_of_beds"))
                .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ref message,
            } if correlation_id == "req-1" && message.contains("number_of_beds")
        ));
    }

    #[test]
    fn out_of_range_service_date_names_the_category() {
        let date = |day| NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date");
        let error = DomainError::ServiceDateOutOfRange {
            category: ServiceCategory::Dinner,
            date: date(9),
            check_in: date(1),
            check_out: date(4),
        };

        assert_eq!(
            error.to_string(),
            "dinner date 2025-01-09 is outside the stay 2025-01-01 to 2025-01-04"
        );
    }

    #[test]
    fn backend_error_maps_to_service_unavailable() {
        let interface =
            ApplicationError::Backend("connection refused".to_owned()).into_interface("req-3");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(interface.correlation_id(), "req-3");
        assert_eq!(
            interface.user_message(),
            "The booking service is temporarily unavailable. Please retry shortly."
        );
    }

    #[test]
    fn not_found_keeps_its_own_interface_class() {
        let interface = ApplicationError::NotFound("quote 7".to_owned()).into_interface("req-4");

        assert!(matches!(interface, InterfaceError::NotFound { .. }));
        assert_eq!(interface.user_message(), "The requested record no longer exists.");
    }
}
