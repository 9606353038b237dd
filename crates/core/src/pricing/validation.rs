use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::quote::{ServiceCategory, ServiceSchedule};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeViolation {
    pub category: ServiceCategory,
    pub date: NaiveDate,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRangeInput<'a> {
    pub services: &'a ServiceSchedule,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeResult {
    pub valid: bool,
    pub violations: Vec<DateRangeViolation>,
}

impl Default for DateRangeResult {
    fn default() -> Self {
        Self { valid: true, violations: Vec::new() }
    }
}

impl DateRangeResult {
    pub fn into_result(
        self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<(), DomainError> {
        match self.violations.into_iter().next() {
            Some(violation) => Err(DomainError::ServiceDateOutOfRange {
                category: violation.category,
                date: violation.date,
                check_in,
                check_out,
            }),
            None if !self.valid => {
                Err(DomainError::ServiceDatesRejected { check_in, check_out })
            }
            None => Ok(()),
        }
    }
}

pub trait DateRangeValidator: Send + Sync {
    fn validate(&self, input: &DateRangeInput<'_>) -> DateRangeResult;
}

#[derive(Default)]
pub struct InclusiveDateRangeValidator;

impl DateRangeValidator for InclusiveDateRangeValidator {
    fn validate(&self, input: &DateRangeInput<'_>) -> DateRangeResult {
        validate_schedule(input)
    }
}

/// Both bounds are inclusive: a service on the check-out morning is allowed.
pub fn all_dates_within_range<'a, I>(dates: I, check_in: NaiveDate, check_out: NaiveDate) -> bool
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    dates.into_iter().all(|date| (check_in..=check_out).contains(date))
}

pub fn validate_schedule(input: &DateRangeInput<'_>) -> DateRangeResult {
    let mut result = DateRangeResult::default();

    for (category, dates) in input.services.iter() {
        if all_dates_within_range(dates, input.check_in, input.check_out) {
            continue;
        }

        let stay = input.check_in..=input.check_out;
        for date in dates.iter().filter(|date| !stay.contains(*date)) {
            result.violations.push(DateRangeViolation {
                category,
                date: *date,
                message: format!(
                    "{category} on {date} is outside the stay {} to {}",
                    input.check_in, input.check_out
                ),
            });
        }
    }

    result.valid = result.violations.is_empty();
    result
}

pub fn validate_service_dates(
    services: &ServiceSchedule,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<(), DomainError> {
    validate_schedule(&DateRangeInput { services, check_in, check_out })
        .into_result(check_in, check_out)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::{
        all_dates_within_range, validate_service_dates, DateRangeInput, DateRangeResult,
        DateRangeValidator, InclusiveDateRangeValidator,
    };
    use crate::domain::quote::{ServiceCategory, ServiceDates, ServiceSchedule};
    use crate::errors::DomainError;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date")
    }

    #[test]
    fn one_date_past_checkout_in_ten_fails_the_set() {
        let check_in = date(1);
        let check_out = date(10);
        let mut dates: ServiceDates = (1..=10).map(date).collect();
        assert!(all_dates_within_range(&dates, check_in, check_out));

        dates.remove(&date(5));
        dates.insert(check_out + Duration::days(1));
        assert_eq!(dates.len(), 10);
        assert!(!all_dates_within_range(&dates, check_in, check_out));
    }

    #[test]
    fn bounds_are_inclusive_and_empty_sets_pass() {
        let dates: ServiceDates = [date(3), date(6)].into_iter().collect();
        assert!(all_dates_within_range(&dates, date(3), date(6)));
        assert!(all_dates_within_range(&ServiceDates::new(), date(6), date(3)));
        assert!(!all_dates_within_range(&dates, date(4), date(6)));
    }

    #[test]
    fn validator_reports_every_offending_date() {
        let mut services = ServiceSchedule::default();
        services.breakfast.extend([date(1), date(2)]);
        services.dinner.extend([date(2), date(9)]);
        services.laundry.insert(date(12));

        let result = InclusiveDateRangeValidator.validate(&DateRangeInput {
            services: &services,
            check_in: date(1),
            check_out: date(4),
        });

        assert!(!result.valid);
        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.violations[0].category, ServiceCategory::Dinner);
        assert_eq!(result.violations[0].date, date(9));
        assert_eq!(result.violations[1].category, ServiceCategory::Laundry);
    }

    #[test]
    fn invalid_result_without_violations_is_still_rejected() {
        let result = DateRangeResult { valid: false, violations: Vec::new() };
        assert_eq!(
            result.into_result(date(1), date(4)),
            Err(DomainError::ServiceDatesRejected { check_in: date(1), check_out: date(4) })
        );

        assert_eq!(DateRangeResult::default().into_result(date(1), date(4)), Ok(()));
    }

    #[test]
    fn first_violation_becomes_a_domain_error() {
        let mut services = ServiceSchedule::default();
        services.lunch.insert(date(20));

        let error = validate_service_dates(&services, date(1), date(4)).expect_err("out of range");
        assert_eq!(
            error,
            DomainError::ServiceDateOutOfRange {
                category: ServiceCategory::Lunch,
                date: date(20),
                check_in: date(1),
                check_out: date(4),
            }
        );
    }
}
