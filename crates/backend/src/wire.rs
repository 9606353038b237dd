//! Decode boundary for the booking backend's JSON.
//!
//! The backend stores form values verbatim, so numbers may arrive as JSON
//! numbers or decimal strings and the per-service date lists arrive as a
//! JSON-encoded string. Everything is normalized here; nothing past this
//! module sees a raw record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use guesthouse_core::domain::client::{Client, ClientId, ClientProfile};
use guesthouse_core::domain::draft::QuoteSubmission;
use guesthouse_core::domain::quote::{
    DocumentType, InvoiceStatus, Quote, QuoteId, QuoteSummary, QuoteTerms, QuoteTotals,
    ServiceDates, ServiceSchedule, UnitCosts,
};
use guesthouse_core::pricing::money::{
    parse_count, parse_date, parse_optional_amount, round_money,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("backend record is missing `{0}`")]
    MissingField(&'static str),
    #[error("unknown invoice status `{0}`")]
    UnknownInvoiceStatus(String),
    #[error("unknown document type `{0}`")]
    UnknownDocumentType(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClientRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_vat_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company_website: Option<String>,
}

impl ClientRecord {
    pub fn into_client(self) -> Result<Client, WireError> {
        let id = self.client_id.ok_or(WireError::MissingField("client_id"))?;
        Ok(Client {
            id: ClientId(id),
            profile: ClientProfile {
                first_name: self.first_name.unwrap_or_default(),
                last_name: self.last_name,
                email_address: self.email_address.unwrap_or_default(),
                phone_number: self.phone_number,
                company_name: self.company_name,
                company_address: self.company_address,
                company_vat_number: self.company_vat_number,
                company_website: self.company_website,
            },
        })
    }
}

/// One row of the quote table, joined with the client's name on list reads.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QuoteRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub quote_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quote_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub client_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub number_of_beds: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub number_of_guests: u32,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unit_bed_cost: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unit_breakfast_cost: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unit_lunch_cost: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unit_dinner_cost: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unit_laundry_cost: Decimal,
    #[serde(default, deserialize_with = "lenient_dates")]
    pub breakfast_dates: ServiceDates,
    #[serde(default, deserialize_with = "lenient_dates")]
    pub lunch_dates: ServiceDates,
    #[serde(default, deserialize_with = "lenient_dates")]
    pub dinner_dates: ServiceDates,
    #[serde(default, deserialize_with = "lenient_dates")]
    pub laundry_dates: ServiceDates,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount_percentage: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount_amount: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub subtotal: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub vat: Decimal,
    #[serde(default, deserialize_with = "lenient_optional_decimal")]
    pub total: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub guest_details: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub document_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub invoice_status: Option<String>,
}

impl QuoteRecord {
    pub fn into_quote(self) -> Result<Quote, WireError> {
        let id = self.quote_id.ok_or(WireError::MissingField("quote_id"))?;
        let invoice_status = decode_invoice_status(self.invoice_status.as_deref())?;
        let document_type = match self.document_type.as_deref() {
            None => DocumentType::default(),
            Some(raw) => DocumentType::parse(raw)
                .ok_or_else(|| WireError::UnknownDocumentType(raw.to_string()))?,
        };

        let totals = QuoteTotals {
            subtotal: self.subtotal,
            vat: self.vat,
            discount: self.derived_discount(),
            total: self.total.unwrap_or(Decimal::ZERO),
        };
        let terms = QuoteTerms {
            client_id: self.client_id.map(ClientId),
            check_in_date: self.check_in_date,
            check_out_date: self.check_out_date,
            number_of_beds: self.number_of_beds,
            number_of_guests: self.number_of_guests,
            unit_costs: UnitCosts {
                bed: self.unit_bed_cost,
                breakfast: self.unit_breakfast_cost,
                lunch: self.unit_lunch_cost,
                dinner: self.unit_dinner_cost,
                laundry: self.unit_laundry_cost,
            },
            services: ServiceSchedule {
                breakfast: self.breakfast_dates,
                lunch: self.lunch_dates,
                dinner: self.dinner_dates,
                laundry: self.laundry_dates,
            },
            discount_percentage: self.discount_percentage,
            discount_amount: self.discount_amount,
            guest_details: self.guest_details,
            document_type,
        };

        Ok(Quote {
            id: QuoteId(id),
            quote_number: self.quote_number,
            terms,
            totals,
            invoice_status,
        })
    }

    pub fn into_summary(self) -> Result<QuoteSummary, WireError> {
        let id = self.quote_id.ok_or(WireError::MissingField("quote_id"))?;
        Ok(QuoteSummary {
            id: QuoteId(id),
            quote_number: self.quote_number.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name,
            number_of_guests: self.number_of_guests,
            total: self.total,
            invoice_status: decode_invoice_status(self.invoice_status.as_deref())?,
        })
    }

    // The table has no discount column; it is whatever closes subtotal + vat - total.
    fn derived_discount(&self) -> Decimal {
        match self.total {
            Some(total) => self.subtotal.saturating_add(self.vat).saturating_sub(total),
            None => Decimal::ZERO,
        }
    }
}

fn decode_invoice_status(raw: Option<&str>) -> Result<InvoiceStatus, WireError> {
    match raw {
        None => Ok(InvoiceStatus::default()),
        Some(raw) => InvoiceStatus::parse(raw)
            .ok_or_else(|| WireError::UnknownInvoiceStatus(raw.to_string())),
    }
}

/// Request body for quote create and update. Only a validated submission
/// can be encoded.
#[derive(Clone, Debug, Serialize)]
pub struct QuotePayload<'a> {
    pub client_id: u64,
    #[serde(serialize_with = "encode_date")]
    pub check_in_date: NaiveDate,
    #[serde(serialize_with = "encode_date")]
    pub check_out_date: NaiveDate,
    pub number_of_beds: u32,
    pub number_of_guests: u32,
    pub unit_bed_cost: Decimal,
    pub unit_breakfast_cost: Decimal,
    pub unit_lunch_cost: Decimal,
    pub unit_dinner_cost: Decimal,
    pub unit_laundry_cost: Decimal,
    #[serde(serialize_with = "encode_dates")]
    pub breakfast_dates: &'a ServiceDates,
    #[serde(serialize_with = "encode_dates")]
    pub lunch_dates: &'a ServiceDates,
    #[serde(serialize_with = "encode_dates")]
    pub dinner_dates: &'a ServiceDates,
    #[serde(serialize_with = "encode_dates")]
    pub laundry_dates: &'a ServiceDates,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
    pub guest_details: Option<&'a str>,
    pub document_type: DocumentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_status: Option<InvoiceStatus>,
}

impl<'a> QuotePayload<'a> {
    pub fn from_submission(
        submission: &'a QuoteSubmission,
        invoice_status: Option<InvoiceStatus>,
    ) -> Self {
        let terms = submission.terms();
        let totals = submission.totals();
        Self {
            client_id: submission.client_id().0,
            check_in_date: submission.check_in(),
            check_out_date: submission.check_out(),
            number_of_beds: terms.number_of_beds,
            number_of_guests: terms.number_of_guests,
            unit_bed_cost: terms.unit_costs.bed,
            unit_breakfast_cost: terms.unit_costs.breakfast,
            unit_lunch_cost: terms.unit_costs.lunch,
            unit_dinner_cost: terms.unit_costs.dinner,
            unit_laundry_cost: terms.unit_costs.laundry,
            breakfast_dates: &terms.services.breakfast,
            lunch_dates: &terms.services.lunch,
            dinner_dates: &terms.services.dinner,
            laundry_dates: &terms.services.laundry,
            discount_percentage: terms.discount_percentage,
            discount_amount: terms.discount_amount,
            subtotal: round_money(totals.subtotal),
            vat: round_money(totals.vat),
            total: round_money(totals.total),
            guest_details: terms.guest_details.as_deref(),
            document_type: terms.document_type,
            invoice_status,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct InvoiceStatusPayload {
    pub invoice_status: InvoiceStatus,
}

/// Pulls the new record id out of a create response, if the backend sent one.
pub fn created_id(body: &Value, field: &str) -> Option<u64> {
    let record = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    record.get(field).or_else(|| record.get("id")).and_then(id_from_value)
}

fn encode_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

fn encode_dates<S: Serializer>(dates: &&ServiceDates, serializer: S) -> Result<S::Ok, S::Error> {
    let list: Vec<String> = dates.iter().map(|date| date.format("%Y-%m-%d").to_string()).collect();
    let encoded = serde_json::to_string(&list).map_err(ser::Error::custom)?;
    serializer.serialize_str(&encoded)
}

fn id_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_optional_amount(&number.to_string()),
        Value::String(text) => parse_optional_amount(text),
        _ => None,
    }
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => return Ok(None),
    };
    Ok(Some(text).filter(|text| !text.trim().is_empty()))
}

fn lenient_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(lenient_optional_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

fn lenient_optional_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => parse_count(&number.to_string()),
        Some(Value::String(text)) => parse_count(&text),
        _ => 0,
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    // Zero dates such as `0000-00-00` read as unset; pricing treats that as one night.
    Ok(match value {
        Some(Value::String(text)) => parse_date(&text),
        _ => None,
    })
}

fn lenient_dates<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ServiceDates, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let entries = match value {
        None | Some(Value::Null) => return Ok(ServiceDates::new()),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(ServiceDates::new()),
        Some(Value::String(text)) => serde_json::from_str::<Vec<String>>(&text)
            .map_err(|error| de::Error::custom(format!("invalid date list `{text}`: {error}")))?,
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                other => Err(de::Error::custom(format!("invalid date list entry `{other}`"))),
            })
            .collect::<Result<Vec<_>, D::Error>>()?,
        Some(other) => return Err(de::Error::custom(format!("invalid date list `{other}`"))),
    };

    entries
        .iter()
        .map(|entry| {
            parse_date(entry).ok_or_else(|| de::Error::custom(format!("invalid date `{entry}`")))
        })
        .collect()
}
