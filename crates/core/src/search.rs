//! Case-insensitive substring filtering for the client, quote and invoice lists.

use crate::domain::client::Client;
use crate::domain::quote::{InvoiceStatus, QuoteSummary};

fn contains_query(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Matches on full name or email address.
pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let needle = query.trim().to_lowercase();
    clients
        .iter()
        .filter(|client| {
            contains_query(&client.full_name(), &needle)
                || contains_query(&client.profile.email_address, &needle)
        })
        .collect()
}

/// Matches on quote number or the client's full name.
pub fn filter_quotes<'a>(quotes: &'a [QuoteSummary], query: &str) -> Vec<&'a QuoteSummary> {
    let needle = query.trim().to_lowercase();
    quotes
        .iter()
        .filter(|quote| {
            contains_query(&quote.quote_number, &needle)
                || contains_query(&quote.client_name(), &needle)
        })
        .collect()
}

pub fn invoices(quotes: &[QuoteSummary]) -> Vec<&QuoteSummary> {
    quotes.iter().filter(|quote| quote.invoice_status == InvoiceStatus::Invoiced).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{filter_clients, filter_quotes, invoices};
    use crate::domain::client::{Client, ClientId, ClientProfile};
    use crate::domain::quote::{InvoiceStatus, QuoteId, QuoteSummary};

    fn client(id: u64, first: &str, last: Option<&str>, email: &str) -> Client {
        Client {
            id: ClientId(id),
            profile: ClientProfile {
                first_name: first.to_string(),
                last_name: last.map(str::to_string),
                email_address: email.to_string(),
                ..ClientProfile::default()
            },
        }
    }

    fn summary(id: u64, number: &str, first: &str, status: InvoiceStatus) -> QuoteSummary {
        QuoteSummary {
            id: QuoteId(id),
            quote_number: number.to_string(),
            first_name: first.to_string(),
            last_name: Some("Naidoo".to_string()),
            number_of_guests: 2,
            total: Some(Decimal::new(1150, 0)),
            invoice_status: status,
        }
    }

    #[test]
    fn clients_match_name_or_email() {
        let clients = vec![
            client(1, "Lerato", Some("Khumalo"), "lerato@example.co.za"),
            client(2, "Pieter", None, "bookings@karoo-tours.example"),
        ];

        let by_last_name: Vec<_> =
            filter_clients(&clients, "KHUMALO").into_iter().map(|c| c.id.0).collect();
        assert_eq!(by_last_name, vec![1]);

        let by_email: Vec<_> =
            filter_clients(&clients, "karoo").into_iter().map(|c| c.id.0).collect();
        assert_eq!(by_email, vec![2]);

        assert_eq!(filter_clients(&clients, "").len(), 2);
    }

    #[test]
    fn quotes_match_number_or_client_name() {
        let quotes = vec![
            summary(1, "Q-2025-001", "Anele", InvoiceStatus::Unpaid),
            summary(2, "Q-2025-002", "Ruan", InvoiceStatus::Invoiced),
        ];

        assert_eq!(filter_quotes(&quotes, "002").len(), 1);
        assert_eq!(filter_quotes(&quotes, "anele naidoo")[0].id, QuoteId(1));
        assert_eq!(filter_quotes(&quotes, "naidoo").len(), 2);
        assert!(filter_quotes(&quotes, "zzz").is_empty());
    }

    #[test]
    fn invoices_are_invoiced_quotes_only() {
        let quotes = vec![
            summary(1, "Q-1", "Anele", InvoiceStatus::Unpaid),
            summary(2, "Q-2", "Ruan", InvoiceStatus::Invoiced),
        ];

        let invoiced: Vec<_> = invoices(&quotes).into_iter().map(|q| q.id).collect();
        assert_eq!(invoiced, vec![QuoteId(2)]);
    }
}
