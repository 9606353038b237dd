use serde::Serialize;

use guesthouse_backend::ListOutcome;
use guesthouse_core::domain::quote::{InvoiceStatus, Quote, QuoteId, QuoteSummary};
use guesthouse_core::pricing::money::format_zar;

use crate::commands::{open_desk, read_draft, CommandResult};
use crate::QuoteAction;

#[derive(Debug, Serialize)]
pub(crate) struct QuoteRow {
    id: u64,
    quote_number: String,
    client: String,
    guests: u32,
    total: String,
    invoice_status: InvoiceStatus,
}

impl From<&QuoteSummary> for QuoteRow {
    fn from(summary: &QuoteSummary) -> Self {
        Self {
            id: summary.id.0,
            quote_number: summary.quote_number.clone(),
            client: summary.client_name(),
            guests: summary.number_of_guests,
            total: summary.total.map(format_zar).unwrap_or_else(|| "N/A".to_string()),
            invoice_status: summary.invoice_status,
        }
    }
}

#[derive(Debug, Serialize)]
struct QuoteDetail<'a> {
    total_display: String,
    #[serde(flatten)]
    quote: &'a Quote,
}

pub(crate) fn list_result(
    command: &str,
    noun: &str,
    listed: ListOutcome<QuoteSummary>,
) -> CommandResult {
    let rows: Vec<QuoteRow> = listed.items.iter().map(QuoteRow::from).collect();
    let message = match listed.notice {
        Some(notice) => notice,
        None => format!("{} {noun}(s)", rows.len()),
    };
    CommandResult::success_with_data(command, message, rows)
}

pub fn run(action: QuoteAction) -> CommandResult {
    let command = match &action {
        QuoteAction::List { .. } => "quotes.list",
        QuoteAction::Show { .. } => "quotes.show",
        QuoteAction::Create { .. } => "quotes.create",
        QuoteAction::Update { .. } => "quotes.update",
        QuoteAction::Invoice { .. } => "quotes.invoice",
        QuoteAction::Delete { .. } => "quotes.delete",
    };

    // Drafts are read before touching config or the backend so a bad file fails fast.
    let draft = match &action {
        QuoteAction::Create { file } | QuoteAction::Update { file, .. } => {
            match read_draft(command, file) {
                Ok(draft) => Some(draft),
                Err(result) => return result,
            }
        }
        _ => None,
    };

    let session = match open_desk(command) {
        Ok(session) => session,
        Err(result) => return result,
    };
    let desk = &session.desk;

    session.runtime.block_on(async {
        match (action, draft) {
            (QuoteAction::List { status, search }, _) => {
                list_result(command, "quote", desk.list_quotes(status, search.as_deref()).await)
            }
            (QuoteAction::Show { id }, _) => match desk.quote(QuoteId(id)).await {
                Ok(quote) => {
                    let total_display = format_zar(quote.totals.total);
                    let detail = QuoteDetail { total_display, quote: &quote };
                    CommandResult::success_with_data(
                        command,
                        format!("quote {}", quote.quote_number.as_deref().unwrap_or("unnumbered")),
                        detail,
                    )
                }
                Err(error) => CommandResult::from_application_error(command, error),
            },
            (QuoteAction::Create { .. }, Some(draft)) => {
                let total = format_zar(draft.totals().total);
                match desk.create_quote(draft).await {
                    Ok(Some(id)) => {
                        CommandResult::success(command, format!("created quote {id} ({total})"))
                    }
                    Ok(None) => CommandResult::success(command, format!("created quote ({total})")),
                    Err(error) => CommandResult::from_application_error(command, error),
                }
            }
            (QuoteAction::Update { id, .. }, Some(draft)) => {
                let total = format_zar(draft.totals().total);
                match desk.update_quote(QuoteId(id), draft).await {
                    Ok(()) => {
                        CommandResult::success(command, format!("updated quote {id} ({total})"))
                    }
                    Err(error) => CommandResult::from_application_error(command, error),
                }
            }
            (QuoteAction::Invoice { id }, _) => match desk.invoice_quote(QuoteId(id)).await {
                Ok(quote) => CommandResult::success(
                    command,
                    format!(
                        "invoiced quote {} ({})",
                        quote.quote_number.as_deref().unwrap_or("unnumbered"),
                        format_zar(quote.totals.total)
                    ),
                ),
                Err(error) => CommandResult::from_application_error(command, error),
            },
            (QuoteAction::Delete { id }, _) => match desk.delete_quote(QuoteId(id)).await {
                Ok(()) => CommandResult::success(command, format!("deleted quote {id}")),
                Err(error) => CommandResult::from_application_error(command, error),
            },
            (QuoteAction::Create { .. } | QuoteAction::Update { .. }, None) => {
                CommandResult::failure(command, "input", "a draft file is required", 7)
            }
        }
    })
}
