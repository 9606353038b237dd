use clap::Args;

use guesthouse_core::domain::client::{ClientId, ClientProfile};

use crate::commands::{open_desk, CommandResult};
use crate::ClientAction;

#[derive(Clone, Debug, Args)]
pub struct NewClient {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long = "email")]
    pub email_address: String,
    #[arg(long = "phone")]
    pub phone_number: Option<String>,
    #[arg(long = "company")]
    pub company_name: Option<String>,
    #[arg(long)]
    pub company_address: Option<String>,
    #[arg(long = "vat-number")]
    pub company_vat_number: Option<String>,
    #[arg(long = "website")]
    pub company_website: Option<String>,
}

impl From<NewClient> for ClientProfile {
    fn from(client: NewClient) -> Self {
        Self {
            first_name: client.first_name,
            last_name: client.last_name,
            email_address: client.email_address,
            phone_number: client.phone_number,
            company_name: client.company_name,
            company_address: client.company_address,
            company_vat_number: client.company_vat_number,
            company_website: client.company_website,
        }
    }
}

pub fn run(action: ClientAction) -> CommandResult {
    let command = match &action {
        ClientAction::List { .. } => "clients.list",
        ClientAction::Show { .. } => "clients.show",
        ClientAction::Create(_) => "clients.create",
        ClientAction::Update { .. } => "clients.update",
        ClientAction::Delete { .. } => "clients.delete",
    };

    // Required fields are checked before any config or backend work.
    let profile = match &action {
        ClientAction::Create(new_client) | ClientAction::Update { client: new_client, .. } => {
            let profile = ClientProfile::from(new_client.clone());
            if let Err(error) = profile.validate() {
                return CommandResult::from_application_error(command, error.into());
            }
            Some(profile)
        }
        _ => None,
    };

    let session = match open_desk(command) {
        Ok(session) => session,
        Err(result) => return result,
    };
    let desk = &session.desk;

    session.runtime.block_on(async {
        match (action, profile) {
            (ClientAction::List { search }, _) => {
                let listed = desk.list_clients(search.as_deref()).await;
                let message = match &listed.notice {
                    Some(notice) => notice.clone(),
                    None => format!("{} client(s)", listed.items.len()),
                };
                CommandResult::success_with_data(command, message, listed.items)
            }
            (ClientAction::Show { id }, _) => match desk.client(ClientId(id)).await {
                Ok(client) => {
                    CommandResult::success_with_data(command, client.full_name(), client)
                }
                Err(error) => CommandResult::from_application_error(command, error),
            },
            (ClientAction::Create(_), Some(profile)) => match desk.create_client(&profile).await {
                Ok(Some(id)) => CommandResult::success(
                    command,
                    format!("created client {id} ({})", profile.full_name()),
                ),
                Ok(None) => CommandResult::success(
                    command,
                    format!("created client {}", profile.full_name()),
                ),
                Err(error) => CommandResult::from_application_error(command, error),
            },
            (ClientAction::Update { id, .. }, Some(profile)) => {
                match desk.update_client(ClientId(id), &profile).await {
                    Ok(()) => CommandResult::success(
                        command,
                        format!("updated client {id} ({})", profile.full_name()),
                    ),
                    Err(error) => CommandResult::from_application_error(command, error),
                }
            }
            (ClientAction::Delete { id }, _) => match desk.delete_client(ClientId(id)).await {
                Ok(()) => CommandResult::success(command, format!("deleted client {id}")),
                Err(error) => CommandResult::from_application_error(command, error),
            },
            (ClientAction::Create(_) | ClientAction::Update { .. }, None) => {
                CommandResult::failure(command, "input", "client details are required", 7)
            }
        }
    })
}
