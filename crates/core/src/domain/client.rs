use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact and company details captured for a guest or booking company.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email_address: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_address: Option<String>,
    #[serde(default)]
    pub company_vat_number: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
}

impl ClientProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.first_name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField("first_name"));
        }
        if self.email_address.trim().is_empty() {
            return Err(DomainError::MissingRequiredField("email_address"));
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim).filter(|last| !last.is_empty()) {
            Some(last) => format!("{} {last}", self.first_name.trim()),
            None => self.first_name.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub profile: ClientProfile,
}

impl Client {
    pub fn full_name(&self) -> String {
        self.profile.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::ClientProfile;
    use crate::errors::DomainError;

    fn profile() -> ClientProfile {
        ClientProfile {
            first_name: "Sipho".to_string(),
            email_address: "sipho@example.co.za".to_string(),
            ..ClientProfile::default()
        }
    }

    #[test]
    fn first_name_and_email_are_required() {
        assert!(profile().validate().is_ok());

        let missing_name = ClientProfile { first_name: "  ".to_string(), ..profile() };
        assert_eq!(missing_name.validate(), Err(DomainError::MissingRequiredField("first_name")));

        let missing_email = ClientProfile { email_address: String::new(), ..profile() };
        assert_eq!(
            missing_email.validate(),
            Err(DomainError::MissingRequiredField("email_address"))
        );
    }

    #[test]
    fn full_name_joins_optional_last_name() {
        assert_eq!(profile().full_name(), "Sipho");

        let named = ClientProfile { last_name: Some("Dlamini".to_string()), ..profile() };
        assert_eq!(named.full_name(), "Sipho Dlamini");
    }
}
