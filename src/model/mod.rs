//! Records of the Data Dip Connector service contract.
//!
//! Field order and names follow the contract, so serializing these types
//! yields the documents the connector expects. Empty strings, zero type
//! discriminators and absent collections are left out of the output.

pub mod flat;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric `PhoneType` / `EmailType` value. The contract gives it no
/// enumerated meaning. Integral values are written without a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct Discriminator(pub f32);

impl Discriminator {
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Serialize for Discriminator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f32(value)
        }
    }
}

impl From<f32> for Discriminator {
    fn from(value: f32) -> Self {
        Discriminator(value)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountResponse {
    #[serde(rename = "Account")]
    pub account: Account,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<EmailAddresses>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<PhoneNumbers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Addresses>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_attribute: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactResponse {
    #[serde(rename = "Contact")]
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<EmailAddresses>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<PhoneNumbers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_attribute: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Addresses {
    #[serde(rename = "Address", skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line1: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line2: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line3: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(rename = "Type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmailAddresses {
    #[serde(rename = "EmailAddress", skip_serializing_if = "Vec::is_empty")]
    pub email_address: Vec<EmailAddress>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailAddress {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email_address: String,
    #[serde(skip_serializing_if = "Discriminator::is_zero")]
    pub email_type: Discriminator,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PhoneNumbers {
    #[serde(rename = "PhoneNumber", skip_serializing_if = "Vec::is_empty")]
    pub phone_number: Vec<PhoneNumber>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhoneNumber {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(skip_serializing_if = "Discriminator::is_zero")]
    pub phone_type: Discriminator,
}

/// A JSON `null` leaves the field empty instead of failing the request.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `/GetAccountByAccountNumber`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccountByAccountNumberRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub account_number: String,
    pub custom_attribute: Option<String>,
}

/// Body of `/GetAccountByContactId`. The route answers 501 and never reads it.
#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccountByContactIdRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub contact_id: String,
    pub custom_attribute: Option<String>,
}

/// Body of `/GetContactByPhoneNumber`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ContactByPhoneNumberRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub phone_number: String,
    pub custom_attribute: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_empty_fields_are_omitted() -> Result<(), Box<dyn Error>> {
        let resp = AccountResponse {
            account: Account {
                id: "1".to_string(),
                ..Default::default()
            },
        };
        assert_eq!(serde_json::to_string(&resp)?, r#"{"Account":{"Id":"1"}}"#);
        Ok(())
    }

    #[test]
    fn test_discriminator() -> Result<(), Box<dyn Error>> {
        let phones = PhoneNumbers {
            phone_number: vec![
                PhoneNumber {
                    number: "+1".to_string(),
                    phone_type: Discriminator(2.0),
                },
                PhoneNumber {
                    number: "+2".to_string(),
                    phone_type: Discriminator(1.5),
                },
                PhoneNumber {
                    number: "+3".to_string(),
                    phone_type: Discriminator::default(),
                },
            ],
        };
        assert_eq!(
            serde_json::to_string(&phones)?,
            r#"{"PhoneNumber":[{"Number":"+1","PhoneType":2},{"Number":"+2","PhoneType":1.5},{"Number":"+3"}]}"#
        );
        Ok(())
    }

    #[test]
    fn test_address_type_key() -> Result<(), Box<dyn Error>> {
        let address = Address {
            line1: "7601 Interactive Way".to_string(),
            postal_code: "46278".to_string(),
            kind: "US".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&address)?,
            r#"{"Line1":"7601 Interactive Way","PostalCode":"46278","Type":"US"}"#
        );
        Ok(())
    }

    #[test]
    fn test_requests_decode() -> Result<(), Box<dyn Error>> {
        let req: AccountByAccountNumberRequest =
            serde_json::from_str(r#"{"AccountNumber":"999","CustomAttribute":"x","Extra":1}"#)?;
        assert_eq!(req.account_number, "999");
        assert_eq!(req.custom_attribute.as_deref(), Some("x"));

        let req: AccountByContactIdRequest = serde_json::from_str(r#"{"ContactId":"42"}"#)?;
        assert_eq!(req.contact_id, "42");
        assert!(req.custom_attribute.is_none());

        let req: ContactByPhoneNumberRequest = serde_json::from_str("{}")?;
        assert_eq!(req.phone_number, "");

        let req: AccountByAccountNumberRequest =
            serde_json::from_str(r#"{"AccountNumber":null,"CustomAttribute":null}"#)?;
        assert_eq!(req.account_number, "");
        assert!(req.custom_attribute.is_none());

        let bad = serde_json::from_str::<AccountByAccountNumberRequest>(r#"{"AccountNumber":999}"#);
        assert!(bad.is_err());
        Ok(())
    }
}
