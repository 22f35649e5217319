//! Dotted-key rendering of the contract records.
//!
//! Scalars become `Entity.Path.Field` keys. Collections become one array per
//! leaf field, index-aligned across the arrays of the same collection. An
//! array is dropped when every element is empty; otherwise empty elements
//! stay in place as `""` or `0`.

use crate::model::{
    Account, Address, Contact, Discriminator, EmailAddress, EmailAddresses, PhoneNumber,
    PhoneNumbers,
};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FlatAccount {
    #[serde(rename = "Account.Id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "Account.Name", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "Account.Number", skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(
        rename = "Account.EmailAddresses.EmailAddress.EmailAddress",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub email_address: Vec<String>,
    #[serde(
        rename = "Account.EmailAddresses.EmailAddress.EmailType",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub email_type: Vec<Discriminator>,
    #[serde(
        rename = "Account.PhoneNumbers.PhoneNumber.Number",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub phone_number: Vec<String>,
    #[serde(
        rename = "Account.PhoneNumbers.PhoneNumber.PhoneType",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub phone_type: Vec<Discriminator>,
    #[serde(rename = "Account.Addresses.Address.City", skip_serializing_if = "Vec::is_empty")]
    pub city: Vec<String>,
    #[serde(rename = "Account.Addresses.Address.Country", skip_serializing_if = "Vec::is_empty")]
    pub country: Vec<String>,
    #[serde(rename = "Account.Addresses.Address.Line1", skip_serializing_if = "Vec::is_empty")]
    pub line1: Vec<String>,
    #[serde(rename = "Account.Addresses.Address.Line2", skip_serializing_if = "Vec::is_empty")]
    pub line2: Vec<String>,
    #[serde(rename = "Account.Addresses.Address.Line3", skip_serializing_if = "Vec::is_empty")]
    pub line3: Vec<String>,
    #[serde(
        rename = "Account.Addresses.Address.PostalCode",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub postal_code: Vec<String>,
    #[serde(rename = "Account.Addresses.Address.State", skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<String>,
    #[serde(rename = "Account.Addresses.Address.Type", skip_serializing_if = "Vec::is_empty")]
    pub kind: Vec<String>,
    #[serde(rename = "Account.CustomAttribute", skip_serializing_if = "String::is_empty")]
    pub custom_attribute: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FlatContact {
    #[serde(
        rename = "Contact.EmailAddresses.EmailAddress.EmailAddress",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub email_address: Vec<String>,
    #[serde(
        rename = "Contact.EmailAddresses.EmailAddress.EmailType",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub email_type: Vec<Discriminator>,
    #[serde(rename = "Contact.FirstName", skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(rename = "Contact.LastName", skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(rename = "Contact.FullName", skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    #[serde(rename = "Contact.Id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(
        rename = "Contact.PhoneNumbers.PhoneNumber.Number",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub phone_number: Vec<String>,
    #[serde(
        rename = "Contact.PhoneNumbers.PhoneNumber.PhoneType",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub phone_type: Vec<Discriminator>,
    #[serde(rename = "Contact.Address.City", skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(rename = "Contact.Address.Country", skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(rename = "Contact.Address.Line1", skip_serializing_if = "String::is_empty")]
    pub line1: String,
    #[serde(rename = "Contact.Address.Line2", skip_serializing_if = "String::is_empty")]
    pub line2: String,
    #[serde(rename = "Contact.Address.Line3", skip_serializing_if = "String::is_empty")]
    pub line3: String,
    #[serde(rename = "Contact.Address.PostalCode", skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    #[serde(rename = "Contact.Address.State", skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(rename = "Contact.Address.Type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(rename = "Contact.CustomAttribute", skip_serializing_if = "String::is_empty")]
    pub custom_attribute: String,
}

fn column<T, V>(items: &[T], field: impl Fn(&T) -> V, is_empty: impl Fn(&V) -> bool) -> Vec<V> {
    let values: Vec<V> = items.iter().map(field).collect();
    if values.iter().all(is_empty) {
        Vec::new()
    } else {
        values
    }
}

fn strings<T>(items: &[T], field: impl Fn(&T) -> &str) -> Vec<String> {
    column(items, |item| field(item).to_string(), |v| v.is_empty())
}

fn discriminators<T>(items: &[T], field: impl Fn(&T) -> Discriminator) -> Vec<Discriminator> {
    column(items, field, Discriminator::is_zero)
}

fn email_list(list: &Option<EmailAddresses>) -> &[EmailAddress] {
    list.as_ref().map(|l| l.email_address.as_slice()).unwrap_or(&[])
}

fn phone_list(list: &Option<PhoneNumbers>) -> &[PhoneNumber] {
    list.as_ref().map(|l| l.phone_number.as_slice()).unwrap_or(&[])
}

impl From<&Account> for FlatAccount {
    fn from(account: &Account) -> Self {
        let emails = email_list(&account.email_addresses);
        let phones = phone_list(&account.phone_numbers);
        let addresses: &[Address] = account
            .addresses
            .as_ref()
            .map(|l| l.address.as_slice())
            .unwrap_or(&[]);

        FlatAccount {
            id: account.id.clone(),
            name: account.name.clone(),
            number: account.number.clone(),
            email_address: strings(emails, |e| e.email_address.as_str()),
            email_type: discriminators(emails, |e| e.email_type),
            phone_number: strings(phones, |p| p.number.as_str()),
            phone_type: discriminators(phones, |p| p.phone_type),
            city: strings(addresses, |a| a.city.as_str()),
            country: strings(addresses, |a| a.country.as_str()),
            line1: strings(addresses, |a| a.line1.as_str()),
            line2: strings(addresses, |a| a.line2.as_str()),
            line3: strings(addresses, |a| a.line3.as_str()),
            postal_code: strings(addresses, |a| a.postal_code.as_str()),
            state: strings(addresses, |a| a.state.as_str()),
            kind: strings(addresses, |a| a.kind.as_str()),
            custom_attribute: account.custom_attribute.clone(),
        }
    }
}

impl From<&Contact> for FlatContact {
    fn from(contact: &Contact) -> Self {
        let emails = email_list(&contact.email_addresses);
        let phones = phone_list(&contact.phone_numbers);
        let address = contact.address.clone().unwrap_or_default();

        FlatContact {
            email_address: strings(emails, |e| e.email_address.as_str()),
            email_type: discriminators(emails, |e| e.email_type),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            full_name: contact.full_name.clone(),
            id: contact.id.clone(),
            phone_number: strings(phones, |p| p.number.as_str()),
            phone_type: discriminators(phones, |p| p.phone_type),
            city: address.city,
            country: address.country,
            line1: address.line1,
            line2: address.line2,
            line3: address.line3,
            postal_code: address.postal_code,
            state: address.state,
            kind: address.kind,
            custom_attribute: contact.custom_attribute.clone(),
        }
    }
}
