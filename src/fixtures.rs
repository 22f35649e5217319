use crate::model::{
    Account, Address, Addresses, Contact, Discriminator, EmailAddress, EmailAddresses, PhoneNumber,
    PhoneNumbers,
};

fn address(
    city: &str,
    country: &str,
    line1: &str,
    line2: &str,
    postal_code: &str,
    state: &str,
    kind: &str,
) -> Address {
    Address {
        city: city.to_string(),
        country: country.to_string(),
        line1: line1.to_string(),
        line2: line2.to_string(),
        line3: String::new(),
        postal_code: postal_code.to_string(),
        state: state.to_string(),
        kind: kind.to_string(),
    }
}

fn phone(number: &str, phone_type: f32) -> PhoneNumber {
    PhoneNumber {
        number: number.to_string(),
        phone_type: phone_type.into(),
    }
}

fn emails() -> EmailAddresses {
    EmailAddresses {
        email_address: vec![EmailAddress {
            email_address: "szemin.ng@inin.com".to_string(),
            email_type: Discriminator(1.0),
        }],
    }
}

/// Account answered for every account lookup.
pub fn account() -> Account {
    Account {
        id: "123".to_string(),
        name: "Ng Sze Min".to_string(),
        number: "123".to_string(),
        email_addresses: Some(emails()),
        phone_numbers: Some(PhoneNumbers {
            phone_number: vec![phone("+60327763333", 1.0), phone("+18002671364", 2.0)],
        }),
        addresses: Some(Addresses {
            address: vec![
                address(
                    "Kuala Lumpur",
                    "Malaysia",
                    "Unit 9.1, Level 9, Menara Prestige",
                    "No. 1, Jalan Pinang",
                    "50450",
                    "FT",
                    "MY",
                ),
                address(
                    "Indianapolis",
                    "United States",
                    "7601 Interactive Way",
                    "",
                    "46278",
                    "IN",
                    "US",
                ),
            ],
        }),
        custom_attribute: "Custom data here".to_string(),
    }
}

/// Contact answered for every contact lookup.
pub fn contact() -> Contact {
    Contact {
        email_addresses: Some(emails()),
        first_name: "Sze Min".to_string(),
        last_name: "Ng".to_string(),
        full_name: "Ng Sze Min".to_string(),
        id: "1234567890".to_string(),
        phone_numbers: Some(PhoneNumbers {
            phone_number: vec![phone("+60327763333", 1.0), phone("+60327763324", 2.0)],
        }),
        address: Some(address(
            "Kuala Lumpur",
            "Malaysia",
            "Unit 9.1, Level 9, Menara Prestige",
            "No. 1, Jalan Pinang",
            "50450",
            "FT",
            "",
        )),
        custom_attribute: String::new(),
    }
}
