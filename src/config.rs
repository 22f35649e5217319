use crate::error::DipError;
use crate::fixtures;
use crate::model::flat::{FlatAccount, FlatContact};
use crate::model::{AccountResponse, ContactResponse};
use bytes::Bytes;
use clap::{Parser, ValueEnum};
use log::debug;
#[cfg(feature = "trace")]
use tracing::instrument;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: usize = 10000;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Field layout of the canned documents
    #[arg(long, env = "RESPONSE_SHAPE", value_enum, default_value_t = ResponseShape::Nested)]
    pub shape: ResponseShape,

    /// Maximum number of connections served at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: usize,
}

/// How account and contact documents are laid out on the wire.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseShape {
    /// `{"Account":{"PhoneNumbers":{"PhoneNumber":[...]}}}`
    #[default]
    Nested,
    /// `{"Account.PhoneNumbers.PhoneNumber.Number":[...]}`
    Flat,
}

/// Response bodies serialized once at startup and shared by every connection.
#[derive(Debug, Clone)]
pub struct CannedBodies {
    pub account: Bytes,
    pub contact: Bytes,
}

impl CannedBodies {
    #[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
    pub fn build(shape: ResponseShape) -> Result<Self, DipError> {
        let account = fixtures::account();
        let contact = fixtures::contact();

        let (account, contact) = match shape {
            ResponseShape::Nested => (
                serde_json::to_vec(&AccountResponse { account })?,
                serde_json::to_vec(&ContactResponse { contact })?,
            ),
            ResponseShape::Flat => (
                serde_json::to_vec(&FlatAccount::from(&account))?,
                serde_json::to_vec(&FlatContact::from(&contact))?,
            ),
        };

        #[cfg(debug_assertions)]
        debug!("Canned account ({:?}): {}", shape, String::from_utf8_lossy(&account));

        Ok(CannedBodies {
            account: Bytes::from(account),
            contact: Bytes::from(contact),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    const NESTED_ACCOUNT: &str = concat!(
        r#"{"Account":{"Id":"123","Name":"Ng Sze Min","Number":"123","#,
        r#""EmailAddresses":{"EmailAddress":[{"EmailAddress":"szemin.ng@inin.com","EmailType":1}]},"#,
        r#""PhoneNumbers":{"PhoneNumber":[{"Number":"+60327763333","PhoneType":1},{"Number":"+18002671364","PhoneType":2}]},"#,
        r#""Addresses":{"Address":[{"City":"Kuala Lumpur","Country":"Malaysia","Line1":"Unit 9.1, Level 9, Menara Prestige","Line2":"No. 1, Jalan Pinang","PostalCode":"50450","State":"FT","Type":"MY"},"#,
        r#"{"City":"Indianapolis","Country":"United States","Line1":"7601 Interactive Way","PostalCode":"46278","State":"IN","Type":"US"}]},"#,
        r#""CustomAttribute":"Custom data here"}}"#
    );

    const NESTED_CONTACT: &str = concat!(
        r#"{"Contact":{"EmailAddresses":{"EmailAddress":[{"EmailAddress":"szemin.ng@inin.com","EmailType":1}]},"#,
        r#""FirstName":"Sze Min","LastName":"Ng","FullName":"Ng Sze Min","Id":"1234567890","#,
        r#""PhoneNumbers":{"PhoneNumber":[{"Number":"+60327763333","PhoneType":1},{"Number":"+60327763324","PhoneType":2}]},"#,
        r#""Address":{"City":"Kuala Lumpur","Country":"Malaysia","Line1":"Unit 9.1, Level 9, Menara Prestige","Line2":"No. 1, Jalan Pinang","PostalCode":"50450","State":"FT"}}}"#
    );

    const FLAT_ACCOUNT: &str = concat!(
        r#"{"Account.Id":"123","Account.Name":"Ng Sze Min","Account.Number":"123","#,
        r#""Account.EmailAddresses.EmailAddress.EmailAddress":["szemin.ng@inin.com"],"#,
        r#""Account.EmailAddresses.EmailAddress.EmailType":[1],"#,
        r#""Account.PhoneNumbers.PhoneNumber.Number":["+60327763333","+18002671364"],"#,
        r#""Account.PhoneNumbers.PhoneNumber.PhoneType":[1,2],"#,
        r#""Account.Addresses.Address.City":["Kuala Lumpur","Indianapolis"],"#,
        r#""Account.Addresses.Address.Country":["Malaysia","United States"],"#,
        r#""Account.Addresses.Address.Line1":["Unit 9.1, Level 9, Menara Prestige","7601 Interactive Way"],"#,
        r#""Account.Addresses.Address.Line2":["No. 1, Jalan Pinang",""],"#,
        r#""Account.Addresses.Address.PostalCode":["50450","46278"],"#,
        r#""Account.Addresses.Address.State":["FT","IN"],"#,
        r#""Account.Addresses.Address.Type":["MY","US"],"#,
        r#""Account.CustomAttribute":"Custom data here"}"#
    );

    const FLAT_CONTACT: &str = concat!(
        r#"{"Contact.EmailAddresses.EmailAddress.EmailAddress":["szemin.ng@inin.com"],"#,
        r#""Contact.EmailAddresses.EmailAddress.EmailType":[1],"#,
        r#""Contact.FirstName":"Sze Min","Contact.LastName":"Ng","#,
        r#""Contact.FullName":"Ng Sze Min","Contact.Id":"1234567890","#,
        r#""Contact.PhoneNumbers.PhoneNumber.Number":["+60327763333","+60327763324"],"#,
        r#""Contact.PhoneNumbers.PhoneNumber.PhoneType":[1,2],"#,
        r#""Contact.Address.City":"Kuala Lumpur","Contact.Address.Country":"Malaysia","#,
        r#""Contact.Address.Line1":"Unit 9.1, Level 9, Menara Prestige","#,
        r#""Contact.Address.Line2":"No. 1, Jalan Pinang","#,
        r#""Contact.Address.PostalCode":"50450","Contact.Address.State":"FT"}"#
    );

    #[test]
    fn test_nested_bodies() -> Result<(), Box<dyn Error>> {
        let bodies = CannedBodies::build(ResponseShape::Nested)?;
        assert_eq!(bodies.account, NESTED_ACCOUNT.as_bytes());
        assert_eq!(bodies.contact, NESTED_CONTACT.as_bytes());
        Ok(())
    }

    #[test]
    fn test_flat_bodies() -> Result<(), Box<dyn Error>> {
        let bodies = CannedBodies::build(ResponseShape::Flat)?;
        assert_eq!(bodies.account, FLAT_ACCOUNT.as_bytes());
        assert_eq!(bodies.contact, FLAT_CONTACT.as_bytes());
        Ok(())
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["dipmock"]);
        assert_eq!(args.shape, ResponseShape::Nested);
        assert_eq!(args.max_connections, DEFAULT_MAX_CONNECTIONS);

        let args = Args::parse_from(["dipmock", "--port", "9090", "--shape", "flat"]);
        assert_eq!(args.port, 9090);
        assert_eq!(args.shape, ResponseShape::Flat);
    }
}
