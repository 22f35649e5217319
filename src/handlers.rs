use crate::config::CannedBodies;
use crate::error::DipError;
use crate::model::{AccountByAccountNumberRequest, ContactByPhoneNumberRequest};
use crate::response::{json_response, not_implemented_response, text_response};
use crate::router::Route;
use bytes::Bytes;
use http::{Request, Response, StatusCode};
use log::{debug, info, warn};
use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde_json::Value;
#[cfg(feature = "trace")]
use tracing::instrument;

#[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
pub fn handle(
    route: Route,
    request: &Request<Bytes>,
    bodies: &CannedBodies,
) -> Result<Response<Bytes>, DipError> {
    let body = request.body();
    match route {
        Route::GetAccountByAccountNumber => get_account_by_account_number(body, bodies),
        Route::GetContactByPhoneNumber => get_contact_by_phone_number(body, bodies),
        Route::GetAccountByContactId
        | Route::GetAccountByPhoneNumber
        | Route::GetMostRecentOpenCaseByContactId => not_implemented_response(),
    }
}

/// Decodes the first JSON value in the body into a request envelope.
///
/// Anything after the first value is ignored. `null` yields the default
/// request, a repeated key keeps its last value, and any non-object value
/// is rejected.
pub fn decode_body<T>(body: &[u8]) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
    let value = match values.next() {
        Some(value) => value?,
        None => return Err(serde_json::Error::custom("EOF")),
    };

    match value {
        Value::Null => Ok(T::default()),
        Value::Object(map) => serde_json::from_value(Value::Object(map)),
        Value::Array(_) => Err(not_an_object(Unexpected::Seq)),
        Value::Bool(b) => Err(not_an_object(Unexpected::Bool(b))),
        Value::String(ref s) => Err(not_an_object(Unexpected::Str(s))),
        Value::Number(_) => Err(not_an_object(Unexpected::Other("number"))),
    }
}

fn not_an_object(unexpected: Unexpected) -> serde_json::Error {
    serde_json::Error::invalid_type(unexpected, &"a JSON object")
}

fn bad_request(err: serde_json::Error) -> Result<Response<Bytes>, DipError> {
    warn!("Failed to decode JSON request body: {}", err);
    text_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn get_account_by_account_number(
    body: &[u8],
    bodies: &CannedBodies,
) -> Result<Response<Bytes>, DipError> {
    info!("Processing {}...", Route::GetAccountByAccountNumber.path());

    let req: AccountByAccountNumberRequest = match decode_body(body) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    debug!(
        "AccountNumber: {:?} CustomAttribute: {:?}",
        req.account_number, req.custom_attribute
    );

    info!("Sending reply from {}...", Route::GetAccountByAccountNumber.path());
    json_response(StatusCode::OK, bodies.account.clone())
}

fn get_contact_by_phone_number(
    body: &[u8],
    bodies: &CannedBodies,
) -> Result<Response<Bytes>, DipError> {
    info!("Processing {}...", Route::GetContactByPhoneNumber.path());

    let req: ContactByPhoneNumberRequest = match decode_body(body) {
        Ok(req) => req,
        Err(err) => return bad_request(err),
    };
    debug!(
        "PhoneNumber: {:?} CustomAttribute: {:?}",
        req.phone_number, req.custom_attribute
    );

    info!("Sending reply from {}...", Route::GetContactByPhoneNumber.path());
    json_response(StatusCode::OK, bodies.contact.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResponseShape;
    use crate::router::ROUTES;
    use std::error::Error;

    fn post(route: Route, body: &'static str) -> Request<Bytes> {
        Request::post(route.path())
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn test_account_ignores_input() -> Result<(), Box<dyn Error>> {
        let bodies = CannedBodies::build(ResponseShape::Nested)?;
        for body in [
            r#"{"AccountNumber":"999"}"#,
            r#"{"AccountNumber":"123","CustomAttribute":"abc"}"#,
            r#"{}"#,
            r#"{"AccountNumber":"1"} trailing"#,
            "null",
            r#"{"AccountNumber":null}"#,
            r#"{"AccountNumber":"1","AccountNumber":"2"}"#,
        ] {
            let response = handle(
                Route::GetAccountByAccountNumber,
                &post(Route::GetAccountByAccountNumber, body),
                &bodies,
            )?;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()["content-type"], "application/json");
            assert_eq!(response.body(), &bodies.account);
        }
        Ok(())
    }

    #[test]
    fn test_account_malformed_body() -> Result<(), Box<dyn Error>> {
        let bodies = CannedBodies::build(ResponseShape::Nested)?;
        for body in [
            "not-json",
            "",
            "{\"AccountNumber\":",
            r#"{"AccountNumber":999}"#,
            "[1,2]",
            r#"["999"]"#,
            "[]",
            "true",
            "42",
            r#""999""#,
        ] {
            let response = handle(
                Route::GetAccountByAccountNumber,
                &post(Route::GetAccountByAccountNumber, body),
                &bodies,
            )?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(response.body().len() > 1);
            assert!(response.body().ends_with(b"\n"));
        }
        Ok(())
    }

    #[test]
    fn test_contact() -> Result<(), Box<dyn Error>> {
        let bodies = CannedBodies::build(ResponseShape::Flat)?;
        let response = handle(
            Route::GetContactByPhoneNumber,
            &post(Route::GetContactByPhoneNumber, r#"{"PhoneNumber":"+15550100"}"#),
            &bodies,
        )?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), &bodies.contact);

        let response = handle(
            Route::GetContactByPhoneNumber,
            &post(Route::GetContactByPhoneNumber, "nope"),
            &bodies,
        )?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[test]
    fn test_stubs_are_not_implemented() -> Result<(), Box<dyn Error>> {
        let bodies = CannedBodies::build(ResponseShape::Nested)?;
        let stubs = ROUTES.iter().filter(|route| {
            !matches!(
                route,
                Route::GetAccountByAccountNumber | Route::GetContactByPhoneNumber
            )
        });
        for route in stubs {
            for body in [r#"{"ContactId":"42"}"#, "garbage", ""] {
                let response = handle(*route, &post(*route, body), &bodies)?;
                assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
                assert_eq!(response.body().as_ref(), b"501\n");
            }
        }
        Ok(())
    }

    #[test]
    fn test_decode_empty_is_eof() {
        let err = decode_body::<AccountByAccountNumberRequest>(b"  ").unwrap_err();
        assert_eq!(err.to_string(), "EOF");
    }

    #[test]
    fn test_decode_last_duplicate_wins() -> Result<(), Box<dyn Error>> {
        let req: ContactByPhoneNumberRequest =
            decode_body(br#"{"PhoneNumber":"+1","PhoneNumber":"+2"}"#)?;
        assert_eq!(req.phone_number, "+2");

        let req: ContactByPhoneNumberRequest = decode_body(b"null")?;
        assert_eq!(req.phone_number, "");
        Ok(())
    }
}
