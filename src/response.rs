use crate::error::DipError;
use bytes::Bytes;
use http::header::{ALLOW, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use log::{debug, info};
use tokio::io::{AsyncWrite, AsyncWriteExt};
#[cfg(feature = "trace")]
use tracing::instrument;

pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub async fn send_response<S>(socket: &mut S, response: Response<Bytes>) -> Result<(), DipError>
where
    S: AsyncWrite + Unpin,
{
    write_response(socket, response, false).await
}

/// Writes the status line and headers, then the body unless `omit_body` is
/// set. `Content-Length` always reflects the full body, as HEAD requires.
#[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
pub async fn write_response<S>(
    socket: &mut S,
    response: Response<Bytes>,
    omit_body: bool,
) -> Result<(), DipError>
where
    S: AsyncWrite + Unpin,
{
    let (mut parts, body) = response.into_parts();
    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    parts
        .headers
        .insert(CONNECTION, HeaderValue::from_static("close"));

    // Estimate capacity to reduce reallocations
    let mut resp_bytes = Vec::with_capacity(128 + body.len());
    resp_bytes.extend_from_slice(b"HTTP/1.1 ");
    let mut itoa_buf = itoa::Buffer::new();
    resp_bytes.extend_from_slice(itoa_buf.format(parts.status.as_u16()).as_bytes());
    resp_bytes.extend_from_slice(b" ");
    resp_bytes.extend_from_slice(parts.status.canonical_reason().unwrap_or("").as_bytes());
    resp_bytes.extend_from_slice(b"\r\n");

    for (key, value) in parts.headers.iter() {
        resp_bytes.extend_from_slice(key.as_str().as_bytes());
        resp_bytes.extend_from_slice(b": ");
        resp_bytes.extend_from_slice(value.as_bytes());
        resp_bytes.extend_from_slice(b"\r\n");
    }

    resp_bytes.extend_from_slice(b"\r\n");
    if !omit_body {
        resp_bytes.extend_from_slice(&body);
    }

    socket.write_all(&resp_bytes).await?;
    socket.flush().await?;

    Ok(())
}

pub fn json_response(status: StatusCode, body: Bytes) -> Result<Response<Bytes>, DipError> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(body)?)
}

/// Plain-text response; the body is newline-terminated.
pub fn text_response(status: StatusCode, text: &str) -> Result<Response<Bytes>, DipError> {
    let mut body = String::with_capacity(text.len() + 1);
    body.push_str(text);
    body.push('\n');
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .body(Bytes::from(body))?)
}

/// 501 with the numeric status echoed as the body.
pub fn not_implemented_response() -> Result<Response<Bytes>, DipError> {
    let mut itoa_buf = itoa::Buffer::new();
    let code = itoa_buf.format(StatusCode::NOT_IMPLEMENTED.as_u16());
    text_response(StatusCode::NOT_IMPLEMENTED, code)
}

pub fn method_not_allowed_response(allow: &Method) -> Result<Response<Bytes>, DipError> {
    let mut response = error_response(StatusCode::METHOD_NOT_ALLOWED)?;
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_str(allow.as_str())?);
    Ok(response)
}

#[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
pub fn error_response(status: StatusCode) -> Result<Response<Bytes>, DipError> {
    let msg = match status {
        StatusCode::BAD_REQUEST => "Bad request",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::LENGTH_REQUIRED => "Length required",
        StatusCode::PAYLOAD_TOO_LARGE => "Payload too large",
        StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE => "Request header fields too large",
        StatusCode::HTTP_VERSION_NOT_SUPPORTED => "HTTP version not supported",
        _ => "Unknown error",
    };

    text_response(status, msg)
}

pub fn log_request_response<B>(request: &Request<B>, status: StatusCode) {
    #[cfg(debug_assertions)]
    debug!("{:?} {:?} {:?}", request.method(), request.uri(), request.headers());
    info!(
        "Request: {} {} {}",
        request.method(),
        request.uri(),
        status.as_u16()
    );
}
