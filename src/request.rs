use crate::error::DipError;
use bytes::{Bytes, BytesMut};
use http::header::{CONTENT_LENGTH, EXPECT, TRANSFER_ENCODING};
use http::{Request, StatusCode, Version};
use httparse::Status;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
#[cfg(feature = "trace")]
use tracing::instrument;

pub const BUF_SIZE: usize = 8192;
pub const HEADER_BUF_SIZE: usize = 64;
pub const MAX_HEAD_SIZE: usize = 16 * 1024;
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Reads one request (head and `Content-Length` body) from the socket.
#[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
pub async fn socket_to_request<S>(
    socket: &mut S,
    buffer: &mut BytesMut,
) -> Result<Request<Bytes>, DipError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (request, head_len) = loop {
        if let Some(parsed) = parse_request(buffer)? {
            break parsed;
        }
        if buffer.len() >= MAX_HEAD_SIZE {
            return Err(DipError::request(
                StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
                "Request head too large",
            ));
        }
        read_more(socket, buffer).await?;
    };

    let content_length = content_length(&request)?;
    let _ = buffer.split_to(head_len);

    if buffer.len() < content_length && expects_continue(&request) {
        socket.write_all(b"HTTP/1.1 100 Continue\r\n\r\n").await?;
        socket.flush().await?;
    }

    while buffer.len() < content_length {
        read_more(socket, buffer).await.map_err(|err| match err {
            DipError::ConnectionClosed => DipError::request(
                StatusCode::BAD_REQUEST,
                "Connection closed before request was complete",
            ),
            other => other,
        })?;
    }
    let body = buffer.split_to(content_length).freeze();

    Ok(request.map(|_| body))
}

async fn read_more<S>(socket: &mut S, buffer: &mut BytesMut) -> Result<(), DipError>
where
    S: AsyncRead + Unpin,
{
    buffer.reserve(BUF_SIZE);
    let n = socket.read_buf(buffer).await?;
    if n == 0 {
        return if buffer.is_empty() {
            Err(DipError::ConnectionClosed)
        } else {
            Err(DipError::request(
                StatusCode::BAD_REQUEST,
                "Connection closed before request was complete",
            ))
        };
    }
    Ok(())
}

/// Parses the request head. `None` means more bytes are needed.
#[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
pub fn parse_request(buf: &[u8]) -> Result<Option<(Request<()>, usize)>, DipError> {
    let mut headers = [httparse::EMPTY_HEADER; HEADER_BUF_SIZE];
    let mut req = httparse::Request::new(&mut headers);

    match req.parse(buf) {
        Ok(Status::Complete(head_len)) => {
            let method = req.method.ok_or(DipError::request(
                StatusCode::BAD_REQUEST,
                "Missing method",
            ))?;
            let path = req
                .path
                .ok_or(DipError::request(StatusCode::BAD_REQUEST, "Missing path"))?;
            let version = match req.version {
                Some(0) => Version::HTTP_10,
                Some(1) => Version::HTTP_11,
                _ => {
                    return Err(DipError::request(
                        StatusCode::HTTP_VERSION_NOT_SUPPORTED,
                        "Unsupported HTTP version",
                    ))
                }
            };

            let mut builder = Request::builder().method(method).uri(path).version(version);
            for header in req.headers.iter() {
                builder = builder.header(header.name, header.value);
            }

            Ok(Some((builder.body(())?, head_len)))
        }
        Ok(Status::Partial) => Ok(None),
        Err(httparse::Error::TooManyHeaders) => Err(DipError::request(
            StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,
            "Too many headers",
        )),
        Err(err) => Err(DipError::request(StatusCode::BAD_REQUEST, err.to_string())),
    }
}

fn content_length(request: &Request<()>) -> Result<usize, DipError> {
    if request.headers().contains_key(TRANSFER_ENCODING) {
        return Err(DipError::request(
            StatusCode::LENGTH_REQUIRED,
            "Transfer-Encoding bodies are not supported",
        ));
    }

    match request.headers().get(CONTENT_LENGTH) {
        None => Ok(0),
        Some(value) => {
            let length = value
                .to_str()
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .ok_or(DipError::request(
                    StatusCode::BAD_REQUEST,
                    "Invalid Content-Length",
                ))?;
            if length > MAX_BODY_SIZE {
                return Err(DipError::request(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Request body too large",
                ));
            }
            Ok(length)
        }
    }
}

fn expects_continue(request: &Request<()>) -> bool {
    request
        .headers()
        .get(EXPECT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("100-continue"))
        .unwrap_or(false)
}
