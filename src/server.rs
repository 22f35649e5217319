use crate::config::CannedBodies;
use crate::error::DipError;
use crate::handlers;
use crate::request::{socket_to_request, BUF_SIZE};
use crate::response::{
    error_response, log_request_response, method_not_allowed_response, send_response,
    write_response,
};
use crate::router::{self, Resolution};
use bytes::BytesMut;
use http::{Method, StatusCode};
use log::{debug, error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
#[cfg(feature = "trace")]
use tracing::instrument;

/// State shared read-only by every connection.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bodies: CannedBodies,
}

/// Pause after a failed accept, e.g. when the process is out of descriptors.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct ServerWorker {
    listener: TcpListener,
    settings: Arc<ServerSettings>,
}

impl ServerWorker {
    #[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
    pub async fn bind(port: u16, settings: ServerSettings) -> Result<Self, DipError> {
        let addr = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&addr).await?;
        Ok(ServerWorker {
            listener,
            settings: Arc::new(settings),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DipError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections on a background task until the runtime shuts down.
    /// The returned handle only completes if the accept loop gives up.
    #[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
    pub fn run(self, max_connections: usize) -> JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(err) = init_server(self.listener, self.settings, max_connections).await {
                error!("Error: {}", err);
            }
        })
    }
}

async fn init_server(
    listener: TcpListener,
    settings: Arc<ServerSettings>,
    max_connections: usize,
) -> Result<(), DipError> {
    let semaphore = Arc::new(Semaphore::new(max_connections));

    loop {
        let permit = semaphore.clone().acquire_owned().await?;
        let mut stream = match listener.accept().await {
            Ok((stream, _)) => stream,
            Err(err) => {
                warn!("Failed to accept connection: {}", err);
                drop(permit);
                sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        let settings = settings.clone();
        tokio::spawn(async move {
            let _permit = permit;
            if let Err(err) = connection_process(&mut stream, &settings).await {
                debug!("Connection error: {}", err);
            }
        });
    }
}

/// Serves a single request on the connection.
#[cfg_attr(feature = "trace", instrument(level = "trace", skip_all))]
pub async fn connection_process<S>(socket: &mut S, settings: &ServerSettings) -> Result<(), DipError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = BytesMut::with_capacity(BUF_SIZE);
    match socket_to_request(socket, &mut buffer).await {
        Err(DipError::ConnectionClosed) => Ok(()),
        Err(err) => {
            let status = err.status_code();
            send_response(socket, error_response(status)?).await?;
            info!("Response: {}", status.as_u16());
            Err(err)
        }
        Ok(request) => {
            let response = match router::resolve(request.method(), request.uri().path()) {
                Resolution::Matched(route) => handlers::handle(route, &request, &settings.bodies)?,
                Resolution::MethodNotAllowed(allow) => method_not_allowed_response(&allow)?,
                Resolution::NotFound => error_response(StatusCode::NOT_FOUND)?,
            };

            let status = response.status();
            let omit_body = request.method() == Method::HEAD;
            match write_response(socket, response, omit_body).await {
                Ok(()) => {
                    log_request_response(&request, status);
                    Ok(())
                }
                Err(err) => {
                    log_request_response(&request, StatusCode::INTERNAL_SERVER_ERROR);
                    Err(err)
                }
            }
        }
    }
}
