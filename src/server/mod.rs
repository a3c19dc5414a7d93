//! # Exoplanet service
//!
//! A TCP host around [`Exoplanet::reply`]. Each accepted connection is a **session**
//! handled by its own Tokio task:
//!
//! 1. read once, up to [`ServerConfig::max_request_bytes`] bytes (`0` bytes: peer closed),
//! 2. decode the JSON request; a malformed request is logged and the session is closed
//!    **without** a reply,
//! 3. locate the body and write the compact JSON reply followed by `\n`,
//! 4. keep the session open for another request only if the request carried
//!    `"stay_alive": true`.
//!
//! Sessions are independent: nothing is shared between them but the read-only
//! [`ServerConfig`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use exofinder::server::{Server, ServerConfig};
//!
//! # async fn run() -> Result<(), exofinder::exofinder_errors::ExofinderError> {
//! let server = Server::bind(ServerConfig::default()).await?;
//! server.run_until(async { tokio::signal::ctrl_c().await.ok(); }).await?;
//! # Ok(()) }
//! ```

pub mod client;
pub mod config;

use std::{future::Future, net::SocketAddr, sync::Arc};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    time::timeout,
};
use tracing::{debug, info, warn};

pub use config::{ServerConfig, ServerConfigBuilder};

use crate::{exofinder_errors::ExofinderError, exoplanet::Exoplanet};

/// Bound listener plus its configuration.
pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Bind the listener on `config.bind_addr`.
    pub async fn bind(config: ServerConfig) -> Result<Self, ExofinderError> {
        let listener = TcpListener::bind(&config.bind_addr).await?;
        Ok(Server {
            listener,
            config: Arc::new(config),
        })
    }

    /// Actual bound address (useful with port `0`).
    pub fn local_addr(&self) -> Result<SocketAddr, ExofinderError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept sessions until `shutdown` resolves.
    ///
    /// Sessions already running when `shutdown` fires are left to finish on their own.
    /// An `accept` failure is logged and the loop keeps going.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ExofinderError>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!(%addr, "exoplanet service listening");

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested, no longer accepting sessions");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let config = Arc::clone(&self.config);
                        tokio::spawn(async move {
                            if let Err(e) = handle_session(stream, peer, &config).await {
                                warn!(%peer, error = %e, "session aborted");
                            }
                        });
                    }
                    Err(e) => warn!(error = %e, "failed to accept connection"),
                },
            }
        }

        Ok(())
    }
}

/// Serve one connection until the peer leaves, a request is malformed, or a request
/// does not ask to stay alive.
async fn handle_session(
    mut stream: TcpStream,
    peer: SocketAddr,
    config: &ServerConfig,
) -> Result<(), ExofinderError> {
    debug!(%peer, "session opened");
    let mut buf = vec![0u8; config.max_request_bytes];

    loop {
        let read = match config.idle_timeout {
            Some(limit) => match timeout(limit, stream.read(&mut buf)).await {
                Ok(read) => read?,
                Err(_) => {
                    debug!(%peer, "idle timeout, closing session");
                    break;
                }
            },
            None => stream.read(&mut buf).await?,
        };

        if read == 0 {
            debug!(%peer, "peer closed the session");
            break;
        }

        let mut planet = match Exoplanet::from_request_bytes(&buf[..read]) {
            Ok(planet) => planet,
            Err(e) => {
                warn!(%peer, error = %e, "malformed request, closing session without reply");
                break;
            }
        };

        let mut reply = planet.reply()?;
        if planet.is_located() {
            debug!(%peer, distance = ?planet.distance, ra = ?planet.ra, "body located");
        } else {
            warn!(
                %peer,
                eccentricity = planet.eccentricity,
                "kepler solver failed, replying with error"
            );
        }

        reply.push('\n');
        stream.write_all(reply.as_bytes()).await?;

        if !planet.stay_alive {
            break;
        }
    }

    stream.shutdown().await.ok();
    debug!(%peer, "session closed");
    Ok(())
}
