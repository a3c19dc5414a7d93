use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream, ToSocketAddrs,
    },
};

use crate::exofinder_errors::ExofinderError;

/// Connection to a running exoplanet service.
///
/// Several requests can be sent over the same connection as long as each one carries
/// `"stay_alive": true`; otherwise the service closes the session after its reply.
pub struct ExofinderClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl ExofinderClient {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ExofinderError> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, writer) = stream.into_split();
        Ok(ExofinderClient {
            reader: BufReader::new(read_half),
            writer,
        })
    }

    /// Send one raw JSON request and wait for the reply line.
    ///
    /// Return
    /// ------
    /// * `Some(reply)` without its trailing newline.
    /// * `None` if the service closed the session without replying (malformed request).
    pub async fn request(&mut self, request: &str) -> Result<Option<String>, ExofinderError> {
        self.writer.write_all(request.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end().to_string()))
    }
}

/// One-shot exchange: connect, send `request`, return the reply.
pub async fn send_request(
    addr: impl ToSocketAddrs,
    request: &str,
) -> Result<Option<String>, ExofinderError> {
    ExofinderClient::connect(addr).await?.request(request).await
}
