//! Connection establishment.
//!
//! The dispatcher only ever sees a boxed byte stream; how it was obtained
//! (plain TCP, TLS, an in-memory pipe in tests) is the connector's business.

use crate::config::ConnectionConfig;
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tracing::{debug, info, warn};

/// Any duplex byte stream a connection can run over.
pub trait AsyncStream: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> AsyncStream for T {}

/// Type-erased connection stream.
pub type BoxedStream = Box<dyn AsyncStream>;

/// Opens the byte stream for a connection.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, config: &ConnectionConfig) -> io::Result<BoxedStream>;
}

/// TCP connector with optional TLS using the platform trust store.
pub struct TcpConnector {
    tls: TlsConnector,
}

impl TcpConnector {
    /// Build a connector, loading system root certificates once.
    pub fn new() -> Self {
        let mut roots = RootCertStore::empty();
        let certs = rustls_native_certs::load_native_certs();
        for cert in certs.certs {
            if let Err(e) = roots.add(cert) {
                warn!("Failed to add root cert: {}", e);
            }
        }
        for e in &certs.errors {
            warn!("Error loading native certs: {}", e);
        }
        debug!(roots = roots.len(), "Loaded native root certificates");

        let config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        Self {
            tls: TlsConnector::from(Arc::new(config)),
        }
    }
}

impl Default for TcpConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, config: &ConnectionConfig) -> io::Result<BoxedStream> {
        let tcp = TcpStream::connect(config.server.as_str()).await?;
        tcp.set_nodelay(true)?;

        if !config.tls {
            info!(server = %config.server, "TCP connection established");
            return Ok(Box::new(tcp));
        }

        let server_name = ServerName::try_from(config.host().to_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let stream = self.tls.connect(server_name, tcp).await?;
        info!(server = %config.server, "TLS handshake completed");
        Ok(Box::new(stream))
    }
}
