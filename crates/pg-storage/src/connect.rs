use crate::error::{ConnectorError, StorageError};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{Client, Config, NoTls, Socket, config::SslMode, tls::MakeTlsConnect};
use tracing::{debug, error, warn};

/// Handshake strategy derived from the URL's `sslmode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TlsPolicy {
    Never,
    /// Try TLS, reconnect in plain text when the handshake fails.
    Preferred,
    Required,
}

impl TlsPolicy {
    fn for_config(config: &Config) -> Self {
        match config.get_ssl_mode() {
            SslMode::Disable => TlsPolicy::Never,
            SslMode::Prefer => TlsPolicy::Preferred,
            _ => TlsPolicy::Required,
        }
    }
}

pub(crate) async fn connect_client(url: &str) -> Result<Client, StorageError> {
    let config = url
        .parse::<Config>()
        .map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;
    let policy = TlsPolicy::for_config(&config);
    debug!(?policy, "Opening PostgreSQL connection");

    let client = match policy {
        TlsPolicy::Never => open(&config, NoTls).await?,
        TlsPolicy::Required => open(&config, tls()?).await?,
        TlsPolicy::Preferred => match open(&config, tls()?).await {
            Ok(client) => client,
            Err(error) => {
                warn!(%error, "TLS handshake failed, retrying without TLS");
                open(&config, NoTls).await?
            }
        },
    };
    Ok(client)
}

fn tls() -> Result<MakeTlsConnector, ConnectorError> {
    Ok(MakeTlsConnector::new(TlsConnector::builder().build()?))
}

/// Connects and drives the connection on its own task for the client's lifetime.
async fn open<T>(config: &Config, tls: T) -> Result<Client, ConnectorError>
where
    T: MakeTlsConnect<Socket>,
    T::Stream: Send + 'static,
{
    let (client, connection) = config.connect(tls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Connection closed with error");
        }
    });
    Ok(client)
}
