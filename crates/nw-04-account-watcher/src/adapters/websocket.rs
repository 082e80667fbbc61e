//! WebSocket push channel.
//!
//! A reader task turns incoming frames into [`ChannelEvent`]s; a writer task
//! drains outgoing frames so `send_text` never holds the socket. Reconnecting
//! is left to the owner: connect again and feed the new event stream.

use crate::domain::{ChannelConfig, ChannelEvent, WatcherError};
use crate::ports::PushChannel;
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use rustls::{ClientConfig, RootCertStore};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async_tls_with_config, Connector};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{header::AUTHORIZATION, HeaderValue};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Push channel over a WebSocket connection.
#[derive(Debug, Clone)]
pub struct WsPushChannel {
    outgoing: mpsc::UnboundedSender<Message>,
    connected: Arc<AtomicBool>,
}

impl WsPushChannel {
    /// Connect and start the reader and writer tasks.
    ///
    /// The returned stream starts with [`ChannelEvent::Connected`] and ends
    /// with [`ChannelEvent::Closed`].
    pub async fn connect(
        config: &ChannelConfig,
    ) -> Result<(Self, mpsc::Receiver<ChannelEvent>), WatcherError> {
        config.validate()?;

        let mut request = config
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| WatcherError::Channel(format!("{}: {e}", config.url)))?;
        if let Some(authorization) = &config.authorization {
            let value = HeaderValue::from_str(authorization)
                .map_err(|e| WatcherError::Channel(format!("authorization header: {e}")))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        let connector = connector_for(config)?;
        let (stream, _) = connect_async_tls_with_config(request, None, false, Some(connector))
            .await
            .map_err(|e| WatcherError::Channel(format!("failed to connect to {}: {e}", config.url)))?;
        info!(url = %config.url, "Push channel connected");

        let (mut write, mut read) = stream.split();
        let (event_tx, event_rx) = mpsc::channel(config.event_buffer);
        let (outgoing, mut outgoing_rx) = mpsc::unbounded_channel::<Message>();
        let connected = Arc::new(AtomicBool::new(true));

        event_tx
            .send(ChannelEvent::Connected)
            .await
            .map_err(|_| WatcherError::Channel("event receiver dropped".into()))?;

        tokio::spawn(async move {
            while let Some(message) = outgoing_rx.recv().await {
                if let Err(e) = write.send(message).await {
                    warn!(error = %e, "Push channel write failed");
                    break;
                }
            }
            let _ = write.close().await;
        });

        let reader_connected = Arc::clone(&connected);
        let pong = outgoing.clone();
        tokio::spawn(async move {
            let was_clean = loop {
                match read.next().await {
                    Some(Ok(Message::Text(text))) => {
                        if event_tx
                            .send(ChannelEvent::Frame(text.as_str().to_owned()))
                            .await
                            .is_err()
                        {
                            break true;
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = pong.send(Message::Pong(data));
                    }
                    Some(Ok(Message::Close(_))) => break true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "Push channel read failed");
                        break false;
                    }
                    None => break false,
                }
            };
            reader_connected.store(false, Ordering::SeqCst);
            debug!(was_clean, "Push channel closed");
            let _ = event_tx.send(ChannelEvent::Closed { was_clean }).await;
        });

        Ok((
            Self {
                outgoing,
                connected,
            },
            event_rx,
        ))
    }

    /// Close the connection. The event stream ends with `Closed`.
    pub fn close(&self) {
        let _ = self.outgoing.send(Message::Close(None));
    }
}

/// Plain TCP for `ws://`, rustls with the webpki roots for `wss://`.
fn connector_for(config: &ChannelConfig) -> Result<Connector, WatcherError> {
    if !config.is_secure() {
        return Ok(Connector::Plain);
    }

    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let tls = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| WatcherError::Channel(format!("TLS setup: {e}")))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Connector::Rustls(Arc::new(tls)))
}

#[async_trait]
impl PushChannel for WsPushChannel {
    async fn send_text(&self, text: String) -> Result<(), WatcherError> {
        if !self.is_connected() {
            return Err(WatcherError::NotConnected);
        }
        self.outgoing
            .send(Message::Text(text.into()))
            .map_err(|_| WatcherError::Channel("writer task stopped".into()))
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
