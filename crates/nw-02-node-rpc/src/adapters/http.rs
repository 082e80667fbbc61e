//! HTTP node transport over reqwest.

use crate::domain::{ConfigError, NodeConnection, RpcRequest, TransportError};
use crate::ports::NodeRpc;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Posts JSON request bodies to the node or work server.
pub struct HttpNodeRpc {
    client: Client,
    connection: NodeConnection,
}

impl HttpNodeRpc {
    /// Create a transport for a validated connection.
    pub fn new(connection: NodeConnection) -> Result<Self, ConfigError> {
        connection.validate()?;
        let client = Client::builder()
            .timeout(connection.timeout)
            .connect_timeout(connection.connect_timeout)
            .build()
            .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        Ok(Self { client, connection })
    }

    /// Connection settings.
    pub fn connection(&self) -> &NodeConnection {
        &self.connection
    }
}

#[async_trait]
impl NodeRpc for HttpNodeRpc {
    async fn call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        let url = self.connection.url_for(request.endpoint());
        let body = request
            .to_json()
            .map_err(|e| TransportError::Encode(e.to_string()))?;

        debug!(action = request.action(), url = %url, "Sending node request");

        let mut builder = self.client.post(url).json(&body);
        if let Some(auth) = &self.connection.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(action = request.action(), status = status.as_u16(), "Node request failed");
            return Err(TransportError::Status {
                code: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}
