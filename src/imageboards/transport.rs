//! Raw HTTP access
//!
//! A [`Transport`] executes a single GET and hands back the body untouched. It doesn't retry,
//! doesn't impose timeouts and doesn't look at the status code: an error page with a body is
//! passed along to the decoder like any other response.
use crate::imageboards::error::TransportError;
use crate::imageboards::query::redact;
use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::Client;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns the raw response body.
    async fn get(&self, url: &str) -> Result<Bytes, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a client that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the used client for external use.
    pub fn client(&self) -> Client {
        self.client.clone()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        debug!("GET {}", redact(url));

        let response = self.client.get(url).send().await?;
        debug!("Server answered {}", response.status());

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    async fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        (**self).get(url).await
    }
}
