use crate::utils::error::Result;
use crate::utils::validation::CEP_PLACEHOLDER;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub fn build_client(upstream_timeout: Duration) -> Result<Client> {
    let client = Client::builder().timeout(upstream_timeout).build()?;
    Ok(client)
}

/// Substitutes the postal code into an upstream URL template.
pub fn render_url(template: &str, cep: &str) -> Result<Url> {
    let url = Url::parse(&template.replace(CEP_PLACEHOLDER, cep))?;
    Ok(url)
}

/// Single GET, no retries. The full body is read before decoding and the status
/// code is not checked: both upstreams answer unknown CEPs with a JSON body.
/// A literal `null` body decodes to an empty record.
pub async fn fetch_json<T: DeserializeOwned + Default>(client: &Client, url: Url) -> Result<T> {
    tracing::debug!("Making upstream request to: {}", url);
    let response = client.get(url).send().await?;
    tracing::debug!("Upstream response status: {}", response.status());

    let body = response.bytes().await?;
    let decoded: Option<T> = serde_json::from_slice(&body)?;
    Ok(decoded.unwrap_or_default())
}
