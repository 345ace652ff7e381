use crate::adapters::http::{fetch_json, render_url};
use crate::domain::model::{BrasilApi, Service, ServiceResult};
use crate::domain::ports::AddressFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_BRASILAPI_URL: &str = "https://brasilapi.com.br/api/cep/v2/{cep}";

#[derive(Debug, Clone)]
pub struct BrasilApiFetcher {
    client: Client,
    url_template: String,
}

impl BrasilApiFetcher {
    pub fn new(client: Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }
}

#[async_trait]
impl AddressFetcher for BrasilApiFetcher {
    fn service(&self) -> Service {
        Service::BrasilApi
    }

    async fn fetch(&self, cep: &str) -> Result<ServiceResult> {
        let url = render_url(&self.url_template, cep)?;
        let payload: BrasilApi = fetch_json(&self.client, url).await?;
        Ok(ServiceResult::BrasilApi(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CepError;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_decodes_brasilapi_payload() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/cep/v2/89010025");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "cep": "89010025",
                        "state": "SC",
                        "city": "Blumenau",
                        "neighborhood": "Centro",
                        "street": null,
                        "service": "open-cep",
                        "location": {"type": "Point", "coordinates": {}}
                    }));
            })
            .await;

        let fetcher = BrasilApiFetcher::new(Client::new(), server.url("/api/cep/v2/{cep}"));
        let result = fetcher.fetch("89010025").await.unwrap();

        api_mock.assert_async().await;
        match result {
            ServiceResult::BrasilApi(payload) => {
                assert_eq!(payload.city, "Blumenau");
                assert_eq!(payload.neighborhood.as_deref(), Some("Centro"));
                assert!(payload.street.is_none());
                assert!(payload.location.coordinates.latitude.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_payload_still_decodes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/cep/v2/99999999");
                then.status(404).json_body(serde_json::json!({
                    "name": "CepPromiseError",
                    "message": "Todos os serviços de CEP retornaram erro.",
                    "type": "service_error"
                }));
            })
            .await;

        let fetcher = BrasilApiFetcher::new(Client::new(), server.url("/api/cep/v2/{cep}"));
        let result = fetcher.fetch("99999999").await.unwrap();

        assert_eq!(result, ServiceResult::BrasilApi(BrasilApi::default()));
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        // Nothing listens on port 1.
        let fetcher = BrasilApiFetcher::new(Client::new(), "http://127.0.0.1:1/api/cep/v2/{cep}");
        let err = fetcher.fetch("89010025").await.unwrap_err();

        assert!(matches!(err, CepError::HttpError(_)));
    }
}
