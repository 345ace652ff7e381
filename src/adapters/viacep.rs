use crate::adapters::http::{fetch_json, render_url};
use crate::domain::model::{Service, ServiceResult, ViaCep};
use crate::domain::ports::AddressFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_VIACEP_URL: &str = "http://viacep.com.br/ws/{cep}/json/";

#[derive(Debug, Clone)]
pub struct ViaCepFetcher {
    client: Client,
    url_template: String,
}

impl ViaCepFetcher {
    pub fn new(client: Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }
}

#[async_trait]
impl AddressFetcher for ViaCepFetcher {
    fn service(&self) -> Service {
        Service::ViaCep
    }

    async fn fetch(&self, cep: &str) -> Result<ServiceResult> {
        let url = render_url(&self.url_template, cep)?;
        let payload: ViaCep = fetch_json(&self.client, url).await?;
        Ok(ServiceResult::ViaCep(payload))
    }
}
