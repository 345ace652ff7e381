use crate::domain::model::{Service, ServiceResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One contender in the race: looks a postal code up against a single upstream.
#[async_trait]
pub trait AddressFetcher: Send + Sync {
    fn service(&self) -> Service;

    async fn fetch(&self, cep: &str) -> Result<ServiceResult>;
}

pub trait ConfigProvider: Send + Sync {
    fn listen_addr(&self) -> &str;
    fn viacep_url(&self) -> &str;
    fn brasilapi_url(&self) -> &str;
    fn race_timeout(&self) -> Duration;
    fn upstream_timeout(&self) -> Duration;
}
