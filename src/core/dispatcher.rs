use crate::core::{AddressFetcher, LookupRequest, RaceOutcome, Result, Service, ServiceResult};
use crate::utils::error::CepError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// Races two address fetchers against each other and a deadline.
///
/// The first contender to finish wins whether it succeeded or not: a failed
/// fetch reports [`ServiceResult::Absent`] and that still ends the race. The
/// losing contender keeps running in its own task until its HTTP call
/// completes; its result is discarded.
#[derive(Clone)]
pub struct RaceDispatcher {
    via_cep: Arc<dyn AddressFetcher>,
    brasil_api: Arc<dyn AddressFetcher>,
    timeout: Duration,
}

impl RaceDispatcher {
    pub fn new(
        via_cep: Arc<dyn AddressFetcher>,
        brasil_api: Arc<dyn AddressFetcher>,
        timeout: Duration,
    ) -> Self {
        Self {
            via_cep,
            brasil_api,
            timeout,
        }
    }

    pub async fn dispatch(&self, request: &LookupRequest) -> Result<RaceOutcome> {
        let started = Instant::now();
        let cep = request.cep();

        let via_cep_rx = spawn_contender(self.via_cep.clone(), cep);
        let brasil_api_rx = spawn_contender(self.brasil_api.clone(), cep);

        let (winner, result) = tokio::select! {
            received = via_cep_rx => (Service::ViaCep, received.unwrap_or(ServiceResult::Absent)),
            received = brasil_api_rx => (Service::BrasilApi, received.unwrap_or(ServiceResult::Absent)),
            _ = tokio::time::sleep(self.timeout) => {
                tracing::warn!(cep = %cep, timeout_ms = self.timeout.as_millis() as u64, "Timeout reached while fetching data");
                return Err(CepError::Timeout {
                    timeout_ms: self.timeout.as_millis(),
                });
            }
        };

        let elapsed = started.elapsed();
        log_winner(winner, &result, elapsed);

        Ok(RaceOutcome {
            winner,
            result,
            elapsed,
        })
    }
}

/// Runs one fetch on its own task. Errors become `Absent`; if the task dies
/// before sending, the dropped sender reads as `Absent` on the receiving side.
fn spawn_contender(
    fetcher: Arc<dyn AddressFetcher>,
    cep: &str,
) -> oneshot::Receiver<ServiceResult> {
    let (tx, rx) = oneshot::channel();
    let cep = cep.to_string();

    tokio::spawn(async move {
        let service = fetcher.service();
        let result = match fetcher.fetch(&cep).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(service = %service, cep = %cep, "Error fetching {}: {}", service.display_name(), e);
                ServiceResult::Absent
            }
        };

        // The receiver is gone once the race is decided.
        if tx.send(result).is_err() {
            tracing::debug!(service = %service, cep = %cep, "Discarding late contender result");
        }
    });

    rx
}

fn log_winner(winner: Service, result: &ServiceResult, elapsed: Duration) {
    tracing::info!(
        service = %winner,
        absent = result.is_absent(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Race won"
    );

    if tracing::enabled!(tracing::Level::DEBUG) {
        match serde_json::to_string_pretty(result) {
            Ok(json) => tracing::debug!("{} response:\n{}", winner.display_name(), json),
            Err(e) => tracing::warn!("Error marshalling to JSON: {}", e),
        }
    }
}
