//! axum server wiring.
//!
//! Routes:
//! - `GET /?cep=<postal-code>` runs the race and answers with the winning payload
//! - `GET /healthz` liveness probe

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::{
    adapters::{http::build_client, BrasilApiFetcher, ViaCepFetcher},
    core::{ConfigProvider, LookupRequest, RaceDispatcher},
    utils::error::{CepError, Result},
};

/// Response header naming the service whose payload is in the body.
pub const SERVICE_HEADER: &str = "x-cep-service";

#[derive(Clone)]
struct AppState {
    dispatcher: RaceDispatcher,
}

/// First `cep` value in the query string; repeated keys after it are ignored.
fn first_cep(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "cep")
        .map(|(_, value)| value.into_owned())
}

impl IntoResponse for CepError {
    fn into_response(self) -> Response {
        (self.status_code(), self.client_message()).into_response()
    }
}

/// Wires both production fetchers onto one pooled HTTP client.
pub fn build_dispatcher(config: &dyn ConfigProvider) -> Result<RaceDispatcher> {
    let client = build_client(config.upstream_timeout())?;
    let via_cep = ViaCepFetcher::new(client.clone(), config.viacep_url());
    let brasil_api = BrasilApiFetcher::new(client, config.brasilapi_url());

    Ok(RaceDispatcher::new(
        Arc::new(via_cep),
        Arc::new(brasil_api),
        config.race_timeout(),
    ))
}

pub fn build_app(dispatcher: RaceDispatcher) -> Router {
    Router::new()
        .route("/", get(lookup))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(AppState { dispatcher })
}

pub async fn run(config: &dyn ConfigProvider) -> anyhow::Result<()> {
    let dispatcher = build_dispatcher(config)?;
    let app = build_app(dispatcher);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(
        listen_addr = %config.listen_addr(),
        timeout_ms = config.race_timeout().as_millis() as u64,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn lookup(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> std::result::Result<Response, CepError> {
    let request = LookupRequest::new(first_cep(query.as_deref()).as_deref())?;
    tracing::info!(cep = %request.cep(), "Looking up CEP");

    let outcome = state.dispatcher.dispatch(&request).await?;

    let mut response = (StatusCode::OK, Json(outcome.result)).into_response();
    response.headers_mut().insert(
        SERVICE_HEADER,
        HeaderValue::from_static(outcome.winner.as_str()),
    );
    Ok(response)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AddressFetcher, Service, ServiceResult};
    use crate::domain::model::ViaCep;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tower::ServiceExt as _;

    struct CountingFetcher {
        service: Service,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AddressFetcher for CountingFetcher {
        fn service(&self) -> Service {
            self.service
        }

        async fn fetch(&self, cep: &str) -> Result<ServiceResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(ServiceResult::ViaCep(ViaCep {
                cep: cep.to_string(),
                ..ViaCep::default()
            }))
        }
    }

    fn app(delay_ms: u64, timeout_ms: u64, calls: Arc<AtomicUsize>) -> Router {
        let fetcher = |service| {
            Arc::new(CountingFetcher {
                service,
                delay: Duration::from_millis(delay_ms),
                calls: calls.clone(),
            })
        };
        build_app(RaceDispatcher::new(
            fetcher(Service::ViaCep),
            fetcher(Service::BrasilApi),
            Duration::from_millis(timeout_ms),
        ))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn healthz_works() {
        let res = get(app(0, 1000, Arc::default()), "/healthz").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_cep_is_bad_request_without_fetching() {
        let calls = Arc::new(AtomicUsize::new(0));

        let res = get(app(0, 1000, calls.clone()), "/").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Missing 'cep' query parameter");

        let res = get(app(0, 1000, calls.clone()), "/?cep=").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn winner_payload_is_returned_as_json() {
        let res = get(app(0, 1000, Arc::default()), "/?cep=01001000").await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert!(res.headers().get(SERVICE_HEADER).is_some());

        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["cep"], "01001000");
    }

    #[tokio::test]
    async fn repeated_cep_uses_first_value() {
        let res = get(app(0, 1000, Arc::default()), "/?cep=01001000&cep=99999999").await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["cep"], "01001000");
    }

    #[test]
    fn first_cep_parsing() {
        assert_eq!(first_cep(None), None);
        assert_eq!(first_cep(Some("uf=SP")), None);
        assert_eq!(first_cep(Some("cep=&cep=01001000")).as_deref(), Some(""));
        assert_eq!(first_cep(Some("x=1&cep=01001%2D000")).as_deref(), Some("01001-000"));
    }

    #[tokio::test]
    async fn slow_contenders_time_out_with_408() {
        let res = get(app(500, 50, Arc::default()), "/?cep=01001000").await;

        assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Timeout reached");
    }
}
