// Adapters layer: concrete fetchers for the external CEP services.

pub mod brasilapi;
pub mod http;
pub mod viacep;

pub use brasilapi::BrasilApiFetcher;
pub use viacep::ViaCepFetcher;
