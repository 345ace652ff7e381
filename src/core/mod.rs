pub mod dispatcher;

pub use crate::domain::model::{LookupRequest, RaceOutcome, Service, ServiceResult};
pub use crate::domain::ports::{AddressFetcher, ConfigProvider};
pub use crate::utils::error::Result;
pub use dispatcher::RaceDispatcher;
