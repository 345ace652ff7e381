// Domain layer: address schemas and the ports adapters implement.

pub mod model;
pub mod ports;
