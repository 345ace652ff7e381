use crate::utils::error::{CepError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Address record in the ViaCEP schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCep {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub unidade: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub longitude: String,
    pub latitude: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub r#type: String,
    pub coordinates: Coordinates,
}

/// Address record in the BrasilAPI v2 schema. `neighborhood` and `street` are
/// null for CEPs that cover a whole city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrasilApi {
    pub cep: String,
    pub state: String,
    pub city: String,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub service: String,
    pub location: Location,
}

/// What a single contender delivers. `Absent` serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceResult {
    ViaCep(ViaCep),
    BrasilApi(BrasilApi),
    Absent,
}

impl ServiceResult {
    pub fn is_absent(&self) -> bool {
        matches!(self, ServiceResult::Absent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    ViaCep,
    BrasilApi,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::ViaCep => "viacep",
            Service::BrasilApi => "brasilapi",
        }
    }

    /// Label used when logging the winning payload.
    pub fn display_name(&self) -> &'static str {
        match self {
            Service::ViaCep => "ViaCep",
            Service::BrasilApi => "BrasilApi",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    cep: String,
}

impl LookupRequest {
    /// Builds a request from the raw `cep` query value. Missing and empty are both rejected.
    pub fn new(cep: Option<&str>) -> Result<Self> {
        match cep {
            Some(cep) if !cep.is_empty() => Ok(Self {
                cep: cep.to_string(),
            }),
            _ => Err(CepError::MissingCep),
        }
    }

    pub fn cep(&self) -> &str {
        &self.cep
    }
}

#[derive(Debug, Clone)]
pub struct RaceOutcome {
    pub winner: Service,
    pub result: ServiceResult,
    pub elapsed: Duration,
}
