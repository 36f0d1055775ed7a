use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Prefix that marks a client-side id assigned to an unsaved vehicle.
pub const PLACEHOLDER_PREFIX: &str = "temp-";

/// Server-assigned vehicle id, or a `temp-` placeholder for an unsaved draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtvId(pub String);

impl AtvId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn placeholder(now_millis: u64) -> Self {
        Self(format!("{PLACEHOLDER_PREFIX}{now_millis}"))
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.starts_with(PLACEHOLDER_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AtvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Transmission {
    #[default]
    Automatic,
    Manual,
    #[serde(rename = "CVT")]
    Cvt,
}

impl Transmission {
    pub const ALL: [Transmission; 3] = [
        Transmission::Automatic,
        Transmission::Manual,
        Transmission::Cvt,
    ];
}

impl Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Transmission::Automatic => "Automatic",
            Transmission::Manual => "Manual",
            Transmission::Cvt => "CVT",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriveType {
    #[default]
    #[serde(rename = "4WD")]
    FourWheel,
    #[serde(rename = "2WD")]
    TwoWheel,
    #[serde(rename = "AWD")]
    AllWheel,
}

impl DriveType {
    pub const ALL: [DriveType; 3] = [DriveType::FourWheel, DriveType::TwoWheel, DriveType::AllWheel];
}

impl Display for DriveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DriveType::FourWheel => "4WD",
            DriveType::TwoWheel => "2WD",
            DriveType::AllWheel => "AWD",
        };
        write!(f, "{label}")
    }
}

/// One fleet vehicle listing as the backend stores it.
///
/// Fields the client does not model (timestamps, version keys) are kept in
/// `extra` so a full-list write hands them back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atv {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AtvId>,
    pub name: String,
    pub engine: String,
    pub seats: u32,
    pub price: f64,
    pub transmission: Transmission,
    pub drive_type: DriveType,
    pub available: bool,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Atv {
    /// Default listing offered when the admin adds a new vehicle.
    pub fn template() -> Self {
        Self {
            id: None,
            name: "New ATV Model".to_string(),
            engine: "CC".to_string(),
            seats: 1,
            price: 0.0,
            transmission: Transmission::Automatic,
            drive_type: DriveType::FourWheel,
            available: true,
            image: String::new(),
            features: vec!["4WD".to_string(), "Digital Display".to_string()],
            extra: serde_json::Map::new(),
        }
    }
}

/// A single field assignment on a vehicle draft.
#[derive(Debug, Clone, PartialEq)]
pub enum AtvField {
    Name(String),
    Engine(String),
    Seats(u32),
    Price(f64),
    Transmission(Transmission),
    DriveType(DriveType),
    Available(bool),
}

impl AtvField {
    pub fn apply(self, atv: &mut Atv) {
        match self {
            AtvField::Name(value) => atv.name = value,
            AtvField::Engine(value) => atv.engine = value,
            AtvField::Seats(value) => atv.seats = value,
            AtvField::Price(value) => atv.price = value,
            AtvField::Transmission(value) => atv.transmission = value,
            AtvField::DriveType(value) => atv.drive_type = value,
            AtvField::Available(value) => atv.available = value,
        }
    }
}
