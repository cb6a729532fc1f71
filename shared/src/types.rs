//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a wire value does not name a known variant
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "bn")]
    Bangla,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Bangla => "bn",
        }
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::English),
            "bn" => Ok(Language::Bangla),
            other => Err(ParseError::new("language", other)),
        }
    }
}

/// The eight administrative divisions of Bangladesh.
///
/// Divisions are the granularity of weather queries; each maps to a fixed
/// reference coordinate near the divisional headquarters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Division {
    #[default]
    Dhaka,
    Chittagong,
    Rajshahi,
    Khulna,
    Barisal,
    Sylhet,
    Rangpur,
    Mymensingh,
}

impl Division {
    pub const ALL: [Division; 8] = [
        Division::Dhaka,
        Division::Chittagong,
        Division::Rajshahi,
        Division::Khulna,
        Division::Barisal,
        Division::Sylhet,
        Division::Rangpur,
        Division::Mymensingh,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Division::Dhaka => "Dhaka",
            Division::Chittagong => "Chittagong",
            Division::Rajshahi => "Rajshahi",
            Division::Khulna => "Khulna",
            Division::Barisal => "Barisal",
            Division::Sylhet => "Sylhet",
            Division::Rangpur => "Rangpur",
            Division::Mymensingh => "Mymensingh",
        }
    }

    pub fn coordinates(&self) -> GpsCoordinates {
        match self {
            Division::Dhaka => GpsCoordinates::new(23.8103, 90.4125),
            Division::Chittagong => GpsCoordinates::new(22.3569, 91.7832),
            Division::Rajshahi => GpsCoordinates::new(24.3745, 88.6042),
            Division::Khulna => GpsCoordinates::new(22.8456, 89.5403),
            Division::Barisal => GpsCoordinates::new(22.701, 90.3535),
            Division::Sylhet => GpsCoordinates::new(24.8949, 91.8687),
            Division::Rangpur => GpsCoordinates::new(25.7439, 89.2752),
            Division::Mymensingh => GpsCoordinates::new(24.7471, 90.4203),
        }
    }

    /// Resolve an optional division name, falling back to Dhaka when the
    /// name is absent or not one of the eight divisions.
    pub fn resolve(name: Option<&str>) -> Division {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for Division {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Division::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::new("division", s))
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
