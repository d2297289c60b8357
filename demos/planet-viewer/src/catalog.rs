//! Planet catalog: eight records embedded as JSON at compile time.
//!
//! Lookup is by case-insensitive name. Colors are validated on load so a bad
//! record fails once at startup rather than on every search.

use serde::Deserialize;
use thiserror::Error;
use globe_engine::{Color, ColorError};

/// Embed the planet table at compile time.
const PLANETS_JSON: &str = include_str!("../data/planets.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("planet table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("planet `{name}` has a bad color")]
    Color {
        name: String,
        #[source]
        source: ColorError,
    },
    #[error("planet `{0}` is listed twice")]
    Duplicate(String),
    #[error("planet `{name}` has a non-positive size {size}")]
    Size { name: String, size: f32 },
    #[error("no planet named `{0}`")]
    NotFound(String),
}

/// One row as stored in the JSON table.
#[derive(Debug, Deserialize)]
struct RawPlanet {
    name: String,
    color: String,
    size: f32,
    temp: String,
    moons: u32,
    desc: String,
    #[serde(default)]
    distance: String,
    #[serde(default)]
    diameter: String,
    #[serde(default)]
    texture: Option<String>,
}

/// A planet's display data.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    /// Lowercase lookup key.
    pub name: String,
    pub color: Color,
    /// Scale relative to the unit sphere.
    pub size: f32,
    /// Surface temperature, preformatted (e.g. `-65°C`).
    pub temp: String,
    pub moons: u32,
    pub desc: String,
    /// Distance from the Sun, preformatted.
    pub distance: String,
    pub diameter: String,
    /// Image path relative to the host page.
    pub texture: Option<String>,
}

impl TryFrom<RawPlanet> for PlanetRecord {
    type Error = CatalogError;

    fn try_from(raw: RawPlanet) -> Result<Self, CatalogError> {
        let name = normalize(&raw.name);
        let color = Color::parse_hex(&raw.color).map_err(|source| CatalogError::Color {
            name: name.clone(),
            source,
        })?;
        if raw.size.is_nan() || raw.size <= 0.0 {
            return Err(CatalogError::Size { name, size: raw.size });
        }
        Ok(Self {
            name,
            color,
            size: raw.size,
            temp: raw.temp,
            moons: raw.moons,
            desc: raw.desc,
            distance: raw.distance,
            diameter: raw.diameter,
            texture: raw.texture.filter(|t| !t.trim().is_empty()),
        })
    }
}

/// Lookup key for user-typed names.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// All planets in table order.
#[derive(Debug, Clone, Default)]
pub struct PlanetCatalog {
    planets: Vec<PlanetRecord>,
}

impl PlanetCatalog {
    /// Load the embedded table.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(PLANETS_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawPlanet> = serde_json::from_str(json)?;
        let mut planets: Vec<PlanetRecord> = Vec::with_capacity(raw.len());
        for row in raw {
            let record = PlanetRecord::try_from(row)?;
            if planets.iter().any(|p| p.name == record.name) {
                return Err(CatalogError::Duplicate(record.name));
            }
            planets.push(record);
        }
        Ok(Self { planets })
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn lookup(&self, name: &str) -> Result<&PlanetRecord, CatalogError> {
        self.find(name).map(|(_, record)| record)
    }

    /// Like `lookup`, also returning the table index.
    pub fn find(&self, name: &str) -> Result<(usize, &PlanetRecord), CatalogError> {
        let key = normalize(name);
        self.planets
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == key)
            .ok_or(CatalogError::NotFound(key))
    }

    pub fn get(&self, index: usize) -> Option<&PlanetRecord> {
        self.planets.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        let key = normalize(name);
        self.planets.iter().position(|p| p.name == key)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.planets.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetRecord> {
        self.planets.iter()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }
}
