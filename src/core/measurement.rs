//! Unit conversions grouped by category.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const KM_TO_MILES: f64 = 0.621371;
const KG_TO_LBS: f64 = 2.20462;
const SQM_TO_SQFT: f64 = 10.764;
const L_TO_GAL: f64 = 0.264172;
const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Area,
    Volume,
    Speed,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Area,
        Category::Volume,
        Category::Speed,
    ];

    pub fn units(&self) -> &'static [Unit] {
        match self {
            Category::Length => &[Unit::Kilometers, Unit::Miles],
            Category::Weight => &[Unit::Kilograms, Unit::Pounds],
            Category::Temperature => &[Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin],
            Category::Area => &[Unit::SquareMeters, Unit::SquareFeet],
            Category::Volume => &[Unit::Liters, Unit::Gallons],
            Category::Speed => &[Unit::KilometersPerHour, Unit::MilesPerHour],
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Temperature => "temperature",
            Category::Area => "area",
            Category::Volume => "volume",
            Category::Speed => "speed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "miles")]
    Miles,
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lbs")]
    Pounds,
    #[serde(rename = "c")]
    Celsius,
    #[serde(rename = "f")]
    Fahrenheit,
    #[serde(rename = "k")]
    Kelvin,
    #[serde(rename = "sqm")]
    SquareMeters,
    #[serde(rename = "sqft")]
    SquareFeet,
    #[serde(rename = "l")]
    Liters,
    #[serde(rename = "gal")]
    Gallons,
    #[serde(rename = "kmh")]
    KilometersPerHour,
    #[serde(rename = "mph")]
    MilesPerHour,
}

impl Unit {
    pub fn category(&self) -> Category {
        match self {
            Unit::Kilometers | Unit::Miles => Category::Length,
            Unit::Kilograms | Unit::Pounds => Category::Weight,
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => Category::Temperature,
            Unit::SquareMeters | Unit::SquareFeet => Category::Area,
            Unit::Liters | Unit::Gallons => Category::Volume,
            Unit::KilometersPerHour | Unit::MilesPerHour => Category::Speed,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kilometers => "km",
            Unit::Miles => "miles",
            Unit::Kilograms => "kg",
            Unit::Pounds => "lbs",
            Unit::Celsius => "c",
            Unit::Fahrenheit => "f",
            Unit::Kelvin => "k",
            Unit::SquareMeters => "sqm",
            Unit::SquareFeet => "sqft",
            Unit::Liters => "l",
            Unit::Gallons => "gal",
            Unit::KilometersPerHour => "kmh",
            Unit::MilesPerHour => "mph",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Unit::Kilometers => "kilometers",
            Unit::Miles => "miles",
            Unit::Kilograms => "kilograms",
            Unit::Pounds => "pounds",
            Unit::Celsius => "celsius",
            Unit::Fahrenheit => "fahrenheit",
            Unit::Kelvin => "kelvin",
            Unit::SquareMeters => "squareMeters",
            Unit::SquareFeet => "squareFeet",
            Unit::Liters => "liters",
            Unit::Gallons => "gallons",
            Unit::KilometersPerHour => "kmh",
            Unit::MilesPerHour => "mph",
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .flat_map(|c| c.units().iter())
            .find(|u| u.symbol() == needle)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown unit: {}", s))
    }
}

/// Converts `value` in `unit` to every other unit of its category.
///
/// Returns `None` for non-finite input, which the caller treats as a cleared
/// field.
pub fn convert(unit: Unit, value: f64) -> Option<Vec<(Unit, f64)>> {
    if !value.is_finite() {
        return None;
    }
    let results = match unit {
        Unit::Kilometers => vec![(Unit::Miles, value * KM_TO_MILES)],
        Unit::Miles => vec![(Unit::Kilometers, value / KM_TO_MILES)],
        Unit::Kilograms => vec![(Unit::Pounds, value * KG_TO_LBS)],
        Unit::Pounds => vec![(Unit::Kilograms, value / KG_TO_LBS)],
        Unit::Celsius => vec![
            (Unit::Fahrenheit, value * (9.0 / 5.0) + 32.0),
            (Unit::Kelvin, value + KELVIN_OFFSET),
        ],
        Unit::Fahrenheit => {
            let celsius = (value - 32.0) * (5.0 / 9.0);
            vec![
                (Unit::Celsius, celsius),
                (Unit::Kelvin, celsius + KELVIN_OFFSET),
            ]
        }
        Unit::Kelvin => vec![
            (Unit::Celsius, value - KELVIN_OFFSET),
            (Unit::Fahrenheit, (value - KELVIN_OFFSET) * (9.0 / 5.0) + 32.0),
        ],
        Unit::SquareMeters => vec![(Unit::SquareFeet, value * SQM_TO_SQFT)],
        Unit::SquareFeet => vec![(Unit::SquareMeters, value / SQM_TO_SQFT)],
        Unit::Liters => vec![(Unit::Gallons, value * L_TO_GAL)],
        Unit::Gallons => vec![(Unit::Liters, value / L_TO_GAL)],
        Unit::KilometersPerHour => vec![(Unit::MilesPerHour, value * KM_TO_MILES)],
        Unit::MilesPerHour => vec![(Unit::KilometersPerHour, value / KM_TO_MILES)],
    };
    results.iter().all(|(_, v)| v.is_finite()).then_some(results)
}

pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}
