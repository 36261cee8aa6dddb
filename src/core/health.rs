//! Body mass index and daily calorie estimates.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(anyhow::anyhow!("Invalid gender: {}", s)),
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::Normal
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Translation key for the category name.
    pub fn label_key(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normalWeight",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    /// Translation key for the category's BMI range.
    pub fn range_key(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "bmiRangeUnderweight",
            BmiCategory::Normal => "bmiRangeNormal",
            BmiCategory::Overweight => "bmiRangeOverweight",
            BmiCategory::Obese => "bmiRangeObese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    pub value: f64,
    pub category: BmiCategory,
}

/// Sedentary activity factor applied to the basal metabolic rate.
pub const SEDENTARY_FACTOR: f64 = 1.2;

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<BmiResult> {
    if !positive(weight_kg) || !positive(height_cm) {
        return None;
    }
    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    if !value.is_finite() {
        return None;
    }
    Some(BmiResult {
        value,
        category: BmiCategory::classify(value),
    })
}

/// Revised Harris-Benedict basal metabolic rate, in kcal/day.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> Option<f64> {
    if !positive(weight_kg) || !positive(height_cm) || age == 0 {
        return None;
    }
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset;
    bmr.is_finite().then_some(bmr)
}

/// Estimated daily calories for a sedentary lifestyle.
pub fn daily_calories(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> Option<i64> {
    basal_metabolic_rate(weight_kg, height_cm, age, gender)
        .map(|bmr| (bmr * SEDENTARY_FACTOR).round())
        .filter(|calories| calories.abs() < i64::MAX as f64)
        .map(|calories| calories as i64)
}
