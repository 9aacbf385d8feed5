// ABOUTME: Body measurement records captured from the progress form
// ABOUTME: BodyMeasurements, MeasurementRecord and MeasurementField with range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::measurement_ranges::{
    self, ARM_CM, HEIGHT_CM, SHOULDER_CM, THIGH_CM, WAIST_CM, WEIGHT_KG,
};
use crate::errors::ValidationError;

/// Display format of record dates (`07.15`), matching the chart axis labels
pub const RECORD_DATE_FORMAT: &str = "%m.%d";

/// The six body measurements captured by the progress form
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyMeasurements {
    /// Height in cm
    #[serde(rename = "height")]
    pub height_cm: f64,
    /// Body weight in kg
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    /// Arm circumference in cm
    #[serde(rename = "arm")]
    pub arm_cm: f64,
    /// Shoulder circumference in cm
    #[serde(rename = "shoulder")]
    pub shoulder_cm: f64,
    /// Waist circumference in cm
    #[serde(rename = "waist")]
    pub waist_cm: f64,
    /// Thigh circumference in cm
    #[serde(rename = "thigh")]
    pub thigh_cm: f64,
}

impl BodyMeasurements {
    /// Check every field against its physiological range
    ///
    /// # Errors
    ///
    /// Returns the first field found outside its range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in MeasurementField::ALL {
            let (min, max) = field.range();
            ValidationError::check_range(field.name(), field.value(self), min, max)?;
        }
        Ok(())
    }

    /// True when every field is exactly zero, the form's untouched placeholder state
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        MeasurementField::ALL
            .iter()
            .all(|field| field.value(self) == 0.0)
    }
}

/// One dated entry of the measurement history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Local calendar date of capture, formatted `MM.DD`
    pub date: String,
    /// Captured values
    #[serde(flatten)]
    pub measurements: BodyMeasurements,
}

impl MeasurementRecord {
    /// Create a record with an explicit date label
    #[must_use]
    pub fn new(date: impl Into<String>, measurements: BodyMeasurements) -> Self {
        Self {
            date: date.into(),
            measurements,
        }
    }

    /// Create a record dated `date`
    #[must_use]
    pub fn captured_on(date: NaiveDate, measurements: BodyMeasurements) -> Self {
        Self::new(date.format(RECORD_DATE_FORMAT).to_string(), measurements)
    }

    /// Create a record dated with the client's local date
    #[must_use]
    pub fn captured_today(measurements: BodyMeasurements) -> Self {
        Self::captured_on(Local::now().date_naive(), measurements)
    }

    /// Validate the record's measurements
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for a blank date, otherwise the first
    /// measurement outside its range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "date" });
        }
        self.measurements.validate()
    }
}

/// Measurement fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementField {
    /// Height
    Height,
    /// Body weight
    Weight,
    /// Arm circumference
    Arm,
    /// Shoulder circumference
    Shoulder,
    /// Waist circumference
    Waist,
    /// Thigh circumference
    Thigh,
}

impl MeasurementField {
    /// Every field
    pub const ALL: [Self; 6] = [
        Self::Height,
        Self::Weight,
        Self::Arm,
        Self::Shoulder,
        Self::Waist,
        Self::Thigh,
    ];

    /// Fields followed by the trend extractor (height grows on its own schedule)
    pub const TRACKED: [Self; 5] = [
        Self::Arm,
        Self::Shoulder,
        Self::Waist,
        Self::Thigh,
        Self::Weight,
    ];

    /// Wire name of the field
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Arm => "arm",
            Self::Shoulder => "shoulder",
            Self::Waist => "waist",
            Self::Thigh => "thigh",
        }
    }

    /// Korean label used in prompts and charts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Height => "키",
            Self::Weight => "몸무게",
            Self::Arm => "팔",
            Self::Shoulder => "어깨",
            Self::Waist => "허리",
            Self::Thigh => "허벅지",
        }
    }

    /// Unit of the field
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Weight => "kg",
            _ => "cm",
        }
    }

    /// Accepted inclusive range
    #[must_use]
    pub const fn range(self) -> measurement_ranges::Range {
        match self {
            Self::Height => HEIGHT_CM,
            Self::Weight => WEIGHT_KG,
            Self::Arm => ARM_CM,
            Self::Shoulder => SHOULDER_CM,
            Self::Waist => WAIST_CM,
            Self::Thigh => THIGH_CM,
        }
    }

    /// Read this field from a set of measurements
    #[must_use]
    pub const fn value(self, measurements: &BodyMeasurements) -> f64 {
        match self {
            Self::Height => measurements.height_cm,
            Self::Weight => measurements.weight_kg,
            Self::Arm => measurements.arm_cm,
            Self::Shoulder => measurements.shoulder_cm,
            Self::Waist => measurements.waist_cm,
            Self::Thigh => measurements.thigh_cm,
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BodyMeasurements {
        BodyMeasurements {
            height_cm: 172.0,
            weight_kg: 61.5,
            arm_cm: 30.0,
            shoulder_cm: 110.0,
            waist_cm: 72.0,
            thigh_cm: 52.0,
        }
    }

    #[test]
    fn test_record_serializes_flat_with_form_keys() {
        let record = MeasurementRecord::new("07.15", sample());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "07.15");
        assert_eq!(json["height"], 172.0);
        assert_eq!(json["thigh"], 52.0);
        assert!(json.get("measurements").is_none());
    }

    #[test]
    fn test_captured_on_formats_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let record = MeasurementRecord::captured_on(date, sample());
        assert_eq!(record.date, "03.07");
    }

    #[test]
    fn test_zero_height_is_out_of_range() {
        let measurements = BodyMeasurements {
            height_cm: 0.0,
            ..sample()
        };
        let err = measurements.validate().unwrap_err();
        assert_eq!(err.field(), "height");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(BodyMeasurements::default().is_placeholder());
        assert!(!sample().is_placeholder());
    }
}
