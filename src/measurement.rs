//! Measurement record ingestion.
//!
//! One record per diver, supplied by the data-loading collaborator as an
//! ordered list of loosely typed fields. Decoding validates the record
//! and fails fast on missing fields, wrongly typed values and physically
//! impossible magnitudes.

use crate::constants::SUIT_SURFACE_M2;
use crate::duration;
use crate::error::MeasurementError;

/// A loosely typed field value from the data-loading collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

/// Wetsuit description: a thickness in millimetres, or an explicit
/// volume in m³ when one has been measured directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SuitSpec {
    Thickness(f64),
    Volume(f64),
}

/// The atomic per-diver input record.
///
/// Times are whole seconds; depths are metres; masses are kilograms;
/// volumes are m³. The optional speeds override the depth-over-time
/// derivation per dive phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub surname: String,
    pub depth_max: f64,
    pub time_descent: f64,
    pub time_ascent: f64,
    pub mass_body: f64,
    pub mass_ballast: f64,
    pub suit: SuitSpec,
    pub volume_lungs: f64,
    pub depth_gliding_descent: f64,
    pub depth_gliding_descent_error: f64,
    pub depth_gliding_ascent: f64,
    pub depth_gliding_ascent_error: f64,
    pub speed_descent: Option<f64>,
    pub speed_ascent: Option<f64>,
}

impl Measurement {
    /// Decode and validate a record from its key-value field list.
    ///
    /// Field names follow the loader schema exactly. When both
    /// `volume_suit` and `thickness_suit` are present the explicit
    /// volume wins.
    pub fn from_fields(fields: &[(String, FieldValue)]) -> Result<Measurement, MeasurementError> {
        let suit = match (
            optional_number(fields, "volume_suit")?,
            optional_number(fields, "thickness_suit")?,
        ) {
            (Some(volume), _) => SuitSpec::Volume(volume),
            (None, Some(thickness)) => SuitSpec::Thickness(thickness),
            (None, None) => return Err(MeasurementError::MissingSuit),
        };

        let measurement = Measurement {
            surname: required_text(fields, "surname")?,
            depth_max: required_number(fields, "depth_max")?,
            time_descent: time_seconds(fields, "time_descent")?,
            time_ascent: time_seconds(fields, "time_ascent")?,
            mass_body: required_number(fields, "mass_body")?,
            mass_ballast: required_number(fields, "mass_ballast")?,
            suit,
            volume_lungs: required_number(fields, "volume_lungs")?,
            depth_gliding_descent: required_number(fields, "depth_gliding_descent")?,
            depth_gliding_descent_error: required_number(fields, "depth_gliding_descent_error")?,
            depth_gliding_ascent: required_number(fields, "depth_gliding_ascent")?,
            depth_gliding_ascent_error: required_number(fields, "depth_gliding_ascent_error")?,
            speed_descent: optional_number(fields, "speed_descent")?,
            speed_ascent: optional_number(fields, "speed_ascent")?,
        };
        measurement.validate()?;
        Ok(measurement)
    }

    /// Check the record's magnitude invariants.
    pub fn validate(&self) -> Result<(), MeasurementError> {
        let positive = [
            ("depth_max", self.depth_max),
            ("time_descent", self.time_descent),
            ("time_ascent", self.time_ascent),
            ("mass_body", self.mass_body),
            ("volume_lungs", self.volume_lungs),
        ];
        for (field, value) in positive {
            check_positive(field, value)?;
        }

        match self.suit {
            SuitSpec::Thickness(thickness) => check_positive("thickness_suit", thickness)?,
            SuitSpec::Volume(volume) => check_positive("volume_suit", volume)?,
        }

        let non_negative = [
            ("mass_ballast", self.mass_ballast),
            (
                "depth_gliding_descent_error",
                self.depth_gliding_descent_error,
            ),
            (
                "depth_gliding_ascent_error",
                self.depth_gliding_ascent_error,
            ),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(MeasurementError::Negative {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if let Some(speed) = self.speed_descent {
            check_positive("speed_descent", speed)?;
        }
        if let Some(speed) = self.speed_ascent {
            check_positive("speed_ascent", speed)?;
        }

        Ok(())
    }

    /// Suit volume in m³, derived from the thickness over a fixed body
    /// surface when no explicit volume was measured.
    pub fn volume_suit(&self) -> f64 {
        match self.suit {
            SuitSpec::Volume(volume) => volume,
            SuitSpec::Thickness(thickness_mm) => SUIT_SURFACE_M2 * thickness_mm / 1000.0,
        }
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), MeasurementError> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(MeasurementError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn lookup<'a>(fields: &'a [(String, FieldValue)], name: &str) -> Option<&'a FieldValue> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

fn required_number(fields: &[(String, FieldValue)], name: &str) -> Result<f64, MeasurementError> {
    match lookup(fields, name) {
        Some(FieldValue::Number(number)) => Ok(*number),
        Some(FieldValue::Text(text)) => Err(MeasurementError::NotNumeric {
            field: name.to_string(),
            value: text.clone(),
        }),
        None => Err(MeasurementError::MissingField(name.to_string())),
    }
}

fn optional_number(
    fields: &[(String, FieldValue)],
    name: &str,
) -> Result<Option<f64>, MeasurementError> {
    match lookup(fields, name) {
        Some(FieldValue::Number(number)) => Ok(Some(*number)),
        Some(FieldValue::Text(text)) => Err(MeasurementError::NotNumeric {
            field: name.to_string(),
            value: text.clone(),
        }),
        None => Ok(None),
    }
}

fn required_text(fields: &[(String, FieldValue)], name: &str) -> Result<String, MeasurementError> {
    match lookup(fields, name) {
        Some(FieldValue::Text(text)) => Ok(text.clone()),
        Some(FieldValue::Number(number)) => Err(MeasurementError::NotText {
            field: name.to_string(),
            value: number.to_string(),
        }),
        None => Err(MeasurementError::MissingField(name.to_string())),
    }
}

/// Times may be given numerically or as `"MM:SS"` text; both are
/// truncated to whole seconds.
fn time_seconds(fields: &[(String, FieldValue)], name: &str) -> Result<f64, MeasurementError> {
    match lookup(fields, name) {
        Some(FieldValue::Number(seconds)) => Ok(seconds.trunc()),
        Some(FieldValue::Text(text)) => duration::parse(name, text),
        None => Err(MeasurementError::MissingField(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: FieldValue) -> (String, FieldValue) {
        (name.to_string(), value)
    }

    fn number(name: &str, value: f64) -> (String, FieldValue) {
        field(name, FieldValue::Number(value))
    }

    fn record() -> Vec<(String, FieldValue)> {
        vec![
            field("surname", FieldValue::Text("Nery".to_string())),
            number("depth_max", 125.0),
            field("time_descent", FieldValue::Text("2:00".to_string())),
            number("time_ascent", 94.0),
            number("mass_body", 78.0),
            number("mass_ballast", 1.0),
            number("thickness_suit", 1.5),
            number("volume_lungs", 0.009),
            number("depth_gliding_descent", 27.5),
            number("depth_gliding_descent_error", 2.5),
            number("depth_gliding_ascent", 7.5),
            number("depth_gliding_ascent_error", 2.5),
        ]
    }

    #[test]
    fn test_decode_full_record() {
        let m = Measurement::from_fields(&record()).unwrap();
        assert_eq!(m.surname, "Nery");
        assert_eq!(m.depth_max, 125.0);
        assert_eq!(m.time_descent, 120.0);
        assert_eq!(m.time_ascent, 94.0);
        assert_eq!(m.suit, SuitSpec::Thickness(1.5));
        assert_eq!(m.speed_descent, None);
        assert_eq!(m.speed_ascent, None);
    }

    #[test]
    fn test_suit_volume_derived_from_thickness() {
        let m = Measurement::from_fields(&record()).unwrap();
        // 2 m² of 1.5 mm neoprene.
        assert!((m.volume_suit() - 0.003).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_suit_volume_wins() {
        let mut fields = record();
        fields.push(number("volume_suit", 0.004));
        let m = Measurement::from_fields(&fields).unwrap();
        assert_eq!(m.suit, SuitSpec::Volume(0.004));
        assert_eq!(m.volume_suit(), 0.004);
    }

    #[test]
    fn test_missing_suit() {
        let fields: Vec<_> = record()
            .into_iter()
            .filter(|(key, _)| key != "thickness_suit")
            .collect();
        assert_eq!(
            Measurement::from_fields(&fields).unwrap_err(),
            MeasurementError::MissingSuit
        );
    }

    #[test]
    fn test_missing_required_field() {
        let fields: Vec<_> = record()
            .into_iter()
            .filter(|(key, _)| key != "depth_max")
            .collect();
        assert_eq!(
            Measurement::from_fields(&fields).unwrap_err(),
            MeasurementError::MissingField("depth_max".to_string())
        );
    }

    #[test]
    fn test_non_numeric_field() {
        let mut fields = record();
        fields.retain(|(key, _)| key != "mass_body");
        fields.push(field("mass_body", FieldValue::Text("heavy".to_string())));
        assert_eq!(
            Measurement::from_fields(&fields).unwrap_err(),
            MeasurementError::NotNumeric {
                field: "mass_body".to_string(),
                value: "heavy".to_string(),
            }
        );
    }

    #[test]
    fn test_unparseable_time() {
        let mut fields = record();
        fields.retain(|(key, _)| key != "time_ascent");
        fields.push(field("time_ascent", FieldValue::Text("soon".to_string())));
        assert_eq!(
            Measurement::from_fields(&fields).unwrap_err(),
            MeasurementError::InvalidTime {
                field: "time_ascent".to_string(),
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn test_numeric_time_truncates() {
        let mut fields = record();
        fields.retain(|(key, _)| key != "time_ascent");
        fields.push(number("time_ascent", 94.8));
        let m = Measurement::from_fields(&fields).unwrap();
        assert_eq!(m.time_ascent, 94.0);
    }

    #[test]
    fn test_non_positive_depth_rejected() {
        let mut fields = record();
        fields.retain(|(key, _)| key != "depth_max");
        fields.push(number("depth_max", 0.0));
        assert_eq!(
            Measurement::from_fields(&fields).unwrap_err(),
            MeasurementError::NotPositive {
                field: "depth_max".to_string(),
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_negative_ballast_rejected() {
        let mut fields = record();
        fields.retain(|(key, _)| key != "mass_ballast");
        fields.push(number("mass_ballast", -0.5));
        assert_eq!(
            Measurement::from_fields(&fields).unwrap_err(),
            MeasurementError::Negative {
                field: "mass_ballast".to_string(),
                value: -0.5,
            }
        );
    }

    #[test]
    fn test_negative_depth_error_rejected() {
        let mut fields = record();
        fields.retain(|(key, _)| key != "depth_gliding_ascent_error");
        fields.push(number("depth_gliding_ascent_error", -1.0));
        assert!(Measurement::from_fields(&fields).is_err());
    }

    #[test]
    fn test_explicit_speed_fields_decode() {
        let mut fields = record();
        fields.push(number("speed_descent", 1.1));
        fields.push(number("speed_ascent", 1.4));
        let m = Measurement::from_fields(&fields).unwrap();
        assert_eq!(m.speed_descent, Some(1.1));
        assert_eq!(m.speed_ascent, Some(1.4));
    }

    #[test]
    fn test_non_positive_explicit_speed_rejected() {
        let mut fields = record();
        fields.push(number("speed_descent", 0.0));
        assert_eq!(
            Measurement::from_fields(&fields).unwrap_err(),
            MeasurementError::NotPositive {
                field: "speed_descent".to_string(),
                value: 0.0,
            }
        );
    }
}
