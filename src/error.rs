use thiserror::Error;

/// Error type for measurement decoding and validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasurementError {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field {field} must be a number, got '{value}'")]
    NotNumeric { field: String, value: String },

    #[error("field {field} must be text, got '{value}'")]
    NotText { field: String, value: String },

    #[error("field {field} must be positive, got {value}")]
    NotPositive { field: String, value: f64 },

    #[error("field {field} must not be negative, got {value}")]
    Negative { field: String, value: f64 },

    #[error("invalid time for {field}: '{value}'")]
    InvalidTime { field: String, value: String },

    #[error("one of thickness_suit or volume_suit is required")]
    MissingSuit,
}

/// A derived physical quantity came out non-finite.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericDomainError {
    #[error("tissue volume for {surname} is not finite ({value})")]
    TissueVolume { surname: String, value: f64 },

    #[error("drag coefficient for {surname} is not finite ({value})")]
    DragCoefficient { surname: String, value: f64 },

    #[error("total work for {surname} is not finite ({value})")]
    TotalWork { surname: String, value: f64 },
}

/// Any failure while building a diver aggregate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiverError {
    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    #[error(transparent)]
    NumericDomain(#[from] NumericDomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_error_display() {
        let err = MeasurementError::MissingField("depth_max".to_string());
        assert_eq!(err.to_string(), "missing required field: depth_max");

        let err = MeasurementError::NotNumeric {
            field: "mass_body".to_string(),
            value: "heavy".to_string(),
        };
        assert_eq!(err.to_string(), "field mass_body must be a number, got 'heavy'");

        let err = MeasurementError::NotPositive {
            field: "depth_max".to_string(),
            value: -5.0,
        };
        assert_eq!(err.to_string(), "field depth_max must be positive, got -5");

        let err = MeasurementError::InvalidTime {
            field: "time_descent".to_string(),
            value: "12:".to_string(),
        };
        assert_eq!(err.to_string(), "invalid time for time_descent: '12:'");

        let err = MeasurementError::MissingSuit;
        assert_eq!(
            err.to_string(),
            "one of thickness_suit or volume_suit is required"
        );
    }

    #[test]
    fn test_numeric_domain_error_display() {
        let err = NumericDomainError::TissueVolume {
            surname: "Nery".to_string(),
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "tissue volume for Nery is not finite (NaN)");
    }

    #[test]
    fn test_diver_error_wraps_sources() {
        let err: DiverError = MeasurementError::MissingSuit.into();
        assert_eq!(
            err.to_string(),
            "one of thickness_suit or volume_suit is required"
        );

        let err: DiverError = NumericDomainError::TotalWork {
            surname: "Nery".to_string(),
            value: f64::INFINITY,
        }
        .into();
        assert_eq!(err.to_string(), "total work for Nery is not finite (inf)");
    }
}
