//! Dive time parsing.
//!
//! Times arrive from the data loader either as a plain number of seconds
//! or as a `"MM:SS"` string. Both forms are truncated toward zero to
//! whole seconds. Seconds past the colon may exceed 59 and may carry a
//! fractional part.

use nom::{
    branch::alt, character::complete::char, combinator::map, number::complete::double,
    sequence::separated_pair, IResult, Parser,
};

use crate::error::MeasurementError;

/// Parse a dive time string into whole seconds.
///
/// `field` names the measurement field in the error on failure.
pub fn parse(field: &str, input: &str) -> Result<f64, MeasurementError> {
    match total_seconds(input.trim()) {
        Ok((remaining, seconds)) if remaining.is_empty() => Ok(seconds.trunc()),
        _ => Err(MeasurementError::InvalidTime {
            field: field.to_string(),
            value: input.to_string(),
        }),
    }
}

fn total_seconds(input: &str) -> IResult<&str, f64> {
    alt((minutes_seconds, double)).parse(input)
}

fn minutes_seconds(input: &str) -> IResult<&str, f64> {
    map(
        separated_pair(double, char(':'), double),
        |(minutes, seconds)| minutes * 60.0 + seconds,
    )
    .parse(input)
}
