//! Anthropometric estimates used to pre-fill measurement records.
//!
//! The UI collaborator suggests a lung volume from published spirometry
//! regressions when the diver has no measured value.

/// Biological sex, as used by the spirometry reference equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

/// Body surface area in m², Shuter–Aslani regression.
pub fn body_surface_area(height_cm: f64, weight_kg: f64) -> f64 {
    0.00949 * height_cm.powf(0.655) * weight_kg.powf(0.441)
}

/// Total lung capacity in litres, ERS 1993 reference equations
/// (Quanjer et al.).
pub fn total_lung_capacity(height_cm: f64, sex: Sex) -> f64 {
    let (slope_height, intercept) = match sex {
        Sex::Female => (6.60, -5.79),
        Sex::Male => (7.99, -7.08),
    };
    slope_height * height_cm / 100.0 + intercept
}

/// Residual lung volume in litres, ERS 1993 reference equations
/// (Quanjer et al.).
pub fn residual_volume(height_cm: f64, age_years: f64, sex: Sex) -> f64 {
    let (slope_height, slope_age, intercept) = match sex {
        Sex::Female => (1.31, 0.022, -1.23),
        Sex::Male => (1.81, 0.016, -2.0),
    };
    slope_height * height_cm / 100.0 + slope_age * age_years + intercept
}
