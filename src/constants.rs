//! Physical constants for the hydrostatic model.
//!
//! SI units throughout: densities in kg/m³, pressures in Pa, depths in
//! metres. The material densities describe the buoyant components of a
//! freediver's equipment: lead ballast, solid neoprene and the gas-blown
//! neoprene foam it is made from once expanded.

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.80665;

/// Density of sea water (kg/m³).
pub const RHO_WATER: f64 = 1025.0;

/// Atmospheric pressure at the surface (Pa).
pub const PRESSURE_SURFACE: f64 = 101_325.0;

/// Density of lead ballast (kg/m³).
pub const RHO_BALLAST: f64 = 11_000.0;

/// Density of solid neoprene (kg/m³).
pub const RHO_NEOPRENE: f64 = 1230.0;

/// Density of expanded neoprene foam (kg/m³).
pub const RHO_NEOPRENE_FOAM: f64 = 170.0;

/// Reference wetsuit surface area (m²) used to derive a suit volume
/// from its thickness.
pub const SUIT_SURFACE_M2: f64 = 2.0;

/// Absolute pressure (Pa) at a depth (m) below the surface.
pub fn pressure_at_depth(depth_m: f64) -> f64 {
    PRESSURE_SURFACE + depth_m * GRAVITY * RHO_WATER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_at_depth() {
        assert_eq!(pressure_at_depth(0.0), PRESSURE_SURFACE);

        // One extra atmosphere roughly every 10 m of sea water.
        let p10 = pressure_at_depth(10.0);
        assert!(
            (p10 - 201_843.1625).abs() < 1e-6,
            "pressure at 10 m should be ~2 atm, got {p10}"
        );
    }
}
