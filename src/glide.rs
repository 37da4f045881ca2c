//! Closed-form estimators at the two gliding equilibrium depths.
//!
//! A freediver stops finning once weight, buoyancy and drag balance, so
//! the descent and ascent glide-transition depths each give one force
//! equation. Eliminating the unknown drag term between the two yields a
//! closed form for the incompressible tissue volume; the drag
//! coefficient follows from the same pair of equations. Depth
//! uncertainty propagates through both formulas.

use crate::constants::{
    GRAVITY, PRESSURE_SURFACE, RHO_BALLAST, RHO_NEOPRENE, RHO_NEOPRENE_FOAM, RHO_WATER,
};
use crate::quantity::Quantity;

/// Incompressible body-tissue volume in m³.
///
/// The suit is treated as compressible neoprene foam and the lungs as an
/// ideal gas whose volume scales inversely with the local pressure;
/// everything else displaces a fixed volume. Undefined when the
/// denominator of the closed form vanishes; the caller is expected to
/// check the result for finiteness.
#[allow(clippy::too_many_arguments)]
pub fn volume_tissues(
    mass_body: f64,
    mass_ballast: f64,
    volume_suit: f64,
    volume_gas: f64,
    speed_descent: f64,
    speed_ascent: f64,
    depth_eq_descent: Quantity,
    depth_eq_ascent: Quantity,
) -> Quantity {
    let speed2 = speed_ascent.powi(2) + speed_descent.powi(2);
    let pressure_eq_descent = PRESSURE_SURFACE + depth_eq_descent * GRAVITY * RHO_WATER;
    let pressure_eq_ascent = PRESSURE_SURFACE + depth_eq_ascent * GRAVITY * RHO_WATER;
    let press_speed2_descent = pressure_eq_descent * speed_descent.powi(2);
    let press_speed2_ascent = pressure_eq_ascent * speed_ascent.powi(2);
    let ptot = pressure_eq_ascent * pressure_eq_descent * RHO_NEOPRENE * speed2;

    let numerator = -mass_body * ptot
        + PRESSURE_SURFACE
            * RHO_WATER
            * RHO_NEOPRENE
            * (press_speed2_ascent + press_speed2_descent)
            * volume_gas
        + (press_speed2_ascent * suit_pressure_term(depth_eq_descent)
            + press_speed2_descent * suit_pressure_term(depth_eq_ascent))
            * volume_suit;

    (mass_ballast * (1.0 - RHO_WATER / RHO_BALLAST) - numerator / ptot) / RHO_WATER
}

/// Pressure-weighted suit buoyancy term at an equilibrium depth.
fn suit_pressure_term(depth: Quantity) -> Quantity {
    PRESSURE_SURFACE * RHO_NEOPRENE * (RHO_WATER - RHO_NEOPRENE_FOAM)
        + depth * GRAVITY * RHO_WATER * (RHO_WATER - RHO_NEOPRENE) * RHO_NEOPRENE_FOAM
}

/// Hydrodynamic drag coefficient, with drag = coefficient × speed².
///
/// Uses the rigid-body-equivalent displaced volume of the compressible
/// components (lungs plus suit, net of the foam's own volume) and the
/// two equilibrium depths expressed as pressure-depths.
pub fn drag_coefficient(
    volume_suit: f64,
    volume_gas: f64,
    speed_descent: f64,
    speed_ascent: f64,
    depth_eq_descent: Quantity,
    depth_eq_ascent: Quantity,
) -> Quantity {
    let speed2 = speed_ascent.powi(2) + speed_descent.powi(2);
    let mass_equivalent =
        RHO_NEOPRENE * (volume_gas + volume_suit) - RHO_NEOPRENE_FOAM * volume_suit;
    let volume_equivalent = mass_equivalent / RHO_NEOPRENE;

    let pressure_eq_descent = PRESSURE_SURFACE + depth_eq_descent * GRAVITY * RHO_WATER;
    let pressure_eq_ascent = PRESSURE_SURFACE + depth_eq_ascent * GRAVITY * RHO_WATER;

    // Equilibrium depths as pressure-depths, metres of water column.
    let pressure_depth_ascent = pressure_eq_ascent / GRAVITY / RHO_WATER;
    let pressure_depth_descent = pressure_eq_descent / GRAVITY / RHO_WATER;

    (depth_eq_descent - depth_eq_ascent) * PRESSURE_SURFACE * volume_equivalent
        / (pressure_depth_ascent * pressure_depth_descent * speed2)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Guillaume Néry's 125 m dive profile.
    const SPEED_DESCENT: f64 = 125.0 / 120.0;
    const SPEED_ASCENT: f64 = 125.0 / 94.0;
    const VOLUME_SUIT: f64 = 0.003;
    const VOLUME_LUNGS: f64 = 0.009;

    fn glide_depths() -> (Quantity, Quantity) {
        (Quantity::new(27.5, 2.5), Quantity::new(7.5, 2.5))
    }

    #[test]
    fn test_volume_tissues_reference_dive() {
        let (descent, ascent) = glide_depths();
        let vt = volume_tissues(
            78.0,
            1.0,
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            descent,
            ascent,
        );
        assert!(
            (vt.nominal - 0.07261323492078334).abs() < 1e-4,
            "tissue volume nominal off: {}",
            vt.nominal
        );
        assert!(vt.nominal > 0.0);
        assert!(vt.std_err > 0.0);
    }

    #[test]
    fn test_drag_coefficient_reference_dive() {
        let (descent, ascent) = glide_depths();
        let c = drag_coefficient(
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            descent,
            ascent,
        );
        assert!(
            (c.nominal - 12.453969801529535).abs() < 1e-4,
            "drag coefficient nominal off: {}",
            c.nominal
        );
        assert!(c.nominal > 0.0);
        assert!(c.std_err > 0.0);
    }

    #[test]
    fn test_exact_depths_give_exact_estimates() {
        let descent = Quantity::exact(27.5);
        let ascent = Quantity::exact(7.5);
        let vt = volume_tissues(
            78.0,
            1.0,
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            descent,
            ascent,
        );
        let c = drag_coefficient(
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            descent,
            ascent,
        );
        assert_eq!(vt.std_err, 0.0);
        assert_eq!(c.std_err, 0.0);
        assert!((vt.nominal - 0.07261323492078334).abs() < 1e-4);
        assert!((c.nominal - 12.453969801529535).abs() < 1e-4);
    }

    #[test]
    fn test_uncertainty_grows_with_depth_error() {
        let narrow = volume_tissues(
            78.0,
            1.0,
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            Quantity::new(27.5, 1.0),
            Quantity::new(7.5, 1.0),
        );
        let wide = volume_tissues(
            78.0,
            1.0,
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            Quantity::new(27.5, 5.0),
            Quantity::new(7.5, 5.0),
        );
        assert!(wide.std_err > narrow.std_err);
        // Same nominal regardless of error bars.
        assert!((wide.nominal - narrow.nominal).abs() < 1e-12);
    }

    #[test]
    fn test_ballast_raises_tissue_estimate() {
        let (descent, ascent) = glide_depths();
        let light = volume_tissues(
            78.0,
            0.5,
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            descent,
            ascent,
        );
        let heavy = volume_tissues(
            78.0,
            2.0,
            VOLUME_SUIT,
            VOLUME_LUNGS,
            SPEED_DESCENT,
            SPEED_ASCENT,
            descent,
            ascent,
        );
        // Extra lead means the same equilibrium is reached with more
        // tissue buoyancy, so the estimate moves with the ballast.
        assert!(heavy.nominal > light.nominal);
    }
}
