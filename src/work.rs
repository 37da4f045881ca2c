//! Mechanical work over a full descent-plus-ascent cycle.
//!
//! Three forces drive the integration: total weight, buoyancy of the
//! incompressible displacement and buoyancy of the compressible gas
//! component. The gas contribution varies with pressure, which turns
//! into three logarithmic terms in the work core. Implausible
//! intermediate forces are reported through the log facade but never
//! abort the computation.

use log::warn;

use crate::constants::{
    pressure_at_depth, GRAVITY, PRESSURE_SURFACE, RHO_BALLAST, RHO_NEOPRENE, RHO_NEOPRENE_FOAM,
    RHO_WATER,
};
use crate::quantity::Value;

/// Inputs to [`total_work`].
///
/// The [`Value`]-typed fields accept plain scalars on the optimizer path
/// and quantities with uncertainty everywhere else; the result is
/// uncertain exactly when one of them is.
#[derive(Debug, Clone, Copy)]
pub struct WorkInputs<'a> {
    /// Diver identifier, used only to label diagnostics.
    pub surname: &'a str,
    pub depth_max: f64,
    pub mass_body: f64,
    pub mass_ballast: Value,
    /// Incompressible (tissue) volume in m³.
    pub volume_incompress: Value,
    pub volume_suit: Value,
    /// Lung gas volume at surface pressure, m³.
    pub volume_gas: f64,
    pub speed_descent: f64,
    pub speed_ascent: f64,
    pub drag_coefficient: Value,
}

/// Total mechanical work in joules for one dive cycle.
///
/// The descent net force must come out negative (the diver decelerates
/// into the glide); if it does not, it is sign-flipped with a warning so
/// the integration can proceed. A non-positive ascent net force is
/// warned about but not corrected, and propagates NaN through the
/// logarithm of its ratio.
pub fn total_work(inputs: &WorkInputs) -> Value {
    let WorkInputs {
        surname,
        depth_max,
        mass_body,
        mass_ballast,
        volume_incompress,
        volume_suit,
        volume_gas,
        speed_descent,
        speed_ascent,
        drag_coefficient,
    } = *inputs;

    let force_weight = GRAVITY * (mass_body + mass_ballast + RHO_NEOPRENE_FOAM * volume_suit);
    let force_buoyancy_incompress = GRAVITY
        * RHO_WATER
        * (mass_ballast / RHO_BALLAST
            + RHO_NEOPRENE_FOAM * volume_suit / RHO_NEOPRENE
            + volume_incompress);
    let force_buoyancy_gas = GRAVITY
        * RHO_WATER
        * (volume_gas + (1.0 - RHO_NEOPRENE_FOAM / RHO_NEOPRENE) * volume_suit);

    if force_weight.nominal() <= 0.0 {
        warn!("{surname}: weight force {force_weight} should be positive");
    }
    if force_buoyancy_incompress.nominal() <= 0.0 {
        warn!("{surname}: incompressible buoyancy force {force_buoyancy_incompress} should be positive");
    }
    if force_buoyancy_gas.nominal() <= 0.0 {
        warn!("{surname}: gas buoyancy force {force_buoyancy_gas} should be positive");
    }

    let force_drag_descent = drag_coefficient * speed_descent.powi(2);
    let force_drag_ascent = drag_coefficient * speed_ascent.powi(2);

    if force_drag_descent.nominal() <= 0.0 {
        warn!("{surname}: descent drag force {force_drag_descent} should be positive");
    }
    if force_drag_ascent.nominal() <= 0.0 {
        warn!("{surname}: ascent drag force {force_drag_ascent} should be positive");
    }

    let mut force_descent = force_drag_descent - force_weight + force_buoyancy_incompress;
    let force_ascent = force_drag_ascent + force_weight - force_buoyancy_incompress;

    if force_descent.nominal() >= 0.0 {
        warn!(
            "{surname}: descent force {force_descent} should be negative; \
             the diver reaches equilibrium before leaving the gliding zone \
             ({force_drag_descent} - {force_weight} + {force_buoyancy_incompress})"
        );
        force_descent = -force_descent;
    }
    if force_ascent.nominal() <= 0.0 {
        warn!(
            "{surname}: ascent force {force_ascent} should be positive \
             ({force_drag_ascent} + {force_weight} - {force_buoyancy_incompress})"
        );
    }

    let pressure_depth_max = pressure_at_depth(depth_max);

    let mut work_core = force_ascent - force_descent - 2.0 * force_buoyancy_gas;
    work_core = work_core
        - force_buoyancy_gas * Value::Scalar(pressure_depth_max / PRESSURE_SURFACE).ln();
    work_core = work_core + force_buoyancy_gas * (force_buoyancy_gas / force_ascent).ln();
    work_core = work_core + force_buoyancy_gas * (-force_buoyancy_gas / force_descent).ln();

    depth_max * force_ascent + PRESSURE_SURFACE * work_core / (GRAVITY * RHO_WATER)
}
