//! The diver aggregate.
//!
//! Owns one measurement record, derives and caches the physical
//! estimates at construction, and exposes the ballast/suit optimizer
//! and the work-sensitivity sweep on top of them. Immutable once built;
//! [`Diver::with_parameters`] rebuilds a variant with substituted
//! ballast and suit thickness for comparison.

use log::debug;

use crate::constants::{RHO_NEOPRENE_FOAM, RHO_WATER, SUIT_SURFACE_M2};
use crate::error::{DiverError, NumericDomainError};
use crate::glide;
use crate::measurement::{FieldValue, Measurement, SuitSpec};
use crate::optim::{self, Bounds, Method, Minimum};
use crate::quantity::{Quantity, Value};
use crate::trajectory::{self, GlideMarkers};
use crate::work::{self, WorkInputs};

/// Optimization search space: ballast mass in [0, 5] kg, suit thickness
/// in [0, 10] mm.
const OPTIM_BOUNDS: Bounds = Bounds {
    lower: [0.0, 0.0],
    upper: [5.0, 10.0],
};

/// Starting point for every optimizer run: 1 kg of lead, a 1.5 mm suit.
const OPTIM_START: [f64; 2] = [1.0, 1.5];

/// One diver's validated inputs and cached derived quantities.
#[derive(Debug, Clone)]
pub struct Diver {
    measurement: Measurement,
    pub depth_max: f64,
    pub mass_body: f64,
    pub mass_ballast: f64,
    pub volume_lungs: f64,
    pub volume_suit: f64,
    pub time_descent: f64,
    pub time_ascent: f64,
    pub speed_descent: f64,
    pub speed_ascent: f64,
    pub depth_gliding_descent: Quantity,
    pub depth_gliding_ascent: Quantity,
    pub volume_tissues: Quantity,
    pub drag_coefficient: Quantity,
    pub total_work: Quantity,
}

/// Recommendation produced by [`Diver::minimize`].
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub surname: String,
    /// Work at the diver's current parameters (J).
    pub work: f64,
    /// Work at the recommended parameters (J).
    pub work_best: f64,
    /// Ballast mass found by the unperturbed run (kg).
    pub mass_ballast_best: f64,
    /// Recommended ballast mass with its error bar (kg).
    pub mass_ballast_proposal: Quantity,
    /// Suit thickness found by the unperturbed run (mm).
    pub thickness_suit_best: f64,
    /// Recommended suit thickness with its error bar (mm).
    pub thickness_suit_proposal: Quantity,
    /// Relative work change at the recommended parameters, in percent;
    /// negative means the recommendation saves effort.
    pub gain_percent: Quantity,
    /// True only if all five minimizer runs converged.
    pub converged: bool,
}

/// Parameter swept by [`Diver::work_sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepVariable {
    /// Ballast mass, 20 points over [0, 5] kg.
    MassBallast,
    /// Maximum depth, 10 points over ±20% of the dive's depth.
    DepthMax,
    /// Common factor on both speeds, 10 points over [0.8, 1.2].
    SpeedFactor,
    /// Tissue volume as a ratio of the neutral volume, 10 points over
    /// [0.8, 1.2].
    TissueRatio,
    /// Gas volume, 20 points over [0, 10]. The grid is fed to the
    /// integrator unconverted; plotting collaborators rely on these
    /// exact values.
    VolumeLungs,
}

/// Ordered (parameter value, work) evaluations from a sensitivity sweep.
#[derive(Debug, Clone)]
pub struct WorkSweep {
    pub variable: Option<SweepVariable>,
    pub points: Vec<(f64, f64)>,
}

impl Diver {
    /// Build the aggregate: validate the record, derive speeds and suit
    /// volume, then estimate tissue volume, drag coefficient and total
    /// work once.
    ///
    /// Fails with a [`NumericDomainError`] when any cached estimate
    /// comes out non-finite, so undefined physics never escapes
    /// construction silently.
    pub fn new(measurement: Measurement) -> Result<Diver, DiverError> {
        measurement.validate()?;

        let volume_suit = measurement.volume_suit();
        let speed_descent = measurement
            .speed_descent
            .unwrap_or(measurement.depth_max / measurement.time_descent);
        let speed_ascent = measurement
            .speed_ascent
            .unwrap_or(measurement.depth_max / measurement.time_ascent);

        let depth_gliding_descent = Quantity::new(
            measurement.depth_gliding_descent,
            measurement.depth_gliding_descent_error,
        );
        let depth_gliding_ascent = Quantity::new(
            measurement.depth_gliding_ascent,
            measurement.depth_gliding_ascent_error,
        );

        let volume_tissues = glide::volume_tissues(
            measurement.mass_body,
            measurement.mass_ballast,
            volume_suit,
            measurement.volume_lungs,
            speed_descent,
            speed_ascent,
            depth_gliding_descent,
            depth_gliding_ascent,
        );
        if !volume_tissues.nominal.is_finite() {
            return Err(NumericDomainError::TissueVolume {
                surname: measurement.surname.clone(),
                value: volume_tissues.nominal,
            }
            .into());
        }

        let drag_coefficient = glide::drag_coefficient(
            volume_suit,
            measurement.volume_lungs,
            speed_descent,
            speed_ascent,
            depth_gliding_descent,
            depth_gliding_ascent,
        );
        if !drag_coefficient.nominal.is_finite() {
            return Err(NumericDomainError::DragCoefficient {
                surname: measurement.surname.clone(),
                value: drag_coefficient.nominal,
            }
            .into());
        }

        let total_work = work::total_work(&WorkInputs {
            surname: &measurement.surname,
            depth_max: measurement.depth_max,
            mass_body: measurement.mass_body,
            mass_ballast: Value::Scalar(measurement.mass_ballast),
            volume_incompress: Value::Uncertain(volume_tissues),
            volume_suit: Value::Scalar(volume_suit),
            volume_gas: measurement.volume_lungs,
            speed_descent,
            speed_ascent,
            drag_coefficient: Value::Uncertain(drag_coefficient),
        })
        .quantity();
        if !total_work.nominal.is_finite() {
            return Err(NumericDomainError::TotalWork {
                surname: measurement.surname.clone(),
                value: total_work.nominal,
            }
            .into());
        }

        Ok(Diver {
            depth_max: measurement.depth_max,
            mass_body: measurement.mass_body,
            mass_ballast: measurement.mass_ballast,
            volume_lungs: measurement.volume_lungs,
            volume_suit,
            time_descent: measurement.time_descent,
            time_ascent: measurement.time_ascent,
            speed_descent,
            speed_ascent,
            depth_gliding_descent,
            depth_gliding_ascent,
            volume_tissues,
            drag_coefficient,
            total_work,
            measurement,
        })
    }

    /// Decode a key-value record and build the aggregate from it.
    pub fn from_fields(fields: &[(String, FieldValue)]) -> Result<Diver, DiverError> {
        Diver::new(Measurement::from_fields(fields)?)
    }

    pub fn surname(&self) -> &str {
        &self.measurement.surname
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    /// Rebuild this diver with a substituted ballast mass and suit
    /// thickness, re-deriving every cached quantity.
    pub fn with_parameters(
        &self,
        mass_ballast: f64,
        thickness_suit_mm: f64,
    ) -> Result<Diver, DiverError> {
        let mut measurement = self.measurement.clone();
        measurement.mass_ballast = mass_ballast;
        measurement.suit = SuitSpec::Thickness(thickness_suit_mm);
        Diver::new(measurement)
    }

    /// Find the (ballast mass, suit thickness) pair minimizing total
    /// work, with an error bar on the recommendation.
    ///
    /// Five bounded minimizations run over the same snapshot: one at the
    /// nominal tissue volume and drag coefficient, then one per ±1σ
    /// perturbation of each. The recommendation averages the four
    /// perturbed optima; its error bar combines only the two plus-side
    /// deltas, an approximation rather than a standard propagation rule,
    /// kept because downstream reports depend on this exact arithmetic.
    pub fn minimize(&self, method: Method) -> OptimizationResult {
        let run = |volume_tissues: f64, drag_coefficient: f64| -> Minimum {
            optim::minimize(
                |x| {
                    self.optimization_work(
                        Value::Scalar(x[0]),
                        Value::Scalar(x[1]),
                        volume_tissues,
                        drag_coefficient,
                    )
                    .nominal()
                },
                OPTIM_START,
                OPTIM_BOUNDS,
                method,
            )
        };

        let vt = self.volume_tissues;
        let drag = self.drag_coefficient;

        let nominal = run(vt.nominal, drag.nominal);
        let plus_vt = run(vt.nominal + vt.std_err, drag.nominal);
        let minus_vt = run(vt.nominal - vt.std_err, drag.nominal);
        let plus_drag = run(vt.nominal, drag.nominal + drag.std_err);
        let minus_drag = run(vt.nominal, drag.nominal - drag.std_err);

        for (label, minimum) in [
            ("nominal", &nominal),
            ("tissue +1σ", &plus_vt),
            ("tissue -1σ", &minus_vt),
            ("drag +1σ", &plus_drag),
            ("drag -1σ", &minus_drag),
        ] {
            debug!(
                "{}: {label} run found ballast {:.4} kg, thickness {:.4} mm \
                 in {} iterations (converged: {})",
                self.surname(),
                minimum.x[0],
                minimum.x[1],
                minimum.iterations,
                minimum.converged,
            );
        }

        let proposal = |pick: fn(&Minimum) -> f64| -> Quantity {
            let mean =
                (pick(&plus_vt) + pick(&minus_vt) + pick(&plus_drag) + pick(&minus_drag)) / 4.0;
            let err = (mean - pick(&plus_vt)).hypot(mean - pick(&plus_drag));
            Quantity::new(mean, err)
        };
        let mass_ballast_proposal = proposal(|m| m.x[0]);
        let thickness_suit_proposal = proposal(|m| m.x[1]);

        let work_proposal = self.optimization_work(
            Value::Uncertain(mass_ballast_proposal),
            Value::Uncertain(thickness_suit_proposal),
            vt.nominal,
            drag.nominal,
        );
        let gain_percent = ((work_proposal / self.total_work.nominal) - 1.0) * 100.0;

        OptimizationResult {
            surname: self.surname().to_string(),
            work: self.total_work.nominal,
            work_best: work_proposal.nominal(),
            mass_ballast_best: nominal.x[0],
            mass_ballast_proposal,
            thickness_suit_best: nominal.x[1],
            thickness_suit_proposal,
            gain_percent: gain_percent.quantity(),
            converged: nominal.converged
                && plus_vt.converged
                && minus_vt.converged
                && plus_drag.converged
                && minus_drag.converged,
        }
    }

    /// Total-work evaluations across a fixed grid of one parameter,
    /// everything else held at this diver's nominal values.
    ///
    /// With no variable, a single evaluation at the current nominal
    /// parameters is returned under a parameter value of 0.0.
    pub fn work_sweep(&self, variable: Option<SweepVariable>) -> WorkSweep {
        let eval = |mass_ballast: f64,
                    depth_max: f64,
                    speed_factor: f64,
                    volume_tissues: f64,
                    volume_gas: f64|
         -> f64 {
            work::total_work(&WorkInputs {
                surname: self.surname(),
                depth_max,
                mass_body: self.mass_body,
                mass_ballast: Value::Scalar(mass_ballast),
                volume_incompress: Value::Scalar(volume_tissues),
                volume_suit: Value::Scalar(self.volume_suit),
                volume_gas,
                speed_descent: self.speed_descent * speed_factor,
                speed_ascent: self.speed_ascent * speed_factor,
                drag_coefficient: Value::Uncertain(self.drag_coefficient),
            })
            .nominal()
        };
        let baseline = |mass_ballast: f64, depth_max: f64, speed_factor: f64, volume_gas: f64| {
            eval(
                mass_ballast,
                depth_max,
                speed_factor,
                self.volume_tissues.nominal,
                volume_gas,
            )
        };

        // Volume the diver would need to float exactly, the reference
        // point of the tissue-ratio sweep.
        let mass_total =
            self.mass_body + self.mass_ballast + RHO_NEOPRENE_FOAM * self.volume_suit;

        let points = match variable {
            None => vec![(
                0.0,
                baseline(self.mass_ballast, self.depth_max, 1.0, self.volume_lungs),
            )],
            Some(SweepVariable::MassBallast) => linspace(0.0, 5.0, 20)
                .into_iter()
                .map(|mb| (mb, baseline(mb, self.depth_max, 1.0, self.volume_lungs)))
                .collect(),
            Some(SweepVariable::DepthMax) => linspace(0.8, 1.2, 10)
                .into_iter()
                .map(|factor| {
                    let depth = factor * self.depth_max;
                    (
                        depth,
                        baseline(self.mass_ballast, depth, 1.0, self.volume_lungs),
                    )
                })
                .collect(),
            Some(SweepVariable::SpeedFactor) => linspace(0.8, 1.2, 10)
                .into_iter()
                .map(|factor| {
                    (
                        factor,
                        baseline(self.mass_ballast, self.depth_max, factor, self.volume_lungs),
                    )
                })
                .collect(),
            Some(SweepVariable::TissueRatio) => linspace(0.8, 1.2, 10)
                .into_iter()
                .map(|ratio| {
                    (
                        ratio,
                        eval(
                            self.mass_ballast,
                            self.depth_max,
                            1.0,
                            mass_total / RHO_WATER * ratio,
                            self.volume_lungs,
                        ),
                    )
                })
                .collect(),
            Some(SweepVariable::VolumeLungs) => linspace(0.0, 10.0, 20)
                .into_iter()
                .map(|volume| {
                    (
                        volume,
                        baseline(self.mass_ballast, self.depth_max, 1.0, volume),
                    )
                })
                .collect(),
        };

        WorkSweep { variable, points }
    }

    /// Sampled (time, depth) profile of this dive for plotting, one
    /// point per second.
    pub fn trajectory(&self) -> Vec<(f64, f64)> {
        trajectory::depth_series(self.time_descent, self.time_ascent, self.depth_max)
    }

    /// Glide-window markers on this dive's depth profile, at the
    /// nominal glide depths.
    pub fn glide_markers(&self) -> GlideMarkers {
        trajectory::glide_markers(
            &self.trajectory(),
            self.depth_gliding_descent.nominal,
            self.depth_gliding_ascent.nominal,
        )
    }

    /// One work evaluation on the optimizer's parameterization: ballast
    /// mass in kg, suit thickness in mm (converted to a suit volume over
    /// the reference surface), estimates pinned to the given nominals.
    fn optimization_work(
        &self,
        mass_ballast: Value,
        thickness_suit_mm: Value,
        volume_tissues: f64,
        drag_coefficient: f64,
    ) -> Value {
        work::total_work(&WorkInputs {
            surname: self.surname(),
            depth_max: self.depth_max,
            mass_body: self.mass_body,
            mass_ballast,
            volume_incompress: Value::Scalar(volume_tissues),
            volume_suit: thickness_suit_mm / 1000.0 * SUIT_SURFACE_M2,
            volume_gas: self.volume_lungs,
            speed_descent: self.speed_descent,
            speed_ascent: self.speed_ascent,
            drag_coefficient: Value::Scalar(drag_coefficient),
        })
    }
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    let step = (end - start) / (count - 1) as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}
