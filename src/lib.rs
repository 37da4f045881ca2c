//! Stateless compute core for freedive effort estimation.
//!
//! Estimates a freediver's incompressible tissue volume and drag
//! coefficient from dive telemetry, integrates the mechanical work over
//! a dive cycle, and recommends ballast mass and suit thickness that
//! minimize it. No I/O lives here; data loading and presentation are
//! external collaborators.

pub mod constants;
pub mod diver;
pub mod duration;
pub mod error;
pub mod glide;
pub mod measurement;
pub mod optim;
pub mod physiology;
pub mod quantity;
pub mod trajectory;
pub mod work;

pub use diver::{Diver, OptimizationResult, SweepVariable, WorkSweep};
pub use error::{DiverError, MeasurementError, NumericDomainError};
pub use measurement::{FieldValue, Measurement, SuitSpec};
pub use optim::{Bounds, Method, Minimum};
pub use physiology::Sex;
pub use quantity::{Quantity, Value};
pub use trajectory::GlideMarkers;
pub use work::{total_work, WorkInputs};
