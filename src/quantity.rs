//! Measurement values carrying a standard error.
//!
//! [`Quantity`] pairs a nominal value with a standard error and
//! propagates the error through arithmetic with first-order rules,
//! treating operands as uncorrelated. [`Value`] is the scalar-or-
//! uncertain sum type used by the work integrator, which has to accept
//! plain numbers on the optimizer path and quantities everywhere else.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A nominal value with a standard error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub nominal: f64,
    pub std_err: f64,
}

impl Quantity {
    /// A quantity with the given nominal value and standard error.
    pub fn new(nominal: f64, std_err: f64) -> Self {
        Quantity {
            nominal,
            std_err: std_err.abs(),
        }
    }

    /// A quantity with zero error.
    pub fn exact(nominal: f64) -> Self {
        Quantity {
            nominal,
            std_err: 0.0,
        }
    }

    /// Natural logarithm with propagated error.
    ///
    /// The error term |σ/n| is always computed from the inputs, so a
    /// non-positive nominal yields a NaN nominal with a finite error.
    pub fn ln(self) -> Self {
        let nominal = if self.nominal > 0.0 {
            self.nominal.ln()
        } else {
            f64::NAN
        };
        Quantity {
            nominal,
            std_err: (self.std_err / self.nominal).abs(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ± {}", self.nominal, self.std_err)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity {
            nominal: self.nominal + rhs.nominal,
            std_err: self.std_err.hypot(rhs.std_err),
        }
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity {
            nominal: self.nominal - rhs.nominal,
            std_err: self.std_err.hypot(rhs.std_err),
        }
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity {
            nominal: self.nominal * rhs.nominal,
            std_err: (rhs.nominal * self.std_err).hypot(self.nominal * rhs.std_err),
        }
    }
}

impl Div for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity {
            nominal: self.nominal / rhs.nominal,
            std_err: (self.std_err / rhs.nominal)
                .hypot(self.nominal * rhs.std_err / (rhs.nominal * rhs.nominal)),
        }
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity {
            nominal: -self.nominal,
            std_err: self.std_err,
        }
    }
}

impl Add<f64> for Quantity {
    type Output = Quantity;

    fn add(self, rhs: f64) -> Quantity {
        self + Quantity::exact(rhs)
    }
}

impl Add<Quantity> for f64 {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity::exact(self) + rhs
    }
}

impl Sub<f64> for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: f64) -> Quantity {
        self - Quantity::exact(rhs)
    }
}

impl Sub<Quantity> for f64 {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity::exact(self) - rhs
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self * Quantity::exact(rhs)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        Quantity::exact(self) * rhs
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        self / Quantity::exact(rhs)
    }
}

impl Div<Quantity> for f64 {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::exact(self) / rhs
    }
}

/// A plain number or a quantity with uncertainty.
///
/// Arithmetic between two scalars stays scalar; any uncertain operand
/// promotes the result. The work integrator dispatches its logarithms
/// through [`Value::ln`] so both cases share one code path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Scalar(f64),
    Uncertain(Quantity),
}

impl Value {
    /// Nominal value regardless of variant.
    pub fn nominal(&self) -> f64 {
        match self {
            Value::Scalar(n) => *n,
            Value::Uncertain(q) => q.nominal,
        }
    }

    /// Standard error; zero for scalars.
    pub fn std_err(&self) -> f64 {
        match self {
            Value::Scalar(_) => 0.0,
            Value::Uncertain(q) => q.std_err,
        }
    }

    /// Promote to a quantity, with zero error for scalars.
    pub fn quantity(&self) -> Quantity {
        match self {
            Value::Scalar(n) => Quantity::exact(*n),
            Value::Uncertain(q) => *q,
        }
    }

    /// Natural logarithm, plain or propagated per variant.
    ///
    /// A non-positive scalar yields NaN rather than a domain panic;
    /// the uncertain branch keeps its error term finite the same way
    /// [`Quantity::ln`] does.
    pub fn ln(self) -> Value {
        match self {
            Value::Scalar(n) => Value::Scalar(if n > 0.0 { n.ln() } else { f64::NAN }),
            Value::Uncertain(q) => Value::Uncertain(q.ln()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(n) => write!(f, "{n}"),
            Value::Uncertain(q) => write!(f, "{q}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Scalar(n)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Value {
        Value::Uncertain(q)
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a + b),
            (a, b) => Value::Uncertain(a.quantity() + b.quantity()),
        }
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a - b),
            (a, b) => Value::Uncertain(a.quantity() - b.quantity()),
        }
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a * b),
            (a, b) => Value::Uncertain(a.quantity() * b.quantity()),
        }
    }
}

impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        match (self, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a / b),
            (a, b) => Value::Uncertain(a.quantity() / b.quantity()),
        }
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        match self {
            Value::Scalar(n) => Value::Scalar(-n),
            Value::Uncertain(q) => Value::Uncertain(-q),
        }
    }
}

impl Add<f64> for Value {
    type Output = Value;

    fn add(self, rhs: f64) -> Value {
        self + Value::Scalar(rhs)
    }
}

impl Add<Value> for f64 {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value::Scalar(self) + rhs
    }
}

impl Sub<f64> for Value {
    type Output = Value;

    fn sub(self, rhs: f64) -> Value {
        self - Value::Scalar(rhs)
    }
}

impl Sub<Value> for f64 {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value::Scalar(self) - rhs
    }
}

impl Mul<f64> for Value {
    type Output = Value;

    fn mul(self, rhs: f64) -> Value {
        self * Value::Scalar(rhs)
    }
}

impl Mul<Value> for f64 {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        Value::Scalar(self) * rhs
    }
}

impl Div<f64> for Value {
    type Output = Value;

    fn div(self, rhs: f64) -> Value {
        self / Value::Scalar(rhs)
    }
}

impl Div<Value> for f64 {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        Value::Scalar(self) / rhs
    }
}
