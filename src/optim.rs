//! Bounded derivative-free minimizers over a two-parameter box.
//!
//! Two interchangeable methods sit behind [`Method`]: a Nelder–Mead
//! simplex with every trial point clamped into the box, and a
//! coordinate descent that runs a golden-section line search per axis.
//! Non-finite objective values are treated as +∞ so undefined regions
//! rank worst instead of poisoning comparisons.

/// Inclusive box bounds for the two parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: [f64; 2],
    pub upper: [f64; 2],
}

impl Bounds {
    pub fn new(lower: [f64; 2], upper: [f64; 2]) -> Self {
        Bounds { lower, upper }
    }

    /// Clamp a point into the box, coordinate by coordinate.
    pub fn clamp(&self, x: [f64; 2]) -> [f64; 2] {
        [
            x[0].clamp(self.lower[0], self.upper[0]),
            x[1].clamp(self.lower[1], self.upper[1]),
        ]
    }

    pub fn contains(&self, x: [f64; 2]) -> bool {
        (self.lower[0]..=self.upper[0]).contains(&x[0])
            && (self.lower[1]..=self.upper[1]).contains(&x[1])
    }
}

/// Minimizer selection; Nelder–Mead is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    NelderMead,
    CoordinateDescent,
}

/// Result of one bounded minimization.
#[derive(Debug, Clone, Copy)]
pub struct Minimum {
    pub x: [f64; 2],
    pub fx: f64,
    pub iterations: usize,
    /// False when the iteration budget ran out before the tolerances
    /// were met; the returned point is still the best one seen.
    pub converged: bool,
}

const XATOL: f64 = 1e-8;
const FATOL: f64 = 1e-10;

/// Find a minimum of `objective` inside `bounds`, starting at `start`.
pub fn minimize<F>(objective: F, start: [f64; 2], bounds: Bounds, method: Method) -> Minimum
where
    F: Fn([f64; 2]) -> f64,
{
    let eval = |x: [f64; 2]| {
        let value = objective(x);
        if value.is_finite() {
            value
        } else {
            f64::INFINITY
        }
    };
    match method {
        Method::NelderMead => nelder_mead(&eval, start, bounds),
        Method::CoordinateDescent => coordinate_descent(&eval, start, bounds),
    }
}

const NM_MAX_ITER: usize = 500;
const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

fn nelder_mead<F>(eval: &F, start: [f64; 2], bounds: Bounds) -> Minimum
where
    F: Fn([f64; 2]) -> f64,
{
    let x0 = bounds.clamp(start);
    let mut simplex: Vec<([f64; 2], f64)> = vec![(x0, eval(x0))];
    for axis in 0..2 {
        let step = 0.1 * (bounds.upper[axis] - bounds.lower[axis]);
        let mut x = x0;
        // Step away from the nearer bound so the simplex is never flat.
        x[axis] = if x0[axis] + step <= bounds.upper[axis] {
            x0[axis] + step
        } else {
            x0[axis] - step
        };
        simplex.push((x, eval(x)));
    }

    let mut iterations = 0;
    let mut converged = false;

    loop {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let x_spread = simplex[1..]
            .iter()
            .map(|(x, _)| {
                (x[0] - simplex[0].0[0])
                    .abs()
                    .max((x[1] - simplex[0].0[1]).abs())
            })
            .fold(0.0_f64, f64::max);
        let f_spread = simplex[2].1 - simplex[0].1;
        if x_spread < XATOL && f_spread < FATOL {
            converged = true;
            break;
        }
        if iterations >= NM_MAX_ITER {
            break;
        }
        iterations += 1;

        let (best, second, worst) = (simplex[0], simplex[1], simplex[2]);
        let centroid = [
            (best.0[0] + second.0[0]) / 2.0,
            (best.0[1] + second.0[1]) / 2.0,
        ];
        let towards = |coefficient: f64| {
            bounds.clamp([
                centroid[0] + coefficient * (centroid[0] - worst.0[0]),
                centroid[1] + coefficient * (centroid[1] - worst.0[1]),
            ])
        };

        let reflected = towards(REFLECTION);
        let f_reflected = eval(reflected);

        if f_reflected < best.1 {
            let expanded = towards(EXPANSION);
            let f_expanded = eval(expanded);
            simplex[2] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
        } else if f_reflected < second.1 {
            simplex[2] = (reflected, f_reflected);
        } else {
            // Contract outside when the reflection improved on the worst
            // point, inside otherwise.
            let contracted = if f_reflected < worst.1 {
                towards(CONTRACTION)
            } else {
                towards(-CONTRACTION)
            };
            let f_contracted = eval(contracted);
            if f_contracted < worst.1.min(f_reflected) {
                simplex[2] = (contracted, f_contracted);
            } else {
                for i in 1..3 {
                    let x = bounds.clamp([
                        best.0[0] + SHRINK * (simplex[i].0[0] - best.0[0]),
                        best.0[1] + SHRINK * (simplex[i].0[1] - best.0[1]),
                    ]);
                    simplex[i] = (x, eval(x));
                }
            }
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    Minimum {
        x: simplex[0].0,
        fx: simplex[0].1,
        iterations,
        converged,
    }
}

const CD_MAX_SWEEPS: usize = 100;

fn coordinate_descent<F>(eval: &F, start: [f64; 2], bounds: Bounds) -> Minimum
where
    F: Fn([f64; 2]) -> f64,
{
    let mut x = bounds.clamp(start);
    let mut sweeps = 0;
    let mut converged = false;

    while sweeps < CD_MAX_SWEEPS {
        sweeps += 1;
        let previous = x;
        for axis in 0..2 {
            let line = |t: f64| {
                let mut point = x;
                point[axis] = t;
                eval(point)
            };
            x[axis] = golden_section(&line, bounds.lower[axis], bounds.upper[axis]);
        }
        let moved = (x[0] - previous[0]).abs().max((x[1] - previous[1]).abs());
        if moved < XATOL {
            converged = true;
            break;
        }
    }

    Minimum {
        x,
        fx: eval(x),
        iterations: sweeps,
        converged,
    }
}

/// Golden-section search for a minimum of `f` on `[a, b]`.
fn golden_section<F>(f: &F, mut a: f64, mut b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);

    while (b - a).abs() > XATOL {
        if fc.total_cmp(&fd).is_lt() {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = f(d);
        }
    }
    (a + b) / 2.0
}
