//! Heston path simulation.
//!
//! This module implements the two-factor discretisation
//!
//! ```text
//! S[t] = S[t-1] · (1 + μ·dt + √(V⁺[t-1]·dt) · w₀[t-1])                      (Euler)
//! V[t] = V[t-1] + κ(θ - V[t-1])·dt + σ·√(V⁺[t-1]·dt) · w₁[t-1]
//!        + (σ²/4)·dt·(w₁[t-1]² - 1)                                          (Milstein)
//! w₁   = ρ·w₀ + √(1 - ρ²)·z
//! ```
//!
//! on a business-day grid with `dt = 1/253`. `V⁺` is the variance seen by the
//! square root, chosen by [`NegativeVariance`].
//!
//! # Memory Layout
//!
//! A [`SimulatedPath`] holds one column per quantity, `spot[i]` and
//! `variance[i]` at grid index `i`, with index 0 carrying the initial state.

mod path;
mod simulator;
mod variance;

pub use path::{PathPoint, SimulatedPath};
pub use simulator::{correlate_shocks, CorrelatedShocks, PathSimulator};
pub use variance::NegativeVariance;
