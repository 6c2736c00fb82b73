//! Numerical methods shared by the pricing and simulation layers.
//!
//! - [`quadrature`]: Globally adaptive Gauss-Kronrod integration

pub mod quadrature;
