//! # Random Number Generation
//!
//! Standard-normal shocks for path simulation.
//!
//! ## Design
//!
//! - **Injection**: the simulator is generic over [`NormalSource`]; it never
//!   reaches for a global generator
//! - **Reproducibility**: [`SimulationRng`] records its seed, and the same
//!   seed always yields the same sequence
//! - **Batching**: shocks are drawn into caller-provided `&mut [f64]` slices
//!
//! ## Module Structure
//!
//! - [`source`]: the [`NormalSource`] trait
//! - [`prng`]: [`SimulationRng`], a seeded `StdRng` with Ziggurat normals
//!
//! ## Usage Example
//!
//! ```rust
//! use heston_simulation::rng::{NormalSource, SimulationRng};
//!
//! let mut rng = SimulationRng::from_seed(12345);
//!
//! let z = rng.next_standard_normal();
//! assert!(z.is_finite());
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_standard_normal(&mut buffer);
//! ```

pub mod prng;
pub mod source;

pub use prng::SimulationRng;
pub use source::NormalSource;
