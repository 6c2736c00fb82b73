//! # Heston Simulation (L3: Engine)
//!
//! Scenario paths of the Heston model on a business-day grid.
//!
//! This crate provides:
//! - [`rng`]: the injectable standard-normal source ([`rng::NormalSource`])
//!   and its seeded implementation ([`rng::SimulationRng`])
//! - [`simulation`]: [`simulation::PathSimulator`], an Euler scheme for the
//!   asset and a Milstein scheme for the variance driven by correlated
//!   shocks, producing a [`simulation::SimulatedPath`]
//!
//! The random source is always passed in explicitly; nothing here touches
//! process-wide generator state, so independent simulations may run on
//! separate threads with their own streams.
//!
//! ## Example
//!
//! ```
//! use heston_core::types::Date;
//! use heston_models::models::HestonParams;
//! use heston_simulation::rng::SimulationRng;
//! use heston_simulation::simulation::PathSimulator;
//!
//! let simulator = PathSimulator::new(HestonParams::default());
//! let mut rng = SimulationRng::from_seed(42);
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 1, 31).unwrap();
//! let path = simulator.simulate(100.0, 0.04, start, end, &mut rng).unwrap();
//!
//! assert_eq!(path.len(), 23);
//! assert_eq!(path.spot()[0], 100.0);
//! assert_eq!(path.variance()[0], 0.04);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod rng;
pub mod simulation;
