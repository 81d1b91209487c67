//! Service implementations
//!
//! Concrete [`DataProvider`](crate::traits::DataProvider) backends. The
//! simulated provider serves a seeded catalogue with configurable latency and
//! failure injection.

pub mod dataset;
pub mod simulated_provider;

#[cfg(test)]
mod tests;

pub use simulated_provider::SimulatedProvider;
