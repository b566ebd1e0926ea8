//! Phase 1 of the Powers of Tau ceremony over a pairing engine.
//!
//! An accumulator holds, for secrets `tau`, `alpha` and `beta`:
//!
//! * (1, τ, τ<sup>2</sup>, ..., τ<sup>2N - 2</sup>)<sub>1</sub>
//! * (1, τ, τ<sup>2</sup>, ..., τ<sup>N - 1</sup>)<sub>2</sub>
//! * (α, ατ, ατ<sup>2</sup>, ..., ατ<sup>N - 1</sup>)<sub>1</sub>
//! * (β, βτ, βτ<sup>2</sup>, ..., βτ<sup>N - 1</sup>)<sub>1</sub>
//! * β<sub>2</sub>
//!
//! with `N = 2^power`, streamed in that order. Accumulators are never held in memory:
//! they are processed a batch of points at a time, and each participant publishes a
//! small [`Contribution`] summarising the accumulator they produced.

mod helpers;

pub mod objects;
pub use objects::*;

mod computation;
pub use computation::contribute;

mod initialization;
pub use initialization::initialize;

pub mod linear_combination;
pub use linear_combination::{linear_combination, LinearCombination};

pub mod scaling;
pub use scaling::{scale_points, PowerSchedule};

mod verification;
pub use verification::{verify_accumulator, verify_contribution, verify_transcript};
