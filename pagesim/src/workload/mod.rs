/*!
Synthetic instruction access workloads.

The [generator](generator/index.html) turns a [`Config`](crate::config::Config)
and a seed into an [`AccessSequence`] following one of the
[`AccessPattern`](crate::config::AccessPattern) models.
*/

pub mod generator;
pub mod sequence;

#[doc(hidden)]
pub use generator::{generate, WorkloadGenerator};
#[doc(hidden)]
pub use sequence::AccessSequence;
