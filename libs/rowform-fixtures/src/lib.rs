//! Record types used to exercise schema derivation and row conversion,
//! together with their construction helpers and sample instances.

pub mod builders;
pub mod fixture;
pub mod samples;
pub mod types;

pub use fixture::{Fixture, SampleReport, UnknownFixture};
pub use types::*;
