//! Infrastructure layer for filesystem, timing and randomness.
//!
//! - [`paths`]: Data directory resolution and tilde expansion
//! - [`pacing`]: The floor-duration join used by every loading phase
//! - [`random`]: Injectable uniform index source

pub mod pacing;
pub mod paths;
pub mod random;

pub use pacing::{at_least, Pacing};
pub use paths::{expand_tilde, get_data_dir};
pub use random::{RandomSource, SystemRandom};
