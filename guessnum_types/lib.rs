pub mod actor;
pub mod errors;
pub mod player;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use errors::Result;
