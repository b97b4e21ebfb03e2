//! Current-file control and list navigation.

pub mod controller;
pub mod driver;
pub mod session;
pub mod transcript;

pub use driver::Direction;
pub use session::{FileIdentity, Navigator};
pub use transcript::Transcript;
