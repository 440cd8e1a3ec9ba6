pub mod common;
pub mod generation;
pub mod wire;

pub use common::*;
pub use generation::*;
pub use wire::*;
