pub mod assembler;
pub mod main;
pub mod sentence;

pub use assembler::*;
pub use main::*;
pub use sentence::*;
