pub mod analysis;
pub mod fix;
pub mod record;
pub mod stats;

pub use analysis::*;
pub use fix::*;
pub use record::*;
pub use stats::*;
