pub mod record;
pub mod stats;
pub mod view;

pub use record::*;
pub use stats::*;
pub use view::*;
