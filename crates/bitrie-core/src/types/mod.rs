pub mod hash;
pub mod node;
pub mod proof;

pub use hash::*;
pub use node::*;
pub use proof::*;
