pub mod animate;
pub mod layout;
pub mod result;
pub mod stats;
