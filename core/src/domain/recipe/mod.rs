pub mod entities;
pub mod helpers;
pub mod ports;

pub use entities::*;
pub use ports::*;
