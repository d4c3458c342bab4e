pub mod helpers;
pub mod ports;
pub mod stream;

pub use ports::*;
pub use stream::*;
