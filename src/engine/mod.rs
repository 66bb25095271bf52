pub mod channel;
pub mod errors;
pub mod frame;
pub mod volume;
