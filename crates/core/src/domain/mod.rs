pub mod digest;
pub mod thread;
