pub mod google;
pub mod reddit;
