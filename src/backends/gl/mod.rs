pub mod capabilities;
pub mod device;
pub mod types;
