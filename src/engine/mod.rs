// Transcoding engine - independent of the interactive console

pub mod core;
pub mod params;
pub mod platform;
pub mod worker;

pub use self::core::*;
