//! 증기 물성 모듈 모음.

pub mod if97;
pub mod provider;

pub use if97::Iapws97;
pub use provider::{PropertyError, SteamPropertyProvider};
