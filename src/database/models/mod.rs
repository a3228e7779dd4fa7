pub mod application;
pub mod reminder;

pub use application::*;
pub use reminder::*;
