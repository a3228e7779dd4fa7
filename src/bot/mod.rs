pub mod admin;
pub mod commands;
pub mod formatting;
pub mod handlers;
pub mod intake;
pub mod keyboards;
