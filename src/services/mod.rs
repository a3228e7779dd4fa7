pub mod health;
pub mod notifier;
pub mod reminder;
