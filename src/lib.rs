//! # Class Intake Bot
//!
//! A Telegram bot that collects class enrollment requests, course questions
//! and other inquiries, stores them in SQLite and reminds applicants the day
//! before their appointment.
//!
//! ## Features
//! - Guided intake conversation with per-step validation
//! - Administrator notifications and review commands
//! - Day-before reminders with retry on database failure
//! - Health endpoints for container probes

/// Conversation flow, keyboards, commands and update handlers
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Background services: reminders, notifications and health checks
pub mod services;
/// Date helpers, validation, logging and reply formatting
pub mod utils;
