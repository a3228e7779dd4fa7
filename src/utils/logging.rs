use tracing::{error, info, warn, debug};

/// Logs a command with consistent format
pub fn log_command(command: &str, user: &str, user_id: i64, chat_id: i64) {
    info!("CMD: /{} by {}({}) in chat {}", command, user, user_id, chat_id);
}

/// Logs an intake state transition
pub fn log_intake_step(chat_id: i64, from: &str, to: &str) {
    debug!("INTAKE_STEP: chat {} {} -> {}", chat_id, from, to);
}

/// Logs a stored application
pub fn log_intake_complete(application_id: i64, user_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("INTAKE_COMPLETE: application #{} from user {} - {}", application_id, user_id, d),
        None => info!("INTAKE_COMPLETE: application #{} from user {}", application_id, user_id),
    }
}

/// Logs validation errors with consistent format
pub fn log_validation_error(state: &str, value: &str, error: &str, user_id: i64, chat_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} input '{}' invalid: {} - user {} in chat {}",
        state, value, error, user_id, chat_id
    );
}

/// Logs an administrator action
pub fn log_admin_action(action: &str, admin_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("ADMIN_ACTION: {} by {} - {}", action, admin_id, d),
        None => info!("ADMIN_ACTION: {} by {}", action, admin_id),
    }
}

/// Logs a rejected admin-only request
pub fn log_access_denied(action: &str, user_id: i64) {
    warn!("ACCESS_DENIED: {} attempted by user {}", action, user_id);
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("DB_ERROR: {} on {} failed: {} - {}", operation, table, error, d),
        None => error!("DB_ERROR: {} on {} failed: {}", operation, table, error),
    }
}

/// Logs a failed outbound notification
pub fn log_delivery_error(kind: &str, recipient: i64, error: &str) {
    warn!("DELIVERY_ERROR: {} to {} failed: {}", kind, recipient, error);
}

/// Logs reminder scheduler events
pub fn log_reminder_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("REMINDER: {} - {}", event, d),
        None => info!("REMINDER: {}", event),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
