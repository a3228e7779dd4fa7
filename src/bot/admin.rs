//! Administrator review surface: access control, callback payloads and search.

use thiserror::Error;

use crate::database::connection::DatabaseManager;
use crate::database::models::Application;

pub fn is_admin(user_id: i64, admin_id: i64) -> bool {
    user_id == admin_id
}

/// An inline-button press from the admin panel or an application listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    ShowNew,
    ShowAll,
    ShowStats,
    ShowReminders,
    Process(i64),
    View(i64),
    Delete(i64),
}

impl AdminAction {
    /// Parses callback data such as `admin:new` or `app:process:12`.
    pub fn parse(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split(':').collect();

        match parts.as_slice() {
            ["admin", "new"] => Some(AdminAction::ShowNew),
            ["admin", "all"] => Some(AdminAction::ShowAll),
            ["admin", "stats"] => Some(AdminAction::ShowStats),
            ["admin", "reminders"] => Some(AdminAction::ShowReminders),
            ["app", verb, id] => {
                let id = id.parse::<i64>().ok()?;
                match *verb {
                    "process" => Some(AdminAction::Process(id)),
                    "view" => Some(AdminAction::View(id)),
                    "delete" => Some(AdminAction::Delete(id)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn callback_data(&self) -> String {
        match self {
            AdminAction::ShowNew => "admin:new".to_string(),
            AdminAction::ShowAll => "admin:all".to_string(),
            AdminAction::ShowStats => "admin:stats".to_string(),
            AdminAction::ShowReminders => "admin:reminders".to_string(),
            AdminAction::Process(id) => format!("app:process:{id}"),
            AdminAction::View(id) => format!("app:view:{id}"),
            AdminAction::Delete(id) => format!("app:delete:{id}"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdminAction::ShowNew => "show_new",
            AdminAction::ShowAll => "show_all",
            AdminAction::ShowStats => "show_stats",
            AdminAction::ShowReminders => "show_reminders",
            AdminAction::Process(_) => "process",
            AdminAction::View(_) => "view",
            AdminAction::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Id(i64),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Usage: /search id <number> or /search name <text>")]
    Usage,
    #[error("Application id must be a number")]
    InvalidId,
}

/// Parses the arguments of `/search`.
pub fn parse_search(args: &str) -> Result<SearchQuery, SearchError> {
    let args = args.trim();
    let (kind, value) = args.split_once(char::is_whitespace).ok_or(SearchError::Usage)?;
    let value = value.trim();

    if value.is_empty() {
        return Err(SearchError::Usage);
    }

    match kind.to_lowercase().as_str() {
        "id" => value
            .trim_start_matches('#')
            .parse::<i64>()
            .map(SearchQuery::Id)
            .map_err(|_| SearchError::InvalidId),
        "name" => Ok(SearchQuery::Name(value.to_string())),
        _ => Err(SearchError::Usage),
    }
}

pub async fn search(
    db: &DatabaseManager,
    query: &SearchQuery,
) -> Result<Vec<Application>, sqlx::Error> {
    match query {
        SearchQuery::Id(id) => Ok(Application::find_by_id(&db.pool, *id).await?.into_iter().collect()),
        SearchQuery::Name(name) => Application::search_by_name(&db.pool, name).await,
    }
}
