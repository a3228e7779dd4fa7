use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Class intake bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Cancel the current request")]
    Cancel,
    #[command(description = "Show application statistics")]
    Stats,
    #[command(description = "Open the admin panel")]
    Admin,
    #[command(description = "List new applications")]
    Applications,
    #[command(description = "List new applications")]
    ViewNew,
    #[command(description = "List all applications")]
    ViewAll,
    #[command(description = "Find applications: /search id <n> or /search name <text>")]
    Search { query: String },
    #[command(description = "Show statistics by application type")]
    StatsFull,
    #[command(description = "Send due reminders now")]
    CheckReminders,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Start => "start",
            Command::Cancel => "cancel",
            Command::Stats => "stats",
            Command::Admin => "admin",
            Command::Applications => "applications",
            Command::ViewNew => "view_new",
            Command::ViewAll => "view_all",
            Command::Search { .. } => "search",
            Command::StatsFull => "stats_full",
            Command::CheckReminders => "check_reminders",
        }
    }

    /// Commands only the configured administrator may run.
    pub fn is_admin_only(&self) -> bool {
        matches!(
            self,
            Command::Admin
                | Command::Applications
                | Command::ViewNew
                | Command::ViewAll
                | Command::Search { .. }
                | Command::StatsFull
                | Command::CheckReminders
        )
    }
}
