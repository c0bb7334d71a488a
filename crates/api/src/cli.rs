//! Command-line interface definition

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use convene_domain::{ConveneError, Result, Role, TimeInterval, UserId};

/// convene - meeting scheduler client
#[derive(Parser, Debug)]
#[command(name = "convene")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Account ===
    /// Sign in with email and password
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Sign out and forget stored credentials
    Logout,

    /// Show the signed-in user
    Whoami,

    // === Scheduling ===
    /// Meeting commands
    #[command(subcommand)]
    Meetings(MeetingsCommand),

    /// User directory commands
    #[command(subcommand)]
    Users(UsersCommand),
}

impl Commands {
    /// Stable identifier used in command logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "auth::login",
            Self::Register(_) => "auth::register",
            Self::Logout => "auth::logout",
            Self::Whoami => "auth::whoami",
            Self::Meetings(command) => command.name(),
            Self::Users(UsersCommand::List { .. }) => "users::list",
        }
    }
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "CONVENE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Account role selectable at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Organizer,
    Participant,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Organizer => Self::Organizer,
            RoleArg::Participant => Self::Participant,
        }
    }
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, env = "CONVENE_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long, value_enum, default_value = "participant")]
    pub role: RoleArg,
}

#[derive(Subcommand, Debug)]
pub enum MeetingsCommand {
    /// List visible meetings, earliest first
    #[command(alias = "ls")]
    List,

    /// Show one meeting
    Show { id: String },

    /// Schedule a new meeting
    Create(CreateArgs),

    /// Change a scheduled meeting
    Update(UpdateArgs),

    /// Cancel a scheduled meeting
    Cancel { id: String },

    /// Delete a meeting permanently
    Delete { id: String },

    /// Check a slot for conflicts without writing anything
    Check(CheckArgs),

    /// Assign a participant to a meeting
    AddParticipant { id: String, user_id: UserId },

    /// Unassign a participant from a meeting
    RemoveParticipant { id: String, user_id: UserId },
}

impl MeetingsCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "meetings::list",
            Self::Show { .. } => "meetings::show",
            Self::Create(_) => "meetings::create",
            Self::Update(_) => "meetings::update",
            Self::Cancel { .. } => "meetings::cancel",
            Self::Delete { .. } => "meetings::delete",
            Self::Check(_) => "meetings::check",
            Self::AddParticipant { .. } => "meetings::add_participant",
            Self::RemoveParticipant { .. } => "meetings::remove_participant",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List registered users
    List {
        /// Only users with the participant role
        #[arg(long)]
        participants: bool,
    },
}

/// Time slot given as a start plus either an end or a length.
#[derive(Args, Debug, Clone)]
pub struct SlotArgs {
    /// Start time (RFC 3339, e.g. 2025-03-14T10:00:00Z)
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// End time (RFC 3339)
    #[arg(long, conflicts_with = "minutes")]
    pub end: Option<DateTime<Utc>>,

    /// Length in minutes, instead of --end
    #[arg(long)]
    pub minutes: Option<i64>,
}

impl SlotArgs {
    /// Resolve to an interval; `None` when no slot option was given.
    ///
    /// # Errors
    /// Returns `ConveneError::Validation` for an incomplete or empty slot.
    pub fn interval(&self) -> Result<Option<TimeInterval>> {
        match (self.start, self.end, self.minutes) {
            (None, None, None) => Ok(None),
            (Some(start), Some(end), None) => TimeInterval::new(start, end).map(Some),
            (Some(start), None, Some(minutes)) => {
                let length = Duration::try_minutes(minutes).ok_or_else(|| {
                    ConveneError::Validation(format!("meeting length out of range: {minutes}"))
                })?;
                TimeInterval::starting_at(start, length).map(Some)
            }
            _ => Err(ConveneError::Validation(
                "a time slot needs --start together with --end or --minutes".to_string(),
            )),
        }
    }

    /// Like [`interval`](Self::interval) but the slot is mandatory.
    ///
    /// # Errors
    /// Returns `ConveneError::Validation` when no slot was given.
    pub fn required_interval(&self) -> Result<TimeInterval> {
        self.interval()?.ok_or_else(|| {
            ConveneError::Validation("--start with --end or --minutes is required".to_string())
        })
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Participant user id (repeatable)
    #[arg(short, long = "participant", required = true)]
    pub participants: Vec<UserId>,

    #[command(flatten)]
    pub slot: SlotArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Replace the participant list (repeatable)
    #[arg(short, long = "participant")]
    pub participants: Vec<UserId>,

    #[command(flatten)]
    pub slot: SlotArgs,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Check an existing meeting moved to the slot; it never conflicts
    /// with itself
    #[arg(long)]
    pub meeting: Option<String>,

    /// Participant user id (repeatable); defaults to the meeting's own
    /// participants with --meeting
    #[arg(short, long = "participant")]
    pub participants: Vec<UserId>,

    #[command(flatten)]
    pub slot: SlotArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_create_with_repeated_participants() {
        let cli = Cli::parse_from([
            "convene",
            "meetings",
            "create",
            "--title",
            "Planning",
            "-p",
            "alice",
            "--participant",
            "bob",
            "--start",
            "2025-03-14T10:00:00Z",
            "--minutes",
            "30",
            "--json",
        ]);

        assert!(cli.json);
        let Commands::Meetings(MeetingsCommand::Create(args)) = cli.command else {
            panic!("expected meetings create");
        };
        assert_eq!(args.participants, ["alice", "bob"]);
        let interval = args.slot.required_interval().unwrap();
        assert_eq!(interval.duration(), Duration::minutes(30));
    }

    #[test]
    fn slot_requires_start_with_end_or_length() {
        let only_end = SlotArgs {
            start: None,
            end: Some("2025-03-14T10:00:00Z".parse().unwrap()),
            minutes: None,
        };
        assert!(matches!(only_end.interval(), Err(ConveneError::Validation(_))));

        let empty = SlotArgs { start: None, end: None, minutes: None };
        assert!(empty.interval().unwrap().is_none());
        assert!(empty.required_interval().is_err());
    }

    #[test]
    fn oversized_minutes_are_rejected() {
        let slot = SlotArgs {
            start: Some("2025-03-14T10:00:00Z".parse().unwrap()),
            end: None,
            minutes: Some(150_000_000_000_000),
        };
        assert!(matches!(slot.interval(), Err(ConveneError::Validation(_))));
    }

    #[test]
    fn end_and_minutes_are_exclusive() {
        let result = Cli::try_parse_from([
            "convene",
            "meetings",
            "check",
            "-p",
            "alice",
            "--start",
            "2025-03-14T10:00:00Z",
            "--end",
            "2025-03-14T11:00:00Z",
            "--minutes",
            "30",
        ]);
        assert!(result.is_err());
    }
}
