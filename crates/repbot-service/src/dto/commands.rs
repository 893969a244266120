//! Slash command schema
//!
//! The single source of truth for command names and options. The gateway
//! adapter registers exactly these, both globally and per guild.

/// Upper bound for the `count` option of `/top`
pub const MAX_TOP_COUNT: i64 = 100;

/// Every command the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Top,
    Configure,
    AddAllowedUser,
    Hello,
    Help,
    ScoreFromDateRange,
    ExportAllScores,
}

impl CommandName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Configure => "configure",
            Self::AddAllowedUser => "add_allowed_user",
            Self::Hello => "hello",
            Self::Help => "help",
            Self::ScoreFromDateRange => "score_from_date_range",
            Self::ExportAllScores => "export_all_scores",
        }
    }

    /// Look a command up by its registered name
    pub fn parse(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|spec| spec.name.as_str() == name)
            .map(|spec| spec.name)
    }

    /// Commands that change the server's rule and need the guild owner
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Configure | Self::AddAllowedUser)
    }
}

/// Type of a command option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Integer,
    String,
}

/// One option of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
    /// Inclusive bounds, integer options only
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl OptionSpec {
    const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: OptionKind::String,
            required: true,
            min: None,
            max: None,
        }
    }

    const fn integer(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: OptionKind::Integer,
            required: true,
            min: None,
            max: None,
        }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    const fn between(mut self, min: i64, max: Option<i64>) -> Self {
        self.min = Some(min);
        self.max = max;
        self
    }
}

/// One slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: CommandName,
    pub description: &'static str,
    pub options: &'static [OptionSpec],
}

/// All registered commands
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: CommandName::Top,
        description: "Show the highest scores in this server",
        options: &[OptionSpec::integer("count", "How many users to show").between(1, Some(MAX_TOP_COUNT))],
    },
    CommandSpec {
        name: CommandName::Configure,
        description: "Set who may award points and what each emoji is worth",
        options: &[
            OptionSpec::string("allowed_users", "Comma-separated usernames or user ids"),
            OptionSpec::string("emoji_scores", "Comma-separated emoji=score pairs, e.g. 👍=1,👎=-1"),
        ],
    },
    CommandSpec {
        name: CommandName::AddAllowedUser,
        description: "Allow more users to award points",
        options: &[OptionSpec::string("allowed_users", "Username, user id, or a comma-separated list")],
    },
    CommandSpec {
        name: CommandName::Hello,
        description: "Say hello",
        options: &[],
    },
    CommandSpec {
        name: CommandName::Help,
        description: "Show help",
        options: &[],
    },
    CommandSpec {
        name: CommandName::ScoreFromDateRange,
        description: "Show points earned between two dates",
        options: &[
            OptionSpec::string("start_date", "First day, YYYY-MM-DD"),
            OptionSpec::string("end_date", "Last day, YYYY-MM-DD"),
            OptionSpec::integer("count", "How many users to show").between(1, None).optional(),
        ],
    },
    CommandSpec {
        name: CommandName::ExportAllScores,
        description: "Export every score in this server as CSV",
        options: &[],
    },
];
