//! Command dispatcher
//!
//! Routes slash command invocations to their handlers and builds the reply.
//! `Ok(None)` means the command is answered with silence.

use tracing::{info, instrument, warn};

use repbot_common::DenialPolicy;
use repbot_core::entities::{AddAllowedUserOutcome, ServerRule};
use repbot_core::events::CommandInvocation;
use repbot_core::value_objects::Snowflake;

use crate::dto::{
    parse_allowed_users, parse_date_range, parse_emoji_scores, CommandName, CommandReply,
    MAX_TOP_COUNT,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::leaderboard::{
    fold_range_totals, format_ranked, format_scores, scores_csv, NO_SCORES_IN_RANGE_MESSAGE,
    NO_SCORES_MESSAGE,
};
use super::resolver::{Authorization, RuleResolver};

pub const HELLO_MESSAGE: &str = "Hello by bot 👀! only to youuuuu";
pub const HELP_MESSAGE: &str = "Help by bot 👀! only to youuuuu";
pub const CONFIGURED_MESSAGE: &str = "Bot settings have been configured for your server.";
pub const NOT_ALLOWED_MESSAGE: &str = "You are not allowed to use this command.";
pub const GUILD_ONLY_MESSAGE: &str = "This command can only be used in a server.";
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command.";

/// Filename of the `/export_all_scores` attachment
pub const EXPORT_FILENAME: &str = "scores.csv";

type Gate = Result<ServerRule, Option<CommandReply>>;

fn fixed_reply(name: CommandName) -> Option<&'static str> {
    match name {
        CommandName::Hello => Some(HELLO_MESSAGE),
        CommandName::Help => Some(HELP_MESSAGE),
        _ => None,
    }
}

/// Command dispatcher
pub struct CommandDispatcher<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandDispatcher<'a> {
    /// Create a new CommandDispatcher
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle one command invocation
    #[instrument(skip(self, invocation), fields(command = %invocation.name, user = %invocation.actor.tag()))]
    pub async fn dispatch(&self, invocation: &CommandInvocation) -> ServiceResult<Option<CommandReply>> {
        let Some(name) = CommandName::parse(&invocation.name) else {
            warn!("Unknown command");
            return Ok(Some(CommandReply::text(UNKNOWN_COMMAND_MESSAGE)));
        };

        // Static replies work anywhere, including direct messages
        if let Some(text) = fixed_reply(name) {
            return Ok(Some(CommandReply::text(text)));
        }

        let Some(server_id) = invocation.server_id else {
            return Ok(Some(CommandReply::text(GUILD_ONLY_MESSAGE)));
        };

        match name {
            CommandName::Top => self.top(server_id, invocation).await,
            CommandName::Configure => self.configure(server_id, invocation).await,
            CommandName::AddAllowedUser => self.add_allowed_user(server_id, invocation).await,
            CommandName::ScoreFromDateRange => self.score_from_date_range(server_id, invocation).await,
            CommandName::ExportAllScores => self.export_all_scores(server_id, invocation).await,
            CommandName::Hello | CommandName::Help => Ok(fixed_reply(name).map(CommandReply::text)),
        }
    }

    // =========================================================================
    // Authorization helpers
    // =========================================================================

    fn denial(&self) -> Option<CommandReply> {
        match self.ctx.policy().denial {
            DenialPolicy::Silent => None,
            DenialPolicy::Reply => Some(CommandReply::text(NOT_ALLOWED_MESSAGE)),
        }
    }

    /// Standard check for commands that need an allowed user
    async fn gate(&self, server_id: Snowflake, invocation: &CommandInvocation) -> ServiceResult<Gate> {
        let authorization = RuleResolver::new(self.ctx)
            .authorize(server_id, &invocation.actor)
            .await?;

        Ok(match authorization {
            Authorization::Granted(rule) => Ok(rule),
            Authorization::RulesNotConfigured => Err(Some(CommandReply::text(
                AddAllowedUserOutcome::NotConfigured.message(),
            ))),
            Authorization::Denied => {
                info!("Command denied");
                Err(self.denial())
            }
        })
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    async fn top(&self, server_id: Snowflake, invocation: &CommandInvocation) -> ServiceResult<Option<CommandReply>> {
        if let Err(reply) = self.gate(server_id, invocation).await? {
            return Ok(reply);
        }

        let count = invocation
            .integer("count")
            .filter(|count| (1..=MAX_TOP_COUNT).contains(count))
            .ok_or_else(|| ServiceError::validation("count must be between 1 and 100"))?;

        let scores = self.ctx.score_repo().top(server_id, count).await?;
        if scores.is_empty() {
            return Ok(Some(CommandReply::text(NO_SCORES_MESSAGE)));
        }
        Ok(Some(CommandReply::text(format_scores(&scores))))
    }

    async fn configure(
        &self,
        server_id: Snowflake,
        invocation: &CommandInvocation,
    ) -> ServiceResult<Option<CommandReply>> {
        // The owner can always configure, which is how a server gets its first rule
        if !invocation.is_server_owner() {
            if self.ctx.policy().owner_only_admin {
                info!("Configure denied: not the server owner");
                return Ok(self.denial());
            }
            let authorization = RuleResolver::new(self.ctx)
                .authorize(server_id, &invocation.actor)
                .await?;
            if !authorization.is_granted() {
                info!("Configure denied");
                return Ok(self.denial());
            }
        }

        let allowed_users = parse_allowed_users(invocation.string("allowed_users").unwrap_or_default())?;
        let emoji_scores = parse_emoji_scores(invocation.string("emoji_scores").unwrap_or_default())?;

        self.ctx
            .rule_repo()
            .upsert(server_id, &allowed_users, &emoji_scores)
            .await?;

        info!(
            server_id = %server_id,
            users = allowed_users.len(),
            emojis = emoji_scores.len(),
            "Server rules configured"
        );
        Ok(Some(CommandReply::text(CONFIGURED_MESSAGE)))
    }

    async fn add_allowed_user(
        &self,
        server_id: Snowflake,
        invocation: &CommandInvocation,
    ) -> ServiceResult<Option<CommandReply>> {
        if self.ctx.policy().owner_only_admin {
            if !invocation.is_server_owner() {
                info!("add_allowed_user denied: not the server owner");
                return Ok(self.denial());
            }
        } else if let Err(reply) = self.gate(server_id, invocation).await? {
            return Ok(reply);
        }

        let users = parse_allowed_users(invocation.string("allowed_users").unwrap_or_default())?;

        let mut outcome = AddAllowedUserOutcome::Added;
        for user in &users {
            outcome = self.ctx.rule_repo().add_allowed_user(server_id, user).await?;
            if !outcome.is_added() {
                break;
            }
        }

        if outcome.is_added() {
            info!(server_id = %server_id, users = ?users, "Allowed users added");
        }
        Ok(Some(CommandReply::text(outcome.message())))
    }

    async fn score_from_date_range(
        &self,
        server_id: Snowflake,
        invocation: &CommandInvocation,
    ) -> ServiceResult<Option<CommandReply>> {
        if let Err(reply) = self.gate(server_id, invocation).await? {
            return Ok(reply);
        }

        let (start, end) = parse_date_range(
            invocation.string("start_date").unwrap_or_default(),
            invocation.string("end_date").unwrap_or_default(),
        )?;

        let count = match invocation.integer("count") {
            Some(count) if count < 1 => return Err(ServiceError::validation("count must be at least 1")),
            Some(count) => Some(usize::try_from(count).unwrap_or(usize::MAX)),
            None => None,
        };

        let logs = self
            .ctx
            .score_repo()
            .logs_in_range(server_id, start, end)
            .await?;

        let mut totals = fold_range_totals(&logs);
        if let Some(count) = count {
            totals.truncate(count);
        }
        if totals.is_empty() {
            return Ok(Some(CommandReply::text(NO_SCORES_IN_RANGE_MESSAGE)));
        }

        Ok(Some(CommandReply::text(format_ranked(
            totals.iter().map(|(username, total)| (username.as_str(), *total)),
        ))))
    }

    async fn export_all_scores(
        &self,
        server_id: Snowflake,
        invocation: &CommandInvocation,
    ) -> ServiceResult<Option<CommandReply>> {
        if let Err(reply) = self.gate(server_id, invocation).await? {
            return Ok(reply);
        }

        let scores = self.ctx.score_repo().all(server_id).await?;
        if scores.is_empty() {
            return Ok(Some(CommandReply::text(NO_SCORES_MESSAGE)));
        }

        let summary = match scores.len() {
            1 => "Exported 1 score.".to_string(),
            n => format!("Exported {n} scores."),
        };
        info!(server_id = %server_id, rows = scores.len(), "Scores exported");

        Ok(Some(
            CommandReply::text(summary).with_attachment(EXPORT_FILENAME, scores_csv(&scores).into_bytes()),
        ))
    }
}
