//! Gateway event handler
//!
//! The error boundary for every event: failures are logged and swallowed so a
//! single bad event never takes the connection down.

use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, Context, CreateAttachment, EditInteractionResponse, EventHandler,
    Interaction, Reaction, Ready,
};
use tracing::{error, info, warn};

use repbot_common::CommandScope;
use repbot_core::events::ReactionKind;
use repbot_service::{
    CommandDispatcher, CommandName, CommandReply, ScoringEngine, ServiceContext, ServiceError,
};

use crate::commands::register_commands;
use crate::convert::{command_invocation, guild_owner, reaction_event};
use crate::error::BotResult;

/// serenity event handler backed by the service layer
pub struct Handler {
    services: ServiceContext,
    command_scope: CommandScope,
}

impl Handler {
    /// Create a new Handler
    pub fn new(services: ServiceContext, command_scope: CommandScope) -> Self {
        Self {
            services,
            command_scope,
        }
    }

    async fn on_reaction(&self, ctx: &Context, reaction: &Reaction, kind: ReactionKind) -> BotResult<()> {
        let Some(event) = reaction_event(ctx, reaction, kind).await? else {
            return Ok(());
        };
        ScoringEngine::new(&self.services).score_reaction(&event).await?;
        Ok(())
    }

    async fn on_command(&self, ctx: &Context, command: &CommandInteraction) -> BotResult<()> {
        // Acknowledge first; the owner lookup and storage may outlast the response deadline
        command.defer_ephemeral(&ctx.http).await?;

        let needs_owner = CommandName::parse(&command.data.name).is_some_and(CommandName::is_admin);
        let owner_id = match command.guild_id {
            Some(guild_id) if needs_owner => match guild_owner(ctx, guild_id).await {
                Ok(owner_id) => Some(owner_id),
                Err(e) => {
                    warn!(guild_id = %guild_id, error = %e, "Could not resolve guild owner");
                    None
                }
            },
            _ => None,
        };

        let invocation = command_invocation(command, owner_id);
        let reply = match CommandDispatcher::new(&self.services).dispatch(&invocation).await {
            Ok(reply) => reply,
            Err(e) => {
                if matches!(e, ServiceError::Validation(_)) {
                    info!(command = %invocation.name, error = %e, "Command rejected");
                } else {
                    error!(command = %invocation.name, error = %e, code = e.error_code(), "Command failed");
                }
                Some(CommandReply::text(e.user_message()))
            }
        };

        match reply {
            Some(reply) => respond(ctx, command, reply).await,
            None => {
                command.delete_response(&ctx.http).await?;
                Ok(())
            }
        }
    }
}

async fn respond(ctx: &Context, command: &CommandInteraction, reply: CommandReply) -> BotResult<()> {
    let mut edit = EditInteractionResponse::new().content(reply.content);
    if let Some(attachment) = reply.attachment {
        edit = edit.new_attachment(CreateAttachment::bytes(attachment.data, attachment.filename));
    }

    command.edit_response(&ctx.http, edit).await?;
    Ok(())
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");

        if let Err(e) = register_commands(&ctx, &self.command_scope).await {
            error!(error = %e, code = e.error_code(), "Failed to register commands");
        }
    }

    async fn reaction_add(&self, ctx: Context, add_reaction: Reaction) {
        if let Err(e) = self.on_reaction(&ctx, &add_reaction, ReactionKind::Added).await {
            error!(
                message_id = %add_reaction.message_id,
                error = %e,
                code = e.error_code(),
                "Failed to score reaction"
            );
        }
    }

    async fn reaction_remove(&self, ctx: Context, removed_reaction: Reaction) {
        if let Err(e) = self.on_reaction(&ctx, &removed_reaction, ReactionKind::Removed).await {
            error!(
                message_id = %removed_reaction.message_id,
                error = %e,
                code = e.error_code(),
                "Failed to reverse reaction score"
            );
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        if let Err(e) = self.on_command(&ctx, &command).await {
            error!(
                command = %command.data.name,
                error = %e,
                code = e.error_code(),
                "Failed to answer command"
            );
        }
    }
}
