//! Conversion of serenity gateway objects into typed records
//!
//! Everything past this module works with `repbot-core` types only.

use serenity::all::{
    CommandDataOptionValue, CommandInteraction, Context, GuildId, Reaction, ReactionType, User,
};
use tracing::debug;

use repbot_core::events::{Actor, CommandInvocation, CommandOptionValue, ReactionEvent, ReactionKind};
use repbot_core::value_objects::{EmojiKey, Snowflake};

use crate::error::{BotError, BotResult};

/// Convert a serenity user into an actor
pub fn actor_from_user(user: &User) -> Actor {
    Actor::new(Snowflake::from_u64(user.id.get()), user.name.clone())
        .with_discriminator(user.discriminator.map(|d| d.get()))
        .with_bot(user.bot)
}

/// Convert a reaction emoji; `None` for emoji kinds that cannot be scored
pub fn emoji_key(reaction: &ReactionType) -> Option<EmojiKey> {
    match reaction {
        ReactionType::Unicode(symbol) => Some(EmojiKey::unicode(symbol.clone())),
        ReactionType::Custom { animated, id, name } => Some(EmojiKey::Custom {
            id: Snowflake::from_u64(id.get()),
            name: name.clone(),
            animated: *animated,
        }),
        _ => None,
    }
}

/// Convert a command option value; `None` for kinds no command declares
pub fn option_value(value: &CommandDataOptionValue) -> Option<CommandOptionValue> {
    match value {
        CommandDataOptionValue::Integer(v) => Some(CommandOptionValue::Integer(*v)),
        CommandDataOptionValue::Boolean(v) => Some(CommandOptionValue::Boolean(*v)),
        CommandDataOptionValue::String(v) => Some(CommandOptionValue::String(v.clone())),
        _ => None,
    }
}

/// Convert a slash command interaction
pub fn command_invocation(command: &CommandInteraction, owner_id: Option<Snowflake>) -> CommandInvocation {
    let server_id = command.guild_id.map(|id| Snowflake::from_u64(id.get()));
    let mut invocation = CommandInvocation::new(&command.data.name, server_id, actor_from_user(&command.user))
        .with_owner(owner_id);

    for option in &command.data.options {
        if let Some(value) = option_value(&option.value) {
            invocation = invocation.with_option(&option.name, value);
        }
    }

    invocation
}

/// Owner of a guild, from the cache when possible
pub async fn guild_owner(ctx: &Context, guild_id: GuildId) -> BotResult<Snowflake> {
    let cached = ctx.cache.guild(guild_id).map(|guild| guild.owner_id);
    let owner_id = match cached {
        Some(owner_id) => owner_id,
        None => guild_id.to_partial_guild(&ctx.http).await?.owner_id,
    };
    Ok(Snowflake::from_u64(owner_id.get()))
}

/// Build a reaction event, fetching the reactor and the message author.
///
/// Returns `None` for reactions outside guilds, reactions by bots, and emoji
/// that cannot carry a score.
pub async fn reaction_event(
    ctx: &Context,
    reaction: &Reaction,
    kind: ReactionKind,
) -> BotResult<Option<ReactionEvent>> {
    let Some(guild_id) = reaction.guild_id else {
        debug!("Reaction outside a guild ignored");
        return Ok(None);
    };
    let Some(emoji) = emoji_key(&reaction.emoji) else {
        debug!("Unsupported emoji kind ignored");
        return Ok(None);
    };

    if reaction.user_id.is_none() {
        return Err(BotError::MissingField("user_id"));
    }
    // Served from the cache when the user is known, otherwise fetched
    let reactor = reaction.user(ctx).await?;
    if reactor.bot {
        debug!(reactor = %reactor.name, "Reaction by a bot ignored");
        return Ok(None);
    }

    let message = reaction.message(ctx).await?;

    Ok(Some(ReactionEvent {
        server_id: Snowflake::from_u64(guild_id.get()),
        channel_id: Snowflake::from_u64(reaction.channel_id.get()),
        message_id: Snowflake::from_u64(reaction.message_id.get()),
        actor: actor_from_user(&reactor),
        target: actor_from_user(&message.author),
        emoji,
        kind,
    }))
}
