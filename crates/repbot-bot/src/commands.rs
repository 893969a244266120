//! Slash command registration

use serenity::all::{Command, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId};
use tracing::info;

use repbot_common::CommandScope;
use repbot_service::{CommandSpec, OptionKind, OptionSpec, COMMANDS};

use crate::error::BotResult;

fn build_option(spec: &OptionSpec) -> CreateCommandOption {
    let kind = match spec.kind {
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::String => CommandOptionType::String,
    };

    let mut option = CreateCommandOption::new(kind, spec.name, spec.description).required(spec.required);
    if let Some(min) = spec.min.and_then(|v| u64::try_from(v).ok()) {
        option = option.min_int_value(min);
    }
    if let Some(max) = spec.max.and_then(|v| u64::try_from(v).ok()) {
        option = option.max_int_value(max);
    }
    option
}

fn build_command(spec: &CommandSpec) -> CreateCommand {
    spec.options.iter().fold(
        CreateCommand::new(spec.name.as_str()).description(spec.description),
        |command, option| command.add_option(build_option(option)),
    )
}

/// Builders for every command in the schema
pub fn build_commands() -> Vec<CreateCommand> {
    COMMANDS.iter().map(build_command).collect()
}

/// Register the commands globally or for each configured guild
pub async fn register_commands(ctx: &Context, scope: &CommandScope) -> BotResult<()> {
    match scope {
        CommandScope::Global => {
            let registered = Command::set_global_commands(&ctx.http, build_commands()).await?;
            info!(count = registered.len(), "Registered global commands");
        }
        CommandScope::Guilds(guild_ids) => {
            for guild_id in guild_ids {
                let guild_id = GuildId::new(guild_id.as_u64());
                let registered = guild_id.set_commands(&ctx.http, build_commands()).await?;
                info!(guild_id = %guild_id, count = registered.len(), "Registered guild commands");
            }
        }
    }
    Ok(())
}
