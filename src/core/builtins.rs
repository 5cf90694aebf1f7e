//! Built-in console commands.
//!
//! Registered by [`Console::with_builtins`](super::Console::with_builtins) and
//! by the plugin.

use super::{
    CommandArgs, CommandContext, CommandError, ConCommand, Console, HostRequest, LOG_TARGET,
};

/// Register the built-in commands on `console`.
pub fn register_builtins(console: &mut Console) {
    let builtins = [
        ConCommand::new("help", help)
            .args(["command"])
            .description("Show help, or usage for one command"),
        ConCommand::new("commands_list", commands_list)
            .description("List command names, sorted"),
        ConCommand::new("commands", commands)
            .description("List commands with their usage and description"),
        ConCommand::new("clear", |_, ctx| {
            ctx.output().clear();
            Ok(())
        })
        .description("Clear the console output"),
        ConCommand::new("delete_history", |_, ctx| {
            ctx.history().clear();
            Ok(())
        })
        .description("Forget all submitted commands"),
        ConCommand::new("quit", |_, ctx| {
            ctx.request(HostRequest::Quit);
            Ok(())
        })
        .description("Exit the application"),
        ConCommand::new("pause", |_, ctx| {
            ctx.request(HostRequest::Pause);
            ctx.info("Paused");
            Ok(())
        })
        .description("Pause simulation time"),
        ConCommand::new("unpause", |_, ctx| {
            ctx.request(HostRequest::Resume);
            ctx.info("Unpaused");
            Ok(())
        })
        .description("Resume simulation time"),
    ];

    for cmd in builtins {
        let name = cmd.name().to_string();
        if let Err(err) = console.register_cmd(cmd) {
            bevy::log::error!(
                target: LOG_TARGET,
                "Console: failed to register built-in '{}': {}",
                name,
                err
            );
        }
    }
}

fn help(args: &CommandArgs<'_>, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
    let Some(name) = args.get(0) else {
        ctx.line("Built-in commands:");
        for builtin in ["help", "commands_list", "commands", "clear", "delete_history", "quit"] {
            if let Some(cmd) = ctx.registry().get(builtin) {
                let text = format!("  {} - {}", cmd.usage(), cmd.get_description());
                ctx.line(text);
            }
        }
        ctx.line("Controls:");
        ctx.line("  Up/Down arrow keys browse the command history");
        ctx.line("  Tab cycles through autocomplete suggestions");
        ctx.info("Type 'help <command>' for details on one command.");
        return Ok(());
    };

    let registry = ctx.registry();
    let cmd = registry
        .get(name)
        .filter(|cmd| !cmd.is_hidden())
        .ok_or_else(|| CommandError::new(format!("unknown command '{}'", name)))?;

    let usage = format!("Usage: {}", cmd.usage());
    let description = cmd.get_description().to_string();
    let values: Vec<String> = (0..cmd.declared_count())
        .filter(|i| !cmd.autocomplete_values(*i).is_empty())
        .filter_map(|i| {
            let arg = cmd.declared_args().nth(i)?;
            Some(format!("  {}: {}", arg, cmd.autocomplete_values(i).join(", ")))
        })
        .collect();

    ctx.line(usage);
    if !description.is_empty() {
        ctx.info(description);
    }
    for line in values {
        ctx.line(line);
    }
    Ok(())
}

fn commands_list(_: &CommandArgs<'_>, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
    let names: Vec<String> = ctx
        .registry()
        .visible_names_with_prefix("")
        .into_iter()
        .map(String::from)
        .collect();
    for name in names {
        ctx.line(name);
    }
    Ok(())
}

fn commands(_: &CommandArgs<'_>, ctx: &mut CommandContext<'_>) -> Result<(), CommandError> {
    let lines: Vec<String> = ctx
        .registry()
        .visible()
        .map(|cmd| match cmd.get_description() {
            "" => cmd.usage(),
            desc => format!("{} - {}", cmd.usage(), desc),
        })
        .collect();
    for line in lines {
        ctx.line(line);
    }
    Ok(())
}
