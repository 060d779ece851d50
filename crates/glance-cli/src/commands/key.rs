use dialoguer::Confirm;
use secrecy::ExposeSecret;

use crate::app::{passphrase_for_new_secret, AppContext};
use crate::cli::{KeyClearArgs, KeyInfoArgs, KeySetArgs, KeyShowArgs, KeySubcommand};
use crate::config::SecurityTier;
use crate::constants::env_vars;
use crate::errors::CliError;
use crate::helpers::{mask_secret, prompt_new_passphrase, read_api_key, stdin_is_interactive};
use crate::output::key_info_json;
use crate::ui::{badge, hint, kv, Badge};

pub fn handle_key(ctx: &AppContext, command: &KeySubcommand) -> anyhow::Result<()> {
    match command {
        KeySubcommand::Set(args) => handle_set(ctx, args),
        KeySubcommand::Show(args) => handle_show(ctx, args),
        KeySubcommand::Check => handle_check(ctx),
        KeySubcommand::Rotate => handle_rotate(ctx),
        KeySubcommand::Clear(args) => handle_clear(ctx, args),
        KeySubcommand::Info(args) => handle_info(ctx, args),
    }
}

fn handle_set(ctx: &AppContext, args: &KeySetArgs) -> anyhow::Result<()> {
    let security = ctx.security_config()?;
    let mut vault = ctx.open_vault()?;

    let api_key = read_api_key(args.value.clone())?;
    let passphrase = passphrase_for_new_secret(security)?;
    let replaced = vault.exists()?;
    vault.save(&api_key, &passphrase)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        let message = if replaced {
            "API key replaced"
        } else {
            "API key stored"
        };
        println!("{}", badge(&ui_ctx, Badge::Ok, message));
        println!(
            "{}",
            kv(&ui_ctx, "Store", &vault.store().path().display().to_string())
        );
    }
    Ok(())
}

fn handle_show(ctx: &AppContext, args: &KeyShowArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let unlocked = ctx.unlock(&vault)?;
    let secret = unlocked.secret.expose_secret();

    if args.reveal {
        println!("{}", secret);
    } else {
        println!("{}", mask_secret(secret));
    }
    Ok(())
}

fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    ctx.unlock(&vault)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        println!("{}", badge(&ui_ctx, Badge::Ok, "Stored API key decrypts"));
    }
    Ok(())
}

fn handle_rotate(ctx: &AppContext) -> anyhow::Result<()> {
    let security = ctx.security_config()?;
    if matches!(security.tier, SecurityTier::DeviceKeyfile) {
        return Err(CliError::invalid_input(
            "Rotation needs the passphrase tier; the device keyfile is the passphrase here.",
        )
        .into());
    }

    let mut vault = ctx.open_vault()?;
    let unlocked = ctx.unlock(&vault)?;
    let new_passphrase = prompt_new_passphrase(env_vars::NEW_PASSPHRASE)?;
    vault.rotate(&unlocked.passphrase, &new_passphrase)?;

    if !ctx.quiet() {
        let ui_ctx = ctx.ui_context(false);
        println!("{}", badge(&ui_ctx, Badge::Ok, "Passphrase rotated"));
    }
    Ok(())
}

fn handle_clear(ctx: &AppContext, args: &KeyClearArgs) -> anyhow::Result<()> {
    let mut vault = ctx.open_vault()?;
    let ui_ctx = ctx.ui_context(false);

    if !vault.exists()? {
        if !ctx.quiet() {
            println!("{}", badge(&ui_ctx, Badge::Info, "No API key stored"));
        }
        return Ok(());
    }

    if !args.yes {
        if !stdin_is_interactive() {
            return Err(CliError::invalid_input(
                "Refusing to clear without confirmation. Pass --yes.",
            )
            .into());
        }
        let proceed = Confirm::new()
            .with_prompt("Delete the stored API key?")
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Clear cancelled"));
        }
    }

    vault.clear()?;
    if !ctx.quiet() {
        println!("{}", badge(&ui_ctx, Badge::Ok, "API key cleared"));
        println!("{}", hint(&ui_ctx, "Store a new one with `glance key set`."));
    }
    Ok(())
}

fn handle_info(ctx: &AppContext, args: &KeyInfoArgs) -> anyhow::Result<()> {
    let vault = ctx.open_vault()?;
    let info = vault.info()?;
    let ui_ctx = ctx.ui_context(args.json);

    if ui_ctx.mode.is_json() {
        let value = key_info_json(vault.store().path(), info.as_ref());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{}",
        kv(&ui_ctx, "Store", &vault.store().path().display().to_string())
    );
    match info {
        Some(info) => {
            let saved = info
                .saved_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string());
            println!("{}", kv(&ui_ctx, "Saved", &saved));
            if let Some(rotated) = info.rotated_at {
                println!("{}", kv(&ui_ctx, "Rotated", &rotated.to_rfc3339()));
            }
        }
        None => {
            println!("{}", kv(&ui_ctx, "Stored", "no"));
        }
    }
    Ok(())
}
