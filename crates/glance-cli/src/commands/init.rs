use std::path::PathBuf;

use dialoguer::Confirm;

use glance_core::storage::FileStore;
use glance_core::SecretVault;

use crate::app::{device_keyfile_warning, resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_keyfile_path, default_store_path, write_config, GlanceConfig, SecurityTier};
use crate::errors::CliError;
use crate::helpers::stdin_is_interactive;
use crate::security::{generate_key_bytes, write_keyfile_plain};
use crate::ui::{badge, header, hint, kv, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let interactive = stdin_is_interactive() && !args.no_input;

    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    if matches!(args.tier, SecurityTier::DeviceKeyfile) && interactive {
        let proceed = Confirm::new()
            .with_prompt(device_keyfile_warning())
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Initialization cancelled"));
        }
    }

    let store_path = match ctx.cli().store.as_deref() {
        Some(value) => PathBuf::from(value),
        None => default_store_path()?,
    };

    let keyfile_path = match args.tier {
        SecurityTier::Passphrase => None,
        SecurityTier::DeviceKeyfile => {
            let path = default_keyfile_path()?;
            if path.exists() {
                tracing::info!(path = %path.display(), "reusing existing device keyfile");
            } else {
                let key_bytes = generate_key_bytes()?;
                write_keyfile_plain(&path, &key_bytes[..])?;
            }
            Some(path)
        }
    };

    if let Some(model) = args.model.as_deref() {
        if model.trim().is_empty() {
            return Err(CliError::invalid_input("--model cannot be empty").into());
        }
    }

    let config = GlanceConfig::new(
        store_path.clone(),
        args.tier,
        keyfile_path.clone(),
        args.model.clone(),
    );
    write_config(&config_path, &config)?;
    tracing::info!(path = %config_path.display(), "wrote config");

    if ctx.quiet() {
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() {
        println!("{}", header(&ui_ctx, "init"));
    }
    println!("{}", badge(&ui_ctx, Badge::Ok, "Config written"));
    println!("{}", kv(&ui_ctx, "Config", &config_path.display().to_string()));
    println!("{}", kv(&ui_ctx, "Store", &store_path.display().to_string()));
    if let Some(path) = keyfile_path.as_ref() {
        println!("{}", kv(&ui_ctx, "Keyfile", &path.display().to_string()));
    }
    println!("{}", kv(&ui_ctx, "Model", &config.api.model));

    let vault = SecretVault::new(FileStore::new(&store_path));
    if vault.exists()? {
        println!(
            "{}",
            badge(
                &ui_ctx,
                Badge::Warn,
                "An API key is already stored; it stays locked with whatever unlocked it before."
            )
        );
    } else {
        println!("{}", hint(&ui_ctx, "Store your API key with `glance key set`."));
    }
    Ok(())
}
