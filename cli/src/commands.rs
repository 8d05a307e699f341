use std::io::Write;
use std::path::Path;

use amascut_core::{PluginConfigExt, PluginRuntime};
use amascut_types::PluginConfig;

use crate::replay;

fn resolve_config(config_path: Option<&str>) -> Result<PluginConfig, String> {
    match config_path {
        Some(path) => PluginConfig::from_toml_file(Path::new(path)).map_err(|e| e.to_string()),
        None => Ok(PluginConfig::load_or_default()),
    }
}

pub async fn replay(path: &str, config_path: Option<&str>) -> Result<(), String> {
    let config = resolve_config(config_path)?;
    let events = replay::load_events(Path::new(path))
        .await
        .map_err(|e| e.to_string())?;

    let mut runtime = PluginRuntime::with_default_components(config);
    let startup = runtime.start();
    if !startup.failed.is_empty() {
        tracing::warn!(failed = ?startup.failed, "Components failed during startup");
    }

    let reports = replay::run(&mut runtime, &events);
    for report in &reports {
        println!("{report}");
    }
    runtime.shutdown();

    println!("replayed {} events over {} ticks", events.len(), reports.len());
    Ok(())
}

/// Print the resolved config. With `save`, also persist it as the default config.
pub fn show_config(config_path: Option<&str>, save: bool) -> Result<(), String> {
    let config = resolve_config(config_path)?;
    if save {
        config.save().map_err(|e| e.to_string())?;
        tracing::info!(source = config_path.unwrap_or("persisted"), "Configuration saved");
    }
    match config_path {
        Some(path) => println!("# {path}"),
        None => match PluginConfig::config_path() {
            Ok(path) => println!("# {}", path.display()),
            Err(err) => println!("# config path unavailable: {err}"),
        },
    }
    let rendered = toml::to_string_pretty(&config).map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").ok();
    std::io::stdout().flush().ok();
}
