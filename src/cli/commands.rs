//! Subcommand implementations.

use super::{CliStore, EngineArgs};
use crate::debug;
use crate::engine::{RepositionOutcome, Repositioner};
use crate::session::SessionState;
use crate::session::storage::{load_session_from, save_session_to};
use crate::tab::TabManager;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};
use tabshift_config::defaults::CONFIG_RELOAD_DEBOUNCE_MS;
use tabshift_config::watcher::ConfigWatcher;
use tabshift_config::Config;
use tabshift_filters::{Keyword, PatternKind, Variable};

/// How long `watch` waits for a reload event per iteration
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => Config::load().context("Failed to load user config"),
    }
}

fn build_store(args: &EngineArgs) -> Result<CliStore> {
    let config = load_config(args.config.as_deref())?;
    debug::apply_config_debug(config.debug || args.debug);
    Ok(CliStore {
        config,
        overrides: args.overrides(),
    })
}

/// Tab labels joined in display order, the active one starred
fn render_order(manager: &TabManager) -> String {
    let active = manager.active_tab_id();
    manager
        .tabs()
        .iter()
        .map(|tab| {
            if Some(tab.id) == active {
                format!("{}*", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Run one decision against a fresh copy of `session` and print it
fn reposition_and_print(
    engine: &mut Repositioner,
    session: &SessionState,
) -> Result<(RepositionOutcome, TabManager)> {
    let mut manager = session.restore();
    let outcome = engine
        .reposition_active_tab(&mut manager)
        .context("Failed to move the active tab")?;

    println!("{}", outcome);
    println!("{}", render_order(&manager));
    Ok((outcome, manager))
}

/// `tabshift position`
pub fn position_cli(args: &EngineArgs, write: bool) -> Result<()> {
    let session = load_session_from(&args.session)?;
    let mut engine = Repositioner::new(build_store(args)?);

    let (outcome, manager) = reposition_and_print(&mut engine, &session)?;

    if write && matches!(outcome, RepositionOutcome::Moved { .. }) {
        save_session_to(&SessionState::capture(&manager), &args.session)?;
        println!("Session updated: {}", args.session.display());
    }
    Ok(())
}

/// `tabshift explain`
pub fn explain_cli(args: &EngineArgs) -> Result<()> {
    let session = load_session_from(&args.session)?;
    let mut engine = Repositioner::new(build_store(args)?);
    let manager = session.restore();

    let reports = engine.explain(&manager);
    if let Some(options) = engine.current_options() {
        println!(
            "filters: {}  direction: {} ({})  padding: {}  enabled: {}",
            options.block_move_filters.join(", "),
            options.direction,
            options.move_direction(),
            options.padding,
            options.enabled
        );
    }

    for report in &reports {
        let marker = if report.is_active { "*" } else { " " };
        match &report.blocked_by {
            Some(token) => println!(
                "{}{:>3}  {:<32} blocked by {}",
                marker, report.index, report.label, token
            ),
            None => println!("{}{:>3}  {}", marker, report.index, report.label),
        }
    }

    println!("{}", engine.compute(&manager));
    Ok(())
}

/// `tabshift watch`
pub fn watch_cli(args: &EngineArgs, exit_after: Option<f64>) -> Result<()> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(Config::config_path);
    let session = load_session_from(&args.session)?;

    let watcher = ConfigWatcher::new(&config_path, CONFIG_RELOAD_DEBOUNCE_MS)?;
    let mut engine = Repositioner::new(CliStore {
        config: load_config(Some(&config_path))?,
        overrides: args.overrides(),
    });
    reposition_and_print(&mut engine, &session)?;

    let deadline = exit_after
        .and_then(|secs| Duration::try_from_secs_f64(secs.max(0.0)).ok())
        .map(|after| Instant::now() + after);
    println!("Watching {} (Ctrl+C to stop)", config_path.display());

    loop {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            log::info!("Exit-after deadline reached, stopping watch");
            return Ok(());
        }

        let Some(event) = watcher.recv_timeout(WATCH_POLL_INTERVAL) else {
            continue;
        };

        match load_config(Some(&event.path)) {
            Ok(config) => {
                debug::apply_config_debug(config.debug || args.debug);
                engine.reload(CliStore {
                    config,
                    overrides: args.overrides(),
                });
                println!("-- config reloaded");
                reposition_and_print(&mut engine, &session)?;
            }
            Err(e) => {
                // Keep running with the last good configuration
                log::warn!("Ignoring invalid config: {e:#}");
                eprintln!("tabshift: {e:#}");
            }
        }
    }
}

/// `tabshift filters`
pub fn filters_cli() {
    println!("Keywords:");
    for keyword in Keyword::all() {
        println!("  {}", keyword.name());
    }

    println!();
    println!("Pattern prefixes (glob):");
    for kind in PatternKind::all() {
        println!("  {}<pattern>", kind.prefix());
    }

    println!();
    println!("Variables (path: patterns only):");
    for (name, description) in Variable::all() {
        println!("  ${{{:<26} {}", format!("{}}}", name), description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabshift_config::TabDescriptor;

    #[test]
    fn test_render_order_marks_active() {
        let session = SessionState {
            tabs: vec![
                TabDescriptor::new("a"),
                TabDescriptor::new("b").active(),
                TabDescriptor::new("c"),
            ],
            ..SessionState::default()
        };
        assert_eq!(render_order(&session.restore()), "a | b* | c");
    }
}
