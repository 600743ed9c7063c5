use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::Table;
use hub_model::{Principal, ScreenId};
use hub_nav::{Chrome, HubConfig, Mount, resolve_path, sidebar_items};
use tracing::{debug, info};

use hub_cli::replay::{ReplayOutcome, run_script};
use hub_cli::script::ReplayScript;

use crate::cli::{ConfigArgs, ReplayArgs, ResolveArgs};
use crate::summary::apply_table_style;

/// Settings from `--config` (or the default location) with CLI overrides.
pub fn load_config(path: Option<&Path>, timeout_ms: Option<u64>) -> Result<HubConfig> {
    let config = match path {
        Some(path) => HubConfig::load_from(path).context("load hub config")?,
        None => HubConfig::load_or_default().context("load hub config")?,
    };
    Ok(with_overrides(config, timeout_ms))
}

fn with_overrides(config: HubConfig, timeout_ms: Option<u64>) -> HubConfig {
    let config = match timeout_ms {
        Some(ms) => config.with_session_timeout(Duration::from_millis(ms)),
        None => config,
    };
    debug!(
        session_timeout_ms = config.session_timeout_ms,
        record_activity = config.record_activity,
        "hub config"
    );
    config
}

/// Effective settings and where they live.
pub struct ConfigReport {
    pub path: PathBuf,
    pub saved: bool,
    pub rendered: String,
}

/// Settings at `path` (or the default location) with CLI overrides applied.
///
/// A missing file is not an error here: the defaults are shown, and `--save`
/// creates it.
pub fn run_config(
    args: &ConfigArgs,
    path: Option<&Path>,
    timeout_ms: Option<u64>,
) -> Result<ConfigReport> {
    let path = path.map_or_else(HubConfig::config_path, Path::to_path_buf);
    let config = if path.exists() {
        HubConfig::load_from(&path).context("load hub config")?
    } else {
        HubConfig::default()
    };
    let config = with_overrides(config, timeout_ms);
    let rendered = config.to_toml().context("render hub config")?;
    if args.save {
        config.save_to(&path).context("save hub config")?;
        info!(path = %path.display(), "hub config saved");
    }
    Ok(ConfigReport {
        path,
        saved: args.save,
        rendered,
    })
}

pub fn run_screens() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Path", "Namespace", "Title"]);
    apply_table_style(&mut table);
    for screen in ScreenId::ALL {
        table.add_row(vec![
            screen.as_str().to_string(),
            screen.namespace().to_string(),
            screen.title().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Mount decision for a path, with the chrome and sidebar that go with it.
pub struct Resolution {
    pub principal: Principal,
    pub mount: Mount,
    pub chrome: Chrome,
    pub sidebar: Vec<&'static str>,
}

pub fn run_resolve(args: &ResolveArgs) -> Result<Resolution> {
    let principal = if args.anonymous {
        Principal::anonymous()
    } else {
        Principal::signed_in("cli", args.role.into())
    };
    let mount = resolve_path(&args.path, &principal);
    let screen = match mount {
        Mount::Screen { screen } => screen,
        Mount::Landing => ScreenId::Home,
        Mount::Nothing => args.path.parse().unwrap_or(ScreenId::NotFound),
        Mount::NotFound { .. } => ScreenId::NotFound,
    };
    let sidebar = if screen.is_public() {
        Vec::new()
    } else {
        sidebar_items(principal.role)
            .iter()
            .map(|item| item.label)
            .collect()
    };
    Ok(Resolution {
        principal,
        mount,
        chrome: Chrome::for_screen(screen),
        sidebar,
    })
}

pub fn run_replay(args: &ReplayArgs, config: HubConfig) -> Result<ReplayOutcome> {
    let script = ReplayScript::load(&args.script)?;
    info!(
        script = %args.script.display(),
        steps = script.steps.len(),
        "replaying"
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("start async runtime")?;
    Ok(runtime.block_on(run_script(&script, config)))
}
