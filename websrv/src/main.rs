// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    env::current_exe,
    fs,
    io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use tokio::sync::mpsc;

use crate::{
    config::Config,
    runtime::{Command, State},
};

mod config;
mod env;
mod runtime;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[must_use]
const fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

#[must_use]
fn app_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "genreguide", app_name())
}

#[must_use]
fn app_config_dir(app_dirs: &ProjectDirs) -> &Path {
    app_dirs.config_dir()
}

#[must_use]
fn new_config_file_path(app_dirs: &ProjectDirs, file_suffix: &str) -> PathBuf {
    let mut path_buf = app_config_dir(app_dirs).to_path_buf();
    path_buf.push("config");
    path_buf.set_extension(file_suffix);
    path_buf
}

#[must_use]
fn load_app_config(app_dirs: &ProjectDirs) -> Config {
    let file_path = new_config_file_path(app_dirs, "ron");
    log::info!("Loading configuration from file: {}", file_path.display());
    match fs::read(&file_path) {
        Ok(bytes) => ron::de::from_bytes(&bytes)
            .map_err(|err| {
                log::warn!("Failed to parse configuration data: {err}");
            })
            .unwrap_or_default(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Default::default(),
        Err(err) => {
            log::warn!("Failed to read configuration data from file: {err}");
            Default::default()
        }
    }
}

fn save_app_config(app_dirs: &ProjectDirs, config: &Config) {
    let file_path = new_config_file_path(app_dirs, "ron");
    log::info!(
        "Saving current configuration into file: {}",
        file_path.display()
    );
    let data = match ron::ser::to_string_pretty(config, Default::default()) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("Failed to store configuration data: {err}");
            return;
        }
    };
    if let Some(parent_path) = file_path.parent() {
        if let Err(err) = fs::create_dir_all(parent_path) {
            log::warn!("Failed to create parent directories for configuration file: {err}");
        }
    }
    if let Err(err) = fs::write(&file_path, data) {
        log::warn!("Failed to write configuration data into file: {err}");
    }
}

fn main() {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return;
    }

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let initial_config: Config = if env::parse_launch_default_config().unwrap_or(false) {
        log::info!("Using initial default configuration");
        Default::default()
    } else {
        app_dirs().as_ref().map(load_app_config).unwrap_or_default()
    };
    log::debug!("Initial configuration: {initial_config:?}");

    log::info!("Patching configuration from .env file and environment variables");
    let mut config = initial_config.clone();
    env::parse_config_into(&mut config);
    // Temporary configurations are not saved
    let save_config_on_exit = if config == initial_config {
        true
    } else {
        log::debug!("Patched configuration: {config:?}");
        false
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            log::error!("Failed to create runtime: {err}");
            return;
        }
    };

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    rt.spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Failed to await Ctrl-C: {err}");
            return;
        }
        log::info!("Received Ctrl-C");
        if command_tx.send(Command::Terminate).is_err() {
            log::debug!("Runtime has already terminated");
        }
    });

    let outcome = rt.block_on(runtime::run(config.clone(), command_rx, |state| {
        log::debug!("State changed: {state:?}");
        if let State::Listening { socket_addr } = state {
            // Publish socket address on stdout
            println!("{socket_addr}");
        }
    }));
    if let Err(err) = outcome {
        log::error!("Runtime terminated with error: {err:#}");
        return;
    }

    if save_config_on_exit {
        if let Some(app_dirs) = app_dirs() {
            save_app_config(&app_dirs, &config);
        }
    } else {
        log::info!("Discarding current configuration");
    }

    log::info!("Exiting");
}
