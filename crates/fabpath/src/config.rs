//! CLI configuration — thin wrapper around `fabpath_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--controller, --username, etc.).

use std::time::Duration;

use secrecy::SecretString;

use fabpath_core::{ControllerConfig, IndexPolicy, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use fabpath_config::{
    Config, Defaults, KEYRING_SERVICE, Profile, config_path, keyring_key, load_config_or_default,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Selector classification rules for the active profile.
pub fn active_policy(global: &GlobalOpts, config: &Config) -> IndexPolicy {
    config
        .profiles
        .get(&active_profile_name(global, config))
        .map(Profile::index_policy)
        .unwrap_or_default()
}

/// Build a `ControllerConfig` from the config file, profile, and CLI overrides.
pub fn resolve_controller(global: &GlobalOpts, cfg: &Config) -> Result<ControllerConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    // If a profile exists, use it with CLI flag overrides
    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, &cfg.defaults);
    }

    // No profile found -- build from CLI flags / env vars alone
    let url_str = global.controller.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let url = parse_url(url_str)?;

    let (Some(username), Some(password)) = (&global.username, &global.password) else {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    };

    let tls = if global.insecure || cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ControllerConfig {
        url,
        username: username.clone(),
        password: SecretString::from(password.clone()),
        tls,
        timeout: Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout)),
        policy: IndexPolicy::default(),
    })
}

/// Translate a `Profile` + global flags into a `ControllerConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<ControllerConfig, CliError> {
    // 1. Controller URL (flag > env > profile)
    let url = parse_url(global.controller.as_deref().unwrap_or(&profile.controller))?;

    // 2. Credentials (flag > env > keyring > profile)
    let username = match global.username {
        Some(ref user) => user.clone(),
        None => fabpath_config::resolve_username(profile, profile_name)?,
    };
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => fabpath_config::resolve_password(profile, profile_name)?,
    };

    // 3. TLS verification
    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        fabpath_config::resolve_tls(profile, defaults.insecure)
    };

    // 4. Timeout
    let timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(defaults.timeout),
    );

    Ok(ControllerConfig {
        url,
        username,
        password,
        tls,
        timeout,
        policy: profile.index_policy(),
    })
}

fn parse_url(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}
