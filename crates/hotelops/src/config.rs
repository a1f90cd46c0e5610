//! CLI configuration: thin wrapper around `hotelops_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-url, --token, --insecure, --timeout, --per-page).

use secrecy::SecretString;

use hotelops_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use hotelops_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Client settings plus the profile values commands read directly.
pub struct Resolved {
    pub client: ClientConfig,
    /// Hotel applied to list filters when `--hotel` is absent.
    pub hotel_id: Option<String>,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build the client config from the config file, profile, and CLI overrides.
///
/// Without a matching profile, `--api-url` and `--token` (or their env
/// vars) must carry everything.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let stored = cfg.profiles.get(&profile_name);

    let mut profile = match stored {
        Some(p) => p.clone(),
        None if global.api_url.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };
    apply_overrides(&mut profile, global);

    let token = match (&global.token, stored) {
        (Some(token), _) => SecretString::from(token.clone()),
        (None, Some(_)) => hotelops_config::resolve_token(&profile, &profile_name)?,
        (None, None) => {
            return Err(CliError::NoCredentials {
                profile: profile_name,
            });
        }
    };

    let client = hotelops_config::build_client_config(&profile, token, &cfg.defaults)?;
    tracing::debug!(profile = %profile_name, api_url = %client.api_url, "resolved configuration");
    Ok(Resolved {
        client,
        hotel_id: profile.hotel_id,
    })
}

/// Flags win over profile values.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    if global.per_page.is_some() {
        profile.per_page = global.per_page;
    }
}
