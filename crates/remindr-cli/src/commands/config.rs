use std::env;

use remindr_core::config::{ClientConfig, SUPABASE_ANON_KEY_ENV, SUPABASE_URL_ENV};
use remindr_core::util::{is_http_url, normalize_text_option};

use crate::cli::{ConfigCommands, LocaleArg, ThemeArg};
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

/// Values passed to `config init`
#[derive(Debug, Default)]
pub struct ConfigInitArgs {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub theme: Option<ThemeArg>,
    pub locale: Option<LocaleArg>,
    pub no_activate: bool,
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            supabase_url,
            supabase_anon_key,
            theme,
            locale,
            no_activate,
        } => {
            let args = ConfigInitArgs {
                supabase_url,
                supabase_anon_key,
                theme,
                locale,
                no_activate,
            };
            run_config_init(global_profile, args)
        }
        ConfigCommands::Show => run_config_show(global_profile),
    }
}

pub fn run_config_init(profile_name: Option<&str>, args: ConfigInitArgs) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let no_activate = args.no_activate;
    apply_init_args(config.profile_mut_or_default(&profile_name), args);
    let profile = config
        .profile(&profile_name)
        .cloned()
        .ok_or_else(|| CliError::Config("Failed to persist profile".to_string()))?;
    validate_profile(&profile)?;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    tracing::info!("Saved profile '{profile_name}' to {}", path.display());
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );

    let missing = missing_fields(&profile);
    if missing.is_empty() {
        println!(
            "Profile '{profile_name}' is ready. Run `remindr auth login --email <email> --password <password>`."
        );
    } else {
        println!(
            "Profile '{}' is missing: {}",
            profile_name,
            missing.join(", ")
        );
    }
    Ok(())
}

fn run_config_show(profile_name: Option<&str>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    let Some(profile) = config.profile(&profile_name) else {
        println!("Profile '{profile_name}' is not configured.");
        return Ok(());
    };

    println!("profile:       {profile_name}");
    println!(
        "supabase_url:  {}",
        profile.supabase_url().as_deref().unwrap_or("(unset)")
    );
    println!(
        "anon_key:      {}",
        if profile.supabase_anon_key().is_some() {
            "(set)"
        } else {
            "(unset)"
        }
    );
    println!("theme:         {}", profile.theme());
    println!("locale:        {}", profile.locale());
    Ok(())
}

/// Merge explicit values, then environment values, over the stored profile
pub fn apply_init_args(profile: &mut CliProfile, args: ConfigInitArgs) {
    let supabase_url = normalize_text_option(args.supabase_url)
        .or_else(|| normalize_text_option(env::var(SUPABASE_URL_ENV).ok()));
    let supabase_anon_key = normalize_text_option(args.supabase_anon_key)
        .or_else(|| normalize_text_option(env::var(SUPABASE_ANON_KEY_ENV).ok()));

    if let Some(value) = supabase_url {
        profile.supabase_url = Some(value.trim_end_matches('/').to_string());
    }
    if let Some(value) = supabase_anon_key {
        profile.supabase_anon_key = Some(value);
    }
    if let Some(theme) = args.theme {
        profile.theme = Some(theme.into());
    }
    if let Some(locale) = args.locale {
        profile.locale = Some(locale.into());
    }
}

pub fn validate_profile(profile: &CliProfile) -> Result<(), CliError> {
    if let Some(url) = profile.supabase_url() {
        if !is_http_url(&url) {
            return Err(CliError::Config(
                "supabase_url must include http:// or https://".to_string(),
            ));
        }
    }
    if let (Some(url), Some(key)) = (profile.supabase_url(), profile.supabase_anon_key()) {
        ClientConfig::new(url, key).map_err(CliError::Config)?;
    }
    Ok(())
}

pub fn missing_fields(profile: &CliProfile) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if profile.supabase_url().is_none() {
        missing.push("supabase_url");
    }
    if profile.supabase_anon_key().is_none() {
        missing.push("supabase_anon_key");
    }
    missing
}
