//! Config subcommand handlers.

use std::fmt::Write as _;

use crate::cli::{ConfigArgs, ConfigCommand, ConfigInitArgs, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init(init_args) => init(&init_args, global),
        ConfigCommand::Show => {
            show(global);
            Ok(())
        }
        ConfigCommand::Path => {
            output::emit(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Profiles => {
            profiles(global);
            Ok(())
        }
    }
}

fn init(args: &ConfigInitArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let _: url::Url = args.device.parse().map_err(|_| CliError::Validation {
        field: "device".into(),
        reason: format!("invalid URL: {}", args.device),
    })?;

    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(
        args.name.clone(),
        Profile {
            device: args.device.clone(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        },
    );
    if args.make_default || cfg.default_profile.is_none() {
        cfg.default_profile = Some(args.name.clone());
    }
    config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!(
            "Profile '{}' saved to {}",
            args.name,
            config::config_path().display()
        );
    }
    Ok(())
}

fn show(global: &GlobalOpts) {
    let cfg = config::load_config_or_default();
    let view = output::View {
        human: format_config(&cfg),
        plain: cfg.default_profile.clone().unwrap_or_default(),
    };
    output::emit(&output::render(&global.output, &cfg, view), global.quiet);
}

fn profiles(global: &GlobalOpts) {
    let cfg = config::load_config_or_default();
    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    let rendered = names
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    output::emit(&rendered, global.quiet);
}

fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "poll_interval = {}", cfg.defaults.poll_interval);

    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "device = \"{}\"", p.device);
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}
