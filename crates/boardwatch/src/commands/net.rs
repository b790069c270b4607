//! Network configuration handlers: show and edit-commit set.

use tabled::Tabled;

use boardwatch_api::{NetworkConfiguration, SubmodelClient};
use boardwatch_core::EditSession;

use crate::cli::{GlobalOpts, NetworkArgs, NetworkCommand, NetworkSetArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &SubmodelClient,
    args: NetworkArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NetworkCommand::Show => show(client, global).await,
        NetworkCommand::Set(set_args) => set(client, set_args, global).await,
    }
}

// ── Show ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "INTERFACE")]
    interface: String,
    #[tabled(rename = "FIELD")]
    field: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

async fn show(client: &SubmodelClient, global: &GlobalOpts) -> Result<(), CliError> {
    let config = client.get_network_configuration().await?;

    let view = output::View {
        human: format_table(&config),
        plain: config
            .network_setting
            .iter()
            .flat_map(|(iface, props)| {
                props
                    .iter()
                    .map(move |(field, value)| format!("{iface}.{field}={value}"))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };

    output::emit(&output::render(&global.output, &config, view), global.quiet);
    Ok(())
}

fn format_table(config: &NetworkConfiguration) -> String {
    let rows = config.network_setting.iter().flat_map(|(iface, props)| {
        props.iter().map(|(field, value)| FieldRow {
            interface: iface.clone(),
            field: field.clone(),
            value: value.clone(),
        })
    });
    output::table(rows)
}

// ── Set (edit-commit) ────────────────────────────────────────────────

async fn set(
    client: &SubmodelClient,
    args: NetworkSetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut session = EditSession::load(client.clone()).await?;
    session.begin_edit()?;

    for assignment in &args.assignments {
        session.update_field(&args.interface, &assignment.field, assignment.value.clone())?;
    }

    session.save().await?;

    if !global.quiet {
        eprintln!(
            "Saved {} field(s) on {}",
            args.assignments.len(),
            args.interface
        );
    }
    Ok(())
}
