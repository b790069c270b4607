//! Submodel listing.

use tabled::Tabled;

use boardwatch_api::SubmodelClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SubmodelRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "LAST UPDATE")]
    last_update: String,
    #[tabled(rename = "FIELDS")]
    fields: usize,
}

pub async fn handle(client: &SubmodelClient, global: &GlobalOpts) -> Result<(), CliError> {
    let submodels = client.list_submodels().await?;

    let entries: Vec<(String, serde_json::Value)> = submodels.into_iter().collect();
    let rows = entries.iter().map(|(name, value)| SubmodelRow {
        name: name.clone(),
        last_update: value
            .get("LastUpdate")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("-")
            .to_owned(),
        fields: value.as_object().map_or(0, serde_json::Map::len),
    });
    let view = output::View {
        human: output::table(rows),
        plain: entries
            .iter()
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    output::emit(&output::render(&global.output, &entries, view), global.quiet);
    Ok(())
}
