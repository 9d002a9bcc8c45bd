//! `providers` and `config` commands.

use asolens_providers::ProviderSelector;

pub(crate) fn run_providers(selector: &ProviderSelector, json: bool) -> anyhow::Result<()> {
    let statuses = selector.statuses();

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for status in &statuses {
        let availability = if status.available {
            "available"
        } else {
            "missing credential"
        };
        let marker = if status.is_default { " (default)" } else { "" };
        println!(
            "{:<8} {:<16} {:<19} {}{marker}",
            status.id.as_str(),
            status.name,
            availability,
            status.description
        );
    }
    Ok(())
}

pub(crate) fn run_config(selector: &ProviderSelector) {
    for (name, value) in selector.environment_report() {
        println!("{name:<18} {value}");
    }
}
