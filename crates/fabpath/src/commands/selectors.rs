//! Selectors command: the port-selector index.

use tabled::Tabled;

use fabpath_core::PortSelector;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util::DataSource;

#[derive(Tabled)]
struct SelectorRow {
    #[tabled(rename = "Selector")]
    name: String,
    #[tabled(rename = "Interface Profile")]
    interface_profile: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Ports")]
    ports: String,
}

impl From<&PortSelector> for SelectorRow {
    fn from(s: &PortSelector) -> Self {
        Self {
            name: s.name.clone(),
            interface_profile: s.interface_profile.clone(),
            kind: s.kind.to_string(),
            ports: format!("{}-{}", s.from_port, s.to_port),
        }
    }
}

pub async fn handle(source: &DataSource, global: &GlobalOpts) -> Result<(), CliError> {
    let analysis = source.analyze().await?;
    let selectors: Vec<PortSelector> = analysis.index.iter().cloned().collect();

    let out = output::render_list(
        &global.output,
        &selectors,
        |s| SelectorRow::from(s),
        |s| s.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
