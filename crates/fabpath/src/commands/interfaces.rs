//! Interfaces command: per-interface VLAN summary.

use tabled::Tabled;

use fabpath_core::InterfaceVlanSummary;

use crate::cli::{GlobalOpts, InterfacesArgs};
use crate::error::CliError;
use crate::output;

use super::util::{self, DataSource};

#[derive(Tabled)]
struct InterfaceRow {
    #[tabled(rename = "Switch")]
    switch: String,
    #[tabled(rename = "Interface")]
    intf: String,
    #[tabled(rename = "Untagged")]
    untagged: String,
    #[tabled(rename = "Tagged")]
    tagged: String,
}

impl From<&InterfaceVlanSummary> for InterfaceRow {
    fn from(s: &InterfaceVlanSummary) -> Self {
        Self {
            switch: s.switch.clone(),
            intf: s.intf.clone(),
            untagged: if s.untagged.is_empty() {
                "-".into()
            } else {
                s.untagged.clone()
            },
            tagged: s.tagged.join(","),
        }
    }
}

pub async fn handle(
    source: &DataSource,
    args: &InterfacesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let analysis = source.analyze().await?;
    let summaries: Vec<InterfaceVlanSummary> = analysis
        .collation()
        .into_values()
        .filter(|s| util::matches(args.node.as_deref(), &s.switch))
        .collect();

    let out = output::render_list(
        &global.output,
        &summaries,
        |s| InterfaceRow::from(s),
        |s| format!("{} {}", s.switch, s.intf),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
