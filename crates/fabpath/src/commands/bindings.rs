//! Bindings command: resolved interface bindings.

use tabled::Tabled;

use fabpath_core::ResolvedBinding;

use crate::cli::{BindingsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::{self, DataSource};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BindingRow {
    #[tabled(rename = "EPG")]
    epg: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Node")]
    node: String,
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Port-Channel")]
    port_channel: String,
}

impl From<&ResolvedBinding> for BindingRow {
    fn from(b: &ResolvedBinding) -> Self {
        Self {
            epg: b.epg.clone(),
            vlan: b.vlan.clone(),
            mode: b.mode.to_string(),
            node: b.node.clone(),
            interface: b.interface.clone(),
            port_channel: b.port_channel_label().to_owned(),
        }
    }
}

pub async fn handle(
    source: &DataSource,
    args: &BindingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let analysis = source.analyze().await?;
    let bindings: Vec<ResolvedBinding> = analysis
        .resolution
        .bindings
        .into_iter()
        .filter(|b| util::matches(args.node.as_deref(), &b.node))
        .filter(|b| util::matches(args.epg.as_deref(), &b.epg))
        .collect();

    let out = output::render_list(
        &global.output,
        &bindings,
        |b| BindingRow::from(b),
        |b| {
            format!(
                "{},{},{},{},{},{}",
                b.epg,
                b.vlan,
                b.mode,
                b.node,
                b.interface,
                b.port_channel_label()
            )
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
