//! Bogus command: static paths naming unknown port selectors.

use tabled::Tabled;

use fabpath_core::BogusBinding;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util::DataSource;

#[derive(Tabled)]
struct BogusRow {
    #[tabled(rename = "EPG")]
    epg: String,
    #[tabled(rename = "Node(s)")]
    node: String,
    #[tabled(rename = "Selector")]
    selector: String,
}

impl From<&BogusBinding> for BogusRow {
    fn from(b: &BogusBinding) -> Self {
        Self {
            epg: b.epg.clone(),
            node: b.node.clone(),
            selector: b.selector.clone(),
        }
    }
}

pub async fn handle(source: &DataSource, global: &GlobalOpts) -> Result<(), CliError> {
    let analysis = source.analyze().await?;
    let bogus = analysis.resolution.bogus;

    let out = output::render_list(
        &global.output,
        &bogus,
        |b| BogusRow::from(b),
        ToString::to_string,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
