//! `hotels` handler: print the shared hotel reference list.

use std::sync::Arc;

use hotelops_core::{Backoffice, Record};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(backoffice: &Backoffice, global: &GlobalOpts) -> Result<(), CliError> {
    let hotels = backoffice.hotels().await?;
    let rows: Vec<Arc<Record>> = hotels
        .iter()
        .map(|h| {
            let mut record = Record::new(h.id.clone()).with("name", h.name.as_str());
            record.fields.extend(h.extra.clone());
            Arc::new(record)
        })
        .collect();
    let out = output::render_records(&global.output, &rows, &[])?;
    output::print_output(&out, global.quiet);
    Ok(())
}
