//! `export` handler: load a filtered list and render it as HTML.

use hotelops_core::{Backoffice, Column, HtmlReport, Resource};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::commands::{list, util};
use crate::error::CliError;

pub async fn handle(
    backoffice: &Backoffice,
    args: ExportArgs,
    default_hotel: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let criteria = util::build_criteria(backoffice, &args.filters, default_hotel).await?;
    let report = build_report(args.resource, args.title.as_deref(), &args.columns).with_filters(&criteria);

    // Reports print the whole list unless told otherwise.
    let max_pages = if args.paging.pages.is_some() {
        args.paging.limit()
    } else {
        None
    };
    let (state, failure) = list::load(backoffice, args.resource, criteria, max_pages, global)
        .await
        .into_parts()?;
    if let Some(err) = failure {
        return Err(err);
    }

    let html = report.render(&state);
    match args.out {
        Some(path) => {
            std::fs::write(&path, html)?;
            if !global.quiet {
                eprintln!("✓ Wrote {} records to {}", state.len(), path.display());
            }
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn build_report(resource: Resource, title: Option<&str>, columns: &[String]) -> HtmlReport {
    let title = title.map_or_else(|| default_title(resource), ToOwned::to_owned);
    HtmlReport::new(title).columns(columns.iter().map(|c| Column::from_key(c)))
}

/// `advance-report` → `Advance Report`.
fn default_title(resource: Resource) -> String {
    Column::from_key(&resource.to_string().replace('-', "_")).label
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn title_defaults_to_resource_name() {
        assert_eq!(default_title(Resource::PaymentReport), "Payment Report");
    }

    #[test]
    fn explicit_columns_are_kept_in_order() {
        let report = build_report(
            Resource::Expenses,
            Some("March"),
            &["date".into(), "amount".into()],
        );
        assert_eq!(report.column_keys().collect::<Vec<_>>(), vec!["date", "amount"]);
    }
}
