//! `list` handler: mount a list session, scroll, print.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use hotelops_core::{Backoffice, FilterCriteria, ListState, LoadOutcome, Record, Resource};

use crate::cli::{GlobalOpts, ListArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

/// A loaded list plus the failure that stopped it, if any.
pub struct Loaded {
    pub state: Arc<ListState<Record>>,
    pub failure: Option<CliError>,
}

impl Loaded {
    /// Fail outright only when nothing loaded; otherwise keep the records
    /// and report the failure after printing.
    pub fn into_parts(self) -> Result<(Arc<ListState<Record>>, Option<CliError>), CliError> {
        match self.failure {
            Some(err) if self.state.is_empty() && self.state.current_page == 0 => Err(err),
            failure => Ok((self.state, failure)),
        }
    }
}

pub async fn handle(
    backoffice: &Backoffice,
    args: ListArgs,
    default_hotel: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let criteria = util::build_criteria(backoffice, &args.filters, default_hotel).await?;
    let (state, failure) = load(backoffice, args.resource, criteria, args.paging.limit(), global)
        .await
        .into_parts()?;

    let out = output::render_records(&global.output, &state.items, &args.columns)?;
    output::print_output(&out, global.quiet);
    if !global.quiet {
        eprintln!("{}", output::summary(&state, output::should_color(&global.color)));
    }

    failure.map_or(Ok(()), Err)
}

/// Load the first page with `criteria`, then scroll up to `max_pages`
/// (`None` for all). Shows a spinner on interactive terminals.
pub async fn load(
    backoffice: &Backoffice,
    resource: Resource,
    criteria: FilterCriteria,
    max_pages: Option<u32>,
    global: &GlobalOpts,
) -> Loaded {
    let session = backoffice.records(resource);
    let spinner = spinner(global, resource);

    let progress = spinner.clone().map(|bar| {
        let mut stream = session.subscribe();
        tokio::spawn(async move {
            while let Some(state) = stream.changed().await {
                bar.set_message(format!(
                    "{resource}: {} records, page {}",
                    state.len(),
                    state.current_page
                ));
            }
        })
    });

    let mut outcome = session.mount(criteria).await;
    if outcome.is_applied() {
        outcome = session.scroll_through(max_pages).await;
    }

    if let Some(task) = progress {
        task.abort();
    }
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let state = session.view();
    let failure = match outcome {
        LoadOutcome::Failed { message } => Some(CliError::PageFailed {
            page: state.current_page + 1,
            message,
        }),
        _ => None,
    };
    tracing::debug!(%resource, loaded = state.len(), pages = state.current_page, "list loaded");
    Loaded { state, failure }
}

fn spinner(global: &GlobalOpts, resource: Resource) -> Option<ProgressBar> {
    if global.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(format!("loading {resource}"));
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}
