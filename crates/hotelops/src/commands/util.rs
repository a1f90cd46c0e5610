//! Shared helpers for command handlers.

use serde_json::{Map, Value};

use hotelops_core::{Backoffice, CoreError, FilterCriteria};

use crate::cli::FilterArgs;
use crate::error::CliError;

/// Turn filter flags into criteria.
///
/// A hotel given by name is looked up in the cached hotel list; ids pass
/// through untouched. `default_hotel` (from the profile) applies when
/// `--hotel` is absent.
pub async fn build_criteria(
    backoffice: &Backoffice,
    args: &FilterArgs,
    default_hotel: Option<&str>,
) -> Result<FilterCriteria, CliError> {
    let mut criteria = FilterCriteria::new()
        .date_range(args.from, args.to)
        .map_err(CoreError::from)?;

    if let Some(hotel) = args.hotel.as_deref().or(default_hotel) {
        criteria = criteria.hotel_id(resolve_hotel_id(backoffice, hotel).await?);
    }
    if let Some(ref id) = args.employee {
        criteria = criteria.employee_id(id.as_str());
    }
    if let Some(ref id) = args.material {
        criteria = criteria.material_id(id.as_str());
    }
    if let Some(ref id) = args.platform {
        criteria = criteria.platform_id(id.as_str());
    }
    if let Some(ref mode) = args.mode {
        criteria = criteria.mode(mode.as_str());
    }
    if let Some(ref text) = args.search {
        criteria = criteria.search(text.as_str());
    }
    Ok(criteria)
}

async fn resolve_hotel_id(backoffice: &Backoffice, hotel: &str) -> Result<String, CliError> {
    let hotel = hotel.trim();
    if hotel.chars().all(|c| c.is_ascii_digit()) {
        return Ok(hotel.to_owned());
    }
    let found = backoffice.resolve_hotel(hotel).await?;
    tracing::debug!(name = %hotel, id = %found.id, "resolved hotel by name");
    Ok(found.id.to_string())
}

/// Parse a `--data` argument: inline JSON, or `@path` to read a file.
pub fn parse_fields(data: &str) -> Result<Map<String, Value>, CliError> {
    let raw = match data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => data.to_owned(),
    };
    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(fields) => Ok(fields),
        other => Err(CliError::Validation {
            field: "data".into(),
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
