//! Single-record handlers: get, create, update, delete.

use hotelops_core::{Backoffice, EntityId};

use crate::cli::{CreateArgs, GetArgs, GlobalOpts, UpdateArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

pub async fn get(backoffice: &Backoffice, args: GetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let id: EntityId = args.id.as_str().into();
    let record = backoffice.get_record(args.resource, &id).await?;
    let out = output::render_record(&global.output, &record)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn create(
    backoffice: &Backoffice,
    args: CreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let fields = util::parse_fields(&args.data)?;
    let record = backoffice.create_record(args.resource, &fields).await?;
    if !global.quiet {
        eprintln!("✓ Created {} {}", args.resource, record.id);
    }
    let out = output::render_record(&global.output, &record)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn update(
    backoffice: &Backoffice,
    args: UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let fields = util::parse_fields(&args.data)?;
    if fields.is_empty() {
        return Err(CliError::Validation {
            field: "data".into(),
            reason: "no fields to update".into(),
        });
    }
    let id: EntityId = args.id.as_str().into();
    let record = backoffice.update_record(args.resource, &id, &fields).await?;
    if !global.quiet {
        eprintln!("✓ Updated {} {id}", args.resource);
    }
    let out = output::render_record(&global.output, &record)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn delete(
    backoffice: &Backoffice,
    args: GetArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id: EntityId = args.id.as_str().into();
    let prompt = format!("Delete {} {id}?", args.resource);
    if !util::confirm(&prompt, global.yes)? {
        return Ok(());
    }
    backoffice.delete_record(args.resource, &id).await?;
    if !global.quiet {
        eprintln!("✓ Deleted {} {id}", args.resource);
    }
    Ok(())
}
