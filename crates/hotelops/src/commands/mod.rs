//! Command dispatch: bridges CLI args -> back-office calls -> output formatting.

pub mod config_cmd;
pub mod export;
pub mod hotels;
pub mod list;
pub mod records;
pub mod util;

use hotelops_core::Backoffice;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    backoffice: &Backoffice,
    default_hotel: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => list::handle(backoffice, args, default_hotel, global).await,
        Command::Get(args) => records::get(backoffice, args, global).await,
        Command::Create(args) => records::create(backoffice, args, global).await,
        Command::Update(args) => records::update(backoffice, args, global).await,
        Command::Delete(args) => records::delete(backoffice, args, global).await,
        Command::Export(args) => export::handle(backoffice, args, default_hotel, global).await,
        Command::Hotels => hotels::handle(backoffice, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
