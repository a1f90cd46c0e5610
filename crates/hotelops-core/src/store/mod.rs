// ── List storage ──
//
// Accumulating record store plus the read-only snapshot screens render.

mod list_state;
mod list_store;

pub use list_state::{ListState, LoadPhase};
pub use list_store::ListStore;
