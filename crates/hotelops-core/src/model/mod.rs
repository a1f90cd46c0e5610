// ── Domain model ──
//
// Identity plus opaque records. Entity shapes belong to the API.

mod entity_id;
mod record;

pub use entity_id::EntityId;
pub use record::{Hotel, Identified, Record, display_value};

pub use hotelops_api::Resource;
