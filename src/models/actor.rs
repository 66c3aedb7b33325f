use serde::{Deserialize, Serialize};

/// The authenticated caller, as supplied by the upstream identity
/// collaborator. Captured onto bookings at creation time; credentials
/// are never handled here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
}
