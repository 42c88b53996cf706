use chrono::Utc;
use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Epoch milliseconds for "now", the timestamp representation every stored
/// document uses.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
