use uuid::Uuid;

/// All primary keys are UUID v7, so ordering by id follows creation order.
pub type DbId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, time-sortable identifier.
pub fn new_id() -> DbId {
    Uuid::now_v7()
}
