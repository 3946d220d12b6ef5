use uuid::Uuid;

/// Source of fresh unique identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

/// Hyphenated random (v4) UUIDs.
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
