use uuid::Uuid;

/// The authenticated caller. Every board read and write is scoped to `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: Uuid,
    pub username: String,
}
