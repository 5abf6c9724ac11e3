use uuid::Uuid;

/// Prefix marking an id that was assigned locally and has not been
/// confirmed by the remote store. Reconciliation uses it to find
/// never-synced entities.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Generate an opaque unique id with a domain prefix, e.g. `gear-9f2c41d8a0b7`.
pub fn uid(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &raw[..12])
}

/// Like [`uid`], but reserved-prefixed to mark the entity as not yet
/// known to the remote store.
pub fn local_uid(prefix: &str) -> String {
    format!("{}{}", LOCAL_ID_PREFIX, uid(prefix))
}

/// Whether an id was assigned offline (never confirmed by the remote).
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

/// An identifier for a running client instance: startup time plus a random
/// suffix, stable for the lifetime of the process. Used to tell our own
/// change notifications apart from other instances'.
pub fn origin_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), &raw[..8])
}
