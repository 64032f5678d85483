use crate::id::EntityId;

/// Key-construction helpers shared by the Redis store and its scripts.
#[derive(Debug, Clone)]
pub struct KeyContext<'a> {
    pub prefix: &'a str,
    pub service: &'a str,
}

impl<'a> KeyContext<'a> {
    pub fn new(prefix: &'a str, service: &'a str) -> Self {
        Self { prefix, service }
    }

    pub fn entity(&self, collection: &str, entity_id: EntityId) -> String {
        format!("{}:{}:{}:{}", self.prefix, self.service, collection, entity_id)
    }

    /// Entity key without the id; scripts append `:{id}` once the sequence is bumped.
    pub fn entity_prefix(&self, collection: &str) -> String {
        format!("{}:{}:{}", self.prefix, self.service, collection)
    }

    pub fn sequence(&self, collection: &str) -> String {
        format!("{}:{}:{}:seq", self.prefix, self.service, collection)
    }

    /// Sorted set of every id in a collection, scored by id.
    pub fn index(&self, collection: &str) -> String {
        format!("{}:{}:{}:index", self.prefix, self.service, collection)
    }

    /// Set (or list) of related ids hanging off `left_id`.
    pub fn relation(&self, alias: &str, left_id: EntityId) -> String {
        format!("{}:{}:rel:{}:{}", self.prefix, self.service, alias, left_id)
    }

    /// Claim keys for `field` share this prefix; `entity_update.lua` rebuilds
    /// them from it.
    pub fn unique_prefix(&self, collection: &str, field: &str) -> String {
        format!("{}:{}:{}:unique:{}", self.prefix, self.service, collection, field)
    }

    /// Claim key for a unique field. ASCII letters fold to lowercase, the same
    /// folding Lua's `string.lower` applies.
    pub fn unique(&self, collection: &str, field: &str, value: &str) -> String {
        format!("{}:{}", self.unique_prefix(collection, field), value.to_ascii_lowercase())
    }

    /// List of message ids exchanged between two users, independent of direction.
    pub fn conversation(&self, user_x: EntityId, user_y: EntityId) -> String {
        let (low, high) = if user_x <= user_y { (user_x, user_y) } else { (user_y, user_x) };
        format!("{}:{}:conversation:{}:{}", self.prefix, self.service, low, high)
    }

    /// Glob pattern matching every key of this service.
    pub fn service_pattern(&self) -> String {
        format!("{}:{}:*", self.prefix, self.service)
    }
}
