use redis::Script;
use std::sync::LazyLock;

pub const ENTITY_INSERT_SCRIPT_BODY: &str = include_str!("../../lua/entity_insert.lua");
pub const ENTITY_UPDATE_SCRIPT_BODY: &str = include_str!("../../lua/entity_update.lua");
pub const ENTITY_DELETE_SCRIPT_BODY: &str = include_str!("../../lua/entity_delete.lua");
pub const TOGGLE_MEMBERSHIP_SCRIPT_BODY: &str = include_str!("../../lua/toggle_membership.lua");

pub static ENTITY_INSERT_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(ENTITY_INSERT_SCRIPT_BODY));
pub static ENTITY_UPDATE_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(ENTITY_UPDATE_SCRIPT_BODY));
pub static ENTITY_DELETE_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(ENTITY_DELETE_SCRIPT_BODY));
pub static TOGGLE_MEMBERSHIP_SCRIPT: LazyLock<Script> = LazyLock::new(|| Script::new(TOGGLE_MEMBERSHIP_SCRIPT_BODY));
