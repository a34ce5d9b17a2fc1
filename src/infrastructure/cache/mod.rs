mod entity_store;

pub use entity_store::EntityStore;
