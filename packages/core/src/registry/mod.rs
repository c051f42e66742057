pub mod composed;
pub mod manager;

pub use composed::ComposedBackend;
pub use manager::{AtomicManager, BackendManager, ComposeTask};
