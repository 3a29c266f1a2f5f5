// file: src/logging/mod.rs
// version: 2.0.0
// guid: i9j0k1l2-m3n4-5678-9012-345678ijklmn

//! Named loggers, the registry that configures them, and the `tracing` bridge

pub mod layer;
pub mod logger;
pub mod registry;

pub use layer::LoggerLayer;
pub use logger::{Logger, ROOT_NAME};
pub use registry::{default_project_root, get_logger, root_logger, Registry};
