// Security module for local path access control
//
// The upload tools read files from the host. When a root directory is
// configured, every local path they touch must resolve inside it.

pub mod path_validator;

pub use path_validator::{PathSecurityError, resolve_local_path};
