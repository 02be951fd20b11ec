//! sitecmd Core Library
//!
//! Pure building blocks of the command framework: command metadata
//! inference, CLI values and coercion, parameter binding and tenant
//! resolution. Host collaborators live in `sitecmd-host`; the command
//! runtime lives in `sitecmd`.

pub mod binding;
pub mod error;
pub mod input;
pub mod metadata;
pub mod paths;
pub mod tenants;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use binding::{bind, normalize_name, ParamKind, ParameterSpec, ResolvedArguments};
pub use error::*;
pub use input::{CliInput, StaticInput};
pub use metadata::{compose_name, CommandDescriptor, DocStyle, TypeInfo};
pub use paths::{default_config_path, default_registry_path, REGISTRY_FILE_NAME};
pub use tenants::{TenantContext, TenantDirectory, TenantResolver};
pub use types::*;
pub use value::{PrimitiveType, Value};
