//! CLI command implementations

pub mod parse;
pub mod validate;

pub use parse::ParseArgs;
pub use validate::ValidateArgs;
