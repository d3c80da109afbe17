//! tpi-core - Test plan item validation
//!
//! This crate parses the markdown body of test plan item issues into a
//! structured, validated record, and holds the configuration shared by the
//! validator action and the CLI.

pub mod config;
pub mod error;
pub mod secrets;
pub mod testplan;

pub use config::{Config, ValidatorConfig};
pub use error::{Error, ParseError, Result};
pub use secrets::Secrets;
pub use testplan::{
    parse_header_range, parse_test_plan_item, rtrim_space_and_eol, IssueRef, ParsedTestPlanItem,
    Platform, PlatformAssignment, TesterRole,
};
