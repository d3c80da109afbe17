//! Test plan item parsing
//!
//! A test plan item is an issue whose body starts with a metadata header
//! (refs, complexity, roles, authors and one checkbox per platform to test
//! on), separated from the free-form description by a horizontal rule.

mod fields;
mod parser;
mod platform;
mod text;
mod types;

pub use fields::DEFAULT_COMPLEXITY;
pub use parser::{parse_header_range, parse_test_plan_item, COMPLEXITY_RANGE};
pub use platform::Platform;
pub use text::rtrim_space_and_eol;
pub use types::{IssueRef, ParsedTestPlanItem, PlatformAssignment, TesterRole};
