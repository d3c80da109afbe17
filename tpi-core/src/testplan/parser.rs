//! Test plan item parser

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::fields::{parse_authors, parse_complexity, parse_refs, parse_roles};
use super::platform::{find_invalid_assignment, scan_any_platform, scan_platform, Platform};
use super::types::ParsedTestPlanItem;
use crate::ParseError;

/// Accepted complexity values
pub const COMPLEXITY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A line of three or more dashes separating header and description
static HEADER_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\r\n|\n)---+\s*(?:\r\n|\n)").expect("header rule regex should be valid")
});

/// Locate the header: everything before the first horizontal rule line
pub fn parse_header_range(body: &str) -> Result<Range<usize>, ParseError> {
    HEADER_RULE
        .find(body)
        .map(|rule| 0..rule.start())
        .ok_or(ParseError::MissingHeader)
}

/// Parse and validate a test plan item issue body.
///
/// `author` is the issue reporter and always heads the returned authors.
/// Validation stops at the first problem found, checked in this order:
/// missing header, complexity out of range, no assignments, invalid
/// checkbox line.
pub fn parse_test_plan_item(body: &str, author: &str) -> Result<ParsedTestPlanItem, ParseError> {
    let header_range = parse_header_range(body)?;
    let header = &body[header_range.clone()];

    let issue_refs = parse_refs(header);
    let complexity = parse_complexity(header);
    let roles = parse_roles(header);

    let mut authors = vec![author.to_string()];
    for handle in parse_authors(header) {
        if !authors.contains(&handle) {
            authors.push(handle);
        }
    }

    let mut assignments = Vec::new();
    for platform in Platform::ALL {
        scan_platform(header, platform, &mut assignments);
    }
    scan_any_platform(header, &mut assignments);

    if !COMPLEXITY_RANGE.contains(&complexity) {
        return Err(ParseError::ComplexityOutOfRange(complexity));
    }

    if assignments.is_empty() {
        return Err(ParseError::NoAssignments);
    }

    if let Some(line) = find_invalid_assignment(header) {
        return Err(ParseError::InvalidAssignment(line));
    }

    debug!(
        complexity,
        assignments = assignments.len(),
        refs = issue_refs.len(),
        authors = ?authors,
        "Parsed test plan item"
    );

    Ok(ParsedTestPlanItem {
        header_range,
        issue_refs,
        complexity,
        assignments,
        authors,
        roles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testplan::{IssueRef, TesterRole};

    const VALID_ITEM: &str = r#"
Refs: #46696

- [ ] macOS
- [ ] linux
- [ ] windows

Complexity: 4

---

This new API allows extensions to contribute to an environment variable collection that enabled modifying environment variables on a process environment. Currently this is only used in the terminal but the naming is left generic so it could be used by other components.
"#;

    const NO_HEADER_ITEM: &str = r#"
Refs: #46696

- [ ] macOS
- [ ] linux
- [ ] windows

Complexity: 4

This new API allows extensions to contribute to an environment variable collection that enabled modifying environment variables on a process environment.
"#;

    #[test]
    fn test_parse_valid_item() {
        let item = parse_test_plan_item(VALID_ITEM, "alex").unwrap();
        assert_eq!(item.complexity, 4);
        assert_eq!(item.assignments.len(), 3);
        assert_eq!(item.issue_refs, vec![IssueRef::Number(46696)]);
        assert_eq!(item.authors, vec!["alex"]);
        assert_eq!(item.roles, None);
        assert!(!item.is_complete());
    }

    #[test]
    fn test_header_range_stops_before_rule() {
        let item = parse_test_plan_item(VALID_ITEM, "alex").unwrap();
        let header = &VALID_ITEM[item.header_range.clone()];
        assert!(header.ends_with("Complexity: 4\n"));
        assert!(!header.contains("---"));
        assert_eq!(item.header_range.start, 0);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            parse_test_plan_item(NO_HEADER_ITEM, "alex"),
            Err(ParseError::MissingHeader)
        );
        assert_eq!(
            parse_header_range("- [ ] mac\n--\ntext"),
            Err(ParseError::MissingHeader)
        );
    }

    #[test]
    fn test_header_rule_variants() {
        assert_eq!(parse_header_range("a\r\n------  \r\nb"), Ok(0..1));
        assert_eq!(parse_header_range("a\n\n----\n\nb"), Ok(0..2));
    }

    #[test]
    fn test_no_assignments() {
        let body = "Refs: #1\n\nComplexity: 2\n\n---\n\n- [ ] mac below the rule\n";
        assert_eq!(
            parse_test_plan_item(body, "alex"),
            Err(ParseError::NoAssignments)
        );
    }

    #[test]
    fn test_default_complexity() {
        let item = parse_test_plan_item("- [ ] mac\n---\n", "alex").unwrap();
        assert_eq!(item.complexity, 3);
    }

    #[test]
    fn test_complexity_out_of_range_reported_first() {
        let body = "Complexity: 0\n\n---\n";
        assert_eq!(
            parse_test_plan_item(body, "alex"),
            Err(ParseError::ComplexityOutOfRange(0))
        );

        let body = "- [ ] linux\nSize: 8\n---\n";
        assert_eq!(
            parse_test_plan_item(body, "alex"),
            Err(ParseError::ComplexityOutOfRange(8))
        );
    }

    #[test]
    fn test_bold_complexity_field() {
        let body = "**Complexity**: 9\n- [ ] mac\n---\n";
        assert_eq!(
            parse_test_plan_item(body, "alex"),
            Err(ParseError::ComplexityOutOfRange(9))
        );

        let item = parse_test_plan_item("**Size**: 5\n- [ ] mac\n---\n", "alex").unwrap();
        assert_eq!(item.complexity, 5);
    }

    #[test]
    fn test_two_checkboxes_on_one_line() {
        let body = "- [ ] mac @a [ ] mac @b\n- [ ] any [ ] any\n---\n";
        let item = parse_test_plan_item(body, "alex").unwrap();
        let found: Vec<_> = item
            .assignments
            .iter()
            .map(|a| (a.platform, a.user.as_deref()))
            .collect();
        assert_eq!(
            found,
            vec![
                (Platform::Mac, Some("a")),
                (Platform::Mac, Some("b")),
                (Platform::Windows, None),
                (Platform::Linux, None),
            ]
        );
    }

    #[test]
    fn test_invalid_assignment_with_valid_ones() {
        let body = "- [ ] mac\n- [x] solaris\n- [ ] linux\n\n---\n";
        assert_eq!(
            parse_test_plan_item(body, "alex"),
            Err(ParseError::InvalidAssignment("[x] solaris".to_string()))
        );
    }

    #[test]
    fn test_checked_without_user_is_unchecked() {
        let item = parse_test_plan_item("- [x] linux\n---\n", "alex").unwrap();
        assert!(!item.assignments[0].checked);
        assert_eq!(item.assignments[0].user, None);
    }

    #[test]
    fn test_three_any_platform_checkboxes() {
        let body = "- [ ] any\n- [ ] any\n- [ ] any\n---\n";
        let item = parse_test_plan_item(body, "alex").unwrap();
        assert_eq!(item.assignment_count(Platform::Mac), 1);
        assert_eq!(item.assignment_count(Platform::Windows), 1);
        assert_eq!(item.assignment_count(Platform::Linux), 1);
        assert_eq!(item.assignments[0].platform, Platform::Mac);
        assert_eq!(item.assignments[1].platform, Platform::Windows);
        assert_eq!(item.assignments[2].platform, Platform::Linux);
    }

    #[test]
    fn test_full_header() {
        let body = "\
Refs: #10, https://github.com/microsoft/vscode/issues/11
Roles: Developer, Designer
Authors: @alex @sam, @kim
Complexity: 5

- [x] macOS @kim
- [ ] windows @lee
- [ ] iPad

---

Try it out.
";
        let item = parse_test_plan_item(body, "alex").unwrap();
        assert_eq!(
            item.issue_refs,
            vec![
                IssueRef::Number(10),
                IssueRef::Url("https://github.com/microsoft/vscode/issues/11".to_string()),
            ]
        );
        assert_eq!(
            item.roles,
            Some(vec![TesterRole::Developer, TesterRole::Designer])
        );
        assert_eq!(item.authors, vec!["alex", "sam", "kim"]);
        assert_eq!(item.complexity, 5);

        let users: Vec<Option<&str>> = item.assignments.iter().map(|a| a.user.as_deref()).collect();
        assert_eq!(users, vec![Some("kim"), Some("lee"), None]);
        assert!(item.assignments[0].checked);
        assert!(!item.assignments[1].checked);
        assert_eq!(&body[item.assignments[2].range.clone()], "- [ ] iPad");
    }

    #[test]
    fn test_parse_is_repeatable() {
        let first = parse_test_plan_item(VALID_ITEM, "alex").unwrap();
        let second = parse_test_plan_item(VALID_ITEM, "alex").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_to_json() {
        let item = parse_test_plan_item("Refs: #5\n- [ ] web\n---\n", "alex").unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["issue_refs"][0], 5);
        assert_eq!(json["assignments"][0]["platform"], "mac");
        assert_eq!(json["header_range"]["start"], 0);
    }
}
