//! Metadata fields read from the header

use std::sync::LazyLock;

use regex::Regex;

use super::types::{IssueRef, TesterRole};

/// Complexity used when the header has no `Complexity:`/`Size:` field
pub const DEFAULT_COMPLEXITY: u8 = 3;

/// `Refs: #1, https://github.com/o/r/issues/2` at the start of a line
static REFS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:[-*+][ \t]+)?\**refs?\b\**[ \t]*[:-]?[ \t]*\**[ \t]*(.*)")
        .expect("refs regex should be valid")
});

static ISSUE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https://github\.com/[^/\s]+/[^/\s]+/issues/[0-9]+")
        .expect("issue url regex should be valid")
});

static COMPLEXITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\**(complexity|size)\**\s*[:-]?\s*\**\s*([0-9])")
        .expect("complexity regex should be valid")
});

/// `Roles:` line; HTML comments right after the separator are skipped
static ROLES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:[-*+][ \t]+)?\**roles?\b\**[ \t]*[:-]?[ \t]*\**[ \t]*(?:<!--.*?-->[ \t]*)*(.*)",
    )
    .expect("roles regex should be valid")
});

static AUTHORS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:[-*+][ \t]+)?\**authors?\b\**[ \t]*[:-]?[ \t]*\**[ \t]*(?:<!--.*?-->[ \t]*)*(.*)",
    )
    .expect("authors regex should be valid")
});

/// Issue references from the first `Refs:` line, in the order written.
///
/// Pieces that are neither `#<n>` nor a GitHub issue URL are dropped.
pub(crate) fn parse_refs(header: &str) -> Vec<IssueRef> {
    let Some(list) = REFS_PATTERN.captures(header).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    list.as_str()
        .split(',')
        .filter_map(|piece| parse_issue_ref(piece.trim()))
        .collect()
}

fn parse_issue_ref(piece: &str) -> Option<IssueRef> {
    if let Some(number) = piece.strip_prefix('#') {
        let digits: String = number.chars().take_while(|c| c.is_ascii_digit()).collect();
        return digits.parse().ok().map(IssueRef::Number);
    }

    ISSUE_URL_PATTERN
        .find(piece)
        .map(|url| IssueRef::Url(url.as_str().to_string()))
}

/// First complexity digit in the header, unvalidated
pub(crate) fn parse_complexity(header: &str) -> u8 {
    COMPLEXITY_PATTERN
        .captures(header)
        .and_then(|caps| caps.get(2))
        .and_then(|digit| digit.as_str().parse().ok())
        .unwrap_or(DEFAULT_COMPLEXITY)
}

/// Recognized roles, or `None` if the field is missing or names no known role
pub(crate) fn parse_roles(header: &str) -> Option<Vec<TesterRole>> {
    let list = ROLES_PATTERN.captures(header)?.get(1)?;

    let mut roles = Vec::new();
    for name in list.as_str().split(',') {
        if let Some(role) = TesterRole::from_name(name.trim()) {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
    }

    (!roles.is_empty()).then_some(roles)
}

/// Handles from the `Authors:` line with any leading `@` removed
pub(crate) fn parse_authors(header: &str) -> Vec<String> {
    let Some(list) = AUTHORS_PATTERN.captures(header).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    list.as_str()
        .split(',')
        .flat_map(str::split_whitespace)
        .map(|token| token.strip_prefix('@').unwrap_or(token))
        .filter(|handle| !handle.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refs_in_order() {
        assert_eq!(
            parse_refs("Refs: #123, #456\n"),
            vec![IssueRef::Number(123), IssueRef::Number(456)]
        );
    }

    #[test]
    fn test_refs_with_urls() {
        let header = "**Refs**: #1, https://github.com/microsoft/vscode/issues/200, see above\n";
        assert_eq!(
            parse_refs(header),
            vec![
                IssueRef::Number(1),
                IssueRef::Url("https://github.com/microsoft/vscode/issues/200".to_string()),
            ]
        );
    }

    #[test]
    fn test_refs_single_line_only() {
        assert!(parse_refs("Ref:\n#12\n").is_empty());
        assert_eq!(parse_refs("ref - #7\r\n"), vec![IssueRef::Number(7)]);
    }

    #[test]
    fn test_refs_absent() {
        assert!(parse_refs("- [ ] mac\n").is_empty());
        assert!(parse_refs("References to the old design\n").is_empty());
    }

    #[test]
    fn test_complexity() {
        assert_eq!(parse_complexity("Complexity: 4"), 4);
        assert_eq!(parse_complexity("**Size**: 2"), 2);
        assert_eq!(parse_complexity("complexity - 9"), 9);
        assert_eq!(parse_complexity("**Complexity**: 5"), 5);
        assert_eq!(parse_complexity("**Complexity:** 1"), 1);
        assert_eq!(parse_complexity("- [ ] mac"), DEFAULT_COMPLEXITY);
    }

    #[test]
    fn test_roles() {
        assert_eq!(
            parse_roles("Roles: Developer, program manager, tester, developer\n"),
            Some(vec![TesterRole::Developer, TesterRole::ProgramManager])
        );
        assert_eq!(
            parse_roles("Role: <!-- Designer, Developer --> Designer\n"),
            Some(vec![TesterRole::Designer])
        );
    }

    #[test]
    fn test_roles_absent_or_empty() {
        assert_eq!(parse_roles("- [ ] mac\n"), None);
        assert_eq!(parse_roles("Roles: <!-- pick some -->\n"), None);
        assert_eq!(parse_roles("Roles: QA\n"), None);
    }

    #[test]
    fn test_authors() {
        assert_eq!(
            parse_authors("Authors: @bob @carol, dave,  @erin\n"),
            vec!["bob", "carol", "dave", "erin"]
        );
        assert!(parse_authors("Author:\n- [ ] mac\n").is_empty());
    }
}
