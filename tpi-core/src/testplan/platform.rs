//! Platform checkbox recognition
//!
//! Each checkbox target (the four named platforms plus "any platform") owns
//! exactly one group of accepted terms. The per-target scanners and the
//! invalid-checkbox detector are all compiled from that single table, so a
//! line accepted by a scanner can never be reported as invalid.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::text::{line_end, line_start, rtrim_space_and_eol};
use super::types::PlatformAssignment;

/// Platforms a test plan item can be assigned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Windows,
    Linux,
    IPad,
}

impl Platform {
    /// Scan order for platform-specific checkboxes
    pub const ALL: [Platform; 4] = [
        Platform::Mac,
        Platform::Windows,
        Platform::Linux,
        Platform::IPad,
    ];

    /// Platforms that absorb "any platform" checkboxes, in tie-break order
    pub const BALANCED: [Platform; 3] = [Platform::Mac, Platform::Windows, Platform::Linux];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Mac => "macOS",
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::IPad => "iPad",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a checkbox line can name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Platform(Platform),
    Any,
}

impl Target {
    const ALL: [Target; 5] = [
        Target::Platform(Platform::Mac),
        Target::Platform(Platform::Windows),
        Target::Platform(Platform::Linux),
        Target::Platform(Platform::IPad),
        Target::Any,
    ];

    /// Regex alternation of the terms accepted for this target
    fn terms(self) -> &'static str {
        match self {
            Target::Platform(Platform::Mac) => r"mac(?:os)?",
            Target::Platform(Platform::Windows) => r"win(?:dows)?|wsl",
            Target::Platform(Platform::Linux) => r"linux",
            Target::Platform(Platform::IPad) => r"ipad(?:os)?|ios",
            Target::Any => r"any\s*(?:os)?|ssh|dev\s?container|web",
        }
    }

    fn index(self) -> usize {
        match self {
            Target::Platform(Platform::Mac) => 0,
            Target::Platform(Platform::Windows) => 1,
            Target::Platform(Platform::Linux) => 2,
            Target::Platform(Platform::IPad) => 3,
            Target::Any => 4,
        }
    }
}

/// One checkbox pattern per target, indexed by `Target::index`
static ASSIGNMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    Target::ALL
        .iter()
        .map(|target| {
            let pattern = format!(r"(?i)\[([\sx])\]\s+(?:{})\s*:?\s*", target.terms());
            Regex::new(&pattern).expect("assignment regex should be valid")
        })
        .collect()
});

/// Any checkbox followed by whitespace
static CHECKBOX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[[\sx]\]\s+").expect("checkbox regex should be valid"));

/// Anchored alternation of every accepted term
static KNOWN_TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let terms: Vec<&str> = Target::ALL.iter().map(|target| target.terms()).collect();
    Regex::new(&format!(r"(?i)\A(?:{})", terms.join("|"))).expect("term regex should be valid")
});

/// `@handle` directly after a checkbox prefix
static USER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([^\s*]+)\s*").expect("user regex should be valid"));

/// A checkbox match located in the header
#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckboxMatch {
    start: usize,
    end: usize,
    marked: bool,
    /// `@handle` following the match, and the span it consumed
    user: Option<(String, Range<usize>)>,
}

impl CheckboxMatch {
    /// End of the match once trailing whitespace and line endings are removed
    fn trimmed_end(&self, header: &str) -> usize {
        self.start + rtrim_space_and_eol(&header[self.start..self.end]).len()
    }

    /// Where the next search starts: after the user if one was attached
    fn resume_at(&self) -> usize {
        self.user.as_ref().map_or(self.end, |(_, span)| span.end)
    }
}

/// Successive matches of one target's pattern. Each search starts where the
/// previous match (including its user) ended, so several checkboxes may share
/// a line.
struct CheckboxScan<'h> {
    header: &'h str,
    regex: &'static Regex,
    cursor: Option<usize>,
}

impl<'h> CheckboxScan<'h> {
    fn new(header: &'h str, target: Target) -> Self {
        Self {
            header,
            regex: &ASSIGNMENT_PATTERNS[target.index()],
            cursor: Some(0),
        }
    }
}

impl Iterator for CheckboxScan<'_> {
    type Item = CheckboxMatch;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.cursor.take()?;
        let caps = self.regex.captures_at(self.header, from)?;
        let whole = caps.get(0)?;
        let end = whole.end();
        let user = USER_PATTERN.captures(&self.header[end..]).and_then(|user| {
            let consumed = user.get(0)?.end();
            Some((user.get(1)?.as_str().to_string(), end..end + consumed))
        });
        let found = CheckboxMatch {
            start: whole.start(),
            end,
            marked: caps
                .get(1)
                .is_some_and(|marker| marker.as_str().eq_ignore_ascii_case("x")),
            user,
        };
        self.cursor = Some(found.resume_at());
        Some(found)
    }
}

/// Build the assignment for a checkbox match
fn build_assignment(header: &str, found: CheckboxMatch, platform: Platform) -> PlatformAssignment {
    let trimmed_end = found.trimmed_end(header);
    let (user, user_range) = match found.user {
        Some((user, span)) => (Some(user), span),
        None => (None, trimmed_end..trimmed_end),
    };

    PlatformAssignment {
        platform,
        checked: found.marked && user.is_some(),
        user,
        user_range,
        range: line_start(header, trimmed_end)..line_end(header, trimmed_end),
    }
}

/// Collect every checkbox naming `platform`
pub(crate) fn scan_platform(
    header: &str,
    platform: Platform,
    assignments: &mut Vec<PlatformAssignment>,
) {
    for found in CheckboxScan::new(header, Target::Platform(platform)) {
        assignments.push(build_assignment(header, found, platform));
    }
}

/// Collect "any platform" checkboxes, each going to the balanced platform
/// with the fewest assignments at that moment
pub(crate) fn scan_any_platform(header: &str, assignments: &mut Vec<PlatformAssignment>) {
    for found in CheckboxScan::new(header, Target::Any) {
        let platform = least_assigned(assignments);
        assignments.push(build_assignment(header, found, platform));
    }
}

fn least_assigned(assignments: &[PlatformAssignment]) -> Platform {
    Platform::BALANCED
        .into_iter()
        .min_by_key(|platform| assignments.iter().filter(|a| a.platform == *platform).count())
        .unwrap_or(Platform::Mac)
}

/// First line starting at a checkbox that names no known term
pub(crate) fn find_invalid_assignment(header: &str) -> Option<String> {
    CHECKBOX_PATTERN
        .find_iter(header)
        .find(|checkbox| !KNOWN_TERM_PATTERN.is_match(&header[checkbox.end()..]))
        .map(|checkbox| {
            let line = header[checkbox.start()..].split('\n').next().unwrap_or_default();
            line.trim_end_matches('\r').to_string()
        })
}
