use crate::normalize::{normalize_for_compare, strip_drive_prefix, strip_trailing_slash};

/// Which rule decided a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equivalence {
    /// Same final segment, and it contains a `.`.
    SameFileName,
    /// Same directory leaf and one cleaned path contains the other.
    Nested,
    /// Same directory leaf and both paths share at least one segment.
    SharedSegment,
    /// Normalized or cleaned forms are identical.
    Exact,
    Distinct,
}

impl Equivalence {
    #[must_use]
    pub fn classify(a: &str, b: &str) -> Self {
        let norm_a = normalize_for_compare(a);
        let norm_b = normalize_for_compare(b);

        let clean_a = strip_trailing_slash(strip_drive_prefix(&norm_a));
        let clean_b = strip_trailing_slash(strip_drive_prefix(&norm_b));

        let file_a = last_segment(&norm_a);
        let file_b = last_segment(&norm_b);
        if file_a == file_b && file_a.contains('.') {
            return Self::SameFileName;
        }

        let parts_a = segments(clean_a);
        let parts_b = segments(clean_b);
        let leaf_a = parts_a.last().copied().unwrap_or("");
        let leaf_b = parts_b.last().copied().unwrap_or("");

        if leaf_a == leaf_b && !leaf_a.is_empty() && !leaf_a.contains('.') {
            if clean_a.contains(clean_b) || clean_b.contains(clean_a) {
                return Self::Nested;
            }
            if parts_a.len() > 1
                && parts_b.len() > 1
                && parts_a.iter().any(|part| parts_b.contains(part))
            {
                return Self::SharedSegment;
            }
        }

        if norm_a == norm_b || clean_a == clean_b {
            return Self::Exact;
        }
        Self::Distinct
    }

    #[must_use]
    pub const fn is_match(self) -> bool {
        !matches!(self, Self::Distinct)
    }
}

/// Heuristic "same tagged entry" test. See the crate docs for the rules and
/// their false positives.
#[must_use]
pub fn paths_equivalent(a: &str, b: &str) -> bool {
    let verdict = Equivalence::classify(a, b);
    log::debug!("path compare {a:?} vs {b:?}: {verdict:?}");
    verdict.is_match()
}

/// True when `target` lies strictly below `candidate_parent`.
///
/// Only separator direction and case are folded here; repeated separators
/// and drive prefixes must already agree.
#[must_use]
pub fn is_descendant(candidate_parent: &str, target: &str) -> bool {
    let parent = candidate_parent.replace('\\', "/").to_lowercase();
    let target = target.replace('\\', "/").to_lowercase();
    target
        .strip_prefix(parent.as_str())
        .is_some_and(|rest| rest.starts_with('/'))
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_file_name_ignores_directories() {
        assert!(paths_equivalent(r"C:\Users\bob\doc.txt", "/users/bob/doc.txt"));
        assert_eq!(
            Equivalence::classify("/a/x/notes.md", "/b/y/NOTES.md"),
            Equivalence::SameFileName
        );
    }

    #[test]
    fn different_file_names_are_distinct() {
        assert!(!paths_equivalent("a/b/report.csv", "a/b/report.txt"));
    }

    #[test]
    fn directory_leaf_with_nesting() {
        assert_eq!(
            Equivalence::classify(r"C:\data\logs", "/var/data/logs"),
            Equivalence::Nested
        );
    }

    #[test]
    fn directory_leaf_with_shared_segment() {
        assert_eq!(
            Equivalence::classify("/home/u/work/logs", "/srv/work/old/logs"),
            Equivalence::SharedSegment
        );
    }

    #[test]
    fn relative_fragment_nests_into_absolute_path() {
        assert_eq!(
            Equivalence::classify("logs", "/var/x/logs"),
            Equivalence::Nested
        );
        assert_eq!(
            Equivalence::classify("x/logs/", "/var/x/logs"),
            Equivalence::Nested
        );
    }

    #[test]
    fn shared_leaf_alone_counts_as_shared_segment() {
        assert_eq!(
            Equivalence::classify("/alpha/logs", "/beta/gamma/logs"),
            Equivalence::SharedSegment
        );
    }

    #[test]
    fn unrelated_directories_with_common_leaf_are_reported_equivalent() {
        // Known false positive: both end in "cache".
        assert!(paths_equivalent("/home/a/cache", "/opt/b/cache"));
    }

    #[test]
    fn trailing_separator_and_drive_letter_are_ignored() {
        assert!(paths_equivalent("C:/Projects/", "c:\\projects"));
        assert!(paths_equivalent("D:\\Music\\", "/music"));
    }

    #[test]
    fn different_leaf_directories_are_distinct() {
        assert!(!paths_equivalent("/home/u/src", "/home/u/docs"));
        assert!(!paths_equivalent("/home/u/src", "/home/u/src/lib"));
    }

    #[test]
    fn dotted_directory_leaf_falls_through_to_exact() {
        assert!(paths_equivalent("/srv/site.d/", "/srv/site.d"));
        assert!(!paths_equivalent("/srv/site.d/conf", "/srv/site.d"));
    }

    #[test]
    fn empty_paths_match_each_other_only() {
        assert!(paths_equivalent("", ""));
        assert!(paths_equivalent("/", ""));
        assert!(!paths_equivalent("", "/tmp"));
    }

    #[test]
    fn descendant_requires_separator_boundary() {
        assert!(is_descendant("/home/u/project", "/home/u/project/src/file.ts"));
        assert!(is_descendant(r"C:\Work", "c:/work/a"));
        assert!(!is_descendant("/home/u/project", "/home/u/project2/file.ts"));
        assert!(!is_descendant("/home/u/project", "/home/u/project"));
    }

    #[test]
    fn descendant_does_not_collapse_repeated_separators() {
        assert!(!is_descendant("/home//u", "/home/u/file"));
    }
}
