//! Report rendering
//!
//! Pure text assembly: no network or disk I/O happens here, so the
//! renderer is testable without mocking any transport. The generation
//! timestamp is injected by the caller; identical inputs reproduce the
//! report byte-for-byte.

use crate::domain::{classify, next_version_or_placeholder, CandidateStatus, ChangeRecord};
use crate::error::ReportError;
use crate::plan::UpdatePlan;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;

/// Default output filename for dry-run reports
pub const DRY_RUN_REPORT_FILE: &str = "dry-run-report.md";

/// Default output filename for full dependency reports
pub const DEFAULT_REPORT_FILE: &str = "dependency-report.md";

/// Which report variant to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Flat list of would-be updates plus the release recommendation
    DryRun,
    /// Full dependency table, recent activity and recommendations
    Full,
}

/// Render a report from fully resolved inputs.
///
/// `changes` may contain unmerged records; they are excluded from both
/// the activity list and the release recommendation. The recommendation
/// section appears only when at least one merged change exists.
pub fn render(
    kind: ReportKind,
    repo: &str,
    plan: &UpdatePlan,
    changes: &[ChangeRecord],
    current_tag: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let merged: Vec<&ChangeRecord> = changes.iter().filter(|c| c.is_merged()).collect();
    match kind {
        ReportKind::DryRun => render_dry_run(repo, plan, &merged, current_tag, generated_at),
        ReportKind::Full => render_full(repo, plan, &merged, current_tag, generated_at),
    }
}

/// Write a rendered report to disk
pub fn write_report(path: &Path, content: &str) -> Result<(), ReportError> {
    std::fs::write(path, content).map_err(|e| ReportError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn timestamp(generated_at: DateTime<Utc>) -> String {
    generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn change_line(change: &ChangeRecord) -> String {
    if change.labels.is_empty() {
        format!("{} (No labels)", change)
    } else {
        change.to_string()
    }
}

fn render_dry_run(
    repo: &str,
    plan: &UpdatePlan,
    merged: &[&ChangeRecord],
    current_tag: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "# Dry-Run Report\n\n**Repository:** {}\n**Generated On:** {}\n\n",
        repo,
        timestamp(generated_at)
    );

    if !plan.has_updates() {
        out.push_str("✅ All dependencies are already up to date!\n");
    } else {
        out.push_str("### Dependencies that would be updated:\n\n");
        for candidate in plan.updates() {
            let latest = candidate.latest.as_deref().unwrap_or_default();
            let _ = writeln!(
                out,
                "- `{}`: **{} → {}**",
                candidate.name, candidate.current, latest
            );
        }
    }

    if !merged.is_empty() {
        out.push_str("\n### Merged PRs since the latest release:\n\n");
        for change in merged {
            let _ = writeln!(out, "{}", change_line(change));
        }

        let owned: Vec<ChangeRecord> = merged.iter().map(|c| (*c).clone()).collect();
        let kind = classify(&owned);
        let _ = write!(out, "\n### Decision on new release: {}\n", kind);
        let _ = writeln!(
            out,
            "Next possible version: {}",
            next_version_or_placeholder(current_tag, kind)
        );
    }

    out
}

fn render_full(
    repo: &str,
    plan: &UpdatePlan,
    merged: &[&ChangeRecord],
    current_tag: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "# Dependency Report\n\n**Repository:** {}\n**Generated On:** {}\n**Current Version:** {}\n\n",
        repo,
        timestamp(generated_at),
        current_tag
    );

    // Dependency Status
    out.push_str("## Dependency Status\n\n");
    out.push_str("| Module | Current Version | Latest Version | Status |\n");
    out.push_str("|--------|----------------|----------------|--------|\n");

    for candidate in &plan.candidates {
        let (latest, status) = match &candidate.status {
            CandidateStatus::UpToDate => (
                candidate.latest.as_deref().unwrap_or_default().to_string(),
                "✅ Up to date".to_string(),
            ),
            CandidateStatus::UpdateAvailable => (
                candidate.latest.as_deref().unwrap_or_default().to_string(),
                "🔄 Update available".to_string(),
            ),
            CandidateStatus::Unresolved(_) => ("Error".to_string(), "❌ Error".to_string()),
            CandidateStatus::NotTracked => ("-".to_string(), "⏭ Not tracked".to_string()),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            candidate.name, candidate.current, latest, status
        );
    }

    let _ = write!(
        out,
        "\n**Summary:** {} out of {} dependencies have updates available.\n\n",
        plan.update_count(),
        plan.len()
    );

    // Recent Activity
    out.push_str("## Recent Activity\n\n");
    if !merged.is_empty() {
        out.push_str("### Merged PRs since the latest release:\n\n");
        for change in merged {
            let _ = writeln!(out, "- {}", change_line(change));
        }

        let owned: Vec<ChangeRecord> = merged.iter().map(|c| (*c).clone()).collect();
        let kind = classify(&owned);
        out.push_str("\n### Release Analysis\n");
        let _ = writeln!(out, "- **Recommended release type:** {}", kind);
        let _ = writeln!(
            out,
            "- **Next version:** {}",
            next_version_or_placeholder(current_tag, kind)
        );
    } else {
        out.push_str("No merged PRs found since the latest release.\n");
    }

    // Recommendations
    out.push_str("\n## Recommendations\n\n");
    if plan.has_updates() {
        out.push_str(
            "1. **Update Dependencies:** Consider updating the outdated dependencies to their latest versions.\n",
        );
        out.push_str("2. **Run Tests:** After updating dependencies, ensure all tests pass.\n");
        out.push_str(
            "3. **Review Changes:** Check for any breaking changes in the updated dependencies.\n",
        );
    } else {
        out.push_str("✅ All dependencies are up to date. No immediate action required.\n");
    }

    if !merged.is_empty() {
        out.push_str(
            "4. **Consider Release:** Based on the merged PRs, consider creating a new release.\n",
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpdateCandidate;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 10, 14, 30, 0).unwrap()
    }

    fn merge_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap()
    }

    fn sample_plan() -> UpdatePlan {
        UpdatePlan {
            candidates: vec![
                UpdateCandidate::update_available("github.com/acme/gadget", "v0.3.0", "v0.4.0"),
                UpdateCandidate::unresolved("github.com/acme/glitchy", "v1.0.0", "timeout"),
                UpdateCandidate::not_tracked("github.com/acme/other", "v2.0.0"),
                UpdateCandidate::up_to_date("github.com/acme/widget", "v1.1.0", "v1.1.0"),
            ],
        }
    }

    fn sample_changes() -> Vec<ChangeRecord> {
        vec![
            ChangeRecord::merged(
                12,
                "fix typo",
                "octocat",
                vec!["bug".to_string()],
                merge_time(),
            ),
            ChangeRecord::merged(13, "add new feature X", "hubber", vec![], merge_time()),
        ]
    }

    #[test]
    fn test_render_is_byte_identical_for_same_inputs() {
        let plan = sample_plan();
        let changes = sample_changes();

        let first = render(
            ReportKind::Full,
            "acme/widget",
            &plan,
            &changes,
            "v2.5.0",
            fixed_time(),
        );
        let second = render(
            ReportKind::Full,
            "acme/widget",
            &plan,
            &changes,
            "v2.5.0",
            fixed_time(),
        );
        assert_eq!(first, second);

        let dry_first = render(
            ReportKind::DryRun,
            "acme/widget",
            &plan,
            &changes,
            "v2.5.0",
            fixed_time(),
        );
        let dry_second = render(
            ReportKind::DryRun,
            "acme/widget",
            &plan,
            &changes,
            "v2.5.0",
            fixed_time(),
        );
        assert_eq!(dry_first, dry_second);
    }

    #[test]
    fn test_full_report_header_carries_tag() {
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &[],
            "v2.5.0",
            fixed_time(),
        );
        assert!(report.starts_with("# Dependency Report\n"));
        assert!(report.contains("**Repository:** acme/widget"));
        assert!(report.contains("**Generated On:** 2025-04-10 14:30:00"));
        assert!(report.contains("**Current Version:** v2.5.0"));
    }

    #[test]
    fn test_dry_run_header_has_no_tag_line() {
        let report = render(
            ReportKind::DryRun,
            "acme/widget",
            &sample_plan(),
            &[],
            "v2.5.0",
            fixed_time(),
        );
        assert!(report.starts_with("# Dry-Run Report\n"));
        assert!(!report.contains("**Current Version:**"));
    }

    #[test]
    fn test_full_table_has_one_row_per_dependency() {
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &[],
            "v2.5.0",
            fixed_time(),
        );

        assert!(report
            .contains("| github.com/acme/gadget | v0.3.0 | v0.4.0 | 🔄 Update available |"));
        assert!(report.contains("| github.com/acme/glitchy | v1.0.0 | Error | ❌ Error |"));
        assert!(report.contains("| github.com/acme/other | v2.0.0 | - | ⏭ Not tracked |"));
        assert!(report.contains("| github.com/acme/widget | v1.1.0 | v1.1.0 | ✅ Up to date |"));
        assert!(report.contains("**Summary:** 1 out of 4 dependencies have updates available."));
    }

    #[test]
    fn test_dry_run_renders_only_update_subset() {
        let report = render(
            ReportKind::DryRun,
            "acme/widget",
            &sample_plan(),
            &[],
            "v2.5.0",
            fixed_time(),
        );

        assert!(report.contains("- `github.com/acme/gadget`: **v0.3.0 → v0.4.0**"));
        // Up-to-date, unresolved and untracked rows are not listed
        assert!(!report.contains("github.com/acme/widget"));
        assert!(!report.contains("github.com/acme/glitchy"));
        assert!(!report.contains("github.com/acme/other"));
    }

    #[test]
    fn test_dry_run_all_up_to_date_message() {
        let plan = UpdatePlan {
            candidates: vec![UpdateCandidate::up_to_date("a", "1.0.0", "1.0.0")],
        };
        let report = render(
            ReportKind::DryRun,
            "acme/widget",
            &plan,
            &[],
            "v2.5.0",
            fixed_time(),
        );
        assert!(report.contains("✅ All dependencies are already up to date!"));
    }

    #[test]
    fn test_activity_line_format_and_no_labels_annotation() {
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &sample_changes(),
            "v2.5.0",
            fixed_time(),
        );

        assert!(report
            .contains("- PR #12, fix typo, octocat, bug, 2025-04-02 10:00:00 UTC"));
        assert!(report.contains(
            "- PR #13, add new feature X, hubber, , 2025-04-02 10:00:00 UTC (No labels)"
        ));
    }

    #[test]
    fn test_release_recommendation_only_with_changes() {
        let without = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &[],
            "v2.5.0",
            fixed_time(),
        );
        assert!(!without.contains("Release Analysis"));
        assert!(without.contains("No merged PRs found since the latest release."));

        let with = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &sample_changes(),
            "v2.5.0",
            fixed_time(),
        );
        assert!(with.contains("### Release Analysis"));
        assert!(with.contains("- **Recommended release type:** next minor"));
        assert!(with.contains("- **Next version:** 2.6.0"));
    }

    #[test]
    fn test_unmerged_changes_are_excluded_everywhere() {
        let changes = vec![ChangeRecord::unmerged(99, "add new feature X", "ghost")];
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &changes,
            "v2.5.0",
            fixed_time(),
        );

        assert!(!report.contains("PR #99"));
        assert!(report.contains("No merged PRs found since the latest release."));
        assert!(!report.contains("Release Analysis"));
    }

    #[test]
    fn test_recommendations_with_updates_and_changes() {
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &sample_changes(),
            "v2.5.0",
            fixed_time(),
        );
        assert!(report.contains("1. **Update Dependencies:**"));
        assert!(report.contains("2. **Run Tests:**"));
        assert!(report.contains("3. **Review Changes:**"));
        assert!(report.contains("4. **Consider Release:**"));
    }

    #[test]
    fn test_recommendations_without_updates() {
        let plan = UpdatePlan {
            candidates: vec![UpdateCandidate::up_to_date("a", "1.0.0", "1.0.0")],
        };
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &plan,
            &[],
            "v2.5.0",
            fixed_time(),
        );
        assert!(report.contains("✅ All dependencies are up to date. No immediate action required."));
        assert!(!report.contains("1. **Update Dependencies:**"));
        assert!(!report.contains("4. **Consider Release:**"));
    }

    #[test]
    fn test_recommendations_without_updates_but_with_changes() {
        let plan = UpdatePlan {
            candidates: vec![UpdateCandidate::up_to_date("a", "1.0.0", "1.0.0")],
        };
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &plan,
            &sample_changes(),
            "v2.5.0",
            fixed_time(),
        );
        assert!(report.contains("✅ All dependencies are up to date. No immediate action required."));
        assert!(report.contains("4. **Consider Release:**"));
    }

    #[test]
    fn test_bad_tag_renders_placeholder_version() {
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &sample_changes(),
            "not-a-tag",
            fixed_time(),
        );
        assert!(report.contains("- **Next version:** next"));
    }

    #[test]
    fn test_dry_run_release_decision_section() {
        let report = render(
            ReportKind::DryRun,
            "acme/widget",
            &sample_plan(),
            &sample_changes(),
            "v2.5.0",
            fixed_time(),
        );
        assert!(report.contains("### Decision on new release: next minor"));
        assert!(report.contains("Next possible version: 2.6.0"));
    }

    #[test]
    fn test_section_ordering_is_stable() {
        let report = render(
            ReportKind::Full,
            "acme/widget",
            &sample_plan(),
            &sample_changes(),
            "v2.5.0",
            fixed_time(),
        );
        let status = report.find("## Dependency Status").unwrap();
        let activity = report.find("## Recent Activity").unwrap();
        let recommendations = report.find("## Recommendations").unwrap();
        assert!(status < activity);
        assert!(activity < recommendations);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DRY_RUN_REPORT_FILE);
        write_report(&path, "# Dry-Run Report\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Dry-Run Report\n"
        );
    }

    #[test]
    fn test_write_report_bad_path_is_error() {
        let result = write_report(Path::new("/nonexistent-dir/report.md"), "x");
        assert!(matches!(result, Err(ReportError::WriteError { .. })));
    }
}
