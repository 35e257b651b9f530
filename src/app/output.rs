//! Console rendering of the analysis report.

use colored::Colorize;

use crate::analysis::NonFollowerReport;

/// Renders the report for standard output.
///
/// Non-followers are listed in lexicographic order, numbered from 1, followed
/// by the statistics block. Partial lists add a warning that the numbers may
/// be understated.
pub fn render_report(report: &NonFollowerReport) -> String {
    let rule = "=".repeat(50);
    let mut lines = vec![rule.clone()];

    if report.non_followers.is_empty() {
        lines.push(
            "🎉 Everyone you follow follows you back!"
                .green()
                .bold()
                .to_string(),
        );
    } else {
        let heading = format!(
            "Accounts not following back ({}):",
            report.non_follower_count()
        );
        lines.push(heading.yellow().bold().to_string());
        lines.extend(
            report
                .non_followers
                .iter()
                .enumerate()
                .map(|(i, name)| format!("{:3}. {name}", i + 1)),
        );
    }

    lines.push(rule);
    lines.push(format!("Statistics for @{}:", report.handle));
    lines.push(format!("   Followers:          {}", report.followers_count));
    lines.push(format!("   Following:          {}", report.following_count));
    lines.push(format!("   Mutual:             {}", report.mutual_count()));
    lines.push(format!("   Not following back: {}", report.non_follower_count()));

    lines.extend(report.incomplete.iter().map(|(kind, fault)| {
        format!(
            "{} {kind} list is incomplete ({fault}); counts may be understated",
            "⚠".yellow()
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
