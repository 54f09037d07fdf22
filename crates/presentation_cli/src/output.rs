//! Human-readable rendering of command results

use std::fmt::Write;

use domain::{Instance, InjectionOutcome, InstanceSummary, RecoveryStatus};

fn recovery_label(recovery: &RecoveryStatus) -> String {
    match recovery {
        RecoveryStatus::NotAttempted => "not attempted".to_string(),
        RecoveryStatus::NotApplicable => "not applicable (no group labels)".to_string(),
        RecoveryStatus::Recovered { after, replacement } => {
            format!("recovered by {replacement} after {}s", after.as_secs())
        },
        RecoveryStatus::TimedOut { after } => {
            format!("no ready replacement after {}s", after.as_secs())
        },
        RecoveryStatus::Cancelled { after } => format!("cancelled after {}s", after.as_secs()),
    }
}

/// Render the outcome of an injection run
pub fn render_outcome(outcome: &InjectionOutcome) -> String {
    let headline = if outcome.recovery().is_recovered() {
        "✅ Injection finished, workload recovered"
    } else if outcome.deleted() {
        "⚠️  Injection finished without a confirmed recovery"
    } else {
        "❌ Injection did not delete the target"
    };

    let mut out = String::new();
    let _ = writeln!(out, "{headline}");
    let _ = writeln!(out, "   Run:       {}", outcome.run_id());
    let _ = writeln!(out, "   Scenario:  {}", outcome.scenario_kind());
    let _ = writeln!(out, "   Target:    {}", outcome.target());
    let _ = writeln!(out, "   Injected:  {}", outcome.injected_at().to_rfc3339());
    let _ = writeln!(
        out,
        "   Deleted:   {}",
        if outcome.deleted() { "yes" } else { "no" }
    );
    let _ = writeln!(out, "   Deletion:  {}", outcome.deletion());
    let _ = writeln!(out, "   Recovery:  {}", recovery_label(outcome.recovery()));
    if let Some(after) = outcome.recovered_after() {
        let _ = writeln!(out, "   ⏱️  Recovered after: {}s", after.as_secs());
    }
    let _ = write!(out, "   Message:   {}", outcome.message());
    out
}

/// Render the pre-injection preview of a target
pub fn render_preview(instance: &Instance) -> String {
    let labels = if instance.labels.is_empty() {
        "<none>".to_string()
    } else {
        instance.labels.to_selector()
    };

    let mut out = String::new();
    let _ = writeln!(out, "🎯 Target pod: {}/{}", instance.namespace, instance.name);
    let _ = writeln!(out, "   Phase:  {}", instance.phase());
    let _ = writeln!(
        out,
        "   Node:   {}",
        instance.node.as_deref().unwrap_or("<unscheduled>")
    );
    let _ = write!(out, "   Labels: {labels}");
    out
}

/// Render a namespace listing as a table
pub fn render_summaries(namespace: &str, summaries: &[InstanceSummary]) -> String {
    if summaries.is_empty() {
        return format!("No pods found in namespace {namespace}");
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<48} {:<10} {:<24} CREATED", "NAME", "PHASE", "NODE");
    for summary in summaries {
        let _ = writeln!(
            out,
            "{:<48} {:<10} {:<24} {}",
            summary.name,
            summary.phase.as_str(),
            summary.node.as_deref().unwrap_or("-"),
            summary
                .created
                .map_or_else(|| "-".to_string(), |c| c.to_rfc3339())
        );
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use domain::{GroupLabels, InstancePhase, ReadinessState, TargetRef};

    use super::*;

    fn target() -> TargetRef {
        TargetRef::new("default", "web-1").unwrap()
    }

    #[test]
    fn outcome_of_recovered_run() {
        let mut outcome = InjectionOutcome::begin(target());
        outcome.mark_deleted();
        outcome.set_recovery(RecoveryStatus::Recovered {
            after: Duration::from_secs(6),
            replacement: "web-2".to_string(),
        });
        let outcome = outcome.finish("Instance deleted; replacement web-2 ready after 6s");

        let rendered = render_outcome(&outcome);

        assert!(rendered.starts_with("✅"));
        assert!(rendered.contains("Target:    default/web-1"));
        assert!(rendered.contains("Scenario:  instance_crash"));
        assert!(rendered.contains("Recovered after: 6s"));
        assert!(rendered.contains("recovered by web-2"));
    }

    #[test]
    fn outcome_of_rejected_run() {
        let outcome = InjectionOutcome::begin(target()).finish("Deletion rejected: Forbidden");

        let rendered = render_outcome(&outcome);

        assert!(rendered.starts_with("❌"));
        assert!(rendered.contains("Deleted:   no"));
        assert!(!rendered.contains("Recovered after"));
        assert!(rendered.ends_with("Deletion rejected: Forbidden"));
    }

    #[test]
    fn outcome_of_timed_out_recovery() {
        let mut outcome = InjectionOutcome::begin(target());
        outcome.mark_deleted();
        outcome.set_recovery(RecoveryStatus::TimedOut {
            after: Duration::from_secs(120),
        });
        let rendered = render_outcome(&outcome.finish("no ready replacement"));

        assert!(rendered.starts_with("⚠️"));
        assert!(rendered.contains("no ready replacement after 120s"));
    }

    #[test]
    fn preview_shows_labels_and_node() {
        let instance = Instance::new("default", "web-1")
            .with_node("node-a")
            .with_labels(GroupLabels::new().with("app", "demo"))
            .with_readiness(ReadinessState::new(InstancePhase::Running, vec![true]));

        let rendered = render_preview(&instance);

        assert!(rendered.contains("default/web-1"));
        assert!(rendered.contains("Running"));
        assert!(rendered.contains("node-a"));
        assert!(rendered.contains("app=demo"));
    }

    #[test]
    fn preview_without_labels() {
        let rendered = render_preview(&Instance::new("default", "solo"));
        assert!(rendered.contains("Labels: <none>"));
        assert!(rendered.contains("<unscheduled>"));
    }

    #[test]
    fn summaries_table() {
        let summaries = vec![
            Instance::new("shop", "cart-1")
                .with_node("node-a")
                .with_readiness(ReadinessState::new(InstancePhase::Running, vec![true]))
                .summary(),
            Instance::new("shop", "cart-2").summary(),
        ];

        let rendered = render_summaries("shop", &summaries);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("cart-1"));
        assert!(lines[1].contains("Running"));
        assert!(lines[2].contains("Unknown"));
    }

    #[test]
    fn empty_listing() {
        assert_eq!(
            render_summaries("shop", &[]),
            "No pods found in namespace shop"
        );
    }
}
