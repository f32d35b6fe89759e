use crate::model::{OverrideIntent, SwapPlan};

/// Permet de customiser le rendu du plan (texte, futur JSON, etc.).
pub trait PlanRenderer {
    fn render(&self, plan: &SwapPlan) -> String;
}

/// Rapport texte du mode simulation : les deux overrides prévus, aucun créé.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl PlanRenderer for TextReport {
    fn render(&self, plan: &SwapPlan) -> String {
        format!(
            "Planned swap on schedule \"{schedule}\" ({id}):\n\n  1. {line1}\n  2. {line2}\n\nNo overrides were created (dry run).\n",
            schedule = plan.schedule.name,
            id = plan.schedule.id.as_str(),
            line1 = render_intent(&plan.first, &plan.other_user.name, &plan.current_user.name),
            line2 = render_intent(&plan.second, &plan.current_user.name, &plan.other_user.name),
        )
    }
}

fn render_intent(intent: &OverrideIntent, assignee: &str, overridden: &str) -> String {
    format!(
        "{assignee} covers {overridden} from {start} to {end}",
        start = intent.window.start().to_rfc3339(),
        end = intent.window.end().to_rfc3339(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Schedule, SwapPlan, User, WeekWindow};
    use chrono::NaiveDate;

    #[test]
    fn text_report_names_both_parties_and_windows() {
        let plan = SwapPlan::new(
            Schedule::new("SCHED123", "Backend-Oncall"),
            User::new("USR001", "Alice"),
            User::new("USR456", "jdoe"),
            WeekWindow::from_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()),
            WeekWindow::from_date(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()),
        );
        let out = TextReport.render(&plan);
        assert!(out.contains("Backend-Oncall"));
        assert!(out.contains("jdoe covers Alice from 2024-03-04T00:00:00+00:00"));
        assert!(out.contains("Alice covers jdoe from 2024-03-11T00:00:00+00:00"));
        assert!(out.contains("dry run"));
    }
}
