use super::{OccupancyWarning, RunOptions, SwapError, SwapOutcome};
use crate::api::ScheduleService;
use crate::model::{OverrideIntent, SwapPlan};
use crate::report::PlanRenderer;
use tracing::{info, warn};

/// Orchestration complète : vérification optionnelle, puis rapport seul en
/// simulation ou soumission réelle.
pub(super) fn run(
    service: &dyn ScheduleService,
    plan: &SwapPlan,
    renderer: &dyn PlanRenderer,
    opts: RunOptions,
) -> Result<SwapOutcome, SwapError> {
    let warnings = if opts.verify {
        verify(service, plan)?
    } else {
        Vec::new()
    };

    if opts.dry_run {
        info!(schedule = plan.schedule.id.as_str(), "dry run, nothing written");
        return Ok(SwapOutcome {
            warnings,
            report: Some(renderer.render(plan)),
        });
    }

    execute(service, plan)?;
    Ok(SwapOutcome {
        warnings,
        report: None,
    })
}

/// Soumet les deux overrides dans l'ordre. Échec du premier : rien n'est
/// appliqué et le second n'est jamais tenté. Échec du second : demi-échange,
/// signalé comme tel.
pub(super) fn execute(
    service: &dyn ScheduleService,
    plan: &SwapPlan,
) -> Result<(), SwapError> {
    submit(service, &plan.first, &plan.other_user.name, &plan.current_user.name)
        .map_err(|source| SwapError::SubmitFailed { source })?;

    submit(service, &plan.second, &plan.current_user.name, &plan.other_user.name)
        .map_err(|source| SwapError::PartialSwap { source })?;

    info!(schedule = plan.schedule.id.as_str(), "swap complete");
    Ok(())
}

fn submit(
    service: &dyn ScheduleService,
    intent: &OverrideIntent,
    assignee: &str,
    overridden: &str,
) -> Result<(), crate::api::ApiError> {
    info!(
        schedule = intent.schedule.as_str(),
        assignee,
        overridden,
        start = %intent.window.start().to_rfc3339(),
        end = %intent.window.end().to_rfc3339(),
        "creating override"
    );
    service.create_override(intent)
}

/// Vérifie que chaque personne remplacée apparaît bien d'astreinte sur sa
/// fenêtre dans le planning rendu. Lecture seule ; ne bloque jamais le swap.
pub(super) fn verify(
    service: &dyn ScheduleService,
    plan: &SwapPlan,
) -> Result<Vec<OccupancyWarning>, SwapError> {
    let mut warnings = Vec::new();
    let parties = [
        (&plan.first, &plan.current_user),
        (&plan.second, &plan.other_user),
    ];
    for (intent, user) in parties {
        let entries = service.oncall_entries(&intent.schedule, intent.window)?;
        let on_call = entries.iter().any(|e| e.user == user.id);
        if !on_call {
            warn!(
                user = %user.name,
                start = %intent.window.start().to_rfc3339(),
                "user not on call in their window"
            );
            warnings.push(OccupancyWarning {
                user_name: user.name.clone(),
                window: intent.window,
            });
        }
    }
    Ok(warnings)
}
