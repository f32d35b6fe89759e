mod execute;
mod plan;
mod types;

pub use plan::parse_week;
pub use types::{OccupancyWarning, RunOptions, SwapError, SwapOutcome};

use crate::api::ScheduleService;
use crate::model::{Schedule, SwapPlan, User, WeekWindow};
use crate::report::PlanRenderer;

/// Planner : construit et exécute un échange de semaines au-dessus d'un
/// service de planification passé explicitement.
pub struct Planner<'a> {
    service: &'a dyn ScheduleService,
}

impl<'a> Planner<'a> {
    pub fn new(service: &'a dyn ScheduleService) -> Self {
        Self { service }
    }

    /// Résout un nom de planning (correspondance exacte, rejet si ambigu).
    pub fn resolve_schedule(&self, name: &str) -> Result<Schedule, SwapError> {
        plan::resolve_schedule(self.service, name)
    }

    /// Résout un nom d'utilisateur, même politique.
    pub fn resolve_user(&self, name: &str) -> Result<User, SwapError> {
        plan::resolve_user(self.service, name)
    }

    /// Construit le plan d'échange : deux intentions symétriques sur le même
    /// planning. L'identité de l'utilisateur courant vient de l'appelant.
    pub fn plan(
        &self,
        schedule_name: &str,
        current_user: User,
        other_username: &str,
        current_user_window: WeekWindow,
        other_user_window: WeekWindow,
    ) -> Result<SwapPlan, SwapError> {
        plan::plan(
            self.service,
            schedule_name,
            current_user,
            other_username,
            current_user_window,
            other_user_window,
        )
    }

    /// Contrôle d'occupation des fenêtres (lecture seule, avertissements).
    pub fn verify(&self, plan: &SwapPlan) -> Result<Vec<OccupancyWarning>, SwapError> {
        execute::verify(self.service, plan)
    }

    /// Crée les deux overrides, en séquence, sans retry.
    pub fn execute(&self, plan: &SwapPlan) -> Result<(), SwapError> {
        execute::execute(self.service, plan)
    }

    /// Déroule l'invocation : vérification optionnelle, puis rapport de
    /// simulation (aucune écriture) ou soumission des deux overrides.
    pub fn run(
        &self,
        plan: &SwapPlan,
        renderer: &dyn PlanRenderer,
        opts: RunOptions,
    ) -> Result<SwapOutcome, SwapError> {
        execute::run(self.service, plan, renderer, opts)
    }
}
