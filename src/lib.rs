#![forbid(unsafe_code)]
//! Shiftswap — échange de semaines d'astreinte via des overrides temporaires.
//!
//! - Résolution annuaire (planning, utilisateurs) par correspondance exacte.
//! - Fenêtres d'exactement 7 jours, bornes minuit UTC.
//! - Deux overrides symétriques ; fail-fast, demi-échange signalé tel quel.
//! - Mode simulation : rapport texte, aucune écriture.

pub mod api;
pub mod config;
pub mod model;
pub mod report;
pub mod swap;

pub use api::{ApiError, PagerDutyClient, ScheduleService, DEFAULT_API_URL};
pub use config::Config;
pub use model::{
    OnCallEntry, OverrideIntent, Schedule, ScheduleId, SwapPlan, User, UserId, WeekWindow,
};
pub use report::{PlanRenderer, TextReport};
pub use swap::{parse_week, OccupancyWarning, Planner, RunOptions, SwapError, SwapOutcome};
