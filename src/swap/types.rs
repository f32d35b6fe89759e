use crate::api::ApiError;
use crate::model::WeekWindow;
use thiserror::Error;

/// Options d'une invocation
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Simulation : rapport seul, aucune écriture.
    pub dry_run: bool,
    /// Contrôle d'occupation des fenêtres avant d'agir.
    pub verify: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            verify: true,
        }
    }
}

/// Résultat d'une invocation.
#[derive(Debug)]
pub struct SwapOutcome {
    pub warnings: Vec<OccupancyWarning>,
    /// Rapport texte en mode simulation ; `None` si les overrides sont créés.
    pub report: Option<String>,
}

/// Constat de vérification : la personne censée être remplacée n'apparaît
/// pas d'astreinte sur sa fenêtre. Avertissement, jamais bloquant.
#[derive(Debug, Clone)]
pub struct OccupancyWarning {
    pub user_name: String,
    pub window: WeekWindow,
}

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("invalid {field} date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    #[error("no schedule named {0:?}")]
    UnknownSchedule(String),
    #[error("{count} schedules match {name:?} exactly; disambiguate upstream")]
    AmbiguousSchedule { name: String, count: usize },
    #[error("no user named {0:?}")]
    UnknownUser(String),
    #[error("{count} users match {name:?} exactly; use an e-mail address")]
    AmbiguousUser { name: String, count: usize },
    #[error("cannot swap {0:?} with themselves")]
    SelfSwap(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("first override rejected, schedule unchanged: {source}")]
    SubmitFailed {
        #[source]
        source: ApiError,
    },
    #[error("partial swap: first override applied, second override failed: {source}")]
    PartialSwap {
        #[source]
        source: ApiError,
    },
}
