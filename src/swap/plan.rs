use super::SwapError;
use crate::api::ScheduleService;
use crate::model::{Schedule, SwapPlan, User, WeekWindow};
use chrono::NaiveDate;
use tracing::info;

/// Parse une date `YYYY-MM-DD` en fenêtre de semaine (minuit UTC, 7 jours).
pub fn parse_week(field: &'static str, value: &str) -> Result<WeekWindow, SwapError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SwapError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })?;
    Ok(WeekWindow::from_date(date))
}

/// Correspondance exacte, insensible à la casse, parmi les candidats de la
/// recherche. Zéro → inconnu, plusieurs → ambigu.
fn exact_match<T, F>(candidates: Vec<T>, wanted: &str, name_of: F) -> Result<Option<T>, usize>
where
    F: Fn(&T) -> &str,
{
    let mut hits: Vec<T> = candidates
        .into_iter()
        .filter(|c| name_of(c).eq_ignore_ascii_case(wanted.trim()))
        .collect();
    match hits.len() {
        0 => Ok(None),
        1 => Ok(Some(hits.remove(0))),
        n => Err(n),
    }
}

pub(super) fn resolve_schedule(
    service: &dyn ScheduleService,
    name: &str,
) -> Result<Schedule, SwapError> {
    info!(schedule = name, "resolving schedule");
    let candidates = service.find_schedules(name)?;
    match exact_match(candidates, name, |s| s.name.as_str()) {
        Ok(Some(schedule)) => Ok(schedule),
        Ok(None) => Err(SwapError::UnknownSchedule(name.to_string())),
        Err(count) => Err(SwapError::AmbiguousSchedule {
            name: name.to_string(),
            count,
        }),
    }
}

pub(super) fn resolve_user(
    service: &dyn ScheduleService,
    name: &str,
) -> Result<User, SwapError> {
    info!(user = name, "resolving user");
    let candidates = service.find_users(name)?;
    match exact_match(candidates, name, |u| u.name.as_str()) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(SwapError::UnknownUser(name.to_string())),
        Err(count) => Err(SwapError::AmbiguousUser {
            name: name.to_string(),
            count,
        }),
    }
}

pub(super) fn plan(
    service: &dyn ScheduleService,
    schedule_name: &str,
    current_user: User,
    other_username: &str,
    current_user_window: WeekWindow,
    other_user_window: WeekWindow,
) -> Result<SwapPlan, SwapError> {
    let schedule = resolve_schedule(service, schedule_name)?;
    let other_user = resolve_user(service, other_username)?;

    if other_user.id == current_user.id {
        return Err(SwapError::SelfSwap(other_user.name));
    }

    info!(
        schedule = %schedule.id.as_str(),
        current_user = %current_user.name,
        other_user = %other_user.name,
        "swap planned"
    );
    Ok(SwapPlan::new(
        schedule,
        current_user,
        other_user,
        current_user_window,
        other_user_window,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_week_accepts_iso_date() {
        let w = parse_week("current_user_week", "2024-03-04").unwrap();
        assert_eq!(w.start().to_rfc3339(), "2024-03-04T00:00:00+00:00");
    }

    #[test]
    fn parse_week_rejects_garbage() {
        let err = parse_week("other_user_week", "04/03/2024").unwrap_err();
        assert!(matches!(
            err,
            SwapError::InvalidDate { field: "other_user_week", .. }
        ));
    }

    #[test]
    fn exact_match_ignores_fuzzy_candidates() {
        let candidates = vec!["Backend-Oncall-Staging".to_string(), "backend-oncall".to_string()];
        let hit = exact_match(candidates, "Backend-Oncall", |s| s.as_str()).unwrap();
        assert_eq!(hit.as_deref(), Some("backend-oncall"));
    }

    #[test]
    fn exact_match_rejects_duplicates() {
        let candidates = vec!["jdoe".to_string(), "JDoe".to_string()];
        assert_eq!(exact_match(candidates, "jdoe", |s| s.as_str()), Err(2));
    }
}
