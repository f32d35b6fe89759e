use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Identifiant fort pour User (attribué par le service distant)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Schedule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Utilisateur résolu dans l'annuaire du service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
        }
    }
}

/// Planning d'astreinte résolu (nom → id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
}

impl Schedule {
    pub fn new<I: AsRef<str>, N: Into<String>>(id: I, name: N) -> Self {
        Self {
            id: ScheduleId::new(id),
            name: name.into(),
        }
    }
}

/// Nombre de jours d'un tour de rotation.
pub const WEEK_DAYS: i64 = 7;

/// Semaine d'astreinte : [minuit UTC du jour donné, +7 jours).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    start: DateTime<Utc>,
}

impl WeekWindow {
    /// Construit la fenêtre à partir d'une date calendaire, borne minuit UTC.
    pub fn from_date(date: NaiveDate) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        Self {
            start: Utc.from_utc_datetime(&midnight),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Fin exclusive, exactement 7 jours après le début.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::days(WEEK_DAYS)
    }
}

/// Intention d'override : `assigned` prend la semaine de `overridden`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideIntent {
    pub schedule: ScheduleId,
    pub overridden: UserId,
    pub assigned: UserId,
    pub window: WeekWindow,
}

/// Entrée rendue du planning final (qui est réellement d'astreinte et quand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallEntry {
    pub user: UserId,
    pub user_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Paire d'intentions symétriques : chacun reprend la semaine de l'autre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPlan {
    pub schedule: Schedule,
    pub current_user: User,
    pub other_user: User,
    /// La semaine de l'utilisateur courant, reprise par l'autre.
    pub first: OverrideIntent,
    /// La semaine de l'autre, reprise par l'utilisateur courant.
    pub second: OverrideIntent,
}

impl SwapPlan {
    pub fn new(
        schedule: Schedule,
        current_user: User,
        other_user: User,
        current_user_window: WeekWindow,
        other_user_window: WeekWindow,
    ) -> Self {
        let first = OverrideIntent {
            schedule: schedule.id.clone(),
            overridden: current_user.id.clone(),
            assigned: other_user.id.clone(),
            window: current_user_window,
        };
        let second = OverrideIntent {
            schedule: schedule.id.clone(),
            overridden: other_user.id.clone(),
            assigned: current_user.id.clone(),
            window: other_user_window,
        };
        Self {
            schedule,
            current_user,
            other_user,
            first,
            second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_window_spans_seven_days() {
        let w = WeekWindow::from_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(w.end() - w.start(), Duration::days(7));
        assert_eq!(w.start(), Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
        assert_eq!(w.end(), Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn week_window_crosses_leap_day() {
        let w = WeekWindow::from_date(NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
        assert_eq!(w.end(), Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn plan_intents_are_mirrored() {
        let schedule = Schedule::new("SCHED123", "Backend-Oncall");
        let me = User::new("USR001", "Me");
        let other = User::new("USR456", "jdoe");
        let w1 = WeekWindow::from_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        let w2 = WeekWindow::from_date(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());

        let plan = SwapPlan::new(schedule, me.clone(), other.clone(), w1, w2);
        assert_eq!(plan.first.schedule, plan.second.schedule);
        assert_eq!(plan.first.overridden, plan.second.assigned);
        assert_eq!(plan.first.assigned, plan.second.overridden);
        assert_eq!(plan.first.assigned, other.id);
        assert_eq!(plan.second.assigned, me.id);
    }
}
