//! Read-only derived views over a state snapshot.
//!
//! Every function borrows the snapshot and recomputes from scratch; callers
//! are free to memoize on the input collections, but correctness never
//! depends on it. Session views only count completed sessions.

use crate::dates::DateKey;
use crate::model::{PomodoroSession, Task, WeeklyGoal, WeeklyReflection};
use crate::state::AppState;

/// Tasks bucketed to the current local day.
pub fn today_tasks(state: &AppState) -> Vec<&Task> {
    tasks_by_date(state, DateKey::today())
}

/// Tasks bucketed to an exact day.
pub fn tasks_by_date(state: &AppState, date: DateKey) -> Vec<&Task> {
    state.tasks.iter().filter(|task| task.date == date).collect()
}

/// Completed sessions bucketed to the current local day.
pub fn today_sessions(state: &AppState) -> Vec<&PomodoroSession> {
    sessions_by_date(state, DateKey::today())
}

/// Completed sessions bucketed to an exact day.
pub fn sessions_by_date(state: &AppState, date: DateKey) -> Vec<&PomodoroSession> {
    state
        .sessions
        .iter()
        .filter(|session| session.is_completed && session.date == date)
        .collect()
}

/// Completed sessions in the half-open week `[week_start, week_start + 7d)`.
pub fn week_sessions(state: &AppState, week_start: DateKey) -> Vec<&PomodoroSession> {
    let week_end = week_start.plus_days(7);
    state
        .sessions
        .iter()
        .filter(|session| {
            session.is_completed && session.date >= week_start && session.date < week_end
        })
        .collect()
}

/// Sum of completed focus minutes in a week. Snapshotted into
/// `WeeklyReflection::focus_minutes_auto` at reflection-save time.
pub fn week_focus_minutes(state: &AppState, week_start: DateKey) -> u32 {
    week_sessions(state, week_start)
        .iter()
        .map(|session| session.duration_minutes)
        .sum()
}

/// Goals for an exact week key.
pub fn weekly_goals_for(state: &AppState, week_start: DateKey) -> Vec<&WeeklyGoal> {
    state
        .weekly_goals
        .iter()
        .filter(|goal| goal.week_start_date == week_start)
        .collect()
}

/// Goals for the week containing today.
pub fn current_week_goals(state: &AppState) -> Vec<&WeeklyGoal> {
    weekly_goals_for(state, DateKey::today().week_start())
}

/// The reflection for an exact week key, if one was saved.
pub fn reflection_for_week(state: &AppState, week_start: DateKey) -> Option<&WeeklyReflection> {
    state
        .weekly_reflections
        .iter()
        .find(|reflection| reflection.week_start_date == week_start)
}

/// The reflection for the week containing today, if one was saved.
pub fn current_week_reflection(state: &AppState) -> Option<&WeeklyReflection> {
    reflection_for_week(state, DateKey::today().week_start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn session(id: &str, date: &str, minutes: u32, completed: bool) -> PomodoroSession {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        PomodoroSession {
            id: id.to_string(),
            start_at: start,
            end_at: start + chrono::Duration::minutes(i64::from(minutes)),
            duration_minutes: minutes,
            date: day(date),
            is_completed: completed,
            energy_score: None,
            energy_tag: None,
        }
    }

    fn task(id: &str, date: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            is_completed: false,
            is_top3: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            completed_at: None,
            date: day(date),
        }
    }

    #[test]
    fn week_sessions_use_a_half_open_interval() {
        let mut state = AppState::default();
        state.sessions.push(session("first-day", "2024-01-01", 25, true));
        state.sessions.push(session("last-day", "2024-01-07", 25, true));
        state.sessions.push(session("next-week", "2024-01-08", 25, true));

        let week = week_sessions(&state, day("2024-01-01"));
        let ids: Vec<&str> = week.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["first-day", "last-day"]);
    }

    #[test]
    fn session_views_skip_incomplete_sessions() {
        let mut state = AppState::default();
        state.sessions.push(session("done", "2024-01-03", 25, true));
        state.sessions.push(session("abandoned", "2024-01-03", 10, false));

        let by_date = sessions_by_date(&state, day("2024-01-03"));
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].id, "done");

        assert_eq!(week_focus_minutes(&state, day("2024-01-01")), 25);
    }

    #[test]
    fn week_focus_minutes_sums_the_week() {
        let mut state = AppState::default();
        state.sessions.push(session("a", "2024-01-01", 25, true));
        state.sessions.push(session("b", "2024-01-04", 25, true));
        state.sessions.push(session("c", "2024-01-07", 50, true));
        state.sessions.push(session("d", "2024-01-08", 90, true));

        assert_eq!(week_focus_minutes(&state, day("2024-01-01")), 100);
        assert_eq!(week_focus_minutes(&state, day("2024-01-08")), 90);
        assert_eq!(week_focus_minutes(&state, day("2023-12-25")), 0);
    }

    #[test]
    fn tasks_by_date_is_an_exact_match() {
        let mut state = AppState::default();
        state.tasks.push(task("a", "2024-01-01"));
        state.tasks.push(task("b", "2024-01-02"));

        let on_first = tasks_by_date(&state, day("2024-01-01"));
        assert_eq!(on_first.len(), 1);
        assert_eq!(on_first[0].id, "a");
        assert!(tasks_by_date(&state, day("2024-01-03")).is_empty());
    }

    #[test]
    fn weekly_lookups_match_exact_week_keys() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let mut state = AppState::default();
        state.weekly_goals.push(WeeklyGoal {
            id: "g1".to_string(),
            title: "Ship the draft".to_string(),
            is_completed: false,
            created_at: created,
            week_start_date: day("2024-01-01"),
            notes: None,
        });
        state.weekly_reflections.push(WeeklyReflection {
            id: "r1".to_string(),
            week_start_date: day("2024-01-01"),
            focus_minutes_auto: 200,
            top3_achievements: vec![],
            gratitude3: vec![],
            distractions: vec![],
            created_at: created,
        });

        assert_eq!(weekly_goals_for(&state, day("2024-01-01")).len(), 1);
        assert!(weekly_goals_for(&state, day("2024-01-08")).is_empty());
        assert!(reflection_for_week(&state, day("2024-01-01")).is_some());
        assert!(reflection_for_week(&state, day("2023-12-25")).is_none());
    }

    #[test]
    fn today_views_track_the_current_date_key() {
        let today = DateKey::today();
        let mut state = AppState::default();
        state.tasks.push(task("now", &today.to_string()));
        state.tasks.push(task("past", "2020-06-01"));
        state
            .sessions
            .push(session("now", &today.to_string(), 25, true));

        let tasks = today_tasks(&state);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "now");
        assert_eq!(today_sessions(&state).len(), 1);
    }
}
