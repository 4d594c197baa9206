//! State snapshot, actions, and the reducer.
//!
//! Every mutation is expressed as an `Action` carrying fully resolved data
//! (ids and timestamps are derived by the store before dispatch), so the
//! reducer is a deterministic pure function `(state, action) -> state`. The
//! persistence gateway serializes whole snapshots, which keeps every write
//! self-consistent no matter how saves interleave.

use chrono::{DateTime, Utc};

use crate::model::{
    PomodoroSession, Settings, SettingsPatch, Task, WeeklyGoal, WeeklyReflection, YearGoal,
};

/// The complete in-memory state across all six collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub tasks: Vec<Task>,
    pub sessions: Vec<PomodoroSession>,
    pub weekly_goals: Vec<WeeklyGoal>,
    pub weekly_reflections: Vec<WeeklyReflection>,
    pub year_goals: Vec<YearGoal>,
    pub settings: Settings,
}

/// A fully resolved state transition.
#[derive(Debug, Clone)]
pub enum Action {
    AddTask(Task),
    ToggleTask { id: String, at: DateTime<Utc> },
    DeleteTask { id: String },
    AddSession(PomodoroSession),
    AddWeeklyGoal(WeeklyGoal),
    ToggleWeeklyGoal { id: String },
    DeleteWeeklyGoal { id: String },
    /// Replace-or-insert by `week_start_date`; the record has already been
    /// merged against any existing reflection for that week.
    UpsertReflection(WeeklyReflection),
    AddYearGoal(YearGoal),
    /// Full replace by id.
    UpdateYearGoal(YearGoal),
    ToggleYearGoal { id: String },
    DeleteYearGoal { id: String },
    UpdateSettings(SettingsPatch),
    ClearAll,
}

/// Apply `action` to `state`, producing the next state.
///
/// Total for every action: mutations referencing an unknown id leave the
/// state unchanged rather than failing.
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::AddTask(task) => next.tasks.push(task),
        Action::ToggleTask { id, at } => {
            if let Some(task) = next.tasks.iter_mut().find(|task| task.id == id) {
                task.is_completed = !task.is_completed;
                task.completed_at = task.is_completed.then_some(at);
            }
        }
        Action::DeleteTask { id } => next.tasks.retain(|task| task.id != id),
        Action::AddSession(session) => next.sessions.push(session),
        Action::AddWeeklyGoal(goal) => next.weekly_goals.push(goal),
        Action::ToggleWeeklyGoal { id } => {
            if let Some(goal) = next.weekly_goals.iter_mut().find(|goal| goal.id == id) {
                goal.is_completed = !goal.is_completed;
            }
        }
        Action::DeleteWeeklyGoal { id } => next.weekly_goals.retain(|goal| goal.id != id),
        Action::UpsertReflection(record) => {
            match next
                .weekly_reflections
                .iter_mut()
                .find(|existing| existing.week_start_date == record.week_start_date)
            {
                Some(existing) => *existing = record,
                None => next.weekly_reflections.push(record),
            }
        }
        Action::AddYearGoal(goal) => next.year_goals.push(goal),
        Action::UpdateYearGoal(goal) => {
            if let Some(existing) = next
                .year_goals
                .iter_mut()
                .find(|existing| existing.id == goal.id)
            {
                *existing = goal;
            }
        }
        Action::ToggleYearGoal { id } => {
            if let Some(goal) = next.year_goals.iter_mut().find(|goal| goal.id == id) {
                goal.is_completed = !goal.is_completed;
                if goal.is_completed {
                    goal.progress = 100;
                }
            }
        }
        Action::DeleteYearGoal { id } => next.year_goals.retain(|goal| goal.id != id),
        Action::UpdateSettings(patch) => next.settings = patch.merged_into(&next.settings),
        Action::ClearAll => next = AppState::default(),
    }
    next
}
