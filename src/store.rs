//! The state container.
//!
//! `Store` owns the in-memory snapshot and is the sole mutation path: each
//! operation derives ids/timestamps, dispatches a resolved `Action` through
//! the reducer, and schedules a detached full-snapshot save. Mutations are
//! total in memory; persistence is best-effort and never blocks a dispatch.
//!
//! `Store::open` performs the one-time startup load, so a caller holding a
//! `Store` is never looking at half-loaded state. Each save writes the
//! complete snapshot and is chained behind the previous one, so rapid
//! dispatches settle to the newest snapshot on disk rather than whichever
//! write happened to finish last.

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::id::generate_id;
use crate::model::{
    NewSession, NewTask, NewWeeklyGoal, NewYearGoal, PomodoroSession, ReflectionDraft, Settings,
    SettingsPatch, Task, WeeklyGoal, WeeklyReflection, YearGoal,
};
use crate::query;
use crate::state::{reduce, Action, AppState};
use crate::storage::Storage;

#[derive(Debug)]
pub struct Store {
    state: AppState,
    storage: Storage,
    /// Tail of the save chain; awaiting it implies every earlier save landed.
    pending: Option<JoinHandle<()>>,
}

impl Store {
    /// Load persisted state and return a ready store.
    pub async fn open(storage: Storage) -> Self {
        let gateway = storage.clone();
        let state = tokio::task::spawn_blocking(move || gateway.load())
            .await
            .unwrap_or_default();
        Self {
            state,
            storage,
            pending: None,
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    fn commit(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
        self.schedule_save();
    }

    /// Flush the current snapshot on a detached task, ordered behind any
    /// earlier save still in flight. Outside a tokio runtime the write
    /// happens inline instead.
    fn schedule_save(&mut self) {
        let snapshot = self.state.clone();
        let storage = self.storage.clone();
        match Handle::try_current() {
            Ok(handle) => {
                let prev = self.pending.take();
                self.pending = Some(handle.spawn(async move {
                    if let Some(prev) = prev {
                        let _ = prev.await;
                    }
                    let _ = tokio::task::spawn_blocking(move || storage.save_logged(&snapshot))
                        .await;
                }));
            }
            Err(_) => storage.save_logged(&snapshot),
        }
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Append a new task and return the created record.
    pub fn add_task(&mut self, input: NewTask) -> Task {
        let task = Task {
            id: generate_id(),
            title: input.title,
            is_completed: false,
            is_top3: input.is_top3,
            created_at: Utc::now(),
            completed_at: None,
            date: input.date,
        };
        self.commit(Action::AddTask(task.clone()));
        task
    }

    /// Flip a task's completion, stamping or clearing `completed_at`.
    /// Unknown ids are ignored.
    pub fn toggle_task(&mut self, id: &str) {
        self.commit(Action::ToggleTask {
            id: id.to_string(),
            at: Utc::now(),
        });
    }

    pub fn delete_task(&mut self, id: &str) {
        self.commit(Action::DeleteTask { id: id.to_string() });
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Record a focus session. Sessions are append-only; the returned record
    /// is what UI feedback (sound/haptics) keys off.
    pub fn add_session(&mut self, input: NewSession) -> PomodoroSession {
        let session = PomodoroSession {
            id: generate_id(),
            start_at: input.start_at,
            end_at: input.end_at,
            duration_minutes: input.duration_minutes,
            date: input.date,
            is_completed: input.is_completed,
            energy_score: input.energy_score,
            energy_tag: input.energy_tag,
        };
        self.commit(Action::AddSession(session.clone()));
        session
    }

    // =========================================================================
    // Weekly goals
    // =========================================================================

    /// Append a goal for a week. The week key is normalized to the Monday
    /// of its week, so any day of the week is an acceptable input.
    pub fn add_weekly_goal(&mut self, input: NewWeeklyGoal) -> WeeklyGoal {
        let goal = WeeklyGoal {
            id: generate_id(),
            title: input.title,
            is_completed: false,
            created_at: Utc::now(),
            week_start_date: input.week_start_date.week_start(),
            notes: input.notes,
        };
        self.commit(Action::AddWeeklyGoal(goal.clone()));
        goal
    }

    pub fn toggle_weekly_goal(&mut self, id: &str) {
        self.commit(Action::ToggleWeeklyGoal { id: id.to_string() });
    }

    pub fn delete_weekly_goal(&mut self, id: &str) {
        self.commit(Action::DeleteWeeklyGoal { id: id.to_string() });
    }

    // =========================================================================
    // Weekly reflections
    // =========================================================================

    /// Upsert the reflection for the draft's week.
    ///
    /// An existing record for that week is merged in place (its id and
    /// `created_at` survive); otherwise a new record is inserted. The week
    /// key is normalized to its Monday, and the week's focus minutes are
    /// snapshotted at save time unless the draft pins a value. Returns the
    /// stored record.
    pub fn save_weekly_reflection(&mut self, mut draft: ReflectionDraft) -> WeeklyReflection {
        draft.week_start_date = draft.week_start_date.week_start();
        let focus_snapshot = query::week_focus_minutes(&self.state, draft.week_start_date);
        let existing = query::reflection_for_week(&self.state, draft.week_start_date);
        let record = draft.resolve(existing, generate_id(), Utc::now(), focus_snapshot);
        self.commit(Action::UpsertReflection(record.clone()));
        record
    }

    // =========================================================================
    // Year goals
    // =========================================================================

    pub fn add_year_goal(&mut self, input: NewYearGoal) -> YearGoal {
        let goal = YearGoal {
            id: generate_id(),
            title: input.title,
            category: input.category,
            progress: input.progress,
            notes: input.notes,
            is_completed: false,
            created_at: Utc::now(),
        };
        self.commit(Action::AddYearGoal(goal.clone()));
        goal
    }

    /// Replace a year goal wholesale, matched by `goal.id`.
    pub fn update_year_goal(&mut self, goal: YearGoal) {
        self.commit(Action::UpdateYearGoal(goal));
    }

    /// Flip a year goal's completion; completing forces progress to 100.
    pub fn toggle_year_goal(&mut self, id: &str) {
        self.commit(Action::ToggleYearGoal { id: id.to_string() });
    }

    pub fn delete_year_goal(&mut self, id: &str) {
        self.commit(Action::DeleteYearGoal { id: id.to_string() });
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Shallow-merge a settings patch; absent fields are never reset.
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.commit(Action::UpdateSettings(patch));
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Await all in-flight saves. Useful at shutdown and in tests; ordinary
    /// operation never needs to wait on persistence.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending.take() {
            let _ = handle.await;
        }
    }

    /// Reset every collection to empty and settings to defaults, then wipe
    /// all persisted keys. In-flight saves are drained first so a stale
    /// write cannot resurrect cleared data.
    pub async fn clear_all(&mut self) {
        self.state = reduce(&self.state, Action::ClearAll);
        self.flush().await;
        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "failed to clear persisted state");
        }
    }
}
