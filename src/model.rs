//! Record schema for the six persisted collections.
//!
//! Field names on disk are camelCase and fixed: they are the contract with
//! previously persisted data, so renaming a field here orphans user data.
//! Timestamps serialize as RFC 3339 text, day buckets as `YYYY-MM-DD`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::DateKey;
use crate::error::Error;

// =============================================================================
// Tasks
// =============================================================================

/// A to-do item, bucketed to a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
    /// Priority flag: one of the day's three highlighted tasks.
    pub is_top3: bool,
    pub created_at: DateTime<Utc>,
    /// Set at the moment of the last completion toggle, cleared on un-toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Day bucket; immutable after creation.
    pub date: DateKey,
}

/// Caller-provided fields for a new task. Id and timestamps are derived by
/// the store; title validation is the caller's job.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub is_top3: bool,
    pub date: DateKey,
}

// =============================================================================
// Pomodoro sessions
// =============================================================================

/// Energy label recorded after a focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyTag {
    Energized,
    Steady,
    Neutral,
    Tired,
    Drained,
}

impl fmt::Display for EnergyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyTag::Energized => write!(f, "energized"),
            EnergyTag::Steady => write!(f, "steady"),
            EnergyTag::Neutral => write!(f, "neutral"),
            EnergyTag::Tired => write!(f, "tired"),
            EnergyTag::Drained => write!(f, "drained"),
        }
    }
}

impl FromStr for EnergyTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "energized" => Ok(EnergyTag::Energized),
            "steady" => Ok(EnergyTag::Steady),
            "neutral" => Ok(EnergyTag::Neutral),
            "tired" => Ok(EnergyTag::Tired),
            "drained" => Ok(EnergyTag::Drained),
            _ => Err(Error::InvalidArgument(format!(
                "Invalid energy tag '{}'. Expected: energized, steady, neutral, tired, drained",
                s
            ))),
        }
    }
}

/// A completed (or abandoned) focus session. Append-only: sessions are never
/// updated or deleted once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub date: DateKey,
    pub is_completed: bool,
    /// Self-reported energy 1-5; set together with `energy_tag` or not at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_tag: Option<EnergyTag>,
}

/// Caller-provided fields for a new session record.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub date: DateKey,
    pub is_completed: bool,
    pub energy_score: Option<u8>,
    pub energy_tag: Option<EnergyTag>,
}

// =============================================================================
// Weekly goals
// =============================================================================

/// A goal scoped to one ISO week. Multiple goals per week are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    /// Always a canonical Monday key.
    pub week_start_date: DateKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWeeklyGoal {
    pub title: String,
    pub week_start_date: DateKey,
    pub notes: Option<String>,
}

// =============================================================================
// Weekly reflections
// =============================================================================

/// End-of-week review. Unique per `week_start_date`: saving again for the
/// same week merges into the existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReflection {
    pub id: String,
    pub week_start_date: DateKey,
    /// Snapshot of the week's completed focus minutes, taken at save time.
    pub focus_minutes_auto: u32,
    #[serde(default)]
    pub top3_achievements: Vec<String>,
    #[serde(default)]
    pub gratitude3: Vec<String>,
    #[serde(default)]
    pub distractions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial reflection input. Absent fields leave an existing record's values
/// untouched on upsert; present lists are filtered of blank entries.
#[derive(Debug, Clone, Default)]
pub struct ReflectionDraft {
    pub week_start_date: DateKey,
    pub focus_minutes_auto: Option<u32>,
    pub top3_achievements: Option<Vec<String>>,
    pub gratitude3: Option<Vec<String>>,
    pub distractions: Option<Vec<String>>,
}

impl ReflectionDraft {
    /// Resolve this draft against an existing record for the same week.
    ///
    /// With no existing record the result is a fresh insert using `id` and
    /// `created_at`; otherwise provided fields replace the existing ones and
    /// identity is preserved. `focus_snapshot` is the week's derived focus
    /// minutes, used whenever the draft does not pin a value.
    pub fn resolve(
        self,
        existing: Option<&WeeklyReflection>,
        id: String,
        created_at: DateTime<Utc>,
        focus_snapshot: u32,
    ) -> WeeklyReflection {
        let focus_minutes_auto = self.focus_minutes_auto.unwrap_or(focus_snapshot);
        match existing {
            Some(current) => WeeklyReflection {
                id: current.id.clone(),
                week_start_date: current.week_start_date,
                focus_minutes_auto,
                top3_achievements: self
                    .top3_achievements
                    .map(filter_blank)
                    .unwrap_or_else(|| current.top3_achievements.clone()),
                gratitude3: self
                    .gratitude3
                    .map(filter_blank)
                    .unwrap_or_else(|| current.gratitude3.clone()),
                distractions: self
                    .distractions
                    .map(filter_blank)
                    .unwrap_or_else(|| current.distractions.clone()),
                created_at: current.created_at,
            },
            None => WeeklyReflection {
                id,
                week_start_date: self.week_start_date,
                focus_minutes_auto,
                top3_achievements: self.top3_achievements.map(filter_blank).unwrap_or_default(),
                gratitude3: self.gratitude3.map(filter_blank).unwrap_or_default(),
                distractions: self.distractions.map(filter_blank).unwrap_or_default(),
                created_at,
            },
        }
    }
}

fn filter_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect()
}

// =============================================================================
// Year goals
// =============================================================================

/// A long-horizon goal with manual percentage progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGoal {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// 0-100. Forced to 100 when the goal is toggled complete.
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewYearGoal {
    pub title: String,
    pub category: Option<String>,
    pub progress: u8,
    pub notes: Option<String>,
}

// =============================================================================
// Settings
// =============================================================================

/// Singleton user settings. Persisted as a single object and always updated
/// by shallow merge, never replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_pomodoro_minutes")]
    pub default_pomodoro_minutes: u32,
    /// Upper bound offered by the timer UI; at least `default_pomodoro_minutes`.
    #[serde(default = "default_max_pomodoro_minutes")]
    pub max_pomodoro_minutes: u32,
    #[serde(default)]
    pub voice_enabled: bool,
    #[serde(default = "default_true")]
    pub vibration_enabled: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
}

fn default_pomodoro_minutes() -> u32 {
    25
}

fn default_max_pomodoro_minutes() -> u32 {
    120
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_pomodoro_minutes: default_pomodoro_minutes(),
            max_pomodoro_minutes: default_max_pomodoro_minutes(),
            voice_enabled: false,
            vibration_enabled: default_true(),
            dark_mode: false,
            mission: None,
            vision: None,
            user_name: None,
            user_avatar: None,
        }
    }
}

/// Partial settings update. Absent fields never reset existing values.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub default_pomodoro_minutes: Option<u32>,
    pub max_pomodoro_minutes: Option<u32>,
    pub voice_enabled: Option<bool>,
    pub vibration_enabled: Option<bool>,
    pub dark_mode: Option<bool>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub user_name: Option<String>,
    pub user_avatar: Option<String>,
}

impl SettingsPatch {
    /// Shallow-merge this patch over `base`.
    pub fn merged_into(&self, base: &Settings) -> Settings {
        Settings {
            default_pomodoro_minutes: self
                .default_pomodoro_minutes
                .unwrap_or(base.default_pomodoro_minutes),
            max_pomodoro_minutes: self
                .max_pomodoro_minutes
                .unwrap_or(base.max_pomodoro_minutes),
            voice_enabled: self.voice_enabled.unwrap_or(base.voice_enabled),
            vibration_enabled: self.vibration_enabled.unwrap_or(base.vibration_enabled),
            dark_mode: self.dark_mode.unwrap_or(base.dark_mode),
            mission: self.mission.clone().or_else(|| base.mission.clone()),
            vision: self.vision.clone().or_else(|| base.vision.clone()),
            user_name: self.user_name.clone().or_else(|| base.user_name.clone()),
            user_avatar: self.user_avatar.clone().or_else(|| base.user_avatar.clone()),
        }
    }
}
