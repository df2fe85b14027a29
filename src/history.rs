//! In-memory training log.
//!
//! Seeded with a handful of demo sessions; every session the controller
//! finishes during the run is appended. Nothing is written to disk.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use itertools::Itertools;

use crate::mood::Mood;
use crate::points::{exercise_points, Score};
use crate::session::SessionSummary;

/// One exercise as performed within a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    pub slug: String,
    pub reps: Option<u32>,
    pub seconds: Option<u32>,
}

impl ExerciseLog {
    pub fn reps(slug: &str, reps: u32) -> Self {
        Self {
            slug: slug.to_string(),
            reps: Some(reps),
            seconds: None,
        }
    }

    pub fn timed(slug: &str, seconds: u32) -> Self {
        Self {
            slug: slug.to_string(),
            reps: None,
            seconds: Some(seconds),
        }
    }

    pub fn points(&self) -> Score {
        exercise_points(&self.slug, self.reps, self.seconds)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub finished_at: DateTime<Local>,
    pub planned_seconds: u64,
    pub elapsed_seconds: u64,
    pub sets: u32,
    pub completed: bool,
    pub mood: Mood,
    pub exercises: Vec<ExerciseLog>,
}

impl HistoryEntry {
    pub fn from_summary(summary: &SessionSummary, mood: Mood) -> Self {
        Self {
            finished_at: summary.finished_at,
            planned_seconds: summary.planned_seconds,
            elapsed_seconds: summary.elapsed_seconds,
            sets: summary.sets,
            completed: summary.completed,
            mood,
            exercises: Vec::new(),
        }
    }

    pub fn points(&self) -> Score {
        self.exercises.iter().map(ExerciseLog::points).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A few sessions from the past week so the history and points tabs
    /// have something to show on first launch
    pub fn demo() -> Self {
        let now = Local::now();
        let day = |n: i64| now - ChronoDuration::days(n);

        let entries = vec![
            HistoryEntry {
                finished_at: day(6),
                planned_seconds: 1800,
                elapsed_seconds: 1800,
                sets: 6,
                completed: true,
                mood: Mood::new(40),
                exercises: vec![
                    ExerciseLog::reps("squat", 20),
                    ExerciseLog::reps("pushup", 12),
                    ExerciseLog::timed("plank", 60),
                    ExerciseLog::timed("stretch", 120),
                ],
            },
            HistoryEntry {
                finished_at: day(4),
                planned_seconds: 1200,
                elapsed_seconds: 840,
                sets: 3,
                completed: false,
                mood: Mood::new(-30),
                exercises: vec![
                    ExerciseLog::timed("jumping_jack", 90),
                    ExerciseLog::reps("lunge", 16),
                    ExerciseLog::timed("breathing", 60),
                ],
            },
            HistoryEntry {
                finished_at: day(1),
                planned_seconds: 900,
                elapsed_seconds: 900,
                sets: 5,
                completed: true,
                mood: Mood::new(75),
                exercises: vec![
                    ExerciseLog::timed("burpee", 60),
                    ExerciseLog::timed("shadow_box", 120),
                    ExerciseLog::reps("crunch", 30),
                    ExerciseLog::timed("wall_sit", 45),
                ],
            },
        ];

        Self { entries }
    }

    pub fn record(&mut self, summary: &SessionSummary, mood: Mood) {
        tracing::info!(
            elapsed = summary.elapsed_seconds,
            sets = summary.sets,
            completed = summary.completed,
            "session added to history"
        );
        self.entries.push(HistoryEntry::from_summary(summary, mood));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first
    pub fn newest_first(&self) -> Vec<&HistoryEntry> {
        self.entries
            .iter()
            .sorted_by(|a, b| b.finished_at.cmp(&a.finished_at))
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.completed).count()
    }

    pub fn total_points(&self) -> Score {
        self.entries.iter().map(HistoryEntry::points).sum()
    }

    pub fn total_elapsed_seconds(&self) -> u64 {
        self.entries.iter().map(|e| e.elapsed_seconds).sum()
    }

    pub fn mean_elapsed_minutes(&self) -> Option<f64> {
        let minutes = self.elapsed_minutes();
        match minutes.len() {
            0 => None,
            count => Some(minutes.iter().sum::<f64>() / count as f64),
        }
    }

    /// Population standard deviation of session length, in minutes
    pub fn elapsed_std_dev(&self) -> Option<f64> {
        let mean = self.mean_elapsed_minutes()?;
        let minutes = self.elapsed_minutes();
        let variance = minutes
            .iter()
            .map(|m| {
                let diff = mean - m;
                diff * diff
            })
            .sum::<f64>()
            / minutes.len() as f64;

        Some(variance.sqrt())
    }

    pub fn mean_mood(&self) -> Option<Mood> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: i64 = self.entries.iter().map(|e| i64::from(e.mood.value())).sum();
        Some(Mood::new((sum / self.entries.len() as i64) as i32))
    }

    fn elapsed_minutes(&self) -> Vec<f64> {
        self.entries
            .iter()
            .map(|e| e.elapsed_seconds as f64 / 60.0)
            .collect()
    }
}
