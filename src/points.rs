use std::ops::{Add, AddAssign};

use strum_macros::Display;

/// Which part of the user's form an exercise trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Metric {
    Strength,
    Endurance,
    Wellbeing,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Strength, Metric::Endurance, Metric::Wellbeing];
}

/// How an exercise is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rate {
    PerRep(u32),
    Per10Secs(u32),
    Per30Secs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub slug: &'static str,
    pub name: &'static str,
    pub metric: Metric,
    pub rate: Rate,
}

pub const EXERCISES: &[Exercise] = &[
    Exercise { slug: "squat", name: "Squats", metric: Metric::Strength, rate: Rate::PerRep(2) },
    Exercise { slug: "lunge", name: "Lunges", metric: Metric::Strength, rate: Rate::PerRep(3) },
    Exercise { slug: "pushup", name: "Push-ups", metric: Metric::Strength, rate: Rate::PerRep(3) },
    Exercise { slug: "pushup_knees", name: "Knee push-ups", metric: Metric::Strength, rate: Rate::PerRep(2) },
    Exercise { slug: "pushup_wall", name: "Wall push-ups", metric: Metric::Strength, rate: Rate::PerRep(1) },
    Exercise { slug: "glute_bridge", name: "Glute bridge", metric: Metric::Strength, rate: Rate::PerRep(2) },
    Exercise { slug: "crunch", name: "Crunches", metric: Metric::Strength, rate: Rate::PerRep(1) },
    Exercise { slug: "boat", name: "Boat hold", metric: Metric::Strength, rate: Rate::PerRep(2) },
    Exercise { slug: "plank", name: "Plank", metric: Metric::Strength, rate: Rate::Per10Secs(4) },
    Exercise { slug: "plank_easy", name: "Easy plank", metric: Metric::Strength, rate: Rate::Per10Secs(2) },
    Exercise { slug: "wall_sit", name: "Wall sit", metric: Metric::Strength, rate: Rate::Per10Secs(3) },
    Exercise { slug: "run_in_place", name: "Run in place", metric: Metric::Endurance, rate: Rate::Per10Secs(2) },
    Exercise { slug: "jumping_jack", name: "Jumping jacks", metric: Metric::Endurance, rate: Rate::Per10Secs(3) },
    Exercise { slug: "shadow_box", name: "Shadow boxing", metric: Metric::Endurance, rate: Rate::Per10Secs(3) },
    Exercise { slug: "burpee", name: "Burpees", metric: Metric::Endurance, rate: Rate::Per10Secs(5) },
    Exercise { slug: "stretch", name: "Stretching", metric: Metric::Wellbeing, rate: Rate::Per30Secs(1) },
    Exercise { slug: "breathing", name: "Breathing", metric: Metric::Wellbeing, rate: Rate::Per30Secs(1) },
];

pub fn find_exercise(slug: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.slug == slug)
}

/// Points per metric
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Score {
    pub strength: f64,
    pub endurance: f64,
    pub wellbeing: f64,
}

impl Score {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Strength => self.strength,
            Metric::Endurance => self.endurance,
            Metric::Wellbeing => self.wellbeing,
        }
    }

    fn slot(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Strength => &mut self.strength,
            Metric::Endurance => &mut self.endurance,
            Metric::Wellbeing => &mut self.wellbeing,
        }
    }

    pub fn total(&self) -> f64 {
        self.strength + self.endurance + self.wellbeing
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score {
            strength: self.strength + rhs.strength,
            endurance: self.endurance + rhs.endurance,
            wellbeing: self.wellbeing + rhs.wellbeing,
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::default(), Add::add)
    }
}

/// Points earned for one exercise. Reps only count for rep-scored
/// exercises and seconds only for time-scored ones; unknown slugs score zero.
pub fn exercise_points(slug: &str, reps: Option<u32>, seconds: Option<u32>) -> Score {
    let mut score = Score::default();
    let Some(exercise) = find_exercise(slug) else {
        tracing::debug!(slug, "unknown exercise scored as zero");
        return score;
    };

    let points = match (exercise.rate, reps, seconds) {
        (Rate::PerRep(per), Some(reps), _) => f64::from(per) * f64::from(reps),
        (Rate::Per10Secs(per), _, Some(secs)) => f64::from(per) * f64::from(secs) / 10.0,
        (Rate::Per30Secs(per), _, Some(secs)) => f64::from(per) * f64::from(secs) / 30.0,
        _ => 0.0,
    };
    *score.slot(exercise.metric) += points;
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_scored() {
        let score = exercise_points("squat", Some(15), None);
        assert_eq!(score.strength, 30.0);
        assert_eq!(score.endurance, 0.0);
        assert_eq!(score.total(), 30.0);
    }

    #[test]
    fn test_time_scored() {
        assert_eq!(exercise_points("plank", None, Some(30)).strength, 12.0);
        assert_eq!(exercise_points("jumping_jack", None, Some(20)).endurance, 6.0);
        assert_eq!(exercise_points("breathing", None, Some(90)).wellbeing, 3.0);
        assert_eq!(exercise_points("burpee", None, Some(15)).endurance, 7.5);
    }

    #[test]
    fn test_mismatched_inputs_score_zero() {
        assert_eq!(exercise_points("squat", None, Some(60)), Score::default());
        assert_eq!(exercise_points("plank", Some(10), None), Score::default());
    }

    #[test]
    fn test_unknown_exercise() {
        assert_eq!(exercise_points("handstand", Some(10), Some(10)), Score::default());
    }

    #[test]
    fn test_score_sum_and_get() {
        let total: Score = [
            exercise_points("squat", Some(10), None),
            exercise_points("run_in_place", None, Some(60)),
            exercise_points("stretch", None, Some(60)),
        ]
        .into_iter()
        .sum();

        assert_eq!(total.get(Metric::Strength), 20.0);
        assert_eq!(total.get(Metric::Endurance), 12.0);
        assert_eq!(total.get(Metric::Wellbeing), 2.0);
        assert_eq!(Metric::ALL.iter().map(|m| total.get(*m)).sum::<f64>(), 34.0);
    }

    #[test]
    fn test_slugs_are_unique() {
        for (i, a) in EXERCISES.iter().enumerate() {
            for b in &EXERCISES[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }
}
