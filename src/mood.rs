pub const MOOD_MIN: i32 = -100;
pub const MOOD_MAX: i32 = 100;

/// How the user says they feel before training, on a -100..=100 slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mood(i32);

impl Mood {
    pub fn new(value: i32) -> Self {
        Mood(value.clamp(MOOD_MIN, MOOD_MAX))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Move the slider, staying inside its range
    pub fn nudge(&mut self, delta: i32) {
        *self = Mood::new(self.0.saturating_add(delta));
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            v if v <= -60 => "Very unpleasant",
            v if v <= -20 => "Unpleasant",
            v if v < 20 => "Neutral",
            v if v < 60 => "Pleasant",
            _ => "Very pleasant",
        }
    }

    /// Slider position as 0.0 (far left) ..= 1.0 (far right)
    pub fn ratio(&self) -> f64 {
        (self.0 - MOOD_MIN) as f64 / (MOOD_MAX - MOOD_MIN) as f64
    }
}
