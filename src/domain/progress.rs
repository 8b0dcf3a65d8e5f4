/// Default starting capital for goal tracking.
pub const DEFAULT_START_CAPITAL: f64 = 5_000.0;

/// Default capital goal.
pub const DEFAULT_GOAL_CAPITAL: f64 = 100_000.0;

/// Progress of current capital toward a capital goal.
///
/// The log-scaled figure is the one meant for display: growth under fixed
/// fractional risk compounds geometrically, so linear progress understates
/// early gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub current: f64,
    pub start: f64,
    pub goal: f64,
    /// (current - start) / (goal - start), clamped to [0, 1]
    pub linear_progress: f64,
    /// log2(goal / start)
    pub total_doublings: f64,
    /// log2(current / start)
    pub completed_doublings: f64,
    /// completed / total doublings, clamped to [0, 1]
    pub log_progress: f64,
}

impl GoalProgress {
    pub fn calculate(current: f64, start: f64, goal: f64) -> Self {
        let linear_progress = ((current - start) / (goal - start)).clamp(0.0, 1.0);
        let total_doublings = (goal / start).log2();
        let completed_doublings = (current / start).log2();
        let log_progress = (completed_doublings / total_doublings).clamp(0.0, 1.0);

        Self {
            current,
            start,
            goal,
            linear_progress,
            total_doublings,
            completed_doublings,
            log_progress,
        }
    }

    pub fn with_defaults(current: f64) -> Self {
        Self::calculate(current, DEFAULT_START_CAPITAL, DEFAULT_GOAL_CAPITAL)
    }
}
