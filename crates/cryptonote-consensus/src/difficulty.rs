//! Difficulty retargeting.
//!
//! Three generations of next-block difficulty over a window of past block
//! timestamps and cumulative difficulties, oldest first:
//!
//! 1. [`DifficultyAlgorithm::Classic`]: windowed average with outlier cut.
//! 2. [`DifficultyAlgorithm::Poisson`]: the classic span blended with the
//!    median solve time, bounded per block.
//! 3. [`DifficultyAlgorithm::Lwma`] and [`DifficultyAlgorithm::Lwma2`]:
//!    linearly weighted moving averages of solve times.
//!
//! The calculator is stateless. Which generation applies at a height is a
//! policy decision, see [`crate::Currency::difficulty_algorithm`].
//!
//! A return value of `0` is the failure sentinel: the computation overflowed
//! or produced a non-finite intermediate. Callers treat it as "no result".

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::params;
use crate::Difficulty;

/// Retarget algorithm generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyAlgorithm {
    /// Generation 1.
    Classic,
    /// Generation 2.
    Poisson,
    /// Generation 3, harmonic-mean LWMA.
    Lwma,
    /// Generation 3, LWMA-2.
    Lwma2,
    /// LWMA-2 with the lower short-window guess.
    Lwma2Lower,
}

/// Parameters the retarget algorithms read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyParams {
    /// Target block interval in seconds.
    pub target: u64,
    /// Generation 1 window.
    pub window: usize,
    /// Samples trimmed from each end in generations 1 and 2.
    pub cut: usize,
    /// Generation 2 window.
    pub poisson_window: usize,
    /// LWMA window, N + 1 samples.
    pub lwma_window: usize,
    /// LWMA-2 window, N + 1 samples.
    pub lwma2_window: usize,
    /// Generation 2 per-block timespan bounds.
    pub min_average_timespan: u64,
    pub max_average_timespan: u64,
    /// LWMA result floor.
    pub lwma_min_difficulty: Difficulty,
    /// LWMA-2 results with fewer than 4 samples.
    pub lwma2_lower_guess: Difficulty,
    pub lwma2_guess: Difficulty,
}

impl Default for DifficultyParams {
    fn default() -> Self {
        Self {
            target: params::DIFFICULTY_TARGET,
            window: params::DIFFICULTY_WINDOW,
            cut: params::DIFFICULTY_CUT,
            poisson_window: params::DIFFICULTY_WINDOW_V1,
            lwma_window: params::DIFFICULTY_WINDOW_V2,
            lwma2_window: params::DIFFICULTY_WINDOW_V3,
            min_average_timespan: params::MIN_AVERAGE_TIMESPAN,
            max_average_timespan: params::MAX_AVERAGE_TIMESPAN,
            lwma_min_difficulty: params::LWMA_MIN_DIFFICULTY,
            lwma2_lower_guess: params::LWMA2_LOWER_DIFFICULTY_GUESS,
            lwma2_guess: params::LWMA2_DIFFICULTY_GUESS,
        }
    }
}

/// Difficulty calculator over a set of [`DifficultyParams`].
pub struct DifficultyCalculator<'a> {
    params: &'a DifficultyParams,
}

/// Keep the `window` most recent samples of both series, aligned at the newest.
fn most_recent<'t>(
    timestamps: &'t [u64],
    cumulative_difficulties: &'t [Difficulty],
    window: usize,
) -> (&'t [u64], &'t [Difficulty]) {
    let length = timestamps.len().min(cumulative_difficulties.len()).min(window);
    (
        &timestamps[timestamps.len() - length..],
        &cumulative_difficulties[cumulative_difficulties.len() - length..],
    )
}

/// Symmetric trim: keep `window - 2 * cut` samples centred in the sorted window.
fn cut_bounds(length: usize, window: usize, cut: usize) -> (usize, usize) {
    let kept = window.saturating_sub(2 * cut).max(2);
    if length <= kept {
        (0, length)
    } else {
        let begin = (length - kept + 1) / 2;
        (begin, begin + kept)
    }
}

/// `ceil(work * target / span)` in 128 bits. `0` when the product does not fit 64 bits.
fn scaled_work(work: Difficulty, target: u64, overflow_span: u64, span: u64) -> Difficulty {
    let product = u128::from(work) * u128::from(target);
    if product + u128::from(overflow_span) - 1 > u128::from(u64::MAX) {
        return 0;
    }
    let span = u128::from(span.max(1));
    ((product + span - 1) / span) as Difficulty
}

/// Convert a floating retarget result, `0` when it is not a representable difficulty.
fn float_to_difficulty(value: f64) -> Difficulty {
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return 0;
    }
    value as Difficulty
}

impl<'a> DifficultyCalculator<'a> {
    pub fn new(params: &'a DifficultyParams) -> Self {
        Self { params }
    }

    /// Run the given algorithm.
    pub fn calculate(
        &self,
        algorithm: DifficultyAlgorithm,
        timestamps: &[u64],
        cumulative_difficulties: &[Difficulty],
    ) -> Difficulty {
        let next = match algorithm {
            DifficultyAlgorithm::Classic => {
                self.next_difficulty_classic(timestamps, cumulative_difficulties)
            }
            DifficultyAlgorithm::Poisson => {
                self.next_difficulty_poisson(timestamps, cumulative_difficulties)
            }
            DifficultyAlgorithm::Lwma => {
                self.next_difficulty_lwma(timestamps, cumulative_difficulties)
            }
            DifficultyAlgorithm::Lwma2 => {
                self.next_difficulty_lwma2(timestamps, cumulative_difficulties, false)
            }
            DifficultyAlgorithm::Lwma2Lower => {
                self.next_difficulty_lwma2(timestamps, cumulative_difficulties, true)
            }
        };

        debug!(
            ?algorithm,
            samples = timestamps.len(),
            next_difficulty = next,
            "Difficulty retarget"
        );

        next
    }

    /// Generation 1: average work per second over the trimmed window.
    pub fn next_difficulty_classic(
        &self,
        timestamps: &[u64],
        cumulative_difficulties: &[Difficulty],
    ) -> Difficulty {
        let (timestamps, cumulative_difficulties) =
            most_recent(timestamps, cumulative_difficulties, self.params.window);

        let length = timestamps.len();
        if length <= 1 {
            return 1;
        }

        let mut sorted = timestamps.to_vec();
        sorted.sort_unstable();

        let (cut_begin, cut_end) = cut_bounds(length, self.params.window, self.params.cut);
        let time_span = (sorted[cut_end - 1] - sorted[cut_begin]).max(1);

        let Some(total_work) =
            cumulative_difficulties[cut_end - 1].checked_sub(cumulative_difficulties[cut_begin])
        else {
            trace!("Cumulative difficulty decreased inside window");
            return 0;
        };

        scaled_work(total_work, self.params.target, time_span, time_span)
    }

    /// Generation 2: blend the trimmed span with the median solve time.
    pub fn next_difficulty_poisson(
        &self,
        timestamps: &[u64],
        cumulative_difficulties: &[Difficulty],
    ) -> Difficulty {
        let window = self.params.poisson_window;
        let (timestamps, cumulative_difficulties) =
            most_recent(timestamps, cumulative_difficulties, window);

        let length = timestamps.len();
        if length <= 1 {
            return 1;
        }

        let mut sorted = timestamps.to_vec();
        sorted.sort_unstable();

        let (cut_begin, cut_end) = cut_bounds(length, window, self.params.cut);
        let time_span = (sorted[cut_end - 1] - sorted[cut_begin]).max(1);

        let mut timespan_median: u64 = 0;
        if cut_begin > 0 && length >= cut_begin * 2 + 3 {
            let mut spans: Vec<u64> = (length - cut_begin * 2 - 3..length - 1)
                .map(|i| (sorted[i + 1] - sorted[i]).max(1))
                .collect();
            spans.sort_unstable();
            let n = spans.len();
            let median = if n % 2 == 0 {
                (u128::from(spans[n / 2 - 1]) + u128::from(spans[n / 2])) as f64 / 2.0
            } else {
                spans[n / 2] as f64
            };
            timespan_median = median as u64;
        }

        let timespan_length = (length - cut_begin * 2 - 1) as u128;
        let total_timespan_median = if timespan_median > 0 {
            u128::from(timespan_median) * timespan_length
        } else {
            u128::from(time_span) * 7 / 10
        };

        let max_total = u128::from(self.params.max_average_timespan) * timespan_length;
        let min_total = u128::from(self.params.min_average_timespan) * timespan_length;
        let adjusted = ((u128::from(time_span) * 8 + total_timespan_median * 3) / 10)
            .min(max_total)
            .max(min_total)
            .max(1);

        let Some(total_work) =
            cumulative_difficulties[cut_end - 1].checked_sub(cumulative_difficulties[cut_begin])
        else {
            trace!("Cumulative difficulty decreased inside window");
            return 0;
        };

        let adjusted = u64::try_from(adjusted).unwrap_or(u64::MAX);
        match scaled_work(total_work, self.params.target, time_span, adjusted) {
            0 => 0,
            next => next.max(1),
        }
    }

    /// Generation 3: harmonic-mean difficulty over the linearly weighted solve time.
    pub fn next_difficulty_lwma(
        &self,
        timestamps: &[u64],
        cumulative_difficulties: &[Difficulty],
    ) -> Difficulty {
        if timestamps.len() < 4 || cumulative_difficulties.len() < 4 {
            return 1;
        }

        let (timestamps, cumulative_difficulties) =
            most_recent(timestamps, cumulative_difficulties, self.params.lwma_window);

        let Ok(t) = i64::try_from(self.params.target) else {
            return 0;
        };
        let Some(bound) = t.checked_mul(7) else {
            return 0;
        };
        let n = (timestamps.len() - 1) as i64;
        let k = (n * (n + 1)) as f64 / 2.0;

        let mut lwma = 0.0f64;
        let mut sum_inverse_d = 0.0f64;
        for i in 1..=n as usize {
            let solve_time = (timestamps[i] as i64)
                .wrapping_sub(timestamps[i - 1] as i64)
                .clamp(-bound, bound);
            let Some(difficulty) =
                cumulative_difficulties[i].checked_sub(cumulative_difficulties[i - 1])
            else {
                trace!("Cumulative difficulty decreased inside window");
                return 0;
            };
            lwma += solve_time as f64 * i as f64 / k;
            sum_inverse_d += 1.0 / difficulty as f64;
        }

        let harmonic_mean_d = n as f64 / sum_inverse_d * 0.998;

        if (lwma.round() as i64) < t / 4 {
            lwma = (t / 4) as f64;
        }

        let next = float_to_difficulty(harmonic_mean_d * t as f64 / lwma);
        trace!(samples = timestamps.len(), next, "LWMA estimate");

        if next == 0 {
            return 0;
        }
        next.max(self.params.lwma_min_difficulty)
    }

    /// Generation 3, LWMA-2: total work over linearly weighted time, bounded
    /// relative to the previous block's difficulty.
    pub fn next_difficulty_lwma2(
        &self,
        timestamps: &[u64],
        cumulative_difficulties: &[Difficulty],
        lower: bool,
    ) -> Difficulty {
        if timestamps.len() < 4 || cumulative_difficulties.len() < 4 {
            return if lower {
                self.params.lwma2_lower_guess
            } else {
                self.params.lwma2_guess
            };
        }

        let (timestamps, cumulative_difficulties) =
            most_recent(timestamps, cumulative_difficulties, self.params.lwma2_window);

        let t = i128::from(self.params.target);
        let n = timestamps.len() - 1;

        let mut weighted_time: i128 = 0;
        let mut sum_3_st: i128 = 0;
        for i in 1..=n {
            let st = (i128::from(timestamps[i]) - i128::from(timestamps[i - 1]))
                .clamp(-6 * t, 6 * t);
            weighted_time += st * i as i128;
            if i + 3 > n {
                sum_3_st += st;
            }
        }
        if weighted_time <= 0 {
            weighted_time = 1;
        }

        let cd = |i: usize| i128::from(cumulative_difficulties[i]);
        let n_wide = n as i128;

        let mut next_d = ((cd(n) - cd(0)) * t * (n_wide + 1) * 99) / (100 * 2 * weighted_time);

        let prev_d = cd(n) - cd(n - 1);
        next_d = ((prev_d * 67) / 100).max(next_d.min((prev_d * 150) / 100));
        if sum_3_st < (8 * t) / 10 {
            next_d = next_d.max((prev_d * 110) / 100);
        }

        trace!(samples = timestamps.len(), %next_d, prev_d = %prev_d, "LWMA-2 estimate");

        if next_d <= 0 {
            return 0;
        }
        Difficulty::try_from(next_d).unwrap_or(0)
    }
}
