//! Conversion of 10 MHz acquisition-counter timestamps to seconds.
//!
//! Behavior and eye-camera recordings stamp each sample with a free-running
//! 32-bit counter. The counter wraps at `2^32`, writes `2^31 - 1` when a
//! camera drops a stamp, and in packetized streams repeats one stamp for a
//! whole packet of samples.

use crate::error::CoreError;

/// Counter value written in place of a missing camera timestamp.
pub const BAD_TIMESTAMP: f64 = 2_147_483_647.0;

/// Period of the 32-bit counter.
pub const COUNTER_WRAP: f64 = 4_294_967_296.0;

/// Counter frequency in Hz.
pub const DEFAULT_SAMPLING_RATE: f64 = 1e7;

/// More bad stamps than this and the recording is rejected.
pub const MAX_BAD_TIMESTAMPS: usize = 10;

/// Seconds per sample plus a flag per sample that held [`BAD_TIMESTAMP`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedTimestamps {
    pub seconds: Vec<f64>,
    pub bad: Vec<bool>,
}

/// Convert raw counter stamps to seconds.
///
/// `packet_length` is only consulted when the stamps repeat; the first
/// increasing step must then come at the end of the first packet. Samples
/// inside a packet are placed by linear interpolation between packet starts,
/// and samples after the last packet start are extrapolated along the last
/// segment.
pub fn counter_to_seconds(
    raw: &[f64],
    packet_length: usize,
    sampling_rate: f64,
) -> Result<ConvertedTimestamps, CoreError> {
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(CoreError::Validation(format!(
            "Sampling rate must be positive (got {sampling_rate})"
        )));
    }

    let bad: Vec<bool> = raw.iter().map(|&t| t == BAD_TIMESTAMP).collect();
    let bad_count = bad.iter().filter(|&&b| b).count();
    if bad_count > MAX_BAD_TIMESTAMPS {
        return Err(CoreError::BadTimestamps { count: bad_count });
    }

    let seconds: Vec<f64> = unwrap_counter(raw)
        .into_iter()
        .map(|t| t / sampling_rate)
        .collect();

    if seconds.windows(2).all(|w| w[1] > w[0]) {
        return Ok(ConvertedTimestamps { seconds, bad });
    }

    // Packet starts: sample 0 and every sample after an increasing step.
    let steps: Vec<usize> = seconds
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0])
        .map(|(i, _)| i)
        .collect();
    match steps.first() {
        Some(&first) if first + 1 == packet_length => {}
        Some(&first) => {
            return Err(CoreError::Validation(format!(
                "Timestamps repeat in packets of {} samples, expected {packet_length}",
                first + 1
            )))
        }
        None => {
            return Err(CoreError::Validation(
                "Timestamps never increase; cannot recover packet timing".to_string(),
            ))
        }
    }

    let knots: Vec<usize> = std::iter::once(0)
        .chain(steps.iter().map(|i| i + 1))
        .collect();
    let seconds = interpolate_linear(&knots, &seconds);
    Ok(ConvertedTimestamps { seconds, bad })
}

/// Add one counter period after every backwards step.
fn unwrap_counter(raw: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(raw.len());
    let mut offset = 0.0;
    for &t in raw {
        let mut value = t + offset;
        if let Some(&prev) = out.last() {
            while value < prev {
                offset += COUNTER_WRAP;
                value += COUNTER_WRAP;
            }
        }
        out.push(value);
    }
    out
}

/// Evaluate the piecewise-linear function through `(k, values[k])` for each
/// knot `k` at every sample index. `knots` is ascending, starts at 0, and
/// holds at least two entries.
fn interpolate_linear(knots: &[usize], values: &[f64]) -> Vec<f64> {
    let mut segment = 0;
    (0..values.len())
        .map(|i| {
            while segment + 2 < knots.len() && i > knots[segment + 1] {
                segment += 1;
            }
            let (k0, k1) = (knots[segment], knots[segment + 1]);
            let (v0, v1) = (values[k0], values[k1]);
            let slope = (v1 - v0) / (k1 - k0) as f64;
            v0 + slope * (i as f64 - k0 as f64)
        })
        .collect()
}
