use crate::prelude::{ChromaResult, DetectionParameters};
use crate::telemetry::log::LogManager;
use ndarray::ArrayView1;

/// A detected apex with its resolved boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakCandidate {
    pub apex_index: usize,
    pub left_boundary_index: usize,
    pub right_boundary_index: usize,
    pub prominence: f64,
    /// Valley floors the prominence was measured against.
    pub left_base: usize,
    pub right_base: usize,
    /// Interpolated crossing positions before rounding.
    pub left_crossing: f64,
    pub right_crossing: f64,
}

impl PeakCandidate {
    pub fn width(&self) -> usize {
        self.right_boundary_index - self.left_boundary_index
    }
}

/// Local-maximum peak finder with distance, prominence and width filters.
///
/// Stages run in a fixed order on the candidate set:
/// 1. local maxima (flat tops collapse to their midpoint)
/// 2. minimum spacing, tallest first, leftmost on ties
/// 3. minimum topographic prominence
/// 4. boundaries at `relative_height` of the prominence, then the width bounds
pub struct PeakDetector {
    logger: LogManager,
}

impl PeakDetector {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("chromacore::detector"),
        }
    }

    /// Candidates ordered by increasing apex index. An empty result is valid.
    pub fn detect(
        &self,
        values: ArrayView1<f64>,
        params: &DetectionParameters,
    ) -> ChromaResult<Vec<PeakCandidate>> {
        params.validate()?;

        let maxima = local_maxima(values);
        self.logger
            .trace_stage(&format!("{} local maxima", maxima.len()));

        let spaced = select_by_distance(values, &maxima, params.distance);
        self.logger
            .trace_stage(&format!("{} after distance {}", spaced.len(), params.distance));

        let prominent: Vec<(usize, Prominence)> = spaced
            .into_iter()
            .map(|apex| (apex, prominence(values, apex)))
            .filter(|(_, prom)| prom.value >= params.prominence)
            .collect();
        self.logger.trace_stage(&format!(
            "{} after prominence {}",
            prominent.len(),
            params.prominence
        ));

        let candidates: Vec<PeakCandidate> = prominent
            .into_iter()
            .map(|(apex, prom)| resolve_boundaries(values, apex, prom, params.relative_height))
            .filter(|candidate| (params.min_width..=params.max_width).contains(&candidate.width()))
            .collect();
        self.logger.trace_stage(&format!(
            "{} within width [{}, {}]",
            candidates.len(),
            params.min_width,
            params.max_width
        ));

        Ok(candidates)
    }
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct Prominence {
    value: f64,
    left_base: usize,
    right_base: usize,
}

/// Indices strictly higher than both neighbours. A flat top counts once, at
/// the midpoint of its run, when both of its edges are strictly lower.
fn local_maxima(values: ArrayView1<f64>) -> Vec<usize> {
    let n = values.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let last = n - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }

    maxima
}

/// Greedy spacing filter over sorted apexes: the tallest remaining apex
/// removes every neighbour closer than `distance` samples.
fn select_by_distance(values: ArrayView1<f64>, apexes: &[usize], distance: usize) -> Vec<usize> {
    if distance <= 1 {
        return apexes.to_vec();
    }

    let mut priority: Vec<usize> = (0..apexes.len()).collect();
    priority.sort_by(|&a, &b| {
        values[apexes[b]]
            .total_cmp(&values[apexes[a]])
            .then(apexes[a].cmp(&apexes[b]))
    });

    let mut keep = vec![true; apexes.len()];
    for &j in &priority {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && apexes[j] - apexes[k - 1] < distance {
            k -= 1;
            keep[k] = false;
        }
        let mut k = j + 1;
        while k < apexes.len() && apexes[k] - apexes[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    apexes
        .iter()
        .zip(keep)
        .filter(|(_, kept)| *kept)
        .map(|(&apex, _)| apex)
        .collect()
}

/// Height of the apex above the higher of its two valley floors. Each floor
/// is the lowest sample met while walking outwards until a strictly higher
/// sample or the end of the series.
fn prominence(values: ArrayView1<f64>, apex: usize) -> Prominence {
    let height = values[apex];

    let mut left_min = height;
    let mut left_base = apex;
    for i in (0..=apex).rev() {
        if values[i] > height {
            break;
        }
        if values[i] < left_min {
            left_min = values[i];
            left_base = i;
        }
    }

    let mut right_min = height;
    let mut right_base = apex;
    for i in apex..values.len() {
        if values[i] > height {
            break;
        }
        if values[i] < right_min {
            right_min = values[i];
            right_base = i;
        }
    }

    Prominence {
        value: height - left_min.max(right_min),
        left_base,
        right_base,
    }
}

/// Walk down both flanks until the signal reaches
/// `apex - relative_height * prominence`, interpolate linearly between the
/// bracketing samples and round (half to even) to sample indices.
///
/// The walk never passes the prominence bases, which lie inside the series,
/// so boundaries are clamped to index 0 and the last index at worst.
fn resolve_boundaries(
    values: ArrayView1<f64>,
    apex: usize,
    prom: Prominence,
    relative_height: f64,
) -> PeakCandidate {
    let level = values[apex] - prom.value * relative_height;

    let mut i = apex;
    while prom.left_base < i && level < values[i] {
        i -= 1;
    }
    let mut left_crossing = i as f64;
    if values[i] < level {
        left_crossing += (level - values[i]) / (values[i + 1] - values[i]);
    }

    let mut i = apex;
    while i < prom.right_base && level < values[i] {
        i += 1;
    }
    let mut right_crossing = i as f64;
    if values[i] < level {
        right_crossing -= (level - values[i]) / (values[i - 1] - values[i]);
    }

    let last = values.len() - 1;
    let left_boundary_index = to_index(left_crossing, last).min(apex);
    let right_boundary_index = to_index(right_crossing, last).max(apex);

    PeakCandidate {
        apex_index: apex,
        left_boundary_index,
        right_boundary_index,
        prominence: prom.value,
        left_base: prom.left_base,
        right_base: prom.right_base,
        left_crossing,
        right_crossing,
    }
}

fn to_index(position: f64, last: usize) -> usize {
    (position.round_ties_even().max(0.0) as usize).min(last)
}
