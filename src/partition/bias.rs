//! Bias-based skew assignment with an optional reserved server pool.
//!
//! Participants are arranged into one group per class. A sample with label
//! `y` lands in group `y` with probability `bias` and in any other group
//! with the remaining probability spread evenly, so higher `bias` means a
//! stronger label-to-group correlation. When a server pool is configured,
//! samples are diverted to it until each class meets its quota.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::LabelSource;
use crate::error::PartaError;
use crate::partition::PartitionMap;

/// Configuration of the reserved server pool.
///
/// The pool holds `size` samples in total. The favored class receives a
/// `favored_fraction` share; the rest is spread near-equally over the
/// remaining classes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServerPool {
    /// Total number of samples to reserve
    pub size: usize,
    /// Class receiving the concentrated share
    pub favored_class: usize,
    /// Fraction of the pool reserved for the favored class, in `[0, 1]`
    pub favored_fraction: f64,
}

impl ServerPool {
    /// Create a server pool configuration.
    pub fn new(size: usize, favored_class: usize, favored_fraction: f64) -> Self {
        Self {
            size,
            favored_class,
            favored_fraction,
        }
    }
}

/// Bias-based skew assignment.
///
/// Walks the dataset in order; each sample is routed to the server pool
/// (while its class quota is unmet), to a participant in its drawn group,
/// or - at floating-point edges of the group computation - to the explicit
/// unassigned list. Deterministic for a fixed `rng` state.
///
/// # Arguments
///
/// * `data` - Label source to partition
/// * `participants` - Number of participants, arranged into one group per class
/// * `bias` - Label-to-group correlation strength in `[0, 1]`
/// * `server` - Server pool configuration; `None` disables the pool
/// * `rng` - Seeded random source
pub fn assign_by_bias<D, R>(
    data: &D,
    participants: usize,
    bias: f64,
    server: Option<&ServerPool>,
    rng: &mut R,
) -> Result<PartitionMap, PartaError>
where
    D: LabelSource + ?Sized,
    R: Rng,
{
    if participants == 0 {
        return Err(PartaError::ZeroParticipants);
    }
    if !(0.0..=1.0).contains(&bias) {
        return Err(PartaError::InvalidBias(bias));
    }
    if data.is_empty() {
        return Err(PartaError::EmptyDataset);
    }

    let num_labels = (0..data.len())
        .map(|i| data.label(i))
        .max()
        .map(|max| max + 1)
        .unwrap_or(0);

    if let Some(pool) = server {
        if !(0.0..=1.0).contains(&pool.favored_fraction) {
            return Err(PartaError::InvalidServerFraction(pool.favored_fraction));
        }
        if pool.favored_class >= num_labels {
            return Err(PartaError::LabelOutOfRange {
                label: pool.favored_class,
                num_classes: num_labels,
            });
        }
    }

    let quotas = server.map(|pool| server_quotas(pool, num_labels));
    let mut server_counts = vec![0usize; num_labels];
    let per_group = participants as f64 / num_labels as f64;

    let mut map = PartitionMap::with_participants(participants);

    for index in 0..data.len() {
        let label = data.label(index);
        let group = draw_group(label, num_labels, bias, rng.gen::<f64>());

        if let Some(quotas) = &quotas {
            if server_counts[label] < quotas[label] {
                map.push_server(index);
                server_counts[label] += 1;
                continue;
            }
        }

        match group {
            Some(group) => {
                let offset = (rng.gen::<f64>() * per_group).floor();
                let worker = ((group as f64 * per_group + offset) as usize).min(participants - 1);
                map.push_participant(worker, index);
            }
            None => map.push_unassigned(index),
        }
    }

    Ok(map)
}

/// Draw the destination group for a sample with label `y`.
///
/// The home interval `[lower, lower + bias)` keeps the sample in group
/// `y`; draws outside it decay linearly over the other groups. Returns
/// `None` when the computed group falls outside `[0, num_labels)`, which
/// can happen at floating-point edges of the interval arithmetic.
fn draw_group(y: usize, num_labels: usize, bias: f64, draw: f64) -> Option<usize> {
    if num_labels == 1 {
        return Some(0);
    }

    let others = (num_labels - 1) as f64;
    let lower = y as f64 * (1.0 - bias) / others;
    let upper = lower + bias;
    let other_width = (1.0 - bias) / others;

    let group = if draw > upper {
        if other_width == 0.0 {
            return None;
        }
        ((draw - upper) / other_width).floor() as usize + y + 1
    } else if draw < lower {
        (draw / other_width).floor() as usize
    } else {
        y
    };

    (group < num_labels).then_some(group)
}

/// Per-class server quotas.
///
/// The favored class takes `floor(size * fraction)`; the remainder is
/// spread near-equally over the other classes with the fractional residue
/// carried forward, and the final class absorbs whatever rounding left
/// over.
fn server_quotas(pool: &ServerPool, num_labels: usize) -> Vec<usize> {
    let mut quotas = vec![0usize; num_labels];
    if num_labels == 1 {
        quotas[0] = pool.size;
        return quotas;
    }

    let favored = (pool.size as f64 * pool.favored_fraction) as usize;
    quotas[pool.favored_class] = favored;

    let average = (pool.size - favored) as f64 / (num_labels - 1) as f64;
    let residue = average - average.floor();
    let mut carry = 0.0;
    for class in 0..num_labels - 1 {
        if class == pool.favored_class {
            continue;
        }
        quotas[class] = average as usize;
        carry += residue;
        if carry >= 1.0 {
            quotas[class] += 1;
            carry -= 1.0;
        }
    }

    let allocated: usize = quotas[..num_labels - 1].iter().sum();
    quotas[num_labels - 1] = pool.size.saturating_sub(allocated);
    quotas
}
