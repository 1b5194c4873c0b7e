//! Dirichlet-distributed non-IID allocation.
//!
//! For each class the pool is shuffled, a probability vector over
//! participants is drawn from `Dirichlet(alpha)`, and each participant
//! consumes `round(p_i * pool_size)` indices from the front of the pool.
//! Rounding residue stays unallocated and is reported as unassigned.

use log::debug;
use rand::Rng;
use rand_distr::{Dirichlet, Distribution};

use crate::data::LabelSource;
use crate::error::PartaError;
use crate::partition::buckets::ClassBuckets;
use crate::partition::PartitionMap;

/// Dirichlet non-IID partitioning.
///
/// Lower `alpha` concentrates each class on few participants; higher
/// `alpha` approaches a uniform spread. Deterministic for a fixed `rng`
/// state.
///
/// # Arguments
///
/// * `data` - Label source to partition
/// * `participants` - Number of participants drawing from each class pool
/// * `alpha` - Concentration parameter, finite and `> 0`
/// * `rng` - Seeded random source
pub fn sample_dirichlet<D, R>(
    data: &D,
    participants: usize,
    alpha: f64,
    rng: &mut R,
) -> Result<PartitionMap, PartaError>
where
    D: LabelSource + ?Sized,
    R: Rng,
{
    if participants == 0 {
        return Err(PartaError::ZeroParticipants);
    }
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(PartaError::InvalidConcentration(alpha));
    }

    let mut buckets = ClassBuckets::from_source(data)?;
    let num_classes = buckets.num_classes();

    // Dirichlet needs at least two components; a single participant
    // trivially owns the whole pool.
    let dist = if participants > 1 {
        Some(
            Dirichlet::new_with_size(alpha, participants)
                .map_err(|_| PartaError::InvalidConcentration(alpha))?,
        )
    } else {
        None
    };

    let mut map = PartitionMap::with_participants(participants);

    for class in 0..num_classes {
        let pool = buckets.pool_size(class);
        if pool == 0 {
            continue;
        }
        buckets.shuffle_class(class, rng);

        let weights: Vec<f64> = match &dist {
            Some(d) => d.sample(rng),
            None => vec![1.0],
        };

        for (user, &weight) in weights.iter().enumerate() {
            let want = (weight * pool as f64).round() as usize;
            let taken = buckets.take(class, want);
            map.extend_participant(user, taken);
        }

        let leftover = buckets.drain_class(class);
        if !leftover.is_empty() {
            debug!(
                "class {}: {} of {} indices left unassigned after rounding",
                class,
                leftover.len(),
                pool
            );
            map.extend_unassigned(leftover);
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn balanced_labels(classes: usize, per_class: usize) -> Vec<usize> {
        (0..classes * per_class).map(|i| i % classes).collect()
    }

    #[test]
    fn test_allocation_bounded_by_pool() {
        let labels = balanced_labels(10, 500);
        let mut rng = StdRng::seed_from_u64(42);
        let map = sample_dirichlet(&labels, 20, 0.9, &mut rng).unwrap();

        // Per class, allocated counts never exceed the pool size
        for class in 0..10 {
            let allocated: usize = map
                .participants()
                .map(|(_, idx)| idx.iter().filter(|&&i| labels[i] == class).count())
                .sum();
            assert!(allocated <= 500, "class {} over-allocated: {}", class, allocated);
        }
    }

    #[test]
    fn test_every_index_appears_at_most_once() {
        let labels = balanced_labels(5, 200);
        let mut rng = StdRng::seed_from_u64(7);
        let map = sample_dirichlet(&labels, 10, 0.3, &mut rng).unwrap();

        let mut seen = vec![false; labels.len()];
        for (_, indices) in map.participants() {
            for &i in indices {
                assert!(!seen[i], "index {} assigned twice", i);
                seen[i] = true;
            }
        }
        for &i in map.unassigned() {
            assert!(!seen[i], "index {} both assigned and unassigned", i);
            seen[i] = true;
        }
        // Everything is accounted for somewhere
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_reproducible_with_same_seed() {
        let labels = balanced_labels(10, 100);
        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);

        let a = sample_dirichlet(&labels, 30, 0.5, &mut rng_a).unwrap();
        let b = sample_dirichlet(&labels, 30, 0.5, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_participant_owns_everything() {
        let labels = balanced_labels(4, 25);
        let mut rng = StdRng::seed_from_u64(0);
        let map = sample_dirichlet(&labels, 1, 0.9, &mut rng).unwrap();

        assert_eq!(map.participant(0).unwrap().len(), labels.len());
        assert!(map.unassigned().is_empty());
    }

    #[test]
    fn test_low_alpha_skews_harder_than_high() {
        let labels = balanced_labels(10, 1000);

        let spread = |alpha: f64| -> f64 {
            let mut rng = StdRng::seed_from_u64(5);
            let map = sample_dirichlet(&labels, 10, alpha, &mut rng).unwrap();
            // Max share of class 0 held by any single participant
            map.participants()
                .map(|(_, idx)| idx.iter().filter(|&&i| labels[i] == 0).count() as f64 / 1000.0)
                .fold(0.0, f64::max)
        };

        assert!(
            spread(0.05) > spread(100.0),
            "low alpha should concentrate classes"
        );
    }

    #[test]
    fn test_invalid_concentration() {
        let labels = balanced_labels(2, 10);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sample_dirichlet(&labels, 5, 0.0, &mut rng),
            Err(PartaError::InvalidConcentration(_))
        ));
        assert!(matches!(
            sample_dirichlet(&labels, 5, -1.0, &mut rng),
            Err(PartaError::InvalidConcentration(_))
        ));
        assert!(matches!(
            sample_dirichlet(&labels, 5, f64::NAN, &mut rng),
            Err(PartaError::InvalidConcentration(_))
        ));
    }

    #[test]
    fn test_zero_participants() {
        let labels = balanced_labels(2, 10);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sample_dirichlet(&labels, 0, 0.9, &mut rng),
            Err(PartaError::ZeroParticipants)
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let labels: Vec<usize> = vec![];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sample_dirichlet(&labels, 5, 0.9, &mut rng),
            Err(PartaError::EmptyDataset)
        ));
    }
}
