//! Seeded adversary roster selection.

use rand::Rng;

use crate::error::PartaError;

/// Sample `count` distinct adversary ids from `0..participants`.
///
/// The draw is without replacement and fully determined by the `rng`
/// state, so experiment runs are repeatable. Ids are returned in draw
/// order.
pub fn select_adversaries<R: Rng>(
    participants: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, PartaError> {
    if participants == 0 {
        return Err(PartaError::ZeroParticipants);
    }
    if count > participants {
        return Err(PartaError::AdversaryCountExceedsParticipants {
            requested: count,
            participants,
        });
    }

    Ok(rand::seq::index::sample(rng, participants, count).into_vec())
}

/// The benign complement of an adversary roster, in ascending id order.
pub fn benign_complement(participants: usize, adversaries: &[usize]) -> Vec<usize> {
    let mut is_adversary = vec![false; participants];
    for &id in adversaries {
        if id < participants {
            is_adversary[id] = true;
        }
    }
    (0..participants).filter(|&id| !is_adversary[id]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roster_unique_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let roster = select_adversaries(100, 20, &mut rng).unwrap();

        assert_eq!(roster.len(), 20);
        let mut sorted = roster.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 20, "roster contains duplicates");
        assert!(roster.iter().all(|&id| id < 100));
    }

    #[test]
    fn test_roster_reproducible() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        assert_eq!(
            select_adversaries(50, 10, &mut rng_a).unwrap(),
            select_adversaries(50, 10, &mut rng_b).unwrap()
        );
    }

    #[test]
    fn test_roster_all_participants() {
        let mut rng = StdRng::seed_from_u64(1);
        let roster = select_adversaries(5, 5, &mut rng).unwrap();
        let mut sorted = roster;
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_roster_too_many_requested() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_adversaries(5, 6, &mut rng),
            Err(PartaError::AdversaryCountExceedsParticipants {
                requested: 6,
                participants: 5
            })
        ));
    }

    #[test]
    fn test_roster_zero_participants() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_adversaries(0, 0, &mut rng),
            Err(PartaError::ZeroParticipants)
        ));
    }

    #[test]
    fn test_benign_complement() {
        let benign = benign_complement(6, &[1, 4]);
        assert_eq!(benign, vec![0, 2, 3, 5]);
    }

    #[test]
    fn test_benign_complement_empty_roster() {
        assert_eq!(benign_complement(3, &[]), vec![0, 1, 2]);
    }
}
