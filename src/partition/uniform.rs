//! Equal shuffled split, the IID baseline.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PartaError;
use crate::partition::PartitionMap;

/// Shuffle all indices and split them into equal contiguous chunks.
///
/// Each participant receives exactly `sample_count / participants`
/// indices; the division remainder is reported as unassigned.
pub fn split_uniform<R: Rng>(
    sample_count: usize,
    participants: usize,
    rng: &mut R,
) -> Result<PartitionMap, PartaError> {
    if participants == 0 {
        return Err(PartaError::ZeroParticipants);
    }
    if sample_count == 0 {
        return Err(PartaError::EmptyDataset);
    }

    let mut all: Vec<usize> = (0..sample_count).collect();
    all.shuffle(rng);

    let chunk = sample_count / participants;
    let mut map = PartitionMap::with_participants(participants);
    for id in 0..participants {
        map.extend_participant(id, all[id * chunk..(id + 1) * chunk].iter().copied());
    }
    map.extend_unassigned(all[participants * chunk..].iter().copied());
    Ok(map)
}
