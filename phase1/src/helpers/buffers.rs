use setup_utils::{Error, PointEncoder, Result};

use ark_ec::AffineRepr;
use itertools::{Itertools, MinMaxResult};

/// Helper function to iterate over a stream of `length` points in batches.
/// `action` will perform an action on the points in `[start, end)`
pub(crate) fn iter_chunk(
    length: usize,
    batch_size: usize,
    mut action: impl FnMut(usize, usize) -> Result<()>,
) -> Result<()> {
    if batch_size == 0 {
        return Err(Error::InvalidBatchSize);
    }

    (0..length)
        .chunks(batch_size)
        .into_iter()
        .map(|chunk| {
            let (start, end) = match chunk.minmax() {
                MinMaxResult::MinMax(start, end) => (start, end + 1),
                MinMaxResult::OneElement(start) => (start, start + 1),
                _ => return Err(Error::InvalidChunk),
            };
            action(start, end)
        })
        .collect::<Result<_>>()
}

/// Writes `n` copies of `point`, at most `batch_size` at a time.
pub(crate) fn encode_repeated<C: AffineRepr>(
    encoder: &mut impl PointEncoder,
    point: C,
    n: usize,
    batch_size: usize,
) -> Result<()> {
    iter_chunk(n, batch_size, |start, end| encoder.encode_batch(&vec![point; end - start]))
}
