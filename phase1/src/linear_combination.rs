//! Randomized certificate that a streamed point sequence is a geometric progression.
//!
//! For points `P_0, ..., P_{n-1}` and random scalars `r_0, ..., r_{n-2}` we compute
//! `L1 = sum r_i * P_i` and `L2 = sum r_i * P_{i+1}`. If `P_{i+1} = s * P_i` for every
//! `i` then `L2 = s * L1`, which a verifier checks with a single pairing equation
//! against a commitment to `s`. Any other sequence passes with negligible probability.

use crate::helpers::iter_chunk;
use setup_utils::{randomize, Error, PointDecoder, Result};

use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::Zero;
use tracing::debug;

/// Number of leading points of the stream kept aside for the caller.
const HEAD_LENGTH: usize = 2;

/// Running state of the certificate over a stream consumed in batches.
pub struct LinearCombination<C: AffineRepr> {
    l1: C::Group,
    l2: C::Group,
    /// Last point of the previous batch, paired with the first point of the next one.
    last: Option<C>,
    head: Vec<C>,
}

impl<C: AffineRepr> Default for LinearCombination<C> {
    fn default() -> Self {
        Self {
            l1: C::Group::zero(),
            l2: C::Group::zero(),
            last: None,
            head: Vec::with_capacity(HEAD_LENGTH),
        }
    }
}

impl<C: AffineRepr> LinearCombination<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes `length` points from the decoder, `batch_size` at a time.
    pub fn stream(decoder: &mut impl PointDecoder, length: usize, batch_size: usize) -> Result<Self> {
        let mut combination = Self::new();
        iter_chunk(length, batch_size, |start, end| {
            debug!("combining points from {} to {}", start, end);
            let points = decoder.decode_batch::<C>(end - start)?;
            combination.update(&points)
        })?;
        Ok(combination)
    }

    /// Adds the next points of the sequence to the certificate.
    pub fn update(&mut self, points: &[C]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let missing = HEAD_LENGTH - self.head.len();
        self.head.extend(points.iter().take(missing));

        let mut window = Vec::with_capacity(points.len() + 1);
        window.extend(self.last);
        window.extend_from_slice(points);
        self.last = window.last().copied();

        if window.len() < 2 {
            return Ok(());
        }

        let mut scalars = vec![C::ScalarField::zero(); window.len() - 1];
        randomize(&mut scalars);

        self.l1 += msm::<C>(&window[..window.len() - 1], &scalars)?;
        self.l2 += msm::<C>(&window[1..], &scalars)?;
        Ok(())
    }

    /// The first points of the sequence, at most two of them.
    pub fn head(&self) -> &[C] {
        &self.head
    }

    /// Returns `(L1, L2)`.
    pub fn into_points(self) -> (C, C) {
        (self.l1.into_affine(), self.l2.into_affine())
    }
}

fn msm<C: AffineRepr>(bases: &[C], scalars: &[C::ScalarField]) -> Result<C::Group> {
    C::Group::msm(bases, scalars).map_err(|got| Error::InvalidLength {
        expected: bases.len(),
        got,
    })
}

/// Computes `(L1, L2)` over a stream of `length` points.
pub fn linear_combination<C: AffineRepr>(
    decoder: &mut impl PointDecoder,
    length: usize,
    batch_size: usize,
) -> Result<(C, C)> {
    Ok(LinearCombination::<C>::stream(decoder, length, batch_size)?.into_points())
}
