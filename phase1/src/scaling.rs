//! Streaming rescaling of point sequences by consecutive powers of a secret.

use crate::helpers::iter_chunk;
use setup_utils::{
    batch_exp,
    batch_mul,
    powers,
    progress::{report_progress_ending, report_progress_processing, report_progress_starting},
    Error,
    PointDecoder,
    PointEncoder,
    Result,
};

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use tracing::{debug, trace};

/// The scalars applied to a stream, produced batch by batch.
///
/// Point `i` of the stream is multiplied by `secret^i * multiplicand`. The running
/// power is the unscaled `secret^start` of the next batch, so consecutive calls to
/// [`PowerSchedule::next_batch`] continue the same progression.
pub struct PowerSchedule<F: PrimeField> {
    secret: F,
    multiplicand: Option<F>,
    current: F,
}

impl<F: PrimeField> PowerSchedule<F> {
    pub fn new(secret: F, multiplicand: Option<F>) -> Self {
        Self {
            secret,
            multiplicand,
            current: F::one(),
        }
    }

    /// Returns the scalars of the next `len` points.
    pub fn next_batch(&mut self, len: usize) -> Vec<F> {
        let mut scalars = powers(&self.current, &self.secret, len);
        if let Some(last) = scalars.last() {
            self.current = *last * self.secret;
        }
        if let Some(multiplicand) = &self.multiplicand {
            batch_mul(&mut scalars, multiplicand);
        }
        scalars
    }
}

/// Rescales a stream of `length` points, `batch_size` points at a time.
///
/// Returns the output point which commits to the secrets: the point multiplied by
/// `secret^1` when there is no multiplicand, or by `secret^0 * multiplicand` when
/// there is one.
pub fn scale_points<C: AffineRepr>(
    decoder: &mut impl PointDecoder,
    encoder: &mut impl PointEncoder,
    length: usize,
    batch_size: usize,
    secret: &C::ScalarField,
    multiplicand: Option<&C::ScalarField>,
) -> Result<C> {
    let commitment_index = if multiplicand.is_some() { 0 } else { 1 };
    if length <= commitment_index {
        return Err(Error::InvalidLength {
            expected: commitment_index + 1,
            got: length,
        });
    }

    let mut schedule = PowerSchedule::new(*secret, multiplicand.copied());
    let mut commitment = None;

    report_progress_starting(std::any::type_name::<C>());
    iter_chunk(length, batch_size, |start, end| {
        debug!("scaling points from {} to {}", start, end);

        let mut points = decoder.decode_batch::<C>(end - start)?;
        let scalars = schedule.next_batch(end - start);
        batch_exp(&mut points, &scalars)?;
        trace!("applied powers to the batch");

        if (start..end).contains(&commitment_index) {
            commitment = Some(points[commitment_index - start]);
        }

        encoder.encode_batch(&points)?;
        report_progress_processing(std::any::type_name::<C>(), start, end, length);
        Ok(())
    })?;
    report_progress_ending(std::any::type_name::<C>());

    commitment.ok_or(Error::InvalidLength {
        expected: commitment_index + 1,
        got: length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::{decode_all, encode_all, random_point_vec};

    use ark_bn254::{Fr, G1Affine, G2Affine};
    use ark_ec::CurveGroup;
    use ark_ff::{Field, One, UniformRand};
    use rand::thread_rng;
    use setup_utils::{mul_affine, CheckForCorrectness, Decoder, Encoder, UseCompression};

    fn scale<C: AffineRepr>(
        points: &[C],
        batch_size: usize,
        secret: &C::ScalarField,
        multiplicand: Option<&C::ScalarField>,
    ) -> (Vec<u8>, C) {
        let input = encode_all(points, UseCompression::No);
        let mut decoder = Decoder::new(&input[..], UseCompression::No, CheckForCorrectness::Full);
        let mut encoder = Encoder::new(vec![], UseCompression::Yes);
        let commitment = scale_points(&mut decoder, &mut encoder, points.len(), batch_size, secret, multiplicand).unwrap();
        (encoder.finish().unwrap(), commitment)
    }

    #[test]
    fn test_power_schedule_continues_across_batches() {
        let mut rng = thread_rng();
        let secret = Fr::rand(&mut rng);
        let mut schedule = PowerSchedule::new(secret, None);
        let mut scalars = schedule.next_batch(3);
        scalars.extend(schedule.next_batch(1));
        scalars.extend(schedule.next_batch(4));
        assert_eq!(scalars, powers(&Fr::one(), &secret, 8));
    }

    #[test]
    fn test_power_schedule_carries_unscaled_power() {
        let mut rng = thread_rng();
        let (secret, multiplicand) = (Fr::rand(&mut rng), Fr::rand(&mut rng));
        let mut schedule = PowerSchedule::new(secret, Some(multiplicand));
        let mut scalars = schedule.next_batch(2);
        scalars.extend(schedule.next_batch(3));
        for (i, scalar) in scalars.iter().enumerate() {
            assert_eq!(*scalar, secret.pow([i as u64]) * multiplicand);
        }
    }

    #[test]
    fn test_scale_points_g1() {
        let mut rng = thread_rng();
        let points = random_point_vec::<G1Affine>(9, &mut rng);
        let secret = Fr::rand(&mut rng);

        let (output, commitment) = scale(&points, 4, &secret, None);
        let output = decode_all::<G1Affine>(&output, points.len(), UseCompression::Yes);
        for (i, (after, before)) in output.iter().zip(&points).enumerate() {
            assert_eq!(*after, mul_affine(before, &secret.pow([i as u64])));
        }
        assert_eq!(commitment, output[1]);
        assert_eq!(commitment, (points[1] * secret).into_affine());
    }

    #[test]
    fn test_scale_points_g2_with_multiplicand() {
        let mut rng = thread_rng();
        let points = random_point_vec::<G2Affine>(5, &mut rng);
        let (secret, multiplicand) = (Fr::rand(&mut rng), Fr::rand(&mut rng));

        let (output, commitment) = scale(&points, 2, &secret, Some(&multiplicand));
        let output = decode_all::<G2Affine>(&output, points.len(), UseCompression::Yes);
        for (i, (after, before)) in output.iter().zip(&points).enumerate() {
            assert_eq!(*after, mul_affine(before, &(secret.pow([i as u64]) * multiplicand)));
        }
        assert_eq!(commitment, output[0]);
    }

    #[test]
    fn test_batch_size_does_not_change_output() {
        let mut rng = thread_rng();
        let points = random_point_vec::<G1Affine>(16, &mut rng);
        let (secret, multiplicand) = (Fr::rand(&mut rng), Fr::rand(&mut rng));

        let (single, commitment) = scale(&points, 16, &secret, None);
        for batch_size in [1, 3, 8, 100] {
            assert_eq!(scale(&points, batch_size, &secret, None), (single.clone(), commitment));
        }

        let (single, commitment) = scale(&points, 16, &secret, Some(&multiplicand));
        assert_eq!(scale(&points, 8, &secret, Some(&multiplicand)), (single, commitment));
    }

    #[test]
    fn test_single_point_with_multiplicand() {
        let mut rng = thread_rng();
        let points = random_point_vec::<G2Affine>(1, &mut rng);
        let (secret, multiplicand) = (Fr::rand(&mut rng), Fr::rand(&mut rng));
        let (_, commitment) = scale(&points, 1, &secret, Some(&multiplicand));
        assert_eq!(commitment, mul_affine(&points[0], &multiplicand));
    }

    #[test]
    fn test_too_short_for_commitment() {
        let mut rng = thread_rng();
        let secret = Fr::rand(&mut rng);
        let points = random_point_vec::<G1Affine>(1, &mut rng);
        let input = encode_all(&points, UseCompression::No);

        let mut decoder = Decoder::new(&input[..], UseCompression::No, CheckForCorrectness::Full);
        let mut encoder = Encoder::new(vec![], UseCompression::No);
        assert!(matches!(
            scale_points::<G1Affine>(&mut decoder, &mut encoder, 1, 4, &secret, None),
            Err(Error::InvalidLength { expected: 2, got: 1 })
        ));
        assert!(matches!(
            scale_points::<G1Affine>(&mut decoder, &mut encoder, 0, 4, &secret, Some(&secret)),
            Err(Error::InvalidLength { expected: 1, got: 0 })
        ));
    }

    #[test]
    fn test_truncated_input_aborts() {
        let mut rng = thread_rng();
        let secret = Fr::rand(&mut rng);
        let points = random_point_vec::<G1Affine>(6, &mut rng);
        let input = encode_all(&points, UseCompression::No);

        let mut decoder = Decoder::new(&input[..], UseCompression::No, CheckForCorrectness::Full);
        let mut encoder = Encoder::new(vec![], UseCompression::No);
        assert!(scale_points::<G1Affine>(&mut decoder, &mut encoder, 8, 4, &secret, None).is_err());
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let mut rng = thread_rng();
        let secret = Fr::rand(&mut rng);
        let mut decoder = Decoder::new(std::io::empty(), UseCompression::No, CheckForCorrectness::Full);
        let mut encoder = Encoder::new(vec![], UseCompression::No);
        assert!(matches!(
            scale_points::<G1Affine>(&mut decoder, &mut encoder, 4, 0, &secret, None),
            Err(Error::InvalidBatchSize)
        ));
    }
}
