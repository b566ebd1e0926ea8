use crate::{contribute, initialize, Contribution, Phase1Parameters};
use setup_utils::{mul_affine, CheckForCorrectness, Decoder, Encoder, PointDecoder, PointEncoder, UseCompression};

use ark_bn254::Bn254;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::UniformRand;
use rand::{thread_rng, Rng};

/// Returns a random affine curve point from the provided RNG.
pub fn random_point<C: AffineRepr>(rng: &mut impl Rng) -> C {
    C::Group::rand(rng).into_affine()
}

/// Returns a random affine curve point vector from the provided RNG.
pub fn random_point_vec<C: AffineRepr>(size: usize, rng: &mut impl Rng) -> Vec<C> {
    (0..size).map(|_| random_point(rng)).collect()
}

/// Returns `[p, s * p, s^2 * p, ...]` with `n` elements.
pub fn geometric_sequence<C: AffineRepr>(p: C, s: &C::ScalarField, n: usize) -> Vec<C> {
    let mut points = Vec::with_capacity(n);
    let mut current = p;
    for _ in 0..n {
        points.push(current);
        current = mul_affine(&current, s);
    }
    points
}

pub fn encode_all<C: AffineRepr>(points: &[C], compression: UseCompression) -> Vec<u8> {
    let mut encoder = Encoder::new(vec![], compression);
    encoder.encode_batch(points).unwrap();
    encoder.finish().unwrap()
}

pub fn decode_all<C: AffineRepr>(bytes: &[u8], n: usize, compression: UseCompression) -> Vec<C> {
    Decoder::new(bytes, compression, CheckForCorrectness::Full)
        .decode_batch(n)
        .unwrap()
}

/// An initialized accumulator together with a first contribution to it.
pub struct Setup {
    pub genesis_accumulator: Vec<u8>,
    pub genesis: Contribution<Bn254>,
    pub accumulator: Vec<u8>,
    pub contribution: Contribution<Bn254>,
}

/// Initializes an accumulator and contributes to it once.
/// The test must call verify on the returned values.
pub fn setup_contribution(parameters: &Phase1Parameters<Bn254>) -> Setup {
    let mut encoder = parameters.encoder(vec![]);
    let genesis = initialize(&mut encoder, parameters).unwrap();
    let genesis_accumulator = encoder.finish().unwrap();

    let mut decoder = parameters.decoder(&genesis_accumulator[..]);
    let mut encoder = parameters.encoder(vec![]);
    let contribution = contribute(&mut decoder, &mut encoder, parameters, &genesis, &mut thread_rng()).unwrap();
    let accumulator = encoder.finish().unwrap();

    Setup {
        genesis_accumulator,
        genesis,
        accumulator,
        contribution,
    }
}
