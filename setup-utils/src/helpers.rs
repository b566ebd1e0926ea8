use crate::{
    elements::is_valid_element,
    errors::{Error, Result, VerificationError},
    parallel::parallelize_slice_mut,
};

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{PrimeField, UniformRand, Zero};
use ark_serialize::{CanonicalSerialize, Compress};
use blake2::{Blake2b512, Digest};
use rand::{thread_rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;

/// Size in bytes of the hashes chaining contributions together.
pub const HASH_SIZE: usize = 64;

/// Returns the powers of `b` starting from `a`, i.e. `[a, a * b, ..., a * b^(n - 1)]`.
///
/// Each term depends on the previous one, so the sequence is computed serially.
pub fn powers<F: PrimeField>(a: &F, b: &F, n: usize) -> Vec<F> {
    let mut result = Vec::with_capacity(n);
    if n == 0 {
        return result;
    }
    result.push(*a);
    for i in 1..n {
        let next = result[i - 1] * b;
        result.push(next);
    }
    result
}

/// Multiplies each element of `elements` by `multiplicand`, in place.
pub fn batch_mul<F: PrimeField>(elements: &mut [F], multiplicand: &F) {
    parallelize_slice_mut(
        elements,
        |_, chunk| {
            for element in chunk.iter_mut() {
                *element *= multiplicand;
            }
        },
        None,
    );
}

/// Overwrites every element with an independently sampled uniform field element.
pub fn randomize<F: UniformRand + Send>(elements: &mut [F]) {
    parallelize_slice_mut(
        elements,
        |_, chunk| {
            let mut rng = thread_rng();
            for element in chunk.iter_mut() {
                *element = F::rand(&mut rng);
            }
        },
        None,
    );
}

/// Multiplies `bases[i]` by `exps[i]` for every `i`, in place.
pub fn batch_exp<C: AffineRepr>(bases: &mut [C], exps: &[C::ScalarField]) -> Result<()> {
    if bases.len() != exps.len() {
        return Err(Error::InvalidLength {
            expected: bases.len(),
            got: exps.len(),
        });
    }

    parallelize_slice_mut(
        bases,
        |offset, chunk| {
            let projective = chunk
                .iter()
                .zip(&exps[offset..offset + chunk.len()])
                .map(|(base, exp)| base.mul_bigint(exp.into_bigint()))
                .collect::<Vec<_>>();
            chunk.copy_from_slice(&C::Group::normalize_batch(&projective));
        },
        None,
    );

    Ok(())
}

/// Checks that the ratio `g1.1 / g1.0` in G1 equals the ratio `g2.1 / g2.0` in G2,
/// i.e. `e(g1.0, g2.1) == e(g1.1, g2.0)`.
///
/// Inputs which are not valid curve elements cannot be evaluated and produce
/// [`Error::InvalidCurveInput`] instead of `false`.
pub fn same_ratio<E: Pairing>(
    g1: &(E::G1Affine, E::G1Affine),
    g2: &(E::G2Affine, E::G2Affine),
) -> Result<bool> {
    if !is_valid_element(&g1.0) || !is_valid_element(&g1.1) {
        return Err(Error::InvalidCurveInput("G1"));
    }
    if !is_valid_element(&g2.0) || !is_valid_element(&g2.1) {
        return Err(Error::InvalidCurveInput("G2"));
    }

    // e(g1.0, g2.1) * e(g1.1, -g2.0) == 1
    let product = E::multi_pairing(
        [g1.0.into_group(), g1.1.into_group()],
        [g2.1.into_group(), -g2.0.into_group()],
    );
    Ok(product.is_zero())
}

/// Like [`same_ratio`], but fails with `err` when the ratios differ.
pub fn check_same_ratio<E: Pairing>(
    g1: &(E::G1Affine, E::G1Affine),
    g2: &(E::G2Affine, E::G2Affine),
    err: VerificationError,
) -> Result<()> {
    match same_ratio::<E>(g1, g2)? {
        true => Ok(()),
        false => Err(err.into()),
    }
}

/// Derives the domain separated G2 point a knowledge proof `(s, s * x)` is bound to.
///
/// The point is sampled from a ChaCha20 RNG seeded with
/// `BLAKE2b(domain || challenge || s || sx)`, so it depends on the previous
/// contribution's hash and cannot be reused across rounds or across secrets.
pub fn compute_g2_s<E: Pairing>(
    s: &E::G1Affine,
    sx: &E::G1Affine,
    challenge: &[u8],
    domain: u8,
) -> Result<E::G2Affine> {
    let mut bytes = vec![domain];
    bytes.extend_from_slice(challenge);
    s.serialize_with_mode(&mut bytes, Compress::Yes)?;
    sx.serialize_with_mode(&mut bytes, Compress::Yes)?;

    let digest = calculate_hash(&bytes);
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest[..32]);
    let mut rng = ChaCha20Rng::from_seed(seed);

    Ok(E::G2::rand(&mut rng).into_affine())
}

/// Calculates the BLAKE2b-512 hash of `input`.
pub fn calculate_hash(input: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Blake2b512::new();
    hasher.update(input);
    let mut hash = [0u8; HASH_SIZE];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// The hash of an empty input, used before any contribution exists.
pub fn blank_hash() -> [u8; HASH_SIZE] {
    calculate_hash(&[])
}

/// Seeds a ChaCha20 RNG from arbitrary entropy by hashing it first.
pub fn derive_rng_from_seed(seed: &[u8]) -> ChaCha20Rng {
    let digest = calculate_hash(seed);
    let mut rng_seed = [0u8; 32];
    rng_seed.copy_from_slice(&digest[..32]);
    ChaCha20Rng::from_seed(rng_seed)
}

/// Logs a hash as rows of 16 bytes.
pub fn log_hash(hash: &[u8]) {
    for line in hash.chunks(16) {
        let text = line.chunks(4).map(hex::encode).collect::<Vec<_>>().join(" ");
        info!("\t{}", text);
    }
}

/// Returns `P * scalar` for an affine point.
pub fn mul_affine<C: AffineRepr>(point: &C, scalar: &C::ScalarField) -> C {
    point.mul_bigint(scalar.into_bigint()).into_affine()
}
