use setup_utils::{compute_g2_s, mul_affine};

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use derivative::Derivative;
use rand::{CryptoRng, Rng};
use zeroize::Zeroize;

/// Domain tag of the special point bound to the proof of knowledge of tau.
pub const TAU_DOMAIN: u8 = 1;
/// Domain tag of the special point bound to the proof of knowledge of alpha.
pub const ALPHA_DOMAIN: u8 = 2;
/// Domain tag of the special point bound to the proof of knowledge of beta.
pub const BETA_DOMAIN: u8 = 3;

/// Proof of knowledge of a secret `x`: a random `s`, `sx = x * s` and
/// `spx = x * SP`, where `SP` is the special point derived from `s`, `sx`
/// and the hash of the previous contribution.
#[derive(CanonicalSerialize, CanonicalDeserialize, Derivative)]
#[derivative(
    Copy(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Debug(bound = "")
)]
pub struct KeyProof<E: Pairing> {
    pub s: E::G1Affine,
    pub sx: E::G1Affine,
    pub spx: E::G2Affine,
}

impl<E: Pairing> KeyProof<E> {
    /// Proves knowledge of `x` against the special point of `domain`.
    pub fn new<R: Rng + CryptoRng>(
        rng: &mut R,
        x: &E::ScalarField,
        digest: &[u8],
        domain: u8,
    ) -> setup_utils::Result<Self> {
        let s = E::G1::rand(rng).into_affine();
        let sx = mul_affine(&s, x);
        let sp = compute_g2_s::<E>(&s, &sx, digest, domain)?;
        let spx = mul_affine(&sp, x);
        Ok(Self { s, sx, spx })
    }

    /// The proof carried by the initial contribution, which has no secret.
    pub fn generators() -> Self {
        Self {
            s: E::G1Affine::generator(),
            sx: E::G1Affine::generator(),
            spx: E::G2Affine::generator(),
        }
    }
}

/// Contains the proofs of knowledge of all three secrets of a contribution.
#[derive(CanonicalSerialize, CanonicalDeserialize, Derivative)]
#[derivative(
    Copy(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Debug(bound = "")
)]
pub struct PublicKey<E: Pairing> {
    pub tau: KeyProof<E>,
    pub alpha: KeyProof<E>,
    pub beta: KeyProof<E>,
}

impl<E: Pairing> PublicKey<E> {
    pub fn generators() -> Self {
        Self {
            tau: KeyProof::generators(),
            alpha: KeyProof::generators(),
            beta: KeyProof::generators(),
        }
    }
}

/// Contains the secrets tau, alpha and beta that the participant of the ceremony must destroy.
/// They are overwritten with zeroes when the key is dropped.
pub struct PrivateKey<E: Pairing> {
    pub tau: E::ScalarField,
    pub alpha: E::ScalarField,
    pub beta: E::ScalarField,
}

impl<E: Pairing> Drop for PrivateKey<E> {
    fn drop(&mut self) {
        self.tau.zeroize();
        self.alpha.zeroize();
        self.beta.zeroize();
    }
}

/// Samples fresh secrets and the matching public key, with every proof bound to `digest`,
/// the hash of the contribution being built upon.
pub fn keypair<E: Pairing, R: Rng + CryptoRng>(
    rng: &mut R,
    digest: &[u8],
) -> setup_utils::Result<(PublicKey<E>, PrivateKey<E>)> {
    let private_key = PrivateKey::<E> {
        tau: random_nonzero(rng),
        alpha: random_nonzero(rng),
        beta: random_nonzero(rng),
    };

    let public_key = PublicKey {
        tau: KeyProof::new(rng, &private_key.tau, digest, TAU_DOMAIN)?,
        alpha: KeyProof::new(rng, &private_key.alpha, digest, ALPHA_DOMAIN)?,
        beta: KeyProof::new(rng, &private_key.beta, digest, BETA_DOMAIN)?,
    };

    Ok((public_key, private_key))
}

fn random_nonzero<F: UniformRand + Zero, R: Rng>(rng: &mut R) -> F {
    loop {
        let x = F::rand(rng);
        if !x.is_zero() {
            return x;
        }
    }
}
