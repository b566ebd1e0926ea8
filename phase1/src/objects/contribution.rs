use crate::PublicKey;
use setup_utils::{calculate_hash, HASH_SIZE};

use ark_ec::{pairing::Pairing, AffineRepr};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use derivative::Derivative;

use std::io::{Read, Write};

/// The G1 points of an accumulator which summarise it: `[tau]_1`, `[alpha]_1` and `[beta]_1`.
#[derive(CanonicalSerialize, CanonicalDeserialize, Derivative)]
#[derivative(
    Copy(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Debug(bound = "")
)]
pub struct G1Commitments<E: Pairing> {
    pub tau: E::G1Affine,
    pub alpha: E::G1Affine,
    pub beta: E::G1Affine,
}

/// The G2 points of an accumulator which summarise it: `[tau]_2` and `[beta]_2`.
#[derive(CanonicalSerialize, CanonicalDeserialize, Derivative)]
#[derivative(
    Copy(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Debug(bound = "")
)]
pub struct G2Commitments<E: Pairing> {
    pub tau: E::G2Affine,
    pub beta: E::G2Affine,
}

/// The record published by every participant of the ceremony.
///
/// The hash covers every other field, so a contribution cannot be altered once
/// published without the next participant and any later auditor noticing.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), PartialEq(bound = ""), Eq(bound = ""), Debug(bound = ""))]
pub struct Contribution<E: Pairing> {
    pub public_keys: PublicKey<E>,
    pub g1: G1Commitments<E>,
    pub g2: G2Commitments<E>,
    pub hash: [u8; HASH_SIZE],
}

impl<E: Pairing> Contribution<E> {
    /// Creates a contribution and seals it with its hash.
    pub fn new(public_keys: PublicKey<E>, g1: G1Commitments<E>, g2: G2Commitments<E>) -> setup_utils::Result<Self> {
        let mut contribution = Self {
            public_keys,
            g1,
            g2,
            hash: [0; HASH_SIZE],
        };
        contribution.hash = contribution.compute_hash()?;
        Ok(contribution)
    }

    /// The contribution describing a freshly initialized accumulator, in which every
    /// point is a generator.
    pub fn genesis() -> setup_utils::Result<Self> {
        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();
        Self::new(
            PublicKey::generators(),
            G1Commitments {
                tau: g1,
                alpha: g1,
                beta: g1,
            },
            G2Commitments { tau: g2, beta: g2 },
        )
    }

    /// BLAKE2b-512 of the uncompressed encoding of every field except the hash.
    pub fn compute_hash(&self) -> setup_utils::Result<[u8; HASH_SIZE]> {
        let mut bytes = Vec::new();
        self.serialize_fields(&mut bytes, Compress::No)?;
        Ok(calculate_hash(&bytes))
    }

    /// Writes the contribution, hash included.
    pub fn write<W: Write>(&self, mut writer: W, compress: Compress) -> setup_utils::Result<()> {
        self.serialize_fields(&mut writer, compress)?;
        writer.write_all(&self.hash)?;
        Ok(())
    }

    /// Reads a contribution. Points are always validated, but the hash is not
    /// checked against the fields until the contribution is verified.
    pub fn read<R: Read>(mut reader: R, compress: Compress) -> setup_utils::Result<Self> {
        let public_keys = PublicKey::deserialize_with_mode(&mut reader, compress, Validate::Yes)?;
        let g1 = G1Commitments::deserialize_with_mode(&mut reader, compress, Validate::Yes)?;
        let g2 = G2Commitments::deserialize_with_mode(&mut reader, compress, Validate::Yes)?;
        let mut hash = [0; HASH_SIZE];
        reader.read_exact(&mut hash)?;
        Ok(Self {
            public_keys,
            g1,
            g2,
            hash,
        })
    }

    fn serialize_fields<W: Write>(&self, mut writer: W, compress: Compress) -> setup_utils::Result<()> {
        self.public_keys.serialize_with_mode(&mut writer, compress)?;
        self.g1.serialize_with_mode(&mut writer, compress)?;
        self.g2.serialize_with_mode(&mut writer, compress)?;
        Ok(())
    }
}
