use crate::{
    linear_combination::LinearCombination,
    Contribution,
    Phase1Parameters,
    ALPHA_DOMAIN,
    BETA_DOMAIN,
    TAU_DOMAIN,
};
use setup_utils::{
    check_same_ratio,
    compute_g2_s,
    ElementType,
    PointDecoder,
    Result,
    VerificationError,
};

use ark_ec::{pairing::Pairing, AffineRepr};
use tracing::{debug, info, info_span};

///
/// Phase 1: Contribution verification
///
/// Verifies that `current` was built on top of `previous`: every proof of knowledge
/// is bound to the hash of `previous`, every published commitment moved from the
/// previous one by the proven secret, and the hash of `current` covers its fields.
///
/// Checks run in order and the first failure is returned.
///
pub fn verify_contribution<E: Pairing>(current: &Contribution<E>, previous: &Contribution<E>) -> Result<()> {
    let span = info_span!("phase1-verification");
    let _enter = span.enter();

    info!("starting...");

    let keys = &current.public_keys;
    let digest = &previous.hash;

    // Pairings against the identity always match, so no proof or commitment may be zero
    for (proof, err) in [
        (&keys.tau, VerificationError::TauKnowledge),
        (&keys.alpha, VerificationError::AlphaKnowledge),
        (&keys.beta, VerificationError::BetaKnowledge),
    ] {
        if proof.s.is_zero() || proof.sx.is_zero() || proof.spx.is_zero() {
            return Err(err.into());
        }
    }
    for (commitment, err) in [
        (current.g1.tau, VerificationError::TauG1Update),
        (current.g1.alpha, VerificationError::AlphaG1Update),
        (current.g1.beta, VerificationError::BetaG1Update),
    ] {
        if commitment.is_zero() {
            return Err(err.into());
        }
    }
    if current.g2.tau.is_zero() {
        return Err(VerificationError::TauG2Update.into());
    }
    if current.g2.beta.is_zero() {
        return Err(VerificationError::BetaG2Update.into());
    }

    // Special points bound to the previous hash and to each secret
    let tau_sp = compute_g2_s::<E>(&keys.tau.s, &keys.tau.sx, digest, TAU_DOMAIN)?;
    let alpha_sp = compute_g2_s::<E>(&keys.alpha.s, &keys.alpha.sx, digest, ALPHA_DOMAIN)?;
    let beta_sp = compute_g2_s::<E>(&keys.beta.s, &keys.beta.sx, digest, BETA_DOMAIN)?;

    let tau_check = (tau_sp, keys.tau.spx);
    let alpha_check = (alpha_sp, keys.alpha.spx);
    let beta_check = (beta_sp, keys.beta.spx);

    // Check the proofs of knowledge for tau/alpha/beta
    for (proof, check, err) in [
        (&keys.tau, &tau_check, VerificationError::TauKnowledge),
        (&keys.alpha, &alpha_check, VerificationError::AlphaKnowledge),
        (&keys.beta, &beta_check, VerificationError::BetaKnowledge),
    ] {
        check_same_ratio::<E>(&(proof.s, proof.sx), check, err)?;
    }
    debug!("proofs of knowledge were correctly produced");

    // Check that the G1 commitments moved by the proven secrets
    for (before, after, check, err) in [
        (previous.g1.tau, current.g1.tau, &tau_check, VerificationError::TauG1Update),
        (previous.g1.alpha, current.g1.alpha, &alpha_check, VerificationError::AlphaG1Update),
        (previous.g1.beta, current.g1.beta, &beta_check, VerificationError::BetaG1Update),
    ] {
        check_same_ratio::<E>(&(before, after), check, err)?;
    }

    // Same for the G2 commitments, bridged by (s, sx) in G1
    check_same_ratio::<E>(
        &(keys.tau.s, keys.tau.sx),
        &(previous.g2.tau, current.g2.tau),
        VerificationError::TauG2Update,
    )?;
    check_same_ratio::<E>(
        &(keys.beta.s, keys.beta.sx),
        &(previous.g2.beta, current.g2.beta),
        VerificationError::BetaG2Update,
    )?;
    debug!("commitments were correctly updated");

    if current.compute_hash()? != current.hash {
        return Err(VerificationError::HashMismatch.into());
    }

    info!("phase1-verification complete");

    Ok(())
}

///
/// Phase 1: Accumulator verification
///
/// Verifies that the accumulator read from `decoder` is the one `contribution`
/// describes: the tau sections start at the generators, the commitments appear at
/// their positions, and every section is a progression of powers of tau.
///
pub fn verify_accumulator<E: Pairing>(
    decoder: &mut impl PointDecoder,
    parameters: &Phase1Parameters<E>,
    contribution: &Contribution<E>,
) -> Result<()> {
    let span = info_span!("phase1-accumulator-verification");
    let _enter = span.enter();

    info!("starting...");

    let batch_size = parameters.batch_size;
    let g1 = E::G1Affine::generator();
    let g2 = E::G2Affine::generator();
    // Ratio checks of G1 sections against [tau]_2, and of G2 sections against [tau]_1
    let g2_tau = (g2, contribution.g2.tau);
    let g1_tau = (g1, contribution.g1.tau);

    let tau_g1 = LinearCombination::<E::G1Affine>::stream(decoder, parameters.powers_g1_length, batch_size)?;
    check_head(tau_g1.head(), &[g1, contribution.g1.tau], ElementType::TauG1)?;
    check_powers::<E>(&tau_g1.into_points(), &g2_tau, ElementType::TauG1)?;
    debug!("tau_g1 verification successful");

    let tau_g2 = LinearCombination::<E::G2Affine>::stream(decoder, parameters.powers_length, batch_size)?;
    check_head(tau_g2.head(), &[g2, contribution.g2.tau], ElementType::TauG2)?;
    check_same_ratio::<E>(&g1_tau, &tau_g2.into_points(), VerificationError::PowersRatio(ElementType::TauG2))?;
    debug!("tau_g2 verification successful");

    for (commitment, element_type) in [
        (contribution.g1.alpha, ElementType::AlphaG1),
        (contribution.g1.beta, ElementType::BetaG1),
    ] {
        let section = LinearCombination::<E::G1Affine>::stream(decoder, parameters.powers_length, batch_size)?;
        check_commitment(section.head().first(), &commitment, element_type)?;
        check_powers::<E>(&section.into_points(), &g2_tau, element_type)?;
        debug!("{} verification successful", element_type);
    }

    let beta_g2 = decoder.decode::<E::G2Affine>()?;
    check_commitment(Some(&beta_g2), &contribution.g2.beta, ElementType::BetaG2)?;

    info!("phase1-accumulator-verification complete");

    Ok(())
}

///
/// Phase 1: Transcript verification
///
/// Verifies a whole chain of contributions, starting from the initial one.
///
pub fn verify_transcript<E: Pairing>(contributions: &[Contribution<E>]) -> Result<()> {
    let genesis = contributions.first().ok_or(VerificationError::EmptyTranscript)?;
    if *genesis != Contribution::genesis()? {
        return Err(VerificationError::InvalidGenesis.into());
    }

    for (i, pair) in contributions.windows(2).enumerate() {
        debug!("verifying contribution {}", i + 1);
        verify_contribution(&pair[1], &pair[0])?;
    }

    Ok(())
}

/// Checks the first two points of a tau section: the generator, then the commitment.
fn check_head<C: AffineRepr>(head: &[C], expected: &[C; 2], element_type: ElementType) -> Result<()> {
    if head.first() != Some(&expected[0]) {
        return Err(VerificationError::InvalidGenerator(element_type).into());
    }
    check_commitment(head.get(1), &expected[1], element_type)
}

fn check_commitment<C: AffineRepr>(point: Option<&C>, commitment: &C, element_type: ElementType) -> Result<()> {
    match point {
        Some(point) if point == commitment => Ok(()),
        _ => Err(VerificationError::CommitmentMismatch(element_type).into()),
    }
}

fn check_powers<E: Pairing>(
    combination: &(E::G1Affine, E::G1Affine),
    g2_tau: &(E::G2Affine, E::G2Affine),
    element_type: ElementType,
) -> Result<()> {
    check_same_ratio::<E>(combination, g2_tau, VerificationError::PowersRatio(element_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        contribute,
        helpers::testing::{random_point, setup_contribution},
        initialize,
        G1Commitments,
        G2Commitments,
        KeyProof,
        PublicKey,
    };

    use ark_bn254::{Bn254, G1Affine, G2Affine};
    use ark_ec::CurveGroup;
    use rand::thread_rng;
    use setup_utils::{mul_affine, Error, PointEncoder, UseCompression};

    fn parameters() -> Phase1Parameters<Bn254> {
        Phase1Parameters::new(3, 5)
    }

    fn assert_rejected(current: &Contribution<Bn254>, previous: &Contribution<Bn254>, expected: VerificationError) {
        match verify_contribution(current, previous) {
            Err(Error::Verification(err)) => assert_eq!(err, expected),
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_valid_contribution_is_accepted() {
        let setup = setup_contribution(&parameters());
        verify_contribution(&setup.contribution, &setup.genesis).unwrap();
    }

    #[test]
    fn test_chained_contributions_are_accepted() {
        let parameters = parameters().with_compression(UseCompression::Yes);
        let setup = setup_contribution(&parameters);

        let mut decoder = parameters.decoder(&setup.accumulator[..]);
        let mut encoder = parameters.encoder(vec![]);
        let second = contribute(&mut decoder, &mut encoder, &parameters, &setup.contribution, &mut thread_rng()).unwrap();
        let accumulator = encoder.finish().unwrap();

        verify_contribution(&second, &setup.contribution).unwrap();
        verify_accumulator(&mut parameters.decoder(&accumulator[..]), &parameters, &second).unwrap();
        verify_transcript(&[setup.genesis.clone(), setup.contribution.clone(), second.clone()]).unwrap();

        // a contribution cannot skip its predecessor
        assert_rejected(&second, &setup.genesis, VerificationError::TauKnowledge);
    }

    #[test]
    fn test_mutated_public_keys_are_rejected() {
        let setup = setup_contribution(&parameters());
        let (current, previous) = (&setup.contribution, &setup.genesis);
        let other = random_point::<G1Affine>(&mut thread_rng());
        let other_g2 = random_point::<G2Affine>(&mut thread_rng());

        let cases: [(fn(&mut Contribution<Bn254>, G1Affine, G2Affine), VerificationError); 9] = [
            (|c, p, _| c.public_keys.tau.s = p, VerificationError::TauKnowledge),
            (|c, p, _| c.public_keys.tau.sx = p, VerificationError::TauKnowledge),
            (|c, _, q| c.public_keys.tau.spx = q, VerificationError::TauKnowledge),
            (|c, p, _| c.public_keys.alpha.s = p, VerificationError::AlphaKnowledge),
            (|c, p, _| c.public_keys.alpha.sx = p, VerificationError::AlphaKnowledge),
            (|c, _, q| c.public_keys.alpha.spx = q, VerificationError::AlphaKnowledge),
            (|c, p, _| c.public_keys.beta.s = p, VerificationError::BetaKnowledge),
            (|c, p, _| c.public_keys.beta.sx = p, VerificationError::BetaKnowledge),
            (|c, _, q| c.public_keys.beta.spx = q, VerificationError::BetaKnowledge),
        ];
        for (mutate, expected) in cases {
            let mut tampered = current.clone();
            mutate(&mut tampered, other, other_g2);
            assert_rejected(&tampered, previous, expected);
        }
    }

    #[test]
    fn test_swapped_proofs_are_rejected() {
        let setup = setup_contribution(&parameters());
        let mut tampered = setup.contribution.clone();
        std::mem::swap(&mut tampered.public_keys.tau, &mut tampered.public_keys.alpha);
        assert_rejected(&tampered, &setup.genesis, VerificationError::TauKnowledge);
    }

    #[test]
    fn test_mutated_commitments_are_rejected() {
        let setup = setup_contribution(&parameters());
        let (current, previous) = (&setup.contribution, &setup.genesis);
        let other = random_point::<G1Affine>(&mut thread_rng());
        let other_g2 = random_point::<G2Affine>(&mut thread_rng());

        let cases: [(fn(&mut Contribution<Bn254>, G1Affine, G2Affine), VerificationError); 5] = [
            (|c, p, _| c.g1.tau = p, VerificationError::TauG1Update),
            (|c, p, _| c.g1.alpha = p, VerificationError::AlphaG1Update),
            (|c, p, _| c.g1.beta = p, VerificationError::BetaG1Update),
            (|c, _, q| c.g2.tau = q, VerificationError::TauG2Update),
            (|c, _, q| c.g2.beta = q, VerificationError::BetaG2Update),
        ];
        for (mutate, expected) in cases {
            let mut tampered = current.clone();
            mutate(&mut tampered, other, other_g2);
            assert_rejected(&tampered, previous, expected);
        }
    }

    #[test]
    fn test_identity_contribution_is_rejected() {
        let genesis = Contribution::<Bn254>::genesis().unwrap();
        let zero = KeyProof {
            s: G1Affine::zero(),
            sx: G1Affine::zero(),
            spx: G2Affine::zero(),
        };
        let identity = Contribution::new(
            PublicKey {
                tau: zero,
                alpha: zero,
                beta: zero,
            },
            G1Commitments {
                tau: G1Affine::zero(),
                alpha: G1Affine::zero(),
                beta: G1Affine::zero(),
            },
            G2Commitments {
                tau: G2Affine::zero(),
                beta: G2Affine::zero(),
            },
        )
        .unwrap();

        assert_rejected(&identity, &genesis, VerificationError::TauKnowledge);
        assert!(matches!(
            verify_transcript(&[genesis, identity]),
            Err(Error::Verification(VerificationError::TauKnowledge))
        ));
    }

    #[test]
    fn test_zero_points_are_rejected() {
        let setup = setup_contribution(&parameters());
        let (current, previous) = (&setup.contribution, &setup.genesis);

        let cases: [(fn(&mut Contribution<Bn254>), VerificationError); 8] = [
            (|c| c.public_keys.tau.spx = G2Affine::zero(), VerificationError::TauKnowledge),
            (|c| c.public_keys.alpha.s = G1Affine::zero(), VerificationError::AlphaKnowledge),
            (|c| c.public_keys.beta.sx = G1Affine::zero(), VerificationError::BetaKnowledge),
            (|c| c.g1.tau = G1Affine::zero(), VerificationError::TauG1Update),
            (|c| c.g1.alpha = G1Affine::zero(), VerificationError::AlphaG1Update),
            (|c| c.g1.beta = G1Affine::zero(), VerificationError::BetaG1Update),
            (|c| c.g2.tau = G2Affine::zero(), VerificationError::TauG2Update),
            (|c| c.g2.beta = G2Affine::zero(), VerificationError::BetaG2Update),
        ];
        for (mutate, expected) in cases {
            let mut tampered = current.clone();
            mutate(&mut tampered);
            // resealed, so only the zero point can be blamed
            tampered.hash = tampered.compute_hash().unwrap();
            assert_rejected(&tampered, previous, expected);
        }
    }

    #[test]
    fn test_mutated_hash_is_rejected() {
        let setup = setup_contribution(&parameters());
        let mut tampered = setup.contribution.clone();
        tampered.hash[0] ^= 1;
        assert_rejected(&tampered, &setup.genesis, VerificationError::HashMismatch);
    }

    #[test]
    fn test_invalid_point_is_an_input_error() {
        let setup = setup_contribution(&parameters());
        let mut tampered = setup.contribution.clone();
        // (1, 1) is not on the curve
        tampered.public_keys.tau.s = G1Affine::new_unchecked(ark_bn254::Fq::from(1u64), ark_bn254::Fq::from(1u64));
        assert!(matches!(
            verify_contribution(&tampered, &setup.genesis),
            Err(Error::InvalidCurveInput(_))
        ));
    }

    #[test]
    fn test_valid_accumulator_is_accepted() {
        for batch_size in [1, 4, 16] {
            let parameters = Phase1Parameters::<Bn254>::new(3, batch_size);
            let setup = setup_contribution(&parameters);
            verify_accumulator(&mut parameters.decoder(&setup.accumulator[..]), &parameters, &setup.contribution)
                .unwrap();
            verify_accumulator(
                &mut parameters.decoder(&setup.genesis_accumulator[..]),
                &parameters,
                &setup.genesis,
            )
            .unwrap();
        }
    }

    #[test]
    fn test_accumulator_of_other_contribution_is_rejected() {
        let parameters = parameters();
        let setup = setup_contribution(&parameters);
        let result = verify_accumulator(&mut parameters.decoder(&setup.accumulator[..]), &parameters, &setup.genesis);
        assert!(matches!(
            result,
            Err(Error::Verification(VerificationError::CommitmentMismatch(ElementType::TauG1)))
        ));
    }

    /// Replaces point `index` of the tau_g1 section of an accumulator.
    fn tamper_tau_g1(parameters: &Phase1Parameters<Bn254>, accumulator: &[u8], index: usize, point: G1Affine) -> Vec<u8> {
        let mut decoder = parameters.decoder(accumulator);
        let mut tau_g1 = decoder.decode_batch::<G1Affine>(parameters.powers_g1_length).unwrap();
        tau_g1[index] = point;

        let mut encoder = parameters.encoder(vec![]);
        encoder.encode_batch(&tau_g1).unwrap();
        let mut tampered = encoder.finish().unwrap();
        tampered.extend_from_slice(decoder.into_inner());
        tampered
    }

    #[test]
    fn test_accumulator_with_wrong_generator_is_rejected() {
        let parameters = parameters();
        let setup = setup_contribution(&parameters);
        let tampered = tamper_tau_g1(&parameters, &setup.accumulator, 0, random_point(&mut thread_rng()));
        let result = verify_accumulator(&mut parameters.decoder(&tampered[..]), &parameters, &setup.contribution);
        assert!(matches!(
            result,
            Err(Error::Verification(VerificationError::InvalidGenerator(ElementType::TauG1)))
        ));
    }

    #[test]
    fn test_accumulator_with_wrong_power_is_rejected() {
        let parameters = parameters();
        let setup = setup_contribution(&parameters);
        let original = parameters.decoder(&setup.accumulator[..]).decode_batch::<G1Affine>(5).unwrap();
        // tau^4 replaced by tau^4 * 2
        let doubled = (original[4] + original[4]).into_affine();
        let tampered = tamper_tau_g1(&parameters, &setup.accumulator, 4, doubled);
        let result = verify_accumulator(&mut parameters.decoder(&tampered[..]), &parameters, &setup.contribution);
        assert!(matches!(
            result,
            Err(Error::Verification(VerificationError::PowersRatio(ElementType::TauG1)))
        ));
    }

    #[test]
    fn test_accumulator_with_wrong_beta_g2_is_rejected() {
        let parameters = parameters();
        let setup = setup_contribution(&parameters);
        let mut tampered = setup.accumulator.clone();
        let g2_size = setup_utils::buffer_size::<G2Affine>(parameters.compression);
        tampered.truncate(tampered.len() - g2_size);
        let mut encoder = parameters.encoder(tampered);
        encoder.encode(&mul_affine(&setup.contribution.g2.beta, &2u64.into())).unwrap();
        let tampered = encoder.finish().unwrap();

        let result = verify_accumulator(&mut parameters.decoder(&tampered[..]), &parameters, &setup.contribution);
        assert!(matches!(
            result,
            Err(Error::Verification(VerificationError::CommitmentMismatch(ElementType::BetaG2)))
        ));
    }

    #[test]
    fn test_transcript() {
        let setup = setup_contribution(&parameters());
        verify_transcript(&[setup.genesis.clone(), setup.contribution.clone()]).unwrap();
        verify_transcript(&[setup.genesis.clone()]).unwrap();

        assert!(matches!(
            verify_transcript::<Bn254>(&[]),
            Err(Error::Verification(VerificationError::EmptyTranscript))
        ));
        assert!(matches!(
            verify_transcript(&[setup.contribution.clone()]),
            Err(Error::Verification(VerificationError::InvalidGenesis))
        ));
        assert!(matches!(
            verify_transcript(&[setup.genesis.clone(), setup.contribution.clone(), setup.contribution.clone()]),
            Err(Error::Verification(VerificationError::TauKnowledge))
        ));
    }

    #[test]
    fn test_initialized_accumulator_matches_genesis() {
        let parameters = parameters().with_compression(UseCompression::Yes);
        let mut encoder = parameters.encoder(vec![]);
        let genesis = initialize(&mut encoder, &parameters).unwrap();
        let accumulator = encoder.finish().unwrap();
        verify_accumulator(&mut parameters.decoder(&accumulator[..]), &parameters, &genesis).unwrap();
    }
}
