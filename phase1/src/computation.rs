use crate::{keypair, scaling::scale_points, Contribution, G1Commitments, G2Commitments, Phase1Parameters};
use setup_utils::{PointDecoder, PointEncoder, Result};

use ark_ec::pairing::Pairing;
use rand::{CryptoRng, Rng};
use tracing::{debug, info, info_span};

///
/// Phase 1: Contribution
///
/// Samples fresh secrets bound to the hash of `previous`, streams the accumulator
/// from `decoder` to `encoder` while multiplying every point by the matching power
/// of tau (and by alpha or beta in their sections), and returns the new contribution.
///
/// The secrets are zeroed before this function returns. Nothing written to the
/// encoder may be used if an error is returned.
///
pub fn contribute<E: Pairing, R: Rng + CryptoRng>(
    decoder: &mut impl PointDecoder,
    encoder: &mut impl PointEncoder,
    parameters: &Phase1Parameters<E>,
    previous: &Contribution<E>,
    rng: &mut R,
) -> Result<Contribution<E>> {
    let span = info_span!("phase1-contribution");
    let _enter = span.enter();

    info!("starting...");

    let (public_keys, private_key) = keypair::<E, _>(rng, &previous.hash)?;
    debug!("generated the keypair");

    let batch_size = parameters.batch_size;
    let tau = &private_key.tau;

    let tau_g1 = scale_points::<E::G1Affine>(decoder, encoder, parameters.powers_g1_length, batch_size, tau, None)?;
    debug!("applied powers of tau to tau_g1 elements");
    let tau_g2 = scale_points::<E::G2Affine>(decoder, encoder, parameters.powers_length, batch_size, tau, None)?;
    debug!("applied powers of tau to tau_g2 elements");
    let alpha_g1 = scale_points::<E::G1Affine>(
        decoder,
        encoder,
        parameters.powers_length,
        batch_size,
        tau,
        Some(&private_key.alpha),
    )?;
    debug!("applied powers of tau to alpha_g1 elements");
    let beta_g1 = scale_points::<E::G1Affine>(
        decoder,
        encoder,
        parameters.powers_length,
        batch_size,
        tau,
        Some(&private_key.beta),
    )?;
    debug!("applied powers of tau to beta_g1 elements");
    let beta_g2 = scale_points::<E::G2Affine>(decoder, encoder, 1, batch_size, tau, Some(&private_key.beta))?;
    debug!("applied beta to beta_g2");

    drop(private_key);

    let contribution = Contribution::new(
        public_keys,
        G1Commitments {
            tau: tau_g1,
            alpha: alpha_g1,
            beta: beta_g1,
        },
        G2Commitments {
            tau: tau_g2,
            beta: beta_g2,
        },
    )?;

    info!("phase1-contribution complete");

    Ok(contribution)
}
