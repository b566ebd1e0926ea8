use crate::{helpers::encode_repeated, Contribution, Phase1Parameters};
use setup_utils::{PointEncoder, Result};

use ark_ec::{pairing::Pairing, AffineRepr};
use tracing::{debug, info, info_span};

///
/// Phase 1: Initialization
///
/// Writes an accumulator in which every point is the generator of its group, i.e. the
/// powers of `tau = alpha = beta = 1`, and returns the matching initial contribution.
///
pub fn initialize<E: Pairing>(
    encoder: &mut impl PointEncoder,
    parameters: &Phase1Parameters<E>,
) -> Result<Contribution<E>> {
    let span = info_span!("phase1-initialization");
    let _enter = span.enter();

    info!("starting...");

    let g1 = E::G1Affine::generator();
    let g2 = E::G2Affine::generator();
    let batch_size = parameters.batch_size;

    encode_repeated(encoder, g1, parameters.powers_g1_length, batch_size)?;
    debug!("initialized tau_g1");
    encode_repeated(encoder, g2, parameters.powers_length, batch_size)?;
    debug!("initialized tau_g2");
    encode_repeated(encoder, g1, parameters.powers_length, batch_size)?;
    debug!("initialized alpha_g1");
    encode_repeated(encoder, g1, parameters.powers_length, batch_size)?;
    debug!("initialized beta_g1");
    encoder.encode(&g2)?;
    debug!("initialized beta_g2");

    info!("phase1-initialization complete");

    Contribution::genesis()
}
