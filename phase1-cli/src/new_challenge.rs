use crate::contribute::write_contribution;
use phase1::{initialize, Phase1Parameters};
use setup_utils::log_hash;

use ark_ec::pairing::Pairing;

use anyhow::Result;
use fs_err::File;
use std::io::BufWriter;
use tracing::info;

pub fn new_challenge<E: Pairing>(
    challenge_fname: &str,
    contribution_fname: &str,
    parameters: &Phase1Parameters<E>,
) -> Result<()> {
    info!(
        "Will generate an empty accumulator for 2^{} powers of tau",
        parameters.power
    );
    info!("In total will generate up to {} powers", parameters.powers_g1_length);

    let mut encoder = parameters.encoder(BufWriter::new(File::create(challenge_fname)?));
    let contribution = initialize(&mut encoder, parameters)?;
    encoder.finish()?;

    write_contribution(contribution_fname, &contribution)?;

    info!("Empty contribution is formed with a hash:");
    log_hash(&contribution.hash);
    info!("Wrote a fresh accumulator to {}", challenge_fname);

    Ok(())
}
