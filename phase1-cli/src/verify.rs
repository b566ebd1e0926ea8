use crate::contribute::{check_accumulator_length, read_contribution, CONTRIBUTION_IS_COMPRESSED};
use phase1::{verify_accumulator, verify_contribution, verify_transcript, Contribution, Phase1Parameters};
use setup_utils::log_hash;

use ark_ec::pairing::Pairing;

use anyhow::Result;
use fs_err::File;
use std::io::{BufRead, BufReader};
use tracing::info;

/// Verifies that the contribution in `contribution_fname` builds upon the one in
/// `previous_fname`, and that `response_fname` is the accumulator it describes.
pub fn verify<E: Pairing>(
    response_fname: &str,
    previous_fname: &str,
    contribution_fname: &str,
    parameters: &Phase1Parameters<E>,
) -> Result<()> {
    info!(
        "Will verify a contribution to accumulator for 2^{} powers of tau",
        parameters.power
    );

    check_accumulator_length(response_fname, parameters)?;

    let previous = read_contribution::<E>(previous_fname)?;
    let contribution = read_contribution::<E>(contribution_fname)?;

    verify_contribution(&contribution, &previous)?;
    info!("Contribution is based on the previous one, and its proofs of knowledge are valid");

    let mut decoder = parameters.decoder(BufReader::new(File::open(response_fname)?));
    verify_accumulator(&mut decoder, parameters, &contribution)?;
    info!("`{}` is the accumulator described by the contribution", response_fname);

    info!("Verification succeeded! The contribution has a hash:");
    log_hash(&contribution.hash);

    Ok(())
}

/// Verifies a file made of consecutive contributions, the first being the initial one.
pub fn verify_transcript_file<E: Pairing>(transcript_fname: &str) -> Result<Vec<Contribution<E>>> {
    let mut reader = BufReader::new(File::open(transcript_fname)?);
    let mut contributions = vec![];
    while !reader.fill_buf()?.is_empty() {
        contributions.push(Contribution::<E>::read(&mut reader, CONTRIBUTION_IS_COMPRESSED)?);
    }

    info!("Verifying a transcript of {} contributions", contributions.len());
    verify_transcript(&contributions)?;

    if let Some(last) = contributions.last() {
        info!("Transcript is valid. The last contribution has a hash:");
        log_hash(&last.hash);
    }

    Ok(contributions)
}
