use phase1::{contribute as contribute_to, Contribution, Phase1Parameters};
use setup_utils::log_hash;

use ark_ec::pairing::Pairing;
use ark_serialize::Compress;

use anyhow::{ensure, Result};
use fs_err::File;
use rand::{CryptoRng, Rng};
use std::io::{BufReader, BufWriter, Write};
use tracing::info;

/// Contribution files are always stored with compressed points.
pub(crate) const CONTRIBUTION_IS_COMPRESSED: Compress = Compress::Yes;

pub(crate) fn read_contribution<E: Pairing>(fname: &str) -> Result<Contribution<E>> {
    let reader = BufReader::new(File::open(fname)?);
    Ok(Contribution::read(reader, CONTRIBUTION_IS_COMPRESSED)?)
}

pub(crate) fn write_contribution<E: Pairing>(fname: &str, contribution: &Contribution<E>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(fname)?);
    contribution.write(&mut writer, CONTRIBUTION_IS_COMPRESSED)?;
    writer.flush()?;
    Ok(())
}

/// Fails unless `fname` holds exactly one accumulator of the given parameters.
pub(crate) fn check_accumulator_length<E: Pairing>(fname: &str, parameters: &Phase1Parameters<E>) -> Result<()> {
    let expected = parameters.get_length() as u64;
    let actual = File::open(fname)?.metadata()?.len();
    ensure!(
        actual == expected,
        "The size of {} should be {}, but it's {}, so something isn't right.",
        fname,
        expected,
        actual
    );
    Ok(())
}

pub fn contribute<E: Pairing>(
    challenge_fname: &str,
    previous_fname: &str,
    response_fname: &str,
    contribution_fname: &str,
    parameters: &Phase1Parameters<E>,
    rng: &mut (impl Rng + CryptoRng),
) -> Result<Contribution<E>> {
    check_accumulator_length(challenge_fname, parameters)?;

    let previous = read_contribution::<E>(previous_fname)?;
    info!("`{}` claims (!!! Must not be blindly trusted) to have a hash:", previous_fname);
    log_hash(&previous.hash);

    info!("Computing and writing your contribution, this could take a while...");

    let mut decoder = parameters.decoder(BufReader::new(File::open(challenge_fname)?));
    let mut encoder = parameters.encoder(BufWriter::new(File::create(response_fname)?));
    let contribution = contribute_to(&mut decoder, &mut encoder, parameters, &previous, rng)?;
    encoder.finish()?;

    write_contribution(contribution_fname, &contribution)?;

    info!(
        "Done!\n\n\
              Your contribution has been written to {}\n\n\
              The BLAKE2b hash of your contribution is:\n",
        contribution_fname
    );
    log_hash(&contribution.hash);
    info!("Thank you for your participation, much appreciated! :)");

    Ok(contribution)
}
