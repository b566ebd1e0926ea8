use phase1::Phase1Parameters;
use phase1_cli::{contribute, new_challenge, verify, verify_transcript_file, Command, Phase1Opts};
use setup_utils::{derive_rng_from_seed, CheckForCorrectness};

use ark_bn254::Bn254;

use anyhow::{Context, Result};
use gumdrop::Options;
use rand::thread_rng;
use std::{process, time::Instant};
use tracing::{error, info};
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{time::UtcTime, Subscriber},
};

fn execute_cmd(opts: Phase1Opts) -> Result<()> {
    let check = match opts.unchecked {
        true => CheckForCorrectness::No,
        false => CheckForCorrectness::Full,
    };
    let parameters = Phase1Parameters::<Bn254>::new(opts.power, opts.batch_size)
        .with_compression(opts.compression)
        .with_check(check);

    let command = opts.clone().command.unwrap_or_else(|| {
        error!("No command was provided.");
        error!("{}", Phase1Opts::usage());
        process::exit(2)
    });

    let now = Instant::now();
    match command {
        Command::New(opt) => {
            new_challenge(&opt.challenge_fname, &opt.contribution_fname, &parameters)?;
        }
        Command::Contribute(opt) => {
            let (challenge, previous, response, contribution) = (
                &opt.challenge_fname,
                &opt.previous_fname,
                &opt.response_fname,
                &opt.contribution_fname,
            );
            match &opt.seed {
                Some(seed_fname) => {
                    // contribute with randomness derived from the seed file
                    let seed = hex::decode(fs_err::read_to_string(seed_fname)?.trim())
                        .context("seed should be a hex string")?;
                    let mut rng = derive_rng_from_seed(&seed);
                    contribute(challenge, previous, response, contribution, &parameters, &mut rng)?;
                }
                None => {
                    contribute(challenge, previous, response, contribution, &parameters, &mut thread_rng())?;
                }
            }
        }
        Command::Verify(opt) => {
            verify(
                &opt.response_fname,
                &opt.previous_fname,
                &opt.contribution_fname,
                &parameters,
            )?;
        }
        Command::VerifyTranscript(opt) => {
            verify_transcript_file::<Bn254>(&opt.transcript_fname)?;
        }
    };

    let new_now = Instant::now();
    info!("Executing {:?} took: {:?}", opts.command, new_now.duration_since(now));

    Ok(())
}

fn main() {
    let opts: Phase1Opts = Phase1Opts::parse_args_default_or_exit();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&opts.verbosity));
    Subscriber::builder()
        .with_target(false)
        .with_timer(UtcTime::rfc_3339())
        .with_env_filter(filter)
        .init();

    if let Err(err) = execute_cmd(opts) {
        error!("{:#}", err);
        process::exit(1);
    }
}
