mod contribute;
pub use contribute::contribute;

mod new_challenge;
pub use new_challenge::new_challenge;

mod verify;
pub use verify::{verify, verify_transcript_file};

use setup_utils::UseCompression;

use gumdrop::Options;

#[derive(Debug, Options, Clone)]
pub struct Phase1Opts {
    help: bool,
    #[options(help = "the size of batches to process", default = "1048576")]
    pub batch_size: usize,
    #[options(help = "the circuit power (circuit size will be 2^{power})", default = "21")]
    pub power: usize,
    #[options(help = "whether accumulator points are compressed (yes/no)", default = "no")]
    pub compression: UseCompression,
    #[options(help = "skip the curve and subgroup checks of points read from accumulators")]
    pub unchecked: bool,
    #[options(help = "the log level used when RUST_LOG is not set", default = "info")]
    pub verbosity: String,
    #[options(command)]
    pub command: Option<Command>,
}

// The supported commands
#[derive(Debug, Options, Clone)]
pub enum Command {
    // this creates a new accumulator and its initial contribution
    #[options(help = "creates a new accumulator in which every point is a generator")]
    New(NewOpts),
    #[options(help = "contributes to an accumulator with fresh randomness")]
    Contribute(ContributeOpts),
    #[options(help = "verifies a contribution and the accumulator it produced")]
    Verify(VerifyOpts),
    #[options(help = "verifies a file of consecutive contributions starting from the initial one")]
    VerifyTranscript(VerifyTranscriptOpts),
}

#[derive(Debug, Options, Clone)]
pub struct NewOpts {
    help: bool,
    #[options(help = "the accumulator file to create", default = "challenge")]
    pub challenge_fname: String,
    #[options(help = "the initial contribution file to create", default = "challenge.contribution")]
    pub contribution_fname: String,
}

#[derive(Debug, Options, Clone)]
pub struct ContributeOpts {
    help: bool,
    #[options(help = "the accumulator to contribute to", default = "challenge")]
    pub challenge_fname: String,
    #[options(help = "the contribution which produced the accumulator", default = "challenge.contribution")]
    pub previous_fname: String,
    #[options(help = "the accumulator file to create", default = "response")]
    pub response_fname: String,
    #[options(help = "the contribution file to create", default = "response.contribution")]
    pub contribution_fname: String,
    #[options(help = "a file holding a hex encoded seed, for reproducible contributions")]
    pub seed: Option<String>,
}

#[derive(Debug, Options, Clone)]
pub struct VerifyOpts {
    help: bool,
    #[options(help = "the accumulator to verify", default = "response")]
    pub response_fname: String,
    #[options(help = "the contribution the verified one builds upon", default = "challenge.contribution")]
    pub previous_fname: String,
    #[options(help = "the contribution to verify", default = "response.contribution")]
    pub contribution_fname: String,
}

#[derive(Debug, Options, Clone)]
pub struct VerifyTranscriptOpts {
    help: bool,
    #[options(help = "the file holding every contribution in order", default = "transcript")]
    pub transcript_fname: String,
}
