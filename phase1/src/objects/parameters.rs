use setup_utils::{buffer_size, CheckForCorrectness, Decoder, Encoder, UseCompression};

use ark_ec::pairing::Pairing;

use std::{
    io::{Read, Write},
    marker::PhantomData,
};

/// The default number of points held in memory at once while streaming.
pub const BATCH_SIZE: usize = 1 << 20;

/// The parameters used for the trusted setup ceremony
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase1Parameters<E> {
    /// The circuit size exponent (ie length will be 2^power),
    /// depends on the computation you want to support.
    pub power: usize,
    /// The number of Powers of Tau Alpha/Beta/G2 elements which will be accumulated
    pub powers_length: usize,
    /// The number of Powers of Tau G1 elements which will be accumulated
    pub powers_g1_length: usize,
    /// The number of points decoded, transformed and encoded per batch.
    /// Only affects memory usage, never the results.
    pub batch_size: usize,
    /// Encoding of the points in accumulator streams
    pub compression: UseCompression,
    /// Checks run on every decoded point
    pub check: CheckForCorrectness,
    engine_type: PhantomData<E>,
}

impl<E: Pairing> Phase1Parameters<E> {
    /// Constructs the parameters for accumulating 2^`power` powers, with uncompressed
    /// streams which are fully checked when read.
    pub fn new(power: usize, batch_size: usize) -> Self {
        // 2^{power}
        let powers_length = 1 << power;
        // 2^{power+1} - 1
        let powers_g1_length = (powers_length << 1) - 1;

        Self {
            power,
            powers_length,
            powers_g1_length,
            batch_size,
            compression: UseCompression::No,
            check: CheckForCorrectness::Full,
            engine_type: PhantomData,
        }
    }

    pub fn with_compression(mut self, compression: UseCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_check(mut self, check: CheckForCorrectness) -> Self {
        self.check = check;
        self
    }

    /// Returns the length in bytes of a serialized accumulator
    pub fn get_length(&self) -> usize {
        let g1_size = buffer_size::<E::G1Affine>(self.compression);
        let g2_size = buffer_size::<E::G2Affine>(self.compression);

        // G1 Tau powers
        self.powers_g1_length * g1_size +
            // G2 Tau Powers + Alpha Tau powers + Beta Tau powers
            self.powers_length * (g2_size + (g1_size * 2)) +
            // Beta in G2
            g2_size
    }

    /// Wraps `reader` into a point decoder using these parameters' encoding and checks.
    pub fn decoder<R: Read>(&self, reader: R) -> Decoder<R> {
        Decoder::new(reader, self.compression, self.check)
    }

    /// Wraps `writer` into a point encoder using these parameters' encoding.
    pub fn encoder<W: Write>(&self, writer: W) -> Encoder<W> {
        Encoder::new(writer, self.compression)
    }
}
