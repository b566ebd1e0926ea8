//! Point stream codecs.
//!
//! Accumulators are stored as plain concatenations of canonically encoded curve
//! points with no length prefixes, so readers are driven entirely by the lengths
//! known from the ceremony parameters.

use crate::{
    elements::{CheckForCorrectness, UseCompression},
    errors::{Error, Result},
};

use ark_ec::AffineRepr;
use std::io::{Read, Write};

/// Sequential source of curve points.
pub trait PointDecoder {
    /// Reads the next point of the stream.
    fn decode<C: AffineRepr>(&mut self) -> Result<C>;

    /// Reads the next `n` points of the stream.
    fn decode_batch<C: AffineRepr>(&mut self, n: usize) -> Result<Vec<C>> {
        (0..n).map(|_| self.decode::<C>()).collect()
    }
}

/// Sequential sink of curve points.
pub trait PointEncoder {
    /// Appends a point to the stream.
    fn encode<C: AffineRepr>(&mut self, point: &C) -> Result<()>;

    fn encode_batch<C: AffineRepr>(&mut self, points: &[C]) -> Result<()> {
        points.iter().try_for_each(|point| self.encode(point))
    }
}

/// Decodes points from any reader.
pub struct Decoder<R> {
    reader: R,
    compression: UseCompression,
    check: CheckForCorrectness,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R, compression: UseCompression, check: CheckForCorrectness) -> Self {
        Self {
            reader,
            compression,
            check,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> PointDecoder for Decoder<R> {
    fn decode<C: AffineRepr>(&mut self) -> Result<C> {
        let point = C::deserialize_with_mode(&mut self.reader, self.compression.into(), self.check.validate())?;
        if self.check.non_zero() && point.is_zero() {
            return Err(Error::PointAtInfinity(std::any::type_name::<C>()));
        }
        Ok(point)
    }
}

/// Encodes points into any writer.
pub struct Encoder<W: Write> {
    writer: W,
    compression: UseCompression,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W, compression: UseCompression) -> Self {
        Self { writer, compression }
    }

    /// Flushes the underlying writer and returns it.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> PointEncoder for Encoder<W> {
    fn encode<C: AffineRepr>(&mut self, point: &C) -> Result<()> {
        point.serialize_with_mode(&mut self.writer, self.compression.into())?;
        Ok(())
    }
}
