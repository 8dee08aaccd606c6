//! Brotli helpers for batch segment lists and compressed L2 messages.

use brotli::{BrotliDecompressStream, BrotliResult, BrotliState, HeapAlloc, HuffmanCode};
use std::io::{self, Write};

/// The internal buffer size used by the brotli reader and writer.
const BUFFER_SIZE: usize = 4096;

/// The brotli quality used when encoding. Only decoding is consensus critical.
const COMPRESSION_QUALITY: u32 = 11;

/// The base two logarithm of the brotli window size used when encoding.
const COMPRESSION_LG_WINDOW: u32 = 22;

/// A brotli stream failed to decompress.
///
/// The bytes produced before the failure are kept in [Self::partial], since some callers still
/// decode whatever prefix was recovered.
#[derive(Debug, thiserror::Error)]
#[error("brotli decompression failed: {source}")]
pub struct BrotliDecompressionError {
    /// The output decompressed before the failure.
    pub partial: Vec<u8>,
    /// The reason decompression stopped.
    pub source: io::Error,
}

/// Decompresses the given brotli stream, producing at most `limit` bytes.
///
/// Output past the limit is silently truncated. A stream that ends before all of `data` is
/// consumed is rejected, with the decompressed output kept as the partial result.
pub fn decompress_brotli(data: &[u8], limit: u64) -> Result<Vec<u8>, BrotliDecompressionError> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let mut state = BrotliState::new(
        HeapAlloc::<u8>::new(0),
        HeapAlloc::<u32>::new(0),
        HeapAlloc::<HuffmanCode>::new(Default::default()),
    );

    let mut output = Vec::new();
    let mut chunk = [0u8; BUFFER_SIZE];
    let mut available_in = data.len();
    let mut input_offset = 0;
    let mut written = 0;

    loop {
        let mut available_out = chunk.len();
        let mut output_offset = 0;
        let result = BrotliDecompressStream(
            &mut available_in,
            &mut input_offset,
            data,
            &mut available_out,
            &mut output_offset,
            &mut chunk,
            &mut written,
            &mut state,
        );

        let remaining = limit - output.len();
        output.extend_from_slice(&chunk[..output_offset.min(remaining)]);
        if output.len() >= limit {
            tracing::trace!(target: "compression", written, limit, "truncated brotli stream output");
            return Ok(output);
        }

        let (kind, reason) = match result {
            BrotliResult::NeedsMoreOutput => continue,
            BrotliResult::ResultSuccess if available_in == 0 => {
                tracing::trace!(target: "compression", written, "decompressed brotli stream");
                return Ok(output);
            }
            BrotliResult::ResultSuccess => {
                (io::ErrorKind::InvalidData, "excessive input after brotli stream")
            }
            BrotliResult::NeedsMoreInput => (io::ErrorKind::UnexpectedEof, "truncated brotli stream"),
            BrotliResult::ResultFailure => (io::ErrorKind::InvalidData, "invalid brotli stream"),
        };
        return Err(BrotliDecompressionError {
            partial: output,
            source: io::Error::new(kind, reason),
        });
    }
}

/// Compresses the given bytes into a brotli stream.
pub fn compress_brotli(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut output = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(
            &mut output,
            BUFFER_SIZE,
            COMPRESSION_QUALITY,
            COMPRESSION_LG_WINDOW,
        );
        writer.write_all(data)?;
        writer.flush()?;
    }
    Ok(output)
}
