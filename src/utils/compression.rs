use flate2::{Compression, Decompress, FlushDecompress, Status, write::ZlibEncoder};
use std::io::{self, Write};

use crate::error::{ObjectError, Result};

/// zlib-compress `data` at `level` (0-9).
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflate a zlib stream.
///
/// The stream must run to its end marker: a bad stream or one that stops
/// short is `CorruptData`.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut decompressed = Vec::with_capacity(compressed.len().saturating_mul(2).max(64));

    loop {
        if decompressed.len() == decompressed.capacity() {
            decompressed.reserve(decompressed.capacity());
        }
        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();

        let status = inflater
            .decompress_vec(&compressed[consumed..], &mut decompressed, FlushDecompress::None)
            .map_err(|err| corrupt(io::Error::new(io::ErrorKind::InvalidData, err)))?;

        if status == Status::StreamEnd {
            return Ok(decompressed);
        }

        // Output room left over means the inflater wanted more input.
        let buffer_full = decompressed.len() == decompressed.capacity();
        let stalled = inflater.total_in() as usize == consumed && inflater.total_out() == produced;
        let out_of_input = inflater.total_in() as usize == compressed.len();
        if !buffer_full && (stalled || out_of_input) {
            return Err(corrupt(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "zlib stream ended early",
            )));
        }
    }
}

fn corrupt(source: io::Error) -> ObjectError {
    ObjectError::CorruptData { id: None, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes() {
        let data = b"hello\nhello\nhello\n\0\x01\x02".repeat(50);
        let packed = compress(&data, 6).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn round_trips_empty_input() {
        let packed = compress(b"", 9).unwrap();
        assert!(decompress(&packed).unwrap().is_empty());
    }

    #[test]
    fn level_zero_still_round_trips() {
        let packed = compress(b"stored", 0).unwrap();
        assert_eq!(decompress(&packed).unwrap(), b"stored");
    }

    #[test]
    fn output_larger_than_initial_buffer() {
        let data = vec![b'a'; 1 << 20];
        let packed = compress(&data, 9).unwrap();
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn text_that_compresses_well_round_trips() {
        let data = b"fn main() { println!(\"hello\"); }\n".repeat(10);
        let packed = compress(&data, 6).unwrap();
        assert!(packed.len() * 2 < data.len());
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn garbage_is_corrupt() {
        let err = decompress(b"definitely not zlib").unwrap_err();
        assert!(matches!(err, ObjectError::CorruptData { id: None, .. }));
    }

    #[test]
    fn empty_input_is_corrupt() {
        assert!(matches!(
            decompress(b"").unwrap_err(),
            ObjectError::CorruptData { .. }
        ));
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let packed = compress(&b"some longer content".repeat(20), 6).unwrap();
        let err = decompress(&packed[..packed.len() / 2]).unwrap_err();
        assert!(matches!(err, ObjectError::CorruptData { .. }));
    }
}
