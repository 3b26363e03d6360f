//! Streaming WAV decoder
//!
//! [`WavDecoder`] owns a [`ByteSource`], parses the container once at
//! open, and then serves raw, sample-aligned, and converted-to-f32 reads
//! plus random access by sample index. All operations are synchronous
//! and the decoder is single-owner; resources are released on drop.

use crate::convert;
use crate::error::{Error, Result};
use crate::format::{ChunkHeader, FmtChunk, FormatTag, DATA_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::source::{ByteSource, FileSource, MemorySource};
use crate::util::le;
use crate::util::SampleFormat;
use std::path::Path;
use tracing::{debug, warn};

/// Largest displacement a single relative seek can express.
const MAX_SEEK_STEP: u64 = i32::MAX as u64;

/// Scratch buffer size for the buffered conversion path.
const CONVERT_CHUNK_BYTES: usize = 4096;

/// A live WAV decoding context over a byte source
///
/// "Sample" always means one per-channel value: a stereo frame counts as
/// two samples.
pub struct WavDecoder<S: ByteSource> {
    source: S,
    fmt: FmtChunk,
    translated_format_tag: FormatTag,
    bytes_per_sample: u32,
    total_sample_count: u64,
    bytes_remaining: u64,
}

impl WavDecoder<FileSource> {
    /// Open the WAV file at `path`
    ///
    /// The file handle is held until the decoder is dropped.
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(FileSource::open(path)?)
    }
}

impl<'a> WavDecoder<MemorySource<'a>> {
    /// Open a WAV file image from a pre-loaded memory buffer
    ///
    /// `data` must hold the entire file, not just the sample bytes. No
    /// copy is made; the buffer only has to outlive the decoder.
    pub fn open_memory(data: &'a [u8]) -> Result<Self> {
        Self::open(MemorySource::new(data))
    }
}

impl<S: ByteSource> WavDecoder<S> {
    /// Open a WAV stream from the given byte source
    ///
    /// Parses the RIFF/WAVE header and the "fmt " chunk, then walks the
    /// chunk list until the "data" chunk. On success the source is
    /// positioned on the first byte of sample data.
    pub fn open(mut source: S) -> Result<Self> {
        let mut riff = [0u8; 12];
        if source.read(&mut riff) != riff.len() {
            return Err(Error::format("short read in RIFF header"));
        }

        if &riff[0..4] != RIFF_MAGIC {
            return Err(Error::format("not a RIFF file"));
        }

        let riff_size = le::read_u32(&riff[4..8]);
        if riff_size < 36 {
            return Err(Error::format(format!(
                "RIFF chunk too small: {} bytes",
                riff_size
            )));
        }

        if &riff[8..12] != WAVE_MAGIC {
            return Err(Error::format("not a WAVE file"));
        }

        let fmt = FmtChunk::read(&mut source)?;
        let translated_format_tag = fmt.translated_tag();

        // The "data" chunk is not necessarily next; skip everything else.
        let data_size = loop {
            let mut header_bytes = [0u8; 8];
            if source.read(&mut header_bytes) != header_bytes.len() {
                return Err(Error::format("\"data\" chunk not found"));
            }

            let chunk = ChunkHeader::from_bytes(header_bytes);
            if &chunk.id == DATA_CHUNK {
                break chunk.size;
            }

            debug!(
                "skipping \"{}\" chunk ({} bytes)",
                String::from_utf8_lossy(&chunk.id),
                chunk.size
            );

            let mut to_skip = chunk.padded_size();
            while to_skip > 0 {
                let step = to_skip.min(MAX_SEEK_STEP);
                if !source.seek_relative(step as i32) {
                    return Err(Error::format(format!(
                        "failed to skip \"{}\" chunk",
                        String::from_utf8_lossy(&chunk.id)
                    )));
                }
                to_skip -= step;
            }
        };

        let bytes_per_sample = fmt.bytes_per_sample();
        let decoder = WavDecoder {
            source,
            translated_format_tag,
            bytes_per_sample,
            total_sample_count: data_size as u64 / bytes_per_sample as u64,
            bytes_remaining: data_size as u64,
            fmt,
        };

        debug!(
            "opened {} Hz {}ch {} stream, {} samples",
            decoder.fmt.sample_rate,
            decoder.fmt.channels,
            decoder.sample_format(),
            decoder.total_sample_count
        );

        Ok(decoder)
    }

    /// The parsed "fmt " chunk, exactly as stored in the file
    pub fn fmt(&self) -> &FmtChunk {
        &self.fmt
    }

    /// The effective encoding tag (EXTENSIBLE already resolved)
    pub fn format_tag(&self) -> FormatTag {
        self.translated_format_tag
    }

    /// Number of channels
    pub fn channels(&self) -> u16 {
        self.fmt.channels
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.fmt.sample_rate
    }

    /// Bits per sample as declared by the file
    pub fn bits_per_sample(&self) -> u16 {
        self.fmt.bits_per_sample
    }

    /// Bytes per sample (one per-channel value)
    pub fn bytes_per_sample(&self) -> u32 {
        self.bytes_per_sample
    }

    /// The native sample format of the data chunk
    pub fn sample_format(&self) -> SampleFormat {
        self.fmt.sample_format()
    }

    /// Total number of samples in the data chunk
    pub fn total_sample_count(&self) -> u64 {
        self.total_sample_count
    }

    /// Total number of interleaved frames in the data chunk
    pub fn total_frame_count(&self) -> u64 {
        self.total_sample_count / self.fmt.channels as u64
    }

    /// Number of not-yet-read bytes in the data chunk
    pub fn bytes_remaining(&self) -> u64 {
        self.bytes_remaining
    }

    /// Stream duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.total_frame_count() as f64 / self.fmt.sample_rate as f64
    }

    /// Read raw sample bytes
    ///
    /// Reads up to `out.len()` bytes of the data chunk, bounded by the
    /// bytes remaining. Returns the number of bytes actually read; a
    /// short count means end of data or an I/O error.
    pub fn read_raw(&mut self, out: &mut [u8]) -> usize {
        if out.is_empty() || self.bytes_remaining == 0 {
            return 0;
        }

        let to_read = (out.len() as u64).min(self.bytes_remaining) as usize;
        let bytes_read = self.source.read(&mut out[..to_read]);
        self.bytes_remaining -= bytes_read as u64;
        bytes_read
    }

    /// Read whole samples in the native format
    ///
    /// Reads up to `samples_to_read` samples into `out`, clamped to the
    /// samples that fit in `out`. Returns the number of whole samples
    /// read; a trailing partial sample is discarded. Only meaningful for
    /// the fixed-width encodings handled by this crate.
    pub fn read(&mut self, samples_to_read: usize, out: &mut [u8]) -> usize {
        if samples_to_read == 0 || out.is_empty() {
            return 0;
        }

        let bytes_per_sample = self.bytes_per_sample as usize;
        let samples = samples_to_read.min(out.len() / bytes_per_sample);
        let bytes_read = self.read_raw(&mut out[..samples * bytes_per_sample]);

        bytes_read / bytes_per_sample
    }

    /// Seek to the given sample index
    ///
    /// The index is clamped to the last sample; seeking an empty stream
    /// is a successful no-op. Bookkeeping keeps `bytes_remaining`
    /// consistent with the new position, so a subsequent read starts at
    /// the requested sample.
    pub fn seek(&mut self, sample: u64) -> bool {
        if self.total_sample_count == 0 {
            return true;
        }

        let sample = sample.min(self.total_sample_count - 1);

        let total_size = self.total_sample_count * self.bytes_per_sample as u64;
        let current_byte_pos = total_size - self.bytes_remaining;
        let target_byte_pos = sample * self.bytes_per_sample as u64;

        let (mut offset, forward) = if current_byte_pos < target_byte_pos {
            (target_byte_pos - current_byte_pos, true)
        } else {
            (current_byte_pos - target_byte_pos, false)
        };

        while offset > 0 {
            let step = offset.min(MAX_SEEK_STEP);

            let displacement = if forward { step as i32 } else { -(step as i32) };
            if !self.source.seek_relative(displacement) {
                // The position bookkeeping proceeds as if the seek
                // landed; subsequent reads may return stale bytes.
                warn!("relative seek of {} bytes failed", displacement);
            }

            if forward {
                self.bytes_remaining -= step;
            } else {
                self.bytes_remaining += step;
            }
            offset -= step;
        }

        true
    }

    /// Read samples converted to normalized 32-bit floats
    ///
    /// Returns the number of samples written to `out`. Encodings with no
    /// converter (ADPCM, unknown tags) read nothing and return 0.
    pub fn read_f32(&mut self, samples_to_read: usize, out: &mut [f32]) -> usize {
        if samples_to_read == 0 || out.is_empty() {
            return 0;
        }

        let samples_to_read = samples_to_read.min(out.len());

        // Fast path: the stream already holds f32 samples.
        if self.translated_format_tag == FormatTag::IeeeFloat && self.bytes_per_sample == 4 {
            let raw = bytemuck::cast_slice_mut::<f32, u8>(&mut out[..samples_to_read]);
            return self.read(samples_to_read, raw);
        }

        if !matches!(
            self.translated_format_tag,
            FormatTag::Pcm | FormatTag::IeeeFloat | FormatTag::ALaw | FormatTag::MuLaw
        ) {
            return 0;
        }

        let bytes_per_sample = self.bytes_per_sample as usize;
        let mut scratch = [0u8; CONVERT_CHUNK_BYTES];
        let mut total_samples_read = 0;
        let mut remaining = samples_to_read;

        while remaining > 0 {
            let samples_read = self.read(remaining, &mut scratch);
            if samples_read == 0 {
                break;
            }

            let raw = &scratch[..samples_read * bytes_per_sample];
            let converted = match self.translated_format_tag {
                FormatTag::Pcm => {
                    convert::pcm_to_f32(raw, bytes_per_sample, &mut out[total_samples_read..])
                }
                FormatTag::ALaw => convert::alaw_to_f32(raw, &mut out[total_samples_read..]),
                FormatTag::MuLaw => convert::ulaw_to_f32(raw, &mut out[total_samples_read..]),
                // IEEE float; the 4-byte case took the fast path, so
                // whatever remains is treated as f64.
                _ => convert::ieee_f64_to_f32(raw, &mut out[total_samples_read..]),
            };

            total_samples_read += converted;
            remaining -= samples_read;
        }

        total_samples_read
    }
}
