//! "fmt " chunk structures and parsing

use super::FMT_CHUNK;
use crate::error::{Error, Result};
use crate::source::ByteSource;
use crate::util::le;
use crate::util::SampleFormat;

/// WAV format tag identifying the sample encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// PCM (uncompressed)
    Pcm,
    /// Microsoft ADPCM (parsed but not decodable)
    Adpcm,
    /// IEEE Float
    IeeeFloat,
    /// ITU-T G.711 A-law
    ALaw,
    /// ITU-T G.711 u-law
    MuLaw,
    /// Extensible format; the real encoding lives in the sub-format GUID
    Extensible,
    /// Unknown format
    Unknown(u16),
}

impl From<u16> for FormatTag {
    fn from(val: u16) -> Self {
        match val {
            0x0001 => FormatTag::Pcm,
            0x0002 => FormatTag::Adpcm,
            0x0003 => FormatTag::IeeeFloat,
            0x0006 => FormatTag::ALaw,
            0x0007 => FormatTag::MuLaw,
            0xFFFE => FormatTag::Extensible,
            other => FormatTag::Unknown(other),
        }
    }
}

impl From<FormatTag> for u16 {
    fn from(tag: FormatTag) -> Self {
        match tag {
            FormatTag::Pcm => 0x0001,
            FormatTag::Adpcm => 0x0002,
            FormatTag::IeeeFloat => 0x0003,
            FormatTag::ALaw => 0x0006,
            FormatTag::MuLaw => 0x0007,
            FormatTag::Extensible => 0xFFFE,
            FormatTag::Unknown(val) => val,
        }
    }
}

/// The parsed "fmt " chunk, exactly as specified by the wave file
///
/// Immutable once the decoder is open. The extension fields
/// (`extended_size` and below) are zero-defaulted when the chunk size is
/// 16 or 18.
#[derive(Debug, Clone)]
pub struct FmtChunk {
    /// Format tag (encoding ID) as stored in the file
    pub format_tag: FormatTag,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second; informational only
    pub avg_bytes_per_sec: u32,
    /// Bytes per interleaved frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Size of the extension block; 22 when present
    pub extended_size: u16,
    /// Number of valid bits per sample
    pub valid_bits_per_sample: u16,
    /// Speaker position mask
    pub channel_mask: u32,
    /// The sub-format GUID, exactly as specified by the wave file
    pub sub_format: [u8; 16],
}

impl FmtChunk {
    /// Parse a "fmt " chunk from the current position of `source`
    ///
    /// Accepts the three chunk sizes found in the wild: 16 (classic), 18
    /// (classic plus empty extension) and 40 (WAVE_FORMAT_EXTENSIBLE).
    /// Leaves the source positioned just past the chunk body.
    pub fn read<S: ByteSource>(source: &mut S) -> Result<Self> {
        let mut header = [0u8; 24];
        if source.read(&mut header) != header.len() {
            return Err(Error::format("short read in \"fmt \" chunk"));
        }

        if &header[0..4] != FMT_CHUNK {
            return Err(Error::format("missing \"fmt \" chunk"));
        }

        let chunk_size = le::read_u32(&header[4..8]);
        if chunk_size != 16 && chunk_size != 18 && chunk_size != 40 {
            return Err(Error::format(format!(
                "unexpected \"fmt \" chunk size: {}",
                chunk_size
            )));
        }

        let mut fmt = FmtChunk {
            format_tag: le::read_u16(&header[8..10]).into(),
            channels: le::read_u16(&header[10..12]),
            sample_rate: le::read_u32(&header[12..16]),
            avg_bytes_per_sec: le::read_u32(&header[16..20]),
            block_align: le::read_u16(&header[20..22]),
            bits_per_sample: le::read_u16(&header[22..24]),
            extended_size: 0,
            valid_bits_per_sample: 0,
            channel_mask: 0,
            sub_format: [0u8; 16],
        };

        fmt.validate()?;

        match chunk_size {
            18 => {
                // Two bytes of empty extension.
                if !source.seek_relative(2) {
                    return Err(Error::format("failed to skip \"fmt \" extension"));
                }
            }
            40 => {
                let mut cb_size = [0u8; 2];
                if source.read(&mut cb_size) != cb_size.len() {
                    return Err(Error::format("short read in \"fmt \" extension"));
                }

                fmt.extended_size = le::read_u16(&cb_size);
                if fmt.extended_size != 22 {
                    return Err(Error::format(format!(
                        "unexpected \"fmt \" extension size: {}",
                        fmt.extended_size
                    )));
                }

                let mut ext = [0u8; 22];
                if source.read(&mut ext) != ext.len() {
                    return Err(Error::format("short read in \"fmt \" extension"));
                }

                fmt.valid_bits_per_sample = le::read_u16(&ext[0..2]);
                fmt.channel_mask = le::read_u32(&ext[2..6]);
                fmt.sub_format = le::read_guid(&ext[6..22]);
            }
            _ => {}
        }

        Ok(fmt)
    }

    /// The effective encoding tag
    ///
    /// For WAVE_FORMAT_EXTENSIBLE the real tag is carried in the first
    /// two bytes of the sub-format GUID; for every other tag the stored
    /// tag is already the answer.
    pub fn translated_tag(&self) -> FormatTag {
        match self.format_tag {
            FormatTag::Extensible => le::read_u16(&self.sub_format[0..2]).into(),
            tag => tag,
        }
    }

    /// Bytes per sample (one per-channel value)
    pub fn bytes_per_sample(&self) -> u32 {
        self.block_align as u32 / self.channels as u32
    }

    /// The native sample format of the data chunk
    pub fn sample_format(&self) -> SampleFormat {
        match self.translated_tag() {
            FormatTag::Pcm => match self.bytes_per_sample() {
                1 => SampleFormat::U8,
                2 => SampleFormat::S16,
                3 => SampleFormat::S24,
                4 => SampleFormat::S32,
                _ => SampleFormat::Unknown,
            },
            FormatTag::IeeeFloat => match self.bytes_per_sample() {
                4 => SampleFormat::F32,
                8 => SampleFormat::F64,
                _ => SampleFormat::Unknown,
            },
            FormatTag::ALaw => SampleFormat::ALaw,
            FormatTag::MuLaw => SampleFormat::MuLaw,
            _ => SampleFormat::Unknown,
        }
    }

    // The sample arithmetic below divides by channels and block_align;
    // a file that would make those divisions meaningless cannot be
    // opened.
    fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::format("invalid channel count: 0"));
        }

        if self.block_align == 0 || self.block_align % self.channels != 0 {
            return Err(Error::format(format!(
                "block align {} not divisible by {} channels",
                self.block_align, self.channels
            )));
        }

        Ok(())
    }
}
