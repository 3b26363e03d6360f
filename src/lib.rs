//! wavdec - a streaming RIFF/WAVE audio decoder written in Rust
//!
//! wavdec parses the RIFF/WAVE container, exposes the declared audio
//! format, yields raw interleaved sample bytes on demand, supports random
//! access by sample index, and converts the common sample encodings
//! (u8/s16/s24/s32 PCM, f32/f64 IEEE, A-law, u-law) into normalized
//! 32-bit floating-point audio.
//!
//! # Architecture
//!
//! wavdec is organized into several key modules:
//!
//! - `source`: Pull-based byte sources (file-backed and in-memory)
//! - `format`: RIFF/WAVE container structures and "fmt " chunk parsing
//! - `decoder`: The streaming read/seek state machine
//! - `convert`: Bit-exact sample-to-f32 converters
//! - `util`: Endian primitives and sample format descriptions
//!
//! # Example
//!
//! ```no_run
//! use wavdec::WavDecoder;
//!
//! let mut decoder = WavDecoder::open_file("tone.wav").unwrap();
//! let mut samples = vec![0.0f32; decoder.total_sample_count() as usize];
//! let read = decoder.read_f32(samples.len(), &mut samples);
//! samples.truncate(read);
//! ```

pub mod convert;
pub mod decoder;
pub mod error;
pub mod format;
pub mod source;
pub mod util;

pub use decoder::WavDecoder;
pub use error::{Error, Result};
pub use format::{FmtChunk, FormatTag};
pub use source::{ByteSource, FileSource, MemorySource};
pub use util::SampleFormat;

/// wavdec version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;

/// Configuration for the wavdec library
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            debug: false,
        }
    }
}

/// Initialize the wavdec library with the given configuration
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(level)
            .try_init()
            .map_err(|e| Error::Init(format!("Failed to initialize logging: {}", e)))?;
    }

    Ok(())
}
