//! RIFF WAVE description.
//!
//! Only uncompressed PCM is described in full. Other compression types are
//! reported as [`WavProbe::Unsupported`] along with their format chunk.

use makedds_common::{fourcc, BinaryReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

const RIFF: u32 = fourcc(b"RIFF");
const WAVE: u32 = fourcc(b"WAVE");
const FMT: u32 = fourcc(b"fmt ");
const DATA: u32 = fourcc(b"data");

/// `WAVE_FORMAT_PCM`.
pub const COMPRESSION_PCM: u16 = 0x0001;

/// Header at the start of every RIFF file.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RiffHeader {
    /// `'RIFF'`.
    pub chunk_id: u32,
    /// File size minus 8.
    pub data_size: u32,
    /// `'WAVE'`.
    pub riff_type: u32,
}

/// Header preceding each RIFF chunk.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RiffChunkHeader {
    pub chunk_id: u32,
    /// Size of the chunk data, excluding this header and padding.
    pub data_size: u32,
}

/// The `fmt ` chunk payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct WaveFormat {
    pub compression_type: u16,
    pub channel_count: u16,
    pub sample_rate: u32,
    pub bytes_per_second: u32,
    pub block_alignment: u16,
    pub bits_per_sample: u16,
}

impl WaveFormat {
    /// Bytes per sample frame across all channels.
    pub fn frame_size(&self) -> usize {
        let channels = self.channel_count as usize;
        let bits = self.bits_per_sample as usize;
        channels * (bits / 8)
    }
}

/// One `data` chunk of PCM samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveClip<'a> {
    pub data_size: usize,
    /// Sample frames in the clip.
    pub sample_count: usize,
    /// Seconds.
    pub duration: f32,
    pub samples: &'a [u8],
}

#[derive(Debug, Clone, PartialEq)]
pub enum WavProbe<'a> {
    Pcm {
        format: WaveFormat,
        clips: Vec<WaveClip<'a>>,
    },
    Unsupported {
        format: WaveFormat,
    },
}

impl WavProbe<'_> {
    pub fn format(&self) -> &WaveFormat {
        match self {
            Self::Pcm { format, .. } | Self::Unsupported { format } => format,
        }
    }
}

/// Offset of the first chunk at or after `start` whose id is `id`.
///
/// Chunks begin on even offsets, so odd-sized payloads are skipped along
/// with their pad byte. The returned offset points at the chunk header.
pub fn find_chunk(data: &[u8], start: usize, id: u32) -> Option<usize> {
    let header_size = std::mem::size_of::<RiffChunkHeader>();
    let mut offset = start;
    while offset < data.len() {
        let header: RiffChunkHeader = BinaryReader::new_at(data, offset).read_struct().ok()?;
        if header.chunk_id == id {
            return Some(offset);
        }
        offset = offset
            .checked_add(header_size)?
            .checked_add(header.data_size as usize)?;
        if offset & 1 != 0 {
            offset += 1;
        }
    }
    None
}

/// Describe a WAV file held in memory, reporting at most `max_clips` clips.
pub fn describe(data: &[u8], max_clips: usize) -> Result<WavProbe<'_>> {
    let min_size = std::mem::size_of::<RiffHeader>()
        + 2 * std::mem::size_of::<RiffChunkHeader>()
        + std::mem::size_of::<WaveFormat>();
    if data.len() < min_size {
        return Err(Error::TooShort {
            container: "WAV",
            needed: min_size,
            available: data.len(),
        });
    }

    let riff: RiffHeader = BinaryReader::new(data).read_struct()?;
    let (chunk_id, riff_type) = (riff.chunk_id, riff.riff_type);
    if chunk_id != RIFF || riff_type != WAVE {
        return Err(Error::InvalidSignature {
            container: "WAV",
            actual: data[..12].to_vec(),
        });
    }

    let chunk_header_size = std::mem::size_of::<RiffChunkHeader>();
    let format_offset =
        find_chunk(data, std::mem::size_of::<RiffHeader>(), FMT).ok_or(Error::MissingChunk("fmt "))?;
    let format: WaveFormat =
        BinaryReader::new_at(data, format_offset + chunk_header_size).read_struct()?;

    if format.compression_type != COMPRESSION_PCM {
        return Ok(WavProbe::Unsupported { format });
    }

    let frame_size = format.frame_size();
    let sample_rate = format.sample_rate;

    let mut clips = Vec::new();
    let mut search = format_offset;
    while clips.len() < max_clips {
        let Some(offset) = find_chunk(data, search, DATA) else {
            break;
        };
        let header: RiffChunkHeader = BinaryReader::new_at(data, offset).read_struct()?;
        let data_size = header.data_size as usize;
        let start = offset + chunk_header_size;
        let samples = data
            .get(start..start.saturating_add(data_size))
            .ok_or(Error::Truncated {
                what: "data chunk",
                offset,
            })?;

        let (sample_count, duration) = if frame_size == 0 || sample_rate == 0 {
            (0, 0.0)
        } else {
            (
                data_size / frame_size,
                data_size as f32 / (frame_size as f32 * sample_rate as f32),
            )
        };

        clips.push(WaveClip {
            data_size,
            sample_count,
            duration,
            samples,
        });

        search = start + data_size + (data_size & 1);
    }

    Ok(WavProbe::Pcm { format, clips })
}
