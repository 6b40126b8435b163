use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result, bail};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

/// FourCC helper constants.
const TAG_RIFF: u32 = u32::from_be_bytes(*b"RIFF");
const TAG_WAVE: u32 = u32::from_be_bytes(*b"WAVE");
const TAG_FMT: u32 = u32::from_be_bytes(*b"fmt ");
const TAG_DATA: u32 = u32::from_be_bytes(*b"data");

const FORMAT_PCM: u16 = 1;
const FORMAT_FLOAT: u16 = 3;

/// A decoded sound held in memory for the lifetime of the process.
/// Samples are interleaved f32 in [-1, 1].
pub struct SoundBuffer {
    sample_rate: u32,
    channels: u16,
    samples: Vec<f32>,
}

impl SoundBuffer {
    /// Read and decode a WAV file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::decode(&bytes)
    }

    /// Decode a RIFF/WAVE byte stream. Uncompressed PCM (8/16 bit) and
    /// 32-bit float payloads are supported; anything else is rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(bytes);
        let magic = reader
            .read_u32::<BigEndian>()
            .context("failed to read RIFF magic")?;
        if magic != TAG_RIFF {
            bail!("unsupported container magic {:08x}", magic);
        }
        let _file_size = reader
            .read_u32::<LittleEndian>()
            .context("failed to read RIFF size")?;
        let form = reader
            .read_u32::<BigEndian>()
            .context("failed to read form type")?;
        if form != TAG_WAVE {
            bail!("RIFF form is not WAVE");
        }

        let mut format: Option<(u16, u16, u32, u16)> = None;
        let mut data: Option<Vec<u8>> = None;
        while let Ok(tag) = reader.read_u32::<BigEndian>() {
            let size = reader
                .read_u32::<LittleEndian>()
                .context("failed to read chunk size")?;
            match tag {
                TAG_FMT => {
                    let audio_format = reader.read_u16::<LittleEndian>()?;
                    let channels = reader.read_u16::<LittleEndian>()?;
                    let sample_rate = reader.read_u32::<LittleEndian>()?;
                    let _byte_rate = reader.read_u32::<LittleEndian>()?;
                    let _block_align = reader.read_u16::<LittleEndian>()?;
                    let bits = reader.read_u16::<LittleEndian>()?;
                    if size > 16 {
                        reader.seek(SeekFrom::Current(i64::from(size - 16)))?;
                    }
                    format = Some((audio_format, channels, sample_rate, bits));
                }
                TAG_DATA => {
                    let mut payload = vec![0u8; size as usize];
                    reader
                        .read_exact(&mut payload)
                        .context("data chunk truncated")?;
                    data = Some(payload);
                }
                _ => {
                    reader.seek(SeekFrom::Current(i64::from(size)))?;
                }
            }
            // Chunks are word aligned; odd sizes carry a pad byte.
            if size % 2 == 1 {
                reader.seek(SeekFrom::Current(1))?;
            }
        }

        let (audio_format, channels, sample_rate, bits) =
            format.context("missing fmt chunk")?;
        let payload = data.context("missing data chunk")?;
        if channels == 0 {
            bail!("fmt chunk declares zero channels");
        }
        let samples: Vec<f32> = match (audio_format, bits) {
            (FORMAT_PCM, 16) => payload
                .chunks_exact(2)
                .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / i16::MAX as f32)
                .collect(),
            (FORMAT_PCM, 8) => payload
                .iter()
                .map(|&byte| byte as f32 / 127.5 - 1.0)
                .collect(),
            (FORMAT_FLOAT, 32) => payload
                .chunks_exact(4)
                .map(|quad| f32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]))
                .collect(),
            (format, bits) => bail!("unsupported WAV encoding: format {format}, {bits} bits"),
        };

        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// An empty buffer that plays as silence; the fallback when a sound
    /// asset fails to load.
    pub fn silent() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
            samples: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    /// One frame mixed down to mono, or None past the end of the buffer.
    pub fn frame(&self, index: usize) -> Option<f32> {
        let channels = usize::from(self.channels.max(1));
        let start = index.checked_mul(channels)?;
        let slice = self.samples.get(start..start + channels)?;
        Some(slice.iter().sum::<f32>() / channels as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    fn pcm16_fixture(sample_rate: u32, channels: u16, frames: &[i16]) -> Vec<u8> {
        let mut bytes = Vec::new();
        let data_len = frames.len() as u32 * 2;
        bytes.extend_from_slice(b"RIFF");
        bytes.write_u32::<LittleEndian>(36 + data_len).unwrap();
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.write_u32::<LittleEndian>(16).unwrap();
        bytes.write_u16::<LittleEndian>(FORMAT_PCM).unwrap();
        bytes.write_u16::<LittleEndian>(channels).unwrap();
        bytes.write_u32::<LittleEndian>(sample_rate).unwrap();
        bytes
            .write_u32::<LittleEndian>(sample_rate * u32::from(channels) * 2)
            .unwrap();
        bytes.write_u16::<LittleEndian>(channels * 2).unwrap();
        bytes.write_u16::<LittleEndian>(16).unwrap();
        bytes.extend_from_slice(b"data");
        bytes.write_u32::<LittleEndian>(data_len).unwrap();
        for sample in frames {
            bytes.write_i16::<LittleEndian>(*sample).unwrap();
        }
        bytes
    }

    #[test]
    fn decodes_pcm16_mono() {
        let fixture = pcm16_fixture(22_050, 1, &[0, i16::MAX, i16::MIN + 1, -1]);
        let buffer = SoundBuffer::decode(&fixture).unwrap();
        assert_eq!(buffer.sample_rate(), 22_050);
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.frames(), 4);
        assert!((buffer.frame(1).unwrap() - 1.0).abs() < 0.001);
        assert!((buffer.frame(2).unwrap() + 1.0).abs() < 0.001);
    }

    #[test]
    fn mixes_stereo_frames_to_mono() {
        let fixture = pcm16_fixture(44_100, 2, &[i16::MAX, 0, 0, i16::MAX]);
        let buffer = SoundBuffer::decode(&fixture).unwrap();
        assert_eq!(buffer.frames(), 2);
        assert!((buffer.frame(0).unwrap() - 0.5).abs() < 0.001);
        assert!((buffer.frame(1).unwrap() - 0.5).abs() < 0.001);
    }

    #[test]
    fn frame_past_the_end_is_none() {
        let fixture = pcm16_fixture(44_100, 1, &[100, 200]);
        let buffer = SoundBuffer::decode(&fixture).unwrap();
        assert!(buffer.frame(2).is_none());
    }

    #[test]
    fn rejects_non_riff_input() {
        assert!(SoundBuffer::decode(b"OggS junk that is not a wav").is_err());
    }

    #[test]
    fn rejects_compressed_encodings() {
        let mut fixture = pcm16_fixture(44_100, 1, &[0]);
        // Flip the audio format field to an ADPCM id.
        fixture[20] = 2;
        assert!(SoundBuffer::decode(&fixture).is_err());
    }

    #[test]
    fn silent_buffer_has_no_frames() {
        let buffer = SoundBuffer::silent();
        assert_eq!(buffer.frames(), 0);
        assert!(buffer.frame(0).is_none());
    }
}
