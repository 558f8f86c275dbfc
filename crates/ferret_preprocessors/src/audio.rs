//! Audio metadata preprocessor (spec §4.2): ID3v2 (head) + ID3v1 (tail) for
//! MP3, RIFF/WAVE chunk walking for WAV. Hand-rolled on `byteorder` since no
//! single off-the-shelf crate matches the spec's exact synchsafe-size and
//! chunk-alignment contract.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use ferret_protocol::{MetadataField, PreprocessError, ProcessedContent, ProcessorType};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

const ID3V2_MAX_SIZE: u32 = 1024 * 1024;

pub struct AudioPreprocessor;

impl AudioPreprocessor {
    pub fn process(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| PreprocessError::Io(e.to_string()))?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();

        let fields = match extension.as_str() {
            "wav" => parse_wav(&bytes)?,
            _ => {
                let mut fields = parse_id3v2(&bytes).unwrap_or_default();
                if let Some(v1) = parse_id3v1(&bytes) {
                    for field in v1 {
                        if !fields.iter().any(|f| f.key == field.key) {
                            fields.push(field);
                        }
                    }
                }
                fields
            }
        };

        let text = fields
            .iter()
            .map(|f| format!("{}: {}", f.key, f.value))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ProcessedContent::ok(display, ProcessorType::AudioMetadata, text).with_metadata(fields))
    }
}

fn synchsafe_to_u32(bytes: [u8; 4]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| (acc << 7) | (b & 0x7f) as u32)
}

fn frame_field_name(id: &str) -> Option<&'static str> {
    match id {
        "TIT2" => Some("Title"),
        "TPE1" => Some("Artist"),
        "TALB" => Some("Album"),
        "TYER" | "TDRC" => Some("Year"),
        "TCON" => Some("Genre"),
        "TRCK" => Some("Track"),
        "COMM" => Some("Comment"),
        _ => None,
    }
}

fn decode_id3_text(encoding: u8, bytes: &[u8]) -> String {
    let trimmed = bytes.split(|&b| b == 0).next().unwrap_or(bytes);
    match encoding {
        1 | 2 => String::from_utf16_lossy(
            &trimmed
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect::<Vec<_>>(),
        ),
        _ => String::from_utf8_lossy(trimmed).into_owned(),
    }
}

/// Parses an ID3v2 header at the file head (spec §4.2: signature check,
/// synchsafe 28-bit size bounded by 1 MiB).
fn parse_id3v2(bytes: &[u8]) -> Option<Vec<MetadataField>> {
    if bytes.len() < 10 || &bytes[0..3] != b"ID3" {
        return None;
    }
    let size = synchsafe_to_u32([bytes[6], bytes[7], bytes[8], bytes[9]]);
    if size == 0 || size > ID3V2_MAX_SIZE {
        return None;
    }

    let mut cursor = Cursor::new(&bytes[10..(10 + size as usize).min(bytes.len())]);
    let mut fields = Vec::new();

    loop {
        let mut frame_id = [0u8; 4];
        if cursor.read_exact(&mut frame_id).is_err() {
            break;
        }
        if frame_id == [0, 0, 0, 0] {
            break;
        }
        let frame_size = match cursor.read_u32::<BigEndian>() {
            Ok(size) => size,
            Err(_) => break,
        };
        let _flags = cursor.read_u16::<BigEndian>().unwrap_or(0);

        let mut payload = vec![0u8; frame_size as usize];
        if cursor.read_exact(&mut payload).is_err() {
            break;
        }

        let id_str = String::from_utf8_lossy(&frame_id).into_owned();
        if let Some(field_name) = frame_field_name(&id_str) {
            if !payload.is_empty() {
                let encoding = payload[0];
                let text = decode_id3_text(encoding, &payload[1..]);
                fields.push(MetadataField { key: field_name.into(), value: text });
            }
        }
    }

    Some(fields)
}

/// Parses the final 128 bytes as ID3v1 (spec §4.2: marked by `"TAG"`).
fn parse_id3v1(bytes: &[u8]) -> Option<Vec<MetadataField>> {
    if bytes.len() < 128 {
        return None;
    }
    let tail = &bytes[bytes.len() - 128..];
    if &tail[0..3] != b"TAG" {
        return None;
    }

    let field = |start: usize, len: usize| -> String {
        String::from_utf8_lossy(&tail[start..start + len])
            .trim_end_matches('\0')
            .trim()
            .to_string()
    };

    let mut fields = vec![
        MetadataField { key: "Title".into(), value: field(3, 30) },
        MetadataField { key: "Artist".into(), value: field(33, 30) },
        MetadataField { key: "Album".into(), value: field(63, 30) },
        MetadataField { key: "Year".into(), value: field(93, 4) },
        MetadataField { key: "Comment".into(), value: field(97, 30) },
    ];
    fields.retain(|f| !f.value.is_empty());
    Some(fields)
}

/// Validates RIFF/WAVE, parses `fmt ` for sample-rate/channels/bit-rate and
/// INFO sub-chunks inside any `LIST` chunk (spec §4.2).
fn parse_wav(bytes: &[u8]) -> Result<Vec<MetadataField>, PreprocessError> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(PreprocessError::Malformed {
            format: "wav".into(),
            message: "missing RIFF/WAVE signature".into(),
        });
    }

    let mut cursor = Cursor::new(bytes);
    cursor.seek(SeekFrom::Start(12)).ok();
    let mut fields = Vec::new();

    loop {
        let mut chunk_id = [0u8; 4];
        if cursor.read_exact(&mut chunk_id).is_err() {
            break;
        }
        let chunk_size = match cursor.read_u32::<LittleEndian>() {
            Ok(size) => size,
            Err(_) => break,
        };
        let chunk_start = cursor.position();

        match &chunk_id {
            b"fmt " => {
                let audio_format = cursor.read_u16::<LittleEndian>().unwrap_or(0);
                let channels = cursor.read_u16::<LittleEndian>().unwrap_or(0);
                let sample_rate = cursor.read_u32::<LittleEndian>().unwrap_or(0);
                let _byte_rate = cursor.read_u32::<LittleEndian>().unwrap_or(0);
                let _block_align = cursor.read_u16::<LittleEndian>().unwrap_or(0);
                let bits_per_sample = cursor.read_u16::<LittleEndian>().unwrap_or(0);
                fields.push(MetadataField { key: "AudioFormat".into(), value: audio_format.to_string() });
                fields.push(MetadataField { key: "Channels".into(), value: channels.to_string() });
                fields.push(MetadataField { key: "SampleRate".into(), value: sample_rate.to_string() });
                fields.push(MetadataField { key: "BitsPerSample".into(), value: bits_per_sample.to_string() });
            }
            b"LIST" => {
                let mut list_type = [0u8; 4];
                if cursor.read_exact(&mut list_type).is_ok() && &list_type == b"INFO" {
                    let list_end = chunk_start + chunk_size as u64;
                    while cursor.position() + 8 <= list_end {
                        let mut sub_id = [0u8; 4];
                        if cursor.read_exact(&mut sub_id).is_err() {
                            break;
                        }
                        let sub_size = match cursor.read_u32::<LittleEndian>() {
                            Ok(size) => size,
                            Err(_) => break,
                        };
                        let mut payload = vec![0u8; sub_size as usize];
                        if cursor.read_exact(&mut payload).is_err() {
                            break;
                        }
                        if sub_size % 2 == 1 {
                            let _ = cursor.read_u8();
                        }
                        if let Some(name) = info_field_name(&sub_id) {
                            let value = String::from_utf8_lossy(&payload)
                                .trim_end_matches('\0')
                                .to_string();
                            fields.push(MetadataField { key: name.into(), value });
                        }
                    }
                }
            }
            _ => {}
        }

        let next = chunk_start + chunk_size as u64 + (chunk_size % 2) as u64;
        if cursor.seek(SeekFrom::Start(next)).is_err() {
            break;
        }
    }

    Ok(fields)
}

fn info_field_name(id: &[u8; 4]) -> Option<&'static str> {
    match id {
        b"INAM" => Some("Title"),
        b"IART" => Some("Artist"),
        b"IPRD" => Some("Album"),
        b"ICRD" => Some("Year"),
        b"IGNR" => Some("Genre"),
        b"ICMT" => Some("Comment"),
        b"ICOP" => Some("Copyright"),
        b"IENG" => Some("Engineer"),
        b"ISFT" => Some("Software"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synchsafe_decodes_28_bit_size() {
        assert_eq!(synchsafe_to_u32([0x00, 0x00, 0x02, 0x01]), 257);
    }

    #[test]
    fn rejects_wav_without_riff_signature() {
        let err = parse_wav(b"not a wav file at all").unwrap_err();
        assert!(matches!(err, PreprocessError::Malformed { .. }));
    }

    #[test]
    fn parses_minimal_fmt_chunk() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&36u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&2u16.to_le_bytes()); // channels
        bytes.extend_from_slice(&44100u32.to_le_bytes()); // sample rate
        bytes.extend_from_slice(&176400u32.to_le_bytes()); // byte rate
        bytes.extend_from_slice(&4u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

        let fields = parse_wav(&bytes).unwrap();
        assert!(fields.iter().any(|f| f.key == "SampleRate" && f.value == "44100"));
    }

    #[test]
    fn id3v1_requires_tag_marker() {
        let bytes = vec![0u8; 128];
        assert!(parse_id3v1(&bytes).is_none());
    }
}
