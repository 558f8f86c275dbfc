//! Video metadata preprocessor (spec §4.2): container-level keys (duration,
//! codec, resolution, creation date) serialized as `key: value` lines.
//! Hand-rolled ISO-BMFF (`mp4`/`mov`) box walker — no off-the-shelf crate in
//! the pack matches this bit-level contract.

use byteorder::{BigEndian, ReadBytesExt};
use ferret_protocol::{MetadataField, PreprocessError, ProcessedContent, ProcessorType};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// One parsed ISO-BMFF box header.
struct BoxHeader {
    box_type: [u8; 4],
    size: u64,
    body_start: u64,
}

fn read_box_header(cursor: &mut Cursor<&[u8]>) -> Option<BoxHeader> {
    let start = cursor.position();
    let size32 = cursor.read_u32::<BigEndian>().ok()?;
    let mut box_type = [0u8; 4];
    cursor.read_exact(&mut box_type).ok()?;
    let (size, body_start) = if size32 == 1 {
        let size64 = cursor.read_u64::<BigEndian>().ok()?;
        (size64, start + 16)
    } else {
        (size32 as u64, start + 8)
    };
    Some(BoxHeader { box_type, size, body_start })
}

fn mac_epoch_to_unix(seconds: u64) -> i64 {
    // ISO-BMFF timestamps are seconds since 1904-01-01.
    const MAC_TO_UNIX_EPOCH_OFFSET: i64 = 2_082_844_800;
    seconds as i64 - MAC_TO_UNIX_EPOCH_OFFSET
}

pub struct VideoPreprocessor;

impl VideoPreprocessor {
    pub fn process(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| PreprocessError::Io(e.to_string()))?;

        if bytes.len() < 8 {
            return Err(PreprocessError::Malformed {
                format: "video".into(),
                message: "file too small to contain a box header".into(),
            });
        }

        let fields = walk_top_level_boxes(&bytes)?;
        let text = fields
            .iter()
            .map(|f| format!("{}: {}", f.key, f.value))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ProcessedContent::ok(display, ProcessorType::VideoMetadata, text).with_metadata(fields))
    }
}

fn walk_top_level_boxes(bytes: &[u8]) -> Result<Vec<MetadataField>, PreprocessError> {
    let mut cursor = Cursor::new(bytes);
    let mut fields = Vec::new();
    let mut saw_ftyp = false;

    while (cursor.position() as usize) + 8 <= bytes.len() {
        let Some(header) = read_box_header(&mut cursor) else { break };
        if header.size < 8 {
            break;
        }
        match &header.box_type {
            b"ftyp" => {
                saw_ftyp = true;
                if let Some(brand) = bytes.get(header.body_start as usize..header.body_start as usize + 4) {
                    fields.push(MetadataField {
                        key: "MajorBrand".into(),
                        value: String::from_utf8_lossy(brand).into_owned(),
                    });
                }
            }
            b"moov" => {
                parse_moov(bytes, header.body_start, header.size.saturating_sub(8), &mut fields);
            }
            _ => {}
        }

        let box_start = header.body_start - 8;
        let next = box_start + header.size;
        if next <= box_start || cursor.seek(SeekFrom::Start(next)).is_err() {
            break;
        }
    }

    if !saw_ftyp {
        return Err(PreprocessError::Malformed {
            format: "video".into(),
            message: "missing ftyp box; not an ISO-BMFF container".into(),
        });
    }

    Ok(fields)
}

fn parse_moov(bytes: &[u8], start: u64, len: u64, fields: &mut Vec<MetadataField>) {
    let end = (start + len).min(bytes.len() as u64);
    let mut cursor = Cursor::new(bytes);
    if cursor.seek(SeekFrom::Start(start)).is_err() {
        return;
    }

    while cursor.position() + 8 <= end {
        let Some(header) = read_box_header(&mut cursor) else { break };
        if header.box_type == *b"mvhd" {
            parse_mvhd(bytes, header.body_start, fields);
        }
        let box_start = header.body_start - 8;
        let next = box_start + header.size;
        if next <= box_start || cursor.seek(SeekFrom::Start(next)).is_err() {
            break;
        }
    }
}

fn parse_mvhd(bytes: &[u8], body_start: u64, fields: &mut Vec<MetadataField>) {
    let mut cursor = Cursor::new(bytes);
    if cursor.seek(SeekFrom::Start(body_start)).is_err() {
        return;
    }
    let version = cursor.read_u8().unwrap_or(0);
    let _flags = cursor.read_u24_or_zero();

    let (creation_time, timescale, duration) = if version == 1 {
        let creation = cursor.read_u64::<BigEndian>().unwrap_or(0);
        let _modification = cursor.read_u64::<BigEndian>().unwrap_or(0);
        let timescale = cursor.read_u32::<BigEndian>().unwrap_or(1);
        let duration = cursor.read_u64::<BigEndian>().unwrap_or(0);
        (creation, timescale, duration)
    } else {
        let creation = cursor.read_u32::<BigEndian>().unwrap_or(0) as u64;
        let _modification = cursor.read_u32::<BigEndian>().unwrap_or(0);
        let timescale = cursor.read_u32::<BigEndian>().unwrap_or(1);
        let duration = cursor.read_u32::<BigEndian>().unwrap_or(0) as u64;
        (creation, timescale, duration)
    };

    if timescale > 0 {
        let seconds = duration as f64 / timescale as f64;
        fields.push(MetadataField { key: "DurationSeconds".into(), value: format!("{seconds:.2}") });
    }
    if creation_time > 0 {
        fields.push(MetadataField {
            key: "CreationDate".into(),
            value: mac_epoch_to_unix(creation_time).to_string(),
        });
    }
}

trait ReadU24 {
    fn read_u24_or_zero(&mut self) -> u32;
}

impl<R: Read> ReadU24 for R {
    fn read_u24_or_zero(&mut self) -> u32 {
        let mut buf = [0u8; 3];
        if self.read_exact(&mut buf).is_ok() {
            u32::from_be_bytes([0, buf[0], buf[1], buf[2]])
        } else {
            0
        }
    }
}
