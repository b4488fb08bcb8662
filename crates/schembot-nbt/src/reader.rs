//! Tag stream walker.
//!
//! All multi-byte values are big-endian. The stream must open with a named
//! compound; everything below it is parsed recursively with depth and length
//! guards so a hostile upload cannot balloon memory.

use std::io::Read;

use flate2::read::GzDecoder;
use indexmap::IndexMap;

use crate::error::NbtError;
use crate::tag::{
    Tag, TAG_BYTE, TAG_BYTE_ARRAY, TAG_COMPOUND, TAG_DOUBLE, TAG_END, TAG_FLOAT, TAG_INT,
    TAG_INT_ARRAY, TAG_LIST, TAG_LONG, TAG_LONG_ARRAY, TAG_SHORT, TAG_STRING,
};

/// Maximum inflated size (64 MiB). Schematic metadata is tiny; anything
/// larger is a decompression bomb.
pub const MAX_INFLATED_SIZE: usize = 64 * 1024 * 1024;

/// Maximum compound/list nesting.
pub const MAX_DEPTH: usize = 64;

/// Inflate a gzip stream and parse the contained tag tree.
pub fn parse_gzipped(data: &[u8]) -> Result<Tag, NbtError> {
    let mut inflated = Vec::new();
    let mut decoder = GzDecoder::new(data).take((MAX_INFLATED_SIZE + 1) as u64);
    decoder.read_to_end(&mut inflated)?;
    if inflated.len() > MAX_INFLATED_SIZE {
        return Err(NbtError::InflatedTooLarge(MAX_INFLATED_SIZE));
    }
    parse(&inflated)
}

/// Parse an uncompressed tag stream. The root must be a named compound;
/// trailing bytes after the root are ignored.
pub fn parse(data: &[u8]) -> Result<Tag, NbtError> {
    let mut reader = Reader::new(data);
    let id = reader.read_u8()?;
    if id != TAG_COMPOUND {
        return Err(NbtError::InvalidRoot(id));
    }
    // Root name is carried on the wire but irrelevant to lookups.
    reader.read_string()?;
    reader.read_payload(TAG_COMPOUND, 0)
}

/// Bounds-checked cursor over the inflated stream.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_exact(&mut self, len: usize) -> Result<&'a [u8], NbtError> {
        if self.remaining() < len {
            return Err(NbtError::UnexpectedEof(self.pos));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, NbtError> {
        Ok(self.read_exact(1)?[0])
    }

    fn read_i16(&mut self) -> Result<i16, NbtError> {
        let bytes = self.read_exact(2)?;
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_i32(&mut self) -> Result<i32, NbtError> {
        let bytes = self.read_exact(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_i64(&mut self) -> Result<i64, NbtError> {
        let bytes = self.read_exact(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(i64::from_be_bytes(buf))
    }

    fn read_f32(&mut self) -> Result<f32, NbtError> {
        Ok(f32::from_bits(self.read_i32()? as u32))
    }

    fn read_f64(&mut self) -> Result<f64, NbtError> {
        Ok(f64::from_bits(self.read_i64()? as u64))
    }

    /// A length-prefixed string: u16 length followed by UTF-8 bytes.
    fn read_string(&mut self) -> Result<String, NbtError> {
        let start = self.pos;
        let len = self.read_exact(2).map(|b| u16::from_be_bytes([b[0], b[1]]))? as usize;
        let bytes = self.read_exact(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NbtError::InvalidString(start))
    }

    /// A signed element count. Negative counts read as empty; positive
    /// counts are validated against the remaining input assuming at least
    /// `min_elem_size` bytes per element.
    fn read_count(&mut self, min_elem_size: usize) -> Result<usize, NbtError> {
        let count = self.read_i32()?;
        if count <= 0 {
            return Ok(0);
        }
        let count = count as usize;
        if count.saturating_mul(min_elem_size) > self.remaining() {
            return Err(NbtError::LengthOverrun {
                len: count,
                remaining: self.remaining(),
            });
        }
        Ok(count)
    }

    fn read_payload(&mut self, id: u8, depth: usize) -> Result<Tag, NbtError> {
        if depth > MAX_DEPTH {
            return Err(NbtError::DepthExceeded(MAX_DEPTH));
        }
        match id {
            TAG_BYTE => Ok(Tag::Byte(self.read_u8()? as i8)),
            TAG_SHORT => Ok(Tag::Short(self.read_i16()?)),
            TAG_INT => Ok(Tag::Int(self.read_i32()?)),
            TAG_LONG => Ok(Tag::Long(self.read_i64()?)),
            TAG_FLOAT => Ok(Tag::Float(self.read_f32()?)),
            TAG_DOUBLE => Ok(Tag::Double(self.read_f64()?)),
            TAG_BYTE_ARRAY => {
                let count = self.read_count(1)?;
                let bytes = self.read_exact(count)?;
                Ok(Tag::ByteArray(bytes.iter().map(|b| *b as i8).collect()))
            }
            TAG_STRING => Ok(Tag::String(self.read_string()?)),
            TAG_LIST => {
                let elem_id = self.read_u8()?;
                // Every payload occupies at least one byte, which bounds the
                // declared count before anything is allocated.
                let count = self.read_count(1)?;
                if count > 0 && (elem_id == TAG_END || elem_id > TAG_LONG_ARRAY) {
                    return Err(NbtError::UnknownTagId {
                        id: elem_id,
                        offset: self.pos,
                    });
                }
                let mut elems = Vec::with_capacity(count);
                for _ in 0..count {
                    elems.push(self.read_payload(elem_id, depth + 1)?);
                }
                Ok(Tag::List(elems))
            }
            TAG_COMPOUND => {
                let mut entries = IndexMap::new();
                loop {
                    let child_id = self.read_u8()?;
                    if child_id == TAG_END {
                        return Ok(Tag::Compound(entries));
                    }
                    let name = self.read_string()?;
                    let value = self.read_payload(child_id, depth + 1)?;
                    entries.insert(name, value);
                }
            }
            TAG_INT_ARRAY => {
                let count = self.read_count(4)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.read_i32()?);
                }
                Ok(Tag::IntArray(values))
            }
            TAG_LONG_ARRAY => {
                let count = self.read_count(8)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.read_i64()?);
                }
                Ok(Tag::LongArray(values))
            }
            other => Err(NbtError::UnknownTagId {
                id: other,
                offset: self.pos,
            }),
        }
    }
}
