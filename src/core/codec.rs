// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Binary wire codec shared by records, actions and warp payloads.
//!
//! Integers are fixed-width big-endian. Variable byte strings carry a 2-byte
//! length prefix. Optional sections start with a bitmask byte followed by the
//! fields whose bit is set, in declaration order.

use crate::core::types::{Address, Id, ADDRESS_LEN, ID_LEN};
use thiserror::Error;

/// Width of a byte-string length prefix.
pub const U16_LEN: usize = 2;
/// Width of a u64.
pub const U64_LEN: usize = 8;

/// Codec error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of input")]
    Truncated,
    #[error("trailing bytes")]
    TrailingBytes,
    #[error("field exceeds size limit")]
    TooLarge,
    #[error("required field is empty")]
    Missing,
    #[error("invalid bool byte")]
    InvalidBool,
    #[error("too many optional fields")]
    OptionalOverflow,
    #[error("invalid object")]
    InvalidObject,
}

/// Append-only encoder.
#[derive(Debug, Default)]
pub struct Packer {
    buf: Vec<u8>,
}

impl Packer {
    /// Encoder with reserved capacity.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            buf: Vec::with_capacity(n),
        }
    }

    /// Append one byte.
    pub fn pack_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    /// Append a bool as 0x0 / 0x1.
    pub fn pack_bool(&mut self, v: bool) {
        self.buf.push(u8::from(v));
    }

    /// Append a big-endian u16.
    pub fn pack_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append a big-endian u32.
    pub fn pack_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append a big-endian u64.
    pub fn pack_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append a big-endian i64.
    pub fn pack_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Append an id.
    pub fn pack_id(&mut self, id: &Id) {
        self.buf.extend_from_slice(id.as_bytes());
    }

    /// Append an address.
    pub fn pack_address(&mut self, addr: &Address) {
        self.buf.extend_from_slice(addr.as_bytes());
    }

    /// Append raw bytes without a prefix.
    pub fn pack_fixed(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    /// Append a u16-length-prefixed byte string.
    pub fn pack_bytes(&mut self, b: &[u8]) -> Result<(), CodecError> {
        let len = u16::try_from(b.len()).map_err(|_| CodecError::TooLarge)?;
        self.pack_u16(len);
        self.buf.extend_from_slice(b);
        Ok(())
    }

    /// Append an optional section (bitmask, then present fields).
    pub fn pack_optional(&mut self, op: OptionalPacker) {
        self.buf.push(op.bits);
        self.buf.extend_from_slice(&op.inner.buf);
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish encoding.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Builder for an optional section. Zero values are omitted.
#[derive(Debug, Default)]
pub struct OptionalPacker {
    bits: u8,
    slot: u8,
    inner: Packer,
}

impl OptionalPacker {
    /// Empty section.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_slot(&mut self, present: bool) -> Result<bool, CodecError> {
        if self.slot >= 8 {
            return Err(CodecError::OptionalOverflow);
        }
        if present {
            self.bits |= 1 << self.slot;
        }
        self.slot += 1;
        Ok(present)
    }

    /// Pack a u64 if non-zero.
    pub fn pack_u64(&mut self, v: u64) -> Result<(), CodecError> {
        if self.next_slot(v != 0)? {
            self.inner.pack_u64(v);
        }
        Ok(())
    }

    /// Pack an i64 if non-zero.
    pub fn pack_i64(&mut self, v: i64) -> Result<(), CodecError> {
        if self.next_slot(v != 0)? {
            self.inner.pack_i64(v);
        }
        Ok(())
    }

    /// Pack an id if non-empty.
    pub fn pack_id(&mut self, id: &Id) -> Result<(), CodecError> {
        if self.next_slot(!id.is_empty())? {
            self.inner.pack_id(id);
        }
        Ok(())
    }
}

/// Cursor-based decoder over a borrowed buffer.
#[derive(Debug)]
pub struct Unpacker<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Unpacker<'a> {
    /// Decoder positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(n).ok_or(CodecError::Truncated)?;
        let out = self.bytes.get(self.pos..end).ok_or(CodecError::Truncated)?;
        self.pos = end;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read one byte.
    pub fn unpack_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a strict 0x0 / 0x1 bool.
    pub fn unpack_bool(&mut self) -> Result<bool, CodecError> {
        match self.unpack_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(CodecError::InvalidBool),
        }
    }

    /// Read a big-endian u16.
    pub fn unpack_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian u32.
    pub fn unpack_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian u64. `required` rejects zero.
    pub fn unpack_u64(&mut self, required: bool) -> Result<u64, CodecError> {
        let v = u64::from_be_bytes(self.take_array()?);
        if required && v == 0 {
            return Err(CodecError::Missing);
        }
        Ok(v)
    }

    /// Read a big-endian i64.
    pub fn unpack_i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Read an id. `required` rejects [`Id::EMPTY`].
    pub fn unpack_id(&mut self, required: bool) -> Result<Id, CodecError> {
        let id = Id::from_bytes(self.take_array::<ID_LEN>()?);
        if required && id.is_empty() {
            return Err(CodecError::Missing);
        }
        Ok(id)
    }

    /// Read an address.
    pub fn unpack_address(&mut self) -> Result<Address, CodecError> {
        Ok(Address::from_bytes(self.take_array::<ADDRESS_LEN>()?))
    }

    /// Read `n` raw bytes.
    pub fn unpack_fixed(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        self.take(n)
    }

    /// Read a u16-length-prefixed byte string of at most `max` bytes.
    pub fn unpack_bytes(&mut self, max: usize, required: bool) -> Result<&'a [u8], CodecError> {
        let len = self.unpack_u16()? as usize;
        if len > max {
            return Err(CodecError::TooLarge);
        }
        if required && len == 0 {
            return Err(CodecError::Missing);
        }
        self.take(len)
    }

    /// Begin reading an optional section.
    pub fn unpack_optional(&mut self) -> Result<OptionalUnpacker, CodecError> {
        Ok(OptionalUnpacker {
            bits: self.unpack_u8()?,
            slot: 0,
        })
    }

    /// Unread byte count.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Require that every byte was consumed.
    pub fn finish(&self) -> Result<(), CodecError> {
        if self.remaining() != 0 {
            return Err(CodecError::TrailingBytes);
        }
        Ok(())
    }
}

/// Reader for an optional section; fields must be read in packing order.
#[derive(Debug)]
pub struct OptionalUnpacker {
    bits: u8,
    slot: u8,
}

impl OptionalUnpacker {
    fn next_slot(&mut self) -> Result<bool, CodecError> {
        if self.slot >= 8 {
            return Err(CodecError::OptionalOverflow);
        }
        let present = self.bits & (1 << self.slot) != 0;
        self.slot += 1;
        Ok(present)
    }

    /// Read a u64, zero when absent.
    pub fn unpack_u64(&mut self, p: &mut Unpacker<'_>) -> Result<u64, CodecError> {
        if self.next_slot()? {
            // Present fields are never zero; a zero here is a non-canonical encoding.
            return p.unpack_u64(true);
        }
        Ok(0)
    }

    /// Read an i64, zero when absent.
    pub fn unpack_i64(&mut self, p: &mut Unpacker<'_>) -> Result<i64, CodecError> {
        if self.next_slot()? {
            let v = p.unpack_i64()?;
            if v == 0 {
                return Err(CodecError::InvalidObject);
            }
            return Ok(v);
        }
        Ok(0)
    }

    /// Read an id, [`Id::EMPTY`] when absent.
    pub fn unpack_id(&mut self, p: &mut Unpacker<'_>) -> Result<Id, CodecError> {
        if self.next_slot()? {
            return p.unpack_id(true);
        }
        Ok(Id::EMPTY)
    }

    /// Reject bits set beyond the fields that were read.
    pub fn done(self) -> Result<(), CodecError> {
        if self.slot < 8 && self.bits >> self.slot != 0 {
            return Err(CodecError::InvalidObject);
        }
        Ok(())
    }
}
