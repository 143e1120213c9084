/*
 * Copyright (c) Radzivon Bartoshyk, 11/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Auxiliary byte stream carried in the U plane of 4:2:0 frames.
//!
//! Each payload bit is spread over [DATA_CHANNEL_REDUNDANCY] consecutive U samples in
//! row-major order, bytes are written most significant bit first. A 1 bit forces the whole
//! group to [DATA_CHANNEL_ONE_VALUE]; a 0 bit compresses the natural U sample towards neutral
//! chroma so it stays strictly below [DATA_CHANNEL_THRESHOLD]. Samples past the last embedded
//! bit keep their natural value.
use crate::images::Yuv420Geometry;
use crate::yuv_error::{check_dimensions, MismatchedSize};
use crate::yuv_support::YuvPixelFormat;
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

/// Number of U samples carrying one bit. More samples survive more noise but shorten
/// the capacity.
pub const DATA_CHANNEL_REDUNDANCY: usize = 4;
/// Shift applied to the natural U sample of a 0 bit, must be at least 2.
pub const DATA_CHANNEL_U_SHIFT: u32 = 4;
/// U level written for a 1 bit.
pub const DATA_CHANNEL_ONE_VALUE: u8 = 192;
/// U samples at or above this level vote for a 1 bit.
pub const DATA_CHANNEL_THRESHOLD: u8 = ((DATA_CHANNEL_ONE_VALUE as u16 + 128) / 2) as u8;

const ZERO_BIAS: u8 = 128 - (128u8 >> DATA_CHANNEL_U_SHIFT);

const _: () = assert!(DATA_CHANNEL_U_SHIFT >= 2);
const _: () = assert!(DATA_CHANNEL_REDUNDANCY > 0);
const _: () = assert!((255u8 >> DATA_CHANNEL_U_SHIFT) + ZERO_BIAS < DATA_CHANNEL_THRESHOLD);

/// Number of payload bytes a frame of `format` can carry.
///
/// Only 4:2:0 layouts have a data channel, packed 4:2:2 formats report
/// [YuvError::UnsupportedCombination].
pub fn data_channel_capacity(
    format: YuvPixelFormat,
    width: u32,
    height: u32,
) -> Result<usize, YuvError> {
    if format.is_packed() {
        return Err(YuvError::UnsupportedCombination {
            format,
            operation: "data channel",
        });
    }
    check_dimensions(format, width, height)?;
    Ok(capacity_bytes(&Yuv420Geometry::new(width, height)))
}

#[inline]
pub(crate) const fn capacity_bytes(geometry: &Yuv420Geometry) -> usize {
    geometry.chroma_len() / DATA_CHANNEL_REDUNDANCY / 8
}

/// U level stored for a 0 bit.
#[inline(always)]
pub(crate) const fn zero_level(natural: u8) -> u8 {
    (natural >> DATA_CHANNEL_U_SHIFT) + ZERO_BIAS
}

#[inline(always)]
fn payload_bit(payload: &[u8], bit: usize) -> bool {
    (payload[bit / 8] >> (7 - (bit % 8))) & 1 != 0
}

/// Resolves how many bytes fit, either truncating or failing per the `strict_capacity`
/// feature.
fn fit_to_capacity(requested: usize, capacity: usize) -> Result<usize, YuvError> {
    if requested <= capacity {
        return Ok(requested);
    }
    if cfg!(feature = "strict_capacity") {
        return Err(YuvError::CapacityExceeded(MismatchedSize {
            expected: capacity,
            received: requested,
        }));
    }
    tracing::warn!(
        requested,
        capacity,
        "data channel payload truncated to frame capacity"
    );
    Ok(capacity)
}

/// Decides stored U values while a frame is being written.
#[derive(Debug, Copy, Clone)]
pub(crate) struct DataChannelEncoder<'a> {
    payload: &'a [u8],
    geometry: Yuv420Geometry,
    flip: bool,
}

impl<'a> DataChannelEncoder<'a> {
    pub(crate) fn new(
        payload: &'a [u8],
        geometry: Yuv420Geometry,
        flip: bool,
    ) -> Result<Self, YuvError> {
        let embedded = fit_to_capacity(payload.len(), capacity_bytes(&geometry))?;
        Ok(DataChannelEncoder {
            payload: &payload[..embedded],
            geometry,
            flip,
        })
    }

    #[inline]
    pub(crate) fn embedded_len(&self) -> usize {
        self.payload.len()
    }

    /// U value to store for chroma sample `(cx, cy)` whose natural value is `natural`.
    ///
    /// With `flip` the bit layout addresses rows bottom-up, as a reader of the vertically
    /// flipped frame sees them.
    #[inline(always)]
    pub(crate) fn encode_u(&self, cx: usize, cy: usize, natural: u8) -> u8 {
        let row = if self.flip {
            self.geometry.chroma_height - 1 - cy
        } else {
            cy
        };
        let bit = self.geometry.chroma_index(cx, row) / DATA_CHANNEL_REDUNDANCY;
        if bit >= self.payload.len() * 8 {
            return natural;
        }
        if payload_bit(self.payload, bit) {
            DATA_CHANNEL_ONE_VALUE
        } else {
            zero_level(natural)
        }
    }
}

/// Majority vote over one bit group, a tie falls back to the group mean.
#[inline]
pub(crate) fn decide_bit(group: impl Iterator<Item = u8>) -> bool {
    let mut votes = 0usize;
    let mut sum = 0usize;
    for sample in group {
        if sample >= DATA_CHANNEL_THRESHOLD {
            votes += 1;
        }
        sum += sample as usize;
    }
    match (votes * 2).cmp(&DATA_CHANNEL_REDUNDANCY) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => {
            sum >= DATA_CHANNEL_THRESHOLD as usize * DATA_CHANNEL_REDUNDANCY
        }
    }
}

/// Reads payload bytes into `target`, `u_sample` maps a row-major chroma index to its U value.
///
/// Returns the number of bytes written, which is `target.len()` unless the frame carries
/// fewer bytes.
pub(crate) fn extract_data<F>(
    target: &mut [u8],
    geometry: &Yuv420Geometry,
    u_sample: F,
) -> Result<usize, YuvError>
where
    F: Fn(usize) -> u8 + Send + Sync,
{
    let count = fit_to_capacity(target.len(), capacity_bytes(geometry))?;
    let decode_byte = |byte_index: usize| -> u8 {
        let mut byte = 0u8;
        for bit in 0..8 {
            let first = (byte_index * 8 + bit) * DATA_CHANNEL_REDUNDANCY;
            let group = (first..first + DATA_CHANNEL_REDUNDANCY).map(&u_sample);
            byte = (byte << 1) | decide_bit(group) as u8;
        }
        byte
    };
    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = target[..count].par_chunks_exact_mut(1).enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = target[..count].chunks_exact_mut(1).enumerate();
    }
    iter.for_each(|(byte_index, dst)| {
        dst[0] = decode_byte(byte_index);
    });
    tracing::debug!(bytes = count, "data channel extracted");
    Ok(count)
}
