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
use crate::yuv_support::YuvPixelFormat;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Status class of a [YuvError], the coarse outcome a caller branches on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YuvErrorKind {
    /// Bad call: empty or odd dimensions, wrong buffer sizes, degenerate matrix.
    InvalidArgument,
    /// The requested format pairing is not implemented.
    UnsupportedCombination,
    /// Auxiliary payload does not fit into the frame data channel.
    CapacityExceeded,
    /// The execution substrate could not obtain memory for the work.
    ResourceFailure,
}

#[derive(Debug)]
pub enum YuvError {
    ZeroBaseSize,
    OddDimensions {
        format: YuvPixelFormat,
        width: u32,
        height: u32,
    },
    PointerOverflow,
    FrameSizeMismatch(MismatchedSize),
    DestinationSizeMismatch(MismatchedSize),
    InvalidMatrix {
        kr: f32,
        kb: f32,
    },
    UnsupportedCombination {
        format: YuvPixelFormat,
        operation: &'static str,
    },
    CapacityExceeded(MismatchedSize),
    ResourceFailure(String),
}

impl YuvError {
    pub const fn kind(&self) -> YuvErrorKind {
        match self {
            YuvError::ZeroBaseSize
            | YuvError::OddDimensions { .. }
            | YuvError::PointerOverflow
            | YuvError::FrameSizeMismatch(_)
            | YuvError::DestinationSizeMismatch(_)
            | YuvError::InvalidMatrix { .. } => YuvErrorKind::InvalidArgument,
            YuvError::UnsupportedCombination { .. } => YuvErrorKind::UnsupportedCombination,
            YuvError::CapacityExceeded(_) => YuvErrorKind::CapacityExceeded,
            YuvError::ResourceFailure(_) => YuvErrorKind::ResourceFailure,
        }
    }
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            YuvError::OddDimensions {
                format,
                width,
                height,
            } => f.write_fmt(format_args!(
                "{:?} requires even dimensions, but image is {}x{}",
                format, width, height
            )),
            YuvError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            YuvError::FrameSizeMismatch(size) => f.write_fmt(format_args!(
                "Source frame have invalid size, it must be {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            YuvError::InvalidMatrix { kr, kb } => f.write_fmt(format_args!(
                "Matrix with kr={} and kb={} is degenerate, 1 - kr - kb must not be 0",
                kr, kb
            )),
            YuvError::UnsupportedCombination { format, operation } => f.write_fmt(format_args!(
                "{} is not supported for {:?}",
                operation, format
            )),
            YuvError::CapacityExceeded(size) => f.write_fmt(format_args!(
                "Data channel holds {} bytes, but {} bytes were requested",
                size.expected, size.received
            )),
            YuvError::ResourceFailure(reason) => {
                f.write_fmt(format_args!("Failed to acquire resources: {}", reason))
            }
        }
    }
}

impl Error for YuvError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<usize, YuvError> {
    v0.checked_mul(v1).ok_or(YuvError::PointerOverflow)
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<usize, YuvError> {
    check_overflow_v2(v0, v1)?
        .checked_mul(v2)
        .ok_or(YuvError::PointerOverflow)
}

/// Validates dimensions against the chroma geometry of `format`.
///
/// 4:2:0 layouts require both dimensions to be even, packed 4:2:2 only the width.
#[inline]
pub(crate) fn check_dimensions(
    format: YuvPixelFormat,
    width: u32,
    height: u32,
) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    let odd_height = format.is_420() && height & 1 != 0;
    if width & 1 != 0 || odd_height {
        return Err(YuvError::OddDimensions {
            format,
            width,
            height,
        });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_yuv_frame(
    frame: &[u8],
    format: YuvPixelFormat,
    width: u32,
    height: u32,
) -> Result<(), YuvError> {
    check_dimensions(format, width, height)?;
    let expected = format.frame_len(width, height)?;
    if frame.len() != expected {
        return Err(YuvError::FrameSizeMismatch(MismatchedSize {
            expected,
            received: frame.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_rgba_destination<V>(
    arr: &[V],
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    let expected = check_overflow_v3(width as usize, height as usize, channels)?;
    if arr.len() != expected {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_width_is_invalid_argument() {
        let err = check_dimensions(YuvPixelFormat::I420, 3, 4).unwrap_err();
        assert_eq!(err.kind(), YuvErrorKind::InvalidArgument);
        assert!(matches!(err, YuvError::OddDimensions { width: 3, .. }));
    }

    #[test]
    fn packed_allows_odd_height() {
        assert!(check_dimensions(YuvPixelFormat::Yuyv, 4, 3).is_ok());
        assert!(check_dimensions(YuvPixelFormat::Nv12, 4, 3).is_err());
        assert!(check_dimensions(YuvPixelFormat::Uyvy, 5, 2).is_err());
    }

    #[test]
    fn zero_size_rejected() {
        let err = check_dimensions(YuvPixelFormat::Yv12, 0, 2).unwrap_err();
        assert!(matches!(err, YuvError::ZeroBaseSize));
    }

    #[test]
    fn frame_length_checked() {
        let frame = vec![0u8; 4 * 4 + 2 * 2 * 2 - 1];
        let err = check_yuv_frame(&frame, YuvPixelFormat::I420, 4, 4).unwrap_err();
        match err {
            YuvError::FrameSizeMismatch(size) => {
                assert_eq!(size.expected, 24);
                assert_eq!(size.received, 23);
            }
            _ => panic!("Unexpected error {}", err),
        }
    }

    #[test]
    fn destination_length_checked() {
        let rgba = vec![0f32; 4 * 2 * 4];
        assert!(check_rgba_destination(&rgba, 4, 2, 4).is_ok());
        assert!(check_rgba_destination(&rgba, 4, 2, 3).is_err());
    }

    #[test]
    fn kinds_are_distinct() {
        let unsupported = YuvError::UnsupportedCombination {
            format: YuvPixelFormat::Yuyv,
            operation: "data channel",
        };
        assert_eq!(unsupported.kind(), YuvErrorKind::UnsupportedCombination);
        let capacity = YuvError::CapacityExceeded(MismatchedSize {
            expected: 2,
            received: 3,
        });
        assert_eq!(capacity.kind(), YuvErrorKind::CapacityExceeded);
        assert_eq!(
            YuvError::ResourceFailure("oom".to_string()).kind(),
            YuvErrorKind::ResourceFailure
        );
    }
}
