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
#![forbid(unsafe_code)]
//! Conversions between 8-bit YUV frames and RGB/RGBA images.
//!
//! Supported layouts are planar 4:2:0 (I420, YV12), semi-planar 4:2:0 (NV12) and packed
//! 4:2:2 (YUYV, YVYU, UYVY). RGB samples are either `u8` or `f32` normalized to `[0, 1]`.
//!
//! 4:2:0 frames may carry a small byte stream in their U plane, see
//! [rgba_to_i420_with_data] and [nv12_to_rgba_with_data].
//!
//! # Example
//!
//! ```
//! use yuvplane::{rgba_to_i420, i420_to_rgba, YuvRange, YuvStandardMatrix};
//!
//! let (width, height) = (4u32, 2u32);
//! let rgba = [200u8, 120, 40, 255].repeat((width * height) as usize);
//! let mut i420 = vec![0u8; (width * height * 3 / 2) as usize];
//! rgba_to_i420(&rgba, &mut i420, width, height, YuvRange::Limited, YuvStandardMatrix::Bt601)?;
//!
//! let mut back = vec![0u8; rgba.len()];
//! i420_to_rgba(&i420, &mut back, width, height, YuvRange::Limited, YuvStandardMatrix::Bt601)?;
//! assert!(back.iter().zip(rgba.iter()).all(|(a, b)| (*a as i32 - *b as i32).abs() <= 3));
//! # Ok::<(), yuvplane::YuvError>(())
//! ```
mod data_channel;
mod images;
mod numerics;
mod pixel_transform;
mod rgba_to_nv;
mod rgba_to_yuv;
mod yuv_error;
mod yuv_nv_to_rgba;
mod yuv_support;
mod yuv_to_nv;
mod yuv_to_rgba;
mod yuy2_to_rgb;

pub use yuv_error::{MismatchedSize, YuvError, YuvErrorKind};

pub use yuv_support::YuvPixelFormat;
pub use yuv_support::YuvRange;
pub use yuv_support::YuvStandardMatrix;

pub use pixel_transform::{LumaChroma, RgbSample, RgbToYuvKernel, YuvToRgbKernel};

pub use data_channel::data_channel_capacity;
pub use data_channel::{
    DATA_CHANNEL_ONE_VALUE, DATA_CHANNEL_REDUNDANCY, DATA_CHANNEL_THRESHOLD, DATA_CHANNEL_U_SHIFT,
};

pub use yuv_to_rgba::i420_to_rgb;
pub use yuv_to_rgba::i420_to_rgba;
pub use yuv_to_rgba::i420_to_rgba_with_data;
pub use yuv_to_rgba::yv12_to_rgb;
pub use yuv_to_rgba::yv12_to_rgba;

pub use yuv_nv_to_rgba::nv12_extract_data;
pub use yuv_nv_to_rgba::nv12_to_rgb;
pub use yuv_nv_to_rgba::nv12_to_rgba;
pub use yuv_nv_to_rgba::nv12_to_rgba_with_data;

pub use yuy2_to_rgb::uyvy_to_rgb;
pub use yuy2_to_rgb::uyvy_to_rgba;
pub use yuy2_to_rgb::yuyv_to_rgb;
pub use yuy2_to_rgb::yuyv_to_rgba;
pub use yuy2_to_rgb::yvyu_to_rgb;
pub use yuy2_to_rgb::yvyu_to_rgba;

pub use rgba_to_yuv::rgb_to_i420;
pub use rgba_to_yuv::rgb_to_yv12;
pub use rgba_to_yuv::rgba_to_i420;
pub use rgba_to_yuv::rgba_to_i420_with_data;
pub use rgba_to_yuv::rgba_to_yv12;

pub use rgba_to_nv::rgb_to_nv12;
pub use rgba_to_nv::rgba_to_nv12;

pub use yuv_to_nv::i420_to_nv12;
