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
//! Per-pixel color math between RGB and YUV.
//!
//! Everything here is a pure function of its inputs, so layouts may call it from any row
//! in any order.
use crate::numerics::{qrshr, saturate_f32};
use crate::yuv_support::{
    get_forward_transform, get_inverse_transform, get_yuv_range, CbCrForwardTransform,
    CbCrInverseTransform, YuvRange, YuvStandardMatrix,
};
use crate::YuvError;
use num_traits::AsPrimitive;

pub(crate) const PRECISION: i32 = 13;

/// YUV -> RGB kernel with coefficients resolved for a range and matrix.
#[derive(Debug, Copy, Clone)]
pub struct YuvToRgbKernel {
    integral: CbCrInverseTransform<i32>,
    float: CbCrInverseTransform<f32>,
    bias_y: i32,
    bias_uv: i32,
}

impl YuvToRgbKernel {
    pub fn new(range: YuvRange, matrix: YuvStandardMatrix) -> Result<Self, YuvError> {
        let chroma_range = get_yuv_range(8, range);
        let kr_kb = matrix.get_kr_kb();
        let float = get_inverse_transform(
            255,
            chroma_range.range_y,
            chroma_range.range_uv,
            kr_kb.kr,
            kr_kb.kb,
        )?;
        Ok(YuvToRgbKernel {
            integral: float.to_integers(PRECISION as u32),
            float,
            bias_y: chroma_range.bias_y as i32,
            bias_uv: chroma_range.bias_uv as i32,
        })
    }

    #[inline(always)]
    pub fn to_rgb8(&self, y: u8, u: u8, v: u8) -> [u8; 3] {
        let t = &self.integral;
        let y_value = (y as i32 - self.bias_y) * t.y_coef;
        let cb = u as i32 - self.bias_uv;
        let cr = v as i32 - self.bias_uv;
        let r = qrshr::<PRECISION, 8>(y_value + t.cr_coef * cr);
        let b = qrshr::<PRECISION, 8>(y_value + t.cb_coef * cb);
        let g = qrshr::<PRECISION, 8>(y_value - t.g_coeff_1 * cr - t.g_coeff_2 * cb);
        [r as u8, g as u8, b as u8]
    }

    /// Normalized output, every channel in `[0, 1]`
    #[inline(always)]
    pub fn to_rgb_f32(&self, y: u8, u: u8, v: u8) -> [f32; 3] {
        const SCALE: f32 = 1f32 / 255f32;
        let t = &self.float;
        let y_value = (y as i32 - self.bias_y) as f32 * t.y_coef;
        let cb = (u as i32 - self.bias_uv) as f32;
        let cr = (v as i32 - self.bias_uv) as f32;
        let r = y_value + t.cr_coef * cr;
        let b = y_value + t.cb_coef * cb;
        let g = y_value - t.g_coeff_1 * cr - t.g_coeff_2 * cb;
        [
            saturate_f32(r * SCALE),
            saturate_f32(g * SCALE),
            saturate_f32(b * SCALE),
        ]
    }
}

/// Luma of one pixel plus its chroma before rounding.
///
/// Chroma accumulators carry `PRECISION` fractional bits and no bias, so a layout can add
/// several of them up before rounding the shared sample once.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LumaChroma {
    pub y: u8,
    pub cb: i32,
    pub cr: i32,
}

/// RGB -> YUV kernel with coefficients resolved for a range and matrix.
#[derive(Debug, Copy, Clone)]
pub struct RgbToYuvKernel {
    integral: CbCrForwardTransform<i32>,
    float: CbCrForwardTransform<f32>,
    bias_y: i32,
    bias_uv: i32,
}

impl RgbToYuvKernel {
    pub fn new(range: YuvRange, matrix: YuvStandardMatrix) -> Result<Self, YuvError> {
        let chroma_range = get_yuv_range(8, range);
        let kr_kb = matrix.get_kr_kb();
        let float = get_forward_transform(
            255,
            chroma_range.range_y,
            chroma_range.range_uv,
            kr_kb.kr,
            kr_kb.kb,
        )?;
        Ok(RgbToYuvKernel {
            integral: float.to_integers(PRECISION as u32),
            float,
            bias_y: (chroma_range.bias_y as i32) << PRECISION,
            bias_uv: chroma_range.bias_uv as i32,
        })
    }

    #[inline(always)]
    pub fn from_rgb8(&self, r: u8, g: u8, b: u8) -> LumaChroma {
        let t = &self.integral;
        let (r, g, b) = (r as i32, g as i32, b as i32);
        let y = qrshr::<PRECISION, 8>(r * t.yr + g * t.yg + b * t.yb + self.bias_y);
        LumaChroma {
            y: y as u8,
            cb: r * t.cb_r + g * t.cb_g + b * t.cb_b,
            cr: r * t.cr_r + g * t.cr_g + b * t.cr_b,
        }
    }

    /// Normalized input, channels outside of `[0, 1]` are saturated first
    #[inline(always)]
    pub fn from_rgb_f32(&self, r: f32, g: f32, b: f32) -> LumaChroma {
        const PRECISION_SCALE: f32 = (1i32 << PRECISION) as f32;
        let t = &self.float;
        let r = saturate_f32(r) * 255f32;
        let g = saturate_f32(g) * 255f32;
        let b = saturate_f32(b) * 255f32;
        let y = ((r * t.yr + g * t.yg + b * t.yb) * PRECISION_SCALE).round() as i32;
        let cb = (r * t.cb_r + g * t.cb_g + b * t.cb_b) * PRECISION_SCALE;
        let cr = (r * t.cr_r + g * t.cr_g + b * t.cr_b) * PRECISION_SCALE;
        LumaChroma {
            y: qrshr::<PRECISION, 8>(y + self.bias_y) as u8,
            cb: cb.round().as_(),
            cr: cr.round().as_(),
        }
    }

    /// Rounds the sum of `1 << SHIFT` chroma accumulators into one biased 8-bit sample.
    #[inline(always)]
    pub fn finish_chroma<const SHIFT: i32>(&self, sum: i32) -> u8 {
        let biased = sum + (self.bias_uv << (PRECISION + SHIFT));
        match SHIFT {
            0 => qrshr::<PRECISION, 8>(biased) as u8,
            1 => qrshr::<{ PRECISION + 1 }, 8>(biased) as u8,
            _ => qrshr::<{ PRECISION + 2 }, 8>(biased) as u8,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for f32 {}
}

/// RGB channel sample type accepted by every conversion, `u8` or normalized `f32`.
pub trait RgbSample: sealed::Sealed + Copy + Default + Send + Sync + 'static {
    /// Value written to the alpha channel
    const OPAQUE: Self;

    fn from_yuv(kernel: &YuvToRgbKernel, y: u8, u: u8, v: u8) -> [Self; 3];

    fn to_yuv(kernel: &RgbToYuvKernel, r: Self, g: Self, b: Self) -> LumaChroma;
}

impl RgbSample for u8 {
    const OPAQUE: Self = 255;

    #[inline(always)]
    fn from_yuv(kernel: &YuvToRgbKernel, y: u8, u: u8, v: u8) -> [Self; 3] {
        kernel.to_rgb8(y, u, v)
    }

    #[inline(always)]
    fn to_yuv(kernel: &RgbToYuvKernel, r: Self, g: Self, b: Self) -> LumaChroma {
        kernel.from_rgb8(r, g, b)
    }
}

impl RgbSample for f32 {
    const OPAQUE: Self = 1f32;

    #[inline(always)]
    fn from_yuv(kernel: &YuvToRgbKernel, y: u8, u: u8, v: u8) -> [Self; 3] {
        kernel.to_rgb_f32(y, u, v)
    }

    #[inline(always)]
    fn to_yuv(kernel: &RgbToYuvKernel, r: Self, g: Self, b: Self) -> LumaChroma {
        kernel.from_rgb_f32(r, g, b)
    }
}

/// Writes one pixel, alpha becomes opaque when the destination has 4 channels.
#[inline(always)]
pub(crate) fn store_rgbx<T: RgbSample>(dst: &mut [T], rgb: [T; 3], has_alpha: bool) {
    dst[0] = rgb[0];
    dst[1] = rgb[1];
    dst[2] = rgb[2];
    if has_alpha {
        dst[3] = T::OPAQUE;
    }
}
