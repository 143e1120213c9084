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
use crate::yuv_error::{check_overflow_v2, check_overflow_v3};
use crate::YuvError;

/// Largest coefficient magnitude that keeps 13-bit fixed point sums of up to four 8-bit
/// pixels inside `i32`.
const MAX_COEFFICIENT: f32 = 64f32;

#[inline]
fn is_usable_coefficient(c: f32) -> bool {
    c.is_finite() && c.abs() <= MAX_COEFFICIENT
}

fn check_kr_kb(kr: f32, kb: f32) -> Result<f32, YuvError> {
    let kg = 1.0f32 - kr - kb;
    if !kr.is_finite() || !kb.is_finite() || kg == 0f32 || kr == 1f32 || kb == 1f32 {
        return Err(YuvError::InvalidMatrix { kr, kb });
    }
    Ok(kg)
}

#[derive(Debug, Copy, Clone)]
pub struct CbCrInverseTransform<T> {
    pub y_coef: T,
    pub cr_coef: T,
    pub cb_coef: T,
    pub g_coeff_1: T,
    pub g_coeff_2: T,
}

impl CbCrInverseTransform<f32> {
    /// Integral transformation adds an error not less than 1%
    pub fn to_integers(&self, precision: u32) -> CbCrInverseTransform<i32> {
        let precision_scale = (1i32 << precision) as f32;
        CbCrInverseTransform::<i32> {
            y_coef: (self.y_coef * precision_scale).round() as i32,
            cr_coef: (self.cr_coef * precision_scale).round() as i32,
            cb_coef: (self.cb_coef * precision_scale).round() as i32,
            g_coeff_1: (self.g_coeff_1 * precision_scale).round() as i32,
            g_coeff_2: (self.g_coeff_2 * precision_scale).round() as i32,
        }
    }
}

/// Transformation YUV to RGB with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub fn get_inverse_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> Result<CbCrInverseTransform<f32>, YuvError> {
    let kg = check_kr_kb(kr, kb)?;
    let range_uv = range_rgba as f32 / range_uv as f32;
    let y_coef = range_rgba as f32 / range_y as f32;
    let cr_coef = (2f32 * (1f32 - kr)) * range_uv;
    let cb_coef = (2f32 * (1f32 - kb)) * range_uv;
    let g_coeff_1 = (2f32 * ((1f32 - kr) * kr / kg)) * range_uv;
    let g_coeff_2 = (2f32 * ((1f32 - kb) * kb / kg)) * range_uv;
    if ![y_coef, cr_coef, cb_coef, g_coeff_1, g_coeff_2]
        .iter()
        .all(|&c| is_usable_coefficient(c))
    {
        return Err(YuvError::InvalidMatrix { kr, kb });
    }
    Ok(CbCrInverseTransform {
        y_coef,
        cr_coef,
        cb_coef,
        g_coeff_1,
        g_coeff_2,
    })
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct CbCrForwardTransform<T> {
    pub yr: T,
    pub yg: T,
    pub yb: T,
    pub cb_r: T,
    pub cb_g: T,
    pub cb_b: T,
    pub cr_r: T,
    pub cr_g: T,
    pub cr_b: T,
}

impl CbCrForwardTransform<f32> {
    pub fn to_integers(&self, precision: u32) -> CbCrForwardTransform<i32> {
        let scale = (1i32 << precision) as f32;
        CbCrForwardTransform::<i32> {
            yr: (self.yr * scale).round() as i32,
            yg: (self.yg * scale).round() as i32,
            yb: (self.yb * scale).round() as i32,
            cb_r: (self.cb_r * scale).round() as i32,
            cb_g: (self.cb_g * scale).round() as i32,
            cb_b: (self.cb_b * scale).round() as i32,
            cr_r: (self.cr_r * scale).round() as i32,
            cr_g: (self.cr_g * scale).round() as i32,
            cr_b: (self.cr_b * scale).round() as i32,
        }
    }
}

/// Transformation RGB to YUV with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
pub fn get_forward_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> Result<CbCrForwardTransform<f32>, YuvError> {
    let kg = check_kr_kb(kr, kb)?;
    let y_scale = range_y as f32 / range_rgba as f32;
    let uv_scale = range_uv as f32 / range_rgba as f32;

    let transform = CbCrForwardTransform {
        yr: kr * y_scale,
        yg: kg * y_scale,
        yb: kb * y_scale,
        cb_r: -0.5f32 * kr / (1f32 - kb) * uv_scale,
        cb_g: -0.5f32 * kg / (1f32 - kb) * uv_scale,
        cb_b: 0.5f32 * uv_scale,
        cr_r: 0.5f32 * uv_scale,
        cr_g: -0.5f32 * kg / (1f32 - kr) * uv_scale,
        cr_b: -0.5f32 * kb / (1f32 - kr) * uv_scale,
    };
    let t = &transform;
    if ![
        t.yr, t.yg, t.yb, t.cb_r, t.cb_g, t.cb_b, t.cr_r, t.cr_g, t.cr_b,
    ]
    .iter()
    .all(|&c| is_usable_coefficient(c))
    {
        return Err(YuvError::InvalidMatrix { kr, kb });
    }
    Ok(transform)
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
/// Declares YUV range TV (limited) or Full
pub enum YuvRange {
    /// Limited range Y ∈ [16, 235], UV ∈ [16, 240]
    #[default]
    Limited,
    /// Full range Y ∈ [0, 255], UV ∈ [0, 255]
    Full,
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvChromaRange {
    pub bias_y: u32,
    pub bias_uv: u32,
    pub range_y: u32,
    pub range_uv: u32,
}

pub const fn get_yuv_range(depth: u32, range: YuvRange) -> YuvChromaRange {
    match range {
        YuvRange::Limited => YuvChromaRange {
            bias_y: 16 << (depth - 8),
            bias_uv: 1 << (depth - 1),
            range_y: 219 << (depth - 8),
            range_uv: 224 << (depth - 8),
        },
        YuvRange::Full => YuvChromaRange {
            bias_y: 0,
            bias_uv: 1 << (depth - 1),
            range_uv: (1 << depth) - 1,
            range_y: (1 << depth) - 1,
        },
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Default)]
/// Declares standard prebuilt YUV conversion matrices, check [ITU-R](https://www.itu.int/rec/T-REC-H.273/en) information for more info
pub enum YuvStandardMatrix {
    #[default]
    Bt601,
    Bt709,
    Bt2020,
    Smpte240,
    Bt470_6,
    /// Custom parameters first goes for kr, second for kb.
    /// Conversions fail with [YuvError::InvalidMatrix] if 1.0f32 - kr - kb == 0, if kr or kb
    /// is not finite, or if the derived coefficients are too large for fixed point math
    Custom(f32, f32),
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvBias {
    pub kr: f32,
    pub kb: f32,
}

impl YuvStandardMatrix {
    pub const fn get_kr_kb(self) -> YuvBias {
        match self {
            YuvStandardMatrix::Bt601 => YuvBias {
                kr: 0.299f32,
                kb: 0.114f32,
            },
            YuvStandardMatrix::Bt709 => YuvBias {
                kr: 0.2126f32,
                kb: 0.0722f32,
            },
            YuvStandardMatrix::Bt2020 => YuvBias {
                kr: 0.2627f32,
                kb: 0.0593f32,
            },
            YuvStandardMatrix::Smpte240 => YuvBias {
                kr: 0.212f32,
                kb: 0.087f32,
            },
            YuvStandardMatrix::Bt470_6 => YuvBias {
                kr: 0.2220f32,
                kb: 0.0713f32,
            },
            YuvStandardMatrix::Custom(kr, kb) => YuvBias { kr, kb },
        }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum YuvSourceChannels {
    Rgb = 0,
    Rgba = 1,
}

impl From<u8> for YuvSourceChannels {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvSourceChannels::Rgb,
            1 => YuvSourceChannels::Rgba,
            _ => {
                unimplemented!("Unknown value {}", value)
            }
        }
    }
}

impl YuvSourceChannels {
    #[inline(always)]
    pub(crate) const fn get_channels_count(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb => 3,
            YuvSourceChannels::Rgba => 4,
        }
    }

    #[inline(always)]
    pub(crate) const fn has_alpha(&self) -> bool {
        match self {
            YuvSourceChannels::Rgb => false,
            YuvSourceChannels::Rgba => true,
        }
    }
}

/// Byte order of a packed 4:2:2 group holding two pixels.
#[repr(usize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Yuy2Description {
    YUYV = 0,
    UYVY = 1,
    YVYU = 2,
}

impl From<usize> for Yuy2Description {
    fn from(value: usize) -> Self {
        match value {
            0 => Yuy2Description::YUYV,
            1 => Yuy2Description::UYVY,
            2 => Yuy2Description::YVYU,
            _ => {
                unimplemented!("Not supported value {}", value)
            }
        }
    }
}

impl Yuy2Description {
    #[inline]
    pub(crate) const fn get_u_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 1,
            Yuy2Description::UYVY => 0,
            Yuy2Description::YVYU => 3,
        }
    }

    #[inline]
    pub(crate) const fn get_v_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 3,
            Yuy2Description::UYVY => 2,
            Yuy2Description::YVYU => 1,
        }
    }

    #[inline(always)]
    pub(crate) const fn get_first_y_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 0,
            Yuy2Description::UYVY => 1,
            Yuy2Description::YVYU => 0,
        }
    }

    #[inline]
    pub(crate) const fn get_second_y_position(&self) -> usize {
        match self {
            Yuy2Description::YUYV => 2,
            Yuy2Description::UYVY => 3,
            Yuy2Description::YVYU => 2,
        }
    }

    pub(crate) const fn pixel_format(&self) -> YuvPixelFormat {
        match self {
            Yuy2Description::YUYV => YuvPixelFormat::Yuyv,
            Yuy2Description::UYVY => YuvPixelFormat::Uyvy,
            Yuy2Description::YVYU => YuvPixelFormat::Yvyu,
        }
    }
}

/// Pixel format tag of a YUV frame, it alone determines the chroma geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvPixelFormat {
    /// Planar 4:2:0, Y plane followed by U then V
    I420,
    /// Planar 4:2:0, Y plane followed by V then U
    Yv12,
    /// Semi-planar 4:2:0, Y plane followed by interleaved U,V pairs
    Nv12,
    /// Packed 4:2:2 `Y0 U Y1 V`
    Yuyv,
    /// Packed 4:2:2 `Y0 V Y1 U`
    Yvyu,
    /// Packed 4:2:2 `U Y0 V Y1`
    Uyvy,
}

impl YuvPixelFormat {
    #[inline]
    pub const fn is_420(self) -> bool {
        matches!(
            self,
            YuvPixelFormat::I420 | YuvPixelFormat::Yv12 | YuvPixelFormat::Nv12
        )
    }

    #[inline]
    pub const fn is_packed(self) -> bool {
        !self.is_420()
    }

    /// Exact byte length of a tightly packed frame of this format.
    pub fn frame_len(self, width: u32, height: u32) -> Result<usize, YuvError> {
        let luma = check_overflow_v2(width as usize, height as usize)?;
        if self.is_420() {
            let chroma = check_overflow_v2(width as usize / 2, height as usize / 2)?;
            luma.checked_add(chroma * 2).ok_or(YuvError::PointerOverflow)
        } else {
            check_overflow_v3(width as usize, height as usize, 2)
        }
    }
}
