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
#[inline(always)]
/// Saturating rounding shift right against bit depth
pub(crate) fn qrshr<const PRECISION: i32, const BIT_DEPTH: usize>(val: i32) -> i32 {
    let rounding: i32 = 1 << (PRECISION - 1);
    let max_value: i32 = (1 << BIT_DEPTH) - 1;
    ((val + rounding) >> PRECISION).min(max_value).max(0)
}

#[inline(always)]
/// Clamps a normalized float sample into `[0, 1]`, NaN collapses to 0
pub(crate) fn saturate_f32(v: f32) -> f32 {
    if v.is_nan() {
        return 0f32;
    }
    num_traits::clamp(v, 0f32, 1f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qrshr_rounds_and_saturates() {
        assert_eq!(qrshr::<13, 8>(128 << 13), 128);
        assert_eq!(qrshr::<13, 8>((128 << 13) + (1 << 12)), 129);
        assert_eq!(qrshr::<13, 8>((128 << 13) + (1 << 12) - 1), 128);
        assert_eq!(qrshr::<13, 8>(-5000), 0);
        assert_eq!(qrshr::<13, 8>(300 << 13), 255);
    }

    #[test]
    fn saturate_handles_nan() {
        assert_eq!(saturate_f32(f32::NAN), 0f32);
        assert_eq!(saturate_f32(1.5f32), 1f32);
        assert_eq!(saturate_f32(-0.1f32), 0f32);
        assert_eq!(saturate_f32(0.25f32), 0.25f32);
    }
}
