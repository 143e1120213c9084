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
use crate::pixel_transform::{store_rgbx, RgbSample, YuvToRgbKernel};
use crate::yuv_error::{check_rgba_destination, check_yuv_frame};
use crate::yuv_support::{YuvRange, YuvSourceChannels, YuvStandardMatrix, Yuy2Description};
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

fn yuy2_to_rgbx<T: RgbSample, const DESTINATION_CHANNELS: u8, const YUY2_TARGET: usize>(
    yuy2_store: &[u8],
    rgb_store: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    let yuy2_target: Yuy2Description = YUY2_TARGET.into();
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let channels = dst_chans.get_channels_count();
    let has_alpha = dst_chans.has_alpha();

    check_yuv_frame(yuy2_store, yuy2_target.pixel_format(), width, height)?;
    check_rgba_destination(rgb_store, width, height, channels)?;
    let kernel = YuvToRgbKernel::new(range, matrix)?;
    tracing::trace!(?yuy2_target, ?dst_chans, width, height, "packed 4:2:2 to rgb");

    let yuy2_stride = width as usize * 2;
    let rgb_stride = width as usize * channels;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = yuy2_store
            .par_chunks_exact(yuy2_stride)
            .zip(rgb_store.par_chunks_exact_mut(rgb_stride));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = yuy2_store
            .chunks_exact(yuy2_stride)
            .zip(rgb_store.chunks_exact_mut(rgb_stride));
    }
    iter.for_each(|(yuy2_src, rgb)| {
        for (pair, dst) in yuy2_src
            .chunks_exact(4)
            .zip(rgb.chunks_exact_mut(channels * 2))
        {
            let first_y = pair[yuy2_target.get_first_y_position()];
            let second_y = pair[yuy2_target.get_second_y_position()];
            let u_value = pair[yuy2_target.get_u_position()];
            let v_value = pair[yuy2_target.get_v_position()];

            let (dst0, dst1) = dst.split_at_mut(channels);
            store_rgbx(dst0, T::from_yuv(&kernel, first_y, u_value, v_value), has_alpha);
            store_rgbx(dst1, T::from_yuv(&kernel, second_y, u_value, v_value), has_alpha);
        }
    });

    Ok(())
}

/// Convert YUYV format to RGB image.
///
/// This function takes YUYV (4:2:2) packed data where every 4 bytes `Y0 U Y1 V` carry two
/// horizontally adjacent pixels sharing one chroma pair.
///
/// # Arguments
///
/// * `yuy2_store` - Source frame, exactly `width * height * 2` bytes.
/// * `rgb` - Destination, exactly `width * height * 3` samples.
/// * `width` - The width of the image, must be even.
/// * `height` - The height of the image.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
pub fn yuyv_to_rgb<T: RgbSample>(
    yuy2_store: &[u8],
    rgb: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuy2_to_rgbx::<T, { YuvSourceChannels::Rgb as u8 }, { Yuy2Description::YUYV as usize }>(
        yuy2_store, rgb, width, height, range, matrix,
    )
}

/// Convert YUYV format to RGBA image, alpha is set to opaque.
pub fn yuyv_to_rgba<T: RgbSample>(
    yuy2_store: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuy2_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }, { Yuy2Description::YUYV as usize }>(
        yuy2_store, rgba, width, height, range, matrix,
    )
}

/// Convert YVYU format to RGB image.
///
/// Same as [yuyv_to_rgb] with the byte order `Y0 V Y1 U`.
pub fn yvyu_to_rgb<T: RgbSample>(
    yuy2_store: &[u8],
    rgb: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuy2_to_rgbx::<T, { YuvSourceChannels::Rgb as u8 }, { Yuy2Description::YVYU as usize }>(
        yuy2_store, rgb, width, height, range, matrix,
    )
}

/// Convert YVYU format to RGBA image, alpha is set to opaque.
pub fn yvyu_to_rgba<T: RgbSample>(
    yuy2_store: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuy2_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }, { Yuy2Description::YVYU as usize }>(
        yuy2_store, rgba, width, height, range, matrix,
    )
}

/// Convert UYVY format to RGB image.
///
/// Same as [yuyv_to_rgb] with the byte order `U Y0 V Y1`.
pub fn uyvy_to_rgb<T: RgbSample>(
    yuy2_store: &[u8],
    rgb: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuy2_to_rgbx::<T, { YuvSourceChannels::Rgb as u8 }, { Yuy2Description::UYVY as usize }>(
        yuy2_store, rgb, width, height, range, matrix,
    )
}

/// Convert UYVY format to RGBA image, alpha is set to opaque.
pub fn uyvy_to_rgba<T: RgbSample>(
    yuy2_store: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    yuy2_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }, { Yuy2Description::UYVY as usize }>(
        yuy2_store, rgba, width, height, range, matrix,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn packed_orders_agree() {
        let (width, height) = (10usize, 3usize);
        let mut rng = rand::rng();
        let yuyv: Vec<u8> = (0..width * height * 2)
            .map(|_| rng.random_range(0..=255u8))
            .collect();
        let mut yvyu = yuyv.clone();
        let mut uyvy = yuyv.clone();
        for ((src, vu), uy) in yuyv
            .chunks_exact(4)
            .zip(yvyu.chunks_exact_mut(4))
            .zip(uyvy.chunks_exact_mut(4))
        {
            vu.copy_from_slice(&[src[0], src[3], src[2], src[1]]);
            uy.copy_from_slice(&[src[1], src[0], src[3], src[2]]);
        }

        let mut a = vec![0u8; width * height * 4];
        let mut b = vec![0u8; width * height * 4];
        let mut c = vec![0u8; width * height * 4];
        let (w, h) = (width as u32, height as u32);
        yuyv_to_rgba(&yuyv, &mut a, w, h, YuvRange::Limited, YuvStandardMatrix::Bt709).unwrap();
        yvyu_to_rgba(&yvyu, &mut b, w, h, YuvRange::Limited, YuvStandardMatrix::Bt709).unwrap();
        uyvy_to_rgba(&uyvy, &mut c, w, h, YuvRange::Limited, YuvStandardMatrix::Bt709).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn pair_shares_chroma() {
        // Y0 U Y1 V, both pixels at limited white
        let yuyv = [235u8, 128, 235, 128];
        let mut rgb = [0f32; 6];
        yuyv_to_rgb(&yuyv, &mut rgb, 2, 1, YuvRange::Limited, YuvStandardMatrix::Bt601).unwrap();
        for c in rgb {
            assert!((c - 1f32).abs() < 1e-3);
        }
    }

    #[test]
    fn odd_width_rejected() {
        let frame = [0u8; 12];
        let mut rgb = [9u8; 18];
        let err = uyvy_to_rgb(&frame, &mut rgb, 3, 2, YuvRange::Full, YuvStandardMatrix::Bt601)
            .unwrap_err();
        assert_eq!(err.kind(), crate::YuvErrorKind::InvalidArgument);
        assert!(rgb.iter().all(|&v| v == 9));
    }
}
