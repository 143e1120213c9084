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
use crate::images::{Yuv420Geometry, YuvBiPlanarImageMut};
use crate::pixel_transform::{RgbSample, RgbToYuvKernel};
use crate::rgba_to_yuv::encode_420_row_pair;
use crate::yuv_error::{check_rgba_destination, check_yuv_frame};
use crate::yuv_support::{YuvPixelFormat, YuvRange, YuvSourceChannels, YuvStandardMatrix};
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

fn rgbx_to_nv12<T: RgbSample, const SOURCE_CHANNELS: u8>(
    rgba: &[T],
    nv12: &mut [u8],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    let src_chans: YuvSourceChannels = SOURCE_CHANNELS.into();
    check_yuv_frame(nv12, YuvPixelFormat::Nv12, width, height)?;
    check_rgba_destination(rgba, width, height, src_chans.get_channels_count())?;
    let kernel = RgbToYuvKernel::new(range, matrix)?;
    tracing::trace!(?src_chans, width, height, "rgb to nv12");

    let mut image = YuvBiPlanarImageMut::from_frame(nv12, Yuv420Geometry::new(width, height));
    let rgba_stride = image.geometry.width * src_chans.get_channels_count();
    let y_stride = image.y_stride;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = image
            .y_plane
            .par_chunks_exact_mut(y_stride * 2)
            .zip(image.uv_plane.par_chunks_exact_mut(image.uv_stride))
            .zip(rgba.par_chunks_exact(rgba_stride * 2));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = image
            .y_plane
            .chunks_exact_mut(y_stride * 2)
            .zip(image.uv_plane.chunks_exact_mut(image.uv_stride))
            .zip(rgba.chunks_exact(rgba_stride * 2));
    }
    iter.for_each(|((y_dst, uv_dst), rgba)| {
        let (y_dst0, y_dst1) = y_dst.split_at_mut(y_stride);
        let (rgba0, rgba1) = rgba.split_at(rgba_stride);
        encode_420_row_pair::<T, SOURCE_CHANNELS>(
            &kernel,
            rgba0,
            rgba1,
            y_dst0,
            y_dst1,
            |cx, u, v| {
                uv_dst[cx * 2] = u;
                uv_dst[cx * 2 + 1] = v;
            },
        );
    });

    Ok(())
}

/// Convert RGB image to YUV NV12 bi-planar frame.
///
/// The chroma plane holds interleaved U,V pairs, each the rounded average of its 2x2 pixel
/// block.
///
/// # Arguments
///
/// * `rgb` - Source image, exactly `width * height * 3` samples.
/// * `nv12` - Destination frame, exactly `width * height * 3 / 2` bytes.
/// * `width` - The width of the image, must be even.
/// * `height` - The height of the image, must be even.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
pub fn rgb_to_nv12<T: RgbSample>(
    rgb: &[T],
    nv12: &mut [u8],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    rgbx_to_nv12::<T, { YuvSourceChannels::Rgb as u8 }>(rgb, nv12, width, height, range, matrix)
}

/// Convert RGBA image to YUV NV12 bi-planar frame, alpha is ignored.
pub fn rgba_to_nv12<T: RgbSample>(
    rgba: &[T],
    nv12: &mut [u8],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    rgbx_to_nv12::<T, { YuvSourceChannels::Rgba as u8 }>(rgba, nv12, width, height, range, matrix)
}
