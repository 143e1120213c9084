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
use crate::data_channel::extract_data;
use crate::images::{Yuv420Geometry, YuvPlanarImage, YuvPlaneOrder};
use crate::pixel_transform::{store_rgbx, RgbSample, YuvToRgbKernel};
use crate::yuv_error::{check_rgba_destination, check_yuv_frame};
use crate::yuv_support::{YuvRange, YuvSourceChannels, YuvStandardMatrix};
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Converts two luma rows sharing one chroma row, `chroma` yields `(u, v)` per 2x2 block.
#[inline(always)]
pub(crate) fn convert_420_row_pair<T: RgbSample, const DESTINATION_CHANNELS: u8>(
    kernel: &YuvToRgbKernel,
    y_src0: &[u8],
    y_src1: &[u8],
    chroma: impl Iterator<Item = (u8, u8)>,
    rgba0: &mut [T],
    rgba1: &mut [T],
) {
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let channels = dst_chans.get_channels_count();
    let has_alpha = dst_chans.has_alpha();

    for ((((rgba0, rgba1), y_src0), y_src1), (u_value, v_value)) in rgba0
        .chunks_exact_mut(channels * 2)
        .zip(rgba1.chunks_exact_mut(channels * 2))
        .zip(y_src0.chunks_exact(2))
        .zip(y_src1.chunks_exact(2))
        .zip(chroma)
    {
        let (rgba00, rgba01) = rgba0.split_at_mut(channels);
        store_rgbx(rgba00, T::from_yuv(kernel, y_src0[0], u_value, v_value), has_alpha);
        store_rgbx(rgba01, T::from_yuv(kernel, y_src0[1], u_value, v_value), has_alpha);

        let (rgba10, rgba11) = rgba1.split_at_mut(channels);
        store_rgbx(rgba10, T::from_yuv(kernel, y_src1[0], u_value, v_value), has_alpha);
        store_rgbx(rgba11, T::from_yuv(kernel, y_src1[1], u_value, v_value), has_alpha);
    }
}

fn yuv420_to_rgbx<T: RgbSample, const DESTINATION_CHANNELS: u8>(
    image: &YuvPlanarImage,
    kernel: &YuvToRgbKernel,
    rgba: &mut [T],
) {
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let rgba_stride = image.geometry.width * dst_chans.get_channels_count();

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = image
            .y_plane
            .par_chunks_exact(image.y_stride * 2)
            .zip(image.u_plane.par_chunks_exact(image.chroma_stride))
            .zip(image.v_plane.par_chunks_exact(image.chroma_stride))
            .zip(rgba.par_chunks_exact_mut(rgba_stride * 2));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = image
            .y_plane
            .chunks_exact(image.y_stride * 2)
            .zip(image.u_plane.chunks_exact(image.chroma_stride))
            .zip(image.v_plane.chunks_exact(image.chroma_stride))
            .zip(rgba.chunks_exact_mut(rgba_stride * 2));
    }
    iter.for_each(|(((y_src, u_src), v_src), rgba)| {
        let (y_src0, y_src1) = y_src.split_at(image.y_stride);
        let (rgba0, rgba1) = rgba.split_at_mut(rgba_stride);
        convert_420_row_pair::<T, DESTINATION_CHANNELS>(
            kernel,
            y_src0,
            y_src1,
            u_src.iter().copied().zip(v_src.iter().copied()),
            rgba0,
            rgba1,
        );
    });
}

fn prepare_planar<'a, T: RgbSample, const DESTINATION_CHANNELS: u8>(
    frame: &'a [u8],
    order: YuvPlaneOrder,
    rgba: &[T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(YuvPlanarImage<'a>, YuvToRgbKernel), YuvError> {
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let format = order.pixel_format();
    check_yuv_frame(frame, format, width, height)?;
    check_rgba_destination(rgba, width, height, dst_chans.get_channels_count())?;
    let kernel = YuvToRgbKernel::new(range, matrix)?;
    tracing::trace!(?format, ?dst_chans, width, height, "planar 4:2:0 to rgb");
    let image = YuvPlanarImage::from_frame(frame, Yuv420Geometry::new(width, height), order);
    Ok((image, kernel))
}

fn planar_to_rgbx<T: RgbSample, const DESTINATION_CHANNELS: u8>(
    frame: &[u8],
    order: YuvPlaneOrder,
    rgba: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    let (image, kernel) = prepare_planar::<T, DESTINATION_CHANNELS>(
        frame, order, rgba, width, height, range, matrix,
    )?;
    yuv420_to_rgbx::<T, DESTINATION_CHANNELS>(&image, &kernel, rgba);
    Ok(())
}

/// Convert YUV I420 planar frame to RGB.
///
/// The frame is the Y plane followed by the U and V planes, each chroma plane holding one
/// sample per 2x2 pixel block. `T` is either `u8` or normalized `f32`.
///
/// # Arguments
///
/// * `i420` - Source frame, exactly `width * height * 3 / 2` bytes.
/// * `rgb` - Destination, exactly `width * height * 3` samples.
/// * `width` - The width of the image, must be even.
/// * `height` - The height of the image, must be even.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
pub fn i420_to_rgb<T: RgbSample>(
    i420: &[u8],
    rgb: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    planar_to_rgbx::<T, { YuvSourceChannels::Rgb as u8 }>(
        i420,
        YuvPlaneOrder::UV,
        rgb,
        width,
        height,
        range,
        matrix,
    )
}

/// Convert YUV I420 planar frame to RGBA, alpha is set to opaque.
///
/// See [i420_to_rgb] for the frame layout.
pub fn i420_to_rgba<T: RgbSample>(
    i420: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    planar_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }>(
        i420,
        YuvPlaneOrder::UV,
        rgba,
        width,
        height,
        range,
        matrix,
    )
}

/// Convert YUV YV12 planar frame to RGB.
///
/// Same as [i420_to_rgb] except the V plane precedes the U plane.
pub fn yv12_to_rgb<T: RgbSample>(
    yv12: &[u8],
    rgb: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    planar_to_rgbx::<T, { YuvSourceChannels::Rgb as u8 }>(
        yv12,
        YuvPlaneOrder::VU,
        rgb,
        width,
        height,
        range,
        matrix,
    )
}

/// Convert YUV YV12 planar frame to RGBA, alpha is set to opaque.
pub fn yv12_to_rgba<T: RgbSample>(
    yv12: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    planar_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }>(
        yv12,
        YuvPlaneOrder::VU,
        rgba,
        width,
        height,
        range,
        matrix,
    )
}

/// Convert YUV I420 planar frame to RGBA and read the data channel of its U plane.
///
/// Up to `data.len()` bytes are extracted. Returns the number of bytes written into `data`,
/// smaller than `data.len()` only when the frame carries fewer bytes (or an error with the
/// `strict_capacity` feature).
pub fn i420_to_rgba_with_data<T: RgbSample>(
    i420: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    data: &mut [u8],
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<usize, YuvError> {
    let (image, kernel) = prepare_planar::<T, { YuvSourceChannels::Rgba as u8 }>(
        i420,
        YuvPlaneOrder::UV,
        rgba,
        width,
        height,
        range,
        matrix,
    )?;
    let extracted = extract_data(data, &image.geometry, |i| image.u_plane[i])?;
    yuv420_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }>(&image, &kernel, rgba);
    Ok(extracted)
}
