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
use crate::data_channel::{capacity_bytes, extract_data};
use crate::images::{Yuv420Geometry, YuvBiPlanarImage};
use crate::pixel_transform::{RgbSample, YuvToRgbKernel};
use crate::yuv_error::{check_rgba_destination, check_yuv_frame};
use crate::yuv_support::{YuvPixelFormat, YuvRange, YuvSourceChannels, YuvStandardMatrix};
use crate::yuv_to_rgba::convert_420_row_pair;
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

fn yuv_nv12_to_rgbx<T: RgbSample, const DESTINATION_CHANNELS: u8>(
    image: &YuvBiPlanarImage,
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
            .zip(image.uv_plane.par_chunks_exact(image.uv_stride))
            .zip(rgba.par_chunks_exact_mut(rgba_stride * 2));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = image
            .y_plane
            .chunks_exact(image.y_stride * 2)
            .zip(image.uv_plane.chunks_exact(image.uv_stride))
            .zip(rgba.chunks_exact_mut(rgba_stride * 2));
    }
    iter.for_each(|((y_src, uv_src), rgba)| {
        let (y_src0, y_src1) = y_src.split_at(image.y_stride);
        let (rgba0, rgba1) = rgba.split_at_mut(rgba_stride);
        convert_420_row_pair::<T, DESTINATION_CHANNELS>(
            kernel,
            y_src0,
            y_src1,
            uv_src.chunks_exact(2).map(|uv| (uv[0], uv[1])),
            rgba0,
            rgba1,
        );
    });
}

fn prepare_nv12<'a, T: RgbSample, const DESTINATION_CHANNELS: u8>(
    nv12: &'a [u8],
    rgba: &[T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(YuvBiPlanarImage<'a>, YuvToRgbKernel), YuvError> {
    let dst_chans: YuvSourceChannels = DESTINATION_CHANNELS.into();
    check_yuv_frame(nv12, YuvPixelFormat::Nv12, width, height)?;
    check_rgba_destination(rgba, width, height, dst_chans.get_channels_count())?;
    let kernel = YuvToRgbKernel::new(range, matrix)?;
    tracing::trace!(?dst_chans, width, height, "nv12 to rgb");
    let image = YuvBiPlanarImage::from_frame(nv12, Yuv420Geometry::new(width, height));
    Ok((image, kernel))
}

/// Convert YUV NV12 bi-planar frame to RGB.
///
/// The frame is the Y plane followed by one plane of interleaved U,V pairs, one pair per
/// 2x2 pixel block.
///
/// # Arguments
///
/// * `nv12` - Source frame, exactly `width * height * 3 / 2` bytes.
/// * `rgb` - Destination, exactly `width * height * 3` samples.
/// * `width` - The width of the image, must be even.
/// * `height` - The height of the image, must be even.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
pub fn nv12_to_rgb<T: RgbSample>(
    nv12: &[u8],
    rgb: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    let (image, kernel) = prepare_nv12::<T, { YuvSourceChannels::Rgb as u8 }>(
        nv12, rgb, width, height, range, matrix,
    )?;
    yuv_nv12_to_rgbx::<T, { YuvSourceChannels::Rgb as u8 }>(&image, &kernel, rgb);
    Ok(())
}

/// Convert YUV NV12 bi-planar frame to RGBA, alpha is set to opaque.
pub fn nv12_to_rgba<T: RgbSample>(
    nv12: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    let (image, kernel) = prepare_nv12::<T, { YuvSourceChannels::Rgba as u8 }>(
        nv12, rgba, width, height, range, matrix,
    )?;
    yuv_nv12_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }>(&image, &kernel, rgba);
    Ok(())
}

/// Convert YUV NV12 bi-planar frame to RGBA and read the data channel carried in its U
/// samples.
///
/// Up to `data.len()` bytes are extracted before any pixel is written. Returns the number of
/// bytes written into `data`: `data.len()` when the frame holds that many, the frame capacity
/// otherwise. With the `strict_capacity` feature a `data` larger than the capacity is an error
/// and nothing is written.
pub fn nv12_to_rgba_with_data<T: RgbSample>(
    nv12: &[u8],
    rgba: &mut [T],
    width: u32,
    height: u32,
    data: &mut [u8],
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<usize, YuvError> {
    let (image, kernel) = prepare_nv12::<T, { YuvSourceChannels::Rgba as u8 }>(
        nv12, rgba, width, height, range, matrix,
    )?;
    let extracted = extract_data(data, &image.geometry, |i| image.u_sample(i))?;
    yuv_nv12_to_rgbx::<T, { YuvSourceChannels::Rgba as u8 }>(&image, &kernel, rgba);
    Ok(extracted)
}

/// Reads the whole data channel of an NV12 frame without converting pixels.
///
/// Returns every byte the frame can carry, see [crate::data_channel_capacity].
pub fn nv12_extract_data(nv12: &[u8], width: u32, height: u32) -> Result<Vec<u8>, YuvError> {
    check_yuv_frame(nv12, YuvPixelFormat::Nv12, width, height)?;
    let image = YuvBiPlanarImage::from_frame(nv12, Yuv420Geometry::new(width, height));
    let capacity = capacity_bytes(&image.geometry);
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)
        .map_err(|e| YuvError::ResourceFailure(e.to_string()))?;
    data.resize(capacity, 0u8);
    extract_data(&mut data, &image.geometry, |i| image.u_sample(i))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yuv_to_rgba::i420_to_rgb;

    fn i420_from_nv12(nv12: &[u8], width: usize, height: usize) -> Vec<u8> {
        let luma = width * height;
        let mut i420 = nv12[..luma].to_vec();
        i420.extend(nv12[luma..].iter().step_by(2));
        i420.extend(nv12[luma + 1..].iter().step_by(2));
        i420
    }

    #[test]
    fn nv12_matches_planar() {
        let (width, height) = (18usize, 10usize);
        let nv12: Vec<u8> = (0..width * height * 3 / 2)
            .map(|i| (i * 37 % 251) as u8)
            .collect();
        let i420 = i420_from_nv12(&nv12, width, height);

        let mut from_nv12 = vec![0u8; width * height * 3];
        let mut from_i420 = vec![0u8; width * height * 3];
        nv12_to_rgb(
            &nv12,
            &mut from_nv12,
            width as u32,
            height as u32,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        i420_to_rgb(
            &i420,
            &mut from_i420,
            width as u32,
            height as u32,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_eq!(from_nv12, from_i420);
    }

    #[test]
    fn neutral_frame_reads_zero_bytes() {
        let (width, height) = (64usize, 64usize);
        let mut nv12 = vec![128u8; width * height * 3 / 2];
        nv12[..width * height].fill(90);
        let data = nv12_extract_data(&nv12, width as u32, height as u32).unwrap();
        assert_eq!(data.len(), 32);
        assert!(data.iter().all(|&b| b == 0));

        let mut rgba = vec![0u8; width * height * 4];
        let mut target = [0xFFu8; 4];
        let count = nv12_to_rgba_with_data(
            &nv12,
            &mut rgba,
            width as u32,
            height as u32,
            &mut target,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_eq!(count, 4);
        assert_eq!(target, [0, 0, 0, 0]);
        assert!(rgba.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn odd_height_rejected() {
        let nv12 = vec![0u8; 30];
        assert!(nv12_extract_data(&nv12, 4, 5).is_err());
    }
}
