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
use crate::data_channel::DataChannelEncoder;
use crate::images::{Yuv420Geometry, YuvPlanarImageMut, YuvPlaneOrder};
use crate::pixel_transform::{LumaChroma, RgbSample, RgbToYuvKernel};
use crate::yuv_error::{check_rgba_destination, check_yuv_frame};
use crate::yuv_support::{YuvRange, YuvSourceChannels, YuvStandardMatrix};
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Writes two luma rows and hands every averaged 2x2 chroma pair to `store_chroma` as
/// `(cx, u, v)`. Alpha of the source is ignored.
#[inline(always)]
pub(crate) fn encode_420_row_pair<T: RgbSample, const SOURCE_CHANNELS: u8>(
    kernel: &RgbToYuvKernel,
    rgba0: &[T],
    rgba1: &[T],
    y_dst0: &mut [u8],
    y_dst1: &mut [u8],
    mut store_chroma: impl FnMut(usize, u8, u8),
) {
    let src_chans: YuvSourceChannels = SOURCE_CHANNELS.into();
    let channels = src_chans.get_channels_count();

    let pixel = |px: &[T]| -> LumaChroma { T::to_yuv(kernel, px[0], px[1], px[2]) };

    for (cx, (((rgba0, rgba1), y_dst0), y_dst1)) in rgba0
        .chunks_exact(channels * 2)
        .zip(rgba1.chunks_exact(channels * 2))
        .zip(y_dst0.chunks_exact_mut(2))
        .zip(y_dst1.chunks_exact_mut(2))
        .enumerate()
    {
        let p00 = pixel(&rgba0[..channels]);
        let p01 = pixel(&rgba0[channels..]);
        let p10 = pixel(&rgba1[..channels]);
        let p11 = pixel(&rgba1[channels..]);

        y_dst0[0] = p00.y;
        y_dst0[1] = p01.y;
        y_dst1[0] = p10.y;
        y_dst1[1] = p11.y;

        let cb = p00.cb + p01.cb + p10.cb + p11.cb;
        let cr = p00.cr + p01.cr + p10.cr + p11.cr;
        store_chroma(
            cx,
            kernel.finish_chroma::<2>(cb),
            kernel.finish_chroma::<2>(cr),
        );
    }
}

fn rgbx_to_yuv420<T: RgbSample, const SOURCE_CHANNELS: u8>(
    image: &mut YuvPlanarImageMut,
    rgba: &[T],
    kernel: &RgbToYuvKernel,
    encoder: Option<&DataChannelEncoder>,
) {
    let src_chans: YuvSourceChannels = SOURCE_CHANNELS.into();
    let rgba_stride = image.geometry.width * src_chans.get_channels_count();
    let y_stride = image.y_stride;

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = image
            .y_plane
            .par_chunks_exact_mut(y_stride * 2)
            .zip(image.u_plane.par_chunks_exact_mut(image.chroma_stride))
            .zip(image.v_plane.par_chunks_exact_mut(image.chroma_stride))
            .zip(rgba.par_chunks_exact(rgba_stride * 2))
            .enumerate();
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = image
            .y_plane
            .chunks_exact_mut(y_stride * 2)
            .zip(image.u_plane.chunks_exact_mut(image.chroma_stride))
            .zip(image.v_plane.chunks_exact_mut(image.chroma_stride))
            .zip(rgba.chunks_exact(rgba_stride * 2))
            .enumerate();
    }
    iter.for_each(|(cy, (((y_dst, u_dst), v_dst), rgba))| {
        let (y_dst0, y_dst1) = y_dst.split_at_mut(y_stride);
        let (rgba0, rgba1) = rgba.split_at(rgba_stride);
        encode_420_row_pair::<T, SOURCE_CHANNELS>(
            kernel,
            rgba0,
            rgba1,
            y_dst0,
            y_dst1,
            |cx, u, v| {
                u_dst[cx] = match encoder {
                    Some(encoder) => encoder.encode_u(cx, cy, u),
                    None => u,
                };
                v_dst[cx] = v;
            },
        );
    });
}

#[allow(clippy::too_many_arguments)]
fn rgbx_to_planar<T: RgbSample, const SOURCE_CHANNELS: u8>(
    rgba: &[T],
    frame: &mut [u8],
    order: YuvPlaneOrder,
    width: u32,
    height: u32,
    payload: Option<(&[u8], bool)>,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<usize, YuvError> {
    let src_chans: YuvSourceChannels = SOURCE_CHANNELS.into();
    let format = order.pixel_format();
    check_yuv_frame(frame, format, width, height)?;
    check_rgba_destination(rgba, width, height, src_chans.get_channels_count())?;
    let kernel = RgbToYuvKernel::new(range, matrix)?;
    let geometry = Yuv420Geometry::new(width, height);
    let encoder = match payload {
        Some((data, flip)) => Some(DataChannelEncoder::new(data, geometry, flip)?),
        None => None,
    };
    tracing::trace!(?format, ?src_chans, width, height, "rgb to planar 4:2:0");

    let mut image = YuvPlanarImageMut::from_frame(frame, geometry, order);
    rgbx_to_yuv420::<T, SOURCE_CHANNELS>(&mut image, rgba, &kernel, encoder.as_ref());

    let embedded = encoder.map_or(0, |e| e.embedded_len());
    if encoder.is_some() {
        tracing::debug!(bytes = embedded, "data channel embedded");
    }
    Ok(embedded)
}

/// Convert RGB image to YUV I420 planar frame.
///
/// Each chroma sample is the rounded average of its 2x2 pixel block. `T` is either `u8` or
/// normalized `f32`, out of range floats are saturated.
///
/// # Arguments
///
/// * `rgb` - Source image, exactly `width * height * 3` samples.
/// * `i420` - Destination frame, exactly `width * height * 3 / 2` bytes.
/// * `width` - The width of the image, must be even.
/// * `height` - The height of the image, must be even.
/// * `range` - The YUV range (limited or full).
/// * `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
pub fn rgb_to_i420<T: RgbSample>(
    rgb: &[T],
    i420: &mut [u8],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    rgbx_to_planar::<T, { YuvSourceChannels::Rgb as u8 }>(
        rgb,
        i420,
        YuvPlaneOrder::UV,
        width,
        height,
        None,
        range,
        matrix,
    )
    .map(|_| ())
}

/// Convert RGBA image to YUV I420 planar frame, alpha is ignored.
pub fn rgba_to_i420<T: RgbSample>(
    rgba: &[T],
    i420: &mut [u8],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    rgbx_to_planar::<T, { YuvSourceChannels::Rgba as u8 }>(
        rgba,
        i420,
        YuvPlaneOrder::UV,
        width,
        height,
        None,
        range,
        matrix,
    )
    .map(|_| ())
}

/// Convert RGB image to YUV YV12 planar frame, the V plane precedes the U plane.
pub fn rgb_to_yv12<T: RgbSample>(
    rgb: &[T],
    yv12: &mut [u8],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    rgbx_to_planar::<T, { YuvSourceChannels::Rgb as u8 }>(
        rgb,
        yv12,
        YuvPlaneOrder::VU,
        width,
        height,
        None,
        range,
        matrix,
    )
    .map(|_| ())
}

/// Convert RGBA image to YUV YV12 planar frame, alpha is ignored.
pub fn rgba_to_yv12<T: RgbSample>(
    rgba: &[T],
    yv12: &mut [u8],
    width: u32,
    height: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<(), YuvError> {
    rgbx_to_planar::<T, { YuvSourceChannels::Rgba as u8 }>(
        rgba,
        yv12,
        YuvPlaneOrder::VU,
        width,
        height,
        None,
        range,
        matrix,
    )
    .map(|_| ())
}

/// Convert RGBA image to YUV I420 planar frame carrying `data` in its U plane.
///
/// Every payload bit occupies [crate::DATA_CHANNEL_REDUNDANCY] consecutive U samples,
/// counted row-major from the top row, or from the bottom row when `flip` is set so that a
/// reader of the vertically flipped frame sees the regular layout. U samples past the payload
/// keep their natural value, Y and V are never touched.
///
/// Returns the number of bytes embedded. A payload longer than
/// [crate::data_channel_capacity] is truncated, or rejected with
/// [YuvError::CapacityExceeded] when the `strict_capacity` feature is enabled.
#[allow(clippy::too_many_arguments)]
pub fn rgba_to_i420_with_data<T: RgbSample>(
    rgba: &[T],
    i420: &mut [u8],
    width: u32,
    height: u32,
    data: &[u8],
    flip: bool,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<usize, YuvError> {
    rgbx_to_planar::<T, { YuvSourceChannels::Rgba as u8 }>(
        rgba,
        i420,
        YuvPlaneOrder::UV,
        width,
        height,
        Some((data, flip)),
        range,
        matrix,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_channel::{zero_level, DATA_CHANNEL_ONE_VALUE};
    use rand::Rng;

    fn random_rgba(width: usize, height: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..width * height * 4)
            .map(|_| rng.random_range(0..=255u8))
            .collect()
    }

    #[test]
    fn yv12_swaps_planes_of_i420() {
        let (width, height) = (12usize, 8usize);
        let rgba = random_rgba(width, height);
        let luma = width * height;
        let chroma = luma / 4;
        let mut i420 = vec![0u8; luma + chroma * 2];
        let mut yv12 = vec![0u8; luma + chroma * 2];
        let (w, h) = (width as u32, height as u32);
        rgba_to_i420(&rgba, &mut i420, w, h, YuvRange::Limited, YuvStandardMatrix::Bt601).unwrap();
        rgba_to_yv12(&rgba, &mut yv12, w, h, YuvRange::Limited, YuvStandardMatrix::Bt601).unwrap();
        assert_eq!(i420[..luma], yv12[..luma]);
        assert_eq!(i420[luma..luma + chroma], yv12[luma + chroma..]);
        assert_eq!(i420[luma + chroma..], yv12[luma..luma + chroma]);
    }

    #[test]
    fn alpha_does_not_change_output() {
        let (width, height) = (4usize, 4usize);
        let mut rgba = random_rgba(width, height);
        let rgb: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let mut from_rgb = vec![0u8; 24];
        let mut from_rgba = vec![0u8; 24];
        rgb_to_i420(&rgb, &mut from_rgb, 4, 4, YuvRange::Full, YuvStandardMatrix::Bt709).unwrap();
        rgba.chunks_exact_mut(4).for_each(|px| px[3] = 0);
        rgba_to_i420(&rgba, &mut from_rgba, 4, 4, YuvRange::Full, YuvStandardMatrix::Bt709)
            .unwrap();
        assert_eq!(from_rgb, from_rgba);
    }

    #[test]
    fn data_only_touches_u_plane() {
        let (width, height) = (64usize, 64usize);
        let rgba = random_rgba(width, height);
        let luma = width * height;
        let chroma = luma / 4;
        let (w, h) = (width as u32, height as u32);
        let mut plain = vec![0u8; luma + chroma * 2];
        let mut carrying = vec![0u8; luma + chroma * 2];
        rgba_to_i420(&rgba, &mut plain, w, h, YuvRange::Limited, YuvStandardMatrix::Bt601).unwrap();
        let embedded = rgba_to_i420_with_data(
            &rgba,
            &mut carrying,
            w,
            h,
            &[0x80],
            false,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_eq!(embedded, 1);
        assert_eq!(plain[..luma], carrying[..luma]);
        assert_eq!(plain[luma + chroma..], carrying[luma + chroma..]);

        let u_plain = &plain[luma..luma + chroma];
        let u_carrying = &carrying[luma..luma + chroma];
        assert!(u_carrying[..4].iter().all(|&u| u == DATA_CHANNEL_ONE_VALUE));
        for i in 4..32 {
            assert_eq!(u_carrying[i], zero_level(u_plain[i]));
        }
        assert_eq!(u_plain[32..], u_carrying[32..]);
    }

    #[test]
    fn float_and_u8_sources_agree() {
        let (width, height) = (8usize, 6usize);
        let rgba = random_rgba(width, height);
        let rgba_f: Vec<f32> = rgba.iter().map(|&v| v as f32 / 255f32).collect();
        let mut a = vec![0u8; width * height * 3 / 2];
        let mut b = vec![0u8; width * height * 3 / 2];
        let (w, h) = (width as u32, height as u32);
        rgba_to_i420(&rgba, &mut a, w, h, YuvRange::Limited, YuvStandardMatrix::Bt601).unwrap();
        rgba_to_i420(&rgba_f, &mut b, w, h, YuvRange::Limited, YuvStandardMatrix::Bt601).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((*x as i32 - *y as i32).abs() <= 1);
        }
    }
}
