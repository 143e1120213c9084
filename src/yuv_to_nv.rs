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
use crate::images::{Yuv420Geometry, YuvBiPlanarImageMut, YuvPlanarImage, YuvPlaneOrder};
use crate::yuv_error::{check_yuv_frame, MismatchedSize};
use crate::yuv_support::YuvPixelFormat;
use crate::YuvError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::{ParallelSlice, ParallelSliceMut};

/// Repacks an I420 frame into NV12 without touching sample values.
///
/// The Y plane is copied as is, the U and V planes are interleaved into one plane. The U plane
/// data channel therefore survives the repack.
///
/// # Arguments
///
/// * `i420` - Source frame, exactly `width * height * 3 / 2` bytes.
/// * `nv12` - Destination frame, same length as the source.
/// * `width` - The width of the image, must be even.
/// * `height` - The height of the image, must be even.
pub fn i420_to_nv12(
    i420: &[u8],
    nv12: &mut [u8],
    width: u32,
    height: u32,
) -> Result<(), YuvError> {
    check_yuv_frame(i420, YuvPixelFormat::I420, width, height)?;
    let expected = i420.len();
    if nv12.len() != expected {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected,
            received: nv12.len(),
        }));
    }
    tracing::trace!(width, height, "i420 to nv12");

    let geometry = Yuv420Geometry::new(width, height);
    let src = YuvPlanarImage::from_frame(i420, geometry, YuvPlaneOrder::UV);
    let mut dst = YuvBiPlanarImageMut::from_frame(nv12, geometry);

    dst.y_plane.copy_from_slice(src.y_plane);

    let iter;
    #[cfg(feature = "rayon")]
    {
        iter = dst
            .uv_plane
            .par_chunks_exact_mut(dst.uv_stride)
            .zip(src.u_plane.par_chunks_exact(src.chroma_stride))
            .zip(src.v_plane.par_chunks_exact(src.chroma_stride));
    }
    #[cfg(not(feature = "rayon"))]
    {
        iter = dst
            .uv_plane
            .chunks_exact_mut(dst.uv_stride)
            .zip(src.u_plane.chunks_exact(src.chroma_stride))
            .zip(src.v_plane.chunks_exact(src.chroma_stride));
    }
    iter.for_each(|((uv_dst, u_src), v_src)| {
        for ((uv, &u), &v) in uv_dst.chunks_exact_mut(2).zip(u_src).zip(v_src) {
            uv[0] = u;
            uv[1] = v;
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaves_chroma() {
        let i420 = [1u8, 2, 3, 4, 5, 6, 7, 8, 10, 11, 20, 21];
        let mut nv12 = [0u8; 12];
        i420_to_nv12(&i420, &mut nv12, 4, 2).unwrap();
        assert_eq!(nv12, [1, 2, 3, 4, 5, 6, 7, 8, 10, 20, 11, 21]);
    }

    #[test]
    fn destination_length_checked() {
        let i420 = [0u8; 12];
        let mut nv12 = [0u8; 13];
        assert!(i420_to_nv12(&i420, &mut nv12, 4, 2).is_err());
    }
}
