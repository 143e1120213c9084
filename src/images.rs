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
//! Plane views over tightly packed 4:2:0 frames.
//!
//! A frame travels across the API as one contiguous slice; the views here split it into
//! planes according to the format's plane order.
use crate::yuv_support::YuvPixelFormat;

/// Order of the two chroma planes of a planar frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum YuvPlaneOrder {
    /// I420
    UV,
    /// YV12
    VU,
}

impl YuvPlaneOrder {
    pub(crate) const fn pixel_format(self) -> YuvPixelFormat {
        match self {
            YuvPlaneOrder::UV => YuvPixelFormat::I420,
            YuvPlaneOrder::VU => YuvPixelFormat::Yv12,
        }
    }
}

/// Geometry of a 4:2:0 frame, dimensions are validated to be even beforehand.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Yuv420Geometry {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) chroma_width: usize,
    pub(crate) chroma_height: usize,
}

impl Yuv420Geometry {
    pub(crate) const fn new(width: u32, height: u32) -> Self {
        Yuv420Geometry {
            width: width as usize,
            height: height as usize,
            chroma_width: width as usize / 2,
            chroma_height: height as usize / 2,
        }
    }

    #[inline]
    pub(crate) const fn luma_len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub(crate) const fn chroma_len(&self) -> usize {
        self.chroma_width * self.chroma_height
    }

    /// Row-major index of chroma sample `(cx, cy)`, the block covering pixels
    /// `(2cx..2cx+1, 2cy..2cy+1)`.
    #[inline]
    pub(crate) const fn chroma_index(&self, cx: usize, cy: usize) -> usize {
        cy * self.chroma_width + cx
    }
}

#[derive(Debug, Clone)]
pub(crate) struct YuvPlanarImage<'a> {
    pub(crate) y_plane: &'a [u8],
    /// Stride here always means Elements per row.
    pub(crate) y_stride: usize,
    pub(crate) u_plane: &'a [u8],
    pub(crate) v_plane: &'a [u8],
    /// Stride of both chroma planes.
    pub(crate) chroma_stride: usize,
    pub(crate) geometry: Yuv420Geometry,
}

impl<'a> YuvPlanarImage<'a> {
    /// Splits a frame of exactly `geometry` size into planes.
    pub(crate) fn from_frame(
        frame: &'a [u8],
        geometry: Yuv420Geometry,
        order: YuvPlaneOrder,
    ) -> Self {
        let (y_plane, chroma) = frame.split_at(geometry.luma_len());
        let (first, second) = chroma.split_at(geometry.chroma_len());
        let (u_plane, v_plane) = match order {
            YuvPlaneOrder::UV => (first, second),
            YuvPlaneOrder::VU => (second, first),
        };
        YuvPlanarImage {
            y_plane,
            y_stride: geometry.width,
            u_plane,
            v_plane,
            chroma_stride: geometry.chroma_width,
            geometry,
        }
    }
}

#[derive(Debug)]
pub(crate) struct YuvPlanarImageMut<'a> {
    pub(crate) y_plane: &'a mut [u8],
    /// Stride here always means Elements per row.
    pub(crate) y_stride: usize,
    pub(crate) u_plane: &'a mut [u8],
    pub(crate) v_plane: &'a mut [u8],
    /// Stride of both chroma planes.
    pub(crate) chroma_stride: usize,
    pub(crate) geometry: Yuv420Geometry,
}

impl<'a> YuvPlanarImageMut<'a> {
    pub(crate) fn from_frame(
        frame: &'a mut [u8],
        geometry: Yuv420Geometry,
        order: YuvPlaneOrder,
    ) -> Self {
        let (y_plane, chroma) = frame.split_at_mut(geometry.luma_len());
        let (first, second) = chroma.split_at_mut(geometry.chroma_len());
        let (u_plane, v_plane) = match order {
            YuvPlaneOrder::UV => (first, second),
            YuvPlaneOrder::VU => (second, first),
        };
        YuvPlanarImageMut {
            y_plane,
            y_stride: geometry.width,
            u_plane,
            v_plane,
            chroma_stride: geometry.chroma_width,
            geometry,
        }
    }
}

#[derive(Debug, Clone)]
/// Non-mutable representation of Bi-Planar YUV image
pub(crate) struct YuvBiPlanarImage<'a> {
    pub(crate) y_plane: &'a [u8],
    /// Stride here always means Elements per row.
    pub(crate) y_stride: usize,
    /// Interleaved U,V pairs
    pub(crate) uv_plane: &'a [u8],
    pub(crate) uv_stride: usize,
    pub(crate) geometry: Yuv420Geometry,
}

impl<'a> YuvBiPlanarImage<'a> {
    pub(crate) fn from_frame(frame: &'a [u8], geometry: Yuv420Geometry) -> Self {
        let (y_plane, uv_plane) = frame.split_at(geometry.luma_len());
        YuvBiPlanarImage {
            y_plane,
            y_stride: geometry.width,
            uv_plane,
            uv_stride: geometry.chroma_width * 2,
            geometry,
        }
    }

    /// U sample at a row-major chroma index.
    #[inline]
    pub(crate) fn u_sample(&self, chroma_index: usize) -> u8 {
        self.uv_plane[chroma_index * 2]
    }
}

#[derive(Debug)]
/// Mutable representation of Bi-Planar YUV image
pub(crate) struct YuvBiPlanarImageMut<'a> {
    pub(crate) y_plane: &'a mut [u8],
    /// Stride here always means Elements per row.
    pub(crate) y_stride: usize,
    pub(crate) uv_plane: &'a mut [u8],
    pub(crate) uv_stride: usize,
    pub(crate) geometry: Yuv420Geometry,
}

impl<'a> YuvBiPlanarImageMut<'a> {
    pub(crate) fn from_frame(frame: &'a mut [u8], geometry: Yuv420Geometry) -> Self {
        let (y_plane, uv_plane) = frame.split_at_mut(geometry.luma_len());
        YuvBiPlanarImageMut {
            y_plane,
            y_stride: geometry.width,
            uv_plane,
            uv_stride: geometry.chroma_width * 2,
            geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_frame(geometry: Yuv420Geometry) -> Vec<u8> {
        let mut frame = vec![0u8; geometry.luma_len() + geometry.chroma_len() * 2];
        frame[..geometry.luma_len()].fill(1);
        frame[geometry.luma_len()..geometry.luma_len() + geometry.chroma_len()].fill(2);
        frame[geometry.luma_len() + geometry.chroma_len()..].fill(3);
        frame
    }

    #[test]
    fn planar_order_swaps_chroma_planes() {
        let geometry = Yuv420Geometry::new(8, 4);
        let frame = numbered_frame(geometry);

        let i420 = YuvPlanarImage::from_frame(&frame, geometry, YuvPlaneOrder::UV);
        assert_eq!(i420.y_plane.len(), 32);
        assert!(i420.u_plane.iter().all(|&v| v == 2));
        assert!(i420.v_plane.iter().all(|&v| v == 3));

        let yv12 = YuvPlanarImage::from_frame(&frame, geometry, YuvPlaneOrder::VU);
        assert!(yv12.u_plane.iter().all(|&v| v == 3));
        assert!(yv12.v_plane.iter().all(|&v| v == 2));
        assert_eq!(yv12.chroma_stride, 4);
    }

    #[test]
    fn chroma_index_is_row_major() {
        let geometry = Yuv420Geometry::new(8, 4);
        assert_eq!(geometry.chroma_width, 4);
        assert_eq!(geometry.chroma_index(0, 0), 0);
        assert_eq!(geometry.chroma_index(3, 0), 3);
        assert_eq!(geometry.chroma_index(0, 1), 4);
        assert_eq!(geometry.chroma_index(3, 1), 7);
    }

    #[test]
    fn bi_planar_reads_interleaved_u() {
        let geometry = Yuv420Geometry::new(4, 2);
        let mut frame = vec![0u8; 4 * 2 + 4];
        frame[8..].copy_from_slice(&[10, 20, 30, 40]);
        let image = YuvBiPlanarImage::from_frame(&frame, geometry);
        assert_eq!(image.u_sample(0), 10);
        assert_eq!(image.u_sample(1), 30);
        assert_eq!(image.uv_stride, 4);
    }

    #[test]
    fn mutable_views_cover_whole_frame() {
        let geometry = Yuv420Geometry::new(4, 4);
        let mut frame = vec![0u8; 24];
        {
            let image = YuvPlanarImageMut::from_frame(&mut frame, geometry, YuvPlaneOrder::VU);
            image.v_plane.fill(7);
            image.u_plane.fill(9);
        }
        assert_eq!(&frame[16..20], &[7, 7, 7, 7]);
        assert_eq!(&frame[20..24], &[9, 9, 9, 9]);
        let image = YuvBiPlanarImageMut::from_frame(&mut frame, geometry);
        assert_eq!(image.uv_plane.len(), 8);
    }
}
