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
#![no_main]

use libfuzzer_sys::fuzz_target;
use yuvplane::{
    i420_to_rgb, i420_to_rgba, nv12_to_rgb, nv12_to_rgba, uyvy_to_rgba, yuyv_to_rgb,
    yv12_to_rgba, yvyu_to_rgb, YuvPixelFormat, YuvRange, YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, bool)| {
    let range = if data.5 {
        YuvRange::Full
    } else {
        YuvRange::Limited
    };
    fuzz_yuv_420(data.0, data.1, data.2, data.3, data.4, range);
    fuzz_yuv_422(data.0, data.1, data.2, data.3, data.4, range);
});

fn fuzz_yuv_420(i_width: u8, i_height: u8, y_value: u8, u_value: u8, v_value: u8, range: YuvRange) {
    let (width, height) = (i_width as u32, i_height as u32);
    let frame_len = match YuvPixelFormat::I420.frame_len(width, height) {
        Ok(len) => len,
        Err(_) => return,
    };
    let luma = width as usize * height as usize;
    let chroma = (frame_len - luma) / 2;
    let mut planar = vec![y_value; luma];
    planar.extend(std::iter::repeat_n(u_value, chroma));
    planar.extend(std::iter::repeat_n(v_value, chroma));
    let mut nv12 = vec![y_value; luma];
    for _ in 0..chroma {
        nv12.extend_from_slice(&[u_value, v_value]);
    }

    let mut target_rgb = vec![0u8; luma * 3];
    let mut target_rgba = vec![0f32; luma * 4];

    // odd dimensions must come back as errors, never as panics
    let valid = width % 2 == 0 && height % 2 == 0 && luma != 0;
    let matrix = YuvStandardMatrix::Bt601;
    assert_eq!(
        i420_to_rgb(&planar, &mut target_rgb, width, height, range, matrix).is_ok(),
        valid
    );
    assert_eq!(
        yv12_to_rgba(&planar, &mut target_rgba, width, height, range, matrix).is_ok(),
        valid
    );
    assert_eq!(
        nv12_to_rgb(&nv12, &mut target_rgb, width, height, range, matrix).is_ok(),
        valid
    );
    let _ = i420_to_rgba(&planar, &mut target_rgba, width, height, range, matrix);
    let _ = nv12_to_rgba(&nv12, &mut target_rgba, width, height, range, matrix);
}

fn fuzz_yuv_422(i_width: u8, i_height: u8, y_value: u8, u_value: u8, v_value: u8, range: YuvRange) {
    let (width, height) = (i_width as u32, i_height as u32);
    let luma = width as usize * height as usize;
    let mut yuyv = Vec::with_capacity(luma * 2);
    for _ in 0..luma / 2 {
        yuyv.extend_from_slice(&[y_value, u_value, y_value, v_value]);
    }
    yuyv.resize(luma * 2, y_value);

    let mut target_rgb = vec![0u8; luma * 3];
    let mut target_rgba = vec![0f32; luma * 4];
    let matrix = YuvStandardMatrix::Bt709;
    let _ = yuyv_to_rgb(&yuyv, &mut target_rgb, width, height, range, matrix);
    let _ = yvyu_to_rgb(&yuyv, &mut target_rgb, width, height, range, matrix);
    let _ = uyvy_to_rgba(&yuyv, &mut target_rgba, width, height, range, matrix);
}
