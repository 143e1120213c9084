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
    rgb_to_i420, rgb_to_nv12, rgba_to_i420, rgba_to_nv12, rgba_to_yv12, YuvPixelFormat,
    YuvRange, YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, f32)| {
    let (width, height) = (data.0 as u32, data.1 as u32);
    let frame_len = match YuvPixelFormat::I420.frame_len(width, height) {
        Ok(len) => len,
        Err(_) => return,
    };
    let pixels = width as usize * height as usize;
    let rgb = [data.2, data.3, data.4].repeat(pixels);
    let rgba = [data.2, data.3, data.4, 255].repeat(pixels);
    // floats are saturated, NaN and infinities included
    let rgba_f32 = [data.5, data.5 * 0.5, -data.5, 1f32].repeat(pixels);

    let mut frame = vec![0u8; frame_len];
    let matrix = YuvStandardMatrix::Bt601;
    let _ = rgb_to_i420(&rgb, &mut frame, width, height, YuvRange::Limited, matrix);
    let _ = rgba_to_i420(&rgba, &mut frame, width, height, YuvRange::Full, matrix);
    let _ = rgba_to_yv12(&rgba_f32, &mut frame, width, height, YuvRange::Limited, matrix);
    let _ = rgb_to_nv12(&rgb, &mut frame, width, height, YuvRange::Full, matrix);
    let _ = rgba_to_nv12(&rgba_f32, &mut frame, width, height, YuvRange::Limited, matrix);
});
