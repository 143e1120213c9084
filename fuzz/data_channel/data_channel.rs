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
    data_channel_capacity, i420_to_nv12, nv12_to_rgba_with_data, rgba_to_i420_with_data,
    YuvPixelFormat, YuvRange, YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, Vec<u8>)| {
    let (width, height) = ((data.0 as u32) * 2, (data.1 as u32) * 2);
    let capacity = match data_channel_capacity(YuvPixelFormat::I420, width, height) {
        Ok(capacity) => capacity,
        Err(_) => return,
    };
    if capacity == 0 {
        return;
    }
    let payload = &data.3[..data.3.len().min(capacity)];
    let pixels = width as usize * height as usize;
    let rgba = [data.2, data.2 / 2, 255 - data.2, 255].repeat(pixels);

    let range = YuvRange::Limited;
    let matrix = YuvStandardMatrix::Bt601;
    let mut i420 = vec![0u8; YuvPixelFormat::I420.frame_len(width, height).unwrap()];
    let embedded =
        rgba_to_i420_with_data(&rgba, &mut i420, width, height, payload, false, range, matrix)
            .unwrap();
    assert_eq!(embedded, payload.len());

    let mut nv12 = vec![0u8; i420.len()];
    i420_to_nv12(&i420, &mut nv12, width, height).unwrap();

    let mut decoded = vec![0u8; rgba.len()];
    let mut extracted = vec![0u8; payload.len()];
    let count = nv12_to_rgba_with_data(
        &nv12,
        &mut decoded,
        width,
        height,
        &mut extracted,
        range,
        matrix,
    )
    .unwrap();
    assert_eq!(count, payload.len());
    assert_eq!(extracted, payload);
});
