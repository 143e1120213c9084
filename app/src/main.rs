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
use image::{GenericImageView, ImageReader, RgbaImage};
use std::time::Instant;
use yuvplane::{
    data_channel_capacity, i420_to_nv12, nv12_to_rgba_with_data, rgba_to_i420_with_data,
    YuvPixelFormat, YuvRange, YuvStandardMatrix,
};

fn max_divergence(a: &[u8], b: &[u8]) -> i32 {
    a.chunks_exact(4)
        .zip(b.chunks_exact(4))
        .flat_map(|(a, b)| (0..3).map(move |c| (a[c] as i32 - b[c] as i32).abs()))
        .max()
        .unwrap_or(0)
}

fn main() {
    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "./assets/bench.jpg".to_string());
    let message = args.next().unwrap_or_else(|| "hello from the u plane".to_string());

    let img = ImageReader::open(&input).unwrap().decode().unwrap();
    let (full_width, full_height) = img.dimensions();
    // 4:2:0 needs even dimensions
    let width = full_width & !1;
    let height = full_height & !1;
    let rgba = img.crop_imm(0, 0, width, height).to_rgba8().into_raw();

    let range = YuvRange::Limited;
    let matrix = YuvStandardMatrix::Bt601;
    let capacity = data_channel_capacity(YuvPixelFormat::I420, width, height).unwrap();
    println!("{}x{}, data channel capacity {} bytes", width, height, capacity);

    let mut i420 = vec![0u8; YuvPixelFormat::I420.frame_len(width, height).unwrap()];
    let start = Instant::now();
    let embedded = rgba_to_i420_with_data(
        &rgba,
        &mut i420,
        width,
        height,
        message.as_bytes(),
        false,
        range,
        matrix,
    )
    .unwrap();
    println!("rgba -> i420 with data: {:?}, {} bytes embedded", start.elapsed(), embedded);

    let mut nv12 = vec![0u8; i420.len()];
    let start = Instant::now();
    i420_to_nv12(&i420, &mut nv12, width, height).unwrap();
    println!("i420 -> nv12: {:?}", start.elapsed());

    let mut decoded = vec![0u8; rgba.len()];
    let mut data = vec![0u8; embedded];
    let start = Instant::now();
    let extracted = nv12_to_rgba_with_data(
        &nv12,
        &mut decoded,
        width,
        height,
        &mut data,
        range,
        matrix,
    )
    .unwrap();
    println!("nv12 -> rgba with data: {:?}", start.elapsed());
    println!(
        "extracted {} bytes: {:?}",
        extracted,
        String::from_utf8_lossy(&data[..extracted])
    );
    println!("max divergence {}", max_divergence(&rgba, &decoded));

    RgbaImage::from_raw(width, height, decoded)
        .unwrap()
        .save("converted_nv12.png")
        .unwrap();
}
