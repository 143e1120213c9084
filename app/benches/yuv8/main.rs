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
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use yuvplane::{
    i420_to_rgba, i420_to_nv12, nv12_to_rgba, nv12_to_rgba_with_data, rgb_to_nv12, rgba_to_i420,
    rgba_to_i420_with_data, yuyv_to_rgba, YuvPixelFormat, YuvRange, YuvStandardMatrix,
};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::rng();
    let pixels = WIDTH as usize * HEIGHT as usize;
    let rgba: Vec<u8> = (0..pixels * 4).map(|_| rng.random_range(0..=255u8)).collect();
    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    let rgba_f32: Vec<f32> = rgba.iter().map(|&v| v as f32 / 255f32).collect();
    let payload: Vec<u8> = (0..64).map(|i| i as u8).collect();

    let range = YuvRange::Limited;
    let matrix = YuvStandardMatrix::Bt601;

    let frame_len = YuvPixelFormat::I420.frame_len(WIDTH, HEIGHT).unwrap();
    let mut i420 = vec![0u8; frame_len];
    let mut nv12 = vec![0u8; frame_len];
    rgba_to_i420_with_data(&rgba, &mut i420, WIDTH, HEIGHT, &payload, false, range, matrix)
        .unwrap();
    i420_to_nv12(&i420, &mut nv12, WIDTH, HEIGHT).unwrap();
    let yuyv: Vec<u8> = (0..pixels * 2).map(|_| rng.random_range(0..=255u8)).collect();

    let mut target_rgba = vec![0u8; pixels * 4];
    let mut target_rgba_f32 = vec![0f32; pixels * 4];

    c.bench_function("yuvplane RGBA -> I420", |b| {
        let mut i420 = vec![0u8; frame_len];
        b.iter(|| {
            rgba_to_i420(&rgba, &mut i420, WIDTH, HEIGHT, range, matrix).unwrap();
        })
    });

    c.bench_function("yuvplane RGBA f32 -> I420", |b| {
        let mut i420 = vec![0u8; frame_len];
        b.iter(|| {
            rgba_to_i420(&rgba_f32, &mut i420, WIDTH, HEIGHT, range, matrix).unwrap();
        })
    });

    c.bench_function("yuvplane RGBA -> I420 with data", |b| {
        let mut i420 = vec![0u8; frame_len];
        b.iter(|| {
            rgba_to_i420_with_data(&rgba, &mut i420, WIDTH, HEIGHT, &payload, false, range, matrix)
                .unwrap();
        })
    });

    c.bench_function("yuvplane RGB -> NV12", |b| {
        let mut nv12 = vec![0u8; frame_len];
        b.iter(|| {
            rgb_to_nv12(&rgb, &mut nv12, WIDTH, HEIGHT, range, matrix).unwrap();
        })
    });

    c.bench_function("yuvplane I420 -> RGBA", |b| {
        b.iter(|| {
            i420_to_rgba(&i420, &mut target_rgba, WIDTH, HEIGHT, range, matrix).unwrap();
        })
    });

    c.bench_function("yuvplane I420 -> RGBA f32", |b| {
        b.iter(|| {
            i420_to_rgba(&i420, &mut target_rgba_f32, WIDTH, HEIGHT, range, matrix).unwrap();
        })
    });

    c.bench_function("yuvplane NV12 -> RGBA", |b| {
        b.iter(|| {
            nv12_to_rgba(&nv12, &mut target_rgba, WIDTH, HEIGHT, range, matrix).unwrap();
        })
    });

    c.bench_function("yuvplane NV12 -> RGBA with data", |b| {
        let mut data = vec![0u8; payload.len()];
        b.iter(|| {
            nv12_to_rgba_with_data(
                &nv12,
                &mut target_rgba,
                WIDTH,
                HEIGHT,
                &mut data,
                range,
                matrix,
            )
            .unwrap();
        })
    });

    c.bench_function("yuvplane YUYV -> RGBA", |b| {
        b.iter(|| {
            yuyv_to_rgba(&yuyv, &mut target_rgba, WIDTH, HEIGHT, range, matrix).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
