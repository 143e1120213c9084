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
use rand::Rng;
use yuvplane::*;

const RANGE: YuvRange = YuvRange::Limited;
const MATRIX: YuvStandardMatrix = YuvStandardMatrix::Bt601;

fn random_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..width * height * 4)
        .map(|_| rng.random_range(0..=255u8))
        .collect()
}

fn embed(rgba: &[u8], width: u32, height: u32, data: &[u8], flip: bool) -> (Vec<u8>, usize) {
    let mut i420 = vec![0u8; YuvPixelFormat::I420.frame_len(width, height).unwrap()];
    let embedded =
        rgba_to_i420_with_data(rgba, &mut i420, width, height, data, flip, RANGE, MATRIX).unwrap();
    (i420, embedded)
}

/// Reverses the row order of every plane of an I420 frame.
fn flip_i420(i420: &[u8], width: usize, height: usize) -> Vec<u8> {
    let luma = width * height;
    let chroma = luma / 4;
    let mut flipped = Vec::with_capacity(i420.len());
    for row in i420[..luma].chunks_exact(width).rev() {
        flipped.extend_from_slice(row);
    }
    for plane in [&i420[luma..luma + chroma], &i420[luma + chroma..]] {
        for row in plane.chunks_exact(width / 2).rev() {
            flipped.extend_from_slice(row);
        }
    }
    flipped
}

#[test]
fn payload_survives_i420_to_nv12_round_trip() {
    let (width, height) = (64u32, 64u32);
    let payload = [0x00u8, 0xFF, 0x55, 0xAA];
    let rgba = random_rgba(width as usize, height as usize);
    let (i420, embedded) = embed(&rgba, width, height, &payload, false);
    assert_eq!(embedded, payload.len());

    let mut nv12 = vec![0u8; i420.len()];
    i420_to_nv12(&i420, &mut nv12, width, height).unwrap();

    let mut rgba_out = vec![0u8; rgba.len()];
    let mut data = [0u8; 4];
    let extracted =
        nv12_to_rgba_with_data(&nv12, &mut rgba_out, width, height, &mut data, RANGE, MATRIX)
            .unwrap();
    assert_eq!(extracted, 4);
    assert_eq!(data, payload);

    let whole = nv12_extract_data(&nv12, width, height).unwrap();
    assert_eq!(whole.len(), data_channel_capacity(YuvPixelFormat::Nv12, width, height).unwrap());
    assert_eq!(whole[..4], payload);
}

#[test]
fn payload_readable_from_i420() {
    let (width, height) = (64u32, 32u32);
    let payload = b"yuv!";
    let rgba = random_rgba(width as usize, height as usize);
    let (i420, _) = embed(&rgba, width, height, payload, false);
    let mut rgba_out = vec![0f32; rgba.len()];
    let mut data = [0u8; 4];
    let extracted =
        i420_to_rgba_with_data(&i420, &mut rgba_out, width, height, &mut data, RANGE, MATRIX)
            .unwrap();
    assert_eq!(extracted, 4);
    assert_eq!(&data, payload);
}

#[test]
fn payload_survives_noisy_chroma() {
    let (width, height) = (64u32, 64u32);
    let payload = [0x00u8, 0xFF, 0x55, 0xAA, 0x3C];
    let rgba = random_rgba(width as usize, height as usize);
    let (mut i420, embedded) = embed(&rgba, width, height, &payload, false);
    assert_eq!(embedded, payload.len());

    // lossy storage shifts every sample by up to 20 levels
    let mut rng = rand::rng();
    for sample in i420.iter_mut() {
        let noise: i32 = rng.random_range(-20..=20);
        *sample = (*sample as i32 + noise).clamp(0, 255) as u8;
    }

    let mut rgba_out = vec![0u8; rgba.len()];
    let mut data = [0u8; 5];
    let extracted =
        i420_to_rgba_with_data(&i420, &mut rgba_out, width, height, &mut data, RANGE, MATRIX)
            .unwrap();
    assert_eq!(extracted, payload.len());
    assert_eq!(data, payload);

    let mut nv12 = vec![0u8; i420.len()];
    i420_to_nv12(&i420, &mut nv12, width, height).unwrap();
    assert_eq!(nv12_extract_data(&nv12, width, height).unwrap()[..5], payload);
}

#[test]
fn shorter_target_reads_prefix() {
    let (width, height) = (64u32, 64u32);
    let payload = [0x12u8, 0x34, 0x56, 0x78];
    let (i420, _) = embed(&random_rgba(64, 64), width, height, &payload, false);
    let mut nv12 = vec![0u8; i420.len()];
    i420_to_nv12(&i420, &mut nv12, width, height).unwrap();
    let mut rgba_out = vec![0u8; 64 * 64 * 4];
    let mut data = [0u8; 2];
    let extracted =
        nv12_to_rgba_with_data(&nv12, &mut rgba_out, width, height, &mut data, RANGE, MATRIX)
            .unwrap();
    assert_eq!(extracted, 2);
    assert_eq!(data, [0x12, 0x34]);
}

#[test]
fn flip_encoding_reads_back_after_flipping_frame() {
    let (width, height) = (64usize, 64usize);
    let payload = [0x00u8, 0xFF, 0x55, 0xAA];
    let rgba = random_rgba(width, height);
    let (flipped_encode, _) = embed(&rgba, width as u32, height as u32, &payload, true);
    let (plain_encode, _) = embed(&rgba, width as u32, height as u32, &payload, false);

    let read = |frame: &[u8]| -> [u8; 4] {
        let mut rgba_out = vec![0u8; width * height * 4];
        let mut data = [0u8; 4];
        i420_to_rgba_with_data(
            frame,
            &mut rgba_out,
            width as u32,
            height as u32,
            &mut data,
            RANGE,
            MATRIX,
        )
        .unwrap();
        data
    };

    let reflipped = flip_i420(&flipped_encode, width, height);
    assert_eq!(read(&reflipped), read(&plain_encode));
    assert_eq!(read(&reflipped), payload);
}

#[test]
fn packed_formats_have_no_data_channel() {
    let err = data_channel_capacity(YuvPixelFormat::Uyvy, 64, 64).unwrap_err();
    assert_eq!(err.kind(), YuvErrorKind::UnsupportedCombination);
    assert_eq!(data_channel_capacity(YuvPixelFormat::Yv12, 64, 64).unwrap(), 32);
}

#[cfg(not(feature = "strict_capacity"))]
#[test]
fn oversized_payload_is_truncated_deterministically() {
    let (width, height) = (16u32, 16u32);
    let capacity = data_channel_capacity(YuvPixelFormat::I420, width, height).unwrap();
    assert_eq!(capacity, 2);
    let rgba = random_rgba(16, 16);
    let payload = [0xC3u8, 0x5A, 0x99, 0x01];

    let (first, embedded_first) = embed(&rgba, width, height, &payload, false);
    let (second, embedded_second) = embed(&rgba, width, height, &payload, false);
    assert_eq!(embedded_first, capacity);
    assert_eq!(embedded_second, capacity);
    assert_eq!(first, second);

    let mut nv12 = vec![0u8; first.len()];
    i420_to_nv12(&first, &mut nv12, width, height).unwrap();
    let mut rgba_out = vec![0u8; rgba.len()];
    let mut data = [0xEEu8; 4];
    let extracted =
        nv12_to_rgba_with_data(&nv12, &mut rgba_out, width, height, &mut data, RANGE, MATRIX)
            .unwrap();
    assert_eq!(extracted, capacity);
    assert_eq!(data, [0xC3, 0x5A, 0xEE, 0xEE]);
}

#[cfg(feature = "strict_capacity")]
#[test]
fn oversized_payload_is_rejected() {
    let (width, height) = (16u32, 16u32);
    let rgba = random_rgba(16, 16);
    let mut i420 = vec![0x11u8; YuvPixelFormat::I420.frame_len(width, height).unwrap()];
    let err = rgba_to_i420_with_data(
        &rgba,
        &mut i420,
        width,
        height,
        &[1, 2, 3],
        false,
        RANGE,
        MATRIX,
    )
    .unwrap_err();
    assert_eq!(err.kind(), YuvErrorKind::CapacityExceeded);
    assert!(i420.iter().all(|&v| v == 0x11));
}
