#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, compression: u32, info_size: u32, data_offset: u32) -> Vec<u8> {
    let mut out = b"BM".to_vec();
    out.extend_from_slice(&0u32.to_le_bytes()); // file size (unchecked)
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
    out.extend_from_slice(&data_offset.to_le_bytes());
    out.extend_from_slice(&info_size.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit
    let mut bmp = header(1, 1, 24, 0, 40, 54);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
    fs::write(format!("{dir}/rgb24_1x1.bmp"), bmp).unwrap();

    // 2x2 24-bit top-down
    let mut bmp = header(2, -2, 24, 0, 40, 54);
    bmp.extend_from_slice(&[0xff, 0, 0, 0, 0xff, 0, 0, 0]);
    bmp.extend_from_slice(&[0, 0, 0xff, 0xff, 0xff, 0xff, 0, 0]);
    fs::write(format!("{dir}/rgb24_2x2_topdown.bmp"), bmp).unwrap();

    // 8x1 1-bit with a two-entry palette
    let mut bmp = header(8, 1, 1, 0, 40, 62);
    bmp.extend_from_slice(&[0, 0, 0, 0, 0xff, 0xff, 0xff, 0]);
    bmp.extend_from_slice(&[0b1010_1010, 0, 0, 0]);
    fs::write(format!("{dir}/pal1_8x1.bmp"), bmp).unwrap();

    // 2x2 4-bit
    let mut bmp = header(2, 2, 4, 0, 40, 54 + 64);
    for i in 0..16u8 {
        bmp.extend_from_slice(&[i * 16, i * 8, i * 4, 0]);
    }
    bmp.extend_from_slice(&[0x1f, 0, 0, 0, 0xe2, 0, 0, 0]);
    fs::write(format!("{dir}/pal4_2x2.bmp"), bmp).unwrap();

    // 2x1 8-bit
    let mut bmp = header(2, 1, 8, 0, 40, 54 + 1024);
    for i in 0..=255u8 {
        bmp.extend_from_slice(&[i, i, i, 0]);
    }
    bmp.extend_from_slice(&[7, 200, 0, 0]);
    fs::write(format!("{dir}/pal8_2x1.bmp"), bmp).unwrap();

    // 2x1 16-bit 565
    let mut bmp = header(2, 1, 16, 3, 40, 66);
    for mask in [0xF800u32, 0x07E0, 0x001F] {
        bmp.extend_from_slice(&mask.to_le_bytes());
    }
    bmp.extend_from_slice(&[0x00, 0xF8, 0x1F, 0x00]);
    fs::write(format!("{dir}/rgb565_2x1.bmp"), bmp).unwrap();

    // 1x1 32-bit with alpha mask (56-byte info block)
    let mut bmp = header(1, 1, 32, 3, 56, 70);
    for mask in [0x00FF_0000u32, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000] {
        bmp.extend_from_slice(&mask.to_le_bytes());
    }
    bmp.extend_from_slice(&0x8011_2233u32.to_le_bytes());
    fs::write(format!("{dir}/rgba32_1x1.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/rle8.bmp"), header(4, 4, 8, 1, 40, 54)).unwrap();
    fs::write(format!("{dir}/huge.bmp"), header(i32::MAX, i32::MIN, 24, 0, 40, 54)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
