#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpread::{DecodeRequest, ImageInfo, Limits, LoadFlags};

fuzz_target!(|data: &[u8]| {
    // Probe and decode under every flag combination; must never panic
    let _ = ImageInfo::from_bytes(data);

    let limits = Limits {
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };
    for bits in 0..16u32 {
        let flags = LoadFlags::from_bits_truncate(bits);
        if let Ok(img) = DecodeRequest::new(flags).with_limits(&limits).decode_bytes(data) {
            assert_eq!(img.pixels().len(), img.row_stride() * img.height as usize);
            assert!(img.rows().all(|row| row.len() == img.row_bytes()));
        }
    }
});
