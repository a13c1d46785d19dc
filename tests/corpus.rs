//! Test corpus: pattern images across widths and depths, plus the
//! bmp-conformance sweep.

mod common;

use common::*;
use zenbmpread::*;

/// Pack palette indices into a file line, MSB first.
fn pack_indices(indices: &[u8], bits: u16) -> Vec<u8> {
    let per_byte = 8 / bits as usize;
    indices
        .chunks(per_byte)
        .map(|chunk| {
            chunk.iter().enumerate().fold(0u8, |byte, (i, &idx)| {
                byte | idx << (8 - bits as usize * (i + 1))
            })
        })
        .collect()
}

// ── Indexed images at every width around a byte/word boundary ────────

#[test]
fn indexed_widths_decode_exactly() {
    for bits in [1u16, 4, 8] {
        let palette = ramp_palette(bits);
        let max_index = (1u32 << bits) - 1;
        for width in 1..=17usize {
            let height = 3usize;
            let indices: Vec<Vec<u8>> = (0..height)
                .map(|y| {
                    (0..width)
                        .map(|x| ((x * 7 + y * 3) as u32 % (max_index + 1)) as u8)
                        .collect()
                })
                .collect();
            let rows = indices.iter().map(|line| pack_indices(line, bits)).collect();
            let file = BmpFile::new(width as i32, -(height as i32), bits, rows)
                .with_palette(palette.clone());

            let img = DecodeRequest::new(
                LoadFlags::ANY_SIZE | LoadFlags::TOP_DOWN | LoadFlags::BYTE_ALIGN,
            )
            .decode_bytes(&file.encode())
            .unwrap_or_else(|e| panic!("{bits}-bit width {width}: {e}"));

            assert_eq!(img.row_stride(), width * 3);
            for (row, line) in img.rows().zip(&indices) {
                for (px, &idx) in row.chunks_exact(3).zip(line) {
                    let [b, g, r, _] = palette[usize::from(idx)];
                    assert_eq!(px, [r, g, b], "{bits}-bit width {width} index {idx}");
                }
            }
        }
    }
}

#[test]
fn rgb24_patterns_all_flag_combinations() {
    let patterns = [
        (8usize, 4usize, checkerboard(8, 4)),
        (7, 5, noise_pattern(7, 5)),
        (1, 1, noise_pattern(1, 1)),
    ];
    for (w, h, lines) in &patterns {
        let file = BmpFile::bgr24(*w as i32, *h as i32, lines);
        let data = file.encode();
        for bits in 0..16u32 {
            let flags = LoadFlags::from_bits_truncate(bits) | LoadFlags::ANY_SIZE;
            let img = DecodeRequest::new(flags).decode_bytes(&data).unwrap();
            let channels = if flags.contains(LoadFlags::ALPHA) { 4 } else { 3 };
            let stride = if flags.contains(LoadFlags::BYTE_ALIGN) {
                w * channels
            } else {
                (w * channels + 3) & !3
            };
            assert_eq!(img.row_stride(), stride, "{w}x{h} {flags:?}");
            assert_eq!(img.pixels().len(), stride * h);

            // bottom-up file: TOP_DOWN output reverses file order
            let reverse = flags.contains(LoadFlags::TOP_DOWN);
            let file_rows: Vec<&Vec<[u8; 3]>> = if reverse {
                lines.iter().rev().collect()
            } else {
                lines.iter().collect()
            };
            for (row, line) in img.rows().zip(file_rows) {
                for (px, [b, g, r]) in row.chunks_exact(channels).zip(line) {
                    assert_eq!(&px[..3], &[*r, *g, *b]);
                    if channels == 4 {
                        assert_eq!(px[3], 255);
                    }
                }
            }
        }
    }
}

// ── BMP conformance corpus tests (codec-corpus crate) ────────────────

#[cfg(not(target_arch = "wasm32"))]
mod bmp_corpus {
    use zenbmpread::*;

    fn get_corpus(subdir: &str) -> Option<std::path::PathBuf> {
        let corpus = codec_corpus::Corpus::new().ok()?;
        corpus.get(&format!("bmp-conformance/{subdir}")).ok()
    }

    fn bmp_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
        let mut files: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "bmp"))
            .collect();
        files.sort();
        files
    }

    fn file_name(p: &std::path::Path) -> String {
        p.file_name().unwrap().to_string_lossy().into_owned()
    }

    /// Every file in the subdirectory loads or fails cleanly under every
    /// flag combination. Returns (decoded, rejected) counts for the
    /// permissive flag set.
    fn sweep(subdir: &str) -> Option<(u32, u32)> {
        let dir = get_corpus(subdir)?;
        let files = bmp_files(&dir);
        assert!(!files.is_empty(), "no BMP files found in {subdir}/");

        let limits = Limits {
            max_memory_bytes: Some(256 * 1024 * 1024),
            ..Default::default()
        };
        let mut decoded = 0u32;
        let mut rejected = 0u32;
        for path in &files {
            for bits in 0..16u32 {
                let flags = LoadFlags::from_bits_truncate(bits);
                let result = DecodeRequest::new(flags).with_limits(&limits).load(path);
                if flags == LoadFlags::all() {
                    match result {
                        Ok(img) => {
                            decoded += 1;
                            assert_eq!(img.pixels().len(), img.row_stride() * img.height as usize);
                        }
                        Err(e) => {
                            rejected += 1;
                            eprintln!("{}: {e}", file_name(path));
                        }
                    }
                }
            }
        }
        eprintln!("{subdir}/: {decoded} decoded, {rejected} rejected");
        Some((decoded, rejected))
    }

    #[test]
    #[ignore]
    fn valid_files_never_panic() {
        let Some((decoded, _)) = sweep("valid") else {
            eprintln!("Skipping: bmp-conformance corpus not available");
            return;
        };
        assert!(decoded > 0, "no valid/ file decoded");
    }

    #[test]
    #[ignore]
    fn non_conformant_files_never_panic() {
        if sweep("non-conformant").is_none() {
            eprintln!("Skipping: bmp-conformance corpus not available");
        }
    }

    #[test]
    #[ignore]
    fn invalid_files_never_panic() {
        if sweep("invalid").is_none() {
            eprintln!("Skipping: bmp-conformance corpus not available");
        }
    }

    /// Probing agrees with decoding about which variants are out of scope.
    #[test]
    #[ignore]
    fn unsupported_variants_are_rejected() {
        let Some(dir) = get_corpus("valid") else {
            eprintln!("Skipping: bmp-conformance corpus not available");
            return;
        };
        for path in bmp_files(&dir) {
            let Ok(info) = probe(&path) else { continue };
            if !info.is_supported() {
                assert!(
                    matches!(
                        load(&path, LoadFlags::all()),
                        Err(BmpError::UnsupportedVariant { .. })
                    ),
                    "{} should be rejected",
                    file_name(&path)
                );
            }
        }
    }
}
