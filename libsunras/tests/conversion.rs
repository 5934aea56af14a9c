use std::{fs, io::Cursor};

mod common;
use common::{decode_rle, mixed_plane, with_tifiles_header, IMAGE_NAME};
use itertools::iproduct;
use libsunras::{
    build_header, convert, convert_files, raster::raw::encode_rle, Advisory, Encoding, Framing,
    Plane, PLANE_SIZE,
};
use mktemp::Temp;

fn encode(data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_rle(data, &mut out)?;
    Ok(out)
}

#[test]
fn incompressible_input_is_unchanged() -> anyhow::Result<()> {
    // no marker byte and never more than two equal bytes in a row
    let data: Vec<u8> = (0..PLANE_SIZE)
        .map(|i| ((i / 2) % 0x7F) as u8)
        .collect();
    assert_eq!(encode(&data)?, data);
    Ok(())
}

#[test]
fn single_runs() -> anyhow::Result<()> {
    for (value, len) in iproduct!([0x00u8, 0x01, 0x7F, 0x81, 0xFF], 3..=256usize) {
        let count = u8::try_from(len - 1)?;
        assert_eq!(encode(&vec![value; len])?, [0x80, count, value]);
    }
    assert_eq!(encode(&[0x80])?, [0x80, 0x00]);
    Ok(())
}

#[test]
fn reference_decoder_round_trip() -> anyhow::Result<()> {
    for (value, len) in iproduct!([0x00u8, 0x80, 0xC3], [1usize, 2, 255, 256, 257, 513, 6144]) {
        let data = vec![value; len];
        assert_eq!(decode_rle(&encode(&data)?), data, "{len} x {value:#04x}");
    }
    let data = mixed_plane(PLANE_SIZE);
    assert_eq!(decode_rle(&encode(&data)?), data);
    Ok(())
}

#[test]
fn all_zero_planes() -> anyhow::Result<()> {
    let plane = vec![0u8; PLANE_SIZE];
    let mut output = Cursor::new(Vec::new());
    let report = convert(
        Cursor::new(&plane),
        Cursor::new(&plane),
        &mut output,
        Encoding::Rle,
    )?;
    // 6144 = 24 * 256
    assert_eq!(report.colormap.length, 72);
    assert_eq!(report.bitmap.length, 72);
    assert!(report.advisories().is_empty());

    let output = output.into_inner();
    assert_eq!(output.len(), 32 + 72 + 72);
    assert_eq!(output[16..20], 72u32.to_be_bytes());
    assert_eq!(output[28..32], 72u32.to_be_bytes());
    for token in output[32..].chunks(3) {
        assert_eq!(token, [0x80, 0xFF, 0x00]);
    }

    // every other header byte is the placeholder's
    let placeholder = build_header(true);
    assert_eq!(output[..16], placeholder[..16]);
    assert_eq!(output[20..28], placeholder[20..28]);
    Ok(())
}

#[test]
fn tifiles_header_is_excluded() -> anyhow::Result<()> {
    let colormap = mixed_plane(PLANE_SIZE);
    let bitmap: Vec<u8> = (0..PLANE_SIZE).map(|i| (i % 0x7B) as u8).collect();
    let mut output = Cursor::new(Vec::new());
    let report = convert(
        Cursor::new(with_tifiles_header(&colormap)),
        Cursor::new(&bitmap),
        &mut output,
        Encoding::Raw,
    )?;
    assert_eq!(report.colormap.framing, Framing::TiFiles);
    assert_eq!(report.bitmap.framing, Framing::Raw);
    assert_eq!(report.colormap.length, 6144);
    assert!(report.advisories().is_empty());

    let output = output.into_inner();
    assert_eq!(output[32..32 + PLANE_SIZE], colormap[..]);
    assert_eq!(output[32 + PLANE_SIZE..], bitmap[..]);
    Ok(())
}

#[test]
fn compressed_tifiles_plane_decodes() -> anyhow::Result<()> {
    let bitmap = mixed_plane(PLANE_SIZE);
    let mut output = Cursor::new(Vec::new());
    let report = convert(
        Cursor::new(with_tifiles_header(&[0x11; PLANE_SIZE])),
        Cursor::new(with_tifiles_header(&bitmap)),
        &mut output,
        Encoding::Rle,
    )?;
    let output = output.into_inner();
    let colormap_end = 32 + report.colormap.length as usize;
    assert_eq!(decode_rle(&output[32..colormap_end]), [0x11; PLANE_SIZE]);
    assert_eq!(decode_rle(&output[colormap_end..]), bitmap);
    assert_eq!(output.len(), colormap_end + report.bitmap.length as usize);
    Ok(())
}

#[test]
fn high_entropy_input_is_flagged() -> anyhow::Result<()> {
    // isolated markers double in size
    let plane: Vec<u8> = (0..PLANE_SIZE)
        .map(|i| if i % 2 == 0 { 0x80 } else { 0x01 })
        .collect();
    let report = convert(
        Cursor::new(&plane),
        Cursor::new(&plane),
        Cursor::new(Vec::new()),
        Encoding::Rle,
    )?;
    assert_eq!(report.bitmap.length, 9216);
    assert!(report.is_expanded());
    assert_eq!(
        report.advisories().last(),
        Some(&Advisory::TotalExpanded { total: 18432 })
    );
    Ok(())
}

#[test]
fn short_raw_plane_is_flagged() -> anyhow::Result<()> {
    let report = convert(
        Cursor::new(vec![1u8; 100]),
        Cursor::new(vec![2u8; PLANE_SIZE]),
        Cursor::new(Vec::new()),
        Encoding::Raw,
    )?;
    assert_eq!(
        report.advisories(),
        [Advisory::UnexpectedPlaneSize {
            plane: Plane::ColorMap,
            length: 100
        }]
    );
    Ok(())
}

#[test]
fn files_match_in_memory_conversion() -> anyhow::Result<()> {
    let dir = Temp::new_dir()?;
    let colormap = with_tifiles_header(&mixed_plane(PLANE_SIZE));
    let bitmap = mixed_plane(PLANE_SIZE - 7);
    let colormap_path = dir.join(format!("{IMAGE_NAME}.TIAC"));
    let bitmap_path = dir.join(format!("{IMAGE_NAME}.TIAP"));
    let output_path = dir.join(format!("{IMAGE_NAME}.ras"));
    fs::write(&colormap_path, &colormap)?;
    fs::write(&bitmap_path, &bitmap)?;

    let report = convert_files(&colormap_path, &bitmap_path, &output_path, Encoding::Rle)?;

    let mut expected = Cursor::new(Vec::new());
    let expected_report = convert(
        Cursor::new(&colormap),
        Cursor::new(&bitmap),
        &mut expected,
        Encoding::Rle,
    )?;
    assert_eq!(report, expected_report);

    let expected_path = dir.join("expected.ras");
    fs::write(&expected_path, expected.into_inner())?;
    let hash_1 = sha256::try_digest(output_path.as_path())?;
    let hash_2 = sha256::try_digest(expected_path.as_path())?;
    assert_eq!(hash_1, hash_2);
    Ok(())
}

#[test]
fn missing_input_is_reported() -> anyhow::Result<()> {
    let dir = Temp::new_dir()?;
    let missing = dir.join("MISSING.TIAC");
    let err = convert_files(&missing, &missing, dir.join("out.ras"), Encoding::Raw).unwrap_err();
    assert!(err.to_string().contains("MISSING.TIAC"));
    Ok(())
}
