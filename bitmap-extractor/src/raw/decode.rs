use crate::{bitstream::Bitstream, error::Result, mode::BitDepth, raster::Raster};

/// Returns `bytes` without its trailing `0x00` bytes.
pub fn strip_trailing_zeros(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |last| last + 1);
    &bytes[..end]
}

pub fn decode(bytes: &[u8], width: usize, mode: BitDepth) -> Result<Raster> {
    let data = strip_trailing_zeros(bytes);
    log::debug!(
        "Decoding {} byte(s) ({} stripped) as {mode} at width {width}",
        data.len(),
        bytes.len() - data.len()
    );

    let pixels = match mode {
        BitDepth::OneBit => Bitstream::new(data).map(|bit| bit * 255).collect(),
        BitDepth::EightBit => data.to_vec(),
    };

    let raster = Raster::from_pixels(width, pixels)?;
    log::debug!("Decoded {}x{} raster", raster.width(), raster.height());
    Ok(raster)
}

#[cfg(test)]
fn unpack_bits(raster: &Raster) -> Vec<u8> {
    raster.as_bytes().iter().map(|&v| (v == 255) as u8).collect()
}

#[test]
fn strips_only_trailing_zero_bytes() {
    assert_eq!(strip_trailing_zeros(&[0, 1, 0, 2, 0, 0]), &[0, 1, 0, 2]);
    assert_eq!(strip_trailing_zeros(&[0x0F]), &[0x0F]);
    assert!(strip_trailing_zeros(&[0, 0, 0]).is_empty());
    assert!(strip_trailing_zeros(&[]).is_empty());
}

#[test]
fn one_bit_scenario() {
    let raster = decode(&[0xFF, 0x00, 0x0F], 4, BitDepth::OneBit).unwrap();
    assert_eq!(raster.width(), 4);
    assert_eq!(raster.height(), 6);
    assert_eq!(
        unpack_bits(&raster),
        vec![1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1]
    );
    assert_eq!(raster.row(0), Some(&[255; 4][..]));
    assert_eq!(raster.row(1), Some(&[255; 4][..]));
    assert_eq!(raster.row(2), Some(&[0; 4][..]));
    assert_eq!(raster.row(3), Some(&[0; 4][..]));
    assert_eq!(raster.row(4), Some(&[0; 4][..]));
    assert_eq!(raster.row(5), Some(&[255; 4][..]));
}

#[test]
fn one_bit_values_are_black_or_white() {
    let bytes: Vec<u8> = (1..=64).map(|i: u8| i.wrapping_mul(37)).collect();
    let raster = decode(&bytes, 7, BitDepth::OneBit).unwrap();
    assert!(raster.as_bytes().iter().all(|&v| v == 0 || v == 255));

    let mut stream = Bitstream::new(&bytes);
    for &pixel in raster.as_bytes() {
        assert_eq!(stream.read_bit(), Some((pixel == 255) as u8));
    }
}

#[cfg(test)]
fn sample_inputs() -> Vec<Vec<u8>> {
    // xorshift keeps the samples deterministic
    let mut state: u32 = 0x9E37_79B9;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    let mut inputs: Vec<Vec<u8>> = (0..24).map(|len| (0..len).map(|_| next()).collect()).collect();
    inputs.push(vec![7, 0, 0, 0]);
    inputs.push(vec![0, 0, 9]);
    inputs
}

#[test]
fn eight_bit_maps_bytes_to_pixels() {
    for bytes in sample_inputs() {
        let stripped = strip_trailing_zeros(&bytes);
        for width in 1..=9 {
            let height = stripped.len() / width;
            let raster = match decode(&bytes, width, BitDepth::EightBit) {
                Ok(raster) => raster,
                Err(crate::error::Error::EmptyRaster { pixels, .. }) => {
                    assert_eq!(height, 0, "{bytes:?} at width {width}");
                    assert_eq!(pixels, stripped.len());
                    continue;
                }
                Err(err) => panic!("{bytes:?} at width {width}: {err}"),
            };
            assert_eq!((raster.width(), raster.height()), (width, height));
            for r in 0..height {
                for c in 0..width {
                    assert_eq!(raster.get(c, r), Some(stripped[r * width + c]));
                }
            }
        }
    }
}

#[test]
fn one_bit_follows_the_bit_stream() {
    for bytes in sample_inputs() {
        let stripped = strip_trailing_zeros(&bytes);
        for width in [1, 3, 7, 8, 9, 13, 24] {
            let height = stripped.len() * 8 / width;
            let Ok(raster) = decode(&bytes, width, BitDepth::OneBit) else {
                assert_eq!(height, 0, "{bytes:?} at width {width}");
                continue;
            };
            assert_eq!(raster.height(), height);
            assert!(raster.as_bytes().iter().all(|&v| v == 0 || v == 255));
            let bits: Vec<u8> = Bitstream::new(stripped).take(width * height).collect();
            assert_eq!(unpack_bits(&raster), bits);
        }
    }
}

#[test]
fn interior_zero_bytes_are_kept() {
    let raster = decode(&[0, 0, 5, 0], 1, BitDepth::EightBit).unwrap();
    assert_eq!(raster.as_bytes(), &[0, 0, 5]);
}

#[test]
fn degenerate_inputs_are_reported() {
    use crate::error::Error;

    assert!(matches!(
        decode(&[1, 2, 3], 0, BitDepth::EightBit),
        Err(Error::InvalidWidth(_))
    ));
    assert!(matches!(
        decode(&[0, 0, 0], 1, BitDepth::EightBit),
        Err(Error::EmptyRaster { pixels: 0, .. })
    ));
    assert!(matches!(
        decode(&[0xFF], 9, BitDepth::OneBit),
        Err(Error::EmptyRaster {
            pixels: 8,
            width: 9
        })
    ));
}
