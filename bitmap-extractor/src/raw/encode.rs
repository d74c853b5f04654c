use crate::{bitstream::BitWriter, mode::BitDepth, raster::Raster};

/// Intensities above this value become a set bit in 1-bit output.
const ONE_BIT_THRESHOLD: u8 = 127;

pub fn encode(raster: &Raster, mode: BitDepth) -> Vec<u8> {
    let pixels = raster.as_bytes();
    match mode {
        BitDepth::OneBit => {
            let mut writer = BitWriter::with_capacity(pixels.len());
            for &pixel in pixels {
                writer.write_bit((pixel > ONE_BIT_THRESHOLD) as u8);
            }
            writer.finish()
        }
        BitDepth::EightBit => pixels.to_vec(),
    }
}

#[test]
fn eight_bit_copies_intensities() {
    let raster = Raster::new(2, 2, vec![0, 127, 128, 255]).unwrap();
    assert_eq!(encode(&raster, BitDepth::EightBit), vec![0, 127, 128, 255]);
}

#[test]
fn one_bit_thresholds_above_127() {
    let raster = Raster::new(4, 2, vec![0, 127, 128, 255, 200, 1, 255, 126]).unwrap();
    assert_eq!(encode(&raster, BitDepth::OneBit), vec![0b0011_1010]);
}

#[test]
fn one_bit_pads_final_byte() {
    let raster = Raster::new(5, 2, vec![255; 10]).unwrap();
    let bytes = encode(&raster, BitDepth::OneBit);
    assert_eq!(bytes.len(), 2);
    assert_eq!(bytes, vec![0xFF, 0b1100_0000]);
}

#[test]
fn round_trips_decoded_rasters() {
    use super::decode::{decode, strip_trailing_zeros};

    let bytes = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 0, 0];
    let raster = decode(&bytes, 4, BitDepth::EightBit).unwrap();
    let stripped = strip_trailing_zeros(&bytes);
    assert_eq!(encode(&raster, BitDepth::EightBit), &stripped[..8]);

    let bits = [0xA5, 0x3C, 0xF0];
    let raster = decode(&bits, 8, BitDepth::OneBit).unwrap();
    assert_eq!(encode(&raster, BitDepth::OneBit), bits.to_vec());

    // 24 bits at width 5 keep 20 pixels; the last byte is zero padded
    let raster = decode(&bits, 5, BitDepth::OneBit).unwrap();
    assert_eq!(encode(&raster, BitDepth::OneBit), vec![0xA5, 0x3C, 0xF0]);
}

#[test]
fn round_trips_across_widths() {
    use super::decode::{decode, strip_trailing_zeros};
    use crate::bitstream::Bitstream;

    let inputs: Vec<Vec<u8>> = (1..=17u8)
        .map(|len| (0..len).map(|i| i.wrapping_mul(73).wrapping_add(len)).collect())
        .collect();
    for bytes in &inputs {
        let stripped = strip_trailing_zeros(bytes);
        for width in 1..=stripped.len() + 1 {
            let kept = stripped.len() / width * width;
            match decode(bytes, width, BitDepth::EightBit) {
                Ok(raster) => assert_eq!(encode(&raster, BitDepth::EightBit), &stripped[..kept]),
                Err(_) => assert_eq!(kept, 0, "{bytes:?} at width {width}"),
            }

            let kept_bits = stripped.len() * 8 / width * width;
            let raster = decode(bytes, width, BitDepth::OneBit).unwrap();
            let packed = encode(&raster, BitDepth::OneBit);
            assert_eq!(packed.len(), kept_bits.div_ceil(8));
            let expected: Vec<u8> = Bitstream::new(stripped).take(kept_bits).collect();
            let actual: Vec<u8> = Bitstream::new(&packed).collect();
            assert_eq!(&actual[..kept_bits], expected.as_slice());
            assert!(actual[kept_bits..].iter().all(|&bit| bit == 0));
        }
    }
}
