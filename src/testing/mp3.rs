//! Hand-assembled MPEG-1 Layer III streams.
//!
//! Every frame is 48 kHz mono at 128 kbps (384 bytes, no padding, no CRC).
//! Each granule codes at most one spectral line with Huffman table 1, so a
//! toned stream decodes to a steady narrow-band signal and a silent stream
//! to digital zeros. No bit reservoir and no scalefactors are used.

/// Sample rate of generated streams
pub const SAMPLE_RATE: u32 = 48_000;

/// Decoded samples per frame (two granules of 576)
pub const SAMPLES_PER_FRAME: usize = 1152;

/// Bytes per frame: 144 * 128000 / 48000
pub const FRAME_BYTES: usize = 384;

/// Spectral lines per granule
const GRANULE_LINES: usize = 576;

/// Sync, MPEG-1, Layer III, no CRC, 128 kbps, 48 kHz, mono
const HEADER: [u8; 4] = [0xFF, 0xFB, 0x94, 0xC0];

/// Side information size for a mono MPEG-1 frame
const SIDE_INFO_BYTES: usize = 17;

/// Global gain giving a requantization factor of 2^(-2.5)
const GLOBAL_GAIN: u32 = 200;

/// MSB-first bit packer
struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_len: 0,
        }
    }

    fn put(&mut self, value: u32, width: usize) {
        for shift in (0..width).rev() {
            if self.bit_len % 8 == 0 {
                self.bytes.push(0);
            }
            if (value >> shift) & 1 == 1 {
                let idx = self.bit_len / 8;
                self.bytes[idx] |= 0x80 >> (self.bit_len % 8);
            }
            self.bit_len += 1;
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Huffman data for one granule: big_values pair count and the bit string
fn granule_main_data(line: Option<usize>) -> (u32, Vec<(u32, usize)>) {
    let Some(line) = line else {
        return (0, Vec::new());
    };

    let pairs = line / 2 + 1;
    let mut codes = vec![(0b1, 1); pairs - 1];
    if line % 2 == 0 {
        // (x=1, y=0) then a positive sign for x
        codes.push((0b01, 2));
    } else {
        // (x=0, y=1) then a positive sign for y
        codes.push((0b001, 3));
    }
    codes.push((0, 1));
    (pairs as u32, codes)
}

fn frame(line: Option<usize>) -> Vec<u8> {
    let (big_values, codes) = granule_main_data(line);
    let part3_bits: usize = codes.iter().map(|&(_, width)| width).sum();

    let mut side = BitWriter::new();
    side.put(0, 9); // main_data_begin
    side.put(0, 5); // private bits
    side.put(0, 4); // scfsi
    for _granule in 0..2 {
        side.put(part3_bits as u32, 12); // part2_3_length
        side.put(big_values, 9);
        side.put(GLOBAL_GAIN, 8);
        side.put(0, 4); // scalefac_compress: no scalefactor bits
        side.put(0, 1); // window_switching_flag
        for _region in 0..3 {
            side.put(1, 5); // table_select
        }
        side.put(0, 4); // region0_count
        side.put(0, 3); // region1_count
        side.put(0, 1); // preflag
        side.put(0, 1); // scalefac_scale
        side.put(0, 1); // count1table_select
    }

    let mut main = BitWriter::new();
    for _granule in 0..2 {
        for &(code, width) in &codes {
            main.put(code, width);
        }
    }

    let mut bytes = Vec::with_capacity(FRAME_BYTES);
    bytes.extend_from_slice(&HEADER);
    bytes.extend(side.into_bytes());
    debug_assert_eq!(bytes.len(), HEADER.len() + SIDE_INFO_BYTES);
    bytes.extend(main.into_bytes());
    bytes.resize(FRAME_BYTES, 0);
    bytes
}

/// Stream whose every granule carries spectral line `line` (0..576)
///
/// Line `k` sits near `(k + 0.5) * 24000 / 576` Hz.
pub fn tone(frame_count: usize, line: usize) -> Vec<u8> {
    let line = line.min(GRANULE_LINES - 1);
    frame(Some(line)).repeat(frame_count)
}

/// Stream of valid frames that decode to digital silence
pub fn silence(frame_count: usize) -> Vec<u8> {
    frame(None).repeat(frame_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let bytes = tone(3, 26);
        assert_eq!(bytes.len(), 3 * FRAME_BYTES);
        for frame in bytes.chunks(FRAME_BYTES) {
            assert_eq!(&frame[..4], &HEADER);
        }
        assert_eq!(silence(2).len(), 2 * FRAME_BYTES);
    }

    #[test]
    fn test_side_info_fields() {
        let bytes = frame(Some(26));
        // 13 zero pairs (1 bit each) plus "01" and a sign bit
        let part2_3_length = ((bytes[6] as u16 & 0x3F) << 6) | (bytes[7] as u16 >> 2);
        assert_eq!(part2_3_length, 16);

        // Each granule: thirteen 1s then "010", packed as 0xFF 0xFA
        let main = &bytes[4 + SIDE_INFO_BYTES..4 + SIDE_INFO_BYTES + 4];
        assert_eq!(main, &[0xFF, 0xFA, 0xFF, 0xFA]);
    }

    #[test]
    fn test_silent_frame_has_no_main_data() {
        let bytes = frame(None);
        assert!(bytes[4 + SIDE_INFO_BYTES..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bit_writer_packs_msb_first() {
        let mut writer = BitWriter::new();
        writer.put(0b101, 3);
        writer.put(0b11111, 5);
        writer.put(1, 1);
        assert_eq!(writer.into_bytes(), vec![0b1011_1111, 0b1000_0000]);
    }
}
