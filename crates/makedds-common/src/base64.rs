//! Single-line base64 encoding with `=` padding, and a lenient decoder.
//!
//! The decoder skips any byte outside the standard alphabet, so wrapped or
//! whitespace-separated input decodes the same as the unbroken form.

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const INVALID: u8 = 0xFF;

const INDICES: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Encoded length (without any terminator) and pad count for `binary_len` input bytes.
pub const fn encoded_size(binary_len: usize) -> (usize, usize) {
    let rem = binary_len % 3;
    let pad = if rem != 0 { 3 - rem } else { 0 };
    (((binary_len + pad) / 3) * 4, pad)
}

/// Upper bound on the decoded length of `encoded_len` characters carrying `pad` padding bytes.
pub const fn decoded_size(encoded_len: usize, pad: usize) -> usize {
    ((3 * encoded_len) / 4).saturating_sub(pad)
}

/// Decoded length of `src`, inspecting up to two trailing `=` characters.
pub fn decoded_size_of(src: &[u8]) -> usize {
    let pad = src.iter().rev().take(2).take_while(|&&b| b == b'=').count();
    decoded_size(src.len(), pad)
}

/// Encode `src` as a single line of base64.
pub fn encode(src: &[u8]) -> String {
    let (len, _) = encoded_size(src.len());
    let mut out = String::with_capacity(len);

    for chunk in src.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);

        out.push(ALPHABET[(b0 >> 2) as usize] as char);
        out.push(ALPHABET[(((b0 & 0x03) << 4) | (b1 >> 4)) as usize] as char);
        if chunk.len() > 1 {
            out.push(ALPHABET[(((b1 & 0x0F) << 2) | (b2 >> 6)) as usize] as char);
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(ALPHABET[(b2 & 0x3F) as usize] as char);
        } else {
            out.push('=');
        }
    }

    out
}

/// Decode base64 text.
///
/// Characters outside the alphabet are ignored, as is `=` in the first two
/// positions of a quartet. Decoding stops after the first quartet that
/// carries padding; an incomplete trailing quartet is dropped.
pub fn decode(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(decoded_size_of(src));
    let mut quad = [0u8; 4];
    let mut filled = 0;
    let mut pad = 0;

    for &ch in src {
        if ch == b'=' {
            if filled < 2 {
                continue;
            }
            quad[filled] = 0;
            pad += 1;
        } else {
            let index = INDICES[ch as usize];
            if index == INVALID {
                continue;
            }
            quad[filled] = index;
            pad = 0;
        }
        filled += 1;

        if filled == 4 {
            filled = 0;
            out.push((quad[0] << 2) | ((quad[1] & 0x30) >> 4));
            if pad < 2 {
                out.push(((quad[1] & 0x0F) << 4) | ((quad[2] & 0x3C) >> 2));
                if pad < 1 {
                    out.push(((quad[2] & 0x03) << 6) | quad[3]);
                }
            }
            if pad != 0 {
                break;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_padding_only_in_last_two_positions() {
        assert!(decode(b"====").is_empty());
        assert!(decode(b"Z===").is_empty());
        assert_eq!(decode(b"==Zg=="), b"f");
        assert_eq!(decode(b"Zm8=Zg=="), b"fo");
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        for len in [0, 1, 2, 3, 4, 5, 255, 256, 1000] {
            let encoded = encode(&data[..len]);
            assert_eq!(encoded.len(), encoded_size(len).0);
            assert_eq!(decode(encoded.as_bytes()), &data[..len]);
        }
    }

    #[test]
    fn test_decode_skips_invalid_characters() {
        assert_eq!(decode(b"Zm9v\r\nYmFy"), b"foobar");
        assert_eq!(decode(b" Z m 8 = "), b"fo");
    }

    #[test]
    fn test_decode_stops_after_padding() {
        assert_eq!(decode(b"Zg==Zm9v"), b"f");
    }

    #[test]
    fn test_sizes() {
        assert_eq!(encoded_size(4), (8, 2));
        assert_eq!(decoded_size_of(b"Zm8="), 2);
        assert_eq!(decoded_size_of(b"Zg=="), 1);
        assert_eq!(decoded_size_of(b""), 0);
    }
}
