//! Direct pixel frames
//!
//! A frame is a base64 string of 4 bytes per pixel (red, green, blue, one
//! ignored byte), row-major from the top-left cell. Senders may push a
//! square 11×11 picture; pixels past the last grid cell are dropped by the
//! scheduler.

use core::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use wordclock_core::grid::GRID_WIDTH;
use wordclock_core::Rgb;

/// Bytes per pixel in the decoded payload
pub const BYTES_PER_PIXEL: usize = 4;

/// Largest picture accepted, in pixels
pub const MAX_DIRECT_PIXELS: usize = GRID_WIDTH * GRID_WIDTH;

/// Largest decoded payload
pub const MAX_FRAME_BYTES: usize = MAX_DIRECT_PIXELS * BYTES_PER_PIXEL;

/// Largest base64 payload
pub const MAX_ENCODED_LEN: usize = (MAX_FRAME_BYTES + 2) / 3 * 4;

/// Decode buffer, sized for the padded upper bound of `MAX_ENCODED_LEN`
const DECODE_BUF_LEN: usize = MAX_ENCODED_LEN / 4 * 3;

/// Direct frame errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectError {
    /// More data than the largest accepted picture
    PayloadTooLarge,
    /// Not valid base64
    InvalidEncoding,
    /// No complete pixel in the payload
    Empty,
}

impl fmt::Display for DirectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectError::PayloadTooLarge => write!(f, "direct frame too large"),
            DirectError::InvalidEncoding => write!(f, "direct frame is not base64"),
            DirectError::Empty => write!(f, "direct frame has no pixels"),
        }
    }
}

/// A decoded direct frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectFrame {
    bytes: [u8; DECODE_BUF_LEN],
    len: usize,
}

impl DirectFrame {
    /// Decode a base64 payload
    ///
    /// Surrounding whitespace is ignored. A trailing partial pixel is
    /// dropped.
    pub fn decode(payload: &str) -> Result<Self, DirectError> {
        let payload = payload.trim();
        if payload.len() > MAX_ENCODED_LEN {
            return Err(DirectError::PayloadTooLarge);
        }

        let mut bytes = [0u8; DECODE_BUF_LEN];
        let len = STANDARD
            .decode_slice(payload, &mut bytes)
            .map_err(|_| DirectError::InvalidEncoding)?;
        if len < BYTES_PER_PIXEL {
            return Err(DirectError::Empty);
        }

        Ok(Self { bytes, len })
    }

    /// Number of complete pixels
    pub fn pixel_count(&self) -> usize {
        self.len / BYTES_PER_PIXEL
    }

    /// Pixels in payload order
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.bytes[..self.len]
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(bytes: &[u8]) -> heapless::String<{ MAX_ENCODED_LEN + 8 }> {
        let mut buf = [0u8; MAX_ENCODED_LEN + 8];
        let n = STANDARD.encode_slice(bytes, &mut buf).unwrap();
        let mut out = heapless::String::new();
        out.push_str(core::str::from_utf8(&buf[..n]).unwrap()).unwrap();
        out
    }

    #[test]
    fn test_limits() {
        assert_eq!(MAX_FRAME_BYTES, 484);
        assert_eq!(MAX_ENCODED_LEN, 648);
        assert!(DECODE_BUF_LEN >= MAX_FRAME_BYTES);
    }

    #[test]
    fn test_decode_pixels() {
        let payload = encode(&[255, 0, 0, 9, 0, 255, 0, 9, 1, 2, 3, 0]);
        let frame = DirectFrame::decode(&payload).unwrap();
        assert_eq!(frame.pixel_count(), 3);

        let mut pixels = frame.pixels();
        assert_eq!(pixels.next(), Some(Rgb::new(255, 0, 0)));
        assert_eq!(pixels.next(), Some(Rgb::new(0, 255, 0)));
        assert_eq!(pixels.next(), Some(Rgb::new(1, 2, 3)));
        assert_eq!(pixels.next(), None);
    }

    #[test]
    fn test_partial_pixel_dropped() {
        let payload = encode(&[10, 20, 30, 0, 40, 50]);
        let frame = DirectFrame::decode(&payload).unwrap();
        assert_eq!(frame.pixel_count(), 1);
        assert_eq!(frame.pixels().count(), 1);
    }

    #[test]
    fn test_full_square_picture() {
        let bytes = [7u8; MAX_FRAME_BYTES];
        let payload = encode(&bytes);
        assert_eq!(payload.len(), MAX_ENCODED_LEN);
        let frame = DirectFrame::decode(&payload).unwrap();
        assert_eq!(frame.pixel_count(), MAX_DIRECT_PIXELS);
    }

    #[test]
    fn test_rejects_bad_payloads() {
        assert_eq!(DirectFrame::decode(""), Err(DirectError::Empty));
        assert_eq!(DirectFrame::decode("  \n"), Err(DirectError::Empty));
        assert_eq!(DirectFrame::decode("AAE="), Err(DirectError::Empty));
        assert_eq!(DirectFrame::decode("not base64!"), Err(DirectError::InvalidEncoding));

        let bytes = [0u8; MAX_FRAME_BYTES + 3];
        let payload = encode(&bytes);
        assert_eq!(DirectFrame::decode(&payload), Err(DirectError::PayloadTooLarge));
    }

    #[test]
    fn test_whitespace_trimmed() {
        let payload = encode(&[1, 2, 3, 4]);
        let mut padded = heapless::String::<32>::new();
        padded.push_str(" ").unwrap();
        padded.push_str(&payload).unwrap();
        padded.push_str("\n").unwrap();
        assert_eq!(DirectFrame::decode(&padded).unwrap().pixel_count(), 1);
    }
}
