//! Binary PPM (P6) reader and writer.
//!
//! Layout:
//!
//! ```text
//! P6 <ws> width <ws> height <ws> 255 <one ws byte> RGB RGB RGB ...
//! ```
//!
//! Header tokens are separated by any ASCII whitespace, and a `#` starts a
//! comment that runs to the end of the line. Pixel data is row-major with
//! one byte per channel and no padding. Only a maximum value of 255 is
//! supported.
//!
//! Bytes are mapped to channels as `b / 255`. Channels are mapped back to
//! bytes with a [`ByteConversion`], truncating by default, which makes
//! `decode(encode(c)) == c` exact for any canvas read from a file.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::color::{to_double, ByteConversion, Pixel};
use crate::error::CodecError;

/// Magic token of a binary RGB pixmap.
pub const PPM_MAGIC: &str = "P6";
/// The only supported maximum channel value.
pub const PPM_MAXVAL: u32 = 255;
/// Extension enforced by [`Canvas::to_file`].
pub const PPM_EXTENSION: &str = "ppm";

// ============================================================================
// Header parsing
// ============================================================================

/// Cursor over the ASCII header.
struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and `#` comment lines.
    fn skip_separators(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> Option<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(&self.data[start..self.pos])
        }
    }

    fn number(&mut self, what: &str) -> Result<u32, CodecError> {
        let tok = self
            .token()
            .ok_or_else(|| CodecError::BadHeader(format!("missing {}", what)))?;
        std::str::from_utf8(tok)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| {
                CodecError::BadHeader(format!(
                    "{} is not a number: {:?}",
                    what,
                    String::from_utf8_lossy(tok)
                ))
            })
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a complete P6 stream held in memory.
///
/// Bytes after the last pixel are ignored.
pub fn decode(data: &[u8]) -> Result<Canvas, CodecError> {
    let mut hdr = HeaderReader::new(data);

    let magic = hdr.token().unwrap_or_default();
    if magic != PPM_MAGIC.as_bytes() {
        return Err(CodecError::BadMagic(
            String::from_utf8_lossy(magic).into_owned(),
        ));
    }

    let width = hdr.number("width")? as usize;
    let height = hdr.number("height")? as usize;
    let maxval = hdr.number("maxval")?;
    if maxval != PPM_MAXVAL {
        return Err(CodecError::UnsupportedMaxval(maxval));
    }

    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| CodecError::BadHeader(format!("{}x{} is too large", width, height)))?;

    // Exactly one separator byte ends the header.
    let start = (hdr.pos + 1).min(data.len());
    let body = &data[start..];
    if body.len() < expected {
        return Err(CodecError::Truncated {
            expected,
            actual: body.len(),
        });
    }

    let buf: Vec<Pixel> = body[..expected]
        .chunks_exact(3)
        .map(|c| Pixel::new(to_double(c[0]), to_double(c[1]), to_double(c[2])))
        .collect();
    log::debug!("decoded {}x{} P6 image", width, height);

    let mut canvas = Canvas::default();
    canvas
        .set_image(buf, width, height)
        .map_err(|e| CodecError::BadHeader(e.to_string()))?;
    Ok(canvas)
}

/// Read a whole P6 stream from `reader`.
pub fn read_from<R: Read>(mut reader: R) -> Result<Canvas, CodecError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode(&data)
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode with truncating byte conversion.
pub fn encode(canvas: &Canvas) -> Vec<u8> {
    encode_with(canvas, ByteConversion::default())
}

pub fn encode_with(canvas: &Canvas, conv: ByteConversion) -> Vec<u8> {
    let header = format!(
        "{}\n{} {}\n{}\n",
        PPM_MAGIC,
        canvas.width(),
        canvas.height(),
        PPM_MAXVAL
    );
    let mut out = Vec::with_capacity(header.len() + canvas.pixels().len() * 3);
    out.extend_from_slice(header.as_bytes());
    for p in canvas.pixels() {
        out.extend_from_slice(&p.to_bytes(conv));
    }
    out
}

/// Write `canvas` to `writer` as a P6 stream.
pub fn write_to<W: Write>(canvas: &Canvas, mut writer: W, conv: ByteConversion) -> Result<(), CodecError> {
    writer.write_all(&encode_with(canvas, conv))?;
    writer.flush()?;
    Ok(())
}

/// `path` with its extension replaced by (or extended with) `.ppm`.
pub fn with_ppm_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == PPM_EXTENSION => path.to_path_buf(),
        _ => path.with_extension(PPM_EXTENSION),
    }
}

// ============================================================================
// Canvas file I/O
// ============================================================================

impl Canvas {
    /// Load a P6 file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Canvas, CodecError> {
        let path = path.as_ref();
        log::debug!("reading {}", path.display());
        read_from(File::open(path)?)
    }

    /// Save as a P6 file with truncating byte conversion.
    ///
    /// The extension is forced to `.ppm`; the path actually written is
    /// returned.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, CodecError> {
        self.to_file_with(path, ByteConversion::default())
    }

    pub fn to_file_with<P: AsRef<Path>>(
        &self,
        path: P,
        conv: ByteConversion,
    ) -> Result<PathBuf, CodecError> {
        let path = with_ppm_extension(path.as_ref());
        log::debug!(
            "writing {}x{} image to {}",
            self.width(),
            self.height(),
            path.display()
        );
        write_to(self, File::create(&path)?, conv)?;
        Ok(path)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ppm-raster-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_encode_header() {
        let c = Canvas::new(3, 2);
        let bytes = encode(&c);
        assert!(bytes.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(bytes.len(), 11 + 18);
    }

    #[test]
    fn test_decode_simple() {
        let mut data = b"P6\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[255, 0, 0, 0, 128, 255]);
        let c = decode(&data).unwrap();
        assert_eq!((c.width(), c.height()), (2, 1));
        assert_eq!(c.pixel(0, 0).unwrap(), Pixel::new(1.0, 0.0, 0.0));
        assert_eq!(c.pixel(1, 0).unwrap().green_u8(), 128);
    }

    #[test]
    fn test_decode_comment_and_whitespace() {
        let mut data = b"P6\n# made by hand\n 2\t1\r\n255\n".to_vec();
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        let c = decode(&data).unwrap();
        assert_eq!(c.pixel(1, 0).unwrap().blue_u8(), 6);
    }

    #[test]
    fn test_reencode_reproduces_bytes() {
        let header = b"P6\n10 10\n255\n";
        let body: Vec<u8> = (0..300u32).map(|i| (i * 37 % 256) as u8).collect();
        let mut data = header.to_vec();
        data.extend_from_slice(&body);

        let c = decode(&data).unwrap();
        assert_eq!((c.width(), c.height()), (10, 10));
        assert_eq!(encode(&c), data);
    }

    #[test]
    fn test_bad_magic() {
        let err = decode(b"P3\n1 1\n255\n000").unwrap_err();
        assert!(matches!(err, CodecError::BadMagic(ref m) if m == "P3"));
        assert!(matches!(decode(b"").unwrap_err(), CodecError::BadMagic(_)));
    }

    #[test]
    fn test_unsupported_maxval() {
        let err = decode(b"P6\n1 1\n65535\n\0\0\0\0\0\0").unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedMaxval(65535)));
    }

    #[test]
    fn test_bad_header() {
        assert!(matches!(
            decode(b"P6\nten 10\n255\n").unwrap_err(),
            CodecError::BadHeader(_)
        ));
        assert!(matches!(decode(b"P6\n10").unwrap_err(), CodecError::BadHeader(_)));
    }

    #[test]
    fn test_truncated() {
        let err = decode(b"P6\n2 2\n255\n\x01\x02\x03").unwrap_err();
        match err {
            CodecError::Truncated { expected, actual } => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 3);
            }
            e => panic!("unexpected {:?}", e),
        }
    }

    #[test]
    fn test_round_conversion() {
        let mut c = Canvas::new(1, 1);
        c.set_pixel(0, 0, Pixel::new(0.999, 0.5, 0.0));
        let trunc = encode_with(&c, ByteConversion::Truncate);
        let round = encode_with(&c, ByteConversion::Round);
        assert_eq!(&trunc[trunc.len() - 3..], &[254, 127, 0]);
        assert_eq!(&round[round.len() - 3..], &[255, 128, 0]);
    }

    #[test]
    fn test_ppm_extension() {
        assert_eq!(with_ppm_extension(Path::new("a/out")), PathBuf::from("a/out.ppm"));
        assert_eq!(with_ppm_extension(Path::new("out.png")), PathBuf::from("out.ppm"));
        assert_eq!(with_ppm_extension(Path::new("out.ppm")), PathBuf::from("out.ppm"));
    }

    #[test_log::test]
    fn test_file_round_trip() {
        let mut c = Canvas::new(5, 4);
        c.set_pixel(1, 2, Pixel::from_u8(10, 200, 30));
        c.set_pixel(4, 3, Pixel::WHITE);

        let written = c.to_file(scratch_path("roundtrip.png")).unwrap();
        assert_eq!(written.extension().unwrap(), "ppm");
        let back = Canvas::from_file(&written).unwrap();
        std::fs::remove_file(&written).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_missing_file() {
        let err = Canvas::from_file(scratch_path("does-not-exist.ppm")).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn test_stream_round_trip() {
        let mut c = Canvas::new(2, 2);
        c.set_pixel(0, 0, Pixel::new(1.0, 0.0, 0.0));
        let mut sink = Vec::new();
        write_to(&c, &mut sink, ByteConversion::Truncate).unwrap();
        let back = read_from(sink.as_slice()).unwrap();
        assert_eq!(back, c);
    }
}
