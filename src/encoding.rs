//! Byte-level text normalization: BOM stripping, UTF-8 validation, and an
//! opt-in transcoding helper built on chardetng and `encoding_rs`.

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;
use std::borrow::Cow;

/// The UTF-8 byte-order mark.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Returns true if the sample is valid UTF-8 (SIMD-accelerated).
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Returns the sample with a leading UTF-8 BOM removed, or the sample
/// unchanged when no BOM is present.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&UTF8_BOM) {
        &data[UTF8_BOM.len()..]
    } else {
        data
    }
}

/// Detect the encoding of `data` and transcode it to UTF-8 if necessary.
///
/// The sniffer itself refuses non-UTF-8 input; callers holding bytes in a
/// legacy encoding (Windows-125x, ISO-8859, GBK, UTF-16 with BOM, ...) can
/// run them through this first. Returns `(bytes, was_transcoded)`; already
/// valid UTF-8 is returned borrowed.
pub fn detect_and_transcode(data: &[u8]) -> (Cow<'_, [u8]>, bool) {
    // chardetng does not recognize UTF-16 BOMs, so handle those up front.
    if data.len() >= 2 {
        if data[0] == 0xFF && data[1] == 0xFE {
            let (decoded, _, _) = encoding_rs::UTF_16LE.decode(data);
            return (Cow::Owned(decoded.into_owned().into_bytes()), true);
        }
        if data[0] == 0xFE && data[1] == 0xFF {
            let (decoded, _, _) = encoding_rs::UTF_16BE.decode(data);
            return (Cow::Owned(decoded.into_owned().into_bytes()), true);
        }
    }

    if is_utf8(data) {
        return (Cow::Borrowed(data), false);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);
    if encoding == encoding_rs::UTF_8 {
        return (Cow::Borrowed(data), false);
    }

    let (decoded, _, _) = encoding.decode(data);
    (Cow::Owned(decoded.into_owned().into_bytes()), true)
}
