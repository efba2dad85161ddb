//! Filename recovery from `Content-Disposition`.

pub const DEFAULT_FILE_NAME: &str = "download-file";

/// Suggested filename of a download.
///
/// Prefers the RFC 5987 `filename*=UTF-8''...` form over plain `filename=`
/// (quoted or bare). Falls back to [`DEFAULT_FILE_NAME`].
pub fn parse_filename(header: Option<&str>) -> String {
    let Some(header) = header else {
        return DEFAULT_FILE_NAME.to_string();
    };

    let mut plain = None;
    let mut extended = None;
    for param in header.split(';') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => extended = decode_extended(value.trim()),
            "filename" => plain = Some(unquote(value.trim()).to_string()),
            _ => {}
        }
    }

    extended
        .or(plain)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// `charset'lang'percent-encoded`; only the encoded part is kept.
fn decode_extended(value: &str) -> Option<String> {
    let encoded = match value.split_once("''") {
        Some((_, rest)) => rest,
        None => unquote(value),
    };
    percent_decode(encoded)
}

fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let pair = bytes.get(i + 1..i + 3)?;
            if !pair.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(pair).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
