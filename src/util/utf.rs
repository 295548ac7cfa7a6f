use crate::errors::UtfError;

// Support for UTF-16 by converting it to UTF-8
pub(crate) fn into_utf8_str(data: Vec<u8>) -> Result<String, UtfError> {
    if is_utf16(&data) {
        from_utf16(&data)
    } else {
        let mut string = String::from_utf8(data)?;
        // A UTF-8 BOM carries no content
        if string.starts_with('\u{FEFF}') {
            string.drain(..'\u{FEFF}'.len_utf8());
        }
        Ok(string)
    }
}

/// Checks if a UTF-16 byte order mark (BOM) exists
fn is_utf16(data: &[u8]) -> bool {
    data.starts_with(b"\xFF\xFE") || data.starts_with(b"\xFE\xFF")
}

fn from_utf16(data: &[u8]) -> Result<String, UtfError> {
    // Determine byte order for little endian (le) and big endian (be)
    let endian = if data.starts_with(b"\xFF") {
        u16::from_le_bytes
    } else {
        u16::from_be_bytes
    };

    let body = &data[2..];
    if body.len() % 2 != 0 {
        return Err(UtfError::UnevenByteCount(body.len()));
    }

    char::decode_utf16(body.chunks_exact(2).map(|chunk| endian([chunk[0], chunk[1]])))
        .collect::<Result<String, _>>()
        .map_err(UtfError::UndecodableUtf16)
}
