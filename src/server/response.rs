use std::fmt;
use std::io;
use std::io::Write;
use super::file_system::{File, CHUNK_SIZE};

pub const SERVER_NAME: &'static str = "rust_http10_server";

#[derive(Debug)]
pub enum WriteError {
    ConnectionClosed,
    Io(io::Error)
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WriteError::ConnectionClosed => write!(f, "Error writing response: connection closed"),
            WriteError::Io(ref e) => write!(f, "Error writing response:{}", e)
        }
    }
}

/// Emits the status line and the fixed header set. The headers are left
/// open: the Content-Type/Content-Length pair and the blank line come
/// with whichever body write follows, so every route shares this part.
pub fn write_status_headers(writer: &mut Write, code: u16) -> io::Result<()> {
    write!(writer, "HTTP/1.0 {} OK HTTP Status\n", code)?;
    write!(writer, "Server: {}\n", SERVER_NAME)?;
    write!(writer, "Cache-Control: no-store\n")?;
    write!(writer, "Content-Language: en\n")?;
    write!(writer, "X-Frame-Options: SAMEORIGIN\n")?;
    Ok(())
}

/// Closes the headers and sends a small generated body in one write.
pub fn write_inline_response(writer: &mut Write, content_type: &str, body: &str) -> io::Result<()> {
    let response = format!("Content-Type: {}\nContent-Length: {}\n\n{}\n",
                           content_type, body.len(), body);
    writer.write_all(response.as_bytes())
}

/// Closes the headers and streams the file in chunks of at most
/// CHUNK_SIZE bytes. A short write only advances the cursor; a write
/// that returns 0 or an error aborts the transfer.
pub fn write_file_response(writer: &mut Write, content_type: &str, file: &File) -> Result<(), WriteError> {
    let header = format!("Content-Type: {}\nContent-Length: {}\n\n", content_type, file.size);
    if let Err(e) = writer.write_all(header.as_bytes()) {
        return Err(WriteError::Io(e));
    }

    let mut sent = 0;
    while sent < file.size {
        let end = if file.size - sent < CHUNK_SIZE { file.size } else { sent + CHUNK_SIZE };
        match writer.write(&file.contents[sent..end]) {
            Ok(0) => return Err(WriteError::ConnectionClosed),
            Ok(count) => sent += count,
            Err(e) => return Err(WriteError::Io(e))
        }
    }

    Ok(())
}
