use std::io::{Read, Write};
use bufstream::BufStream;
use super::file_system::read_file;
use super::http::{parse_request, Request};
use super::response::{write_status_headers, write_inline_response, write_file_response, WriteError};

const NOT_FOUND_BODY: &'static str = "<html>File Not Found</html>";
const WEBPAGE_BODY: &'static str = "<html><img src='/img/test.png' alt='image' /></html>";

const READ_BUFFER_SIZE: usize = 512;

/// Drives one connection start to finish. Exactly one request is read
/// and answered; the stream closes by drop on every path. A request
/// that fails to parse gets no response bytes at all, the close is the
/// whole reply.
pub fn handle_client<S: Read + Write>(stream: S) {
    let mut buffed = BufStream::new(stream);

    let mut raw = [0u8; READ_BUFFER_SIZE];
    let count = match buffed.read(&mut raw) {
        Ok(count) => count,
        Err(e) => {
            eprintln!("Error reading request:{}", e);
            return;
        }
    };

    let request = match parse_request(&raw[..count]) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    if let Err(e) = route(&mut buffed, &request) {
        eprintln!("Error responding to {} {}:{}", request.method, request.url, e);
        return;
    }

    if let Err(e) = buffed.flush() {
        eprintln!("Error flushing response:{}", e);
    }
}

/// First match wins: the image prefix, then the fixed page, then 404.
fn route(writer: &mut Write, request: &Request) -> Result<(), WriteError> {
    if request.method == "GET" && request.url.starts_with("/img/") {
        serve_file(writer, &request.url)
    } else if request.method == "GET" && request.url == "/app/webpage" {
        write_status_headers(writer, 200).map_err(WriteError::Io)?;
        write_inline_response(writer, "text/html", WEBPAGE_BODY).map_err(WriteError::Io)
    } else {
        not_found(writer)
    }
}

fn serve_file(writer: &mut Write, url: &str) -> Result<(), WriteError> {
    // TODO: reject paths containing ".." before opening them
    let path = format!(".{}", url);

    match read_file(&path) {
        Ok(file) => {
            write_status_headers(writer, 200).map_err(WriteError::Io)?;
            // the 200 is committed here; if the transfer fails no error
            // body follows, the connection just closes
            write_file_response(writer, "image/png", &file)
        }
        Err(e) => {
            eprintln!("Error loading {}:{}", path, e);
            not_found(writer)
        }
    }
}

fn not_found(writer: &mut Write) -> Result<(), WriteError> {
    write_status_headers(writer, 404).map_err(WriteError::Io)?;
    write_inline_response(writer, "text/plain", NOT_FOUND_BODY).map_err(WriteError::Io)
}

#[cfg(test)]
mod tests {
    use super::{handle_client, NOT_FOUND_BODY, WEBPAGE_BODY};
    use std::fs;
    use std::io;
    use std::io::{Cursor, Read, Write};
    use std::sync::{Arc, Mutex};

    struct MockStream {
        input: Cursor<Vec<u8>>,
        output: Arc<Mutex<Vec<u8>>>
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn run(request: &[u8]) -> Vec<u8> {
        let output = Arc::new(Mutex::new(Vec::new()));
        let stream = MockStream {
            input: Cursor::new(request.to_vec()),
            output: output.clone()
        };

        handle_client(stream);

        let collected = output.lock().unwrap();
        collected.clone()
    }

    fn run_text(request: &[u8]) -> String {
        String::from_utf8(run(request)).unwrap()
    }

    #[test]
    fn webpage_route_returns_the_inline_page() {
        let response = run_text(b"GET /app/webpage HTTP/1.0\r\n\r\n");

        assert!(response.starts_with("HTTP/1.0 200 OK HTTP Status\n"));
        assert!(response.contains("Content-Type: text/html\n"));
        assert!(response.ends_with(&format!("\n\n{}\n", WEBPAGE_BODY)));
    }

    #[test]
    fn unknown_url_returns_not_found() {
        let response = run_text(b"GET /nowhere HTTP/1.0\r\n\r\n");

        assert!(response.starts_with("HTTP/1.0 404 OK HTTP Status\n"));
        assert!(response.contains("Content-Type: text/plain\n"));
        assert!(response.ends_with(&format!("\n\n{}\n", NOT_FOUND_BODY)));
    }

    #[test]
    fn non_get_method_returns_not_found() {
        let response = run_text(b"POST /app/webpage HTTP/1.0\r\n\r\n");

        assert!(response.starts_with("HTTP/1.0 404 OK HTTP Status\n"));
    }

    #[test]
    fn missing_image_returns_not_found() {
        let response = run_text(b"GET /img/not-a-real-file.png HTTP/1.0\r\n\r\n");

        assert!(response.starts_with("HTTP/1.0 404 OK HTTP Status\n"));
        assert!(response.ends_with(&format!("\n\n{}\n", NOT_FOUND_BODY)));
    }

    #[test]
    fn malformed_request_gets_no_response() {
        let response = run(b"GARBAGE-NO-SPACES\r\n");

        assert!(response.is_empty());
    }

    #[test]
    fn image_route_serves_file_bytes() {
        let contents: Vec<u8> = (0..700).map(|i| (i % 256) as u8).collect();
        fs::create_dir_all("img").unwrap();
        fs::write("img/handler_unit.png", &contents).unwrap();

        let response = run(b"GET /img/handler_unit.png HTTP/1.0\r\n\r\n");

        let header_end = response.windows(2).position(|pair| pair == b"\n\n").unwrap();
        let header = String::from_utf8(response[..header_end].to_vec()).unwrap();
        assert!(header.starts_with("HTTP/1.0 200 OK HTTP Status\n"));
        assert!(header.contains("Content-Type: image/png\n"));
        assert!(header.contains(&format!("Content-Length: {}", contents.len())));
        assert_eq!(&response[header_end + 2..], &contents[..]);

        fs::remove_file("img/handler_unit.png").unwrap();
    }
}
