//! Line sources for range lists: local files and HTTP URLs.
//!
//! Sources are read completely before an index is built; nothing here is
//! touched while searching. Gzip-compressed payloads (detected by their magic
//! bytes, so `.gz` files work with or without `Content-Encoding`) are
//! decompressed transparently.

use flate2::read::GzDecoder;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Duration;

use crate::Result;

/// Timeout applied to remote downloads.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Check if a location names an HTTP(S) resource rather than a local path.
pub fn is_url(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Read lines from a URL or a local path, depending on the location.
pub fn read_source(location: &str) -> Result<Vec<String>> {
    if is_url(location) {
        read_url(location)
    } else {
        read_file(location)
    }
}

/// Read a range list file, one entry per line.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let raw = fs::read(path)?;
    let lines = decode(raw)?;
    log::info!("Loaded {} lines from {:?}", lines.len(), path);
    Ok(lines)
}

/// Download a range list, one entry per line.
///
/// Any non-2xx status is an [`Error::HttpStatus`](crate::Error::HttpStatus).
pub fn read_url(url: &str) -> Result<Vec<String>> {
    let agent = ureq::AgentBuilder::new().timeout(DOWNLOAD_TIMEOUT).build();
    let response = agent.get(url).call()?;

    let mut raw = Vec::new();
    response.into_reader().read_to_end(&mut raw)?;
    let raw_len = raw.len();

    let lines = decode(raw)?;
    log::info!("Downloaded {} lines from {} ({} bytes)", lines.len(), url, raw_len);
    Ok(lines)
}

/// Split a reader into lines, dropping `\n` and `\r\n` terminators.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<String>> {
    let lines = BufReader::new(reader).lines().collect::<std::io::Result<Vec<_>>>()?;
    Ok(lines)
}

fn decode(raw: Vec<u8>) -> Result<Vec<String>> {
    if is_gzip(&raw) {
        read_lines(GzDecoder::new(&raw[..]))
    } else {
        read_lines(&raw[..])
    }
}

/// Check if data is gzip compressed.
fn is_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_read_lines() {
        let lines = read_lines("1.0.1.0/24\r\n1.0.2.0/23\n\n1.4.1.0/24".as_bytes()).unwrap();
        assert_eq!(lines, vec!["1.0.1.0/24", "1.0.2.0/23", "", "1.4.1.0/24"]);
    }

    #[test]
    fn test_read_file_missing() {
        assert!(matches!(
            read_file("not_exist_file"),
            Err(crate::Error::Io(_))
        ));
    }

    #[test]
    fn test_read_file_plain_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("list.txt");
        fs::write(&plain, "1.0.1.0/24\n1.0.2.0/23\n").unwrap();
        assert_eq!(read_file(&plain).unwrap().len(), 2);

        let gz = dir.path().join("list.txt.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"1.0.32.0,1.0.63.255,CN\n").unwrap();
        fs::write(&gz, encoder.finish().unwrap()).unwrap();
        assert_eq!(
            read_file(&gz).unwrap(),
            vec!["1.0.32.0,1.0.63.255,CN".to_string()]
        );
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://127.0.0.1:9999/list.txt"));
        assert!(is_url("HTTPS://example.com/list.txt"));
        assert!(!is_url("./data/china_ip_list.txt"));
        assert!(!is_url("httpdocs/list.txt"));
    }

    #[test]
    fn test_read_url_unreachable() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/list.txt", port);
        assert!(matches!(read_url(&url), Err(crate::Error::Transport(_))));
    }
}
