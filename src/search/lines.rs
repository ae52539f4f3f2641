//! Line splitting that accepts `\n`, `\r\n` and a lone `\r` as terminators.

use std::io::{self, BufRead};

/// Iterator over the UTF-8 lines of a reader, terminators stripped.
///
/// Stops after the first error; a line that is not valid UTF-8 yields an
/// `InvalidData` error.
pub struct UniversalLines<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> UniversalLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for UniversalLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let bytes = match read_line_bytes(&mut self.reader) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        match String::from_utf8(bytes) {
            Ok(line) => Some(Ok(line)),
            Err(e) => {
                self.done = true;
                Some(Err(io::Error::new(io::ErrorKind::InvalidData, e)))
            }
        }
    }
}

fn fill<R: BufRead>(reader: &mut R) -> io::Result<&[u8]> {
    loop {
        match reader.fill_buf() {
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    reader.fill_buf()
}

/// Reads one line without its terminator. `None` at end of input.
fn read_line_bytes<R: BufRead>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let mut read_any = false;
    loop {
        let available = fill(reader)?;
        if available.is_empty() {
            return Ok(read_any.then_some(line));
        }
        read_any = true;

        let Some(pos) = available.iter().position(|&b| b == b'\n' || b == b'\r') else {
            line.extend_from_slice(available);
            let len = available.len();
            reader.consume(len);
            continue;
        };
        line.extend_from_slice(&available[..pos]);
        let is_cr = available[pos] == b'\r';
        reader.consume(pos + 1);

        // A `\r\n` pair is one terminator, even across buffer refills.
        if is_cr && fill(reader)?.first() == Some(&b'\n') {
            reader.consume(1);
        }
        return Ok(Some(line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn split(bytes: &[u8]) -> Vec<String> {
        UniversalLines::new(Cursor::new(bytes.to_vec()))
            .map(|l| l.unwrap())
            .collect()
    }

    #[test]
    fn test_all_terminators() {
        assert_eq!(split(b"a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_lone_cr_separates_lines() {
        assert_eq!(split(b"alpha\rneedle\r"), vec!["alpha", "needle"]);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(split(b"\n\r\n\r\nx\n"), vec!["", "", "", "x"]);
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        assert!(split(b"").is_empty());
    }

    #[test]
    fn test_crlf_split_across_buffer_refills() {
        // Capacity 1 forces `\r` and `\n` into separate fills.
        let reader = BufReader::with_capacity(1, Cursor::new(b"ab\r\ncd\r\n".to_vec()));
        let lines: Vec<String> = UniversalLines::new(reader).map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_invalid_utf8_stops_iteration() {
        let mut lines = UniversalLines::new(Cursor::new(b"ok\n\xff\xfe\nlater\n".to_vec()));
        assert_eq!(lines.next().unwrap().unwrap(), "ok");
        let err = lines.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(lines.next().is_none());
    }
}
