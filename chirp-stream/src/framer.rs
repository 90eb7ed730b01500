//! Line framing for the chunked stream body.
//!
//! The wire format is one JSON object per line, with blank lines as
//! keep-alive signals. Chunk boundaries are arbitrary: a line may span
//! several chunks and one chunk may carry several lines, so framing is
//! incremental over an internal buffer.

/// Incremental splitter turning arbitrary byte chunks into lines.
///
/// Feed chunks as they arrive, then drain complete lines. Lines are
/// returned without their delimiter; a trailing `\r` is stripped so both
/// `\n` and `\r\n` endings work. An empty line is the keep-alive signal
/// and is yielded as an empty buffer, distinct from "no complete line
/// buffered yet" (`None`).
#[derive(Debug)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    /// Create a framer. `chunk_size` is the read-buffer preallocation
    /// hint, trading memory for fewer reallocations on busy streams.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            buf: Vec::with_capacity(chunk_size),
        }
    }

    /// Append a received chunk to the internal buffer.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete line, if one is buffered.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        let newline = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buf.drain(..=newline).collect();
        line.pop(); // the \n
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }

    /// Number of bytes buffered without a terminating newline.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(framer: &mut LineFramer) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        while let Some(line) = framer.next_line() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_single_line() {
        let mut framer = LineFramer::new(1024);
        framer.feed(b"{\"data\":{}}\n");
        assert_eq!(framer.next_line().unwrap(), b"{\"data\":{}}");
        assert!(framer.next_line().is_none());
    }

    #[test]
    fn test_blank_line_is_distinct_signal() {
        let mut framer = LineFramer::new(1024);
        framer.feed(b"\r\n");
        let line = framer.next_line().unwrap();
        assert!(line.is_empty(), "keep-alive must come out as an empty line");
        // No more buffered data is None, not another empty line.
        assert!(framer.next_line().is_none());
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut framer = LineFramer::new(16);
        framer.feed(b"{\"id\":\"12");
        assert!(framer.next_line().is_none());
        framer.feed(b"34\"}\n{\"id\"");
        assert_eq!(framer.next_line().unwrap(), b"{\"id\":\"1234\"}");
        assert!(framer.next_line().is_none());
        assert_eq!(framer.pending(), 5);
        framer.feed(b":\"5\"}\n");
        assert_eq!(framer.next_line().unwrap(), b"{\"id\":\"5\"}");
    }

    #[test]
    fn test_crlf_endings() {
        let mut framer = LineFramer::new(64);
        framer.feed(b"{\"a\":1}\r\n{\"b\":2}\r\n");
        assert_eq!(drain(&mut framer), vec![b"{\"a\":1}".to_vec(), b"{\"b\":2}".to_vec()]);
    }

    // For any chunking of the same byte sequence, the framer yields the
    // same lines in the same order, keep-alives included.
    #[test]
    fn test_order_preserved_across_chunkings() {
        let wire = b"{\"n\":1}\n\n{\"n\":2}\r\n\r\n{\"n\":3}\n";
        let expected: Vec<Vec<u8>> = vec![
            b"{\"n\":1}".to_vec(),
            Vec::new(),
            b"{\"n\":2}".to_vec(),
            Vec::new(),
            b"{\"n\":3}".to_vec(),
        ];

        for split in 1..wire.len() {
            let mut framer = LineFramer::new(8);
            let mut lines = Vec::new();
            for chunk in wire.chunks(split) {
                framer.feed(chunk);
                lines.extend(drain(&mut framer));
            }
            assert_eq!(lines, expected, "chunk size {split}");

            let blanks = lines.iter().filter(|l| l.is_empty()).count();
            let payloads = lines.iter().filter(|l| !l.is_empty()).count();
            assert_eq!(blanks, 2);
            assert_eq!(payloads, 3);
        }
    }

    #[test]
    fn test_incomplete_tail_stays_buffered() {
        let mut framer = LineFramer::new(8);
        framer.feed(b"{\"data\"");
        assert!(framer.next_line().is_none());
        assert_eq!(framer.pending(), 7);
    }
}
