use std::io::{self, Read};

/// Yields `data` once, then fails every read.
pub struct FailingReader {
    data: Vec<u8>,
    served: bool,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.as_bytes().to_vec(),
            served: false,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        self.served = true;
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        Ok(n)
    }
}
