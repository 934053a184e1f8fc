//! Shared HTTP agent configuration and bounded response helpers.

use std::io::{self, Read, Write};
use std::time::Duration;

/// Timeouts applied to every request made through an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    /// Time allowed to establish the TCP/TLS connection.
    pub connect: Duration,
    /// Optional cap on waiting for response bytes; `None` waits indefinitely.
    pub read: Option<Duration>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: None,
        }
    }
}

/// Build an HTTP agent with the given timeouts.
pub fn build_agent(timeouts: Timeouts) -> ureq::Agent {
    let mut builder = ureq::AgentBuilder::new().timeout_connect(timeouts.connect);
    if let Some(read) = timeouts.read {
        builder = builder.timeout_read(read).timeout_write(read);
    }
    builder.build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub fn read_response_bytes(response: ureq::Response, max_bytes: usize) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let reader = response.into_reader();
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}

/// Stream a response to the provided writer, enforcing a maximum byte size.
///
/// Returns the number of bytes written.
pub fn copy_response_to_writer(
    response: ureq::Response,
    writer: &mut dyn Write,
    max_bytes: usize,
) -> Result<u64, io::Error> {
    check_content_length(&response, max_bytes)?;
    let reader = response.into_reader();
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut total = 0usize;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let read = limited.read(&mut buf)?;
        if read == 0 {
            break;
        }
        total += read;
        if total > max_bytes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Response exceeded {max_bytes} bytes"),
            ));
        }
        writer.write_all(&buf[..read])?;
    }
    writer.flush()?;
    Ok(total as u64)
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}
