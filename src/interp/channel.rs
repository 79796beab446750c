//! Open I/O channels (spec §4.3/§6): `open`/`close`/`gets`/`read`/`puts`
//! address a channel indirectly through a [`Handle`](crate::handles::Handle),
//! mirroring `picolFileUtil`'s dispatch over a `FILE*`-shaped value. The
//! three standard channels are always present under fixed handles held
//! by `Interp`; `open` allocates additional ones from the same table.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

pub enum Channel {
    Stdin,
    Stdout,
    Stderr,
    File(File),
}

impl Channel {
    pub fn open(path: &str, mode: &str) -> io::Result<Channel> {
        let file = match mode {
            "r" => File::open(path)?,
            "w" => File::create(path)?,
            "a" => std::fs::OpenOptions::new().append(true).create(true).open(path)?,
            "r+" => std::fs::OpenOptions::new().read(true).write(true).open(path)?,
            "w+" => std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?,
            "a+" => std::fs::OpenOptions::new()
                .read(true)
                .append(true)
                .create(true)
                .open(path)?,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid access mode \"{}\"", mode),
                ))
            }
        };
        Ok(Channel::File(file))
    }

    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        match self {
            Channel::Stdin => Err(io::Error::new(
                io::ErrorKind::Other,
                "channel is not open for writing",
            )),
            Channel::Stdout => {
                print!("{}", s);
                io::stdout().flush()
            }
            Channel::Stderr => {
                eprint!("{}", s);
                io::stderr().flush()
            }
            Channel::File(f) => f.write_all(s.as_bytes()),
        }
    }

    /// Reads a single line, byte at a time (no internal buffering, so
    /// `tell`/`seek` on the same channel stay accurate). Returns the line
    /// without its trailing newline, and whether end-of-file was reached
    /// before any bytes were read.
    pub fn read_line(&mut self) -> io::Result<(String, bool)> {
        let mut buf = Vec::new();
        let mut one = [0u8; 1];
        loop {
            let n = match self {
                Channel::Stdin => io::stdin().read(&mut one)?,
                Channel::File(f) => f.read(&mut one)?,
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        "channel is not open for reading",
                    ))
                }
            };
            if n == 0 {
                break;
            }
            if one[0] == b'\n' {
                break;
            }
            buf.push(one[0]);
        }
        let eof = buf.is_empty();
        Ok((String::from_utf8_lossy(&buf).into_owned(), eof))
    }

    /// Reads at most `max_bytes`. Callers without an explicit count pass
    /// the default read-buffer size (`READ_BUF_MULTIPLIER * MAX_STR`,
    /// spec §6) so an unbounded `read` on a large file can't blow past
    /// the interpreter's buffer limits.
    pub fn read_all(&mut self, max_bytes: usize) -> io::Result<String> {
        let mut s = String::new();
        match self {
            Channel::Stdin => {
                let mut handle = io::stdin().take(max_bytes as u64);
                handle.read_to_string(&mut s)?;
            }
            Channel::File(f) => {
                let mut handle = f.take(max_bytes as u64);
                handle.read_to_string(&mut s)?;
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "channel is not open for reading",
                ))
            }
        }
        Ok(s)
    }

    pub fn eof(&mut self) -> io::Result<bool> {
        match self {
            Channel::File(f) => {
                let pos = f.stream_position()?;
                let len = f.metadata()?.len();
                Ok(pos >= len)
            }
            _ => Ok(false),
        }
    }

    pub fn tell(&mut self) -> io::Result<u64> {
        match self {
            Channel::File(f) => f.stream_position(),
            _ => Ok(0),
        }
    }

    pub fn seek(&mut self, offset: i64, whence: &str) -> io::Result<u64> {
        let from = match whence {
            "start" | "" => SeekFrom::Start(offset.max(0) as u64),
            "current" => SeekFrom::Current(offset),
            "end" => SeekFrom::End(offset),
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("bad seek origin \"{}\"", other),
                ))
            }
        };
        match self {
            Channel::File(f) => f.seek(from),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "channel does not support seeking",
            )),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Channel::Stdout => io::stdout().flush(),
            Channel::Stderr => io::stderr().flush(),
            Channel::File(f) => f.flush(),
            Channel::Stdin => Ok(()),
        }
    }
}
