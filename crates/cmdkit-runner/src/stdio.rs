//! Standard stream sources and sinks for a command
//!
//! Null, inherited and file-backed streams are handed to the OS as-is. Bytes,
//! readers and writers need a pipe that a copy thread services while the
//! child runs (see [`crate::process`]).

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};

use crate::tee::CaptureBuffer;

/// Cloneable handle to a writer shared between commands.
#[derive(Clone)]
pub struct SharedWriter(Arc<Mutex<dyn Write + Send>>);

impl SharedWriter {
    /// Wrap an owned writer.
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(writer)))
    }

    /// Share a writer the caller keeps a handle to.
    #[must_use]
    pub fn from_arc<W: Write + Send + 'static>(writer: Arc<Mutex<W>>) -> Self {
        Self(writer)
    }

    /// True when both handles point at the same writer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

impl fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedWriter(..)")
    }
}

/// Cloneable handle to a reader shared between commands.
#[derive(Clone)]
pub struct SharedReader(Arc<Mutex<dyn Read + Send>>);

impl SharedReader {
    #[must_use]
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(reader)))
    }

    #[must_use]
    pub fn from_arc<R: Read + Send + 'static>(reader: Arc<Mutex<R>>) -> Self {
        Self(reader)
    }

    /// Copy everything the reader yields into `out`.
    pub(crate) fn copy_into(&self, out: &mut impl Write) -> io::Result<u64> {
        let mut reader = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        io::copy(&mut *reader, out)
    }
}

impl fmt::Debug for SharedReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedReader(..)")
    }
}

/// Where a command's standard input comes from.
#[derive(Debug, Clone, Default)]
pub enum InputSource {
    /// The null device.
    #[default]
    Null,
    /// The calling process's stdin.
    Inherit,
    /// An open file.
    File(Arc<File>),
    /// Fixed bytes, written to the child and then closed.
    Bytes(Arc<[u8]>),
    /// Any reader, drained into the child.
    Reader(SharedReader),
}

impl InputSource {
    #[must_use]
    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        Self::Reader(SharedReader::new(reader))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Platform handle for the child plus the feed a copy thread must push
    /// into the pipe, if any.
    pub(crate) fn into_stdio(self) -> io::Result<(Stdio, Option<StdinFeed>)> {
        Ok(match self {
            Self::Null => (Stdio::null(), None),
            Self::Inherit => (Stdio::inherit(), None),
            Self::File(file) => (Stdio::from(file.try_clone()?), None),
            Self::Bytes(bytes) => (Stdio::piped(), Some(StdinFeed::Bytes(bytes))),
            Self::Reader(reader) => (Stdio::piped(), Some(StdinFeed::Reader(reader))),
        })
    }
}

impl From<File> for InputSource {
    fn from(file: File) -> Self {
        Self::File(Arc::new(file))
    }
}

impl From<&str> for InputSource {
    fn from(text: &str) -> Self {
        Self::Bytes(Arc::from(text.as_bytes()))
    }
}

impl From<String> for InputSource {
    fn from(text: String) -> Self {
        Self::Bytes(Arc::from(text.into_bytes()))
    }
}

impl From<Vec<u8>> for InputSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Arc::from(bytes))
    }
}

impl From<SharedReader> for InputSource {
    fn from(reader: SharedReader) -> Self {
        Self::Reader(reader)
    }
}

/// Data waiting to be pushed into a child's stdin pipe.
#[derive(Debug)]
pub(crate) enum StdinFeed {
    Bytes(Arc<[u8]>),
    Reader(SharedReader),
}

impl StdinFeed {
    pub(crate) fn feed(self, pipe: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Bytes(bytes) => pipe.write_all(&bytes),
            Self::Reader(reader) => reader.copy_into(pipe).map(|_| ()),
        }
    }
}

/// Which of the caller's output streams a sink refers to when inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Where a command's stdout or stderr goes.
#[derive(Debug, Clone, Default)]
pub enum OutputSink {
    /// The null device.
    #[default]
    Null,
    /// The calling process's stream in the same slot.
    Inherit,
    /// An open file.
    File(Arc<File>),
    /// Any writer, fed by a copy thread.
    Writer(SharedWriter),
}

impl OutputSink {
    #[must_use]
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::Writer(SharedWriter::new(writer))
    }

    #[must_use]
    pub fn shared<W: Write + Send + 'static>(writer: Arc<Mutex<W>>) -> Self {
        Self::Writer(SharedWriter::from_arc(writer))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True when both sinks deliver to the same destination object.
    ///
    /// Files and writers compare by identity, not content.
    #[must_use]
    pub fn same_target(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) | (Self::Inherit, Self::Inherit) => true,
            (Self::File(a), Self::File(b)) => Arc::ptr_eq(a, b),
            (Self::Writer(a), Self::Writer(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub(crate) fn into_stdio(self) -> io::Result<(Stdio, Option<SharedWriter>)> {
        Ok(match self {
            Self::Null => (Stdio::null(), None),
            Self::Inherit => (Stdio::inherit(), None),
            Self::File(file) => (Stdio::from(file.try_clone()?), None),
            Self::Writer(writer) => (Stdio::piped(), Some(writer)),
        })
    }

    /// Writer view of this sink, used to fan output out to it.
    ///
    /// `None` for the null device.
    pub(crate) fn into_writer(
        self,
        stream: OutputStream,
    ) -> io::Result<Option<Box<dyn Write + Send>>> {
        Ok(match self {
            Self::Null => None,
            Self::Inherit => Some(match stream {
                OutputStream::Stdout => Box::new(io::stdout()),
                OutputStream::Stderr => Box::new(io::stderr()),
            }),
            Self::File(file) => Some(Box::new(file.try_clone()?)),
            Self::Writer(writer) => Some(Box::new(writer)),
        })
    }
}

impl From<File> for OutputSink {
    fn from(file: File) -> Self {
        Self::File(Arc::new(file))
    }
}

impl From<SharedWriter> for OutputSink {
    fn from(writer: SharedWriter) -> Self {
        Self::Writer(writer)
    }
}

impl From<CaptureBuffer> for OutputSink {
    fn from(buffer: CaptureBuffer) -> Self {
        Self::shared(buffer.shared())
    }
}
