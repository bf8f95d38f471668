use std::io;
use std::sync::LazyLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

// Classic GitHub tokens: ghp_ (personal), gho_ (OAuth), ghu_/ghs_ (app), ghr_ (refresh)
static GITHUB_TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gh[pousr]_[A-Za-z0-9]{20,}").expect("valid regex"));

static FINE_GRAINED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github_pat_[A-Za-z0-9_]{20,}").expect("valid regex"));

static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(bearer)\s+[A-Za-z0-9\-_\.=]+").expect("valid regex")
});

static FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(["']?(?:token|secret|password|authorization)["']?\s*[:=]\s*)["']?[^"'\s,}]{8,}["']?"#)
        .expect("valid regex")
});

/// Scrubs credentials out of a log line.
pub fn scrub_message(message: &str) -> String {
    let scrubbed = FINE_GRAINED_PATTERN.replace_all(message, "[TOKEN_REDACTED]");
    let scrubbed = GITHUB_TOKEN_PATTERN.replace_all(&scrubbed, "[TOKEN_REDACTED]");
    let scrubbed = BEARER_PATTERN.replace_all(&scrubbed, "$1 [TOKEN_REDACTED]");
    FIELD_PATTERN
        .replace_all(&scrubbed, "${1}[REDACTED]")
        .into_owned()
}

/// [`MakeWriter`] wrapper that scrubs every formatted event before it is
/// written.
///
/// The fmt layers write one complete event per `write` call, so a token is
/// never split across two buffers.
#[derive(Debug, Clone, Copy)]
pub struct ScrubbingMakeWriter<M> {
    inner: M,
}

impl<M> ScrubbingMakeWriter<M> {
    pub const fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for ScrubbingMakeWriter<M> {
    type Writer = ScrubbingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        ScrubbingWriter {
            inner: self.inner.make_writer(),
        }
    }
}

/// Writer produced by [`ScrubbingMakeWriter`].
#[derive(Debug)]
pub struct ScrubbingWriter<W> {
    inner: W,
}

impl<W: io::Write> io::Write for ScrubbingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        self.inner.write_all(scrub_message(&text).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
