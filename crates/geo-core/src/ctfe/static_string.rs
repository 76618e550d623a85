use std::{fmt, str};

use crate::format::{FormatSink, sub_slice};

/// A fixed-capacity string buildable in `const` contexts.
///
/// Writes past the capacity are dropped, but [`required`](Self::required) keeps counting so that
/// a second pass can size the buffer exactly.
#[derive(Copy, Clone)]
pub struct StaticString<const CAP: usize> {
    buffer: [u8; CAP],
    len: usize,
    required: usize,
}

impl<const CAP: usize> StaticString<CAP> {
    #[expect(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; CAP],
            len: 0,
            required: 0,
        }
    }

    pub const fn push(&mut self, ch: u8) {
        if self.len < CAP {
            self.buffer[self.len] = ch;
            self.len += 1;
        }

        self.required += 1;
    }

    pub const fn push_slice(&mut self, chars: &[u8]) {
        let mut i = 0;

        while i < chars.len() {
            self.push(chars[i]);
            i += 1;
        }
    }

    pub const fn push_repeated(&mut self, ch: u8, count: usize) {
        let mut i = 0;

        while i < count {
            self.push(ch);
            i += 1;
        }
    }

    pub const fn push_str(&mut self, text: &str) {
        self.push_slice(text.as_bytes());
    }

    pub const fn push_char(&mut self, ch: char) {
        let mut dst = [0u8; 4];
        self.push_str(ch.encode_utf8(&mut dst));
    }

    pub const fn capacity(&self) -> usize {
        CAP
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of everything pushed so far, stored or not.
    pub const fn required(&self) -> usize {
        self.required
    }

    pub const fn is_truncated(&self) -> bool {
        self.required > self.len
    }

    pub const fn as_bytes(&self) -> &[u8] {
        sub_slice(&self.buffer, 0, self.len)
    }

    /// The contents up to the first invalid UTF-8 sequence. Only truncation can cut a character
    /// short, so this is usually everything.
    pub const fn as_str(&self) -> &str {
        let bytes = self.as_bytes();

        match str::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => match str::from_utf8(sub_slice(bytes, 0, err.valid_up_to())) {
                Ok(text) => text,
                Err(_) => "",
            },
        }
    }

    pub const fn eq_str(&self, other: &str) -> bool {
        let (lhs, rhs) = (self.as_bytes(), other.as_bytes());

        if lhs.len() != rhs.len() {
            return false;
        }

        let mut i = 0;

        while i < lhs.len() {
            if lhs[i] != rhs[i] {
                return false;
            }
            i += 1;
        }

        true
    }
}

impl<const CAP: usize> FormatSink for StaticString<CAP> {
    fn put(&mut self, ch: u8) {
        self.push(ch);
    }

    fn put_slice(&mut self, chars: &[u8]) {
        self.push_slice(chars);
    }

    fn put_repeated(&mut self, ch: u8, count: usize) {
        self.push_repeated(ch, count);
    }
}

impl<const CAP: usize> fmt::Debug for StaticString<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const CAP: usize> fmt::Display for StaticString<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const CAP: usize> AsRef<[u8]> for StaticString<CAP> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const CAP: usize> PartialEq<str> for StaticString<CAP> {
    fn eq(&self, other: &str) -> bool {
        self.eq_str(other)
    }
}

impl<const CAP: usize> PartialEq<&str> for StaticString<CAP> {
    fn eq(&self, other: &&str) -> bool {
        self.eq_str(other)
    }
}

impl<const CAP: usize> PartialEq<StaticString<CAP>> for str {
    fn eq(&self, other: &StaticString<CAP>) -> bool {
        other.eq_str(self)
    }
}

impl<const CAP: usize> PartialEq<StaticString<CAP>> for &str {
    fn eq(&self, other: &StaticString<CAP>) -> bool {
        other.eq_str(self)
    }
}
