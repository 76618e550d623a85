use std::fmt;

// === FormatSink === //

/// Destination for formatted code units.
pub trait FormatSink {
    fn put(&mut self, ch: u8);

    fn put_slice(&mut self, chars: &[u8]) {
        for &ch in chars {
            self.put(ch);
        }
    }

    fn put_repeated(&mut self, ch: u8, count: usize) {
        for _ in 0..count {
            self.put(ch);
        }
    }
}

impl<S: ?Sized + FormatSink> FormatSink for &mut S {
    fn put(&mut self, ch: u8) {
        (**self).put(ch);
    }

    fn put_slice(&mut self, chars: &[u8]) {
        (**self).put_slice(chars);
    }

    fn put_repeated(&mut self, ch: u8, count: usize) {
        (**self).put_repeated(ch, count);
    }
}

impl FormatSink for Vec<u8> {
    fn put(&mut self, ch: u8) {
        self.push(ch);
    }

    fn put_slice(&mut self, chars: &[u8]) {
        self.extend_from_slice(chars);
    }

    fn put_repeated(&mut self, ch: u8, count: usize) {
        self.resize(self.len() + count, ch);
    }
}

// === Counter === //

/// Counts code units without storing them.
#[derive(Debug, Clone, Default)]
pub struct Counter(pub usize);

impl FormatSink for Counter {
    fn put(&mut self, _ch: u8) {
        self.0 += 1;
    }

    fn put_slice(&mut self, chars: &[u8]) {
        self.0 += chars.len();
    }

    fn put_repeated(&mut self, _ch: u8, count: usize) {
        self.0 += count;
    }
}

// === SinkFn === //

/// Adapts a closure taking one code unit at a time.
#[derive(Copy, Clone)]
pub struct SinkFn<F>(pub F);

impl<F> fmt::Debug for SinkFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SinkFn(..)")
    }
}

impl<F: FnMut(u8)> FormatSink for SinkFn<F> {
    fn put(&mut self, ch: u8) {
        (self.0)(ch)
    }
}

// === BufferedWriter === //

const BUFFER_CAPACITY: usize = 120;

/// Collects code units into a fixed buffer and hands them to `F` in chunks. Anything still
/// buffered is flushed on drop.
pub struct BufferedWriter<F: FnMut(&[u8])> {
    buffer: [u8; BUFFER_CAPACITY],
    used: usize,
    emit: F,
}

impl<F: FnMut(&[u8])> fmt::Debug for BufferedWriter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedWriter")
            .field("used", &self.used)
            .finish_non_exhaustive()
    }
}

impl<F: FnMut(&[u8])> BufferedWriter<F> {
    pub const CAPACITY: usize = BUFFER_CAPACITY;

    pub const fn new(emit: F) -> Self {
        Self {
            buffer: [0; BUFFER_CAPACITY],
            used: 0,
            emit,
        }
    }

    pub fn flush(&mut self) {
        if self.used == 0 {
            return;
        }

        (self.emit)(&self.buffer[..self.used]);
        self.used = 0;
    }
}

impl<F: FnMut(&[u8])> FormatSink for BufferedWriter<F> {
    fn put(&mut self, ch: u8) {
        if self.used == Self::CAPACITY {
            self.flush();
        }

        self.buffer[self.used] = ch;
        self.used += 1;
    }

    fn put_slice(&mut self, chars: &[u8]) {
        if chars.len() > Self::CAPACITY - self.used {
            self.flush();
        }

        if chars.len() >= Self::CAPACITY {
            (self.emit)(chars);
        } else {
            self.buffer[self.used..][..chars.len()].copy_from_slice(chars);
            self.used += chars.len();
        }
    }
}

impl<F: FnMut(&[u8])> Drop for BufferedWriter<F> {
    fn drop(&mut self) {
        self.flush();
    }
}
