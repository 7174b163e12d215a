use std::fmt::Display;
use std::io::{self, Stdout, Write};
use log::warn;
use crate::connector::Sink;

/// Writes every item as one line, on stdout unless another writer is given.
#[derive(Debug)]
pub struct Print<W: Write + Send = Stdout> {
    out: W,
}

impl Print {
    pub fn stdout() -> Self {
        Print { out: io::stdout() }
    }
}

impl Default for Print {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write + Send> Print<W> {
    pub fn new(out: W) -> Self {
        Print { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<T: Display, W: Write + Send> Sink<T> for Print<W> {
    fn write(&mut self, item: T) {
        if let Err(e) = writeln!(self.out, "{}", item).and_then(|_| self.out.flush()) {
            warn!("Fail to print {}: {}", item, e);
        }
    }
}
