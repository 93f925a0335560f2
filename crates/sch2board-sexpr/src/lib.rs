//! A scanner that finds parenthesised blocks by their head token without
//! building a syntax tree.
//!
//! KiCad documents are large S-expressions, but placement only needs a few
//! kinds of records out of them. [`blocks`] walks the text once and yields each
//! balanced `(head ...)` block that is not nested inside another block of the
//! same scan. Parentheses inside quoted strings are never structural.

use std::iter::FusedIterator;

/// A balanced block found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Byte offset of the opening parenthesis
    pub start: usize,
    /// Byte offset one past the closing parenthesis
    pub end: usize,
    /// The block text, `input[start..end]`
    pub text: &'a str,
}

/// Iterator over top-level blocks whose head token matches a name.
///
/// The iterator is lazy and cheap to clone; a clone (or [`Blocks::reset`])
/// restarts the scan from the beginning of the document.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    input: &'a str,
    head: &'a str,
    pos: usize,
    yielded: usize,
}

/// Scan `input` for `(head ...)` blocks.
pub fn blocks<'a>(input: &'a str, head: &'a str) -> Blocks<'a> {
    log::trace!("Scanning {} bytes for ({head} ...) blocks", input.len());
    Blocks {
        input,
        head,
        pos: 0,
        yielded: 0,
    }
}

impl<'a> Blocks<'a> {
    /// Restart the scan from the beginning of the document.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.yielded = 0;
    }

    /// Whether an opening parenthesis at `open` is followed by the head token
    /// and a token boundary.
    fn opens_block(&self, open: usize) -> bool {
        let after = open + 1;
        if !self.input[after..].starts_with(self.head) {
            return false;
        }
        match self.input.as_bytes().get(after + self.head.len()) {
            Some(b) => b.is_ascii_whitespace() || *b == b'(' || *b == b')',
            // Nothing can close a block that ends at the head token.
            None => false,
        }
    }

    fn finish(&mut self) {
        if self.pos < self.input.len() {
            log::trace!(
                "Unbalanced ({} ...) block at offset {}, ignoring the rest of the document",
                self.head,
                self.pos
            );
        }
        self.pos = self.input.len();
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        let bytes = self.input.as_bytes();
        let mut in_quote = false;
        let mut i = self.pos;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' if in_quote => {
                    i += 2;
                    continue;
                }
                b'"' => in_quote = !in_quote,
                b'(' if !in_quote && self.opens_block(i) => {
                    return match closing_offset(bytes, i) {
                        Some(end) => {
                            self.pos = end;
                            self.yielded += 1;
                            Some(Block {
                                start: i,
                                end,
                                text: &self.input[i..end],
                            })
                        }
                        None => {
                            self.pos = i;
                            self.finish();
                            None
                        }
                    };
                }
                _ => {}
            }
            i += 1;
        }

        if self.pos < bytes.len() {
            log::trace!("Found {} ({} ...) blocks", self.yielded, self.head);
        }
        self.pos = bytes.len();
        None
    }
}

impl FusedIterator for Blocks<'_> {}

/// Offset one past the parenthesis that balances the one at `open`.
fn closing_offset(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut k = open;

    while k < bytes.len() {
        let b = bytes[k];
        if in_quote {
            match b {
                b'\\' => {
                    k += 2;
                    continue;
                }
                b'"' => in_quote = false,
                _ => {}
            }
        } else {
            match b {
                b'"' => in_quote = true,
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(k + 1);
                    }
                }
                _ => {}
            }
        }
        k += 1;
    }

    None
}
