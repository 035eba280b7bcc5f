/// cursor.rs — Bidirectional cursor over a byte buffer with deletion skipping
///
/// `IndexCursor` is oblivious to DNA semantics: it knows only a position, a
/// travel direction, and a single sentinel byte to skip over. The buffer and
/// sentinel are supplied by the caller on every call rather than stored on
/// the cursor itself, which keeps the type a plain `Copy` value — no
/// lifetime parameter, so it can sit in a hash map key or travel across a
/// `&mut Sequence` call without fighting the borrow checker.

/// Forward past-the-end is `buffer.len()`; reverse past-the-end ("one before
/// the first cell") is this sentinel value, mirroring the `NPOS =
/// static_cast<size_t>(-1)` idiom the cursor's semantics were grounded on.
pub(crate) const LEFT_END: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy)]
pub struct IndexCursor {
    position: usize,
    direction: Direction,
}

impl IndexCursor {
    /// Constructs a cursor at `start_pos`, snapping forward (or backward, for
    /// a reverse cursor) past any sentinel cells. Snapping past either end of
    /// the buffer yields the canonical past-the-end value for `direction`.
    pub fn make(buffer: &[u8], start_pos: usize, sentinel: u8, direction: Direction) -> Self {
        let position = match direction {
            Direction::Forward => {
                let mut p = start_pos;
                while p < buffer.len() && buffer[p] == sentinel {
                    p += 1;
                }
                p
            }
            Direction::Reverse => {
                if start_pos == LEFT_END || buffer.is_empty() {
                    LEFT_END
                } else {
                    let mut p = start_pos.min(buffer.len() - 1);
                    loop {
                        if buffer[p] != sentinel {
                            break p;
                        }
                        if p == 0 {
                            break LEFT_END;
                        }
                        p -= 1;
                    }
                }
            }
        };
        IndexCursor { position, direction }
    }

    pub fn make_right_end(buffer_len: usize) -> Self {
        IndexCursor {
            position: buffer_len,
            direction: Direction::Forward,
        }
    }

    pub fn make_left_end() -> Self {
        IndexCursor {
            position: LEFT_END,
            direction: Direction::Reverse,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn valid(&self, buffer_len: usize) -> bool {
        match self.direction {
            Direction::Forward => self.position < buffer_len,
            Direction::Reverse => self.position != LEFT_END,
        }
    }

    /// Undefined (a contract violation) if not `valid()`.
    pub fn deref(&self, buffer: &[u8]) -> u8 {
        debug_assert!(
            self.position < buffer.len(),
            "deref of past-the-end index cursor"
        );
        buffer[self.position]
    }

    pub fn advance(&mut self, buffer: &[u8], sentinel: u8) {
        self.position = match self.direction {
            Direction::Forward => scan_up(buffer, self.position, sentinel),
            Direction::Reverse => scan_down(buffer, self.position, sentinel),
        };
    }

    pub fn retreat(&mut self, buffer: &[u8], sentinel: u8) {
        self.position = match self.direction {
            Direction::Forward => scan_down(buffer, self.position, sentinel),
            Direction::Reverse => scan_up(buffer, self.position, sentinel),
        };
    }

    /// Arithmetic jump valid only when the buffer holds no deletions —
    /// callers fall back to `count` calls of `advance` otherwise.
    pub fn jump_no_deletions(&mut self, buffer_len: usize, count: usize) {
        match self.direction {
            Direction::Forward => {
                self.position = self.position.saturating_add(count).min(buffer_len);
            }
            Direction::Reverse => {
                if self.position == LEFT_END {
                    // already past-the-end
                } else if self.position < count {
                    self.position = LEFT_END;
                } else {
                    self.position -= count;
                }
            }
        }
    }
}

/// Two cursors are equal iff their positions compare equal, regardless of
/// direction.
impl PartialEq for IndexCursor {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}
impl Eq for IndexCursor {}

/// Smallest index strictly greater than `from` whose cell isn't `sentinel`,
/// or `buffer.len()` if none exists. `from == LEFT_END` scans from the start.
fn scan_up(buffer: &[u8], from: usize, sentinel: u8) -> usize {
    let mut p = if from == LEFT_END {
        0
    } else if from >= buffer.len() {
        return buffer.len();
    } else {
        from + 1
    };
    while p < buffer.len() && buffer[p] == sentinel {
        p += 1;
    }
    p
}

/// Largest index strictly less than `from` whose cell isn't `sentinel`, or
/// `LEFT_END` if none exists. `from >= buffer.len()` scans from the last cell.
fn scan_down(buffer: &[u8], from: usize, sentinel: u8) -> usize {
    if from == LEFT_END {
        return LEFT_END;
    }
    let start = from.min(buffer.len());
    if start == 0 {
        return LEFT_END;
    }
    let mut p = start - 1;
    loop {
        if buffer[p] != sentinel {
            return p;
        }
        if p == 0 {
            return LEFT_END;
        }
        p -= 1;
    }
}
