//! Source map for bidirectional mapping between binary and source locations

/// Which source line produced which bytes.
///
/// Entries are recorded in emission order. Addresses only ever increase while
/// assembling (a backwards origin is rejected), so the forward map stays sorted
/// and lookups can binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    entries: Vec<(AddressRange, usize)>,
}

/// A range of emitted addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    /// Starting address (inclusive)
    pub start: u16,

    /// Number of bytes
    pub len: u16,
}

impl AddressRange {
    pub fn contains(&self, address: u16) -> bool {
        address >= self.start && ((address - self.start) as u32) < self.len as u32
    }
}

impl SourceMap {
    /// Create a new empty source map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `line` emitted `len` bytes starting at `start`.
    pub fn add_mapping(&mut self, start: u16, len: u16, line: usize) {
        if len > 0 {
            self.entries.push((AddressRange { start, len }, line));
        }
    }

    /// Source line whose bytes cover `address`.
    pub fn line_for_address(&self, address: u16) -> Option<usize> {
        let idx = self
            .entries
            .partition_point(|(range, _)| range.start <= address)
            .checked_sub(1)?;
        let (range, line) = self.entries[idx];
        range.contains(address).then_some(line)
    }

    /// Bytes emitted by `line`, if any.
    pub fn address_range(&self, line: usize) -> Option<AddressRange> {
        self.entries
            .iter()
            .find(|(_, l)| *l == line)
            .map(|(range, _)| *range)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
