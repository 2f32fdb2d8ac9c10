//! UTF-16 code unit buffers and surrogate-pair decoding.
//!
//! Layout operates on 16-bit code units so that caller-side cursor indices
//! line up with positional per-glyph arrays. Decoding is a pure function of
//! two adjacent units and works the same for fixed slices and growable
//! buffers.

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;

/// A random-access sequence of UTF-16 code units.
///
/// Implemented for `[u16]` (read-only) and [`Utf16Buffer`] (growable). The
/// decoding rules never depend on which representation backs the text.
pub trait TextBuffer {
    fn len(&self) -> usize;

    /// Returns the code unit at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    fn unit(&self, index: usize) -> u16;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TextBuffer for [u16] {
    fn len(&self) -> usize {
        <[u16]>::len(self)
    }

    fn unit(&self, index: usize) -> u16 {
        self[index]
    }
}

impl TextBuffer for Vec<u16> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn unit(&self, index: usize) -> u16 {
        self[index]
    }
}

impl<B: TextBuffer + ?Sized> TextBuffer for &B {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn unit(&self, index: usize) -> u16 {
        (**self).unit(index)
    }
}

/// Growable UTF-16 text buffer, the mutable counterpart to a `&[u16]` slice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Utf16Buffer {
    units: Vec<u16>,
}

impl Utf16Buffer {
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            units: Vec::with_capacity(capacity),
        }
    }

    /// Appends a character, encoding it as one or two code units.
    pub fn push(&mut self, ch: char) {
        let mut encoded = [0u16; 2];
        self.units.extend_from_slice(ch.encode_utf16(&mut encoded));
    }

    pub fn push_str(&mut self, text: &str) {
        self.units.extend(text.encode_utf16());
    }

    /// Appends a raw code unit. Lone surrogates are allowed; they decode back
    /// as their raw 16-bit value.
    pub fn push_unit(&mut self, unit: u16) {
        self.units.push(unit);
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn as_units(&self) -> &[u16] {
        &self.units
    }
}

impl TextBuffer for Utf16Buffer {
    fn len(&self) -> usize {
        self.units.len()
    }

    fn unit(&self, index: usize) -> u16 {
        self.units[index]
    }
}

impl From<&str> for Utf16Buffer {
    fn from(text: &str) -> Self {
        Self {
            units: text.encode_utf16().collect(),
        }
    }
}

fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_SURROGATE_START..=HIGH_SURROGATE_END).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (LOW_SURROGATE_START..=LOW_SURROGATE_END).contains(&unit)
}

/// Returns whether the unit at `index` begins a surrogate pair.
pub fn is_surrogate_pair<B: TextBuffer + ?Sized>(text: &B, index: usize) -> bool {
    is_high_surrogate(text.unit(index))
        && index + 1 < text.len()
        && is_low_surrogate(text.unit(index + 1))
}

/// Decodes the codepoint starting at `index` and the number of code units it
/// consumed (1 or 2).
///
/// A lone surrogate decodes as its raw 16-bit value; there is no validation
/// and no substitution character.
pub fn decode_at<B: TextBuffer + ?Sized>(text: &B, index: usize) -> (u32, usize) {
    let unit = text.unit(index);
    if is_surrogate_pair(text, index) {
        let low = text.unit(index + 1);
        let codepoint = 0x10000
            + ((u32::from(unit) - u32::from(HIGH_SURROGATE_START)) << 10)
            + (u32::from(low) - u32::from(LOW_SURROGATE_START));
        return (codepoint, 2);
    }
    (u32::from(unit), 1)
}

/// Lazy iterator over `(codepoint, consumed_units)` pairs of a text buffer.
#[derive(Clone)]
pub struct Codepoints<'a, B: ?Sized> {
    text: &'a B,
    index: usize,
}

impl<'a, B: TextBuffer + ?Sized> Codepoints<'a, B> {
    pub fn new(text: &'a B) -> Self {
        Self { text, index: 0 }
    }

    /// Rewinds the iterator to the start of the buffer.
    pub fn restart(&mut self) {
        self.index = 0;
    }
}

impl<B: TextBuffer + ?Sized> Iterator for Codepoints<'_, B> {
    type Item = (u32, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.text.len() {
            return None;
        }
        let (codepoint, width) = decode_at(self.text, self.index);
        self.index += width;
        Some((codepoint, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn bmp_units_decode_one_to_one() {
        let buf = units("Ab\n");
        let decoded: Vec<_> = Codepoints::new(buf.as_slice()).collect();
        assert_eq!(
            decoded,
            vec![(u32::from('A'), 1), (u32::from('b'), 1), (u32::from('\n'), 1)]
        );
    }

    #[test]
    fn surrogate_pair_is_one_decode_step() {
        // U+1F600 encodes as D83D DE00.
        let buf = units("😀");
        assert_eq!(buf.len(), 2);
        let decoded: Vec<_> = Codepoints::new(buf.as_slice()).collect();
        assert_eq!(decoded, vec![(0x1F600, 2)]);
    }

    #[test]
    fn decoding_is_independent_of_buffer_representation() {
        let fixed = units("a😀b");
        let mut growable = Utf16Buffer::new();
        growable.push('a');
        growable.push('😀');
        growable.push('b');

        let from_fixed: Vec<_> = Codepoints::new(fixed.as_slice()).collect();
        let from_growable: Vec<_> = Codepoints::new(&growable).collect();
        assert_eq!(from_fixed, from_growable);
    }

    #[test]
    fn lone_surrogates_pass_through_raw() {
        let mut buf = Utf16Buffer::new();
        buf.push_unit(0xD83D); // high surrogate with no low to follow
        buf.push_unit(u16::from(b'x'));
        buf.push_unit(0xDE00); // stray low surrogate

        let decoded: Vec<_> = Codepoints::new(&buf).collect();
        assert_eq!(decoded, vec![(0xD83D, 1), (u32::from('x'), 1), (0xDE00, 1)]);
    }

    #[test]
    fn high_surrogate_at_end_of_buffer_is_raw() {
        let buf = vec![0xD800u16];
        assert!(!is_surrogate_pair(buf.as_slice(), 0));
        assert_eq!(decode_at(buf.as_slice(), 0), (0xD800, 1));
    }

    #[test]
    fn iterator_is_restartable() {
        let buf = units("hi");
        let mut it = Codepoints::new(buf.as_slice());
        assert!(it.next().is_some());
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        it.restart();
        assert_eq!(it.next(), Some((u32::from('h'), 1)));
    }

    #[test]
    fn buffer_edits_are_visible_to_new_passes() {
        let mut buf = Utf16Buffer::from("a");
        assert_eq!(Codepoints::new(&buf).count(), 1);
        buf.push_str("😀");
        assert_eq!(Codepoints::new(&buf).count(), 2);
        buf.clear();
        assert!(buf.is_empty());
    }
}
