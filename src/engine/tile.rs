/// One occupied cell's value holder.
///
/// The value is a power of two, at least 2. The only mutation is [`Tile::double`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    value: u32,
}

impl Tile {
    pub(crate) fn new(value: u32) -> Self {
        debug_assert!(value >= 2 && value.is_power_of_two());
        Tile { value }
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Multiply the value by two. No bounds check.
    #[inline]
    pub fn double(&mut self) {
        self.value *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_twice() {
        let mut t = Tile::new(2);
        t.double();
        assert_eq!(t.value(), 4);
        t.double();
        assert_eq!(t.value(), 8);
    }
}
