#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source code location.
///
/// Rows are 1-based; columns are 0-based byte offsets into the row, matching
/// the convention of Python AST nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    row: u32,
    column: u32,
}

impl Default for Location {
    fn default() -> Self {
        Self { row: 1, column: 0 }
    }
}

impl Location {
    pub fn fmt_with(
        &self,
        f: &mut std::fmt::Formatter,
        e: &impl std::fmt::Display,
    ) -> std::fmt::Result {
        write!(f, "{} at line {} column {}", e, self.row(), self.column())
    }
}

impl Location {
    /// Creates a new Location object at the given row and column.
    pub fn new(row: usize, column: usize) -> Self {
        let row = row.try_into().expect("Location::row over u32");
        let column = column.try_into().expect("Location::column over u32");
        Location { row, column }
    }

    /// Current row
    pub fn row(&self) -> usize {
        self.row as usize
    }

    /// Current column
    pub fn column(&self) -> usize {
        self.column as usize
    }

    pub fn reset(&mut self) {
        self.row = 1;
        self.column = 0;
    }

    pub fn go_right(&mut self) {
        self.column += 1;
    }

    pub fn newline(&mut self) {
        self.row += 1;
        self.column = 0;
    }

    pub fn with_col_offset<T: TryInto<isize>>(&self, offset: T) -> Self
    where
        <T as TryInto<isize>>::Error: std::fmt::Debug,
    {
        let column = (self.column as isize
            + offset
                .try_into()
                .expect("offset should be able to convert to isize")) as u32;
        Self {
            row: self.row,
            column,
        }
    }

    pub fn with_row_offset<T: TryInto<isize>>(&self, offset: T) -> Self
    where
        <T as TryInto<isize>>::Error: std::fmt::Debug,
    {
        let row = (self.row as isize
            + offset
                .try_into()
                .expect("offset should be able to convert to isize")) as u32;
        Self {
            row,
            column: self.column,
        }
    }
}

/// An inclusive-start, exclusive-end span between two [`Location`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceRange {
    pub start: Location,
    pub end: Location,
}

impl SourceRange {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// The smallest range covering both `self` and `other`.
    pub fn cover(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<Location> for SourceRange {
    fn from(loc: Location) -> Self {
        Self {
            start: loc,
            end: loc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gt() {
        assert!(Location::new(1, 2) > Location::new(1, 1));
        assert!(Location::new(2, 1) > Location::new(1, 1));
        assert!(Location::new(2, 1) > Location::new(1, 2));
    }

    #[test]
    fn test_lt() {
        assert!(Location::new(1, 1) < Location::new(1, 2));
        assert!(Location::new(1, 1) < Location::new(2, 1));
        assert!(Location::new(1, 2) < Location::new(2, 1));
    }

    #[test]
    fn test_with_col_offset() {
        assert_eq!(Location::new(1, 1).with_col_offset(1), Location::new(1, 2));
        assert_eq!(Location::new(1, 1).with_col_offset(-1), Location::new(1, 0));
    }

    #[test]
    fn test_with_row_offset() {
        assert_eq!(Location::new(1, 1).with_row_offset(1), Location::new(2, 1));
        assert_eq!(Location::new(1, 1).with_row_offset(-1), Location::new(0, 1));
    }

    #[test]
    fn test_cover() {
        let a = SourceRange::new(Location::new(1, 0), Location::new(1, 4));
        let b = SourceRange::new(Location::new(2, 2), Location::new(3, 0));
        assert_eq!(a.cover(b), SourceRange::new(a.start, b.end));
        assert!(a.cover(b).contains(&a));
        assert!(a.cover(b).contains(&b));
    }
}
