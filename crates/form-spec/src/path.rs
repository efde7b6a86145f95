use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Location of a value inside the submitted bag, rendered dotted/indexed as
/// in `companions[0].name`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Empty path addressing the top-level bag.
    pub fn root() -> Self {
        Self::default()
    }

    /// New path with a field segment appended; the original is untouched.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(name.into()));
        Self { segments }
    }

    /// New path with an entry index appended; the original is untouched.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if position > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
