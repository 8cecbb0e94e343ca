use std::fmt;

/// One of the three containers under comparison, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Candidate {
    /// `std::collections::HashMap`, the unordered baseline.
    Dict,
    /// [`crate::maps::OrderedDict`], the reference every ratio is taken against.
    OrderedDict,
    /// [`crate::maps::KeyListDict`].
    KeyListDict,
}

impl Candidate {
    pub const ALL: [Candidate; 3] = [
        Candidate::Dict,
        Candidate::OrderedDict,
        Candidate::KeyListDict,
    ];

    pub const BASELINE: Candidate = Candidate::Dict;
    pub const REFERENCE: Candidate = Candidate::OrderedDict;
    pub const THIRD: Candidate = Candidate::KeyListDict;

    pub fn label(self) -> &'static str {
        match self {
            Candidate::Dict => "hashmap",
            Candidate::OrderedDict => "ordereddict",
            Candidate::KeyListDict => "keylist",
        }
    }

    /// Column position in the result table.
    pub fn slot(self) -> usize {
        match self {
            Candidate::Dict => 0,
            Candidate::OrderedDict => 1,
            Candidate::KeyListDict => 2,
        }
    }

    pub fn is_baseline(self) -> bool {
        self == Self::BASELINE
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
