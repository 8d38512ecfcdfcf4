use std::fmt;

/// Label of the exclusive "none" checkbox.
pub const NONE_OF_THE_ABOVE: &str = "None of the above";

/// One of the six lettered options offered for every figure question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Choice {
    /// All options, in display order.
    pub const ALL: [Choice; 6] = [
        Choice::A,
        Choice::B,
        Choice::C,
        Choice::D,
        Choice::E,
        Choice::F,
    ];

    /// The label shown next to the checkbox and written to the sink.
    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }

    /// Position of this option in [`Choice::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up an option by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw checkbox state of one question: six lettered boxes plus "none".
///
/// Unlike [`crate::Response`] this can hold a conflicting combination,
/// which is what the Proceed validation inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkboxes {
    choices: [bool; 6],
    none: bool,
}

impl Checkboxes {
    /// Whether the box for `choice` is checked.
    pub fn is_checked(&self, choice: Choice) -> bool {
        self.choices[choice.index()]
    }

    /// Whether "None of the above" is checked.
    pub fn none_checked(&self) -> bool {
        self.none
    }

    /// Set the box for `choice`.
    pub fn set(&mut self, choice: Choice, checked: bool) {
        self.choices[choice.index()] = checked;
    }

    /// Set the "None of the above" box.
    pub fn set_none(&mut self, checked: bool) {
        self.none = checked;
    }

    /// Checked lettered options, in A..F order.
    pub fn checked_choices(&self) -> Vec<Choice> {
        Choice::ALL
            .into_iter()
            .filter(|c| self.is_checked(*c))
            .collect()
    }

    /// True if at least one of A..F is checked.
    pub fn any_choice(&self) -> bool {
        self.choices.iter().any(|&c| c)
    }
}
