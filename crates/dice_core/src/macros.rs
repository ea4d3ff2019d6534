//! Named roll presets.
//!
//! A macro pairs a user-chosen name with a [`DiceRoll`]. Names are unique
//! under case-sensitive exact comparison.

use tracing::debug;

use crate::roll::{parse_roll_expression, DiceRoll, ParseRollError};

/// A named, reusable roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Macro {
    /// Display name; never empty.
    pub name: String,
    /// The roll this macro performs.
    pub roll: DiceRoll,
}

impl Macro {
    /// Button label in the form `name(3d6)`.
    pub fn label(&self) -> String {
        format!("{}({})", self.name, self.roll)
    }
}

/// Why a macro could not be created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MacroError {
    /// The name is the empty string.
    #[error("please use a valid name")]
    EmptyName,
    /// Another macro already uses this name.
    #[error("Macro name already exists")]
    DuplicateName(String),
    /// The roll text is not a valid `NdS` expression.
    #[error("Invalid macro: {0}")]
    InvalidRoll(#[from] ParseRollError),
}

/// Ordered list of macros.
#[derive(Clone, Debug, Default)]
pub struct MacroList {
    items: Vec<Macro>,
}

impl MacroList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a macro at the end of the list.
    ///
    /// Rejected without modifying the list if `name` is empty or already taken.
    pub fn add(&mut self, name: &str, roll: DiceRoll) -> Result<(), MacroError> {
        if name.is_empty() {
            debug!("attempted to create macro with an empty name");
            return Err(MacroError::EmptyName);
        }
        if self.contains(name) {
            debug!(name, "attempted to create macro with existing name");
            return Err(MacroError::DuplicateName(name.to_string()));
        }
        self.items.push(Macro {
            name: name.to_string(),
            roll,
        });
        Ok(())
    }

    /// Parses `roll_text` and adds the macro.
    pub fn create_from_text(&mut self, name: &str, roll_text: &str) -> Result<(), MacroError> {
        let roll = parse_roll_expression(roll_text)?;
        self.add(name, roll)
    }

    /// Removes the macro at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Macro> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Returns `true` if a macro with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|m| m.name == name)
    }

    /// The macro at `index`.
    pub fn get(&self, index: usize) -> Option<&Macro> {
        self.items.get(index)
    }

    /// Iterates macros in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Macro> {
        self.items.iter()
    }

    /// Number of macros.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no macros are defined.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a MacroList {
    type Item = &'a Macro;
    type IntoIter = std::slice::Iter<'a, Macro>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &MacroList) -> Vec<&str> {
        list.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn add_and_get() {
        let mut list = MacroList::new();
        list.add("attack", DiceRoll::new(2, 6)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().roll, DiceRoll::new(2, 6));
    }

    #[test]
    fn empty_name_rejected() {
        let mut list = MacroList::new();
        assert_eq!(list.add("", DiceRoll::new(1, 6)), Err(MacroError::EmptyName));
        assert!(list.is_empty());
    }

    #[test]
    fn duplicate_name_leaves_list_unchanged() {
        let mut list = MacroList::new();
        list.add("fireball", DiceRoll::new(8, 6)).unwrap();
        list.add("heal", DiceRoll::new(2, 4)).unwrap();
        let before: Vec<Macro> = list.iter().cloned().collect();

        let err = list.add("fireball", DiceRoll::new(1, 6)).unwrap_err();
        assert_eq!(err, MacroError::DuplicateName("fireball".into()));
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut list = MacroList::new();
        list.add("Heal", DiceRoll::new(1, 6)).unwrap();
        list.add("heal", DiceRoll::new(1, 6)).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_preserves_order() {
        let mut list = MacroList::new();
        for name in ["a", "b", "c", "d"] {
            list.add(name, DiceRoll::new(1, 6)).unwrap();
        }
        let removed = list.remove(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&list), vec!["a", "c", "d"]);

        list.remove(2).unwrap();
        assert_eq!(names(&list), vec!["a", "c"]);
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut list = MacroList::new();
        list.add("a", DiceRoll::new(1, 6)).unwrap();
        assert!(list.remove(5).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn create_from_text_validates_roll() {
        let mut list = MacroList::new();
        list.create_from_text("my macro", "12d6").unwrap();
        assert_eq!(list.get(0).unwrap().roll, DiceRoll::new(12, 6));

        let err = list.create_from_text("bad", "12x6").unwrap_err();
        assert!(matches!(err, MacroError::InvalidRoll(_)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn label_format() {
        let m = Macro {
            name: "sneak".into(),
            roll: DiceRoll::new(3, 6),
        };
        assert_eq!(m.label(), "sneak(3d6)");
    }
}
