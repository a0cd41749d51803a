impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

use rustc_hash::FxHashMap;

/// The action a user-defined token performs when dispatched during the run pass.  The language
/// defines exactly two kinds of definition, so a closed tagged variant is all the dispatch table
/// needs to hold.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WordAction {
    /// Push a data-space address that was captured when the label was defined with `v`.
    PushAddress(i32),

    /// Push the current cursor onto the return stack and jump to the body offset that was
    /// captured when the word was defined with `:`.
    Call(usize),
}

/// The chorth dispatch table.  Maps a token byte to the user definition registered for it during
/// the compile pass.  Built-in tokens are never entered here; the run pass matches them before
/// consulting the table, so a user definition can never shadow a built-in.
///
/// The table is only written during the compile pass and only read during the run pass.
pub struct Dictionary {
    words: FxHashMap<u8, WordAction>,
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: FxHashMap::default(),
        }
    }

    /// Insert a definition for a token byte.  Redefining a byte replaces the earlier definition.
    pub fn insert(&mut self, name: u8, action: WordAction) {
        let _ = self.words.insert(name, action);
    }

    /// Try to get the definition registered for a token byte.
    pub fn try_get(&self, name: u8) -> Option<&WordAction> {
        self.words.get(&name)
    }
}
