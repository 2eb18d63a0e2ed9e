//! Parser configuration

/// How subscripted variables and array declarations are evaluated
///
/// Array syntax is always recognized by the grammar; arrays have no runtime
/// storage, so the policy decides what a use of one means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayPolicy {
    /// Any subscript, or any reference to an array-declared name, fails
    /// with `UnsupportedArray`
    #[default]
    Reject,
    /// Subscripts are parsed and their index evaluated; element writes are
    /// type-checked and dropped, element reads yield an unset value
    Ignore,
}

/// Configuration for a single parse
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Treatment of array syntax
    pub arrays: ArrayPolicy,
    /// Maximum nesting of expressions and statements
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            arrays: ArrayPolicy::Reject,
            max_depth: 256,
        }
    }
}

impl ParserConfig {
    /// Returns the config with the given array policy
    pub fn with_arrays(mut self, arrays: ArrayPolicy) -> Self {
        self.arrays = arrays;
        self
    }

    /// Returns the config with the given nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
