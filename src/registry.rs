use crate::graph::BlockKind;
use ahash::AHashMap;

/// Defines the contract for one block kind: which ports it exposes and how it
/// folds its operand into the running accumulator.
pub trait BlockBehavior: Send + Sync {
    /// The registry key, matching [`BlockKind::name`].
    fn kind(&self) -> &str;
    fn has_input_port(&self) -> bool;
    fn has_output_port(&self) -> bool;
    /// Operator shown in evaluation traces.
    fn symbol(&self) -> &str;
    /// Applies the operand to the accumulator. `None` means the kind does not
    /// fold, and the accumulator passes through unchanged.
    fn fold(&self, accumulator: f64, operand: f64) -> Option<f64>;
}

/// Master macro to define the built-in block behaviors, their registration, and their creation.
macro_rules! define_block_behaviors {
    ( $( ($struct_name:ident, $kind:literal, $symbol:literal, input: $input:expr, output: $output:expr, $fold:expr) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl BlockBehavior for $struct_name {
                fn kind(&self) -> &str { $kind }
                fn has_input_port(&self) -> bool { $input }
                fn has_output_port(&self) -> bool { $output }
                fn symbol(&self) -> &str { $symbol }
                fn fold(&self, accumulator: f64, operand: f64) -> Option<f64> {
                    let fold: fn(f64, f64) -> Option<f64> = $fold;
                    fold(accumulator, operand)
                }
            }
        )*

        fn register_default_behaviors(registry: &mut AHashMap<String, Box<dyn BlockBehavior>>) {
            $( registry.insert($kind.to_string(), Box::new($struct_name)); )*
        }

        /// Creates a built-in behavior by its kind name.
        pub fn create_behavior_by_name(name: &str) -> Option<Box<dyn BlockBehavior>> {
            match name {
                $( $kind => Some(Box::new($struct_name)), )*
                _ => None,
            }
        }
    };
}

define_block_behaviors! {
    (InputBehavior, "input", "", input: false, output: true, |_, _| None),
    (AddBehavior, "add", "+", input: true, output: true, |acc, operand| Some(acc + operand)),
    (MultiplyBehavior, "multiply", "×", input: true, output: true, |acc, operand| Some(acc * operand)),
}

/// Maps a block's kind to its port shape and fold operation.
///
/// Kinds that are not registered expose both ports and fold as a no-op.
pub struct BlockRegistry {
    behaviors: AHashMap<String, Box<dyn BlockBehavior>>,
}

impl BlockRegistry {
    /// Creates a registry holding the `input`, `add` and `multiply` behaviors.
    pub fn new() -> Self {
        let mut behaviors: AHashMap<String, Box<dyn BlockBehavior>> = AHashMap::new();
        register_default_behaviors(&mut behaviors);
        Self { behaviors }
    }

    /// Registers (or replaces) a behavior under its own kind name.
    pub fn with_behavior(mut self, behavior: Box<dyn BlockBehavior>) -> Self {
        self.register(behavior);
        self
    }

    /// Makes `user_kind` behave like the built-in kind `builtin_kind`.
    pub fn with_alias(mut self, user_kind: &str, builtin_kind: &str) -> Self {
        if let Some(behavior) = create_behavior_by_name(builtin_kind) {
            self.behaviors.insert(user_kind.to_string(), behavior);
        }
        self
    }

    pub fn register(&mut self, behavior: Box<dyn BlockBehavior>) {
        self.behaviors.insert(behavior.kind().to_string(), behavior);
    }

    pub fn get(&self, kind: &BlockKind) -> Option<&dyn BlockBehavior> {
        self.behaviors.get(kind.name()).map(|b| b.as_ref())
    }

    pub fn has_input_port(&self, kind: &BlockKind) -> bool {
        self.get(kind).is_none_or(|b| b.has_input_port())
    }

    pub fn has_output_port(&self, kind: &BlockKind) -> bool {
        self.get(kind).is_none_or(|b| b.has_output_port())
    }

    /// Folds `operand` into `accumulator` for `kind`, passing the accumulator
    /// through for kinds without a fold.
    pub fn fold(&self, kind: &BlockKind, accumulator: f64, operand: f64) -> f64 {
        self.get(kind)
            .and_then(|b| b.fold(accumulator, operand))
            .unwrap_or(accumulator)
    }

    /// Operator for `kind` in traces; empty for kinds without a behavior, which
    /// marks their steps as pass-through.
    pub fn symbol(&self, kind: &BlockKind) -> &str {
        self.get(kind).map_or("", |b| b.symbol())
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
