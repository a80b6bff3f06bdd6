//! Keyword, Operator and Module Catalog
//!
//! Immutable classification tables for TLA+. The keyword classes are kept
//! pairwise disjoint so that a bucket never offers the same keyword twice and
//! proof contexts never leak a module-level starting keyword.

/// The escape marker that prefixes ASCII operator names (`\in`, `\cup`).
pub const ESCAPE_MARKER: char = '\\';

/// Keyword that introduces a list of standard modules.
pub const MODULE_IMPORT_KEYWORD: &str = "EXTENDS";

/// Declaration keywords after which nothing sensible can be completed.
pub const NO_COMPLETION_KEYWORDS: &[&str] = &["CONSTANT", "CONSTANTS", "RECURSIVE"];

/// Keywords that open a module-level unit. Only valid at the start of a line.
pub const STARTING_KEYWORDS: &[(&str, &str)] = &[
    ("EXTENDS", "Extend other modules"),
    ("VARIABLE", "Declare a state variable"),
    ("VARIABLES", "Declare state variables"),
    ("CONSTANT", "Declare a constant"),
    ("CONSTANTS", "Declare constants"),
    ("ASSUMPTION", "Declare a named assumption"),
    ("AXIOM", "Declare an axiom"),
    ("THEOREM", "Declare a theorem"),
    ("LEMMA", "Declare a lemma"),
    ("PROPOSITION", "Declare a proposition"),
    ("COROLLARY", "Declare a corollary"),
    ("PROOF", "Begin a proof"),
    ("RECURSIVE", "Declare a recursive operator"),
    ("LOCAL", "Local definition"),
    ("INSTANCE", "Instantiate a module"),
];

/// Keywords that open a proof step, valid right after a step number.
pub const PROOF_STARTING_KEYWORDS: &[(&str, &str)] = &[
    ("DEFINE", "Local definition in a proof"),
    ("USE", "Add facts to the proof context"),
    ("HIDE", "Remove facts from the proof context"),
    ("QED", "Conclude the proof"),
    ("HAVE", "Introduce an assumption"),
    ("OBVIOUS", "Step is trivially true"),
    ("OMITTED", "Proof omitted"),
    ("TAKE", "Introduce a bound variable"),
    ("WITNESS", "Provide a witness for an existential goal"),
    ("PICK", "Choose from an existential assumption"),
    ("SUFFICES", "Change the proof goal"),
];

/// Keywords valid anywhere an expression or clause may continue.
pub const GENERAL_KEYWORDS: &[(&str, &str)] = &[
    ("ASSUME", "State an assumption"),
    ("PROVE", "Goal of an ASSUME/PROVE"),
    ("NEW", "Introduce a new constant in ASSUME"),
    ("BY", "Prove by the listed facts"),
    ("DEF", "Definitions to expand"),
    ("DEFS", "Definitions to expand"),
    ("LET", "Local definitions"),
    ("IN", "Body of a LET expression"),
    ("IF", "Conditional expression"),
    ("THEN", "Then branch of IF"),
    ("ELSE", "Else branch of IF"),
    ("CASE", "Multi-way conditional"),
    ("OTHER", "Default CASE arm"),
    ("CHOOSE", "Hilbert's choice operator"),
    ("EXCEPT", "Function or record update"),
    ("DOMAIN", "Domain of a function"),
    ("SUBSET", "Power set"),
    ("UNION", "Generalized union"),
    ("ENABLED", "Action enablement"),
    ("UNCHANGED", "Variables left unchanged"),
    ("LAMBDA", "Anonymous operator"),
    ("WITH", "Instance parameter substitution"),
    ("SF_", "Strong fairness"),
    ("WF_", "Weak fairness"),
];

/// Built-in constant values.
pub const CONSTANTS: &[(&str, &str)] = &[
    ("TRUE", "Boolean true"),
    ("FALSE", "Boolean false"),
    ("BOOLEAN", "The set {TRUE, FALSE}"),
    ("STRING", "The set of all strings"),
];

/// Standard modules offered after `EXTENDS`.
pub const STANDARD_MODULES: &[(&str, &str)] = &[
    ("Bags", "Multisets"),
    ("FiniteSets", "Finite set cardinality"),
    ("Integers", "Integer arithmetic"),
    ("Naturals", "Natural number arithmetic"),
    ("Randomization", "Random subsets for model checking"),
    ("Reals", "Real number arithmetic"),
    ("RealTime", "Real-time specifications"),
    ("Sequences", "Finite sequences"),
    ("TLC", "Model checker utilities"),
];

/// Operator names without their escape marker.
pub const OPERATORS: &[&str] = &[
    "A", "E", "AA", "EE", "X", "times", "in", "notin", "cup", "cap", "union", "intersect",
    "subseteq", "subset", "supseteq", "supset", "lnot", "neg", "land", "lor", "equiv", "leq",
    "geq", "div", "cdot", "o", "circ", "bullet", "star", "bigcirc", "sim", "simeq", "asymp",
    "approx", "cong", "doteq", "prec", "succ", "preceq", "succeq", "ll", "gg", "sqsubset",
    "sqsupset", "sqsubseteq", "sqsupseteq", "sqcap", "sqcup", "uplus", "oplus", "ominus",
    "otimes", "oslash", "odot", "wr", "propto",
];

/// Looks up the Unicode glyph for a bare operator name.
///
/// Most operators have one; `\AA`, `\EE` and a few others do not and are
/// always written in ASCII.
pub fn glyph(operator: &str) -> Option<&'static str> {
    let glyph = match operator {
        "A" => "∀",
        "E" => "∃",
        "X" | "times" => "×",
        "in" => "∈",
        "notin" => "∉",
        "cup" | "union" => "∪",
        "cap" | "intersect" => "∩",
        "subseteq" => "⊆",
        "subset" => "⊂",
        "supseteq" => "⊇",
        "supset" => "⊃",
        "lnot" | "neg" => "¬",
        "land" => "∧",
        "lor" => "∨",
        "equiv" => "≡",
        "leq" => "≤",
        "geq" => "≥",
        "div" => "÷",
        "cdot" => "⋅",
        "o" | "circ" => "∘",
        "bullet" => "•",
        "star" => "⋆",
        "bigcirc" => "◯",
        "sim" => "∼",
        "simeq" => "≃",
        "asymp" => "≍",
        "approx" => "≈",
        "cong" => "≅",
        "doteq" => "≐",
        "prec" => "≺",
        "succ" => "≻",
        "preceq" => "⪯",
        "succeq" => "⪰",
        "ll" => "≪",
        "gg" => "≫",
        "sqsubset" => "⊏",
        "sqsupset" => "⊐",
        "sqsubseteq" => "⊑",
        "sqsupseteq" => "⊒",
        "sqcap" => "⊓",
        "sqcup" => "⊔",
        "uplus" => "⊎",
        "oplus" => "⊕",
        "ominus" => "⊖",
        "otimes" => "⊗",
        "oslash" => "⊘",
        "odot" => "⊙",
        "wr" => "≀",
        "propto" => "∝",
        _ => return None,
    };
    Some(glyph)
}

/// Builds the escaped label for a bare operator name, e.g. `in` -> `\in`.
pub fn operator_label(operator: &str) -> String {
    let mut label = String::with_capacity(operator.len() + 1);
    label.push(ESCAPE_MARKER);
    label.push_str(operator);
    label
}
