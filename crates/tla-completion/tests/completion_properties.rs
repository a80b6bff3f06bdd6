use pretty_assertions::assert_eq;
use tla_completion::catalog::{self, OPERATORS, PROOF_STARTING_KEYWORDS, STANDARD_MODULES, STARTING_KEYWORDS};
use tla_completion::{
    CompletionEngine, CompletionKind, CompletionList, DocumentInfo, Position, SymbolKind, SymbolRecord,
};

struct Module {
    symbols: Vec<SymbolRecord>,
    algorithm_lines: Option<(u32, u32)>,
}

impl Module {
    fn new() -> Self {
        Self {
            symbols: vec![
                SymbolRecord::new("pc", SymbolKind::Variable),
                SymbolRecord::new("Procs", SymbolKind::Constant),
                SymbolRecord::new("Next", SymbolKind::Function),
                SymbolRecord::new("TypeOK", SymbolKind::Property),
            ],
            algorithm_lines: Some((10, 20)),
        }
    }
}

impl DocumentInfo for Module {
    fn symbols(&self) -> &[SymbolRecord] {
        &self.symbols
    }

    fn is_inside_sub_block(&self, position: Position) -> bool {
        self.algorithm_lines
            .is_some_and(|(start, end)| position.line > start && position.line < end)
    }
}

fn complete(prefix: &str) -> CompletionList {
    complete_on_line(prefix, 0)
}

fn complete_on_line(prefix: &str, line: u32) -> CompletionList {
    let position = Position::new(line, prefix.encode_utf16().count() as u32);
    CompletionEngine::new().provide(prefix, position, &Module::new())
}

fn labels(list: &CompletionList) -> Vec<&str> {
    list.items.iter().map(|i| i.label.as_str()).collect()
}

#[test]
fn starting_keywords_at_line_start() {
    for prefix in ["", "  ", "VA", "    THEO"] {
        let list = complete(prefix);
        for (keyword, _) in STARTING_KEYWORDS {
            let item = list.items.iter().find(|i| i.label == *keyword);
            assert_eq!(item.map(|i| i.kind), Some(CompletionKind::Keyword), "{keyword} for {prefix:?}");
        }
        assert!(!list.items.iter().any(|i| i.kind == CompletionKind::Operator));
    }
}

#[test]
fn proof_keywords_after_step_number() {
    for prefix in ["<1>. ", "<12>.4 ", "<8>.a ", "  <2>1 SU"] {
        let list = complete(prefix);
        let found = labels(&list);
        for (keyword, _) in PROOF_STARTING_KEYWORDS {
            assert!(found.contains(keyword), "{keyword} missing for {prefix:?}");
        }
        for (keyword, _) in STARTING_KEYWORDS {
            assert!(!found.contains(keyword), "{keyword} leaked into {prefix:?}");
        }
    }
}

#[test]
fn escape_marker_offers_only_operators() {
    let prefix = "Init == x \\e";
    let list = complete(prefix);

    assert_eq!(list.len(), OPERATORS.len());
    for item in &list.items {
        assert_eq!(item.kind, CompletionKind::Operator);
        assert!(item.label.starts_with('\\'));
        let range = item.range.expect("operator items carry a range");
        assert_eq!(range.start, 10);
        assert_eq!(range.end, 12);
    }
}

#[test]
fn escape_marker_followed_by_space_is_general() {
    let list = complete("S \\ ");
    let found = labels(&list);

    assert!(found.contains(&"LET"));
    assert!(found.contains(&"TRUE"));
    assert!(found.contains(&"pc"));
    assert!(!list.items.iter().any(|i| i.kind == CompletionKind::Operator));
}

#[test]
fn extends_offers_exactly_standard_modules() {
    let list = complete("EXTENDS Naturals, ");
    let expected: Vec<&str> = STANDARD_MODULES.iter().map(|(name, _)| *name).collect();

    assert_eq!(labels(&list), expected);
    assert!(list.items.iter().all(|i| i.kind == CompletionKind::Module));
    assert!(!list.is_incomplete);
}

#[test]
fn constant_declaration_is_empty_and_complete() {
    for prefix in ["CONSTANT ", "CONSTANTS N, ", "RECURSIVE "] {
        let list = complete(prefix);
        assert!(list.is_empty(), "{prefix:?}");
        assert!(!list.is_incomplete);
    }
}

#[test]
fn symbols_follow_constants_in_source_order() {
    let list = complete("Spec == Init /\\ ");
    let found = labels(&list);
    let tail = &found[found.len() - 4..];

    assert_eq!(tail, ["pc", "Procs", "Next", "TypeOK"]);
    assert_eq!(list.items.last().map(|i| i.kind), Some(CompletionKind::Text));
}

#[test]
fn algorithm_block_suppresses_starting_keywords() {
    let list = complete_on_line("    VA", 15);
    let found = labels(&list);

    assert!(!found.contains(&"VARIABLES"));
    assert!(found.contains(&"pc"));

    let outside = complete_on_line("    VA", 25);
    assert!(labels(&outside).contains(&"VARIABLES"));
}

#[test]
fn catalog_items_are_unique_in_every_general_bucket() {
    for prefix in ["", "<1>. ", "x + "] {
        let list = complete(prefix);
        let catalog_labels: Vec<_> = list
            .items
            .iter()
            .filter(|i| matches!(i.kind, CompletionKind::Keyword) || catalog::CONSTANTS.iter().any(|(c, _)| *c == i.label))
            .map(|i| i.label.as_str())
            .collect();
        let mut deduped = catalog_labels.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), catalog_labels.len(), "{prefix:?}");
    }
}

#[test]
fn resolution_is_idempotent() {
    let engine = CompletionEngine::new();
    let list = complete("x \\");

    for item in list.items {
        for prefer in [true, false] {
            let once = engine.resolve(item.clone(), &prefer);
            let twice = engine.resolve(once.clone(), &prefer);
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn resolved_operators_end_in_one_space() {
    let engine = CompletionEngine::new();

    for item in complete("\\").items {
        for prefer in [true, false] {
            let text = engine.resolve(item.clone(), &prefer).insert_text.unwrap();
            assert!(!text.trim().is_empty());
            assert!(text.ends_with(' ') && !text.ends_with("  "), "{}: {text:?}", item.label);
        }
    }
}

#[test]
fn unicode_substitution_replaces_the_whole_operator() {
    let engine = CompletionEngine::new();
    let prefix = "x \\in";
    let list = complete(prefix);
    let item = list.items.into_iter().find(|i| i.label == "\\in").unwrap();
    let range = item.range.unwrap();

    let resolved = engine.resolve(item, &true);
    let text = resolved.insert_text.unwrap();

    let mut line: Vec<u16> = prefix.encode_utf16().collect();
    line.splice(range.start as usize..range.end as usize, text.encode_utf16());
    assert_eq!(String::from_utf16(&line).unwrap(), "x ∈ ");
}
