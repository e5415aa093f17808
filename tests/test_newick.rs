use cladetally::model::{DEFAULT_SUPPORT, ParseNewick, PhyloTree, TreeModel};
use cladetally::newick::{NewickParser, parse_named_str, parse_str, repair_newick};
use cladetally::parser::ParsingErrorType;
use cladetally::parser::byte_parser::ByteParser;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree_with_support() {
    let newick = "((A:1.0,B:2.0)95:3.0,C:4.0)100:0.5;";
    let mut parser = ByteParser::for_str(newick);
    let tree = NewickParser::new()
        .with_num_leaves(3)
        .parse_str(&mut parser)
        .unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    assert_eq!(root.support(), Some(100.0));
    let root_children = root.children();
    assert_eq!(root_children.len(), 2);

    // - Internal vertex has children (A, B) and support 95
    let internal = tree.vertex(root_children[0]);
    assert!(internal.is_internal());
    assert_eq!(internal.support(), Some(95.0));
    assert_eq!(internal.branch_length(), Some(3.0));
    let leaves: Vec<_> = internal
        .children()
        .iter()
        .map(|&i| tree.vertex(i).label().unwrap())
        .collect();
    assert_eq!(leaves, ["A", "B"]);

    // - Parent relationships
    assert_eq!(internal.parent(), Some(tree.root_index()));
    assert_eq!(tree.vertex(root_children[1]).label(), Some("C"));
    assert_eq!(tree.vertex(root_children[1]).parent(), Some(tree.root_index()));
}

#[test]
fn test_polytomy_and_unary_root() {
    let tree = parse_str("(((A:1,SOI:1)95:1,B:1)90:1);").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.root().children().len(), 1);

    let tree = parse_str("(A,B,C,D)80;").unwrap();
    assert_eq!(tree.root().children().len(), 4);
    assert_eq!(tree.num_internal(), 0);
}

#[test]
fn test_missing_support_defaults() {
    let tree = parse_str("((A,B),C);").unwrap();
    let clade = tree.root().children()[0];
    assert_eq!(tree.vertex(clade).support(), None);
    assert_eq!(TreeModel::support(&tree, clade).unwrap(), DEFAULT_SUPPORT);

    let a = tree.leaves_with_label("A")[0];
    assert_eq!(TreeModel::support(&tree, a).unwrap(), DEFAULT_SUPPORT);
}

#[test]
fn test_quoted_labels_and_comments() {
    let newick = "(('Clematis tangutica':1,'it''s'[&note]:2)[&&NHX:S=x]77,C) ;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.leaves_with_label("Clematis tangutica").len(), 1);
    assert_eq!(tree.leaves_with_label("it's").len(), 1);
    let clade = tree.root().children()[0];
    assert_eq!(tree.vertex(clade).support(), Some(77.0));
}

#[test]
fn test_whitespace_between_tokens() {
    let tree = parse_str(" ( ( A : 1 , B : 2 ) 88 : 1 ,\n C : 1 ) ;\n").unwrap();
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.vertex(tree.root().children()[0]).support(), Some(88.0));
}

#[test]
fn test_named_tree() {
    let tree = parse_named_str("gene42_cds", "(A,B);").unwrap();
    assert_eq!(tree.name(), Some("gene42_cds"));

    let tree = PhyloTree::from_named_newick("gene7_cds", "(A,B);").unwrap();
    assert_eq!(TreeModel::name(&tree), Some("gene7_cds"));
}

// --- TESTS INVALID INPUT ---
#[test]
fn test_non_numeric_support_is_rejected() {
    let error = parse_str("((A,B)high,C);").unwrap_err();
    assert!(matches!(error.kind(), ParsingErrorType::InvalidSupportValue(_)));
}

#[test]
fn test_invalid_branch_length_is_rejected() {
    let error = parse_str("((A,B):long,C);").unwrap_err();
    assert!(matches!(error.kind(), ParsingErrorType::InvalidBranchLength(_)));
}

#[test]
fn test_truncated_input() {
    let error = parse_str("((A,B)90,C").unwrap_err();
    assert!(matches!(error.kind(), ParsingErrorType::UnexpectedEOF));
}

#[test]
fn test_unclosed_comment() {
    let error = parse_str("((A,B)90,C)[unfinished;").unwrap_err();
    assert!(matches!(error.kind(), ParsingErrorType::UnclosedComment));
}

#[test]
fn test_invalid_structure() {
    for newick in ["A;", "((A,B),C);(D,E);", "((A,B),C)", ""] {
        assert!(PhyloTree::from_newick(newick).is_err(), "accepted {newick:?}");
    }
}

// --- TESTS REPAIR + PARSE ---
#[test]
fn test_repaired_text_parses_with_placeholder_support() {
    let raw = "((A:1,B:1):1,(C:1,D:1):1);";
    let repaired = repair_newick(raw);
    assert_eq!(repaired, "((A:1,B:1)0:1,(C:1,D:1)0:1);");

    let tree = parse_str(&repaired).unwrap();
    for &child in tree.root().children() {
        assert_eq!(tree.vertex(child).support(), Some(0.0));
    }
}

#[test]
fn test_repair_only_touches_closing_parentheses() {
    let raw = "((A:1,B:1)85:1,(C,(D,E)):2)100;";
    let repaired = repair_newick(raw);
    assert_eq!(repaired, "((A:1,B:1)85:1,(C,(D,E)0)0:2)100;");

    // removing every inserted placeholder gives back the input
    assert_eq!(repaired.replace(")0", ")"), raw);
}

#[test]
fn test_repair_is_idempotent_on_parseable_trees() {
    for raw in ["((A,B),C);", "((A,B)90,(C,D));", "(((A,B)),C)100;"] {
        let once = repair_newick(raw);
        assert_eq!(repair_newick(&once), once);
        assert!(parse_str(&once).is_ok());
    }
}
