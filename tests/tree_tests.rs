use cladetally::model::{PhyloTree, TreeError, TreeModel};
use cladetally::newick::parse_str;

#[test]
fn test_building_tree() {
    let mut tree = PhyloTree::with_capacity(6).with_name("built");
    let index_l1 = tree.add_leaf(Some("Clematis_repens".to_string()), Some(1.0));
    let index_l2 = tree.add_leaf(Some("Clematis_otophora".to_string()), Some(1.0));
    let index_l3 = tree.add_leaf(Some("Clematis_tenuifolia".to_string()), Some(0.5));
    let index_i1 = tree.add_internal_vertex(vec![index_l1, index_l2], Some(97.0), Some(1.5));
    let index_root = tree.add_root(vec![index_l3, index_i1], None);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 1);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_valid());

    // Root
    let root = tree.root();
    assert_eq!(root.index(), index_root);
    assert!(root.is_root());
    assert_eq!(root.children(), &[index_l3, index_i1]);

    // Leaf
    let l2 = &tree[index_l2];
    assert!(l2.is_leaf());
    assert_eq!(l2.index(), index_l2);
    assert_eq!(l2.label(), Some("Clematis_otophora"));
    assert_eq!(l2.parent(), Some(index_i1));

    // Internal
    let inti = &tree[index_i1];
    assert!(inti.is_internal());
    assert_eq!(inti.support(), Some(97.0));
    assert_eq!(inti.branch_length(), Some(1.5));
    assert_eq!(inti.parent(), Some(index_root));
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = PhyloTree::new();
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = PhyloTree::new();
    let _ = &tree[55];
}

// ============= MRCA & Descendant Tests =============

const SAMPLE: &str = "((((A,B)90,C)80,(D,E)70)60,(F,(G,H,I)50)40,J);";

#[test]
fn test_mrca_is_symmetric_and_reflexive() {
    let tree = parse_str(SAMPLE).unwrap();
    let n = tree.num_vertices();
    for x in 0..n {
        assert_eq!(tree.mrca(x, x), Some(x));
        for y in 0..n {
            assert_eq!(tree.mrca(x, y), tree.mrca(y, x), "mrca({x}, {y})");
        }
    }
}

#[test]
fn test_mrca_is_deepest_common_ancestor() {
    let tree = parse_str(SAMPLE).unwrap();
    let leaf = |label: &str| tree.leaves_with_label(label)[0];
    let n = tree.num_vertices();

    for x in 0..n {
        for y in 0..n {
            let m = tree.mrca(x, y).unwrap();
            // m is an ancestor-or-self of both
            assert!(m == x || tree.is_strict_descendant(x, m));
            assert!(m == y || tree.is_strict_descendant(y, m));
            // no child of m is
            for &child in tree[m].children() {
                let covers = |v| v == child || tree.is_strict_descendant(v, child);
                assert!(!(covers(x) && covers(y)));
            }
        }
    }

    let ab = tree.mrca(leaf("A"), leaf("B")).unwrap();
    assert_eq!(tree[ab].support(), Some(90.0));
    let gi = tree.mrca(leaf("G"), leaf("I")).unwrap();
    assert_eq!(tree[gi].support(), Some(50.0));
    assert_eq!(tree.mrca(leaf("A"), leaf("J")), Some(tree.root_index()));
}

#[test]
fn test_strict_descendant() {
    let tree = parse_str(SAMPLE).unwrap();
    let a = tree.leaves_with_label("A")[0];
    let ab = tree[a].parent().unwrap();
    let abc = tree[ab].parent().unwrap();

    assert!(tree.is_strict_descendant(a, ab));
    assert!(tree.is_strict_descendant(ab, abc));
    assert!(tree.is_strict_descendant(a, tree.root_index()));
    assert!(!tree.is_strict_descendant(ab, ab));
    assert!(!tree.is_strict_descendant(abc, ab));
    assert!(!tree.is_strict_descendant(tree.root_index(), a));
}

#[test]
fn test_depth_and_traversal_order() {
    let tree = parse_str("((A,B)90,(C,D)80);").unwrap();
    assert_eq!(tree.depth(tree.root_index()), 0);
    assert_eq!(tree.depth(tree.leaves_with_label("D")[0]), 2);

    let labels: Vec<_> = tree.leaf_labels().collect();
    assert_eq!(labels, ["A", "B", "C", "D"]);
}

// ============= TreeModel Tests =============

#[test]
fn test_tree_model_queries() {
    let tree = parse_str("((A,B)90,C);").unwrap();
    let a = TreeModel::find_by_label(&tree, "A").unwrap()[0];
    let b = TreeModel::find_by_label(&tree, "B").unwrap()[0];
    let c = TreeModel::find_by_label(&tree, "C").unwrap()[0];

    let ab = TreeModel::mrca(&tree, a, b).unwrap();
    assert_eq!(TreeModel::support(&tree, ab).unwrap(), 90.0);
    assert!(TreeModel::is_descendant(&tree, ab, TreeModel::mrca(&tree, a, c).unwrap()).unwrap());
    assert_eq!(TreeModel::label(&tree, c), Some("C"));
    assert!(TreeModel::find_by_label(&tree, "Z").unwrap().is_empty());
}

#[test]
fn test_tree_model_rejects_foreign_vertices() {
    let tree = parse_str("((A,B)90,C);").unwrap();
    let beyond = tree.num_vertices();
    assert!(matches!(
        TreeModel::mrca(&tree, 0, beyond),
        Err(TreeError::UnknownVertex(_))
    ));
    assert!(TreeModel::is_descendant(&tree, beyond, 0).is_err());
    assert!(TreeModel::support(&tree, beyond).is_err());
    assert_eq!(TreeModel::label(&tree, beyond), None);
}
