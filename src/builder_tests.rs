use super::*;

fn leaf(kind: Kind, start: u32, data: &'static [u8]) -> Node<'static> {
    Node::new(kind, Span::new(start, start + data.len() as u32), data)
}

#[test]
fn reference_sentinel() {
    assert!(!Reference::INVALID.is_valid());
    assert_eq!(Reference::INVALID.index(), None);
    assert_eq!(Reference::default(), Reference::INVALID);

    let mut builder = Builder::new();
    let r = builder.push(leaf(Kind::Integer, 0, b"1"));
    assert!(r.is_valid());
    assert_eq!(r.index(), Some(0));
    assert!(builder.get(Reference::INVALID).is_none());
}

#[test]
fn push_returns_dense_indices() {
    let mut builder = Builder::new();
    assert!(builder.is_empty());
    let refs: Vec<Reference> = (0..5)
        .map(|i| builder.push(leaf(Kind::Integer, i, b"7")))
        .collect();
    for (i, r) in refs.iter().enumerate() {
        assert_eq!(r.index(), Some(i));
    }
    assert_eq!(builder.len(), 5);
}

#[test]
fn attach_and_chain_build_first_child_next_sibling_tree() {
    let mut builder = Builder::new();
    let array = builder.push(Node::open(Kind::Array));
    let one = builder.push(leaf(Kind::Integer, 1, b"1"));
    let two = builder.push(leaf(Kind::Integer, 4, b"2"));
    let three = builder.push(leaf(Kind::Integer, 7, b"3"));

    builder.attach_child(array, one);
    builder.chain(one, two);
    builder.chain(two, three);

    let node = builder.get(array).unwrap();
    assert_eq!(node.first_child(), one);
    assert_eq!(node.next_sibling(), Reference::INVALID);

    let mut seen = Vec::new();
    let mut cursor = node.first_child();
    while let Some(n) = builder.get(cursor) {
        seen.push(n.data());
        cursor = n.next_sibling();
    }
    assert_eq!(seen, [b"1", b"2", b"3"]);
}

#[test]
fn append_tracks_the_last_child() {
    let mut builder = Builder::new();
    let table = builder.push(Node::open(Kind::InlineTable));
    let mut last = Reference::INVALID;
    for i in 0..3 {
        let kv = builder.push(Node::open(Kind::KeyValue));
        last = builder.append(table, last, kv);
        assert_eq!(last, kv, "iteration {i}");
    }
    let first = builder.get(table).unwrap().first_child();
    assert_eq!(first.index(), Some(1));
    assert_eq!(builder.get(first).unwrap().next_sibling().index(), Some(2));
    assert_eq!(builder.get(last).unwrap().next_sibling(), Reference::INVALID);
}

#[test]
fn node_at_backfills_span() {
    let mut builder = Builder::new();
    let table = builder.push(Node::open(Kind::Table));
    assert_eq!(builder.get(table).unwrap().raw(), Span::default());
    builder.node_at(table).set_raw(Span::new(0, 5));
    assert_eq!(builder.get(table).unwrap().raw(), Span::new(0, 5));
}

#[test]
fn reset_clears_but_reuses_indices() {
    let mut builder = Builder::new();
    for i in 0..10 {
        builder.push(leaf(Kind::Bool, i, b"true"));
    }
    builder.reset();
    assert!(builder.is_empty());
    let r = builder.push(leaf(Kind::Bool, 0, b"false"));
    assert_eq!(r.index(), Some(0));
    assert_eq!(builder.get(r).unwrap().data(), b"false");
}
