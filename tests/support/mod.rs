//! Fixture builders shared by the integration tests.
//!
//! Trees are assembled with `Node::insert` at the decoder's own layout
//! paths, so fixtures follow any layout change automatically.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use cfgmeta::core::model::EntityKind;
use cfgmeta::decode::layout::{self, configuration as props, kind_layout, requisite, tabular_section};
use cfgmeta::store::deflate_text;
use cfgmeta::store::mock::MockStore;
use cfgmeta::tree::Node;

pub const CONFIGURATION_KEY: &str = "conf-1";

pub fn atom(text: impl Into<String>) -> Node {
    Node::Atom(text.into())
}

pub fn string(text: impl Into<String>) -> Node {
    Node::Str(text.into())
}

pub fn parse(text: &str) -> Node {
    Node::parse(text).expect("fixture text parses")
}

/// Synonym record; `None` writes an absent flag.
pub fn synonym(text: Option<&str>) -> Node {
    match text {
        Some(text) => Node::List(vec![atom("1"), string("en"), string(text)]),
        None => Node::List(vec![atom("0")]),
    }
}

/// Identity record carrying its own id.
pub fn record(id: &str, name: &str, syn: Option<&str>) -> Node {
    Node::List(vec![
        atom("0"),
        Node::List(vec![atom("0"), atom("0"), atom(id)]),
        string(name),
        synonym(syn),
    ])
}

/// Counted list: `{tag, n, items...}`.
pub fn counted(tag: &str, items: Vec<Node>) -> Node {
    let mut children = vec![atom(tag), atom(items.len().to_string())];
    children.extend(items);
    Node::List(children)
}

/// Requisite list item (long path).
pub fn requisite(id: &str, name: &str, types: &str) -> Node {
    let mut item = Node::List(Vec::new());
    item.insert(requisite::IDENTITY, record(id, name, None));
    item.insert(requisite::TYPES, parse(types));
    item
}

/// Requisite list item (short path, document journal graphs).
pub fn graph(id: &str, name: &str, types: &str) -> Node {
    let mut item = Node::List(Vec::new());
    item.insert(requisite::SHORT_IDENTITY, record(id, name, None));
    item.insert(requisite::SHORT_TYPES, parse(types));
    item
}

/// Tabular section list item.
pub fn tabular(id: &str, name: &str, requisites: Vec<Node>) -> Node {
    let mut item = Node::List(Vec::new());
    item.insert(tabular_section::IDENTITY, record(id, name, None));
    item.insert(tabular_section::REQUISITES, counted("reqs", requisites));
    item
}

/// Section identified by `guid`: `{guid, n, items...}`.
pub fn section(guid: &str, items: Vec<Node>) -> Node {
    counted(guid, items)
}

/// Object tree of a top-level object with dispatched sections.
pub fn object(kind: EntityKind, name: &str, syn: Option<&str>, sections: Vec<Node>) -> Node {
    let mut tree = Node::List(Vec::new());
    tree.insert(kind_layout(kind).identity, record("unused", name, syn));
    tree.insert(&[2], atom(sections.len().to_string()));
    for (i, section) in sections.into_iter().enumerate() {
        tree.insert(&[3 + i], section);
    }
    tree
}

/// Object tree of a constant.
pub fn constant(name: &str, types: &str) -> Node {
    let mut tree = Node::List(Vec::new());
    tree.insert(kind_layout(EntityKind::Constant).identity, record("unused", name, None));
    tree.insert(layout::CONSTANT_TYPES, parse(types));
    tree
}

/// Object tree of a document journal.
pub fn journal(name: &str, graphs: Vec<Node>) -> Node {
    let mut tree = Node::List(Vec::new());
    tree.insert(
        kind_layout(EntityKind::DocumentJournal).identity,
        record("unused", name, None),
    );
    tree.insert(layout::DOCUMENT_JOURNAL_GRAPHS, counted("graphs", graphs));
    tree
}

/// Object tree of a recalculation.
pub fn recalculation(id: &str, name: &str) -> Node {
    let mut tree = Node::List(Vec::new());
    tree.insert(layout::RECALCULATION_IDENTITY, record(id, name, None));
    tree
}

/// A whole configuration: root blob, configuration tree and object blobs.
pub struct ConfigFixture {
    tree: Node,
    blobs: Vec<(String, String)>,
}

impl ConfigFixture {
    pub fn new(name: &str) -> Self {
        let mut tree = Node::List(Vec::new());
        tree.insert(props::NAME, string(name));
        tree.insert(props::SYNONYM, synonym(None));
        tree.insert(props::COMMENT, string(""));
        tree.insert(props::SUPPLIER, string("Acme"));
        tree.insert(props::VERSION, string("2.1"));
        tree.insert(props::LOCKING_MODE, atom("2"));
        tree.insert(props::COMPATIBILITY_MODE, string("8.3.14"));
        for kind in EntityKind::ALL {
            tree.insert(kind_layout(kind).object_list, counted("objects", Vec::new()));
        }
        Self {
            tree,
            blobs: Vec::new(),
        }
    }

    /// List `key` under `kind` and store its object tree.
    pub fn object(mut self, kind: EntityKind, key: &str, tree: Node) -> Self {
        let list_path = kind_layout(kind).object_list;
        let count = self
            .tree
            .cursor()
            .at(list_path)
            .and_then(|list| list.at(&[1]).map(|c| c.as_count()))
            .expect("object list exists")
            .expect("object count is numeric");
        let mut list_path_item = list_path.to_vec();
        list_path_item.push(2 + count);
        self.tree.insert(&list_path_item, atom(key));
        let mut count_path = list_path.to_vec();
        count_path.push(1);
        self.tree.insert(&count_path, atom((count + 1).to_string()));
        self.blob(key, tree)
    }

    /// Store a blob that is not listed (recalculations).
    pub fn blob(mut self, key: &str, tree: Node) -> Self {
        self.blobs.push((key.to_string(), tree.to_string()));
        self
    }

    /// Replace the configuration tree value at `path`.
    pub fn set(mut self, path: &[usize], value: Node) -> Self {
        self.tree.insert(path, value);
        self
    }

    fn all_blobs(&self) -> Vec<(String, String)> {
        let mut blobs = vec![
            ("root".to_string(), format!("{{0,{}}}", CONFIGURATION_KEY)),
            (CONFIGURATION_KEY.to_string(), self.tree.to_string()),
        ];
        blobs.extend(self.blobs.iter().cloned());
        blobs
    }

    /// In-memory store with every blob deflated.
    pub fn mock(&self) -> MockStore {
        self.all_blobs()
            .into_iter()
            .fold(MockStore::new(), |store, (key, text)| store.with_config(&key, &text))
    }

    /// In-memory store with every blob uncompressed.
    pub fn mock_plain(&self) -> MockStore {
        self.all_blobs()
            .into_iter()
            .fold(MockStore::new(), |store, (key, text)| {
                store.with_config_plain(&key, &text)
            })
    }

    /// Write a dump directory readable by `DirStore`.
    pub fn write_dump(&self, root: &Path) {
        let config = root.join("Config");
        fs::create_dir_all(&config).unwrap();
        for (key, text) in self.all_blobs() {
            fs::write(config.join(key), deflate_text(&text).unwrap()).unwrap();
        }
    }
}
