use std::path::PathBuf;

//==============================================================================
// Key Tree
//==============================================================================

/// A node of a locale's string tree
#[derive(Debug, Clone, PartialEq)]
pub enum KeyNode {
    /// Localized string value
    Leaf(String),
    /// Nested group of keys
    Tree(KeyTree),
}

impl KeyNode {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            KeyNode::Leaf(value) => Some(value),
            KeyNode::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&KeyTree> {
        match self {
            KeyNode::Leaf(_) => None,
            KeyNode::Tree(tree) => Some(tree),
        }
    }
}

/// Nested key → string mapping for one locale.
///
/// Keys keep their insertion order: flattening visits them in that order and
/// every exported sheet inherits it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyTree {
    entries: Vec<(String, KeyNode)>,
}

impl KeyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing an existing key in place (its position is kept)
    pub fn insert(&mut self, key: impl Into<String>, node: KeyNode) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = node,
            None => self.entries.push((key, node)),
        }
    }

    pub fn insert_leaf(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, KeyNode::Leaf(value.into()));
    }

    pub fn insert_tree(&mut self, key: impl Into<String>, tree: KeyTree) {
        self.insert(key, KeyNode::Tree(tree));
    }

    pub fn get(&self, key: &str) -> Option<&KeyNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of string leaves, at any depth
    pub fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                KeyNode::Leaf(_) => 1,
                KeyNode::Tree(tree) => tree.leaf_count(),
            })
            .sum()
    }

    /// Nest this tree under a single root key
    pub fn wrap(self, root: impl Into<String>) -> KeyTree {
        let mut wrapped = KeyTree::new();
        wrapped.insert_tree(root, self);
        wrapped
    }
}

//==============================================================================
// Flat Rows
//==============================================================================

/// One flattened string: key path, default-locale text, optional target text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub path: String,
    pub default_text: String,
    pub target_text: Option<String>,
}

impl FlatRow {
    pub fn new(path: impl Into<String>, default_text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_text: default_text.into(),
            target_text: None,
        }
    }

    pub fn with_target(mut self, target_text: impl Into<String>) -> Self {
        self.target_text = Some(target_text.into());
        self
    }

    /// Cell by sheet column: 0 = path, 1 = default text, 2 = target text
    pub fn cell(&self, column: usize) -> Option<&str> {
        match column {
            0 => Some(&self.path),
            1 => Some(&self.default_text),
            2 => self.target_text.as_deref(),
            _ => None,
        }
    }

    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = vec![self.path.clone(), self.default_text.clone()];
        if let Some(target) = &self.target_text {
            cells.push(target.clone());
        }
        cells
    }
}

/// Ordered rows plus the header row that sits at index 0 of a sheet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSet {
    pub header: Vec<String>,
    pub rows: Vec<FlatRow>,
}

impl RowSet {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: FlatRow) {
        self.rows.push(row);
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sheet grid: header first, then one line per row
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.header.clone());
        grid.extend(self.rows.iter().map(FlatRow::to_cells));
        grid
    }

    /// Build a RowSet from a sheet grid. Row 0 is the header; missing cells
    /// read as empty, and the target column is only set when the row has one.
    pub fn from_grid(grid: &[Vec<String>]) -> Self {
        let mut iter = grid.iter();
        let header = iter.next().cloned().unwrap_or_default();
        let rows = iter
            .map(|cells| FlatRow {
                path: cells.first().cloned().unwrap_or_default(),
                default_text: cells.get(1).cloned().unwrap_or_default(),
                target_text: cells.get(2).cloned(),
            })
            .collect();
        Self { header, rows }
    }
}

//==============================================================================
// Workbook / Module Shapes
//==============================================================================

/// A named grid of string cells; row 0 holds the header labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub cells: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, cells: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }
}

/// One generated leaf module: its directory (relative to the locale root)
/// and the `key: value` pairs it exports, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeafModule {
    pub dir: Vec<String>,
    pub entries: Vec<(String, String)>,
}

impl LeafModule {
    pub fn new(dir: Vec<String>) -> Self {
        Self {
            dir,
            entries: Vec::new(),
        }
    }

    /// Set a key, overwriting an earlier value for the same key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn relative_dir(&self) -> PathBuf {
        self.dir.iter().collect()
    }
}
