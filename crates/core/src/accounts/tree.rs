//! Account hierarchy held as an arena indexed by code.
//!
//! The parent/child relation is rebuilt once per report as an adjacency
//! list, so no account ever holds a reference to another one.

use std::collections::{HashMap, HashSet};

use super::types::Account;

/// Arena of accounts with a parent-to-children adjacency list.
#[derive(Debug, Clone, Default)]
pub struct AccountTree {
    nodes: Vec<Account>,
    index: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl AccountTree {
    /// Builds the tree. Later duplicates of a code are ignored.
    #[must_use]
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut nodes = Vec::new();
        let mut index = HashMap::new();
        for account in accounts {
            if index.contains_key(&account.code) {
                continue;
            }
            index.insert(account.code.clone(), nodes.len());
            nodes.push(account);
        }

        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();
        for (idx, account) in nodes.iter().enumerate() {
            match account
                .parent_account
                .as_deref()
                .and_then(|parent| index.get(parent))
            {
                Some(&parent) if parent != idx => children[parent].push(idx),
                _ => roots.push(idx),
            }
        }

        let order_key = |idx: &usize| (nodes[*idx].lft, nodes[*idx].code.clone());
        roots.sort_by_key(order_key);
        for siblings in &mut children {
            siblings.sort_by_key(order_key);
        }

        Self {
            nodes,
            index,
            children,
            roots,
        }
    }

    /// Number of accounts in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up an account by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Account> {
        self.index.get(code).map(|&idx| &self.nodes[idx])
    }

    /// Parent codes referenced by some account but absent from the arena.
    #[must_use]
    pub fn missing_parents(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .nodes
            .iter()
            .filter_map(|account| account.parent_account.as_deref())
            .filter(|parent| !self.index.contains_key(*parent))
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// Returns true if the account or any ancestor sets "include in gross".
    ///
    /// Unknown codes and broken parent links end the walk; a cycle is cut
    /// at the first repeated code.
    #[must_use]
    pub fn include_in_gross(&self, code: &str) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = self.get(code);
        while let Some(account) = cursor {
            if !seen.insert(account.code.as_str()) {
                return false;
            }
            if account.include_in_gross {
                return true;
            }
            cursor = account
                .parent_account
                .as_deref()
                .and_then(|parent| self.get(parent));
        }
        false
    }

    /// Accounts in pre-order, siblings ordered by their left key.
    ///
    /// Accounts only reachable through a parent cycle are appended at the
    /// end in left-key order, so every account is visited exactly once.
    #[must_use]
    pub fn preorder(&self) -> Vec<&Account> {
        let mut visited = vec![false; self.nodes.len()];
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();

        while let Some(idx) = stack.pop() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            out.push(&self.nodes[idx]);
            stack.extend(self.children[idx].iter().rev().copied());
        }

        let mut stragglers: Vec<usize> = (0..self.nodes.len()).filter(|&i| !visited[i]).collect();
        stragglers.sort_by_key(|&idx| (self.nodes[idx].lft, self.nodes[idx].code.clone()));
        out.extend(stragglers.into_iter().map(|idx| &self.nodes[idx]));
        out
    }
}
