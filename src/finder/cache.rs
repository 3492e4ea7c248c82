use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Result;
use log::debug;

use crate::command::Command;
use crate::platform::Distribution;
use crate::rules::PlatformMatchRules;

/// Read-mostly cache of built rule tables.
///
/// Tables are keyed by distribution and command: the command's category
/// picks the table data, the command itself names the expected executable.
/// Two threads may race to build the same table; the first stored table is
/// the one every caller gets. Failed builds and missing tables are not
/// cached.
#[derive(Debug, Default)]
pub struct RuleTableCache {
    tables: RwLock<HashMap<(Distribution, Command), Arc<PlatformMatchRules>>>,
}

impl RuleTableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        distribution: Distribution,
        command: Command,
    ) -> Option<Arc<PlatformMatchRules>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(distribution, command))
            .cloned()
    }

    /// Return the cached table, or build and store it.
    ///
    /// `build` returning `Ok(None)` means the distribution has no table;
    /// that answer is passed through as is.
    pub fn get_or_build<F>(
        &self,
        distribution: Distribution,
        command: Command,
        build: F,
    ) -> Result<Option<Arc<PlatformMatchRules>>>
    where
        F: FnOnce() -> Result<Option<PlatformMatchRules>>,
    {
        if let Some(rules) = self.get(distribution, command) {
            return Ok(Some(rules));
        }

        debug!("Building {} rule table for {}", distribution, command);
        let Some(built) = build()? else {
            debug!("No {} rule table for {}", distribution, command);
            return Ok(None);
        };

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let stored = tables
            .entry((distribution, command))
            .or_insert_with(|| Arc::new(built));
        Ok(Some(Arc::clone(stored)))
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
