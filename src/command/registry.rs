//! Trigger word -> command lookup

use super::{catalog, Command};
use crate::core::error::Result;
use ahash::AHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Exported trigger table: command name -> trigger words
pub type TriggerTable = BTreeMap<String, Vec<String>>;

#[derive(Default)]
pub struct CommandRegistry {
    by_trigger: AHashMap<String, Arc<dyn Command>>,
    commands: Vec<Arc<dyn Command>>,
}

/// Both JSON renderings of the trigger table
#[derive(Debug, Clone, Serialize)]
pub struct TriggerExport {
    pub compact: String,
    pub pretty: String,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full built-in command set
    pub fn standard() -> Self {
        let mut registry = Self::new();
        catalog::register_all(&mut registry);
        tracing::debug!(
            commands = registry.commands.len(),
            triggers = registry.by_trigger.len(),
            "command registry built"
        );
        registry
    }

    /// Register `command` under each of its triggers.
    ///
    /// A trigger claimed by an earlier command now resolves to this one.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        for trigger in command.triggers() {
            let key = trigger.to_lowercase();
            if let Some(old) = self.by_trigger.insert(key, command.clone()) {
                tracing::debug!(
                    trigger,
                    replaced = old.name(),
                    by = command.name(),
                    "trigger re-registered"
                );
            }
        }
        self.commands.push(command);
    }

    pub fn get(&self, trigger: &str) -> Option<Arc<dyn Command>> {
        self.by_trigger.get(trigger).cloned()
    }

    pub fn contains(&self, trigger: &str) -> bool {
        self.by_trigger.contains_key(trigger)
    }

    pub fn len(&self) -> usize {
        self.by_trigger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_trigger.is_empty()
    }

    /// Name -> triggers, listing only triggers that still resolve to that command
    pub fn export(&self) -> TriggerTable {
        let mut table = TriggerTable::new();
        for command in &self.commands {
            let live: Vec<String> = command
                .triggers()
                .iter()
                .filter(|t| {
                    self.by_trigger
                        .get(&t.to_lowercase())
                        .is_some_and(|owner| Arc::ptr_eq(owner, command))
                })
                .map(|t| t.to_lowercase())
                .collect();
            if !live.is_empty() {
                table
                    .entry(command.name().to_string())
                    .or_default()
                    .extend(live);
            }
        }
        table
    }

    pub fn to_json(&self) -> Result<TriggerExport> {
        let table = self.export();
        Ok(TriggerExport {
            compact: serde_json::to_string(&table)?,
            pretty: serde_json::to_string_pretty(&table)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::catalog::keys::KeyTap;

    #[test]
    fn test_standard_registry_resolves_triggers() {
        let registry = CommandRegistry::standard();
        for trigger in ["left", "write", "alpha", "x-ray", "shift", "again", "type", "f12"] {
            assert!(registry.contains(trigger), "missing trigger {}", trigger);
        }
        assert_eq!(registry.get("write").unwrap().name(), "right");
        assert!(registry.get("banana").is_none());
    }

    #[test]
    fn test_no_trigger_is_a_number_word() {
        // Number words are normalized to digits before lookup, so a trigger
        // spelled as one could never match.
        let registry = CommandRegistry::standard();
        let normalizer = crate::text::NumberNormalizer::new();
        for trigger in registry.export().values().flatten() {
            assert_eq!(&normalizer.normalize(trigger), trigger);
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(KeyTap::new("first", &["go"], "a")));
        registry.register(Arc::new(KeyTap::new("second", &["go", "went"], "b")));

        assert_eq!(registry.get("go").unwrap().name(), "second");
        let table = registry.export();
        assert!(!table.contains_key("first"));
        assert_eq!(table["second"], vec!["go".to_string(), "went".to_string()]);
    }

    #[test]
    fn test_json_export_is_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(KeyTap::new("zulu", &["zulu"], "z")));
        registry.register(Arc::new(KeyTap::new("alpha", &["alpha", "alfa"], "a")));

        let export = registry.to_json().unwrap();
        assert_eq!(
            export.compact,
            r#"{"alpha":["alpha","alfa"],"zulu":["zulu"]}"#
        );
        let parsed: TriggerTable = serde_json::from_str(&export.pretty).unwrap();
        assert_eq!(parsed, registry.export());
    }
}
