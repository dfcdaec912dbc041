//! User-facing notification messages.
//!
//! Each `MessageKind` maps to a catalog key, an English fallback template with
//! positional placeholders (`{0}`, `{1}`, ...) and the number of arguments the
//! template expects. Translation lookup belongs to a `MessageCatalog`
//! implementation; this module only resolves the key and fills the placeholders.

use std::collections::HashMap;

use crate::config::Config;
use crate::errors::SyncGuardError;

/// Title shown when there is nothing else to say.
pub const APP_TITLE: &str = "SyncGuard";

/// Source of localized templates.
pub trait MessageCatalog {
    /// Template stored under `key`, or `fallback` when the key is unresolved.
    fn get(&self, key: &str, fallback: &str) -> String;
}

/// Catalog with no translations: always answers with the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackCatalog;

impl MessageCatalog for FallbackCatalog {
    fn get(&self, _key: &str, fallback: &str) -> String {
        fallback.to_string()
    }
}

/// In-memory catalog keyed by full lookup key (`"<lang>/tray/<key>"`).
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    entries: HashMap<String, String>,
}

impl MapCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }
}

impl MessageCatalog for MapCatalog {
    fn get(&self, key: &str, fallback: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Catalog key, fallback template and placeholder count for one kind of message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDef {
    pub key: &'static str,
    pub template: &'static str,
    pub arity: usize,
}

const fn entry(key: &'static str, template: &'static str, arity: usize) -> MessageDef {
    MessageDef { key, template, arity }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    ItemChanged,
    ItemCreated,
    ItemDeleted,
    ItemRenamed,
    ItemUpdated,
    FilesOrFoldersUpdated,
    FilesOrFoldersCreated,
    FilesAndFoldersChanged,
    ItemsDeleted,
    File,
    Files,
    Folder,
    Folders,
    LinkCopied,
    Connecting,
    Disconnected,
    Reconnecting,
    Listing,
    Uploading,
    Downloading,
    Syncing,
    AllSynced,
    Offline,
    Ready,
    NotAvailable,
    /// Bare application title; never looked up.
    Nothing,
}

impl MessageKind {
    pub const ALL: [MessageKind; 26] = [
        MessageKind::ItemChanged,
        MessageKind::ItemCreated,
        MessageKind::ItemDeleted,
        MessageKind::ItemRenamed,
        MessageKind::ItemUpdated,
        MessageKind::FilesOrFoldersUpdated,
        MessageKind::FilesOrFoldersCreated,
        MessageKind::FilesAndFoldersChanged,
        MessageKind::ItemsDeleted,
        MessageKind::File,
        MessageKind::Files,
        MessageKind::Folder,
        MessageKind::Folders,
        MessageKind::LinkCopied,
        MessageKind::Connecting,
        MessageKind::Disconnected,
        MessageKind::Reconnecting,
        MessageKind::Listing,
        MessageKind::Uploading,
        MessageKind::Downloading,
        MessageKind::Syncing,
        MessageKind::AllSynced,
        MessageKind::Offline,
        MessageKind::Ready,
        MessageKind::NotAvailable,
        MessageKind::Nothing,
    ];

    pub const fn def(self) -> MessageDef {
        match self {
            MessageKind::ItemChanged => entry("changed", "{0} was changed.", 1),
            MessageKind::ItemCreated => entry("created", "{0} was created.", 1),
            MessageKind::ItemDeleted => entry("deleted", "{0} was deleted.", 1),
            MessageKind::ItemRenamed => entry("renamed", "{0} was renamed to {1}.", 2),
            MessageKind::ItemUpdated => entry("updated", "{0} was updated.", 1),
            MessageKind::FilesOrFoldersUpdated => {
                entry("FilesOrFoldersUpdated", "{0} {1} have been updated", 2)
            }
            MessageKind::FilesOrFoldersCreated => {
                entry("FilesOrFoldersCreated", "{0} {1} have been created", 2)
            }
            MessageKind::FilesAndFoldersChanged => {
                entry("FilesAndFoldersChanged", "{0} {1} and {2} {3} have been updated", 4)
            }
            MessageKind::ItemsDeleted => entry("ItemsDeleted", "{0} items have been deleted.", 1),
            MessageKind::File => entry("file", "File", 0),
            MessageKind::Files => entry("files", "Files", 0),
            MessageKind::Folder => entry("folder", "Folder", 0),
            MessageKind::Folders => entry("folders", "Folders", 0),
            MessageKind::LinkCopied => entry("link_copied", "Link copied to clipboard", 0),
            MessageKind::Connecting => entry("connecting", "SyncGuard - Connecting...", 0),
            MessageKind::Disconnected => entry("disconnected", "SyncGuard - Disconnected", 0),
            MessageKind::Reconnecting => entry("reconnecting", "SyncGuard - Re-Connecting...", 0),
            MessageKind::Listing => entry("listing", "SyncGuard - Listing...", 0),
            MessageKind::Uploading => entry("uploading", "Uploading {0}", 1),
            MessageKind::Downloading => entry("downloading", "Downloading {0}", 1),
            MessageKind::Syncing => entry("syncing", "SyncGuard - Syncing", 0),
            MessageKind::AllSynced => entry("synced", "SyncGuard - All files synced", 0),
            MessageKind::Offline => entry("offline", "SyncGuard - Offline", 0),
            MessageKind::Ready => entry("ready", "SyncGuard - Ready", 0),
            MessageKind::NotAvailable => entry("not_available", "Not Available", 0),
            MessageKind::Nothing => entry("", APP_TITLE, 0),
        }
    }

    /// Variant name, as used in error messages and logs.
    pub const fn name(self) -> &'static str {
        match self {
            MessageKind::ItemChanged => "ItemChanged",
            MessageKind::ItemCreated => "ItemCreated",
            MessageKind::ItemDeleted => "ItemDeleted",
            MessageKind::ItemRenamed => "ItemRenamed",
            MessageKind::ItemUpdated => "ItemUpdated",
            MessageKind::FilesOrFoldersUpdated => "FilesOrFoldersUpdated",
            MessageKind::FilesOrFoldersCreated => "FilesOrFoldersCreated",
            MessageKind::FilesAndFoldersChanged => "FilesAndFoldersChanged",
            MessageKind::ItemsDeleted => "ItemsDeleted",
            MessageKind::File => "File",
            MessageKind::Files => "Files",
            MessageKind::Folder => "Folder",
            MessageKind::Folders => "Folders",
            MessageKind::LinkCopied => "LinkCopied",
            MessageKind::Connecting => "Connecting",
            MessageKind::Disconnected => "Disconnected",
            MessageKind::Reconnecting => "Reconnecting",
            MessageKind::Listing => "Listing",
            MessageKind::Uploading => "Uploading",
            MessageKind::Downloading => "Downloading",
            MessageKind::Syncing => "Syncing",
            MessageKind::AllSynced => "AllSynced",
            MessageKind::Offline => "Offline",
            MessageKind::Ready => "Ready",
            MessageKind::NotAvailable => "NotAvailable",
            MessageKind::Nothing => "Nothing",
        }
    }

    /// Full catalog key for `language`, e.g. `"en/tray/renamed"`.
    pub fn catalog_key(self, language: &str) -> String {
        format!("{language}/tray/{}", self.def().key)
    }
}

/// Resolve `kind` through `catalog` and fill its placeholders with `args`.
///
/// `args` must match the kind's arity exactly.
pub fn render(
    kind: MessageKind,
    catalog: &dyn MessageCatalog,
    language: &str,
    args: &[&str],
) -> Result<String, SyncGuardError> {
    let def = kind.def();
    if args.len() != def.arity {
        return Err(SyncGuardError::MessageArity {
            kind: kind.name(),
            expected: def.arity,
            actual: args.len(),
        });
    }
    if kind == MessageKind::Nothing {
        return Ok(APP_TITLE.to_string());
    }
    let template = catalog.get(&kind.catalog_key(language), def.template);
    Ok(fill_placeholders(&template, args))
}


/// [`render`] in the language chosen in `cfg`.
pub fn render_for(
    kind: MessageKind,
    catalog: &dyn MessageCatalog,
    cfg: &Config,
    args: &[&str],
) -> Result<String, SyncGuardError> {
    render(kind, catalog, &cfg.language, args)
}

/// Replace `{n}` with `args[n]` in one pass; unknown or out-of-range placeholders stay literal.
fn fill_placeholders(template: &str, args: &[&str]) -> String {
    let extra: usize = args.iter().map(|a| a.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let idx: usize = after[..close].parse().ok()?;
            args.get(idx).map(|arg| (arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_templates_are_filled() {
        let cat = FallbackCatalog;
        assert_eq!(
            render(MessageKind::ItemRenamed, &cat, "en", &["a.txt", "b.txt"]).unwrap(),
            "a.txt was renamed to b.txt."
        );
        assert_eq!(
            render(
                MessageKind::FilesAndFoldersChanged,
                &cat,
                "en",
                &["3", "Files", "2", "Folders"]
            )
            .unwrap(),
            "3 Files and 2 Folders have been updated"
        );
        assert_eq!(render(MessageKind::Ready, &cat, "en", &[]).unwrap(), "SyncGuard - Ready");
    }

    #[test]
    fn catalog_translation_wins() {
        let mut cat = MapCatalog::new();
        cat.insert("de/tray/uploading", "Lade {0} hoch");
        assert_eq!(
            render(MessageKind::Uploading, &cat, "de", &["bild.png"]).unwrap(),
            "Lade bild.png hoch"
        );
        assert_eq!(
            render(MessageKind::Uploading, &cat, "fr", &["img.png"]).unwrap(),
            "Uploading img.png"
        );
    }

    #[test]
    fn nothing_is_the_bare_title() {
        let mut cat = MapCatalog::new();
        cat.insert("en/tray/", "should not be used");
        assert_eq!(render(MessageKind::Nothing, &cat, "en", &[]).unwrap(), APP_TITLE);
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let err =
            render(MessageKind::ItemRenamed, &FallbackCatalog, "en", &["only-one"]).unwrap_err();
        match &err {
            SyncGuardError::MessageArity { kind, expected, actual } => {
                assert_eq!((*kind, *expected, *actual), ("ItemRenamed", 2, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Message 'ItemRenamed' expects 2 argument(s), got 1");
    }

    #[test]
    fn names_match_variants() {
        for kind in MessageKind::ALL {
            assert_eq!(kind.name(), format!("{kind:?}"));
        }
    }

    #[test]
    fn configured_language_selects_translation() {
        let mut cat = MapCatalog::new();
        cat.insert("de/tray/deleted", "{0} wurde entfernt.");
        let mut cfg = Config::default();
        cfg.language = "de".into();
        assert_eq!(
            render_for(MessageKind::ItemDeleted, &cat, &cfg, &["alt.txt"]).unwrap(),
            "alt.txt wurde entfernt."
        );
        assert_eq!(
            render_for(MessageKind::ItemDeleted, &cat, &Config::default(), &["alt.txt"]).unwrap(),
            "alt.txt was deleted."
        );
    }

    #[test]
    fn arity_matches_template_placeholders() {
        for kind in MessageKind::ALL {
            let def = kind.def();
            for i in 0..def.arity {
                assert!(def.template.contains(&format!("{{{i}}}")), "{kind:?} lacks {{{i}}}");
            }
            assert!(!def.template.contains(&format!("{{{}}}", def.arity)), "{kind:?}");
        }
    }

    #[test]
    fn arguments_are_not_reexpanded() {
        let out = render(MessageKind::ItemRenamed, &FallbackCatalog, "en", &["{1}", "x"]).unwrap();
        assert_eq!(out, "{1} was renamed to x.");
    }

    #[test]
    fn stray_braces_survive() {
        assert_eq!(fill_placeholders("a {b} {0} {", &["z"]), "a {b} z {");
        assert_eq!(fill_placeholders("{5}", &["z"]), "{5}");
    }

    #[test]
    fn catalog_key_includes_language() {
        assert_eq!(MessageKind::LinkCopied.catalog_key("en"), "en/tray/link_copied");
    }
}
