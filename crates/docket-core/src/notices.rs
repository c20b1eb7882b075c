use crate::drafts::KeyValueStore;
use serde::{Deserialize, Serialize};

const ACCEPTED: &str = "true";

/// Page notices whose dismissal outlives a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Disclaimer,
    Cookies,
}

impl NoticeKind {
    pub const ALL: [NoticeKind; 2] = [NoticeKind::Disclaimer, NoticeKind::Cookies];

    pub fn storage_key(self) -> &'static str {
        match self {
            NoticeKind::Disclaimer => "disclaimerAccepted",
            NoticeKind::Cookies => "cookiesAccepted",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Disclaimer => "disclaimer",
            NoticeKind::Cookies => "cookies",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            NoticeKind::Disclaimer => {
                "The information on this site is for general purposes only and does not \
                 constitute legal advice. Contacting us does not create an advocate-client \
                 relationship."
            }
            NoticeKind::Cookies => {
                "This site stores a few preferences locally to remember your choices."
            }
        }
    }
}

/// Any non-empty saved value counts as accepted.
pub fn is_accepted<S: KeyValueStore>(store: &S, kind: NoticeKind) -> Result<bool, S::Error> {
    Ok(store
        .get(kind.storage_key())?
        .is_some_and(|value| !value.is_empty()))
}

pub fn accept<S: KeyValueStore>(store: &S, kind: NoticeKind) -> Result<(), S::Error> {
    store.set(kind.storage_key(), ACCEPTED)
}

#[cfg(test)]
mod tests {
    use super::{accept, is_accepted, NoticeKind};
    use crate::drafts::{KeyValueStore, MemoryStore};

    #[test]
    fn notices_start_unaccepted() {
        let store = MemoryStore::new();
        for kind in NoticeKind::ALL {
            assert!(!is_accepted(&store, kind).unwrap());
        }
    }

    #[test]
    fn accept_persists_flag() {
        let store = MemoryStore::new();
        accept(&store, NoticeKind::Cookies).unwrap();
        assert!(is_accepted(&store, NoticeKind::Cookies).unwrap());
        assert!(!is_accepted(&store, NoticeKind::Disclaimer).unwrap());
        assert_eq!(
            store.get("cookiesAccepted").unwrap().as_deref(),
            Some("true")
        );
    }
}
