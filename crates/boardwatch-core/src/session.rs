// ── Network configuration edit-commit session ──
//
// Explicit state machine over the server-owned NetworkConfiguration
// document. Edits go into a draft copy; the canonical copy only ever
// changes when the device confirms a save. A failed save drops the
// session back into Editing with the draft intact, so nothing the user
// typed is lost.

use std::fmt;

use boardwatch_api::{NETWORK_CONFIGURATION, NetworkConfiguration, NetworkSetting, SubmodelClient};
use tracing::{debug, info};

use crate::error::CoreError;

/// Where the session is in the edit-commit lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Showing the canonical server copy.
    Viewing,
    /// A draft exists and accepts field updates.
    Editing,
    /// A save is in flight; the draft is frozen.
    Saving,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionMode::Viewing => "viewing",
            SessionMode::Editing => "editing",
            SessionMode::Saving => "saving",
        })
    }
}

/// An edit session over the device's network configuration.
#[derive(Debug)]
pub struct EditSession {
    client: SubmodelClient,
    canonical: NetworkConfiguration,
    draft: Option<NetworkSetting>,
    mode: SessionMode,
}

impl EditSession {
    /// Fetch the current configuration and start a session in
    /// [`Viewing`](SessionMode::Viewing).
    pub async fn load(client: SubmodelClient) -> Result<Self, CoreError> {
        let canonical = client.get_network_configuration().await?;
        Ok(Self {
            client,
            canonical,
            draft: None,
            mode: SessionMode::Viewing,
        })
    }

    /// A session over an already-fetched document (tests, offline use).
    pub fn with_document(client: SubmodelClient, canonical: NetworkConfiguration) -> Self {
        Self {
            client,
            canonical,
            draft: None,
            mode: SessionMode::Viewing,
        }
    }

    // ── State observation ────────────────────────────────────────────

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The canonical server copy. Never reflects unsaved edits.
    pub fn canonical(&self) -> &NetworkConfiguration {
        &self.canonical
    }

    /// The draft under edit, if any.
    pub fn draft(&self) -> Option<&NetworkSetting> {
        self.draft.as_ref()
    }

    /// What a renderer should display: the draft while editing, the
    /// canonical copy otherwise.
    pub fn visible_settings(&self) -> &NetworkSetting {
        self.draft
            .as_ref()
            .unwrap_or(&self.canonical.network_setting)
    }

    /// `true` if the draft differs from the canonical copy.
    pub fn is_dirty(&self) -> bool {
        self.draft
            .as_ref()
            .is_some_and(|d| *d != self.canonical.network_setting)
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Viewing → Editing: snapshot the canonical settings into a draft.
    pub fn begin_edit(&mut self) -> Result<(), CoreError> {
        if self.mode != SessionMode::Viewing {
            return Err(CoreError::InvalidTransition {
                action: "begin editing",
                mode: self.mode,
            });
        }
        self.draft = Some(self.canonical.network_setting.clone());
        self.mode = SessionMode::Editing;
        Ok(())
    }

    /// Update one field of the draft. Only existing interface/field pairs
    /// are editable; the document's shape is device-owned.
    pub fn update_field(
        &mut self,
        interface: &str,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        if self.mode != SessionMode::Editing {
            return Err(CoreError::InvalidTransition {
                action: "update a field",
                mode: self.mode,
            });
        }
        let slot = self
            .draft
            .as_mut()
            .and_then(|d| d.get_mut(interface))
            .and_then(|props| props.get_mut(field))
            .ok_or_else(|| CoreError::UnknownField {
                interface: interface.to_owned(),
                field: field.to_owned(),
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Editing → Viewing: throw the draft away.
    pub fn cancel_edit(&mut self) -> Result<(), CoreError> {
        if self.mode != SessionMode::Editing {
            return Err(CoreError::InvalidTransition {
                action: "cancel editing",
                mode: self.mode,
            });
        }
        self.draft = None;
        self.mode = SessionMode::Viewing;
        debug!("edit cancelled, draft discarded");
        Ok(())
    }

    /// Editing → Saving → Viewing on success, back to Editing on failure.
    ///
    /// Sends the whole document with `NetworkSetting` replaced by the
    /// draft, so fields this crate doesn't model survive the round trip.
    /// The canonical copy is only updated after the device confirms.
    pub async fn save(&mut self) -> Result<(), CoreError> {
        if self.mode != SessionMode::Editing {
            return Err(CoreError::InvalidTransition {
                action: "save",
                mode: self.mode,
            });
        }
        let Some(draft) = self.draft.clone() else {
            return Err(CoreError::Internal("editing without a draft".into()));
        };
        self.mode = SessionMode::Saving;

        let mut outgoing = self.canonical.clone();
        outgoing.network_setting = draft.clone();

        match self.client.patch_submodel(NETWORK_CONFIGURATION, &outgoing).await {
            Ok(()) => {
                self.canonical.network_setting = draft;
                self.draft = None;
                self.mode = SessionMode::Viewing;
                info!("network configuration saved");
                Ok(())
            }
            Err(e) => {
                self.mode = SessionMode::Editing;
                Err(match CoreError::from(e) {
                    CoreError::Api { message, status } => CoreError::SaveRejected {
                        message: match status {
                            Some(s) => format!("{message} (status {s})"),
                            None => message,
                        },
                    },
                    other => other,
                })
            }
        }
    }

    /// Re-fetch the canonical copy from the device. Only valid while
    /// Viewing, so a refresh can never clobber an in-progress edit.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        if self.mode != SessionMode::Viewing {
            return Err(CoreError::InvalidTransition {
                action: "refresh",
                mode: self.mode,
            });
        }
        self.canonical = self.client.get_network_configuration().await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boardwatch_api::TransportConfig;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use url::Url;

    use super::*;

    fn settings() -> NetworkSetting {
        let mut eth0 = IndexMap::new();
        eth0.insert("IPAddress".to_owned(), "192.168.1.50".to_owned());
        eth0.insert("SubnetMask".to_owned(), "255.255.255.0".to_owned());
        let mut map = IndexMap::new();
        map.insert("eth0".to_owned(), eth0);
        map
    }

    fn session() -> EditSession {
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let client = SubmodelClient::new(base, &TransportConfig::default()).unwrap();
        let doc = NetworkConfiguration {
            network_setting: settings(),
            last_update: None,
            extra: serde_json::Map::new(),
        };
        EditSession::with_document(client, doc)
    }

    #[test]
    fn edits_touch_only_the_draft() {
        let mut s = session();
        s.begin_edit().unwrap();
        s.update_field("eth0", "IPAddress", "10.0.0.1").unwrap();

        assert_eq!(s.canonical().network_setting["eth0"]["IPAddress"], "192.168.1.50");
        assert_eq!(s.draft().unwrap()["eth0"]["IPAddress"], "10.0.0.1");
        assert!(s.is_dirty());
    }

    #[test]
    fn reverting_an_edit_reports_clean() {
        let mut s = session();
        s.begin_edit().unwrap();
        s.update_field("eth0", "IPAddress", "10.0.0.1").unwrap();
        assert!(s.is_dirty());

        // Dirtiness is content-derived: typing the original value back in
        // means there is nothing to save.
        s.update_field("eth0", "IPAddress", "192.168.1.50").unwrap();
        assert!(!s.is_dirty());
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut s = session();
        s.begin_edit().unwrap();
        s.update_field("eth0", "IPAddress", "10.0.0.1").unwrap();
        s.cancel_edit().unwrap();

        assert_eq!(s.mode(), SessionMode::Viewing);
        assert!(s.draft().is_none());
        assert_eq!(s.visible_settings()["eth0"]["IPAddress"], "192.168.1.50");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut s = session();
        s.begin_edit().unwrap();

        let err = s.update_field("eth9", "IPAddress", "x").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField { .. }));
        let err = s.update_field("eth0", "Nonsense", "x").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField { .. }));
    }

    #[test]
    fn transitions_outside_viewing_and_editing_fail() {
        let mut s = session();
        assert!(matches!(
            s.update_field("eth0", "IPAddress", "x"),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(matches!(
            s.cancel_edit(),
            Err(CoreError::InvalidTransition { .. })
        ));

        s.begin_edit().unwrap();
        assert!(matches!(
            s.begin_edit(),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn visible_settings_follow_the_mode() {
        let mut s = session();
        assert_eq!(s.visible_settings()["eth0"]["IPAddress"], "192.168.1.50");

        s.begin_edit().unwrap();
        s.update_field("eth0", "IPAddress", "10.0.0.1").unwrap();
        assert_eq!(s.visible_settings()["eth0"]["IPAddress"], "10.0.0.1");
    }
}
