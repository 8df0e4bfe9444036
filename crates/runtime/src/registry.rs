//! Behavior-type registration surface.
//!
//! The host engine discovers pluggable region behaviors through a registry of
//! descriptors (schema fields plus display metadata) and dispatches region
//! events to the registered handlers. This module composes the descriptor and
//! handler instead of extending a host behavior class.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use behavior_core::{DelayedTeleportConfig, MODULE_ID, RegionEvent, TokenId};

use crate::controller::CountdownController;
use crate::error::{Result, RuntimeError};

/// Behavior type key the host registers this module under.
pub const BEHAVIOR_KEY: &str = "delayed-teleport.delayedTeleportToken";

/// Display icon shown in the region behavior picker.
pub const BEHAVIOR_ICON: &str = "fa-solid fa-timer";

/// Schema kind of a single user-facing configuration field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Number { required: bool },
    Boolean { initial: bool },
}

/// One user-facing configuration field of a behavior type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Localization key for the field label.
    pub label: String,
    /// Localization key for the field hint.
    pub hint: String,
}

impl FieldSpec {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            label: format!("{MODULE_ID}.FIELDS.{name}.name"),
            hint: format!("{MODULE_ID}.FIELDS.{name}.hint"),
        }
    }
}

/// Everything the host needs to present a behavior type to end users.
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorDescriptor {
    pub key: String,
    pub display_name: String,
    pub icon: String,
    /// Localization namespaces searched for field labels and hints; the base
    /// teleport behavior's prefixes come first so its fields keep their
    /// standard labels.
    pub localization_prefixes: Vec<String>,
    /// Fields this behavior adds on top of the base teleport behavior's.
    pub fields: Vec<FieldSpec>,
}

impl BehaviorDescriptor {
    /// The delayed-teleport behavior type: the base teleport fields plus
    /// `delayAmount` (required number) and `showCountdown` (boolean,
    /// initially true).
    pub fn delayed_teleport() -> Self {
        Self {
            key: BEHAVIOR_KEY.to_owned(),
            display_name: "Delayed Teleport Token".to_owned(),
            icon: BEHAVIOR_ICON.to_owned(),
            localization_prefixes: vec![
                "BEHAVIOR.TYPES.teleportToken".to_owned(),
                MODULE_ID.to_owned(),
            ],
            fields: vec![
                FieldSpec::new("delayAmount", FieldKind::Number { required: true }),
                FieldSpec::new("showCountdown", FieldKind::Boolean { initial: true }),
            ],
        }
    }
}

/// Event handlers a region behavior registers against move-in/move-out.
#[async_trait]
pub trait RegionEventHandlers: Send + Sync {
    async fn on_token_move_in(
        &self,
        token: &TokenId,
        config: &DelayedTeleportConfig,
    ) -> Result<()>;

    async fn on_token_move_out(&self, token: &TokenId) -> Result<()>;
}

#[async_trait]
impl RegionEventHandlers for CountdownController {
    async fn on_token_move_in(
        &self,
        token: &TokenId,
        config: &DelayedTeleportConfig,
    ) -> Result<()> {
        CountdownController::on_token_move_in(self, token, config).await
    }

    async fn on_token_move_out(&self, token: &TokenId) -> Result<()> {
        CountdownController::on_token_move_out(self, token).await
    }
}

struct RegisteredBehavior {
    descriptor: BehaviorDescriptor,
    handlers: Arc<dyn RegionEventHandlers>,
}

/// Registry of behavior types, keyed by the host-facing behavior key.
///
/// The host queries descriptors to render its authoring UI and routes region
/// events to the matching handlers.
#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: HashMap<String, RegisteredBehavior>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a behavior type. Keys must be unique.
    pub fn register(
        &mut self,
        descriptor: BehaviorDescriptor,
        handlers: Arc<dyn RegionEventHandlers>,
    ) -> Result<()> {
        let key = descriptor.key.clone();
        if self.behaviors.contains_key(&key) {
            return Err(RuntimeError::DuplicateBehavior(key));
        }
        self.behaviors.insert(
            key,
            RegisteredBehavior {
                descriptor,
                handlers,
            },
        );
        Ok(())
    }

    pub fn descriptor(&self, key: &str) -> Option<&BehaviorDescriptor> {
        self.behaviors.get(key).map(|behavior| &behavior.descriptor)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    /// Routes a region event to the behavior registered under `key`.
    pub async fn dispatch(&self, key: &str, event: RegionEvent) -> Result<()> {
        let behavior = self
            .behaviors
            .get(key)
            .ok_or_else(|| RuntimeError::UnknownBehavior(key.to_owned()))?;

        debug!(behavior = key, kind = ?event.kind(), token = %event.token(), "dispatching region event");
        match &event {
            RegionEvent::TokenMoveIn { token, config } => {
                behavior.handlers.on_token_move_in(token, config).await
            }
            RegionEvent::TokenMoveOut { token } => {
                behavior.handlers.on_token_move_out(token).await
            }
        }
    }
}

/// Field schema rendered as the host's raw field description map, used when
/// the host wants plain data instead of [`FieldSpec`] values.
pub fn schema_as_values(descriptor: &BehaviorDescriptor) -> HashMap<String, Value> {
    descriptor
        .fields
        .iter()
        .map(|field| {
            let value = match &field.kind {
                FieldKind::Number { required } => serde_json::json!({
                    "type": "number",
                    "required": required,
                    "label": field.label,
                    "hint": field.hint,
                }),
                FieldKind::Boolean { initial } => serde_json::json!({
                    "type": "boolean",
                    "initial": initial,
                    "label": field.label,
                    "hint": field.hint,
                }),
            };
            (field.name.clone(), value)
        })
        .collect()
}
