//! Actor panel updates.
//!
//! Each role has an ordered list of payload fields; the first one that is
//! present and non-empty becomes the panel's data value.

use crate::playback::slots::DisplaySlots;
use crate::simulation::{DataAfter, Side, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataField {
    Encrypted,
    MessagePlain,
    Decrypted,
    FinalMessage,
}

impl DataField {
    pub fn get(self, data: &DataAfter) -> Option<&str> {
        let value = match self {
            DataField::Encrypted => data.encrypted.as_deref(),
            DataField::MessagePlain => data.message_plain.as_deref(),
            DataField::Decrypted => data.decrypted.as_deref(),
            DataField::FinalMessage => data.final_message.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

pub const PARENT_DATA_FIELDS: &[DataField] = &[DataField::Encrypted, DataField::MessagePlain];
pub const CHILD_DATA_FIELDS: &[DataField] = &[DataField::Decrypted, DataField::FinalMessage];

pub fn data_precedence(side: Side) -> &'static [DataField] {
    match side {
        Side::Parent => PARENT_DATA_FIELDS,
        Side::Child => CHILD_DATA_FIELDS,
    }
}

/// First populated field of `data` for `side`.
pub fn select_data(side: Side, data: &DataAfter) -> Option<&str> {
    data_precedence(side)
        .iter()
        .find_map(|field| field.get(data))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActorStateView;

impl ActorStateView {
    pub fn update(&self, slots: &dyn DisplaySlots, step: &Step) {
        let Some(side) = step.actor.side() else {
            return;
        };

        slots.set_status(side, &step.title);

        let Some(data) = step.data_after.as_ref() else {
            return;
        };
        match select_data(side, data) {
            Some(value) => slots.set_data(side, value),
            None => tracing::trace!(
                actor = %step.actor,
                step = %step.title,
                "Step carries no displayable data for its actor"
            ),
        }
    }
}
