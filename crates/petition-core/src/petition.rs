//! Petition records and the signing form.

use crate::signature::{SignatureControl, SignatureImage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position choice that unlocks the free-text "other position" field.
pub const OTHER_POSITION: &str = "Lainnya";

/// Village-office positions offered by the form, in display order.
pub const POSITION_OPTIONS: [&str; 11] = [
    "Kepala Desa",
    "Sekretaris Desa",
    "Kaur Tata Usaha dan Umum",
    "Kaur Keuangan",
    "Kaur Perencanaan",
    "Kasi Pemerintahan",
    "Kasi Kesejahteraan",
    "Kasi Pelayanan",
    "Kepala Dusun",
    "Staf Desa",
    OTHER_POSITION,
];

/// A stored signature, as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Petitioner {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub name: String,
    pub position: String,
    pub address: String,
    /// PNG data URL of the hand-drawn signature.
    pub signature: String,
}

/// Insert payload; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPetitioner {
    pub name: String,
    pub position: String,
    pub address: String,
    pub signature: SignatureImage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Semua kolom harus diisi.")]
    MissingFields,
    #[error("Tanda tangan tidak boleh kosong.")]
    EmptySignature,
}

/// Raw field values of the signing form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetitionForm {
    pub name: String,
    pub position: String,
    pub other_position: String,
    pub address: String,
}

impl PetitionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a position; leaving "Lainnya" discards the free-text value.
    pub fn select_position(&mut self, position: &str) {
        self.position = position.to_string();
        if position != OTHER_POSITION {
            self.other_position.clear();
        }
    }

    /// The position that will be submitted.
    pub fn effective_position(&self) -> &str {
        if self.position == OTHER_POSITION {
            self.other_position.trim()
        } else {
            &self.position
        }
    }

    /// Clear every field and the signature surface.
    pub fn reset(&mut self, signature: &mut dyn SignatureControl) {
        *self = Self::default();
        signature.clear();
    }

    /// Validate required fields and take the signature image.
    pub fn submission(
        &self,
        signature: &dyn SignatureControl,
    ) -> Result<NewPetitioner, FormError> {
        let name = self.name.trim();
        let address = self.address.trim();

        // A blank "Lainnya" text leaves the position empty.
        let position = self.effective_position();
        if name.is_empty() || position.is_empty() || address.is_empty() {
            return Err(FormError::MissingFields);
        }

        if signature.is_empty() {
            return Err(FormError::EmptySignature);
        }
        let signature = signature.export_image().ok_or(FormError::EmptySignature)?;

        Ok(NewPetitioner {
            name: name.to_string(),
            position: position.to_string(),
            address: address.to_string(),
            signature,
        })
    }
}
